//! Validation utilities for the Seaweed Trade Platform

use rust_decimal::Decimal;

/// Validate a species label is non-empty
pub fn validate_species(species: &str) -> Result<(), &'static str> {
    if species.trim().is_empty() {
        return Err("Species must not be empty");
    }
    Ok(())
}

/// Validate a batch weight is strictly positive
pub fn validate_weight_kg(weight_kg: Decimal) -> Result<(), &'static str> {
    if weight_kg <= Decimal::ZERO {
        return Err("Weight must be greater than zero");
    }
    Ok(())
}

/// Validate a harvest-condition description before sending it for grading.
/// The grading contract assumes callers never submit empty text.
pub fn validate_harvest_description(description: &str) -> Result<(), &'static str> {
    if description.trim().is_empty() {
        return Err("Harvest description must not be empty");
    }
    Ok(())
}
