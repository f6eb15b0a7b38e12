//! Grading Oracle client
//!
//! Client for the hosted generative-text service that grades harvest
//! descriptions and summarizes market trends. The Oracle is an opaque,
//! possibly-unavailable dependency: every transport, schema, or parse
//! failure is normalized into [`GradingOutcome::Unavailable`] (structured
//! call) or a fixed fallback string (overview call). Callers never see an
//! error from the public methods.

use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::OracleConfig;
use crate::error::{AppError, AppResult};

/// Fallback text for the market overview when the Oracle cannot be reached
pub const MARKET_OVERVIEW_FALLBACK: &str = "Unable to fetch live market insights.";

/// Placeholder grade recorded when no analysis is available
pub const GRADE_UNAVAILABLE: &str = "N/A";

/// Client for the grading Oracle
#[derive(Clone)]
pub struct GradingClient {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    http_client: Client,
}

/// Structured quality judgment returned by the Oracle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HarvestAnalysis {
    /// Quality grade (A, B, C)
    pub grade: String,
    /// Estimated USD price per kg
    pub estimated_value_per_kg: Decimal,
    /// Reasoning for the grade
    pub reasoning: String,
    /// Brief market outlook
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_trend: Option<String>,
}

/// Outcome of a grading request
///
/// Callers must handle both branches: grading is an enrichment, and
/// `Unavailable` is indistinguishable from "analysis intentionally
/// skipped" as far as the data model is concerned.
#[derive(Debug, Clone, PartialEq)]
pub enum GradingOutcome {
    Graded(HarvestAnalysis),
    Unavailable { reason: String },
}

impl GradingOutcome {
    /// Outcome for a submission where the farmer skipped analysis
    pub fn skipped() -> Self {
        GradingOutcome::Unavailable {
            reason: "Analysis skipped by submitter".to_string(),
        }
    }

    /// The grade text to record on a batch, substituting the
    /// textual placeholder when no analysis is available
    pub fn grade_label(&self) -> String {
        match self {
            GradingOutcome::Graded(analysis) => analysis.grade.clone(),
            GradingOutcome::Unavailable { .. } => GRADE_UNAVAILABLE.to_string(),
        }
    }

    /// The structured analysis, if grading succeeded
    pub fn analysis(&self) -> Option<&HarvestAnalysis> {
        match self {
            GradingOutcome::Graded(analysis) => Some(analysis),
            GradingOutcome::Unavailable { .. } => None,
        }
    }
}

/// Request body for the generateContent endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

/// Response from the generateContent endpoint
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated candidate text, mirroring the hosted SDK's `text` accessor
    fn text(&self) -> Option<String> {
        let text: String = self
            .candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl HarvestAnalysis {
    /// Parse the JSON candidate text of a structured grading response
    pub fn from_candidate_text(text: &str) -> AppResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| AppError::Oracle(format!("Failed to parse analysis: {}", e)))
    }
}

impl GradingClient {
    /// Create a new grading client from Oracle configuration
    pub fn new(config: &OracleConfig) -> Self {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            http_client,
        }
    }

    /// Whether an API credential is present
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Analyze a harvest-condition description for quality grading and
    /// market value.
    ///
    /// Never errors and never panics: an unconfigured client or any call
    /// failure yields [`GradingOutcome::Unavailable`]. One outbound call
    /// per invocation; no retries, no caching.
    pub async fn analyze_harvest(&self, description: &str) -> GradingOutcome {
        let Some(api_key) = self.api_key.as_deref() else {
            return GradingOutcome::Unavailable {
                reason: "AI grading is not configured (no API credential present)".to_string(),
            };
        };

        match self.request_analysis(api_key, description).await {
            Ok(analysis) => GradingOutcome::Graded(analysis),
            Err(e) => {
                tracing::warn!("Harvest analysis unavailable: {}", e);
                GradingOutcome::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Fetch a free-text summary of global seaweed market trends.
    ///
    /// Always returns non-empty text: any failure (including a missing
    /// credential) yields the fixed fallback string.
    pub async fn market_overview(&self) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            return MARKET_OVERVIEW_FALLBACK.to_string();
        };

        match self.request_overview(api_key).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Market overview unavailable: {}", e);
                MARKET_OVERVIEW_FALLBACK.to_string()
            }
        }
    }

    /// Issue the structured grading request
    async fn request_analysis(
        &self,
        api_key: &str,
        description: &str,
    ) -> AppResult<HarvestAnalysis> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: format!(
                        "Analyze this seaweed harvest description for quality grading \
                         and market value: {}",
                        description
                    ),
                }],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: json!({
                    "type": "OBJECT",
                    "properties": {
                        "grade": { "type": "STRING", "description": "Quality grade (A, B, C)" },
                        "estimatedValuePerKg": { "type": "NUMBER", "description": "Estimated USD price per kg" },
                        "reasoning": { "type": "STRING", "description": "Reasoning for the grade" },
                        "marketTrend": { "type": "STRING", "description": "Brief market outlook" }
                    },
                    "required": ["grade", "estimatedValuePerKg", "reasoning"]
                }),
            }),
        };

        let response = self.generate_content(api_key, &request).await?;
        let text = response
            .text()
            .ok_or_else(|| AppError::Oracle("Response contained no candidate text".to_string()))?;

        HarvestAnalysis::from_candidate_text(&text)
    }

    /// Issue the unstructured market-trends request
    async fn request_overview(&self, api_key: &str) -> AppResult<String> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: "Generate a summary of global seaweed trade trends for 2024-2025 \
                           focusing on sustainability and pharmaceutical demand."
                        .to_string(),
                }],
            }],
            generation_config: None,
        };

        let response = self.generate_content(api_key, &request).await?;
        response
            .text()
            .ok_or_else(|| AppError::Oracle("Response contained no candidate text".to_string()))
    }

    async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> AppResult<GenerateContentResponse> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);

        let response = self
            .http_client
            .post(&url)
            .query(&[("key", api_key)])
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::Oracle(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Oracle(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Oracle(format!("Failed to parse response: {}", e)))
    }
}
