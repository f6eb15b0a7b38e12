//! In-memory batch browsing: filtering, sorting, and pagination
//!
//! This is the portal listing logic: a search term matched against
//! species and id, an optional status filter, three sort keys, and page
//! slicing over the resulting set.

use shared::{
    BatchStatus, HarvestBatch, PaginatedResponse, Pagination, PaginationMeta, SortOrder,
};

/// Sort key for batch listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchSortKey {
    #[default]
    HarvestDate,
    Weight,
    Grade,
}

/// A batch listing query
#[derive(Debug, Clone, Default)]
pub struct BatchQuery {
    /// Case-insensitive match against species or id
    pub search: Option<String>,
    pub status: Option<BatchStatus>,
    pub sort_by: BatchSortKey,
    pub order: SortOrder,
    pub pagination: Pagination,
}

impl BatchQuery {
    /// Run the query over a batch collection, newest-first by default
    pub fn run(&self, batches: &[HarvestBatch]) -> PaginatedResponse<HarvestBatch> {
        let search = self.search.as_deref().map(str::to_lowercase);

        let mut matched: Vec<&HarvestBatch> = batches
            .iter()
            .filter(|b| {
                let matches_search = search.as_deref().map_or(true, |term| {
                    b.species.to_lowercase().contains(term)
                        || b.id.to_string().to_lowercase().contains(term)
                });
                let matches_status = self.status.map_or(true, |s| b.status == s);
                matches_search && matches_status
            })
            .collect();

        matched.sort_by(|a, b| {
            let ordering = match self.sort_by {
                BatchSortKey::HarvestDate => a.harvest_date.cmp(&b.harvest_date),
                BatchSortKey::Weight => a.weight_kg.cmp(&b.weight_kg),
                // Absent grades compare as empty strings
                BatchSortKey::Grade => a
                    .quality_grade
                    .as_deref()
                    .unwrap_or("")
                    .cmp(b.quality_grade.as_deref().unwrap_or("")),
            };
            match self.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let per_page = self.pagination.per_page.max(1);
        let page = self.pagination.page.max(1);
        let total_items = matched.len() as u64;
        let total_pages = total_items.div_ceil(per_page as u64) as u32;

        let data = matched
            .into_iter()
            .skip(((page - 1) * per_page) as usize)
            .take(per_page as usize)
            .cloned()
            .collect();

        PaginatedResponse {
            data,
            pagination: PaginationMeta {
                page,
                per_page,
                total_items,
                total_pages,
            },
        }
    }
}
