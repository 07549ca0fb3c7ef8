use super::RecipeSummary;
use serde::{Deserialize, Serialize};

/// Results envelope for paginated listings. Pages are 1-based.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub recipes: Vec<RecipeSummary>,
    pub query: String,
    pub current_page: u64,
    pub total_pages: u64,
    pub total_recipes: u64,
}

impl SearchResults {
    pub fn page_count(total: u64, page_size: u64) -> u64 {
        if page_size == 0 {
            return 0;
        }
        total.div_ceil(page_size)
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}
