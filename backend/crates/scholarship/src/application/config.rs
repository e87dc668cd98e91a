//! Application Configuration

use kernel::page::MAX_PAGE_SIZE;

/// Scholarship application configuration
#[derive(Debug, Clone)]
pub struct ScholarshipConfig {
    /// Size of the home page selection
    pub featured_limit: u32,
    /// Upper bound for `size` on paginated listings
    pub max_page_size: u32,
    /// Currency for payment intents
    pub currency: String,
}

impl Default for ScholarshipConfig {
    fn default() -> Self {
        Self {
            featured_limit: 6,
            max_page_size: MAX_PAGE_SIZE,
            currency: "usd".to_string(),
        }
    }
}
