/// Default backend host used by development deployments.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default number of rows per table page.
pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every resource path is resolved against.
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
