//! Search service configuration

/// Search service configuration
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: String,
    /// Static key the crawler presents in `X-API-Key` on bulk ingestion
    pub crawler_api_key: Option<String>,
}

impl SearchConfig {
    /// Create a new SearchConfig from environment variables
    ///
    /// # Environment Variables
    /// - `SEARCH_BIND_ADDR`: listener address (default: "0.0.0.0:3001")
    /// - `CRAWLER_API_KEY`: ingestion key; ingestion is refused when unset
    pub fn from_env() -> Self {
        let bind_addr =
            std::env::var("SEARCH_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".to_string());

        let crawler_api_key = std::env::var("CRAWLER_API_KEY").ok().filter(|k| !k.is_empty());

        Self {
            bind_addr,
            crawler_api_key,
        }
    }
}
