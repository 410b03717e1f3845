use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// URL the traversal starts from
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// Domain/path prefix the crawl is bounded to (no scheme)
    #[serde(rename = "domain-prefix")]
    pub domain_prefix: String,

    /// Maximum link depth from the start URL
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Lower bound of the randomized inter-request delay (milliseconds)
    #[serde(rename = "delay-min-ms")]
    pub delay_min_ms: u64,

    /// Upper bound of the randomized inter-request delay (milliseconds)
    #[serde(rename = "delay-max-ms")]
    pub delay_max_ms: u64,

    /// Additional fetch attempts after a failed request
    #[serde(rename = "retry-count")]
    pub retry_count: u32,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            start_url: "https://sites.google.com/view/metropoleballard/home".to_string(),
            domain_prefix: "sites.google.com/view/metropoleballard".to_string(),
            max_depth: 2,
            delay_min_ms: 1000,
            delay_max_ms: 2000,
            retry_count: 2,
            request_timeout_secs: 10,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the dataset and crawl log are written to
    #[serde(rename = "data-dir")]
    pub data_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
        }
    }
}
