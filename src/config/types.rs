use serde::Deserialize;

/// Main configuration structure for Grantscout
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    pub links: LinksConfig,
    pub output: OutputConfig,
    pub extractor: ExtractorConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs", default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Maximum number of accepted (HTML, 2xx) pages per crawl run
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u32,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout_secs(),
            max_pages: default_max_pages(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_max_pages() -> u32 {
    50
}

// Browser-identifying string; some sites refuse obvious bots outright.
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36"
        .to_string()
}

/// Seed link list configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LinksConfig {
    /// Path to the newline-delimited seed URL file
    #[serde(rename = "file-path")]
    pub file_path: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the per-run corpus file the crawler appends page text to
    #[serde(rename = "corpus-path")]
    pub corpus_path: String,

    /// Directory that receives one records file per processed seed
    #[serde(rename = "records-dir")]
    pub records_dir: String,
}

/// Extraction service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractorConfig {
    /// Model identifier passed to the completion endpoint
    pub model: String,

    /// Base URL of the OpenAI-compatible API
    #[serde(rename = "api-base", default = "default_api_base")]
    pub api_base: String,

    /// Name of the environment variable holding the API key
    #[serde(rename = "api-key-env", default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}
