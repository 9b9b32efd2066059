use serde::Deserialize;

/// Default documentation root
pub const MAIN_DOC_URL: &str = "https://docs.python.org/3/";

/// Default PEP numerical index
pub const PEP_DOC_URL: &str = "https://peps.python.org/";

/// Main configuration structure for Pydocs-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub http: HttpConfig,
    pub cache: CacheConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Locations of the sites being harvested
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Documentation root; "what's new" and the downloads page hang off it
    #[serde(rename = "main-doc-url")]
    pub main_doc_url: String,

    /// PEP index root
    #[serde(rename = "pep-doc-url")]
    pub pep_doc_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            main_doc_url: MAIN_DOC_URL.to_string(),
            pep_doc_url: PEP_DOC_URL.to_string(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User agent sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Timeout for a single request (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("pydocs-harvest/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
        }
    }
}

/// Response cache configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Path to the SQLite cache file
    pub path: String,

    /// Age after which cached responses are refetched; 0 keeps them forever
    #[serde(rename = "expire-after-secs")]
    pub expire_after_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: "harvest_cache.sqlite".to_string(),
            expire_after_secs: 0,
        }
    }
}

/// Output locations
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving CSV result files
    #[serde(rename = "results-dir")]
    pub results_dir: String,

    /// Directory receiving downloaded archives
    #[serde(rename = "downloads-dir")]
    pub downloads_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_dir: "results".to_string(),
            downloads_dir: "downloads".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log file written alongside stderr output
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: Some("logs/parser.log".to_string()),
        }
    }
}
