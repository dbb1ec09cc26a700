//! Configuration management.

use serde::Deserialize;

/// Default Llama Stack endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8321";

/// Default inference model served by the stack.
pub const DEFAULT_MODEL: &str = "meta-llama/Llama-4-Scout-17B-16E-Instruct";

/// Default chunk size for corpus ingestion, in tokens.
pub const DEFAULT_CHUNK_SIZE_IN_TOKENS: u32 = 512;

/// Main configuration for prescreen.
#[derive(Debug, Clone)]
pub struct PrescreenConfig {
    /// Base URL of the Llama Stack deployment.
    pub endpoint: String,
    /// Inference model used by the permitting agent.
    pub model: String,
    /// Chunk size used when ingesting the regulatory corpus.
    pub chunk_size_in_tokens: u32,
    /// Regulatory documents ingested at provisioning time.
    pub corpus: Vec<CorpusSource>,
    /// HTTP client settings.
    pub http: HttpConfig,
}

/// A regulatory document source to ingest into the vector DB.
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusSource {
    /// Location of the document (the stack fetches and extracts it).
    pub url: String,
    /// MIME type of the document.
    #[serde(default = "default_mime_type")]
    pub mime_type: String,
    /// Origin tag recorded in the document metadata.
    #[serde(default = "default_origin_tag")]
    pub source: String,
}

fn default_mime_type() -> String {
    "application/pdf".to_string()
}

fn default_origin_tag() -> String {
    "DenverPermitPDF".to_string()
}

/// HTTP client settings.
#[derive(Debug, Clone, Default)]
pub struct HttpConfig {
    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: Option<u64>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Stack endpoint.
    pub endpoint: Option<String>,
    /// Inference model.
    pub model: Option<String>,
    /// Ingestion chunk size in tokens.
    pub chunk_size_in_tokens: Option<u32>,
    /// Regulatory corpus sources.
    pub corpus: Option<Vec<CorpusSource>>,
    /// HTTP settings.
    pub http: Option<ConfigFileHttp>,
}

/// HTTP section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileHttp {
    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: Option<u64>,
}

impl Default for PrescreenConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            chunk_size_in_tokens: DEFAULT_CHUNK_SIZE_IN_TOKENS,
            corpus: default_corpus(),
            http: HttpConfig::default(),
        }
    }
}

/// The Denver food-truck / mobile-unit regulatory corpus.
#[must_use]
pub fn default_corpus() -> Vec<CorpusSource> {
    let urls = [
        "http://denvergov.org/content/dam/denvergov/Portals/771/documents/PHI/Food/RevisedFoodRulesandregulationsApril2017compressed.pdf",
        "https://denver.prelive.opencities.com/files/assets/public/v/1/public-health-and-environment/documents/phi/2022_mobileunitguide.pdf",
    ];

    urls.iter()
        .map(|url| CorpusSource {
            url: (*url).to_string(),
            mime_type: default_mime_type(),
            source: default_origin_tag(),
        })
        .collect()
}

impl PrescreenConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or contains
    /// invalid values.
    pub fn load_from_file(path: &std::path::Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: e.to_string(),
            })?;

        let file: ConfigFile =
            toml::from_str(&contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        Self::from_config_file(file)
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/prescreen/` on macOS)
    /// 2. XDG config dir (`~/.config/prescreen/` for Unix compatibility)
    ///
    /// Returns default configuration if no config file is found. Environment
    /// overrides are applied last.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default().with_env_overrides();
        };

        // Check platform-specific config dir first
        let platform_config = base_dirs.config_dir().join("prescreen").join("config.toml");
        if platform_config.exists() {
            if let Ok(config) = Self::load_from_file(&platform_config) {
                return config.with_env_overrides();
            }
        }

        // Fall back to XDG-style ~/.config/prescreen/ for Unix compatibility
        let xdg_config = base_dirs
            .home_dir()
            .join(".config")
            .join("prescreen")
            .join("config.toml");
        if xdg_config.exists() {
            if let Ok(config) = Self::load_from_file(&xdg_config) {
                return config.with_env_overrides();
            }
        }

        Self::default().with_env_overrides()
    }

    /// Applies environment variable overrides.
    ///
    /// Recognized variables: `PRESCREEN_ENDPOINT`, `PRESCREEN_MODEL`,
    /// `PRESCREEN_CHUNK_SIZE`.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(endpoint) = std::env::var("PRESCREEN_ENDPOINT") {
            if !endpoint.trim().is_empty() {
                self.endpoint = endpoint;
            }
        }
        if let Ok(model) = std::env::var("PRESCREEN_MODEL") {
            if !model.trim().is_empty() {
                self.model = model;
            }
        }
        if let Ok(v) = std::env::var("PRESCREEN_CHUNK_SIZE") {
            if let Ok(chunk_size) = v.parse::<u32>() {
                if chunk_size > 0 {
                    self.chunk_size_in_tokens = chunk_size;
                }
            }
        }
        self
    }

    /// Converts a `ConfigFile` to `PrescreenConfig`.
    fn from_config_file(file: ConfigFile) -> crate::Result<Self> {
        let mut config = Self::default();

        if let Some(endpoint) = file.endpoint {
            config.endpoint = endpoint;
        }
        if let Some(model) = file.model {
            config.model = model;
        }
        if let Some(chunk_size) = file.chunk_size_in_tokens {
            if chunk_size == 0 {
                return Err(crate::Error::InvalidInput(
                    "chunk_size_in_tokens must be greater than zero".to_string(),
                ));
            }
            config.chunk_size_in_tokens = chunk_size;
        }
        if let Some(corpus) = file.corpus {
            if corpus.is_empty() {
                return Err(crate::Error::InvalidInput(
                    "corpus must list at least one document source".to_string(),
                ));
            }
            if let Some(entry) = corpus.iter().find(|s| s.url.trim().is_empty()) {
                return Err(crate::Error::InvalidInput(format!(
                    "corpus entry with source tag '{}' has an empty url",
                    entry.source
                )));
            }
            config.corpus = corpus;
        }
        if let Some(http) = file.http {
            config.http = HttpConfig {
                timeout_ms: http.timeout_ms,
                connect_timeout_ms: http.connect_timeout_ms,
            };
        }

        Ok(config)
    }
}
