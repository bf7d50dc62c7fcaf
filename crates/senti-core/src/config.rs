//! Service configuration.
//!
//! Built by the CLI from flags and `SENTI_*` environment variables, then
//! validated once before the model is loaded.

use serde::{Deserialize, Serialize};

use crate::analyzer::DEFAULT_MAX_CHARS;
use crate::error::{SentiError, SentiResult};

/// Default bind host (all interfaces).
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default timeout for remote inference calls.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default pretrained checkpoint for the in-process backend.
pub const DEFAULT_LOCAL_MODEL: &str = "clapAI/modernBERT-base-multilingual-sentiment";

/// Which inference collaborator to load at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendConfig {
    /// Pretrained sequence-classification model run in-process.
    Local { model: String },
    /// Built-in word-list classifier for offline use.
    Lexicon,
    /// Hugging Face style text-classification endpoint.
    Remote {
        url: String,
        model: Option<String>,
        api_token: Option<String>,
        timeout_secs: u64,
    },
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig::Local {
            model: DEFAULT_LOCAL_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub max_chars: usize,
    pub backend: BackendConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_chars: DEFAULT_MAX_CHARS,
            backend: BackendConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Address string to bind the listener to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn validate(&self) -> SentiResult<()> {
        if self.host.trim().is_empty() {
            return Err(SentiError::config("host must not be empty"));
        }
        if self.max_chars == 0 {
            return Err(SentiError::config("max_chars must be at least 1"));
        }
        match &self.backend {
            BackendConfig::Local { model } if model.trim().is_empty() => {
                return Err(SentiError::config("local backend requires a model id"));
            }
            BackendConfig::Remote { url, timeout_secs, .. } => {
                if url.trim().is_empty() {
                    return Err(SentiError::config("remote backend requires a model URL"));
                }
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(SentiError::config(format!(
                        "model URL must start with http:// or https://, got '{}'",
                        url
                    )));
                }
                if *timeout_secs == 0 {
                    return Err(SentiError::config("timeout_secs must be at least 1"));
                }
            }
            _ => {}
        }
        Ok(())
    }
}
