//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `GRADEX_*` environment
//! variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

/// Default vision model used for handwriting transcription.
pub const DEFAULT_VISION_MODEL: &str = "gemini-2.5-flash";

/// Default URL of the plain-OCR sidecar service.
pub const DEFAULT_OCR_URL: &str = "http://127.0.0.1:8884";

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `GRADEX_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Directory for persisted evaluation reports. Default: `./.data/reports`.
    pub storage_path: PathBuf,

    /// Path to the sentence-embedding model directory (safetensors +
    /// tokenizer). `None` runs the embedder in stub mode.
    pub embedder_path: Option<PathBuf>,

    /// Path to the cross-encoder model directory. `None` runs the
    /// cross-encoder in stub mode.
    pub cross_encoder_path: Option<PathBuf>,

    /// URL of the plain-OCR service used for reference documents.
    pub ocr_url: String,

    /// Vision model name used for candidate (handwriting) transcription.
    pub vision_model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            storage_path: PathBuf::from("./.data/reports"),
            embedder_path: None,
            cross_encoder_path: None,
            ocr_url: DEFAULT_OCR_URL.to_string(),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "GRADEX_PORT";
    const ENV_BIND_ADDR: &'static str = "GRADEX_BIND_ADDR";
    const ENV_STORAGE_PATH: &'static str = "GRADEX_STORAGE_PATH";
    const ENV_EMBEDDER_PATH: &'static str = "GRADEX_EMBEDDER_PATH";
    const ENV_CROSS_ENCODER_PATH: &'static str = "GRADEX_CROSS_ENCODER_PATH";
    const ENV_OCR_URL: &'static str = "GRADEX_OCR_URL";
    const ENV_VISION_MODEL: &'static str = "GRADEX_VISION_MODEL";

    /// Loads configuration from environment variables (falling back to
    /// defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let storage_path = Self::parse_path_from_env(Self::ENV_STORAGE_PATH, defaults.storage_path);
        let embedder_path = Self::parse_optional_path_from_env(Self::ENV_EMBEDDER_PATH);
        let cross_encoder_path = Self::parse_optional_path_from_env(Self::ENV_CROSS_ENCODER_PATH);
        let ocr_url = Self::parse_string_from_env(Self::ENV_OCR_URL, defaults.ocr_url);
        let vision_model = Self::parse_string_from_env(Self::ENV_VISION_MODEL, defaults.vision_model);

        Ok(Self {
            port,
            bind_addr,
            storage_path,
            embedder_path,
            cross_encoder_path,
            ocr_url,
            vision_model,
        })
    }

    /// Validates paths and basic invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_path.exists() && !self.storage_path.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.storage_path.clone(),
            });
        }

        for path in [&self.embedder_path, &self.cross_encoder_path]
            .into_iter()
            .flatten()
        {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }
}
