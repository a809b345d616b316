use std::path::PathBuf;

use crate::constants::{DEFAULT_EMBEDDING_DIM, MAX_SEQ_LEN};

#[derive(Debug, Clone)]
pub struct EmbedderConfig {
    /// Model directory (`config.json`, `model.safetensors`, `tokenizer.json`).
    /// `None` selects stub mode.
    pub model_path: Option<PathBuf>,

    pub embedding_dim: usize,

    pub max_seq_len: usize,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            max_seq_len: MAX_SEQ_LEN,
        }
    }
}

impl EmbedderConfig {
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: Some(model_path.into()),
            ..Self::default()
        }
    }

    pub fn stub() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.embedding_dim == 0 {
            return Err("embedding_dim cannot be zero".to_string());
        }
        if self.max_seq_len == 0 {
            return Err("max_seq_len cannot be zero".to_string());
        }
        if let Some(ref path) = self.model_path
            && path.as_os_str().is_empty()
        {
            return Err("model_path cannot be empty when provided".to_string());
        }
        Ok(())
    }
}
