//! Candle wrappers around BERT-family checkpoints.
//!
//! Two heads are used: mean-pooled hidden states for sentence embeddings and
//! a single-logit classification head for cross-encoder scoring. Checkpoints
//! are standard HuggingFace exports (`config.json` + `model.safetensors`).

use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_core::IndexOp;
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config};
use std::path::Path;

fn load_bert(vb: VarBuilder, config: &Config) -> Result<BertModel> {
    // Exported checkpoints prefix tensors differently depending on the
    // architecture name; try the common ones before the bare layout.
    if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
        BertModel::load(vb.pp("bert"), config)
    } else if vb.contains_tensor("roberta.embeddings.word_embeddings.weight") {
        BertModel::load(vb.pp("roberta"), config)
    } else {
        BertModel::load(vb, config)
    }
}

fn load_checkpoint<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<(VarBuilder<'static>, Config)> {
    let model_dir = model_dir.as_ref();
    let config_content = std::fs::read_to_string(model_dir.join("config.json"))?;
    let config: Config = serde_json::from_str(&config_content)
        .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;

    let weights_path = model_dir.join("model.safetensors");
    let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };

    Ok((vb, config))
}

struct SentenceEncoderImpl {
    bert: BertModel,
    hidden_size: usize,
}

/// Mean-pooling sentence encoder.
#[derive(Clone)]
pub struct BertSentenceEncoder(std::sync::Arc<SentenceEncoderImpl>);

impl BertSentenceEncoder {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let (vb, config) = load_checkpoint(model_dir, device)?;
        let hidden_size = config.hidden_size;
        let bert = load_bert(vb, &config)?;

        Ok(Self(std::sync::Arc::new(SentenceEncoderImpl {
            bert,
            hidden_size,
        })))
    }

    pub fn hidden_size(&self) -> usize {
        self.0.hidden_size
    }

    /// Runs the encoder and mean-pools hidden states over the attention mask.
    ///
    /// Output shape: `[hidden_size]`.
    pub fn forward_pooled(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        // [1, seq_len, hidden]
        let hidden = self
            .0
            .bert
            .forward(input_ids, token_type_ids, Some(attention_mask))?;

        let mask = attention_mask
            .to_dtype(DType::F32)?
            .unsqueeze(2)? // [1, seq_len, 1]
            .broadcast_as(hidden.shape())?;

        let summed = hidden.mul(&mask)?.sum(1)?; // [1, hidden]
        let counts = mask.sum(1)?.clamp(1e-9, f64::INFINITY)?;
        let pooled = summed.div(&counts)?;

        pooled.i(0)
    }
}

struct CrossEncoderImpl {
    bert: BertModel,
    classifier: Linear,
}

/// Pairwise sequence classifier producing one raw logit per pair.
#[derive(Clone)]
pub struct BertPairClassifier(std::sync::Arc<CrossEncoderImpl>);

impl BertPairClassifier {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let (vb, config) = load_checkpoint(model_dir, device)?;
        let bert = load_bert(vb.clone(), &config)?;
        let classifier = candle_nn::linear(config.hidden_size, 1, vb.pp("classifier"))?;

        Ok(Self(std::sync::Arc::new(CrossEncoderImpl {
            bert,
            classifier,
        })))
    }

    /// Returns the raw classification logit for an encoded pair.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        let output = self
            .0
            .bert
            .forward(input_ids, token_type_ids, attention_mask)?;
        let cls_token = output.i((.., 0, ..))?;
        self.0.classifier.forward(&cls_token)
    }
}
