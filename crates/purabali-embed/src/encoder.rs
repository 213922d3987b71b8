//! Local multilingual-e5-large encoder on candle.
//!
//! E5 is an XLM-RoBERTa architecture; embeddings are the masked mean of the
//! last hidden states, L2-normalized to unit length.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::xlm_roberta::{Config as XlmRobertaConfig, XLMRobertaModel};
use tokenizers::Tokenizer;
use tracing::info;

use purabali_core::config::expand_path;
use purabali_core::traits::TextEncoder;

use crate::device::select_device;
use crate::pool::masked_mean_l2;

pub(crate) const EMBED_DIM: usize = 1024;
const MAX_LEN: usize = 256;
// XLM-RoBERTa pad token id.
const PAD_ID: u32 = 1;

pub struct E5Encoder {
    model: XLMRobertaModel,
    tokenizer: Tokenizer,
    device: Device,
}

impl E5Encoder {
    pub fn new() -> Result<Self> {
        let model_dir = resolve_model_dir()?;
        Self::from_dir(&model_dir)
    }

    pub fn from_dir(model_dir: &Path) -> Result<Self> {
        let device = select_device();
        info!(dir = %model_dir.display(), "loading multilingual-e5-large");

        let tokenizer_path = model_dir.join("tokenizer.json");
        let tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(|e| {
            anyhow!(
                "Failed to load tokenizer from {}: {}",
                tokenizer_path.display(),
                e
            )
        })?;

        let config_path = model_dir.join("config.json");
        let config: XlmRobertaConfig =
            serde_json::from_str(&std::fs::read_to_string(&config_path)?)?;

        let vb = load_weights(model_dir, DType::F32, &device)?;
        let model = XLMRobertaModel::new(&config, vb)?;
        info!("model loaded");
        Ok(Self {
            model,
            tokenizer,
            device,
        })
    }

    fn encode_one(&self, text: &str) -> Result<Vec<f32>> {
        let (input_ids, attention_mask) = self.tokenize(text)?;
        let token_type_ids = Tensor::zeros((1, MAX_LEN), DType::I64, &self.device)?;
        let hidden = self
            .model
            .forward(&input_ids, &attention_mask, &token_type_ids, None, None, None)?;
        let pooled = masked_mean_l2(&hidden, &attention_mask)?;
        let embedding: Vec<f32> = pooled.to_device(&Device::Cpu)?.squeeze(0)?.to_vec1()?;
        if embedding.len() != EMBED_DIM {
            return Err(anyhow!(
                "unexpected embedding dimension {} (wanted {})",
                embedding.len(),
                EMBED_DIM
            ));
        }
        Ok(embedding)
    }

    /// Tokenize into fixed-length `(input_ids, attention_mask)` tensors,
    /// truncating or padding to `MAX_LEN`.
    fn tokenize(&self, text: &str) -> Result<(Tensor, Tensor)> {
        let enc = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| anyhow!("Tokenization failed: {}", e))?;
        let mut ids = enc.get_ids().to_vec();
        let mut mask = enc.get_attention_mask().to_vec();
        ids.truncate(MAX_LEN);
        mask.truncate(MAX_LEN);
        ids.resize(MAX_LEN, PAD_ID);
        mask.resize(MAX_LEN, 0);
        let input_ids = Tensor::from_iter(ids, &self.device)?.reshape((1, MAX_LEN))?;
        let attention_mask = Tensor::from_iter(mask, &self.device)?.reshape((1, MAX_LEN))?;
        Ok((input_ids, attention_mask))
    }
}

impl TextEncoder for E5Encoder {
    fn dim(&self) -> usize {
        EMBED_DIM
    }

    fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.encode_one(t)).collect()
    }
}

fn load_weights(model_dir: &Path, dtype: DType, device: &Device) -> Result<VarBuilder<'static>> {
    let safetensors = model_dir.join("model.safetensors");
    if safetensors.exists() {
        // Safety: the file is mmapped read-only and must not change while loaded.
        return Ok(unsafe { VarBuilder::from_mmaped_safetensors(&[safetensors], dtype, device)? });
    }
    let pickle = model_dir.join("pytorch_model.bin");
    if pickle.exists() {
        let tensors = candle_core::pickle::read_all(&pickle)?;
        let map: std::collections::HashMap<String, Tensor> = tensors.into_iter().collect();
        return Ok(VarBuilder::from_tensors(map, dtype, device));
    }
    Err(anyhow!(
        "no model weights found under {} (wanted model.safetensors or pytorch_model.bin)",
        model_dir.display()
    ))
}

fn resolve_model_dir() -> Result<PathBuf> {
    for var in ["APP_MODEL_DIR", "MODEL_DIR"] {
        if let Ok(dir) = std::env::var(var) {
            let p = expand_path(&dir);
            if p.exists() {
                return Ok(p);
            }
        }
    }
    for candidate in ["../models/multilingual-e5-large", "models/multilingual-e5-large"] {
        let p = Path::new(candidate);
        if p.exists() {
            return Ok(p.to_path_buf());
        }
    }
    Err(anyhow!(
        "Could not locate multilingual-e5-large model directory; set APP_MODEL_DIR"
    ))
}
