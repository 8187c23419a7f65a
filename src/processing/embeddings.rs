//! Embedding capability and the Model2Vec static embedder

use crate::error::{Result, RelevanceError};
use model2vec_rs::model::StaticModel;
use std::path::Path;
use std::time::Instant;

/// Anything that can turn text into a fixed-size dense vector.
///
/// The scorer only ever receives this trait, so callers decide whether a
/// real model is loaded or the basic strategy is used.
pub trait EmbeddingCapability {
    fn encode(&self, text: &str) -> Result<Vec<f32>>;

    fn name(&self) -> &str {
        "custom"
    }
}

pub struct Model2VecEmbedder {
    model: StaticModel,
    model_name: String,
}

impl Model2VecEmbedder {
    /// Load from a local model folder or a Hugging Face repo id
    pub fn load(model_path: &Path, model_name: &str) -> Result<Self> {
        let start_time = Instant::now();
        log::info!("Loading Model2Vec embedding model from: {}", model_path.display());

        let model = StaticModel::from_pretrained(
            model_path,
            None, // token
            None, // normalize
            None, // subfolder
        )
        .map_err(|e| RelevanceError::ModelLoading(format!("Failed to load model: {}", e)))?;

        log::info!("Model loaded successfully in {:.2?}", start_time.elapsed());

        Ok(Self {
            model,
            model_name: model_name.to_string(),
        })
    }
}

impl EmbeddingCapability for Model2VecEmbedder {
    fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let embedding = self.model.encode_single(text);
        if embedding.is_empty() {
            return Err(RelevanceError::Embedding(
                "model returned an empty embedding".to_string(),
            ));
        }
        Ok(embedding)
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}

/// Cosine similarity between two embeddings
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(RelevanceError::Embedding(format!(
            "Embedding dimensions don't match: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    if a.is_empty() {
        return Ok(0.0);
    }

    let dot_product: f64 = a.iter().zip(b).map(|(x, y)| *x as f64 * *y as f64).sum();
    let norm_a = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        Ok(0.0)
    } else {
        Ok(dot_product / (norm_a * norm_b))
    }
}
