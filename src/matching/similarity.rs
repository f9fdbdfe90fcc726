//! Similarity scoring between candidate and job text
//!
//! Two scoring paths: a semantic path backed by Model2Vec static embeddings,
//! and a deterministic keyword-overlap fallback used when the embedding
//! backend is unavailable or fails. The backend probe happens once at
//! provider construction; a backend that cannot be loaded downgrades the
//! provider to fallback mode for the process lifetime.

use crate::config::{Config, ScoringConfig};
use crate::error::{MatcherError, Result};
use model2vec_rs::model::StaticModel;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimilarityMethod {
    Semantic,
    KeywordFallback,
}

/// Outcome of one similarity computation. Created per call, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityResult {
    /// Score in [0, 100]. Fallback scores never exceed the configured cap.
    pub score: f32,
    /// Which path produced the score, so callers can assert fallback activation.
    pub method: SimilarityMethod,
    /// Diagnostic note attached on degraded or short-circuited calls.
    pub note: Option<String>,
}

/// Embedding backend contract: encode two texts into equal-dimension vectors.
pub trait EmbeddingBackend: Send + Sync {
    fn name(&self) -> &str;
    fn embed_pair(&self, first: &str, second: &str) -> Result<(Vec<f32>, Vec<f32>)>;
}

/// Model2Vec static embedding backend.
pub struct Model2VecBackend {
    model: StaticModel,
    model_name: String,
}

impl Model2VecBackend {
    pub fn load(model_path: &Path, model_name: &str) -> Result<Self> {
        log::info!("Loading Model2Vec embedding model from: {}", model_path.display());

        let model = StaticModel::from_pretrained(
            model_path,
            None,       // token
            Some(true), // normalize
            None,       // subfolder
        )
        .map_err(|e| MatcherError::ModelLoading(format!("Failed to load model: {}", e)))?;

        Ok(Self {
            model,
            model_name: model_name.to_string(),
        })
    }
}

impl EmbeddingBackend for Model2VecBackend {
    fn name(&self) -> &str {
        &self.model_name
    }

    fn embed_pair(&self, first: &str, second: &str) -> Result<(Vec<f32>, Vec<f32>)> {
        let texts = vec![first.to_string(), second.to_string()];
        let mut embeddings = self.model.encode(&texts);

        if embeddings.len() != 2 {
            return Err(MatcherError::Embedding(format!(
                "Expected 2 embeddings, got {}",
                embeddings.len()
            )));
        }

        let second_emb = embeddings.pop().unwrap_or_default();
        let first_emb = embeddings.pop().unwrap_or_default();

        if first_emb.is_empty() || second_emb.is_empty() {
            return Err(MatcherError::Embedding(
                "Backend returned an empty embedding".to_string(),
            ));
        }
        if first_emb.len() != second_emb.len() {
            return Err(MatcherError::Embedding(format!(
                "Embedding dimensions don't match: {} vs {}",
                first_emb.len(),
                second_emb.len()
            )));
        }

        Ok((first_emb, second_emb))
    }
}

/// Similarity provider with a semantic path and a keyword fallback.
pub struct SimilarityProvider {
    backend: Option<Box<dyn EmbeddingBackend>>,
    fallback_boost: f32,
    fallback_cap: f32,
}

impl SimilarityProvider {
    /// Probe the configured embedding model once. A model that is missing
    /// or fails to load downgrades this provider to keyword fallback for
    /// its whole lifetime; the failure is logged as a warning, never raised.
    pub fn from_config(config: &Config) -> Self {
        let model_name = &config.models.default_embedding_model;
        let model_path = config.models_dir().join(model_name);

        let backend: Option<Box<dyn EmbeddingBackend>> = if model_path.exists() {
            match Model2VecBackend::load(&model_path, model_name) {
                Ok(backend) => {
                    log::info!("Semantic similarity enabled (model: {})", model_name);
                    Some(Box::new(backend))
                }
                Err(e) => {
                    log::warn!(
                        "Embedding model '{}' failed to load, using keyword fallback: {}",
                        model_name,
                        e
                    );
                    None
                }
            }
        } else {
            log::warn!(
                "Embedding model '{}' not found at {}, using keyword fallback",
                model_name,
                model_path.display()
            );
            None
        };

        Self {
            backend,
            fallback_boost: config.scoring.fallback_boost,
            fallback_cap: config.scoring.fallback_cap,
        }
    }

    /// Provider locked to the keyword fallback path.
    pub fn keyword_only(scoring: &ScoringConfig) -> Self {
        Self {
            backend: None,
            fallback_boost: scoring.fallback_boost,
            fallback_cap: scoring.fallback_cap,
        }
    }

    /// Provider with an explicit backend, for callers that manage loading.
    pub fn with_backend(backend: Box<dyn EmbeddingBackend>, scoring: &ScoringConfig) -> Self {
        Self {
            backend: Some(backend),
            fallback_boost: scoring.fallback_boost,
            fallback_cap: scoring.fallback_cap,
        }
    }

    /// The method this provider will use for non-degraded calls.
    pub fn active_method(&self) -> SimilarityMethod {
        if self.backend.is_some() {
            SimilarityMethod::Semantic
        } else {
            SimilarityMethod::KeywordFallback
        }
    }

    pub fn backend_name(&self) -> Option<&str> {
        self.backend.as_deref().map(|b| b.name())
    }

    /// Compute a 0-100 similarity score between candidate and job text.
    ///
    /// Empty input (after trimming) short-circuits to a zero score without
    /// touching the backend. A per-call embedding failure degrades that one
    /// call to the keyword path with a diagnostic note.
    pub fn similarity(&self, candidate_text: &str, job_text: &str) -> SimilarityResult {
        let candidate_text = candidate_text.trim();
        let job_text = job_text.trim();

        if candidate_text.is_empty() || job_text.is_empty() {
            return SimilarityResult {
                score: 0.0,
                method: self.active_method(),
                note: Some("insufficient input".to_string()),
            };
        }

        match &self.backend {
            Some(backend) => match backend.embed_pair(candidate_text, job_text) {
                Ok((candidate_emb, job_emb)) => {
                    let cosine = cosine_similarity(&candidate_emb, &job_emb);
                    SimilarityResult {
                        score: round2((cosine * 100.0).clamp(0.0, 100.0)),
                        method: SimilarityMethod::Semantic,
                        note: None,
                    }
                }
                Err(e) => {
                    log::warn!("Embedding failed, degrading this call to keyword fallback: {}", e);
                    SimilarityResult {
                        score: self.keyword_score(candidate_text, job_text),
                        method: SimilarityMethod::KeywordFallback,
                        note: Some(format!("semantic path failed: {}", e)),
                    }
                }
            },
            None => SimilarityResult {
                score: self.keyword_score(candidate_text, job_text),
                method: SimilarityMethod::KeywordFallback,
                note: None,
            },
        }
    }

    /// Token-overlap fallback: unique lowercase whitespace tokens,
    /// `|candidate ∩ job| / |job|`, boosted and capped.
    fn keyword_score(&self, candidate_text: &str, job_text: &str) -> f32 {
        let candidate_tokens: HashSet<String> = candidate_text
            .split_whitespace()
            .map(|t| t.to_lowercase())
            .collect();
        let job_tokens: HashSet<String> = job_text
            .split_whitespace()
            .map(|t| t.to_lowercase())
            .collect();

        if job_tokens.is_empty() {
            return 0.0;
        }

        let overlap = candidate_tokens.intersection(&job_tokens).count();
        let ratio = overlap as f32 / job_tokens.len() as f32;
        let boosted = ratio * 100.0 * self.fallback_boost;
        round2(boosted.min(self.fallback_cap))
    }
}

/// Cosine similarity between two equal-length vectors, 0.0 on zero norms.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

static SHARED_PROVIDER: OnceLock<SimilarityProvider> = OnceLock::new();

/// Process-wide provider handle with initialize-once semantics. The first
/// caller pays for the backend probe; concurrent callers never trigger a
/// duplicate model load. A cached construction failure means every later
/// call goes straight to the fallback path.
pub fn shared_provider(config: &Config) -> &'static SimilarityProvider {
    SHARED_PROVIDER.get_or_init(|| SimilarityProvider::from_config(config))
}
