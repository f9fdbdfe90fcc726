//! Report structures produced for callers of the CLI entry points

use crate::matching::explainer::MatchExplanation;
use crate::matching::ranker::RankedCandidate;
use crate::matching::similarity::SimilarityMethod;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Report for a single candidate-job explanation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainReport {
    pub explanation: MatchExplanation,
    pub metadata: ReportMetadata,
}

/// Report for a ranking run over a candidate batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankReport {
    pub candidates: Vec<RankedCandidate>,
    pub total_candidates: usize,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub tool_version: String,
    pub generated_at: DateTime<Utc>,
    pub similarity_method: SimilarityMethod,
    pub embedding_model: Option<String>,
    pub processing_time_ms: u64,
}

impl ReportMetadata {
    pub fn new(
        similarity_method: SimilarityMethod,
        embedding_model: Option<String>,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
            similarity_method,
            embedding_model,
            processing_time_ms,
        }
    }
}
