//! Match explanation: gap analysis, similarity and a discrete recommendation

use crate::config::ScoringConfig;
use crate::matching::profile::{CandidateProfile, JobRequirements};
use crate::matching::similarity::{SimilarityProvider, SimilarityResult};
use crate::matching::skill_matcher::{match_skills, GapAnalysis};
use crate::matching::textualizer::textualize;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Hire,
    Consider,
    Pass,
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recommendation::Hire => write!(f, "Hire"),
            Recommendation::Consider => write!(f, "Consider"),
            Recommendation::Pass => write!(f, "Pass"),
        }
    }
}

/// Combined explanation of one candidate-job match.
///
/// Carries two separate metrics on purpose: the semantic/fallback similarity
/// score (headline number) and the skill match ratio (recommendation driver).
/// They are reported side by side rather than merged into one weighting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchExplanation {
    pub similarity: SimilarityResult,
    pub gap: GapAnalysis,
    pub recommendation: Recommendation,
    pub summary_text: String,
}

/// Derives explanations by combining the skill matcher with a similarity
/// provider. Thresholds come from `ScoringConfig`.
pub struct MatchExplainer<'a> {
    provider: &'a SimilarityProvider,
    scoring: ScoringConfig,
}

impl<'a> MatchExplainer<'a> {
    pub fn new(provider: &'a SimilarityProvider, scoring: ScoringConfig) -> Self {
        Self { provider, scoring }
    }

    /// Explain the match between one candidate and one job.
    ///
    /// The recommendation is gated by the skill match ratio (scaled to
    /// 0-100), not by the similarity score.
    pub fn explain(&self, candidate: &CandidateProfile, job: &JobRequirements) -> MatchExplanation {
        let gap = match_skills(&candidate.skills, &job.all_skills());

        let candidate_text = textualize(candidate);
        let similarity = self.provider.similarity(&candidate_text, &job.description_text);

        let recommendation = self.recommend(gap.match_ratio * 100.0);
        let summary_text = summarize(&gap);

        MatchExplanation {
            similarity,
            gap,
            recommendation,
            summary_text,
        }
    }

    /// Band a 0-100 score into a recommendation. Lower bounds are inclusive.
    fn recommend(&self, score: f32) -> Recommendation {
        if score >= self.scoring.hire_threshold {
            Recommendation::Hire
        } else if score >= self.scoring.consider_threshold {
            Recommendation::Consider
        } else {
            Recommendation::Pass
        }
    }
}

/// Human-readable one-liner over the gap analysis, lists comma-joined in
/// requirement order.
fn summarize(gap: &GapAnalysis) -> String {
    match (gap.matches.is_empty(), gap.gaps.is_empty()) {
        (false, false) => format!(
            "Matches on {}, but missing {}.",
            gap.matches.join(", "),
            gap.gaps.join(", ")
        ),
        (false, true) => format!("Matches on {}.", gap.matches.join(", ")),
        (true, false) => format!("Missing {}.", gap.gaps.join(", ")),
        (true, true) => "No requirements provided.".to_string(),
    }
}
