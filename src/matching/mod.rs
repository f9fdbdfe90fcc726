//! Candidate-job matching and ranking engine

pub mod explainer;
pub mod profile;
pub mod ranker;
pub mod similarity;
pub mod skill_matcher;
pub mod textualizer;

pub use explainer::{MatchExplainer, MatchExplanation, Recommendation};
pub use profile::{CandidateProfile, Education, JobRequirements};
pub use ranker::{CandidateRanker, RankedCandidate};
pub use similarity::{SimilarityMethod, SimilarityProvider, SimilarityResult};
pub use skill_matcher::{match_skills, GapAnalysis};
pub use textualizer::textualize;
