//! Candidate-job matching and ranking library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod matching;
pub mod models;
pub mod output;

pub use config::Config;
pub use error::{MatcherError, Result};
pub use matching::{
    CandidateProfile, CandidateRanker, GapAnalysis, JobRequirements, MatchExplainer,
    MatchExplanation, RankedCandidate, Recommendation, SimilarityMethod, SimilarityProvider,
    SimilarityResult,
};
