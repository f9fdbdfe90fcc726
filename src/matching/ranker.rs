//! Ranking of candidate batches against one job posting

use crate::matching::profile::{CandidateProfile, JobRequirements};
use crate::matching::similarity::{SimilarityMethod, SimilarityProvider};
use crate::matching::textualizer::textualize;
use serde::{Deserialize, Serialize};

/// One candidate with its computed score and 1-based rank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub profile: CandidateProfile,
    pub score: f32,
    pub method: SimilarityMethod,
    pub rank: usize,
}

/// Ranks candidates by similarity score against one job description.
pub struct CandidateRanker<'a> {
    provider: &'a SimilarityProvider,
}

impl<'a> CandidateRanker<'a> {
    pub fn new(provider: &'a SimilarityProvider) -> Self {
        Self { provider }
    }

    /// Score every candidate against the job and return them sorted by
    /// score descending. The sort is stable: equal scores keep their input
    /// order. `top_n` truncates after scoring and sorting, so it never
    /// changes which candidates come out on top.
    pub fn rank(
        &self,
        candidates: &[CandidateProfile],
        job: &JobRequirements,
        top_n: Option<usize>,
    ) -> Vec<RankedCandidate> {
        let mut ranked: Vec<RankedCandidate> = candidates
            .iter()
            .map(|candidate| {
                let text = textualize(candidate);
                let result = self.provider.similarity(&text, &job.description_text);
                RankedCandidate {
                    profile: candidate.clone(),
                    score: result.score,
                    method: result.method,
                    rank: 0,
                }
            })
            .collect();

        // Stable sort, descending by score. NaN cannot occur: scores are
        // clamped to [0, 100] by the provider.
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

        for (index, candidate) in ranked.iter_mut().enumerate() {
            candidate.rank = index + 1;
        }

        if let Some(n) = top_n {
            ranked.truncate(n);
        }

        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;
    use crate::matching::profile::Education;

    fn candidate(skills: &[&str]) -> CandidateProfile {
        CandidateProfile {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            experience: vec![],
            education: Education::default(),
        }
    }

    fn job(description: &str) -> JobRequirements {
        JobRequirements {
            required_skills: vec![],
            preferred_skills: vec![],
            description_text: description.to_string(),
        }
    }

    fn ranker_provider() -> SimilarityProvider {
        SimilarityProvider::keyword_only(&ScoringConfig::default())
    }

    #[test]
    fn test_stable_tie_ordering() {
        let provider = ranker_provider();
        let ranker = CandidateRanker::new(&provider);

        // A and C have identical token overlap with the job; B dominates.
        let a = candidate(&["python"]);
        let b = candidate(&["python", "sql", "engineer", "aws"]);
        let c = candidate(&["python"]);
        let j = job("python sql engineer aws");

        let ranked = ranker.rank(&[a.clone(), b.clone(), c.clone()], &j, None);

        assert_eq!(ranked[0].profile.skills, b.skills);
        assert_eq!(ranked[1].profile.skills, a.skills);
        assert_eq!(ranked[2].profile.skills, c.skills);
        assert_eq!(ranked[1].score, ranked[2].score);
        assert_eq!(
            ranked.iter().map(|r| r.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_top_n_truncates_after_scoring() {
        let provider = ranker_provider();
        let ranker = CandidateRanker::new(&provider);

        let weak = candidate(&["cobol"]);
        let strong = candidate(&["python", "sql"]);
        let j = job("python sql");

        // The strong candidate sits last in input order but must survive
        // the top-1 cut.
        let ranked = ranker.rank(&[weak, strong.clone()], &j, Some(1));
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].profile.skills, strong.skills);
        assert_eq!(ranked[0].rank, 1);
    }

    #[test]
    fn test_top_n_larger_than_input() {
        let provider = ranker_provider();
        let ranker = CandidateRanker::new(&provider);

        let ranked = ranker.rank(&[candidate(&["python"])], &job("python"), Some(10));
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_empty_candidate_list() {
        let provider = ranker_provider();
        let ranker = CandidateRanker::new(&provider);

        let ranked = ranker.rank(&[], &job("python"), None);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_input_not_mutated() {
        let provider = ranker_provider();
        let ranker = CandidateRanker::new(&provider);

        let input = vec![candidate(&["python"]), candidate(&["sql"])];
        let snapshot = input.clone();
        let _ = ranker.rank(&input, &job("python sql"), None);

        assert_eq!(input.len(), snapshot.len());
        for (before, after) in snapshot.iter().zip(input.iter()) {
            assert_eq!(before.skills, after.skills);
        }
    }

    #[test]
    fn test_ranks_are_one_based_and_descending() {
        let provider = ranker_provider();
        let ranker = CandidateRanker::new(&provider);

        let ranked = ranker.rank(
            &[
                candidate(&["nothing"]),
                candidate(&["python", "sql", "docker"]),
                candidate(&["python"]),
            ],
            &job("python sql docker kubernetes terraform"),
            None,
        );

        assert_eq!(ranked[0].rank, 1);
        for window in ranked.windows(2) {
            assert!(window[0].score >= window[1].score);
            assert_eq!(window[1].rank, window[0].rank + 1);
        }
    }

    #[test]
    fn test_determinism() {
        let provider = ranker_provider();
        let ranker = CandidateRanker::new(&provider);

        let candidates = vec![
            candidate(&["python"]),
            candidate(&["sql"]),
            candidate(&["python", "sql"]),
        ];
        let j = job("python sql engineer");

        let first = ranker.rank(&candidates, &j, None);
        let second = ranker.rank(&candidates, &j, None);

        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.score, b.score);
            assert_eq!(a.rank, b.rank);
            assert_eq!(a.profile.skills, b.profile.skills);
        }
    }
}
