//! Integration tests for the candidate matching engine

use cv_match::config::{Config, ScoringConfig};
use cv_match::input::ProfileLoader;
use cv_match::matching::explainer::MatchExplainer;
use cv_match::matching::ranker::CandidateRanker;
use cv_match::{Recommendation, SimilarityMethod, SimilarityProvider};
use std::path::Path;

fn fallback_provider() -> SimilarityProvider {
    SimilarityProvider::keyword_only(&ScoringConfig::default())
}

#[test]
fn test_load_candidate_fixture() {
    let mut loader = ProfileLoader::new();
    let profile = loader
        .load_candidate(Path::new("tests/fixtures/candidate.json"))
        .unwrap();

    assert_eq!(profile.skills, vec!["Python", "SQL", "Docker"]);
    assert_eq!(profile.experience.len(), 2);
    assert_eq!(profile.education.as_text(), "BSc Computer Science");
}

#[test]
fn test_load_job_fixture() {
    let mut loader = ProfileLoader::new();
    let job = loader.load_job(Path::new("tests/fixtures/job.json")).unwrap();

    assert_eq!(job.required_skills, vec!["python", "SQL"]);
    assert_eq!(job.preferred_skills, vec!["Kubernetes"]);
    assert!(job.description_text.contains("python SQL engineer"));
}

#[test]
fn test_loader_caching() {
    let mut loader = ProfileLoader::new();
    let path = Path::new("tests/fixtures/candidate.json");

    let first = loader.load_candidate(path).unwrap();
    assert_eq!(loader.cache_size(), 1);

    let second = loader.load_candidate(path).unwrap();
    assert_eq!(first.skills, second.skills);
    assert_eq!(loader.cache_size(), 1);
}

#[test]
fn test_loader_rejects_missing_file() {
    let mut loader = ProfileLoader::new();
    assert!(loader
        .load_candidate(Path::new("tests/fixtures/nonexistent.json"))
        .is_err());
}

#[test]
fn test_loader_rejects_wrong_extension() {
    let mut loader = ProfileLoader::new();
    assert!(loader
        .load_candidate(Path::new("tests/fixtures/candidate.yaml"))
        .is_err());
}

#[test]
fn test_loader_rejects_wrong_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, r#"{"skills": "not-a-list-or-csv", "experience": 42}"#).unwrap();

    let mut loader = ProfileLoader::new();
    assert!(loader.load_candidate(&path).is_err());
}

#[test]
fn test_explain_end_to_end() {
    let mut loader = ProfileLoader::new();
    let candidate = loader
        .load_candidate(Path::new("tests/fixtures/candidate.json"))
        .unwrap();
    let job = loader.load_job(Path::new("tests/fixtures/job.json")).unwrap();

    let provider = fallback_provider();
    let explainer = MatchExplainer::new(&provider, ScoringConfig::default());
    let explanation = explainer.explain(&candidate, &job);

    // Requirements: python, SQL, Kubernetes. Candidate has python and SQL.
    assert_eq!(explanation.gap.matches, vec!["python", "SQL"]);
    assert_eq!(explanation.gap.gaps, vec!["Kubernetes"]);
    assert!((explanation.gap.match_ratio - 2.0 / 3.0).abs() < 1e-6);
    assert_eq!(explanation.recommendation, Recommendation::Consider);
    assert_eq!(
        explanation.summary_text,
        "Matches on python, SQL, but missing Kubernetes."
    );
    assert_eq!(explanation.similarity.method, SimilarityMethod::KeywordFallback);
    assert!(explanation.similarity.score >= 0.0 && explanation.similarity.score <= 95.0);
}

#[test]
fn test_rank_end_to_end_with_stable_ties() {
    let mut loader = ProfileLoader::new();
    let candidates = loader
        .load_candidates(Path::new("tests/fixtures/candidates.json"))
        .unwrap();
    let job = loader.load_job(Path::new("tests/fixtures/job.json")).unwrap();

    let provider = fallback_provider();
    let ranker = CandidateRanker::new(&provider);
    let ranked = ranker.rank(&candidates, &job, None);

    assert_eq!(ranked.len(), 3);
    // The Kubernetes candidate overlaps most with the description.
    assert!(ranked[0].profile.skills.contains(&"Kubernetes".to_string()));
    assert_eq!(ranked[0].rank, 1);

    // The two Python-only candidates tie; input order decides.
    assert_eq!(ranked[1].score, ranked[2].score);
    assert_eq!(ranked[1].profile.education.as_text(), "BSc Mathematics");
    assert_eq!(ranked[2].profile.education.as_text(), "BSc Physics");
}

#[test]
fn test_rank_top_n() {
    let mut loader = ProfileLoader::new();
    let candidates = loader
        .load_candidates(Path::new("tests/fixtures/candidates.json"))
        .unwrap();
    let job = loader.load_job(Path::new("tests/fixtures/job.json")).unwrap();

    let provider = fallback_provider();
    let ranker = CandidateRanker::new(&provider);
    let ranked = ranker.rank(&candidates, &job, Some(1));

    assert_eq!(ranked.len(), 1);
    assert!(ranked[0].profile.skills.contains(&"Kubernetes".to_string()));
}

#[test]
fn test_fallback_formula_through_public_api() {
    let provider = fallback_provider();
    let result = provider.similarity("python sql", "looking for python sql engineer");

    assert_eq!(result.method, SimilarityMethod::KeywordFallback);
    assert_eq!(result.score, (2.0f32 / 5.0 * 100.0 * 3.0).min(95.0));
}

#[test]
fn test_missing_model_downgrades_provider_permanently() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.models.models_dir = dir.path().to_path_buf();
    config.models.default_embedding_model = "no-such-model".to_string();

    let provider = SimilarityProvider::from_config(&config);
    assert_eq!(provider.active_method(), SimilarityMethod::KeywordFallback);
    assert!(provider.backend_name().is_none());

    // Every call uses the fallback path, no per-call retry of the load.
    for _ in 0..3 {
        let result = provider.similarity("python", "python engineer");
        assert_eq!(result.method, SimilarityMethod::KeywordFallback);
    }
}
