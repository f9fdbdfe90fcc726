//! Set comparison of candidate skills against job requirements

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Split of job requirements into satisfied (matches) and unsatisfied (gaps).
///
/// `matches` and `gaps` preserve the original requirement strings in their
/// original order; comparison happens on the normalized forms only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapAnalysis {
    pub matches: Vec<String>,
    pub gaps: Vec<String>,
    /// `|matches| / max(|non-empty requirements|, 1)`, in [0, 1].
    pub match_ratio: f32,
}

impl GapAnalysis {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty() && self.gaps.is_empty()
    }
}

/// Normalize a skill for comparison: trim and lowercase, nothing else.
fn normalize_skill(skill: &str) -> String {
    skill.trim().to_lowercase()
}

/// Compare candidate skills against a requirement list.
///
/// A requirement matches iff its normalized form is present verbatim in the
/// normalized candidate skill set. Requirements that normalize to the empty
/// string are excluded from matches, gaps and the ratio denominator.
pub fn match_skills(candidate_skills: &[String], requirements: &[String]) -> GapAnalysis {
    let candidate_norm: HashSet<String> = candidate_skills
        .iter()
        .map(|s| normalize_skill(s))
        .filter(|s| !s.is_empty())
        .collect();

    let mut matches = Vec::new();
    let mut gaps = Vec::new();

    for requirement in requirements {
        let req_norm = normalize_skill(requirement);
        if req_norm.is_empty() {
            continue;
        }
        if candidate_norm.contains(&req_norm) {
            matches.push(requirement.clone());
        } else {
            gaps.push(requirement.clone());
        }
    }

    let denominator = (matches.len() + gaps.len()).max(1);
    let match_ratio = matches.len() as f32 / denominator as f32;

    GapAnalysis {
        matches,
        gaps,
        match_ratio,
    }
}
