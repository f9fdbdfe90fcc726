//! Candidate and job data model

use serde::{Deserialize, Serialize};

/// Structured candidate profile as produced by an upstream skill extractor.
///
/// Owned by the caller and never mutated by the matching pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<String>,
    #[serde(default)]
    pub education: Education,
}

/// Education field as it arrives from extraction output: either a single
/// free-text string or a list of degree/field entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Education {
    Text(String),
    Entries(Vec<String>),
}

impl Default for Education {
    fn default() -> Self {
        Education::Entries(Vec::new())
    }
}

impl Education {
    /// Render education to a single comma-joined string, empty if absent.
    pub fn as_text(&self) -> String {
        match self {
            Education::Text(s) => s.trim().to_string(),
            Education::Entries(entries) => entries
                .iter()
                .map(|e| e.trim())
                .filter(|e| !e.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Structured job posting requirements as produced by an upstream scraper
/// or requirements builder. Owned by the caller; immutable here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRequirements {
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    #[serde(default)]
    pub description_text: String,
}

impl CandidateProfile {
    pub fn new(skills: Vec<String>, experience: Vec<String>, education: Education) -> Self {
        Self {
            skills,
            experience,
            education,
        }
        .deduplicated()
    }

    /// De-duplicate skills on their trimmed, lowercased form while keeping
    /// the first occurrence's original casing and position.
    pub fn deduplicated(mut self) -> Self {
        let mut seen = std::collections::HashSet::new();
        self.skills.retain(|s| seen.insert(s.trim().to_lowercase()));
        self
    }
}

impl JobRequirements {
    /// Required and preferred skills concatenated, required first.
    /// Gap analysis treats both with equal weight.
    pub fn all_skills(&self) -> Vec<String> {
        let mut all = self.required_skills.clone();
        all.extend(self.preferred_skills.iter().cloned());
        all
    }
}
