//! JSON loaders for candidate profiles and job requirements
//!
//! The engine is consumed as a library; this loader is the CLI boundary
//! where shape errors fail fast instead of being silently coerced.

use crate::error::{MatcherError, Result};
use crate::matching::profile::{CandidateProfile, JobRequirements};
use log::info;
use std::collections::HashMap;
use std::path::Path;

pub struct ProfileLoader {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for ProfileLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileLoader {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Load a single candidate profile from a JSON file.
    pub fn load_candidate(&mut self, path: &Path) -> Result<CandidateProfile> {
        let content = self.read_json(path)?;
        let profile: CandidateProfile = serde_json::from_str(&content).map_err(|e| {
            MatcherError::InvalidInput(format!(
                "{} is not a valid candidate profile: {}",
                path.display(),
                e
            ))
        })?;
        Ok(profile.deduplicated())
    }

    /// Load a batch of candidate profiles from a JSON array file.
    pub fn load_candidates(&mut self, path: &Path) -> Result<Vec<CandidateProfile>> {
        let content = self.read_json(path)?;
        let profiles: Vec<CandidateProfile> = serde_json::from_str(&content).map_err(|e| {
            MatcherError::InvalidInput(format!(
                "{} is not a valid candidate list: {}",
                path.display(),
                e
            ))
        })?;
        Ok(profiles.into_iter().map(|p| p.deduplicated()).collect())
    }

    /// Load job requirements from a JSON file.
    pub fn load_job(&mut self, path: &Path) -> Result<JobRequirements> {
        let content = self.read_json(path)?;
        serde_json::from_str(&content).map_err(|e| {
            MatcherError::InvalidInput(format!(
                "{} is not a valid job requirements file: {}",
                path.display(),
                e
            ))
        })
    }

    fn read_json(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached) = self.cache.get(&path_str) {
                info!("Using cached content for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        if !path.exists() {
            return Err(MatcherError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");
        if !extension.eq_ignore_ascii_case("json") {
            return Err(MatcherError::UnsupportedFormat(format!(
                "Expected a .json file: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;

        if self.enable_cache {
            self.cache.insert(path_str, content.clone());
        }

        Ok(content)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
