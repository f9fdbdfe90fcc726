//! Embedding model management: download, cache scan and selection

use crate::error::{MatcherError, Result};
use hf_hub::api::tokio::Api;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Information about an available embedding model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingModelInfo {
    pub name: String,
    pub repo_id: String,
    pub size_mb: u64,
    pub description: String,
    pub dimensions: u32,
}

/// Manager for embedding models - handles download, caching, and selection
pub struct EmbeddingModelManager {
    models_dir: PathBuf,
    available_models: HashMap<String, EmbeddingModelInfo>,
    downloaded_models: HashSet<String>,
    api: Api,
}

impl EmbeddingModelManager {
    pub async fn new(models_dir: PathBuf) -> Result<Self> {
        if !models_dir.exists() {
            fs::create_dir_all(&models_dir).await.map_err(|e| {
                MatcherError::ModelError(format!("Failed to create models directory: {}", e))
            })?;
        }

        let api = Api::new()
            .map_err(|e| MatcherError::ModelError(format!("Failed to initialize HF API: {}", e)))?;

        let mut manager = Self {
            models_dir,
            available_models: HashMap::new(),
            downloaded_models: HashSet::new(),
            api,
        };

        manager.init_available_models();
        manager.scan_downloaded_models().await?;

        Ok(manager)
    }

    /// Registry of known Model2Vec embedding models
    fn init_available_models(&mut self) {
        self.available_models.insert(
            "potion-base-8M".to_string(),
            EmbeddingModelInfo {
                name: "Potion Base 8M".to_string(),
                repo_id: "minishlab/potion-base-8M".to_string(),
                size_mb: 33,
                description: "High-quality Model2Vec embeddings with 8M parameters".to_string(),
                dimensions: 256,
            },
        );

        self.available_models.insert(
            "m2v-base".to_string(),
            EmbeddingModelInfo {
                name: "Model2Vec Base".to_string(),
                repo_id: "minishlab/M2V_base_output".to_string(),
                size_mb: 90,
                description: "Legacy Model2Vec base embeddings model".to_string(),
                dimensions: 256,
            },
        );

        self.available_models.insert(
            "m2v-large".to_string(),
            EmbeddingModelInfo {
                name: "Model2Vec Large".to_string(),
                repo_id: "minishlab/M2V_large_output".to_string(),
                size_mb: 250,
                description: "High-capacity Model2Vec large embeddings model".to_string(),
                dimensions: 512,
            },
        );
    }

    /// Scan the models directory for already downloaded models
    async fn scan_downloaded_models(&mut self) -> Result<()> {
        let mut entries = fs::read_dir(&self.models_dir).await.map_err(|e| {
            MatcherError::ModelError(format!("Failed to scan models directory: {}", e))
        })?;

        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            MatcherError::ModelError(format!("Failed to read directory entry: {}", e))
        })? {
            let is_dir = entry
                .file_type()
                .await
                .map_err(|e| MatcherError::ModelError(format!("Failed to get file type: {}", e)))?
                .is_dir();

            if is_dir {
                let model_name = entry.file_name().to_string_lossy().to_string();
                if self.is_valid_model_directory(&entry.path()).await {
                    self.downloaded_models.insert(model_name);
                }
            }
        }

        Ok(())
    }

    /// A valid Model2Vec directory has a tokenizer and at least one model file
    async fn is_valid_model_directory(&self, path: &Path) -> bool {
        let model_file_exists = fs::metadata(path.join("model.safetensors")).await.is_ok()
            || fs::metadata(path.join("model.onnx")).await.is_ok();

        model_file_exists && fs::metadata(path.join("tokenizer.json")).await.is_ok()
    }

    /// Download an embedding model from the Hugging Face Hub
    pub async fn download_model(&mut self, model_id: &str) -> Result<PathBuf> {
        let model_info = self
            .available_models
            .get(model_id)
            .ok_or_else(|| MatcherError::ModelNotFound(model_id.to_string()))?;

        let model_dir = self.models_dir.join(model_id);

        if self.downloaded_models.contains(model_id) {
            return Ok(model_dir);
        }

        log::info!(
            "Downloading embedding model: {} ({} MB) from {}",
            model_info.name,
            model_info.size_mb,
            model_info.repo_id
        );

        fs::create_dir_all(&model_dir).await.map_err(|e| {
            MatcherError::ModelError(format!("Failed to create model directory: {}", e))
        })?;

        let repo = self.api.repo(hf_hub::Repo::model(model_info.repo_id.clone()));

        let essential_files = ["model.safetensors", "tokenizer.json", "config.json", "README.md"];

        for file in &essential_files {
            match repo.get(file).await {
                Ok(file_path) => {
                    let dest_path = model_dir.join(file);
                    fs::copy(&file_path, &dest_path).await.map_err(|e| {
                        MatcherError::ModelError(format!("Failed to copy {}: {}", file, e))
                    })?;
                    log::debug!("Downloaded: {}", file);
                }
                Err(e) => {
                    if *file == "README.md" || *file == "config.json" {
                        log::debug!("Optional file {} not found: {}", file, e);
                    } else {
                        return Err(MatcherError::ModelError(format!(
                            "Failed to download required file {}: {}",
                            file, e
                        )));
                    }
                }
            }
        }

        self.downloaded_models.insert(model_id.to_string());
        log::info!("Embedding model {} downloaded successfully", model_info.name);

        Ok(model_dir)
    }

    /// Get path to a downloaded model
    pub fn get_model_path(&self, model_id: &str) -> Option<PathBuf> {
        if self.downloaded_models.contains(model_id) {
            Some(self.models_dir.join(model_id))
        } else {
            None
        }
    }

    /// Get or download a model, returning its path
    pub async fn ensure_model_available(&mut self, model_id: &str) -> Result<PathBuf> {
        if let Some(path) = self.get_model_path(model_id) {
            return Ok(path);
        }
        self.download_model(model_id).await
    }

    pub fn list_available_models(&self) -> Vec<&EmbeddingModelInfo> {
        self.available_models.values().collect()
    }

    pub fn list_downloaded_models(&self) -> Vec<String> {
        self.downloaded_models.iter().cloned().collect()
    }

    /// Pick the best downloaded model, or the recommended default
    pub fn auto_select_model(&self) -> String {
        let preferred_order = ["potion-base-8M", "m2v-base", "m2v-large"];

        for model_id in &preferred_order {
            if self.downloaded_models.contains(*model_id) {
                return model_id.to_string();
            }
        }

        "potion-base-8M".to_string()
    }

    pub fn get_model_info(&self, model_id: &str) -> Option<&EmbeddingModelInfo> {
        self.available_models.get(model_id)
    }

    pub fn is_model_downloaded(&self, model_id: &str) -> bool {
        self.downloaded_models.contains(model_id)
    }

    /// Resolve a model ID from a direct ID, repo_id or display name
    pub fn resolve_model_id(&self, input: &str) -> Option<String> {
        if self.available_models.contains_key(input) {
            return Some(input.to_string());
        }

        for (id, info) in &self.available_models {
            if info.repo_id == input {
                return Some(id.clone());
            }
        }

        let input_lower = input.to_lowercase();
        for (id, info) in &self.available_models {
            if info.name.to_lowercase() == input_lower {
                return Some(id.clone());
            }
        }

        None
    }
}
