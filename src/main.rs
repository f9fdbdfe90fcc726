//! cv-match: candidate-job matching and ranking engine

mod cli;
mod config;
mod error;
mod input;
mod matching;
mod models;
mod output;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction, ModelAction};
use config::Config;
use error::{MatcherError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use input::ProfileLoader;
use log::{error, info, warn};
use matching::explainer::MatchExplainer;
use matching::ranker::CandidateRanker;
use matching::similarity::shared_provider;
use models::EmbeddingModelManager;
use output::report::{ExplainReport, RankReport, ReportMetadata};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Explain {
            candidate,
            job,
            output,
            detailed,
            save,
        } => {
            info!("Explaining candidate-job match");

            let output_format =
                cli::parse_output_format(&output).map_err(MatcherError::InvalidInput)?;

            let mut loader = ProfileLoader::new();
            let candidate_profile = loader.load_candidate(&candidate)?;
            let job_requirements = loader.load_job(&job)?;

            ensure_default_model(&config).await;
            let provider = shared_provider(&config);

            let start = Instant::now();
            let explainer = MatchExplainer::new(provider, config.scoring.clone());
            let explanation = explainer.explain(&candidate_profile, &job_requirements);
            let elapsed_ms = start.elapsed().as_millis() as u64;

            let report = ExplainReport {
                metadata: ReportMetadata::new(
                    explanation.similarity.method,
                    provider.backend_name().map(|s| s.to_string()),
                    elapsed_ms,
                ),
                explanation,
            };

            let formatter =
                output::formatter_for(&output_format, config.output.color_output, detailed);
            let rendered = formatter.format_explain(&report)?;
            emit(&rendered, save)?;
        }

        Commands::Rank {
            candidates,
            job,
            top,
            output,
            detailed,
            save,
        } => {
            info!("Ranking candidates against job");

            let output_format =
                cli::parse_output_format(&output).map_err(MatcherError::InvalidInput)?;

            let mut loader = ProfileLoader::new();
            let candidate_profiles = loader.load_candidates(&candidates)?;
            let job_requirements = loader.load_job(&job)?;

            ensure_default_model(&config).await;
            let provider = shared_provider(&config);

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message(format!("Scoring {} candidates...", candidate_profiles.len()));

            let start = Instant::now();
            let ranker = CandidateRanker::new(provider);
            let ranked = ranker.rank(&candidate_profiles, &job_requirements, top);
            let elapsed_ms = start.elapsed().as_millis() as u64;

            spinner.finish_and_clear();

            let report = RankReport {
                total_candidates: candidate_profiles.len(),
                metadata: ReportMetadata::new(
                    provider.active_method(),
                    provider.backend_name().map(|s| s.to_string()),
                    elapsed_ms,
                ),
                candidates: ranked,
            };

            let formatter =
                output::formatter_for(&output_format, config.output.color_output, detailed);
            let rendered = formatter.format_rank(&report)?;
            emit(&rendered, save)?;
        }

        Commands::Models { action } => {
            run_models_command(action, &config).await?;
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Models directory: {}", config.models_dir().display());
                println!(
                    "Default embedding model: {}",
                    config.models.default_embedding_model
                );
                println!("Hire threshold: {}", config.scoring.hire_threshold);
                println!("Consider threshold: {}", config.scoring.consider_threshold);
                println!("Fallback boost: {}", config.scoring.fallback_boost);
                println!("Fallback cap: {}", config.scoring.fallback_cap);
            }
            Some(ConfigAction::Reset) => {
                let default_config = Config::default();
                default_config.save()?;
                println!("Configuration reset to defaults");
            }
        },
    }

    Ok(())
}

async fn run_models_command(action: ModelAction, config: &Config) -> Result<()> {
    match action {
        ModelAction::List => {
            let manager = EmbeddingModelManager::new(config.get_models_dir()).await?;

            println!("Embedding models:");
            for model in manager.list_available_models() {
                let status = if manager.is_model_downloaded(
                    &manager.resolve_model_id(&model.repo_id).unwrap_or_default(),
                ) {
                    "downloaded"
                } else {
                    "available"
                };
                println!(
                    "  {} ({}) - {} MB, {} dims [{}]",
                    model.name, model.repo_id, model.size_mb, model.dimensions, status
                );
                println!("    {}", model.description);
            }
        }

        ModelAction::Download { model, force } => {
            let mut manager = EmbeddingModelManager::new(config.get_models_dir()).await?;

            let model_id = manager
                .resolve_model_id(&model)
                .ok_or_else(|| MatcherError::ModelNotFound(model.clone()))?;

            if !force && manager.is_model_downloaded(&model_id) {
                println!("Model '{}' is already downloaded (use --force to re-download)", model_id);
                return Ok(());
            }

            let model_path = manager.download_model(&model_id).await?;
            println!("Model '{}' downloaded to {}", model_id, model_path.display());
        }

        ModelAction::Remove { model } => {
            let manager = EmbeddingModelManager::new(config.get_models_dir()).await?;

            if !manager.is_model_downloaded(&model) {
                println!("Model '{}' is not downloaded", model);
                return Ok(());
            }

            let model_path = config.get_models_dir().join(&model);
            std::fs::remove_dir_all(&model_path)?;
            println!("Removed model directory: {}", model_path.display());
        }

        ModelAction::Info { model } => {
            let manager = EmbeddingModelManager::new(config.get_models_dir()).await?;

            let model_id = manager
                .resolve_model_id(&model)
                .ok_or_else(|| MatcherError::ModelNotFound(model.clone()))?;
            let info = manager
                .get_model_info(&model_id)
                .ok_or_else(|| MatcherError::ModelNotFound(model_id.clone()))?;

            println!("Name: {}", info.name);
            println!("Repository: {}", info.repo_id);
            println!("Size: {} MB", info.size_mb);
            println!("Dimensions: {}", info.dimensions);
            println!("Description: {}", info.description);
            println!(
                "Status: {}",
                if manager.is_model_downloaded(&model_id) {
                    "downloaded"
                } else {
                    "available for download"
                }
            );
        }
    }

    Ok(())
}

/// Best-effort download of the configured embedding model. Failure is fine:
/// the provider downgrades to the keyword fallback.
async fn ensure_default_model(config: &Config) {
    let model_id = &config.models.default_embedding_model;

    match EmbeddingModelManager::new(config.get_models_dir()).await {
        Ok(mut manager) => {
            if manager.is_model_downloaded(model_id) {
                return;
            }
            if let Err(e) = manager.ensure_model_available(model_id).await {
                warn!("Could not fetch embedding model '{}': {}", model_id, e);
            }
        }
        Err(e) => {
            warn!("Embedding model manager unavailable: {}", e);
        }
    }
}

fn emit(rendered: &str, save: Option<PathBuf>) -> Result<()> {
    match save {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            println!("Report saved to {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}
