//! resume-relevance: resume and job description relevance checker

use chrono::Utc;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use resume_relevance::cli::{self, Cli, Commands, ConfigAction, HistoryAction, SkillsAction};
use resume_relevance::config::Config;
use resume_relevance::error::{RelevanceError, Result};
use resume_relevance::history::{self, AnalysisHistory};
use resume_relevance::input::{manager::file_label, InputManager, SAMPLE_JOB_DESCRIPTION};
use resume_relevance::output::formatter::format_history_table;
use resume_relevance::output::report::{analysis_filename, history_filename, save_analysis, save_history};
use resume_relevance::output::ReportGenerator;
use resume_relevance::processing::analyzer::AnalysisEngine;
use resume_relevance::processing::document::{Document, DocumentType};
use resume_relevance::processing::embeddings::{EmbeddingCapability, Model2VecEmbedder};
use resume_relevance::processing::skills::{extract_skills, SkillVocabulary};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

const INPUT_EXTENSIONS: &[&str] = &["pdf", "txt", "md", "markdown"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: PathBuf) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            job_text,
            sample_jd,
            jd_source,
            no_embeddings,
            embedding,
            output,
            save,
            no_history,
            detailed,
        } => {
            let format = match output {
                Some(value) => cli::parse_output_format(&value).map_err(RelevanceError::InvalidInput)?,
                None => config.output.format,
            };

            cli::validate_file_extension(&resume, INPUT_EXTENSIONS)
                .map_err(|e| RelevanceError::InvalidInput(format!("Resume file: {}", e)))?;

            let mut input_manager = InputManager::new();
            let resume_doc = input_manager.load_document(&resume, DocumentType::Resume).await?;

            let (jd_text, default_source) = if let Some(path) = &job {
                cli::validate_file_extension(path, INPUT_EXTENSIONS)
                    .map_err(|e| RelevanceError::InvalidInput(format!("Job description file: {}", e)))?;
                (input_manager.extract_text(path).await?, file_label(path))
            } else if let Some(text) = job_text {
                (text, "Custom JD".to_string())
            } else if sample_jd {
                (SAMPLE_JOB_DESCRIPTION.to_string(), "Sample JD".to_string())
            } else {
                return Err(RelevanceError::InvalidInput(
                    "Provide a job description with --job, --job-text or --sample-jd".to_string(),
                ));
            };

            if jd_text.trim().is_empty() {
                return Err(RelevanceError::InvalidInput(
                    "Job description is empty".to_string(),
                ));
            }
            if resume_doc.is_empty() {
                warn!("No text extracted from {}", resume.display());
            }

            let job_doc = Document::job_description(jd_text, jd_source.unwrap_or(default_source));
            info!(
                "Analyzing {} against {}",
                resume_doc.source(),
                job_doc.source()
            );

            let embedder = if no_embeddings || !config.models.use_embeddings {
                None
            } else {
                load_embedder(&config, embedding.as_deref()).await
            };

            let engine = AnalysisEngine::from_config(&config)?;
            let record = engine.analyze(
                &resume_doc,
                &job_doc,
                embedder.as_ref().map(|e| e as &dyn EmbeddingCapability),
            );

            let generator = ReportGenerator::with_options(config.output.color_output, detailed);
            println!("{}", generator.generate(&record, format)?);

            if config.history.enabled && !no_history {
                history::record_analysis(&config.history.path, &record)?;
            }

            if let Some(path) = save {
                let path = if path.is_dir() {
                    path.join(analysis_filename(record.analysis_date))
                } else {
                    path
                };
                save_analysis(&record, &path)?;
                println!("📥 Analysis saved to: {}", path.display());
            }
        }

        Commands::History { action } => {
            let path = &config.history.path;
            match action.unwrap_or(HistoryAction::List) {
                HistoryAction::List => {
                    let history = AnalysisHistory::load(path)?;
                    if history.is_empty() {
                        println!("No analysis history yet. Analyze a resume to get started.");
                    } else {
                        println!("📊 Analysis Dashboard ({} analyses)\n", history.len());
                        print!("{}", format_history_table(history.entries()));
                    }
                }
                HistoryAction::Export { output } => {
                    let history = AnalysisHistory::load(path)?;
                    let output = output.unwrap_or_else(|| PathBuf::from(history_filename(Utc::now())));
                    save_history(&history, &output)?;
                    println!("📥 Exported {} analyses to: {}", history.len(), output.display());
                }
                HistoryAction::Clear => {
                    let mut history = AnalysisHistory::load(path)?;
                    let removed = history.len();
                    history.clear();
                    history.save(path)?;
                    println!("🗑️  Cleared {} analyses", removed);
                }
            }
        }

        Commands::Skills { action } => {
            let vocabulary = SkillVocabulary::new(&config.skills.vocabulary)?;
            match action.unwrap_or(SkillsAction::List) {
                SkillsAction::List => {
                    println!("🧰 Skill vocabulary ({} skills):", vocabulary.len());
                    for skill in vocabulary.entries() {
                        println!("  • {}", skill);
                    }
                }
                SkillsAction::Scan { file } => {
                    cli::validate_file_extension(&file, INPUT_EXTENSIONS)
                        .map_err(RelevanceError::InvalidInput)?;
                    let text = InputManager::new().extract_text(&file).await?;
                    let skills = extract_skills(&text, &vocabulary);
                    if skills.is_empty() {
                        println!("No vocabulary skills found in {}", file.display());
                    } else {
                        println!("✅ {} skills found in {}:", skills.len(), file.display());
                        for skill in &skills {
                            println!("  • {}", skill);
                        }
                    }
                }
            }
        }

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                let content = toml::to_string_pretty(&config).map_err(|e| {
                    RelevanceError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("⚙️  Configuration ({})\n", config_path.display());
                println!("{}", content);
            }
            ConfigAction::Path => {
                println!("{}", config_path.display());
            }
            ConfigAction::Reset => {
                Config::default().save_to(&config_path)?;
                println!("✅ Configuration reset to defaults");
            }
            ConfigAction::Set { key, value } => {
                let mut config = config;
                config.set_value(&key, &value)?;
                config.save_to(&config_path)?;
                println!("✅ Set {} = {}", key, value);
            }
        },
    }

    Ok(())
}

/// Load the embedding model; on failure the analysis uses the basic strategy
async fn load_embedder(config: &Config, override_name: Option<&str>) -> Option<Model2VecEmbedder> {
    let model_path = config.resolve_embedding_model(override_name);
    let model_name = override_name
        .unwrap_or(&config.models.embedding_model)
        .to_string();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Loading embedding model {}", model_name));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = tokio::task::spawn_blocking(move || Model2VecEmbedder::load(&model_path, &model_name)).await;
    spinner.finish_and_clear();

    match result {
        Ok(Ok(embedder)) => Some(embedder),
        Ok(Err(e)) => {
            warn!("{}; falling back to basic scoring", e);
            None
        }
        Err(e) => {
            warn!("Model loading task failed: {}; falling back to basic scoring", e);
            None
        }
    }
}
