//! CLI interface for the relevance checker

use crate::config::OutputFormat;
use clap::{ArgGroup, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-relevance")]
#[command(about = "Score how well a resume matches a job description")]
#[command(
    long_about = "Score resume and job description relevance with keyword overlap or a keyword + semantic blend, and report matched and missing skills"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a resume against a job description
    #[command(group(
        ArgGroup::new("jd")
            .required(true)
            .args(["job", "job_text", "sample_jd"])
    ))]
    Analyze {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (PDF, TXT, MD)
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Job description text given inline
        #[arg(long)]
        job_text: Option<String>,

        /// Use the built-in sample job description
        #[arg(long)]
        sample_jd: bool,

        /// Label recorded as the JD source
        #[arg(long)]
        jd_source: Option<String>,

        /// Use the basic word-overlap strategy only
        #[arg(long)]
        no_embeddings: bool,

        /// Embedding model to use (repo id or folder under models_dir)
        #[arg(short, long)]
        embedding: Option<String>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save the analysis export (JSON) to this file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Do not append this analysis to the history
        #[arg(long)]
        no_history: bool,

        /// Show the score breakdown
        #[arg(short, long)]
        detailed: bool,
    },

    /// Analysis history dashboard
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },

    /// Skill vocabulary commands
    Skills {
        #[command(subcommand)]
        action: Option<SkillsAction>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Show all past analyses as a table
    List,

    /// Export the full history as JSON
    Export {
        /// Output file (default: all_resume_analyses_<timestamp>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Remove all history entries
    Clear,
}

#[derive(Subcommand)]
pub enum SkillsAction {
    /// List the active skill vocabulary
    List,

    /// Show the vocabulary skills found in a file
    Scan {
        /// File to scan (PDF, TXT, MD)
        file: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "scoring.keyword_weight")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
