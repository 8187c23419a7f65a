//! Configuration management for the relevance checker

use crate::error::{Result, RelevanceError};
use crate::processing::scorer::{DEFAULT_MAX_FEATURES, KEYWORD_WEIGHT, SEMANTIC_WEIGHT};
use crate::processing::skills::DEFAULT_SKILLS;
use crate::processing::suggestions::DEFAULT_MAX_LISTED_SKILLS;
use crate::processing::verdict::VerdictPreset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub models: ModelConfig,
    pub scoring: ScoringConfig,
    pub verdict: VerdictConfig,
    pub skills: SkillsConfig,
    pub suggestions: SuggestionConfig,
    pub history: HistoryConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Hugging Face repo id, or a folder name under `models_dir`, or a path
    pub embedding_model: String,
    pub models_dir: PathBuf,
    pub use_embeddings: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub keyword_weight: f64,
    pub semantic_weight: f64,
    pub max_features: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictConfig {
    pub preset: VerdictPreset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsConfig {
    pub vocabulary: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionConfig {
    pub max_listed_skills: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    pub path: PathBuf,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            keyword_weight: KEYWORD_WEIGHT,
            semantic_weight: SEMANTIC_WEIGHT,
            max_features: DEFAULT_MAX_FEATURES,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let models_dir = home.join(".resume-relevance").join("models");
        let history_path = dirs::data_dir()
            .unwrap_or(home)
            .join("resume-relevance")
            .join("analysis_history.json");

        Self {
            models: ModelConfig {
                embedding_model: "minishlab/potion-base-8M".to_string(),
                models_dir,
                use_embeddings: true,
            },
            scoring: ScoringConfig::default(),
            verdict: VerdictConfig {
                preset: VerdictPreset::Standard,
            },
            skills: SkillsConfig {
                vocabulary: DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect(),
            },
            suggestions: SuggestionConfig {
                max_listed_skills: DEFAULT_MAX_LISTED_SKILLS,
            },
            history: HistoryConfig {
                path: history_path,
                enabled: true,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first use
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| RelevanceError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| RelevanceError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-relevance")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        for (name, weight) in [
            ("scoring.keyword_weight", self.scoring.keyword_weight),
            ("scoring.semantic_weight", self.scoring.semantic_weight),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(RelevanceError::Configuration(format!(
                    "{} must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }

        if self.scoring.max_features == 0 {
            return Err(RelevanceError::Configuration(
                "scoring.max_features must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Resolve the embedding model to a local folder when one exists,
    /// otherwise hand back the configured name as a hub repo id.
    pub fn resolve_embedding_model(&self, override_name: Option<&str>) -> PathBuf {
        let name = override_name.unwrap_or(&self.models.embedding_model);
        let local = self.models.models_dir.join(name);
        if local.exists() {
            local
        } else {
            PathBuf::from(name)
        }
    }

    /// Set a scalar value by dotted key, e.g. `scoring.keyword_weight`
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let previous = self.clone();
        match key {
            "models.embedding_model" => self.models.embedding_model = value.to_string(),
            "models.models_dir" => self.models.models_dir = PathBuf::from(value),
            "models.use_embeddings" => self.models.use_embeddings = parse_value(key, value)?,
            "scoring.keyword_weight" => self.scoring.keyword_weight = parse_value(key, value)?,
            "scoring.semantic_weight" => self.scoring.semantic_weight = parse_value(key, value)?,
            "scoring.max_features" => self.scoring.max_features = parse_value(key, value)?,
            "verdict.preset" => {
                self.verdict.preset = match value.to_lowercase().as_str() {
                    "standard" => VerdictPreset::Standard,
                    "strict" => VerdictPreset::Strict,
                    _ => {
                        return Err(RelevanceError::Configuration(format!(
                            "Invalid verdict preset: {}. Supported: standard, strict",
                            value
                        )))
                    }
                }
            }
            "suggestions.max_listed_skills" => {
                self.suggestions.max_listed_skills = parse_value(key, value)?
            }
            "history.path" => self.history.path = PathBuf::from(value),
            "history.enabled" => self.history.enabled = parse_value(key, value)?,
            "output.format" => {
                self.output.format = crate::cli::parse_output_format(value)
                    .map_err(RelevanceError::Configuration)?
            }
            "output.color_output" => self.output.color_output = parse_value(key, value)?,
            _ => {
                return Err(RelevanceError::Configuration(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }

        if let Err(e) = self.validate() {
            *self = previous;
            return Err(e);
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse::<T>().map_err(|_| {
        RelevanceError::Configuration(format!("Invalid value for {}: {}", key, value))
    })
}
