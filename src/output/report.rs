//! Export shapes and file helpers for analysis results

use crate::error::Result;
use crate::history::AnalysisHistory;
use crate::processing::analyzer::AnalysisRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Downloadable single-analysis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisExport {
    pub filename: String,
    pub analysis_date: String,
    pub relevance_score: f64,
    pub verdict: String,
    pub skills_found: Vec<String>,
    pub missing_skills: Vec<String>,
    pub suggestions: Vec<String>,
}

impl From<&AnalysisRecord> for AnalysisExport {
    fn from(record: &AnalysisRecord) -> Self {
        Self {
            filename: record.resume_filename.clone(),
            analysis_date: record.analysis_date.to_rfc3339(),
            relevance_score: record.relevance_score,
            verdict: record.verdict.clone(),
            skills_found: record.matched_skills.to_vec(),
            missing_skills: record.missing_skills.to_vec(),
            suggestions: record.suggestions.clone(),
        }
    }
}

impl AnalysisExport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

pub fn save_analysis(record: &AnalysisRecord, file_path: &Path) -> Result<()> {
    save_report_to_file(&AnalysisExport::from(record).to_json()?, file_path)
}

pub fn save_history(history: &AnalysisHistory, file_path: &Path) -> Result<()> {
    save_report_to_file(&history.to_json()?, file_path)
}

/// `resume_analysis_<YYYYmmdd_HHMMSS>.json`
pub fn analysis_filename(at: DateTime<Utc>) -> String {
    format!("resume_analysis_{}.json", at.format("%Y%m%d_%H%M%S"))
}

/// `all_resume_analyses_<YYYYmmdd_HHMMSS>.json`
pub fn history_filename(at: DateTime<Utc>) -> String {
    format!("all_resume_analyses_{}.json", at.format("%Y%m%d_%H%M%S"))
}
