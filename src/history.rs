//! Append-only analysis history persisted as a JSON array

use crate::error::{Result, RelevanceError};
use crate::processing::analyzer::AnalysisRecord;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One persisted analysis in the flat export shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub resume_filename: String,
    pub jd_source: String,
    pub relevance_score: f64,
    pub verdict: String,
    /// Comma-joined matched skills
    pub skills_found: String,
    /// Comma-joined missing skills
    pub missing_skills: String,
    /// ISO-8601 timestamp
    pub analysis_date: String,
}

impl From<&AnalysisRecord> for HistoryEntry {
    fn from(record: &AnalysisRecord) -> Self {
        Self {
            resume_filename: record.resume_filename.clone(),
            jd_source: record.jd_source.clone(),
            relevance_score: record.relevance_score,
            verdict: record.verdict.clone(),
            skills_found: record.matched_skills.join(", "),
            missing_skills: record.missing_skills.join(", "),
            analysis_date: record.analysis_date.to_rfc3339(),
        }
    }
}

impl HistoryEntry {
    /// Date rendered for tables, falling back to the stored text when unparsable
    pub fn display_date(&self) -> String {
        chrono::DateTime::parse_from_rfc3339(&self.analysis_date)
            .map(|date| date.format("%Y-%m-%d %H:%M:%S").to_string())
            .or_else(|_| {
                chrono::NaiveDateTime::parse_from_str(&self.analysis_date, "%Y-%m-%dT%H:%M:%S%.f")
                    .map(|date| date.format("%Y-%m-%d %H:%M:%S").to_string())
            })
            .unwrap_or_else(|_| self.analysis_date.clone())
    }
}

/// History owned by the shell. The scoring core never touches it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisHistory {
    entries: Vec<HistoryEntry>,
}

impl AnalysisHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from disk; a missing file is an empty history
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No history at {}, starting empty", path.display());
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::new());
        }

        let entries: Vec<HistoryEntry> = serde_json::from_str(&content).map_err(|e| {
            RelevanceError::History(format!("Failed to parse history '{}': {}", path.display(), e))
        })?;
        Ok(Self { entries })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(path, content)?;
        log::info!("Saved {} history entries to {}", self.entries.len(), path.display());
        Ok(())
    }

    pub fn append(&mut self, record: &AnalysisRecord) {
        self.entries.push(HistoryEntry::from(record));
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }
}

/// Load, append one record and write back
pub fn record_analysis(path: &Path, record: &AnalysisRecord) -> Result<AnalysisHistory> {
    let mut history = AnalysisHistory::load(path)?;
    history.append(record);
    history.save(path)?;
    Ok(history)
}
