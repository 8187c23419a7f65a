//! Output formatters for analysis results and history

use crate::config::OutputFormat;
use crate::error::{Result, RelevanceError};
use crate::history::HistoryEntry;
use crate::processing::analyzer::AnalysisRecord;
use crate::processing::scorer::ScoringStrategy;
use crate::processing::verdict::Tier;
use colored::{Color, Colorize};

pub const GAUGE_WIDTH: usize = 50;

pub trait OutputFormatter {
    fn format_analysis(&self, record: &AnalysisRecord) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Terminal output with optional ANSI colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_breakdown: bool,
}

pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Green => Color::Green,
        Tier::Orange => Color::Yellow,
        Tier::Red => Color::Red,
    }
}

fn band_tier(position: f64) -> Tier {
    if position >= 70.0 {
        Tier::Green
    } else if position >= 40.0 {
        Tier::Orange
    } else {
        Tier::Red
    }
}

/// Horizontal gauge for a 0-100 score with the 0-40, 40-70 and 70-100
/// bands marked underneath.
pub fn render_gauge(score: f64, width: usize, use_colors: bool) -> String {
    let width = width.max(10);
    let score = crate::processing::scorer::clamp_score(score);
    let filled = ((score / 100.0) * width as f64).round() as usize;

    let mut bar = String::new();
    for i in 0..width {
        let cell = if i < filled { "█" } else { "░" };
        if use_colors {
            let position = (i as f64 + 0.5) * 100.0 / width as f64;
            bar.push_str(&cell.color(tier_color(band_tier(position))).to_string());
        } else {
            bar.push_str(cell);
        }
    }

    let mut scale = vec![' '; width + 1];
    for (mark, label) in [(0usize, "0"), (40, "40"), (70, "70"), (100, "100")] {
        let at = (mark * width / 100).min(width + 1 - label.len());
        for (offset, ch) in label.chars().enumerate() {
            scale[at + offset] = ch;
        }
    }
    let scale: String = scale.into_iter().collect();

    format!("[{}] {:.1}%\n {}", bar, score, scale.trim_end())
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{}\n", title.bold())
        } else {
            format!("\n{}\n", title)
        }
    }

    fn verdict_icon(tier: Tier) -> &'static str {
        match tier {
            Tier::Green => "🏆",
            Tier::Orange => "⚖️",
            Tier::Red => "📉",
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_analysis(&self, record: &AnalysisRecord) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📊 ANALYSIS RESULTS"));
        output.push_str(&format!(
            "Resume: {} | Job: {} | {}\n",
            record.resume_filename,
            record.jd_source,
            record.analysis_date.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        output.push_str(&format!(
            "\n🎯 Relevance Score: {}\n",
            self.colorize(
                &format!("{:.1}%", record.relevance_score),
                tier_color(record.verdict_tier)
            )
        ));
        output.push_str(&format!(
            "✅ Skills Matched: {}   ❌ Skills Missing: {}\n",
            record.matched_skills.len(),
            record.missing_skills.len()
        ));
        output.push_str(&format!(
            "{} {}\n\n",
            Self::verdict_icon(record.verdict_tier),
            self.colorize(&record.verdict, tier_color(record.verdict_tier))
        ));
        output.push_str(&render_gauge(record.relevance_score, GAUGE_WIDTH, self.use_colors));
        output.push('\n');

        if self.detailed {
            output.push_str(&self.format_header("Score Breakdown"));
            match record.breakdown.strategy {
                ScoringStrategy::Basic => {
                    output.push_str(&format!(
                        "Strategy: basic word overlap ({:.1}% of JD words present)\n",
                        record.breakdown.keyword_score * 100.0
                    ));
                }
                ScoringStrategy::Combined => {
                    output.push_str("Strategy: combined keyword + semantic\n");
                    output.push_str(&format!(
                        "Keyword (TF-IDF): {:.1}%\n",
                        record.breakdown.keyword_score * 100.0
                    ));
                    if let Some(semantic) = record.breakdown.semantic_score {
                        output.push_str(&format!("Semantic: {:.1}%\n", semantic * 100.0));
                    }
                }
            }
            output.push_str(&format!("Skill coverage: {:.1}%\n", record.skill_coverage));
            if !record.resume_skills.is_empty() {
                output.push_str(&format!(
                    "All resume skills: {}\n",
                    record.resume_skills.join(", ")
                ));
            }
        }

        output.push_str(&self.format_header("✅ Matched Skills"));
        if record.matched_skills.is_empty() {
            output.push_str("No matching skills detected\n");
        } else {
            for skill in &record.matched_skills {
                output.push_str(&format!("  • {}\n", self.colorize(skill, Color::Green)));
            }
        }

        output.push_str(&self.format_header("❌ Missing Skills"));
        if record.missing_skills.is_empty() {
            output.push_str("All required skills found!\n");
        } else {
            for skill in &record.missing_skills {
                output.push_str(&format!("  • {}\n", self.colorize(skill, Color::Red)));
            }
        }

        output.push_str(&self.format_header("💡 Improvement Suggestions"));
        for (i, suggestion) in record.suggestions.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_analysis(&self, record: &AnalysisRecord) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(record)
        } else {
            serde_json::to_string(record)
        };
        json.map_err(|e| RelevanceError::OutputFormatting(format!("JSON serialization failed: {}", e)))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_breakdown: bool) -> Self {
        Self { include_breakdown }
    }

    fn bullet_list(skills: &[String], empty: &str) -> String {
        if skills.is_empty() {
            format!("_{}_\n", empty)
        } else {
            skills.iter().map(|s| format!("- {}\n", s)).collect()
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_analysis(&self, record: &AnalysisRecord) -> Result<String> {
        let mut md = String::new();

        md.push_str("# Resume Relevance Analysis\n\n");
        md.push_str(&format!("- **Resume:** {}\n", record.resume_filename));
        md.push_str(&format!("- **Job description:** {}\n", record.jd_source));
        md.push_str(&format!(
            "- **Date:** {}\n\n",
            record.analysis_date.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        md.push_str(&format!(
            "## Score: {:.1}% ({})\n\n",
            record.relevance_score, record.verdict
        ));

        if self.include_breakdown {
            md.push_str("| Component | Value |\n|---|---|\n");
            let strategy = match record.breakdown.strategy {
                ScoringStrategy::Basic => "basic",
                ScoringStrategy::Combined => "combined",
            };
            md.push_str(&format!("| Strategy | {} |\n", strategy));
            md.push_str(&format!(
                "| Keyword | {:.1}% |\n",
                record.breakdown.keyword_score * 100.0
            ));
            if let Some(semantic) = record.breakdown.semantic_score {
                md.push_str(&format!("| Semantic | {:.1}% |\n", semantic * 100.0));
            }
            md.push_str(&format!("| Skill coverage | {:.1}% |\n\n", record.skill_coverage));
        }

        md.push_str("## Matched Skills\n\n");
        md.push_str(&Self::bullet_list(
            record.matched_skills.as_slice(),
            "No matching skills detected",
        ));
        md.push_str("\n## Missing Skills\n\n");
        md.push_str(&Self::bullet_list(
            record.missing_skills.as_slice(),
            "All required skills found!",
        ));

        md.push_str("\n## Suggestions\n\n");
        for (i, suggestion) in record.suggestions.iter().enumerate() {
            md.push_str(&format!("{}. {}\n", i + 1, suggestion));
        }

        Ok(md)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(detailed),
        }
    }

    pub fn generate(&self, record: &AnalysisRecord, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_analysis(record),
            OutputFormat::Json => self.json_formatter.format_analysis(record),
            OutputFormat::Markdown => self.markdown_formatter.format_analysis(record),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

const HISTORY_HEADERS: [&str; 7] = [
    "Resume",
    "JD Source",
    "Score (%)",
    "Verdict",
    "Skills Found",
    "Missing Skills",
    "Date",
];

/// Plain-text table of history entries
pub fn format_history_table(entries: &[HistoryEntry]) -> String {
    let rows: Vec<[String; 7]> = entries
        .iter()
        .map(|e| {
            [
                e.resume_filename.clone(),
                e.jd_source.clone(),
                format!("{:.1}", e.relevance_score),
                e.verdict.clone(),
                e.skills_found.clone(),
                e.missing_skills.clone(),
                e.display_date(),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = HISTORY_HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let render = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let header: Vec<String> = HISTORY_HEADERS.iter().map(|h| h.to_string()).collect();
    let mut table = render(header.as_slice());
    table.push('\n');
    table.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    table.push('\n');
    for row in &rows {
        table.push_str(&render(row.as_slice()));
        table.push('\n');
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::AnalysisHistory;
    use crate::processing::analyzer::AnalysisEngine;
    use crate::processing::document::Document;

    fn record() -> AnalysisRecord {
        AnalysisEngine::new().unwrap().analyze(
            &Document::resume("Python developer using Git", "jane.txt"),
            &Document::job_description("Python developer with AWS", "Custom JD"),
            None,
        )
    }

    #[test]
    fn test_gauge_plain() {
        let gauge = render_gauge(50.0, 50, false);
        let first_line = gauge.lines().next().unwrap();
        assert_eq!(first_line.matches('█').count(), 25);
        assert_eq!(first_line.matches('░').count(), 25);
        assert!(first_line.ends_with("50.0%"));
        assert!(gauge.contains("40"));
        assert!(gauge.contains("70"));
        assert!(gauge.contains("100"));
    }

    #[test]
    fn test_gauge_clamps() {
        let full = render_gauge(250.0, 20, false);
        assert_eq!(full.lines().next().unwrap().matches('█').count(), 20);
        let empty = render_gauge(f64::NAN, 20, false);
        assert_eq!(empty.lines().next().unwrap().matches('█').count(), 0);
    }

    #[test]
    fn test_console_output() {
        let formatter = ConsoleFormatter::new(false, true);
        let output = formatter.format_analysis(&record()).unwrap();
        assert!(output.contains("Relevance Score: 50.0%"));
        assert!(output.contains("Medium Suitability"));
        assert!(output.contains("✅ Skills Matched: 1   ❌ Skills Missing: 1"));
        assert!(output.contains("✅ Matched Skills\n  • Python\n"));
        assert!(!output.contains("Skills Found"));
        assert!(output.contains("• AWS"));
        // Git is a resume skill the JD does not ask for
        assert!(!output.contains("• Git"));
        assert!(output.contains("All resume skills: Python, Git"));
        assert!(output.contains("1. Consider adding these skills: AWS"));
        assert!(output.contains("Strategy: basic word overlap"));
        assert_eq!(formatter.supports_format(), OutputFormat::Console);
    }

    #[test]
    fn test_json_output() {
        let output = JsonFormatter::new(true).format_analysis(&record()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["verdict"], "Medium Suitability");
        assert_eq!(value["verdict_tier"], "orange");
        assert_eq!(value["missing_skills"][0], "AWS");
    }

    #[test]
    fn test_markdown_output() {
        let output = MarkdownFormatter::new(true).format_analysis(&record()).unwrap();
        assert!(output.starts_with("# Resume Relevance Analysis"));
        assert!(output.contains("## Score: 50.0% (Medium Suitability)"));
        assert!(output.contains("| Strategy | basic |"));
        assert!(output.contains("## Matched Skills\n\n- Python\n"));
        assert!(!output.contains("- Git\n"));
    }

    #[test]
    fn test_history_table() {
        let mut history = AnalysisHistory::new();
        history.append(&record());
        let table = format_history_table(history.entries());
        let mut lines = table.lines();
        let header = lines.next().unwrap();
        for column in HISTORY_HEADERS {
            assert!(header.contains(column));
        }
        lines.next();
        let row = lines.next().unwrap();
        assert!(row.starts_with("jane.txt"));
        assert!(row.contains("50.0"));
        assert!(row.contains("Python"));
    }
}
