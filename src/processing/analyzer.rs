//! Analysis engine sequencing extraction, matching, scoring and verdicts

use crate::config::Config;
use crate::error::Result;
use crate::processing::document::Document;
use crate::processing::embeddings::EmbeddingCapability;
use crate::processing::scorer::{RelevanceScorer, ScoreBreakdown};
use crate::processing::skills::{extract_skills, match_skills, SkillSet, SkillVocabulary};
use crate::processing::suggestions::{suggest_with, DEFAULT_MAX_LISTED_SKILLS};
use crate::processing::verdict::{Tier, VerdictTable, STANDARD_TABLE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Coordinates the scoring core over one resume / JD pair
pub struct AnalysisEngine {
    vocabulary: SkillVocabulary,
    scorer: RelevanceScorer,
    verdict_table: VerdictTable,
    max_listed_skills: usize,
}

/// Result of one analysis. Built once and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub resume_filename: String,
    pub jd_source: String,
    pub relevance_score: f64,
    pub verdict: String,
    pub verdict_tier: Tier,
    pub resume_skills: SkillSet,
    pub jd_skills: SkillSet,
    pub matched_skills: SkillSet,
    pub missing_skills: SkillSet,
    /// Share of JD skills found in the resume, in percent
    pub skill_coverage: f64,
    pub suggestions: Vec<String>,
    pub breakdown: ScoreBreakdown,
    pub analysis_date: DateTime<Utc>,
}

impl AnalysisEngine {
    /// Standard vocabulary, weights and thresholds
    pub fn new() -> Result<Self> {
        Ok(Self {
            vocabulary: SkillVocabulary::standard()?,
            scorer: RelevanceScorer::new(),
            verdict_table: STANDARD_TABLE,
            max_listed_skills: DEFAULT_MAX_LISTED_SKILLS,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            vocabulary: SkillVocabulary::new(&config.skills.vocabulary)?,
            scorer: RelevanceScorer::from_config(&config.scoring),
            verdict_table: config.verdict.preset.table().clone(),
            max_listed_skills: config.suggestions.max_listed_skills,
        })
    }

    pub fn with_vocabulary(mut self, vocabulary: SkillVocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    pub fn verdict_table(&self) -> &VerdictTable {
        &self.verdict_table
    }

    pub fn analyze(
        &self,
        resume: &Document,
        job: &Document,
        embedder: Option<&dyn EmbeddingCapability>,
    ) -> AnalysisRecord {
        self.analyze_at(resume, job, embedder, Utc::now())
    }

    /// Same as `analyze` with an explicit timestamp
    pub fn analyze_at(
        &self,
        resume: &Document,
        job: &Document,
        embedder: Option<&dyn EmbeddingCapability>,
        analysis_date: DateTime<Utc>,
    ) -> AnalysisRecord {
        let start_time = Instant::now();

        let resume_skills = extract_skills(resume.content(), &self.vocabulary);
        let jd_skills = extract_skills(job.content(), &self.vocabulary);
        let matches = match_skills(&resume_skills, &jd_skills);
        log::debug!(
            "Skills: {} in resume, {} in JD, {} matched",
            resume_skills.len(),
            jd_skills.len(),
            matches.matched.len()
        );

        log::debug!(
            "Scoring {} words of resume against {} words of JD",
            resume.word_count(),
            job.word_count()
        );
        // Skills match on raw text; scoring only needs the normalized form.
        let breakdown = self
            .scorer
            .total_breakdown(resume.normalized(), job.normalized(), embedder);
        let verdict = self.verdict_table.classify(breakdown.score);
        let suggestions = suggest_with(
            &matches.missing,
            breakdown.score,
            &self.verdict_table,
            self.max_listed_skills,
        );

        log::debug!("Analysis completed in {:.2?}", start_time.elapsed());

        AnalysisRecord {
            resume_filename: resume.source().to_string(),
            jd_source: job.source().to_string(),
            relevance_score: breakdown.score,
            verdict: verdict.label,
            verdict_tier: verdict.tier,
            skill_coverage: matches.coverage(),
            resume_skills,
            jd_skills,
            matched_skills: matches.matched,
            missing_skills: matches.missing,
            suggestions,
            breakdown,
            analysis_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::scorer::ScoringStrategy;
    use crate::processing::verdict::VerdictPreset;

    fn small_engine() -> AnalysisEngine {
        AnalysisEngine::new()
            .unwrap()
            .with_vocabulary(SkillVocabulary::new(["Python", "SQL", "AWS"]).unwrap())
    }

    #[test]
    fn test_end_to_end_basic() {
        let engine = small_engine();
        let resume = Document::resume("Experienced Python developer with SQL skills", "resume.txt");
        let job = Document::job_description("Looking for Python, SQL, and AWS expertise", "Custom JD");

        let record = engine.analyze(&resume, &job, None);

        assert_eq!(record.resume_skills, SkillSet::from(vec!["Python", "SQL"]));
        assert_eq!(record.jd_skills, SkillSet::from(vec!["Python", "SQL", "AWS"]));
        assert_eq!(record.matched_skills, SkillSet::from(vec!["Python", "SQL"]));
        assert_eq!(record.missing_skills, SkillSet::from(vec!["AWS"]));
        assert!((record.skill_coverage - 100.0 * 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(record.breakdown.strategy, ScoringStrategy::Basic);
        assert!((record.relevance_score - 100.0 * 2.0 / 7.0).abs() < 1e-9);
        assert_eq!(record.verdict, "Low Suitability");
        assert_eq!(record.verdict_tier, Tier::Red);
        assert_eq!(record.suggestions[0], "Consider adding these skills: AWS");
        assert_eq!(record.suggestions.len(), 3);
        assert_eq!(record.resume_filename, "resume.txt");
        assert_eq!(record.jd_source, "Custom JD");
    }

    #[test]
    fn test_identical_documents_are_high() {
        let engine = small_engine();
        let text = "Python and SQL on AWS";
        let record = engine.analyze(
            &Document::resume(text, "a"),
            &Document::job_description(text, "b"),
            None,
        );
        assert_eq!(record.relevance_score, 100.0);
        assert_eq!(record.verdict, "High Suitability");
        assert!(record.missing_skills.is_empty());
        assert_eq!(
            record.suggestions,
            vec!["Great match! Consider adding recent projects"]
        );
    }

    #[test]
    fn test_from_config_uses_preset() {
        let mut config = Config::default();
        config.verdict.preset = VerdictPreset::Strict;
        let engine = AnalysisEngine::from_config(&config).unwrap();
        assert_eq!(engine.vocabulary().len(), 33);

        let text = "Python developer";
        let record = engine.analyze(
            &Document::resume(text, "a"),
            &Document::job_description(text, "b"),
            None,
        );
        assert_eq!(record.verdict, "Strong Match");
    }

    #[test]
    fn test_scores_match_raw_text_scoring() {
        let engine = small_engine();
        let resume = "Experienced Python developer -- SQL, C++ & Node.js!";
        let jd = "Looking for Python, SQL, and AWS expertise (Node.js a plus)";
        let record = engine.analyze(
            &Document::resume(resume, "a"),
            &Document::job_description(jd, "b"),
            None,
        );
        assert_eq!(record.relevance_score, RelevanceScorer::new().score(resume, jd, None));
        assert!(record.matched_skills.contains("Python"));
    }

    #[test]
    fn test_record_json_roundtrip() {
        let engine = small_engine();
        let record = engine.analyze(
            &Document::resume("Python", "resume.pdf"),
            &Document::job_description("Python AWS", "job.txt"),
            None,
        );

        let json = serde_json::to_string(&record).unwrap();
        let parsed: AnalysisRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
