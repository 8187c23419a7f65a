//! Resume relevance checker library
//!
//! The scoring core lives in [`processing`]; the free functions below are
//! its entry points for callers that do not need the engine type.

pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{RelevanceError, Result};
pub use processing::analyzer::{AnalysisEngine, AnalysisRecord};
pub use processing::document::{Document, DocumentType};
pub use processing::embeddings::EmbeddingCapability;
pub use processing::scorer::{RelevanceScorer, ScoreBreakdown, ScoringStrategy};
pub use processing::skills::{extract_skills, match_skills, MatchResult, SkillSet, SkillVocabulary};
pub use processing::suggestions::suggest;
pub use processing::verdict::{classify, Classification, Tier};

/// Relevance score in [0, 100] with the default weights
pub fn score(resume_text: &str, jd_text: &str, embedder: Option<&dyn EmbeddingCapability>) -> f64 {
    RelevanceScorer::new().score(resume_text, jd_text, embedder)
}

/// Full analysis with the standard vocabulary and thresholds
pub fn analyze(
    resume_text: &str,
    jd_text: &str,
    embedder: Option<&dyn EmbeddingCapability>,
) -> Result<AnalysisRecord> {
    Ok(AnalysisEngine::new()?.analyze(
        &Document::resume(resume_text, "resume"),
        &Document::job_description(jd_text, "Custom JD"),
        embedder,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_points() {
        let vocabulary = SkillVocabulary::new(["Python", "SQL", "AWS"]).unwrap();
        let resume = "Experienced Python developer with SQL skills";
        let jd = "Looking for Python, SQL, and AWS expertise";

        let resume_skills = extract_skills(resume, &vocabulary);
        let jd_skills = extract_skills(jd, &vocabulary);
        let result = match_skills(&resume_skills, &jd_skills);
        assert_eq!(result.matched, SkillSet::from(vec!["Python", "SQL"]));
        assert_eq!(result.missing, SkillSet::from(vec!["AWS"]));

        let coverage = result.coverage();
        assert_eq!(classify(coverage).tier, Tier::Orange);
        let hints = suggest(&result.missing, coverage);
        assert_eq!(hints[0], "Consider adding these skills: AWS");
        assert!(hints.contains(&"Highlight relevant projects more prominently".to_string()));

        let total = score(resume, jd, None);
        assert!((0.0..=100.0).contains(&total));
    }

    #[test]
    fn test_analyze_defaults() {
        let record = analyze("Python", "Python", None).unwrap();
        assert_eq!(record.resume_filename, "resume");
        assert_eq!(record.jd_source, "Custom JD");
        assert_eq!(record.relevance_score, 100.0);
    }
}
