//! Relevance scoring: basic token overlap or keyword + semantic blend

use crate::config::ScoringConfig;
use crate::error::Result;
use crate::processing::embeddings::{cosine_similarity, EmbeddingCapability};
use crate::processing::normalizer::{normalize, token_set};
use crate::processing::tfidf::keyword_similarity;
use serde::{Deserialize, Serialize};

pub const KEYWORD_WEIGHT: f64 = 0.4;
pub const SEMANTIC_WEIGHT: f64 = 0.6;
pub const DEFAULT_MAX_FEATURES: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringStrategy {
    Basic,
    Combined,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub strategy: ScoringStrategy,
    /// Basic: JD token coverage. Combined: TF-IDF cosine. Both in [0, 1].
    pub keyword_score: f64,
    /// Embedding cosine clamped to [0, 1]; only set by the combined strategy
    pub semantic_score: Option<f64>,
    pub score: f64,
}

impl ScoreBreakdown {
    fn zero(strategy: ScoringStrategy) -> Self {
        Self {
            strategy,
            keyword_score: 0.0,
            semantic_score: None,
            score: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    keyword_weight: f64,
    semantic_weight: f64,
    max_features: usize,
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl RelevanceScorer {
    pub fn new() -> Self {
        Self::from_config(&ScoringConfig::default())
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self {
            keyword_weight: config.keyword_weight,
            semantic_weight: config.semantic_weight,
            max_features: config.max_features.max(1),
        }
    }

    /// Score in [0, 100]. Never fails: internal errors are logged and score 0.
    pub fn score(
        &self,
        resume_text: &str,
        jd_text: &str,
        embedder: Option<&dyn EmbeddingCapability>,
    ) -> f64 {
        self.total_breakdown(resume_text, jd_text, embedder).score
    }

    /// Like `score`, keeping the sub-scores, with failures converted to zero
    pub fn total_breakdown(
        &self,
        resume_text: &str,
        jd_text: &str,
        embedder: Option<&dyn EmbeddingCapability>,
    ) -> ScoreBreakdown {
        match self.score_breakdown(resume_text, jd_text, embedder) {
            Ok(breakdown) => breakdown,
            Err(e) => {
                log::warn!("Relevance scoring failed, using 0: {}", e);
                let strategy = if embedder.is_some() {
                    ScoringStrategy::Combined
                } else {
                    ScoringStrategy::Basic
                };
                ScoreBreakdown::zero(strategy)
            }
        }
    }

    /// Fallible scoring; the strategy is chosen by whether an embedder is supplied
    pub fn score_breakdown(
        &self,
        resume_text: &str,
        jd_text: &str,
        embedder: Option<&dyn EmbeddingCapability>,
    ) -> Result<ScoreBreakdown> {
        match embedder {
            None => Ok(self.basic(resume_text, jd_text)),
            Some(embedder) => self.combined(resume_text, jd_text, embedder),
        }
    }

    fn basic(&self, resume_text: &str, jd_text: &str) -> ScoreBreakdown {
        let jd_tokens = token_set(jd_text);
        if jd_tokens.is_empty() {
            return ScoreBreakdown::zero(ScoringStrategy::Basic);
        }

        let resume_tokens = token_set(resume_text);
        let shared = jd_tokens.intersection(&resume_tokens).count();
        let coverage = shared as f64 / jd_tokens.len() as f64;
        log::debug!(
            "Basic overlap: {} of {} JD tokens found in resume",
            shared,
            jd_tokens.len()
        );

        ScoreBreakdown {
            strategy: ScoringStrategy::Basic,
            keyword_score: coverage,
            semantic_score: None,
            score: clamp_score(100.0 * coverage),
        }
    }

    fn combined(
        &self,
        resume_text: &str,
        jd_text: &str,
        embedder: &dyn EmbeddingCapability,
    ) -> Result<ScoreBreakdown> {
        let resume = normalize(resume_text);
        let jd = normalize(jd_text);

        let keyword = keyword_similarity(&resume, &jd, self.max_features)?.clamp(0.0, 1.0);

        let resume_embedding = embedder.encode(&resume)?;
        let jd_embedding = embedder.encode(&jd)?;
        let semantic = cosine_similarity(&resume_embedding, &jd_embedding)?.clamp(0.0, 1.0);

        log::debug!(
            "Combined sub-scores via {}: keyword={:.4} semantic={:.4}",
            embedder.name(),
            keyword,
            semantic
        );

        let score = 100.0 * (self.keyword_weight * keyword + self.semantic_weight * semantic);
        Ok(ScoreBreakdown {
            strategy: ScoringStrategy::Combined,
            keyword_score: keyword,
            semantic_score: Some(semantic),
            score: clamp_score(score),
        })
    }
}

/// Clamp to [0, 100]; NaN becomes 0
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RelevanceError;

    /// Bag-of-letters embedding, deterministic and model free
    struct LetterEmbedder;

    impl EmbeddingCapability for LetterEmbedder {
        fn encode(&self, text: &str) -> Result<Vec<f32>> {
            let mut v = vec![0.0f32; 26];
            for c in text.chars().filter(|c| c.is_ascii_lowercase()) {
                v[(c as u8 - b'a') as usize] += 1.0;
            }
            Ok(v)
        }
    }

    struct FailingEmbedder;

    impl EmbeddingCapability for FailingEmbedder {
        fn encode(&self, _text: &str) -> Result<Vec<f32>> {
            Err(RelevanceError::Embedding("boom".to_string()))
        }
    }

    /// Returns vectors of different length per call
    struct RaggedEmbedder;

    impl EmbeddingCapability for RaggedEmbedder {
        fn encode(&self, text: &str) -> Result<Vec<f32>> {
            Ok(vec![1.0; text.len() % 5 + 1])
        }
    }

    struct OppositeEmbedder;

    impl EmbeddingCapability for OppositeEmbedder {
        fn encode(&self, text: &str) -> Result<Vec<f32>> {
            if text.starts_with('p') {
                Ok(vec![1.0, 0.0])
            } else {
                Ok(vec![-1.0, 0.0])
            }
        }
    }

    #[test]
    fn test_basic_identical_text_scores_100() {
        let scorer = RelevanceScorer::new();
        let text = "Python developer with SQL and AWS";
        assert_eq!(scorer.score(text, text, None), 100.0);
    }

    #[test]
    fn test_basic_empty_jd_scores_0() {
        let scorer = RelevanceScorer::new();
        assert_eq!(scorer.score("Python developer", "", None), 0.0);
        assert_eq!(scorer.score("Python developer", " !!! ", None), 0.0);
        assert_eq!(scorer.score("", "", None), 0.0);
    }

    #[test]
    fn test_basic_is_jd_coverage() {
        let scorer = RelevanceScorer::new();
        let score = scorer.score(
            "Experienced Python developer with SQL skills",
            "Looking for Python, SQL, and AWS expertise",
            None,
        );
        // python and sql out of 7 distinct JD tokens
        assert!((score - 100.0 * 2.0 / 7.0).abs() < 1e-9);

        let reverse = scorer.score(
            "Looking for Python, SQL, and AWS expertise",
            "Experienced Python developer with SQL skills",
            None,
        );
        assert!((reverse - 100.0 * 2.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_basic_breakdown() {
        let breakdown = RelevanceScorer::new()
            .score_breakdown("python", "python sql", None)
            .unwrap();
        assert_eq!(breakdown.strategy, ScoringStrategy::Basic);
        assert_eq!(breakdown.keyword_score, 0.5);
        assert_eq!(breakdown.semantic_score, None);
        assert_eq!(breakdown.score, 50.0);
    }

    #[test]
    fn test_combined_identical_text_scores_100() {
        let scorer = RelevanceScorer::new();
        let text = "Senior Rust engineer building distributed storage";
        let score = scorer.score(text, text, Some(&LetterEmbedder));
        assert!((score - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_combined_weights() {
        let scorer = RelevanceScorer::new();
        let breakdown = scorer
            .score_breakdown("python sql", "docker kubernetes", Some(&LetterEmbedder))
            .unwrap();
        assert_eq!(breakdown.strategy, ScoringStrategy::Combined);
        assert_eq!(breakdown.keyword_score, 0.0);
        let semantic = breakdown.semantic_score.unwrap();
        assert!((breakdown.score - 60.0 * semantic).abs() < 1e-9);
    }

    #[test]
    fn test_combined_negative_semantic_is_clamped() {
        let scorer = RelevanceScorer::new();
        let breakdown = scorer
            .score_breakdown("python", "sql", Some(&OppositeEmbedder))
            .unwrap();
        assert_eq!(breakdown.semantic_score, Some(0.0));
        assert_eq!(breakdown.score, 0.0);
    }

    #[test]
    fn test_combined_failures_score_zero() {
        let scorer = RelevanceScorer::new();
        assert_eq!(scorer.score("python", "python", Some(&FailingEmbedder)), 0.0);
        assert_eq!(scorer.score("python dev", "rust", Some(&RaggedEmbedder)), 0.0);
        // empty corpus fails vectorization
        assert_eq!(scorer.score("", "", Some(&LetterEmbedder)), 0.0);
        assert!(scorer
            .score_breakdown("the", "and", Some(&LetterEmbedder))
            .is_err());
    }

    #[test]
    fn test_scores_stay_in_range() {
        let scorer = RelevanceScorer::new();
        let texts = ["", "python", "Python, SQL & AWS!!", "the and of", "C++ C# Node.js"];
        for resume in texts {
            for jd in texts {
                for embedder in [None, Some(&LetterEmbedder as &dyn EmbeddingCapability)] {
                    let score = scorer.score(resume, jd, embedder);
                    assert!((0.0..=100.0).contains(&score), "{} / {} -> {}", resume, jd, score);
                }
            }
        }
    }

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(f64::NAN), 0.0);
        assert_eq!(clamp_score(100.0000001), 100.0);
        assert_eq!(clamp_score(-0.1), 0.0);
        assert_eq!(clamp_score(42.5), 42.5);
    }
}
