//! TF-IDF vectorization over a small in-memory corpus

use crate::error::{Result, RelevanceError};
use crate::processing::normalizer::tokenize_terms;
use std::collections::{BTreeMap, HashMap};

pub struct TfidfVectorizer {
    max_features: usize,
}

/// Fitted vocabulary plus one L2-normalized row per document
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    pub vocabulary: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl TfidfVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self { max_features }
    }

    /// Fit the vocabulary and IDF weights on `documents` and return their vectors
    pub fn fit_transform(&self, documents: &[&str]) -> Result<TfidfMatrix> {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize_terms(d)).collect();

        let mut corpus_counts: BTreeMap<&str, usize> = BTreeMap::new();
        for terms in &tokenized {
            for term in terms {
                *corpus_counts.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        if corpus_counts.is_empty() {
            return Err(RelevanceError::Vectorization(
                "empty vocabulary; documents contain only stop words or no terms".to_string(),
            ));
        }

        // BTreeMap iteration is alphabetical, and the stable sort keeps that
        // order among terms with equal frequency.
        let mut ranked: Vec<(&str, usize)> = corpus_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(self.max_features);

        let mut vocabulary: Vec<String> = ranked.into_iter().map(|(t, _)| t.to_string()).collect();
        vocabulary.sort();
        let index: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, t)| (t.as_str(), i))
            .collect();

        let counts: Vec<Vec<f64>> = tokenized
            .iter()
            .map(|terms| {
                let mut row = vec![0.0; vocabulary.len()];
                for term in terms {
                    if let Some(&i) = index.get(term.as_str()) {
                        row[i] += 1.0;
                    }
                }
                row
            })
            .collect();

        let n = documents.len() as f64;
        let idf: Vec<f64> = (0..vocabulary.len())
            .map(|i| {
                let df = counts.iter().filter(|row| row[i] > 0.0).count() as f64;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let rows = counts
            .into_iter()
            .map(|row| {
                let weighted: Vec<f64> = row.iter().zip(&idf).map(|(tf, w)| tf * w).collect();
                l2_normalize(weighted)
            })
            .collect();

        log::debug!("TF-IDF vocabulary size: {}", vocabulary.len());
        Ok(TfidfMatrix { vocabulary, rows })
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new(crate::processing::scorer::DEFAULT_MAX_FEATURES)
    }
}

fn l2_normalize(mut row: Vec<f64>) -> Vec<f64> {
    let norm = row.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        row.iter_mut().for_each(|x| *x /= norm);
    }
    row
}

/// Cosine similarity of two equal-length vectors; 0 when either is all zeros
pub fn cosine(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(RelevanceError::Vectorization(format!(
            "Vector dimensions don't match: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        Ok(0.0)
    } else {
        Ok(dot / (norm_a * norm_b))
    }
}

/// Keyword similarity of two texts via TF-IDF fitted on just the pair
pub fn keyword_similarity(first: &str, second: &str, max_features: usize) -> Result<f64> {
    let matrix = TfidfVectorizer::new(max_features).fit_transform(&[first, second])?;
    cosine(&matrix.rows[0], &matrix.rows[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_documents() {
        let text = "python developer with sql experience";
        let similarity = keyword_similarity(text, text, 100).unwrap();
        assert!((similarity - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_documents() {
        let similarity = keyword_similarity("python sql", "kubernetes docker", 100).unwrap();
        assert_eq!(similarity, 0.0);
    }

    #[test]
    fn test_partial_overlap_is_between_zero_and_one() {
        let similarity = keyword_similarity(
            "experienced python developer with sql skills",
            "looking for python sql and aws expertise",
            100,
        )
        .unwrap();
        assert!(similarity > 0.0 && similarity < 1.0);
    }

    #[test]
    fn test_empty_vocabulary_is_an_error() {
        assert!(keyword_similarity("", "", 100).is_err());
        assert!(keyword_similarity("the and of", "a an", 100).is_err());
    }

    #[test]
    fn test_max_features_keeps_most_frequent_terms() {
        let vectorizer = TfidfVectorizer::new(2);
        let matrix = vectorizer
            .fit_transform(&["rust rust rust java java zig", "rust java"])
            .unwrap();
        assert_eq!(matrix.vocabulary, vec!["java".to_string(), "rust".to_string()]);
    }

    #[test]
    fn test_common_english_words_carry_no_weight() {
        let similarity =
            keyword_similarity("computer system", "computer system design", 100).unwrap();
        assert_eq!(similarity, 0.0);
        assert!(keyword_similarity("computer system", "find two", 100).is_err());
    }

    #[test]
    fn test_frequency_ties_break_alphabetically() {
        let vectorizer = TfidfVectorizer::new(1);
        let matrix = vectorizer.fit_transform(&["zeta alpha", "beta"]).unwrap();
        assert_eq!(matrix.vocabulary, vec!["alpha".to_string()]);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let matrix = TfidfVectorizer::default()
            .fit_transform(&["python sql sql", "aws python"])
            .unwrap();
        for row in &matrix.rows {
            let norm = row.iter().map(|x| x * x).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_cosine_dimension_mismatch() {
        assert!(cosine(&[1.0, 0.0], &[1.0]).is_err());
        assert_eq!(cosine(&[0.0, 0.0], &[1.0, 1.0]).unwrap(), 0.0);
    }
}
