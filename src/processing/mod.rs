//! The scoring core: normalization, skills, similarity, verdicts

pub mod analyzer;
pub mod document;
pub mod embeddings;
pub mod normalizer;
pub mod scorer;
pub mod skills;
pub mod suggestions;
pub mod tfidf;
pub mod verdict;
