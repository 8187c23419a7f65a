//! Document structures shared by the scoring core

use crate::processing::normalizer::normalize;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    Resume,
    JobDescription,
}

/// Raw text plus its normalized form. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    content: String,
    normalized: String,
    source: String,
    document_type: DocumentType,
}

impl Document {
    pub fn new(content: impl Into<String>, source: impl Into<String>, document_type: DocumentType) -> Self {
        let content = content.into();
        let normalized = normalize(&content);
        Self {
            content,
            normalized,
            source: source.into(),
            document_type,
        }
    }

    pub fn resume(content: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(content, source, DocumentType::Resume)
    }

    pub fn job_description(content: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(content, source, DocumentType::JobDescription)
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// File name or label identifying where the text came from
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    pub fn word_count(&self) -> usize {
        self.normalized.split_whitespace().count()
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let doc = Document::resume("Senior  Rust Engineer!\nC++, Python", "resume.txt");

        assert_eq!(doc.content(), "Senior  Rust Engineer!\nC++, Python");
        assert_eq!(doc.normalized(), "senior rust engineer c python");
        assert_eq!(doc.source(), "resume.txt");
        assert_eq!(doc.document_type(), DocumentType::Resume);
        assert_eq!(doc.word_count(), 5);
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::job_description("  --- ", "Custom JD");
        assert!(doc.is_empty());
        assert_eq!(doc.word_count(), 0);
    }
}
