//! Skill vocabulary, extraction and resume/JD matching

use crate::error::{Result, RelevanceError};
use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DEFAULT_SKILLS: &[&str] = &[
    "Python",
    "Java",
    "JavaScript",
    "React",
    "Angular",
    "Node.js",
    "SQL",
    "MySQL",
    "PostgreSQL",
    "MongoDB",
    "AWS",
    "Azure",
    "Machine Learning",
    "Data Science",
    "AI",
    "Deep Learning",
    "Docker",
    "Kubernetes",
    "Git",
    "Linux",
    "HTML",
    "CSS",
    "C++",
    "C#",
    "Django",
    "Flask",
    "TensorFlow",
    "PyTorch",
    "Pandas",
    "NumPy",
    "Scikit-learn",
    "REST API",
    "GraphQL",
];

/// Ordered, case-insensitively unique skill names with a prebuilt matcher
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    entries: Vec<String>,
    matcher: Option<AhoCorasick>,
}

impl SkillVocabulary {
    /// Build from raw entries. Entries are trimmed, blanks dropped and later
    /// case-insensitive duplicates discarded so the first spelling wins.
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        for entry in entries {
            let entry = entry.as_ref().trim();
            if entry.is_empty() {
                continue;
            }
            if seen.insert(entry.to_lowercase()) {
                kept.push(entry.to_string());
            }
        }

        let matcher = if kept.is_empty() {
            None
        } else {
            let patterns: Vec<String> = kept.iter().map(|s| s.to_lowercase()).collect();
            let matcher = AhoCorasick::builder()
                .match_kind(MatchKind::Standard)
                .build(&patterns)
                .map_err(|e| {
                    RelevanceError::TextProcessing(format!("Failed to build skill matcher: {}", e))
                })?;
            Some(matcher)
        };

        Ok(Self {
            entries: kept,
            matcher,
        })
    }

    /// The built-in technology vocabulary
    pub fn standard() -> Result<Self> {
        Self::new(DEFAULT_SKILLS.iter().copied())
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Skills detected in one text, in the order of their source sequence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(Vec<String>);

impl SkillSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.0.iter().any(|s| s == skill)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.clone()
    }

    pub fn join(&self, separator: &str) -> String {
        self.0.join(separator)
    }
}

impl From<Vec<String>> for SkillSet {
    fn from(skills: Vec<String>) -> Self {
        Self(skills)
    }
}

impl From<Vec<&str>> for SkillSet {
    fn from(skills: Vec<&str>) -> Self {
        Self(skills.into_iter().map(str::to_string).collect())
    }
}

impl<'a> IntoIterator for &'a SkillSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Resume skills also required by the JD, in resume order
    pub matched: SkillSet,
    /// JD skills absent from the resume, in JD order
    pub missing: SkillSet,
}

impl MatchResult {
    /// Percentage of JD skills covered by the resume; 0 when the JD lists none
    pub fn coverage(&self) -> f64 {
        let required = self.matched.len() + self.missing.len();
        if required == 0 {
            0.0
        } else {
            100.0 * self.matched.len() as f64 / required as f64
        }
    }
}

/// Case-insensitive substring test of every vocabulary entry against the raw
/// text. The result follows vocabulary order, not text order.
pub fn extract_skills(text: &str, vocabulary: &SkillVocabulary) -> SkillSet {
    let matcher = match &vocabulary.matcher {
        Some(matcher) if !text.is_empty() => matcher,
        _ => return SkillSet::new(),
    };

    let lowered = text.to_lowercase();
    let mut hits = vec![false; vocabulary.entries.len()];
    for mat in matcher.find_overlapping_iter(&lowered) {
        hits[mat.pattern().as_usize()] = true;
    }

    vocabulary
        .entries
        .iter()
        .zip(hits)
        .filter_map(|(skill, hit)| hit.then(|| skill.clone()))
        .collect::<Vec<_>>()
        .into()
}

pub fn match_skills(resume_skills: &SkillSet, jd_skills: &SkillSet) -> MatchResult {
    let matched: Vec<String> = resume_skills
        .iter()
        .filter(|skill| jd_skills.contains(skill))
        .cloned()
        .collect();
    let missing: Vec<String> = jd_skills
        .iter()
        .filter(|skill| !resume_skills.contains(skill))
        .cloned()
        .collect();

    MatchResult {
        matched: matched.into(),
        missing: missing.into(),
    }
}
