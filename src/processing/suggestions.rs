//! Improvement hints from missing skills and score tier

use crate::processing::skills::SkillSet;
use crate::processing::verdict::{Tier, VerdictTable, STANDARD_TABLE};

pub const DEFAULT_MAX_LISTED_SKILLS: usize = 5;

/// Suggestions using the standard thresholds and five listed skills
pub fn suggest(missing_skills: &SkillSet, score: f64) -> Vec<String> {
    suggest_with(missing_skills, score, &STANDARD_TABLE, DEFAULT_MAX_LISTED_SKILLS)
}

/// Never empty: every tier contributes at least one hint.
pub fn suggest_with(
    missing_skills: &SkillSet,
    score: f64,
    table: &VerdictTable,
    max_listed: usize,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    if !missing_skills.is_empty() {
        let listed: Vec<&str> = missing_skills
            .iter()
            .take(max_listed.max(1))
            .map(String::as_str)
            .collect();
        suggestions.push(format!("Consider adding these skills: {}", listed.join(", ")));
    }

    match table.tier(score) {
        Tier::Red => {
            suggestions.push("Add more relevant projects and experience".to_string());
            suggestions.push("Include more technical keywords from the job description".to_string());
        }
        Tier::Orange => {
            suggestions.push("Highlight relevant projects more prominently".to_string());
            suggestions.push("Add certifications related to the role".to_string());
        }
        Tier::Green => {
            suggestions.push("Great match! Consider adding recent projects".to_string());
        }
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::verdict::STRICT_TABLE;

    #[test]
    fn test_high_score_no_missing() {
        let suggestions = suggest(&SkillSet::new(), 85.0);
        assert_eq!(suggestions, vec!["Great match! Consider adding recent projects"]);
    }

    #[test]
    fn test_low_score_with_missing() {
        let missing = SkillSet::from(vec!["AWS", "Docker"]);
        let suggestions = suggest(&missing, 30.0);
        assert_eq!(suggestions.len(), 3);
        assert_eq!(suggestions[0], "Consider adding these skills: AWS, Docker");
        assert_eq!(suggestions[1], "Add more relevant projects and experience");
        assert_eq!(
            suggestions[2],
            "Include more technical keywords from the job description"
        );
    }

    #[test]
    fn test_mid_score() {
        let suggestions = suggest(&SkillSet::new(), 40.0);
        assert_eq!(
            suggestions,
            vec![
                "Highlight relevant projects more prominently",
                "Add certifications related to the role"
            ]
        );
    }

    #[test]
    fn test_only_first_five_missing_listed() {
        let missing = SkillSet::from(vec!["A1", "B2", "C3", "D4", "E5", "F6", "G7"]);
        let suggestions = suggest(&missing, 70.0);
        assert_eq!(suggestions[0], "Consider adding these skills: A1, B2, C3, D4, E5");
        assert_eq!(suggestions.len(), 2);
    }

    #[test]
    fn test_cutoffs_follow_table() {
        let suggestions = suggest_with(&SkillSet::new(), 72.0, &STRICT_TABLE, 5);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0], "Highlight relevant projects more prominently");
    }
}
