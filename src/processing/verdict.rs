//! Score to suitability verdict classification

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Green,
    Orange,
    Red,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Green => "green",
            Tier::Orange => "orange",
            Tier::Red => "red",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictPreset {
    /// 70 / 40, High / Medium / Low Suitability
    Standard,
    /// 75 / 50, Strong / Moderate / Weak Match
    Strict,
}

impl VerdictPreset {
    pub fn table(&self) -> &'static VerdictTable {
        match self {
            VerdictPreset::Standard => &STANDARD_TABLE,
            VerdictPreset::Strict => &STRICT_TABLE,
        }
    }
}

/// Thresholds are inclusive lower bounds: a score equal to `high` is green.
#[derive(Debug, Clone, PartialEq)]
pub struct VerdictTable {
    pub high: f64,
    pub medium: f64,
    pub high_label: &'static str,
    pub medium_label: &'static str,
    pub low_label: &'static str,
}

pub const STANDARD_TABLE: VerdictTable = VerdictTable {
    high: 70.0,
    medium: 40.0,
    high_label: "High Suitability",
    medium_label: "Medium Suitability",
    low_label: "Low Suitability",
};

pub const STRICT_TABLE: VerdictTable = VerdictTable {
    high: 75.0,
    medium: 50.0,
    high_label: "Strong Match",
    medium_label: "Moderate Match",
    low_label: "Weak Match",
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub label: String,
    pub tier: Tier,
}

impl VerdictTable {
    pub fn tier(&self, score: f64) -> Tier {
        if score >= self.high {
            Tier::Green
        } else if score >= self.medium {
            Tier::Orange
        } else {
            Tier::Red
        }
    }

    pub fn classify(&self, score: f64) -> Classification {
        let tier = self.tier(score);
        let label = match tier {
            Tier::Green => self.high_label,
            Tier::Orange => self.medium_label,
            Tier::Red => self.low_label,
        };
        Classification {
            label: label.to_string(),
            tier,
        }
    }
}

/// Classify with the standard 70 / 40 table
pub fn classify(score: f64) -> Classification {
    STANDARD_TABLE.classify(score)
}
