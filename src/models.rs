// Shared data model for the hook audit pipeline and its JSON artifact
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// One hook file as seen by the extractor. Keys in the inventory are
/// `domain/name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookRecord {
    pub path: String,
    pub domain: String,
    pub name: String,
    pub file_size: usize,
    pub line_count: usize,
    pub imports: Vec<String>,
    pub exports: Vec<String>,
    pub uses_generic: bool,
    pub deprecated: bool,
    pub is_wrapper: bool,
    pub complexity_score: u32,
}

/// Serialized output of `audit-hooks`, consumed by `candidates`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AuditData {
    pub hooks_inventory: BTreeMap<String, HookRecord>,
    pub dependencies: BTreeMap<String, Vec<String>>,
    pub usage_stats: BTreeMap<String, u32>,
    pub generic_adoption: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Error)]
pub enum AuditDataError {
    #[error("audit data not found at {0} (run `tcmaint audit-hooks` first)")]
    Missing(PathBuf),
    #[error("audit data at {0} is not valid JSON: {1}")]
    Malformed(PathBuf, serde_json::Error),
}

/// Migration priority, derived from a numeric score by fixed thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    VeryLow,
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            Self::High
        } else if score >= 50 {
            Self::Medium
        } else if score >= 30 {
            Self::Low
        } else {
            Self::VeryLow
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::VeryLow => "VERY LOW",
        }
    }
}

/// Effort band for a day-count estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffortBand {
    Easy,
    Moderate,
    Complex,
    VeryComplex,
}

impl EffortBand {
    pub fn from_days(days: f64) -> Self {
        if days <= 2.0 {
            Self::Easy
        } else if days <= 5.0 {
            Self::Moderate
        } else if days <= 10.0 {
            Self::Complex
        } else {
            Self::VeryComplex
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Moderate => "MODERATE",
            Self::Complex => "COMPLEX",
            Self::VeryComplex => "VERY COMPLEX",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_thresholds() {
        assert_eq!(Priority::from_score(0), Priority::VeryLow);
        assert_eq!(Priority::from_score(29), Priority::VeryLow);
        assert_eq!(Priority::from_score(30), Priority::Low);
        assert_eq!(Priority::from_score(49), Priority::Low);
        assert_eq!(Priority::from_score(50), Priority::Medium);
        assert_eq!(Priority::from_score(79), Priority::Medium);
        assert_eq!(Priority::from_score(80), Priority::High);
        assert_eq!(Priority::from_score(145), Priority::High);
    }

    #[test]
    fn test_priority_is_deterministic() {
        for score in 0..200 {
            assert_eq!(Priority::from_score(score), Priority::from_score(score));
        }
    }

    #[test]
    fn test_effort_bands() {
        assert_eq!(EffortBand::from_days(0.5), EffortBand::Easy);
        assert_eq!(EffortBand::from_days(2.0), EffortBand::Easy);
        assert_eq!(EffortBand::from_days(3.5), EffortBand::Moderate);
        assert_eq!(EffortBand::from_days(5.0), EffortBand::Moderate);
        assert_eq!(EffortBand::from_days(9.9), EffortBand::Complex);
        assert_eq!(EffortBand::from_days(10.1), EffortBand::VeryComplex);
    }

    #[test]
    fn test_audit_data_round_trip() {
        let mut data = AuditData::default();
        data.hooks_inventory.insert(
            "concerts/useConcertsList".to_string(),
            HookRecord {
                path: "concerts/useConcertsList.js".to_string(),
                domain: "concerts".to_string(),
                name: "useConcertsList".to_string(),
                file_size: 4200,
                line_count: 209,
                imports: vec!["common/useGenericEntityList".to_string()],
                exports: vec!["useConcertsList".to_string()],
                uses_generic: false,
                deprecated: false,
                is_wrapper: false,
                complexity_score: 47,
            },
        );

        let json = serde_json::to_string(&data).unwrap();
        let back: AuditData = serde_json::from_str(&json).unwrap();
        assert_eq!(back.hooks_inventory.len(), 1);
        assert_eq!(
            back.hooks_inventory["concerts/useConcertsList"].complexity_score,
            47
        );
    }
}
