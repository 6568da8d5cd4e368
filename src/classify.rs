// Keyword buckets for hook names
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic bucket assigned by substring match on a lowercased file name.
/// A name can sit in several buckets at once, or in none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternBucket {
    Search,
    List,
    Form,
    Details,
    Status,
    Actions,
    Validation,
    Filters,
    Data,
    Submission,
    Associations,
}

impl PatternBucket {
    pub const ALL: [PatternBucket; 11] = [
        Self::Search,
        Self::List,
        Self::Form,
        Self::Details,
        Self::Status,
        Self::Actions,
        Self::Validation,
        Self::Filters,
        Self::Data,
        Self::Submission,
        Self::Associations,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::List => "list",
            Self::Form => "form",
            Self::Details => "details",
            Self::Status => "status",
            Self::Actions => "action",
            Self::Validation => "validation",
            Self::Filters => "filter",
            Self::Data => "data",
            Self::Submission => "submission",
            Self::Associations => "association",
        }
    }

    /// Buckets that already have a generic counterpart; candidates here get
    /// a scoring bonus because the landing target exists.
    pub fn preferred(&self) -> bool {
        matches!(self, Self::Form | Self::Details | Self::Search | Self::List)
    }

    /// Name of the generic hook a bucket migrates toward.
    pub fn generic_target(&self) -> &'static str {
        match self {
            Self::Search => "useGenericEntitySearch",
            Self::List | Self::Filters => "useGenericEntityList",
            Self::Form | Self::Validation | Self::Submission => "useGenericEntityForm",
            Self::Details => "useGenericEntityDetails",
            Self::Status => "useGenericEntityStatus",
            Self::Actions => "useGenericEntityActions",
            Self::Data => "useGenericDataFetcher",
            Self::Associations => "useGenericRelations",
        }
    }
}

impl fmt::Display for PatternBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// All buckets whose keyword occurs in the lowercased name.
pub fn classify(name: &str) -> Vec<PatternBucket> {
    let lower = name.to_lowercase();
    PatternBucket::ALL
        .iter()
        .filter(|bucket| lower.contains(bucket.keyword()))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_bucket() {
        assert_eq!(classify("useConcertDetails"), vec![PatternBucket::Details]);
        assert_eq!(classify("useContactSearch"), vec![PatternBucket::Search]);
    }

    #[test]
    fn test_multiple_buckets_are_all_kept() {
        let buckets = classify("useConcertListFilters");
        assert!(buckets.contains(&PatternBucket::List));
        assert!(buckets.contains(&PatternBucket::Filters));
        assert_eq!(buckets.len(), 2);
    }

    #[test]
    fn test_no_match_yields_empty() {
        assert!(classify("useAuth").is_empty());
        assert!(classify("useCache").is_empty());
    }

    #[test]
    fn test_match_is_case_insensitive() {
        assert_eq!(classify("useFormSubmission"), classify("useformsubmission"));
        let buckets = classify("useFormSubmission");
        assert!(buckets.contains(&PatternBucket::Form));
        assert!(buckets.contains(&PatternBucket::Submission));
    }

    #[test]
    fn test_preferred_buckets() {
        assert!(PatternBucket::Form.preferred());
        assert!(PatternBucket::List.preferred());
        assert!(!PatternBucket::Status.preferred());
        assert!(!PatternBucket::Associations.preferred());
    }
}
