use serde::{Deserialize, Serialize};

/// Normalized identified factors: trimmed, lowercase, unique, first occurrence kept.
///
/// Matching treats this as a set; the retained order only makes notes and
/// `matching_factors` output deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct IdentifiedFactors {
    terms: Vec<String>,
}

impl IdentifiedFactors {
    pub fn new<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut terms: Vec<String> = Vec::new();
        for term in raw {
            let term = term.as_ref().trim().to_lowercase();
            if !term.is_empty() && !terms.contains(&term) {
                terms.push(term);
            }
        }
        Self { terms }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[String] {
        &self.terms
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    /// Sorted copy, used where input order must not influence a key.
    pub fn sorted(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.iter().collect();
        out.sort_unstable();
        out
    }
}

impl From<Vec<String>> for IdentifiedFactors {
    fn from(raw: Vec<String>) -> Self {
        Self::new(raw)
    }
}

impl From<IdentifiedFactors> for Vec<String> {
    fn from(factors: IdentifiedFactors) -> Self {
        factors.terms
    }
}

/// Scorer weights. The defaults define the scale the validator thresholds expect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScorerConfig {
    pub coverage_weight: f64,
    pub specificity_weight: f64,
    pub location_bonus: f64,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            coverage_weight: crate::constants::COVERAGE_WEIGHT,
            specificity_weight: crate::constants::SPECIFICITY_WEIGHT,
            location_bonus: crate::constants::LOCATION_BONUS,
        }
    }
}

/// Outcome of scoring one condition against one factor set.
#[derive(Debug, Clone, PartialEq)]
pub struct Association {
    /// Clamped to `[0, 1]`.
    pub score: f64,
    pub coverage: f64,
    pub specificity: f64,
    pub location_matched: bool,
    /// Identified factors that matched, in input order.
    pub matching_factors: Vec<String>,
}

impl Association {
    pub fn none() -> Self {
        Self {
            score: 0.0,
            coverage: 0.0,
            specificity: 0.0,
            location_matched: false,
            matching_factors: Vec::new(),
        }
    }

    #[inline]
    pub fn has_evidence(&self) -> bool {
        !self.matching_factors.is_empty()
    }
}
