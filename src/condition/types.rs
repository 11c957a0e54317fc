use serde::{Deserialize, Serialize};

use super::error::ConditionError;

/// How soon a condition typically needs professional attention.
///
/// Compound levels sit between their neighbours, so the derived `Ord` can be
/// used directly for "most urgent" comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Urgency {
    #[default]
    Low,
    LowMedium,
    Medium,
    MediumHigh,
    High,
}

impl Urgency {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::LowMedium => "low-medium",
            Urgency::Medium => "medium",
            Urgency::MediumHigh => "medium-high",
            Urgency::High => "high",
        }
    }
}

impl std::str::FromStr for Urgency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '_' || c == ' ' || c == '/' { '-' } else { c })
            .collect();
        match token.as_str() {
            "low" => Ok(Self::Low),
            "low-medium" | "medium-low" => Ok(Self::LowMedium),
            "medium" | "moderate" => Ok(Self::Medium),
            "medium-high" | "high-medium" => Ok(Self::MediumHigh),
            "high" => Ok(Self::High),
            _ => Err(format!("Unknown urgency: {}", s)),
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Co-occurrence hints that nudge a condition's score up or down.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomRelationships {
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default, alias = "commonlyTogether")]
    pub commonly_together: Vec<String>,
    #[serde(default, alias = "rarelyTogether")]
    pub rarely_together: Vec<String>,
}

impl SymptomRelationships {
    pub fn is_empty(&self) -> bool {
        self.required.is_empty() && self.commonly_together.is_empty() && self.rarely_together.is_empty()
    }
}

/// Reference record for one condition. Immutable once loaded into a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalCondition {
    pub name: String,
    pub description: String,
    /// Canonical symptom terms, lowercase, in reference order.
    pub symptoms: Vec<String>,
    pub visual_cues: Vec<String>,
    pub urgency: Urgency,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptom_relationships: Option<SymptomRelationships>,
    #[serde(default)]
    pub body_locations: Vec<String>,
}

impl MedicalCondition {
    /// Case-insensitive identity used by the repository index and merges.
    #[inline]
    pub fn key(&self) -> String {
        self.name.trim().to_lowercase()
    }

    /// `symptoms ∪ visual_cues`, lowercased, first occurrence wins.
    pub fn all_factors(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(self.symptoms.len() + self.visual_cues.len());
        for term in self.symptoms.iter().chain(self.visual_cues.iter()) {
            let term = term.trim().to_lowercase();
            if !term.is_empty() && !out.contains(&term) {
                out.push(term);
            }
        }
        out
    }

    pub fn relationships(&self) -> Option<&SymptomRelationships> {
        self.symptom_relationships.as_ref()
    }

    /// Checks the fields scoring depends on.
    pub fn validate(&self) -> Result<(), ConditionError> {
        if self.name.trim().is_empty() {
            return Err(ConditionError::MissingField {
                name: String::new(),
                field: "name",
            });
        }
        let has_factor = self
            .symptoms
            .iter()
            .chain(self.visual_cues.iter())
            .any(|t| !t.trim().is_empty());
        if !has_factor {
            return Err(ConditionError::MissingField {
                name: self.name.clone(),
                field: "symptoms",
            });
        }
        Ok(())
    }
}

/// Loosely-typed condition as delivered by a store.
///
/// Every field is optional so one bad record never fails deserialization of
/// the whole batch; [`MedicalCondition::try_from`] decides what is usable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub symptoms: Option<Vec<String>>,
    #[serde(default, alias = "visualCues")]
    pub visual_cues: Option<Vec<String>>,
    #[serde(default)]
    pub urgency: Option<String>,
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(default, alias = "symptomRelationships")]
    pub symptom_relationships: Option<SymptomRelationships>,
    #[serde(default, alias = "bodyLocations")]
    pub body_locations: Option<Vec<String>>,
}

fn normalize_terms(terms: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(terms.len());
    for term in terms {
        let term = term.trim().to_lowercase();
        if !term.is_empty() && !out.contains(&term) {
            out.push(term);
        }
    }
    out
}

impl TryFrom<ConditionRecord> for MedicalCondition {
    type Error = ConditionError;

    fn try_from(record: ConditionRecord) -> Result<Self, Self::Error> {
        let name = record
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or(ConditionError::MissingField {
                name: String::new(),
                field: "name",
            })?;

        let urgency = match record.urgency {
            Some(raw) => raw.parse().map_err(|_| ConditionError::InvalidUrgency {
                name: name.clone(),
                value: raw,
            })?,
            None => Urgency::default(),
        };

        let relationships = record.symptom_relationships.map(|r| SymptomRelationships {
            required: normalize_terms(r.required),
            commonly_together: normalize_terms(r.commonly_together),
            rarely_together: normalize_terms(r.rarely_together),
        });

        let condition = MedicalCondition {
            name,
            description: record.description.unwrap_or_default(),
            symptoms: normalize_terms(record.symptoms.unwrap_or_default()),
            visual_cues: normalize_terms(record.visual_cues.unwrap_or_default()),
            urgency,
            recommendation: record.recommendation.unwrap_or_default(),
            symptom_relationships: relationships.filter(|r| !r.is_empty()),
            body_locations: normalize_terms(record.body_locations.unwrap_or_default()),
        };
        condition.validate()?;
        Ok(condition)
    }
}

impl From<&MedicalCondition> for ConditionRecord {
    fn from(condition: &MedicalCondition) -> Self {
        Self {
            name: Some(condition.name.clone()),
            description: Some(condition.description.clone()),
            symptoms: Some(condition.symptoms.clone()),
            visual_cues: Some(condition.visual_cues.clone()),
            urgency: Some(condition.urgency.as_str().to_string()),
            recommendation: Some(condition.recommendation.clone()),
            symptom_relationships: condition.symptom_relationships.clone(),
            body_locations: Some(condition.body_locations.clone()),
        }
    }
}
