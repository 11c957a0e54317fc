use serde::{Deserialize, Serialize};

use crate::constants::MAX_SUGGESTIONS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NextStepKind {
    /// Seek professional care. At most one per response.
    Consult,
    /// Self-care or informational guidance.
    General,
}

/// One recommended user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextStep {
    #[serde(rename = "type")]
    pub kind: NextStepKind,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

impl NextStep {
    pub fn consult(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NextStepKind::Consult,
            title: title.into(),
            description: description.into(),
            suggestions: None,
        }
    }

    pub fn general(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NextStepKind::General,
            title: title.into(),
            description: description.into(),
            suggestions: None,
        }
    }

    /// Attaches suggestions, keeping at most the first five.
    pub fn with_suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions = Some(
            suggestions
                .into_iter()
                .take(MAX_SUGGESTIONS)
                .map(Into::into)
                .collect(),
        );
        self
    }
}

/// Coarse grouping used to pick condition-specific self-care advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CareCategory {
    Dermatological,
    Respiratory,
    Gastrointestinal,
    Musculoskeletal,
    General,
}

impl CareCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CareCategory::Dermatological => "dermatological",
            CareCategory::Respiratory => "respiratory",
            CareCategory::Gastrointestinal => "gastrointestinal",
            CareCategory::Musculoskeletal => "musculoskeletal",
            CareCategory::General => "general",
        }
    }
}
