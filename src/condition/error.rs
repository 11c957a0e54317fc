use thiserror::Error;

/// Reasons a condition record is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConditionError {
    /// A field the pipeline cannot score without is absent or blank.
    #[error("malformed condition '{name}': missing {field}")]
    MissingField { name: String, field: &'static str },

    /// The urgency token is not one of the known levels.
    #[error("malformed condition '{name}': unknown urgency '{value}'")]
    InvalidUrgency { name: String, value: String },
}

impl ConditionError {
    /// Name of the offending record (may be empty when the name itself is missing).
    pub fn condition_name(&self) -> &str {
        match self {
            ConditionError::MissingField { name, .. } | ConditionError::InvalidUrgency { name, .. } => {
                name
            }
        }
    }
}
