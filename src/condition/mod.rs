//! Reference condition model and the built-in fallback set.

pub mod defaults;
pub mod error;
pub mod types;


pub use defaults::default_conditions;
pub use error::ConditionError;
pub use types::{ConditionRecord, MedicalCondition, SymptomRelationships, Urgency};
