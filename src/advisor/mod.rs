//! Next-step guidance derived from ranked conditions.
//!
//! Rules are fixed tables: an urgent-condition list, a body-location to
//! specialist map, and per-category self-care advice.

#[allow(clippy::module_inception)]
pub mod advisor;
pub mod rules;
pub mod types;

#[cfg(test)]
mod tests;

pub use advisor::RecommendationAdvisor;
pub use rules::{categorize, is_urgent_condition, specialist_for};
pub use types::{CareCategory, NextStep, NextStepKind};
