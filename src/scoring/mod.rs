//! Association scoring between one condition and a set of identified factors.
//!
//! The score is `0.4 × coverage + 0.6 × specificity`, where
//!
//! - coverage = matched factors / identified factors
//! - specificity = matched factors / (condition symptoms ∪ visual cues)
//!
//! plus a flat bonus when the body-location hint matches, clamped to `[0, 1]`.
//! Specificity is weighted higher so a condition whose reference profile is
//! largely covered outranks one with a long list of generic symptoms.
//!
//! Matching is symmetric substring matching ([`terms_match`]), so phrase
//! variants such as "severe headache" still hit "headache". Body locations match
//! on whole words instead ([`locations_match`]), so "ear" never hits "heart".

pub mod scorer;
pub mod types;


pub use scorer::{AssociationScorer, factor_present, location_words, locations_match, terms_match};
pub use types::{Association, IdentifiedFactors, ScorerConfig};
