//! Cross-cutting, shared constants.
//!
//! The scoring weights and thresholds below define the scale every later stage
//! compares against. Changing one without the others shifts which conditions
//! survive validation.

/// Weight of `matched / identified` in the association score.
pub const COVERAGE_WEIGHT: f64 = 0.4;
/// Weight of `matched / condition factors` in the association score.
pub const SPECIFICITY_WEIGHT: f64 = 0.6;
/// Flat bonus when the body-location hint matches the condition.
pub const LOCATION_BONUS: f64 = 0.2;

/// Multiplier when not every `required` term is present.
pub const REQUIRED_MISSING_FACTOR: f64 = 0.5;
/// Multiplier when every `commonly_together` term is present.
pub const COMMONLY_TOGETHER_BOOST: f64 = 1.2;
/// Multiplier when any `rarely_together` term is present.
pub const RARELY_TOGETHER_FACTOR: f64 = 0.8;
/// Aggregator admits zero-evidence conditions only above this score.
pub const CANDIDATE_MIN_SCORE: f64 = 0.3;

/// Validator drops anything below this.
pub const NOISE_FLOOR: f64 = 0.1;
/// Validator drops unexplained candidates (no matched factors) below this.
pub const UNEXPLAINED_MIN_SCORE: f64 = 0.3;
/// Number of leading reference symptoms treated as critical.
pub const CRITICAL_SYMPTOM_COUNT: usize = 3;
/// Multiplier applied when any critical symptom is missing.
pub const MISSING_CRITICAL_FACTOR: f64 = 0.8;

pub const DEFAULT_HIGH_THRESHOLD: f64 = 0.7;
pub const DEFAULT_MEDIUM_THRESHOLD: f64 = 0.4;

/// Upper bound on `NextStep::suggestions`.
pub const MAX_SUGGESTIONS: usize = 5;

pub const DEFAULT_CACHE_TTL_SECS: u64 = 60 * 60;
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 2_000;
pub const DEFAULT_RESULT_CACHE_CAPACITY: u64 = 10_000;

/// Store reads are attempted this many times before falling back.
pub const STORE_READ_ATTEMPTS: usize = 2;

/// Largest factor list accepted over HTTP.
pub const MAX_REQUEST_FACTORS: usize = 256;
