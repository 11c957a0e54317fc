pub const AILMENT_STATUS_HEADER: &str = "X-Ailment-Status";
pub const AILMENT_STATUS_HEALTHY: &str = "healthy";
pub const AILMENT_STATUS_READY: &str = "ready";
pub const AILMENT_STATUS_NOT_READY: &str = "not_ready";
pub const AILMENT_STATUS_RELOADED: &str = "reloaded";
pub const AILMENT_STATUS_ERROR: &str = "error";

/// Whether a scoring request was served from the result cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreStatus {
    Hit,
    Miss,
}

impl ScoreStatus {
    #[inline]
    pub fn as_header_value(&self) -> &'static str {
        match self {
            ScoreStatus::Hit => "HIT",
            ScoreStatus::Miss => "MISS",
        }
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        matches!(self, ScoreStatus::Hit)
    }
}

impl std::fmt::Display for ScoreStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_header_value())
    }
}
