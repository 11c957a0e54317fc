//! Result memo cache and response status values.

pub mod result;
pub mod types;


pub use result::ResultCache;
pub use types::{
    AILMENT_STATUS_ERROR, AILMENT_STATUS_HEADER, AILMENT_STATUS_HEALTHY, AILMENT_STATUS_NOT_READY,
    AILMENT_STATUS_READY, AILMENT_STATUS_RELOADED, ScoreStatus,
};
