//! Port traits for infrastructure boundaries.
//!
//! Ports exist for:
//! - Clock (for testing)
//! - Portrait loading (see `portrait::PortraitLoader`)

use chrono::{DateTime, Utc};

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
