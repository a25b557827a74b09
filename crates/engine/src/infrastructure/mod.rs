//! Infrastructure implementations.
//!
//! Contains port trait implementations for the filesystem and the clock.

pub mod clock;
pub mod error;
pub mod persistence;
pub mod portrait;
pub mod ports;
pub mod settings;
