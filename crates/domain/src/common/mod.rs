//! Small pure helpers shared by the domain types.
//!
//! No side effects, no I/O.

pub mod datetime;
pub mod string;

pub use datetime::{format_datetime, parse_datetime};
pub use string::{push_unique, some_if_not_empty};
