//! Reads and writes against the MySQL store.
//!
//! Dates are handed out as `YYYY-MM-DD` strings so the calendar can match
//! them verbatim.

pub mod attendance;
pub mod holiday;
pub mod leave;
