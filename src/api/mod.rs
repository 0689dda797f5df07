pub mod attendance;
pub mod calendar;
pub mod holiday;
pub mod leave;
