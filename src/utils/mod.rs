//! Shared numeric, unit and formatting helpers

pub mod currency;
pub mod math;
pub mod time;
