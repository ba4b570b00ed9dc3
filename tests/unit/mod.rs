//! Unit Tests Module
//!
//! Component-level tests against the public library API.

pub mod ingestion;
