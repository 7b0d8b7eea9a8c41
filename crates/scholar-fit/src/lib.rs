//! Deterministic fit scoring and recommendation for matching students to scholarships.

pub mod config;
pub mod error;
pub mod import;
pub mod matching;
pub mod telemetry;
