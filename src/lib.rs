//! Rank university courses for A/L students.
//!
//! A student's stream, subject grades, and interest quiz ratings are scored
//! against a read-only course catalog. Every eligible course gets an academic
//! score, an interest score, a weighted overall score, and a recommendation
//! tier; the result is sorted best first.

pub mod catalog;
pub mod config;
pub mod output;
pub mod profile;
pub mod scoring;
pub mod telemetry;
