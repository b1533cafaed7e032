//! Fuzzing library for scholar-analytics.
//!
//! This crate provides fuzzing targets for record validation, filter
//! criteria parsing and the full analysis pass.
//!
//! # Usage
//!
//! ```bash
//! cd crates/sentinel-fuzz
//! cargo +nightly fuzz run fuzz_paper_parse -- -max_total_time=60
//! ```

pub use scholar_analytics::models;
