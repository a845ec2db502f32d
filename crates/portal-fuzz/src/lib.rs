//! Fuzzing library for scholar-portal.
//!
//! This crate provides fuzzing targets for the pure pagination helpers and
//! for decoding OpenAlex-shaped payloads.
//!
//! # Usage
//!
//! ```bash
//! cd crates/portal-fuzz
//! cargo +nightly fuzz run fuzz_page_window -- -max_total_time=60
//! ```

pub use scholar_portal::{models, pagination};
