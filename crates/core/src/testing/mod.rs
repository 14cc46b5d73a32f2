//! Test doubles and fixtures for the search pipeline.
//!
//! Available to downstream crates' tests as well as this crate's own.

pub mod fixtures;
mod mock_source;

pub use mock_source::MockSource;
