//! Tests for the mapping provider boundary

mod types;
