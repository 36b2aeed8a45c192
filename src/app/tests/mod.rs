//! Tests for the marker-replay application layer
