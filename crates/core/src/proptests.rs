//! Property-based tests for slide grouping.
