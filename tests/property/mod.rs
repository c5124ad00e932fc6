//! Property-based tests for change detection
