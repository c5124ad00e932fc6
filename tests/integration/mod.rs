//! Integration tests for output change detection

mod concurrency;
mod early_termination;
mod output_changes;
