//! Ordered merge-diff over key-sorted mappings

pub mod sorted_map;

pub use sorted_map::{diff, PropertyDiffListener};
