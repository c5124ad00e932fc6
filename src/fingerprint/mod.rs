//! Fingerprints
//!
//! A fingerprint flattens a snapshot tree into an ordered list of
//! normalized entries so that two trees can be compared independently of
//! where they live on disk.

pub mod compare;
pub mod strategy;

pub use compare::NormalizedPathCompareStrategy;
pub use strategy::FingerprintingStrategy;

use crate::tree::RelativePath;
use crate::types::{FileType, Hash};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// How entry paths are normalized before comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationRule {
    /// Path relative to the snapshot root; a root file is keyed by its name
    #[default]
    RelativePath,
    /// File name only
    NameOnly,
    /// Full absolute path
    AbsolutePath,
}

/// Whether non-root directories become fingerprint entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectorySensitivity {
    #[default]
    IgnoreDirectories,
    FingerprintDirectories,
}

/// Tunables for fingerprinting and comparing output properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintOptions {
    #[serde(default)]
    pub normalization: NormalizationRule,

    #[serde(default)]
    pub directory_sensitivity: DirectorySensitivity,

    /// Pair unmatched entries by content hash and report them as one change
    #[serde(default = "default_detect_moves")]
    pub detect_moves: bool,
}

fn default_detect_moves() -> bool {
    true
}

impl Default for FingerprintOptions {
    fn default() -> Self {
        Self {
            normalization: NormalizationRule::default(),
            directory_sensitivity: DirectorySensitivity::default(),
            detect_moves: default_detect_moves(),
        }
    }
}

/// One normalized leaf of a snapshot tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerprintEntry {
    pub normalized_path: Arc<str>,
    pub absolute_path: PathBuf,
    pub relative_path: RelativePath,
    pub file_type: FileType,
    pub hash: Hash,
}

impl FingerprintEntry {
    fn same_content(&self, other: &FingerprintEntry) -> bool {
        self.normalized_path == other.normalized_path
            && self.file_type == other.file_type
            && self.hash == other.hash
    }
}

/// Ordered fingerprint of a snapshot tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fingerprint {
    entries: Vec<FingerprintEntry>,
}

impl Fingerprint {
    pub fn new(entries: Vec<FingerprintEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[FingerprintEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry-wise equality on (normalized path, type, hash), ignoring where
    /// the trees live on disk
    pub fn same_content(&self, other: &Fingerprint) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|(a, b)| a.same_content(b))
    }
}
