//! Fingerprinting strategy: snapshot tree to ordered fingerprint

use crate::fingerprint::{
    DirectorySensitivity, Fingerprint, FingerprintEntry, FingerprintOptions, NormalizationRule,
};
use crate::intern::StringInterner;
use crate::tree::hasher::DIRECTORY_SIGNATURE;
use crate::tree::{
    FileSystemSnapshot, LocationSnapshot, RelativePath, RelativePathTracker, SnapshotVisitResult,
};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::trace;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FingerprintingStrategy {
    rule: NormalizationRule,
    directory_sensitivity: DirectorySensitivity,
}

impl FingerprintingStrategy {
    pub fn new(rule: NormalizationRule, directory_sensitivity: DirectorySensitivity) -> Self {
        Self {
            rule,
            directory_sensitivity,
        }
    }

    /// Relative-path normalization, directories ignored
    pub fn relative_path() -> Self {
        Self::default()
    }

    pub fn from_options(options: &FingerprintOptions) -> Self {
        Self::new(options.normalization, options.directory_sensitivity)
    }

    pub fn rule(&self) -> NormalizationRule {
        self.rule
    }

    /// Fingerprint every root of `snapshot` in traversal order
    ///
    /// Root directories and missing roots never become entries: the former
    /// carry no content of their own, the latter must surface as whole-tree
    /// additions or removals instead of modifications. A location reachable
    /// from several roots is fingerprinted once.
    pub fn fingerprint(
        &self,
        snapshot: &FileSystemSnapshot,
        interner: &dyn StringInterner,
    ) -> Fingerprint {
        let mut entries = Vec::new();
        let mut seen: HashSet<PathBuf> = HashSet::new();

        snapshot.accept(&mut RelativePathTracker::new(), &mut |node, tracker| {
            let is_root = tracker.is_root();
            let emit = match node {
                LocationSnapshot::Directory(_) => {
                    !is_root
                        && self.directory_sensitivity
                            == DirectorySensitivity::FingerprintDirectories
                }
                LocationSnapshot::Missing(_) => !is_root,
                LocationSnapshot::RegularFile(_) => true,
            };
            if !seen.insert(node.absolute_path().to_path_buf()) {
                // Already covered through an earlier root
                return SnapshotVisitResult::SkipSubtree;
            }
            if emit {
                entries.push(self.entry_for(node, tracker, interner));
            }
            SnapshotVisitResult::Continue
        });

        trace!(entries = entries.len(), rule = ?self.rule, "Fingerprinted snapshot");
        Fingerprint::new(entries)
    }

    fn entry_for(
        &self,
        node: &LocationSnapshot,
        tracker: &RelativePathTracker,
        interner: &dyn StringInterner,
    ) -> FingerprintEntry {
        let relative_path = if tracker.is_root() {
            RelativePath::from_segments([node.name()])
        } else {
            tracker.to_relative_path()
        };

        let normalized_path = match self.rule {
            NormalizationRule::RelativePath => interner.intern(&relative_path.join()),
            NormalizationRule::NameOnly => interner.intern(node.name()),
            NormalizationRule::AbsolutePath => {
                interner.intern(&node.absolute_path().to_string_lossy())
            }
        };

        let hash = match node {
            LocationSnapshot::Directory(_) => DIRECTORY_SIGNATURE,
            LocationSnapshot::RegularFile(_) | LocationSnapshot::Missing(_) => *node.hash(),
        };

        FingerprintEntry {
            normalized_path,
            absolute_path: node.absolute_path().to_path_buf(),
            relative_path,
            file_type: node.file_type(),
            hash,
        }
    }
}
