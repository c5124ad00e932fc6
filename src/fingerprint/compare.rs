//! Normalized-path compare strategy
//!
//! Entries are matched by normalized path first. With move detection on,
//! regular files left unmatched on both sides are then paired by content
//! hash: each unmatched current file takes the first still-unclaimed
//! previous file (in previous order) with the same hash. A pair is
//! reported as one `Modified` change at the current location.
//!
//! Changes are emitted walking the current fingerprint in order
//! (modifications, moves and additions interleaved), followed by the
//! remaining previous entries as removals in previous order.

use crate::changes::{ChangeKind, ChangeVisitor, FileChange};
use crate::fingerprint::{Fingerprint, FingerprintEntry};
use crate::types::{FileType, Flow, Hash};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tracing::{debug, instrument, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedPathCompareStrategy {
    detect_moves: bool,
}

impl Default for NormalizedPathCompareStrategy {
    fn default() -> Self {
        Self { detect_moves: true }
    }
}

/// How a current entry relates to the previous fingerprint
#[derive(Debug, Clone, Copy)]
enum Counterpart {
    SamePath(usize),
    Moved(usize),
    None,
}

impl NormalizedPathCompareStrategy {
    pub fn new(detect_moves: bool) -> Self {
        Self { detect_moves }
    }

    pub fn detects_moves(&self) -> bool {
        self.detect_moves
    }

    /// Report the changes between two fingerprints to `visitor`
    #[instrument(
        skip(self, previous, current, visitor),
        fields(previous_entries = previous.len(), current_entries = current.len())
    )]
    pub fn compare<V: ChangeVisitor + ?Sized>(
        &self,
        previous: &Fingerprint,
        current: &Fingerprint,
        property_title: &Arc<str>,
        visitor: &mut V,
    ) -> Flow {
        if previous.same_content(current) {
            return Flow::Continue;
        }

        let previous_entries = previous.entries();
        let current_entries = current.entries();
        let mut claimed = vec![false; previous_entries.len()];

        let mut by_path: HashMap<&str, VecDeque<usize>> = HashMap::new();
        for (index, entry) in previous_entries.iter().enumerate() {
            by_path
                .entry(&*entry.normalized_path)
                .or_default()
                .push_back(index);
        }

        let mut counterparts: Vec<Counterpart> = current_entries
            .iter()
            .map(|entry| {
                match by_path
                    .get_mut(&*entry.normalized_path)
                    .and_then(VecDeque::pop_front)
                {
                    Some(index) => {
                        claimed[index] = true;
                        Counterpart::SamePath(index)
                    }
                    None => Counterpart::None,
                }
            })
            .collect();

        if self.detect_moves {
            self.pair_moves(previous_entries, current_entries, &mut claimed, &mut counterparts);
        }

        let mut reported = 0usize;
        for (entry, counterpart) in current_entries.iter().zip(&counterparts) {
            let change = match *counterpart {
                Counterpart::SamePath(index) => {
                    let before = &previous_entries[index];
                    if before.hash == entry.hash && before.file_type == entry.file_type {
                        continue;
                    }
                    Self::change_at(entry, property_title, ChangeKind::Modified)
                }
                Counterpart::Moved(index) => {
                    trace!(
                        from = %previous_entries[index].normalized_path,
                        to = %entry.normalized_path,
                        "Paired moved file"
                    );
                    Self::change_at(entry, property_title, ChangeKind::Modified)
                }
                Counterpart::None => Self::change_at(entry, property_title, ChangeKind::Added),
            };
            reported += 1;
            if visitor.visit_change(&change).is_stopped() {
                debug!(reported, "Visitor stopped fingerprint comparison");
                return Flow::Stop;
            }
        }

        for (entry, _) in previous_entries
            .iter()
            .zip(&claimed)
            .filter(|(_, claimed)| !**claimed)
        {
            let change = Self::change_at(entry, property_title, ChangeKind::Removed);
            reported += 1;
            if visitor.visit_change(&change).is_stopped() {
                debug!(reported, "Visitor stopped fingerprint comparison");
                return Flow::Stop;
            }
        }

        debug!(reported, "Compared fingerprints");
        Flow::Continue
    }

    fn pair_moves(
        &self,
        previous_entries: &[FingerprintEntry],
        current_entries: &[FingerprintEntry],
        claimed: &mut [bool],
        counterparts: &mut [Counterpart],
    ) {
        let mut by_hash: HashMap<Hash, VecDeque<usize>> = HashMap::new();
        for (index, entry) in previous_entries.iter().enumerate() {
            if !claimed[index] && entry.file_type == FileType::RegularFile {
                by_hash.entry(entry.hash).or_default().push_back(index);
            }
        }
        if by_hash.is_empty() {
            return;
        }

        for (entry, counterpart) in current_entries.iter().zip(counterparts.iter_mut()) {
            if !matches!(counterpart, Counterpart::None)
                || entry.file_type != FileType::RegularFile
            {
                continue;
            }
            if let Some(index) = by_hash.get_mut(&entry.hash).and_then(VecDeque::pop_front) {
                claimed[index] = true;
                *counterpart = Counterpart::Moved(index);
            }
        }
    }

    fn change_at(
        entry: &FingerprintEntry,
        property_title: &Arc<str>,
        kind: ChangeKind,
    ) -> FileChange {
        FileChange::new(
            kind,
            entry.absolute_path.clone(),
            Arc::clone(property_title),
            entry.file_type,
            entry.relative_path.clone(),
        )
    }
}
