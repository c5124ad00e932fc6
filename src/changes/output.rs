//! Output property change detection
//!
//! Compares the output snapshots of a build step from the previous and the
//! current execution, property by property, and reports what changed.

use crate::changes::change::{output_property_title, ChangeKind, FileChange};
use crate::changes::visitor::ChangeVisitor;
use crate::diff::{self, PropertyDiffListener};
use crate::error::ChangeError;
use crate::fingerprint::{FingerprintOptions, FingerprintingStrategy, NormalizedPathCompareStrategy};
use crate::intern::{NoopInterner, StringInterner};
use crate::tree::{FileSystemSnapshot, RelativePathTracker, SnapshotVisitResult};
use crate::types::{FileType, Flow};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, instrument, trace};

/// Decides, for one property present in both builds, what changed
///
/// Stateless between calls; one classifier can serve concurrent
/// comparisons as long as each has its own visitor.
#[derive(Clone)]
pub struct PropertyChangeClassifier {
    fingerprinting: FingerprintingStrategy,
    compare: NormalizedPathCompareStrategy,
    interner: Arc<dyn StringInterner>,
}

impl Default for PropertyChangeClassifier {
    fn default() -> Self {
        Self::new(&FingerprintOptions::default(), Arc::new(NoopInterner))
    }
}

impl std::fmt::Debug for PropertyChangeClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyChangeClassifier")
            .field("fingerprinting", &self.fingerprinting)
            .field("compare", &self.compare)
            .finish_non_exhaustive()
    }
}

impl PropertyChangeClassifier {
    pub fn new(options: &FingerprintOptions, interner: Arc<dyn StringInterner>) -> Self {
        Self {
            fingerprinting: FingerprintingStrategy::from_options(options),
            compare: NormalizedPathCompareStrategy::new(options.detect_moves),
            interner,
        }
    }

    /// Verify that `classify` would accept this pair without visiting anything
    ///
    /// Pairs that short-circuit before looking at roots always pass.
    pub fn check(
        &self,
        property: &str,
        previous: &FileSystemSnapshot,
        current: &FileSystemSnapshot,
    ) -> Result<(), ChangeError> {
        if previous.same_reference(current) || previous.is_empty() || current.is_empty() {
            return Ok(());
        }
        previous.as_single_location(property)?;
        current.as_single_location(property)?;
        Ok(())
    }

    /// Classify one property present in both the previous and current build
    ///
    /// The first matching rule decides:
    /// 1. same tree on both sides: unchanged, no hash is looked at
    /// 2. previously empty: everything now present was added
    /// 3. now empty: everything previously present was removed
    /// 4. equal root hashes: unchanged, unless the root is a regular file
    ///    whose name changed
    /// 5. root went from or to missing: whole tree added or removed
    /// 6. otherwise fingerprints of both roots are compared
    ///
    /// Fails if either side is not a single location.
    #[instrument(skip(self, previous, current, visitor))]
    pub fn classify<V: ChangeVisitor + ?Sized>(
        &self,
        property: &str,
        previous: &FileSystemSnapshot,
        current: &FileSystemSnapshot,
        visitor: &mut V,
    ) -> Result<Flow, ChangeError> {
        if previous.same_reference(current) {
            trace!("Same snapshot on both sides");
            return Ok(Flow::Continue);
        }

        let title: Arc<str> = Arc::from(output_property_title(property));
        if previous.is_empty() {
            debug!("Property previously empty, reporting all as added");
            return Ok(report_all(current, ChangeKind::Added, &title, visitor));
        }
        if current.is_empty() {
            debug!("Property now empty, reporting all as removed");
            return Ok(report_all(previous, ChangeKind::Removed, &title, visitor));
        }

        let previous_root = previous.as_single_location(property)?;
        let current_root = current.as_single_location(property)?;

        trace!(
            previous_hash = %hex::encode(previous_root.hash()),
            current_hash = %hex::encode(current_root.hash()),
            "Comparing root hashes"
        );
        if previous_root.hash() == current_root.hash() {
            if previous_root.file_type() == current_root.file_type()
                && (previous_root.file_type() != FileType::RegularFile
                    || previous_root.name() == current_root.name())
            {
                trace!("Root hashes equal");
                return Ok(Flow::Continue);
            }
        } else {
            match (previous_root.file_type(), current_root.file_type()) {
                (FileType::Missing, _) => {
                    debug!("Root created, reporting all as added");
                    return Ok(report_all(current, ChangeKind::Added, &title, visitor));
                }
                (_, FileType::Missing) => {
                    debug!("Root deleted, reporting all as removed");
                    return Ok(report_all(previous, ChangeKind::Removed, &title, visitor));
                }
                (FileType::RegularFile | FileType::Directory, _) => {}
            }
        }

        let interner = self.interner.as_ref();
        let previous_fingerprint = self.fingerprinting.fingerprint(previous, interner);
        let current_fingerprint = self.fingerprinting.fingerprint(current, interner);
        debug!(
            previous_entries = previous_fingerprint.len(),
            current_entries = current_fingerprint.len(),
            "Comparing fingerprints"
        );
        Ok(self
            .compare
            .compare(&previous_fingerprint, &current_fingerprint, &title, visitor))
    }
}

/// Report every node of `snapshot`, roots included, as one kind of change
pub(crate) fn report_all<V: ChangeVisitor + ?Sized>(
    snapshot: &FileSystemSnapshot,
    kind: ChangeKind,
    title: &Arc<str>,
    visitor: &mut V,
) -> Flow {
    let result = snapshot.accept(&mut RelativePathTracker::new(), &mut |node, tracker| {
        let change = FileChange::new(
            kind,
            node.absolute_path(),
            Arc::clone(title),
            node.file_type(),
            tracker.to_relative_path(),
        );
        match visitor.visit_change(&change) {
            Flow::Continue => SnapshotVisitResult::Continue,
            Flow::Stop => SnapshotVisitResult::Terminate,
        }
    });
    match result {
        SnapshotVisitResult::Terminate => Flow::Stop,
        SnapshotVisitResult::Continue | SnapshotVisitResult::SkipSubtree => Flow::Continue,
    }
}

/// Output snapshots of one build step from two executions
pub struct OutputFileChanges {
    previous: BTreeMap<String, FileSystemSnapshot>,
    current: BTreeMap<String, FileSystemSnapshot>,
    classifier: PropertyChangeClassifier,
}

impl OutputFileChanges {
    pub fn new(
        previous: BTreeMap<String, FileSystemSnapshot>,
        current: BTreeMap<String, FileSystemSnapshot>,
    ) -> Self {
        Self::with_classifier(previous, current, PropertyChangeClassifier::default())
    }

    pub fn with_options(
        previous: BTreeMap<String, FileSystemSnapshot>,
        current: BTreeMap<String, FileSystemSnapshot>,
        options: &FingerprintOptions,
    ) -> Self {
        Self::with_classifier(
            previous,
            current,
            PropertyChangeClassifier::new(options, Arc::new(NoopInterner)),
        )
    }

    pub fn with_classifier(
        previous: BTreeMap<String, FileSystemSnapshot>,
        current: BTreeMap<String, FileSystemSnapshot>,
        classifier: PropertyChangeClassifier,
    ) -> Self {
        Self {
            previous,
            current,
            classifier,
        }
    }

    /// Report every change between the previous and current outputs
    ///
    /// Returns `Flow::Continue` if the comparison ran to completion and
    /// `Flow::Stop` if the visitor cut it short. A malformed property
    /// aborts the whole comparison with an error.
    #[instrument(
        skip(self, visitor),
        fields(previous = self.previous.len(), current = self.current.len())
    )]
    pub fn accept<V: ChangeVisitor + ?Sized>(&self, visitor: &mut V) -> Result<Flow, ChangeError> {
        for (property, previous) in &self.previous {
            if let Some(current) = self.current.get(property) {
                self.classifier.check(property, previous, current)?;
            }
        }

        let mut listener = PropertyListener {
            classifier: &self.classifier,
            visitor,
        };
        let flow = diff::diff(&self.previous, &self.current, &mut listener)?;
        debug!(completed = flow.is_completed(), "Output comparison finished");
        Ok(flow)
    }

    /// True if any output changed; stops at the first change found
    pub fn has_changes(&self) -> Result<bool, ChangeError> {
        let mut detector = crate::changes::ChangeDetectorVisitor::new();
        self.accept(&mut detector)?;
        Ok(detector.any_change())
    }
}

struct PropertyListener<'a, V: ChangeVisitor + ?Sized> {
    classifier: &'a PropertyChangeClassifier,
    visitor: &'a mut V,
}

impl<V: ChangeVisitor + ?Sized> PropertyDiffListener<String, FileSystemSnapshot, FileSystemSnapshot>
    for PropertyListener<'_, V>
{
    type Error = ChangeError;

    fn removed(
        &mut self,
        property: &String,
        previous: &FileSystemSnapshot,
    ) -> Result<Flow, ChangeError> {
        debug!(property = %property, "Output property removed");
        let title: Arc<str> = Arc::from(output_property_title(property));
        Ok(report_all(previous, ChangeKind::Removed, &title, &mut *self.visitor))
    }

    fn added(
        &mut self,
        property: &String,
        current: &FileSystemSnapshot,
    ) -> Result<Flow, ChangeError> {
        debug!(property = %property, "Output property added");
        let title: Arc<str> = Arc::from(output_property_title(property));
        Ok(report_all(current, ChangeKind::Added, &title, &mut *self.visitor))
    }

    fn updated(
        &mut self,
        property: &String,
        previous: &FileSystemSnapshot,
        current: &FileSystemSnapshot,
    ) -> Result<Flow, ChangeError> {
        self.classifier
            .classify(property, previous, current, &mut *self.visitor)
    }
}
