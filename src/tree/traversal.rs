//! Depth-first traversal of snapshot trees with relative path tracking

use crate::tree::node::{FileSystemSnapshot, LocationSnapshot};
use std::fmt;

/// Per-node answer from a traversal visitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotVisitResult {
    Continue,
    /// Do not descend into this node's children; siblings are still visited
    SkipSubtree,
    Terminate,
}

/// Path of a node relative to the traversal root, as a sequence of segments
///
/// The root itself has an empty relative path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(Vec<String>);

impl RelativePath {
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RelativePath(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Segments joined with `/`
    pub fn join(&self) -> String {
        self.0.join("/")
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join())
    }
}

/// Tracks the relative path while walking down from a root
///
/// The first name entered is the root; only names below it become
/// segments.
#[derive(Debug, Default)]
pub struct RelativePathTracker {
    root_name: Option<String>,
    segments: Vec<String>,
}

impl RelativePathTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&mut self, name: &str) {
        if self.root_name.is_none() {
            self.root_name = Some(name.to_string());
        } else {
            self.segments.push(name.to_string());
        }
    }

    pub fn leave(&mut self) {
        if self.segments.pop().is_none() {
            self.root_name = None;
        }
    }

    /// True while positioned on the traversal root
    pub fn is_root(&self) -> bool {
        self.root_name.is_some() && self.segments.is_empty()
    }

    pub fn to_relative_path(&self) -> RelativePath {
        RelativePath(self.segments.clone())
    }
}

impl LocationSnapshot {
    /// Visit this node and its descendants depth-first, node before children
    ///
    /// Returns `Terminate` if the visitor asked to stop, `Continue` otherwise.
    pub fn accept<F>(
        &self,
        tracker: &mut RelativePathTracker,
        visitor: &mut F,
    ) -> SnapshotVisitResult
    where
        F: FnMut(&LocationSnapshot, &RelativePathTracker) -> SnapshotVisitResult,
    {
        tracker.enter(self.name());
        let result = match visitor(self, tracker) {
            SnapshotVisitResult::Continue => {
                let mut result = SnapshotVisitResult::Continue;
                for child in self.children() {
                    if child.accept(tracker, visitor) == SnapshotVisitResult::Terminate {
                        result = SnapshotVisitResult::Terminate;
                        break;
                    }
                }
                result
            }
            SnapshotVisitResult::SkipSubtree => SnapshotVisitResult::Continue,
            SnapshotVisitResult::Terminate => SnapshotVisitResult::Terminate,
        };
        tracker.leave();
        result
    }
}

impl FileSystemSnapshot {
    /// Visit every root in order; an empty snapshot visits nothing
    pub fn accept<F>(
        &self,
        tracker: &mut RelativePathTracker,
        visitor: &mut F,
    ) -> SnapshotVisitResult
    where
        F: FnMut(&LocationSnapshot, &RelativePathTracker) -> SnapshotVisitResult,
    {
        for root in self.roots() {
            if root.accept(tracker, visitor) == SnapshotVisitResult::Terminate {
                return SnapshotVisitResult::Terminate;
            }
        }
        SnapshotVisitResult::Continue
    }
}
