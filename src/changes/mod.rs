//! Change reporting
//!
//! Typed changes, the visitor contract shared by every layer, and the
//! output-property comparison entry point.

pub mod change;
pub mod output;
pub mod visitor;

pub use change::{output_property_title, ChangeKind, FileChange};
pub use output::{OutputFileChanges, PropertyChangeClassifier};
pub use visitor::{
    ChangeDetectorVisitor, ChangeVisitor, CollectingChangeVisitor, LimitingChangeVisitor,
};
