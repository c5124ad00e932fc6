//! Snapshot trees
//!
//! Immutable representation of output locations as captured by the
//! snapshot producer, where each directory hash is derived from its
//! ordered children.

pub mod hasher;
pub mod node;
pub mod traversal;

pub use node::{
    DirectorySnapshot, FileSystemSnapshot, LocationSnapshot, MissingFileSnapshot,
    RegularFileSnapshot,
};
pub use traversal::{RelativePath, RelativePathTracker, SnapshotVisitResult};
