//! Snapdiff: Output Change Detection for Incremental Builds
//!
//! Compares the output snapshots a build step produced in its previous and
//! current execution and reports a minimal, typed stream of changes. Disk
//! scanning and hashing happen upstream; this crate only reads immutable,
//! pre-hashed snapshot trees.
//!
//! The entry point is [`changes::OutputFileChanges`]:
//!
//! ```
//! use snapdiff::changes::{CollectingChangeVisitor, OutputFileChanges};
//! use snapdiff::tree::{FileSystemSnapshot, LocationSnapshot};
//! use std::collections::BTreeMap;
//!
//! let before = LocationSnapshot::directory(
//!     "/build/out",
//!     vec![LocationSnapshot::file("/build/out/a.txt", [1; 32])],
//! )?;
//! let after = LocationSnapshot::directory(
//!     "/build/out",
//!     vec![LocationSnapshot::file("/build/out/a.txt", [2; 32])],
//! )?;
//!
//! let previous = BTreeMap::from([("output".to_string(), FileSystemSnapshot::from(before))]);
//! let current = BTreeMap::from([("output".to_string(), FileSystemSnapshot::from(after))]);
//!
//! let mut visitor = CollectingChangeVisitor::new();
//! let flow = OutputFileChanges::new(previous, current).accept(&mut visitor)?;
//! assert!(flow.is_completed());
//! assert_eq!(visitor.changes().len(), 1);
//! # Ok::<(), snapdiff::error::ChangeError>(())
//! ```

pub mod changes;
pub mod config;
pub mod diff;
pub mod error;
pub mod fingerprint;
pub mod intern;
pub mod logging;
pub mod tree;
pub mod types;
