//! Snapshot node types
//!
//! A snapshot tree is built once by the snapshot producer and never
//! mutated afterwards. Node kinds form a closed set, so every comparison
//! site matches on [`LocationSnapshot`] exhaustively.

use crate::error::ChangeError;
use crate::tree::hasher;
use crate::types::{FileType, Hash};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Regular file with its precomputed content hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegularFileSnapshot {
    pub absolute_path: PathBuf,
    pub name: String,
    pub content_hash: Hash,
}

/// Directory with children sorted by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySnapshot {
    pub absolute_path: PathBuf,
    pub name: String,
    hash: Hash,
    children: Vec<LocationSnapshot>,
}

/// Location that did not exist when the snapshot was taken
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFileSnapshot {
    pub absolute_path: PathBuf,
    pub name: String,
}

/// Snapshot of a single filesystem location and, for directories, its contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationSnapshot {
    RegularFile(RegularFileSnapshot),
    Directory(DirectorySnapshot),
    Missing(MissingFileSnapshot),
}

fn name_of(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.to_string_lossy().into_owned(),
    }
}

impl DirectorySnapshot {
    /// Create a directory snapshot, deriving its hash from the children
    ///
    /// Children must be strictly ordered by name and live directly
    /// under `absolute_path`.
    pub fn new(
        absolute_path: impl Into<PathBuf>,
        children: Vec<LocationSnapshot>,
    ) -> Result<Self, ChangeError> {
        let absolute_path = absolute_path.into();

        for pair in children.windows(2) {
            if pair[0].name() >= pair[1].name() {
                return Err(ChangeError::invalid_snapshot(
                    &absolute_path,
                    format!(
                        "children not strictly ordered by name: '{}' before '{}'",
                        pair[0].name(),
                        pair[1].name()
                    ),
                ));
            }
        }
        for child in &children {
            if child.absolute_path().parent() != Some(absolute_path.as_path()) {
                return Err(ChangeError::invalid_snapshot(
                    child.absolute_path(),
                    format!("not a direct child of {:?}", absolute_path),
                ));
            }
        }

        let hash = hasher::compute_directory_hash(
            children.iter().map(|c| (c.name(), c.file_type(), c.hash())),
        );

        Ok(DirectorySnapshot {
            name: name_of(&absolute_path),
            absolute_path,
            hash,
            children,
        })
    }

    pub fn hash(&self) -> &Hash {
        &self.hash
    }

    pub fn children(&self) -> &[LocationSnapshot] {
        &self.children
    }
}

impl LocationSnapshot {
    /// Regular file at `path` with a content hash supplied by the producer
    pub fn file(path: impl Into<PathBuf>, content_hash: Hash) -> Self {
        let absolute_path = path.into();
        LocationSnapshot::RegularFile(RegularFileSnapshot {
            name: name_of(&absolute_path),
            absolute_path,
            content_hash,
        })
    }

    pub fn directory(
        path: impl Into<PathBuf>,
        children: Vec<LocationSnapshot>,
    ) -> Result<Self, ChangeError> {
        DirectorySnapshot::new(path, children).map(LocationSnapshot::Directory)
    }

    pub fn missing(path: impl Into<PathBuf>) -> Self {
        let absolute_path = path.into();
        LocationSnapshot::Missing(MissingFileSnapshot {
            name: name_of(&absolute_path),
            absolute_path,
        })
    }

    pub fn absolute_path(&self) -> &Path {
        match self {
            LocationSnapshot::RegularFile(f) => &f.absolute_path,
            LocationSnapshot::Directory(d) => &d.absolute_path,
            LocationSnapshot::Missing(m) => &m.absolute_path,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            LocationSnapshot::RegularFile(f) => &f.name,
            LocationSnapshot::Directory(d) => &d.name,
            LocationSnapshot::Missing(m) => &m.name,
        }
    }

    pub fn file_type(&self) -> FileType {
        match self {
            LocationSnapshot::RegularFile(_) => FileType::RegularFile,
            LocationSnapshot::Directory(_) => FileType::Directory,
            LocationSnapshot::Missing(_) => FileType::Missing,
        }
    }

    pub fn hash(&self) -> &Hash {
        match self {
            LocationSnapshot::RegularFile(f) => &f.content_hash,
            LocationSnapshot::Directory(d) => &d.hash,
            LocationSnapshot::Missing(_) => &hasher::MISSING_FILE_SIGNATURE,
        }
    }

    /// Direct children; empty for anything but a directory
    pub fn children(&self) -> &[LocationSnapshot] {
        match self {
            LocationSnapshot::Directory(d) => &d.children,
            LocationSnapshot::RegularFile(_) | LocationSnapshot::Missing(_) => &[],
        }
    }
}

/// Snapshot of everything an output property points at
///
/// `Empty` is the canonical empty tree handed out by the producer when a
/// property has nothing to track. Cloning shares the underlying tree, which
/// is what [`FileSystemSnapshot::same_reference`] detects.
#[derive(Debug, Clone, Default)]
pub enum FileSystemSnapshot {
    #[default]
    Empty,
    Location(Arc<LocationSnapshot>),
    Collection(Arc<[LocationSnapshot]>),
}

impl FileSystemSnapshot {
    /// Collapse a list of roots: none is `Empty`, one is a plain location
    pub fn of(mut roots: Vec<LocationSnapshot>) -> Self {
        match roots.len() {
            0 => FileSystemSnapshot::Empty,
            1 => match roots.pop() {
                Some(root) => FileSystemSnapshot::Location(Arc::new(root)),
                None => FileSystemSnapshot::Empty,
            },
            _ => FileSystemSnapshot::Collection(roots.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FileSystemSnapshot::Empty)
    }

    /// Reference identity: both sides hold the very same tree
    pub fn same_reference(&self, other: &FileSystemSnapshot) -> bool {
        match (self, other) {
            (FileSystemSnapshot::Empty, FileSystemSnapshot::Empty) => true,
            (FileSystemSnapshot::Location(a), FileSystemSnapshot::Location(b)) => Arc::ptr_eq(a, b),
            (FileSystemSnapshot::Collection(a), FileSystemSnapshot::Collection(b)) => {
                Arc::ptr_eq(a, b)
            }
            _ => false,
        }
    }

    pub fn roots(&self) -> &[LocationSnapshot] {
        match self {
            FileSystemSnapshot::Empty => &[],
            FileSystemSnapshot::Location(root) => std::slice::from_ref(root.as_ref()),
            FileSystemSnapshot::Collection(roots) => &roots[..],
        }
    }

    /// The single root this snapshot covers
    ///
    /// Fails for anything but a plain location; `property` only feeds the
    /// error message.
    pub fn as_single_location(&self, property: &str) -> Result<&LocationSnapshot, ChangeError> {
        match self {
            FileSystemSnapshot::Location(root) => Ok(root.as_ref()),
            FileSystemSnapshot::Empty | FileSystemSnapshot::Collection(_) => {
                Err(ChangeError::NotSingleLocation {
                    property: property.to_string(),
                    roots: self.roots().len(),
                })
            }
        }
    }
}

impl From<LocationSnapshot> for FileSystemSnapshot {
    fn from(root: LocationSnapshot) -> Self {
        FileSystemSnapshot::Location(Arc::new(root))
    }
}
