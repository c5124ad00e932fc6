//! The Change value

use crate::tree::RelativePath;
use crate::types::FileType;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Added,
    Removed,
    Modified,
}

impl ChangeKind {
    fn describe(self) -> &'static str {
        match self {
            ChangeKind::Added => "has been added",
            ChangeKind::Removed => "has been removed",
            ChangeKind::Modified => "has changed",
        }
    }
}

/// Title under which changes of an output property are reported
pub fn output_property_title(property: &str) -> String {
    format!("Output property '{}'", property)
}

/// A single reported change; immutable once produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    kind: ChangeKind,
    absolute_path: PathBuf,
    property_title: Arc<str>,
    file_type: FileType,
    relative_path: RelativePath,
}

impl FileChange {
    pub fn new(
        kind: ChangeKind,
        absolute_path: impl Into<PathBuf>,
        property_title: Arc<str>,
        file_type: FileType,
        relative_path: RelativePath,
    ) -> Self {
        Self {
            kind,
            absolute_path: absolute_path.into(),
            property_title,
            file_type,
            relative_path,
        }
    }

    pub fn kind(&self) -> ChangeKind {
        self.kind
    }

    pub fn absolute_path(&self) -> &Path {
        &self.absolute_path
    }

    pub fn property_title(&self) -> &str {
        &self.property_title
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn relative_path(&self) -> &RelativePath {
        &self.relative_path
    }
}

impl fmt::Display for FileChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}.",
            self.property_title,
            self.file_type,
            self.absolute_path.display(),
            self.kind.describe()
        )
    }
}
