//! Core types shared by every layer of the change-detection engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hash: 256-bit content digest attached to every snapshot node
pub type Hash = [u8; 32];

/// Kind of filesystem location captured in a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FileType {
    RegularFile,
    Directory,
    Missing,
}

impl FileType {
    /// Stable discriminator byte fed into directory hashes
    pub fn tag(self) -> u8 {
        match self {
            FileType::RegularFile => 0,
            FileType::Directory => 1,
            FileType::Missing => 2,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::RegularFile => write!(f, "file"),
            FileType::Directory => write!(f, "directory"),
            FileType::Missing => write!(f, "missing file"),
        }
    }
}

/// Cooperative continue/stop signal threaded through every comparison layer.
///
/// A visitor returning `Stop` is a normal outcome, not an error: the
/// comparison unwinds without producing further changes and reports
/// that it did not complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

impl Flow {
    /// True when every change was visited without a stop request
    pub fn is_completed(self) -> bool {
        matches!(self, Flow::Continue)
    }

    pub fn is_stopped(self) -> bool {
        matches!(self, Flow::Stop)
    }
}

impl From<bool> for Flow {
    fn from(keep_going: bool) -> Self {
        if keep_going {
            Flow::Continue
        } else {
            Flow::Stop
        }
    }
}
