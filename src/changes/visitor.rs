//! Change visitors
//!
//! A visitor sees each change exactly once and answers whether the
//! comparison should keep going. Closures taking `&FileChange` and
//! returning [`Flow`] are visitors too.

use crate::changes::change::FileChange;
use crate::types::Flow;

pub trait ChangeVisitor {
    fn visit_change(&mut self, change: &FileChange) -> Flow;
}

impl<F> ChangeVisitor for F
where
    F: FnMut(&FileChange) -> Flow,
{
    fn visit_change(&mut self, change: &FileChange) -> Flow {
        self(change)
    }
}

/// Collects every change it sees
#[derive(Debug, Default)]
pub struct CollectingChangeVisitor {
    changes: Vec<FileChange>,
}

impl CollectingChangeVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn changes(&self) -> &[FileChange] {
        &self.changes
    }

    pub fn into_changes(self) -> Vec<FileChange> {
        self.changes
    }
}

impl ChangeVisitor for CollectingChangeVisitor {
    fn visit_change(&mut self, change: &FileChange) -> Flow {
        self.changes.push(change.clone());
        Flow::Continue
    }
}

/// Stops at the first change; used for plain up-to-date checks
#[derive(Debug, Default)]
pub struct ChangeDetectorVisitor {
    found: bool,
}

impl ChangeDetectorVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn any_change(&self) -> bool {
        self.found
    }
}

impl ChangeVisitor for ChangeDetectorVisitor {
    fn visit_change(&mut self, _change: &FileChange) -> Flow {
        self.found = true;
        Flow::Stop
    }
}

/// Forwards at most `limit` changes to the delegate, then stops
pub struct LimitingChangeVisitor<'a, V: ChangeVisitor + ?Sized> {
    delegate: &'a mut V,
    remaining: usize,
}

impl<'a, V: ChangeVisitor + ?Sized> LimitingChangeVisitor<'a, V> {
    pub fn new(delegate: &'a mut V, limit: usize) -> Self {
        Self {
            delegate,
            remaining: limit,
        }
    }
}

impl<V: ChangeVisitor + ?Sized> ChangeVisitor for LimitingChangeVisitor<'_, V> {
    fn visit_change(&mut self, change: &FileChange) -> Flow {
        if self.remaining == 0 {
            return Flow::Stop;
        }
        self.remaining -= 1;
        match self.delegate.visit_change(change) {
            Flow::Continue if self.remaining > 0 => Flow::Continue,
            _ => Flow::Stop,
        }
    }
}
