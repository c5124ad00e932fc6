//! String interning for normalized fingerprint paths
//!
//! Interning is an optimisation only. Callers inject the interner they
//! want; comparison results never depend on strings actually being shared.

use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

pub trait StringInterner: Send + Sync {
    fn intern(&self, sample: &str) -> Arc<str>;
}

/// Pass-through interner: every call allocates a fresh string
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopInterner;

impl StringInterner for NoopInterner {
    fn intern(&self, sample: &str) -> Arc<str> {
        Arc::from(sample)
    }
}

/// Interner backed by a shared table
#[derive(Debug, Default)]
pub struct TableInterner {
    table: Mutex<HashSet<Arc<str>>>,
}

impl TableInterner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.table.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.lock().is_empty()
    }
}

impl StringInterner for TableInterner {
    fn intern(&self, sample: &str) -> Arc<str> {
        let mut table = self.table.lock();
        if let Some(existing) = table.get(sample) {
            return Arc::clone(existing);
        }
        let interned: Arc<str> = Arc::from(sample);
        table.insert(Arc::clone(&interned));
        interned
    }
}
