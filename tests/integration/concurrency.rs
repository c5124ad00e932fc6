//! Independent comparisons over shared immutable snapshots

use super::test_utils::{dir, properties};
use snapdiff::changes::{CollectingChangeVisitor, OutputFileChanges};
use snapdiff::tree::FileSystemSnapshot;
use std::thread;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_engine_types_are_thread_safe() {
    assert_send_sync::<FileSystemSnapshot>();
    assert_send_sync::<OutputFileChanges>();
}

#[test]
fn test_parallel_comparisons_share_snapshots() {
    let previous: FileSystemSnapshot = dir("/out", &[("a", "1"), ("b", "2")]).into();
    let current: FileSystemSnapshot = dir("/out", &[("a", "1"), ("b", "3")]).into();
    let changes = OutputFileChanges::new(
        properties(vec![("output", previous)]),
        properties(vec![("output", current)]),
    );

    let counts: Vec<usize> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    let mut collector = CollectingChangeVisitor::new();
                    changes.accept(&mut collector).unwrap();
                    collector.changes().len()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(counts, vec![1, 1, 1, 1]);
}
