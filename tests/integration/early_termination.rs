//! Integration tests for visitor-driven early termination

use super::test_utils::{dir, file, properties};
use snapdiff::changes::{
    CollectingChangeVisitor, FileChange, LimitingChangeVisitor, OutputFileChanges,
};
use snapdiff::tree::FileSystemSnapshot;
use snapdiff::types::Flow;

/// Stop after `limit` changes and record everything seen
fn run_with_limit(changes: &OutputFileChanges, limit: usize) -> (Flow, Vec<String>) {
    let mut seen = Vec::new();
    let flow = changes
        .accept(&mut |change: &FileChange| {
            seen.push(format!("{}:{}", change.property_title(), change.relative_path()));
            if seen.len() >= limit {
                Flow::Stop
            } else {
                Flow::Continue
            }
        })
        .unwrap();
    (flow, seen)
}

/// Stopping inside a wholesale "added" report stops the whole comparison
#[test]
fn test_stop_during_bulk_added() {
    let changes = OutputFileChanges::new(
        properties(vec![("a", FileSystemSnapshot::Empty)]),
        properties(vec![
            ("a", dir("/a", &[("1", "1"), ("2", "2"), ("3", "3")]).into()),
            ("b", dir("/b", &[("4", "4")]).into()),
        ]),
    );

    let (flow, seen) = run_with_limit(&changes, 2);

    assert_eq!(flow, Flow::Stop);
    assert_eq!(seen.len(), 2);
}

/// Stopping inside a fingerprint comparison stops before later properties
#[test]
fn test_stop_during_fingerprint_compare() {
    let changes = OutputFileChanges::new(
        properties(vec![
            ("a", dir("/a", &[("1", "1"), ("2", "2")]).into()),
            ("b", dir("/b", &[("3", "3")]).into()),
        ]),
        properties(vec![
            ("a", dir("/a", &[("1", "x"), ("2", "y")]).into()),
            ("b", dir("/b", &[("3", "z")]).into()),
        ]),
    );

    let (flow, seen) = run_with_limit(&changes, 1);

    assert_eq!(flow, Flow::Stop);
    assert_eq!(seen, vec!["Output property 'a':1"]);
}

/// Stopping on a removed property skips every later key
#[test]
fn test_stop_during_property_map_diff() {
    let changes = OutputFileChanges::new(
        properties(vec![
            ("a", file("/a", "a").into()),
            ("c", file("/c", "c").into()),
        ]),
        properties(vec![("b", file("/b", "b").into())]),
    );

    let (flow, seen) = run_with_limit(&changes, 1);

    assert_eq!(flow, Flow::Stop);
    assert_eq!(seen, vec!["Output property 'a':"]);
}

#[test]
fn test_no_stop_reports_completion() {
    let changes = OutputFileChanges::new(
        properties(vec![("a", file("/a", "a").into())]),
        properties(vec![("b", file("/b", "b").into())]),
    );

    let (flow, seen) = run_with_limit(&changes, 10);

    assert_eq!(flow, Flow::Continue);
    assert_eq!(seen.len(), 2);
}

#[test]
fn test_limiting_visitor_caps_changes() {
    let changes = OutputFileChanges::new(
        properties(vec![("out", dir("/out", &[("a", "1"), ("b", "2"), ("c", "3")]).into())]),
        properties(vec![("out", dir("/out", &[("a", "4"), ("b", "5"), ("c", "6")]).into())]),
    );

    let mut collector = CollectingChangeVisitor::new();
    let flow = changes
        .accept(&mut LimitingChangeVisitor::new(&mut collector, 2))
        .unwrap();

    assert_eq!(flow, Flow::Stop);
    assert_eq!(collector.changes().len(), 2);
}
