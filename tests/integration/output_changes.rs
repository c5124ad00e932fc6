//! Integration tests for output property classification

use super::test_utils::{collect, dir, file, properties, summarize};
use snapdiff::changes::{ChangeKind, OutputFileChanges};
use snapdiff::error::ChangeError;
use snapdiff::tree::{FileSystemSnapshot, LocationSnapshot};
use snapdiff::types::{FileType, Flow};

const OUTPUT: &str = "Output property 'output'";

/// Structurally identical maps built independently report nothing
#[test]
fn test_identical_maps_no_changes() {
    let build = || {
        properties(vec![
            ("classes", dir("/build/classes", &[("A.class", "a"), ("B.class", "b")]).into()),
            ("jar", file("/build/libs/app.jar", "jar").into()),
            ("empty", FileSystemSnapshot::Empty),
        ])
    };

    let (flow, changes) = collect(&OutputFileChanges::new(build(), build()));

    assert_eq!(flow, Flow::Continue);
    assert!(changes.is_empty());
}

/// A modified file inside an output directory is reported once
#[test]
fn test_modified_file_in_directory() {
    let previous = properties(vec![("output", dir("/out", &[("a.txt", "H1")]).into())]);
    let current = properties(vec![("output", dir("/out", &[("a.txt", "H2")]).into())]);

    let (flow, changes) = collect(&OutputFileChanges::new(previous, current));

    assert_eq!(flow, Flow::Continue);
    assert_eq!(
        summarize(&changes),
        vec![(ChangeKind::Modified, OUTPUT.to_string(), "a.txt".to_string())]
    );
    assert_eq!(changes[0].absolute_path().to_str(), Some("/out/a.txt"));
    assert_eq!(changes[0].file_type(), FileType::RegularFile);
}

/// Going from the empty tree reports the whole new tree, root first, then
/// files in name order
///
/// The root directory counts as an added node too, so two files produce
/// three changes: the directory with an empty relative path, then the files.
#[test]
fn test_empty_to_directory_reports_all_added() {
    let previous = properties(vec![("output", FileSystemSnapshot::Empty)]);
    let current = properties(vec![(
        "output",
        dir("/out", &[("a.txt", "a"), ("b.txt", "b")]).into(),
    )]);

    let (_, changes) = collect(&OutputFileChanges::new(previous, current));

    assert_eq!(changes.len(), 3);
    assert!(changes.iter().all(|c| c.kind() == ChangeKind::Added));
    assert_eq!(changes[0].file_type(), FileType::Directory);
    assert!(changes[0].relative_path().is_empty());

    let files: Vec<_> = changes
        .iter()
        .filter(|c| c.file_type() == FileType::RegularFile)
        .map(|c| c.relative_path().join())
        .collect();
    assert_eq!(files, vec!["a.txt", "b.txt"]);
}

#[test]
fn test_directory_to_empty_reports_all_removed() {
    let previous = properties(vec![("output", dir("/out", &[("a.txt", "a")]).into())]);
    let current = properties(vec![("output", FileSystemSnapshot::Empty)]);

    let (_, changes) = collect(&OutputFileChanges::new(previous, current));

    assert_eq!(changes.len(), 2);
    assert!(changes.iter().all(|c| c.kind() == ChangeKind::Removed));
}

/// A property that disappeared is reported wholesale under its own title
#[test]
fn test_removed_property_reported_directly() {
    let previous = properties(vec![
        ("logs", dir("/logs", &[("build.log", "l1"), ("test.log", "l2")]).into()),
        ("output", dir("/out", &[("a.txt", "a")]).into()),
    ]);
    let current = properties(vec![("output", dir("/out", &[("a.txt", "a")]).into())]);

    let (_, changes) = collect(&OutputFileChanges::new(previous, current));

    assert_eq!(
        summarize(&changes),
        vec![
            (ChangeKind::Removed, "Output property 'logs'".to_string(), "".to_string()),
            (ChangeKind::Removed, "Output property 'logs'".to_string(), "build.log".to_string()),
            (ChangeKind::Removed, "Output property 'logs'".to_string(), "test.log".to_string()),
        ]
    );
}

/// Added and removed properties are reported wherever they sort
#[test]
fn test_added_and_removed_properties_in_key_order() {
    let previous = properties(vec![
        ("b", file("/b", "b").into()),
        ("z", file("/z", "z").into()),
    ]);
    let current = properties(vec![
        ("a", file("/a", "a").into()),
        ("b", file("/b", "b").into()),
    ]);

    let (_, changes) = collect(&OutputFileChanges::new(previous, current));

    assert_eq!(
        summarize(&changes),
        vec![
            (ChangeKind::Added, "Output property 'a'".to_string(), "".to_string()),
            (ChangeKind::Removed, "Output property 'z'".to_string(), "".to_string()),
        ]
    );
}

/// A newly added property is reported wholesale without classification,
/// so even a multi-root snapshot is accepted
#[test]
fn test_added_property_skips_classification() {
    let collection = FileSystemSnapshot::of(vec![file("/x", "x"), file("/y", "y")]);
    let previous = properties(vec![]);
    let current = properties(vec![("many", collection)]);

    let (_, changes) = collect(&OutputFileChanges::new(previous, current));

    assert_eq!(changes.len(), 2);
    assert!(changes.iter().all(|c| c.kind() == ChangeKind::Added));
}

/// Equal root hash with different location is not a change
#[test]
fn test_equal_hash_different_location_unchanged() {
    let previous = properties(vec![("output", dir("/old/out", &[("a.txt", "a")]).into())]);
    let current = properties(vec![("output", dir("/new/out", &[("a.txt", "a")]).into())]);

    let (_, changes) = collect(&OutputFileChanges::new(previous, current));

    assert!(changes.is_empty());
}

/// Renaming a root file keeps its bytes but must not be absorbed
#[test]
fn test_renamed_root_file_reported_once() {
    let previous = properties(vec![("jar", file("/libs/app-1.0.jar", "bytes").into())]);
    let current = properties(vec![("jar", file("/libs/app-1.1.jar", "bytes").into())]);

    let (_, changes) = collect(&OutputFileChanges::new(previous, current));

    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].property_title(), "Output property 'jar'");
    assert_eq!(changes[0].kind(), ChangeKind::Modified);
    assert_eq!(changes[0].absolute_path().to_str(), Some("/libs/app-1.1.jar"));
}

#[test]
fn test_renamed_file_inside_directory_reported_once() {
    let previous = properties(vec![("output", dir("/out", &[("old.txt", "same")]).into())]);
    let current = properties(vec![("output", dir("/out", &[("new.txt", "same")]).into())]);

    let (_, changes) = collect(&OutputFileChanges::new(previous, current));

    assert_eq!(
        summarize(&changes),
        vec![(ChangeKind::Modified, OUTPUT.to_string(), "new.txt".to_string())]
    );
}

#[test]
fn test_missing_root_created() {
    let previous = properties(vec![("output", LocationSnapshot::missing("/out").into())]);
    let current = properties(vec![(
        "output",
        dir("/out", &[("a.txt", "a"), ("b.txt", "b")]).into(),
    )]);

    let (_, changes) = collect(&OutputFileChanges::new(previous, current));

    assert_eq!(changes.len(), 3);
    assert!(changes.iter().all(|c| c.kind() == ChangeKind::Added));
}

#[test]
fn test_root_deleted_reports_missing_root_untouched() {
    let previous = properties(vec![("jar", file("/libs/app.jar", "bytes").into())]);
    let current = properties(vec![("jar", LocationSnapshot::missing("/libs/app.jar").into())]);

    let (_, changes) = collect(&OutputFileChanges::new(previous, current));

    assert_eq!(
        summarize(&changes),
        vec![(ChangeKind::Removed, "Output property 'jar'".to_string(), "".to_string())]
    );
    assert_eq!(changes[0].file_type(), FileType::RegularFile);
}

#[test]
fn test_both_missing_unchanged() {
    let previous = properties(vec![("output", LocationSnapshot::missing("/out").into())]);
    let current = properties(vec![("output", LocationSnapshot::missing("/out").into())]);

    let (_, changes) = collect(&OutputFileChanges::new(previous, current));

    assert!(changes.is_empty());
}

#[test]
fn test_nested_changes() {
    let previous_tree = LocationSnapshot::directory(
        "/out",
        vec![
            file("/out/a.txt", "a"),
            dir("/out/sub", &[("keep.txt", "k"), ("old.txt", "o")]),
        ],
    )
    .unwrap();
    let current_tree = LocationSnapshot::directory(
        "/out",
        vec![
            file("/out/a.txt", "a2"),
            dir("/out/sub", &[("fresh.txt", "f"), ("keep.txt", "k")]),
        ],
    )
    .unwrap();
    let previous = properties(vec![("output", previous_tree.into())]);
    let current = properties(vec![("output", current_tree.into())]);

    let (_, changes) = collect(&OutputFileChanges::new(previous, current));

    let summary: Vec<_> = summarize(&changes)
        .into_iter()
        .map(|(kind, _, path)| (kind, path))
        .collect();
    assert_eq!(
        summary,
        vec![
            (ChangeKind::Modified, "a.txt".to_string()),
            (ChangeKind::Added, "sub/fresh.txt".to_string()),
            (ChangeKind::Removed, "sub/old.txt".to_string()),
        ]
    );
}

/// A root spanning several locations aborts the whole comparison before
/// any change is reported, even for properties that sort ahead of it
#[test]
fn test_collection_root_fails_fast() {
    let previous = properties(vec![
        ("a", dir("/a", &[("x", "1")]).into()),
        ("b", dir("/b", &[("y", "1")]).into()),
    ]);
    let current = properties(vec![
        ("a", dir("/a", &[("x", "2")]).into()),
        ("b", FileSystemSnapshot::of(vec![file("/b1", "1"), file("/b2", "2")])),
    ]);

    let changes = OutputFileChanges::new(previous, current);
    let mut seen = 0;
    let result = changes.accept(&mut |_: &snapdiff::changes::FileChange| {
        seen += 1;
        Flow::Continue
    });

    match result {
        Err(ChangeError::NotSingleLocation { property, roots }) => {
            assert_eq!(property, "b");
            assert_eq!(roots, 2);
        }
        other => panic!("expected contract violation, got {:?}", other),
    }
    assert_eq!(seen, 0);
}

#[test]
fn test_has_changes() {
    let unchanged = OutputFileChanges::new(
        properties(vec![("output", dir("/out", &[("a.txt", "a")]).into())]),
        properties(vec![("output", dir("/out", &[("a.txt", "a")]).into())]),
    );
    assert!(!unchanged.has_changes().unwrap());

    let changed = OutputFileChanges::new(
        properties(vec![("output", dir("/out", &[("a.txt", "a")]).into())]),
        properties(vec![("output", dir("/out", &[("a.txt", "b")]).into())]),
    );
    assert!(changed.has_changes().unwrap());
}

#[test]
fn test_change_message() {
    let previous = properties(vec![("output", dir("/out", &[("a.txt", "H1")]).into())]);
    let current = properties(vec![("output", dir("/out", &[("a.txt", "H2")]).into())]);

    let (_, changes) = collect(&OutputFileChanges::new(previous, current));

    assert_eq!(
        changes[0].to_string(),
        "Output property 'output' file /out/a.txt has changed."
    );
}

/// A removed property whose root was missing reports just that missing root
#[test]
fn test_removed_property_with_missing_root() {
    let previous = properties(vec![("gone", LocationSnapshot::missing("/gone").into())]);
    let current = properties(vec![]);

    let (_, changes) = collect(&OutputFileChanges::new(previous, current));

    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].kind(), ChangeKind::Removed);
    assert_eq!(changes[0].file_type(), FileType::Missing);
    assert!(changes[0].relative_path().is_empty());
}

#[test]
fn test_added_property_with_missing_root() {
    let previous = properties(vec![]);
    let current = properties(vec![("fresh", LocationSnapshot::missing("/fresh").into())]);

    let (_, changes) = collect(&OutputFileChanges::new(previous, current));

    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].kind(), ChangeKind::Added);
    assert_eq!(changes[0].file_type(), FileType::Missing);
    assert!(changes[0].relative_path().is_empty());
}

/// The empty tree followed by a missing root still reports the missing node
#[test]
fn test_empty_to_missing_root_reports_missing_added() {
    let previous = properties(vec![("output", FileSystemSnapshot::Empty)]);
    let current = properties(vec![("output", LocationSnapshot::missing("/out").into())]);

    let (_, changes) = collect(&OutputFileChanges::new(previous, current));

    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].kind(), ChangeKind::Added);
    assert_eq!(changes[0].file_type(), FileType::Missing);
    assert_eq!(changes[0].absolute_path().to_str(), Some("/out"));
    assert!(changes[0].relative_path().is_empty());
}
