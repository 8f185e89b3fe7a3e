use nopaste::core::{FileTree, NodeKind};
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn mkfile(p: &Path) {
    fs::create_dir_all(p.parent().unwrap()).unwrap();
    fs::write(p, "x").unwrap();
}

#[test]
fn collected_paths_are_unique_and_known_to_the_tree() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    mkfile(&root.join("src/a.cpp"));
    mkfile(&root.join("src/b.cpp"));
    mkfile(&root.join("main.cpp"));

    let mut tree = FileTree::new();
    tree.set_root(root);
    tree.expand(&root.join("src")).unwrap();

    // Overlapping toggles: dir check covers a.cpp, then a.cpp again.
    tree.toggle(&root.join("src"));
    tree.toggle(&root.join("src/a.cpp"));
    tree.toggle(&root.join("src/a.cpp"));
    tree.toggle(&root.join("main.cpp"));

    let paths = tree.collect_checked_paths();
    let unique: HashSet<_> = paths.iter().collect();
    assert_eq!(unique.len(), paths.len(), "no duplicates");
    for p in &paths {
        assert!(tree.node(p).is_some(), "unknown path reported: {}", p.display());
    }
}

#[test]
fn checked_directory_contributes_its_own_path_not_its_files() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    mkfile(&root.join("Sources/a.cpp"));
    mkfile(&root.join("Sources/b.cpp"));

    let mut tree = FileTree::new();
    tree.set_root(root);

    // Check the directory while it is still unloaded.
    tree.toggle(&root.join("Sources"));

    let paths = tree.collect_checked_paths();
    assert_eq!(paths.len(), 1);
    assert!(paths[0].ends_with("Sources"));
}

#[test]
fn collection_preserves_discovery_order() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    mkfile(&root.join("alpha/inner.cpp"));
    mkfile(&root.join("beta.cpp"));
    mkfile(&root.join("gamma.cpp"));

    let mut tree = FileTree::new();
    tree.set_root(root);
    tree.expand(&root.join("alpha")).unwrap();

    // Check in reverse of discovery; output still follows discovery order:
    // alpha, beta.cpp, gamma.cpp were discovered before alpha/inner.cpp.
    tree.toggle(&root.join("alpha/inner.cpp"));
    tree.toggle(&root.join("gamma.cpp"));
    tree.toggle(&root.join("beta.cpp"));

    let names: Vec<String> = tree
        .collect_checked_paths()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["beta.cpp", "gamma.cpp", "inner.cpp"]);
}

#[test]
fn checked_sources_pair_paths_with_kinds() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    mkfile(&root.join("Sources/a.cpp"));
    mkfile(&root.join("main.cpp"));

    let mut tree = FileTree::new();
    tree.set_root(root);
    tree.toggle(&root.join("Sources"));
    tree.toggle(&root.join("main.cpp"));

    let sources = tree.checked_sources();
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0].kind, NodeKind::Directory);
    assert!(sources[0].path.ends_with("Sources"));
    assert_eq!(sources[1].kind, NodeKind::File);
    assert!(sources[1].path.ends_with("main.cpp"));
}

#[test]
fn nothing_checked_collects_nothing() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    mkfile(&root.join("a.cpp"));

    let mut tree = FileTree::new();
    tree.set_root(root);

    assert!(tree.collect_checked_paths().is_empty());
    assert!(tree.checked_sources().is_empty());
}
