use nopaste::core::FileTree;
use proptest::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn mkfile(p: &Path) {
    fs::create_dir_all(p.parent().unwrap()).unwrap();
    fs::write(p, "x").unwrap();
}

// A fixed little project; ops pick targets out of this list by index.
fn build_project(root: &Path) -> Vec<PathBuf> {
    mkfile(&root.join("main.cpp"));
    mkfile(&root.join("Sources/game.cpp"));
    mkfile(&root.join("Sources/engine/core.cpp"));
    mkfile(&root.join("Headers/game.h"));
    vec![
        root.to_path_buf(),
        root.join("main.cpp"),
        root.join("Sources"),
        root.join("Sources/game.cpp"),
        root.join("Sources/engine"),
        root.join("Sources/engine/core.cpp"),
        root.join("Headers"),
        root.join("Headers/game.h"),
    ]
}

#[derive(Clone, Copy, Debug)]
enum Op {
    Expand,
    Toggle,
    Check,
    Uncheck,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Expand),
        Just(Op::Toggle),
        Just(Op::Check),
        Just(Op::Uncheck),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // For any sequence of expand/toggle calls, collect_checked_paths()
    // returns no duplicates and only paths the tree actually knows.
    #[test]
    fn checked_paths_stay_unique_and_known(
        ops in prop::collection::vec((op(), 0usize..8), 0..40),
    ) {
        let tmp = TempDir::new().unwrap();
        let targets = build_project(tmp.path());

        let mut tree = FileTree::new();
        prop_assert!(tree.set_root(tmp.path()));

        for (op, idx) in ops {
            let target = &targets[idx];
            match op {
                Op::Expand => { let _ = tree.expand(target); }
                Op::Toggle => tree.toggle(target),
                Op::Check => tree.set_checked(target, true),
                Op::Uncheck => tree.set_checked(target, false),
            }
        }

        let collected = tree.collect_checked_paths();
        let unique: HashSet<_> = collected.iter().collect();
        prop_assert_eq!(unique.len(), collected.len(), "duplicates reported");
        for p in &collected {
            prop_assert!(tree.node(p).is_some(), "unknown path: {}", p.display());
        }
    }

    // Checking a directory then expanding a child always leaves the child
    // checked, regardless of what happened before.
    #[test]
    fn late_expansion_inherits_a_checked_parent(
        ops in prop::collection::vec((op(), 0usize..8), 0..20),
    ) {
        let tmp = TempDir::new().unwrap();
        let targets = build_project(tmp.path());

        let mut tree = FileTree::new();
        prop_assert!(tree.set_root(tmp.path()));

        for (op, idx) in ops {
            let target = &targets[idx];
            match op {
                Op::Expand => { let _ = tree.expand(target); }
                Op::Toggle => tree.toggle(target),
                Op::Check => tree.set_checked(target, true),
                Op::Uncheck => tree.set_checked(target, false),
            }
        }

        let sources = tmp.path().join("Sources");
        tree.set_checked(&sources, true);
        tree.expand(&sources).unwrap();
        tree.expand(&sources.join("engine")).unwrap();

        for p in [
            sources.join("game.cpp"),
            sources.join("engine"),
            sources.join("engine/core.cpp"),
        ] {
            prop_assert!(
                tree.node(&p).is_some_and(|n| n.checked),
                "descendant not checked after parent check + expand: {}",
                p.display()
            );
        }
    }
}
