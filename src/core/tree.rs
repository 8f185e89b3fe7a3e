use crate::core::{DirEntryInfo, Node, NodeKind, SelectedSource, normalize_path, read_dir_sorted};
use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
};

/* ============================ Lazy file tree =============================== */

/// Lazily populated view of a filesystem subtree with per-node check state.
///
/// Nodes live in an arena keyed by normalized path; parent/child links are
/// the recorded `children` lists, so re-rooting is a plain clear with no
/// dangling references. A directory's children are enumerated only on first
/// expansion. Not thread-safe for concurrent mutation; callers drive it
/// from a single event loop.
#[derive(Debug, Default)]
pub struct FileTree {
    root: Option<PathBuf>,
    nodes: HashMap<PathBuf, Node>,
    discovery_order: Vec<PathBuf>,
}

impl FileTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn root_path(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    #[must_use]
    pub fn node(&self, path: &Path) -> Option<&Node> {
        self.nodes.get(&normalize_path(path))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Replace the whole tree with a new root and its immediate children.
    ///
    /// Returns `false` without touching existing state when `path` is not
    /// an accessible directory; the caller decides how to surface that.
    pub fn set_root(&mut self, path: &Path) -> bool {
        let root = normalize_path(path);
        let Ok(entries) = read_dir_sorted(&root) else {
            return false;
        };

        self.nodes.clear();
        self.discovery_order.clear();

        let name = root
            .file_name()
            .map_or_else(|| root.to_string_lossy().into_owned(), |n| {
                n.to_string_lossy().into_owned()
            });
        self.insert_node(Node {
            name,
            path: root.clone(),
            kind: NodeKind::Directory,
            checked: false,
            loaded: true,
            children: Vec::new(),
        });
        let children = self.insert_children(entries, false);
        if let Some(n) = self.nodes.get_mut(&root) {
            n.children = children;
        }

        self.root = Some(root);
        true
    }

    /// Enumerate an unloaded directory's children, each inheriting the
    /// directory's *current* checked value. No-op for loaded directories,
    /// files, and unknown paths. On enumeration failure the node stays
    /// unloaded so the caller can retry.
    pub fn expand(&mut self, path: &Path) -> io::Result<()> {
        let path = normalize_path(path);
        let inherit = match self.nodes.get(&path) {
            Some(n) if n.kind == NodeKind::Directory && !n.loaded => n.checked,
            _ => return Ok(()),
        };

        let entries = read_dir_sorted(&path)?;
        let children = self.insert_children(entries, inherit);
        if let Some(n) = self.nodes.get_mut(&path) {
            n.children = children;
            n.loaded = true;
        }
        Ok(())
    }

    /// Flip a node's checked flag. Directories overwrite every currently
    /// loaded descendant with the new value; a child's prior individual
    /// state is lost. Unknown paths are ignored.
    pub fn toggle(&mut self, path: &Path) {
        let path = normalize_path(path);
        if let Some(n) = self.nodes.get(&path) {
            let value = !n.checked;
            self.apply_checked(&path, value);
        }
    }

    /// Same propagation semantics as [`FileTree::toggle`], with an explicit
    /// target value. Used by selection restore.
    pub fn set_checked(&mut self, path: &Path, value: bool) {
        let path = normalize_path(path);
        if self.nodes.contains_key(&path) {
            self.apply_checked(&path, value);
        }
    }

    /// Every checked path, deduplicated, in discovery order. Checked
    /// directories contribute their own path; the command layer decides
    /// how to interpret them.
    #[must_use]
    pub fn collect_checked_paths(&self) -> Vec<PathBuf> {
        self.discovery_order
            .iter()
            .filter(|p| self.nodes.get(*p).is_some_and(|n| n.checked))
            .cloned()
            .collect()
    }

    /// [`FileTree::collect_checked_paths`] paired with each node's kind,
    /// for handing straight to command construction.
    #[must_use]
    pub fn checked_sources(&self) -> Vec<SelectedSource> {
        self.discovery_order
            .iter()
            .filter_map(|p| self.nodes.get(p))
            .filter(|n| n.checked)
            .map(|n| SelectedSource {
                path: n.path.clone(),
                kind: n.kind,
            })
            .collect()
    }

    /// Re-check a previously saved set of paths, force-expanding any
    /// unloaded ancestor directories on the way down. Paths that vanished,
    /// or that fall outside the current root, are silently skipped.
    pub fn restore_checked<I, P>(&mut self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let Some(root) = self.root.clone() else {
            return;
        };

        for path in paths {
            let target = normalize_path(path.as_ref());
            if !target.exists() {
                continue;
            }
            let Ok(rel) = target.strip_prefix(&root) else {
                continue;
            };

            let mut cursor = root.clone();
            for comp in rel.components() {
                if self
                    .nodes
                    .get(&cursor)
                    .is_some_and(|n| n.kind == NodeKind::Directory && !n.loaded)
                {
                    // A failed expansion just drops this path, like a
                    // vanished one.
                    let _ = self.expand(&cursor);
                }
                cursor.push(comp);
            }

            if self.nodes.contains_key(&cursor) {
                self.apply_checked(&cursor, true);
            }
        }
    }

    fn apply_checked(&mut self, path: &Path, value: bool) {
        let children = match self.nodes.get_mut(path) {
            Some(n) => {
                n.checked = value;
                if n.kind == NodeKind::Directory {
                    n.children.clone()
                } else {
                    Vec::new()
                }
            }
            None => return,
        };
        for child in children {
            self.apply_checked(&child, value);
        }
    }

    fn insert_children(
        &mut self,
        entries: Vec<DirEntryInfo>,
        inherit_checked: bool,
    ) -> Vec<PathBuf> {
        let mut children = Vec::with_capacity(entries.len());
        for entry in entries {
            children.push(entry.path.clone());
            self.insert_node(Node {
                name: entry.name,
                path: entry.path,
                kind: entry.kind,
                checked: inherit_checked,
                loaded: false,
                children: Vec::new(),
            });
        }
        children
    }

    fn insert_node(&mut self, node: Node) {
        if !self.nodes.contains_key(&node.path) {
            self.discovery_order.push(node.path.clone());
        }
        self.nodes.insert(node.path.clone(), node);
    }
}
