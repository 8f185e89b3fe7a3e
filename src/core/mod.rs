use std::path::PathBuf;

/// What a tree node points at on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File,
}

/// UI-free representation of one discovered filesystem entry.
///
/// `path` is normalized once at discovery time and is the node's identity
/// key. `children` holds discovery order and is only populated for
/// directories that have been loaded.
#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub path: PathBuf,
    pub kind: NodeKind,
    pub checked: bool,
    pub loaded: bool,
    pub children: Vec<PathBuf>,
}

/// A checked entry paired with its kind, ready for command construction.
/// The command layer never touches the filesystem, so the tree has to say
/// whether an entry is a directory (compiled as a `*.cpp` glob) or a file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedSource {
    pub path: PathBuf,
    pub kind: NodeKind,
}

mod fs;
mod session;
mod settings;
mod shell;
mod tree;

pub use fs::*;
pub use session::*;
pub use settings::*;
pub use shell::*;
pub use tree::*;
