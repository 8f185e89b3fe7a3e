use crate::core::NodeKind;
use std::{
    fs, io,
    path::{Component, Path, PathBuf},
};

/* =========================== Filesystem & paths ============================ */

/// Normalize a path into the form used as a tree identity key.
///
/// Canonicalizes when the path exists (without UNC verbatim prefixes on
/// Windows); otherwise collapses `.`/`..` components lexically so equal
/// spellings compare equal.
#[must_use]
pub fn normalize_path(p: &Path) -> PathBuf {
    if p.as_os_str().is_empty() {
        return PathBuf::new();
    }

    if let Ok(c) = dunce::canonicalize(p) {
        return c;
    }

    let mut out = PathBuf::new();
    for comp in p.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// One directory entry as the tree will ingest it.
#[derive(Clone, Debug)]
pub struct DirEntryInfo {
    pub name: String,
    pub path: PathBuf,
    pub kind: NodeKind,
}

/// Enumerate the immediate children of `dir` in display order:
/// directories first, then files, both case-insensitive alphabetical.
///
/// Entries whose metadata cannot be read are listed as files rather than
/// dropped; only the `read_dir` itself failing (permission denied,
/// vanished directory) is an error for the caller.
pub fn read_dir_sorted(dir: &Path) -> io::Result<Vec<DirEntryInfo>> {
    let mut dirs: Vec<DirEntryInfo> = Vec::new();
    let mut files: Vec<DirEntryInfo> = Vec::new();

    for ent in fs::read_dir(dir)?.flatten() {
        let name = ent.file_name().to_string_lossy().into_owned();
        let is_dir = ent.file_type().map(|ft| ft.is_dir()).unwrap_or(false);
        let info = DirEntryInfo {
            name,
            path: ent.path(),
            kind: if is_dir {
                NodeKind::Directory
            } else {
                NodeKind::File
            },
        };
        if is_dir {
            dirs.push(info);
        } else {
            files.push(info);
        }
    }

    dirs.sort_by_key(|e| e.name.to_lowercase());
    files.sort_by_key(|e| e.name.to_lowercase());

    dirs.extend(files);
    Ok(dirs)
}
