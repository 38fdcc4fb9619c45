//! core::files
//!
//! Collect every regular file below a directory.
//!
//! The walk uses an explicit stack instead of recursion, and reads
//! directories through the [`DirLister`] trait so tests can supply an
//! in-memory tree.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Kind of a directory entry. Symlinks are reported as `Other` and not
/// followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Other,
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// Source of directory listings.
pub trait DirLister {
    /// Whether `dir` exists and is a directory.
    fn is_dir(&self, dir: &Path) -> bool;

    /// List the immediate children of `dir`.
    fn list(&self, dir: &Path) -> io::Result<Vec<DirEntryInfo>>;
}

/// Lists directories on the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLister;

impl DirLister for FsLister {
    fn is_dir(&self, dir: &Path) -> bool {
        dir.is_dir()
    }

    fn list(&self, dir: &Path) -> io::Result<Vec<DirEntryInfo>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            let kind = if file_type.is_file() {
                EntryKind::File
            } else if file_type.is_dir() {
                EntryKind::Dir
            } else {
                EntryKind::Other
            };
            entries.push(DirEntryInfo {
                path: entry.path(),
                kind,
            });
        }
        Ok(entries)
    }
}

/// Collect the paths of all regular files below `root`, sorted.
///
/// A missing `root` yields an empty list.
///
/// # Errors
///
/// Returns the first I/O error reported by the lister.
pub fn collect_files(root: &Path, lister: &dyn DirLister) -> io::Result<Vec<PathBuf>> {
    if !lister.is_dir(root) {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in lister.list(&dir)? {
            match entry.kind {
                EntryKind::File => files.push(entry.path),
                EntryKind::Dir => pending.push(entry.path),
                EntryKind::Other => {}
            }
        }
    }
    files.sort();
    Ok(files)
}
