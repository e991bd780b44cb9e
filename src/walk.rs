use std::ffi::{OsStr, OsString};
use std::fs::FileType;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::cli::FilterSpec;
use crate::error::UsageError;
use crate::matcher::Matcher;
use crate::paths::{base_name, expand_tilde};

struct Entry {
    name: OsString,
    /// Directory after following symlinks.
    is_dir: bool,
    is_symlink: bool,
}

/// Collects every path under `directory` (itself included) whose name passes
/// `filter`, in walk order: at each level files first, then subdirectories,
/// then the contents of each subdirectory in turn.
pub fn walk(
    directory: impl AsRef<OsStr>,
    filter: &FilterSpec,
) -> Result<Vec<PathBuf>, UsageError> {
    let directory = directory.as_ref();
    let root = Path::new(directory);
    if !root.exists() {
        return Err(UsageError::DirectoryNotFound(
            directory.to_string_lossy().into_owned(),
        ));
    }

    // Expansion is reported but the walk always uses the literal argument.
    if let Some(expanded) = directory.to_str().and_then(expand_tilde) {
        debug!(
            directory = %root.display(),
            expanded = %expanded.display(),
            "tilde expansion not applied"
        );
    }

    let matcher = Matcher::new(filter)?;
    let mut paths = Vec::new();

    if matcher.is_match(base_name(directory)) {
        paths.push(root.to_path_buf());
    }
    if root.is_dir() {
        walk_dir(root, &matcher, &mut paths);
    }

    debug!(directory = %root.display(), matches = paths.len(), "walk finished");
    Ok(paths)
}

fn walk_dir(dir: &Path, matcher: &Matcher, paths: &mut Vec<PathBuf>) {
    let entries = match read_entries(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "skipping unreadable directory");
            return;
        }
    };

    let (dirs, files): (Vec<Entry>, Vec<Entry>) = entries.into_iter().partition(|e| e.is_dir);

    for entry in files.iter().chain(dirs.iter()) {
        if matcher.is_match(&entry.name) {
            paths.push(dir.join(&entry.name));
        }
    }

    for entry in dirs.iter().filter(|e| !e.is_symlink) {
        walk_dir(&dir.join(&entry.name), matcher, paths);
    }
}

/// Lists `dir`. Only failing to open it is an error; a bad entry is warned
/// about and skipped, and an entry whose type can't be read counts as a file.
fn read_entries(dir: &Path) -> std::io::Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(path = %dir.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();
        let (is_dir, is_symlink) = classify(entry.file_type(), &path);
        entries.push(Entry {
            name: entry.file_name(),
            is_dir,
            is_symlink,
        });
    }
    Ok(entries)
}

/// `(is_dir, is_symlink)` for an entry. Symlinks are followed for `is_dir`.
fn classify(file_type: std::io::Result<FileType>, path: &Path) -> (bool, bool) {
    match file_type {
        Ok(ft) if ft.is_symlink() => (path.is_dir(), true),
        Ok(ft) => (ft.is_dir(), false),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "unknown entry type, treating as file");
            (false, false)
        }
    }
}
