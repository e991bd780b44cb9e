#![cfg(test)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        std::fs::create_dir_all(dir.path().join("t")).unwrap();
        Self { dir }
    }

    /// The walk root, `<tmp>/t`.
    pub fn root(&self) -> PathBuf {
        self.dir.path().join("t")
    }

    pub fn root_str(&self) -> String {
        self.root().to_str().expect("temp path is not UTF-8").to_string()
    }

    /// Creates a file (and its parents) at `rel` under the root.
    pub fn file(&self, rel: &str) -> PathBuf {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, rel).expect("failed to write file");
        path
    }

    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.root().join(rel);
        std::fs::create_dir_all(&path).expect("failed to create dir");
        path
    }

    /// `t/a.txt`, `t/b.log`, `t/sub/a.txt`.
    pub fn sample() -> Self {
        let tree = Self::new();
        tree.file("a.txt");
        tree.file("b.log");
        tree.file("sub/a.txt");
        tree
    }
}

pub fn sorted(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut v = paths.to_vec();
    v.sort();
    v
}

pub fn rel<'a>(root: &Path, paths: &'a [PathBuf]) -> Vec<&'a Path> {
    paths
        .iter()
        .map(|p| p.strip_prefix(root).unwrap_or(p))
        .collect()
}
