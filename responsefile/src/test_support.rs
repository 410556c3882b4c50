//! Test-only helpers for building argument lists and response files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

/// Build an owned argument list from string literals.
pub fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

/// `@<path>` argument referencing `path`.
pub fn reference(path: &Path) -> String {
    format!("@{}", path.display())
}

/// Temporary directory for hand-written response files.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create fixture dir")?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` verbatim to `name` inside the fixture dir.
    pub fn write(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    /// Write a response file and return the `@path` argument for it.
    pub fn response_file(&self, name: &str, contents: &str) -> Result<String> {
        self.write(name, contents).map(|path| reference(&path))
    }
}
