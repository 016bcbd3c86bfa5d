//! Shared font and document I/O utilities.

use std::{
    fs::{create_dir_all, metadata, read, remove_file, write},
    io::Write,
    path::{Path, PathBuf},
    time::SystemTime,
};

use anyhow::{Context, Result};
use glob::glob;
use tempfile::NamedTempFile;

#[derive(Debug, Clone)]
pub struct FontFile {
    path: PathBuf,
}

impl FontFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn read(&self) -> Result<Vec<u8>> {
        read(&self.path).with_context(|| format!("Failed to read font: {}", self.path.display()))
    }

    pub fn write(&self, data: impl AsRef<[u8]>) -> Result<()> {
        write(&self.path, data)
            .with_context(|| format!("Failed to write font: {}", self.path.display()))
    }

    /// Writes into a sibling temporary file and renames it over the target.
    ///
    /// A failed write leaves any previous file at the path untouched.
    pub fn write_atomic(&self, data: impl AsRef<[u8]>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
        temp.write_all(data.as_ref())
            .with_context(|| format!("Failed to write font: {}", self.path.display()))?;
        temp.persist(&self.path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to write font: {}", self.path.display()))?;
        Ok(())
    }

    pub fn modified(&self) -> Result<SystemTime> {
        metadata(&self.path)
            .and_then(|m| m.modified())
            .with_context(|| format!("Failed to stat font: {}", self.path.display()))
    }

    pub fn size(&self) -> Result<u64> {
        Ok(metadata(&self.path)
            .with_context(|| format!("Failed to stat font: {}", self.path.display()))?
            .len())
    }

    pub fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        Ok(())
    }

    /// Removes the file; returns false if there was nothing to remove.
    pub fn remove(&self) -> Result<bool> {
        if !self.exists() {
            return Ok(false);
        }
        remove_file(&self.path)
            .with_context(|| format!("Failed to remove font: {}", self.path.display()))?;
        Ok(true)
    }
}

impl AsRef<Path> for FontFile {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Find documents matching a glob pattern in a directory.
pub fn glob_documents(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let pattern = dir.join(pattern);
    let pattern_str = pattern.to_str().context("Invalid pattern path")?;
    let mut paths: Vec<_> = glob(pattern_str)
        .with_context(|| format!("Failed to glob pattern: {pattern_str}"))?
        .filter_map(Result::ok)
        .collect();
    paths.sort();
    Ok(paths)
}
