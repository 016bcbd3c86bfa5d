use std::path::PathBuf;

use poster_font_core::{CharSet, scan_documents};

/// Distinct characters across all `files`; missing files contribute nothing.
pub fn scan(files: &[PathBuf]) -> CharSet {
    scan_documents(files)
}
