//! Time-based validity of a previously produced subset font.

use crate::{FontPaths, io::FontFile};

/// Whether an existing subset artifact can be handed out again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheDecision {
    Reuse,
    Regenerate,
}

impl CacheDecision {
    /// Reuse iff both fonts exist and the subset is not older than the source.
    ///
    /// Only modification times are compared. An artifact produced for a
    /// different alphabet is still reused.
    pub fn evaluate(paths: &FontPaths) -> Self {
        let source = FontFile::new(&paths.source);
        let subset = FontFile::new(&paths.subset);
        if !source.exists() || !subset.exists() {
            return Self::Regenerate;
        }

        match (subset.modified(), source.modified()) {
            (Ok(subset_time), Ok(source_time)) if subset_time >= source_time => Self::Reuse,
            _ => Self::Regenerate,
        }
    }

    pub fn is_reuse(self) -> bool {
        self == Self::Reuse
    }
}
