//! Error types for font optimization.

use std::{io, path::PathBuf, result};

/// Errors that can occur while planning or producing a subset font.
///
/// None of these escape [`crate::FontOptimizer::optimize`]; they are logged
/// there and replaced by the source font path.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("font file not found: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("font subsetting is not available in this build")]
    DelegateUnavailable,

    #[error("error creating font subset: {0:#}")]
    DelegateFailure(anyhow::Error),

    #[error("invalid font config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = result::Result<T, Error>;
