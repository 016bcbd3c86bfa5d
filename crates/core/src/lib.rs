//! Poster Font Core - character discovery and cached font subsetting for
//! generated SVG posters.
//!
//! The characters a poster needs are collected from a baseline alphabet,
//! the user's [`FontConfig`], the poster's own data and the `<text>`
//! elements of rendered SVGs. A subset font covering them is produced
//! once and reused for as long as it is newer than the source font.

pub mod cache;
pub mod charset;
pub mod config;
pub mod delegate;
pub mod error;
pub mod inventory;
pub mod io;
pub mod optimize;
pub mod planner;
pub mod scanner;

pub use cache::CacheDecision;
pub use charset::CharSet;
pub use config::{FontConfig, FontPaths};
pub use delegate::{FontSubsetDelegate, SubsetReport, default_delegate};
pub use error::{Error, Result};
pub use optimize::{FontOptimizer, OptimizeRequest, create_optimized_font};
pub use planner::{PosterContext, SubsetPlanner};
pub use scanner::{scan_document, scan_documents, scan_text};

#[cfg(feature = "harfbuzz")]
pub use delegate::HbSubsetDelegate;
