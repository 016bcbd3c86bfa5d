//! The glyph-table subsetting capability behind the optimizer.

use std::{path::Path, sync::Once};

use anyhow::Context;
use log::{info, warn};
use read_fonts::{FontRef, TableProvider};

use crate::{CharSet, Result};

static UNAVAILABLE_WARNING: Once = Once::new();

/// Produces a font at `target` that covers at least `alphabet`.
///
/// Implementations report every failure (missing source, unparseable font,
/// write error) through the returned `Result`; they must not panic.
pub trait FontSubsetDelegate {
    fn subset(&self, source: &Path, target: &Path, alphabet: &CharSet) -> Result<SubsetReport>;
}

/// Size statistics of one successful subsetting run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubsetReport {
    pub original_bytes: u64,
    pub subset_bytes: u64,
    pub char_count: usize,
    pub glyph_count: Option<u16>,
}

impl SubsetReport {
    pub fn reduction_percent(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        (1.0 - self.subset_bytes as f64 / self.original_bytes as f64) * 100.0
    }

    pub fn log(&self, source: &Path, target: &Path) {
        info!(
            "Subset {} -> {} ({} bytes -> {} bytes, {:.1}% reduction)",
            source.file_name().unwrap_or_default().to_string_lossy(),
            target.file_name().unwrap_or_default().to_string_lossy(),
            self.original_bytes,
            self.subset_bytes,
            self.reduction_percent()
        );
        match self.glyph_count {
            Some(glyphs) => info!("  Characters included: {} ({glyphs} glyphs)", self.char_count),
            None => info!("  Characters included: {}", self.char_count),
        }
    }
}

/// Parses `data` as an OpenType font and returns its glyph count.
pub fn font_glyph_count(data: &[u8]) -> anyhow::Result<u16> {
    let font = FontRef::new(data).context("Failed to parse font")?;
    let maxp = font.maxp().context("Failed to read maxp table")?;
    Ok(maxp.num_glyphs())
}

/// Emits the "subsetting unavailable" warning, at most once per process.
pub fn warn_unavailable() {
    UNAVAILABLE_WARNING.call_once(|| {
        warn!("Font subsetting is not available in this build; the original font will be used");
    });
}

/// The delegate compiled into this build, if any.
pub fn default_delegate() -> Option<Box<dyn FontSubsetDelegate>> {
    #[cfg(feature = "harfbuzz")]
    {
        Some(Box::new(hb::HbSubsetDelegate::new()))
    }
    #[cfg(not(feature = "harfbuzz"))]
    {
        warn_unavailable();
        None
    }
}

#[cfg(feature = "harfbuzz")]
pub use hb::HbSubsetDelegate;

#[cfg(feature = "harfbuzz")]
mod hb {
    use std::path::Path;

    use poster_font_subsetter::Subsetter;

    use super::{FontSubsetDelegate, SubsetReport, font_glyph_count};
    use crate::{CharSet, Error, Result, io::FontFile};

    /// Subsets with HarfBuzz, keeping glyph names, every layout feature and
    /// every name record.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct HbSubsetDelegate;

    impl HbSubsetDelegate {
        pub fn new() -> Self {
            Self
        }
    }

    impl FontSubsetDelegate for HbSubsetDelegate {
        fn subset(
            &self,
            source: &Path,
            target: &Path,
            alphabet: &CharSet,
        ) -> Result<SubsetReport> {
            let source_file = FontFile::new(source);
            if !source_file.exists() {
                return Err(Error::MissingInput(source.to_path_buf()));
            }

            let data = source_file.read().map_err(Error::DelegateFailure)?;
            font_glyph_count(&data).map_err(Error::DelegateFailure)?;

            let subset_data = Subsetter::new()
                .with_chars(alphabet.iter())
                .retain_glyph_names(true)
                .keep_all_layout_features(true)
                .keep_all_name_ids(true)
                .subset(&data)
                .map_err(Error::DelegateFailure)?;

            let target_file = FontFile::new(target);
            target_file.ensure_parent_dir().map_err(Error::DelegateFailure)?;
            target_file.write_atomic(&subset_data).map_err(Error::DelegateFailure)?;

            Ok(SubsetReport {
                original_bytes: data.len() as u64,
                subset_bytes: subset_data.len() as u64,
                char_count: alphabet.len(),
                glyph_count: font_glyph_count(&subset_data).ok(),
            })
        }
    }
}
