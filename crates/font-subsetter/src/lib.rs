//! Font subsetting wrapper around hb-subset with builder pattern.
//!
//! This crate reduces a font to the glyphs needed for an explicit set of
//! characters using HarfBuzz's hb-subset library. It operates purely on byte
//! slices with no file I/O dependencies.
//!
//! # Example
//!
//! ```no_run
//! use poster_font_subsetter::Subsetter;
//!
//! let font_data: &[u8] = &[];
//! let subset = Subsetter::new()
//!     .with_chars("2024 Jan km".chars())
//!     .retain_glyph_names(true)
//!     .keep_all_layout_features(true)
//!     .keep_all_name_ids(true)
//!     .subset(font_data);
//! ```

use std::ops::RangeInclusive;

use anyhow::{Result, bail};
use hb_subset::{Blob, FontFace, Flags, SubsetInput, Tag};

/// Layout features to retain during subsetting.
///
/// Retained broadly so that kerning, ligatures, mark positioning and
/// CJK-specific forms keep working for the glyphs that survive.
pub const LAYOUT_FEATURES: &[&[u8; 4]] = &[
    b"aalt", b"ccmp", b"dlig", b"fwid", b"hwid", b"jp78", b"jp83", b"jp90", b"liga", b"locl",
    b"nlck", b"pwid", b"vert", b"vjmo", b"vrt2", b"halt", b"vhal", b"kern", b"mark", b"mkmk",
    b"calt", b"rvrn", b"clig", b"rlig", b"palt", b"vpal", b"dnom", b"numr", b"frac", b"ordn",
    b"sups", b"subs", b"sinf", b"case", b"zero", b"tnum", b"pnum", b"lnum", b"onum", b"smcp",
];

/// Name IDs HarfBuzz keeps by default (copyright through PostScript name).
pub const DEFAULT_NAME_IDS: RangeInclusive<u32> = 0..=6;

/// Font subsetter with builder pattern.
///
/// Collects the characters to keep and the subsetting options before
/// performing the subset operation.
#[derive(Default)]
pub struct Subsetter {
    chars: Vec<char>,
    retain_glyph_names: bool,
    layout_features: Vec<[u8; 4]>,
    keep_all_layout_features: bool,
    keep_all_name_ids: bool,
}

impl Subsetter {
    /// Creates a new subsetter with default settings.
    ///
    /// Default settings use the standard [`LAYOUT_FEATURES`] and do not
    /// retain glyph names. No characters are selected yet.
    pub fn new() -> Self {
        Self {
            layout_features: LAYOUT_FEATURES.iter().map(|f| **f).collect(),
            ..Default::default()
        }
    }

    /// Adds characters to keep in the subset.
    ///
    /// Duplicates are harmless; hb-subset stores them in a set.
    pub fn with_chars(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.chars.extend(chars);
        self
    }

    /// Sets whether to retain glyph names in the subset.
    ///
    /// Glyph names can be useful for debugging but increase file size.
    pub fn retain_glyph_names(mut self, retain: bool) -> Self {
        self.retain_glyph_names = retain;
        self
    }

    /// Sets the layout features to retain in the subset.
    ///
    /// Replaces any previously configured layout features.
    pub fn with_layout_features(mut self, features: impl IntoIterator<Item = [u8; 4]>) -> Self {
        self.layout_features = features.into_iter().collect();
        self
    }

    /// Keeps every layout feature of the font instead of [`LAYOUT_FEATURES`].
    ///
    /// Scripts, name languages and tables are kept wholesale as well.
    pub fn keep_all_layout_features(mut self, keep: bool) -> Self {
        self.keep_all_layout_features = keep;
        self
    }

    /// Keeps every name record instead of [`DEFAULT_NAME_IDS`].
    pub fn keep_all_name_ids(mut self, keep: bool) -> Self {
        self.keep_all_name_ids = keep;
        self
    }

    /// Subsets the font data and returns the result.
    ///
    /// Fails when no characters were selected, or when HarfBuzz cannot
    /// parse or subset the input.
    pub fn subset(&self, data: &[u8]) -> Result<Vec<u8>> {
        if self.chars.is_empty() {
            bail!("No characters selected for subsetting");
        }

        let mut input = SubsetInput::new()?;

        if self.keep_all_layout_features {
            // Selects everything; glyphs are narrowed to the requested characters below.
            input.keep_everything();
            input.unicode_set().clear();
            input.glyph_set().clear();
            *input.flags() = Flags::default();
            if !self.keep_all_name_ids {
                let mut name_ids = input.name_id_set();
                name_ids.clear();
                name_ids.insert_range(DEFAULT_NAME_IDS);
            }
        } else {
            let mut feature_set = input.layout_feature_tag_set();
            for tag in &self.layout_features {
                feature_set.insert(Tag::new(tag));
            }
        }

        if self.keep_all_name_ids {
            input.name_id_set().insert_range(0..=u32::from(u16::MAX));
        }

        if self.retain_glyph_names {
            input.flags().retain_glyph_names();
        }

        {
            let mut unicode_set = input.unicode_set();
            for c in &self.chars {
                unicode_set.insert(*c);
            }
        }

        let font = FontFace::new(Blob::from_bytes(data)?)?;
        let subset_font = input.subset_font(&font)?;
        Ok(subset_font.underlying_blob().to_vec())
    }
}
