//! Font locations and the user-editable character declaration.

use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{CharSet, Error, Result, io::FontFile};

/// Directory holding the source and subset fonts.
pub const DEFAULT_FONT_DIR: &str = "font";

/// Source font filename.
pub const SOURCE_FONT_FILENAME: &str = "LXGWWenKai-Regular.ttf";

/// Subset font filename, written next to the source.
pub const SUBSET_FONT_FILENAME: &str = "LXGWWenKai-Subset.ttf";

/// Character declaration filename looked up in the font directory.
pub const CONFIG_FILENAME: &str = "font_config.json";

/// Source font and subset artifact locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontPaths {
    pub source: PathBuf,
    pub subset: PathBuf,
}

impl FontPaths {
    pub fn new(source: impl Into<PathBuf>, subset: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            subset: subset.into(),
        }
    }

    /// Default filenames inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(SOURCE_FONT_FILENAME), dir.join(SUBSET_FONT_FILENAME))
    }

    /// Deletes the subset artifact, leaving the source alone.
    ///
    /// Returns whether a file was removed.
    pub fn remove_subset(&self) -> anyhow::Result<bool> {
        FontFile::new(&self.subset).remove()
    }
}

impl Default for FontPaths {
    fn default() -> Self {
        Self::in_dir(DEFAULT_FONT_DIR)
    }
}

/// Characters that must always be kept, regardless of any single poster.
///
/// Typically holds the characters of a user name in a non-Latin script.
/// Loaded once at startup and passed explicitly to the planner.
///
/// ```json
/// {
///   "custom_chars": "张三李四",
///   "exact_chars_only": false,
///   "additional_words": ["Strava", "Garmin"]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontConfig {
    /// Literal characters to include.
    #[serde(default)]
    pub custom_chars: String,

    /// When set, the baseline alphabet is left out and only declared,
    /// supplied and discovered characters are kept.
    #[serde(default)]
    pub exact_chars_only: bool,

    /// Words whose characters are folded into the set.
    #[serde(default)]
    pub additional_words: Vec<String>,
}

impl FontConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| Error::Config {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    }

    /// Loads `path` if given and present, otherwise returns the empty declaration.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                debug!("No font config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// The declared literal characters plus the characters of every extra word.
    ///
    /// Does not look at `exact_chars_only`; the planner honors that flag.
    pub fn declared_chars(&self) -> CharSet {
        let mut chars = CharSet::from(self.custom_chars.as_str());
        chars.add_words(&self.additional_words);
        chars
    }
}
