//! Argument groups shared by several commands.

use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use poster_font_core::{
    FontConfig, FontPaths, PosterContext,
    config::{CONFIG_FILENAME, DEFAULT_FONT_DIR, SOURCE_FONT_FILENAME, SUBSET_FONT_FILENAME},
    io::glob_documents,
};

const DEFAULT_SVG_GLOB: &str = "*.svg";

#[derive(Debug, Clone, clap::Args)]
pub struct FontArgs {
    #[arg(long, default_value = DEFAULT_FONT_DIR)]
    pub font_dir: PathBuf,
    /// Source font, relative to the font directory
    #[arg(long, default_value = SOURCE_FONT_FILENAME)]
    pub source: PathBuf,
    /// Subset font, relative to the font directory
    #[arg(long, default_value = SUBSET_FONT_FILENAME)]
    pub subset: PathBuf,
    #[command(flatten)]
    pub config: ConfigArgs,
}

impl FontArgs {
    pub fn paths(&self) -> FontPaths {
        FontPaths::new(self.font_dir.join(&self.source), self.font_dir.join(&self.subset))
    }

    /// Explicit `--config`, or the declaration file inside the font directory.
    pub fn load_config(&self) -> Result<FontConfig> {
        let fallback = self.font_dir.join(CONFIG_FILENAME);
        self.config.load(Some(&fallback))
    }
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// JSON file declaring characters that are always kept
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ConfigArgs {
    pub fn load(&self, fallback: Option<&Path>) -> Result<FontConfig> {
        // An explicitly named config has to exist.
        match &self.config {
            Some(explicit) => Ok(FontConfig::load(explicit)?),
            None => Ok(FontConfig::load_or_default(fallback)?),
        }
    }
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct PosterArgs {
    /// JSON file with `years`, `type_list` and `units`
    #[arg(long)]
    pub poster: Option<PathBuf>,
    #[arg(long = "year")]
    pub years: Vec<i32>,
    #[arg(long = "type")]
    pub types: Vec<String>,
    #[arg(long)]
    pub units: Option<String>,
    /// Extra characters to keep
    #[arg(long)]
    pub chars: Option<String>,
}

impl PosterArgs {
    /// The poster described by `--poster` extended with the inline flags.
    ///
    /// `None` when neither was given.
    pub fn context(&self) -> Result<Option<PosterContext>> {
        let mut context = match &self.poster {
            Some(path) => {
                let text = read_to_string(path)
                    .with_context(|| format!("Failed to read poster: {}", path.display()))?;
                serde_json::from_str::<PosterContext>(&text)
                    .with_context(|| format!("Invalid poster: {}", path.display()))?
            }
            None if self.years.is_empty() && self.types.is_empty() && self.units.is_none() => {
                return Ok(None);
            }
            None => PosterContext::new(),
        };

        if !self.years.is_empty() {
            context.years.get_or_insert_with(Vec::new).extend(&self.years);
        }
        if !self.types.is_empty() {
            context.type_list.get_or_insert_with(Vec::new).extend(self.types.iter().cloned());
        }
        if let Some(units) = &self.units {
            context.units = Some(units.clone());
        }
        Ok(Some(context))
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct DocumentArgs {
    /// Rendered SVG whose text must be covered
    #[arg(long = "svg")]
    pub svgs: Vec<PathBuf>,
    /// Directory searched with --svg-glob
    #[arg(long)]
    pub svg_dir: Option<PathBuf>,
    #[arg(long, default_value = DEFAULT_SVG_GLOB)]
    pub svg_glob: String,
}

impl Default for DocumentArgs {
    fn default() -> Self {
        Self {
            svgs: Vec::new(),
            svg_dir: None,
            svg_glob: DEFAULT_SVG_GLOB.into(),
        }
    }
}

impl DocumentArgs {
    pub fn documents(&self) -> Result<Vec<PathBuf>> {
        let mut documents = self.svgs.clone();
        if let Some(dir) = &self.svg_dir {
            documents.extend(glob_documents(dir, &self.svg_glob)?);
        }
        Ok(documents)
    }
}
