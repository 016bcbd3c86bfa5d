//! Subset font production commands.

use std::path::{Path, PathBuf};

use anyhow::Result;
use log::info;
use poster_font_core::{CharSet, FontOptimizer, FontPaths, OptimizeRequest, SubsetReport};

use crate::args::{ConfigArgs, DocumentArgs, FontArgs, PosterArgs};

fn request(poster: &PosterArgs, documents: &DocumentArgs) -> Result<OptimizeRequest> {
    let mut request = OptimizeRequest::new().with_documents(documents.documents()?);
    request.poster = poster.context()?;
    request.extra_chars = poster.chars.clone();
    Ok(request)
}

/// Font to use for the described poster. Only argument errors fail.
pub fn optimize(
    fonts: &FontArgs,
    poster: &PosterArgs,
    documents: &DocumentArgs,
    force: bool,
) -> Result<PathBuf> {
    let optimizer = FontOptimizer::new(fonts.paths(), fonts.load_config()?);
    let request = request(poster, documents)?.force(force);
    Ok(optimizer.optimize(&request))
}

/// Subsets `input` into `output` with the baseline, declared and extra characters.
pub fn subset(
    input: &Path,
    output: &Path,
    chars: Option<&str>,
    config: &ConfigArgs,
) -> Result<SubsetReport> {
    let optimizer = FontOptimizer::new(FontPaths::new(input, output), config.load(None)?);
    let mut request = OptimizeRequest::new();
    request.extra_chars = chars.map(str::to_string);

    let alphabet = optimizer.plan(&request);
    info!("Subsetting {} with {} characters", input.display(), alphabet.len());
    let report = optimizer.subset_with(&alphabet)?;
    report.log(input, output);
    Ok(report)
}

/// The alphabet `optimize` would hand to the subsetter.
pub fn alphabet(
    config: &ConfigArgs,
    poster: &PosterArgs,
    documents: &DocumentArgs,
) -> Result<CharSet> {
    let config = config.load(None)?;
    Ok(request(poster, documents)?.alphabet(&config))
}
