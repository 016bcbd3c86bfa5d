//! CLI definitions and command dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::{
    args::{ConfigArgs, DocumentArgs, FontArgs, PosterArgs},
    commands::{alphabet, clean, optimize, scan, subset},
};

#[derive(Parser)]
#[command(name = "poster-font")]
#[command(about = "Shrink poster fonts to the characters they actually render")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the font to use for a poster, producing a subset if needed
    Optimize {
        #[command(flatten)]
        fonts: FontArgs,
        #[command(flatten)]
        poster: PosterArgs,
        #[command(flatten)]
        documents: DocumentArgs,
        /// Regenerate even if the subset is newer than the source
        #[arg(long)]
        force: bool,
    },
    /// Subset a font with the baseline and declared characters, ignoring the cache
    Subset {
        #[arg(required = true)]
        input: PathBuf,
        #[arg(required = true)]
        output: PathBuf,
        #[arg(long)]
        chars: Option<String>,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Print the characters rendered by SVG files
    Scan {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the planned alphabet without subsetting
    Alphabet {
        #[command(flatten)]
        config: ConfigArgs,
        #[command(flatten)]
        poster: PosterArgs,
        #[command(flatten)]
        documents: DocumentArgs,
    },
    /// Remove the subset font
    Clean {
        #[command(flatten)]
        fonts: FontArgs,
    },
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Commands::Optimize { fonts, poster, documents, force } => {
                let path = optimize(&fonts, &poster, &documents, force)?;
                println!("{}", path.display());
            }
            Commands::Subset { input, output, chars, config } => {
                let report = subset(&input, &output, chars.as_deref(), &config)?;
                println!("{} ({:.1}% smaller)", output.display(), report.reduction_percent());
            }
            Commands::Scan { files } => {
                println!("{}", scan(&files));
            }
            Commands::Alphabet { config, poster, documents } => {
                let chars = alphabet(&config, &poster, &documents)?;
                println!("{chars}");
            }
            Commands::Clean { fonts } => {
                clean(&fonts.paths())?;
            }
        }
        Ok(())
    }
}
