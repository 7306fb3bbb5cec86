use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::{CorpusCommands, DatasetCommands, GlossCommands, SpeakerCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Count gloss frequencies in annotation files without touching the database.
    Count(CountArgs),
    /// Datasets.
    Dataset {
        #[command(subcommand)]
        action: DatasetCommands,
    },
    /// Dictionary glosses.
    Gloss {
        #[command(subcommand)]
        action: GlossCommands,
    },
    /// Corpus speakers.
    Speakers {
        #[command(subcommand)]
        action: SpeakerCommands,
    },
    /// Corpus documents and frequency records.
    Corpus {
        #[command(subcommand)]
        action: CorpusCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct CountArgs {
    /// Tab-separated participant metadata.
    #[arg(short, long)]
    pub metadata: PathBuf,

    /// Minimum overlap in milliseconds for two-handed annotations to merge.
    #[arg(short = 'o', long)]
    pub overlap: u64,

    /// Write CSV to this path instead of printing JSON.
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Annotation files or directories to search for them.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
}
