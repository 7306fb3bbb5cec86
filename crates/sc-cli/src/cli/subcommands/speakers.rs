use std::path::PathBuf;

use clap::Subcommand;

#[derive(Clone, Debug, Subcommand)]
pub enum SpeakerCommands {
    /// Create or update the corpus speakers listed in a metadata file.
    Import {
        acronym: String,
        /// Tab-separated participant metadata.
        metadata: PathBuf,
    },
    /// List the speakers of a dataset's corpus.
    List { acronym: String },
}
