use std::path::PathBuf;

use clap::Subcommand;

#[derive(Clone, Debug, Subcommand)]
pub enum CorpusCommands {
    /// Bring the corpus in line with its folder of annotation files.
    Sync {
        acronym: String,
        /// Reprocess every file, not only new and changed ones.
        #[arg(long)]
        refresh: bool,
    },
    /// Reprocess one known document.
    UpdateDocument { acronym: String, file: PathBuf },
    /// Remove one document and its frequency records.
    RemoveDocument { acronym: String, identifier: String },
    /// List the documents of a corpus.
    Documents { acronym: String },
}
