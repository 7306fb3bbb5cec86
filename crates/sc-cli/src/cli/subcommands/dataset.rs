use clap::Subcommand;

#[derive(Clone, Debug, Subcommand)]
pub enum DatasetCommands {
    /// Create a dataset.
    Create {
        /// Dataset acronym, e.g. NGT.
        acronym: String,
        /// Default language for gloss annotations.
        #[arg(long)]
        language: String,
    },
    /// Show one dataset.
    Show { acronym: String },
    /// List datasets.
    List,
}
