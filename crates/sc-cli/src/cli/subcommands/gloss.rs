use clap::Subcommand;

#[derive(Clone, Debug, Subcommand)]
pub enum GlossCommands {
    /// Add a gloss with one annotation.
    Add {
        /// Dataset acronym.
        #[arg(long)]
        dataset: String,
        /// Lemma id. Glosses without one are never counted.
        #[arg(long)]
        lemma: Option<i64>,
        /// Annotation text.
        #[arg(long)]
        annotation: String,
        /// Annotation language (defaults to the dataset's language).
        #[arg(long)]
        language: Option<String>,
    },
    /// Show a gloss, its annotations, and its frequency records.
    Show { id: i64 },
}
