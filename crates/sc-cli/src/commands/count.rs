use anyhow::Context;
use sc_config::SignConfig;
use sc_counter::export::write_csv;
use sc_counter::{CounterOptions, SignCounter, expand_inputs, summarize};
use sc_parser::MetadataTable;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CountArgs;
use crate::output::output;
use crate::progress::Progress;

/// Handle `signcount count`. Never opens the database.
pub fn handle(args: &CountArgs, config: &SignConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let metadata = MetadataTable::read(&args.metadata, &config.counter.region_column)
        .with_context(|| format!("failed to read metadata {}", args.metadata.display()))?;

    let mut options = CounterOptions::from_config(&config.counter)?;
    options.minimum_overlap = args.overlap;
    let counter = SignCounter::new(options, metadata);

    let files = expand_inputs(&args.inputs, &config.corpus.extension)?;
    let progress = Progress::spinner(&format!("counting {} files", files.len()));
    let (tables, skipped) = counter.count_available(&files);
    progress.finish_clear();
    if skipped.len() == files.len() {
        anyhow::bail!("none of the {} input files could be parsed", files.len());
    }
    if !skipped.is_empty() {
        tracing::warn!(
            skipped = skipped.len(),
            counted = files.len() - skipped.len(),
            "count: some files were skipped"
        );
    }
    let summaries = summarize(&tables);

    match &args.csv {
        Some(path) => {
            write_csv(&summaries, path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(glosses = summaries.len(), path = %path.display(), "count: csv written");
            Ok(())
        }
        None => output(&summaries, flags.format),
    }
}
