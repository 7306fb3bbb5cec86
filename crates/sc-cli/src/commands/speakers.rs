use anyhow::Context;
use sc_core::corpus_speaker_identifier;
use sc_parser::MetadataTable;
use sc_sync::import_speakers;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SpeakerCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `signcount speakers`.
pub async fn handle(action: &SpeakerCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        SpeakerCommands::Import { acronym, metadata } => {
            let dataset = ctx.require_dataset(acronym).await?;
            let table = MetadataTable::read(metadata, &ctx.config.counter.region_column)
                .with_context(|| format!("failed to read metadata {}", metadata.display()))?;
            let import = import_speakers(&ctx.service, &dataset, &table).await?;
            for error in &import.errors {
                tracing::warn!(%error, "speakers: row skipped");
            }
            output(&import, flags.format)
        }
        SpeakerCommands::List { acronym } => {
            let dataset = ctx.require_dataset(acronym).await?;
            let suffix = corpus_speaker_identifier("", &dataset.acronym);
            output(
                &ctx.service.list_speakers_with_suffix(&suffix).await?,
                flags.format,
            )
        }
    }
}
