use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DatasetCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `signcount dataset`.
pub async fn handle(action: &DatasetCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        DatasetCommands::Create { acronym, language } => {
            let dataset = ctx.service.create_dataset(acronym, language).await?;
            output(&dataset, flags.format)
        }
        DatasetCommands::Show { acronym } => show(acronym, ctx, flags).await,
        DatasetCommands::List => output(&ctx.service.list_datasets().await?, flags.format),
    }
}

async fn show(acronym: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let dataset = ctx.require_dataset(acronym).await?;
    let corpus = ctx.service.get_corpus_for_dataset(dataset.id).await?;
    let documents = match &corpus {
        Some(corpus) => ctx.service.list_documents(corpus.id).await?.len(),
        None => 0,
    };
    let speakers = ctx
        .service
        .list_speakers_with_suffix(&sc_core::corpus_speaker_identifier("", &dataset.acronym))
        .await?
        .len();

    output(
        &json!({
            "dataset": dataset,
            "corpus": corpus,
            "documents": documents,
            "speakers": speakers,
        }),
        flags.format,
    )
}
