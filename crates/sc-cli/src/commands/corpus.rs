use sc_sync::{CorpusSync, SyncReport};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CorpusCommands;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `signcount corpus`.
pub async fn handle(action: &CorpusCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let sync = CorpusSync::new(&ctx.service, &ctx.config);
    match action {
        CorpusCommands::Sync { acronym, refresh } => {
            let progress = Progress::batches(&format!("syncing {acronym}"));
            let result = sync
                .with_progress(&progress)
                .sync_corpus(acronym, *refresh)
                .await;
            match result {
                Ok(report) => {
                    progress.finish_clear();
                    finish(&report, flags)
                }
                Err(error) => {
                    progress.finish_err("sync failed");
                    Err(error.into())
                }
            }
        }
        CorpusCommands::UpdateDocument { acronym, file } => {
            finish(&sync.update_document(acronym, file).await?, flags)
        }
        CorpusCommands::RemoveDocument { acronym, identifier } => {
            finish(&sync.remove_document(acronym, identifier).await?, flags)
        }
        CorpusCommands::Documents { acronym } => {
            let dataset = ctx.require_dataset(acronym).await?;
            let documents = match ctx.service.get_corpus_for_dataset(dataset.id).await? {
                Some(corpus) => ctx.service.list_documents(corpus.id).await?,
                None => Vec::new(),
            };
            output(&documents, flags.format)
        }
    }
}

fn finish(report: &SyncReport, flags: &GlobalFlags) -> anyhow::Result<()> {
    if !report.is_clean() {
        tracing::warn!(
            failed = report.files_failed.len(),
            "corpus: some files were not applied, see files_failed"
        );
    }
    if !report.metadata_errors.is_empty() {
        tracing::warn!(
            errors = report.metadata_errors.len(),
            "corpus: metadata problems, see metadata_errors"
        );
    }
    output(report, flags.format)
}
