use anyhow::Context;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::GlossCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `signcount gloss`.
pub async fn handle(action: &GlossCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        GlossCommands::Add {
            dataset,
            lemma,
            annotation,
            language,
        } => {
            let dataset = ctx.require_dataset(dataset).await?;
            let language = language.as_deref().unwrap_or(&dataset.default_language);
            let gloss = ctx.service.create_gloss(Some(dataset.id), *lemma).await?;
            ctx.service
                .set_gloss_annotation(gloss.id, language, annotation)
                .await?;
            if lemma.is_none() {
                tracing::warn!(gloss = gloss.id, "gloss: no lemma, tokens will not be counted for it");
            }
            output(
                &json!({
                    "gloss": gloss,
                    "annotations": ctx.service.gloss_annotations(gloss.id).await?,
                }),
                flags.format,
            )
        }
        GlossCommands::Show { id } => {
            let gloss = ctx
                .service
                .get_gloss(*id)
                .await?
                .with_context(|| format!("gloss {id} not found"))?;
            output(
                &json!({
                    "gloss": gloss,
                    "annotations": ctx.service.gloss_annotations(gloss.id).await?,
                    "frequencies": ctx.service.gloss_frequencies(gloss.id).await?,
                }),
                flags.format,
            )
        }
    }
}
