//! Gloss token resolution.
//!
//! A token from an annotation is first tried as a gloss id, then as
//! annotation text in the dataset's default language (ASCII case ignored).

use std::collections::{BTreeMap, BTreeSet};

use sc_core::entities::{Dataset, Gloss};
use sc_db::CorpusService;
use sc_db::error::DatabaseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlossResolution {
    InDataset(Gloss),
    /// The token names a gloss of a different dataset.
    OtherDataset(Gloss),
    Unresolved,
}

/// Resolve one token against `dataset`.
///
/// # Errors
///
/// Returns `DatabaseError` if a lookup fails.
pub async fn resolve_gloss(
    service: &CorpusService,
    dataset: &Dataset,
    token: &str,
) -> Result<GlossResolution, DatabaseError> {
    if let Ok(id) = token.trim().parse::<i64>() {
        if let Some(gloss) = service.get_gloss(id).await? {
            return Ok(classify(dataset, gloss));
        }
    }

    let mut matches = service
        .find_glosses_by_annotation(dataset.id, &dataset.default_language, token)
        .await?;
    if matches.len() > 1 {
        tracing::warn!(
            token,
            candidates = ?matches.iter().map(|g| g.id).collect::<Vec<_>>(),
            "resolve: ambiguous annotation text, using first gloss"
        );
    }
    if matches.is_empty() {
        return Ok(GlossResolution::Unresolved);
    }
    Ok(classify(dataset, matches.swap_remove(0)))
}

fn classify(dataset: &Dataset, gloss: Gloss) -> GlossResolution {
    if !gloss.is_linked() {
        GlossResolution::Unresolved
    } else if gloss.dataset_id == Some(dataset.id) {
        GlossResolution::InDataset(gloss)
    } else {
        GlossResolution::OtherDataset(gloss)
    }
}

/// Resolution of every token of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedTokens {
    pub in_dataset: BTreeMap<String, Gloss>,
    pub not_found: BTreeSet<String>,
    pub other_dataset: BTreeSet<String>,
}

/// Resolve each distinct token once.
///
/// # Errors
///
/// Returns `DatabaseError` if a lookup fails.
pub async fn resolve_tokens<'a>(
    service: &CorpusService,
    dataset: &Dataset,
    tokens: impl IntoIterator<Item = &'a String>,
) -> Result<ResolvedTokens, DatabaseError> {
    let mut resolved = ResolvedTokens::default();
    for token in tokens {
        match resolve_gloss(service, dataset, token).await? {
            GlossResolution::InDataset(gloss) => {
                resolved.in_dataset.insert(token.clone(), gloss);
            }
            GlossResolution::OtherDataset(_) => {
                resolved.other_dataset.insert(token.clone());
            }
            GlossResolution::Unresolved => {
                resolved.not_found.insert(token.clone());
            }
        }
    }
    Ok(resolved)
}
