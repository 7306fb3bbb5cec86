//! Shared test utilities for sc-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use sc_core::entities::{Dataset, Gloss};

    use crate::SignDb;
    use crate::service::CorpusService;

    /// Create an in-memory `CorpusService`.
    pub async fn test_service() -> CorpusService {
        let db = SignDb::open_local(":memory:").await.unwrap();
        CorpusService::from_db(db)
    }

    /// Dataset `NGT` with default language `nl`.
    pub async fn seed_dataset(svc: &CorpusService) -> Dataset {
        svc.create_dataset("NGT", "nl").await.unwrap()
    }

    /// A linked gloss in `dataset` annotated with `text` in the dataset language.
    pub async fn seed_gloss(svc: &CorpusService, dataset: &Dataset, text: &str) -> Gloss {
        let gloss = svc.create_gloss(Some(dataset.id), Some(1)).await.unwrap();
        svc.set_gloss_annotation(gloss.id, &dataset.default_language, text)
            .await
            .unwrap();
        gloss
    }
}
