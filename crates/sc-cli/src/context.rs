use std::path::Path;

use anyhow::Context;
use sc_config::SignConfig;
use sc_core::entities::Dataset;
use sc_db::CorpusService;

const IN_MEMORY: &str = ":memory:";

/// Shared application resources initialized once per command.
pub struct AppContext {
    pub service: CorpusService,
    pub config: SignConfig,
}

impl AppContext {
    /// Open (and migrate) the configured database.
    pub async fn init(config: SignConfig) -> anyhow::Result<Self> {
        let path = config.database.path.as_str();
        if path != IN_MEMORY {
            if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }

        let service = CorpusService::new_local(path)
            .await
            .with_context(|| format!("failed to open database at {path}"))?;
        tracing::debug!(path, "context: database ready");
        Ok(Self { service, config })
    }

    pub async fn require_dataset(&self, acronym: &str) -> anyhow::Result<Dataset> {
        self.service
            .get_dataset_by_acronym(acronym)
            .await?
            .with_context(|| format!("dataset '{acronym}' not found; create it with 'signcount dataset create'"))
    }
}
