use anyhow::Context;
use sc_config::SignConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration (with `.env`) and apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<SignConfig> {
    let mut config = SignConfig::load_with_dotenv().context("failed to load signcount configuration")?;
    if let Some(db) = &flags.db {
        config.database.path.clone_from(db);
    }
    Ok(config)
}
