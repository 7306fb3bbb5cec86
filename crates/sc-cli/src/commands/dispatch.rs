use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed database command to its handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Dataset { action } => commands::dataset::handle(&action, ctx, flags).await,
        Commands::Gloss { action } => commands::gloss::handle(&action, ctx, flags).await,
        Commands::Speakers { action } => commands::speakers::handle(&action, ctx, flags).await,
        Commands::Corpus { action } => commands::corpus::handle(&action, ctx, flags).await,
        Commands::Count(_) => unreachable!("count is pre-dispatched in main"),
    }
}
