pub mod analysis;
pub mod input;
pub mod render;

pub use analysis::CommandContext;

use anyhow::Result;

use crate::cli::{Cli, Command};
use crate::config::Settings;

/// Load settings, apply command-line overrides and dispatch.
pub async fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::load(&cli.config)?;
    if let Some(preset) = cli.preset {
        settings.rubric.preset = preset;
        settings.rubric.weights = None;
    }
    if cli.api_key.is_some() {
        settings.extractor.api_key = cli.api_key;
    }

    let ctx = CommandContext {
        settings,
        json: cli.json,
        save: cli.save,
    };

    match cli.command {
        Command::Analyze { url } => analysis::analyze(&ctx, &url).await,
        Command::Score { file, url } => analysis::score(&ctx, &file, url.as_deref()),
        Command::Quick { file, url } => analysis::quick(&ctx, &file, url.as_deref()),
        Command::Batch {
            urls_file,
            concurrency,
            delay_ms,
        } => analysis::batch(&ctx, &urls_file, concurrency, delay_ms).await,
    }
}
