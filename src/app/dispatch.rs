use crate::cli::commands::{Cli, Commands};
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracewidgets::Config;
use tracewidgets::WidgetRuntime;
use tracewidgets::delivery::{HttpWebhook, MemorySink, WebhookSink};
use tracewidgets::host::MemorySurface;
use tracewidgets::replay::{Replay, Script};
use tracing::info;

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load_or_init(),
    }
}

async fn run_replay(config: Config, script: &Path, dry_run: bool, settle_ms: u64) -> Result<()> {
    let script = Script::load(script).await?;
    let surface = Arc::new(MemorySurface::new());
    let sink: Arc<dyn WebhookSink> = if dry_run {
        Arc::new(MemorySink::new())
    } else {
        Arc::new(HttpWebhook::from_config(&config.delivery))
    };
    info!(steps = script.steps.len(), sink = sink.name(), "replaying script");

    let runtime = WidgetRuntime::new(config, surface.clone(), sink);
    let report = Replay::new(runtime, surface)
        .with_settle(Duration::from_millis(settle_ms))
        .run(script)
        .await;

    let rendered = serde_json::to_string_pretty(&report).context("Failed to render replay report")?;
    println!("{rendered}");
    Ok(())
}

pub async fn dispatch(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Replay {
            script,
            dry_run,
            settle_ms,
        } => run_replay(config, &script, dry_run, settle_ms).await,
        Commands::Config => {
            let rendered = toml::to_string_pretty(&config).context("Failed to render config")?;
            println!("# {}", config.config_path.display());
            print!("{rendered}");
            Ok(())
        }
    }
}
