//! nexchat — a minimal terminal chat client for a streaming completion
//! endpoint.

mod terminal;

use std::path::PathBuf;

use clap::Parser;
use nexchat_client::{EndpointConfig, TurnRunner};
use nexchat_session::Transcript;
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::terminal::TerminalView;

#[derive(Parser)]
#[command(name = "nexchat", about = "nexchat: minimal streaming chat client")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "nexchat.toml")]
    config: PathBuf,

    /// Chat endpoint URL (overrides config)
    #[arg(short, long)]
    endpoint: Option<String>,
}

#[derive(Deserialize, Default)]
struct NexchatConfig {
    #[serde(default)]
    endpoint: Option<String>,
}

/// Flag wins over config file; the file is only required when no flag is
/// given.
async fn resolve_endpoint(cli: &Cli) -> anyhow::Result<EndpointConfig> {
    if let Some(url) = &cli.endpoint {
        return Ok(EndpointConfig::new(url));
    }

    let raw = tokio::fs::read_to_string(&cli.config).await.map_err(|e| {
        anyhow::anyhow!(
            "failed to read config file '{}': {e} (or pass --endpoint)",
            cli.config.display()
        )
    })?;
    let config: NexchatConfig = toml::from_str(&raw)?;
    config.endpoint.map(EndpointConfig::new).ok_or_else(|| {
        anyhow::anyhow!(
            "no endpoint configured: set `endpoint` in '{}' or pass --endpoint",
            cli.config.display()
        )
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the chat surface.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let endpoint = resolve_endpoint(&cli).await?;
    debug!(url = %endpoint.url, "using chat endpoint");

    let runner = TurnRunner::new(endpoint);
    let mut transcript = Transcript::new();
    let mut view = TerminalView::new(std::io::stdout());

    println!("nexchat: type a message and press Enter (/quit to exit)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        view.prompt();
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "/quit" {
            break;
        }

        // One turn in flight at a time; reading the next line waits for
        // the turn to finish. The token is the hook for wiring up an
        // interrupt key later.
        let cancel = CancellationToken::new();
        let outcome = runner
            .run_turn(&mut transcript, input, &mut view, &cancel)
            .await;
        debug!(?outcome, messages = transcript.len(), "turn complete");
    }

    Ok(())
}
