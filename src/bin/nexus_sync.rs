//! Terminal driver for the Nexus sync engine.
//!
//! Each stdin line is either the recording hotkey (for example `F9`), a
//! `:command`, or a question for the agent. Agent output and the recording
//! indicator are rendered to stdout; all tracing goes to stderr.

use anyhow::Context;
use clap::Parser;
use nexus_api::ApiClient;
use nexus_sync::{KeyDisposition, SyncConfig, SyncSession, SyncState};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

/// Nexus Sync: keep a local view of the recording agent in sync.
#[derive(Parser)]
#[command(name = "nexus-sync", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides the config file).
    #[arg(long)]
    base_url: Option<String>,

    /// Status poll interval in milliseconds (overrides the config file).
    #[arg(long)]
    poll_interval_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("nexus_sync=info,nexus_api=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let api = ApiClient::new(&config.api_config()).context("building API client")?;
    tracing::info!(base_url = %api.base_url(), "connecting to backend");
    // The session and the `:latest`/`:memory` commands share one connection pool.
    let (session, handle) = SyncSession::new(Arc::new(api.clone()), &config);
    let session_task = session.run();
    let render_task = tokio::spawn(render(handle.subscribe()));

    println!(
        "{} toggles recording; :latest, :memory, :state, :quit; anything else asks the agent.",
        handle.hotkey().name()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        let line = line.trim();
        match line {
            "" => {}
            ":quit" | ":q" => break,
            ":state" => print_json(&handle.snapshot())?,
            ":latest" => match api.latest_video_info().await {
                Ok(info) => print_json(&info)?,
                Err(e) => tracing::warn!(error = %e, "latest video info unavailable"),
            },
            ":memory" => match api.memory().await {
                Ok(memory) => print_json(&memory)?,
                Err(e) => tracing::warn!(error = %e, "memory snapshot unavailable"),
            },
            key if handle.key_event(key)? == KeyDisposition::Consumed => {}
            query => handle.query(query)?,
        }
    }

    handle.shutdown();
    session_task.await.context("sync session task failed")?;
    render_task.abort();
    tracing::info!("nexus-sync shut down cleanly");
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<SyncConfig> {
    let mut config = match &cli.config {
        Some(path) => SyncConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => {
            let path = SyncConfig::default_config_path();
            if path.exists() {
                SyncConfig::from_file(&path)
                    .with_context(|| format!("loading config from {}", path.display()))?
            } else {
                SyncConfig::default()
            }
        }
    };

    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }
    if let Some(interval_ms) = cli.poll_interval_ms {
        config.poll.interval_ms = interval_ms;
    }
    config.validate()?;
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// The parts of [`SyncState`] a user watches.
#[derive(Debug, Default, PartialEq)]
struct View {
    indicator: &'static str,
    loading: bool,
    response: String,
}

impl From<&SyncState> for View {
    fn from(state: &SyncState) -> Self {
        let indicator = if state.is_processing_video() {
            "processing"
        } else if state.status.is_recording {
            "recording"
        } else {
            "idle"
        };
        Self {
            indicator,
            loading: state.loading,
            response: state.last_agent_response.clone(),
        }
    }
}

async fn render(mut rx: watch::Receiver<SyncState>) {
    let mut shown = View::default();
    loop {
        let view = View::from(&*rx.borrow_and_update());
        if view.indicator != shown.indicator {
            println!("[{}]", view.indicator);
        }
        if view.loading && !shown.loading {
            println!("... waiting for the agent");
        }
        if view.response != shown.response && !view.response.is_empty() {
            println!("\n{}\n", view.response);
        }
        shown = view;

        if rx.changed().await.is_err() {
            break;
        }
    }
}
