use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use harmoniq_history::{CommandList, HistoryConfig};
use harmoniq_session::{EditScript, Session, TracksView};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Replay a scripted edit session through the Harmoniq history")]
struct Cli {
    /// Path to the edit script (JSON).
    #[arg(long)]
    script: PathBuf,
    /// Optional history settings (JSON). Defaults to the user settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Name given to the replayed session.
    #[arg(long, default_value = "Replay")]
    name: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .ok();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => HistoryConfig::load(path)?,
        None => HistoryConfig::load_or_default(),
    };
    let script = EditScript::load(&cli.script)?;

    let view = TracksView::new();
    let mut session = Session::new(cli.name);
    let mut history = CommandList::with_config(config).with_view(view.clone());

    let report = script.replay(&mut history, &mut session);
    tracing::info!(
        session = session.name(),
        succeeded = report.succeeded,
        failed = report.failed,
        refreshes = view.refresh_count(),
        "edit script replayed"
    );

    let project = serde_json::to_string_pretty(session.project())
        .context("failed to serialise project")?;
    println!("{project}");
    println!(
        "session length: {} frames ({} bars), undo: {}, redo: {}",
        session.session_length(),
        session.time_scale().bars(session.session_length()),
        history.undo_name().unwrap_or("-"),
        history.redo_name().unwrap_or("-"),
    );
    Ok(())
}
