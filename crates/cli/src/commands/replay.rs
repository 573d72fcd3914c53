//! Replay recorded sessions through the lap engine.

use crate::commands::lap_config_with_gate;
use crate::error::CliError;
use crate::output;
use anyhow::{Context, Result};
use openlap_config::AppConfig;
use openlap_engine::{LapEvent, LapTimer};
use openlap_replay::{SessionPlayer, SessionRecorder, save_history};
use std::path::Path;
use tracing::{info, warn};

pub fn execute(
    file: &Path,
    history_out: Option<&Path>,
    config_path: &Path,
    json: bool,
) -> Result<()> {
    if !file.exists() {
        return Err(CliError::FileNotFound(file.display().to_string()).into());
    }
    let config = AppConfig::load_or_default(config_path)
        .map_err(|e| CliError::InvalidConfiguration(e.to_string()))?;

    let recording = SessionRecorder::load_session(file)
        .with_context(|| format!("failed to load session from {}", file.display()))?;
    let mut timer = LapTimer::new(lap_config_with_gate(config.lap));
    let mut player = SessionPlayer::new(recording);
    let events = player.drive(&mut timer);

    let mut rejected_count = 0usize;
    let mut outlap_count = 0usize;
    for event in &events {
        match event {
            LapEvent::SampleRejected { .. } => {
                rejected_count = rejected_count.saturating_add(1);
            }
            LapEvent::OutlapDiscarded { .. } => {
                outlap_count = outlap_count.saturating_add(1);
            }
            _ => {}
        }
    }

    if timer.laps().len() != player.metadata().lap_count {
        warn!(
            recorded = player.metadata().lap_count,
            replayed = timer.laps().len(),
            "Replay lap count differs from the recording"
        );
    }

    if let Some(path) = history_out {
        save_history(path, &timer.export_snapshot())?;
        info!(path = %path.display(), "Lap history saved");
    }

    output::print_run_report(
        "Replay complete",
        timer.laps(),
        timer.best_lap_index(),
        player.samples().len(),
        rejected_count,
        outlap_count,
        json,
    );
    Ok(())
}
