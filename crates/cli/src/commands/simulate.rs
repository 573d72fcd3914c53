//! Synthetic drive simulation.

use crate::commands::lap_config_with_gate;
use crate::error::CliError;
use crate::output;
use anyhow::{Context, Result};
use openlap_config::AppConfig;
use openlap_engine::{LapEvent, LapTimer};
use openlap_replay::{RouteGenerator, SessionRecorder, save_history};
use std::path::Path;
use tracing::info;

pub fn execute(
    laps: Option<u32>,
    seed: Option<u64>,
    session_out: Option<&Path>,
    history_out: Option<&Path>,
    config_path: &Path,
    json: bool,
) -> Result<()> {
    let config = AppConfig::load_or_default(config_path)
        .map_err(|e| CliError::InvalidConfiguration(e.to_string()))?;

    let mut simulator = config.simulator.clone();
    if let Some(laps) = laps {
        simulator.laps = laps;
    }
    if let Some(seed) = seed {
        simulator.seed = seed;
    }
    if simulator.laps == 0 {
        return Err(
            CliError::ValidationError("simulate needs at least one lap".to_string()).into(),
        );
    }

    // The route starts on the line, so the first crossing only closes the
    // outlap; one extra loop nets the requested number of timed laps.
    let circuits = simulator.laps.saturating_add(1);
    let mut generator = RouteGenerator::from_config(simulator.clone());
    let packets = generator.generate(circuits);

    let mut timer = LapTimer::new(lap_config_with_gate(config.lap));
    let mut recorder = match session_out {
        Some(path) => {
            let mut recorder = SessionRecorder::new(path.to_path_buf())?;
            recorder.start_session(format!("simulated drive (seed {})", simulator.seed));
            Some(recorder)
        }
        None => None,
    };

    let mut sample_count = 0usize;
    let mut rejected_count = 0usize;
    let mut outlap_count = 0usize;
    for packet in &packets {
        let sample = packet
            .to_sample()
            .context("generated packet failed to decode")?;
        let events = timer.ingest(&sample);
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
        if let Some(recorder) = recorder.as_mut() {
            recorder.record_sample(sample);
            recorder.record_events(&events);
        }
        sample_count = sample_count.saturating_add(1);
    }

    if let (Some(recorder), Some(path)) = (recorder.as_mut(), session_out) {
        let recording = recorder.finish(Some(format!("{circuits} loop simulation")))?;
        info!(
            path = %path.display(),
            sample_count = recording.metadata.sample_count,
            "Session recorded"
        );
    }

    if let Some(path) = history_out {
        save_history(path, &timer.export_snapshot())?;
        info!(path = %path.display(), "Lap history saved");
    }

    output::print_run_report(
        "Simulation complete",
        timer.laps(),
        timer.best_lap_index(),
        sample_count,
        rejected_count,
        outlap_count,
        json,
    );
    Ok(())
}
