//! Human and JSON renderers for command results.
//!
//! Every command answers in one of two shapes: colored text for people, or
//! a pretty-printed JSON envelope with a top-level `success` flag for
//! scripts. The envelope keys are part of the CLI contract.

use anyhow::Error;
use colored::*;
use openlap_config::AppConfig;
use openlap_schemas::LapRecord;
use serde_json::json;

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to render JSON output: {e}"),
    }
}

/// Failure envelope, message plus the cause chain.
pub fn print_error_json(error: &Error) {
    let causes: Vec<String> = error.chain().skip(1).map(|cause| cause.to_string()).collect();
    print_json(&json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "causes": causes,
        }
    }));
}

/// Failure message and its cause chain, on stderr.
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);
    for cause in error.chain().skip(1) {
        eprintln!("  {} {}", "Caused by:".yellow(), cause);
    }
}

/// Short confirmation for a completed action.
pub fn print_status(message: &str, json: bool) {
    if json {
        print_json(&json!({
            "success": true,
            "message": message,
        }));
    } else {
        println!("{}", message.green());
    }
}

/// Stored lap history, as a table or a JSON envelope.
pub fn print_lap_history(laps: &[LapRecord], best_lap_index: Option<usize>, json: bool) {
    if json {
        print_json(&json!({
            "success": true,
            "laps": laps,
            "best_lap_index": best_lap_index,
        }));
    } else {
        print_lap_table(laps, best_lap_index);
    }
}

/// Summary of a simulate or replay run.
pub fn print_run_report(
    title: &str,
    laps: &[LapRecord],
    best_lap_index: Option<usize>,
    sample_count: usize,
    rejected_count: usize,
    outlap_count: usize,
    json: bool,
) {
    if json {
        print_json(&json!({
            "success": true,
            "summary": {
                "samples": sample_count,
                "rejected": rejected_count,
                "outlaps_discarded": outlap_count,
                "laps_completed": laps.len(),
                "best_lap_index": best_lap_index,
            },
            "laps": laps,
        }));
    } else {
        println!("{}", title.bold());
        println!(
            "  Samples ingested: {} ({} rejected)",
            sample_count, rejected_count
        );
        println!("  Outlaps discarded: {}", outlap_count);
        println!("  Laps completed: {}", laps.len());
        println!();
        print_lap_table(laps, best_lap_index);
    }
}

/// The effective configuration, resolved from file and defaults.
pub fn print_config(config: &AppConfig, json: bool) {
    if json {
        print_json(&json!({
            "success": true,
            "config": config,
        }));
    } else {
        println!("{}", "Lap detection:".bold());
        match &config.lap.geofence {
            Some(gate) => println!(
                "  Gate: {:.6}, {:.6} (radius {:.1} m)",
                gate.center.lat_deg, gate.center.lon_deg, gate.radius_m
            ),
            None => println!("  Gate: {}", "not configured".yellow()),
        }
        println!("  Min lap duration: {} ms", config.lap.min_lap_duration_ms);
        println!(
            "  Checkpoint spacing: {:.1} m",
            config.lap.checkpoint_epsilon_m
        );
        println!(
            "  Stationary threshold: {:.2} m/s",
            config.lap.stationary_speed_mps
        );
        println!(
            "  Outline: {:.1} m spacing, {} points max",
            config.lap.outline_epsilon_m, config.lap.outline_max_points
        );
        println!("{}", "Simulator:".bold());
        println!(
            "  {} laps, {} samples/leg, {} ms interval",
            config.simulator.laps, config.simulator.samples_per_leg, config.simulator.interval_ms
        );
        println!(
            "  Jitter {:.6} deg, seed {}",
            config.simulator.jitter_deg, config.simulator.seed
        );
    }
}

fn print_lap_table(laps: &[LapRecord], best_lap_index: Option<usize>) {
    if laps.is_empty() {
        println!("{}", "No laps recorded".yellow());
        return;
    }

    println!("{}", "Lap History:".bold());
    println!("  {:>4}  {:>12}  {:>12}", "Lap", "Time", "Distance");
    for (index, lap) in laps.iter().enumerate() {
        let marker = if best_lap_index == Some(index) {
            "★".green().to_string()
        } else {
            " ".to_string()
        };
        let time = lap
            .elapsed_ms
            .map_or_else(|| "--:--.---".dimmed().to_string(), format_lap_time);
        println!(
            "{} {:>4}  {:>12}  {:>9.1} m",
            marker, lap.lap_number, time, lap.distance_m
        );
    }
}

/// Formats milliseconds as m:ss.mmm
pub fn format_lap_time(elapsed_ms: u64) -> String {
    let minutes = elapsed_ms / 60_000;
    let seconds = (elapsed_ms % 60_000) / 1_000;
    let millis = elapsed_ms % 1_000;
    format!("{minutes}:{seconds:02}.{millis:03}")
}
