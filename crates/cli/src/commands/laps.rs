//! Lap history inspection and maintenance.

use crate::commands::LapsCommands;
use crate::error::CliError;
use crate::output;
use anyhow::{Context, Result};
use openlap_engine::LapHistory;
use openlap_replay::{load_history, save_history};
use openlap_schemas::LapHistorySnapshot;
use std::path::Path;

pub fn execute(command: &LapsCommands, json: bool) -> Result<()> {
    match command {
        LapsCommands::Show { file } => {
            let snapshot = load_snapshot(file)?;
            output::print_lap_history(&snapshot.laps, snapshot.best_lap_index, json);
            Ok(())
        }
        LapsCommands::Export { file, output } => {
            let snapshot = load_snapshot(file)?;
            match output {
                Some(dest) => {
                    save_history(dest, &snapshot)?;
                    output::print_status(
                        &format!("Exported {} laps to {}", snapshot.laps.len(), dest.display()),
                        json,
                    );
                }
                None => {
                    // Stdout export is always JSON regardless of --json.
                    println!("{}", serde_json::to_string_pretty(&snapshot)?);
                }
            }
            Ok(())
        }
        LapsCommands::Import { file, input } => {
            let snapshot = load_snapshot(input)?;
            // Run imported records through the history so the best lap is
            // recomputed rather than trusted from the snapshot.
            let mut history = LapHistory::default();
            history.restore(snapshot.laps);
            let rebuilt = history.export_snapshot();
            save_history(file, &rebuilt)?;
            output::print_status(
                &format!(
                    "Imported {} laps into {}",
                    rebuilt.laps.len(),
                    file.display()
                ),
                json,
            );
            Ok(())
        }
        LapsCommands::Clear { file, yes } => {
            if !file.exists() {
                return Err(CliError::FileNotFound(file.display().to_string()).into());
            }
            if !yes {
                return Err(CliError::ValidationError(
                    "refusing to clear lap history without --yes".to_string(),
                )
                .into());
            }
            save_history(
                file,
                &LapHistorySnapshot {
                    laps: Vec::new(),
                    best_lap_index: None,
                },
            )?;
            output::print_status(&format!("Cleared lap history in {}", file.display()), json);
            Ok(())
        }
    }
}

fn load_snapshot(path: &Path) -> Result<LapHistorySnapshot> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()).into());
    }
    load_history(path).with_context(|| format!("failed to load lap history from {}", path.display()))
}
