//! Cross-crate pipeline tests.
//!
//! These walk data through the same paths the binary uses: wire bytes into
//! the packet decoder, decoded samples into the engine, engine output into
//! session and history files, and those files back into a fresh engine.

use anyhow::Result;
use openlap_config::LapConfig;
use openlap_engine::LapTimer;
use openlap_integration_tests::fixtures;
use openlap_replay::{
    RouteGenerator, SessionPlayer, SessionRecorder, load_history, save_history,
};
use openlap_schemas::{GpsPacket, LapCheckpoint, LapHistorySnapshot, LapRecord};

/// Drives a 100 m out-and-back shuttle: gate at t0, two timed laps after.
fn shuttle_two_laps(timer: &mut LapTimer) {
    for sample in [
        fixtures::fix_north(0, 0.0),
        fixtures::fix_north(10_000, 100.0),
        fixtures::fix_north(20_000, 0.0),
        fixtures::fix_north(30_000, 100.0),
        fixtures::fix_north(40_000, 0.0),
        fixtures::fix_north(50_000, 100.0),
        fixtures::fix_north(65_000, 0.0),
    ] {
        timer.ingest(&sample);
    }
}

// Wire Pipeline Tests

#[test]
fn wire_bytes_flow_through_to_lap_history() -> Result<()> {
    let mut generator = RouteGenerator::from_config(fixtures::quick_sim(3));
    let mut timer = fixtures::route_timer();

    // Serialize each packet back to bytes so the test crosses the same
    // decode boundary the UDP listener does.
    for packet in generator.generate(3) {
        let bytes = serde_json::to_vec(&packet)?;
        let decoded = GpsPacket::from_json_bytes(&bytes)?;
        timer.ingest(&decoded.to_sample()?);
    }

    assert_eq!(timer.laps().len(), 2);
    let numbers: Vec<u32> = timer.laps().iter().map(|lap| lap.lap_number).collect();
    assert_eq!(numbers, vec![1, 2]);
    assert!(timer.best_lap_index().is_some());
    Ok(())
}

// Session Replay Tests

#[test]
fn a_reset_player_replays_the_same_laps_again() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("session.json");

    let mut live = fixtures::route_timer();
    let mut recorder = SessionRecorder::new(path.clone())?;
    recorder.start_session("pipeline drive".to_string());
    let mut generator = RouteGenerator::from_config(fixtures::quick_sim(9));
    for packet in generator.generate(3) {
        let sample = packet.to_sample()?;
        let events = live.ingest(&sample);
        recorder.record_sample(sample);
        recorder.record_events(&events);
    }
    recorder.finish(None)?;

    let mut player = SessionPlayer::new(SessionRecorder::load_session(&path)?);
    assert_eq!(player.metadata().sample_count, 144);
    assert_eq!(player.progress(), 0.0);

    let mut first_pass = fixtures::route_timer();
    player.drive(&mut first_pass);
    assert!(player.is_finished());
    assert_eq!(player.progress(), 1.0);
    assert_eq!(first_pass.laps(), live.laps());

    // Rewinding and replaying must reproduce the run a second time.
    player.reset();
    assert_eq!(player.progress(), 0.0);
    let mut second_pass = fixtures::route_timer();
    player.drive(&mut second_pass);
    assert_eq!(second_pass.laps(), first_pass.laps());
    Ok(())
}

// History Persistence Tests

#[test]
fn restored_history_continues_the_lap_numbering() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("history.json");

    // First session: two laps at 20 s and 25 s.
    let mut first_session = LapTimer::new(fixtures::shuttle_lap_config());
    shuttle_two_laps(&mut first_session);
    assert_eq!(first_session.laps().len(), 2);
    save_history(&path, &first_session.export_snapshot())?;

    // Second session: restore, then drive one more out-and-back.
    let loaded = load_history(&path)?;
    let mut second_session = LapTimer::new(fixtures::shuttle_lap_config());
    second_session.restore(loaded.laps);
    assert_eq!(second_session.laps().len(), 2);
    assert_eq!(second_session.best_lap_index(), Some(0));

    for sample in [
        fixtures::fix_north(1_000_000, 0.0),
        fixtures::fix_north(1_010_000, 100.0),
        fixtures::fix_north(1_020_000, 0.0),
        fixtures::fix_north(1_030_000, 100.0),
        fixtures::fix_north(1_040_000, 0.0),
    ] {
        second_session.ingest(&sample);
    }

    let numbers: Vec<u32> = second_session.laps().iter().map(|lap| lap.lap_number).collect();
    assert_eq!(numbers, vec![1, 2, 3], "numbering resumes after the restored laps");
    assert_eq!(second_session.laps()[2].elapsed_ms, Some(20_000));
    // The new 20 s lap ties the restored best; earlier laps win ties.
    assert_eq!(second_session.best_lap_index(), Some(0));
    Ok(())
}

#[test]
fn incomplete_imported_records_survive_but_never_become_best() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("imported.json");

    let snapshot = LapHistorySnapshot {
        laps: vec![
            LapRecord {
                lap_number: 1,
                start_time_ms: 10_000,
                end_time_ms: Some(40_000),
                elapsed_ms: Some(30_000),
                distance_m: 500.0,
                checkpoints: vec![
                    LapCheckpoint::new(0, 0.0),
                    LapCheckpoint::new(15_000, 250.0),
                    LapCheckpoint::new(30_000, 500.0),
                ],
            },
            // Hand-edited export with the timing fields stripped.
            LapRecord {
                lap_number: 2,
                start_time_ms: 40_000,
                end_time_ms: None,
                elapsed_ms: None,
                distance_m: 480.0,
                checkpoints: Vec::new(),
            },
        ],
        best_lap_index: None,
    };
    save_history(&path, &snapshot)?;

    let loaded = load_history(&path)?;
    assert_eq!(loaded.laps, snapshot.laps, "absent fields survive the disk trip");

    let mut timer = LapTimer::new(fixtures::shuttle_lap_config());
    timer.restore(loaded.laps);
    assert_eq!(timer.laps().len(), 2);
    assert_eq!(
        timer.best_lap_index(),
        Some(0),
        "the untimed record must not be eligible"
    );

    // A fresh 20 s lap beats the imported 30 s best and is numbered 3.
    for sample in [
        fixtures::fix_north(2_000_000, 0.0),
        fixtures::fix_north(2_010_000, 100.0),
        fixtures::fix_north(2_020_000, 0.0),
        fixtures::fix_north(2_030_000, 100.0),
        fixtures::fix_north(2_040_000, 0.0),
    ] {
        timer.ingest(&sample);
    }
    assert_eq!(timer.laps().len(), 3);
    assert_eq!(timer.laps()[2].lap_number, 3);
    assert_eq!(timer.best_lap_index(), Some(2));
    Ok(())
}

// Checkpoint Polyline Tests

#[test]
fn checkpoint_epsilon_controls_polyline_density() {
    let drive = [
        fixtures::fix_north(0, 0.0),
        fixtures::fix_north(10_000, 100.0),
        fixtures::fix_north(20_000, 0.0), // lap 1 opens here
        fixtures::fix_north(25_000, 20.0),
        fixtures::fix_north(30_000, 40.0),
        fixtures::fix_north(35_000, 60.0),
        fixtures::fix_north(40_000, 80.0),
        fixtures::fix_north(45_000, 100.0),
        fixtures::fix_north(50_000, 50.0),
        fixtures::fix_north(55_000, 0.0), // lap 1 closes here
    ];

    let mut fine = LapTimer::new(LapConfig {
        checkpoint_epsilon_m: 2.0,
        ..fixtures::shuttle_lap_config()
    });
    let mut coarse = LapTimer::new(LapConfig {
        checkpoint_epsilon_m: 1_000.0,
        ..fixtures::shuttle_lap_config()
    });
    for sample in &drive {
        fine.ingest(sample);
        coarse.ingest(sample);
    }

    assert_eq!(fine.laps().len(), 1);
    assert_eq!(coarse.laps().len(), 1);

    // Fine: the origin, one checkpoint per 20 m+ step, and the closing fix.
    let fine_points = &fine.laps()[0].checkpoints;
    assert_eq!(fine_points.len(), 8);
    assert_eq!(fine_points[0], LapCheckpoint::new(0, 0.0));

    // Coarse: every step is below epsilon, so only the origin, the
    // guaranteed second point, and the terminal checkpoint remain.
    let coarse_points = &coarse.laps()[0].checkpoints;
    assert_eq!(coarse_points.len(), 3);

    // Either way the polyline ends on the lap totals.
    for lap in [&fine.laps()[0], &coarse.laps()[0]] {
        let Some(last) = lap.checkpoints.last() else {
            panic!("closed laps always carry checkpoints");
        };
        assert_eq!(Some(last.elapsed_ms), lap.elapsed_ms);
        assert!((last.distance_m - lap.distance_m).abs() < 1e-9);
    }
}
