//! Session recording, playback, and synthetic route generation utilities.

use chrono::{DateTime, SecondsFormat, Utc};
use openlap_config::SimulatorConfig;
use openlap_engine::{LapEvent, LapTimer};
use openlap_geo::GeoPoint;
use openlap_schemas::{GpsPacket, ImuReading, LapHistorySnapshot, TelemetrySample};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// A recorded drive: the samples that were ingested and the events the
/// engine produced for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecording {
    pub metadata: SessionMetadata,
    pub samples: Vec<TelemetrySample>,
    pub events: Vec<LapEvent>,
}

/// Recording metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    pub name: String,
    pub recorded_at: DateTime<Utc>,
    pub sample_count: usize,
    pub lap_count: usize,
    pub description: Option<String>,
}

/// Session recorder for capturing and persisting drives.
pub struct SessionRecorder {
    output_path: PathBuf,
    samples: Vec<TelemetrySample>,
    events: Vec<LapEvent>,
    started_at: Option<DateTime<Utc>>,
    name: String,
}

impl SessionRecorder {
    pub fn new(output_path: PathBuf) -> anyhow::Result<Self> {
        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Ok(Self {
            output_path,
            samples: Vec::new(),
            events: Vec::new(),
            started_at: None,
            name: "unnamed".to_string(),
        })
    }

    pub fn start_session(&mut self, name: String) {
        self.name = name;
        self.started_at = Some(Utc::now());
        self.samples.clear();
        self.events.clear();
    }

    pub fn record_sample(&mut self, sample: TelemetrySample) {
        if self.started_at.is_some() {
            self.samples.push(sample);
        }
    }

    pub fn record_events(&mut self, events: &[LapEvent]) {
        if self.started_at.is_some() {
            self.events.extend_from_slice(events);
        }
    }

    pub fn finish(&mut self, description: Option<String>) -> anyhow::Result<SessionRecording> {
        let recorded_at = self
            .started_at
            .take()
            .ok_or_else(|| anyhow::anyhow!("Session not started"))?;

        let lap_count = self
            .events
            .iter()
            .filter(|event| matches!(event, LapEvent::LapCompleted { .. }))
            .count();

        let metadata = SessionMetadata {
            name: self.name.clone(),
            recorded_at,
            sample_count: self.samples.len(),
            lap_count,
            description,
        };

        let recording = SessionRecording {
            metadata,
            samples: self.samples.clone(),
            events: self.events.clone(),
        };

        self.save_session(&recording)?;
        Ok(recording)
    }

    fn save_session(&self, recording: &SessionRecording) -> anyhow::Result<()> {
        let file = File::create(&self.output_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, recording)?;
        Ok(())
    }

    pub fn load_session<P: AsRef<Path>>(path: P) -> anyhow::Result<SessionRecording> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn is_recording(&self) -> bool {
        self.started_at.is_some()
    }
}

/// Replays a recorded session through a fresh engine.
pub struct SessionPlayer {
    recording: SessionRecording,
    cursor: usize,
}

impl SessionPlayer {
    pub fn new(recording: SessionRecording) -> Self {
        Self {
            recording,
            cursor: 0,
        }
    }

    pub fn next_sample(&mut self) -> Option<TelemetrySample> {
        let sample = self.recording.samples.get(self.cursor).cloned()?;
        self.cursor = self.cursor.saturating_add(1);
        Some(sample)
    }

    /// Feeds every remaining sample into the timer and returns the events
    /// the replay produced.
    pub fn drive(&mut self, timer: &mut LapTimer) -> Vec<LapEvent> {
        let mut events = Vec::new();
        while let Some(sample) = self.next_sample() {
            events.extend(timer.ingest(&sample));
        }
        events
    }

    pub fn progress(&self) -> f32 {
        if self.recording.samples.is_empty() {
            1.0
        } else {
            self.cursor as f32 / self.recording.samples.len() as f32
        }
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.recording.samples.len()
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    pub fn metadata(&self) -> &SessionMetadata {
        &self.recording.metadata
    }

    pub fn samples(&self) -> &[TelemetrySample] {
        &self.recording.samples
    }
}

/// Waypoints of the built-in demo loop, counterclockwise. Legs between
/// neighbors are interpolated to produce fixes.
const CAMPUS_LOOP: [(f64, f64, f64); 6] = [
    (40.744782, -74.027000, 26.0), // Walker Gym, start/finish
    (40.744255, -74.025195, 18.5), // Schaefer Center
    (40.744948, -74.024621, 21.0), // Babbio Center
    (40.745822, -74.024994, 19.0), // UCC
    (40.746371, -74.026138, 15.5), // Palmer Lawn
    (40.746028, -74.027139, 32.0), // Howe Center
];

/// 2026-01-01T00:00:00Z. Fixed so runs with the same seed produce
/// byte-identical sessions.
const SESSION_EPOCH_MS: i64 = 1_767_225_600_000;

/// Deterministic GPS route synthesizer for demos and fixtures.
///
/// Walks the demo loop at the configured sample rate, adding seeded
/// positional jitter and plausible receiver metadata. The first waypoint
/// doubles as the start/finish line, so a drive of `n` loops crosses the
/// gate `n` times and times out `n - 1` complete laps.
pub struct RouteGenerator {
    config: SimulatorConfig,
    rng: StdRng,
}

impl RouteGenerator {
    pub fn from_config(config: SimulatorConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    /// Center of the start/finish gate matching the generated route.
    #[must_use]
    pub fn start_line() -> GeoPoint {
        GeoPoint::new(CAMPUS_LOOP[0].0, CAMPUS_LOOP[0].1)
    }

    /// Produces wire packets for the given number of loops.
    pub fn generate(&mut self, laps: u32) -> Vec<GpsPacket> {
        let samples_per_leg = self.config.samples_per_leg.max(2);
        let last_index = f64::from(samples_per_leg.saturating_sub(1));

        let mut packets = Vec::new();
        let mut tick = 0u64;
        for _ in 0..laps {
            let legs = CAMPUS_LOOP
                .iter()
                .zip(CAMPUS_LOOP.iter().cycle().skip(1))
                .take(CAMPUS_LOOP.len());
            for (from, to) in legs {
                for i in 0..samples_per_leg {
                    let fraction = f64::from(i) / last_index;
                    packets.push(self.fix_between(from, to, fraction, tick));
                    tick = tick.saturating_add(1);
                }
            }
        }
        packets
    }

    fn fix_between(
        &mut self,
        from: &(f64, f64, f64),
        to: &(f64, f64, f64),
        fraction: f64,
        tick: u64,
    ) -> GpsPacket {
        let jitter = self.config.jitter_deg;
        let lat = lerp(from.0, to.0, fraction) + self.rng.random_range(-jitter..=jitter);
        let lon = lerp(from.1, to.1, fraction) + self.rng.random_range(-jitter..=jitter);
        let alt = lerp(from.2, to.2, fraction) + self.rng.random_range(-1.5..=1.5);

        let imu = ImuReading {
            accel: [
                self.rng.random_range(-0.3..=0.3),
                self.rng.random_range(-0.3..=0.3),
                -9.81 + self.rng.random_range(-0.1..=0.1),
            ],
            gyro: [
                self.rng.random_range(-0.05..=0.05),
                self.rng.random_range(-0.05..=0.05),
                self.rng.random_range(-0.05..=0.05),
            ],
        };

        let offset_ms = i64::try_from(tick.saturating_mul(self.config.interval_ms))
            .unwrap_or(i64::MAX);
        let timestamp_ms = SESSION_EPOCH_MS.saturating_add(offset_ms);
        let ts = DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
            .unwrap_or_default()
            .to_rfc3339_opts(SecondsFormat::Millis, true);

        GpsPacket {
            ts: Some(ts),
            lat: Some(lat),
            lon: Some(lon),
            alt: Some(alt),
            fix: Some(1),
            sats: Some(self.rng.random_range(8..13u8)),
            hdop: Some(round2(self.rng.random_range(0.6..=1.2))),
            imu: Some(imu),
        }
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Writes a lap history snapshot as pretty JSON, creating parent
/// directories as needed.
pub fn save_history<P: AsRef<Path>>(path: P, snapshot: &LapHistorySnapshot) -> anyhow::Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, snapshot)?;
    Ok(())
}

/// Reads a lap history snapshot saved by [`save_history`].
pub fn load_history<P: AsRef<Path>>(path: P) -> anyhow::Result<LapHistorySnapshot> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}
