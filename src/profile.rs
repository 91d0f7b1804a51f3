//! Stage timing for a single run.
//!
//! Purely observational: nothing in the pipeline reads it back, and failing
//! to save a report never affects the computed score.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize)]
pub struct StageTiming {
    pub stage: String,
    pub micros: u128,
}

#[derive(Debug, Default, Serialize)]
pub struct Profiler {
    stages: Vec<StageTiming>,
}

impl Profiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f`, recording how long it took under `stage`
    pub fn time<T>(&mut self, stage: &str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        self.record(stage, start.elapsed());
        out
    }

    pub fn record(&mut self, stage: &str, elapsed: Duration) {
        debug!(stage, ?elapsed, "stage finished");
        self.stages.push(StageTiming {
            stage: stage.to_string(),
            micros: elapsed.as_micros(),
        });
    }

    pub fn stages(&self) -> &[StageTiming] {
        &self.stages
    }

    pub fn total(&self) -> Duration {
        Duration::from_micros(self.stages.iter().map(|s| s.micros as u64).sum())
    }

    fn write_json(&self, path: &Path) -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()
    }

    /// Write the report as JSON. Failures are logged and swallowed.
    pub fn save(&self, path: &Path) -> bool {
        match self.write_json(path) {
            Ok(()) => true,
            Err(e) => {
                warn!("could not write profile to {}: {}", path.display(), e);
                false
            }
        }
    }
}
