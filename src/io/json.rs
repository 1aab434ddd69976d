use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use super::record::StepRecord;

/// Summary statistics computed from an episode trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeSummary {
    pub seed: Option<u64>,
    pub steps: u64,
    pub duration_s: f64,
    pub score: usize,
    pub landings: usize,
    pub total_reward: f64,
    pub max_speed: f64,
    pub min_fuel: f64,
    pub crashed: bool,
    pub completed: bool,
}

impl EpisodeSummary {
    /// Compute a summary from trace rows. `None` for an empty trace.
    pub fn from_records(seed: Option<u64>, records: &[StepRecord]) -> Option<Self> {
        let last = records.last()?;

        let max_speed = records.iter().map(StepRecord::speed).fold(0.0_f64, f64::max);
        let min_fuel = records.iter().map(|r| r.fuel).fold(f64::INFINITY, f64::min);

        Some(EpisodeSummary {
            seed,
            steps: last.step,
            duration_s: last.time,
            score: last.score,
            landings: records.iter().filter(|r| r.landed).count(),
            total_reward: records.iter().map(|r| r.reward).sum(),
            max_speed,
            min_fuel,
            crashed: last.crashed,
            completed: last.terminal && last.landed,
        })
    }
}

/// Write episode summaries as a pretty-printed JSON array.
pub fn write_summary<W: Write>(writer: &mut W, summaries: &[EpisodeSummary]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, summaries)?;
    writeln!(writer)
}

/// Write episode summaries JSON to a file.
pub fn write_summary_file(path: impl AsRef<Path>, summaries: &[EpisodeSummary]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, summaries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace() -> Vec<StepRecord> {
        let row = |step: u64, vy: f64, fuel: f64, reward: f64, landed: bool| StepRecord {
            step,
            time: step as f64 / 60.0,
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy,
            fuel,
            wind: 0.0,
            thrust: false,
            reward,
            score: usize::from(step >= 3),
            landed,
            crashed: false,
            terminal: false,
        };
        vec![
            row(1, -50.0, 100.0, -0.01, false),
            row(2, 120.0, 60.0, 1.5, false),
            row(3, -50.0, 100.0, 110.0, true),
        ]
    }

    #[test]
    fn summary_aggregates_trace() {
        let s = EpisodeSummary::from_records(Some(7), &trace()).unwrap();
        assert_eq!(s.steps, 3);
        assert_eq!(s.score, 1);
        assert_eq!(s.landings, 1);
        assert!((s.max_speed - 120.0).abs() < 1e-12);
        assert_eq!(s.min_fuel, 60.0);
        assert!((s.total_reward - 111.49).abs() < 1e-9);
        assert!(!s.completed);
    }

    #[test]
    fn empty_trace_has_no_summary() {
        assert!(EpisodeSummary::from_records(None, &[]).is_none());
    }

    #[test]
    fn json_output_is_valid() {
        let s = EpisodeSummary::from_records(Some(7), &trace()).unwrap();
        let mut buf = Vec::new();
        write_summary(&mut buf, &[s]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["seed"], 7);
        assert_eq!(value[0]["landings"], 1);
        assert_eq!(value[0]["crashed"], false);
    }
}
