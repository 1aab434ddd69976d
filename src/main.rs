use std::path::PathBuf;

use anyhow::Context;

use mars_lander::io::csv::write_trajectory_file;
use mars_lander::io::json::{write_summary, EpisodeSummary};
use mars_lander::io::StepRecord;
use mars_lander::pilot::{HeuristicPilot, Pilot};
use mars_lander::{LanderConfig, LanderEnv};

const EPISODES: u64 = 5;

/// Headless run: fly a few seeded episodes with the scripted pilot and
/// report how they went.
///
/// Usage: mars-lander [config.toml] [trajectory.csv]
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => LanderConfig::load(&path).with_context(|| format!("loading {path}"))?,
        None => LanderConfig::default(),
    };
    let csv_path = args.next().map(PathBuf::from);

    let dt = config.episode.fixed_dt;
    let mut env = LanderEnv::new(config, None);
    let mut pilot = HeuristicPilot::new();

    // -----------------------------------------------------------------------
    // Run episodes
    // -----------------------------------------------------------------------
    let mut summaries = Vec::new();
    let mut best: Option<(usize, Vec<StepRecord>)> = None;

    for seed in 0..EPISODES {
        let (mut obs, _) = env.reset(Some(seed));
        pilot.reset();
        let mut records = Vec::new();

        loop {
            let result = env.step(pilot.decide(&obs, dt));
            records.push(StepRecord::capture(env.simulation(), &result));
            let done = result.terminated || result.truncated;
            obs = result.observation;
            if done {
                break;
            }
        }

        let summary = EpisodeSummary::from_records(Some(seed), &records)
            .context("episode produced no steps")?;
        tracing::info!(seed, score = summary.score, reward = summary.total_reward, "episode done");

        if best.as_ref().map_or(true, |(score, _)| summary.score > *score) {
            best = Some((summary.score, records));
        }
        summaries.push(summary);
    }

    // -----------------------------------------------------------------------
    // Print results
    // -----------------------------------------------------------------------
    println!();
    println!("====================================================================");
    println!("  LANDER RUN  {} ({} episodes)", pilot.name(), EPISODES);
    println!("====================================================================");
    println!(
        "  {:>4}  {:>6}  {:>7}  {:>6}  {:>9}  {:>8}  {:>8}  {:>9}",
        "seed", "steps", "time", "score", "landings", "reward", "max spd", "outcome"
    );
    println!("  {}", "─".repeat(66));
    for s in &summaries {
        let outcome = if s.completed {
            "COMPLETE"
        } else if s.crashed {
            "CRASH"
        } else {
            "END"
        };
        println!(
            "  {:>4}  {:>6}  {:>6.1}s  {:>6}  {:>9}  {:>8.1}  {:>8.1}  {:>9}",
            s.seed.unwrap_or_default(),
            s.steps,
            s.duration_s,
            s.score,
            s.landings,
            s.total_reward,
            s.max_speed,
            outcome
        );
    }
    println!();

    let stdout = std::io::stdout();
    write_summary(&mut stdout.lock(), &summaries)?;

    if let (Some(path), Some((score, records))) = (csv_path, best) {
        write_trajectory_file(&path, &records)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("  Best trajectory (score {score}) written to {}", path.display());
    }

    Ok(())
}
