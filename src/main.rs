//! Swarm Arena headless runner
//!
//! Drives the simulation at a fixed step with the autopilot, routes events
//! to the logging audio sink and prints the final frame snapshot as JSON.
//!
//! Usage: `swarm-arena [--seed N] [--ticks N] [--tuning FILE] [--settings FILE]`

use std::path::PathBuf;

use clap::Parser;
use swarm_arena::audio::{AudioManager, LogAudioSink};
use swarm_arena::consts::*;
use swarm_arena::demo::Autopilot;
use swarm_arena::highscores::format_survived;
use swarm_arena::input::InputState;
use swarm_arena::sim::{GameState, tick};
use swarm_arena::{Settings, Tuning};

/// Command line options
#[derive(Debug, Parser)]
#[command(name = "swarm-arena", about = "Headless Swarm Arena run driven by the autopilot")]
struct Options {
    /// Seed for the run's random stream
    #[arg(long, default_value_t = 0x5EED)]
    seed: u64,
    /// Fixed steps to simulate (one minute by default)
    #[arg(long, default_value_t = 60 * SIM_HZ as u64)]
    ticks: u64,
    /// Balance overrides (JSON)
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Player preferences (JSON)
    #[arg(long)]
    settings: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    let options = Options::parse();

    let tuning = options
        .tuning
        .as_deref()
        .map(Tuning::load)
        .unwrap_or_default();
    let settings = options
        .settings
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();

    let mut audio = AudioManager::new(LogAudioSink, &settings);
    let sfx_volume = settings.effect_volume();
    let mut state = GameState::with_config(options.seed, tuning, settings);
    log::info!(
        "Swarm Arena (headless) seed={} ticks={} sfx volume {:.2}",
        state.seed,
        options.ticks,
        sfx_volume
    );

    let mut pilot = Autopilot::new();
    let mut input = InputState::new();

    for _ in 0..options.ticks {
        input.update(&pilot.next_input(&state));
        tick(&mut state, &input, SIM_DT);
        audio.handle_events(&state.events);
    }

    for (i, entry) in state.scores.entries.iter().enumerate() {
        log::info!(
            "#{} {} points, level {}, {}",
            i + 1,
            entry.score,
            entry.level,
            format_survived(entry.survived_secs)
        );
    }

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let options =
            Options::try_parse_from(["swarm-arena", "--seed", "42", "--ticks", "10"]).unwrap();
        assert_eq!(options.seed, 42);
        assert_eq!(options.ticks, 10);
        assert!(options.tuning.is_none());

        let defaults = Options::try_parse_from(["swarm-arena"]).unwrap();
        assert_eq!(defaults.seed, 0x5EED);
        assert_eq!(defaults.ticks, 60 * SIM_HZ as u64);

        assert!(Options::try_parse_from(["swarm-arena", "--seed"]).is_err());
        assert!(Options::try_parse_from(["swarm-arena", "--bogus"]).is_err());
        assert!(Options::try_parse_from(["swarm-arena", "--ticks", "many"]).is_err());
    }
}
