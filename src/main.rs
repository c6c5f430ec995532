//! Sky Hop headless runner
//!
//! Plays one run on autopilot at a fixed timestep and logs what happened.
//! Usage: `sky-hop [config.json] [seed] [seconds] [display_height]`

use sky_hop::consts::SIM_DT;
use sky_hop::sim::{GameEvent, GameState, TickInput, tick};
use sky_hop::{ConfigError, GameConfig};

const DEFAULT_SEED: u64 = 0x5EED;
const DEFAULT_SECONDS: f32 = 120.0;

fn main() -> Result<(), ConfigError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Sky Hop (headless) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let seed = parse_arg(args.next(), "seed", DEFAULT_SEED);
    let seconds = parse_arg(args.next(), "seconds", DEFAULT_SECONDS);
    let config = match args.next() {
        Some(raw) => {
            let height = parse_arg(Some(raw), "display_height", config.screen_height as f32);
            config.with_display_height(height)
        }
        None => config,
    };

    let mut state = GameState::new(config, seed)?;
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let max_ticks = (seconds / SIM_DT).ceil() as u64;

    while state.time_ticks < max_ticks && !state.is_over() {
        tick(&mut state, &input, SIM_DT);

        for event in &state.events {
            match event {
                GameEvent::Scored { total, .. } => {
                    log::debug!("Score {}/{}", total, state.config.total_platforms)
                }
                GameEvent::Jumped { charges_left } => {
                    log::trace!("Jump ({} charge(s) left)", charges_left)
                }
                _ => {}
            }
        }
    }

    log::info!(
        "Finished: {:?} after {:.1}s, score {}/{}, final y={:.0}",
        state.phase,
        state.time_ticks as f32 * SIM_DT,
        state.score,
        state.config.total_platforms,
        state.actor.pos.y
    );
    Ok(())
}

/// Parse an optional positional argument, falling back on bad input
fn parse_arg<T: std::str::FromStr + Copy + std::fmt::Display>(
    arg: Option<String>,
    name: &str,
    default: T,
) -> T {
    match arg {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Invalid {name} '{raw}', using {default}");
            default
        }),
    }
}
