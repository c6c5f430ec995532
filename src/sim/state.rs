//! Game state and run lifecycle

use super::actor::Actor;
use super::world::World;
use crate::config::{ConfigError, GameConfig};
use crate::consts::CAMERA_FOCUS_FRACTION;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Ball is moving and the world is scrolling
    Playing,
    /// Touched the ground after the first jump, or hit a platform
    GameOver,
    /// Passed every platform
    LevelComplete,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    /// Back on the ground after having jumped
    TouchedGround,
    /// Hit the side or underside of a platform
    HitPlatform,
}

/// Things that happened during the last tick, for audio/UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Jumped { charges_left: u8 },
    Landed { on_ground: bool },
    Scored { gained: u32, total: u32 },
    Died(DeathCause),
    LevelComplete,
    Restarted,
}

/// Complete state of a run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Validated, immutable for the run
    pub config: GameConfig,
    /// Base seed; each restart derives a new layout seed from it
    pub seed: u64,
    pub actor: Actor,
    pub world: World,
    /// Platforms passed this run
    pub score: u32,
    pub phase: GamePhase,
    /// Vertical camera shift (<= 0 while the ball climbs above the focus line)
    pub camera_offset_y: f32,
    /// Simulation ticks since the run started
    pub time_ticks: u64,
    /// Restarts since creation
    pub restarts: u32,
    /// Events emitted by the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Validate the config and set up a fresh run
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        let config = config.validate()?;

        let actor = Actor::new(&config);
        let mut world = World::new(config.total_platforms, seed);
        world.generate(&config);

        log::info!("New run with seed {seed}");

        Ok(Self {
            config,
            seed,
            actor,
            world,
            score: 0,
            phase: GamePhase::Playing,
            camera_offset_y: 0.0,
            time_ticks: 0,
            restarts: 0,
            events: Vec::new(),
        })
    }

    /// Layout seed for the current run
    pub fn run_seed(&self) -> u64 {
        self.seed
            .wrapping_add((self.restarts as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// Reset the ball and lay out a new level
    ///
    /// Only called between ticks.
    pub fn restart(&mut self) {
        self.restarts += 1;
        let seed = self.run_seed();

        self.actor.reset(&self.config);
        self.world.reseed(seed);
        self.world.generate(&self.config);
        self.score = 0;
        self.phase = GamePhase::Playing;
        self.camera_offset_y = 0.0;
        self.time_ticks = 0;
        self.events.push(GameEvent::Restarted);

        log::info!("Restarted (run {}, seed {seed})", self.restarts + 1);
    }

    /// Every platform slot has been passed at least once
    pub fn has_won(&self) -> bool {
        self.score as usize >= self.config.total_platforms
    }

    /// Keep the ball at the focus line once it climbs above it
    pub fn update_camera(&mut self) {
        let focus_y = self.config.screen_height as f32 * CAMERA_FOCUS_FRACTION;
        self.camera_offset_y = (self.actor.pos.y - focus_y).min(0.0);
    }

    pub fn is_over(&self) -> bool {
        self.phase != GamePhase::Playing
    }
}
