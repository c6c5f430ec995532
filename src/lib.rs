//! Sky Hop - a side-scrolling ball climber
//!
//! Core modules:
//! - `sim`: Simulation (actor physics, platform world, landing, scoring)
//! - `config`: Tunable game parameters, validation and display scaling

pub mod config;
pub mod sim;

pub use config::{ConfigError, GameConfig};

/// Fixed constants that are not exposed as tunables
pub mod consts {
    /// Simulation timestep used by the headless runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Screen height the default physics values were tuned against
    pub const BASE_SCREEN_HEIGHT: f32 = 450.0;

    /// Actor sits at this fraction of the screen width for the whole run
    pub const ACTOR_X_FRACTION: f32 = 0.25;
    /// Jump charges on a full refill (double jump)
    pub const MAX_JUMP_CHARGES: u8 = 2;

    /// First platform cursor starts this far past the right screen edge
    pub const PLATFORM_SPAWN_OFFSET: f32 = 200.0;
    /// First platform top sits this far above the ground line
    pub const FIRST_PLATFORM_RISE: f32 = 20.0;
    /// Platform is recycled once its right edge passes x = -margin
    pub const PLATFORM_DESPAWN_MARGIN: f32 = 60.0;

    /// Clouds
    pub const CLOUD_DESPAWN_MARGIN: f32 = 40.0;
    pub const CLOUD_INITIAL_SPREAD: f32 = 600.0;
    pub const CLOUD_RESPAWN_MIN_OFFSET: f32 = 80.0;
    pub const CLOUD_RESPAWN_MAX_OFFSET: f32 = 280.0;
    pub const CLOUD_MIN_Y: f32 = 40.0;
    pub const CLOUD_MIN_WIDTH: f32 = 70.0;
    pub const CLOUD_MAX_WIDTH: f32 = 130.0;
    pub const CLOUD_ASPECT: f32 = 0.6;
    pub const CLOUD_MIN_SPEED: f32 = 15.0;
    pub const CLOUD_MAX_SPEED: f32 = 35.0;

    /// Camera keeps the actor at this fraction of the screen height while climbing
    pub const CAMERA_FOCUS_FRACTION: f32 = 0.4;
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
