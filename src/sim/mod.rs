//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module renders, polls input
//! or sleeps:
//! - Caller-supplied frame delta only
//! - Seeded RNG only
//! - Fixed-size platform and cloud arenas

pub mod actor;
pub mod autopilot;
pub mod collision;
pub mod geometry;
pub mod state;
pub mod tick;
pub mod world;

pub use actor::Actor;
pub use collision::{LandingRequest, LandingResult};
pub use geometry::{Rect, circle_overlaps_rect};
pub use state::{DeathCause, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use world::{Decoration, Platform, World};
