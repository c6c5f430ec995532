//! Landing, collision and scoring queries against the platform world
//!
//! Landing is resolved first and reported as a value; the caller writes the
//! corrected position back into the actor. Collision runs afterwards so a
//! ball standing on a platform is not also counted as hitting it.

use glam::Vec2;

use super::geometry::circle_overlaps_rect;
use super::world::{Platform, World};
use crate::config::GameConfig;

/// Everything landing resolution needs to know about the actor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandingRequest {
    pub x: f32,
    /// Center Y before this frame's integration
    pub previous_y: f32,
    /// Center Y after this frame's integration
    pub current_y: f32,
    /// Vertical velocity (positive = falling)
    pub velocity: f32,
    pub radius: f32,
}

/// Outcome of landing resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandingResult {
    /// Came to rest on a platform or the ground this frame
    pub landed: bool,
    /// Corrected center Y
    pub y: f32,
    /// Corrected vertical velocity
    pub velocity: f32,
    /// The surface was the ground, not a platform
    pub on_ground: bool,
    /// Slot of the platform landed on
    pub platform: Option<usize>,
}

impl LandingResult {
    /// Still in the air: position and velocity pass through untouched
    pub fn airborne(request: &LandingRequest) -> Self {
        Self {
            landed: false,
            y: request.current_y,
            velocity: request.velocity,
            on_ground: false,
            platform: None,
        }
    }
}

/// Landing resolution against an arbitrary set of platforms
///
/// A platform qualifies when the bottom edge went from at or above its top
/// to at or below it this frame while falling. The highest qualifier wins.
pub(crate) fn resolve_landing_among(
    platforms: &[Platform],
    request: LandingRequest,
    config: &GameConfig,
) -> LandingResult {
    let radius = request.radius;

    let crossed = if request.velocity >= 0.0 {
        let previous_bottom = request.previous_y + radius;
        let current_bottom = request.current_y + radius;

        platforms
            .iter()
            .enumerate()
            .filter(|(_, p)| {
                current_bottom >= p.y_top
                    && previous_bottom <= p.y_top
                    && p.rect(config.platform_height).spans_x(request.x)
            })
            .min_by(|(_, a), (_, b)| a.y_top.total_cmp(&b.y_top))
    } else {
        None
    };

    if let Some((index, platform)) = crossed {
        LandingResult {
            landed: true,
            y: platform.y_top - radius,
            velocity: 0.0,
            on_ground: false,
            platform: Some(index),
        }
    } else if request.current_y > config.ground_y {
        LandingResult {
            landed: true,
            y: config.ground_y,
            velocity: 0.0,
            on_ground: true,
            platform: None,
        }
    } else {
        LandingResult::airborne(&request)
    }
}

/// Whether a ball at `center` overlaps any of the platform bodies
pub(crate) fn overlaps_any(
    platforms: &[Platform],
    center: Vec2,
    radius: f32,
    thickness: f32,
) -> bool {
    platforms
        .iter()
        .any(|p| circle_overlaps_rect(center, radius, &p.rect(thickness)))
}

impl World {
    /// Snap the actor onto the highest platform top it crossed this frame,
    /// or onto the ground if it fell past it
    ///
    /// The crossing test compares the previous and current bottom edges, so a
    /// fast fall that jumps clean through a thin platform still lands on it.
    pub fn resolve_landing(&self, request: LandingRequest, config: &GameConfig) -> LandingResult {
        resolve_landing_among(self.platforms(), request, config)
    }

    /// Whether the ball overlaps any platform body
    pub fn check_collision(&self, x: f32, y: f32, radius: f32, config: &GameConfig) -> bool {
        overlaps_any(
            self.platforms(),
            Vec2::new(x, y),
            radius,
            config.platform_height,
        )
    }

    /// Count every platform the ball has fully passed for the first time
    ///
    /// A platform is passed once its right edge is behind the ball's left edge.
    pub fn award_score(&mut self, x: f32, radius: f32) -> u32 {
        let left_edge = x - radius;
        let mut gained = 0;
        for platform in self.platforms_mut() {
            if !platform.counted && platform.right() < left_edge {
                platform.counted = true;
                gained += 1;
            }
        }
        gained
    }
}
