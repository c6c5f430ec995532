//! The ball
//!
//! Only vertical motion is simulated; the world scrolls past a fixed X.

use glam::Vec2;

use crate::config::GameConfig;
use crate::consts::MAX_JUMP_CHARGES;
use crate::wrap_degrees;

/// The player-controlled ball
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    /// Center position (x is fixed for the run)
    pub pos: Vec2,
    /// Vertical velocity (negative = moving up)
    pub vel_y: f32,
    /// Visual roll angle in degrees, [0, 360)
    pub rotation: f32,
    /// Jumps left before the next landing
    pub jump_charges: u8,
    pub is_jumping: bool,
    pub grounded: bool,
    /// Set by the first jump, cleared only by `reset`
    pub has_left_ground: bool,
    /// Seconds the current jump has been held
    pub jump_hold_timer: f32,
}

impl Actor {
    /// Create an actor at its start-of-run position
    pub fn new(config: &GameConfig) -> Self {
        let mut actor = Self {
            pos: Vec2::ZERO,
            vel_y: 0.0,
            rotation: 0.0,
            jump_charges: MAX_JUMP_CHARGES,
            is_jumping: false,
            grounded: true,
            has_left_ground: false,
            jump_hold_timer: 0.0,
        };
        actor.reset(config);
        actor
    }

    pub fn reset(&mut self, config: &GameConfig) {
        self.pos = Vec2::new(config.actor_start_x(), config.ground_y);
        self.vel_y = 0.0;
        self.rotation = 0.0;
        self.jump_charges = MAX_JUMP_CHARGES;
        self.is_jumping = false;
        self.grounded = true;
        self.has_left_ground = false;
        self.jump_hold_timer = 0.0;
    }

    /// Spend a charge on a jump; does nothing when none are left
    ///
    /// Returns whether the jump happened.
    pub fn start_jump(&mut self, config: &GameConfig) -> bool {
        if self.jump_charges == 0 {
            return false;
        }

        self.vel_y = config.jump_velocity;
        self.is_jumping = true;
        self.grounded = false;
        self.has_left_ground = true;
        self.jump_charges -= 1;
        self.jump_hold_timer = 0.0;
        true
    }

    /// Integrate one frame of vertical motion
    pub fn update(&mut self, dt: f32, config: &GameConfig, jump_held: bool) {
        self.vel_y += config.gravity * dt;

        // Holding jump adds lift, but only for the first max_jump_hold seconds
        if jump_held && self.is_jumping && self.jump_hold_timer < config.max_jump_hold {
            self.vel_y += config.jump_hold_accel * dt;
            self.jump_hold_timer += dt;
        }

        self.pos.y += self.vel_y * dt;

        self.rotation = wrap_degrees(self.rotation + config.roll_rate() * dt);
    }

    #[inline]
    pub fn can_jump(&self) -> bool {
        self.jump_charges > 0
    }

    /// Landing on anything refills both charges
    pub fn set_grounded(&mut self, grounded: bool) {
        self.grounded = grounded;
        if grounded {
            self.is_jumping = false;
            self.jump_charges = MAX_JUMP_CHARGES;
        }
    }

    #[inline]
    pub fn has_jumped_once(&self) -> bool {
        self.has_left_ground
    }

    /// Y of the bottom of the ball
    #[inline]
    pub fn bottom(&self, config: &GameConfig) -> f32 {
        self.pos.y + config.radius
    }
}
