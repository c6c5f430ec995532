//! Demo-mode pilot
//!
//! Plays by lookahead. Each candidate input is run forward through the same
//! actor physics, landing and collision code the tick uses, against a private
//! copy of the platforms in reach, and the pilot takes whichever comes down
//! furthest from a platform edge.

use super::actor::Actor;
use super::collision::{LandingRequest, overlaps_any, resolve_landing_among};
use super::state::GameState;
use super::tick::TickInput;
use super::world::Platform;
use crate::config::GameConfig;
use crate::consts::SIM_DT;

/// Longest trajectory followed before it counts as lost
const HORIZON_SECONDS: f32 = 4.0;
/// Landing margin a double jump needs while the ball is still rising
const RISING_DOUBLE_JUMP_MARGIN: f32 = 20.0;
/// Slack when matching the ball's bottom against the top it stands on
const SUPPORT_SLACK: f32 = 0.5;

/// Result of one simulated frame
enum Frame {
    Flying,
    /// At rest; `None` is the ground before the first jump
    Resting(Option<usize>),
    /// Dead: ground after a jump, or a platform body
    Lost,
}

/// Advance a private actor and platform copy by one frame, in tick order
fn step(config: &GameConfig, actor: &mut Actor, platforms: &mut [Platform], held: bool) -> Frame {
    let previous_y = actor.pos.y;
    actor.update(SIM_DT, config, held);

    let shift = config.scroll_speed * SIM_DT;
    for platform in platforms.iter_mut() {
        platform.x -= shift;
    }

    let landing = resolve_landing_among(
        platforms,
        LandingRequest {
            x: actor.pos.x,
            previous_y,
            current_y: actor.pos.y,
            velocity: actor.vel_y,
            radius: config.radius,
        },
        config,
    );
    actor.pos.y = landing.y;
    actor.vel_y = landing.velocity;

    if overlaps_any(platforms, actor.pos, config.radius, config.platform_height) {
        Frame::Lost
    } else if landing.on_ground {
        if actor.has_jumped_once() {
            Frame::Lost
        } else {
            Frame::Resting(None)
        }
    } else if landing.landed {
        Frame::Resting(landing.platform)
    } else {
        Frame::Flying
    }
}

/// Platforms near the ball plus the hold lengths worth comparing
struct Lookahead<'a> {
    config: &'a GameConfig,
    platforms: Vec<Platform>,
    /// Candidate hold lengths in frames, shortest first
    holds: Vec<usize>,
    /// Frames that cover the whole hold window
    full_hold: usize,
}

impl<'a> Lookahead<'a> {
    fn new(state: &'a GameState) -> Self {
        let config = &state.config;
        let x = state.actor.pos.x;
        let reach = x + config.scroll_speed * HORIZON_SECONDS + 2.0 * config.radius;
        let platforms = state
            .world
            .platforms()
            .iter()
            .filter(|p| p.right() >= x - config.radius && p.x <= reach)
            .copied()
            .collect();

        let full_hold = (config.max_jump_hold / SIM_DT).ceil() as usize + 1;
        let mut holds: Vec<usize> = (0..full_hold).step_by(2).collect();
        holds.push(full_hold);

        Self {
            config,
            platforms,
            holds,
            full_hold,
        }
    }

    /// Play a trajectory out and score where it comes down
    ///
    /// The score is the distance from the landing point to the nearer edge of
    /// the platform, or negative infinity when the ball is lost or comes back
    /// down on `exclude`.
    fn follow(
        &self,
        actor: &Actor,
        platforms: &[Platform],
        jump: bool,
        hold: usize,
        exclude: Option<usize>,
    ) -> f32 {
        let mut actor = actor.clone();
        let mut platforms = platforms.to_vec();
        if jump {
            actor.start_jump(self.config);
        }

        let frames = (HORIZON_SECONDS / SIM_DT) as usize;
        for frame in 0..frames {
            match step(self.config, &mut actor, &mut platforms, frame < hold) {
                Frame::Flying => {}
                Frame::Resting(Some(index)) if Some(index) != exclude => {
                    let platform = platforms[index];
                    return (actor.pos.x - platform.x).min(platform.right() - actor.pos.x);
                }
                Frame::Resting(_) | Frame::Lost => return f32::NEG_INFINITY,
            }
        }
        f32::NEG_INFINITY
    }

    /// Best score over every candidate hold, with the hold that earns it
    fn best(
        &self,
        actor: &Actor,
        platforms: &[Platform],
        jump: bool,
        exclude: Option<usize>,
    ) -> (f32, usize) {
        self.holds
            .iter()
            .map(|&hold| (self.follow(actor, platforms, jump, hold, exclude), hold))
            .fold((f32::NEG_INFINITY, 0), |best, option| {
                if option.0 > best.0 { option } else { best }
            })
    }

    /// Platform the ball is standing on, if any
    fn support(&self, actor: &Actor) -> Option<usize> {
        let bottom = actor.bottom(self.config);
        self.platforms.iter().position(|p| {
            p.rect(self.config.platform_height).spans_x(actor.pos.x)
                && (p.y_top - bottom).abs() <= SUPPORT_SLACK
        })
    }

    /// Standing: leave as soon as waiting another frame would land no better,
    /// or right away if the surface is about to run out
    fn takeoff(&self, actor: &Actor) -> (bool, usize) {
        let support = self.support(actor);
        let (now, hold) = self.best(actor, &self.platforms, true, support);

        let mut waited = actor.clone();
        let mut platforms = self.platforms.clone();
        if !matches!(
            step(self.config, &mut waited, &mut platforms, false),
            Frame::Resting(_)
        ) {
            let hold = if now.is_finite() { hold } else { self.full_hold };
            return (true, hold);
        }

        let (next, _) = self.best(&waited, &platforms, true, support);
        if now > 0.0 && now >= next {
            (true, hold)
        } else {
            (false, 0)
        }
    }

    /// Airborne: keep holding while a longer hold lands better, and spend the
    /// spare charge once the current arc is lost
    fn in_flight(&self, actor: &Actor) -> (bool, usize) {
        let (coast, hold) = self.best(actor, &self.platforms, false, None);
        if coast.is_finite() || !actor.can_jump() {
            return (false, hold);
        }

        let (jump, hold) = self.best(actor, &self.platforms, true, None);
        let falling = actor.vel_y > 0.0;
        if jump > 0.0 && (falling || jump >= RISING_DOUBLE_JUMP_MARGIN) {
            (true, hold)
        } else {
            (false, 0)
        }
    }
}

/// Pick this frame's input for demo / headless play
pub fn steer(state: &GameState) -> TickInput {
    let lookahead = Lookahead::new(state);
    let (jump_pressed, hold) = if state.actor.grounded {
        lookahead.takeoff(&state.actor)
    } else {
        lookahead.in_flight(&state.actor)
    };

    TickInput {
        jump_pressed,
        jump_held: hold > 0,
        autopilot: true,
    }
}
