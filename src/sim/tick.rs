//! Per-frame simulation step
//!
//! Runs the fixed sequence: actor physics, world scroll, landing, grounding,
//! ground death, scoring, win check, platform collision. Collision has to come
//! after landing or a ball standing on a platform would count as hitting it.

use super::autopilot;
use super::collision::LandingRequest;
use super::state::{DeathCause, GameEvent, GamePhase, GameState};

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump button went down this frame (edge-triggered)
    pub jump_pressed: bool,
    /// Jump button is currently down
    pub jump_held: bool,
    /// Demo mode - the autopilot decides when to jump
    pub autopilot: bool,
}

/// Advance the game by `dt` seconds
///
/// `dt` is whatever the frame took; nothing here assumes it is constant.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    // Finished runs only listen for restart
    if state.is_over() {
        if input.jump_pressed {
            state.restart();
        }
        return;
    }

    let input = if input.autopilot {
        autopilot::steer(state)
    } else {
        input.clone()
    };

    state.time_ticks += 1;

    if input.jump_pressed && state.actor.can_jump() && state.actor.start_jump(&state.config) {
        state.events.push(GameEvent::Jumped {
            charges_left: state.actor.jump_charges,
        });
    }

    let previous_y = state.actor.pos.y;
    state.actor.update(dt, &state.config, input.jump_held);
    state.world.scroll(dt, &state.config);

    let landing = state.world.resolve_landing(
        LandingRequest {
            x: state.actor.pos.x,
            previous_y,
            current_y: state.actor.pos.y,
            velocity: state.actor.vel_y,
            radius: state.config.radius,
        },
        &state.config,
    );
    state.actor.pos.y = landing.y;
    state.actor.vel_y = landing.velocity;

    let was_grounded = state.actor.grounded;
    state.actor.set_grounded(landing.landed);
    if landing.landed && !was_grounded {
        log::debug!(
            "Landed on {} at y={:.1}",
            if landing.on_ground { "ground" } else { "platform" },
            landing.y
        );
        state.events.push(GameEvent::Landed {
            on_ground: landing.on_ground,
        });
    }

    state.update_camera();

    let mut death = None;
    if landing.on_ground && state.actor.has_jumped_once() {
        death = Some(DeathCause::TouchedGround);
    }

    let gained = state
        .world
        .award_score(state.actor.pos.x, state.config.radius);
    if gained > 0 {
        state.score += gained;
        state.events.push(GameEvent::Scored {
            gained,
            total: state.score,
        });
    }

    let won = state.has_won();

    if state.world.check_collision(
        state.actor.pos.x,
        state.actor.pos.y,
        state.config.radius,
        &state.config,
    ) && death.is_none()
    {
        death = Some(DeathCause::HitPlatform);
    }

    // A death in the same frame as the final point still ends the run as a loss
    if let Some(cause) = death {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::Died(cause));
        log::info!(
            "Game over ({:?}) with score {}/{}",
            cause,
            state.score,
            state.config.total_platforms
        );
    } else if won {
        state.phase = GamePhase::LevelComplete;
        state.events.push(GameEvent::LevelComplete);
        log::info!("Level complete after {} ticks", state.time_ticks);
    }
}
