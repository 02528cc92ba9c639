//! Per-frame simulation tick
//!
//! Orchestration supplies `dt`, a monotonic `now`, and the per-player
//! intent vector; one call advances every subsystem in a fixed order:
//! wall pruning, movement, shooting, projectiles, pickup collection,
//! win evaluation, then phase transitions.

use super::pickups::PickupRegistry;
use super::player::update_projectiles;
use super::state::{GameState, MatchPhase};
use crate::config::GameConfig;

/// One player's intent for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerInput {
    /// Horizontal intent in {-1, 0, 1} (positive = right)
    pub dx: f32,
    /// Vertical intent in {-1, 0, 1} (positive = down)
    pub dy: f32,
    /// Fire this tick (cooldown still applies)
    pub shoot: bool,
    /// Shield held down
    pub shield: bool,
}

/// Complete input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub players: [PlayerInput; 2],
    /// Confirm a finished round and move on
    pub confirm: bool,
}

/// Advance the whole simulation by one frame
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    now: f64,
    config: &GameConfig,
    registry: &PickupRegistry,
) {
    match state.match_state.phase {
        MatchPhase::Countdown => {
            if state.match_state.tick_countdown(now) {
                log::debug!("round {} started", state.match_state.current_round);
            }
        }
        MatchPhase::Playing => play_tick(state, input, dt, now, config, registry),
        MatchPhase::RoundOver => {
            if input.confirm {
                state.match_state.advance_round(now, config);
                if state.match_state.phase == MatchPhase::Countdown {
                    state.regenerate_round(config, registry);
                }
            }
        }
        MatchPhase::MatchOver => {}
    }
}

fn play_tick(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    now: f64,
    config: &GameConfig,
    registry: &PickupRegistry,
) {
    // Walls pierced last frame disappear now
    state.walls.retain(|w| !w.being_destroyed);

    let (left, right) = state.players.split_at_mut(1);
    let p1 = &mut left[0];
    let p2 = &mut right[0];
    let [in1, in2] = input.players;

    p1.shield_active = in1.shield;
    p2.shield_active = in2.shield;

    p1.move_by(in1.dx, in1.dy, dt, now, p2, &state.walls, config);
    p2.move_by(in2.dx, in2.dy, dt, now, p1, &state.walls, config);

    if in1.shoot {
        p1.shoot(now, config);
    }
    if in2.shoot {
        p2.shoot(now, config);
    }

    update_projectiles(p1, p2, &mut state.walls, dt, now, config);
    update_projectiles(p2, p1, &mut state.walls, dt, now, config);

    // Pickup collection: rebuild the retained set, player 1 checked first,
    // each pickup applied at most once
    let pickups = std::mem::take(&mut state.pickups);
    let mut remaining = Vec::with_capacity(pickups.len());
    for pickup in pickups {
        let rect = pickup.rect(config);
        if rect.intersects(&p1.rect()) {
            registry.apply(&pickup, p1, p2, now, config);
        } else if rect.intersects(&p2.rect()) {
            registry.apply(&pickup, p2, p1, now, config);
        } else {
            remaining.push(pickup);
        }
    }
    state.pickups = remaining;

    // Win evaluation
    if p1.progress(config) >= 100.0 {
        state.match_state.record_round_win(0, config);
    } else if p2.progress(config) >= 100.0 {
        state.match_state.record_round_win(1, config);
    }
}
