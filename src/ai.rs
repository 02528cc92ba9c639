//! Heuristic computer opponent
//!
//! Produces a [`PlayerInput`] from the visible game state. The controller
//! owns no simulation state, so the same instance can drive either side
//! and the headless demo can run two of them against each other.

use glam::Vec2;

use crate::config::GameConfig;
use crate::sim::{GameState, PlayerInput};

/// Movement deadband in tiles, below which the axis is left alone
const AXIS_DEADBAND: f32 = 0.1;

/// Simple heuristic controller for one side
#[derive(Debug, Clone, Copy)]
pub struct AiController {
    /// Index into `GameState::players`
    pub player_index: usize,
}

impl AiController {
    pub fn new(player_index: usize) -> Self {
        Self { player_index }
    }

    /// Decide this tick's input
    pub fn decide(&self, state: &GameState, config: &GameConfig) -> PlayerInput {
        let me = &state.players[self.player_index];
        let foe = &state.players[1 - self.player_index];

        let to_foe = foe.pos - me.pos;
        let distance = to_foe.length();

        // Raise the shield when the opponent has shots in flight nearby.
        // Shielding freezes forward motion, so only do it under threat.
        let shield = !foe.projectiles.is_empty()
            && distance < config.tiles_width / 3.0;

        let mut input = PlayerInput {
            shield,
            ..Default::default()
        };

        if !shield {
            // Head for the center line, detouring to a nearby pickup when
            // one sits on our half, and mirror the opponent vertically
            let mut target = Vec2::new(config.center_x(), foe.pos.y);
            if let Some(pickup) = state
                .pickups
                .iter()
                .filter(|p| same_half(p.pos.x, me.pos.x, config))
                .min_by(|a, b| {
                    a.pos
                        .distance(me.pos)
                        .total_cmp(&b.pos.distance(me.pos))
                })
            {
                target = pickup.pos;
            }

            if (target.x - me.pos.x).abs() > AXIS_DEADBAND {
                input.dx = (target.x - me.pos.x).signum();
            }
            if (target.y - me.pos.y).abs() > AXIS_DEADBAND {
                input.dy = (target.y - me.pos.y).signum();
            }

            // Fire whenever the opponent is in range; the player's own
            // cooldown meters the actual rate
            input.shoot = distance < config.tiles_width / 2.0;
        }

        input
    }
}

fn same_half(x: f32, me_x: f32, config: &GameConfig) -> bool {
    let center = config.center_x();
    (x < center) == (me_x < center)
}
