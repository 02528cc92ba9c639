//! Player entities: movement, firing, shielding, progress
//!
//! Movement is clamped, never rejected with an error: the board boundary
//! and center line clamp the tentative position, then opponent and wall
//! overlap revert the offending axis. Projectile advancement lives here too
//! because a volley mutates both players' effect timers.

use glam::Vec2;

use super::effects::{Ability, EffectTimers, TimedEffect};
use super::projectile::{Projectile, SubstepPath};
use super::rect::Rect;
use super::walls::Wall;
use crate::config::{Color, GameConfig};
use crate::consts::{OPPONENT_BUFFER, PLAYER_SIZE, PROJECTILE_MAX_SUBSTEP};

/// Which half of the board a player defends; fixed for the whole match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Sign of forward motion along the race axis
    pub fn forward(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }

    /// Spawn position: outer edge of the home half, vertically centered
    pub fn spawn(self, config: &GameConfig) -> Vec2 {
        let y = (config.tiles_height / 2.0).floor() - 0.5;
        match self {
            Side::Left => Vec2::new(0.0, y),
            Side::Right => Vec2::new(config.tiles_width - PLAYER_SIZE, y),
        }
    }
}

/// A racing player
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner of the 1x1 footprint, in tiles
    pub pos: Vec2,
    pub side: Side,
    pub color: Color,
    pub effects: EffectTimers,
    /// Held shield input; while raised, only vertical movement is allowed
    /// and shooting is blocked
    pub shield_active: bool,
    /// Live shots owned by this player (deflected shots transfer ownership)
    pub projectiles: Vec<Projectile>,
    last_shot_time: f64,
}

impl Player {
    pub fn new(side: Side, config: &GameConfig) -> Self {
        let color = match side {
            Side::Left => config.player1_color,
            Side::Right => config.player2_color,
        };
        Self {
            pos: side.spawn(config),
            side,
            color,
            effects: EffectTimers::new(),
            shield_active: false,
            projectiles: Vec::new(),
            last_shot_time: f64::NEG_INFINITY,
        }
    }

    /// Back to the spawn state for a new round
    pub fn reset(&mut self, config: &GameConfig) {
        self.pos = self.side.spawn(config);
        self.effects = EffectTimers::new();
        self.shield_active = false;
        self.projectiles.clear();
        self.last_shot_time = f64::NEG_INFINITY;
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, PLAYER_SIZE)
    }

    pub fn is_slowed(&self, now: f64) -> bool {
        self.effects.is_slowed(now)
    }

    pub fn is_sped_up(&self, now: f64) -> bool {
        self.effects.is_sped_up(now)
    }

    /// Race progress in [0, 100]: 0 at spawn, 100 when the leading edge
    /// touches the center line. A pure function of position and side.
    pub fn progress(&self, config: &GameConfig) -> f32 {
        let center = config.center_x();
        let ratio = match self.side {
            Side::Left => self.pos.x / (center - PLAYER_SIZE),
            Side::Right => (config.tiles_width - PLAYER_SIZE - self.pos.x) / (center - PLAYER_SIZE),
        };
        (ratio * 100.0).clamp(0.0, 100.0)
    }

    /// Apply one frame of movement intent.
    ///
    /// `dx`/`dy` are the intent axes in {-1, 0, 1}. The shield zeroes `dx`
    /// (no advance or retreat while blocking). Board bounds and the center
    /// line clamp; opponent and wall overlap revert per axis.
    pub fn move_by(
        &mut self,
        dx: f32,
        dy: f32,
        dt: f32,
        now: f64,
        other: &Player,
        walls: &[Wall],
        config: &GameConfig,
    ) {
        self.effects.expire_abilities(now);

        let dx = if self.shield_active { 0.0 } else { dx };
        if dx == 0.0 && dy == 0.0 {
            return;
        }

        let multiplier = self.effects.total_speed_multiplier(now, config);
        let step = config.player_speed * dt * multiplier;
        let mut target = self.pos + Vec2::new(dx, dy) * step;

        // Board and center-line limits clamp the tentative position
        let (min_x, max_x) = match self.side {
            Side::Left => (0.0, config.center_x() - PLAYER_SIZE),
            Side::Right => (config.center_x(), config.tiles_width - PLAYER_SIZE),
        };
        target.x = target.x.clamp(min_x, max_x);
        target.y = target.y.clamp(0.0, config.tiles_height - PLAYER_SIZE);

        // Obstruction reverts the offending axis, x first
        let mut next = self.pos;
        if self.position_clear(Vec2::new(target.x, next.y), other, walls, config, now) {
            next.x = target.x;
        }
        if self.position_clear(Vec2::new(next.x, target.y), other, walls, config, now) {
            next.y = target.y;
        }
        self.pos = next;
    }

    /// Whether the player could stand at `pos` without overlapping the
    /// opponent or an undestroyed wall (walls ignored under Pierce)
    fn position_clear(
        &self,
        pos: Vec2,
        other: &Player,
        walls: &[Wall],
        config: &GameConfig,
        now: f64,
    ) -> bool {
        if (pos.x - other.pos.x).abs() < OPPONENT_BUFFER
            && (pos.y - other.pos.y).abs() < OPPONENT_BUFFER
        {
            return false;
        }

        if !self.effects.ability_active(Ability::Pierce, now) {
            let rect = Rect::square(pos, PLAYER_SIZE);
            for wall in walls.iter().filter(|w| !w.being_destroyed) {
                if rect.intersects(&wall.rect()) {
                    return false;
                }
            }
        }

        true
    }

    /// Fire a projectile from the muzzle (one tile forward). Silent no-op
    /// while shielded or on cooldown.
    pub fn shoot(&mut self, now: f64, config: &GameConfig) {
        if self.shield_active {
            return;
        }
        if now - self.last_shot_time < 1.0 / config.fire_rate as f64 {
            return;
        }
        let muzzle = self.pos + Vec2::new(self.side.forward(), 0.0);
        self.projectiles.push(Projectile::new(muzzle, self.side.forward()));
        self.last_shot_time = now;
    }
}

/// Advance the shooter's volley one frame against walls and the target.
///
/// Each projectile's frame displacement is scanned with sub-step samples;
/// the scan stops at the first hit. Wall hits destroy the projectile unless
/// the target's BulletPierce is active, in which case the wall is marked
/// for destruction and the bullet continues. A shielded target deflects the
/// bullet (ownership transfers, direction flips, speed doubles) and earns a
/// block boost; an unshielded hit slows the target and speeds the shooter.
pub fn update_projectiles(
    shooter: &mut Player,
    target: &mut Player,
    walls: &mut [Wall],
    dt: f32,
    now: f64,
    config: &GameConfig,
) {
    let bullet_pierce = target.effects.ability_active(Ability::BulletPierce, now);
    let projectiles = std::mem::take(&mut shooter.projectiles);
    let mut kept = Vec::with_capacity(projectiles.len());

    'volley: for mut projectile in projectiles {
        let from = projectile.pos;
        projectile.update(dt, config);
        let path = SubstepPath::new(from, projectile.pos, PROJECTILE_MAX_SUBSTEP);

        for sample in path.positions() {
            let rect = Rect::square(sample, config.projectile_size);

            for wall in walls.iter_mut().filter(|w| !w.being_destroyed) {
                if rect.intersects(&wall.rect()) {
                    if bullet_pierce {
                        wall.being_destroyed = true;
                    } else {
                        continue 'volley;
                    }
                }
            }

            if rect.intersects(&target.rect()) {
                if target.shield_active {
                    target.effects.add_block_boost(now, config);
                    projectile.pos = sample;
                    projectile.deflect();
                    target.projectiles.push(projectile);
                } else {
                    target
                        .effects
                        .apply_timed(TimedEffect::Slow, config.slow_duration, now);
                    shooter
                        .effects
                        .apply_timed(TimedEffect::Speedup, config.speedup_duration, now);
                }
                continue 'volley;
            }
        }

        // No hit: cull once fully off the board
        let off_board = projectile.pos.x < -config.projectile_size
            || projectile.pos.x > config.tiles_width
            || projectile.pos.y < -config.projectile_size
            || projectile.pos.y > config.tiles_height;
        if !off_board {
            kept.push(projectile);
        }
    }

    shooter.projectiles = kept;
}
