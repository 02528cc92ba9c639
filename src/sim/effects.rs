//! Status effects - timed speed modifiers attached to a player
//!
//! All effects are absolute game-clock deadlines checked lazily: an effect
//! is active iff `now < end_time`. Nothing here schedules callbacks or
//! sweeps timers; expiry falls out of the comparison on the next read.

use std::collections::BTreeMap;

use crate::config::GameConfig;

/// Timed effects applied by projectile hits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimedEffect {
    /// Target of an unshielded hit moves slower
    Slow,
    /// Shooter of a landed hit moves faster
    Speedup,
}

/// Toggleable abilities, each mapped to an expiry deadline.
///
/// New abilities get a variant here and an expiry entry, nothing else;
/// the expiry bookkeeping is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Ability {
    /// Player walks through walls
    Pierce,
    /// Player's shots punch through walls, marking them for destruction
    BulletPierce,
}

/// One speed bonus earned by blocking a shot; several may stack
#[derive(Debug, Clone, Copy)]
pub struct ShieldBoost {
    pub bonus: f32,
    pub expires: f64,
}

/// Per-player effect state
#[derive(Debug, Clone, Default)]
pub struct EffectTimers {
    /// Deadline of the current slow effect (inactive when in the past)
    pub slow_end: f64,
    /// Deadline of the current speedup effect
    pub speedup_end: f64,
    /// Stacked block boosts; expired entries are dropped lazily on read
    pub shield_boosts: Vec<ShieldBoost>,
    abilities: BTreeMap<Ability, f64>,
}

impl EffectTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_slowed(&self, now: f64) -> bool {
        now < self.slow_end
    }

    pub fn is_sped_up(&self, now: f64) -> bool {
        now < self.speedup_end
    }

    /// Start (or restart) a timed effect
    pub fn apply_timed(&mut self, kind: TimedEffect, duration: f32, now: f64) {
        let end = now + duration as f64;
        match kind {
            TimedEffect::Slow => self.slow_end = end,
            TimedEffect::Speedup => self.speedup_end = end,
        }
    }

    /// Extend an active speedup instead of restarting it (compounding
    /// pickup semantics: remaining time carries over).
    pub fn extend_speedup(&mut self, duration: f32, now: f64) {
        if self.is_sped_up(now) {
            self.speedup_end += duration as f64;
        } else {
            self.speedup_end = now + duration as f64;
        }
    }

    /// Record a successful shield block
    pub fn add_block_boost(&mut self, now: f64, config: &GameConfig) {
        self.shield_boosts.push(ShieldBoost {
            bonus: config.shield_boost_amount,
            expires: now + config.shield_boost_duration as f64,
        });
    }

    pub fn grant_ability(&mut self, ability: Ability, duration: f32, now: f64) {
        self.abilities.insert(ability, now + duration as f64);
    }

    pub fn ability_active(&self, ability: Ability, now: f64) -> bool {
        self.abilities.get(&ability).is_some_and(|end| now < *end)
    }

    /// Drop abilities whose deadline has passed
    pub fn expire_abilities(&mut self, now: f64) {
        self.abilities.retain(|_, end| now < *end);
    }

    /// Total movement multiplier at `now`.
    ///
    /// Base 1.0 plus unexpired block boosts (capped), then the slow or
    /// speedup factor multiplicatively. Slow and speedup are exclusive by
    /// construction (opposite sides of one hit), but slow wins if both
    /// deadlines are somehow in the future.
    pub fn total_speed_multiplier(&mut self, now: f64, config: &GameConfig) -> f32 {
        self.shield_boosts.retain(|b| now < b.expires);
        let boost: f32 = self.shield_boosts.iter().map(|b| b.bonus).sum();
        let base = 1.0 + boost.min(config.shield_boost_max);

        if self.is_slowed(now) {
            base * config.slow_factor
        } else if self.is_sped_up(now) {
            base * config.speedup_factor
        } else {
            base
        }
    }
}
