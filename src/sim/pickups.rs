//! Collectible pickups: open kind registry and guarded placement
//!
//! Kinds are registered into a process-scoped table before the simulation
//! starts; the generator and collection code never name concrete kinds, so
//! adding one means implementing [`PickupEffect`] and registering it.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::player::{Player, Side};
use super::rect::Rect;
use super::walls::Wall;
use crate::config::{Color, GameConfig};

/// Who a pickup's effect lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Targeting {
    /// Mutates the player who collected it
    Collector,
    /// Mutates the collector's opponent
    Opponent,
}

/// Behavior of one pickup kind. `apply` runs exactly once per pickup.
pub trait PickupEffect {
    fn targeting(&self) -> Targeting;
    fn color(&self, config: &GameConfig) -> Color;
    fn apply(&self, collector: &mut Player, opponent: &mut Player, now: f64, config: &GameConfig);
}

/// Speeds up the collector; repeat collections extend the remaining time
struct SpeedBoost;

impl PickupEffect for SpeedBoost {
    fn targeting(&self) -> Targeting {
        Targeting::Collector
    }

    fn color(&self, config: &GameConfig) -> Color {
        config.speed_boost_color
    }

    fn apply(&self, collector: &mut Player, _opponent: &mut Player, now: f64, config: &GameConfig) {
        collector.effects.extend_speedup(config.speed_boost_duration, now);
    }
}

/// Slows the collector's opponent
struct SpeedDebuff;

impl PickupEffect for SpeedDebuff {
    fn targeting(&self) -> Targeting {
        Targeting::Opponent
    }

    fn color(&self, config: &GameConfig) -> Color {
        config.speed_debuff_color
    }

    fn apply(&self, _collector: &mut Player, opponent: &mut Player, now: f64, config: &GameConfig) {
        opponent.effects.apply_timed(
            super::effects::TimedEffect::Slow,
            config.speed_debuff_duration,
            now,
        );
    }
}

/// A placed, uncollected pickup
#[derive(Debug, Clone, Copy)]
pub struct Pickup {
    /// Top-left corner, in tiles
    pub pos: Vec2,
    /// Registry key of the kind
    pub kind: &'static str,
    pub color: Color,
    /// Placed by the forced fallback path; spacing guardrails may be
    /// violated for this one
    pub fallback: bool,
}

impl Pickup {
    pub fn rect(&self, config: &GameConfig) -> Rect {
        Rect::square(self.pos, config.object_size)
    }
}

/// Process-scoped table of pickup kinds, immutable after setup.
///
/// Re-registering a key silently overwrites. Spawning an unregistered kind
/// is a programmer error (kinds are statically known) and panics.
pub struct PickupRegistry {
    kinds: BTreeMap<&'static str, Box<dyn PickupEffect>>,
}

impl PickupRegistry {
    pub fn new() -> Self {
        Self {
            kinds: BTreeMap::new(),
        }
    }

    /// Registry preloaded with the builtin kinds
    pub fn with_builtin_kinds() -> Self {
        let mut registry = Self::new();
        registry.register("speed_boost", Box::new(SpeedBoost));
        registry.register("speed_debuff", Box::new(SpeedDebuff));
        registry
    }

    pub fn register(&mut self, kind: &'static str, effect: Box<dyn PickupEffect>) {
        self.kinds.insert(kind, effect);
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Registered keys in stable (sorted) order
    pub fn kind_names(&self) -> Vec<&'static str> {
        self.kinds.keys().copied().collect()
    }

    fn effect(&self, kind: &str) -> &dyn PickupEffect {
        match self.kinds.get(kind) {
            Some(effect) => effect.as_ref(),
            None => panic!("pickup kind {kind:?} is not registered"),
        }
    }

    pub fn targeting(&self, kind: &str) -> Targeting {
        self.effect(kind).targeting()
    }

    /// Instantiate a pickup of a registered kind
    pub fn spawn(&self, kind: &'static str, pos: Vec2, config: &GameConfig) -> Pickup {
        Pickup {
            pos,
            kind,
            color: self.effect(kind).color(config),
            fallback: false,
        }
    }

    /// Run a pickup's effect with the collector/opponent pairing
    pub fn apply(
        &self,
        pickup: &Pickup,
        collector: &mut Player,
        opponent: &mut Player,
        now: f64,
        config: &GameConfig,
    ) {
        self.effect(pickup.kind)
            .apply(collector, opponent, now, config);
    }
}

impl Default for PickupRegistry {
    fn default() -> Self {
        Self::with_builtin_kinds()
    }
}

/// Legal x band for one side, honoring the border and center-line guardrails
fn side_band(side: Side, config: &GameConfig) -> (f32, f32) {
    let border = config.min_distance_from_border;
    let center_gap = config.min_distance_from_center_line;
    let size = config.object_size;
    match side {
        Side::Left => (border, config.center_x() - center_gap - size),
        Side::Right => (
            config.center_x() + center_gap,
            config.tiles_width - size - border,
        ),
    }
}

/// Generate the pickup set for a round.
///
/// The target count splits exactly between sides (odd remainder to a random
/// side, left slots generated first). Each slot rejection-samples against
/// the spacing guardrails and wall overlap inside its side band; after the
/// attempt budget the last candidate is accepted with `fallback` set, so
/// every slot is always filled.
pub fn generate_pickups(
    rng: &mut Pcg32,
    walls: &[Wall],
    config: &GameConfig,
    registry: &PickupRegistry,
) -> Vec<Pickup> {
    generate_pickups_with(rng, walls, config, registry, |rng, kinds| {
        kinds[rng.random_range(0..kinds.len())]
    })
}

/// Like [`generate_pickups`], but with a caller-supplied kind chooser
/// replacing the uniform draw (weighted distributions, fixed sequences
/// for tests). The chooser sees the registered kinds in stable order.
pub fn generate_pickups_with(
    rng: &mut Pcg32,
    walls: &[Wall],
    config: &GameConfig,
    registry: &PickupRegistry,
    mut choose_kind: impl FnMut(&mut Pcg32, &[&'static str]) -> &'static str,
) -> Vec<Pickup> {
    let mut pickups = Vec::new();
    if !config.objects_enabled || registry.is_empty() {
        return pickups;
    }

    let kinds = registry.kind_names();
    let total = config.num_objects_per_match;
    let mut left = total / 2;
    let mut right = total / 2;
    if total % 2 == 1 {
        if rng.random_bool(0.5) {
            left += 1;
        } else {
            right += 1;
        }
    }

    let spawns = [Side::Left.spawn(config), Side::Right.spawn(config)];

    for (side, count) in [(Side::Left, left), (Side::Right, right)] {
        let (min_x, max_x) = side_band(side, config);
        let min_y = config.min_distance_from_border;
        let max_y = config.tiles_height - config.object_size - config.min_distance_from_border;

        for _ in 0..count {
            let mut accepted = None;
            let mut candidate = Vec2::new(min_x, min_y);

            for _ in 0..config.object_generation_max_attempts {
                let pos = Vec2::new(
                    rng.random_range(min_x..max_x),
                    rng.random_range(min_y..max_y),
                );
                candidate = pos;

                let near_spawn = spawns
                    .iter()
                    .any(|s| pos.distance(*s) < config.min_distance_from_player);
                let near_pickup = pickups
                    .iter()
                    .any(|p: &Pickup| pos.distance(p.pos) < config.min_distance_between_objects);
                let rect = Rect::square(pos, config.object_size);
                let on_wall = walls.iter().any(|w| rect.intersects(&w.rect()));

                if !near_spawn && !near_pickup && !on_wall {
                    accepted = Some(pos);
                    break;
                }
            }

            let kind = choose_kind(rng, &kinds);
            let pickup = match accepted {
                Some(pos) => registry.spawn(kind, pos, config),
                None => {
                    // Forced placement: keep the last sampled y, clamp x
                    // inside the side band
                    let pos = Vec2::new(candidate.x.clamp(min_x, max_x), candidate.y);
                    log::warn!("pickup slot fell back to forced placement at {pos}");
                    Pickup {
                        fallback: true,
                        ..registry.spawn(kind, pos, config)
                    }
                }
            };
            pickups.push(pickup);
        }
    }

    pickups
}
