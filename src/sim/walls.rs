//! Wall obstacles and the mirrored layout generator
//!
//! Walls are placed by rejection sampling on the left half only; every
//! accepted wall is reflected across the center line, so the two sides are
//! mirror images by construction rather than by validation.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::player::Side;
use super::rect::Rect;
use crate::config::GameConfig;
use crate::consts::{SPAWN_CLEARANCE, WALL_MAX_ATTEMPTS};

/// A static obstacle blocking players and projectiles.
///
/// `pos` anchors the bottom-left corner; the rect extends upward.
#[derive(Debug, Clone, Copy)]
pub struct Wall {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Set when pierced by a bullet; the tick removes marked walls on the
    /// next frame. Never cleared.
    pub being_destroyed: bool,
}

impl Wall {
    pub fn new(x: f32, y: f32, config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(x, y),
            width: config.wall_width,
            height: config.wall_height,
            being_destroyed: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y - self.height, self.width, self.height)
    }
}

/// Generate the full wall set for a round.
///
/// Candidates are sampled on the left half with center-to-center spacing of
/// at least `wall_min_distance` from every accepted left-side wall, no
/// overlap, and clearance around the left spawn. After the attempt budget
/// the last candidate is accepted as-is so generation is total.
pub fn generate_walls(rng: &mut Pcg32, config: &GameConfig) -> Vec<Wall> {
    let mut walls = Vec::new();
    if !config.walls_enabled {
        return walls;
    }

    let spawn = Side::Left.spawn(config);
    let min_x = 2.0;
    let max_x = config.center_x() - config.wall_width - 1.0;
    let min_y = config.wall_height;
    let max_y = config.tiles_height - 0.5;

    for _ in 0..config.num_walls_per_side {
        let mut accepted = None;
        let mut candidate = (min_x, min_y);

        for attempt in 0..WALL_MAX_ATTEMPTS {
            let x = rng.random_range(min_x..max_x);
            let y = rng.random_range(min_y..max_y);
            candidate = (x, y);

            let wall = Wall::new(x, y, config);

            // Left-side walls already placed (even indices)
            let left_side = walls.iter().step_by(2);
            let too_close = left_side
                .clone()
                .any(|w: &Wall| w.rect().center_distance(&wall.rect()) < config.wall_min_distance);
            let overlaps = left_side.clone().any(|w| w.rect().intersects(&wall.rect()));
            let in_spawn_zone = (x - spawn.x).abs() < SPAWN_CLEARANCE
                && (y - spawn.y).abs() < SPAWN_CLEARANCE;

            if !too_close && !overlaps && !in_spawn_zone {
                accepted = Some((x, y));
                if attempt > 0 {
                    log::debug!("wall placed after {} attempts", attempt + 1);
                }
                break;
            }
        }

        let (x, y) = accepted.unwrap_or_else(|| {
            log::warn!(
                "wall placement budget exhausted, accepting last candidate at ({:.1}, {:.1})",
                candidate.0,
                candidate.1
            );
            candidate
        });

        walls.push(Wall::new(x, y, config));
        let mirrored_x = config.tiles_width - x - config.wall_width;
        walls.push(Wall::new(mirrored_x, y, config));
    }

    walls
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    #[test]
    fn test_rect_is_bottom_anchored() {
        let config = GameConfig::default();
        let wall = Wall::new(5.0, 10.0, &config);
        let rect = wall.rect();
        assert_eq!(rect.y, 10.0 - config.wall_height);
        assert_eq!(rect.h, config.wall_height);
        assert_eq!(rect.w, config.wall_width);
    }

    #[test]
    fn test_disabled_generates_nothing() {
        let config = GameConfig {
            walls_enabled: false,
            ..GameConfig::default()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(generate_walls(&mut rng, &config).is_empty());
    }

    #[test]
    fn test_generation_is_total() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let walls = generate_walls(&mut rng, &config);
        assert_eq!(walls.len(), 2 * config.num_walls_per_side as usize);
    }

    #[test]
    fn test_left_walls_keep_min_distance() {
        // Roomy config so the attempt budget is never exhausted
        let config = GameConfig {
            num_walls_per_side: 2,
            wall_min_distance: 3.0,
            ..GameConfig::default()
        };
        for seed in 0..20u64 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let walls = generate_walls(&mut rng, &config);
            let left: Vec<&Wall> = walls.iter().step_by(2).collect();
            for i in 0..left.len() {
                for j in (i + 1)..left.len() {
                    let d = left[i].rect().center_distance(&left[j].rect());
                    assert!(d >= config.wall_min_distance, "seed {seed}: distance {d}");
                }
            }
        }
    }

    #[test]
    fn test_walls_stay_on_their_side() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let walls = generate_walls(&mut rng, &config);
        let center = config.center_x();
        for pair in walls.chunks(2) {
            assert!(pair[0].pos.x + pair[0].width <= center);
            assert!(pair[1].pos.x >= center);
        }
    }

    proptest! {
        // Every left wall has a mirror partner at the reflected x
        #[test]
        fn prop_mirror_symmetry(seed in 0u64..500) {
            let config = GameConfig::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let walls = generate_walls(&mut rng, &config);
            prop_assert_eq!(walls.len() % 2, 0);
            for pair in walls.chunks(2) {
                let expected = config.tiles_width - pair[0].pos.x - config.wall_width;
                prop_assert!((pair[1].pos.x - expected).abs() < 1e-5);
                prop_assert_eq!(pair[0].pos.y, pair[1].pos.y);
            }
        }
    }
}
