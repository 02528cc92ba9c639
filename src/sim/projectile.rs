//! Projectiles and tunneling-safe path sampling
//!
//! Projectiles can cross several tiles per frame at high speed, so a single
//! start/end overlap test would skip thin walls. Collision scanning walks a
//! sub-stepped sample sequence along the frame's displacement instead.

use glam::Vec2;

use super::rect::Rect;
use crate::config::GameConfig;

/// A bullet in flight, owned by the player that fired (or deflected) it
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    /// Top-left corner, in tiles
    pub pos: Vec2,
    /// +1 travels right, -1 travels left
    pub direction: f32,
    /// Deflected shots travel back at double speed
    pub deflected: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, direction: f32) -> Self {
        Self {
            pos,
            direction,
            deflected: false,
        }
    }

    /// 2x for deflected shots, 1x otherwise
    pub fn speed_multiplier(&self) -> f32 {
        if self.deflected { 2.0 } else { 1.0 }
    }

    /// Integrate one frame of motion along the race axis
    pub fn update(&mut self, dt: f32, config: &GameConfig) {
        self.pos.x += self.direction * config.projectile_speed * self.speed_multiplier() * dt;
    }

    pub fn rect(&self, config: &GameConfig) -> Rect {
        Rect::square(self.pos, config.projectile_size)
    }

    /// Flip into the deflected state: direction reverses, speed doubles.
    /// Same entity, new state - the bullet keeps its identity.
    pub fn deflect(&mut self) {
        self.direction = -self.direction;
        self.deflected = true;
    }
}

/// Evenly spaced sample positions between two endpoints of one frame's
/// motion, at most `max_step` apart. Restartable: `positions()` can be
/// called any number of times.
#[derive(Debug, Clone, Copy)]
pub struct SubstepPath {
    from: Vec2,
    to: Vec2,
    steps: u32,
}

impl SubstepPath {
    pub fn new(from: Vec2, to: Vec2, max_step: f32) -> Self {
        let steps = (from.distance(to) / max_step).ceil() as u32;
        Self { from, to, steps }
    }

    /// Number of samples produced: `ceil(|d| / max_step) + 1`, always >= 1
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.steps as usize + 1
    }

    /// Lazy walk from `from` to `to` inclusive
    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        let steps = self.steps;
        (0..=steps).map(move |i| {
            if steps == 0 {
                self.from
            } else {
                self.from.lerp(self.to, i as f32 / steps as f32)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_update_moves_by_speed() {
        let config = GameConfig::default();
        let mut projectile = Projectile::new(Vec2::new(5.0, 10.0), 1.0);
        projectile.update(0.01, &config);
        assert!((projectile.pos.x - 6.0).abs() < 1e-5);
        assert_eq!(projectile.pos.y, 10.0);
    }

    #[test]
    fn test_deflected_moves_double() {
        let config = GameConfig::default();
        let mut projectile = Projectile::new(Vec2::new(20.0, 10.0), 1.0);
        projectile.deflect();
        assert!(projectile.deflected);
        assert_eq!(projectile.direction, -1.0);
        projectile.update(0.01, &config);
        assert!((projectile.pos.x - 18.0).abs() < 1e-5);
    }

    #[test]
    fn test_substep_short_displacement_is_two_endpoints() {
        let path = SubstepPath::new(Vec2::new(0.0, 0.0), Vec2::new(0.3, 0.0), 0.5);
        let samples: Vec<Vec2> = path.positions().collect();
        assert_eq!(samples, vec![Vec2::new(0.0, 0.0), Vec2::new(0.3, 0.0)]);
    }

    #[test]
    fn test_substep_zero_displacement_single_sample() {
        let p = Vec2::new(2.0, 3.0);
        let path = SubstepPath::new(p, p, 0.5);
        assert_eq!(path.positions().collect::<Vec<_>>(), vec![p]);
    }

    #[test]
    fn test_substep_restartable() {
        let path = SubstepPath::new(Vec2::ZERO, Vec2::new(2.0, 0.0), 0.5);
        let first: Vec<Vec2> = path.positions().collect();
        let second: Vec<Vec2> = path.positions().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }

    proptest! {
        // Sample count is ceil(|d| / max_step) + 1 and consecutive
        // spacing never exceeds max_step
        #[test]
        fn prop_substep_coverage(dx in -30.0f32..30.0, dy in -10.0f32..10.0) {
            let max_step = 0.5;
            let from = Vec2::new(3.0, 7.0);
            let to = from + Vec2::new(dx, dy);
            let path = SubstepPath::new(from, to, max_step);

            let d = from.distance(to);
            let expected = (d / max_step).ceil() as usize + 1;
            let samples: Vec<Vec2> = path.positions().collect();
            prop_assert_eq!(samples.len(), expected);
            prop_assert_eq!(samples.len(), path.len());

            for pair in samples.windows(2) {
                prop_assert!(pair[0].distance(pair[1]) <= max_step + 1e-4);
            }
            prop_assert_eq!(*samples.first().unwrap(), from);
            prop_assert_eq!(*samples.last().unwrap(), to);
        }
    }
}
