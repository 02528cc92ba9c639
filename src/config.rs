//! Game configuration - the parameter table
//!
//! All tunable balance values live here. The table is loaded once at
//! simulation start (JSON file with defaults fallback) and treated as
//! immutable by the core; only `tile_size_in_pixels` is consumed by a
//! presentation layer rather than the simulation itself.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// RGB color triple, consumed by the presentation layer
pub type Color = [u8; 3];

/// Complete parameter table for a match
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Board ===
    /// Board width in tiles
    pub tiles_width: f32,
    /// Board height in tiles
    pub tiles_height: f32,
    /// Tile-to-pixel scale (rendering only, never read by the simulation)
    pub tile_size_in_pixels: u32,

    // === Players ===
    /// Movement speed in tiles per second
    pub player_speed: f32,
    pub player1_color: Color,
    pub player2_color: Color,

    // === Shooting ===
    /// Shots per second
    pub fire_rate: f32,
    /// Projectile travel speed in tiles per second
    pub projectile_speed: f32,
    /// Projectile footprint in tiles
    pub projectile_size: f32,
    pub projectile_color: Color,
    /// Target speed multiplier while slowed
    pub slow_factor: f32,
    /// Seconds a hit slows the target
    pub slow_duration: f32,
    /// Shooter speed multiplier after a hit
    pub speedup_factor: f32,
    /// Seconds a hit speeds up the shooter
    pub speedup_duration: f32,

    // === Shield ===
    /// Seconds each block boost lasts
    pub shield_boost_duration: f32,
    /// Speed bonus per successful block
    pub shield_boost_amount: f32,
    /// Cap on the summed block bonuses
    pub shield_boost_max: f32,

    // === Walls ===
    pub walls_enabled: bool,
    /// Walls generated on each side (total is twice this)
    pub num_walls_per_side: u32,
    pub wall_width: f32,
    pub wall_height: f32,
    /// Minimum center-to-center spacing between walls on one side
    pub wall_min_distance: f32,
    pub wall_color: Color,

    // === Pickups ===
    pub objects_enabled: bool,
    /// Pickups generated per match, split evenly between sides
    pub num_objects_per_match: u32,
    /// Pickup footprint in tiles
    pub object_size: f32,
    /// Placement guardrails, all in tiles
    pub min_distance_from_border: f32,
    pub min_distance_from_center_line: f32,
    pub min_distance_from_player: f32,
    pub min_distance_between_objects: f32,
    /// Placement attempts per slot before the forced fallback
    pub object_generation_max_attempts: u32,
    /// Seconds of speedup granted by a speed-boost pickup
    pub speed_boost_duration: f32,
    pub speed_boost_color: Color,
    /// Seconds of slow inflicted by a speed-debuff pickup
    pub speed_debuff_duration: f32,
    pub speed_debuff_color: Color,

    // === Rounds ===
    /// First to this many round wins takes the match
    pub rounds_to_win: u32,
    /// Total length of the pre-round countdown in seconds
    pub countdown_duration: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tiles_width: 40.0,
            tiles_height: 20.0,
            tile_size_in_pixels: 20,

            player_speed: 5.0,
            player1_color: [255, 0, 0],
            player2_color: [0, 0, 255],

            fire_rate: 5.0,
            projectile_speed: 100.0,
            projectile_size: 1.0,
            projectile_color: [0, 0, 0],
            slow_factor: 0.5,
            slow_duration: 2.0,
            speedup_factor: 1.5,
            speedup_duration: 1.0,

            shield_boost_duration: 4.0,
            shield_boost_amount: 0.05,
            shield_boost_max: 0.5,

            walls_enabled: true,
            num_walls_per_side: 3,
            wall_width: 0.5,
            wall_height: 3.0,
            wall_min_distance: 4.0,
            wall_color: [80, 80, 80],

            objects_enabled: true,
            num_objects_per_match: 10,
            object_size: 1.0,
            min_distance_from_border: 1.0,
            min_distance_from_center_line: 2.0,
            min_distance_from_player: 3.0,
            min_distance_between_objects: 2.0,
            object_generation_max_attempts: 100,
            speed_boost_duration: 3.0,
            speed_boost_color: [255, 215, 0],
            speed_debuff_duration: 2.0,
            speed_debuff_color: [128, 0, 128],

            rounds_to_win: 3,
            countdown_duration: 2.0,
        }
    }
}

impl GameConfig {
    /// Horizontal center of the board (the finish line), in tiles
    pub fn center_x(&self) -> f32 {
        self.tiles_width / 2.0
    }

    /// Load a config file, falling back to defaults if missing or malformed
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Bad config file {}: {} - using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No config at {} - using defaults", path.display());
                Self::default()
            }
        }
    }
}
