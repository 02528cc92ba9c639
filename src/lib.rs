//! Center Rush - a two-player center-line racing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, projectiles, walls, pickups, match state)
//! - `config`: Data-driven game balance (the parameter table)
//! - `ai`: Heuristic controller for a computer-driven opponent
//!
//! Rendering and raw input live outside this crate: the simulation consumes
//! a per-tick intent vector plus `(dt, current_time)` and exposes plain
//! state (positions, progress, effect flags) for a presentation layer to read.

pub mod ai;
pub mod config;
pub mod sim;

pub use config::GameConfig;

/// Fixed game constants (everything tweakable lives in [`GameConfig`])
pub mod consts {
    /// Simulation timestep used by the headless runner and tests (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Player footprint, in tiles (players occupy a 1x1 square)
    pub const PLAYER_SIZE: f32 = 1.0;

    /// Minimum per-axis separation between the two players, in tiles
    pub const OPPONENT_BUFFER: f32 = 1.1;

    /// Maximum spacing between projectile collision samples, in tiles.
    /// Half the smallest entity width, so nothing 1 tile wide can be skipped.
    pub const PROJECTILE_MAX_SUBSTEP: f32 = 0.5;

    /// Clearance kept around player spawn points during wall generation
    pub const SPAWN_CLEARANCE: f32 = 1.5;

    /// Attempt budget for wall placement before falling back to a clamped spot
    pub const WALL_MAX_ATTEMPTS: u32 = 100;
}
