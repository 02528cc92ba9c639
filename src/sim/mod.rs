//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (players, then walls, then pickups)
//! - No rendering or platform dependencies

pub mod effects;
pub mod pickups;
pub mod player;
pub mod projectile;
pub mod rect;
pub mod state;
pub mod tick;
pub mod walls;

pub use effects::{Ability, EffectTimers, ShieldBoost, TimedEffect};
pub use pickups::{
    Pickup, PickupEffect, PickupRegistry, Targeting, generate_pickups, generate_pickups_with,
};
pub use player::{Player, Side, update_projectiles};
pub use projectile::{Projectile, SubstepPath};
pub use rect::Rect;
pub use state::{GameState, MatchPhase, MatchState};
pub use tick::{PlayerInput, TickInput, tick};
pub use walls::{Wall, generate_walls};
