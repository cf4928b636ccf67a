//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only; one tick is one simulated frame
//! - Seeded RNG only, carried inside `GameState`
//! - No rendering, device polling or platform dependencies

pub mod input;
pub mod rect;
pub mod state;
pub mod tick;

pub use input::InputSnapshot;
pub use rect::{Rect, orientation_from};
pub use state::{
    Effect, Enemy, Facing, GamePhase, GameState, Health, Player, PlayerMood, Projectile, Score,
    SpawnEdge, Sprite, SpriteKind,
};
pub use tick::{TickResult, tick};
