//! Swarm Rush - a top-down swarm shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, tier policies, collisions)
//!
//! Asset loading, windowing, input-device polling and audio are external
//! collaborators. The crate's only binary is a headless demo driver that
//! feeds the simulation synthetic input at the fixed tick rate.

pub mod sim;

/// Game configuration constants
pub mod consts {
    /// Viewport dimensions (pixels)
    pub const VIEW_WIDTH: f32 = 1600.0;
    pub const VIEW_HEIGHT: f32 = 900.0;

    /// Fixed tick rate the driver holds the loop to
    pub const TICK_RATE_HZ: u32 = 50;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 900.0;
    pub const PLAYER_START_Y: f32 = 400.0;
    pub const PLAYER_START_HP: i32 = 100;
    pub const PLAYER_SPEED: f32 = 10.0;
    pub const PLAYER_SIZE: f32 = 60.0;

    /// Enemy defaults - slower than player and projectiles
    pub const ENEMY_SPEED: f32 = 2.0;
    pub const ENEMY_SIZE: f32 = 80.0;
    /// Sprite variants to pick from at spawn
    pub const ENEMY_VARIANTS: u8 = 2;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 15.0;
    pub const PROJECTILE_SIZE: f32 = 20.0;

    /// Death effect lifetime in ticks
    pub const EFFECT_LIFE_TICKS: i32 = 100;

    /// Score awarded per kill
    pub const KILL_REWARD: u32 = 30;

    /// Firing tiers: the rapid cadence unlocks at 100 points, the spread
    /// volley replaces the single shot at 200
    pub const RAPID_FIRE_SCORE: u32 = 100;
    pub const SPREAD_FIRE_SCORE: u32 = 200;
    pub const BASE_FIRE_INTERVAL: u64 = 10;
    pub const RAPID_FIRE_INTERVAL: u64 = 5;

    /// Spread volley fan: 3 shots evenly spaced from -30° to +31°.
    /// The end stop is 31, not 30, so the middle shot lands at +0.5°.
    pub const SPREAD_COUNT: usize = 3;
    pub const SPREAD_START_DEG: f32 = -30.0;
    pub const SPREAD_END_DEG: f32 = 31.0;

    /// Spawn tiers: past 300 points, bigger batches of tougher enemies
    /// arrive on a faster cadence
    pub const SURGE_SCORE: u32 = 300;
    pub const BASE_SPAWN_INTERVAL: u64 = 300;
    pub const SURGE_SPAWN_INTERVAL: u64 = 200;
    pub const BASE_SPAWN_COUNT: usize = 5;
    pub const SURGE_SPAWN_COUNT: usize = 10;
    pub const BASE_ENEMY_HP: i32 = 2;
    pub const SURGE_ENEMY_HP: i32 = 3;
}
