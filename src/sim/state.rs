//! Game state and entity types
//!
//! All simulation state lives here. Entities are plain structs owned by
//! `GameState`'s collections; nothing holds references into sibling
//! collections, and the tick orchestrator is the only mutator.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::input::InputSnapshot;
use super::rect::{Rect, orientation_from};
use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation advancing normally
    Running,
    /// Terminal: player health depleted
    GameOver,
}

/// One of the 8 compass directions the player can face.
///
/// Stored as the raw (dx, dy) key accumulated from held directions, with y
/// growing downward. (0, 0) is not a valid facing; both components stay in
/// {-1, 0, 1}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Facing {
    pub dx: i8,
    pub dy: i8,
}

impl Facing {
    pub const EAST: Self = Self { dx: 1, dy: 0 };

    /// Interpret an accumulated input delta as a facing.
    ///
    /// Returns `None` for (0, 0) - opposing keys cancelled - so the caller
    /// keeps its previous facing.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        if dx == 0 && dy == 0 {
            None
        } else {
            Some(Self {
                dx: dx.signum() as i8,
                dy: dy.signum() as i8,
            })
        }
    }

    /// Firing angle in degrees. Screen-space y is negated, so facing up
    /// reads as +90° and east as 0°.
    pub fn angle_deg(&self) -> f32 {
        (-(self.dy as f32)).atan2(self.dx as f32).to_degrees()
    }
}

impl Default for Facing {
    fn default() -> Self {
        Self::EAST
    }
}

/// One-tick visual cue on the player sprite.
///
/// Reset to `Neutral` at the start of every tick; collision resolution may
/// raise a cue for the presentation layer to flash. Distress is applied
/// after delight in tick order and therefore wins when both fire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerMood {
    #[default]
    Neutral,
    /// A projectile kill landed this tick.
    Delight,
    /// An enemy is in contact this tick.
    Distress,
}

/// Decrement-and-report health, shared by the player and enemies.
pub trait Health {
    /// Apply one point of damage, returning the new health. Health may go
    /// negative; consumers treat anything at or below zero as dead.
    fn take_hit(&mut self) -> i32;
}

/// The player character.
///
/// Created once at run start and never destroyed; the run ends instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub hp: i32,
    pub facing: Facing,
    pub speed: f32,
    pub mood: PlayerMood,
}

impl Player {
    pub fn new() -> Self {
        Self {
            rect: Rect::square(Vec2::new(PLAYER_START_X, PLAYER_START_Y), PLAYER_SIZE),
            hp: PLAYER_START_HP,
            facing: Facing::EAST,
            speed: PLAYER_SPEED,
            mood: PlayerMood::Neutral,
        }
    }

    /// Move by one full `speed` step per held cardinal and refresh the
    /// facing from the accumulated delta.
    ///
    /// Each held direction contributes independently, so diagonal movement
    /// covers `speed * sqrt(2)` per tick - deliberately not normalized.
    /// A delta that cancels to (0, 0) leaves the facing untouched.
    pub fn update_movement(&mut self, input: &InputSnapshot) {
        let mut sum = (0, 0);
        for (dx, dy) in input.held_deltas() {
            self.rect
                .translate(Vec2::new(self.speed * dx as f32, self.speed * dy as f32));
            sum.0 += dx;
            sum.1 += dy;
        }
        if let Some(facing) = Facing::from_delta(sum.0, sum.1) {
            self.facing = facing;
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Health for Player {
    fn take_hit(&mut self) -> i32 {
        self.hp -= 1;
        self.hp
    }
}

/// Which off-screen edge an enemy entered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnEdge {
    Left,
    Right,
    Top,
}

/// A homing enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub rect: Rect,
    pub hp: i32,
    pub edge: SpawnEdge,
    /// Recomputed from scratch every advance; unit length except when the
    /// enemy sits exactly on the player's center.
    pub vel: Vec2,
    pub speed: f32,
    /// Sprite variant index, fixed at spawn.
    pub variant: u8,
}

impl Enemy {
    /// Spawn just outside the viewport on a random edge, with the
    /// perpendicular coordinate uniform within the viewport.
    ///
    /// Positions are stored center-based; the spawn rule anchors the rect's
    /// top-left corner (left edge at `-width`, right edge at `VIEW_WIDTH`,
    /// top edge at `-height`), so convert after picking the corner.
    pub fn spawn(rng: &mut impl Rng, hp: i32) -> Self {
        let size = Vec2::splat(ENEMY_SIZE);
        let edge = match rng.random_range(0..3) {
            0 => SpawnEdge::Left,
            1 => SpawnEdge::Right,
            _ => SpawnEdge::Top,
        };
        let corner = match edge {
            SpawnEdge::Left => Vec2::new(-size.x, rng.random_range(0.0..=(VIEW_HEIGHT - size.y))),
            SpawnEdge::Right => {
                Vec2::new(VIEW_WIDTH, rng.random_range(0.0..=(VIEW_HEIGHT - size.y)))
            }
            SpawnEdge::Top => Vec2::new(rng.random_range(0.0..=(VIEW_WIDTH - size.x)), -size.y),
        };
        Self {
            rect: Rect::new(corner + size / 2.0, size),
            hp,
            edge,
            vel: Vec2::ZERO,
            speed: ENEMY_SPEED,
            variant: rng.random_range(0..ENEMY_VARIANTS),
        }
    }

    /// Re-aim at the player and take one homing step.
    ///
    /// A zero orientation (exactly coincident centers) holds position for
    /// that tick.
    pub fn advance(&mut self, player_rect: &Rect) {
        self.vel = orientation_from(&self.rect, player_rect);
        self.rect.translate(self.vel * self.speed);
    }

    /// Invariant after every advance: health at or below zero reads as
    /// dead, whoever zeroed it. The orchestrator removes dead enemies at
    /// the end of the pass.
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }
}

impl Health for Enemy {
    fn take_hit(&mut self) -> i32 {
        self.hp -= 1;
        self.hp
    }
}

/// A player projectile travelling on a fixed heading.
///
/// Projectiles never expire on their own and are never bounds-checked by
/// the core; they die on impact or when the driver discards them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub rect: Rect,
    /// Unit heading.
    pub vel: Vec2,
    pub speed: f32,
    /// Sprite rotation angle: the facing angle at fire time. Spread
    /// offsets steer the velocity but do not rotate the sprite.
    pub angle_deg: f32,
}

impl Projectile {
    /// Fire straight along the player's current facing.
    pub fn fire(player: &Player) -> Self {
        Self::fire_at_offset(player, 0.0)
    }

    /// Fire at an angular offset from the player's facing.
    ///
    /// The muzzle sits one player-box away from the player's center along
    /// the shot direction: `(width * vx, height * vy)`.
    pub fn fire_at_offset(player: &Player, offset_deg: f32) -> Self {
        let base_deg = player.facing.angle_deg();
        let rad = (base_deg + offset_deg).to_radians();
        let vel = Vec2::new(rad.cos(), -rad.sin());
        let center = player.rect.center + player.rect.size * vel;
        Self {
            rect: Rect::square(center, PROJECTILE_SIZE),
            vel,
            speed: PROJECTILE_SPEED,
            angle_deg: base_deg,
        }
    }

    /// The 3-shot spread volley: offsets evenly spaced from -30° to +31°
    /// inclusive, i.e. -30°, +0.5° and +31°.
    pub fn spread_volley(player: &Player) -> [Self; 3] {
        let step = (SPREAD_END_DEG - SPREAD_START_DEG) / (SPREAD_COUNT as f32 - 1.0);
        std::array::from_fn(|i| Self::fire_at_offset(player, SPREAD_START_DEG + i as f32 * step))
    }

    /// One linear step, unconditionally, every tick.
    pub fn advance(&mut self) {
        self.rect.translate(self.vel * self.speed);
    }
}

/// Transient death marker pinned where an enemy fell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Effect {
    pub rect: Rect,
    /// Remaining ticks; the effect dies once this drops below zero, so a
    /// life of 100 survives exactly 101 advances.
    pub life: i32,
}

impl Effect {
    /// Snapshot the host's bounding box; the marker does not follow it.
    pub fn spawn(host: Rect, life: i32) -> Self {
        Self { rect: host, life }
    }

    pub fn advance(&mut self) {
        self.life -= 1;
    }

    /// Which of the two flip frames to show, alternating every 10 ticks.
    pub fn frame(&self) -> usize {
        (self.life / 10).rem_euclid(2) as usize
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.life < 0
    }
}

/// Kill score. `add` is the only mutation path, so the value can never
/// decrease within a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    value: u32,
}

impl Score {
    pub fn add(&mut self, amount: u32) {
        self.value += amount;
    }

    #[inline]
    pub fn value(&self) -> u32 {
        self.value
    }
}

/// What the presentation layer needs to draw one entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpriteKind {
    Player { facing: Facing, mood: PlayerMood },
    Enemy { variant: u8 },
    Projectile { angle_deg: f32 },
    Effect { frame: usize },
}

/// A positioned drawable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub rect: Rect,
}

fn unseeded_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete simulation state for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed, kept for reproducibility reports.
    pub seed: u64,
    /// All spawn randomness (edge, perpendicular coordinate, sprite
    /// variant) draws from this generator and nowhere else.
    #[serde(skip, default = "unseeded_rng")]
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub score: Score,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub effects: Vec<Effect>,
}

impl GameState {
    /// Fresh run: full-health player mid-screen, empty collections.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            score: Score::default(),
            player: Player::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            effects: Vec::new(),
        }
    }

    /// Read-only enumeration of every live entity, in draw order, for the
    /// presentation layer.
    pub fn drawables(&self) -> impl Iterator<Item = Sprite> + '_ {
        let player = Sprite {
            kind: SpriteKind::Player {
                facing: self.player.facing,
                mood: self.player.mood,
            },
            rect: self.player.rect,
        };
        std::iter::once(player)
            .chain(self.projectiles.iter().map(|p| Sprite {
                kind: SpriteKind::Projectile {
                    angle_deg: p.angle_deg,
                },
                rect: p.rect,
            }))
            .chain(self.enemies.iter().map(|e| Sprite {
                kind: SpriteKind::Enemy { variant: e.variant },
                rect: e.rect,
            }))
            .chain(self.effects.iter().map(|fx| Sprite {
                kind: SpriteKind::Effect { frame: fx.frame() },
                rect: fx.rect,
            }))
    }
}
