//! Blockhop - a side-scrolling tile platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, enemies, level generation, session states)
//! - `scene`: Converts session state into draw commands for a render sink
//! - `render`: Render sink abstraction (filled rects, ellipses, text)
//! - `platform`: Frame pacing and time-derived seeding
//! - `settings`: JSON-backed run configuration

pub mod input;
pub mod platform;
pub mod render;
pub mod scene;
pub mod settings;
pub mod sim;

pub use input::InputSnapshot;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Viewport size in pixels
    pub const VIEW_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 600.0;
    /// Target simulation/render rate (one tick per frame)
    pub const TICK_HZ: u32 = 60;

    /// Terrain grid cell size in pixels
    pub const TILE_SIZE: f32 = 40.0;
    /// Row index of the main ground surface (one more row sits below it)
    pub const GROUND_ROW: i32 = 13;

    /// Vertical acceleration per frame, applied unconditionally
    pub const GRAVITY: f32 = 0.5;
    /// Horizontal velocity decay per frame when no direction is held
    pub const FRICTION: f32 = 0.8;
    /// Horizontal acceleration per frame while a direction is held
    pub const WALK_ACCEL: f32 = 0.5;
    /// Horizontal speed cap (both signs)
    pub const MAX_WALK_SPEED: f32 = 7.0;
    /// Below this magnitude horizontal velocity snaps to zero
    pub const SPEED_EPSILON: f32 = 0.1;
    /// Vertical impulse for a grounded jump
    pub const JUMP_IMPULSE: f32 = -14.0;
    /// Vertical impulse after stomping an enemy
    pub const STOMP_BOUNCE: f32 = -8.0;

    /// Player box edge length
    pub const PLAYER_SIZE: f32 = 32.0;
    /// Spawn position on every level load
    pub const PLAYER_SPAWN_X: f32 = 100.0;
    pub const PLAYER_SPAWN_Y: f32 = 100.0;
    pub const STARTING_LIVES: u8 = 3;
    /// Post-damage invulnerability window in frames
    pub const INVULN_FRAMES: u32 = 60;
    /// Visibility toggles every this many frames while invulnerable
    pub const INVULN_FLASH_PERIOD: u32 = 4;

    /// Falling past these world-Y values is lethal
    pub const PLAYER_KILL_PLANE: f32 = VIEW_HEIGHT + 100.0;
    pub const ENEMY_KILL_PLANE: f32 = VIEW_HEIGHT + 200.0;

    /// Stomp test: player bottom must be above enemy center-Y plus this
    pub const STOMP_TOLERANCE: f32 = 20.0;

    /// Score awards
    pub const QUESTION_SCORE: u32 = 100;
    pub const STOMP_SCORE: u32 = 200;
    pub const FLAG_BASE_BONUS: u32 = 1000;
    pub const FLAG_LIFE_BONUS: u32 = 500;
    pub const AXE_BONUS: u32 = 5000;

    /// Question-block bump animation
    pub const BUMP_FRAMES: u8 = 10;
    pub const BUMP_RAISE: f32 = 10.0;

    /// Patroller enemy
    pub const PATROLLER_SIZE: f32 = 32.0;
    pub const PATROLLER_SPEED: f32 = 2.0;

    /// Boss enemy
    pub const BOSS_SIZE: f32 = 60.0;
    pub const BOSS_SPEED: f32 = 1.0;
    pub const BOSS_JUMP_IMPULSE: f32 = -12.0;
    /// Frames before a jump may roll, then a per-frame chance applies
    pub const BOSS_JUMP_WARMUP: u32 = 120;
    pub const BOSS_JUMP_CHANCE: f32 = 0.05;
    /// One projectile every this many frames of boss age
    pub const BOSS_FIRE_PERIOD: u32 = 150;
    /// Patrol band relative to the boss home position
    pub const BOSS_PATROL_LEFT: f32 = 100.0;
    pub const BOSS_PATROL_RIGHT: f32 = 20.0;

    /// Boss projectile
    pub const PROJECTILE_W: f32 = 20.0;
    pub const PROJECTILE_H: f32 = 10.0;
    pub const PROJECTILE_SPEED: f32 = 5.0;

    /// Campaign shape
    pub const FINAL_STAGE: u8 = 32;
    pub const STAGES_PER_WORLD: u8 = 4;
    /// Duration of the between-stage card
    pub const TRANSITION_FRAMES: u32 = 120;
}

/// Convert a tile coordinate to pixels
#[inline]
pub fn tiles(n: f32) -> f32 {
    n * consts::TILE_SIZE
}
