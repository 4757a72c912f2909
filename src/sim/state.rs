//! Session state and core simulation types
//!
//! Everything the simulation mutates lives here: terrain, enemies, the
//! player, the active level, and the session state machine around them.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::level;
use super::rect::Rect;
use crate::consts::*;
use crate::input::InputSnapshot;

/// Which way the player last moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

/// Visual/terrain palette for a stage, fixed by its position within a world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Overworld,
    Underground,
    Sky,
    Castle,
}

impl Theme {
    /// Stage-within-world (1..=4) to theme
    pub fn for_stage_in_world(sw: u8) -> Self {
        match sw {
            2 => Theme::Underground,
            3 => Theme::Sky,
            4 => Theme::Castle,
            _ => Theme::Overworld,
        }
    }
}

/// World number (1..=8) for an absolute stage index
#[inline]
pub fn world_of(stage: u8) -> u8 {
    (stage - 1) / STAGES_PER_WORLD + 1
}

/// Position within the world (1..=4) for an absolute stage index
#[inline]
pub fn stage_in_world(stage: u8) -> u8 {
    (stage - 1) % STAGES_PER_WORLD + 1
}

/// Terrain block variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    /// Brick filler
    Normal,
    /// Ground/staircase material
    Solid,
    /// Reward block; turns Empty when struck from below
    Question,
    /// A spent reward block
    Empty,
    /// Pipe body and rim segments
    Pipe,
}

/// One static terrain block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainBlock {
    pub rect: Rect,
    pub kind: BlockKind,
    /// Rest Y; the box returns here when the bump animation ends
    pub base_y: f32,
    /// Frames remaining of the bounce-up after a reward hit
    pub bump_timer: u8,
}

impl TerrainBlock {
    pub fn new(rect: Rect, kind: BlockKind) -> Self {
        let base_y = rect.y;
        Self {
            rect,
            kind,
            base_y,
            bump_timer: 0,
        }
    }

    /// Struck from below: a Question block spends itself and starts bouncing
    pub fn hit(&mut self) {
        if self.kind == BlockKind::Question {
            self.kind = BlockKind::Empty;
            self.bump_timer = BUMP_FRAMES;
        }
    }

    /// Advance the bump animation; the raised box participates in collision
    pub fn tick_bump(&mut self) {
        if self.bump_timer > 0 {
            self.rect.y = self.base_y - BUMP_RAISE;
            self.bump_timer -= 1;
        } else {
            self.rect.y = self.base_y;
        }
    }
}

/// A lethal-on-contact region (lava pits, castle gaps, bridges)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hazard(pub Rect);

/// Boss-specific state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossState {
    /// Patrol anchor; the boss walks [home_x - 100, home_x + 20]
    pub home_x: f32,
    /// Frames since spawn; drives projectile cadence
    pub age: u32,
    /// Frames since the last jump
    pub jump_timer: u32,
    /// In-flight projectiles, oldest first
    pub projectiles: Vec<Rect>,
}

/// Behavior variants for enemies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Walks at constant speed, reversing off walls
    Patroller,
    Boss(BossState),
}

/// A dynamic hostile entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub rect: Rect,
    pub vel: Vec2,
    pub alive: bool,
    pub kind: EnemyKind,
}

impl Enemy {
    pub fn patroller(x: f32, y: f32) -> Self {
        Self {
            rect: Rect::new(x, y, PATROLLER_SIZE, PATROLLER_SIZE),
            vel: Vec2::new(-PATROLLER_SPEED, 0.0),
            alive: true,
            kind: EnemyKind::Patroller,
        }
    }

    pub fn boss(x: f32, y: f32) -> Self {
        Self {
            rect: Rect::new(x, y, BOSS_SIZE, BOSS_SIZE),
            vel: Vec2::new(-BOSS_SPEED, 0.0),
            alive: true,
            kind: EnemyKind::Boss(BossState {
                home_x: x,
                age: 0,
                jump_timer: 0,
                projectiles: Vec::new(),
            }),
        }
    }

    pub fn is_boss(&self) -> bool {
        matches!(self.kind, EnemyKind::Boss(_))
    }

    /// Mark dead; a boss drops its in-flight projectiles with it
    pub fn kill(&mut self) {
        self.alive = false;
        if let EnemyKind::Boss(boss) = &mut self.kind {
            boss.projectiles.clear();
        }
    }
}

/// The player-controlled actor; stats persist across level loads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub vel: Vec2,
    pub facing: Facing,
    pub on_ground: bool,
    pub lives: u8,
    pub coins: u32,
    pub score: u32,
    /// Frames of damage immunity remaining
    pub invuln_frames: u32,
    pub dead: bool,
}

impl Player {
    pub fn new() -> Self {
        Self {
            rect: Rect::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y, PLAYER_SIZE, PLAYER_SIZE),
            vel: Vec2::ZERO,
            facing: Facing::Right,
            on_ground: false,
            lives: STARTING_LIVES,
            coins: 0,
            score: 0,
            invuln_frames: 0,
            dead: false,
        }
    }

    /// Back to the spawn point; lives/coins/score are untouched
    pub fn respawn(&mut self) {
        self.rect.x = PLAYER_SPAWN_X;
        self.rect.y = PLAYER_SPAWN_Y;
        self.vel = Vec2::ZERO;
        self.on_ground = false;
        self.dead = false;
        self.invuln_frames = 0;
    }

    /// Lethal contact. A no-op while the invulnerability window is open.
    pub fn take_damage(&mut self) {
        if self.invuln_frames > 0 {
            return;
        }
        self.dead = true;
        self.lives = self.lives.saturating_sub(1);
        self.invuln_frames = INVULN_FRAMES;
    }

    /// Whether the flashing effect hides the body this frame
    pub fn is_flashing(&self) -> bool {
        self.invuln_frames > 0 && (self.invuln_frames / INVULN_FLASH_PERIOD) % 2 == 0
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// One playable stage: terrain, enemies, hazards, and the goal trigger.
/// Replaced wholesale on every stage transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub terrain: Vec<TerrainBlock>,
    pub enemies: Vec<Enemy>,
    pub hazards: Vec<Hazard>,
    pub theme: Theme,
    /// Level width in pixels
    pub width: f32,
    /// Overlapping this box ends the stage successfully
    pub goal: Option<Rect>,
}

/// Top-level session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Menu,
    Play,
    Transition,
}

/// A full play session: the state machine plus everything it owns
#[derive(Debug, Clone)]
pub struct Session {
    pub phase: Phase,
    /// Current stage index, always within [1, 32]
    pub stage: u8,
    /// Frames left on the between-stage card
    pub transition_frames: u32,
    /// Set when the final stage's goal is reached
    pub campaign_complete: bool,
    /// Run seed; stage layouts and boss behavior derive from it
    pub seed: u64,
    pub rng: Pcg32,
    pub player: Player,
    pub level: Level,
    pub camera: Camera,
    /// Previous frame's snapshot, for press edge detection
    pub prev_input: InputSnapshot,
}

impl Session {
    /// New session in the menu, with stage 1 already generated
    pub fn new(seed: u64) -> Self {
        let level = level::generate(1, stage_seed(seed, 1));
        let camera = Camera::new(level.width);
        Self {
            phase: Phase::Menu,
            stage: 1,
            transition_frames: 0,
            campaign_complete: false,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(),
            level,
            camera,
            prev_input: InputSnapshot::default(),
        }
    }

    /// Start (or restart) a run from the menu: stats reset, stage 1 loads
    pub fn start_run(&mut self) {
        self.stage = 1;
        self.campaign_complete = false;
        self.player.lives = STARTING_LIVES;
        self.player.score = 0;
        self.player.coins = 0;
        self.reload_stage();
        self.phase = Phase::Play;
    }

    /// Regenerate the current stage and reset the player's position.
    /// Lives, coins, and score persist.
    pub fn reload_stage(&mut self) {
        self.level = level::generate(self.stage, stage_seed(self.seed, self.stage));
        self.camera = Camera::new(self.level.width);
        self.player.respawn();
    }

    /// Clamp-guarded stage setter; the generator never sees an index
    /// outside [1, 32]
    pub fn set_stage(&mut self, stage: u8) {
        self.stage = stage.clamp(1, FINAL_STAGE);
    }
}

/// Per-stage layout seed derived from the run seed
pub fn stage_seed(run_seed: u64, stage: u8) -> u64 {
    (stage as u64).wrapping_mul(2654435761).wrapping_add(run_seed)
}
