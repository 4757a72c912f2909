//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - One tick per frame, frame counters instead of wall time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod camera;
pub mod enemy;
pub mod level;
pub mod physics;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use physics::{StepOutcome, WallResponse, step_actor};
pub use rect::Rect;
pub use state::{
    BlockKind, BossState, Enemy, EnemyKind, Facing, Hazard, Level, Phase, Player, Session,
    TerrainBlock, Theme, stage_in_world, stage_seed, world_of,
};
pub use tick::tick;
