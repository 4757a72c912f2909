//! Per-frame enemy behavior
//!
//! Dispatch is over the `EnemyKind` tag: Patrollers walk and turn, the Boss
//! patrols a band around its home position, jumps on a timed random roll, and
//! emits projectiles on a fixed cadence. Both share the terrain resolver with
//! the player.

use rand::Rng;
use rand_pcg::Pcg32;

use super::physics::{WallResponse, step_actor};
use super::rect::Rect;
use super::state::{BossState, Enemy, EnemyKind, Level, TerrainBlock};
use crate::consts::*;

/// Advance every live enemy one frame. Dead enemies are skipped here and
/// compacted by the session after the tick.
pub fn update_all(level: &mut Level, rng: &mut Pcg32) {
    let Level {
        terrain, enemies, ..
    } = level;

    for enemy in enemies.iter_mut() {
        if !enemy.alive {
            continue;
        }
        let Enemy {
            rect,
            vel,
            alive,
            kind,
        } = enemy;
        match kind {
            EnemyKind::Patroller => {
                step_actor(rect, vel, terrain, WallResponse::Reverse);
                if rect.y > ENEMY_KILL_PLANE {
                    *alive = false;
                }
            }
            EnemyKind::Boss(boss) => update_boss(rect, vel, boss, terrain, rng),
        }
    }
}

fn update_boss(
    rect: &mut Rect,
    vel: &mut glam::Vec2,
    boss: &mut BossState,
    terrain: &[TerrainBlock],
    rng: &mut Pcg32,
) {
    boss.age += 1;
    boss.jump_timer += 1;

    // Patrol band around the home position
    if rect.x < boss.home_x - BOSS_PATROL_LEFT {
        vel.x = BOSS_SPEED;
    }
    if rect.x > boss.home_x + BOSS_PATROL_RIGHT {
        vel.x = -BOSS_SPEED;
    }

    // The roll is consumed every frame past the warmup; it only lands while
    // grounded, and only then does the warmup restart
    if boss.jump_timer > BOSS_JUMP_WARMUP
        && rng.random::<f32>() < BOSS_JUMP_CHANCE
        && vel.y == 0.0
    {
        vel.y = BOSS_JUMP_IMPULSE;
        boss.jump_timer = 0;
    }

    step_actor(rect, vel, terrain, WallResponse::Reverse);

    if boss.age % BOSS_FIRE_PERIOD == 0 {
        boss.projectiles.push(Rect::new(
            rect.x,
            rect.y + 20.0,
            PROJECTILE_W,
            PROJECTILE_H,
        ));
    }

    for p in &mut boss.projectiles {
        p.x -= PROJECTILE_SPEED;
    }
    boss.projectiles.retain(|p| p.x >= 0.0);
}
