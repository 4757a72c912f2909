//! Player controller
//!
//! Turns the frame's input snapshot into motion intent, runs the shared
//! terrain resolver, then settles combat: question blocks struck from below,
//! hazard contact, the kill-plane, stomp-vs-damage against enemies, and boss
//! projectiles. A dead player is frozen until the session reloads the stage.

use super::physics::{WallResponse, step_actor};
use super::state::{BlockKind, EnemyKind, Facing, Level, Player};
use crate::consts::*;
use crate::input::InputSnapshot;

pub fn update(player: &mut Player, input: &InputSnapshot, level: &mut Level) {
    if player.dead {
        return;
    }

    if player.invuln_frames > 0 {
        player.invuln_frames -= 1;
    }

    // Horizontal intent
    if input.left {
        player.vel.x -= WALK_ACCEL;
        player.facing = Facing::Left;
    } else if input.right {
        player.vel.x += WALK_ACCEL;
        player.facing = Facing::Right;
    } else {
        player.vel.x *= FRICTION;
    }

    player.vel.x = player.vel.x.clamp(-MAX_WALK_SPEED, MAX_WALK_SPEED);
    if player.vel.x.abs() < SPEED_EPSILON {
        player.vel.x = 0.0;
    }

    // Grounded-only, no buffering: uses last frame's ground contact
    if input.jump && player.on_ground {
        player.vel.y = JUMP_IMPULSE;
        player.on_ground = false;
    }

    let outcome = step_actor(
        &mut player.rect,
        &mut player.vel,
        &level.terrain,
        WallResponse::Stop,
    );
    player.on_ground = outcome.grounded;

    // Reward blocks struck from below
    for idx in outcome.bumped {
        let block = &mut level.terrain[idx];
        if block.kind == BlockKind::Question {
            block.hit();
            player.score += QUESTION_SCORE;
            player.coins += 1;
            log::debug!("question block opened, coins={}", player.coins);
        }
    }

    // Lethal regions
    for hazard in &level.hazards {
        if player.rect.overlaps(&hazard.0) {
            player.take_damage();
            break;
        }
    }

    if player.rect.y > PLAYER_KILL_PLANE {
        player.take_damage();
    }

    // Stomp-vs-damage; one damaging contact ends the loop
    if player.invuln_frames == 0 {
        for enemy in level.enemies.iter_mut() {
            if !enemy.alive || !player.rect.overlaps(&enemy.rect) {
                continue;
            }
            if player.vel.y > 0.0
                && player.rect.bottom() < enemy.rect.center_y() + STOMP_TOLERANCE
            {
                enemy.kill();
                player.vel.y = STOMP_BOUNCE;
                player.score += STOMP_SCORE;
                log::debug!("stomp, score={}", player.score);
            } else {
                player.take_damage();
                break;
            }
        }
    }

    // Boss projectiles are lethal from any direction
    for enemy in &level.enemies {
        if !enemy.alive {
            continue;
        }
        if let EnemyKind::Boss(boss) = &enemy.kind {
            for p in &boss.projectiles {
                if player.rect.overlaps(p) && player.invuln_frames == 0 {
                    player.take_damage();
                    break;
                }
            }
        }
    }
}
