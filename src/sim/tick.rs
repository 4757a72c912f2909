//! Session state machine
//!
//! One call per frame. Menu waits for confirm; Play runs the fixed update
//! order (terrain bump timers, player, enemies, camera, goal/death checks,
//! enemy compaction); Transition counts down to either the next stage, a
//! reload, or the menu.

use super::enemy;
use super::player;
use super::state::{Phase, Session, Theme};
use crate::consts::*;
use crate::input::InputSnapshot;

/// Advance the session by one frame
pub fn tick(session: &mut Session, input: &InputSnapshot) {
    let confirm_pressed = input.jump && !session.prev_input.jump;
    let reload_pressed = input.reload && !session.prev_input.reload;
    session.prev_input = *input;

    match session.phase {
        Phase::Menu => {
            if confirm_pressed {
                log::info!("run started, seed {}", session.seed);
                session.start_run();
            }
        }

        Phase::Play => {
            if reload_pressed {
                log::info!("manual reload of stage {}", session.stage);
                session.reload_stage();
                return;
            }

            for block in &mut session.level.terrain {
                block.tick_bump();
            }

            player::update(&mut session.player, input, &mut session.level);
            enemy::update_all(&mut session.level, &mut session.rng);
            session.camera.update(&session.player.rect);

            if let Some(goal) = session.level.goal {
                if session.player.rect.overlaps(&goal) {
                    complete_stage(session);
                }
            }

            if session.player.dead && session.phase == Phase::Play {
                log::info!("player down, {} lives left", session.player.lives);
                session.phase = Phase::Transition;
                session.transition_frames = TRANSITION_FRAMES;
            }

            // Compact marked-dead enemies now that no one iterates them
            session.level.enemies.retain(|e| e.alive);
        }

        Phase::Transition => {
            session.transition_frames = session.transition_frames.saturating_sub(1);
            if session.transition_frames == 0 {
                if session.player.lives == 0 {
                    log::info!("game over");
                    session.phase = Phase::Menu;
                } else if session.campaign_complete {
                    log::info!("campaign complete, final score {}", session.player.score);
                    session.phase = Phase::Menu;
                } else {
                    session.reload_stage();
                    session.phase = Phase::Play;
                }
            }
        }
    }
}

/// Goal reached: award the bonus, force the boss down on castle stages, and
/// queue the next stage (or the win) behind the transition card
fn complete_stage(session: &mut Session) {
    if session.level.theme == Theme::Castle {
        for enemy in session.level.enemies.iter_mut() {
            if enemy.is_boss() && enemy.alive {
                enemy.kill();
            }
        }
        session.player.score += AXE_BONUS;
    } else {
        session.player.score +=
            FLAG_BASE_BONUS + session.player.lives as u32 * FLAG_LIFE_BONUS;
    }

    if session.stage >= FINAL_STAGE {
        session.campaign_complete = true;
    } else {
        session.set_stage(session.stage + 1);
    }

    session.phase = Phase::Transition;
    session.transition_frames = TRANSITION_FRAMES;
    log::info!(
        "stage cleared, score {}, next stage {}",
        session.player.score,
        session.stage
    );
}
