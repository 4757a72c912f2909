//! Scene composition
//!
//! Walks the session once per frame and emits ordered draw commands in
//! viewport coordinates: background, terrain (culled against the viewport),
//! enemies, hazards, the goal, the player, then the HUD. Menu and transition
//! cards are drawn here too, so a frontend only ever drains one command list.

use glam::Vec2;

use crate::consts::*;
use crate::render::{
    BLACK, Color, DrawCmd, GOLD, LAVA_RED, PIPE_GREEN, RenderSink, SKY_BLUE, TextSize, WHITE,
};
use crate::sim::{
    BlockKind, Camera, Enemy, EnemyKind, Facing, Phase, Rect, Session, Theme, stage_in_world,
    world_of,
};

const GROUND_BROWN: Color = Color(200, 76, 12);
const PLAYER_RED: Color = Color(255, 0, 0);
const OVERALLS_BLUE: Color = Color(0, 0, 200);
const HAT_RED: Color = Color(200, 0, 0);
const PATROLLER_BROWN: Color = Color(150, 75, 0);
const BOSS_GREEN: Color = Color(50, 200, 50);
const BOSS_SHELL: Color = Color(50, 100, 50);
const BOSS_RED: Color = Color(200, 50, 50);
const FIREBALL_ORANGE: Color = Color(255, 100, 0);
const SPENT_BROWN: Color = Color(139, 69, 19);
const QUESTION_SPARK: Color = Color(255, 200, 200);
const POLE_GREY: Color = Color(100, 100, 100);
const FLAG_GREEN: Color = Color(0, 255, 0);

/// Theme palette: background, ground material, brick material
fn palette(theme: Theme) -> (Color, Color, Color) {
    match theme {
        Theme::Overworld => (SKY_BLUE, GROUND_BROWN, Color(180, 90, 30)),
        Theme::Underground => (Color(15, 15, 15), Color(0, 100, 0), Color(0, 100, 200)),
        Theme::Sky => (Color(200, 220, 255), WHITE, Color(200, 100, 100)),
        Theme::Castle => (Color(10, 0, 0), Color(80, 80, 80), Color(120, 120, 120)),
    }
}

/// Emit one frame of draw commands for the current session state
pub fn draw(session: &Session, sink: &mut impl RenderSink) {
    match session.phase {
        Phase::Menu => draw_menu(sink),
        Phase::Play => draw_play(session, sink),
        Phase::Transition => draw_transition(session, sink),
    }
}

fn fill_viewport(sink: &mut impl RenderSink, color: Color) {
    sink.submit(DrawCmd::FillRect {
        rect: Rect::new(0.0, 0.0, VIEW_WIDTH, VIEW_HEIGHT),
        color,
    });
}

fn text(
    sink: &mut impl RenderSink,
    text: &str,
    pos: Vec2,
    size: TextSize,
    color: Color,
    centered: bool,
) {
    sink.submit(DrawCmd::Text {
        text: text.to_string(),
        pos,
        size,
        color,
        centered,
    });
}

fn draw_menu(sink: &mut impl RenderSink) {
    fill_viewport(sink, SKY_BLUE);
    sink.submit(DrawCmd::FillRect {
        rect: Rect::new(0.0, 500.0, VIEW_WIDTH, 100.0),
        color: GROUND_BROWN,
    });

    let center = VIEW_WIDTH / 2.0;
    text(
        sink,
        "BLOCKHOP",
        Vec2::new(center, 150.0),
        TextSize::Large,
        HAT_RED,
        true,
    );
    text(
        sink,
        "Press Jump to Start",
        Vec2::new(center, 300.0),
        TextSize::Medium,
        WHITE,
        true,
    );
    text(
        sink,
        "Arrows to Move, Space to Jump, R to Reload",
        Vec2::new(center, 450.0),
        TextSize::Small,
        WHITE,
        true,
    );
}

fn draw_play(session: &Session, sink: &mut impl RenderSink) {
    let (background, ground, brick) = palette(session.level.theme);
    fill_viewport(sink, background);

    let camera = &session.camera;

    for block in &session.level.terrain {
        let rect = camera.apply(&block.rect);
        if !Camera::on_screen(&rect) {
            continue;
        }
        let color = match block.kind {
            BlockKind::Solid => ground,
            BlockKind::Normal => brick,
            BlockKind::Question => GOLD,
            BlockKind::Empty => SPENT_BROWN,
            BlockKind::Pipe => PIPE_GREEN,
        };
        sink.submit(DrawCmd::FillRect { rect, color });
        sink.submit(DrawCmd::StrokeRect { rect, color: BLACK });
        if block.kind == BlockKind::Question {
            sink.submit(DrawCmd::FillRect {
                rect: Rect::new(rect.x + 5.0, rect.y + 5.0, 5.0, 5.0),
                color: QUESTION_SPARK,
            });
        }
    }

    for hazard in &session.level.hazards {
        let rect = camera.apply(&hazard.0);
        if Camera::on_screen(&rect) {
            sink.submit(DrawCmd::FillRect {
                rect,
                color: LAVA_RED,
            });
        }
    }

    if let Some(goal) = session.level.goal {
        let rect = camera.apply(&goal);
        if Camera::on_screen(&rect) {
            if session.level.theme == Theme::Castle {
                sink.submit(DrawCmd::FillRect { rect, color: GOLD });
            } else {
                sink.submit(DrawCmd::FillRect {
                    rect: Rect::new(rect.x + 4.0, rect.y, 2.0, rect.h),
                    color: POLE_GREY,
                });
                sink.submit(DrawCmd::FillRect {
                    rect: Rect::new(rect.x + 6.0, rect.y + 20.0, 30.0, 20.0),
                    color: FLAG_GREEN,
                });
            }
        }
    }

    for enemy in &session.level.enemies {
        draw_enemy(enemy, camera, sink);
    }

    draw_player(session, sink);

    let hud = format!(
        "WORLD {}-{}   LIVES x{}   COINS x{}   SCORE {}",
        world_of(session.stage),
        stage_in_world(session.stage),
        session.player.lives,
        session.player.coins,
        session.player.score
    );
    text(
        sink,
        &hud,
        Vec2::new(20.0, 20.0),
        TextSize::Small,
        WHITE,
        false,
    );
}

fn draw_enemy(enemy: &Enemy, camera: &Camera, sink: &mut impl RenderSink) {
    let rect = camera.apply(&enemy.rect);
    match &enemy.kind {
        EnemyKind::Patroller => {
            if !Camera::on_screen(&rect) {
                return;
            }
            sink.submit(DrawCmd::FillEllipse {
                rect,
                color: PATROLLER_BROWN,
            });
            sink.submit(DrawCmd::FillCircle {
                center: Vec2::new(rect.x + 8.0, rect.y + 10.0),
                radius: 5.0,
                color: WHITE,
            });
            sink.submit(DrawCmd::FillCircle {
                center: Vec2::new(rect.x + 24.0, rect.y + 10.0),
                radius: 5.0,
                color: WHITE,
            });
            sink.submit(DrawCmd::FillCircle {
                center: Vec2::new(rect.x + 10.0, rect.y + 10.0),
                radius: 2.0,
                color: BLACK,
            });
            sink.submit(DrawCmd::FillCircle {
                center: Vec2::new(rect.x + 22.0, rect.y + 10.0),
                radius: 2.0,
                color: BLACK,
            });
        }
        EnemyKind::Boss(boss) => {
            if Camera::on_screen(&rect) {
                sink.submit(DrawCmd::FillRect {
                    rect,
                    color: BOSS_GREEN,
                });
                sink.submit(DrawCmd::FillRect {
                    rect: Rect::new(rect.x + 40.0, rect.y + 10.0, 20.0, 40.0),
                    color: BOSS_SHELL,
                });
                sink.submit(DrawCmd::FillRect {
                    rect: Rect::new(rect.x + 10.0, rect.y - 10.0, 30.0, 10.0),
                    color: BOSS_RED,
                });
                sink.submit(DrawCmd::FillRect {
                    rect: Rect::new(rect.x + 5.0, rect.y + 10.0, 10.0, 10.0),
                    color: WHITE,
                });
                sink.submit(DrawCmd::FillRect {
                    rect: Rect::new(rect.x + 5.0, rect.y + 10.0, 4.0, 4.0),
                    color: BLACK,
                });
            }
            for projectile in &boss.projectiles {
                let rect = camera.apply(projectile);
                if Camera::on_screen(&rect) {
                    sink.submit(DrawCmd::FillEllipse {
                        rect,
                        color: FIREBALL_ORANGE,
                    });
                }
            }
        }
    }
}

fn draw_player(session: &Session, sink: &mut impl RenderSink) {
    let player = &session.player;
    let rect = session.camera.apply(&player.rect);

    let body = if player.is_flashing() {
        WHITE
    } else {
        PLAYER_RED
    };
    sink.submit(DrawCmd::FillRect { rect, color: body });

    sink.submit(DrawCmd::FillRect {
        rect: Rect::new(rect.x, rect.y + 20.0, PLAYER_SIZE, 12.0),
        color: OVERALLS_BLUE,
    });

    let eye_x = if player.facing == Facing::Right {
        rect.x + 20.0
    } else {
        rect.x + 4.0
    };
    sink.submit(DrawCmd::FillRect {
        rect: Rect::new(eye_x, rect.y + 4.0, 4.0, 8.0),
        color: BLACK,
    });

    let brim_x = if player.facing == Facing::Right {
        rect.x + 16.0
    } else {
        rect.x - 4.0
    };
    sink.submit(DrawCmd::FillRect {
        rect: Rect::new(brim_x, rect.y, 20.0, 4.0),
        color: HAT_RED,
    });
}

fn draw_transition(session: &Session, sink: &mut impl RenderSink) {
    fill_viewport(sink, BLACK);
    let center = VIEW_WIDTH / 2.0;

    if session.player.lives == 0 {
        text(
            sink,
            "GAME OVER",
            Vec2::new(center, 250.0),
            TextSize::Large,
            HAT_RED,
            true,
        );
    } else if session.campaign_complete {
        text(
            sink,
            "YOU WIN!",
            Vec2::new(center, 250.0),
            TextSize::Large,
            GOLD,
            true,
        );
        text(
            sink,
            "The kingdom is saved!",
            Vec2::new(center, 350.0),
            TextSize::Medium,
            WHITE,
            true,
        );
    } else {
        let (status, icon) = if session.player.dead {
            (format!("x {}", session.player.lives), PLAYER_RED)
        } else {
            ("COURSE CLEAR!".to_string(), GOLD)
        };

        let heading = format!(
            "WORLD {}-{}",
            world_of(session.stage),
            stage_in_world(session.stage)
        );
        text(
            sink,
            &heading,
            Vec2::new(center, 200.0),
            TextSize::Medium,
            WHITE,
            true,
        );
        text(
            sink,
            &status,
            Vec2::new(center, 300.0),
            TextSize::Medium,
            WHITE,
            true,
        );
        sink.submit(DrawCmd::FillRect {
            rect: Rect::new(center - 20.0, 250.0, 40.0, 40.0),
            color: icon,
        });
    }
}
