//! End-to-end session scenarios
//!
//! These drive whole sessions through the public API the way a frontend
//! would: one input snapshot and one tick per frame.

use blockhop::consts::*;
use blockhop::input::InputSnapshot;
use blockhop::render::FrameRecorder;
use blockhop::scene;
use blockhop::sim::{Phase, Session, tick};

fn scripted(frame: u64) -> InputSnapshot {
    InputSnapshot {
        right: true,
        jump: frame % 37 == 0,
        ..Default::default()
    }
}

#[test]
fn same_seed_same_run() {
    let mut a = Session::new(0xC0FFEE);
    let mut b = Session::new(0xC0FFEE);
    a.start_run();
    b.start_run();

    for frame in 0..2000 {
        let input = scripted(frame);
        tick(&mut a, &input);
        tick(&mut b, &input);
    }

    assert_eq!(a.phase, b.phase);
    assert_eq!(a.stage, b.stage);
    assert_eq!(a.player, b.player);
    assert_eq!(a.level, b.level);
    assert_eq!(a.camera, b.camera);
}

#[test]
fn smoke_run_holds_invariants() {
    let mut session = Session::new(1234);
    session.start_run();

    for frame in 0..5000 {
        tick(&mut session, &scripted(frame));

        assert!(
            session.player.vel.x.abs() <= MAX_WALK_SPEED,
            "speed cap broken at frame {frame}"
        );
        assert!(
            (1..=FINAL_STAGE).contains(&session.stage),
            "stage index out of range at frame {frame}"
        );
        assert!(session.player.lives <= STARTING_LIVES);
    }
}

#[test]
fn falling_out_of_the_world_costs_a_life() {
    let mut session = Session::new(7);
    session.start_run();

    session.player.rect.y = PLAYER_KILL_PLANE + 1.0;
    tick(&mut session, &InputSnapshot::default());

    assert!(session.player.dead);
    assert_eq!(session.player.lives, STARTING_LIVES - 1);
    assert_eq!(session.phase, Phase::Transition);
    assert_eq!(session.transition_frames, TRANSITION_FRAMES);
}

#[test]
fn losing_every_life_ends_at_the_menu() {
    let mut session = Session::new(99);
    session.start_run();

    for _ in 0..STARTING_LIVES {
        assert_eq!(session.phase, Phase::Play);
        session.player.rect.y = PLAYER_KILL_PLANE + 1.0;
        tick(&mut session, &InputSnapshot::default());
        assert_eq!(session.phase, Phase::Transition);
        for _ in 0..TRANSITION_FRAMES {
            tick(&mut session, &InputSnapshot::default());
        }
    }

    assert_eq!(session.phase, Phase::Menu);
    assert_eq!(session.player.lives, 0);
}

#[test]
fn every_frame_produces_draw_commands() {
    let mut session = Session::new(5);
    let mut recorder = FrameRecorder::new();

    // Menu frame, then confirm in and play a while
    for frame in 0..300u64 {
        let input = if frame == 1 {
            InputSnapshot {
                jump: true,
                ..Default::default()
            }
        } else {
            scripted(frame)
        };
        tick(&mut session, &input);

        recorder.clear();
        scene::draw(&session, &mut recorder);
        assert!(!recorder.is_empty(), "empty frame at {frame}");
    }
}
