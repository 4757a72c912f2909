//! Blockhop entry point
//!
//! Headless demo runner: drives a session with a scripted autopilot at 60 Hz,
//! building the frame's draw list each tick and logging progress. A graphical
//! frontend would poll real input and drain the recorder into its surface
//! instead.

use blockhop::consts::TICK_HZ;
use blockhop::platform::{self, FrameClock};
use blockhop::render::FrameRecorder;
use blockhop::scene;
use blockhop::sim::{Phase, Session, tick};
use blockhop::{InputSnapshot, Settings};

/// Scripted input: confirms through the menu, then runs right and hops when
/// blocked or on a fixed cadence
#[derive(Default)]
struct Autopilot {
    frame: u64,
}

impl Autopilot {
    fn next(&mut self, session: &Session) -> InputSnapshot {
        self.frame += 1;
        match session.phase {
            // Alternate the confirm key so a press edge registers
            Phase::Menu => InputSnapshot {
                jump: self.frame % 2 == 0,
                ..Default::default()
            },
            Phase::Play => {
                let blocked = session.player.on_ground && session.player.vel.x.abs() < 0.5;
                InputSnapshot {
                    right: true,
                    jump: session.player.on_ground && (blocked || self.frame % 90 == 0),
                    ..Default::default()
                }
            }
            Phase::Transition => InputSnapshot::default(),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(platform::time_seed);
    log::info!("session seed {seed}");

    let mut session = Session::new(seed);
    let mut clock = FrameClock::new(TICK_HZ);
    let mut pilot = Autopilot::default();
    let mut frame = FrameRecorder::new();

    let max_frames = settings.max_frames.unwrap_or(u64::MAX);
    let mut frames: u64 = 0;
    let mut prev_phase = session.phase;

    loop {
        let input = pilot.next(&session);
        tick(&mut session, &input);

        frame.clear();
        scene::draw(&session, &mut frame);

        frames += 1;
        if frames % TICK_HZ as u64 == 0 && session.phase == Phase::Play {
            log::info!(
                "stage {} x={:.0} lives={} score={} ({} draw cmds)",
                session.stage,
                session.player.rect.x,
                session.player.lives,
                session.player.score,
                frame.len()
            );
        }

        // Back at the menu after a transition means the run ended
        if prev_phase == Phase::Transition && session.phase == Phase::Menu {
            log::info!("run over, final score {}", session.player.score);
            break;
        }
        prev_phase = session.phase;

        if frames >= max_frames {
            log::info!("frame cap reached after {frames} frames");
            break;
        }
        if !settings.uncapped {
            clock.tick();
        }
    }
}
