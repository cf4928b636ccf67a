//! Swarm Rush headless demo driver
//!
//! Runs the simulation at its fixed cadence with a synthetic autopilot,
//! logging progress until the run ends. A real presentation layer replaces
//! this file wholesale: sample input, call `tick`, draw `drawables()`.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use glam::Vec2;

use swarm_rush::consts::{PLAYER_SPEED, TICK_RATE_HZ, VIEW_HEIGHT, VIEW_WIDTH};
use swarm_rush::sim::{GameState, InputSnapshot, TickResult, tick};

/// Demo runs raise the quit signal after this many frames even if the
/// autopilot refuses to die.
const DEMO_FRAME_CAP: u64 = 60_000;

/// Start dodging when the nearest enemy is closer than this.
const DODGE_RADIUS: f32 = 400.0;

fn main() {
    env_logger::init();

    let seed = std::env::var("SWARM_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });
    log::info!("demo run starting, seed {seed}");

    let mut state = GameState::new(seed);
    let tick_period = Duration::from_secs(1) / TICK_RATE_HZ;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        let input = autopilot(&state, frame);

        match tick(&mut state, &input, frame) {
            TickResult::Continue => {}
            TickResult::Quit => {
                log::info!("quit at frame {frame}, score {}", state.score.value());
                break;
            }
            TickResult::GameOver { final_score } => {
                log::info!("game over at frame {frame}, final score {final_score}");
                break;
            }
        }

        if frame % 500 == 0 {
            log::info!(
                "frame {frame}: hp {}, score {}, {} enemies, {} projectiles",
                state.player.hp,
                state.score.value(),
                state.enemies.len(),
                state.projectiles.len()
            );
        }

        frame += 1;
        if let Some(rest) = tick_period.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(rest);
        }
    }
}

/// Keyboard stand-in: back away from the nearest enemy, otherwise drift
/// toward the viewport center.
fn autopilot(state: &GameState, frame: u64) -> InputSnapshot {
    let mut input = InputSnapshot::default();
    if frame >= DEMO_FRAME_CAP {
        input.quit = true;
        return input;
    }

    let player = state.player.rect.center;
    let nearest = state.enemies.iter().min_by(|a, b| {
        let da = (a.rect.center - player).length_squared();
        let db = (b.rect.center - player).length_squared();
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    });

    match nearest {
        Some(enemy) if (enemy.rect.center - player).length() < DODGE_RADIUS => {
            let away = player - enemy.rect.center;
            input.left = away.x < 0.0;
            input.right = away.x > 0.0;
            input.up = away.y < 0.0;
            input.down = away.y > 0.0;
        }
        _ => {
            let home = Vec2::new(VIEW_WIDTH, VIEW_HEIGHT) / 2.0 - player;
            input.left = home.x < -PLAYER_SPEED;
            input.right = home.x > PLAYER_SPEED;
            input.up = home.y < -PLAYER_SPEED;
            input.down = home.y > PLAYER_SPEED;
        }
    }
    input
}
