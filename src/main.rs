//! Police Stories - headless native runner
//!
//! Plays a session on autopilot at 60 fps and prints the final snapshot as
//! JSON. Usage: `police-stories [settings.json] [seed] [seconds]`

use glam::Vec2;

use police_stories::consts::SIM_DT;
use police_stories::sim::{GamePhase, GameState, TickInput};
use police_stories::{LogSink, Session, Settings};

/// Frames between autopilot trigger pulls
const FIRE_INTERVAL: u64 = 20;
/// Distance the autopilot keeps from its target
const HOLD_DISTANCE: f32 = 150.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Police Stories (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().unwrap_or_else(|| "settings.json".to_string());
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5EED);
    let seconds = args
        .next()
        .and_then(|s| s.parse::<f32>().ok())
        .unwrap_or(60.0);

    let settings = Settings::load_from(&settings_path);
    let mut session = Session::new(settings, Default::default(), LogSink);
    session.start(seed);

    let frames = (seconds.max(0.0) / SIM_DT) as u64;
    let mut frame = 0;
    while frame < frames && session.phase() == GamePhase::Playing {
        let input = session
            .state()
            .map(|state| autopilot(state, frame))
            .unwrap_or_default();
        session.frame(SIM_DT, &input);
        frame += 1;
    }

    let Some(snapshot) = session.snapshot() else {
        log::error!("No session to report");
        return;
    };
    log::info!(
        "Finished after {:.1}s: {:?}, wave {}, score {}",
        frame as f32 * SIM_DT,
        snapshot.phase,
        snapshot.wave,
        snapshot.score
    );

    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

/// Walk toward the nearest enemy and shoot when it is in plain sight
fn autopilot(state: &GameState, frame: u64) -> TickInput {
    let player = state.player.pos;
    let Some(target) = state
        .enemies
        .iter()
        .map(|e| e.pos)
        .min_by(|a, b| a.distance(player).total_cmp(&b.distance(player)))
    else {
        return TickInput::default();
    };

    let to_target = target - player;
    let walk = if to_target.length() > HOLD_DISTANCE {
        to_target
    } else {
        Vec2::ZERO
    };
    let visible = state.world.line_of_sight(player, target);

    TickInput {
        up: walk.y < -1.0,
        down: walk.y > 1.0,
        left: walk.x < -1.0,
        right: walk.x > 1.0,
        pointer: state.camera.world_to_viewport(target),
        fire: visible && frame % FIRE_INTERVAL == 0,
        effects_enabled: false,
    }
}
