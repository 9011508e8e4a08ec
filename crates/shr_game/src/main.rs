//! Shout Runner -- headless driver and application entry point.
//!
//! The simulation is driven at a fixed 30 Hz, matching the microphone
//! sampling cadence. Each frame the accumulator
//! (`TimeState`) is fed wall-clock time and drained in fixed-dt slices;
//! every slice pulls exactly one loudness sample from the volume source and
//! feeds it to the scene controller.
//!
//! Without a capture device this binary replays a recorded volume trace:
//!
//!     shr_game <trace.json> [config.json]
//!
//! Trace acquisition failure is fatal before the loop starts; there is no
//! fallback input. The run ends when a terminal scene is reached or the
//! trace is exhausted.

mod display;
mod mic;
mod scene;
mod time;

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use display::{present, LogDisplay};
use mic::{load_trace_from_path, TraceVolume, VolumeSource};
use scene::SceneController;
use shr_core::{load_config_from_path, validate_config, GameConfig};
use time::TimeState;

const FIXED_DT: f64 = 1.0 / 30.0;
const METER_LOG_INTERVAL: u32 = 30;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let trace_path = match args.next() {
        Some(path) => PathBuf::from(path),
        None => {
            eprintln!("Usage: shr_game <trace.json> [config.json]");
            std::process::exit(2);
        }
    };
    let config_path = args.next().map(PathBuf::from);

    let config = match load_config(config_path.as_deref()) {
        Ok(config) => config,
        Err(message) => {
            log::error!("{message}");
            std::process::exit(1);
        }
    };

    // The volume source is the game's only input channel; failing to
    // acquire it aborts startup.
    let mut source = match load_trace_from_path(&trace_path) {
        Ok(trace) => TraceVolume::from_trace(&trace),
        Err(message) => {
            log::error!("Unable to initialize volume source: {message}");
            std::process::exit(1);
        }
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    log::info!("Session seed: {seed}");

    let mut scenes = SceneController::new(config, seed);
    let mut hooks = LogDisplay::new(METER_LOG_INTERVAL);
    let mut time = TimeState::new(FIXED_DT);

    loop {
        time.begin_frame();
        while time.should_step() {
            let sample = source.sample();
            if let Some(out) = scenes.tick(sample, FIXED_DT as f32) {
                present(&out.display, &mut hooks);
            }
        }

        if scenes.is_terminal() {
            log::info!("Run finished in scene '{}'", scenes.active());
            break;
        }
        if source.is_finished() {
            log::info!("Volume trace exhausted in scene '{}'", scenes.active());
            break;
        }

        std::thread::sleep(Duration::from_millis(1));
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<GameConfig, String> {
    match path {
        Some(path) => load_config_from_path(path),
        None => {
            let config = GameConfig::default();
            validate_config(&config)?;
            Ok(config)
        }
    }
}
