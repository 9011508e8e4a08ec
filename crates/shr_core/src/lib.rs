pub mod classify;
pub mod combat;
pub mod config;
pub mod locomotion;
pub mod session;
pub mod spawner;
pub mod timer;
pub mod volume;
pub mod world;

pub use classify::{classify, VolumeLevel, VolumeThresholds};
pub use combat::{Feedback, Terminal, Vitals};
pub use config::{load_config_from_path, validate_config, GameConfig, WorldConfig};
pub use locomotion::{PlayerMotion, PlayerState};
pub use session::{DisplaySnapshot, GameSession, TickOutput};
pub use volume::VolumeFilter;
