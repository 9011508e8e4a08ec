//! Display hooks: the simulation hands over plain numbers and labels, the
//! presentation layer decides how they are rendered. The headless driver
//! renders them as log lines.

use shr_core::DisplaySnapshot;

pub trait DisplayHooks {
    fn health(&mut self, current: f32, max: f32);
    fn score(&mut self, score: u32);
    fn volume_meter(&mut self, volume: f32, level_label: &'static str);
}

/// Pushes one snapshot through the hooks in a fixed order.
pub fn present(snapshot: &DisplaySnapshot, hooks: &mut dyn DisplayHooks) {
    hooks.health(snapshot.health, snapshot.max_health);
    hooks.score(snapshot.score);
    hooks.volume_meter(snapshot.volume, snapshot.level.label());
}

/// Log-backed display: health and score only on change, the volume meter at
/// a coarse interval so the log stays readable at 30 Hz.
pub struct LogDisplay {
    meter_interval: u32,
    frame: u32,
    last_health: Option<f32>,
    last_score: Option<u32>,
}

impl LogDisplay {
    pub fn new(meter_interval: u32) -> Self {
        Self {
            meter_interval: meter_interval.max(1),
            frame: 0,
            last_health: None,
            last_score: None,
        }
    }
}

impl DisplayHooks for LogDisplay {
    fn health(&mut self, current: f32, max: f32) {
        if self.last_health != Some(current) {
            log::info!("Health: {current:.0}/{max:.0}");
            self.last_health = Some(current);
        }
    }

    fn score(&mut self, score: u32) {
        if self.last_score != Some(score) {
            log::info!("Score: {score}");
            self.last_score = Some(score);
        }
    }

    fn volume_meter(&mut self, volume: f32, level_label: &'static str) {
        if self.frame % self.meter_interval == 0 {
            log::debug!("Volume: {volume:.2} ({level_label})");
        }
        self.frame += 1;
    }
}

/// Discards everything; used by tests that only care about simulation state.
#[allow(dead_code)]
pub struct NullDisplay;

impl DisplayHooks for NullDisplay {
    fn health(&mut self, _current: f32, _max: f32) {}
    fn score(&mut self, _score: u32) {}
    fn volume_meter(&mut self, _volume: f32, _level_label: &'static str) {}
}
