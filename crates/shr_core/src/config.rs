//! Tuning configuration: every gameplay constant lives here, loadable from
//! JSON with per-field defaults. Damage ratios, spawn weights, thresholds,
//! and rates have all drifted between design iterations, so nothing in the
//! simulation hard-codes them.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::classify::VolumeThresholds;
use crate::combat::CombatConfig;
use crate::locomotion::LocomotionConfig;
use crate::spawner::SpawnerConfig;
use crate::volume::VolumeConfig;
use crate::world::Bounds;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
    /// Height of the solid floor strip along the bottom edge.
    pub floor_height: f32,
    /// Cull margin around the playfield; entities past it self-destroy.
    pub bounds_margin: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            floor_height: 100.0,
            bounds_margin: 64.0,
        }
    }
}

impl WorldConfig {
    /// The y coordinate of the walkable surface.
    pub fn ground_y(&self) -> f32 {
        self.floor_height
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            width: self.width,
            height: self.height,
            margin: self.bounds_margin,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub volume: VolumeConfig,
    pub thresholds: VolumeThresholds,
    pub locomotion: LocomotionConfig,
    pub spawner: SpawnerConfig,
    pub combat: CombatConfig,
}

pub fn load_config_from_path(path: &Path) -> Result<GameConfig, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse config JSON {}: {e}", path.display()))?;
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &GameConfig) -> Result<(), String> {
    let w = &config.world;
    if w.width <= 0.0 || w.height <= 0.0 {
        return Err("Config validation failed: playfield dimensions must be positive".to_string());
    }
    if w.floor_height < 0.0 || w.floor_height >= w.height {
        return Err("Config validation failed: floor_height must be within the playfield".to_string());
    }
    if w.bounds_margin < 0.0 {
        return Err("Config validation failed: bounds_margin must be non-negative".to_string());
    }

    let v = &config.volume;
    if v.attack_rate <= 0.0 || v.decay_rate <= 0.0 {
        return Err("Config validation failed: filter rates must be positive".to_string());
    }
    if v.attack_rate <= v.decay_rate {
        return Err("Config validation failed: attack_rate must exceed decay_rate".to_string());
    }

    let t = &config.thresholds;
    if !(0.0 < t.talking && t.talking < t.shouting && t.shouting < t.screaming && t.screaming < 1.0)
    {
        return Err(
            "Config validation failed: thresholds must be strictly ascending within (0, 1)"
                .to_string(),
        );
    }

    let l = &config.locomotion;
    if l.walk_threshold >= l.run_threshold {
        return Err(
            "Config validation failed: walk_threshold must be below run_threshold".to_string(),
        );
    }
    if !(l.lane_x[0] < l.lane_x[1] && l.lane_x[1] < l.lane_x[2]) {
        return Err("Config validation failed: lane_x must be strictly ascending".to_string());
    }
    if l.lane_x[0] < 0.0 || l.lane_x[2] > w.width {
        return Err("Config validation failed: lanes must lie inside the playfield".to_string());
    }
    if l.move_speed <= 0.0 || l.jump_speed <= 0.0 {
        return Err("Config validation failed: movement speeds must be positive".to_string());
    }
    if l.gravity >= 0.0 {
        return Err("Config validation failed: gravity must be negative".to_string());
    }

    let s = &config.spawner;
    for (name, period) in [
        ("falling_period", s.falling_period),
        ("horizontal_period", s.horizontal_period),
        ("collectible_period", s.collectible_period),
    ] {
        if period <= 0.0 {
            return Err(format!("Config validation failed: {name} must be positive"));
        }
    }
    for (name, delay) in [
        ("falling_delay", s.falling_delay),
        ("horizontal_delay", s.horizontal_delay),
        ("collectible_delay", s.collectible_delay),
    ] {
        if delay < 0.0 {
            return Err(format!("Config validation failed: {name} must be non-negative"));
        }
    }
    if s.telegraph_time < 0.0 {
        return Err("Config validation failed: telegraph_time must be non-negative".to_string());
    }
    if s.player_lane_weight + 2 * s.other_lane_weight == 0 {
        return Err("Config validation failed: lane weights must not all be zero".to_string());
    }
    if s.flying_weight + s.walking_weight + s.both_weight == 0 {
        return Err("Config validation failed: pattern weights must not all be zero".to_string());
    }
    if !(0.0..=1.0).contains(&s.collectible_chance) {
        return Err(
            "Config validation failed: collectible_chance must be within [0, 1]".to_string(),
        );
    }
    if s.collectible_band[0] > s.collectible_band[1] {
        return Err("Config validation failed: collectible_band must be low..high".to_string());
    }
    if s.enemy_speed <= 0.0 || s.collectible_speed <= 0.0 {
        return Err("Config validation failed: entity speeds must be positive".to_string());
    }

    let c = &config.combat;
    if c.max_health <= 0.0 {
        return Err("Config validation failed: max_health must be positive".to_string());
    }
    if c.hit_damage <= 0.0 || c.pickup_heal < 0.0 {
        return Err("Config validation failed: damage must be positive, heal non-negative".to_string());
    }
    if c.survival_time <= 0.0 {
        return Err("Config validation failed: survival_time must be positive".to_string());
    }
    if c.death_grace < 0.0 {
        return Err("Config validation failed: death_grace must be non-negative".to_string());
    }

    Ok(())
}
