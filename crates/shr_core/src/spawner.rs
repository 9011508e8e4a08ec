//! Encounter scheduling: three independent cadences that populate the
//! scene with enemies and collectibles.
//!
//! Each cadence is a [`RecurringTimer`] with its own warm-up delay and
//! period; there is no ordering guarantee between them. All randomness
//! comes from one seeded RNG owned by the scheduler, so a (seed, config)
//! pair fully determines the spawn sequence -- replay runs are exact.
//!
//!  1. **Falling spawner** drops telegraphed enemies into a lane chosen by
//!     weighted draw that favors the player's current lane.
//!  2. **Horizontal spawner** picks a pattern (flying, walking, or both)
//!     and sends telegraphed enemies in from the right edge.
//!  3. **Collectible spawner** fires every period but only spawns with a
//!     configured probability, at a random height inside a band, with no
//!     telegraph.

use glam::Vec2;
use rand::prelude::*;
use serde::Deserialize;

use crate::timer::RecurringTimer;
use crate::world::{Aabb, Bounds, EntityKind, World};

const FALLING_HALF: f32 = 16.0;
const WALKING_HALF_W: f32 = 20.0;
const WALKING_HALF_H: f32 = 20.0;
const FLYING_HALF_W: f32 = 18.0;
const FLYING_HALF_H: f32 = 12.0;
const COLLECTIBLE_HALF: f32 = 12.0;
const FLYING_ALTITUDE: f32 = 320.0;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    pub falling_delay: f32,
    pub falling_period: f32,
    /// Telegraph duration shared by all enemy kinds.
    pub telegraph_time: f32,
    /// Weight of the player's current lane in the falling draw.
    pub player_lane_weight: u32,
    /// Weight of each other lane in the falling draw.
    pub other_lane_weight: u32,

    pub horizontal_delay: f32,
    pub horizontal_period: f32,
    pub flying_weight: u32,
    pub walking_weight: u32,
    pub both_weight: u32,
    /// Leftward speed of horizontally entering enemies.
    pub enemy_speed: f32,

    pub collectible_delay: f32,
    pub collectible_period: f32,
    /// Probability that a collectible-timer firing actually spawns.
    pub collectible_chance: f32,
    /// Vertical band [low, high] for collectible spawn height.
    pub collectible_band: [f32; 2],
    pub collectible_speed: f32,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            falling_delay: 3.0,
            falling_period: 2.0,
            telegraph_time: 0.8,
            player_lane_weight: 3,
            other_lane_weight: 1,
            horizontal_delay: 6.0,
            horizontal_period: 3.5,
            flying_weight: 2,
            walking_weight: 2,
            both_weight: 1,
            enemy_speed: 200.0,
            collectible_delay: 4.0,
            collectible_period: 2.5,
            collectible_chance: 0.6,
            collectible_band: [150.0, 450.0],
            collectible_speed: 160.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HorizontalPattern {
    FlyingOnly,
    WalkingOnly,
    Both,
}

pub struct EncounterScheduler {
    falling: RecurringTimer,
    horizontal: RecurringTimer,
    collectible: RecurringTimer,
    rng: StdRng,
}

impl EncounterScheduler {
    pub fn new(config: &SpawnerConfig, seed: u64) -> Self {
        Self {
            falling: RecurringTimer::new(config.falling_delay, config.falling_period),
            horizontal: RecurringTimer::new(config.horizontal_delay, config.horizontal_period),
            collectible: RecurringTimer::new(config.collectible_delay, config.collectible_period),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Advance all three cadences by one tick, spawning into `world`.
    /// `player_lane` is the lane index the player currently targets;
    /// `ground_y` is the top of the floor strip.
    #[allow(clippy::too_many_arguments)]
    pub fn tick(
        &mut self,
        dt: f32,
        paused: bool,
        config: &SpawnerConfig,
        lane_x: &[f32; 3],
        player_lane: usize,
        bounds: &Bounds,
        ground_y: f32,
        world: &mut World,
    ) {
        if self.falling.tick(dt, paused) {
            self.spawn_falling(config, lane_x, player_lane, bounds, world);
        }
        if self.horizontal.tick(dt, paused) {
            self.spawn_horizontal(config, bounds, ground_y, world);
        }
        if self.collectible.tick(dt, paused) {
            self.spawn_collectible(config, bounds, world);
        }
    }

    fn spawn_falling(
        &mut self,
        config: &SpawnerConfig,
        lane_x: &[f32; 3],
        player_lane: usize,
        bounds: &Bounds,
        world: &mut World,
    ) {
        let mut weights = [config.other_lane_weight; 3];
        if player_lane < weights.len() {
            weights[player_lane] = config.player_lane_weight;
        }
        let lane = weighted_index(&mut self.rng, &weights);

        world.spawn(
            EntityKind::FallingEnemy,
            Aabb {
                center_x: lane_x[lane],
                center_y: bounds.height - FALLING_HALF,
                half_w: FALLING_HALF,
                half_h: FALLING_HALF,
            },
            Vec2::ZERO,
            config.telegraph_time,
        );
    }

    fn spawn_horizontal(
        &mut self,
        config: &SpawnerConfig,
        bounds: &Bounds,
        ground_y: f32,
        world: &mut World,
    ) {
        let weights = [
            config.flying_weight,
            config.walking_weight,
            config.both_weight,
        ];
        let pattern = match weighted_index(&mut self.rng, &weights) {
            0 => HorizontalPattern::FlyingOnly,
            1 => HorizontalPattern::WalkingOnly,
            _ => HorizontalPattern::Both,
        };

        if pattern != HorizontalPattern::WalkingOnly {
            world.spawn(
                EntityKind::FlyingEnemy,
                Aabb {
                    center_x: bounds.width + FLYING_HALF_W,
                    center_y: FLYING_ALTITUDE,
                    half_w: FLYING_HALF_W,
                    half_h: FLYING_HALF_H,
                },
                Vec2::new(-config.enemy_speed, 0.0),
                config.telegraph_time,
            );
        }
        if pattern != HorizontalPattern::FlyingOnly {
            world.spawn(
                EntityKind::WalkingEnemy,
                Aabb {
                    center_x: bounds.width + WALKING_HALF_W,
                    center_y: ground_y + WALKING_HALF_H,
                    half_w: WALKING_HALF_W,
                    half_h: WALKING_HALF_H,
                },
                Vec2::new(-config.enemy_speed, 0.0),
                config.telegraph_time,
            );
        }
    }

    fn spawn_collectible(&mut self, config: &SpawnerConfig, bounds: &Bounds, world: &mut World) {
        // The collectible timer always advances; the spawn itself is a
        // probabilistic draw, so some periods produce nothing.
        if self.rng.gen::<f32>() >= config.collectible_chance {
            return;
        }
        let [low, high] = config.collectible_band;
        let y = if high > low {
            self.rng.gen_range(low..high)
        } else {
            low
        };
        world.spawn(
            EntityKind::Collectible,
            Aabb {
                center_x: bounds.width + COLLECTIBLE_HALF,
                center_y: y,
                half_w: COLLECTIBLE_HALF,
                half_h: COLLECTIBLE_HALF,
            },
            Vec2::new(-config.collectible_speed, 0.0),
            0.0,
        );
    }
}

/// Cumulative weighted draw over non-negative weights. At least one weight
/// must be positive; config validation guarantees that.
fn weighted_index(rng: &mut StdRng, weights: &[u32]) -> usize {
    let total: u32 = weights.iter().sum();
    debug_assert!(total > 0, "weighted draw over all-zero weights");
    let mut pick = rng.gen_range(0..total.max(1));
    for (index, weight) in weights.iter().enumerate() {
        if pick < *weight {
            return index;
        }
        pick -= weight;
    }
    weights.len() - 1
}
