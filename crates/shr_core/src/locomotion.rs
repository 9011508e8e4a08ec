//! Volume-driven locomotion: a three-state machine (idle / walk / run)
//! where each state owns a fixed lane, plus grounded-gated jumping.
//!
//! The transition table is evaluated once per fixed step against two
//! thresholds T1 < T2:
//!
//! | Current | Condition    | Next    |
//! |---------|--------------|---------|
//! | Idle    | volume > T1  | Walking |
//! | Walking | volume < T1  | Idle    |
//! | Walking | volume > T2  | Running |
//! | Running | volume < T2  | Walking |
//!
//! The player never teleports between lanes: the actual x position
//! approaches the active state's lane at a bounded speed, so a state flip
//! reads as smooth locomotion. Jumping is a separate action: any tick where
//! the volume exceeds T2 while the player rests on the floor applies a
//! fixed upward impulse; airborne ticks never do (no double-jump).

use serde::Deserialize;

use crate::world::Aabb;

pub const PLAYER_HALF_W: f32 = 24.0;
pub const PLAYER_HALF_H: f32 = 32.0;

/// Locomotion states in ascending loudness order. Initial state is `Idle`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerState {
    #[default]
    Idle,
    Walking,
    Running,
}

impl PlayerState {
    /// Index of the lane this state targets, in ascending x order.
    pub fn lane_index(self) -> usize {
        match self {
            Self::Idle => 0,
            Self::Walking => 1,
            Self::Running => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walking => "walking",
            Self::Running => "running",
        }
    }
}

impl std::fmt::Display for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// T1: above this the player walks.
    pub walk_threshold: f32,
    /// T2: above this the player runs (and jumps while grounded).
    pub run_threshold: f32,
    /// Lane target x per state, strictly ascending: idle, walking, running.
    pub lane_x: [f32; 3],
    /// Bounded horizontal approach speed toward the active lane.
    pub move_speed: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub jump_speed: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            walk_threshold: 0.15,
            run_threshold: 0.4,
            lane_x: [100.0, 350.0, 600.0],
            move_speed: 240.0,
            gravity: -2400.0,
            max_fall_speed: -1200.0,
            jump_speed: 900.0,
        }
    }
}

/// One step of the transition table. Pure; exactly one state is active.
pub fn next_state(current: PlayerState, volume: f32, config: &LocomotionConfig) -> PlayerState {
    match current {
        PlayerState::Idle if volume > config.walk_threshold => PlayerState::Walking,
        PlayerState::Walking if volume > config.run_threshold => PlayerState::Running,
        PlayerState::Walking if volume < config.walk_threshold => PlayerState::Idle,
        PlayerState::Running if volume < config.run_threshold => PlayerState::Walking,
        other => other,
    }
}

/// The player's locomotion state and position, owned by one game scene.
#[derive(Debug, Clone, Copy)]
pub struct PlayerMotion {
    pub state: PlayerState,
    pub x: f32,
    pub y: f32,
    pub velocity_y: f32,
    pub grounded: bool,
}

impl PlayerMotion {
    /// Player starts idle, resting on the floor in the lowest lane.
    pub fn new(config: &LocomotionConfig, ground_y: f32) -> Self {
        Self {
            state: PlayerState::Idle,
            x: config.lane_x[0],
            y: ground_y,
            velocity_y: 0.0,
            grounded: true,
        }
    }

    pub fn step(&mut self, volume: f32, dt: f32, config: &LocomotionConfig, ground_y: f32) {
        self.state = next_state(self.state, volume, config);

        let target_x = config.lane_x[self.state.lane_index()];
        self.x = move_towards(self.x, target_x, config.move_speed * dt);

        // Jump re-fires on every qualifying grounded tick; airborne ticks
        // are a no-op.
        if volume > config.run_threshold && self.grounded {
            self.velocity_y = config.jump_speed;
            self.grounded = false;
        }

        self.velocity_y = (self.velocity_y + config.gravity * dt).max(config.max_fall_speed);
        self.y += self.velocity_y * dt;

        // Grounded is derived from floor contact, not from state.
        if self.y <= ground_y {
            self.y = ground_y;
            self.velocity_y = 0.0;
            self.grounded = true;
        } else {
            self.grounded = false;
        }
    }

    /// Collision bounds centered on the player's feet position.
    pub fn aabb(&self) -> Aabb {
        Aabb {
            center_x: self.x,
            center_y: self.y + PLAYER_HALF_H,
            half_w: PLAYER_HALF_W,
            half_h: PLAYER_HALF_H,
        }
    }
}

fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else if target > current {
        current + max_delta
    } else {
        current - max_delta
    }
}
