//! Health, score, and the two terminal conditions.
//!
//! Damage and heal amounts are configuration; health is clamped to
//! [0, max_health] and the score only ever grows. Reaching zero health
//! makes the player non-interactive and, after a grace delay, ends the
//! session in GameOver. Surviving the configured duration ends it in Win.
//! The two conditions race: the first to be satisfied latches and the
//! other can never fire afterwards, and no health or score mutation is
//! accepted once either has latched.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub max_health: f32,
    pub hit_damage: f32,
    pub pickup_heal: f32,
    /// Delay between death and the GameOver transition.
    pub death_grace: f32,
    /// Unpaused survival time that wins the session.
    pub survival_time: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            max_health: 3.0,
            hit_damage: 1.0,
            pickup_heal: 1.0,
            death_grace: 1.5,
            survival_time: 60.0,
        }
    }
}

/// Feedback cue for the presentation layer; the core only names the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Hit,
    Pickup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    GameOver,
    Win,
}

/// Player health, score, and terminal-condition clocks for one scene.
#[derive(Debug, Clone, Copy)]
pub struct Vitals {
    health: f32,
    score: u32,
    /// Time since death, if the player has died.
    dead_for: Option<f32>,
    survived: f32,
    terminal: Option<Terminal>,
}

impl Vitals {
    pub fn new(config: &CombatConfig) -> Self {
        Self {
            health: config.max_health,
            score: 0,
            dead_for: None,
            survived: 0.0,
            terminal: None,
        }
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_dead(&self) -> bool {
        self.dead_for.is_some()
    }

    pub fn terminal(&self) -> Option<Terminal> {
        self.terminal
    }

    /// Hostile projectile contact. Returns the feedback cue, or `None` when
    /// the hit is ignored (already dead or session already ended).
    pub fn apply_hit(&mut self, config: &CombatConfig) -> Option<Feedback> {
        if self.is_dead() || self.terminal.is_some() {
            return None;
        }
        self.health = (self.health - config.hit_damage).max(0.0);
        if self.health == 0.0 {
            log::info!("Player died (score {})", self.score);
            self.dead_for = Some(0.0);
        }
        Some(Feedback::Hit)
    }

    /// Collectible pickup: one score point and a capped heal.
    pub fn apply_pickup(&mut self, config: &CombatConfig) -> Option<Feedback> {
        if self.is_dead() || self.terminal.is_some() {
            return None;
        }
        self.score += 1;
        self.health = (self.health + config.pickup_heal).min(config.max_health);
        Some(Feedback::Pickup)
    }

    /// Advance the survival clock or the death-grace clock by one unpaused
    /// tick. Returns the terminal transition on the tick it latches; every
    /// later call returns `None`.
    pub fn tick_clocks(&mut self, dt: f32, config: &CombatConfig) -> Option<Terminal> {
        if self.terminal.is_some() {
            return None;
        }
        if let Some(elapsed) = &mut self.dead_for {
            // Death already won the race; the survival clock is frozen.
            *elapsed += dt;
            if *elapsed >= config.death_grace {
                self.terminal = Some(Terminal::GameOver);
                return Some(Terminal::GameOver);
            }
        } else {
            self.survived += dt;
            if self.survived >= config.survival_time {
                log::info!("Survived {:.1}s -- win", self.survived);
                self.terminal = Some(Terminal::Win);
                return Some(Terminal::Win);
            }
        }
        None
    }
}
