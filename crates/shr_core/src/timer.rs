//! Pause-aware recurring timers.
//!
//! All scheduled work in a scene (the three spawner cadences) shares this
//! one mechanism instead of ad hoc callbacks. The timer always observes the
//! passage of wall time, but while the scene is paused the firing deadline
//! slides forward by the same amount: paused duration is elapsed-but-
//! inactive, so resuming never releases a burst of pent-up firings.

#[derive(Debug, Clone, Copy)]
pub struct RecurringTimer {
    period: f32,
    observed: f32,
    next_fire: f32,
}

impl RecurringTimer {
    /// First firing happens once `initial_delay` of unpaused time has been
    /// observed; subsequent firings every `period`.
    pub fn new(initial_delay: f32, period: f32) -> Self {
        Self {
            period,
            observed: 0.0,
            next_fire: initial_delay,
        }
    }

    /// Advance by `dt` seconds. Returns true when the timer fires this tick.
    /// At most one firing is reported per tick; if a single oversized tick
    /// overshoots several periods the phase realigns to the firing tick.
    pub fn tick(&mut self, dt: f32, paused: bool) -> bool {
        self.observed += dt;
        if paused {
            self.next_fire += dt;
            return false;
        }
        if self.observed >= self.next_fire {
            self.next_fire = self.observed + self.period;
            true
        } else {
            false
        }
    }
}
