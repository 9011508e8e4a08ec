//! Loudness smoothing: turns the raw per-tick microphone sample into a
//! stable control signal.
//!
//! The raw signal is jittery -- a sustained scream still has per-tick dips
//! that would flicker the locomotion state machine if consumed directly.
//! Smoothing is an exponential approach toward the latest sample with
//! **asymmetric** rates: a fast attack when volume rises (respond quickly
//! to a scream) and a slow decay when it falls (brief dips don't register).
//!
//! Rates are expressed per second and scaled by the tick duration, so the
//! filter behaves identically at any simulation frequency.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct VolumeConfig {
    /// Approach rate (per second) used while the raw sample exceeds the
    /// smoothed value.
    pub attack_rate: f32,
    /// Approach rate (per second) used while the raw sample is below the
    /// smoothed value. Must be smaller than `attack_rate`.
    pub decay_rate: f32,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            attack_rate: 12.0,
            decay_rate: 3.0,
        }
    }
}

/// Owns the smoothed loudness scalar for one game scene.
///
/// Invariant: the stored value is always within [0, 1] and never NaN,
/// regardless of what the sensor produces.
#[derive(Debug, Clone, Copy)]
pub struct VolumeFilter {
    value: f32,
    config: VolumeConfig,
}

impl VolumeFilter {
    pub fn new(config: VolumeConfig) -> Self {
        Self { value: 0.0, config }
    }

    /// Feed one raw sample and advance the filter by `dt` seconds.
    /// Returns the updated smoothed value.
    pub fn step(&mut self, raw: f32, dt: f32) -> f32 {
        // Sensor glitches (out-of-range or NaN samples) are clamped here and
        // never reach the classifier or the state machine.
        let raw = if raw.is_nan() {
            log::warn!("Volume sample was NaN -- treating as silence");
            0.0
        } else {
            raw.clamp(0.0, 1.0)
        };

        let rate = if raw > self.value {
            self.config.attack_rate
        } else {
            self.config.decay_rate
        };

        // A per-step fraction >= 1 means "snap to target immediately".
        let t = (rate * dt).clamp(0.0, 1.0);
        self.value += (raw - self.value) * t;
        self.value = self.value.clamp(0.0, 1.0);
        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 30.0;

    #[test]
    fn smoothed_value_stays_in_unit_range() {
        let mut filter = VolumeFilter::new(VolumeConfig::default());
        let samples = [0.0, 1.0, 5.0, -3.0, 0.5, 0.99, 1.0, 0.0, 2.5];
        for raw in samples {
            let v = filter.step(raw, DT);
            assert!((0.0..=1.0).contains(&v), "value {v} escaped [0,1]");
        }
    }

    #[test]
    fn nan_sample_is_treated_as_silence() {
        let mut filter = VolumeFilter::new(VolumeConfig::default());
        filter.step(1.0, 10.0); // snap to 1.0
        let v = filter.step(f32::NAN, DT);
        assert!(!v.is_nan());
        assert!(v < 1.0, "NaN should decay toward silence, got {v}");
    }

    #[test]
    fn attack_converges_faster_than_decay() {
        let mut filter = VolumeFilter::new(VolumeConfig::default());

        // Step input 0 -> 1: count ticks until the high watermark.
        let mut rise_ticks = 0;
        while filter.value() < 0.9 {
            filter.step(1.0, DT);
            rise_ticks += 1;
            assert!(rise_ticks < 1000, "filter never rose");
        }

        // Step input 1 -> 0: count ticks until the low watermark.
        let mut fall_ticks = 0;
        while filter.value() > 0.1 {
            filter.step(0.0, DT);
            fall_ticks += 1;
            assert!(fall_ticks < 1000, "filter never fell");
        }

        assert!(
            rise_ticks < fall_ticks,
            "attack should beat decay: rise {rise_ticks} vs fall {fall_ticks}"
        );
    }

    #[test]
    fn huge_rate_snaps_to_target() {
        let mut filter = VolumeFilter::new(VolumeConfig {
            attack_rate: 1000.0,
            decay_rate: 3.0,
        });
        let v = filter.step(0.7, DT);
        assert!((v - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn frame_rate_independence_of_snap_semantics() {
        // rate * dt >= 1 must behave the same at 30 Hz and 120 Hz.
        let config = VolumeConfig {
            attack_rate: 240.0,
            decay_rate: 240.0,
        };
        let mut slow = VolumeFilter::new(config);
        let mut fast = VolumeFilter::new(config);
        slow.step(0.8, 1.0 / 30.0);
        fast.step(0.8, 1.0 / 120.0);
        assert!((slow.value() - 0.8).abs() < f32::EPSILON);
        assert!((fast.value() - 0.8).abs() < f32::EPSILON);
    }
}
