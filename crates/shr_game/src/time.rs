//! Fixed-timestep accumulator driving the simulation at a constant rate
//! regardless of how fast the host loop spins.

use std::time::Instant;

pub struct TimeState {
    pub fixed_dt: f64,
    pub max_accumulator: f64,
    accumulator: f64,
    pub total_time: f64,
    pub fixed_step_count: u64,
    pub real_dt: f64,
    last_instant: Instant,
}

impl TimeState {
    pub fn new(fixed_dt: f64) -> Self {
        Self {
            fixed_dt,
            max_accumulator: 0.25,
            accumulator: 0.0,
            total_time: 0.0,
            fixed_step_count: 0,
            real_dt: 0.0,
            last_instant: Instant::now(),
        }
    }

    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        self.real_dt = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;

        // Spiral-of-death cap
        if self.real_dt > self.max_accumulator {
            log::warn!(
                "Frame took {:.1}ms -- capping accumulator to {}ms",
                self.real_dt * 1000.0,
                self.max_accumulator * 1000.0
            );
            self.real_dt = self.max_accumulator;
        }

        self.accumulator += self.real_dt;
    }

    pub fn should_step(&mut self) -> bool {
        if self.accumulator >= self.fixed_dt {
            self.accumulator -= self.fixed_dt;
            self.total_time += self.fixed_dt;
            self.fixed_step_count += 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_follow_accumulated_real_time() {
        let mut time = TimeState::new(1.0 / 30.0);
        // Fake a 100ms frame by back-dating the last instant.
        time.last_instant = Instant::now() - std::time::Duration::from_millis(100);
        time.begin_frame();

        let mut steps = 0;
        while time.should_step() {
            steps += 1;
        }
        assert!((2..=4).contains(&steps), "100ms at 30Hz is ~3 steps, got {steps}");
    }

    #[test]
    fn oversized_frame_is_capped() {
        let mut time = TimeState::new(1.0 / 30.0);
        time.last_instant = Instant::now() - std::time::Duration::from_secs(10);
        time.begin_frame();

        let mut steps = 0;
        while time.should_step() {
            steps += 1;
        }
        // 10 wall seconds would be 300 steps; the cap bounds it to ~7.
        assert!(steps <= (0.25 / (1.0 / 30.0)) as usize + 1, "got {steps}");
    }
}
