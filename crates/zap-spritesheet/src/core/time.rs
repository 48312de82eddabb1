use std::time::Instant;

/// Source of per-frame delta time.
pub trait FrameClock {
    /// Seconds elapsed since the previous call.
    fn elapsed_seconds_since_last_tick(&mut self) -> f32;
}

/// Clock driven by the host: push frame deltas, read them back once.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    pending: f32,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add frame time to report on the next read.
    pub fn advance(&mut self, dt: f32) {
        self.pending += dt;
    }
}

impl FrameClock for ManualClock {
    fn elapsed_seconds_since_last_tick(&mut self) -> f32 {
        std::mem::take(&mut self.pending)
    }
}

/// Wall clock. The first read reports time since construction.
#[derive(Debug, Clone)]
pub struct SystemClock {
    last: Instant,
    /// Cap on a single delta so a stall doesn't fast-forward playback.
    max_dt: f32,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            max_dt: 0.25,
        }
    }

    pub fn with_max_dt(mut self, max_dt: f32) -> Self {
        self.max_dt = max_dt;
        self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemClock {
    fn elapsed_seconds_since_last_tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt.min(self.max_dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_reports_once() {
        let mut clock = ManualClock::new();
        clock.advance(0.008);
        clock.advance(0.008);
        assert_eq!(clock.elapsed_seconds_since_last_tick(), 0.016);
        assert_eq!(clock.elapsed_seconds_since_last_tick(), 0.0);
    }

    #[test]
    fn system_clock_is_capped() {
        let mut clock = SystemClock::new().with_max_dt(0.0);
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert_eq!(clock.elapsed_seconds_since_last_tick(), 0.0);
    }

    #[test]
    fn system_clock_moves_forward() {
        let mut clock = SystemClock::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let dt = clock.elapsed_seconds_since_last_tick();
        assert!(dt > 0.0 && dt <= 0.25, "dt was {}", dt);
    }
}
