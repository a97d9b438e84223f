use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds. Never negative.
    pub dt: f32,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots for the simulation loop.
///
/// Delta time is clamped to an upper bound so entity integration stays
/// stable when the application is paused by the debugger, minimized, or
/// stalls. Entities trust `dt` as non-negative; `Instant` is monotonic so
/// that holds by construction.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock with the default stall clamp (250 ms).
    pub fn new() -> Self {
        Self::with_clamp(Duration::from_millis(250))
    }

    /// Creates a clock with a custom upper delta-time clamp.
    pub fn with_clamp(dt_max: Duration) -> Self {
        Self {
            last: Instant::now(),
            frame_index: 0,
            dt_max,
        }
    }

    /// Resets the clock baseline.
    ///
    /// Useful after surface reconfigure events or when resuming from
    /// suspension, so the next `dt` does not include the pause.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last).min(self.dt_max);
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_increments_frame_index() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick().frame_index, 0);
        assert_eq!(clock.tick().frame_index, 1);
    }

    #[test]
    fn dt_is_clamped_to_maximum() {
        let mut clock = FrameClock::with_clamp(Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(5));
        let ft = clock.tick();
        assert!(ft.dt <= 0.001 + f32::EPSILON);
    }

    #[test]
    fn dt_is_never_negative() {
        let mut clock = FrameClock::new();
        assert!(clock.tick().dt >= 0.0);
    }
}
