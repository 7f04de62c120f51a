use std::thread;
use std::time::{Duration, Instant};

/// Paces the game loop at a fixed tick rate.
pub trait Clock {
    /// Blocks until the next frame boundary and returns the time since the
    /// previous call.
    fn tick(&mut self, ticks_per_second: u32) -> Duration;
}

/// Returns the length of one frame at `ticks_per_second` (at least one tick per second).
#[must_use]
pub fn frame_duration(ticks_per_second: u32) -> Duration {
    Duration::from_secs(1) / ticks_per_second.max(1)
}

/// Wall-clock [`Clock`] that sleeps the calling thread.
#[derive(Debug, Default)]
pub struct FixedRateClock {
    last_frame: Option<Instant>,
}

impl FixedRateClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for FixedRateClock {
    fn tick(&mut self, ticks_per_second: u32) -> Duration {
        let now = Instant::now();
        let Some(last_frame) = self.last_frame else {
            self.last_frame = Some(now);
            return Duration::ZERO;
        };

        let deadline = last_frame + frame_duration(ticks_per_second);
        // An overrun frame restarts the schedule instead of bursting to catch up.
        let frame_start = if deadline > now {
            thread::sleep(deadline - now);
            deadline
        } else {
            now
        };
        self.last_frame = Some(frame_start);
        frame_start - last_frame
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::{Duration, Instant};

    use super::{Clock, FixedRateClock, frame_duration};

    #[test]
    fn frame_duration_divides_one_second() {
        assert_eq!(frame_duration(10), Duration::from_millis(100));
        assert_eq!(frame_duration(13), Duration::from_secs(1) / 13);
    }

    #[test]
    fn zero_rate_is_treated_as_one_tick_per_second() {
        assert_eq!(frame_duration(0), Duration::from_secs(1));
    }

    #[test]
    fn first_tick_does_not_block() {
        let mut clock = FixedRateClock::new();

        assert_eq!(clock.tick(1), Duration::ZERO);
    }

    #[test]
    fn later_ticks_wait_for_the_frame_boundary() {
        let mut clock = FixedRateClock::new();
        clock.tick(100);

        let elapsed = clock.tick(100);

        assert!(elapsed >= Duration::from_millis(10));
    }

    #[test]
    fn on_time_frames_keep_an_exact_schedule() {
        let mut clock = FixedRateClock::new();
        clock.tick(20);

        assert_eq!(clock.tick(20), frame_duration(20));
        assert_eq!(clock.tick(20), frame_duration(20));
    }

    #[test]
    fn overrun_frame_restarts_the_schedule() {
        let mut clock = FixedRateClock::new();
        clock.tick(20);
        thread::sleep(Duration::from_millis(80));

        let late = clock.tick(20);
        assert!(late >= Duration::from_millis(80));

        let before = Instant::now();
        let next = clock.tick(20);

        assert_eq!(next, frame_duration(20));
        assert!(before.elapsed() >= Duration::from_millis(25));
    }
}
