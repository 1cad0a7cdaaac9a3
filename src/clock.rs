// Turns requestAnimationFrame timestamps into fixed-rate simulation ticks

pub struct FrameClock {
    last_ms: Option<f64>,
    accumulated_ms: f64,
}

impl FrameClock {
    pub const TICK_HZ: f64 = 25.0;
    pub const TICK_MS: f64 = 1000.0 / FrameClock::TICK_HZ;
    // Ticks allowed per frame before the backlog is dropped (e.g. after a hidden tab)
    pub const MAX_CATCH_UP: u32 = 5;

    pub fn new() -> Self {
        FrameClock {
            last_ms: None,
            accumulated_ms: 0.0,
        }
    }

    /// Number of ticks due at `now_ms`. The very first frame always ticks once.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let last_ms = match self.last_ms.replace(now_ms) {
            Some(last_ms) => last_ms,
            None => return 1,
        };
        self.accumulated_ms += (now_ms - last_ms).max(0.0);

        let due = (self.accumulated_ms / FrameClock::TICK_MS).floor();
        if due >= FrameClock::MAX_CATCH_UP as f64 {
            self.accumulated_ms = 0.0;
            return FrameClock::MAX_CATCH_UP;
        }
        self.accumulated_ms -= due * FrameClock::TICK_MS;
        due as u32
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        FrameClock::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_ticks_immediately() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(12345.0), 1);
        assert_eq!(clock.advance(12345.0), 0);
    }

    #[test]
    fn sixty_hz_frames_average_to_twenty_five_ticks() {
        let mut clock = FrameClock::new();
        let frame_ms = 1000.0 / 60.0;
        let mut ticks = clock.advance(0.0) - 1;
        for i in 1..=600 {
            ticks += clock.advance(i as f64 * frame_ms);
        }
        // ten seconds of frames
        assert!((249..=250).contains(&ticks), "ticks {}", ticks);
    }

    #[test]
    fn remainder_carries_over() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        assert_eq!(clock.advance(30.0), 0);
        assert_eq!(clock.advance(60.0), 1);
        assert_eq!(clock.advance(100.0), 1);
        assert_eq!(clock.advance(119.0), 0);
        assert_eq!(clock.advance(120.0), 1);
    }

    #[test]
    fn long_gap_is_capped_and_forgotten() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        assert_eq!(clock.advance(10_000.0), FrameClock::MAX_CATCH_UP);
        assert_eq!(clock.advance(10_020.0), 0);
        assert_eq!(clock.advance(10_040.0), 1);
    }

    #[test]
    fn time_going_backwards_adds_nothing() {
        let mut clock = FrameClock::new();
        clock.advance(500.0);
        assert_eq!(clock.advance(100.0), 0);
        assert_eq!(clock.advance(139.0), 0);
        assert_eq!(clock.advance(140.0), 1);
    }
}
