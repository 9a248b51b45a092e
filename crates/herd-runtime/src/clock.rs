//! Frame clock producing per-frame deltas

/// Longest frame the clock will report, in seconds
const DEFAULT_MAX_DELTA: f64 = 0.25;

/// Tracks frame time for the update loop.
///
/// Deltas are supplied by the driver through `advance` and clamped into
/// `[0, max_delta]`, so systems never see a negative or runaway `dt`.
/// `total_time` is a running sum; fixed-step drivers that need exact frame
/// times should derive them from the frame index.
pub struct FrameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Delta of the most recent frame in seconds
    pub delta_time: f64,
    /// Upper bound applied to every delta
    pub max_delta: f64,
    /// Number of frames advanced so far
    pub frame: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            max_delta: DEFAULT_MAX_DELTA,
            frame: 0,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock whose deltas are clamped to `max_delta` seconds
    pub fn with_max_delta(max_delta: f64) -> Self {
        Self {
            max_delta: max_delta.max(0.0),
            ..Self::default()
        }
    }

    /// Advance by a caller-supplied delta, returning the clamped value
    pub fn advance(&mut self, dt: f64) -> f64 {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.max_delta)
        } else {
            0.0
        };
        self.delta_time = dt;
        self.total_time += dt;
        self.frame += 1;
        dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_defaults() {
        let clock = FrameClock::new();
        assert_eq!(clock.total_time, 0.0);
        assert_eq!(clock.delta_time, 0.0);
        assert_eq!(clock.frame, 0);
        assert_eq!(clock.max_delta, DEFAULT_MAX_DELTA);
    }

    #[test]
    fn test_advance_accumulates() {
        let mut clock = FrameClock::new();
        clock.advance(0.1);
        clock.advance(0.15);
        assert!((clock.total_time - 0.25).abs() < 1e-12);
        assert_eq!(clock.frame, 2);
    }

    #[test]
    fn test_advance_clamps() {
        let mut clock = FrameClock::with_max_delta(0.1);
        assert_eq!(clock.advance(1.0), 0.1);
        assert_eq!(clock.advance(-0.5), 0.0);
        assert_eq!(clock.advance(f64::NAN), 0.0);
        assert!((clock.total_time - 0.1).abs() < 1e-12);
    }
}
