//! Time management utilities
//!
//! [`IntervalTimer`] drives fixed-cadence work from a variable frame step.
//! It keeps the fractional remainder of every interval it fires, so the
//! long-run firing rate does not drift under frame-rate jitter.

/// Countdown timer that fires once per elapsed interval
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    interval: f32,
    remaining: f32,
    fired_total: u64,
}

impl IntervalTimer {
    /// Create a timer whose first firing is one full interval away
    ///
    /// `interval` must be positive and finite; callers validate it.
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            remaining: interval,
            fired_total: 0,
        }
    }

    /// Advance the countdown and return how many intervals elapsed
    ///
    /// The countdown fires when it reaches or passes zero. Each firing adds
    /// one interval back rather than resetting, so `advance(3.5 * interval)`
    /// fires three times and leaves half an interval remaining.
    ///
    /// The firing count is computed in closed form, so an arbitrarily long
    /// step costs the same as a short one. Counts beyond `u32::MAX` saturate.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        let interval = f64::from(self.interval);
        let remaining = f64::from(self.remaining) - f64::from(elapsed);

        if remaining > 0.0 {
            self.remaining = remaining as f32;
            return 0;
        }

        let overdue = -remaining;
        let fired = (overdue / interval).floor() + 1.0;
        let next = interval - overdue.rem_euclid(interval);

        self.remaining = (next as f32).clamp(f32::MIN_POSITIVE, self.interval);
        let fired = fired.min(f64::from(u32::MAX)) as u32;
        self.fired_total += u64::from(fired);
        fired
    }

    /// Change the interval without losing the current phase
    ///
    /// The remaining time is clamped so a shorter interval takes effect on
    /// the next firing instead of waiting out the old one.
    pub fn set_interval(&mut self, interval: f32) {
        self.interval = interval;
        self.remaining = self.remaining.min(interval);
    }

    /// Current interval in seconds
    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Time left until the next firing
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Total number of firings since creation
    pub fn fired_total(&self) -> u64 {
        self.fired_total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_no_firing_before_interval() {
        let mut timer = IntervalTimer::new(0.5);
        assert_eq!(timer.advance(0.25), 0);
        assert_relative_eq!(timer.remaining(), 0.25);
    }

    #[test]
    fn test_fires_when_countdown_reaches_zero() {
        let mut timer = IntervalTimer::new(0.5);
        assert_eq!(timer.advance(0.5), 1);
        assert_relative_eq!(timer.remaining(), 0.5);
    }

    #[test]
    fn test_additive_reset_keeps_remainder() {
        let mut timer = IntervalTimer::new(0.5);
        assert_eq!(timer.advance(1.75), 3);
        assert_relative_eq!(timer.remaining(), 0.25);
        assert_eq!(timer.fired_total(), 3);
    }

    #[test]
    fn test_non_dyadic_interval_keeps_phase() {
        let interval = 1.0 / 30.0;
        let mut timer = IntervalTimer::new(interval);
        assert_eq!(timer.advance(3.5 * interval), 3);
        assert_relative_eq!(timer.remaining(), 0.5 * interval, max_relative = 1e-4);
    }

    #[test]
    fn test_huge_step_fires_in_closed_form() {
        let interval = 1.0 / 120.0;
        let mut timer = IntervalTimer::new(interval);

        let fired = timer.advance(1.0e7);

        // 1.2e9 intervals, give or take float rounding of the step itself
        assert!((1_199_999_000..=1_200_001_000).contains(&fired), "fired {fired}");
        assert!(timer.remaining() > 0.0 && timer.remaining() <= interval);
        assert_eq!(timer.fired_total(), u64::from(fired));

        // Back to normal cadence afterwards
        let before = timer.remaining();
        assert_eq!(timer.advance(before * 0.5), 0);
    }

    #[test]
    fn test_fire_count_saturates() {
        let mut timer = IntervalTimer::new(1.0e-9);
        assert_eq!(timer.advance(1.0e9), u32::MAX);
        assert!(timer.remaining() > 0.0);
    }

    #[test]
    fn test_shorter_interval_clamps_remaining() {
        let mut timer = IntervalTimer::new(1.0);
        timer.set_interval(0.25);
        assert_relative_eq!(timer.remaining(), 0.25);
        assert_eq!(timer.advance(0.25), 1);
    }
}
