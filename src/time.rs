//! Tick-rate abstraction for converting wall-clock durations to ticks.

/// Frequency at which the periodic driver calls `tick`.
///
/// The rate is only used to turn a duration in milliseconds into a whole
/// number of ticks. Jitter and missed ticks are not compensated: every call to
/// `tick` counts as exactly one period.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickRate(f32);

impl TickRate {
    /// Standard analog servo refresh rate.
    pub const SERVO_50HZ: TickRate = TickRate(50.0);

    /// Creates a tick rate from a frequency in hertz.
    #[inline]
    pub const fn from_hz(hz: f32) -> Self {
        TickRate(hz)
    }

    /// Returns the frequency in hertz.
    #[inline]
    pub const fn hz(&self) -> f32 {
        self.0
    }

    /// Number of ticks spanning `duration_ms`, rounded to nearest.
    ///
    /// Never returns less than one, even for zero durations or a zero,
    /// negative or NaN rate.
    pub fn ticks_for(&self, duration_ms: u32) -> u32 {
        let ticks = self.0 * duration_ms as f32 / 1000.0;

        if ticks.is_nan() || ticks < 1.0 {
            return 1;
        }

        libm::roundf(ticks) as u32
    }
}

impl Default for TickRate {
    fn default() -> Self {
        TickRate::SERVO_50HZ
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_milliseconds_to_ticks() {
        let rate = TickRate::from_hz(50.0);
        assert_eq!(rate.ticks_for(1000), 50);
        assert_eq!(rate.ticks_for(500), 25);
        assert_eq!(rate.ticks_for(20), 1);
    }

    #[test]
    fn rounds_to_nearest_tick() {
        let rate = TickRate::from_hz(50.0);
        // 1.5 ticks rounds half away from zero
        assert_eq!(rate.ticks_for(30), 2);
        // 1.4 ticks
        assert_eq!(rate.ticks_for(28), 1);
        // 2.6 ticks
        assert_eq!(rate.ticks_for(52), 3);
    }

    #[test]
    fn degenerate_durations_take_one_tick() {
        let rate = TickRate::from_hz(50.0);
        assert_eq!(rate.ticks_for(0), 1);
        assert_eq!(rate.ticks_for(5), 1);

        assert_eq!(TickRate::from_hz(0.0).ticks_for(1000), 1);
        assert_eq!(TickRate::from_hz(-100.0).ticks_for(1000), 1);
        assert_eq!(TickRate::from_hz(f32::NAN).ticks_for(1000), 1);
    }

    #[test]
    fn high_rates_scale_linearly() {
        let rate = TickRate::from_hz(1000.0);
        assert_eq!(rate.ticks_for(1), 1);
        assert_eq!(rate.ticks_for(250), 250);
        assert_eq!(rate.ticks_for(60_000), 60_000);
    }

    #[test]
    fn default_is_fifty_hertz() {
        assert_eq!(TickRate::default().hz(), 50.0);
    }
}
