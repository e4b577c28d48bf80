//! Output side of a servo channel.
//!
//! A channel hands its freshly computed angle to a [`ServoOutput`] once per
//! tick. What happens next (pulse-width mapping, register writes, PWM peripheral
//! calls) belongs to the implementation, which keeps the interpolation core free
//! of any peripheral addressing scheme.

/// Trait for abstracting servo output hardware.
///
/// Implement this for your PWM channel, timer compare register, or servo
/// driver chip.
pub trait ServoOutput {
    /// Drives the actuator to `degrees`.
    ///
    /// Called exactly once per channel per tick with the current angle, even
    /// when the angle has not changed. Handle hardware errors internally, this
    /// method cannot fail.
    fn set_angle(&mut self, degrees: f32);
}

/// Headless output: every write is discarded.
impl ServoOutput for () {
    #[inline]
    fn set_angle(&mut self, _degrees: f32) {}
}

/// An optional output. `None` behaves like an unbound sink.
impl<O: ServoOutput> ServoOutput for Option<O> {
    #[inline]
    fn set_angle(&mut self, degrees: f32) {
        if let Some(output) = self {
            output.set_angle(degrees);
        }
    }
}

impl<O: ServoOutput + ?Sized> ServoOutput for &mut O {
    #[inline]
    fn set_angle(&mut self, degrees: f32) {
        (**self).set_angle(degrees);
    }
}

/// Linear map from a servo's angular span to its control pulse width.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseRange {
    /// Pulse width at 0 degrees, in microseconds.
    pub min_us: u32,

    /// Pulse width at `span_deg` degrees, in microseconds.
    pub max_us: u32,

    /// Mechanical span of the servo in degrees.
    pub span_deg: f32,
}

impl PulseRange {
    /// 0-180° servo on 0.5-2.5 ms pulses.
    pub const SERVO_180: PulseRange = PulseRange::new(500, 2500, 180.0);

    /// 0-270° servo on 0.5-2.5 ms pulses.
    pub const SERVO_270: PulseRange = PulseRange::new(500, 2500, 270.0);

    /// Creates a pulse range.
    pub const fn new(min_us: u32, max_us: u32, span_deg: f32) -> Self {
        Self {
            min_us,
            max_us,
            span_deg,
        }
    }

    /// Pulse width in microseconds for `degrees`, rounded to nearest.
    ///
    /// Angles outside `0..=span_deg` are clamped to the span. A zero,
    /// negative or NaN span maps every angle to `min_us`.
    pub fn pulse_us(&self, degrees: f32) -> u32 {
        if !(self.span_deg > 0.0) {
            return self.min_us;
        }

        let degrees = degrees.max(0.0).min(self.span_deg);
        let width = self.max_us as f32 - self.min_us as f32;
        let pulse = self.min_us as f32 + degrees * width / self.span_deg;

        libm::roundf(pulse) as u32
    }
}

impl Default for PulseRange {
    fn default() -> Self {
        PulseRange::SERVO_180
    }
}

#[cfg(feature = "embedded-hal")]
pub use self::pwm::PwmServo;

#[cfg(feature = "embedded-hal")]
mod pwm {
    use super::{PulseRange, ServoOutput};
    use embedded_hal::pwm::SetDutyCycle;

    /// Servo driven by an `embedded-hal` PWM channel.
    ///
    /// Converts each angle to a pulse width through a [`PulseRange`], then to a
    /// duty cycle relative to the PWM period.
    pub struct PwmServo<P: SetDutyCycle> {
        pwm: P,
        range: PulseRange,
        period_us: u32,
    }

    impl<P: SetDutyCycle> PwmServo<P> {
        /// Standard 50 Hz servo frame.
        pub const DEFAULT_PERIOD_US: u32 = 20_000;

        /// Creates a servo output on a PWM channel running at 50 Hz.
        pub fn new(pwm: P, range: PulseRange) -> Self {
            Self::with_period(pwm, range, Self::DEFAULT_PERIOD_US)
        }

        /// Creates a servo output for a PWM channel with a custom period.
        pub fn with_period(pwm: P, range: PulseRange, period_us: u32) -> Self {
            Self {
                pwm,
                range,
                period_us: period_us.max(1),
            }
        }

        /// Duty value for `degrees` on this channel.
        pub fn duty_for(&self, degrees: f32) -> u16 {
            let pulse = self.range.pulse_us(degrees).min(self.period_us) as u64;
            let max_duty = self.pwm.max_duty_cycle() as u64;

            (pulse * max_duty / self.period_us as u64) as u16
        }

        /// Releases the PWM channel.
        pub fn release(self) -> P {
            self.pwm
        }
    }

    impl<P: SetDutyCycle> ServoOutput for PwmServo<P> {
        fn set_angle(&mut self, degrees: f32) {
            let duty = self.duty_for(degrees);
            let _ = self.pwm.set_duty_cycle(duty);
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        last: Option<f32>,
        writes: usize,
    }

    impl ServoOutput for Recorder {
        fn set_angle(&mut self, degrees: f32) {
            self.last = Some(degrees);
            self.writes += 1;
        }
    }

    #[test]
    fn servo_180_maps_span_onto_pulse_range() {
        let range = PulseRange::SERVO_180;
        assert_eq!(range.pulse_us(0.0), 500);
        assert_eq!(range.pulse_us(90.0), 1500);
        assert_eq!(range.pulse_us(180.0), 2500);
    }

    #[test]
    fn servo_270_maps_span_onto_pulse_range() {
        let range = PulseRange::SERVO_270;
        assert_eq!(range.pulse_us(0.0), 500);
        assert_eq!(range.pulse_us(135.0), 1500);
        assert_eq!(range.pulse_us(270.0), 2500);
    }

    #[test]
    fn pulse_mapping_clamps_to_span() {
        let range = PulseRange::SERVO_180;
        assert_eq!(range.pulse_us(-30.0), 500);
        assert_eq!(range.pulse_us(400.0), 2500);
    }

    #[test]
    fn degenerate_span_maps_to_min_pulse() {
        let zero = PulseRange::new(500, 2500, 0.0);
        assert_eq!(zero.pulse_us(0.0), 500);
        assert_eq!(zero.pulse_us(90.0), 500);

        assert_eq!(PulseRange::new(600, 2400, -90.0).pulse_us(45.0), 600);
        assert_eq!(PulseRange::new(600, 2400, f32::NAN).pulse_us(45.0), 600);
    }

    #[test]
    fn pulse_mapping_rounds_to_nearest_microsecond() {
        // 1 degree = 11.11 us on a 180 degree servo
        assert_eq!(PulseRange::SERVO_180.pulse_us(1.0), 511);
        // 1 degree = 7.41 us on a 270 degree servo
        assert_eq!(PulseRange::SERVO_270.pulse_us(1.0), 507);
    }

    #[test]
    fn none_output_discards_writes() {
        let mut output: Option<Recorder> = None;
        output.set_angle(45.0);
        assert!(output.is_none());
    }

    #[test]
    fn some_output_forwards_writes() {
        let mut output = Some(Recorder {
            last: None,
            writes: 0,
        });
        output.set_angle(45.0);

        let recorder = output.unwrap();
        assert_eq!(recorder.last, Some(45.0));
        assert_eq!(recorder.writes, 1);
    }

    #[test]
    fn mutable_reference_forwards_writes() {
        fn drive<O: ServoOutput>(mut output: O) {
            output.set_angle(12.5);
        }

        let mut recorder = Recorder {
            last: None,
            writes: 0,
        };
        drive(&mut recorder);
        assert_eq!(recorder.last, Some(12.5));
    }
}
