//! Per-servo interpolation state machine.
//!
//! Provides [`ServoChannel`], which moves one actuator from its current angle
//! to a target angle over a whole number of ticks, shaped by an
//! [`EasingKind`], and pushes every computed angle to a [`ServoOutput`].

use crate::ease::EasingKind;
use crate::output::ServoOutput;
use crate::time::TickRate;

/// Static configuration of a servo channel.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelConfig {
    angle_min: f32,
    angle_max: f32,
    tick_rate: TickRate,
    ease: EasingKind,
}

impl ChannelConfig {
    /// Creates a configuration with inclusive angle bounds.
    ///
    /// Reversed bounds are swapped. Tick rate defaults to 50 Hz and easing to
    /// [`EasingKind::Linear`].
    pub fn new(angle_min: f32, angle_max: f32) -> Self {
        let (angle_min, angle_max) = if angle_min > angle_max {
            (angle_max, angle_min)
        } else {
            (angle_min, angle_max)
        };

        Self {
            angle_min,
            angle_max,
            tick_rate: TickRate::default(),
            ease: EasingKind::default(),
        }
    }

    /// Sets the rate at which the channel will be ticked.
    pub fn tick_rate(mut self, rate: TickRate) -> Self {
        self.tick_rate = rate;
        self
    }

    /// Sets the easing recorded before the first move.
    pub fn ease(mut self, ease: EasingKind) -> Self {
        self.ease = ease;
        self
    }

    /// Returns the inclusive `(min, max)` angle bounds.
    pub fn bounds(&self) -> (f32, f32) {
        (self.angle_min, self.angle_max)
    }

    /// Returns the configured tick rate.
    pub fn rate(&self) -> TickRate {
        self.tick_rate
    }

    /// Clamps `degrees` into the configured bounds.
    pub fn clamp(&self, degrees: f32) -> f32 {
        let clamped = degrees.max(self.angle_min).min(self.angle_max);

        #[cfg(feature = "defmt")]
        if clamped != degrees {
            defmt::debug!("angle {} clamped to {}", degrees, clamped);
        }

        clamped
    }
}

/// Drives one servo along timed, eased segments.
///
/// A segment is started with [`start_move`](Self::start_move) and advanced one
/// step per [`tick`](Self::tick). The channel is idle whenever
/// [`ticks_total`](Self::ticks_total) is zero.
///
/// # Type Parameters
/// * `O` - Output implementation receiving the angle every tick
pub struct ServoChannel<O: ServoOutput> {
    config: ChannelConfig,
    output: O,
    current: f32,
    start: f32,
    target: f32,
    ticks_total: u32,
    tick_index: u32,
    ease: EasingKind,
}

impl<O: ServoOutput> ServoChannel<O> {
    /// Creates an idle channel at `initial_angle` and writes it to the output.
    ///
    /// An out-of-range initial angle is clamped, not rejected.
    pub fn new(initial_angle: f32, config: ChannelConfig, output: O) -> Self {
        let initial = config.clamp(initial_angle);

        let mut channel = Self {
            config,
            output,
            current: initial,
            start: initial,
            target: initial,
            ticks_total: 0,
            tick_index: 0,
            ease: config.ease,
        };
        channel.emit();
        channel
    }

    /// Starts a new segment toward `target_angle` lasting `duration_ms`.
    ///
    /// The segment begins at the current angle, so calling this mid-flight
    /// re-targets without a jump. Progress is reset and any in-flight segment
    /// is discarded. The angle itself only changes on the next tick.
    pub fn start_move(&mut self, target_angle: f32, duration_ms: u32, ease: EasingKind) {
        self.target = self.config.clamp(target_angle);
        self.start = self.current;
        self.ease = ease;
        self.ticks_total = self.config.tick_rate.ticks_for(duration_ms);
        self.tick_index = 0;
    }

    /// Advances the channel by one tick and writes the resulting angle.
    ///
    /// Progress is sampled before it is incremented: the first tick of a
    /// segment writes the start angle, and the target is reached exactly on the
    /// tick that finds `tick_index == ticks_total`.
    pub fn tick(&mut self) {
        if self.ticks_total == 0 {
            self.emit();
            return;
        }

        if self.tick_index >= self.ticks_total {
            self.current = self.target;
            self.ticks_total = 0;
            self.tick_index = 0;
        } else {
            let t = self.tick_index as f32 / self.ticks_total as f32;
            let s = self.ease.apply(t);
            self.current = self.start + (self.target - self.start) * s;
            self.tick_index += 1;
        }

        self.emit();
    }

    #[inline]
    fn emit(&mut self) {
        self.output.set_angle(self.current);
    }

    /// Returns true if no segment is in flight.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.ticks_total == 0
    }

    /// Returns the angle last written to the output.
    pub fn angle(&self) -> f32 {
        self.current
    }

    /// Returns the angle the current segment started from.
    pub fn segment_start(&self) -> f32 {
        self.start
    }

    /// Returns the (clamped) target of the current or last segment.
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Returns the length of the in-flight segment in ticks, zero when idle.
    pub fn ticks_total(&self) -> u32 {
        self.ticks_total
    }

    /// Returns how many ticks of the in-flight segment have elapsed.
    pub fn tick_index(&self) -> u32 {
        self.tick_index
    }

    /// Returns the easing of the current or last segment.
    pub fn ease(&self) -> EasingKind {
        self.ease
    }

    /// Returns the inclusive `(min, max)` angle bounds.
    pub fn bounds(&self) -> (f32, f32) {
        self.config.bounds()
    }

    /// Returns the channel configuration.
    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    /// Returns a reference to the output.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Consumes the channel and returns its output.
    pub fn into_output(self) -> O {
        self.output
    }
}
