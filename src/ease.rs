//! Easing curves for shaping a segment's progress.

use core::f32::consts::PI;

/// How a channel moves from its segment start to its segment target.
///
/// Every variant maps normalized progress `t` in `[0, 1]` onto an output in
/// `[0, 1]` with `f(0) = 0`, `f(1) = 1`, and never decreases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EasingKind {
    /// Constant velocity.
    #[default]
    Linear,

    /// Half-cosine smoothstep: zero velocity at both ends.
    CosineS,

    /// Piecewise cubic smoothstep: `4t³` then its mirror.
    CubicS,
}

impl EasingKind {
    /// Evaluates the curve at progress `t`.
    ///
    /// `t` is clamped to `[0, 1]` first. NaN input gives an unspecified result.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        match self {
            EasingKind::Linear => t,
            EasingKind::CosineS => 0.5 * (1.0 - libm::cosf(PI * t)),
            EasingKind::CubicS => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}
