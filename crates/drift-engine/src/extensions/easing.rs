// extensions/easing.rs
//
// Easing curves and keyframe sampling for time-driven presentation effects
// (bubble pulses, cursor ring, reveal presets). Pure math.

use std::f32::consts::PI;

/// Easing curve applied to normalized time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity.
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    SineIn,
    SineOut,
    /// Smooth start and end; used for looping pulses.
    SineInOut,
    /// Overshoot then settle; stands in for a springy entrance.
    BackOut,
}

impl Easing {
    /// Map a CSS/animation-library easing name. Unknown names are linear.
    pub fn from_name(name: &str) -> Self {
        match name {
            "easeIn" | "ease-in" => Easing::QuadIn,
            "easeOut" | "ease-out" => Easing::QuadOut,
            "easeInOut" | "ease-in-out" => Easing::SineInOut,
            "backOut" | "spring" => Easing::BackOut,
            _ => Easing::Linear,
        }
    }

    /// Apply the curve to `t`, clamped to [0, 1]. BackOut can exceed 1 mid-curve.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,

            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }

            Easing::CubicIn => t * t * t,
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }

            Easing::SineIn => 1.0 - (t * PI / 2.0).cos(),
            Easing::SineOut => (t * PI / 2.0).sin(),
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,

            Easing::BackOut => {
                const C1: f32 = 1.70158;
                const C3: f32 = C1 + 1.0;
                1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
            }
        }
    }
}

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

/// Sample evenly spaced keyframes at normalized time `t`, easing each segment.
/// An empty slice samples as 0; a single keyframe is constant.
pub fn keyframes(values: &[f32], t: f32, easing: Easing) -> f32 {
    match values {
        [] => 0.0,
        [v] => *v,
        _ => {
            let segments = (values.len() - 1) as f32;
            let scaled = t.clamp(0.0, 1.0) * segments;
            let i = (scaled.floor() as usize).min(values.len() - 2);
            ease(values[i], values[i + 1], scaled - i as f32, easing)
        }
    }
}

/// Infinitely repeating keyframe loop of `period` seconds, sampled at `elapsed`.
pub fn looping(values: &[f32], elapsed: f32, period: f32, easing: Easing) -> f32 {
    if period <= 0.0 {
        return keyframes(values, 0.0, easing);
    }
    keyframes(values, elapsed.rem_euclid(period) / period, easing)
}
