// extensions/reveal.rs
//
// Entrance animations for page content: fade-ins and slide-ins with an
// optional per-item stagger. Stateless: sample at any elapsed time.
//
// Usage:
//   let reveal = Reveal::fade(FadeDirection::Up).with_stagger(0.1);
//   let state = reveal.sample(elapsed, item_index);
//   draw_at(base + state.offset, state.scale, state.opacity);

use glam::Vec2;
use super::easing::{lerp, Easing};

/// Default travel for fades.
pub const FADE_DISTANCE: f32 = 20.0;
/// Default travel for slides.
pub const SLIDE_DISTANCE: f32 = 100.0;
/// Default duration in seconds.
pub const REVEAL_DURATION: f32 = 0.6;
/// Starting scale for `FadeDirection::Scale` and `ScaleUp`.
pub const SCALE_FROM: f32 = 0.8;
pub const SCALE_UP_FROM: f32 = 1.2;

/// Where a fade-in comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FadeDirection {
    /// Rises into place from below.
    #[default]
    Up,
    Down,
    Left,
    Right,
    /// Grows from 0.8.
    Scale,
    /// Shrinks from 1.2.
    ScaleUp,
    /// Opacity only.
    None,
}

impl FadeDirection {
    /// Unknown names map to `Up`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "down" => FadeDirection::Down,
            "left" => FadeDirection::Left,
            "right" => FadeDirection::Right,
            "scale" => FadeDirection::Scale,
            "scale-up" => FadeDirection::ScaleUp,
            "none" => FadeDirection::None,
            _ => FadeDirection::Up,
        }
    }
}

/// Where a slide-in comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlideDirection {
    #[default]
    Left,
    Right,
    Up,
    Down,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl SlideDirection {
    /// Unknown names map to `Left`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "right" => SlideDirection::Right,
            "up" => SlideDirection::Up,
            "down" => SlideDirection::Down,
            "up-left" => SlideDirection::UpLeft,
            "up-right" => SlideDirection::UpRight,
            "down-left" => SlideDirection::DownLeft,
            "down-right" => SlideDirection::DownRight,
            _ => SlideDirection::Left,
        }
    }

    /// Starting offset for a slide of `distance`. Diagonals travel half on each axis.
    pub fn offset(self, distance: f32) -> Vec2 {
        let h = distance / 2.0;
        match self {
            SlideDirection::Left => Vec2::new(-distance, 0.0),
            SlideDirection::Right => Vec2::new(distance, 0.0),
            SlideDirection::Up => Vec2::new(0.0, -distance),
            SlideDirection::Down => Vec2::new(0.0, distance),
            SlideDirection::UpLeft => Vec2::new(-h, -h),
            SlideDirection::UpRight => Vec2::new(h, -h),
            SlideDirection::DownLeft => Vec2::new(-h, h),
            SlideDirection::DownRight => Vec2::new(h, h),
        }
    }
}

/// Presentation state of one item at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealState {
    /// Offset from the resting position.
    pub offset: Vec2,
    pub scale: f32,
    pub opacity: f32,
}

impl RevealState {
    /// Resting state once the reveal has finished.
    pub const VISIBLE: RevealState = RevealState {
        offset: Vec2::ZERO,
        scale: 1.0,
        opacity: 1.0,
    };
}

/// A configured entrance animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reveal {
    /// State before the item starts to appear.
    pub from: RevealState,
    /// Seconds.
    pub duration: f32,
    /// Seconds before the first item starts.
    pub delay: f32,
    /// Extra seconds before each following item.
    pub stagger: f32,
    pub easing: Easing,
}

impl Reveal {
    pub fn fade(direction: FadeDirection) -> Self {
        Self::fade_by(direction, FADE_DISTANCE)
    }

    pub fn fade_by(direction: FadeDirection, distance: f32) -> Self {
        let (offset, scale) = match direction {
            FadeDirection::Up => (Vec2::new(0.0, distance), 1.0),
            FadeDirection::Down => (Vec2::new(0.0, -distance), 1.0),
            FadeDirection::Left => (Vec2::new(distance, 0.0), 1.0),
            FadeDirection::Right => (Vec2::new(-distance, 0.0), 1.0),
            FadeDirection::Scale => (Vec2::ZERO, SCALE_FROM),
            FadeDirection::ScaleUp => (Vec2::ZERO, SCALE_UP_FROM),
            FadeDirection::None => (Vec2::ZERO, 1.0),
        };
        Self {
            from: RevealState { offset, scale, opacity: 0.0 },
            duration: REVEAL_DURATION,
            delay: 0.0,
            stagger: 0.0,
            easing: Easing::QuadOut,
        }
    }

    pub fn slide(direction: SlideDirection) -> Self {
        Self::slide_by(direction, SLIDE_DISTANCE, false)
    }

    /// `bounce` swaps the ease-in-out curve for one that overshoots and settles.
    pub fn slide_by(direction: SlideDirection, distance: f32, bounce: bool) -> Self {
        Self {
            from: RevealState {
                offset: direction.offset(distance),
                scale: 1.0,
                opacity: 0.0,
            },
            duration: REVEAL_DURATION,
            delay: 0.0,
            stagger: 0.0,
            easing: if bounce { Easing::BackOut } else { Easing::SineInOut },
        }
    }

    pub fn with_duration(mut self, seconds: f32) -> Self {
        self.duration = seconds;
        self
    }

    pub fn with_delay(mut self, seconds: f32) -> Self {
        self.delay = seconds;
        self
    }

    pub fn with_stagger(mut self, seconds: f32) -> Self {
        self.stagger = seconds;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// When item `index` starts moving.
    pub fn start_time(&self, index: usize) -> f32 {
        self.delay + self.stagger * index as f32
    }

    /// Linear progress of item `index` in [0, 1].
    pub fn progress(&self, elapsed: f32, index: usize) -> f32 {
        let local = elapsed - self.start_time(index);
        if local <= 0.0 {
            return if self.duration <= 0.0 && local == 0.0 { 1.0 } else { 0.0 };
        }
        if self.duration <= 0.0 {
            return 1.0;
        }
        (local / self.duration).min(1.0)
    }

    /// State of item `index` at `elapsed` seconds.
    pub fn sample(&self, elapsed: f32, index: usize) -> RevealState {
        let p = self.progress(elapsed, index);
        if p >= 1.0 {
            return RevealState::VISIBLE;
        }
        let t = self.easing.apply(p);
        RevealState {
            offset: self.from.offset.lerp(Vec2::ZERO, t),
            scale: lerp(self.from.scale, 1.0, t),
            opacity: lerp(self.from.opacity, 1.0, t).clamp(0.0, 1.0),
        }
    }

    /// Whether all of `count` items have finished.
    pub fn is_complete(&self, elapsed: f32, count: usize) -> bool {
        let last = count.saturating_sub(1);
        elapsed >= self.start_time(last) + self.duration.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn fade_up_starts_below_and_hidden() {
        let r = Reveal::fade(FadeDirection::Up);
        let s = r.sample(0.0, 0);
        assert_eq!(s.offset, Vec2::new(0.0, 20.0));
        assert_eq!(s.opacity, 0.0);
        assert_eq!(r.sample(0.6, 0), RevealState::VISIBLE);
    }

    #[test]
    fn fade_midpoint_is_eased_out() {
        let r = Reveal::fade(FadeDirection::Left);
        let s = r.sample(0.3, 0);
        // Quad ease-out at 0.5 is 0.75.
        assert!(close(s.opacity, 0.75));
        assert!(close(s.offset.x, 5.0));
    }

    #[test]
    fn scale_directions() {
        assert_eq!(Reveal::fade(FadeDirection::Scale).sample(0.0, 0).scale, 0.8);
        assert_eq!(Reveal::fade(FadeDirection::ScaleUp).sample(0.0, 0).scale, 1.2);
        let none = Reveal::fade(FadeDirection::None).sample(0.0, 0);
        assert_eq!((none.offset, none.scale), (Vec2::ZERO, 1.0));
    }

    #[test]
    fn slide_offsets() {
        assert_eq!(SlideDirection::Left.offset(100.0), Vec2::new(-100.0, 0.0));
        assert_eq!(SlideDirection::DownRight.offset(100.0), Vec2::new(50.0, 50.0));
        let r = Reveal::slide(SlideDirection::UpLeft);
        assert_eq!(r.sample(0.0, 0).offset, Vec2::new(-50.0, -50.0));
        assert_eq!(r.easing, Easing::SineInOut);
        assert_eq!(Reveal::slide_by(SlideDirection::Up, 100.0, true).easing, Easing::BackOut);
    }

    #[test]
    fn stagger_delays_each_item() {
        let r = Reveal::fade(FadeDirection::Up).with_delay(0.2).with_stagger(0.1);
        assert!(close(r.start_time(3), 0.5));
        assert_eq!(r.sample(0.45, 3).opacity, 0.0);
        assert!(r.sample(0.45, 0).opacity > 0.0);
        assert!(!r.is_complete(1.0, 4));
        assert!(r.is_complete(1.2, 4));
    }

    #[test]
    fn bounce_opacity_stays_in_range() {
        let r = Reveal::slide_by(SlideDirection::Right, 100.0, true);
        for i in 0..=60 {
            let o = r.sample(i as f32 * 0.01, 0).opacity;
            assert!((0.0..=1.0).contains(&o));
        }
    }

    #[test]
    fn zero_duration_snaps() {
        let r = Reveal::fade(FadeDirection::Up).with_duration(0.0).with_delay(1.0);
        assert_eq!(r.sample(0.5, 0).opacity, 0.0);
        assert_eq!(r.sample(1.0, 0), RevealState::VISIBLE);
    }

    #[test]
    fn names_parse_with_fallback() {
        assert_eq!(FadeDirection::from_name("scale-up"), FadeDirection::ScaleUp);
        assert_eq!(FadeDirection::from_name("sideways"), FadeDirection::Up);
        assert_eq!(SlideDirection::from_name("down-left"), SlideDirection::DownLeft);
        assert_eq!(SlideDirection::from_name(""), SlideDirection::Left);
    }
}
