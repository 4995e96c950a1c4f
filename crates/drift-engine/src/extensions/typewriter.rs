// extensions/typewriter.rs
//
// Character-by-character text reveal with optional delete/retype cycling.
// Time-driven: the host calls `tick(dt_ms)` each frame and reads `display()`.
//
// Usage:
//   let mut tw = TypeWriter::new(TypeWriterConfig::cycling(vec!["one".into(), "two".into()]));
//   let events = tw.tick(16.0);
//   draw(tw.display(), tw.cursor_visible());

use crate::core::rng::Rng;

/// Cursor blink half-period in milliseconds.
pub const CURSOR_BLINK_MS: f32 = 500.0;
/// Jitter applied to each keystroke when `random_speed` is on (± this many ms).
pub const RANDOM_SPEED_JITTER_MS: f32 = 25.0;
/// Upper bound on state transitions processed in one tick, so zero-length
/// timings with looping cannot spin forever.
const MAX_STEPS_PER_TICK: usize = 4096;

#[derive(Debug, Clone, PartialEq)]
pub struct TypeWriterConfig {
    /// Texts typed in turn. One text without `looping` types once and stops.
    pub texts: Vec<String>,
    /// Milliseconds per typed character (default: 100).
    pub speed_ms: f32,
    /// Milliseconds before typing starts.
    pub delay_ms: f32,
    /// Milliseconds per deleted character (default: 50).
    pub delete_speed_ms: f32,
    /// Pause with the full text shown before deleting (default: 1000).
    pub delete_delay_ms: f32,
    /// Pause with nothing shown before typing the next text (default: 1000).
    pub pause_between_ms: f32,
    /// Delete and retype even with a single text.
    pub looping: bool,
    /// Vary each keystroke by up to ±25 ms.
    pub random_speed: bool,
    /// Cursor glyph, or `None` for no cursor.
    pub cursor: Option<char>,
    pub cursor_blink: bool,
    pub seed: u64,
}

impl Default for TypeWriterConfig {
    fn default() -> Self {
        Self {
            texts: Vec::new(),
            speed_ms: 100.0,
            delay_ms: 0.0,
            delete_speed_ms: 50.0,
            delete_delay_ms: 1000.0,
            pause_between_ms: 1000.0,
            looping: false,
            random_speed: false,
            cursor: Some('|'),
            cursor_blink: true,
            seed: 42,
        }
    }
}

impl TypeWriterConfig {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            texts: vec![text.into()],
            ..Default::default()
        }
    }

    pub fn cycling(texts: Vec<String>) -> Self {
        Self {
            texts,
            ..Default::default()
        }
    }

    pub fn with_speed(mut self, ms: f32) -> Self {
        self.speed_ms = ms;
        self
    }

    pub fn with_delay(mut self, ms: f32) -> Self {
        self.delay_ms = ms;
        self
    }

    pub fn with_delete_speed(mut self, ms: f32) -> Self {
        self.delete_speed_ms = ms;
        self
    }

    pub fn with_delete_delay(mut self, ms: f32) -> Self {
        self.delete_delay_ms = ms;
        self
    }

    pub fn with_pause_between(mut self, ms: f32) -> Self {
        self.pause_between_ms = ms;
        self
    }

    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn with_random_speed(mut self, random: bool) -> Self {
        self.random_speed = random;
        self
    }

    pub fn with_cursor(mut self, cursor: Option<char>, blink: bool) -> Self {
        self.cursor = cursor;
        self.cursor_blink = blink;
        self
    }

    fn cycles(&self) -> bool {
        self.texts.len() > 1 || self.looping
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypePhase {
    /// Waiting out the start delay.
    Delayed,
    Typing,
    /// Full text shown, waiting to delete.
    HoldFull,
    Deleting,
    /// Empty, waiting to type the next text.
    Waiting,
    /// Single text typed; nothing more happens.
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeEvent {
    /// Typing began. Emitted once.
    Started,
    /// A single, non-looping text finished typing.
    Completed,
}

pub struct TypeWriter {
    config: TypeWriterConfig,
    phase: TypePhase,
    text_index: usize,
    /// Characters of the current text shown.
    typed: usize,
    /// Milliseconds until the next transition.
    wait_ms: f32,
    blink_ms: f32,
    rng: Rng,
}

impl TypeWriter {
    pub fn new(config: TypeWriterConfig) -> Self {
        Self {
            phase: TypePhase::Delayed,
            text_index: 0,
            typed: 0,
            wait_ms: config.delay_ms.max(0.0),
            blink_ms: 0.0,
            rng: Rng::new(config.seed),
            config,
        }
    }

    /// Advance by `dt_ms` and return the events that fired, in order.
    pub fn tick(&mut self, dt_ms: f32) -> Vec<TypeEvent> {
        let mut events = Vec::new();
        self.blink_ms += dt_ms;
        if self.phase == TypePhase::Done {
            return events;
        }
        self.wait_ms -= dt_ms;
        let mut steps = 0;
        while self.phase != TypePhase::Done && self.wait_ms <= 0.0 && steps < MAX_STEPS_PER_TICK {
            self.step(&mut events);
            steps += 1;
        }
        events
    }

    fn step(&mut self, events: &mut Vec<TypeEvent>) {
        match self.phase {
            TypePhase::Delayed => {
                events.push(TypeEvent::Started);
                self.enter_typing(events);
            }
            TypePhase::Typing => {
                self.typed += 1;
                if self.typed >= self.current_len() {
                    self.finish_typing(events);
                } else {
                    self.wait_ms += self.keystroke_ms();
                }
            }
            TypePhase::HoldFull => {
                self.phase = TypePhase::Deleting;
                if self.typed == 0 {
                    self.finish_deleting();
                } else {
                    self.wait_ms += self.config.delete_speed_ms;
                }
            }
            TypePhase::Deleting => {
                self.typed = self.typed.saturating_sub(1);
                if self.typed == 0 {
                    self.finish_deleting();
                } else {
                    self.wait_ms += self.config.delete_speed_ms;
                }
            }
            TypePhase::Waiting => self.enter_typing(events),
            TypePhase::Done => {}
        }
    }

    fn enter_typing(&mut self, events: &mut Vec<TypeEvent>) {
        self.phase = TypePhase::Typing;
        if self.typed >= self.current_len() {
            self.finish_typing(events);
        } else {
            self.wait_ms += self.keystroke_ms();
        }
    }

    fn finish_typing(&mut self, events: &mut Vec<TypeEvent>) {
        if self.config.cycles() {
            self.phase = TypePhase::HoldFull;
            self.wait_ms += self.config.delete_delay_ms;
        } else {
            self.phase = TypePhase::Done;
            events.push(TypeEvent::Completed);
        }
    }

    fn finish_deleting(&mut self) {
        if self.config.texts.len() > 1 {
            self.text_index = (self.text_index + 1) % self.config.texts.len();
        }
        self.phase = TypePhase::Waiting;
        self.wait_ms += self.config.pause_between_ms;
    }

    fn keystroke_ms(&mut self) -> f32 {
        let base = self.config.speed_ms;
        if self.config.random_speed {
            (base + self.rng.centered(2.0 * RANDOM_SPEED_JITTER_MS)).max(0.0)
        } else {
            base
        }
    }

    fn current_len(&self) -> usize {
        self.current_text().chars().count()
    }

    /// The full text currently being typed or deleted.
    pub fn current_text(&self) -> &str {
        self.config.texts.get(self.text_index).map(String::as_str).unwrap_or("")
    }

    /// Visible prefix of the current text. Always ends on a char boundary.
    pub fn display(&self) -> &str {
        let text = self.current_text();
        match text.char_indices().nth(self.typed) {
            Some((end, _)) => &text[..end],
            None => text,
        }
    }

    pub fn cursor(&self) -> Option<char> {
        self.config.cursor
    }

    pub fn cursor_visible(&self) -> bool {
        match self.config.cursor {
            None => false,
            Some(_) if !self.config.cursor_blink => true,
            Some(_) => (self.blink_ms / CURSOR_BLINK_MS) as u64 % 2 == 0,
        }
    }

    pub fn phase(&self) -> TypePhase {
        self.phase
    }

    pub fn text_index(&self) -> usize {
        self.text_index
    }

    pub fn is_done(&self) -> bool {
        self.phase == TypePhase::Done
    }
}
