//! Timed cosmetic effects: typewriter, rotating title, counters.
//!
//! Each effect is a small state machine. It knows what to display next and how
//! long to wait before the following step; the scheduler owns the clock.

use crate::config::TypewriterConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypePhase {
    Typing,
    Deleting,
}

/// Types a string forward one character at a time, holds, deletes it, pauses,
/// and starts over.
#[derive(Debug, Clone)]
pub struct Typewriter {
    chars: Vec<char>,
    shown: usize,
    phase: TypePhase,
    timing: TypewriterConfig,
}

impl Typewriter {
    /// `None` for empty text: there is nothing to type.
    pub fn new(text: &str, timing: TypewriterConfig) -> Option<Self> {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return None;
        }
        Some(Self {
            chars,
            shown: 0,
            phase: TypePhase::Typing,
            timing,
        })
    }

    pub fn text(&self) -> String {
        self.chars[..self.shown].iter().collect()
    }

    pub fn phase(&self) -> TypePhase {
        self.phase
    }

    /// Apply one step and return the delay before the next one.
    pub fn tick(&mut self) -> u64 {
        match self.phase {
            TypePhase::Typing => {
                self.shown += 1;
                if self.shown >= self.chars.len() {
                    self.phase = TypePhase::Deleting;
                    self.timing.hold_ms
                } else {
                    self.timing.type_ms
                }
            }
            TypePhase::Deleting => {
                self.shown = self.shown.saturating_sub(1);
                if self.shown == 0 {
                    self.phase = TypePhase::Typing;
                    self.timing.restart_ms
                } else {
                    self.timing.delete_ms
                }
            }
        }
    }
}

/// Cycles through the role titles in order.
#[derive(Debug, Clone)]
pub struct TitleRotator {
    roles: Vec<String>,
    next: usize,
}

impl TitleRotator {
    pub fn new(roles: Vec<String>) -> Option<Self> {
        if roles.is_empty() {
            return None;
        }
        Some(Self { roles, next: 0 })
    }

    /// The title to swap in, advancing the cursor.
    pub fn advance(&mut self) -> &str {
        let index = self.next;
        self.next = (self.next + 1) % self.roles.len();
        &self.roles[index]
    }
}

/// A numeric count-up from zero to a literal target in fixed increments.
#[derive(Debug, Clone, PartialEq)]
pub struct Counter {
    pub target: u64,
    pub step: f64,
    pub current: f64,
}

impl Counter {
    /// Increment is `target / (duration / frame)`.
    pub fn new(target: u64, duration_ms: u64, frame_ms: u64) -> Self {
        let frames = duration_ms as f64 / frame_ms as f64;
        Self {
            target,
            step: target as f64 / frames,
            current: 0.0,
        }
    }

    /// Advance one frame. Returns the text to show and whether the count is
    /// done. The display never exceeds the target.
    pub fn advance(&mut self) -> (String, bool) {
        self.current += self.step;
        if self.current >= self.target as f64 {
            (format!("{}+", self.target), true)
        } else {
            (format!("{}+", self.current.floor() as u64), false)
        }
    }
}

/// The integer a counter's text starts with, ignoring leading whitespace.
pub fn leading_integer(text: &str) -> Option<u64> {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Seconds as CSS would print them: `300` ms is `0.3`.
pub fn css_seconds(ms: u64) -> String {
    format!("{}", ms as f64 / 1000.0)
}
