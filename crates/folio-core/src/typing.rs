//! Typewriter text effect for the hero headline and tagline.
//!
//! The engine owns no timers: the host polls it once per frame and writes the
//! visible prefix out when it changed. Segments carry optional colors so a
//! single headline can mix styled spans.

use instant::Instant;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct TypingSegment {
    pub text: String,
    pub color: Option<String>,
}

impl TypingSegment {
    pub fn new(text: &str, color: Option<&str>) -> Self {
        Self {
            text: text.to_owned(),
            color: color.map(str::to_owned),
        }
    }
}

#[derive(Clone, Debug)]
pub struct TypingConfig {
    pub segments: Vec<TypingSegment>,
    pub typing_interval: Duration,
    pub deleting_interval: Duration,
    pub initial_delay: Duration,
    /// Dwell at full length before deleting again (looping engines only).
    pub pause: Duration,
    pub looped: bool,
    pub show_cursor: bool,
    pub cursor_char: char,
    pub hide_cursor_on_complete: bool,
    /// Half of the blink cycle: visible for this long, hidden for this long.
    pub blink_half_period: Duration,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            segments: Vec::new(),
            typing_interval: Duration::from_millis(50),
            deleting_interval: Duration::from_millis(30),
            initial_delay: Duration::ZERO,
            pause: Duration::from_millis(2000),
            looped: false,
            show_cursor: true,
            cursor_char: '_',
            hide_cursor_on_complete: true,
            blink_half_period: Duration::from_millis(500),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TypingState {
    Waiting,
    Typing,
    Pausing,
    Deleting,
    Done,
}

pub struct TypingEngine {
    cfg: TypingConfig,
    total_len: usize,
    visible: usize,
    state: TypingState,
    next_at: Instant,
    started: Option<Instant>,
}

impl TypingEngine {
    pub fn new(cfg: TypingConfig, now: Instant) -> Self {
        let total_len = cfg
            .segments
            .iter()
            .map(|s| s.text.chars().count())
            .sum();
        let next_at = now + cfg.initial_delay;
        Self {
            cfg,
            total_len,
            visible: 0,
            state: TypingState::Waiting,
            next_at,
            started: None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.state == TypingState::Done
    }

    pub fn visible_len(&self) -> usize {
        self.visible
    }

    pub fn total_len(&self) -> usize {
        self.total_len
    }

    /// Advance to `now`. A slow frame may span several character intervals;
    /// they all land in this one poll. Returns `true` when the visible text
    /// changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut changed = false;
        loop {
            if self.state == TypingState::Done || now < self.next_at {
                break;
            }
            let due = self.next_at;
            match self.state {
                TypingState::Waiting => {
                    self.started.get_or_insert(due);
                    self.state = if self.total_len == 0 {
                        TypingState::Done
                    } else {
                        // First character lands on the tick the delay expires.
                        TypingState::Typing
                    };
                }
                TypingState::Typing => {
                    if self.visible < self.total_len {
                        self.visible += 1;
                        changed = true;
                        self.next_at = due + self.cfg.typing_interval;
                    } else if self.cfg.looped {
                        self.state = TypingState::Pausing;
                        self.next_at = due + self.cfg.pause;
                    } else {
                        self.state = TypingState::Done;
                    }
                }
                TypingState::Pausing => {
                    self.state = TypingState::Deleting;
                    self.next_at = due + self.cfg.deleting_interval;
                }
                TypingState::Deleting => {
                    if self.visible > 0 {
                        self.visible -= 1;
                        changed = true;
                        self.next_at = due + self.cfg.deleting_interval;
                    } else {
                        self.state = TypingState::Typing;
                        self.next_at = due + self.cfg.typing_interval;
                    }
                }
                TypingState::Done => unreachable!(),
            }
        }
        changed
    }

    /// The whole visible prefix as one string.
    pub fn visible_text(&self) -> String {
        self.visible_segments()
            .into_iter()
            .map(|(text, _)| text)
            .collect()
    }

    /// The visible prefix split across the configured colored segments.
    pub fn visible_segments(&self) -> Vec<(&str, Option<&str>)> {
        let mut remaining = self.visible;
        let mut out = Vec::new();
        for segment in &self.cfg.segments {
            if remaining == 0 {
                break;
            }
            let seg_chars = segment.text.chars().count();
            let take = seg_chars.min(remaining);
            let end = segment
                .text
                .char_indices()
                .nth(take)
                .map(|(i, _)| i)
                .unwrap_or(segment.text.len());
            out.push((&segment.text[..end], segment.color.as_deref()));
            remaining -= take;
        }
        out
    }

    pub fn cursor_char(&self) -> char {
        self.cfg.cursor_char
    }

    /// Square-wave blink phased from the moment typing started.
    pub fn cursor_visible(&self, now: Instant) -> bool {
        if !self.cfg.show_cursor {
            return false;
        }
        if self.state == TypingState::Done && self.cfg.hide_cursor_on_complete {
            return false;
        }
        let Some(started) = self.started else {
            return false;
        };
        let half = self.cfg.blink_half_period.as_millis().max(1);
        let phase = now.duration_since(started).as_millis() / half;
        phase % 2 == 0
    }
}
