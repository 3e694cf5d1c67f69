//! Pointer-driven "text pressure" headline.
//!
//! Each glyph of a text string carries a variable font weight that follows a
//! moving pressure point: coincident glyphs render at maximum weight, glyphs
//! at or beyond the working radius stay thin. The pressure point is either a
//! scripted left-to-right intro sweep (played once, the first time the
//! container becomes sufficiently visible) or the real pointer position.
//!
//! The animator is pure state; the host commits staged input once per frame
//! and pushes the resulting weights back to its glyph elements.

use glam::Vec2;
use instant::Instant;
use std::time::Duration;

use crate::constants::*;
use crate::geom::Rect;

/// Host-side geometry query, page space.
///
/// Implemented by the page collaborator (DOM bounding boxes on the web). A
/// probe that returns `None`/leaves entries empty models a missing anchor and
/// is skipped silently.
pub trait GeometryProbe {
    fn container_bounds(&mut self) -> Option<Rect>;
    /// Fill `out` (pre-sized to the glyph count) with page-space glyph centers.
    fn glyph_centers(&mut self, out: &mut [Option<Vec2>]);
}

#[derive(Clone, Debug)]
pub struct PressureConfig {
    pub text: String,
    pub min_font_size: f32,
    pub text_color: String,
    /// Fraction of the container that must be visible to arm the intro.
    pub trigger_threshold: f64,
    pub intro_delay: Duration,
    pub intro_duration: Duration,
    pub max_radius: f32,
}

impl Default for PressureConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            min_font_size: DEFAULT_MIN_FONT_SIZE,
            text_color: DEFAULT_TEXT_COLOR.to_owned(),
            trigger_threshold: DEFAULT_TRIGGER_THRESHOLD,
            intro_delay: Duration::from_millis(INTRO_DELAY_MS),
            intro_duration: Duration::from_millis(INTRO_DURATION_MS),
            max_radius: PRESSURE_MAX_RADIUS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorMode {
    /// Triggered but the sweep has not started yet (or never triggered).
    Idle,
    /// Scripted sweep; `target` is a function of elapsed time only.
    IntroSweep,
    /// `target` mirrors the last staged pointer event.
    PointerFollow,
}

#[derive(Clone, Copy, Debug)]
pub struct PressureCursor {
    pub target: Vec2,
    pub current: Vec2,
    pub mode: CursorMode,
}

/// One per character of the source text.
#[derive(Clone, Debug)]
pub struct GlyphState {
    pub owner_index: usize,
    /// Cached page-space center; `None` until measured (entry skipped).
    pub center: Option<Vec2>,
    /// Current interpolated font weight, within [`WEIGHT_MIN`, `WEIGHT_MAX`].
    pub weight: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not triggered yet; the frame was a cheap no-op poll.
    Hidden,
    /// Cursor settled on its target; the glyph pass was skipped.
    Settled,
    /// Weights were recomputed; the host should push them out.
    Updated,
}

pub struct PressureAnimator {
    cfg: PressureConfig,
    glyphs: Vec<GlyphState>,
    bounds: Rect,
    geometry_stale: bool,
    triggered: bool,
    sweep_due: Option<Instant>,
    sweep_started: Option<Instant>,
    staged_pointer: Option<Vec2>,
    cursor: PressureCursor,
}

impl PressureAnimator {
    pub fn new(cfg: PressureConfig) -> Self {
        let glyphs = build_glyphs(&cfg.text);
        Self {
            cfg,
            glyphs,
            bounds: Rect::default(),
            geometry_stale: true,
            triggered: false,
            sweep_due: None,
            sweep_started: None,
            staged_pointer: None,
            cursor: PressureCursor {
                target: Vec2::ZERO,
                current: Vec2::ZERO,
                mode: CursorMode::Idle,
            },
        }
    }

    /// Replace the source text; glyph state is rebuilt from scratch.
    pub fn set_text(&mut self, text: &str) {
        self.cfg.text = text.to_owned();
        self.glyphs = build_glyphs(text);
        self.geometry_stale = true;
    }

    pub fn config(&self) -> &PressureConfig {
        &self.cfg
    }

    pub fn glyphs(&self) -> &[GlyphState] {
        &self.glyphs
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn cursor(&self) -> &PressureCursor {
        &self.cursor
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    pub fn geometry_stale(&self) -> bool {
        self.geometry_stale
    }

    /// Feed a visibility observation. Returns `true` exactly once: on the
    /// observation that first crosses the threshold. The transition is
    /// one-shot; later observations (including scrolling away and back) are
    /// ignored.
    pub fn observe_intersection(&mut self, visible_ratio: f64, now: Instant) -> bool {
        if self.triggered || visible_ratio < self.cfg.trigger_threshold {
            return false;
        }
        self.triggered = true;
        self.sweep_due = Some(now + self.cfg.intro_delay);
        true
    }

    /// Stage a pointer position (viewport space). Committed by the next
    /// `step`; only honored in `PointerFollow` mode.
    pub fn stage_pointer(&mut self, viewport_pos: Vec2) {
        self.staged_pointer = Some(viewport_pos);
    }

    /// Mark cached bounds and glyph centers stale (resize, font load, reflow).
    pub fn invalidate_geometry(&mut self) {
        self.geometry_stale = true;
    }

    /// Sweep progress in [0, 1], or `None` outside the sweep.
    pub fn sweep_progress(&self, now: Instant) -> Option<f32> {
        let started = self.sweep_started?;
        let duration = self.cfg.intro_duration.as_secs_f32();
        if duration <= 0.0 {
            // A zero-length sweep completes immediately.
            return Some(1.0);
        }
        let elapsed = now.duration_since(started).as_secs_f32();
        Some((elapsed / duration).clamp(0.0, 1.0))
    }

    /// Advance one frame. `scroll` is the page scroll offset used to convert
    /// cached page-space geometry into viewport space.
    pub fn step(
        &mut self,
        now: Instant,
        scroll: Vec2,
        probe: &mut dyn GeometryProbe,
    ) -> StepOutcome {
        if !self.triggered {
            // Events staged before activation are stale by definition.
            self.staged_pointer = None;
            return StepOutcome::Hidden;
        }

        if let Some(due) = self.sweep_due {
            if now >= due {
                self.sweep_due = None;
                self.sweep_started = Some(now);
                self.cursor.mode = CursorMode::IntroSweep;
                // The sweep start is derived from the container bounds, so
                // they must be fresh before the cursor is placed.
                if self.geometry_stale {
                    self.refresh_geometry(probe);
                }
                let start = self.sweep_point(0.0, scroll);
                self.cursor.target = start;
                self.cursor.current = start;
            }
        }

        let mut mid_sweep = false;
        if self.sweep_started.is_some() {
            let progress = self.sweep_progress(now).unwrap_or(1.0);
            self.cursor.target = self.sweep_point(progress, scroll);
            if progress >= 1.0 {
                self.sweep_started = None;
                self.cursor.mode = CursorMode::PointerFollow;
                // Layout may have shifted during the fade-in; measure again
                // before the next distance pass.
                self.geometry_stale = true;
            } else {
                mid_sweep = true;
            }
        }

        if self.geometry_stale {
            self.refresh_geometry(probe);
        }

        let staged = self.staged_pointer.take();
        let immediate = if !mid_sweep && self.cursor.mode == CursorMode::PointerFollow {
            staged
        } else {
            None
        };

        if let Some(p) = immediate {
            // Pointer input commits without easing lag.
            self.cursor.target = p;
            self.cursor.current = p;
        } else {
            let delta = self.cursor.target - self.cursor.current;
            if !mid_sweep
                && delta.x.abs() < CURSOR_SETTLE_EPSILON
                && delta.y.abs() < CURSOR_SETTLE_EPSILON
            {
                return StepOutcome::Settled;
            }
            self.cursor.current += delta / CURSOR_EASE_DIVISOR;
        }

        self.update_weights(scroll);
        StepOutcome::Updated
    }

    /// Sweep position at `progress` in viewport space: slightly left of the
    /// container to slightly right of it, at constant vertical center.
    fn sweep_point(&self, progress: f32, scroll: Vec2) -> Vec2 {
        let left = self.bounds.left - scroll.x;
        let top = self.bounds.top - scroll.y;
        let start_x = left - SWEEP_OVERSHOOT;
        let end_x = left + self.bounds.width + SWEEP_OVERSHOOT;
        Vec2::new(
            start_x + (end_x - start_x) * progress,
            top + self.bounds.height * 0.5,
        )
    }

    // Idempotent; running it redundantly (concurrent resize events) is safe.
    fn refresh_geometry(&mut self, probe: &mut dyn GeometryProbe) {
        if let Some(b) = probe.container_bounds() {
            self.bounds = b;
        }
        let mut centers = vec![None; self.glyphs.len()];
        probe.glyph_centers(&mut centers);
        for (glyph, center) in self.glyphs.iter_mut().zip(centers) {
            glyph.center = center;
        }
        self.geometry_stale = false;
    }

    fn update_weights(&mut self, scroll: Vec2) {
        let max_radius = self.cfg.max_radius;
        let cursor = self.cursor.current;
        for glyph in &mut self.glyphs {
            let Some(center) = glyph.center else { continue };
            let viewport_center = center - scroll;
            let d = cursor.distance(viewport_center);
            let proximity = 1.0 - d.min(max_radius) / max_radius;
            glyph.weight = WEIGHT_MIN + proximity * WEIGHT_SPAN;
        }
    }
}

fn build_glyphs(text: &str) -> Vec<GlyphState> {
    text.chars()
        .enumerate()
        .map(|(i, _)| GlyphState {
            owner_index: i,
            center: None,
            weight: WEIGHT_MIN,
        })
        .collect()
}
