//! Hero copy glue: typewriter headline/tagline and the pointer-reveal block.
//! The page provides the elements; this module provides the motion.

use folio_core::{RevealState, TypingConfig, TypingEngine, TypingSegment};
use instant::Instant;
use std::time::Duration;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;

const HEADLINE_SEGMENTS: [(&str, Option<&str>); 2] =
    [("Hi, I'm ", Some("#dfd9ff")), ("Aolin", Some("#915EFF"))];
const HEADLINE_INTERVAL_MS: u64 = 80;

const TAGLINE: &str = "I develop Software, business and the future!";
const TAGLINE_COLOR: &str = "#dfd9ff";
const TAGLINE_DELAY_MS: u64 = 1600;

pub struct HeroText {
    headline_el: Option<web::HtmlElement>,
    tagline_el: Option<web::HtmlElement>,
    reveal_container: Option<web::HtmlElement>,
    reveal_overlay: Option<web::HtmlElement>,
    headline: TypingEngine,
    tagline: TypingEngine,
    headline_cursor_on: bool,
    tagline_cursor_on: bool,
    reveal: RevealState,
    reveal_left: f32,
    reveal_width: f32,
}

impl HeroText {
    /// Missing hero elements disable their effect only; everything else runs.
    pub fn new(document: &web::Document, now: Instant) -> Self {
        let headline_cfg = TypingConfig {
            segments: HEADLINE_SEGMENTS
                .iter()
                .map(|(text, color)| TypingSegment::new(text, *color))
                .collect(),
            typing_interval: Duration::from_millis(HEADLINE_INTERVAL_MS),
            hide_cursor_on_complete: true,
            ..TypingConfig::default()
        };
        let tagline_cfg = TypingConfig {
            segments: vec![TypingSegment::new(TAGLINE, Some(TAGLINE_COLOR))],
            initial_delay: Duration::from_millis(TAGLINE_DELAY_MS),
            hide_cursor_on_complete: false,
            ..TypingConfig::default()
        };

        let reveal_container = dom::element_by_id(document, "hero-reveal");
        let reveal_overlay = reveal_container
            .as_ref()
            .and_then(|c| c.query_selector(".reveal-overlay").ok().flatten())
            .and_then(|el| el.dyn_into::<web::HtmlElement>().ok());

        let mut hero = Self {
            headline_el: dom::element_by_id(document, "hero-headline"),
            tagline_el: dom::element_by_id(document, "hero-tagline"),
            reveal_container,
            reveal_overlay,
            headline: TypingEngine::new(headline_cfg, now),
            tagline: TypingEngine::new(tagline_cfg, now),
            headline_cursor_on: false,
            tagline_cursor_on: false,
            reveal: RevealState::new(),
            reveal_left: 0.0,
            reveal_width: 0.0,
        };
        hero.refresh_bounds();
        hero
    }

    /// Re-cache the reveal container's viewport position (scroll/resize).
    pub fn refresh_bounds(&mut self) {
        if let Some(el) = &self.reveal_container {
            let rect = el.get_bounding_client_rect();
            self.reveal_left = rect.left() as f32;
            self.reveal_width = rect.width() as f32;
        }
    }

    pub fn reveal_pointer(&mut self, client_x: f32) {
        self.reveal
            .pointer_at(client_x - self.reveal_left, self.reveal_width);
    }

    pub fn reveal_hover(&mut self, hovering: bool) {
        if hovering {
            self.reveal.enter();
        } else {
            self.reveal.leave();
        }
    }

    /// Per-frame commit: poll both engines and push changed output to the DOM.
    pub fn sync(&mut self, now: Instant, dt_sec: f32) {
        let headline_changed = self.headline.poll(now);
        if let Some(el) = &self.headline_el {
            render_typing(
                el,
                &self.headline,
                now,
                &mut self.headline_cursor_on,
                headline_changed,
            );
        }

        let tagline_changed = self.tagline.poll(now);
        if let Some(el) = &self.tagline_el {
            render_typing(
                el,
                &self.tagline,
                now,
                &mut self.tagline_cursor_on,
                tagline_changed,
            );
        }

        if let Some(overlay) = &self.reveal_overlay {
            let pct = self.reveal.step(dt_sec);
            dom::set_style(
                overlay,
                "clip-path",
                &format!("inset(0 {:.2}% 0 0)", 100.0 - pct),
            );
            dom::set_style(overlay, "opacity", if pct > 0.0 { "1" } else { "0" });
        }
    }
}

// Rewrite the element only when the text or the blink phase changed.
fn render_typing(
    el: &web::HtmlElement,
    engine: &TypingEngine,
    now: Instant,
    last_cursor_on: &mut bool,
    text_changed: bool,
) {
    let cursor_on = engine.cursor_visible(now);
    if !text_changed && cursor_on == *last_cursor_on {
        return;
    }
    *last_cursor_on = cursor_on;

    let mut html = String::new();
    for (text, color) in engine.visible_segments() {
        match color {
            Some(c) => {
                html.push_str("<span style=\"color:");
                html.push_str(c);
                html.push_str("\">");
                html.push_str(text);
                html.push_str("</span>");
            }
            None => html.push_str(text),
        }
    }
    if cursor_on {
        html.push(engine.cursor_char());
    }
    el.set_inner_html(&html);
}
