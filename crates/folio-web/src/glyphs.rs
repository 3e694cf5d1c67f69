//! DOM rendering of the pressure headline: one span per character, weights
//! pushed as both `font-weight` and `font-variation-settings` so variable and
//! static font fallbacks both animate.

use folio_core::{GeometryProbe, GlyphState, PressureConfig, Rect};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;

pub struct GlyphRow {
    container: web::HtmlElement,
    spans: Vec<web::HtmlElement>,
}

impl GlyphRow {
    /// Clear the container and lay the text out as independent glyph spans.
    /// Spaces become non-breaking so they keep a measurable box.
    pub fn build(
        document: &web::Document,
        container: web::HtmlElement,
        cfg: &PressureConfig,
    ) -> Self {
        container.set_inner_html("");
        dom::set_style(&container, "opacity", "0");
        dom::set_style(&container, "color", &cfg.text_color);
        dom::set_style(&container, "font-size", &format!("{}px", cfg.min_font_size));

        let mut spans = Vec::with_capacity(cfg.text.chars().count());
        for ch in cfg.text.chars() {
            let Ok(el) = document.create_element("span") else {
                continue;
            };
            let Ok(span) = el.dyn_into::<web::HtmlElement>() else {
                continue;
            };
            let shown = if ch == ' ' { '\u{a0}' } else { ch };
            span.set_text_content(Some(&shown.to_string()));
            dom::set_style(&span, "display", "inline-block");
            dom::set_style(&span, "font-weight", "100");
            dom::set_style(&span, "font-variation-settings", "'wght' 100");
            if container.append_child(&span).is_ok() {
                spans.push(span);
            }
        }
        Self { container, spans }
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn container(&self) -> &web::HtmlElement {
        &self.container
    }

    /// One-second opacity fade, started on the first visibility trigger.
    pub fn fade_in(&self) {
        dom::set_style(&self.container, "transition", "opacity 1s ease");
        dom::set_style(&self.container, "opacity", "1");
    }

    pub fn apply_weights(&self, glyphs: &[GlyphState]) {
        for (span, glyph) in self.spans.iter().zip(glyphs) {
            let weight = glyph.weight.round();
            dom::set_style(span, "font-weight", &format!("{weight:.0}"));
            dom::set_style(
                span,
                "font-variation-settings",
                &format!("'wght' {weight:.0}"),
            );
        }
    }
}

/// Live DOM measurements behind the core's geometry abstraction.
pub struct DomProbe<'a> {
    window: &'a web::Window,
    row: &'a GlyphRow,
}

impl<'a> DomProbe<'a> {
    pub fn new(window: &'a web::Window, row: &'a GlyphRow) -> Self {
        Self { window, row }
    }
}

impl GeometryProbe for DomProbe<'_> {
    fn container_bounds(&mut self) -> Option<Rect> {
        if !self.row.container.is_connected() {
            return None;
        }
        Some(dom::absolute_bounds(self.window, &self.row.container))
    }

    fn glyph_centers(&mut self, out: &mut [Option<Vec2>]) {
        for (slot, span) in out.iter_mut().zip(&self.row.spans) {
            if span.is_connected() {
                *slot = Some(dom::absolute_bounds(self.window, span).center());
            }
        }
    }
}
