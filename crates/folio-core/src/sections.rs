//! Scroll-position to page-section resolution.
//!
//! The hero region is treated specially as section 0, spanning from the page
//! top to the hero container's bottom edge; the remaining spans come from
//! marker elements' page-absolute bounding boxes. The span list is cheap to
//! rebuild and is recomputed on every scroll/resize event, never persisted.

use smallvec::SmallVec;

use crate::camera::CAMERA_PRESETS;
use crate::geom::Rect;

pub type SectionList = SmallVec<[SectionSpan; 8]>;

/// Half-open page-space range `[top, bottom)` of one section.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionSpan {
    pub top: f32,
    pub bottom: f32,
}

impl SectionSpan {
    #[inline]
    pub fn contains(&self, y: f32) -> bool {
        y >= self.top && y < self.bottom
    }
}

pub fn build_spans(hero_bottom: f32, markers: &[Rect]) -> SectionList {
    let mut spans = SectionList::new();
    spans.push(SectionSpan {
        top: 0.0,
        bottom: hero_bottom,
    });
    for marker in markers {
        spans.push(SectionSpan {
            top: marker.top,
            bottom: marker.bottom(),
        });
    }
    spans
}

/// The page-space vertical coordinate tested for section membership: the
/// middle of the visible viewport.
#[inline]
pub fn trigger_point(scroll_y: f32, viewport_h: f32) -> f32 {
    scroll_y + viewport_h * 0.5
}

/// Resolve the current section index. The first span containing the trigger
/// point wins; with no match the hero section is assumed. The result is
/// clamped to the camera preset table, so pages with more sections than
/// presets share the last preset.
pub fn resolve_section(spans: &[SectionSpan], scroll_y: f32, viewport_h: f32) -> usize {
    let trigger = trigger_point(scroll_y, viewport_h);
    let index = spans
        .iter()
        .position(|s| s.contains(trigger))
        .unwrap_or(0);
    index.min(CAMERA_PRESETS.len() - 1)
}
