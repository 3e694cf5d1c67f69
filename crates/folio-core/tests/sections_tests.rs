use folio_core::geom::Rect;
use folio_core::sections::*;

const VIEWPORT_H: f32 = 800.0;

/// Three sections as page ranges [0,500), [500,1200), [1200,2000).
fn three_sections() -> SectionList {
    build_spans(
        500.0,
        &[
            Rect::new(0.0, 500.0, 1000.0, 700.0),
            Rect::new(0.0, 1200.0, 1000.0, 800.0),
        ],
    )
}

#[test]
fn trigger_point_is_the_viewport_center() {
    assert_eq!(trigger_point(0.0, VIEWPORT_H), 400.0);
    assert_eq!(trigger_point(900.0, VIEWPORT_H), 1300.0);
}

#[test]
fn resolves_sections_at_boundary_adjacent_offsets() {
    let spans = three_sections();

    // S=0 -> trigger 400 -> hero
    assert_eq!(resolve_section(&spans, 0.0, VIEWPORT_H), 0);
    // trigger 600 -> second section
    assert_eq!(resolve_section(&spans, 200.0, VIEWPORT_H), 1);
    // S=900 -> trigger 1300 -> third section
    assert_eq!(resolve_section(&spans, 900.0, VIEWPORT_H), 2);
}

#[test]
fn boundaries_are_half_open() {
    let spans = three_sections();

    // trigger exactly 500: belongs to the second section, not the hero
    assert_eq!(resolve_section(&spans, 100.0, VIEWPORT_H), 1);
    // trigger exactly 1200: belongs to the third
    assert_eq!(resolve_section(&spans, 800.0, VIEWPORT_H), 2);
}

#[test]
fn out_of_range_trigger_falls_back_to_hero() {
    let spans = three_sections();
    // Past the last section bottom: no span contains the trigger.
    assert_eq!(resolve_section(&spans, 5000.0, VIEWPORT_H), 0);
}

#[test]
fn index_is_clamped_to_the_preset_table() {
    // Seven tightly packed sections; the trigger lands in the seventh.
    let markers: Vec<Rect> = (1..7)
        .map(|i| Rect::new(0.0, 100.0 * i as f32, 1000.0, 100.0))
        .collect();
    let spans = build_spans(100.0, &markers);
    assert_eq!(spans.len(), 7);

    let idx = resolve_section(&spans, 250.0, 800.0);
    // trigger 650 -> raw index 6, clamped to the last preset (4)
    assert_eq!(idx, 4);
}

#[test]
fn hero_always_starts_at_page_top() {
    let spans = build_spans(930.0, &[]);
    assert_eq!(spans[0].top, 0.0);
    assert_eq!(spans[0].bottom, 930.0);
    assert_eq!(resolve_section(&spans, 0.0, VIEWPORT_H), 0);
}
