// Host-side tests for the staged-input mailbox.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod staged {
    include!("../src/staged.rs");
}

use staged::*;

#[test]
fn drain_returns_everything_and_resets() {
    let mut input = StagedInput::default();
    input.stage_pointer(10.0, 20.0);
    input.stage_scroll();
    input.stage_layout();
    input.stage_intersection(0.85);

    let frame = input.drain();
    assert_eq!(frame.pointer, Some([10.0, 20.0]));
    assert!(frame.scroll_dirty);
    assert!(frame.layout_dirty);
    assert_eq!(frame.intersection, Some(0.85));

    // A second drain sees a clean slate.
    let empty = input.drain();
    assert_eq!(empty, StagedFrame::default());
}

#[test]
fn later_pointer_events_overwrite_earlier_ones() {
    let mut input = StagedInput::default();
    input.stage_pointer(1.0, 1.0);
    input.stage_pointer(2.0, 2.0);
    input.stage_pointer(3.0, 4.0);

    // Only the newest position matters to the frame.
    assert_eq!(input.drain().pointer, Some([3.0, 4.0]));
}

#[test]
fn intersection_keeps_the_best_ratio() {
    let mut input = StagedInput::default();
    input.stage_intersection(0.4);
    input.stage_intersection(0.9);
    input.stage_intersection(0.6);

    assert_eq!(input.drain().intersection, Some(0.9));
}

#[test]
fn reveal_hover_keeps_the_latest_transition() {
    let mut input = StagedInput::default();
    input.stage_reveal_hover(true);
    input.stage_reveal_pointer(120.0);
    input.stage_reveal_hover(false);

    let frame = input.drain();
    assert_eq!(frame.reveal_hover, Some(false));
    assert_eq!(frame.reveal_pointer, Some(120.0));
}

#[test]
fn staging_is_cumulative_within_a_frame() {
    let mut input = StagedInput::default();
    input.stage_scroll();
    let frame_one = input.drain();
    assert!(frame_one.scroll_dirty);
    assert!(!frame_one.layout_dirty);

    input.stage_layout();
    let frame_two = input.drain();
    assert!(!frame_two.scroll_dirty);
    assert!(frame_two.layout_dirty);
}
