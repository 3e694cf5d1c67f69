use folio_core::reveal::*;

const FRAME: f32 = 1.0 / 60.0;

#[test]
fn pointer_position_maps_to_a_clamped_percentage() {
    let mut reveal = RevealState::new();
    reveal.enter();

    reveal.pointer_at(50.0, 200.0);
    assert_eq!(reveal.step(FRAME), 25.0);

    reveal.pointer_at(-40.0, 200.0);
    assert_eq!(reveal.step(FRAME), 0.0);

    reveal.pointer_at(400.0, 200.0);
    assert_eq!(reveal.step(FRAME), 100.0);
}

#[test]
fn tracking_is_immediate_while_hovered() {
    let mut reveal = RevealState::new();
    reveal.enter();
    reveal.pointer_at(180.0, 200.0);
    // No easing lag on the very first frame.
    assert_eq!(reveal.step(FRAME), 90.0);
}

#[test]
fn release_eases_shut_and_finishes() {
    let mut reveal = RevealState::new();
    reveal.enter();
    reveal.pointer_at(160.0, 200.0);
    reveal.step(FRAME);
    assert_eq!(reveal.percent(), 80.0);

    reveal.leave();

    // Strictly decreasing on the way out.
    let mut last = reveal.percent();
    for _ in 0..30 {
        let now = reveal.step(FRAME);
        assert!(now <= last);
        last = now;
    }

    // Fully shut after roughly a second of frames.
    for _ in 0..60 {
        reveal.step(FRAME);
    }
    assert_eq!(reveal.percent(), 0.0);
}

#[test]
fn degenerate_container_width_is_ignored() {
    let mut reveal = RevealState::new();
    reveal.enter();
    reveal.pointer_at(50.0, 0.0);
    assert_eq!(reveal.step(FRAME), 0.0);
}
