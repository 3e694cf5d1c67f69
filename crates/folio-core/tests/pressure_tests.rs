use folio_core::geom::Rect;
use folio_core::pressure::*;
use glam::Vec2;
use instant::Instant;
use std::time::Duration;

/// Deterministic host geometry: a fixed container with glyph centers spread
/// horizontally across it.
struct FixedProbe {
    bounds: Rect,
    centers: Vec<Vec2>,
    measure_calls: usize,
}

impl FixedProbe {
    fn new(bounds: Rect, glyph_count: usize) -> Self {
        let step = if glyph_count > 1 {
            bounds.width / (glyph_count as f32 - 1.0)
        } else {
            0.0
        };
        let centers = (0..glyph_count)
            .map(|i| {
                Vec2::new(
                    bounds.left + step * i as f32,
                    bounds.top + bounds.height * 0.5,
                )
            })
            .collect();
        Self {
            bounds,
            centers,
            measure_calls: 0,
        }
    }
}

impl GeometryProbe for FixedProbe {
    fn container_bounds(&mut self) -> Option<Rect> {
        self.measure_calls += 1;
        Some(self.bounds)
    }

    fn glyph_centers(&mut self, out: &mut [Option<Vec2>]) {
        for (slot, center) in out.iter_mut().zip(&self.centers) {
            *slot = Some(*center);
        }
    }
}

fn animator_for(text: &str) -> PressureAnimator {
    PressureAnimator::new(PressureConfig {
        text: text.to_owned(),
        ..PressureConfig::default()
    })
}

fn intro_delay() -> Duration {
    PressureConfig::default().intro_delay
}

fn intro_duration() -> Duration {
    PressureConfig::default().intro_duration
}

/// Trigger and fast-forward through the full sweep so the animator ends up in
/// PointerFollow mode. Returns the instant right after completion.
fn run_through_sweep(
    animator: &mut PressureAnimator,
    probe: &mut FixedProbe,
    t0: Instant,
) -> Instant {
    assert!(animator.observe_intersection(1.0, t0));
    let sweep_start = t0 + intro_delay();
    animator.step(sweep_start, Vec2::ZERO, probe);
    let sweep_end = sweep_start + intro_duration();
    animator.step(sweep_end, Vec2::ZERO, probe);
    assert_eq!(animator.cursor().mode, CursorMode::PointerFollow);
    sweep_end
}

#[test]
fn empty_text_yields_zero_glyphs() {
    let mut animator = animator_for("");
    let mut probe = FixedProbe::new(Rect::new(0.0, 0.0, 0.0, 0.0), 0);
    assert_eq!(animator.glyph_count(), 0);

    let t0 = Instant::now();
    assert_eq!(animator.step(t0, Vec2::ZERO, &mut probe), StepOutcome::Hidden);

    // Triggering still works, there is just nothing to weigh.
    animator.observe_intersection(1.0, t0);
    let outcome = animator.step(t0 + intro_delay(), Vec2::ZERO, &mut probe);
    assert_eq!(outcome, StepOutcome::Updated);
    assert!(animator.glyphs().is_empty());
}

#[test]
fn untriggered_animator_is_a_cheap_noop() {
    let mut animator = animator_for("Portfolio");
    let mut probe = FixedProbe::new(Rect::new(100.0, 200.0, 400.0, 60.0), 9);
    let t0 = Instant::now();

    // A container that never crosses the threshold never activates.
    assert!(!animator.observe_intersection(0.5, t0));
    for i in 0..10 {
        let outcome = animator.step(
            t0 + Duration::from_millis(16 * i),
            Vec2::ZERO,
            &mut probe,
        );
        assert_eq!(outcome, StepOutcome::Hidden);
    }
    assert!(!animator.is_triggered());
}

#[test]
fn trigger_is_one_shot() {
    let mut animator = animator_for("Portfolio");
    let t0 = Instant::now();

    assert!(animator.observe_intersection(0.9, t0));
    // Later observations, including leaving and re-entering the viewport,
    // change nothing.
    assert!(!animator.observe_intersection(0.9, t0 + Duration::from_secs(5)));
    assert!(!animator.observe_intersection(1.0, t0 + Duration::from_secs(9)));
    assert!(animator.is_triggered());
}

#[test]
fn sweep_progress_is_monotonic_and_completes_at_duration() {
    let mut animator = animator_for("Portfolio");
    let mut probe = FixedProbe::new(Rect::new(100.0, 200.0, 400.0, 60.0), 9);
    let t0 = Instant::now();
    animator.observe_intersection(1.0, t0);

    let sweep_start = t0 + intro_delay();
    animator.step(sweep_start, Vec2::ZERO, &mut probe);
    assert_eq!(animator.cursor().mode, CursorMode::IntroSweep);

    let mut last_progress = 0.0;
    let mut last_x = f32::MIN;
    for frac in [0.1, 0.25, 0.5, 0.75, 0.99] {
        let now = sweep_start + intro_duration().mul_f32(frac);
        animator.step(now, Vec2::ZERO, &mut probe);
        let progress = animator.sweep_progress(now).unwrap();
        assert!(progress >= last_progress, "progress went backwards");
        assert!((progress - frac).abs() < 1e-3);
        // The cursor target moves strictly left to right.
        assert!(animator.cursor().target.x > last_x);
        last_progress = progress;
        last_x = animator.cursor().target.x;
    }

    // Exactly 1 at the configured duration, then the sweep is over for good.
    let end = sweep_start + intro_duration();
    animator.step(end, Vec2::ZERO, &mut probe);
    assert_eq!(animator.cursor().mode, CursorMode::PointerFollow);
    assert!(animator.sweep_progress(end).is_none());
}

#[test]
fn sweep_never_reenters_after_completion() {
    let mut animator = animator_for("Portfolio");
    let mut probe = FixedProbe::new(Rect::new(100.0, 200.0, 400.0, 60.0), 9);
    let t0 = Instant::now();
    let end = run_through_sweep(&mut animator, &mut probe, t0);

    for i in 1..20 {
        animator.step(end + Duration::from_millis(16 * i), Vec2::ZERO, &mut probe);
        assert_eq!(animator.cursor().mode, CursorMode::PointerFollow);
    }
}

#[test]
fn pointer_snap_drives_exact_weight_endpoints() {
    let mut animator = animator_for("Portfolio");
    let bounds = Rect::new(100.0, 200.0, 400.0, 60.0);
    let mut probe = FixedProbe::new(bounds, 9);
    let t0 = Instant::now();
    let end = run_through_sweep(&mut animator, &mut probe, t0);

    // Pointer exactly on the first glyph center: distance 0, weight exactly 900.
    let first_center = probe.centers[0];
    animator.stage_pointer(first_center);
    let outcome = animator.step(end + Duration::from_millis(16), Vec2::ZERO, &mut probe);
    assert_eq!(outcome, StepOutcome::Updated);
    assert_eq!(animator.cursor().current, first_center);
    assert!((animator.glyphs()[0].weight - 900.0).abs() < 1e-3);

    // A glyph beyond the max radius stays clamped at the minimum.
    let far = animator
        .glyphs()
        .iter()
        .find(|g| g.center.unwrap().distance(first_center) > 140.0)
        .expect("probe layout provides a far glyph");
    assert!((far.weight - 100.0).abs() < 1e-3);
}

#[test]
fn weights_stay_in_band_throughout_the_sweep() {
    let mut animator = animator_for("Portfolio");
    let mut probe = FixedProbe::new(Rect::new(100.0, 200.0, 400.0, 60.0), 9);
    let t0 = Instant::now();
    animator.observe_intersection(1.0, t0);
    let sweep_start = t0 + intro_delay();

    for i in 0..120 {
        animator.step(
            sweep_start + Duration::from_millis(16 * i),
            Vec2::ZERO,
            &mut probe,
        );
        for glyph in animator.glyphs() {
            assert!(glyph.weight >= 100.0 && glyph.weight <= 900.0);
        }
    }
}

#[test]
fn pointer_is_ignored_mid_sweep() {
    let mut animator = animator_for("Portfolio");
    let mut probe = FixedProbe::new(Rect::new(100.0, 200.0, 400.0, 60.0), 9);
    let t0 = Instant::now();
    animator.observe_intersection(1.0, t0);

    let mid = t0 + intro_delay() + intro_duration().mul_f32(0.5);
    animator.step(mid, Vec2::ZERO, &mut probe);
    animator.stage_pointer(Vec2::new(9999.0, 9999.0));
    animator.step(mid + Duration::from_millis(16), Vec2::ZERO, &mut probe);

    // Still sweeping: the target is time-determined, nowhere near the pointer.
    assert_eq!(animator.cursor().mode, CursorMode::IntroSweep);
    assert!(animator.cursor().target.x < 1000.0);
}

#[test]
fn settled_cursor_skips_the_glyph_pass() {
    let mut animator = animator_for("Portfolio");
    let mut probe = FixedProbe::new(Rect::new(100.0, 200.0, 400.0, 60.0), 9);
    let t0 = Instant::now();
    let end = run_through_sweep(&mut animator, &mut probe, t0);

    let pos = Vec2::new(300.0, 230.0);
    animator.stage_pointer(pos);
    animator.step(end + Duration::from_millis(16), Vec2::ZERO, &mut probe);

    // Snap landed the cursor on its target; with no new input the next frames
    // are skipped entirely.
    for i in 2..10 {
        let outcome = animator.step(
            end + Duration::from_millis(16 * i),
            Vec2::ZERO,
            &mut probe,
        );
        assert_eq!(outcome, StepOutcome::Settled);
    }
}

#[test]
fn geometry_is_remeasured_after_the_sweep() {
    let mut animator = animator_for("Portfolio");
    let mut probe = FixedProbe::new(Rect::new(100.0, 200.0, 400.0, 60.0), 9);
    let t0 = Instant::now();
    animator.observe_intersection(1.0, t0);

    let sweep_start = t0 + intro_delay();
    animator.step(sweep_start, Vec2::ZERO, &mut probe);
    let measured_during_sweep = probe.measure_calls;

    // Completion marks bounds stale; the next step measures again.
    animator.step(sweep_start + intro_duration(), Vec2::ZERO, &mut probe);
    assert!(probe.measure_calls > measured_during_sweep);
}

#[test]
fn redundant_geometry_invalidation_is_harmless() {
    let mut animator = animator_for("Portfolio");
    let mut probe = FixedProbe::new(Rect::new(100.0, 200.0, 400.0, 60.0), 9);
    let t0 = Instant::now();
    let end = run_through_sweep(&mut animator, &mut probe, t0);

    animator.stage_pointer(Vec2::new(300.0, 230.0));
    animator.step(end + Duration::from_millis(16), Vec2::ZERO, &mut probe);
    let weights: Vec<f32> = animator.glyphs().iter().map(|g| g.weight).collect();

    // Back-to-back invalidations (burst of resize events) recompute the same
    // state without disturbing the animation.
    animator.invalidate_geometry();
    animator.invalidate_geometry();
    animator.stage_pointer(Vec2::new(300.0, 230.0));
    animator.step(end + Duration::from_millis(32), Vec2::ZERO, &mut probe);
    let weights_after: Vec<f32> = animator.glyphs().iter().map(|g| g.weight).collect();
    assert_eq!(weights, weights_after);
}

#[test]
fn set_text_rebuilds_glyph_state() {
    let mut animator = animator_for("Portfolio");
    assert_eq!(animator.glyph_count(), 9);

    animator.set_text("Hi");
    assert_eq!(animator.glyph_count(), 2);
    assert!(animator.geometry_stale());
    for glyph in animator.glyphs() {
        assert!(glyph.center.is_none());
        assert_eq!(glyph.weight, 100.0);
    }
}
