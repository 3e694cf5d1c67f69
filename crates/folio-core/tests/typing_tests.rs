use folio_core::typing::*;
use instant::Instant;
use std::time::Duration;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn headline_config() -> TypingConfig {
    TypingConfig {
        segments: vec![
            TypingSegment::new("Hi, I'm ", Some("#dfd9ff")),
            TypingSegment::new("Aolin", Some("#915EFF")),
        ],
        typing_interval: ms(80),
        ..TypingConfig::default()
    }
}

#[test]
fn visible_text_is_always_a_prefix() {
    let t0 = Instant::now();
    let mut engine = TypingEngine::new(headline_config(), t0);
    let full = "Hi, I'm Aolin";

    for i in 0..40 {
        engine.poll(t0 + ms(37 * i));
        let visible = engine.visible_text();
        assert!(full.starts_with(&visible), "{visible:?} is not a prefix");
    }
}

#[test]
fn characters_land_on_the_typing_grid() {
    let t0 = Instant::now();
    let mut engine = TypingEngine::new(headline_config(), t0);

    // First character lands the instant the (zero) initial delay expires.
    assert!(engine.poll(t0));
    assert_eq!(engine.visible_text(), "H");

    // One more per interval.
    engine.poll(t0 + ms(80));
    assert_eq!(engine.visible_text(), "Hi");
    engine.poll(t0 + ms(160));
    assert_eq!(engine.visible_text(), "Hi,");

    // A slow frame catches up on every missed interval at once.
    engine.poll(t0 + ms(12 * 80));
    assert_eq!(engine.visible_text(), "Hi, I'm Aolin");

    // Completion is observed one interval after the last character.
    engine.poll(t0 + ms(13 * 80));
    assert!(engine.is_done());
}

#[test]
fn initial_delay_holds_back_the_first_character() {
    let t0 = Instant::now();
    let cfg = TypingConfig {
        segments: vec![TypingSegment::new("later", None)],
        initial_delay: ms(1600),
        ..TypingConfig::default()
    };
    let mut engine = TypingEngine::new(cfg, t0);

    assert!(!engine.poll(t0 + ms(1599)));
    assert_eq!(engine.visible_len(), 0);

    assert!(engine.poll(t0 + ms(1600)));
    assert_eq!(engine.visible_text(), "l");
}

#[test]
fn non_looping_engine_stays_done() {
    let t0 = Instant::now();
    let mut engine = TypingEngine::new(headline_config(), t0);
    engine.poll(t0 + Duration::from_secs(60));
    assert!(engine.is_done());

    let len = engine.visible_len();
    assert_eq!(len, engine.total_len());
    // Nothing moves afterwards, however long we keep polling.
    assert!(!engine.poll(t0 + Duration::from_secs(120)));
    assert_eq!(engine.visible_len(), len);
}

#[test]
fn looping_engine_deletes_and_retypes() {
    let t0 = Instant::now();
    let cfg = TypingConfig {
        segments: vec![TypingSegment::new("ab", None)],
        typing_interval: ms(10),
        deleting_interval: ms(10),
        pause: ms(100),
        looped: true,
        ..TypingConfig::default()
    };
    let mut engine = TypingEngine::new(cfg, t0);

    // Typed out by +10ms, pausing until +110ms.
    engine.poll(t0 + ms(20));
    assert_eq!(engine.visible_text(), "ab");

    // Deleting kicks in after the pause: one char per deleting interval.
    engine.poll(t0 + ms(130));
    assert_eq!(engine.visible_text(), "a");
    engine.poll(t0 + ms(140));
    assert_eq!(engine.visible_text(), "");

    // And the cycle types again.
    engine.poll(t0 + ms(160));
    assert!(!engine.visible_text().is_empty());
    assert!(!engine.is_done());
}

#[test]
fn visible_segments_split_on_the_color_boundary() {
    let t0 = Instant::now();
    let mut engine = TypingEngine::new(headline_config(), t0);
    // 10 characters: all of "Hi, I'm " plus "Ao".
    engine.poll(t0 + ms(80 * 9));

    let segments = engine.visible_segments();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0], ("Hi, I'm ", Some("#dfd9ff")));
    assert_eq!(segments[1], ("Ao", Some("#915EFF")));
}

#[test]
fn cursor_blinks_with_the_configured_period() {
    let t0 = Instant::now();
    let cfg = TypingConfig {
        segments: vec![TypingSegment::new("abcdefghij", None)],
        blink_half_period: ms(500),
        hide_cursor_on_complete: false,
        ..TypingConfig::default()
    };
    let mut engine = TypingEngine::new(cfg, t0);

    // Before the first poll nothing has started, so no cursor yet.
    assert!(!engine.cursor_visible(t0));

    engine.poll(t0);
    assert!(engine.cursor_visible(t0));
    assert!(!engine.cursor_visible(t0 + ms(500)));
    assert!(engine.cursor_visible(t0 + ms(1000)));
}

#[test]
fn cursor_hides_after_completion_when_configured() {
    let t0 = Instant::now();
    let cfg = TypingConfig {
        segments: vec![TypingSegment::new("ab", None)],
        typing_interval: ms(10),
        hide_cursor_on_complete: true,
        ..TypingConfig::default()
    };
    let mut engine = TypingEngine::new(cfg, t0);
    engine.poll(t0);
    assert!(engine.cursor_visible(t0));

    engine.poll(t0 + ms(100));
    assert!(engine.is_done());
    assert!(!engine.cursor_visible(t0 + ms(100)));
}

#[test]
fn empty_segments_complete_immediately() {
    let t0 = Instant::now();
    let mut engine = TypingEngine::new(TypingConfig::default(), t0);
    assert!(!engine.poll(t0));
    assert!(engine.is_done());
    assert_eq!(engine.visible_text(), "");
}
