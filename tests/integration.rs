// Integration tests (native) for the `tinychancy` crate.
// These avoid wasm-specific functionality and exercise config handling and the
// public character API so they can run under `cargo test` on the host.

use tinychancy::character::{Anchor, Geometry, Pose, StateKind};
use tinychancy::config::DurationRange;
use tinychancy::rng::Xorshift64;
use tinychancy::{Character, Config, WidgetError};

#[test]
fn default_assets_live_under_tinychancy() {
    let config = Config::default();
    let urls: Vec<_> = Pose::ALL.iter().map(|p| config.asset_url(*p)).collect();
    assert_eq!(
        urls,
        vec![
            "/tinychancy/tinychancy_idle.gif",
            "/tinychancy/tinychancy_walk.gif",
            "/tinychancy/tinychancy_sit.gif",
            "/tinychancy/tinychancy_dangle.gif",
        ]
    );
}

#[test]
fn host_page_can_override_physics_only() {
    let config = Config::from_json(r#"{"gravity": 900, "screen_wrap": false}"#).unwrap();
    assert_eq!(config.gravity, 900.0);
    assert!(!config.screen_wrap);
    assert_eq!(config.bounce_fraction, 0.25);
    assert_eq!(config.idle_wait, DurationRange::new(5_000.0, 10_000.0));
}

#[test]
fn malformed_config_is_an_error_but_lenient_loader_recovers() {
    let err = Config::from_json("{ gravity: 900").unwrap_err();
    assert!(matches!(err, WidgetError::Json(_)));
    let err = Config::from_json(r#"{"sit_chance": 2.0}"#).unwrap_err();
    assert!(matches!(err, WidgetError::InvalidConfig(_)));

    assert_eq!(Config::from_json_or_default(Some("nope")), Config::default());
    assert_eq!(Config::from_json_or_default(Some("   ")), Config::default());
    assert_eq!(Config::from_json_or_default(None), Config::default());
}

#[test]
fn phones_get_a_smaller_character() {
    let config = Config::default();
    assert!(config.scale_for_viewport(360.0) < config.scale_for_viewport(600.0));
    assert!(config.scale_for_viewport(600.0) < config.scale_for_viewport(1280.0));
    assert_eq!(config.scale_for_viewport(1280.0), 0.36);
}

#[test]
fn seeded_character_starts_grounded_and_on_screen() {
    for seed in 1..50_u64 {
        let c = Character::new(
            Config::default(),
            Geometry::new(1280.0, 720.0, 64.0, 96.0),
            Xorshift64::new(seed),
            0.0,
        )
        .unwrap();
        let frame = c.frame();
        assert!(matches!(frame.state, StateKind::Idle | StateKind::Sitting));
        assert_eq!(frame.y, 0.0);
        assert!((32.0..=1248.0).contains(&frame.x), "seed {seed} placed x at {}", frame.x);
        assert_eq!(frame.anchor, Anchor::BottomCenter);
        assert!(frame.ghost_x.is_none());
    }
}

#[test]
fn teardown_silences_the_character() {
    let mut c = Character::new(
        Config::default(),
        Geometry::new(800.0, 600.0, 40.0, 60.0),
        Xorshift64::new(7),
        0.0,
    )
    .unwrap();
    c.teardown();
    assert!(c.is_torn_down());
    assert!(c.pending_timers().is_empty());
    let before = c.frame();
    assert_eq!(c.tick(120_000.0), before);
}
