// Host-side tests for configuration overrides, theme resolution and stored
// preferences.

use glam::Vec2;
use starfield_core::prefs::InteractionBundle;
use starfield_core::theme::resolve_theme;
use starfield_core::{BurstKind, FieldConfig, ParticleField, PlatformTier, Theme};

#[test]
fn defaults_match_shipped_look() {
    let cfg = FieldConfig::default();
    assert_eq!(cfg.star_count, 300);
    assert_eq!(cfg.depth_layers, 4);
    assert_eq!(cfg.connection_distance, 120.0);
    assert_eq!(cfg.max_connections, 2);
    assert_eq!(cfg.mouse_influence, 180.0);
    assert_eq!(cfg.connection_opacity, 0.0);
    assert!(cfg.scroll_parallax);
}

#[test]
fn partial_json_overrides_only_named_keys() {
    let cfg = FieldConfig::from_json(r#"{"starCount": 42, "scrollParallax": false}"#).unwrap();
    assert_eq!(cfg.star_count, 42);
    assert!(!cfg.scroll_parallax);
    assert_eq!(cfg.star_count_mobile, FieldConfig::default().star_count_mobile);
}

#[test]
fn broken_values_are_repaired() {
    let cfg = FieldConfig::from_json(
        r#"{"depthLayers": 0, "specialRatio": 7.5, "sizeRange": [3.0, 1.0], "connectionDistance": -5, "dimmingSpeed": 4}"#,
    )
    .unwrap();
    let d = FieldConfig::default();
    assert_eq!(cfg.depth_layers, 2);
    assert_eq!(cfg.special_ratio, 1.0);
    assert_eq!(cfg.size_range, d.size_range);
    assert_eq!(cfg.connection_distance, d.connection_distance);
    assert_eq!(cfg.dimming_speed, 1.0);
}

#[test]
fn bad_trail_size_still_spawns_trails() {
    for json in [r#"{"trailSize": -1}"#, r#"{"trailSize": 0}"#] {
        let cfg = FieldConfig::from_json(json).unwrap();
        assert_eq!(cfg.trail_size, 1.5, "{json}");

        let mut field = ParticleField::new(
            cfg,
            Vec2::new(1280.0, 720.0),
            PlatformTier::Desktop,
            Theme::Dark,
            3,
        );
        let before = field.particles().len();
        assert_eq!(field.spawn_burst(Vec2::new(200.0, 200.0), BurstKind::Trail, None), 1);
        let trail = &field.particles()[before];
        assert!(trail.size > 0.0 && trail.size.is_finite());
    }
}

#[test]
fn malformed_config_json_is_an_error() {
    assert!(FieldConfig::from_json("{starCount: 1").is_err());
    assert!(FieldConfig::from_json(r#"{"starCount": "many"}"#).is_err());
}

#[test]
fn theme_attribute_parsing() {
    assert_eq!(Theme::from_attr(Some("light")), Theme::Light);
    assert_eq!(Theme::from_attr(Some(" LIGHT ")), Theme::Light);
    assert_eq!(Theme::from_attr(Some("sepia")), Theme::Dark);
    assert_eq!(Theme::from_attr(None), Theme::Dark);
    assert_eq!(Theme::Dark.toggled(), Theme::Light);
    assert_eq!(Theme::Light.as_str(), "light");
}

#[test]
fn saved_theme_wins_over_system_preference() {
    assert_eq!(resolve_theme(Some("light"), true), Theme::Light);
    assert_eq!(resolve_theme(Some("dark"), false), Theme::Dark);
    assert_eq!(resolve_theme(None, false), Theme::Light);
    assert_eq!(resolve_theme(Some(""), true), Theme::Dark);
}

#[test]
fn bundle_survives_corrupt_storage() {
    assert_eq!(InteractionBundle::load(None), InteractionBundle::default());
    assert_eq!(InteractionBundle::load(Some("{not json")), InteractionBundle::default());
    assert_eq!(InteractionBundle::load(Some("42")), InteractionBundle::default());

    let partial = InteractionBundle::load(Some(r#"{"visits": 4}"#));
    assert_eq!(partial.visits, 4);
    assert!(!partial.has_interacted);
}

#[test]
fn bundle_counts_visits_and_messages() {
    let mut b = InteractionBundle::default();
    b.record_visit();
    b.record_visit();
    b.record_message();
    assert_eq!(b.visits, 2);
    assert_eq!(b.messages, 1);
    assert!(b.has_interacted);

    let json = b.to_json().unwrap();
    assert!(json.contains("\"hasInteracted\":true"));
    assert_eq!(InteractionBundle::load(Some(&json)), b);
}
