// Host-side tests for bursts, attraction and the event channel.

use glam::Vec2;
use starfield_core::constants::{WAVE_BURSTS, WAVE_STAGGER};
use starfield_core::{
    channel, BurstKind, FieldConfig, FieldEvent, Particle, ParticleField, PlatformTier, Theme,
};
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);

fn mobile_field() -> ParticleField {
    ParticleField::new(
        FieldConfig::default(),
        Vec2::new(600.0, 900.0),
        PlatformTier::Mobile,
        Theme::Dark,
        31,
    )
}

#[test]
fn burst_kinds_have_expected_sizes() {
    assert_eq!(BurstKind::Standard.count(), 15);
    assert_eq!(BurstKind::Elegant.count(), 6);
    assert_eq!(BurstKind::Trail.count(), 1);
    assert!(BurstKind::Standard.lifetime_frames() > BurstKind::Elegant.lifetime_frames());
    assert!(BurstKind::Elegant.lifetime_frames() > BurstKind::Trail.lifetime_frames());
}

#[test]
fn burst_adds_k_then_returns_to_baseline() {
    let mut field = mobile_field();
    let baseline = field.particles().len();
    let added = field.spawn_burst(Vec2::new(300.0, 300.0), BurstKind::Standard, None);
    assert_eq!(added, 15);
    assert_eq!(field.particles().len(), baseline + 15);
    assert_eq!(field.temporary_count(), 15);

    let mut now = Duration::ZERO;
    for _ in 0..BurstKind::Standard.lifetime_frames() + 1 {
        now += FRAME;
        field.tick(now);
    }
    assert_eq!(field.temporary_count(), 0);
    assert_eq!(field.particles().len(), baseline);
}

#[test]
fn burst_particles_fade_monotonically() {
    let mut field = ParticleField::with_particles(
        FieldConfig::default(),
        Vec2::new(600.0, 600.0),
        PlatformTier::Mobile,
        Theme::Dark,
        1,
        Vec::new(),
    );
    field.spawn_burst(Vec2::new(300.0, 300.0), BurstKind::Elegant, Some(217.0));
    assert!(field.particles().iter().all(|p| p.hue == 217.0));
    let mut prev = f32::MAX;
    let mut now = Duration::ZERO;
    while !field.particles().is_empty() {
        now += FRAME;
        field.tick(now);
        if let Some(p) = field.particles().first() {
            assert!(p.opacity <= prev);
            prev = p.opacity;
        }
    }
}

#[test]
fn burst_at_non_finite_point_is_ignored() {
    let mut field = mobile_field();
    assert_eq!(field.spawn_burst(Vec2::new(f32::NAN, 0.0), BurstKind::Standard, None), 0);
    assert_eq!(field.temporary_count(), 0);
}

#[test]
fn particle_cap_holds_under_burst_spam() {
    let mut field = mobile_field();
    let cap = field.profile().cap;
    for _ in 0..40 {
        field.spawn_burst(Vec2::new(300.0, 300.0), BurstKind::Standard, None);
    }
    field.tick(FRAME);
    assert!(field.particles().len() <= cap);
}

#[test]
fn attraction_pulls_and_grows_nearby_particles() {
    let target = Vec2::new(200.0, 200.0);
    let mut field = ParticleField::with_particles(
        FieldConfig::default(),
        Vec2::new(800.0, 600.0),
        PlatformTier::Mobile,
        Theme::Dark,
        1,
        vec![Particle::at(Vec2::new(250.0, 200.0)), Particle::at(Vec2::new(700.0, 500.0))],
    );
    field.attract(target, 150.0);
    let near = &field.particles()[0];
    assert!(near.vel.x < 0.0, "not pulled toward target");
    assert!(near.target_growth > 0.0);
    assert_eq!(field.particles()[1].vel, Vec2::ZERO);
}

#[test]
fn timed_attraction_expires() {
    let mut field = ParticleField::with_particles(
        FieldConfig::default(),
        Vec2::new(800.0, 600.0),
        PlatformTier::Mobile,
        Theme::Dark,
        1,
        vec![Particle::at(Vec2::new(250.0, 200.0))],
    );
    field.attract_for(Vec2::new(200.0, 200.0), 150.0, Duration::from_millis(100));
    field.tick(Duration::from_millis(50));
    assert!(field.particles()[0].target_growth > 0.0);
    field.tick(Duration::from_millis(200));
    assert_eq!(field.particles()[0].target_growth, 0.0);
}

#[test]
fn text_change_releases_staggered_wave() {
    let mut field = ParticleField::with_particles(
        FieldConfig::default(),
        Vec2::new(800.0, 600.0),
        PlatformTier::Mobile,
        Theme::Dark,
        1,
        Vec::new(),
    );
    field.text_changed(Vec2::new(400.0, 200.0), 300.0);
    assert_eq!(field.temporary_count(), 0);

    field.tick(Duration::ZERO);
    assert_eq!(field.temporary_count(), BurstKind::Elegant.count());

    let last = WAVE_STAGGER * (WAVE_BURSTS as u32 - 1);
    field.tick(last);
    let expected = BurstKind::Elegant.count() * WAVE_BURSTS;
    // the first wave has decayed a little but is still alive
    assert_eq!(field.temporary_count(), expected);
}

#[test]
fn events_flow_through_channel_in_order() {
    let (tx, rx) = channel();
    let mut field = mobile_field();
    let baseline = field.particles().len();
    assert!(rx.is_empty());

    tx.send(FieldEvent::Burst {
        point: Vec2::new(10.0, 10.0),
        kind: BurstKind::Elegant,
        hue: None,
    });
    tx.clone().send_all([
        FieldEvent::Theme(Theme::Light),
        FieldEvent::Attract {
            point: Vec2::new(300.0, 300.0),
            radius: 100.0,
        },
    ]);

    let events = rx.drain();
    assert_eq!(events.len(), 3);
    assert!(rx.is_empty());
    for ev in events {
        field.apply(ev);
    }
    assert_eq!(field.particles().len(), baseline + BurstKind::Elegant.count());
    assert_eq!(field.theme(), Theme::Light);
    assert!(!field.is_paused());
}
