// Host-side tests for the particle field simulation.
// The main crate is wasm-only, so these exercise starfield-core directly.

use glam::Vec2;
use starfield_core::constants::WRAP_MARGIN;
use starfield_core::field::{segment_distance, wrap};
use starfield_core::{FieldConfig, Particle, ParticleField, PlatformTier, Theme};
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);

fn desktop_field(seed: u64) -> ParticleField {
    ParticleField::new(
        FieldConfig::default(),
        Vec2::new(1920.0, 1080.0),
        PlatformTier::Desktop,
        Theme::Dark,
        seed,
    )
}

fn in_bounds(p: &Particle, viewport: Vec2) -> bool {
    p.pos.is_finite()
        && p.pos.x >= -WRAP_MARGIN
        && p.pos.x <= viewport.x + WRAP_MARGIN
        && p.pos.y >= -WRAP_MARGIN
        && p.pos.y <= viewport.y + WRAP_MARGIN
}

#[test]
fn desktop_full_hd_seeds_star_count() {
    let field = desktop_field(1);
    assert_eq!(field.particles().len(), FieldConfig::default().star_count);
    assert_eq!(field.particles().len(), 300);
}

#[test]
fn narrower_desktops_seed_fewer_stars() {
    let viewport = |w| {
        ParticleField::new(
            FieldConfig::default(),
            Vec2::new(w, 900.0),
            PlatformTier::Desktop,
            Theme::Dark,
            3,
        )
        .particles()
        .len()
    };
    assert_eq!(viewport(1300.0), 250);
    assert_eq!(viewport(1000.0), 200);
}

#[test]
fn mobile_and_constrained_use_their_counts() {
    let cfg = FieldConfig::default();
    let mobile = ParticleField::new(cfg.clone(), Vec2::new(390.0, 844.0), PlatformTier::Mobile, Theme::Dark, 5);
    assert_eq!(mobile.particles().len(), cfg.star_count_mobile);
    let low = ParticleField::new(cfg.clone(), Vec2::new(390.0, 844.0), PlatformTier::Constrained, Theme::Light, 5);
    assert_eq!(low.particles().len(), cfg.star_count_constrained);
    assert!(!low.profile().connections);
}

#[test]
fn positions_stay_finite_and_wrapped_under_stress() {
    let mut field = desktop_field(7);
    let viewport = field.viewport();
    let mut now = Duration::ZERO;
    for i in 0..400 {
        now += FRAME;
        let t = i as f32 * 0.1;
        field.pointer_moved(Vec2::new(960.0 + t.cos() * 600.0, 540.0 + t.sin() * 400.0));
        if i % 5 == 0 {
            field.scrolled((i * 37 % 3000) as f32, 3000.0, now);
        }
        if i % 50 == 0 {
            field.spawn_burst(Vec2::new(100.0, 100.0), starfield_core::BurstKind::Standard, None);
        }
        field.tick(now);
        for p in field.particles() {
            assert!(in_bounds(p, viewport), "particle escaped: {:?}", p.pos);
            assert!((0.0..=1.0).contains(&p.opacity), "opacity {}", p.opacity);
            assert!(p.size > 0.0);
            assert!((0.0..=1.0).contains(&p.growth));
        }
    }
}

#[test]
fn non_finite_state_is_repaired_on_tick() {
    let mut a = Particle::at(Vec2::new(10.0, 10.0));
    a.vel = Vec2::new(f32::NAN, 1.0);
    let mut b = Particle::at(Vec2::new(20.0, 20.0));
    b.opacity = f32::INFINITY;
    let mut field = ParticleField::with_particles(
        FieldConfig::default(),
        Vec2::new(800.0, 600.0),
        PlatformTier::Desktop,
        Theme::Dark,
        1,
        vec![a, b],
    );
    field.pointer_moved(Vec2::new(f32::NAN, 4.0));
    field.tick(FRAME);
    for p in field.particles() {
        assert!(p.pos.is_finite());
        assert!(p.vel.is_finite());
        assert!((0.0..=1.0).contains(&p.opacity));
    }
    assert_eq!(field.pointer(), None);
}

#[test]
fn wrap_moves_across_margin() {
    let viewport = Vec2::new(100.0, 100.0);
    let mut p = Vec2::new(-51.0, 160.0);
    wrap(&mut p, viewport);
    assert_eq!(p, Vec2::new(150.0, -50.0));

    let mut inside = Vec2::new(-49.0, 149.0);
    wrap(&mut inside, viewport);
    assert_eq!(inside, Vec2::new(-49.0, 149.0));
}

#[test]
fn growth_converges_inside_pointer_radius() {
    let pointer = Vec2::new(400.0, 300.0);
    let near = Particle::at(pointer + Vec2::new(60.0, 0.0));
    let far = {
        let mut p = Particle::at(Vec2::new(20.0, 20.0));
        p.growth = 0.8;
        p
    };
    let mut field = ParticleField::with_particles(
        FieldConfig::default(),
        Vec2::new(800.0, 600.0),
        PlatformTier::Mobile,
        Theme::Dark,
        9,
        vec![near, far],
    );
    field.pointer_moved(pointer);

    let mut now = Duration::ZERO;
    let mut prev = 0.0;
    let mut prev_far = 0.8;
    for _ in 0..30 {
        now += FRAME;
        field.tick(now);
        let g = field.particles()[0].growth;
        assert!(g >= prev, "growth fell from {prev} to {g}");
        assert!(g <= 1.0);
        prev = g;

        let f = field.particles()[1].growth;
        assert!(f <= prev_far, "outside growth rose from {prev_far} to {f}");
        prev_far = f;
    }
    assert!(prev > 0.2, "growth only reached {prev}");
    assert!(prev_far < 0.1, "outside particle kept growth");
}

#[test]
fn pinned_tier_survives_breakpoint_resize() {
    let mut field = desktop_field(12);
    field.pin_tier(true);
    assert!(field.is_tier_pinned());
    let count = field.particles().len();

    assert!(!field.resize(Vec2::new(400.0, 800.0)));
    assert_eq!(field.tier(), PlatformTier::Desktop);
    assert_eq!(field.particles().len(), count);
    assert_eq!(field.viewport(), Vec2::new(400.0, 800.0));

    field.pin_tier(false);
    assert!(field.resize(Vec2::new(1600.0, 900.0)));
    assert!(field.resize(Vec2::new(500.0, 900.0)));
    assert_eq!(field.tier(), PlatformTier::Mobile);
}

#[test]
fn first_pointer_sample_snaps_then_eases() {
    let mut field = desktop_field(2);
    assert_eq!(field.pointer(), None);
    field.pointer_moved(Vec2::new(100.0, 100.0));
    assert_eq!(field.pointer(), Some(Vec2::new(100.0, 100.0)));

    field.pointer_moved(Vec2::new(200.0, 100.0));
    field.tick(FRAME);
    let eased = field.pointer().unwrap();
    assert!((eased.x - 105.0).abs() < 1e-3, "eased to {}", eased.x);

    field.pointer_left();
    assert_eq!(field.pointer(), None);
}

#[test]
fn connections_respect_degree_cap() {
    // Tight cluster: every pair is within the connection distance.
    let particles: Vec<Particle> = (0..30)
        .map(|i| Particle::at(Vec2::new(300.0 + (i % 6) as f32 * 5.0, 300.0 + (i / 6) as f32 * 5.0)))
        .collect();
    let mut field = ParticleField::with_particles(
        FieldConfig::default(),
        Vec2::new(800.0, 600.0),
        PlatformTier::Desktop,
        Theme::Dark,
        4,
        particles,
    );
    field.tick(FRAME);
    let max = field.config().max_connections;
    assert!(!field.connections().is_empty());
    for (i, d) in field.connection_degrees().into_iter().enumerate() {
        assert!(d <= max, "particle {i} has {d} connections");
    }
    for c in field.connections() {
        assert!(c.a < c.b);
        assert!(c.distance < field.config().connection_distance);
    }
}

#[test]
fn degree_cap_holds_for_each_limit_in_dense_cluster() {
    for max in [1, 3, 5] {
        let particles: Vec<Particle> = (0..120)
            .map(|i| {
                Particle::at(Vec2::new(
                    300.0 + (i % 12) as f32 * 3.0,
                    300.0 + (i / 12) as f32 * 3.0,
                ))
            })
            .collect();
        let mut field = ParticleField::with_particles(
            FieldConfig {
                max_connections: max,
                ..FieldConfig::default()
            },
            Vec2::new(800.0, 600.0),
            PlatformTier::Desktop,
            Theme::Dark,
            6,
            particles,
        );
        field.tick(FRAME);
        assert!(!field.connections().is_empty(), "no connections at cap {max}");
        let degrees = field.connection_degrees();
        for (i, d) in degrees.iter().enumerate() {
            assert!(*d <= max, "cap {max}: particle {i} has {d} connections");
        }
        assert!(degrees.iter().any(|&d| d == max), "cap {max} never reached");
    }
}

#[test]
fn constrained_tier_draws_no_connections() {
    let particles = vec![
        Particle::at(Vec2::new(10.0, 10.0)),
        Particle::at(Vec2::new(12.0, 10.0)),
    ];
    let mut field = ParticleField::with_particles(
        FieldConfig::default(),
        Vec2::new(400.0, 400.0),
        PlatformTier::Constrained,
        Theme::Dark,
        4,
        particles,
    );
    field.tick(FRAME);
    assert!(field.connections().is_empty());
}

#[test]
fn pause_freezes_positions() {
    let mut field = desktop_field(11);
    field.tick(FRAME);
    let before: Vec<Vec2> = field.particles().iter().map(|p| p.pos).collect();
    field.pause();
    for i in 0..20 {
        field.pointer_moved(Vec2::new(i as f32 * 10.0, 50.0));
        field.tick(FRAME * (i + 2));
    }
    let after: Vec<Vec2> = field.particles().iter().map(|p| p.pos).collect();
    assert_eq!(before, after);
    assert_eq!(field.temporary_count(), 0);

    field.resume();
    field.tick(FRAME * 40);
    let moved: Vec<Vec2> = field.particles().iter().map(|p| p.pos).collect();
    assert_ne!(before, moved);
}

#[test]
fn destroy_releases_everything() {
    let mut field = desktop_field(12);
    field.destroy();
    assert!(!field.is_alive());
    assert!(field.particles().is_empty());
    assert_eq!(field.spawn_burst(Vec2::ZERO, starfield_core::BurstKind::Standard, None), 0);
    field.tick(FRAME);
    field.resume();
    assert!(field.particles().is_empty());
}

#[test]
fn resize_across_breakpoint_reseeds_for_new_tier() {
    let mut field = desktop_field(13);
    assert!(field.resize(Vec2::new(400.0, 800.0)));
    assert_eq!(field.tier(), PlatformTier::Mobile);
    assert_eq!(field.particles().len(), field.config().star_count_mobile);

    assert!(!field.resize(Vec2::new(500.0, 700.0)));
    assert_eq!(field.tier(), PlatformTier::Mobile);
}

#[test]
fn scrolling_flag_clears_after_idle() {
    let mut field = desktop_field(14);
    field.scrolled(100.0, 2000.0, Duration::from_millis(1000));
    field.tick(Duration::from_millis(1010));
    assert!(field.is_scrolling());
    field.tick(Duration::from_millis(1200));
    assert!(!field.is_scrolling());
}

#[test]
fn dimming_follows_scroll_position() {
    let mut field = desktop_field(15);
    let mut now = Duration::ZERO;
    field.scrolled(1000.0, 2000.0, now);
    for _ in 0..200 {
        now += FRAME;
        field.tick(now);
    }
    assert!(field.section_dimmed());
    assert!((field.dimming() - 0.8).abs() < 0.01, "dimming {}", field.dimming());

    field.scrolled(0.0, 2000.0, now);
    for _ in 0..200 {
        now += FRAME;
        field.tick(now);
    }
    assert!(!field.section_dimmed());
    assert!(field.dimming() > 0.98);
}

#[test]
fn segment_distance_handles_degenerate_segment() {
    let d = segment_distance(Vec2::new(5.0, 5.0), Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
    assert_eq!(d, Some(5.0));
    let clamped = segment_distance(Vec2::new(-3.0, 4.0), Vec2::ZERO, Vec2::new(10.0, 0.0));
    assert_eq!(clamped, Some(5.0));
    assert_eq!(segment_distance(Vec2::ONE, Vec2::ZERO, Vec2::ZERO), None);
}
