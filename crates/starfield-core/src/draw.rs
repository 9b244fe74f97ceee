//! Render pass: nebula blooms, hover connections and stars, in that order.

use crate::constants::{CONNECTION_HOVER_DISTANCE, DIMMING_MIN};
use crate::field::{segment_distance, Connection, ParticleField};
use crate::lighting;
use crate::particle::Particle;
use crate::surface::{finite_or, stops, unit, Color, Surface};
use crate::theme::Theme;
use glam::Vec2;

pub fn render<S: Surface + ?Sized>(field: &ParticleField, surface: &mut S) {
    surface.clear(field.viewport());
    if !field.is_alive() {
        return;
    }
    let profile = field.profile();
    let dim = field.dimming().max(DIMMING_MIN);

    if profile.nebula {
        surface.set_alpha(dim);
        draw_nebula(field, surface);
        surface.set_alpha(1.0);
    }
    if profile.connections {
        for c in field.connections() {
            draw_connection(field, c, surface);
        }
    }
    for p in field.particles() {
        draw_particle(field, p, dim, surface);
    }
    surface.set_alpha(1.0);
}

fn draw_nebula<S: Surface + ?Sized>(field: &ParticleField, surface: &mut S) {
    let cfg = field.config();
    let t = field.time();
    let vp = field.viewport();
    let base = match field.theme() {
        Theme::Dark => cfg.nebula_opacity,
        Theme::Light => cfg.nebula_opacity_light,
    };
    for i in 0..cfg.nebula_count {
        let fi = i as f32;
        let center = Vec2::new(
            ((t * 0.1 + fi * 2.0).sin() + 1.0) * vp.x * 0.5,
            ((t * 0.05 + fi * 3.0).cos() + 1.0) * vp.y * 0.5,
        );
        let size = 200.0 + (t * 0.1 + fi).sin() * 50.0;
        let o = base * (0.7 + (t * 0.2 + fi).sin() * 0.3);
        let list = match field.theme() {
            Theme::Dark => stops(&[
                (0.0, Color::rgba(138.0, 43.0, 226.0, o * 1.2)),
                (0.3, Color::rgba(30.0, 144.0, 255.0, o * 0.8)),
                (0.6, Color::rgba(147.0, 197.0, 253.0, o * 0.4)),
                (1.0, Color::Transparent),
            ]),
            Theme::Light => stops(&[
                (0.0, Color::rgba(71.0, 85.0, 105.0, o * 1.4)),
                (0.3, Color::rgba(51.0, 65.0, 85.0, o)),
                (0.6, Color::rgba(30.0, 41.0, 59.0, o * 0.6)),
                (1.0, Color::Transparent),
            ]),
        };
        surface.fill_radial(center, size, &list);
    }
}

/// Opacity of a connection this frame; zero unless the pointer hovers near
/// it (with the default resting opacity of zero).
pub fn connection_opacity(field: &ParticleField, c: &Connection) -> f32 {
    let cfg = field.config();
    let particles = field.particles();
    let (Some(a), Some(b)) = (particles.get(c.a), particles.get(c.b)) else {
        return 0.0;
    };
    let hovered = field
        .pointer()
        .and_then(|m| segment_distance(m, a.pos, b.pos))
        .is_some_and(|d| d < CONNECTION_HOVER_DISTANCE);
    let base = match (field.theme(), hovered) {
        (Theme::Dark, true) => cfg.connection_opacity_hover,
        (Theme::Dark, false) => cfg.connection_opacity,
        (Theme::Light, true) => cfg.connection_opacity_hover_light,
        (Theme::Light, false) => cfg.connection_opacity_light,
    };
    unit(base * (1.0 + a.growth * 2.0) * field.dimming().max(DIMMING_MIN))
}

fn draw_connection<S: Surface + ?Sized>(field: &ParticleField, c: &Connection, surface: &mut S) {
    let opacity = connection_opacity(field, c);
    if opacity <= 0.0 {
        return;
    }
    let particles = field.particles();
    let (from, to) = (&particles[c.a], &particles[c.b]);
    if !from.pos.is_finite() || !to.pos.is_finite() {
        return;
    }
    let mid = (from.pos + to.pos) * 0.5;
    let curve = finite_or((field.time() + from.pos.x * 0.01).sin() * 20.0, 0.0);
    let control = mid + Vec2::new(curve, curve * 0.5);
    let list = match field.theme() {
        Theme::Dark => stops(&[
            (0.0, Color::rgba(147.0, 197.0, 253.0, opacity)),
            (0.5, Color::rgba(196.0, 181.0, 253.0, opacity * 1.5)),
            (1.0, Color::rgba(147.0, 197.0, 253.0, opacity)),
        ]),
        Theme::Light => stops(&[
            (0.0, Color::rgba(30.0, 41.0, 59.0, opacity)),
            (0.5, Color::rgba(51.0, 65.0, 85.0, opacity * 1.3)),
            (1.0, Color::rgba(30.0, 41.0, 59.0, opacity)),
        ]),
    };
    surface.stroke_curve(from.pos, control, to.pos, 0.5 + from.growth, &list);
}

fn draw_particle<S: Surface + ?Sized>(
    field: &ParticleField,
    p: &Particle,
    dim: f32,
    surface: &mut S,
) {
    if !p.pos.is_finite() {
        return;
    }
    let profile = field.profile();
    let theme = field.theme();
    let twinkle = finite_or(p.twinkle.sin(), 0.0) * 0.3 + 0.7;
    let pulse = if p.special {
        finite_or(p.pulse_phase.sin(), 0.0) * 0.2 + 0.8
    } else {
        1.0
    };
    let light = finite_or(
        lighting::intensity(p, field.viewport(), field.config(), theme),
        0.5,
    );

    let floor = if p.is_temporary() {
        0.0
    } else {
        0.4 * profile.opacity_scale
    };
    let opacity = unit((p.opacity * twinkle * pulse * light * dim).max(floor));
    let size = p.size * twinkle * pulse * (1.0 + p.growth * 2.0) * (0.5 + p.depth * 0.5);
    if !(size.is_finite() && size > 0.0) {
        return;
    }

    if profile.glow && (p.special || p.growth > 0.1 || p.depth > 0.7) {
        let glow_size = size * (3.0 + p.depth * 2.0);
        let go = unit(opacity * 0.4 * (1.0 + p.growth) * light);
        let list = if p.special {
            let hue = finite_or(p.hue, 200.0);
            stops(&[
                (0.0, Color::hsla(hue, 70.0, (60.0 + light * 20.0).clamp(30.0, 90.0), go)),
                (0.5, Color::hsla(hue, 70.0, (50.0 + light * 15.0).clamp(20.0, 80.0), go * 0.5)),
                (1.0, Color::Transparent),
            ])
        } else if theme.is_dark() {
            let v = (170.0 + light * 60.0).clamp(120.0, 240.0).floor();
            stops(&[(0.0, Color::rgba(v, v, 255.0, go)), (1.0, Color::Transparent)])
        } else {
            let dark = (40.0 + light * 40.0).clamp(10.0, 200.0).floor();
            let blue = (dark + light * 60.0).clamp(10.0, 200.0).floor();
            stops(&[(0.0, Color::rgba(dark, dark, blue, go)), (1.0, Color::Transparent)])
        };
        surface.fill_radial(p.pos, glow_size, &list);
    }

    surface.set_alpha(opacity);
    let fill = star_color(p, theme, light);
    surface.fill_circle(p.pos, size, fill);

    if profile.sparkles && (p.special || p.growth > 0.3 || light > 0.8) && opacity > 0.3 {
        surface.set_alpha(opacity * 0.6);
        let arm = size * (2.0 + p.depth);
        let width = 0.5 + p.depth * 0.5;
        surface.stroke_line(p.pos - Vec2::X * arm, p.pos + Vec2::X * arm, width, fill);
        surface.stroke_line(p.pos - Vec2::Y * arm, p.pos + Vec2::Y * arm, width, fill);
    }
}

fn star_color(p: &Particle, theme: Theme, light: f32) -> Color {
    if p.special {
        return Color::hsla(
            finite_or(p.hue, 200.0),
            (50.0 + light * 30.0).clamp(30.0, 100.0),
            (60.0 + light * 25.0).clamp(40.0, 90.0),
            1.0,
        );
    }
    match theme {
        Theme::Dark => {
            let v = (180.0 + light * 75.0).clamp(100.0, 255.0).floor();
            Color::rgba(v, v, v, 0.9)
        }
        Theme::Light => {
            let dark = (30.0 + light * 50.0).clamp(20.0, 100.0).floor();
            let blue = (dark + light * 30.0).clamp(20.0, 130.0).floor();
            Color::rgba(dark, dark, blue, 0.9)
        }
    }
}
