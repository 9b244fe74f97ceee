use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::surface::finite_or;
use crate::theme::Theme;
use glam::{Vec2, Vec3};

/// Diffuse term for one particle, in [0, 1].
///
/// The particle is placed in a normalized cube (x, y from the viewport, z
/// from depth) and treated as a tiny sphere whose normal mostly faces the
/// camera, tilted by `light_facing`.
pub fn diffuse(p: &Particle, viewport: Vec2, light_source: Vec3) -> f32 {
    let vw = viewport.x.max(1.0);
    let vh = viewport.y.max(1.0);
    let pos = Vec3::new(
        p.pos.x / vw * 2.0 - 1.0,
        p.pos.y / vh * 2.0 - 1.0,
        p.depth * 2.0 - 1.0,
    );
    let to_light = (light_source - pos).normalize_or_zero();
    let normal = Vec3::new(p.light_facing * 0.3, p.light_facing * 0.2, 0.9);
    finite_or(normal.dot(to_light), 0.5).max(0.0)
}

/// Ambient plus diffuse contribution, per theme.
pub fn intensity(p: &Particle, viewport: Vec2, config: &FieldConfig, theme: Theme) -> f32 {
    let (ambient, strength) = match theme {
        Theme::Dark => (config.ambient_light_dark, config.light_intensity_dark),
        Theme::Light => (config.ambient_light, config.light_intensity),
    };
    let light = Vec3::from_array(config.light_source);
    finite_or(ambient, 0.5) + diffuse(p, viewport, light) * finite_or(strength, 0.7)
}
