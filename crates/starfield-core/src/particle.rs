use crate::config::FieldConfig;
use crate::theme::Theme;
use crate::tier::TierProfile;
use glam::Vec2;
use rand::prelude::*;
use std::f32::consts::TAU;

/// Remaining life of a temporary particle; `decay` is subtracted per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Life {
    pub remaining: f32,
    pub decay: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub base_vel: Vec2,
    pub depth: f32,
    pub layer: u8,
    pub size: f32,
    pub opacity: f32,
    pub base_opacity: f32,
    pub twinkle: f32,
    pub twinkle_speed: f32,
    pub pulse_phase: f32,
    pub special: bool,
    pub hue: f32,
    pub light_facing: f32,
    pub growth: f32,
    pub target_growth: f32,
    pub life: Option<Life>,
}

impl Particle {
    /// A resting particle with neutral attributes, mostly useful for tests
    /// and for building bursts.
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            base_vel: Vec2::ZERO,
            depth: 0.5,
            layer: 0,
            size: 1.0,
            opacity: 0.5,
            base_opacity: 0.5,
            twinkle: 0.0,
            twinkle_speed: 0.02,
            pulse_phase: 0.0,
            special: false,
            hue: 0.0,
            light_facing: 0.0,
            growth: 0.0,
            target_growth: 0.0,
            life: None,
        }
    }

    pub fn is_temporary(&self) -> bool {
        self.life.is_some()
    }

    /// Seed one ambient star somewhere inside the viewport.
    pub fn seeded(
        rng: &mut impl Rng,
        config: &FieldConfig,
        profile: &TierProfile,
        theme: Theme,
        viewport: Vec2,
    ) -> Self {
        let special = rng.gen_bool(config.special_ratio);
        let layers = config.depth_layers.max(2);
        let layer = rng.gen_range(0..layers);
        let depth = layer as f32 / (layers - 1) as f32;

        let drift = config.star_speed * (1.0 - depth * 0.5);
        let vel = Vec2::new(
            (rng.gen::<f32>() - 0.5) * drift,
            (rng.gen::<f32>() - 0.5) * drift,
        );
        let [smin, smax] = profile.size_range;
        let size = if smax > smin {
            rng.gen_range(smin..smax)
        } else {
            smin
        };
        let opacity = if special {
            if theme.is_dark() {
                config.special_opacity
            } else {
                config.special_opacity_light
            }
        } else {
            let base = if theme.is_dark() {
                config.star_opacity
            } else {
                config.star_opacity_light
            };
            base * (0.4 + depth * 0.6) * profile.opacity_scale
        }
        .clamp(0.0, 1.0);

        Self {
            pos: Vec2::new(
                rng.gen::<f32>() * viewport.x.max(1.0),
                rng.gen::<f32>() * viewport.y.max(1.0),
            ),
            vel,
            base_vel: vel,
            depth,
            layer,
            size,
            opacity,
            base_opacity: opacity,
            twinkle: rng.gen::<f32>() * TAU,
            twinkle_speed: 0.02 + rng.gen::<f32>() * 0.02,
            pulse_phase: rng.gen::<f32>() * TAU,
            special,
            hue: if special {
                200.0 + rng.gen::<f32>() * 60.0
            } else {
                0.0
            },
            light_facing: rng.gen::<f32>() * 2.0 - 1.0,
            growth: 0.0,
            target_growth: 0.0,
            life: None,
        }
    }
}

/// Flavours of short-lived particle clusters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BurstKind {
    /// Ring of fast particles, ~15 of them.
    Standard,
    /// Softer, smaller ring used for keyword hits and text changes.
    Elegant,
    /// A single particle left behind by the pointer.
    Trail,
}

struct BurstShape {
    count: usize,
    speed: (f32, f32),
    size: (f32, f32),
    depth: f32,
    opacity: f32,
    twinkle_speed: f32,
    growth: f32,
    decay: f32,
}

impl BurstKind {
    fn shape(self, trail_size: f32) -> BurstShape {
        match self {
            BurstKind::Standard => BurstShape {
                count: 15,
                speed: (1.0, 3.0),
                size: (0.5, 2.0),
                depth: 1.0,
                opacity: 0.8,
                twinkle_speed: 0.1,
                growth: 1.0,
                decay: 0.01,
            },
            BurstKind::Elegant => BurstShape {
                count: 6,
                speed: (0.8, 1.4),
                size: (0.4, 1.6),
                depth: 0.8,
                opacity: 0.9,
                twinkle_speed: 0.06,
                growth: 0.8,
                decay: 0.016,
            },
            BurstKind::Trail => BurstShape {
                count: 1,
                speed: (0.0, 0.35),
                size: (trail_size * 0.5, trail_size),
                depth: 0.9,
                opacity: 0.6,
                twinkle_speed: 0.08,
                growth: 0.5,
                decay: 0.02,
            },
        }
    }

    pub fn count(self) -> usize {
        self.shape(1.0).count
    }

    /// Frames until every particle of this kind has been collected.
    pub fn lifetime_frames(self) -> usize {
        (1.0 / self.shape(1.0).decay).ceil() as usize + 1
    }

    fn default_hue(self, theme: Theme, jitter: f32) -> f32 {
        match (self, theme) {
            (BurstKind::Standard, _) => 200.0 + jitter * 60.0,
            (_, Theme::Dark) => 180.0 + jitter * 40.0,
            (_, Theme::Light) => 240.0 + jitter * 40.0,
        }
    }

    pub(crate) fn spawn(
        self,
        rng: &mut impl Rng,
        origin: Vec2,
        hue: Option<f32>,
        theme: Theme,
        trail_size: f32,
    ) -> Vec<Particle> {
        let shape = self.shape(trail_size);
        (0..shape.count)
            .map(|i| {
                let angle = if shape.count > 1 {
                    i as f32 / shape.count as f32 * TAU
                } else {
                    rng.gen::<f32>() * TAU
                };
                let speed = rng.gen_range(ordered(shape.speed));
                let size = rng.gen_range(ordered(shape.size)).max(0.1);
                let jitter = rng.gen::<f32>();
                let pos = if self == BurstKind::Trail {
                    origin + Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5) * 20.0
                } else {
                    origin
                };
                Particle {
                    pos,
                    vel: Vec2::from_angle(angle) * speed,
                    base_vel: Vec2::ZERO,
                    depth: shape.depth,
                    layer: 0,
                    size,
                    opacity: shape.opacity,
                    base_opacity: shape.opacity,
                    twinkle: 0.0,
                    twinkle_speed: shape.twinkle_speed,
                    pulse_phase: 0.0,
                    special: true,
                    hue: hue.unwrap_or_else(|| self.default_hue(theme, jitter)),
                    light_facing: 1.0,
                    growth: shape.growth,
                    target_growth: 0.0,
                    life: Some(Life {
                        remaining: 1.0,
                        decay: shape.decay,
                    }),
                }
            })
            .collect()
    }
}

// Inclusive range with its ends in order; non-finite ends collapse to 0.
fn ordered((a, b): (f32, f32)) -> std::ops::RangeInclusive<f32> {
    let a = if a.is_finite() { a } else { 0.0 };
    let b = if b.is_finite() { b } else { 0.0 };
    a.min(b)..=a.max(b)
}
