//! Tuning values for the particle field.
//!
//! `FieldConfig::default()` is the shipped look. Pages may override any
//! subset through a JSON object (camelCase keys); missing keys keep their
//! defaults.

use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
    // Population per tier
    pub star_count: usize,
    pub star_count_mobile: usize,
    pub star_count_constrained: usize,
    pub depth_layers: u8,
    pub special_ratio: f64,

    // Appearance
    pub size_range: [f32; 2],
    pub size_range_constrained: [f32; 2],
    pub star_opacity: f32,
    pub star_opacity_light: f32,
    pub special_opacity: f32,
    pub special_opacity_light: f32,
    pub star_speed: f32,

    // Connections (hover-only by default: resting opacity is zero)
    pub connection_distance: f32,
    pub max_connections: usize,
    pub connection_opacity: f32,
    pub connection_opacity_light: f32,
    pub connection_opacity_hover: f32,
    pub connection_opacity_hover_light: f32,

    // Ambient blooms
    pub nebula_count: usize,
    pub nebula_opacity: f32,
    pub nebula_opacity_light: f32,

    // Pointer
    pub mouse_influence: f32,
    pub trail_size: f32,

    // Scroll
    pub scroll_parallax: bool,
    pub parallax_factor: f32,
    pub max_scroll_velocity: f32,
    pub scroll_smoothing: f32,

    // Section dimming
    pub hero_dimming: f32,
    pub section_dimming: f32,
    pub dimming_speed: f32,

    // Lighting
    pub light_source: [f32; 3],
    pub ambient_light: f32,
    pub ambient_light_dark: f32,
    pub light_intensity: f32,
    pub light_intensity_dark: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            star_count: 300,
            star_count_mobile: 120,
            star_count_constrained: 80,
            depth_layers: 4,
            special_ratio: 0.15,

            size_range: [0.4, 2.2],
            size_range_constrained: [0.4, 1.6],
            star_opacity: 0.4,
            star_opacity_light: 0.8,
            special_opacity: 0.6,
            special_opacity_light: 0.9,
            star_speed: 0.02,

            connection_distance: 120.0,
            max_connections: 2,
            connection_opacity: 0.0,
            connection_opacity_light: 0.0,
            connection_opacity_hover: 0.15,
            connection_opacity_hover_light: 0.25,

            nebula_count: 5,
            nebula_opacity: 0.04,
            nebula_opacity_light: 0.1,

            mouse_influence: 180.0,
            trail_size: 1.5,

            scroll_parallax: true,
            parallax_factor: 0.6,
            max_scroll_velocity: 40.0,
            scroll_smoothing: 0.85,

            hero_dimming: 1.0,
            section_dimming: 0.8,
            dimming_speed: 0.05,

            light_source: [0.4, 0.3, 1.0],
            ambient_light: 0.5,
            ambient_light_dark: 0.3,
            light_intensity: 0.9,
            light_intensity_dark: 0.7,
        }
    }
}

impl FieldConfig {
    /// Parse a partial JSON override on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: FieldConfig = serde_json::from_str(json)?;
        Ok(cfg.sanitized())
    }

    /// Repair values that would break the simulation (zero layers, inverted
    /// ranges, non-finite numbers).
    pub fn sanitized(mut self) -> Self {
        let d = FieldConfig::default();
        self.depth_layers = self.depth_layers.max(2);
        self.special_ratio = if self.special_ratio.is_finite() {
            self.special_ratio.clamp(0.0, 1.0)
        } else {
            d.special_ratio
        };
        self.size_range = sane_range(self.size_range, d.size_range);
        self.size_range_constrained =
            sane_range(self.size_range_constrained, d.size_range_constrained);
        for (v, fallback) in [
            (&mut self.connection_distance, d.connection_distance),
            (&mut self.mouse_influence, d.mouse_influence),
            (&mut self.trail_size, d.trail_size),
        ] {
            if !v.is_finite() || *v <= 0.0 {
                *v = fallback;
            }
        }
        if !self.dimming_speed.is_finite() {
            self.dimming_speed = d.dimming_speed;
        }
        self.dimming_speed = self.dimming_speed.clamp(0.0, 1.0);
        self
    }
}

fn sane_range(r: [f32; 2], fallback: [f32; 2]) -> [f32; 2] {
    if r[0].is_finite() && r[1].is_finite() && r[0] > 0.0 && r[1] >= r[0] {
        r
    } else {
        fallback
    }
}
