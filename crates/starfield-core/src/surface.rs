//! Drawing surface abstraction and CSS color building.
//!
//! The render pass only talks to [`Surface`]; the web crate implements it on
//! top of `CanvasRenderingContext2d`, tests implement it with a recorder.

use glam::Vec2;
use smallvec::SmallVec;
use std::fmt;

/// A CSS color. Components are sanitized when formatted, so a NaN that
/// slipped through the physics can never produce an unparsable string.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    Rgba { r: f32, g: f32, b: f32, a: f32 },
    Hsla { h: f32, s: f32, l: f32, a: f32 },
    Transparent,
}

impl Color {
    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color::Rgba { r, g, b, a }
    }

    pub fn hsla(h: f32, s: f32, l: f32, a: f32) -> Self {
        Color::Hsla { h, s, l, a }
    }

    pub fn css(&self) -> String {
        self.to_string()
    }

    /// True when every component is finite and inside its CSS range.
    pub fn is_well_formed(&self) -> bool {
        match *self {
            Color::Rgba { r, g, b, a } => {
                [r, g, b].iter().all(|c| c.is_finite() && (0.0..=255.0).contains(c))
                    && a.is_finite()
                    && (0.0..=1.0).contains(&a)
            }
            Color::Hsla { h, s, l, a } => {
                h.is_finite()
                    && [s, l].iter().all(|c| c.is_finite() && (0.0..=100.0).contains(c))
                    && a.is_finite()
                    && (0.0..=1.0).contains(&a)
            }
            Color::Transparent => true,
        }
    }

    /// Same color with every component clamped into range.
    pub fn sanitized(&self) -> Self {
        match *self {
            Color::Rgba { r, g, b, a } => Color::Rgba {
                r: finite_or(r, 0.0).clamp(0.0, 255.0).round(),
                g: finite_or(g, 0.0).clamp(0.0, 255.0).round(),
                b: finite_or(b, 0.0).clamp(0.0, 255.0).round(),
                a: unit(a),
            },
            Color::Hsla { h, s, l, a } => Color::Hsla {
                h: finite_or(h, 200.0).rem_euclid(360.0),
                s: finite_or(s, 50.0).clamp(0.0, 100.0),
                l: finite_or(l, 50.0).clamp(0.0, 100.0),
                a: unit(a),
            },
            Color::Transparent => Color::Transparent,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sanitized() {
            Color::Rgba { r, g, b, a } => write!(f, "rgba({r}, {g}, {b}, {a:.3})"),
            Color::Hsla { h, s, l, a } => write!(f, "hsla({h:.1}, {s:.1}%, {l:.1}%, {a:.3})"),
            Color::Transparent => f.write_str("transparent"),
        }
    }
}

#[inline]
pub fn finite_or(v: f32, fallback: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        fallback
    }
}

/// Clamp to [0, 1], mapping non-finite values to 0.
#[inline]
pub fn unit(v: f32) -> f32 {
    finite_or(v, 0.0).clamp(0.0, 1.0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Color,
}

pub type Stops = SmallVec<[ColorStop; 4]>;

pub fn stops(list: &[(f32, Color)]) -> Stops {
    list.iter()
        .map(|&(offset, color)| ColorStop {
            offset: unit(offset),
            color,
        })
        .collect()
}

/// Minimal 2D drawing surface in CSS pixel coordinates.
pub trait Surface {
    /// Clear the whole surface (`size` in CSS px).
    fn clear(&mut self, size: Vec2);
    fn set_alpha(&mut self, alpha: f32);
    /// Fill the square `center ± radius` with a radial gradient.
    fn fill_radial(&mut self, center: Vec2, radius: f32, stops: &[ColorStop]);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Quadratic curve stroked with a linear gradient from `from` to `to`.
    fn stroke_curve(&mut self, from: Vec2, control: Vec2, to: Vec2, width: f32, stops: &[ColorStop]);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
}
