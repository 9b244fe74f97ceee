use glam::Vec2;
use starfield_core::surface::unit;
use starfield_core::{Color, ColorStop, Surface};
use std::f64::consts::TAU;
use web_sys as web;

/// `Surface` over a 2D canvas context. Coordinates are CSS px; the context
/// transform carries the device pixel ratio.
pub struct Canvas2dSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    dpr: f64,
}

impl Canvas2dSurface {
    pub fn new(canvas: web::HtmlCanvasElement, ctx: web::CanvasRenderingContext2d, dpr: f64) -> Self {
        let mut s = Self { canvas, ctx, dpr };
        s.set_dpr(dpr);
        s
    }

    pub fn set_dpr(&mut self, dpr: f64) {
        self.dpr = dpr;
        _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    }

    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        &self.canvas
    }

    fn gradient_stops(gradient: &web::CanvasGradient, stops: &[ColorStop]) {
        for s in stops {
            if let Err(e) = gradient.add_color_stop(unit(s.offset), &s.color.css()) {
                log::debug!("[canvas] color stop rejected: {:?}", e);
            }
        }
    }
}

#[inline]
fn drawable(p: Vec2) -> bool {
    p.is_finite()
}

impl Surface for Canvas2dSurface {
    fn clear(&mut self, _size: Vec2) {
        _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
        _ = self.ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0);
        self.ctx.set_global_alpha(1.0);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(unit(alpha) as f64);
    }

    fn fill_radial(&mut self, center: Vec2, radius: f32, stops: &[ColorStop]) {
        if !drawable(center) || !(radius.is_finite() && radius > 0.0) {
            return;
        }
        let (x, y, r) = (center.x as f64, center.y as f64, radius as f64);
        let gradient = match self.ctx.create_radial_gradient(x, y, 0.0, x, y, r) {
            Ok(g) => g,
            Err(_) => return,
        };
        Self::gradient_stops(&gradient, stops);
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(x - r, y - r, r * 2.0, r * 2.0);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if !drawable(center) || !(radius.is_finite() && radius > 0.0) {
            return;
        }
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
            .is_err()
        {
            return;
        }
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill();
    }

    fn stroke_curve(&mut self, from: Vec2, control: Vec2, to: Vec2, width: f32, stops: &[ColorStop]) {
        if !(drawable(from) && drawable(control) && drawable(to)) {
            return;
        }
        let gradient = self
            .ctx
            .create_linear_gradient(from.x as f64, from.y as f64, to.x as f64, to.y as f64);
        Self::gradient_stops(&gradient, stops);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.quadratic_curve_to(
            control.x as f64,
            control.y as f64,
            to.x as f64,
            to.y as f64,
        );
        self.ctx.set_stroke_style_canvas_gradient(&gradient);
        self.ctx.set_line_width(width.max(0.1) as f64);
        self.ctx.stroke();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        if !(drawable(from) && drawable(to)) {
            return;
        }
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(width.max(0.1) as f64);
        self.ctx.stroke();
    }
}
