use crate::constants::*;
use glam::Vec2;
use starfield_core::constants::MAX_DPR;
use starfield_core::{FieldConfig, PlatformTier, Theme};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

pub fn context_2d(canvas: &web::HtmlCanvasElement) -> anyhow::Result<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

/// Viewport size in CSS px, falling back to 1920x1080 when unreadable.
pub fn viewport_size(window: &web::Window) -> Vec2 {
    let read = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>, fallback: f32| {
        v.ok()
            .and_then(|v| v.as_f64())
            .map(|v| v as f32)
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(fallback)
    };
    Vec2::new(read(window.inner_width(), 1920.0), read(window.inner_height(), 1080.0))
}

#[inline]
pub fn device_pixel_ratio(window: &web::Window) -> f64 {
    let dpr = window.device_pixel_ratio();
    if dpr.is_finite() && dpr > 0.0 {
        dpr.min(MAX_DPR)
    } else {
        1.0
    }
}

/// Size the backing store to viewport * min(dpr, 2) and pin the CSS box to
/// the viewport. Returns the ratio used.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, viewport: Vec2) -> f64 {
    let dpr = web::window().map(|w| device_pixel_ratio(&w)).unwrap_or(1.0);
    let w_px = (viewport.x as f64 * dpr) as u32;
    let h_px = (viewport.y as f64 * dpr) as u32;
    canvas.set_width(w_px.max(1));
    canvas.set_height(h_px.max(1));
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", viewport.x));
    _ = style.set_property("height", &format!("{}px", viewport.y));
    _ = style.set_property("position", "fixed");
    _ = style.set_property("top", "0");
    _ = style.set_property("left", "0");
    dpr
}

/// Current scroll offset and the largest reachable one.
pub fn scroll_metrics(window: &web::Window, document: &web::Document) -> (f32, f32) {
    let y = window.scroll_y().unwrap_or(0.0) as f32;
    let doc_height = document
        .document_element()
        .map(|el| el.scroll_height() as f32)
        .unwrap_or(0.0);
    let max = (doc_height - viewport_size(window).y).max(0.0);
    (y, max)
}

/// Center and width of an element's box in viewport coordinates.
pub fn element_center(document: &web::Document, id: &str) -> Option<(Vec2, f32)> {
    let el = document.get_element_by_id(id)?;
    Some(rect_center(&el))
}

pub fn rect_center(el: &web::Element) -> (Vec2, f32) {
    let rect = el.get_bounding_client_rect();
    let center = Vec2::new(
        (rect.left() + rect.width() / 2.0) as f32,
        (rect.top() + rect.height() / 2.0) as f32,
    );
    (center, rect.width() as f32)
}

/// `data-config` JSON override on the canvas; defaults when absent or bad.
pub fn read_config(canvas: &web::HtmlCanvasElement) -> FieldConfig {
    match canvas.get_attribute(CONFIG_ATTR) {
        Some(json) => FieldConfig::from_json(&json).unwrap_or_else(|e| {
            log::warn!("[field] ignoring {}: {}", CONFIG_ATTR, e);
            FieldConfig::default()
        }),
        None => FieldConfig::default(),
    }
}

pub fn read_tier(canvas: &web::HtmlCanvasElement) -> Option<PlatformTier> {
    canvas
        .get_attribute(TIER_ATTR)
        .and_then(|s| PlatformTier::parse(&s))
}

pub fn document_theme(document: &web::Document) -> Option<Theme> {
    let attr = document.document_element()?.get_attribute(THEME_ATTR)?;
    Some(Theme::from_attr(Some(&attr)))
}

pub fn apply_theme_attr(document: &web::Document, theme: Theme) {
    if let Some(root) = document.document_element() {
        _ = root.set_attribute(THEME_ATTR, theme.as_str());
    }
    if let Some(body) = document.body() {
        _ = body.set_attribute(THEME_ATTR, theme.as_str());
    }
}

pub fn prefers_dark(window: &web::Window) -> bool {
    window
        .match_media("(prefers-color-scheme: dark)")
        .ok()
        .flatten()
        .map(|m| m.matches())
        .unwrap_or(true)
}

pub fn set_body_class(document: &web::Document, class: &str, on: bool) {
    if let Some(body) = document.body() {
        let cl = body.class_list();
        _ = if on { cl.add_1(class) } else { cl.remove_1(class) };
    }
}
