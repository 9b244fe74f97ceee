#![cfg(target_arch = "wasm32")]
use glam::Vec2;
use instant::Instant;
use starfield_core::chat::{Conversation, Section};
use starfield_core::theme::resolve_theme;
use starfield_core::{
    BurstKind, FieldEvent, FieldEventSender, FrameThrottle, ParticleField, PlatformTier, Theme,
    TierProbe,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod canvas;
mod chat;
mod constants;
mod dom;
mod events;
mod frame;
mod storage;

use chat::{ChatSession, SharedSession};
use constants::{CANVAS_ACTIVE_CLASS, CANVAS_ID};
use events::PendingInput;
use frame::{FrameContext, LoopHandle};

struct App {
    handle: LoopHandle,
    events: FieldEventSender,
    chat: SharedSession,
    document: web::Document,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

fn with_app<R>(f: impl FnOnce(&App) -> R) -> Option<R> {
    APP.with(|app| app.borrow().as_ref().map(f))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("starfield starting");

    // The page must keep working without the field.
    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas = dom::canvas_by_id(&document, CANVAS_ID)?;
    let ctx = dom::context_2d(&canvas)?;

    let config = dom::read_config(&canvas);
    let viewport = dom::viewport_size(&window);
    let dpr = dom::sync_canvas_backing_size(&canvas, viewport);
    let forced_tier = dom::read_tier(&canvas);
    let tier = forced_tier.unwrap_or_else(|| PlatformTier::for_width(viewport.x));

    let theme = dom::document_theme(&document).unwrap_or_else(|| {
        resolve_theme(storage::saved_theme().as_deref(), dom::prefers_dark(&window))
    });
    dom::apply_theme_attr(&document, theme);

    let mut field = ParticleField::new(config, viewport, tier, theme, rand::random());
    field.pin_tier(forced_tier.is_some());
    log::info!(
        "[field] {:?} tier, {} particles, {}x{} @{}x",
        tier,
        field.particles().len(),
        viewport.x,
        viewport.y,
        dpr
    );

    let (sender, receiver) = starfield_core::channel();
    let input: events::SharedInput = Rc::new(RefCell::new(PendingInput::default()));
    let started = Instant::now();

    let probe = match (forced_tier, tier) {
        (None, t) if t != PlatformTier::Constrained => Some(TierProbe::new(t)),
        _ => None,
    };
    let handle = frame::start_loop(FrameContext {
        field,
        events: receiver,
        input: input.clone(),
        surface: canvas::Canvas2dSurface::new(canvas, ctx, dpr),
        throttle: FrameThrottle::for_tier(tier),
        probe,
        window: window.clone(),
        document: document.clone(),
        started,
        section_dimmed: false,
    });
    dom::set_body_class(&document, CANVAS_ACTIVE_CLASS, true);

    let mut bundle = storage::load_bundle();
    bundle.record_visit();
    storage::save_bundle(&bundle);

    events::wire_pointer(&document, input.clone());
    events::wire_scroll(&window, input.clone());
    events::wire_lifecycle(&window, &document, input, handle.clone());
    events::wire_theme_observer(&document, sender.clone());
    events::wire_hero_text(&document, sender.clone());

    let chat = Rc::new(RefCell::new(ChatSession {
        conversation: Conversation::new(bundle.visits),
        bundle,
        events: sender.clone(),
        started,
    }));

    APP.with(|app| {
        *app.borrow_mut() = Some(App {
            handle,
            events: sender,
            chat,
            document,
        })
    });
    Ok(())
}

fn parse_burst_kind(kind: Option<String>) -> BurstKind {
    match kind.as_deref() {
        Some("elegant") => BurstKind::Elegant,
        Some("trail") => BurstKind::Trail,
        _ => BurstKind::Standard,
    }
}

/// Spawn a burst at viewport coordinates. `kind` is "standard" (default),
/// "elegant" or "trail".
#[wasm_bindgen]
pub fn burst_at(x: f32, y: f32, kind: Option<String>, hue: Option<f32>) {
    let kind = parse_burst_kind(kind);
    with_app(|app| {
        app.events.send(FieldEvent::Burst {
            point: Vec2::new(x, y),
            kind,
            hue,
        })
    });
}

#[wasm_bindgen]
pub fn attract_to(x: f32, y: f32, radius: f32) {
    with_app(|app| {
        app.events.send(FieldEvent::Attract {
            point: Vec2::new(x, y),
            radius,
        })
    });
}

#[wasm_bindgen]
pub fn pause_field() {
    with_app(|app| app.handle.pause());
}

#[wasm_bindgen]
pub fn resume_field() {
    with_app(|app| app.handle.resume());
}

/// Stop the loop, clear the canvas and drop every handle. Later calls are
/// no-ops.
#[wasm_bindgen]
pub fn destroy_field() {
    let app = APP.with(|app| app.borrow_mut().take());
    if let Some(app) = app {
        app.handle.destroy();
        dom::set_body_class(&app.document, CANVAS_ACTIVE_CLASS, false);
        log::info!("[field] destroyed");
    }
}

/// Switch theme, persist it and mirror it onto the document.
#[wasm_bindgen]
pub fn set_theme(theme: &str) {
    let theme = Theme::from_attr(Some(theme));
    storage::save_theme(theme);
    with_app(|app| {
        dom::apply_theme_attr(&app.document, theme);
        app.events.send(FieldEvent::Theme(theme));
    });
}

#[wasm_bindgen]
pub fn toggle_theme() -> String {
    let current = with_app(|app| dom::document_theme(&app.document))
        .flatten()
        .unwrap_or_default();
    let next = current.toggled();
    set_theme(next.as_str());
    next.as_str().to_string()
}

/// Force a quality tier ("desktop", "mobile", "constrained").
#[wasm_bindgen]
pub fn set_tier(tier: &str) {
    let Some(tier) = PlatformTier::parse(tier) else {
        log::warn!("[field] unknown tier {:?}", tier);
        return;
    };
    with_app(|app| {
        app.handle.with_context(|ctx| {
            ctx.probe = None;
            ctx.field.pin_tier(true);
            ctx.switch_tier(tier);
        })
    });
}

/// Section the visitor is currently reading, sent as chat context.
#[wasm_bindgen]
pub fn set_chat_section(section: Option<String>) {
    let section = section.and_then(|s| serde_json::from_value::<Section>(s.into()).ok());
    with_app(|app| {
        app.chat.borrow_mut().conversation.current_section =
            section.map(|s| s.element_id().to_string());
    });
}

/// Ask the chat endpoint. Always resolves to displayable text; empty input
/// resolves to an empty string.
#[wasm_bindgen]
pub async fn send_chat(message: String) -> String {
    let Some(session) = with_app(|app| app.chat.clone()) else {
        return String::new();
    };
    chat::ask(session, message).await
}
