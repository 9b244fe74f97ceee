//! DOM event wiring.
//!
//! Handlers only record the latest sample into `PendingInput`; the frame
//! loop takes it once per executed frame, so bursts of events collapse into
//! a single update instead of queueing.

mod lifecycle;
mod pointer;
mod scroll;

pub use lifecycle::{wire_hero_text, wire_lifecycle, wire_theme_observer};
pub use pointer::wire_pointer;
pub use scroll::wire_scroll;

use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone, Copy, Debug, Default)]
pub struct PendingInput {
    pub pointer: Option<Vec2>,
    pub pointer_left: bool,
    pub scroll: Option<(f32, f32)>,
    pub resized: bool,
}

pub type SharedInput = Rc<RefCell<PendingInput>>;

/// Attach a passive listener and leak the closure for the page lifetime.
fn listen<E: FromWasmAbi + 'static>(
    target: &web::EventTarget,
    kind: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(true);
    if let Err(e) = target.add_event_listener_with_callback_and_add_event_listener_options(
        kind,
        closure.as_ref().unchecked_ref(),
        &opts,
    ) {
        log::warn!("[events] could not listen for {}: {:?}", kind, e);
    }
    closure.forget();
}
