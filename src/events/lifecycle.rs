use super::{listen, SharedInput};
use crate::constants::{HERO_TEXT_IDS, THEME_ATTR};
use crate::dom;
use crate::frame::LoopHandle;
use starfield_core::{FieldEvent, FieldEventSender};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Resize, tab visibility and window focus.
pub fn wire_lifecycle(
    window: &web::Window,
    document: &web::Document,
    input: SharedInput,
    handle: LoopHandle,
) {
    listen(window.as_ref(), "resize", move |_ev: web::Event| {
        input.borrow_mut().resized = true;
    });

    let on_visibility = handle.clone();
    listen(document.as_ref(), "visibilitychange", move |_ev: web::Event| {
        let Some(doc) = dom::window_document() else {
            return;
        };
        if doc.visibility_state() == web::VisibilityState::Hidden {
            log::debug!("[loop] hidden, pausing");
            on_visibility.pause();
        } else {
            on_visibility.resume();
        }
    });

    let on_blur = handle.clone();
    listen(window.as_ref(), "blur", move |_ev: web::Event| on_blur.pause());

    let on_focus = handle;
    listen(window.as_ref(), "focus", move |_ev: web::Event| on_focus.resume());
}

fn observe(
    target: &web::Node,
    init: &web::MutationObserverInit,
    callback: impl FnMut(js_sys::Array, web::MutationObserver) + 'static,
) {
    let closure = Closure::wrap(
        Box::new(callback) as Box<dyn FnMut(js_sys::Array, web::MutationObserver)>
    );
    match web::MutationObserver::new(closure.as_ref().unchecked_ref()) {
        Ok(observer) => {
            if let Err(e) = observer.observe_with_options(target, init) {
                log::warn!("[events] observe failed: {:?}", e);
            }
        }
        Err(e) => log::warn!("[events] MutationObserver unavailable: {:?}", e),
    }
    closure.forget();
}

/// Theme toggles made elsewhere on the page flip the `data-theme`
/// attribute; forward the new value to the field.
pub fn wire_theme_observer(document: &web::Document, events: FieldEventSender) {
    let Some(root) = document.document_element() else {
        return;
    };
    let init = web::MutationObserverInit::new();
    init.set_attributes(true);
    let filter = js_sys::Array::of1(&JsValue::from_str(THEME_ATTR));
    init.set_attribute_filter(&filter);

    observe(root.as_ref(), &init, move |_records, _observer| {
        if let Some(theme) = dom::window_document().and_then(|d| dom::document_theme(&d)) {
            events.send(FieldEvent::Theme(theme));
        }
    });
}

/// Ripple the field around hero headlines whenever their text changes.
pub fn wire_hero_text(document: &web::Document, events: FieldEventSender) {
    let init = web::MutationObserverInit::new();
    init.set_child_list(true);
    init.set_character_data(true);
    init.set_subtree(true);

    for id in HERO_TEXT_IDS {
        let Some(el) = document.get_element_by_id(id) else {
            continue;
        };
        let events = events.clone();
        let watched = el.clone();
        observe(el.as_ref(), &init, move |records, _observer| {
            if records.length() == 0 {
                return;
            }
            let (center, width) = dom::rect_center(&watched);
            events.send(FieldEvent::TextChanged { center, width });
        });
    }
}
