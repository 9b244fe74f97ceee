use super::{listen, SharedInput};
use crate::dom;
use web_sys as web;

pub fn wire_scroll(window: &web::Window, input: SharedInput) {
    let target: &web::EventTarget = window.as_ref();
    listen(target, "scroll", move |_ev: web::Event| {
        let (Some(w), Some(d)) = (web::window(), dom::window_document()) else {
            return;
        };
        input.borrow_mut().scroll = Some(dom::scroll_metrics(&w, &d));
    });
}
