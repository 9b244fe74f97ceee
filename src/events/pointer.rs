use super::{listen, SharedInput};
use glam::Vec2;
use web_sys as web;

pub fn wire_pointer(document: &web::Document, input: SharedInput) {
    let target: &web::EventTarget = document.as_ref();

    let on_move = input.clone();
    listen(target, "mousemove", move |ev: web::MouseEvent| {
        on_move.borrow_mut().pointer = Some(Vec2::new(ev.client_x() as f32, ev.client_y() as f32));
    });

    let on_touch = input.clone();
    listen(target, "touchmove", move |ev: web::TouchEvent| {
        if let Some(touch) = ev.touches().get(0) {
            on_touch.borrow_mut().pointer =
                Some(Vec2::new(touch.client_x() as f32, touch.client_y() as f32));
        }
    });

    // mouseleave does not bubble, so it has to sit on the root element.
    let Some(root) = document.document_element() else {
        return;
    };
    let on_leave = input;
    listen(root.as_ref(), "mouseleave", move |_ev: web::MouseEvent| {
        let mut pending = on_leave.borrow_mut();
        pending.pointer = None;
        pending.pointer_left = true;
    });
}
