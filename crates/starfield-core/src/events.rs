//! One-way message channel into the particle field.
//!
//! Producers (chat flow, DOM observers, exported JS entry points) push
//! events; the frame loop drains them once per frame before ticking.

use crate::particle::BurstKind;
use crate::theme::Theme;
use glam::Vec2;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub enum FieldEvent {
    /// Pull particles toward `point` for about a second.
    Attract { point: Vec2, radius: f32 },
    Burst {
        point: Vec2,
        kind: BurstKind,
        hue: Option<f32>,
    },
    /// A headline changed text; `center` and `width` describe its box.
    TextChanged { center: Vec2, width: f32 },
    Theme(Theme),
}

type Queue = Rc<RefCell<VecDeque<FieldEvent>>>;

#[derive(Clone, Debug)]
pub struct FieldEventSender {
    queue: Queue,
}

#[derive(Debug)]
pub struct FieldEventReceiver {
    queue: Queue,
}

pub fn channel() -> (FieldEventSender, FieldEventReceiver) {
    let queue: Queue = Rc::new(RefCell::new(VecDeque::new()));
    (
        FieldEventSender {
            queue: queue.clone(),
        },
        FieldEventReceiver { queue },
    )
}

impl FieldEventSender {
    pub fn send(&self, event: FieldEvent) {
        self.queue.borrow_mut().push_back(event);
    }

    /// Keyword hits usually come in pairs: attraction plus a burst.
    pub fn send_all(&self, events: impl IntoIterator<Item = FieldEvent>) {
        self.queue.borrow_mut().extend(events);
    }
}

impl FieldEventReceiver {
    /// Take everything queued so far, oldest first.
    pub fn drain(&self) -> Vec<FieldEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}
