use crate::canvas::Canvas2dSurface;
use crate::constants::SECTION_DIMMED_CLASS;
use crate::dom;
use crate::events::SharedInput;
use instant::Instant;
use starfield_core::draw;
use starfield_core::{FieldEventReceiver, FrameThrottle, ParticleField, PlatformTier, TierProbe};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub field: ParticleField,
    pub events: FieldEventReceiver,
    pub input: SharedInput,
    pub surface: Canvas2dSurface,
    pub throttle: FrameThrottle,
    pub probe: Option<TierProbe>,
    pub window: web::Window,
    pub document: web::Document,
    pub started: Instant,
    pub section_dimmed: bool,
}

impl FrameContext {
    /// One animation-frame callback. Returns whether the loop should keep
    /// rescheduling itself.
    pub fn frame(&mut self) -> bool {
        let now = self.started.elapsed();
        for ev in self.events.drain() {
            self.field.apply(ev);
        }
        if !self.field.is_alive() || self.field.is_paused() {
            return false;
        }
        if !self.throttle.ready(now) {
            return true;
        }

        self.apply_input(now);

        if let Some(next) = self.probe.as_mut().and_then(|p| p.record(now)) {
            self.switch_tier(next);
        }

        self.field.tick(now);
        draw::render(&self.field, &mut self.surface);

        let dimmed = self.field.section_dimmed();
        if dimmed != self.section_dimmed {
            self.section_dimmed = dimmed;
            dom::set_body_class(&self.document, SECTION_DIMMED_CLASS, dimmed);
        }
        true
    }

    // Samples written by event handlers since the last executed frame.
    fn apply_input(&mut self, now: Duration) {
        let pending = std::mem::take(&mut *self.input.borrow_mut());
        if pending.resized {
            let viewport = dom::viewport_size(&self.window);
            let dpr = dom::sync_canvas_backing_size(self.surface.canvas(), viewport);
            self.surface.set_dpr(dpr);
            if self.field.resize(viewport) {
                self.throttle = FrameThrottle::for_tier(self.field.tier());
                if let Some(p) = self.probe.as_mut() {
                    *p = TierProbe::new(self.field.tier());
                }
            }
        }
        if pending.pointer_left {
            self.field.pointer_left();
        }
        if let Some(point) = pending.pointer {
            self.field.pointer_moved(point);
        }
        if let Some((y, max)) = pending.scroll {
            self.field.scrolled(y, max, now);
        }
    }

    pub fn switch_tier(&mut self, tier: PlatformTier) {
        log::info!("[loop] switching to {:?}", tier);
        self.field.set_tier(tier);
        self.throttle = FrameThrottle::for_tier(tier);
        if let Some(p) = self.probe.as_mut() {
            *p = TierProbe::new(tier);
        }
    }
}

struct LoopInner {
    ctx: RefCell<FrameContext>,
    tick: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    raf_id: Cell<Option<i32>>,
    alive: Cell<bool>,
}

/// Handle to the self-rescheduling requestAnimationFrame loop. Pausing
/// simply stops rescheduling; resuming schedules again.
#[derive(Clone)]
pub struct LoopHandle {
    inner: Rc<LoopInner>,
}

pub fn start_loop(ctx: FrameContext) -> LoopHandle {
    let handle = LoopHandle {
        inner: Rc::new(LoopInner {
            ctx: RefCell::new(ctx),
            tick: RefCell::new(None),
            raf_id: Cell::new(None),
            alive: Cell::new(true),
        }),
    };
    let weak: Weak<LoopInner> = Rc::downgrade(&handle.inner);
    *handle.inner.tick.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        if let Some(inner) = weak.upgrade() {
            inner.raf_id.set(None);
            LoopHandle { inner }.run_frame();
        }
    }) as Box<dyn FnMut(f64)>));
    handle.schedule();
    handle
}

impl LoopHandle {
    fn run_frame(&self) {
        if !self.inner.alive.get() {
            return;
        }
        let keep_going = self.inner.ctx.borrow_mut().frame();
        if keep_going {
            self.schedule();
        }
    }

    fn schedule(&self) {
        if !self.inner.alive.get() || self.inner.raf_id.get().is_some() {
            return;
        }
        let Some(window) = web::window() else {
            return;
        };
        let tick = self.inner.tick.borrow();
        let Some(cb) = tick.as_ref() else {
            return;
        };
        match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => self.inner.raf_id.set(Some(id)),
            Err(e) => log::error!("[loop] requestAnimationFrame failed: {:?}", e),
        }
    }

    fn cancel(&self) {
        if let (Some(id), Some(window)) = (self.inner.raf_id.take(), web::window()) {
            _ = window.cancel_animation_frame(id);
        }
    }

    pub fn pause(&self) {
        self.inner.ctx.borrow_mut().field.pause();
        self.cancel();
    }

    pub fn resume(&self) {
        {
            let mut ctx = self.inner.ctx.borrow_mut();
            ctx.field.resume();
            ctx.throttle.reset();
            if let Some(p) = ctx.probe.as_mut() {
                p.restart();
            }
        }
        self.schedule();
    }

    /// Stop for good and release the particles.
    pub fn destroy(&self) {
        self.inner.alive.set(false);
        self.cancel();
        let mut ctx = self.inner.ctx.borrow_mut();
        ctx.field.destroy();
        let viewport = ctx.field.viewport();
        starfield_core::Surface::clear(&mut ctx.surface, viewport);
        drop(ctx);
        self.inner.tick.borrow_mut().take();
    }

    pub fn with_context<R>(&self, f: impl FnOnce(&mut FrameContext) -> R) -> R {
        f(&mut self.inner.ctx.borrow_mut())
    }
}
