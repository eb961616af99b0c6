//! Browser event loop as a [`Host`]: animation frames plus window timers.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use runtime::{
    FrameCallback, FrameHandle, Host, HostError, IntervalCallback, TimeoutCallback, TimerHandle,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Performance, Window};

enum Scheduled {
    Frame(Closure<dyn FnMut(f64)>),
    Timeout(Closure<dyn FnMut()>),
    Interval(Closure<dyn FnMut()>),
}

struct Entry {
    id: u64,
    browser_id: i32,
    scheduled: Scheduled,
}

/// Closures must outlive the JS call that runs them, so fired or cancelled
/// entries are parked in `spent` and freed on a later sweep.
#[derive(Default)]
struct Registry {
    next_id: u64,
    live: HashMap<u64, Entry>,
    spent: Vec<Entry>,
    running: Option<u64>,
}

impl Registry {
    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn retire(&mut self, id: u64) -> Option<&Entry> {
        let entry = self.live.remove(&id)?;
        self.spent.push(entry);
        self.spent.last()
    }

    fn sweep(&mut self) {
        let running = self.running;
        self.spent.retain(|e| Some(e.id) == running);
    }

    fn begin(&mut self, id: u64, one_shot: bool) {
        if one_shot {
            self.retire(id);
        }
        self.running = Some(id);
    }
}

pub struct WebHost {
    window: Window,
    performance: Option<Performance>,
    registry: Rc<RefCell<Registry>>,
}

impl WebHost {
    pub fn new() -> Result<Self, HostError> {
        let window = web_sys::window().ok_or(HostError::Unavailable)?;
        Ok(Self {
            performance: window.performance(),
            window,
            registry: Rc::new(RefCell::new(Registry::default())),
        })
    }

    fn weak(&self) -> Weak<RefCell<Registry>> {
        Rc::downgrade(&self.registry)
    }

    fn insert(&self, id: u64, browser_id: i32, scheduled: Scheduled) {
        let mut reg = self.registry.borrow_mut();
        reg.sweep();
        reg.live.insert(
            id,
            Entry {
                id,
                browser_id,
                scheduled,
            },
        );
    }

    fn allocate(&self) -> u64 {
        self.registry.borrow_mut().allocate()
    }
}

fn finish(registry: &Weak<RefCell<Registry>>) {
    if let Some(reg) = registry.upgrade() {
        reg.borrow_mut().running = None;
    }
}

fn start(registry: &Weak<RefCell<Registry>>, id: u64, one_shot: bool) {
    if let Some(reg) = registry.upgrade() {
        reg.borrow_mut().begin(id, one_shot);
    }
}

fn refused(what: &'static str, err: JsValue) -> HostError {
    HostError::schedule(what, format!("{err:?}"))
}

impl Host for WebHost {
    fn now_ms(&self) -> f64 {
        match &self.performance {
            Some(p) => p.now(),
            None => js_sys::Date::now(),
        }
    }

    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle, HostError> {
        let id = self.allocate();
        let registry = self.weak();
        let mut callback = Some(callback);
        let closure = Closure::wrap(Box::new(move |ts: f64| {
            start(&registry, id, true);
            if let Some(cb) = callback.take() {
                cb(ts);
            }
            finish(&registry);
        }) as Box<dyn FnMut(f64)>);
        let browser_id = self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .map_err(|e| refused("animation frame", e))?;
        self.insert(id, browser_id, Scheduled::Frame(closure));
        Ok(FrameHandle::from_raw(id))
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        let mut reg = self.registry.borrow_mut();
        if let Some(entry) = reg.retire(handle.raw()) {
            let _ = self.window.cancel_animation_frame(entry.browser_id);
        }
        reg.sweep();
    }

    fn set_interval(
        &self,
        period_ms: u32,
        mut callback: IntervalCallback,
    ) -> Result<TimerHandle, HostError> {
        let id = self.allocate();
        let registry = self.weak();
        let closure = Closure::wrap(Box::new(move || {
            start(&registry, id, false);
            callback();
            finish(&registry);
        }) as Box<dyn FnMut()>);
        let browser_id = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms.min(i32::MAX as u32) as i32,
            )
            .map_err(|e| refused("interval", e))?;
        self.insert(id, browser_id, Scheduled::Interval(closure));
        Ok(TimerHandle::from_raw(id))
    }

    fn set_timeout(
        &self,
        delay_ms: u32,
        callback: TimeoutCallback,
    ) -> Result<TimerHandle, HostError> {
        let id = self.allocate();
        let registry = self.weak();
        let mut callback = Some(callback);
        let closure = Closure::wrap(Box::new(move || {
            start(&registry, id, true);
            if let Some(cb) = callback.take() {
                cb();
            }
            finish(&registry);
        }) as Box<dyn FnMut()>);
        let browser_id = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay_ms.min(i32::MAX as u32) as i32,
            )
            .map_err(|e| refused("timeout", e))?;
        self.insert(id, browser_id, Scheduled::Timeout(closure));
        Ok(TimerHandle::from_raw(id))
    }

    fn clear_timer(&self, handle: TimerHandle) {
        let mut reg = self.registry.borrow_mut();
        if let Some(entry) = reg.retire(handle.raw()) {
            match entry.scheduled {
                Scheduled::Interval(_) => self.window.clear_interval_with_handle(entry.browser_id),
                Scheduled::Timeout(_) => self.window.clear_timeout_with_handle(entry.browser_id),
                Scheduled::Frame(_) => {
                    let _ = self.window.cancel_animation_frame(entry.browser_id);
                }
            }
        }
        reg.sweep();
    }

    fn pending(&self) -> usize {
        self.registry.borrow().live.len()
    }
}

impl Drop for WebHost {
    fn drop(&mut self) {
        let Ok(mut reg) = self.registry.try_borrow_mut() else {
            return;
        };
        for (_, entry) in reg.live.drain() {
            match entry.scheduled {
                Scheduled::Frame(_) => {
                    let _ = self.window.cancel_animation_frame(entry.browser_id);
                }
                Scheduled::Timeout(_) => self.window.clear_timeout_with_handle(entry.browser_id),
                Scheduled::Interval(_) => self.window.clear_interval_with_handle(entry.browser_id),
            }
        }
    }
}
