//! A DOM element hosting the globe canvas.

use globe::{Container, InputEvent, InputSink, ViewError};
use gpu::RenderBackend;
use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Event, EventTarget, HtmlCanvasElement, HtmlElement, MouseEvent, ResizeObserver,
    Window,
};

use crate::backend::Canvas2dBackend;

const CANVAS_STYLE: &str = "display:block;width:100%;height:100%;touch-action:none;cursor:grab";

struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

/// Watches the container element itself; layout changes that leave the
/// window size alone never fire `resize`.
struct SizeWatch {
    observer: ResizeObserver,
    _closure: Closure<dyn FnMut(js_sys::Array)>,
}

pub struct DomContainer {
    window: Window,
    document: Document,
    element: HtmlElement,
    canvas: Option<HtmlCanvasElement>,
    listeners: Vec<Listener>,
    size_watch: Option<SizeWatch>,
}

impl DomContainer {
    pub fn new(element: HtmlElement) -> Result<Self, ViewError> {
        let window = web_sys::window().ok_or(ViewError::HostUnavailable)?;
        let document = window.document().ok_or(ViewError::HostUnavailable)?;
        Ok(Self {
            window,
            document,
            element,
            canvas: None,
            listeners: Vec::new(),
            size_watch: None,
        })
    }

    fn listen(
        &mut self,
        target: EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), ViewError> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| surface_error("add listener", e))?;
        self.listeners.push(Listener {
            target,
            event,
            closure,
        });
        Ok(())
    }

    fn watch_size(&mut self, sink: InputSink) -> Result<(), ViewError> {
        let closure = Closure::wrap(Box::new(move |_entries: js_sys::Array| {
            sink.send(InputEvent::Resize)
        }) as Box<dyn FnMut(js_sys::Array)>);
        let observer = ResizeObserver::new(closure.as_ref().unchecked_ref())
            .map_err(|e| surface_error("create resize observer", e))?;
        observer.observe(&self.element);
        self.size_watch = Some(SizeWatch {
            observer,
            _closure: closure,
        });
        Ok(())
    }
}

fn surface_error(what: &str, err: JsValue) -> ViewError {
    ViewError::Surface(format!("{what}: {err:?}"))
}

fn pointer_px(event: &Event) -> Option<(f64, f64)> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some((f64::from(mouse.offset_x()), f64::from(mouse.offset_y())))
}

impl Container for DomContainer {
    fn client_size(&self) -> Option<(u32, u32)> {
        if !self.element.is_connected() {
            return None;
        }
        let w = self.element.client_width().max(0) as u32;
        let h = self.element.client_height().max(0) as u32;
        Some((w, h))
    }

    fn attach_surface(
        &mut self,
        width: u32,
        height: u32,
    ) -> Result<Box<dyn RenderBackend>, ViewError> {
        let canvas: HtmlCanvasElement = self
            .document
            .create_element("canvas")
            .map_err(|e| surface_error("create canvas", e))?
            .dyn_into()
            .map_err(|_| ViewError::Surface("created element is not a canvas".into()))?;
        canvas
            .set_attribute("style", CANVAS_STYLE)
            .map_err(|e| surface_error("style canvas", e))?;
        let backend = Canvas2dBackend::new(canvas.clone(), self.window.device_pixel_ratio())?;
        self.element
            .append_child(&canvas)
            .map_err(|e| surface_error("append canvas", e))?;

        let mut backend: Box<dyn RenderBackend> = Box::new(backend);
        backend.resize(width, height);
        self.canvas = Some(canvas);
        Ok(backend)
    }

    fn detach_surface(&mut self) -> Result<(), ViewError> {
        let canvas = self.canvas.take().ok_or(ViewError::SurfaceDetached)?;
        if canvas.parent_node().is_none() {
            return Err(ViewError::SurfaceDetached);
        }
        canvas.remove();
        Ok(())
    }

    fn add_listeners(&mut self, sink: InputSink) -> Result<(), ViewError> {
        let canvas: EventTarget = self
            .canvas
            .clone()
            .ok_or(ViewError::SurfaceDetached)?
            .into();

        let s = sink.clone();
        self.listen(canvas.clone(), "pointerdown", move |e| {
            if let Some((x, y)) = pointer_px(&e) {
                e.prevent_default();
                s.send(InputEvent::PointerDown { x, y });
            }
        })?;
        let s = sink.clone();
        self.listen(canvas.clone(), "pointermove", move |e| {
            if let Some((x, y)) = pointer_px(&e) {
                s.send(InputEvent::PointerMove { x, y });
            }
        })?;
        let s = sink.clone();
        self.listen(canvas.clone(), "pointerup", move |_| s.send(InputEvent::PointerUp))?;
        let s = sink.clone();
        self.listen(canvas, "pointerleave", move |_| s.send(InputEvent::PointerLeave))?;
        let s = sink.clone();
        let window: EventTarget = self.window.clone().into();
        self.listen(window, "resize", move |_| s.send(InputEvent::Resize))?;
        self.watch_size(sink)?;
        debug!(count = self.listeners.len(), "dom listeners registered");
        Ok(())
    }

    fn remove_listeners(&mut self) {
        for l in self.listeners.drain(..) {
            let _ = l
                .target
                .remove_event_listener_with_callback(l.event, l.closure.as_ref().unchecked_ref());
        }
        if let Some(watch) = self.size_watch.take() {
            watch.observer.disconnect();
        }
    }
}

impl Drop for DomContainer {
    fn drop(&mut self) {
        self.remove_listeners();
    }
}
