//! The host container contract: where the surface lives and where input comes from.

use std::rc::Rc;

use gpu::RenderBackend;

use crate::error::ViewError;

/// Input delivered by the container's listeners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer position in surface pixels.
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    PointerLeave,
    /// The container or viewport changed size; re-read `client_size`.
    Resize,
}

/// Where listeners send their events. Cheap to clone.
#[derive(Clone)]
pub struct InputSink {
    deliver: Rc<dyn Fn(InputEvent)>,
}

impl InputSink {
    pub fn new(deliver: impl Fn(InputEvent) + 'static) -> Self {
        Self {
            deliver: Rc::new(deliver),
        }
    }

    pub fn send(&self, event: InputEvent) {
        (self.deliver)(event);
    }
}

impl std::fmt::Debug for InputSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputSink").finish_non_exhaustive()
    }
}

/// A DOM-like element the globe renders into.
pub trait Container {
    /// Current client size in pixels, or `None` while the element is not mounted.
    fn client_size(&self) -> Option<(u32, u32)>;

    /// Create the rendering surface, append it to the container and return
    /// the backend bound to it.
    fn attach_surface(&mut self, width: u32, height: u32)
    -> Result<Box<dyn RenderBackend>, ViewError>;

    /// Remove the surface. `Err(ViewError::SurfaceDetached)` when it is already gone.
    fn detach_surface(&mut self) -> Result<(), ViewError>;

    /// Register pointer down/move/up/leave on the surface and the viewport resize listener.
    fn add_listeners(&mut self, sink: InputSink) -> Result<(), ViewError>;

    /// Unregister everything `add_listeners` registered. Idempotent.
    fn remove_listeners(&mut self);
}
