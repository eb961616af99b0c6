//! In-memory [`Container`] for driving a view without a DOM.

use std::cell::RefCell;
use std::rc::Rc;

use gpu::{HeadlessBackend, HeadlessProbe, RenderBackend};

use crate::container::{Container, InputEvent, InputSink};
use crate::error::ViewError;

#[derive(Debug, Default)]
struct FakeState {
    size: Option<(u32, u32)>,
    attached: bool,
    attaches: u64,
    detaches: u64,
    listener_adds: u64,
    listener_removes: u64,
    sink: Option<InputSink>,
    backend: Option<HeadlessProbe>,
    fail_listeners: bool,
}

/// Container whose size and events are set from the outside.
#[derive(Debug, Default)]
pub struct FakeContainer {
    state: Rc<RefCell<FakeState>>,
}

/// Test-side handle to a [`FakeContainer`] that was moved into a view.
#[derive(Debug, Clone)]
pub struct FakeContainerProbe {
    state: Rc<RefCell<FakeState>>,
}

impl FakeContainer {
    /// A mounted container of the given size, plus its probe.
    pub fn new(width: u32, height: u32) -> (Self, FakeContainerProbe) {
        Self::with_size(Some((width, height)))
    }

    /// `None` models an element that is not mounted yet.
    pub fn with_size(size: Option<(u32, u32)>) -> (Self, FakeContainerProbe) {
        let state = Rc::new(RefCell::new(FakeState {
            size,
            ..FakeState::default()
        }));
        (
            Self {
                state: Rc::clone(&state),
            },
            FakeContainerProbe { state },
        )
    }
}

impl FakeContainerProbe {
    pub fn set_size(&self, size: Option<(u32, u32)>) {
        self.state.borrow_mut().size = size;
    }

    /// Change the size and deliver a resize event, like a viewport change.
    pub fn resize(&self, width: u32, height: u32) -> bool {
        self.set_size(Some((width, height)));
        self.fire(InputEvent::Resize)
    }

    /// Deliver `event` through the registered listeners. Returns false when
    /// nothing is listening.
    pub fn fire(&self, event: InputEvent) -> bool {
        // Clone out so the listener can call back into the container.
        let sink = self.state.borrow().sink.clone();
        match sink {
            Some(sink) => {
                sink.send(event);
                true
            }
            None => false,
        }
    }

    /// Make the next `add_listeners` fail.
    pub fn fail_listeners(&self) {
        self.state.borrow_mut().fail_listeners = true;
    }

    /// Simulate the surface being removed by someone else.
    pub fn detach_externally(&self) {
        self.state.borrow_mut().attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.state.borrow().attached
    }

    pub fn is_listening(&self) -> bool {
        self.state.borrow().sink.is_some()
    }

    pub fn attaches(&self) -> u64 {
        self.state.borrow().attaches
    }

    pub fn detaches(&self) -> u64 {
        self.state.borrow().detaches
    }

    pub fn listener_adds(&self) -> u64 {
        self.state.borrow().listener_adds
    }

    pub fn listener_removes(&self) -> u64 {
        self.state.borrow().listener_removes
    }

    /// Probe of the backend created by the latest attach.
    pub fn backend(&self) -> Option<HeadlessProbe> {
        self.state.borrow().backend.clone()
    }
}

impl Container for FakeContainer {
    fn client_size(&self) -> Option<(u32, u32)> {
        self.state.borrow().size
    }

    fn attach_surface(
        &mut self,
        width: u32,
        height: u32,
    ) -> Result<Box<dyn RenderBackend>, ViewError> {
        let mut s = self.state.borrow_mut();
        if s.size.is_none() {
            return Err(ViewError::HostUnavailable);
        }
        let (mut backend, probe) = HeadlessBackend::new();
        backend.resize(width, height);
        s.attached = true;
        s.attaches += 1;
        s.backend = Some(probe);
        Ok(Box::new(backend))
    }

    fn detach_surface(&mut self) -> Result<(), ViewError> {
        let mut s = self.state.borrow_mut();
        if !s.attached {
            return Err(ViewError::SurfaceDetached);
        }
        s.attached = false;
        s.detaches += 1;
        Ok(())
    }

    fn add_listeners(&mut self, sink: InputSink) -> Result<(), ViewError> {
        let mut s = self.state.borrow_mut();
        if std::mem::take(&mut s.fail_listeners) {
            return Err(ViewError::Surface("listener registration refused".into()));
        }
        s.listener_adds += 1;
        s.sink = Some(sink);
        Ok(())
    }

    fn remove_listeners(&mut self) {
        let mut s = self.state.borrow_mut();
        if s.sink.take().is_some() {
            s.listener_removes += 1;
        }
    }
}
