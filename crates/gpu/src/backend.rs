use std::cell::RefCell;
use std::rc::Rc;

use crate::renderer::RenderFrame;

/// The drawing side of the rendering collaborator.
///
/// A backend owns its output surface; the embedding container decides where
/// that surface lives.
pub trait RenderBackend {
    fn resize(&mut self, width: u32, height: u32);
    fn draw(&mut self, frame: &RenderFrame);
    /// Release GPU/surface resources. Must tolerate repeated calls.
    fn dispose(&mut self);
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct HeadlessStats {
    pub draws: u64,
    pub resizes: u64,
    pub size: (u32, u32),
    pub disposals: u64,
    pub draws_after_dispose: u64,
    pub last_point_count: usize,
    pub last_arc_count: usize,
}

/// Backend that draws nothing and records what it was asked to do.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    stats: Rc<RefCell<HeadlessStats>>,
}

/// Read side of a [`HeadlessBackend`] that stays valid after the backend is boxed.
#[derive(Debug, Clone)]
pub struct HeadlessProbe {
    stats: Rc<RefCell<HeadlessStats>>,
}

impl HeadlessBackend {
    pub fn new() -> (Self, HeadlessProbe) {
        let stats = Rc::new(RefCell::new(HeadlessStats::default()));
        (
            Self {
                stats: Rc::clone(&stats),
            },
            HeadlessProbe { stats },
        )
    }
}

impl HeadlessProbe {
    pub fn stats(&self) -> HeadlessStats {
        self.stats.borrow().clone()
    }
}

impl RenderBackend for HeadlessBackend {
    fn resize(&mut self, width: u32, height: u32) {
        let mut s = self.stats.borrow_mut();
        s.resizes += 1;
        s.size = (width, height);
    }

    fn draw(&mut self, frame: &RenderFrame) {
        let mut s = self.stats.borrow_mut();
        if s.disposals > 0 {
            s.draws_after_dispose += 1;
        }
        s.draws += 1;
        s.last_point_count = frame.point_count();
        s.last_arc_count = frame.arc_count();
    }

    fn dispose(&mut self) {
        self.stats.borrow_mut().disposals += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::{HeadlessBackend, RenderBackend};
    use crate::renderer::RenderFrame;
    use scene::{PerspectiveCamera, Scene};

    #[test]
    fn probe_sees_calls_through_box() {
        let (backend, probe) = HeadlessBackend::new();
        let mut boxed: Box<dyn RenderBackend> = Box::new(backend);
        boxed.resize(640, 480);
        let frame = RenderFrame::collect(&Scene::new(), &PerspectiveCamera::new(45.0, 1.0, 1.0, 10.0), 0.0);
        boxed.draw(&frame);
        boxed.dispose();
        boxed.draw(&frame);

        let stats = probe.stats();
        assert_eq!(stats.size, (640, 480));
        assert_eq!(stats.draws, 2);
        assert_eq!(stats.draws_after_dispose, 1);
        assert_eq!(stats.disposals, 1);
    }
}
