use gpu::{RenderBackend, RenderFrame};
use runtime::Frame;
use scene::SceneGraph;

/// Per-frame work: autonomous spin when idle, then one draw.
#[derive(Debug, Clone)]
pub struct RenderLoop {
    auto_rotate: bool,
    step_rad: f64,
    last: Option<Frame>,
    frames: u64,
}

impl RenderLoop {
    pub fn new(auto_rotate: bool, step_rad: f64) -> Self {
        Self {
            auto_rotate,
            step_rad,
            last: None,
            frames: 0,
        }
    }

    /// Yaw to apply this frame.
    pub fn autonomous_step(&self, dragging: bool) -> f64 {
        if self.auto_rotate && !dragging { self.step_rad } else { 0.0 }
    }

    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.auto_rotate = enabled;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_frame(&self) -> Option<Frame> {
        self.last
    }

    pub fn step(
        &mut self,
        timestamp_ms: f64,
        dragging: bool,
        graph: &mut SceneGraph,
        backend: &mut dyn RenderBackend,
    ) -> Frame {
        let frame = Frame::from_timestamp(self.last, timestamp_ms);
        self.last = Some(frame);

        let step = self.autonomous_step(dragging);
        if step != 0.0 {
            if let Some(globe) = graph.scene.globe_mut() {
                globe.orientation.rotate(step, 0.0);
            }
        }

        let commands = RenderFrame::collect(&graph.scene, &graph.camera, timestamp_ms);
        backend.draw(&commands);
        self.frames += 1;
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::RenderLoop;
    use crate::bootstrap::build_scene_graph;
    use crate::config::GlobeConfig;
    use gpu::HeadlessBackend;
    use layers::derive_points;

    #[test]
    fn spins_only_when_idle() {
        let mut graph = build_scene_graph(&GlobeConfig::default(), derive_points(&[]).into(), 100, 100);
        let (mut backend, probe) = HeadlessBackend::new();
        let mut rl = RenderLoop::new(true, 0.01);

        rl.step(0.0, false, &mut graph, &mut backend);
        rl.step(16.0, true, &mut graph, &mut backend);
        rl.step(32.0, false, &mut graph, &mut backend);

        let yaw = graph.scene.globe().unwrap().orientation.yaw_rad;
        assert!((yaw - 0.02).abs() < 1e-12);
        assert_eq!(probe.stats().draws, 3);
        assert_eq!(rl.frames(), 3);
        assert_eq!(rl.last_frame().map(|f| f.index), Some(2));
    }

    #[test]
    fn disabled_auto_rotate_still_draws() {
        let mut graph = build_scene_graph(&GlobeConfig::default(), derive_points(&[]).into(), 100, 100);
        let (mut backend, probe) = HeadlessBackend::new();
        let mut rl = RenderLoop::new(false, 0.01);
        rl.step(0.0, false, &mut graph, &mut backend);
        assert_eq!(graph.scene.globe().unwrap().orientation.yaw_rad, 0.0);
        assert_eq!(probe.stats().draws, 1);
    }
}
