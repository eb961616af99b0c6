//! The mounted globe: owns every resource and the three scheduled tasks.
//!
//! A `GlobeView` shares its state with the callbacks it registers through
//! weak references, so a callback that outlives the view (or fires after
//! teardown) finds nothing to act on.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use catalog::Catalog;
use foundation::ids::ArcId;
use foundation::time::Time;
use gpu::RenderBackend;
use layers::{Point, PointCache};
use runtime::{FrameHandle, Host, TimerHandle};
use scene::SceneGraph;
use scene::components::Orientation;
use tracing::{debug, trace, warn};

use crate::arcs::ArcScheduler;
use crate::bootstrap::build_scene_graph;
use crate::config::GlobeConfig;
use crate::container::{Container, InputEvent, InputSink};
use crate::error::ViewError;
use crate::interaction::InteractionController;
use crate::random::{ArcRandom, SeededRandom};
use crate::render_loop::RenderLoop;

/// Delay before a removal that found the view busy runs again.
const RETRY_DELAY_MS: u32 = 1;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MountOutcome {
    Mounted,
    /// The container has no size yet; nothing was created. Call `mount` again later.
    Deferred,
    AlreadyMounted,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ViewStats {
    pub frames_rendered: u64,
    pub arcs_spawned: u64,
    pub arcs_retired: u64,
    pub active_arcs: usize,
    /// Times the arc layer was re-pushed to the globe.
    pub arc_pushes: u64,
    pub mounted: bool,
    pub torn_down: bool,
    pub size: (u32, u32),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Phase {
    Unmounted,
    Mounted,
    TornDown,
}

/// Callbacks re-armed while the view state was borrowed. Kept outside the
/// `RefCell` so a busy callback can still record its replacement.
#[derive(Default)]
struct Retries {
    frame: Cell<Option<FrameHandle>>,
    removals: RefCell<BTreeMap<ArcId, TimerHandle>>,
}

struct ViewState {
    phase: Phase,
    config: GlobeConfig,
    container: Box<dyn Container>,
    catalog: Catalog,
    point_cache: PointCache,
    points: Rc<[Point]>,
    graph: Option<SceneGraph>,
    backend: Option<Box<dyn RenderBackend>>,
    interaction: InteractionController,
    render_loop: RenderLoop,
    arcs: ArcScheduler,
    frame: Option<FrameHandle>,
    spawn_timer: Option<TimerHandle>,
    removals: BTreeMap<ArcId, TimerHandle>,
    retries: Rc<Retries>,
    listening: bool,
    size: (u32, u32),
}

impl ViewState {
    fn push_arcs(&mut self) {
        if let Some(globe) = self.graph.as_mut().and_then(|g| g.scene.globe_mut()) {
            globe.set_arcs_data(self.arcs.snapshot());
        }
    }

    /// Re-read the container size and reproject. Zero sizes are skipped.
    fn apply_resize(&mut self) {
        let Some((width, height)) = self.container.client_size() else {
            debug!("resize skipped, container detached");
            return;
        };
        if width == 0 || height == 0 {
            debug!(width, height, "resize skipped, zero-sized container");
            return;
        }
        if let Some(backend) = self.backend.as_mut() {
            backend.resize(width, height);
        }
        if let Some(graph) = self.graph.as_mut() {
            graph.camera.aspect = f64::from(width) / f64::from(height);
            graph.camera.update_projection_matrix();
        }
        self.size = (width, height);
        debug!(width, height, "resized");
    }

    /// Cancel all scheduled work and free everything bootstrap created.
    /// Every step tolerates resources that are already gone.
    fn release(&mut self, host: &dyn Host) {
        if let Some(frame) = self.frame.take() {
            host.cancel_frame(frame);
        }
        if let Some(frame) = self.retries.frame.take() {
            host.cancel_frame(frame);
        }
        if let Some(timer) = self.spawn_timer.take() {
            host.clear_timer(timer);
        }
        let mut removals = std::mem::take(&mut self.removals);
        removals.append(&mut self.retries.removals.borrow_mut());
        if !removals.is_empty() {
            debug!(count = removals.len(), "clearing pending arc removals");
        }
        for timer in removals.into_values() {
            host.clear_timer(timer);
        }
        if self.listening {
            self.container.remove_listeners();
            self.listening = false;
        }
        if let Some(mut backend) = self.backend.take() {
            match self.container.detach_surface() {
                Ok(()) => {}
                Err(ViewError::SurfaceDetached) => debug!("surface already detached"),
                Err(err) => warn!(%err, "failed to detach surface"),
            }
            backend.dispose();
        }
        self.arcs.clear();
        self.graph = None;
        self.interaction.on_pointer_up();
    }
}

/// Weak handles captured by scheduled callbacks and input listeners.
#[derive(Clone)]
struct Links {
    state: Weak<RefCell<ViewState>>,
    host: Weak<dyn Host>,
    retries: Rc<Retries>,
}

impl Links {
    fn upgrade(&self) -> Option<(Rc<RefCell<ViewState>>, Rc<dyn Host>)> {
        Some((self.state.upgrade()?, self.host.upgrade()?))
    }

    fn schedule_frame(&self, host: &dyn Host, st: &mut ViewState) {
        let links = self.clone();
        match host.request_frame(Box::new(move |ts| links.on_frame(ts))) {
            Ok(handle) => st.frame = Some(handle),
            Err(err) => warn!(%err, "render loop stopped, frame request refused"),
        }
    }

    /// Ask for another frame without touching the borrowed state.
    fn retry_frame(&self, host: &dyn Host) {
        let links = self.clone();
        match host.request_frame(Box::new(move |ts| links.on_frame(ts))) {
            Ok(handle) => self.retries.frame.set(Some(handle)),
            Err(err) => warn!(%err, "render loop stopped, frame request refused"),
        }
    }

    fn retry_removal(&self, host: &dyn Host, id: ArcId) {
        let links = self.clone();
        match host.set_timeout(RETRY_DELAY_MS, Box::new(move || links.on_arc_expired(id))) {
            Ok(timer) => {
                self.retries.removals.borrow_mut().insert(id, timer);
            }
            Err(err) => warn!(%id, %err, "arc removal lost, retry could not be scheduled"),
        }
    }

    fn on_frame(&self, timestamp_ms: f64) {
        let Some((state, host)) = self.upgrade() else {
            return;
        };
        let Ok(mut st) = state.try_borrow_mut() else {
            debug!("view busy, frame deferred");
            self.retry_frame(host.as_ref());
            return;
        };
        self.retries.frame.set(None);
        st.frame = None;
        if st.phase != Phase::Mounted {
            return;
        }
        let ViewState {
            graph,
            backend,
            render_loop,
            interaction,
            ..
        } = &mut *st;
        if let (Some(graph), Some(backend)) = (graph.as_mut(), backend.as_mut()) {
            render_loop.step(
                timestamp_ms,
                interaction.is_dragging(),
                graph,
                &mut **backend,
            );
        }
        self.schedule_frame(host.as_ref(), &mut st);
    }

    fn on_spawn_tick(&self) {
        let Some((state, host)) = self.upgrade() else {
            return;
        };
        let Ok(mut st) = state.try_borrow_mut() else {
            warn!("spawn tick skipped, view busy");
            return;
        };
        if st.phase != Phase::Mounted {
            return;
        }
        let now = Time::from_ms(host.now_ms());
        let points = Rc::clone(&st.points);
        let Some(arc) = st.arcs.propose(&points, now) else {
            return;
        };
        let id = arc.id;
        let links = self.clone();
        let lifetime_ms = st.arcs.lifetime_ms();
        match host.set_timeout(lifetime_ms, Box::new(move || links.on_arc_expired(id))) {
            Ok(timer) => {
                st.arcs.admit(arc);
                st.removals.insert(id, timer);
                st.push_arcs();
                trace!(%id, lifetime_ms, active = st.arcs.active().len(), "arc spawned");
            }
            Err(err) => warn!(%id, %err, "arc dropped, removal could not be scheduled"),
        }
    }

    fn on_arc_expired(&self, id: ArcId) {
        let Some((state, host)) = self.upgrade() else {
            return;
        };
        let Ok(mut st) = state.try_borrow_mut() else {
            debug!(%id, "view busy, arc removal deferred");
            self.retry_removal(host.as_ref(), id);
            return;
        };
        self.retries.removals.borrow_mut().remove(&id);
        if st.phase != Phase::Mounted {
            return;
        }
        st.removals.remove(&id);
        if st.arcs.retire(id).is_some() {
            st.push_arcs();
            trace!(%id, active = st.arcs.active().len(), "arc retired");
        }
    }

    fn dispatch(&self, event: InputEvent) {
        let Some(state) = self.state.upgrade() else {
            return;
        };
        let Ok(mut st) = state.try_borrow_mut() else {
            warn!(?event, "input dropped, view busy");
            return;
        };
        if st.phase != Phase::Mounted {
            return;
        }
        if event == InputEvent::Resize {
            st.apply_resize();
            return;
        }
        let ViewState {
            graph, interaction, ..
        } = &mut *st;
        match event {
            InputEvent::PointerDown { x, y } => interaction.on_pointer_down([x, y]),
            InputEvent::PointerMove { x, y } => {
                if let Some(globe) = graph.as_mut().and_then(|g| g.scene.globe_mut()) {
                    interaction.on_pointer_move([x, y], &mut globe.orientation);
                }
            }
            InputEvent::PointerUp => interaction.on_pointer_up(),
            InputEvent::PointerLeave => interaction.on_pointer_leave(),
            InputEvent::Resize => {}
        }
    }
}

/// The data-center globe bound to one container.
pub struct GlobeView {
    state: Rc<RefCell<ViewState>>,
    host: Rc<dyn Host>,
    retries: Rc<Retries>,
}

impl GlobeView {
    /// Arc endpoints come from the configured seed, or from the host clock
    /// when no seed is set.
    pub fn new(
        host: Rc<dyn Host>,
        container: Box<dyn Container>,
        catalog: Catalog,
        config: GlobeConfig,
    ) -> Result<Self, ViewError> {
        let seed = config
            .arcs
            .seed
            .unwrap_or_else(|| host.now_ms().to_bits() ^ 0x9e37_79b9_7f4a_7c15);
        Self::with_random(host, container, catalog, config, Box::new(SeededRandom::new(seed)))
    }

    pub fn with_random(
        host: Rc<dyn Host>,
        container: Box<dyn Container>,
        catalog: Catalog,
        config: GlobeConfig,
        random: Box<dyn ArcRandom>,
    ) -> Result<Self, ViewError> {
        config.validate()?;
        let retries = Rc::new(Retries::default());
        let state = ViewState {
            phase: Phase::Unmounted,
            interaction: InteractionController::new(&config.interaction),
            render_loop: RenderLoop::new(config.auto_rotate, config.auto_rotate_step_rad),
            arcs: ArcScheduler::new(&config.arcs, random),
            container,
            catalog,
            point_cache: PointCache::new(),
            points: Rc::from(Vec::new()),
            graph: None,
            backend: None,
            frame: None,
            spawn_timer: None,
            removals: BTreeMap::new(),
            retries: Rc::clone(&retries),
            listening: false,
            size: (0, 0),
            config,
        };
        Ok(Self {
            state: Rc::new(RefCell::new(state)),
            host,
            retries,
        })
    }

    fn links(&self) -> Links {
        Links {
            state: Rc::downgrade(&self.state),
            host: Rc::downgrade(&self.host),
            retries: Rc::clone(&self.retries),
        }
    }

    /// Bootstrap the scene into the container and start the loop and spawn timer.
    ///
    /// On failure everything created so far is released and the view stays
    /// unmounted, so `mount` may be retried.
    pub fn mount(&self) -> Result<MountOutcome, ViewError> {
        let mut st = self.state.try_borrow_mut().map_err(|_| ViewError::HostUnavailable)?;
        match st.phase {
            Phase::TornDown => return Err(ViewError::TornDown),
            Phase::Mounted => return Ok(MountOutcome::AlreadyMounted),
            Phase::Unmounted => {}
        }
        let Some((width, height)) = st.container.client_size() else {
            debug!("mount deferred, container unavailable");
            return Ok(MountOutcome::Deferred);
        };

        if let Err(err) = self.bootstrap(&mut st, width, height) {
            warn!(%err, "mount failed, releasing partial resources");
            st.release(self.host.as_ref());
            return Err(err);
        }
        st.phase = Phase::Mounted;
        debug!(width, height, points = st.points.len(), "globe mounted");
        Ok(MountOutcome::Mounted)
    }

    fn bootstrap(&self, st: &mut ViewState, width: u32, height: u32) -> Result<(), ViewError> {
        st.points = st.point_cache.points(&st.catalog);

        let backend = st.container.attach_surface(width, height)?;
        st.backend = Some(backend);
        st.graph = Some(build_scene_graph(
            &st.config,
            Rc::clone(&st.points),
            width,
            height,
        ));

        let links = self.links();
        st.container
            .add_listeners(InputSink::new(move |event| links.dispatch(event)))?;
        st.listening = true;

        // Layout may not have settled; the listener handles later changes.
        st.apply_resize();

        let links = self.links();
        let timer = self.host.set_interval(
            st.config.arcs.spawn_period_ms,
            Box::new(move || links.on_spawn_tick()),
        )?;
        st.spawn_timer = Some(timer);

        let links = self.links();
        let frame = self
            .host
            .request_frame(Box::new(move |ts| links.on_frame(ts)))?;
        st.frame = Some(frame);
        Ok(())
    }

    /// Feed one input event, as the container's listeners do.
    pub fn dispatch(&self, event: InputEvent) {
        self.links().dispatch(event);
    }

    pub fn resize(&self) {
        self.dispatch(InputEvent::Resize);
    }

    /// Cancel everything and free the surface. Safe to call repeatedly and
    /// before or after a failed mount.
    pub fn teardown(&self) {
        let Ok(mut st) = self.state.try_borrow_mut() else {
            warn!("teardown deferred, view busy");
            return;
        };
        if st.phase == Phase::TornDown {
            return;
        }
        st.release(self.host.as_ref());
        st.phase = Phase::TornDown;
        debug!(
            frames = st.render_loop.frames(),
            spawned = st.arcs.spawned(),
            "globe torn down"
        );
    }

    pub fn stats(&self) -> ViewStats {
        let st = self.state.borrow();
        ViewStats {
            frames_rendered: st.render_loop.frames(),
            arcs_spawned: st.arcs.spawned(),
            arcs_retired: st.arcs.retired(),
            active_arcs: st.arcs.active().len(),
            arc_pushes: st
                .graph
                .as_ref()
                .and_then(|g| g.scene.globe())
                .map_or(0, |globe| globe.arc_pushes()),
            mounted: st.phase == Phase::Mounted,
            torn_down: st.phase == Phase::TornDown,
            size: st.size,
        }
    }

    pub fn orientation(&self) -> Option<Orientation> {
        let st = self.state.borrow();
        st.graph
            .as_ref()
            .and_then(|g| g.scene.globe())
            .map(|globe| globe.orientation)
    }

    pub fn camera_aspect(&self) -> Option<f64> {
        self.state.borrow().graph.as_ref().map(|g| g.camera.aspect)
    }

    /// Active arcs as `(start_index, end_index)` pairs, ordered by id.
    pub fn active_arcs(&self) -> Vec<(usize, usize)> {
        self.state
            .borrow()
            .arcs
            .active()
            .iter()
            .map(|arc| (arc.start_index, arc.end_index))
            .collect()
    }

    /// Arcs currently bound to the globe's arc layer.
    pub fn rendered_arcs(&self) -> usize {
        let st = self.state.borrow();
        st.graph
            .as_ref()
            .and_then(|g| g.scene.globe())
            .map_or(0, |globe| globe.arcs().len())
    }

    pub fn is_dragging(&self) -> bool {
        self.state.borrow().interaction.is_dragging()
    }

    pub fn set_auto_rotate(&self, enabled: bool) {
        self.state.borrow_mut().render_loop.set_auto_rotate(enabled);
    }
}

impl Drop for GlobeView {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for GlobeView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobeView")
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}
