use std::cell::RefCell;

use crate::host::{
    FrameCallback, FrameHandle, Host, HostError, IntervalCallback, TimeoutCallback, TimerHandle,
};
use crate::scheduler::{Task, TaskKind, TaskQueue};

/// Default vsync cadence (60 Hz).
pub const DEFAULT_FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

#[derive(Debug)]
struct ManualState {
    now_ms: f64,
    frame_interval_ms: f64,
    next_id: u64,
    queue: TaskQueue,
    /// Interval currently executing, if any.
    running: Option<u64>,
    cancel_running: bool,
    fired: u64,
}

/// Deterministic [`Host`] with a fake clock.
///
/// Nothing runs until the test advances time. Frames fire on vsync boundaries
/// (multiples of the frame interval); timers fire at their exact due time.
/// Callbacks run with no internal borrow held, so they may schedule or cancel
/// freely.
#[derive(Debug)]
pub struct ManualHost {
    state: RefCell<ManualState>,
}

impl Default for ManualHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualHost {
    pub fn new() -> Self {
        Self::with_frame_interval(DEFAULT_FRAME_INTERVAL_MS)
    }

    pub fn with_frame_interval(frame_interval_ms: f64) -> Self {
        Self {
            state: RefCell::new(ManualState {
                now_ms: 0.0,
                frame_interval_ms: frame_interval_ms.max(1e-3),
                next_id: 1,
                queue: TaskQueue::new(),
                running: None,
                cancel_running: false,
                fired: 0,
            }),
        }
    }

    pub fn frame_interval_ms(&self) -> f64 {
        self.state.borrow().frame_interval_ms
    }

    pub fn pending_frames(&self) -> usize {
        self.state.borrow().queue.frame_count()
    }

    pub fn pending_timers(&self) -> usize {
        let s = self.state.borrow();
        s.queue.len() - s.queue.frame_count()
    }

    /// Total callbacks executed so far.
    pub fn fired(&self) -> u64 {
        self.state.borrow().fired
    }

    pub fn next_due(&self) -> Option<f64> {
        self.state.borrow().queue.next_due()
    }

    /// Advance the clock by `ms`, running everything that comes due.
    pub fn advance_by(&self, ms: f64) -> usize {
        let target = self.state.borrow().now_ms + ms.max(0.0);
        self.advance_to(target)
    }

    /// Advance to the next vsync boundary, running due timers and frames.
    pub fn step_frame(&self) -> usize {
        let target = {
            let s = self.state.borrow();
            next_vsync(s.now_ms, s.frame_interval_ms)
        };
        self.advance_to(target)
    }

    /// Run `count` consecutive frames.
    pub fn step_frames(&self, count: usize) -> usize {
        (0..count).map(|_| self.step_frame()).sum()
    }

    pub fn advance_to(&self, target_ms: f64) -> usize {
        let mut ran = 0usize;
        loop {
            let task = {
                let mut s = self.state.borrow_mut();
                let Some(task) = s.queue.pop_due(target_ms) else {
                    break;
                };
                s.now_ms = s.now_ms.max(task.due_ms);
                s.fired += 1;
                if matches!(task.kind, TaskKind::Interval { .. }) {
                    s.running = Some(task.id);
                    s.cancel_running = false;
                }
                task
            };

            ran += 1;
            let now = self.now_ms();
            match task.kind {
                TaskKind::Frame(callback) => callback(now),
                TaskKind::Timeout(callback) => callback(),
                TaskKind::Interval {
                    period_ms,
                    mut callback,
                } => {
                    callback();
                    let mut s = self.state.borrow_mut();
                    let cancelled = s.cancel_running;
                    s.running = None;
                    s.cancel_running = false;
                    if !cancelled {
                        s.queue.push(Task {
                            id: task.id,
                            due_ms: task.due_ms + period_ms,
                            kind: TaskKind::Interval {
                                period_ms,
                                callback,
                            },
                        });
                    }
                }
            }
        }

        let mut s = self.state.borrow_mut();
        s.now_ms = s.now_ms.max(target_ms);
        ran
    }

    fn schedule(&self, due_ms: f64, kind: TaskKind) -> u64 {
        let mut s = self.state.borrow_mut();
        let id = s.next_id;
        s.next_id += 1;
        s.queue.push(Task { id, due_ms, kind });
        id
    }

    fn cancel(&self, id: u64) {
        let mut s = self.state.borrow_mut();
        if !s.queue.remove(id) && s.running == Some(id) {
            s.cancel_running = true;
        }
    }
}

fn next_vsync(now_ms: f64, interval_ms: f64) -> f64 {
    let mut due = ((now_ms / interval_ms) + 1e-9).floor() * interval_ms + interval_ms;
    if due <= now_ms + 1e-9 {
        due += interval_ms;
    }
    due
}

impl Host for ManualHost {
    fn now_ms(&self) -> f64 {
        self.state.borrow().now_ms
    }

    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle, HostError> {
        let due = {
            let s = self.state.borrow();
            next_vsync(s.now_ms, s.frame_interval_ms)
        };
        Ok(FrameHandle::from_raw(
            self.schedule(due, TaskKind::Frame(callback)),
        ))
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.cancel(handle.raw());
    }

    fn set_interval(
        &self,
        period_ms: u32,
        callback: IntervalCallback,
    ) -> Result<TimerHandle, HostError> {
        // Browsers clamp zero-period intervals; so does this host.
        let period_ms = f64::from(period_ms.max(1));
        let due = self.now_ms() + period_ms;
        Ok(TimerHandle::from_raw(self.schedule(
            due,
            TaskKind::Interval {
                period_ms,
                callback,
            },
        )))
    }

    fn set_timeout(
        &self,
        delay_ms: u32,
        callback: TimeoutCallback,
    ) -> Result<TimerHandle, HostError> {
        let due = self.now_ms() + f64::from(delay_ms);
        Ok(TimerHandle::from_raw(
            self.schedule(due, TaskKind::Timeout(callback)),
        ))
    }

    fn clear_timer(&self, handle: TimerHandle) {
        self.cancel(handle.raw());
    }

    fn pending(&self) -> usize {
        self.state.borrow().queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::ManualHost;
    use crate::host::Host;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn timeout_fires_once_at_due_time() {
        let host = ManualHost::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        host.set_timeout(100, Box::new(move || h.set(h.get() + 1)))
            .unwrap();

        host.advance_by(99.0);
        assert_eq!(hits.get(), 0);
        host.advance_by(1.0);
        assert_eq!(hits.get(), 1);
        host.advance_by(1000.0);
        assert_eq!(hits.get(), 1);
        assert_eq!(host.pending(), 0);
    }

    #[test]
    fn interval_rearms_until_cleared() {
        let host = ManualHost::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let handle = host
            .set_interval(250, Box::new(move || h.set(h.get() + 1)))
            .unwrap();

        host.advance_by(1000.0);
        assert_eq!(hits.get(), 4);
        host.clear_timer(handle);
        host.advance_by(1000.0);
        assert_eq!(hits.get(), 4);
        assert_eq!(host.pending(), 0);
    }

    #[test]
    fn interval_can_clear_itself() {
        let host = Rc::new(ManualHost::new());
        let handle_slot = Rc::new(Cell::new(None));
        let hits = Rc::new(Cell::new(0));

        let (h, slot, weak) = (hits.clone(), handle_slot.clone(), Rc::downgrade(&host));
        let handle = host
            .set_interval(
                10,
                Box::new(move || {
                    h.set(h.get() + 1);
                    if let (Some(host), Some(handle)) = (weak.upgrade(), slot.get()) {
                        host.clear_timer(handle);
                    }
                }),
            )
            .unwrap();
        handle_slot.set(Some(handle));

        host.advance_by(100.0);
        assert_eq!(hits.get(), 1);
        assert_eq!(host.pending(), 0);
    }

    #[test]
    fn frames_fire_on_vsync_and_can_reschedule() {
        let host = Rc::new(ManualHost::with_frame_interval(10.0));
        let stamps = Rc::new(RefCell::new(Vec::new()));

        fn tick(host: std::rc::Weak<ManualHost>, stamps: Rc<RefCell<Vec<f64>>>) {
            let Some(h) = host.upgrade() else { return };
            h.request_frame(Box::new(move |ts| {
                stamps.borrow_mut().push(ts);
                tick(host, stamps);
            }))
            .unwrap();
        }
        tick(Rc::downgrade(&host), stamps.clone());

        host.step_frames(3);
        assert_eq!(*stamps.borrow(), vec![10.0, 20.0, 30.0]);
        assert_eq!(host.pending_frames(), 1);
    }

    #[test]
    fn cancel_frame_prevents_callback() {
        let host = ManualHost::new();
        let hit = Rc::new(Cell::new(false));
        let h = hit.clone();
        let handle = host.request_frame(Box::new(move |_| h.set(true))).unwrap();
        host.cancel_frame(handle);
        host.cancel_frame(handle);
        host.step_frames(2);
        assert!(!hit.get());
        assert_eq!(host.pending(), 0);
    }

    #[test]
    fn timers_and_frames_interleave_by_due_time() {
        let host = ManualHost::with_frame_interval(10.0);
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = log.clone();
        host.set_timeout(15, Box::new(move || l.borrow_mut().push("timeout")))
            .unwrap();
        let l = log.clone();
        host.request_frame(Box::new(move |_| l.borrow_mut().push("frame")))
            .unwrap();

        host.advance_by(20.0);
        assert_eq!(*log.borrow(), vec!["frame", "timeout"]);
        assert_eq!(host.now_ms(), 20.0);
    }
}
