//! The host event-loop contract.
//!
//! Everything the engine schedules goes through a [`Host`]: animation frames,
//! repeating timers and one-shot timers. The browser implementation wraps
//! `window`; [`crate::ManualHost`] is a deterministic fake clock for tests.

use thiserror::Error;

pub type FrameCallback = Box<dyn FnOnce(f64)>;
pub type IntervalCallback = Box<dyn FnMut()>;
pub type TimeoutCallback = Box<dyn FnOnce()>;

/// Handle to a requested animation frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn from_raw(raw: u64) -> Self {
        FrameHandle(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Handle to an interval or timeout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn from_raw(raw: u64) -> Self {
        TimerHandle(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("host refused to schedule {what}: {reason}")]
    Schedule { what: &'static str, reason: String },
    #[error("host environment unavailable")]
    Unavailable,
}

impl HostError {
    pub fn schedule(what: &'static str, reason: impl Into<String>) -> Self {
        Self::Schedule {
            what,
            reason: reason.into(),
        }
    }
}

/// Single-threaded cooperative scheduler provided by the embedding environment.
///
/// Callbacks never run synchronously inside the call that registers them.
/// Cancelling a handle that already fired (or was never issued) is a no-op.
pub trait Host {
    /// Monotonic milliseconds.
    fn now_ms(&self) -> f64;

    /// Run `callback` once before the next repaint; it receives the frame timestamp.
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle, HostError>;

    fn cancel_frame(&self, handle: FrameHandle);

    fn set_interval(
        &self,
        period_ms: u32,
        callback: IntervalCallback,
    ) -> Result<TimerHandle, HostError>;

    fn set_timeout(&self, delay_ms: u32, callback: TimeoutCallback)
        -> Result<TimerHandle, HostError>;

    /// Clears either an interval or a timeout.
    fn clear_timer(&self, handle: TimerHandle);

    /// Number of scheduled callbacks that have not fired yet.
    fn pending(&self) -> usize;
}
