//! Real-time data-center globe: points for every site, short-lived transfer
//! arcs between them, drag-to-rotate with idle spin, and deterministic teardown.
//!
//! [`GlobeView`] is the entry point. It runs on any [`runtime::Host`] event
//! loop and renders through whatever backend its [`Container`] supplies.

pub mod arcs;
pub mod bootstrap;
pub mod config;
pub mod container;
pub mod error;
pub mod interaction;
pub mod random;
pub mod render_loop;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod view;

pub use config::{ArcScheduleConfig, CameraConfig, ConfigError, GlobeConfig, InteractionConfig};
pub use container::{Container, InputEvent, InputSink};
pub use error::ViewError;
pub use view::{GlobeView, MountOutcome, ViewStats};
