pub mod frame;
pub mod host;
pub mod manual;
pub mod scheduler;

pub use frame::*;
pub use host::*;
pub use manual::*;
