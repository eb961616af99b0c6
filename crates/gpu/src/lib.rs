pub mod backend;
pub mod projection;
pub mod renderer;

pub use backend::*;
pub use projection::*;
pub use renderer::*;
