pub mod arcs;
pub mod layer;
pub mod points;
pub mod symbology;

pub use arcs::*;
pub use layer::*;
pub use points::*;
pub use symbology::*;
