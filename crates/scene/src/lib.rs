pub mod camera;
pub mod components;
pub mod light;
pub mod prefabs;
pub mod world;

pub use camera::*;
pub use light::*;
pub use world::*;
