pub mod orientation;

pub use orientation::*;
