mod common;
mod gpu;
mod image;
mod ops;
mod params;
mod renderer;

pub mod prelude;

pub use prelude::*;
