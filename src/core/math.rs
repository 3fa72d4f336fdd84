pub mod common;
pub mod interpolation;
pub mod transform;
