pub mod camera;
pub mod context;
pub mod light;
pub mod model;
pub mod texture;
pub mod utils;
