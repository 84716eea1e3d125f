pub mod constants;
pub mod field;
pub mod frame_state;
pub mod shading;
pub mod snap;
pub mod surface;

pub use frame_state::*;

// Shader bundled as a string constant
pub static METABALL_WGSL: &str = include_str!("../../shaders/metaball.wgsl");
