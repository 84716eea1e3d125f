// Scene recipe constants shared by the host-side field reference and the
// WGSL fragment shader. These are artistic constants; keep both in sync.

pub const TAU: f32 = std::f32::consts::TAU;
pub const PI: f32 = std::f32::consts::PI;

// Raymarch integrator
pub const MAX_STEPS: u32 = 80;
pub const MAX_DIST: f32 = 50.0; // accumulated distance that counts as a miss
pub const SURF_DIST: f32 = 0.001; // |field| below this is a surface hit
pub const STEP_RELAXATION: f32 = 0.7; // under-relaxation of each step

// Field layout
pub const CORE_RADIUS: f32 = 0.8;
pub const SATELLITE_COUNT: usize = 6;
pub const SATELLITE_RADIUS: f32 = 0.5;
pub const RING_RADIUS: f32 = 2.1;
pub const RING_X_STRETCH: f32 = 1.1;
pub const SATELLITE_Y_OFFSETS: [f32; SATELLITE_COUNT] = [1.2, -1.0, 0.5, -0.5, 0.8, -0.8];
pub const BLEND_K: f32 = 0.3; // smooth-minimum blend radius

// Animation rates (radians per second)
pub const FRAME_SPIN_XZ: f32 = 0.08;
pub const FRAME_SPIN_XY: f32 = 0.06;
pub const CORE_SPIN_YZ: f32 = 0.1;
pub const ORBIT_RATE: f32 = 0.25;
pub const SATELLITE_SPIN: f32 = 0.4;

// Pointer influence on the field frame
pub const POINTER_SHIFT_XY: f32 = 0.4;
pub const POINTER_SHIFT_Z: f32 = 0.2;
pub const POINTER_TILT_XZ: f32 = 0.2;
pub const POINTER_TILT_XY: f32 = 0.15;

// Normal estimation
pub const NORMAL_EPS: f32 = 0.001;

// Camera
pub const CAMERA_Z: f32 = 5.5;
pub const CAMERA_POINTER_SCALE: f32 = 0.6;
pub const CAMERA_POINTER_OFFSET: f32 = 1.5;
pub const CAMERA_POINTER_TILT: f32 = 0.25;

// Glass
pub const IOR: f32 = 1.52;
pub const DISPERSION: f32 = 0.15; // index spread between R/G/B exit rays
pub const INNER_OFFSET: f32 = 0.01; // inward nudge before the refracted march
