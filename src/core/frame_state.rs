use glam::Vec2;

/// Fraction of the remaining distance the smoothed pointer covers per frame.
pub const POINTER_SMOOTHING: f32 = 0.08;

/// Per-frame animation inputs. Lives for the lifetime of the page.
#[derive(Clone, Copy, Debug)]
pub struct FrameState {
    pub elapsed_time: f32,
    /// Latest pointer position in \[0, 1\]², y up.
    pub pointer: Vec2,
    pub smoothed_pointer: Vec2,
}

impl Default for FrameState {
    fn default() -> Self {
        Self {
            elapsed_time: 0.0,
            pointer: Vec2::splat(0.5),
            smoothed_pointer: Vec2::splat(0.5),
        }
    }
}

impl FrameState {
    pub fn set_pointer(&mut self, pointer: Vec2) {
        self.pointer = pointer;
    }

    /// Advance one frame: record the elapsed time and ease the smoothed
    /// pointer toward the target.
    pub fn advance(&mut self, elapsed_time: f32) {
        self.elapsed_time = elapsed_time;
        self.smoothed_pointer += (self.pointer - self.smoothed_pointer) * POINTER_SMOOTHING;
    }
}

/// Canvas backing size in device pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewportState {
    pub width: u32,
    pub height: u32,
}

impl ViewportState {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn resolution(&self) -> [f32; 2] {
        [self.width as f32, self.height as f32]
    }
}

/// Map a client-space position to the shader's pointer space: \[0, 1\]²
/// relative to `rect`, with y flipped so 1 is the top edge.
///
/// Positions outside the rect are passed through unclamped.
pub fn pointer_from_client(
    client: Vec2,
    rect_origin: Vec2,
    rect_size: Vec2,
) -> Option<Vec2> {
    if rect_size.x <= 0.0 || rect_size.y <= 0.0 {
        return None;
    }
    let local = (client - rect_origin) / rect_size;
    Some(Vec2::new(local.x, 1.0 - local.y))
}

/// Uniform block consumed by `shaders/metaball.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MetaballUniforms {
    pub resolution: [f32; 2],
    pub mouse: [f32; 2],
    pub time: f32,
    pub _pad0: f32,
    pub _pad1: [f32; 2],
}

impl MetaballUniforms {
    pub fn new(frame: &FrameState, viewport: &ViewportState) -> Self {
        Self {
            resolution: viewport.resolution(),
            mouse: frame.smoothed_pointer.to_array(),
            time: frame.elapsed_time,
            _pad0: 0.0,
            _pad1: [0.0; 2],
        }
    }
}
