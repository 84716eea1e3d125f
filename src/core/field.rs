// Host-side reference of the metaball distance field and its raymarcher.
//
// Mirrors `map`, `get_normal` and `raymarch` in `shaders/metaball.wgsl`
// one-to-one so the numeric recipe can be exercised without a GPU.

use super::constants::*;
use glam::{Vec2, Vec3};

/// Inputs the field depends on besides the sample point.
#[derive(Clone, Copy, Debug)]
pub struct FieldParams {
    /// Seconds since the effect started (`uTime`).
    pub time: f32,
    /// Smoothed pointer in \[0, 1\]² with y up (`uMouse`).
    pub mouse: Vec2,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            time: 0.0,
            mouse: Vec2::splat(0.5),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarchResult {
    /// Distance travelled along the ray.
    pub t: f32,
    /// Integration steps actually taken.
    pub steps: u32,
}

impl MarchResult {
    #[inline]
    pub fn hit(&self) -> bool {
        self.t < MAX_DIST
    }
}

/// 2D rotation matching GLSL `v * mat2(c, -s, s, c)`.
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (s, c) = angle.sin_cos();
    Vec2::new(c * v.x - s * v.y, s * v.x + c * v.y)
}

#[inline]
pub fn sd_sphere(p: Vec3, r: f32) -> f32 {
    p.length() - r
}

/// Polynomial smooth minimum with blend radius `k`.
#[inline]
pub fn smin(a: f32, b: f32, k: f32) -> f32 {
    let h = (0.5 + 0.5 * (b - a) / k).clamp(0.0, 1.0);
    mix(b, a, h) - k * h * (1.0 - h)
}

#[inline]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Pointer remapped from \[0, 1\]² to \[-1, 1\]².
#[inline]
fn pointer_offset(mouse: Vec2) -> Vec2 {
    (mouse - Vec2::splat(0.5)) * 2.0
}

/// Transform a world point into the animated field frame.
pub fn field_frame(mut p: Vec3, params: &FieldParams) -> Vec3 {
    let m = pointer_offset(params.mouse);
    let t = params.time;
    p.x += m.x * POINTER_SHIFT_XY;
    p.y += m.y * POINTER_SHIFT_XY;
    p.z += m.y * POINTER_SHIFT_Z;

    let xz = rotate(Vec2::new(p.x, p.z), t * FRAME_SPIN_XZ + m.x * POINTER_TILT_XZ);
    p.x = xz.x;
    p.z = xz.y;
    let xy = rotate(Vec2::new(p.x, p.y), t * FRAME_SPIN_XY + m.y * POINTER_TILT_XY);
    p.x = xy.x;
    p.y = xy.y;
    p
}

/// Centre of satellite `i` in the field frame at time `t`.
pub fn satellite_center(i: usize, t: f32) -> Vec3 {
    let angle = i as f32 * TAU / SATELLITE_COUNT as f32 + t * ORBIT_RATE;
    Vec3::new(
        angle.cos() * RING_RADIUS * RING_X_STRETCH,
        SATELLITE_Y_OFFSETS[i % SATELLITE_COUNT],
        angle.sin() * RING_RADIUS,
    )
}

/// Core sphere distance for a point already in the field frame.
pub fn core_distance(p: Vec3, t: f32) -> f32 {
    let yz = rotate(Vec2::new(p.y, p.z), t * CORE_SPIN_YZ);
    sd_sphere(Vec3::new(p.x, yz.x, yz.y), CORE_RADIUS)
}

/// Satellite `i` distance for a point already in the field frame.
pub fn satellite_distance(p: Vec3, i: usize, t: f32) -> f32 {
    let po = p - satellite_center(i, t);
    let xy = rotate(Vec2::new(po.x, po.y), t * SATELLITE_SPIN + i as f32);
    sd_sphere(Vec3::new(xy.x, xy.y, po.z), SATELLITE_RADIUS)
}

/// Blend of the core and all satellites for a point in the field frame.
pub fn blended_distance(p: Vec3, t: f32) -> f32 {
    (0..SATELLITE_COUNT).fold(core_distance(p, t), |d, i| {
        smin(d, satellite_distance(p, i, t), BLEND_K)
    })
}

/// Scene distance at world point `p`.
pub fn map(p: Vec3, params: &FieldParams) -> f32 {
    blended_distance(field_frame(p, params), params.time)
}

/// Surface normal from a 6-tap central difference of the field.
pub fn normal(p: Vec3, params: &FieldParams) -> Vec3 {
    let ex = Vec3::new(NORMAL_EPS, 0.0, 0.0);
    let ey = Vec3::new(0.0, NORMAL_EPS, 0.0);
    let ez = Vec3::new(0.0, 0.0, NORMAL_EPS);
    Vec3::new(
        map(p + ex, params) - map(p - ex, params),
        map(p + ey, params) - map(p - ey, params),
        map(p + ez, params) - map(p - ez, params),
    )
    .normalize_or_zero()
}

/// Sphere-trace from `ro` along `rd` (expected unit length).
pub fn raymarch(ro: Vec3, rd: Vec3, params: &FieldParams) -> MarchResult {
    let mut t = 0.0;
    let mut steps = 0;
    while steps < MAX_STEPS {
        let d = map(ro + rd * t, params);
        if d.abs() < SURF_DIST || t > MAX_DIST {
            break;
        }
        t += d * STEP_RELAXATION;
        steps += 1;
    }
    MarchResult { t, steps }
}
