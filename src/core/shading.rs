// Host-side reference of the glass shading stage.
//
// `shade_pixel` reproduces `fs_main` in `shaders/metaball.wgsl`: primary
// march, refraction with R/G/B dispersion, specular, Fresnel/edge/subsurface
// tints and the final grade. Only used for tests and offline inspection.

use super::constants::*;
use super::field::{normal, raymarch, rotate, FieldParams};
use glam::{Vec2, Vec3, Vec4};

const PINK: Vec3 = Vec3::new(0.95, 0.6, 0.75);
const SKY: Vec3 = Vec3::new(0.5, 0.75, 0.9);
const YELLOW: Vec3 = Vec3::new(0.95, 0.85, 0.6);
const CREAM: Vec3 = Vec3::new(0.9, 0.88, 0.8);

#[inline]
pub fn smoothstep(e0: f32, e1: f32, x: f32) -> f32 {
    let t = ((x - e0) / (e1 - e0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn mix3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

#[inline]
fn pow3(v: Vec3, e: f32) -> Vec3 {
    Vec3::new(v.x.powf(e), v.y.powf(e), v.z.powf(e))
}

/// GLSL/WGSL `refract`; returns zero on total internal reflection.
pub fn refract(i: Vec3, n: Vec3, eta: f32) -> Vec3 {
    let ndi = n.dot(i);
    let k = 1.0 - eta * eta * (1.0 - ndi * ndi);
    if k < 0.0 {
        Vec3::ZERO
    } else {
        eta * i - (eta * ndi + k.sqrt()) * n
    }
}

/// Procedural sky gradient sampled by direction.
pub fn background(rd: Vec3) -> Vec3 {
    let y_pos = rd.y * 0.5 + 0.5;
    let x_pos = rd.x.atan2(rd.z) / TAU + 0.5;

    let top_pink = Vec3::new(1.0, 0.9, 0.95);
    let top_yellow = Vec3::new(1.0, 0.98, 0.95);
    let top = mix3(top_pink, top_yellow, smoothstep(0.3, 0.7, x_pos));

    let middle_white = Vec3::ONE;
    let middle_sky = Vec3::new(0.9, 0.95, 1.0);
    let middle = mix3(middle_white, middle_sky, smoothstep(0.5, 0.8, y_pos));

    let bottom_sky = Vec3::new(0.85, 0.92, 1.0);
    let bottom_sky_darker = Vec3::new(0.8, 0.9, 1.0);
    let bottom = mix3(bottom_sky, bottom_sky_darker, smoothstep(0.3, 0.7, x_pos));

    let low = smoothstep(0.6, 1.0, 1.0 - y_pos);
    let bottom_left = mix3(
        bottom,
        Vec3::new(1.0, 0.98, 0.95),
        smoothstep(0.0, 0.3, x_pos) * low,
    );
    let bottom_right = mix3(
        bottom_left,
        Vec3::new(1.0, 0.9, 0.95),
        smoothstep(0.7, 1.0, x_pos) * low,
    );

    if y_pos > 0.65 {
        mix3(top, middle, smoothstep(0.65, 0.85, y_pos))
    } else if y_pos > 0.45 {
        mix3(middle, bottom_right, smoothstep(0.45, 0.65, y_pos))
    } else {
        bottom_right
    }
}

/// Palette keyed by a horizontal angle in \[-1, 1\] and a height in \[-1, 1\].
fn angle_palette(angle: f32, height: f32) -> Vec3 {
    let by_angle = mix3(PINK, SKY, angle * 0.5 + 0.5);
    let by_height = mix3(YELLOW, CREAM, height * 0.5 + 0.5);
    mix3(by_angle, by_height, 0.5)
}

/// Primary camera ray for a pixel. `frag_coord` has its origin at the
/// bottom-left of the target.
pub fn camera_ray(frag_coord: Vec2, resolution: Vec2, mouse: Vec2) -> (Vec3, Vec3, Vec2) {
    let uv = (frag_coord - 0.5 * resolution) / resolution.x.min(resolution.y);
    let m = (mouse - Vec2::splat(0.5)) * CAMERA_POINTER_SCALE;
    let ro = Vec3::new(
        m.x * CAMERA_POINTER_OFFSET,
        m.y * CAMERA_POINTER_OFFSET,
        CAMERA_Z,
    );
    let mut rd = Vec3::new(uv.x, uv.y, -1.0).normalize();
    let xy = rotate(Vec2::new(rd.x, rd.y), m.x * CAMERA_POINTER_TILT);
    rd.x = xy.x;
    rd.y = xy.y;
    let yz = rotate(Vec2::new(rd.y, rd.z), m.y * CAMERA_POINTER_TILT);
    rd.y = yz.x;
    rd.z = yz.y;
    (ro, rd, uv)
}

/// Colour seen through the glass after one refraction into the blob.
fn refraction_color(p: Vec3, n: Vec3, rd: Vec3, params: &FieldParams) -> Vec3 {
    let refract_dir = refract(rd, n, 1.0 / IOR);
    if refract_dir.length() <= 0.0 {
        return Vec3::ZERO;
    }
    let inner_origin = p - n * INNER_OFFSET;
    let inner = raymarch(inner_origin, refract_dir, params);
    if !inner.hit() {
        let bg = background(refract_dir);
        return mix3(bg * 1.2, CREAM, 0.3);
    }

    let p2 = inner_origin + refract_dir * inner.t;
    let n2 = normal(p2, params);
    let r = refract(refract_dir, -n2, IOR - DISPERSION);
    let g = refract(refract_dir, -n2, IOR);
    let b = refract(refract_dir, -n2, IOR + DISPERSION);

    let base = angle_palette(n2.x.atan2(n2.z) / PI, n2.y);

    let bg_r = background(r);
    let bg_g = background(g);
    let bg_b = background(b);
    let prism = Vec3::new(
        bg_r.x * 0.3 + bg_g.x * 0.2 + bg_b.x * 0.2,
        bg_r.y * 0.2 + bg_g.y * 0.3 + bg_b.y * 0.2,
        bg_r.z * 0.2 + bg_g.z * 0.2 + bg_b.z * 0.3,
    );

    pow3(mix3(base, prism, 0.3), 0.9) * 1.5
}

/// Shade a single pixel. Returns straight (non-premultiplied) RGBA; a miss
/// is fully transparent.
pub fn shade_pixel(frag_coord: Vec2, resolution: Vec2, params: &FieldParams) -> Vec4 {
    let (ro, rd, uv) = camera_ray(frag_coord, resolution, params.mouse);
    let primary = raymarch(ro, rd, params);
    if !primary.hit() {
        return Vec4::ZERO;
    }

    let p = ro + rd * primary.t;
    let n = normal(p, params);
    let view_dir = (ro - p).normalize();
    let fresnel = (1.0 - view_dir.dot(n).max(0.0)).powf(3.0);

    let mut color = refraction_color(p, n, rd, params);

    let light_dir = Vec3::new(1.0, 1.2, -0.8).normalize();
    let half_dir = (light_dir + view_dir).normalize();
    let spec = n.dot(half_dir).max(0.0).powf(120.0);
    color += spec * Vec3::new(0.95, 0.9, 0.85) * 1.8;

    let normal_angle = n.x.atan2(n.z) / PI;
    let fresnel_a = mix3(
        Vec3::new(0.95, 0.7, 0.8),
        Vec3::new(0.6, 0.8, 0.95),
        normal_angle * 0.5 + 0.5,
    );
    let fresnel_b = mix3(
        Vec3::new(0.95, 0.85, 0.7),
        Vec3::new(0.9, 0.88, 0.8),
        n.y * 0.5 + 0.5,
    );
    color += fresnel * mix3(fresnel_a, fresnel_b, fresnel) * 0.5;

    let edge = (1.0 - view_dir.dot(n).abs()).powf(3.0);
    let edge_color = mix3(
        Vec3::new(0.6, 0.75, 0.9),
        Vec3::new(0.9, 0.75, 0.85),
        normal_angle * 0.5 + 0.5,
    );
    color += edge * edge_color * 0.4;

    let sss = (-n).dot(light_dir).max(0.0).powf(1.5);
    let sss_color = mix3(
        Vec3::new(0.9, 0.7, 0.8),
        Vec3::new(0.95, 0.85, 0.8),
        n.y * 0.5 + 0.5,
    );
    color += sss * sss_color * 0.3;

    let base = angle_palette(p.x.atan2(p.z) / PI, p.y * 0.3);
    color = mix3(color, base, 0.25);

    let vignette = smoothstep(0.4, 1.0, 1.0 - uv.length() * 0.3);
    color *= vignette;
    color *= Vec3::new(0.95, 0.96, 0.97);
    color = pow3(color, 0.95);
    color *= 0.9;
    color = mix3(color, Vec3::new(0.85, 0.83, 0.8), 0.1);
    color = color.clamp(Vec3::ZERO, Vec3::ONE);

    color.extend(1.0)
}
