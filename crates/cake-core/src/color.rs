use crate::constants::PASTEL_BASE;
use glam::Vec3;
use rand::Rng;

/// Light wax color: every channel uniform in `[PASTEL_BASE, 255]`.
pub fn pastel_color<R: Rng + ?Sized>(rng: &mut R) -> [u8; 3] {
    [
        rng.gen_range(PASTEL_BASE..=u8::MAX),
        rng.gen_range(PASTEL_BASE..=u8::MAX),
        rng.gen_range(PASTEL_BASE..=u8::MAX),
    ]
}

#[inline]
pub fn hex_to_rgb(hex: u32) -> Vec3 {
    rgb8_to_vec3([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8])
}

#[inline]
pub fn rgb8_to_vec3(rgb: [u8; 3]) -> Vec3 {
    Vec3::new(rgb[0] as f32, rgb[1] as f32, rgb[2] as f32) / 255.0
}

#[inline]
pub fn lerp_rgb(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Decode one sRGB channel in [0, 1] to linear light.
#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
pub fn srgb_to_linear_vec3(c: Vec3) -> Vec3 {
    Vec3::new(srgb_to_linear(c.x), srgb_to_linear(c.y), srgb_to_linear(c.z))
}
