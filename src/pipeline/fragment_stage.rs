use crate::core::geometry::Fragment;
use crate::core::math::common::normalize_or_zero;
use crate::scene::light::Light;
use crate::scene::texture::{Texture, WrapMode};
use nalgebra::Vector4;

/// Brightness floor applied regardless of orientation.
pub const AMBIENT: f64 = 0.2;
/// Weight of the Lambert term.
pub const DIFFUSE_WEIGHT: f64 = 0.8;

/// Shades a fragment with the bound texture (repeat wrapping) or opaque white.
pub fn shade_fragment(
    fragment: &Fragment,
    texture: Option<&Texture>,
    light: &Light,
) -> Vector4<f64> {
    shade_fragment_with_wrap(fragment, texture, light, WrapMode::Repeat)
}

/// `rgb = base.rgb * (0.2 + 0.8 * max(0, n . l) * intensity) * light.color`, alpha from
/// the base colour. A zero normal gets only the ambient floor.
pub fn shade_fragment_with_wrap(
    fragment: &Fragment,
    texture: Option<&Texture>,
    light: &Light,
    wrap_mode: WrapMode,
) -> Vector4<f64> {
    let base_color = match texture {
        Some(texture) => texture.sample(fragment.uv.x, fragment.uv.y, wrap_mode),
        None => Vector4::new(1.0, 1.0, 1.0, 1.0),
    };

    let normal = normalize_or_zero(&fragment.normal);
    let diffuse = normal.dot(&light.direction).max(0.0) * light.intensity;
    let brightness = AMBIENT + diffuse * DIFFUSE_WEIGHT;

    Vector4::new(
        base_color.x * brightness * light.color.x,
        base_color.y * brightness * light.color.y,
        base_color.z * brightness * light.color.z,
        base_color.w,
    )
}
