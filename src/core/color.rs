use nalgebra::Vector4;

/// Converts a unit-range channel to an 8-bit value: `round(c * 255)`, clamped into [0, 255].
/// NaN maps to 0.
#[inline]
pub fn unit_to_byte(c: f64) -> u8 {
    (c * 255.0).round().clamp(0.0, 255.0) as u8
}

#[inline]
pub fn byte_to_unit(b: u8) -> f64 {
    b as f64 / 255.0
}

/// Packs an RGBA colour with channels in [0, 1] into four bytes.
#[inline]
pub fn to_rgba8(color: &Vector4<f64>) -> [u8; 4] {
    [
        unit_to_byte(color.x),
        unit_to_byte(color.y),
        unit_to_byte(color.z),
        unit_to_byte(color.w),
    ]
}

#[inline]
pub fn from_rgba8(bytes: &[u8]) -> Vector4<f64> {
    Vector4::new(
        byte_to_unit(bytes[0]),
        byte_to_unit(bytes[1]),
        byte_to_unit(bytes[2]),
        byte_to_unit(bytes[3]),
    )
}
