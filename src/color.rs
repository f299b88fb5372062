//! RGBA colour helpers.
//!
//! Colours are `Vec4` values with every channel in `[0, 1]`, in `(r, g, b, a)`
//! order. Channels are always clamped independently so a large variance on one
//! channel never bleeds into another.

use glam::Vec4;

/// Opaque white.
pub const WHITE: Vec4 = Vec4::ONE;

/// Clamp every channel to `[0, 1]`.
///
/// NaN channels collapse to 0 so a broken colour can never escape the legal
/// range.
#[inline]
pub fn clamp_channels(color: Vec4) -> Vec4 {
    Vec4::new(
        clamp_unit(color.x),
        clamp_unit(color.y),
        clamp_unit(color.z),
        clamp_unit(color.w),
    )
}

#[inline]
fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_channels_independent() {
        let c = clamp_channels(Vec4::new(-0.5, 0.5, 1.7, f32::NAN));
        assert_eq!(c, Vec4::new(0.0, 0.5, 1.0, 0.0));
    }
}
