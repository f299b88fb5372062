//! Blend factor hints carried by an emitter config.
//!
//! The simulator never looks at these values; they are passed through to
//! whatever renderer draws the particles. Emitter files store them as the
//! numeric OpenGL constants, so that is also how they serialize.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Source or destination factor of a blend equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    /// `GL_ZERO`
    Zero,
    /// `GL_ONE`
    One,
    /// `GL_SRC_COLOR`
    SrcColor,
    /// `GL_ONE_MINUS_SRC_COLOR`
    OneMinusSrcColor,
    /// `GL_SRC_ALPHA`
    SrcAlpha,
    /// `GL_ONE_MINUS_SRC_ALPHA`
    OneMinusSrcAlpha,
    /// `GL_DST_ALPHA`
    DstAlpha,
    /// `GL_ONE_MINUS_DST_ALPHA`
    OneMinusDstAlpha,
    /// `GL_DST_COLOR`
    DstColor,
    /// `GL_ONE_MINUS_DST_COLOR`
    OneMinusDstColor,
}

impl BlendFactor {
    /// Every factor, in GL constant order.
    pub const ALL: [BlendFactor; 10] = [
        BlendFactor::Zero,
        BlendFactor::One,
        BlendFactor::SrcColor,
        BlendFactor::OneMinusSrcColor,
        BlendFactor::SrcAlpha,
        BlendFactor::OneMinusSrcAlpha,
        BlendFactor::DstAlpha,
        BlendFactor::OneMinusDstAlpha,
        BlendFactor::DstColor,
        BlendFactor::OneMinusDstColor,
    ];

    /// Parse an OpenGL blend constant.
    pub fn from_gl(code: u32) -> Option<Self> {
        Some(match code {
            0 => BlendFactor::Zero,
            1 => BlendFactor::One,
            0x0300 => BlendFactor::SrcColor,
            0x0301 => BlendFactor::OneMinusSrcColor,
            0x0302 => BlendFactor::SrcAlpha,
            0x0303 => BlendFactor::OneMinusSrcAlpha,
            0x0304 => BlendFactor::DstAlpha,
            0x0305 => BlendFactor::OneMinusDstAlpha,
            0x0306 => BlendFactor::DstColor,
            0x0307 => BlendFactor::OneMinusDstColor,
            _ => return None,
        })
    }

    /// The OpenGL constant for this factor.
    pub fn to_gl(self) -> u32 {
        match self {
            BlendFactor::Zero => 0,
            BlendFactor::One => 1,
            BlendFactor::SrcColor => 0x0300,
            BlendFactor::OneMinusSrcColor => 0x0301,
            BlendFactor::SrcAlpha => 0x0302,
            BlendFactor::OneMinusSrcAlpha => 0x0303,
            BlendFactor::DstAlpha => 0x0304,
            BlendFactor::OneMinusDstAlpha => 0x0305,
            BlendFactor::DstColor => 0x0306,
            BlendFactor::OneMinusDstColor => 0x0307,
        }
    }
}

impl From<BlendFactor> for wgpu::BlendFactor {
    fn from(factor: BlendFactor) -> Self {
        match factor {
            BlendFactor::Zero => wgpu::BlendFactor::Zero,
            BlendFactor::One => wgpu::BlendFactor::One,
            BlendFactor::SrcColor => wgpu::BlendFactor::Src,
            BlendFactor::OneMinusSrcColor => wgpu::BlendFactor::OneMinusSrc,
            BlendFactor::SrcAlpha => wgpu::BlendFactor::SrcAlpha,
            BlendFactor::OneMinusSrcAlpha => wgpu::BlendFactor::OneMinusSrcAlpha,
            BlendFactor::DstAlpha => wgpu::BlendFactor::DstAlpha,
            BlendFactor::OneMinusDstAlpha => wgpu::BlendFactor::OneMinusDstAlpha,
            BlendFactor::DstColor => wgpu::BlendFactor::Dst,
            BlendFactor::OneMinusDstColor => wgpu::BlendFactor::OneMinusDst,
        }
    }
}

/// Build a wgpu blend state applying the same factors to colour and alpha.
pub fn blend_state(source: BlendFactor, destination: BlendFactor) -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: source.into(),
        dst_factor: destination.into(),
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}

fn serialize_gl<S: Serializer>(factor: &BlendFactor, s: S) -> Result<S::Ok, S::Error> {
    factor.to_gl().serialize(s)
}

fn deserialize_gl_or<'de, D: Deserializer<'de>>(
    d: D,
    fallback: BlendFactor,
) -> Result<BlendFactor, D::Error> {
    let code = u32::deserialize(d)?;
    Ok(BlendFactor::from_gl(code).unwrap_or_else(|| {
        log::warn!("unknown blend factor code {code:#x}, using {fallback:?}");
        fallback
    }))
}

/// Serde adapter for a source factor stored as its GL code.
/// Unknown codes fall back to `SrcAlpha`.
pub(crate) mod gl_source {
    use super::*;

    pub fn serialize<S: Serializer>(factor: &BlendFactor, s: S) -> Result<S::Ok, S::Error> {
        serialize_gl(factor, s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<BlendFactor, D::Error> {
        deserialize_gl_or(d, BlendFactor::SrcAlpha)
    }
}

/// Serde adapter for a destination factor stored as its GL code.
/// Unknown codes fall back to `OneMinusSrcAlpha`.
pub(crate) mod gl_destination {
    use super::*;

    pub fn serialize<S: Serializer>(factor: &BlendFactor, s: S) -> Result<S::Ok, S::Error> {
        serialize_gl(factor, s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<BlendFactor, D::Error> {
        deserialize_gl_or(d, BlendFactor::OneMinusSrcAlpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gl_codes_match_table() {
        for factor in BlendFactor::ALL {
            assert_eq!(BlendFactor::from_gl(factor.to_gl()), Some(factor));
        }
        assert_eq!(BlendFactor::SrcAlpha.to_gl(), 770);
        assert_eq!(BlendFactor::OneMinusSrcAlpha.to_gl(), 771);
    }

    #[test]
    fn test_unknown_gl_code() {
        assert_eq!(BlendFactor::from_gl(0x8001), None);
    }

    #[test]
    fn test_blend_state_alpha() {
        let state = blend_state(BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha);
        assert_eq!(state.color.src_factor, wgpu::BlendFactor::SrcAlpha);
        assert_eq!(state.color.dst_factor, wgpu::BlendFactor::OneMinusSrcAlpha);
        assert_eq!(state.alpha, state.color);
        assert_eq!(state.color.operation, wgpu::BlendOperation::Add);
    }

    #[test]
    fn test_blend_state_additive() {
        let state = blend_state(BlendFactor::SrcAlpha, BlendFactor::One);
        assert_eq!(state.color.dst_factor, wgpu::BlendFactor::One);
    }
}
