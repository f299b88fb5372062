//! Render-facing particle data.
//!
//! A renderer reads the simulator only between `simulate` calls. The cheapest
//! way to do that is to copy the live particles into a flat instance buffer
//! that can be uploaded as-is.

use bytemuck::{Pod, Zeroable};

use crate::particle::Particle;

/// Per-particle instance record for a textured-quad renderer.
///
/// Layout is `#[repr(C)]` with no padding, 32 bytes per particle.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    /// Quad centre.
    pub position: [f32; 2],
    /// Quad edge length in world units.
    pub size: f32,
    /// Quad rotation in radians.
    pub rotation: f32,
    /// RGBA tint.
    pub color: [f32; 4],
}

impl From<&Particle> for ParticleInstance {
    fn from(p: &Particle) -> Self {
        Self {
            position: p.position().to_array(),
            size: p.size(),
            rotation: p.rotation_radians(),
            color: p.color().to_array(),
        }
    }
}

impl ParticleInstance {
    /// Vertex attributes matching this layout, for `wgpu::VertexStepMode::Instance`.
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32,
        2 => Float32,
        3 => Float32x4
    ];

    /// Buffer layout for an instance buffer of these records.
    pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Replace `out` with one instance per alive particle, reusing its capacity.
pub fn write_instances<'a>(
    particles: impl IntoIterator<Item = &'a Particle>,
    out: &mut Vec<ParticleInstance>,
) {
    out.clear();
    out.extend(
        particles
            .into_iter()
            .filter(|p| p.alive())
            .map(ParticleInstance::from),
    );
}
