//! Ready-made emitter configurations.
//!
//! Common effects as one-liners, each a plain [`EmitterConfig`] that can be
//! tweaked further:
//!
//! ```ignore
//! let mut config = presets::fire();
//! config.max_particles = 400;
//! let sim = ParticleSimulator::new(config, Vec2::new(320.0, 400.0));
//! ```
//!
//! Coordinates are y-down screen space, so an angle of 270° points up.

use glam::{Vec2, Vec4};

use crate::blend::BlendFactor;
use crate::config::{EmitterConfig, EmitterType};

/// Rising flames: warm additive particles that shrink and fade.
pub fn fire() -> EmitterConfig {
    EmitterConfig {
        max_particles: 300,
        life_span: 1.2,
        lifespan_variance: 0.4,
        angle: 270.0,
        angle_variance: 12.0,
        speed: 80.0,
        speed_variance: 20.0,
        source_position_variance: Vec2::new(12.0, 2.0),
        radial_acceleration: -20.0,
        tangential_acceleration: 0.0,
        start_color: Vec4::new(1.0, 0.75, 0.25, 0.9),
        start_color_variance: Vec4::new(0.0, 0.1, 0.1, 0.1),
        end_color: Vec4::new(0.8, 0.1, 0.0, 0.0),
        start_size: 40.0,
        start_size_variance: 8.0,
        end_size: 10.0,
        blend_func_source: BlendFactor::SrcAlpha,
        blend_func_destination: BlendFactor::One,
        ..Default::default()
    }
}

/// Water fountain: particles shot upwards that arc down under gravity.
pub fn fountain() -> EmitterConfig {
    EmitterConfig {
        max_particles: 400,
        life_span: 2.0,
        lifespan_variance: 0.3,
        angle: 270.0,
        angle_variance: 10.0,
        speed: 300.0,
        speed_variance: 40.0,
        gravity: Vec2::new(0.0, 350.0),
        start_color: Vec4::new(0.7, 0.85, 1.0, 1.0),
        end_color: Vec4::new(0.2, 0.4, 0.8, 0.0),
        start_size: 12.0,
        end_size: 6.0,
        ..Default::default()
    }
}

/// One-shot burst of sparks that emits for a fraction of a second.
pub fn sparks() -> EmitterConfig {
    EmitterConfig {
        max_particles: 120,
        life_span: 0.6,
        lifespan_variance: 0.2,
        duration: 0.15,
        angle: 0.0,
        angle_variance: 180.0,
        speed: 260.0,
        speed_variance: 80.0,
        gravity: Vec2::new(0.0, 400.0),
        tangential_acceleration: 0.0,
        tangential_accel_variance: 120.0,
        start_color: Vec4::new(1.0, 1.0, 0.8, 1.0),
        end_color: Vec4::new(1.0, 0.3, 0.0, 0.0),
        start_size: 8.0,
        end_size: 0.0,
        rotation_start: 0.0,
        rotation_end: 720.0,
        rotation_end_variance: 180.0,
        blend_func_source: BlendFactor::SrcAlpha,
        blend_func_destination: BlendFactor::One,
        ..Default::default()
    }
}

/// Radial swirl: particles spiral outwards from the emitter.
pub fn vortex() -> EmitterConfig {
    EmitterConfig {
        emitter_type: EmitterType::Radial,
        max_particles: 250,
        life_span: 2.5,
        lifespan_variance: 0.5,
        angle: 0.0,
        angle_variance: 180.0,
        min_radius: 4.0,
        min_radius_variance: 2.0,
        max_radius: 140.0,
        max_radius_variance: 20.0,
        rotate_per_second: 120.0,
        rotate_per_second_variance: 30.0,
        start_color: Vec4::new(0.5, 0.3, 1.0, 1.0),
        end_color: Vec4::new(0.1, 0.8, 1.0, 0.0),
        start_size: 16.0,
        end_size: 4.0,
        ..Default::default()
    }
}

/// Look up a preset by name.
pub fn by_name(name: &str) -> Option<EmitterConfig> {
    match name {
        "fire" => Some(fire()),
        "fountain" => Some(fountain()),
        "sparks" => Some(sparks()),
        "vortex" => Some(vortex()),
        _ => None,
    }
}

/// Names accepted by [`by_name`].
pub const NAMES: [&str; 4] = ["fire", "fountain", "sparks", "vortex"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_usable() {
        for name in NAMES {
            let config = by_name(name).unwrap();
            assert!(config.diagnostics().is_empty(), "{name} has diagnostics");
            assert!(config.emission_rate() > 0.0);
        }
    }

    #[test]
    fn test_unknown_preset() {
        assert!(by_name("smoke").is_none());
    }

    #[test]
    fn test_sparks_is_finite() {
        assert!(!sparks().is_infinite());
        assert!(fire().is_infinite());
    }
}
