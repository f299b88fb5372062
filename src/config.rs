//! Declarative emitter configuration.
//!
//! An [`EmitterConfig`] describes how particles are emitted and how they
//! evolve over their lifetime. It is plain data: the simulator reads it when
//! spawning and integrating, and never writes to it.
//!
//! Configs serialize to JSON with the classic camelCase property names, so a
//! file looks like:
//!
//! ```json
//! {
//!   "emitterType": "gravity",
//!   "maxParticles": 200,
//!   "lifeSpan": 1.5,
//!   "angle": 270.0,
//!   "angleVariance": 15.0,
//!   "speed": 120.0,
//!   "blendFuncSource": 770,
//!   "blendFuncDestination": 1
//! }
//! ```
//!
//! Any field left out takes its value from [`EmitterConfig::default`].

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::blend::{self, BlendFactor};
use crate::color;
use crate::error::ConfigError;

/// Integration kinematics used by every particle of an emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmitterType {
    /// Velocity integrated under gravity plus radial/tangential acceleration.
    #[default]
    Gravity,
    /// Orbit around the emitter with an interpolated radius.
    Radial,
}

/// Emitter configuration.
///
/// Angles are in degrees, times in seconds, colours are RGBA with channels in
/// `[0, 1]`. Every `*_variance` field is a symmetric random perturbation
/// applied once when a particle spawns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmitterConfig {
    /// Which kinematics particles follow.
    pub emitter_type: EmitterType,

    /// Offset of the spawn point from the emitter position.
    pub source_position: Vec2,
    /// Per-axis jitter of the spawn point (gravity mode).
    pub source_position_variance: Vec2,

    /// Emission direction / initial orbital angle.
    pub angle: f32,
    pub angle_variance: f32,
    /// Initial speed (gravity mode).
    pub speed: f32,
    pub speed_variance: f32,

    // Gravity mode
    pub gravity: Vec2,
    pub radial_acceleration: f32,
    pub radial_accel_variance: f32,
    pub tangential_acceleration: f32,
    pub tangential_accel_variance: f32,

    // Radial mode
    /// Orbit radius at spawn.
    pub min_radius: f32,
    pub min_radius_variance: f32,
    /// Orbit radius at death.
    pub max_radius: f32,
    pub max_radius_variance: f32,
    /// Orbital angular speed in degrees per second.
    pub rotate_per_second: f32,
    pub rotate_per_second_variance: f32,

    // Quad self-rotation, both modes
    pub rotation_start: f32,
    pub rotation_start_variance: f32,
    pub rotation_end: f32,
    pub rotation_end_variance: f32,

    /// Particle lifetime. Must be positive for anything to be emitted.
    pub life_span: f32,
    pub lifespan_variance: f32,
    /// How long the emitter stays active after a restart. Negative means
    /// forever.
    pub duration: f32,

    pub start_color: Vec4,
    pub start_color_variance: Vec4,
    pub end_color: Vec4,
    pub end_color_variance: Vec4,

    pub start_size: f32,
    pub start_size_variance: f32,
    pub end_size: f32,
    pub end_size_variance: f32,

    /// Pool capacity. The emission rate is chosen so a full pool is exactly
    /// sustained: `max_particles / life_span` particles per second.
    pub max_particles: i32,

    /// Texture name or path, passed through to the renderer.
    pub texture: Option<String>,
    #[serde(with = "blend::gl_source")]
    pub blend_func_source: BlendFactor,
    #[serde(with = "blend::gl_destination")]
    pub blend_func_destination: BlendFactor,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            emitter_type: EmitterType::Gravity,
            source_position: Vec2::ZERO,
            source_position_variance: Vec2::ZERO,
            angle: 0.0,
            angle_variance: 360.0,
            speed: 100.0,
            speed_variance: 30.0,
            gravity: Vec2::ZERO,
            radial_acceleration: 0.0,
            radial_accel_variance: 0.0,
            tangential_acceleration: 0.0,
            tangential_accel_variance: 0.0,
            min_radius: 0.0,
            min_radius_variance: 0.0,
            max_radius: 100.0,
            max_radius_variance: 0.0,
            rotate_per_second: 0.0,
            rotate_per_second_variance: 0.0,
            rotation_start: 0.0,
            rotation_start_variance: 0.0,
            rotation_end: 0.0,
            rotation_end_variance: 0.0,
            life_span: 1.0,
            lifespan_variance: 0.0,
            duration: -1.0,
            start_color: color::WHITE,
            start_color_variance: Vec4::ZERO,
            end_color: color::WHITE,
            end_color_variance: Vec4::ZERO,
            start_size: 20.0,
            start_size_variance: 0.0,
            end_size: 20.0,
            end_size_variance: 0.0,
            max_particles: 100,
            texture: None,
            blend_func_source: BlendFactor::SrcAlpha,
            blend_func_destination: BlendFactor::OneMinusSrcAlpha,
        }
    }
}

impl EmitterConfig {
    /// Particles emitted per second, or 0 for a degenerate config.
    pub fn emission_rate(&self) -> f32 {
        if self.max_particles <= 0 || !(self.life_span > 0.0) {
            return 0.0;
        }
        self.max_particles as f32 / self.life_span
    }

    /// Pool capacity with negative values clamped to zero.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.max_particles.max(0) as usize
    }

    /// Whether the emitter runs until stopped explicitly.
    #[inline]
    pub fn is_infinite(&self) -> bool {
        self.duration < 0.0 || self.duration.is_nan()
    }

    /// The stop timer a fresh run starts with; `None` means no timeout.
    pub fn initial_time_until_stop(&self) -> Option<f32> {
        if self.is_infinite() {
            None
        } else {
            Some(self.duration)
        }
    }

    /// Blend state for the configured factor pair.
    pub fn blend_state(&self) -> wgpu::BlendState {
        blend::blend_state(self.blend_func_source, self.blend_func_destination)
    }

    /// Notes about settings that make the emitter produce nothing.
    ///
    /// An empty list means the config is usable. None of these are errors;
    /// the simulator runs either way.
    pub fn diagnostics(&self) -> Vec<String> {
        let mut notes = Vec::new();
        if self.max_particles <= 0 {
            notes.push(format!(
                "maxParticles is {}, no particles will be emitted",
                self.max_particles
            ));
        }
        if !(self.life_span > 0.0) {
            notes.push(format!(
                "lifeSpan is {}, no particles will be emitted",
                self.life_span
            ));
        }
        if self.duration == 0.0 {
            notes.push("duration is 0, the emitter stops on its first frame".to_string());
        }
        notes
    }

    /// Parse a config from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Self::from_json(&json)
    }

    /// Write the config to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| ConfigError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emission_rate() {
        let config = EmitterConfig {
            max_particles: 10,
            life_span: 2.0,
            ..Default::default()
        };
        assert_eq!(config.emission_rate(), 5.0);
    }

    #[test]
    fn test_degenerate_emission_rate() {
        let zero_life = EmitterConfig {
            life_span: 0.0,
            ..Default::default()
        };
        assert_eq!(zero_life.emission_rate(), 0.0);

        let negative_max = EmitterConfig {
            max_particles: -5,
            ..Default::default()
        };
        assert_eq!(negative_max.emission_rate(), 0.0);
        assert_eq!(negative_max.capacity(), 0);
        assert_eq!(negative_max.diagnostics().len(), 1);

        let nan_life = EmitterConfig {
            life_span: f32::NAN,
            ..Default::default()
        };
        assert_eq!(nan_life.emission_rate(), 0.0);
    }

    #[test]
    fn test_duration_sentinel() {
        let config = EmitterConfig::default();
        assert!(config.is_infinite());
        assert_eq!(config.initial_time_until_stop(), None);

        let finite = EmitterConfig {
            duration: 2.5,
            ..Default::default()
        };
        assert_eq!(finite.initial_time_until_stop(), Some(2.5));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EmitterConfig::from_json(
            r#"{ "emitterType": "radial", "maxParticles": 42, "blendFuncDestination": 1 }"#,
        )
        .unwrap();
        assert_eq!(config.emitter_type, EmitterType::Radial);
        assert_eq!(config.max_particles, 42);
        assert_eq!(config.blend_func_source, BlendFactor::SrcAlpha);
        assert_eq!(config.blend_func_destination, BlendFactor::One);
        assert_eq!(config.life_span, EmitterConfig::default().life_span);
    }

    #[test]
    fn test_unknown_blend_code_falls_back() {
        let config = EmitterConfig::from_json(r#"{ "blendFuncSource": 12345 }"#).unwrap();
        assert_eq!(config.blend_func_source, BlendFactor::SrcAlpha);
    }

    #[test]
    fn test_json_field_names() {
        let json = EmitterConfig::default().to_json().unwrap();
        assert!(json.contains("\"sourcePositionVariance\""));
        assert!(json.contains("\"lifespanVariance\""));
        assert!(json.contains("\"blendFuncSource\": 770"));
        assert!(json.contains("\"emitterType\": \"gravity\""));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("emitter.json");
        let config = EmitterConfig {
            emitter_type: EmitterType::Radial,
            max_radius: 64.0,
            texture: Some("spark.png".into()),
            ..Default::default()
        };
        config.save(&path).unwrap();
        assert_eq!(EmitterConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = EmitterConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_invalid_json() {
        let err = EmitterConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
