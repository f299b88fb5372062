//! # emitter2d - Gravity/Radial 2D Particle Emitters
//!
//! CPU simulation of short-lived sprite particles described by a declarative
//! emitter configuration, in the style of classic particle designer tools.
//!
//! The crate only simulates. A host owns a [`ParticleSimulator`], calls
//! [`simulate`](ParticleSimulator::simulate) once per frame and then reads the
//! particles to draw them however it likes.
//!
//! ## Quick Start
//!
//! ```
//! use emitter2d::prelude::*;
//!
//! let config = EmitterConfig {
//!     max_particles: 200,
//!     life_span: 1.5,
//!     angle: 270.0,
//!     angle_variance: 20.0,
//!     speed: 120.0,
//!     gravity: Vec2::new(0.0, 90.0),
//!     ..Default::default()
//! };
//!
//! let mut sim = ParticleSimulator::new(config, Vec2::new(320.0, 240.0));
//! let mut instances = Vec::new();
//! for _ in 0..60 {
//!     sim.simulate(1.0 / 60.0);
//!     sim.write_instances(&mut instances);
//!     // upload `instances` and draw
//! }
//! assert!(sim.alive_count() <= 200);
//! ```
//!
//! ## Core Concepts
//!
//! ### Emitter config
//!
//! [`EmitterConfig`] is a flat set of named values. Every `*_variance` field
//! perturbs its base value by `uniform(-variance, +variance)` when a particle
//! spawns. The emission rate is implicit: `max_particles / life_span`
//! particles per second, which exactly sustains a full pool.
//!
//! ### Emitter types
//!
//! | Type | Motion |
//! |------|--------|
//! | [`EmitterType::Gravity`] | velocity + gravity + radial/tangential acceleration |
//! | [`EmitterType::Radial`] | orbit around the emitter, radius going from `min_radius` to `max_radius` |
//!
//! Both modes interpolate colour, size and quad rotation linearly over each
//! particle's life.
//!
//! ### Pool
//!
//! The pool has `max_particles` slots, allocated once. Spawning resets the
//! first free slot in place; expiry flags the slot dead. Steady-state frames
//! never allocate.
//!
//! ### Lifecycle
//!
//! | Call | Effect |
//! |------|--------|
//! | [`ParticleSimulator::set_emitting`] | pause/resume spawning |
//! | [`ParticleSimulator::restart`] | kill every particle, restart the duration timer |
//! | [`ParticleSimulator::simulate_until_complete`] | stop spawning and step until empty |

pub mod blend;
pub mod color;
pub mod config;
pub mod error;
pub mod particle;
pub mod presets;
pub mod render;
pub mod simulator;
pub mod spawn;
pub mod time;

pub use blend::BlendFactor;
pub use bytemuck;
pub use config::{EmitterConfig, EmitterType};
pub use error::ConfigError;
pub use glam::{Vec2, Vec4};
pub use particle::{Kinematics, Particle};
pub use render::ParticleInstance;
pub use simulator::{EmitterState, ParticleSimulator};
pub use spawn::SpawnContext;
pub use time::Time;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use emitter2d::prelude::*;
/// ```
pub mod prelude {
    pub use crate::blend::BlendFactor;
    pub use crate::config::{EmitterConfig, EmitterType};
    pub use crate::particle::Particle;
    pub use crate::presets;
    pub use crate::render::ParticleInstance;
    pub use crate::simulator::{EmitterState, ParticleSimulator};
    pub use crate::time::Time;
    pub use crate::{Vec2, Vec4};
}
