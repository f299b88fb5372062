//! Pool slot record for a single particle.
//!
//! Particles are owned by the [`ParticleSimulator`](crate::ParticleSimulator)
//! pool. Slots are reset in place when a particle spawns and flagged dead when
//! it expires; they are never allocated or freed individually.

use glam::{Vec2, Vec4};

/// Mode-specific kinematic state, chosen when the particle spawns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kinematics {
    /// Free flight under gravity and radial/tangential acceleration.
    Gravity {
        /// Where the particle spawned.
        start: Vec2,
        velocity: Vec2,
        radial_accel: f32,
        tangential_accel: f32,
    },
    /// Orbit around the emitter.
    Radial {
        /// Orbital angle in degrees.
        angle: f32,
        degrees_per_second: f32,
        radius: f32,
        /// Radius change per second.
        radius_delta: f32,
    },
}

impl Default for Kinematics {
    fn default() -> Self {
        Kinematics::Gravity {
            start: Vec2::ZERO,
            velocity: Vec2::ZERO,
            radial_accel: 0.0,
            tangential_accel: 0.0,
        }
    }
}

/// A particle pool slot.
#[derive(Debug, Clone, Default)]
pub struct Particle {
    pub(crate) alive: bool,
    pub(crate) position: Vec2,
    pub(crate) kinematics: Kinematics,
    /// Quad rotation in degrees.
    pub(crate) rotation: f32,
    pub(crate) rotation_delta: f32,
    pub(crate) color: Vec4,
    pub(crate) color_delta: Vec4,
    pub(crate) size: f32,
    pub(crate) size_delta: f32,
    pub(crate) time_to_live: f32,
    pub(crate) total_life: f32,
}

impl Particle {
    /// Whether this slot holds a live particle.
    #[inline]
    pub fn alive(&self) -> bool {
        self.alive
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.position.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.position.y
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Current RGBA tint, channels in `[0, 1]`.
    #[inline]
    pub fn color(&self) -> Vec4 {
        self.color
    }

    /// Current size in world units, never negative.
    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Quad rotation in degrees.
    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Quad rotation in radians.
    #[inline]
    pub fn rotation_radians(&self) -> f32 {
        self.rotation.to_radians()
    }

    #[inline]
    pub fn kinematics(&self) -> &Kinematics {
        &self.kinematics
    }

    /// Seconds left before the particle is retired.
    #[inline]
    pub fn time_to_live(&self) -> f32 {
        self.time_to_live
    }

    /// Lifetime drawn when the particle spawned.
    #[inline]
    pub fn total_life(&self) -> f32 {
        self.total_life
    }

    /// Elapsed fraction of the particle's life, in `[0, 1]`.
    pub fn life_fraction(&self) -> f32 {
        if self.total_life > 0.0 {
            (1.0 - self.time_to_live / self.total_life).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Current orbit radius for radial particles.
    pub fn radius(&self) -> Option<f32> {
        match self.kinematics {
            Kinematics::Radial { radius, .. } => Some(radius),
            Kinematics::Gravity { .. } => None,
        }
    }

    /// Current velocity for gravity particles.
    pub fn velocity(&self) -> Option<Vec2> {
        match self.kinematics {
            Kinematics::Gravity { velocity, .. } => Some(velocity),
            Kinematics::Radial { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_slot_is_dead() {
        let p = Particle::default();
        assert!(!p.alive());
        assert_eq!(p.life_fraction(), 1.0);
    }

    #[test]
    fn test_life_fraction() {
        let p = Particle {
            alive: true,
            time_to_live: 0.25,
            total_life: 1.0,
            ..Default::default()
        };
        assert!((p.life_fraction() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_mode_accessors() {
        let radial = Particle {
            kinematics: Kinematics::Radial {
                angle: 0.0,
                degrees_per_second: 90.0,
                radius: 5.0,
                radius_delta: 1.0,
            },
            ..Default::default()
        };
        assert_eq!(radial.radius(), Some(5.0));
        assert_eq!(radial.velocity(), None);
    }
}
