//! Frame-stepped particle simulator.
//!
//! [`ParticleSimulator`] owns an [`EmitterConfig`], a fixed-capacity pool of
//! [`Particle`] slots and the emitter run state. The host calls
//! [`simulate`](ParticleSimulator::simulate) once per frame and reads the pool
//! in between.
//!
//! # Frame order
//!
//! 1. Advance the stop timer; stop emitting once it runs out.
//! 2. Age every live particle, retiring the expired ones and integrating the
//!    rest.
//! 3. Spawn into free slots according to the emission rate.
//!
//! Particles spawned during a frame are first integrated on the next frame,
//! and slots freed during a frame can be reused by that same frame's spawns.
//! With `emission_rate * life_span == max_particles` this keeps a full pool
//! full.

use glam::{Vec2, Vec4};

use crate::config::{EmitterConfig, EmitterType};
use crate::particle::{Kinematics, Particle};
use crate::render::{self, ParticleInstance};
use crate::spawn::SpawnContext;

/// Gravity-mode distance below which a particle has no usable radial
/// direction.
const MIN_RADIAL_DISTANCE: f32 = 0.01;

/// Coarse emitter state derived from the run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitterState {
    /// Not emitting by request; live particles keep aging.
    Idle,
    /// Spawning new particles.
    Emitting,
    /// The configured duration ran out; live particles keep aging.
    Draining,
}

/// Simulates one emitter and its particle pool.
#[derive(Debug, Clone)]
pub struct ParticleSimulator {
    config: EmitterConfig,
    emitter_pos: Vec2,
    pool: Vec<Particle>,
    spawner: SpawnContext,
    emitting: bool,
    time_until_stop: Option<f32>,
    emit_counter: f32,
    elapsed_time: f32,
    alive_count: usize,
}

impl ParticleSimulator {
    /// Create a simulator with an entropy-seeded random source.
    ///
    /// The pool is sized to the config's `max_particles` and the simulator
    /// starts emitting with the configured duration.
    pub fn new(config: EmitterConfig, emitter_pos: Vec2) -> Self {
        Self::with_spawner(config, emitter_pos, SpawnContext::from_entropy())
    }

    /// Create a simulator whose random draws are reproducible.
    pub fn with_seed(config: EmitterConfig, emitter_pos: Vec2, seed: u64) -> Self {
        Self::with_spawner(config, emitter_pos, SpawnContext::seeded(seed))
    }

    fn with_spawner(config: EmitterConfig, emitter_pos: Vec2, spawner: SpawnContext) -> Self {
        for note in config.diagnostics() {
            log::warn!("emitter config: {note}");
        }
        let pool = vec![Particle::default(); config.capacity()];
        let time_until_stop = config.initial_time_until_stop();
        Self {
            config,
            emitter_pos,
            pool,
            spawner,
            emitting: true,
            time_until_stop,
            emit_counter: 0.0,
            elapsed_time: 0.0,
            alive_count: 0,
        }
    }

    // ========== Configuration ==========

    #[inline]
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Mutable access to the config.
    ///
    /// Edits apply to particles spawned afterwards. Changing `max_particles`
    /// changes the emission rate and the spawn limit immediately, but the pool
    /// is only re-sized on the next [`restart`](Self::restart). Particles
    /// already alive above a lowered limit live out their lifetime.
    #[inline]
    pub fn config_mut(&mut self) -> &mut EmitterConfig {
        &mut self.config
    }

    #[inline]
    pub fn emitter_pos(&self) -> Vec2 {
        self.emitter_pos
    }

    /// Move the emitter. Future spawns start here, and radial particles
    /// already alive orbit the new position from the next frame on.
    #[inline]
    pub fn set_emitter_pos(&mut self, pos: Vec2) {
        self.emitter_pos = pos;
    }

    // ========== Run state ==========

    #[inline]
    pub fn emitting(&self) -> bool {
        self.emitting
    }

    /// Pause or resume spawning without touching live particles.
    ///
    /// Resuming after the stop timer has run out has no lasting effect; the
    /// next frame stops emission again. Use [`restart`](Self::restart) or
    /// [`set_time_until_stop`](Self::set_time_until_stop) for that.
    #[inline]
    pub fn set_emitting(&mut self, emitting: bool) {
        self.emitting = emitting;
    }

    /// Seconds of emission left, `None` if the emitter never times out.
    #[inline]
    pub fn time_until_stop(&self) -> Option<f32> {
        self.time_until_stop
    }

    /// Override the stop timer for the current run.
    #[inline]
    pub fn set_time_until_stop(&mut self, time: Option<f32>) {
        self.time_until_stop = time;
    }

    /// Seconds simulated since construction or the last restart.
    #[inline]
    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time
    }

    /// Fractional number of particles owed to the pool.
    #[inline]
    pub fn emit_counter(&self) -> f32 {
        self.emit_counter
    }

    /// Number of live particles.
    #[inline]
    pub fn alive_count(&self) -> usize {
        self.alive_count
    }

    #[inline]
    pub fn any_alive(&self) -> bool {
        self.alive_count > 0
    }

    /// Number of pool slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.pool.len()
    }

    pub fn state(&self) -> EmitterState {
        if self.emitting {
            EmitterState::Emitting
        } else if self.time_until_stop.is_some_and(|t| t <= 0.0) {
            EmitterState::Draining
        } else {
            EmitterState::Idle
        }
    }

    // ========== Particle access ==========

    /// Every pool slot, alive or not.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.pool
    }

    pub fn alive_particles(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.pool.iter().filter(|p| p.alive)
    }

    /// Fill `out` with render instances for every live particle.
    pub fn write_instances(&self, out: &mut Vec<ParticleInstance>) {
        render::write_instances(&self.pool, out);
    }

    // ========== Lifecycle ==========

    /// Empty the pool and start a fresh run with the current config.
    pub fn restart(&mut self) {
        let capacity = self.config.capacity();
        if capacity != self.pool.len() {
            log::debug!("resizing particle pool {} -> {}", self.pool.len(), capacity);
            self.pool.resize(capacity, Particle::default());
        }
        for note in self.config.diagnostics() {
            log::warn!("emitter config: {note}");
        }
        for p in &mut self.pool {
            p.alive = false;
        }
        self.alive_count = 0;
        self.elapsed_time = 0.0;
        self.emit_counter = 0.0;
        self.time_until_stop = self.config.initial_time_until_stop();
        self.emitting = true;
        log::debug!(
            "emitter restarted: capacity {}, duration {:?}",
            self.pool.len(),
            self.time_until_stop
        );
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Negative or non-finite steps are treated as zero.
    pub fn simulate(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        if self.emitting {
            if let Some(remaining) = self.time_until_stop.as_mut() {
                *remaining -= dt;
                if *remaining <= 0.0 {
                    self.emitting = false;
                    log::debug!("emitter duration elapsed after {:.3}s", self.elapsed_time + dt);
                }
            }
        }

        let origin = self.emitter_pos + self.config.source_position;
        let gravity = self.config.gravity;
        let mut alive = 0;
        for p in &mut self.pool {
            if !p.alive {
                continue;
            }
            p.time_to_live -= dt;
            if p.time_to_live <= 0.0 {
                p.alive = false;
                continue;
            }
            integrate(p, dt, origin, gravity);
            alive += 1;
        }

        let mut spawned = 0;
        if self.emitting {
            self.emit_counter += dt * self.config.emission_rate();
            // A lowered max_particles caps new spawns before the next restart
            // shrinks the pool.
            let limit = self.config.capacity();
            let mut cursor = 0;
            while self.emit_counter >= 1.0 && alive + spawned < limit {
                let Some(offset) = self.pool[cursor..].iter().position(|p| !p.alive) else {
                    break;
                };
                let slot = cursor + offset;
                reset_slot(
                    &mut self.pool[slot],
                    &self.config,
                    self.emitter_pos,
                    &mut self.spawner,
                );
                self.emit_counter -= 1.0;
                cursor = slot + 1;
                if self.pool[slot].alive {
                    spawned += 1;
                }
            }
        }

        self.alive_count = alive + spawned;
        self.elapsed_time += dt;
        log::trace!(
            "simulate dt={dt:.4}: {} alive, {spawned} spawned, counter {:.3}",
            self.alive_count,
            self.emit_counter
        );
    }

    /// Stop emitting and step until every particle has died.
    ///
    /// This is the polling replacement for "wait until the effect is over":
    /// returns the number of frames stepped, or `None` if particles were
    /// still alive after `max_frames`. A non-positive `dt` can never finish
    /// while particles are alive.
    pub fn simulate_until_complete(&mut self, dt: f32, max_frames: u32) -> Option<u32> {
        self.emitting = false;
        let mut frames = 0;
        while self.any_alive() {
            if frames == max_frames {
                return None;
            }
            self.simulate(dt);
            frames += 1;
        }
        Some(frames)
    }
}

/// Advance one live particle by `dt`.
fn integrate(p: &mut Particle, dt: f32, origin: Vec2, gravity: Vec2) {
    match &mut p.kinematics {
        Kinematics::Gravity {
            start,
            velocity,
            radial_accel,
            tangential_accel,
        } => {
            let radial = radial_direction(*velocity, p.position - *start);
            let tangential = radial.perp();
            *velocity += (radial * *radial_accel + tangential * *tangential_accel + gravity) * dt;
            p.position += *velocity * dt;
        }
        Kinematics::Radial {
            angle,
            degrees_per_second,
            radius,
            radius_delta,
        } => {
            *angle += *degrees_per_second * dt;
            *radius = (*radius + *radius_delta * dt).max(0.0);
            p.position = orbit_position(origin, *angle, *radius);
        }
    }

    p.rotation += p.rotation_delta * dt;
    p.color = crate::color::clamp_channels(p.color + p.color_delta * dt);
    p.size = (p.size + p.size_delta * dt).max(0.0);
}

/// Unit vector along the velocity, falling back to the direction away from
/// the spawn point, then to zero.
fn radial_direction(velocity: Vec2, offset: Vec2) -> Vec2 {
    if velocity.length_squared() > MIN_RADIAL_DISTANCE * MIN_RADIAL_DISTANCE {
        velocity.normalize()
    } else if offset.length_squared() > MIN_RADIAL_DISTANCE * MIN_RADIAL_DISTANCE {
        offset.normalize()
    } else {
        Vec2::ZERO
    }
}

#[inline]
fn orbit_position(center: Vec2, angle_degrees: f32, radius: f32) -> Vec2 {
    center + Vec2::from_angle(angle_degrees.to_radians()) * radius
}

/// Per-second change that takes `start` to `end` over `life` seconds.
#[inline]
fn per_second(start: f32, end: f32, life: f32) -> f32 {
    if life > 0.0 {
        (end - start) / life
    } else {
        0.0
    }
}

/// Reset a dead slot into a freshly spawned particle.
///
/// A non-positive lifetime draw leaves the slot dead: the particle expires on
/// the frame it was born.
fn reset_slot(p: &mut Particle, config: &EmitterConfig, emitter_pos: Vec2, rng: &mut SpawnContext) {
    let total_life = rng.vary(config.life_span, config.lifespan_variance).max(0.0);
    p.total_life = total_life;
    p.time_to_live = total_life;
    p.alive = total_life > 0.0;

    let origin = emitter_pos + config.source_position;
    let angle = rng.vary(config.angle, config.angle_variance);

    match config.emitter_type {
        EmitterType::Gravity => {
            let start = origin + rng.vary_vec2(Vec2::ZERO, config.source_position_variance);
            let speed = rng.vary(config.speed, config.speed_variance);
            p.position = start;
            p.kinematics = Kinematics::Gravity {
                start,
                velocity: Vec2::from_angle(angle.to_radians()) * speed,
                radial_accel: rng.vary(config.radial_acceleration, config.radial_accel_variance),
                tangential_accel: rng
                    .vary(config.tangential_acceleration, config.tangential_accel_variance),
            };
        }
        EmitterType::Radial => {
            let radius = rng.vary(config.min_radius, config.min_radius_variance).max(0.0);
            let end_radius = rng.vary(config.max_radius, config.max_radius_variance).max(0.0);
            p.position = orbit_position(origin, angle, radius);
            p.kinematics = Kinematics::Radial {
                angle,
                degrees_per_second: rng
                    .vary(config.rotate_per_second, config.rotate_per_second_variance),
                radius,
                radius_delta: per_second(radius, end_radius, total_life),
            };
        }
    }

    let rotation_start = rng.vary(config.rotation_start, config.rotation_start_variance);
    let rotation_end = rng.vary(config.rotation_end, config.rotation_end_variance);
    p.rotation = rotation_start;
    p.rotation_delta = per_second(rotation_start, rotation_end, total_life);

    let color_start = rng.vary_color(config.start_color, config.start_color_variance);
    let color_end = rng.vary_color(config.end_color, config.end_color_variance);
    p.color = color_start;
    p.color_delta = if total_life > 0.0 {
        (color_end - color_start) / total_life
    } else {
        Vec4::ZERO
    };

    let size_start = rng.vary(config.start_size, config.start_size_variance).max(0.0);
    let size_end = rng.vary(config.end_size, config.end_size_variance).max(0.0);
    p.size = size_start;
    p.size_delta = per_second(size_start, size_end, total_life);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still_config(max_particles: i32, life_span: f32) -> EmitterConfig {
        EmitterConfig {
            max_particles,
            life_span,
            speed: 0.0,
            speed_variance: 0.0,
            angle_variance: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_starts_emitting() {
        let sim = ParticleSimulator::with_seed(still_config(4, 1.0), Vec2::ZERO, 0);
        assert!(sim.emitting());
        assert_eq!(sim.state(), EmitterState::Emitting);
        assert_eq!(sim.capacity(), 4);
        assert_eq!(sim.alive_count(), 0);
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut sim = ParticleSimulator::with_seed(still_config(8, 1.0), Vec2::ZERO, 0);
        sim.simulate(0.0);
        assert_eq!(sim.alive_count(), 0);
        assert_eq!(sim.elapsed_time(), 0.0);
    }

    #[test]
    fn test_negative_and_nan_dt_treated_as_zero() {
        let mut sim = ParticleSimulator::with_seed(still_config(8, 1.0), Vec2::ZERO, 0);
        sim.simulate(-1.0);
        sim.simulate(f32::NAN);
        assert_eq!(sim.alive_count(), 0);
        assert_eq!(sim.elapsed_time(), 0.0);
    }

    #[test]
    fn test_exact_emission_per_frame() {
        // 8 particles per second at 1/8 s frames: one spawn per frame.
        let mut sim = ParticleSimulator::with_seed(still_config(8, 1.0), Vec2::ZERO, 0);
        for frame in 1..=8 {
            sim.simulate(0.125);
            assert_eq!(sim.alive_count(), frame);
        }
        for _ in 0..16 {
            sim.simulate(0.125);
            assert_eq!(sim.alive_count(), 8);
        }
    }

    #[test]
    fn test_pool_full_drops_and_keeps_surplus() {
        let mut sim = ParticleSimulator::with_seed(still_config(2, 1.0), Vec2::ZERO, 0);
        sim.config_mut().max_particles = 10; // rate 10/s, pool still 2 slots
        sim.simulate(0.5);
        assert_eq!(sim.alive_count(), 2);
        assert_eq!(sim.emit_counter(), 3.0);
    }

    #[test]
    fn test_restart_resizes_pool() {
        let mut sim = ParticleSimulator::with_seed(still_config(2, 1.0), Vec2::ZERO, 0);
        sim.config_mut().max_particles = 5;
        assert_eq!(sim.capacity(), 2);
        sim.restart();
        assert_eq!(sim.capacity(), 5);
    }

    #[test]
    fn test_non_positive_lifetime_draw_dies_immediately() {
        let config = EmitterConfig {
            life_span: -1.0,
            ..Default::default()
        };
        let mut rng = SpawnContext::seeded(0);
        let mut p = Particle::default();
        reset_slot(&mut p, &config, Vec2::ZERO, &mut rng);
        assert!(!p.alive());
        assert_eq!(p.total_life(), 0.0);
        assert_eq!(p.size_delta, 0.0);
    }

    #[test]
    fn test_wide_lifetime_variance_never_keeps_expired_particles() {
        let config = EmitterConfig {
            max_particles: 50,
            life_span: 0.5,
            lifespan_variance: 2.0,
            ..Default::default()
        };
        let mut sim = ParticleSimulator::with_seed(config, Vec2::ZERO, 11);
        for _ in 0..120 {
            sim.simulate(1.0 / 60.0);
            assert!(sim.alive_count() <= 50);
            assert!(sim.alive_particles().all(|p| p.time_to_live() > 0.0));
        }
    }

    #[test]
    fn test_state_transitions() {
        let config = EmitterConfig {
            duration: 0.5,
            ..still_config(4, 1.0)
        };
        let mut sim = ParticleSimulator::with_seed(config, Vec2::ZERO, 0);
        sim.set_emitting(false);
        assert_eq!(sim.state(), EmitterState::Idle);
        sim.set_emitting(true);
        sim.simulate(0.6);
        assert_eq!(sim.state(), EmitterState::Draining);
        sim.restart();
        assert_eq!(sim.state(), EmitterState::Emitting);
        assert_eq!(sim.time_until_stop(), Some(0.5));
    }

    #[test]
    fn test_radial_direction_fallbacks() {
        assert_eq!(radial_direction(Vec2::new(3.0, 4.0), Vec2::ZERO), Vec2::new(0.6, 0.8));
        assert_eq!(radial_direction(Vec2::ZERO, Vec2::new(0.0, -2.0)), Vec2::new(0.0, -1.0));
        assert_eq!(radial_direction(Vec2::ZERO, Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn test_simulate_until_complete() {
        let mut sim = ParticleSimulator::with_seed(still_config(8, 1.0), Vec2::ZERO, 0);
        for _ in 0..8 {
            sim.simulate(0.125);
        }
        let frames = sim.simulate_until_complete(0.125, 100).unwrap();
        assert!(frames <= 8);
        assert!(!sim.any_alive());
        assert!(!sim.emitting());
    }

    #[test]
    fn test_simulate_until_complete_gives_up() {
        let mut sim = ParticleSimulator::with_seed(still_config(8, 1.0), Vec2::ZERO, 0);
        sim.simulate(0.5);
        assert_eq!(sim.simulate_until_complete(0.0, 10), None);
    }
}
