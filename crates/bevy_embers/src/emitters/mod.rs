//! Emitter definitions and their factory registry.
//!
//! An [`EmitterDef`] decides where freshly spawned particles start; everything
//! else about a new particle (direction, speed, lifetime, colour) comes from
//! the shared [`EmitterConfig`] via [`EmissionContext::init_particle`].
//! Definitions are created by name through [`EmitterDefFactories`], so user
//! crates can register their own emitter kinds next to the built-in ones.

mod box_emitter;
mod cylinder;
mod ellipsoid;
mod hollow_ellipsoid;
mod point;
mod ring;

pub use box_emitter::{BoxEmitter, BoxEmitterFactory};
pub use cylinder::{CylinderEmitter, CylinderEmitterFactory};
pub use ellipsoid::{EllipsoidEmitter, EllipsoidEmitterFactory};
pub use hollow_ellipsoid::{HollowEllipsoidEmitter, HollowEllipsoidEmitterFactory};
pub use point::{PointEmitter, PointEmitterFactory};
pub use ring::{RingEmitter, RingEmitterFactory};

use std::collections::HashMap;
use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::{Rng, rngs::StdRng};
use thiserror::Error;

use crate::asset::{EmitterConfig, EmitterShape, ParticleFlags};
use crate::particles::ParticleCpuData;

/// Everything an emitter needs while initializing a batch of particles.
///
/// Borrows the emitter's configuration and random stream for the duration of
/// one emission call, plus the world-space placement of the owning entity.
pub struct EmissionContext<'a> {
    /// Shared emission parameters for the emitter being run.
    pub config: &'a EmitterConfig,
    /// World-space translation of the particle effect entity.
    pub origin: Vec3,
    /// World-space rotation of the particle effect entity.
    pub orientation: Quat,
    /// The emitter's random stream.
    pub rng: &'a mut StdRng,
}

impl EmissionContext<'_> {
    /// Initializes every attribute of one freshly acquired particle.
    ///
    /// `local_position` is the spawn point the emitter picked, relative to the
    /// emitter itself. The configured emitter offset, the entity transform
    /// (unless the particle is flagged local-space) and the Z-disable flag are
    /// all applied here.
    pub fn init_particle(
        &mut self,
        cpu_data: &mut ParticleCpuData,
        handle: u32,
        local_position: Vec3,
    ) {
        let cfg = self.config;
        let i = handle as usize;

        let mut position = cfg.position + local_position;
        let speed = cfg.velocity.sample(self.rng);
        let mut direction = self.random_deviant(cfg.direction, cfg.angle) * speed;

        if !cfg.flags.contains(ParticleFlags::LOCAL_SPACE) {
            position = self.origin + self.orientation * position;
            direction = self.orientation * direction;
        }
        if cfg.flags.contains(ParticleFlags::DISABLE_Z) {
            position.z = 0.0;
            direction.z = 0.0;
        }

        let ttl = cfg.time_to_live.sample(self.rng).max(f32::EPSILON);
        let colour_blend = self.rng.gen_range(0.0f32..1.0);

        cpu_data.position[i] = position;
        cpu_data.direction[i] = direction;
        cpu_data.dimensions[i] = cfg.dimensions;
        cpu_data.rotation[i] = cfg.rotation.sample(self.rng).to_radians();
        cpu_data.rotation_speed[i] = cfg.rotation_speed.sample(self.rng).to_radians();
        cpu_data.colour[i] = cfg.colour_start.lerp(cfg.colour_end, colour_blend);
        cpu_data.total_time_to_live[i] = ttl;
        cpu_data.time_to_live[i] = ttl;
        cpu_data.flags[i] = cfg.flags;
    }

    /// Returns a unit vector deviating from `direction` by up to
    /// `max_angle_degrees`, uniformly spun around it.
    fn random_deviant(&mut self, direction: Vec3, max_angle_degrees: f32) -> Vec3 {
        let direction = direction.normalize_or_zero();
        if max_angle_degrees <= 0.0 || direction == Vec3::ZERO {
            return direction;
        }
        let tilt = self.rng.gen_range(0.0..max_angle_degrees.to_radians());
        let spin = self.rng.gen_range(0.0..TAU);
        let tilt_axis = direction.any_orthonormal_vector();
        let tilted = Quat::from_axis_angle(tilt_axis, tilt) * direction;
        (Quat::from_axis_angle(direction, spin) * tilted).normalize_or_zero()
    }
}

/// Positions freshly spawned particles within an emission region.
pub trait EmitterDef: Send + Sync + 'static {
    /// Adopts the dimensions of the given shape.
    ///
    /// Called once when an effect instance is built. Definitions ignore shape
    /// variants they do not understand and keep their current dimensions.
    fn configure(&mut self, shape: &EmitterShape);

    /// Initializes the particles behind `new_handles`, which were just
    /// acquired from `cpu_data` on this emitter's behalf.
    fn init_emitted_particles(
        &self,
        cpu_data: &mut ParticleCpuData,
        new_handles: &[u32],
        ctx: &mut EmissionContext,
    );
}

/// Creates [`EmitterDef`] instances for one named emitter kind.
pub trait EmitterDefFactory: Send + Sync + 'static {
    /// The stable name this factory is registered under, matching
    /// [`EmitterShape::factory_name`].
    fn name(&self) -> &'static str;

    /// Creates a fresh emitter definition with default dimensions.
    fn create_emitter(&self) -> Box<dyn EmitterDef>;
}

/// Errors returned when resolving an emitter kind by name.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum EmitterFactoryError {
    /// No factory is registered under the requested name.
    #[error("no emitter factory registered under \"{0}\"")]
    UnknownKind(String),
}

/// Name-keyed registry of [`EmitterDefFactory`] implementations.
///
/// The [`EmbersPlugin`](crate::EmbersPlugin) inserts this resource with the
/// built-in kinds already registered. Register additional factories before
/// spawning effects that reference them.
#[derive(Resource, Default)]
pub struct EmitterDefFactories {
    factories: HashMap<&'static str, Box<dyn EmitterDefFactory>>,
}

impl EmitterDefFactories {
    /// Creates a registry containing every built-in emitter kind.
    pub fn with_defaults() -> Self {
        let mut registry = Self::default();
        registry.register(Box::new(PointEmitterFactory));
        registry.register(Box::new(BoxEmitterFactory));
        registry.register(Box::new(EllipsoidEmitterFactory));
        registry.register(Box::new(HollowEllipsoidEmitterFactory));
        registry.register(Box::new(RingEmitterFactory));
        registry.register(Box::new(CylinderEmitterFactory));
        registry
    }

    /// Registers a factory under its own name, replacing any factory already
    /// registered under that name.
    pub fn register(&mut self, factory: Box<dyn EmitterDefFactory>) {
        let name = factory.name();
        if self.factories.insert(name, factory).is_some() {
            warn!("replaced emitter factory registered under \"{name}\"");
        }
    }

    /// Returns `true` if a factory is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Iterates over the registered factory names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }

    /// Creates an emitter definition for the named kind.
    pub fn create(&self, name: &str) -> Result<Box<dyn EmitterDef>, EmitterFactoryError> {
        self.factories
            .get(name)
            .map(|factory| factory.create_emitter())
            .ok_or_else(|| EmitterFactoryError::UnknownKind(name.to_string()))
    }
}

/// Samples uniformly in `[-half, half]`, treating degenerate extents as zero.
pub(crate) fn symmetric(rng: &mut StdRng, half: f32) -> f32 {
    if half <= 0.0 {
        0.0
    } else {
        rng.gen_range(-half..=half)
    }
}

/// Samples a uniformly distributed unit vector.
pub(crate) fn unit_vector(rng: &mut StdRng) -> Vec3 {
    let z = rng.gen_range(-1.0f32..=1.0);
    let angle = rng.gen_range(0.0..TAU);
    let planar = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(planar * angle.cos(), planar * angle.sin(), z)
}
