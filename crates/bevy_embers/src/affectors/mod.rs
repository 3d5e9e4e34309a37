//! Affector definitions and their factory registry.
//!
//! An [`AffectorDef`] mutates the alive particles of one effect every frame,
//! after emission and before integration. Like emitters, affectors are
//! resolved by name through [`AffectorDefFactories`], so user crates can
//! register custom kinds.

mod colour_fader;
mod colour_interpolator;
mod deflector_plane;
mod direction_randomiser;
mod linear_force;
mod scaler;

pub use colour_fader::{ColourFaderAffector, ColourFaderAffectorFactory};
pub use colour_interpolator::{ColourInterpolatorAffector, ColourInterpolatorAffectorFactory};
pub use deflector_plane::{DeflectorPlaneAffector, DeflectorPlaneAffectorFactory};
pub use direction_randomiser::{DirectionRandomiserAffector, DirectionRandomiserAffectorFactory};
pub use linear_force::{LinearForceAffector, LinearForceAffectorFactory};
pub use scaler::{ScalerAffector, ScalerAffectorFactory};

use std::collections::HashMap;

use bevy::prelude::*;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::asset::AffectorConfig;
use crate::particles::ParticleCpuData;

/// Mutates alive particles once per frame.
pub trait AffectorDef: Send + Sync + 'static {
    /// Adopts the parameters of the given configuration.
    ///
    /// Called once when an effect instance is built. Definitions ignore
    /// configuration variants they do not understand.
    fn configure(&mut self, config: &AffectorConfig);

    /// Runs this affector over every alive particle for one frame of `dt`
    /// seconds.
    fn affect_particles(&self, cpu_data: &mut ParticleCpuData, dt: f32, rng: &mut StdRng);
}

/// Creates [`AffectorDef`] instances for one named affector kind.
pub trait AffectorDefFactory: Send + Sync + 'static {
    /// The stable name this factory is registered under, matching
    /// [`AffectorConfig::factory_name`].
    fn name(&self) -> &'static str;

    /// Creates a fresh affector definition with default parameters.
    fn create_affector(&self) -> Box<dyn AffectorDef>;
}

/// Errors returned when resolving an affector kind by name.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AffectorFactoryError {
    /// No factory is registered under the requested name.
    #[error("no affector factory registered under \"{0}\"")]
    UnknownKind(String),
}

/// Name-keyed registry of [`AffectorDefFactory`] implementations.
///
/// The [`EmbersPlugin`](crate::EmbersPlugin) inserts this resource with the
/// built-in kinds already registered.
#[derive(Resource, Default)]
pub struct AffectorDefFactories {
    factories: HashMap<&'static str, Box<dyn AffectorDefFactory>>,
}

impl AffectorDefFactories {
    /// Creates a registry containing every built-in affector kind.
    pub fn with_defaults() -> Self {
        let mut registry = Self::default();
        registry.register(Box::new(LinearForceAffectorFactory));
        registry.register(Box::new(ColourFaderAffectorFactory));
        registry.register(Box::new(ColourInterpolatorAffectorFactory));
        registry.register(Box::new(ScalerAffectorFactory));
        registry.register(Box::new(DeflectorPlaneAffectorFactory));
        registry.register(Box::new(DirectionRandomiserAffectorFactory));
        registry
    }

    /// Registers a factory under its own name, replacing any factory already
    /// registered under that name.
    pub fn register(&mut self, factory: Box<dyn AffectorDefFactory>) {
        let name = factory.name();
        if self.factories.insert(name, factory).is_some() {
            warn!("replaced affector factory registered under \"{name}\"");
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

    /// Creates an affector definition for the named kind.
    pub fn create(&self, name: &str) -> Result<Box<dyn AffectorDef>, AffectorFactoryError> {
        self.factories
            .get(name)
            .map(|factory| factory.create_affector())
            .ok_or_else(|| AffectorFactoryError::UnknownKind(name.to_string()))
    }
}
