use bevy::prelude::*;
use rand::rngs::StdRng;

use crate::asset::{AffectorConfig, ForceApplication};
use crate::particles::ParticleCpuData;

use super::{AffectorDef, AffectorDefFactory};

/// Applies a constant force, such as gravity or wind, to every particle.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinearForceAffector {
    /// The force vector, in units per second squared.
    pub force: Vec3,
    /// How the force combines with particle velocity.
    pub application: ForceApplication,
}

impl AffectorDef for LinearForceAffector {
    fn configure(&mut self, config: &AffectorConfig) {
        if let AffectorConfig::LinearForce { force, application } = config {
            self.force = *force;
            self.application = *application;
        }
    }

    fn affect_particles(&self, cpu_data: &mut ParticleCpuData, dt: f32, _rng: &mut StdRng) {
        match self.application {
            ForceApplication::Add => {
                let scaled = self.force * dt;
                for slot in 0..cpu_data.alive_count() {
                    let i = cpu_data.alive_at(slot) as usize;
                    cpu_data.direction[i] += scaled;
                }
            }
            ForceApplication::Average => {
                for slot in 0..cpu_data.alive_count() {
                    let i = cpu_data.alive_at(slot) as usize;
                    cpu_data.direction[i] = (cpu_data.direction[i] + self.force) * 0.5;
                }
            }
        }
    }
}

/// Factory for [`LinearForceAffector`], registered as `"linear_force"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinearForceAffectorFactory;

impl AffectorDefFactory for LinearForceAffectorFactory {
    fn name(&self) -> &'static str {
        "linear_force"
    }

    fn create_affector(&self) -> Box<dyn AffectorDef> {
        Box::new(LinearForceAffector::default())
    }
}
