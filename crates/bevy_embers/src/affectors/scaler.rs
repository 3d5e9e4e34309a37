use bevy::prelude::*;
use rand::rngs::StdRng;

use crate::asset::AffectorConfig;
use crate::particles::ParticleCpuData;

use super::{AffectorDef, AffectorDefFactory};

/// Grows or shrinks particle dimensions over time.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScalerAffector {
    /// Amount added to both particle dimensions per second.
    pub rate: f32,
}

impl AffectorDef for ScalerAffector {
    fn configure(&mut self, config: &AffectorConfig) {
        if let AffectorConfig::Scaler { rate } = config {
            self.rate = *rate;
        }
    }

    fn affect_particles(&self, cpu_data: &mut ParticleCpuData, dt: f32, _rng: &mut StdRng) {
        let delta = Vec2::splat(self.rate * dt);
        for slot in 0..cpu_data.alive_count() {
            let i = cpu_data.alive_at(slot) as usize;
            cpu_data.dimensions[i] = (cpu_data.dimensions[i] + delta).max(Vec2::ZERO);
        }
    }
}

/// Factory for [`ScalerAffector`], registered as `"scaler"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScalerAffectorFactory;

impl AffectorDefFactory for ScalerAffectorFactory {
    fn name(&self) -> &'static str {
        "scaler"
    }

    fn create_affector(&self) -> Box<dyn AffectorDef> {
        Box::new(ScalerAffector::default())
    }
}
