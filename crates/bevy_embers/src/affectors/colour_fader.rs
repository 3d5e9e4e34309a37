use bevy::prelude::*;
use rand::rngs::StdRng;

use crate::asset::AffectorConfig;
use crate::particles::ParticleCpuData;

use super::{AffectorDef, AffectorDefFactory};

/// Adjusts particle colour components by a fixed amount per second.
#[derive(Debug, Default, Clone, Copy)]
pub struct ColourFaderAffector {
    /// Per-second adjustment for each RGBA component.
    pub adjust: Vec4,
}

impl AffectorDef for ColourFaderAffector {
    fn configure(&mut self, config: &AffectorConfig) {
        if let AffectorConfig::ColourFader { adjust } = config {
            self.adjust = *adjust;
        }
    }

    fn affect_particles(&self, cpu_data: &mut ParticleCpuData, dt: f32, _rng: &mut StdRng) {
        let delta = self.adjust * dt;
        for slot in 0..cpu_data.alive_count() {
            let i = cpu_data.alive_at(slot) as usize;
            cpu_data.colour[i] = (cpu_data.colour[i] + delta).clamp(Vec4::ZERO, Vec4::ONE);
        }
    }
}

/// Factory for [`ColourFaderAffector`], registered as `"colour_fader"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ColourFaderAffectorFactory;

impl AffectorDefFactory for ColourFaderAffectorFactory {
    fn name(&self) -> &'static str {
        "colour_fader"
    }

    fn create_affector(&self) -> Box<dyn AffectorDef> {
        Box::new(ColourFaderAffector::default())
    }
}
