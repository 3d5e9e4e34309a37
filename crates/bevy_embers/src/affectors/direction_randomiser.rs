use bevy::prelude::*;
use rand::{Rng, rngs::StdRng};

use crate::asset::AffectorConfig;
use crate::particles::ParticleCpuData;

use super::{AffectorDef, AffectorDefFactory};

/// Adds random jitter to particle velocity for a turbulent look.
#[derive(Debug, Clone, Copy)]
pub struct DirectionRandomiserAffector {
    /// Maximum velocity deviation added per second.
    pub randomness: f32,
    /// Chance for each particle to be affected each frame.
    pub scope: f32,
    /// If `true`, particle speed is preserved and only the direction changes.
    pub keep_velocity: bool,
}

impl Default for DirectionRandomiserAffector {
    fn default() -> Self {
        Self {
            randomness: 1.0,
            scope: 1.0,
            keep_velocity: false,
        }
    }
}

impl AffectorDef for DirectionRandomiserAffector {
    fn configure(&mut self, config: &AffectorConfig) {
        if let AffectorConfig::DirectionRandomiser {
            randomness,
            scope,
            keep_velocity,
        } = config
        {
            self.randomness = *randomness;
            self.scope = scope.clamp(0.0, 1.0);
            self.keep_velocity = *keep_velocity;
        }
    }

    fn affect_particles(&self, cpu_data: &mut ParticleCpuData, dt: f32, rng: &mut StdRng) {
        let spread = self.randomness * dt;
        for slot in 0..cpu_data.alive_count() {
            if rng.gen_range(0.0f32..1.0) > self.scope {
                continue;
            }
            let i = cpu_data.alive_at(slot) as usize;
            let direction = cpu_data.direction[i];
            let speed = direction.length();
            let jitter = Vec3::new(
                rng.gen_range(-1.0f32..=1.0),
                rng.gen_range(-1.0f32..=1.0),
                rng.gen_range(-1.0f32..=1.0),
            ) * spread;
            let mut jittered = direction + jitter;
            if self.keep_velocity && speed > 0.0 {
                jittered = jittered.normalize_or_zero() * speed;
            }
            cpu_data.direction[i] = jittered;
        }
    }
}

/// Factory for [`DirectionRandomiserAffector`], registered as
/// `"direction_randomiser"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectionRandomiserAffectorFactory;

impl AffectorDefFactory for DirectionRandomiserAffectorFactory {
    fn name(&self) -> &'static str {
        "direction_randomiser"
    }

    fn create_affector(&self) -> Box<dyn AffectorDef> {
        Box::new(DirectionRandomiserAffector::default())
    }
}
