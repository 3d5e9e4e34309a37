use bevy::prelude::*;
use rand::rngs::StdRng;

use crate::asset::AffectorConfig;
use crate::particles::ParticleCpuData;

use super::{AffectorDef, AffectorDefFactory};

/// Reflects particles that would cross a plane within the next frame.
#[derive(Debug, Clone, Copy)]
pub struct DeflectorPlaneAffector {
    /// A point on the plane.
    pub point: Vec3,
    /// The plane normal. Particles moving against it are deflected.
    pub normal: Vec3,
    /// Velocity retained after deflection, from `0.0` to `1.0`.
    pub bounce: f32,
}

impl Default for DeflectorPlaneAffector {
    fn default() -> Self {
        Self {
            point: Vec3::ZERO,
            normal: Vec3::Y,
            bounce: 1.0,
        }
    }
}

impl AffectorDef for DeflectorPlaneAffector {
    fn configure(&mut self, config: &AffectorConfig) {
        if let AffectorConfig::DeflectorPlane {
            point,
            normal,
            bounce,
        } = config
        {
            self.point = *point;
            self.normal = normal.normalize_or_zero();
            self.bounce = bounce.max(0.0);
        }
    }

    fn affect_particles(&self, cpu_data: &mut ParticleCpuData, dt: f32, _rng: &mut StdRng) {
        let normal = self.normal;
        if normal == Vec3::ZERO {
            return;
        }
        for slot in 0..cpu_data.alive_count() {
            let i = cpu_data.alive_at(slot) as usize;
            let direction = cpu_data.direction[i];
            let approaching = direction.dot(normal) < 0.0;
            if !approaching {
                continue;
            }
            let predicted = cpu_data.position[i] + direction * dt;
            if (predicted - self.point).dot(normal) <= 0.0 {
                cpu_data.direction[i] = direction.reject_from(normal) * self.bounce
                    - direction.project_onto(normal) * self.bounce;
            }
        }
    }
}

/// Factory for [`DeflectorPlaneAffector`], registered as `"deflector_plane"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeflectorPlaneAffectorFactory;

impl AffectorDefFactory for DeflectorPlaneAffectorFactory {
    fn name(&self) -> &'static str {
        "deflector_plane"
    }

    fn create_affector(&self) -> Box<dyn AffectorDef> {
        Box::new(DeflectorPlaneAffector::default())
    }
}
