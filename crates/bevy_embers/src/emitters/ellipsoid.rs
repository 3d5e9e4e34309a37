use bevy::prelude::*;
use rand::Rng;

use crate::asset::EmitterShape;
use crate::particles::ParticleCpuData;

use super::{EmissionContext, EmitterDef, EmitterDefFactory, unit_vector};

/// Emits particles uniformly within the volume of an ellipsoid.
#[derive(Debug, Clone, Copy)]
pub struct EllipsoidEmitter {
    /// Half-extents of the ellipsoid along each axis.
    pub half_extents: Vec3,
}

impl Default for EllipsoidEmitter {
    fn default() -> Self {
        Self {
            half_extents: Vec3::splat(0.5),
        }
    }
}

impl EmitterDef for EllipsoidEmitter {
    fn configure(&mut self, shape: &EmitterShape) {
        if let EmitterShape::Ellipsoid { half_extents } = shape {
            self.half_extents = *half_extents;
        }
    }

    fn init_emitted_particles(
        &self,
        cpu_data: &mut ParticleCpuData,
        new_handles: &[u32],
        ctx: &mut EmissionContext,
    ) {
        for &handle in new_handles {
            // cube root keeps the distribution uniform over the volume
            let radius = ctx.rng.gen_range(0.0f32..1.0).cbrt();
            let local = unit_vector(ctx.rng) * radius * self.half_extents;
            ctx.init_particle(cpu_data, handle, local);
        }
    }
}

/// Factory for [`EllipsoidEmitter`], registered as `"ellipsoid"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EllipsoidEmitterFactory;

impl EmitterDefFactory for EllipsoidEmitterFactory {
    fn name(&self) -> &'static str {
        "ellipsoid"
    }

    fn create_emitter(&self) -> Box<dyn EmitterDef> {
        Box::new(EllipsoidEmitter::default())
    }
}
