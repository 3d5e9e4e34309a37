use bevy::prelude::*;
use rand::Rng;

use crate::asset::EmitterShape;
use crate::particles::ParticleCpuData;

use super::{EmissionContext, EmitterDef, EmitterDefFactory, unit_vector};

/// Emits particles within the shell between an inner and an outer ellipsoid.
#[derive(Debug, Clone, Copy)]
pub struct HollowEllipsoidEmitter {
    /// Half-extents of the outer ellipsoid along each axis.
    pub half_extents: Vec3,
    /// Inner shell boundary as a per-axis ratio of the half-extents.
    pub inner_ratio: Vec3,
}

impl Default for HollowEllipsoidEmitter {
    fn default() -> Self {
        Self {
            half_extents: Vec3::splat(0.5),
            inner_ratio: Vec3::splat(0.5),
        }
    }
}

impl EmitterDef for HollowEllipsoidEmitter {
    fn configure(&mut self, shape: &EmitterShape) {
        if let EmitterShape::HollowEllipsoid {
            half_extents,
            inner_ratio,
        } = shape
        {
            self.half_extents = *half_extents;
            self.inner_ratio = inner_ratio.clamp(Vec3::ZERO, Vec3::ONE);
        }
    }

    fn init_emitted_particles(
        &self,
        cpu_data: &mut ParticleCpuData,
        new_handles: &[u32],
        ctx: &mut EmissionContext,
    ) {
        for &handle in new_handles {
            let shell = ctx.rng.gen_range(0.0f32..1.0);
            let radii = self.inner_ratio.lerp(Vec3::ONE, shell) * self.half_extents;
            let local = unit_vector(ctx.rng) * radii;
            ctx.init_particle(cpu_data, handle, local);
        }
    }
}

/// Factory for [`HollowEllipsoidEmitter`], registered as `"hollow_ellipsoid"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HollowEllipsoidEmitterFactory;

impl EmitterDefFactory for HollowEllipsoidEmitterFactory {
    fn name(&self) -> &'static str {
        "hollow_ellipsoid"
    }

    fn create_emitter(&self) -> Box<dyn EmitterDef> {
        Box::new(HollowEllipsoidEmitter::default())
    }
}
