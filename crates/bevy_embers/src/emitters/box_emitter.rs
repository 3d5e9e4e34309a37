use bevy::prelude::*;

use crate::asset::EmitterShape;
use crate::particles::ParticleCpuData;

use super::{EmissionContext, EmitterDef, EmitterDefFactory, symmetric};

/// Emits particles uniformly within an axis-aligned box.
#[derive(Debug, Clone, Copy)]
pub struct BoxEmitter {
    /// Half-extents of the box along each axis.
    pub half_extents: Vec3,
}

impl Default for BoxEmitter {
    fn default() -> Self {
        Self {
            half_extents: Vec3::splat(0.5),
        }
    }
}

impl EmitterDef for BoxEmitter {
    fn configure(&mut self, shape: &EmitterShape) {
        if let EmitterShape::Box { half_extents } = shape {
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
            let local = Vec3::new(
                symmetric(ctx.rng, self.half_extents.x),
                symmetric(ctx.rng, self.half_extents.y),
                symmetric(ctx.rng, self.half_extents.z),
            );
            ctx.init_particle(cpu_data, handle, local);
        }
    }
}

/// Factory for [`BoxEmitter`], registered as `"box"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoxEmitterFactory;

impl EmitterDefFactory for BoxEmitterFactory {
    fn name(&self) -> &'static str {
        "box"
    }

    fn create_emitter(&self) -> Box<dyn EmitterDef> {
        Box::new(BoxEmitter::default())
    }
}
