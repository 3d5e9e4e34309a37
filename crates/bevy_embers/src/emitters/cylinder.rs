use bevy::prelude::*;
use rand::Rng;

use crate::asset::EmitterShape;
use crate::particles::ParticleCpuData;

use super::{EmissionContext, EmitterDef, EmitterDefFactory, symmetric};

/// Emits particles uniformly within a cylinder aligned to the local Z axis.
#[derive(Debug, Clone, Copy)]
pub struct CylinderEmitter {
    /// X/Y are the cross-section radii, Z is half the height.
    pub half_extents: Vec3,
}

impl Default for CylinderEmitter {
    fn default() -> Self {
        Self {
            half_extents: Vec3::splat(0.5),
        }
    }
}

impl EmitterDef for CylinderEmitter {
    fn configure(&mut self, shape: &EmitterShape) {
        if let EmitterShape::Cylinder { half_extents } = shape {
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
            // rejection sample the unit disc, then stretch to the radii
            let (x, y) = loop {
                let x = ctx.rng.gen_range(-1.0f32..=1.0);
                let y = ctx.rng.gen_range(-1.0f32..=1.0);
                if x * x + y * y <= 1.0 {
                    break (x, y);
                }
            };
            let local = Vec3::new(
                x * self.half_extents.x,
                y * self.half_extents.y,
                symmetric(ctx.rng, self.half_extents.z),
            );
            ctx.init_particle(cpu_data, handle, local);
        }
    }
}

/// Factory for [`CylinderEmitter`], registered as `"cylinder"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CylinderEmitterFactory;

impl EmitterDefFactory for CylinderEmitterFactory {
    fn name(&self) -> &'static str {
        "cylinder"
    }

    fn create_emitter(&self) -> Box<dyn EmitterDef> {
        Box::new(CylinderEmitter::default())
    }
}
