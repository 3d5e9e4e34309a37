use crate::asset::EmitterShape;
use crate::particles::ParticleCpuData;

use super::{EmissionContext, EmitterDef, EmitterDefFactory};

/// Emits every particle from a single point.
///
/// The spawn position is the emitter's configured offset; all remaining
/// attributes come from the shared emission parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct PointEmitter;

impl EmitterDef for PointEmitter {
    fn configure(&mut self, _shape: &EmitterShape) {}

    fn init_emitted_particles(
        &self,
        cpu_data: &mut ParticleCpuData,
        new_handles: &[u32],
        ctx: &mut EmissionContext,
    ) {
        for &handle in new_handles {
            ctx.init_particle(cpu_data, handle, bevy::math::Vec3::ZERO);
        }
    }
}

/// Factory for [`PointEmitter`], registered as `"point"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PointEmitterFactory;

impl EmitterDefFactory for PointEmitterFactory {
    fn name(&self) -> &'static str {
        "point"
    }

    fn create_emitter(&self) -> Box<dyn EmitterDef> {
        Box::new(PointEmitter)
    }
}
