use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

use crate::asset::EmitterShape;
use crate::particles::ParticleCpuData;

use super::{EmissionContext, EmitterDef, EmitterDefFactory, symmetric};

/// Emits particles within a flat annulus in the local XY plane.
#[derive(Debug, Clone, Copy)]
pub struct RingEmitter {
    /// Outer radius of the ring.
    pub radius: f32,
    /// Inner boundary as a ratio of the outer radius.
    pub inner_ratio: f32,
    /// Extent of the ring along the local Z axis.
    pub depth: f32,
}

impl Default for RingEmitter {
    fn default() -> Self {
        Self {
            radius: 0.5,
            inner_ratio: 0.5,
            depth: 0.0,
        }
    }
}

impl EmitterDef for RingEmitter {
    fn configure(&mut self, shape: &EmitterShape) {
        if let EmitterShape::Ring {
            radius,
            inner_ratio,
            depth,
        } = shape
        {
            self.radius = radius.max(0.0);
            self.inner_ratio = inner_ratio.clamp(0.0, 1.0);
            self.depth = depth.max(0.0);
        }
    }

    fn init_emitted_particles(
        &self,
        cpu_data: &mut ParticleCpuData,
        new_handles: &[u32],
        ctx: &mut EmissionContext,
    ) {
        let inner_sq = self.inner_ratio * self.inner_ratio;
        for &handle in new_handles {
            let angle = ctx.rng.gen_range(0.0..TAU);
            // interpolating squared radii keeps the annulus uniform by area
            let t = ctx.rng.gen_range(0.0f32..1.0);
            let radius = self.radius * (inner_sq + (1.0 - inner_sq) * t).sqrt();
            let local = Vec3::new(
                radius * angle.cos(),
                radius * angle.sin(),
                symmetric(ctx.rng, self.depth * 0.5),
            );
            ctx.init_particle(cpu_data, handle, local);
        }
    }
}

/// Factory for [`RingEmitter`], registered as `"ring"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RingEmitterFactory;

impl EmitterDefFactory for RingEmitterFactory {
    fn name(&self) -> &'static str {
        "ring"
    }

    fn create_emitter(&self) -> Box<dyn EmitterDef> {
        Box::new(RingEmitter::default())
    }
}
