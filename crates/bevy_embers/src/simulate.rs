//! Per-frame simulation of live particle effects.

use bevy::prelude::*;

use crate::runtime::{EffectInstance, ParticleEffectRuntime};

// long frames (breakpoints, window drags) are clamped so effects do not burst
const MAX_FRAME_DELTA: f32 = 0.1;

/// Advances every live effect by the frame delta.
pub fn update_particle_effects(
    time: Res<Time>,
    mut query: Query<(&GlobalTransform, &ParticleEffectRuntime, &mut EffectInstance)>,
) {
    let dt = time.delta_secs().min(MAX_FRAME_DELTA);
    for (transform, runtime, mut instance) in query.iter_mut() {
        if runtime.paused {
            continue;
        }
        let (_, orientation, origin) = transform.to_scale_rotation_translation();
        instance.step(origin, orientation, dt);
    }
}
