//! Systems that attach and rebuild effect instances.

use bevy::prelude::*;

use crate::affectors::AffectorDefFactories;
use crate::asset::ParticleEffectAsset;
use crate::emitters::EmitterDefFactories;
use crate::runtime::{EffectInstance, ParticleEffect3D, ParticleEffectRuntime};

/// Attaches an [`EffectInstance`] to every [`ParticleEffect3D`] entity whose
/// asset has finished loading.
pub fn setup_particle_effects(
    mut commands: Commands,
    query: Query<(Entity, &ParticleEffect3D), Without<EffectInstance>>,
    assets: Res<Assets<ParticleEffectAsset>>,
    emitter_factories: Res<EmitterDefFactories>,
    affector_factories: Res<AffectorDefFactories>,
) {
    for (entity, effect) in query.iter() {
        let Some(asset) = assets.get(&effect.handle) else {
            continue;
        };

        let instance = EffectInstance::from_asset(asset, &emitter_factories, &affector_factories);
        commands
            .entity(entity)
            .insert((instance, ParticleEffectRuntime::default()));
    }
}

/// Rebuilds effect instances whose asset was modified, so edits to an effect
/// file show up on live entities.
pub fn rebuild_modified_effects(
    mut asset_events: MessageReader<AssetEvent<ParticleEffectAsset>>,
    assets: Res<Assets<ParticleEffectAsset>>,
    emitter_factories: Res<EmitterDefFactories>,
    affector_factories: Res<AffectorDefFactories>,
    mut query: Query<(&ParticleEffect3D, &mut EffectInstance)>,
) {
    for event in asset_events.read() {
        let AssetEvent::Modified { id } = event else {
            continue;
        };

        for (effect, mut instance) in query.iter_mut() {
            if effect.handle.id() != *id {
                continue;
            }
            let Some(asset) = assets.get(*id) else {
                continue;
            };
            *instance =
                EffectInstance::from_asset(asset, &emitter_factories, &affector_factories);
        }
    }
}
