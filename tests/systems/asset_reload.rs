use bevy::prelude::*;
use bevy_embers::asset::{EmitterConfig, ParticleEffectAsset};
use bevy_embers::runtime::EffectInstance;

use crate::helpers::*;

#[test]
fn modified_assets_rebuild_live_instances() {
    let (mut app, handle, entity) = setup_loaded_effect("simple_effect.ron");

    {
        let instance = app
            .world()
            .get::<EffectInstance>(entity)
            .expect("instance should be attached");
        assert_eq!(instance.emitters.len(), 1);
    }

    // mutating the asset emits a Modified event, like an editor save would
    {
        let mut assets = app
            .world_mut()
            .resource_mut::<Assets<ParticleEffectAsset>>();
        let asset = assets.get_mut(&handle).expect("asset should be loaded");
        asset.emitters.push(EmitterConfig {
            name: "Added Later".to_string(),
            ..default()
        });
    }

    advance_frames(&mut app, 3);

    let instance = app
        .world()
        .get::<EffectInstance>(entity)
        .expect("instance should be attached");
    assert_eq!(instance.emitters.len(), 2);
    assert_eq!(instance.emitters[1].config.name, "Added Later");
}

#[test]
fn rebuilding_resets_the_particle_pool() {
    let (mut app, handle, entity) = setup_loaded_effect("simple_effect.ron");

    advance_time(&mut app, 0.5);
    assert!(alive_count(&app, entity) > 0);

    {
        let mut assets = app
            .world_mut()
            .resource_mut::<Assets<ParticleEffectAsset>>();
        let asset = assets.get_mut(&handle).expect("asset should be loaded");
        asset.quota = 32;
    }

    advance_frames(&mut app, 3);

    let instance = app
        .world()
        .get::<EffectInstance>(entity)
        .expect("instance should be attached");
    assert_eq!(instance.cpu_data.capacity(), 32);
}
