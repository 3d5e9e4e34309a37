#![allow(dead_code)]

use bevy::asset::{AssetPlugin, AssetServer, LoadState};
use bevy::prelude::*;
use bevy_embers::EmbersPlugin;
use bevy_embers::affectors::AffectorDefFactories;
use bevy_embers::asset::{AffectorConfig, EmitterConfig, ParticleEffectAsset};
use bevy_embers::emitters::EmitterDefFactories;
use bevy_embers::runtime::{EffectInstance, ParticleEffect3D};
use std::path::Path;

pub fn fixtures_path() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .to_string_lossy()
        .to_string()
}

pub fn create_minimal_app() -> App {
    let mut app = App::new();

    app.add_plugins(
        MinimalPlugins.set(bevy::app::ScheduleRunnerPlugin::run_loop(
            std::time::Duration::from_millis(10),
        )),
    );

    app.add_plugins(AssetPlugin {
        file_path: fixtures_path(),
        ..default()
    });

    app.add_plugins(EmbersPlugin);

    app
}

pub fn load_fixture(app: &mut App, filename: &str) -> Handle<ParticleEffectAsset> {
    let asset_server = app.world().resource::<AssetServer>();
    asset_server.load(filename.to_string())
}

pub fn run_until_loaded<T: Asset>(app: &mut App, handle: &Handle<T>, max_updates: u32) -> bool {
    for _ in 0..max_updates {
        app.update();

        let asset_server = app.world().resource::<AssetServer>();
        match asset_server.load_state(handle) {
            LoadState::Loaded => return true,
            LoadState::Failed(_) => return false,
            _ => continue,
        }
    }
    false
}

pub fn spawn_effect(app: &mut App, handle: Handle<ParticleEffectAsset>) -> Entity {
    app.world_mut().spawn(ParticleEffect3D { handle }).id()
}

pub fn setup_loaded_effect(fixture: &str) -> (App, Handle<ParticleEffectAsset>, Entity) {
    let mut app = create_minimal_app();
    let handle = load_fixture(&mut app, fixture);
    let entity = spawn_effect(&mut app, handle.clone());
    assert!(
        run_until_loaded(&mut app, &handle, 100),
        "fixture should load"
    );
    advance_frames(&mut app, 5);
    (app, handle, entity)
}

pub fn advance_frames(app: &mut App, n: u32) {
    for _ in 0..n {
        app.update();
    }
}

/// advances the app for approximately the given number of seconds of real time.
/// useful for tests that depend on emission accumulating over a threshold.
pub fn advance_time(app: &mut App, seconds: f32) {
    let frame_count = (seconds / 0.016).ceil() as u32 + 2;
    let sleep_per_frame = std::time::Duration::from_secs_f64(seconds as f64 / frame_count as f64);
    for _ in 0..frame_count {
        std::thread::sleep(sleep_per_frame);
        app.update();
    }
}

pub fn create_test_asset(quota: u32, emitters: Vec<EmitterConfig>) -> ParticleEffectAsset {
    ParticleEffectAsset::new("Test".to_string(), quota, emitters, vec![])
}

pub fn create_test_asset_with_affectors(
    quota: u32,
    emitters: Vec<EmitterConfig>,
    affectors: Vec<AffectorConfig>,
) -> ParticleEffectAsset {
    ParticleEffectAsset::new("Test".to_string(), quota, emitters, affectors)
}

/// builds a live instance directly from an asset, without an app
pub fn make_instance(asset: &ParticleEffectAsset) -> EffectInstance {
    EffectInstance::from_asset(
        asset,
        &EmitterDefFactories::with_defaults(),
        &AffectorDefFactories::with_defaults(),
    )
}

pub fn alive_count(app: &App, entity: Entity) -> usize {
    app.world()
        .get::<EffectInstance>(entity)
        .map(|instance| instance.cpu_data.alive_count())
        .unwrap_or(0)
}
