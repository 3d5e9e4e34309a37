#![deny(missing_docs)]
//! **Embers** is a CPU-simulated particle effect system for the
//! [Bevy game engine](https://bevyengine.org/).
//!
//! # Getting started
//!
//! ## Add the dependency
//!
//! First, add `bevy_embers` to the dependencies in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! bevy_embers = "0.1"
//! ```
//!
//! ## Add the plugin
//!
//! Add [`EmbersPlugin`] to your Bevy app:
//!
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_embers::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins((DefaultPlugins, EmbersPlugin))
//!         // ...your other plugins, systems and resources
//!         .run();
//! }
//! ```
//!
//! ## Spawning a particle effect
//!
//! An effect is defined by a [`ParticleEffectAsset`] containing one or more
//! [`EmitterConfig`] entries plus optional [`AffectorConfig`] entries. Spawn a
//! [`ParticleEffect3D`] component to run the effect.
//!
//! ### Loading from a file
//!
//! Particle effects can be loaded from RON asset files:
//!
//! ```
//! use bevy::prelude::*;
//! use bevy_embers::prelude::*;
//!
//! fn setup(mut commands: Commands, asset_server: Res<AssetServer>) {
//!     commands.spawn(ParticleEffect3D {
//!         handle: asset_server.load("my_effect.ron"),
//!     });
//! }
//! ```
//!
//! ### Building in code
//!
//! You can also build a [`ParticleEffectAsset`] directly:
//!
//! ```
//! use bevy::prelude::*;
//! use bevy_embers::prelude::*;
//!
//! fn setup(mut commands: Commands, mut assets: ResMut<Assets<ParticleEffectAsset>>) {
//!     let handle = assets.add(ParticleEffectAsset::new(
//!         "My Effect".into(),
//!         256,
//!         vec![EmitterConfig {
//!             name: "Sparks".into(),
//!             angle: 30.0,
//!             velocity: EmitterRange::new(1.0, 5.0),
//!             ..default()
//!         }],
//!         vec![AffectorConfig::LinearForce {
//!             force: Vec3::new(0.0, -9.8, 0.0),
//!             application: default(),
//!         }],
//!     ));
//!
//!     commands.spawn(ParticleEffect3D { handle });
//! }
//! ```
//!
//! # Table of contents
//!
//! ## Effects
//!
//! An effect is the top-level container for a particle pool, its emitters and
//! its affectors.
//!
//! - [Spawning an effect](ParticleEffect3D) with a handle to a [`ParticleEffectAsset`]
//! - [Playback control](ParticleEffectRuntime) (pause, resume, toggle)
//! - [Live simulation state](EffectInstance) (particle pool, emitter cycles)
//!
//! ## Emitters
//!
//! An [emitter](EmitterConfig) is the source that creates particles. It
//! controls where, when and how fast particles are spawned, plus their
//! initial attributes.
//!
//! - [Emission region](EmitterShape): point, box, ellipsoid, hollow
//!   ellipsoid, ring or cylinder
//! - [Custom emitter kinds](emitters::EmitterDefFactory) via the
//!   [factory registry](emitters::EmitterDefFactories)
//!
//! ## Affectors
//!
//! [Affectors](AffectorConfig) modify alive particles every frame: forces,
//! colour fades and gradients, scaling, plane deflection and velocity jitter.
//!
//! - [Custom affector kinds](affectors::AffectorDefFactory) via the
//!   [factory registry](affectors::AffectorDefFactories)

/// Particle effect asset definitions, emitter data, and serialization types.
pub mod asset;
/// Convenience re-exports for common particle effect types.
pub mod prelude;
pub mod runtime;

pub mod affectors;
pub mod emitters;
pub mod particles;
mod simulate;
mod spawning;

use bevy::prelude::*;

use affectors::AffectorDefFactories;
use emitters::EmitterDefFactories;
use simulate::update_particle_effects;
use spawning::{rebuild_modified_effects, setup_particle_effects};

/// Plugin that adds CPU particle effect support to a Bevy app.
///
/// Registers the asset loader, the emitter and affector factory registries,
/// and the systems that instantiate and simulate effects.
pub struct EmbersPlugin;

impl Plugin for EmbersPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<ParticleEffectAsset>()
            .init_asset_loader::<ParticleEffectAssetLoader>();

        app.insert_resource(EmitterDefFactories::with_defaults())
            .insert_resource(AffectorDefFactories::with_defaults());

        app.register_type::<asset::EmitterConfig>()
            .register_type::<asset::EmitterShape>()
            .register_type::<asset::AffectorConfig>()
            .register_type::<asset::Range>();

        app.add_systems(
            Update,
            (
                setup_particle_effects,
                rebuild_modified_effects,
                update_particle_effects,
            )
                .chain(),
        );
    }
}

pub use asset::{
    AffectorConfig, ColourStage, EmitterConfig, EmitterShape, ForceApplication,
    ParticleEffectAsset, ParticleEffectAssetLoader, ParticleEffectAssetLoaderError, ParticleFlags,
    Range,
};
pub use particles::{PackedParticle, ParticleCpuData};
pub use runtime::{
    EffectInstance, EmitterCycle, EmitterInstance, ParticleEffect3D, ParticleEffectRuntime,
};
