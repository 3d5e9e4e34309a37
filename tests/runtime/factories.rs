use bevy::prelude::*;
use bevy_embers::affectors::{
    AffectorDef, AffectorDefFactories, AffectorDefFactory, AffectorFactoryError,
};
use bevy_embers::asset::{AffectorConfig, EmitterConfig, EmitterShape, ParticleEffectAsset};
use bevy_embers::emitters::{
    EmitterDef, EmitterDefFactories, EmitterDefFactory, EmitterFactoryError,
};
use bevy_embers::particles::ParticleCpuData;
use bevy_embers::runtime::EffectInstance;
use rand::rngs::StdRng;

#[test]
fn default_emitter_registry_knows_every_builtin_shape() {
    let factories = EmitterDefFactories::with_defaults();
    for name in [
        "point",
        "box",
        "ellipsoid",
        "hollow_ellipsoid",
        "ring",
        "cylinder",
    ] {
        assert!(factories.contains(name), "missing emitter kind {name}");
        assert!(factories.create(name).is_ok());
    }
}

#[test]
fn default_affector_registry_knows_every_builtin_kind() {
    let factories = AffectorDefFactories::with_defaults();
    for name in [
        "linear_force",
        "colour_fader",
        "colour_interpolator",
        "scaler",
        "deflector_plane",
        "direction_randomiser",
    ] {
        assert!(factories.contains(name), "missing affector kind {name}");
        assert!(factories.create(name).is_ok());
    }
}

#[test]
fn unknown_emitter_kind_is_an_error() {
    let factories = EmitterDefFactories::with_defaults();
    let result = factories.create("spline");
    assert!(matches!(
        result,
        Err(EmitterFactoryError::UnknownKind(name)) if name == "spline"
    ));
}

#[test]
fn unknown_affector_kind_is_an_error() {
    let factories = AffectorDefFactories::with_defaults();
    let result = factories.create("vortex");
    assert!(matches!(
        result,
        Err(AffectorFactoryError::UnknownKind(name)) if name == "vortex"
    ));
}

struct PinnedEmitter;

impl EmitterDef for PinnedEmitter {
    fn configure(&mut self, _shape: &EmitterShape) {}

    fn init_emitted_particles(
        &self,
        cpu_data: &mut ParticleCpuData,
        new_handles: &[u32],
        ctx: &mut bevy_embers::emitters::EmissionContext,
    ) {
        for &handle in new_handles {
            ctx.init_particle(cpu_data, handle, Vec3::splat(9.0));
        }
    }
}

struct PinnedEmitterFactory;

impl EmitterDefFactory for PinnedEmitterFactory {
    fn name(&self) -> &'static str {
        "pinned"
    }

    fn create_emitter(&self) -> Box<dyn EmitterDef> {
        Box::new(PinnedEmitter)
    }
}

#[test]
fn user_emitter_factories_can_be_registered() {
    let mut factories = EmitterDefFactories::with_defaults();
    factories.register(Box::new(PinnedEmitterFactory));

    assert!(factories.contains("pinned"));
    assert!(factories.create("pinned").is_ok());
}

struct FreezeAffector;

impl AffectorDef for FreezeAffector {
    fn configure(&mut self, _config: &AffectorConfig) {}

    fn affect_particles(&self, cpu_data: &mut ParticleCpuData, _dt: f32, _rng: &mut StdRng) {
        for slot in 0..cpu_data.alive_count() {
            let i = cpu_data.alive_at(slot) as usize;
            cpu_data.direction[i] = Vec3::ZERO;
        }
    }
}

struct FreezeAffectorFactory;

impl AffectorDefFactory for FreezeAffectorFactory {
    fn name(&self) -> &'static str {
        "freeze"
    }

    fn create_affector(&self) -> Box<dyn AffectorDef> {
        Box::new(FreezeAffector)
    }
}

#[test]
fn user_affector_factories_can_be_registered() {
    let mut factories = AffectorDefFactories::with_defaults();
    factories.register(Box::new(FreezeAffectorFactory));

    assert!(factories.contains("freeze"));
    assert!(factories.create("freeze").is_ok());
}

#[test]
fn registries_expose_their_registered_names() {
    let factories = EmitterDefFactories::with_defaults();
    let names: Vec<&str> = factories.names().collect();
    assert_eq!(names.len(), 6);
    assert!(names.contains(&"point"));

    let factories = AffectorDefFactories::with_defaults();
    assert_eq!(factories.names().count(), 6);
}

#[test]
fn instances_skip_kinds_missing_from_the_registries() {
    let asset = ParticleEffectAsset::new(
        "Orphan".to_string(),
        16,
        vec![EmitterConfig::default()],
        vec![AffectorConfig::Scaler { rate: 1.0 }],
    );

    // empty registries: every configured kind is unknown
    let mut instance = EffectInstance::from_asset(
        &asset,
        &EmitterDefFactories::default(),
        &AffectorDefFactories::default(),
    );

    assert!(instance.emitters.is_empty());
    assert_eq!(instance.cpu_data.capacity(), 16);

    instance.step(Vec3::ZERO, Quat::IDENTITY, 1.0);
    assert_eq!(instance.cpu_data.alive_count(), 0);
}

#[test]
fn registering_a_duplicate_name_replaces_the_factory() {
    let mut factories = EmitterDefFactories::with_defaults();
    factories.register(Box::new(PinnedEmitterFactory));
    factories.register(Box::new(PinnedEmitterFactory));
    assert!(factories.contains("pinned"));
}
