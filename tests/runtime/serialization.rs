use bevy::prelude::*;
use bevy_embers::asset::{
    AffectorConfig, ColourStage, EmitterConfig, EmitterShape, ForceApplication,
    ParticleEffectAsset, ParticleFlags, Range,
};

fn roundtrip_ron<T: serde::Serialize + serde::de::DeserializeOwned>(value: &T) -> T {
    let serialized = ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default()).unwrap();
    ron::from_str(&serialized).unwrap()
}

#[test]
fn emitter_shape_point_roundtrip() {
    let shape = EmitterShape::Point;
    assert_eq!(roundtrip_ron(&shape), shape);
}

#[test]
fn emitter_shape_box_roundtrip() {
    let shape = EmitterShape::Box {
        half_extents: Vec3::new(1.0, 2.0, 3.0),
    };
    assert_eq!(roundtrip_ron(&shape), shape);
}

#[test]
fn emitter_shape_hollow_ellipsoid_roundtrip() {
    let shape = EmitterShape::HollowEllipsoid {
        half_extents: Vec3::splat(2.0),
        inner_ratio: Vec3::splat(0.75),
    };
    assert_eq!(roundtrip_ron(&shape), shape);
}

#[test]
fn emitter_shape_ring_roundtrip() {
    let shape = EmitterShape::Ring {
        radius: 2.0,
        inner_ratio: 0.5,
        depth: 0.25,
    };
    assert_eq!(roundtrip_ron(&shape), shape);
}

#[test]
fn emitter_config_roundtrip() {
    let config = EmitterConfig {
        name: "Sparks".to_string(),
        enabled: false,
        shape: EmitterShape::Cylinder {
            half_extents: Vec3::new(1.0, 1.0, 2.0),
        },
        position: Vec3::new(0.0, 1.0, 0.0),
        direction: Vec3::Y,
        angle: 30.0,
        emission_rate: 42.0,
        velocity: Range::new(1.0, 3.0),
        time_to_live: Range::new(0.5, 2.0),
        duration: Range::splat(4.0),
        repeat_delay: Range::splat(1.0),
        colour_start: Vec4::new(1.0, 0.5, 0.0, 1.0),
        colour_end: Vec4::new(1.0, 0.0, 0.0, 0.0),
        dimensions: Vec2::new(0.25, 0.25),
        rotation: Range::new(0.0, 360.0),
        rotation_speed: Range::splat(90.0),
        flags: ParticleFlags::LOCAL_SPACE | ParticleFlags::DISABLE_Z,
        fixed_seed: Some(1234),
    };

    let restored = roundtrip_ron(&config);
    assert_eq!(restored.name, config.name);
    assert_eq!(restored.shape, config.shape);
    assert_eq!(restored.flags, config.flags);
    assert_eq!(restored.fixed_seed, config.fixed_seed);
    assert_eq!(restored.velocity, config.velocity);
    assert_eq!(restored.duration, config.duration);
}

#[test]
fn affector_configs_roundtrip() {
    let affectors = vec![
        AffectorConfig::LinearForce {
            force: Vec3::new(0.0, -9.8, 0.0),
            application: ForceApplication::Average,
        },
        AffectorConfig::ColourFader {
            adjust: Vec4::new(0.0, 0.0, 0.0, -0.5),
        },
        AffectorConfig::ColourInterpolator {
            stages: vec![
                ColourStage {
                    time: 0.0,
                    colour: Vec4::ONE,
                },
                ColourStage {
                    time: 1.0,
                    colour: Vec4::ZERO,
                },
            ],
        },
        AffectorConfig::Scaler { rate: -0.5 },
        AffectorConfig::DeflectorPlane {
            point: Vec3::ZERO,
            normal: Vec3::Y,
            bounce: 0.8,
        },
        AffectorConfig::DirectionRandomiser {
            randomness: 2.0,
            scope: 0.5,
            keep_velocity: true,
        },
    ];

    for affector in &affectors {
        assert_eq!(&roundtrip_ron(affector), affector);
    }
}

#[test]
fn whole_asset_roundtrip() {
    let asset = ParticleEffectAsset::new(
        "Roundtrip".to_string(),
        256,
        vec![EmitterConfig::default()],
        vec![AffectorConfig::Scaler { rate: 1.0 }],
    );

    let restored = roundtrip_ron(&asset);
    assert_eq!(restored.name, asset.name);
    assert_eq!(restored.quota, asset.quota);
    assert_eq!(restored.emitters.len(), 1);
    assert_eq!(restored.affectors.len(), 1);
}

#[test]
fn default_fields_are_omitted_from_serialization() {
    let config = EmitterConfig::default();
    let serialized =
        ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default()).unwrap();

    // defaults that match their skip predicates stay out of the file
    assert!(!serialized.contains("enabled"));
    assert!(!serialized.contains("shape"));
    assert!(!serialized.contains("duration"));
    assert!(!serialized.contains("repeat_delay"));
    assert!(!serialized.contains("fixed_seed"));
    assert!(!serialized.contains("colour_start"));

    // non-defaulted fields are always written
    assert!(serialized.contains("name"));
    assert!(serialized.contains("emission_rate"));
}

#[test]
fn missing_optional_fields_deserialize_to_defaults() {
    let minimal = r#"(
        name: "Minimal",
    )"#;
    let config: EmitterConfig = ron::from_str(minimal).unwrap();

    assert!(config.enabled);
    assert_eq!(config.shape, EmitterShape::Point);
    assert_eq!(config.emission_rate, 10.0);
    assert_eq!(config.time_to_live, Range::splat(5.0));
    assert_eq!(config.flags, ParticleFlags::empty());
}

#[test]
fn particle_flags_serialize_as_flag_names() {
    let flags = ParticleFlags::LOCAL_SPACE | ParticleFlags::DISABLE_Z;
    let serialized = ron::to_string(&flags).unwrap();
    assert_eq!(serialized, "\"LOCAL_SPACE | DISABLE_Z\"");
    assert_eq!(roundtrip_ron(&flags), flags);
}
