pub use crate::EmbersPlugin;

pub use crate::asset::{
    AffectorConfig, ColourStage, EmitterConfig, EmitterShape, ForceApplication,
    ParticleEffectAsset, ParticleFlags, Range as EmitterRange,
};

pub use crate::particles::{PackedParticle, ParticleCpuData};

pub use crate::runtime::{
    EffectInstance, EmitterCycle, EmitterInstance, ParticleEffect3D, ParticleEffectRuntime,
};
