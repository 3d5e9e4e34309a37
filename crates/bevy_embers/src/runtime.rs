//! Runtime state for live particle effects.
//!
//! A [`ParticleEffect3D`] component references a [`ParticleEffectAsset`]; once
//! the asset is available, the spawning system attaches an [`EffectInstance`]
//! holding the particle pool and the per-emitter state, plus a
//! [`ParticleEffectRuntime`] for playback control.

use bevy::prelude::*;
use rand::{SeedableRng, rngs::StdRng};

use crate::affectors::{AffectorDef, AffectorDefFactories};
use crate::asset::{EmitterConfig, ParticleEffectAsset, ParticleFlags};
use crate::emitters::{EmissionContext, EmitterDef, EmitterDefFactories};
use crate::particles::{PackedParticle, ParticleCpuData};

/// Spawns a particle effect at this entity's transform.
#[derive(Component)]
#[require(Transform, Visibility)]
pub struct ParticleEffect3D {
    /// The effect asset to instantiate.
    pub handle: Handle<ParticleEffectAsset>,
}

/// Playback control for one live particle effect.
#[derive(Component)]
pub struct ParticleEffectRuntime {
    /// While `true`, the simulation is frozen in place.
    pub paused: bool,
}

impl Default for ParticleEffectRuntime {
    fn default() -> Self {
        Self { paused: false }
    }
}

impl ParticleEffectRuntime {
    /// Freezes the simulation.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resumes a paused simulation.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Toggles between paused and running.
    pub fn toggle(&mut self) {
        self.paused = !self.paused;
    }
}

/// Where an emitter is within its emission cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EmitterCycle {
    /// Actively emitting. `remaining` is the sampled duration left, or
    /// infinity when the emitter runs forever.
    Running {
        /// Seconds of emission left in this cycle.
        remaining: f32,
    },
    /// Waiting out a repeat delay before the next cycle.
    Sleeping {
        /// Seconds of sleep left.
        remaining: f32,
    },
    /// Duration elapsed with no repeat delay configured. Stays off until
    /// restarted.
    Stopped,
}

/// Live state for one emitter of an effect instance.
pub struct EmitterInstance {
    /// The emission parameters this emitter was built from.
    pub config: EmitterConfig,
    def: Box<dyn EmitterDef>,
    rng: StdRng,
    cycle: EmitterCycle,
    // fractional particles carried between frames
    remainder: f32,
}

impl EmitterInstance {
    /// Builds an emitter instance from its configuration and definition.
    pub fn new(config: EmitterConfig, mut def: Box<dyn EmitterDef>) -> Self {
        def.configure(&config.shape);
        let mut rng = match config.fixed_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand_seed()),
        };
        let cycle = EmitterCycle::Running {
            remaining: sample_duration(&config, &mut rng),
        };
        Self {
            config,
            def,
            rng,
            cycle,
            remainder: 0.0,
        }
    }

    /// The current point in this emitter's emission cycle.
    pub fn cycle(&self) -> EmitterCycle {
        self.cycle
    }

    /// Restarts this emitter from the beginning of a fresh emission cycle.
    pub fn restart(&mut self) {
        if let Some(seed) = self.config.fixed_seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        self.cycle = EmitterCycle::Running {
            remaining: sample_duration(&self.config, &mut self.rng),
        };
        self.remainder = 0.0;
    }

    /// Advances the emission cycle and spawns this frame's particles.
    pub(crate) fn step(
        &mut self,
        cpu_data: &mut ParticleCpuData,
        scratch: &mut Vec<u32>,
        origin: Vec3,
        orientation: Quat,
        dt: f32,
    ) {
        if !self.config.enabled {
            return;
        }

        let active = match &mut self.cycle {
            EmitterCycle::Stopped => return,
            EmitterCycle::Sleeping { remaining } => {
                *remaining -= dt;
                if *remaining > 0.0 {
                    return;
                }
                self.remainder = 0.0;
                self.cycle = EmitterCycle::Running {
                    remaining: sample_duration(&self.config, &mut self.rng),
                };
                return;
            }
            EmitterCycle::Running { remaining } => {
                // the cycle may end mid-frame; only its active part emits
                let active = dt.min(*remaining).max(0.0);
                *remaining -= dt;
                if *remaining <= 0.0 {
                    self.cycle = if self.config.repeat_delay.is_zero() {
                        EmitterCycle::Stopped
                    } else {
                        EmitterCycle::Sleeping {
                            remaining: self.config.repeat_delay.sample(&mut self.rng).max(0.0),
                        }
                    };
                }
                active
            }
        };

        self.remainder += self.config.emission_rate.max(0.0) * active;
        let requested = self.remainder.floor();
        self.remainder -= requested;
        if requested < 1.0 {
            return;
        }

        scratch.clear();
        cpu_data.acquire(requested as u32, scratch);
        if scratch.is_empty() {
            return;
        }

        let mut ctx = EmissionContext {
            config: &self.config,
            origin,
            orientation,
            rng: &mut self.rng,
        };
        self.def.init_emitted_particles(cpu_data, scratch, &mut ctx);
    }
}

fn sample_duration(config: &EmitterConfig, rng: &mut StdRng) -> f32 {
    if config.duration.is_zero() {
        f32::INFINITY
    } else {
        config.duration.sample(rng).max(0.0)
    }
}

/// The live simulation state of one particle effect.
///
/// Holds the shared particle pool, every emitter's cycle state and the
/// affector chain. Attached automatically next to [`ParticleEffect3D`] once
/// the referenced asset has loaded.
#[derive(Component)]
pub struct EffectInstance {
    /// The shared particle pool, sized to the asset's quota.
    pub cpu_data: ParticleCpuData,
    /// One live instance per enabled-or-not emitter in the asset.
    pub emitters: Vec<EmitterInstance>,
    affectors: Vec<Box<dyn AffectorDef>>,
    rng: StdRng,
    scratch: Vec<u32>,
    packed: Vec<PackedParticle>,
}

impl EffectInstance {
    /// Builds an instance from an effect asset, resolving emitter and affector
    /// kinds through the given registries.
    ///
    /// Emitters and affectors whose kind is not registered are skipped with a
    /// warning rather than failing the whole effect.
    pub fn from_asset(
        asset: &ParticleEffectAsset,
        emitter_factories: &EmitterDefFactories,
        affector_factories: &AffectorDefFactories,
    ) -> Self {
        let mut emitters = Vec::with_capacity(asset.emitters.len());
        for config in &asset.emitters {
            let kind = config.shape.factory_name();
            match emitter_factories.create(kind) {
                Ok(def) => emitters.push(EmitterInstance::new(config.clone(), def)),
                Err(err) => {
                    warn!("skipping emitter \"{}\": {err}", config.name);
                }
            }
        }

        let mut affectors = Vec::with_capacity(asset.affectors.len());
        for config in &asset.affectors {
            let kind = config.factory_name();
            match affector_factories.create(kind) {
                Ok(mut def) => {
                    def.configure(config);
                    affectors.push(def);
                }
                Err(err) => {
                    warn!("skipping affector: {err}");
                }
            }
        }

        let seed = asset
            .emitters
            .iter()
            .find_map(|config| config.fixed_seed)
            .unwrap_or_else(rand_seed);

        Self {
            cpu_data: ParticleCpuData::with_capacity(asset.quota),
            emitters,
            affectors,
            rng: StdRng::seed_from_u64(seed),
            scratch: Vec::new(),
            packed: Vec::new(),
        }
    }

    /// Kills every alive particle without touching emitter state.
    pub fn clear(&mut self) {
        self.cpu_data.clear();
    }

    /// Clears all particles and restarts every emitter's cycle.
    pub fn restart(&mut self) {
        self.cpu_data.clear();
        for emitter in &mut self.emitters {
            emitter.restart();
        }
    }

    /// Advances the whole effect by `dt` seconds.
    ///
    /// `origin` and `orientation` are the world-space placement of the owning
    /// entity. Runs the frame pipeline in order: expiry, emission, affectors,
    /// integration.
    pub fn step(&mut self, origin: Vec3, orientation: Quat, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        self.cpu_data.age_and_expire(dt);

        for emitter in &mut self.emitters {
            emitter.step(&mut self.cpu_data, &mut self.scratch, origin, orientation, dt);
        }

        for affector in &self.affectors {
            affector.affect_particles(&mut self.cpu_data, dt, &mut self.rng);
        }

        for slot in 0..self.cpu_data.alive_count() {
            let i = self.cpu_data.alive_at(slot) as usize;
            // affectors may have reintroduced Z motion on flagged particles
            if self.cpu_data.flags[i].contains(ParticleFlags::DISABLE_Z) {
                self.cpu_data.direction[i].z = 0.0;
            }
            let direction = self.cpu_data.direction[i];
            self.cpu_data.position[i] += direction * dt;
            self.cpu_data.rotation[i] += self.cpu_data.rotation_speed[i] * dt;
        }
    }

    /// Packs the alive particles for a renderer and returns the buffer.
    pub fn packed_particles(&mut self) -> &[PackedParticle] {
        let Self {
            cpu_data, packed, ..
        } = self;
        cpu_data.write_packed(packed);
        packed
    }
}

fn rand_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    duration.as_nanos() as u64
}
