mod affector;
pub(crate) mod serde_helpers;
/// Asset format version tracking and compatibility validation.
pub mod versioning;

pub use affector::{AffectorConfig, ColourStage, ForceApplication};

use bevy::{
    asset::{AssetLoader, LoadContext, io::Reader},
    prelude::*,
};
use bitflags::bitflags;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use serde_helpers::*;
use versioning::{VersionStatus, current_format_version};

/// Asset loader for [`ParticleEffectAsset`] files in RON format.
#[derive(Default, TypePath)]
pub struct ParticleEffectAssetLoader;

/// Errors that can occur when loading a [`ParticleEffectAsset`].
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ParticleEffectAssetLoaderError {
    /// An I/O error occurred while reading the asset file.
    #[error("Could not load asset: {0}")]
    Io(#[from] std::io::Error),
    /// The asset file contained invalid RON syntax.
    #[error("Could not parse RON: {0}")]
    Ron(#[from] ron::error::SpannedError),
    /// The asset file has an unknown format version, likely from a newer Embers.
    #[error("Unknown embers_version. You may need a newer version of Embers.")]
    UnknownVersion,
    /// The asset file has a version that requires breaking changes to upgrade.
    #[error(
        "Asset version \"{found}\" is incompatible with current version \"{current}\". Manual migration is required."
    )]
    IncompatibleVersion {
        /// The version found in the asset file.
        found: String,
        /// The current format version.
        current: String,
    },
}

impl AssetLoader for ParticleEffectAssetLoader {
    type Asset = ParticleEffectAsset;
    type Settings = ();
    type Error = ParticleEffectAssetLoaderError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &(),
        load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        let mut asset = ron::de::from_bytes::<ParticleEffectAsset>(&bytes)?;

        match asset.try_upgrade_version() {
            VersionStatus::Current => {}
            VersionStatus::Outdated { found, current } => {
                let path = load_context.path();
                warn!(
                    "{path:?}: loaded asset with embers_version \"{found}\", current is \"{current}\""
                );
            }
            VersionStatus::Incompatible { found, current } => {
                return Err(ParticleEffectAssetLoaderError::IncompatibleVersion {
                    found,
                    current: current.to_string(),
                });
            }
            VersionStatus::Unknown => {
                return Err(ParticleEffectAssetLoaderError::UnknownVersion);
            }
        }

        Ok(asset)
    }

    fn extensions(&self) -> &[&str] {
        &["ron"]
    }
}

bitflags! {
    /// Bitflags that control per-particle behavior for one emitter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ParticleFlags: u32 {
        /// If set, particles are kept in the emitter's local space instead of
        /// being stamped into world space at spawn time.
        const LOCAL_SPACE = 1 << 1;
        /// If set, emitted particles receive no Z-axis motion, confining them
        /// to a 2D plane.
        const DISABLE_Z = 1 << 2;
    }
}

/// A minimum/maximum range of `f32` values, used to randomize particle properties.
///
/// When a particle is spawned, a random value between [`min`](Self::min) and
/// [`max`](Self::max) is selected.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Reflect)]
pub struct Range {
    /// Lower bound of the range.
    pub min: f32,
    /// Upper bound of the range.
    pub max: f32,
}

impl Default for Range {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl Range {
    /// Creates a new range with the given bounds.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Creates a range where both bounds are the same value.
    pub fn splat(value: f32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Samples a random value between `min` and `max`, inclusive.
    pub fn sample(&self, rng: &mut impl Rng) -> f32 {
        let (lo, hi) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        if (hi - lo).abs() < f32::EPSILON {
            lo
        } else {
            rng.gen_range(lo..=hi)
        }
    }

    /// Creates a degenerate range that always samples `0.0`.
    pub fn zero() -> Self {
        Self { min: 0.0, max: 0.0 }
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.min == 0.0 && self.max == 0.0
    }
}

/// The region in which an emitter spawns its particles.
///
/// Each variant maps to a stable factory name in
/// [`EmitterDefFactories`](crate::emitters::EmitterDefFactories), so user
/// crates can register additional emitter kinds alongside the built-in ones.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Reflect)]
pub enum EmitterShape {
    /// All particles are emitted from a single point.
    #[default]
    Point,
    /// Particles are emitted within the volume of an axis-aligned box.
    Box {
        /// Half-extents of the box along each axis.
        half_extents: Vec3,
    },
    /// Particles are emitted within the volume of an ellipsoid.
    Ellipsoid {
        /// Half-extents of the ellipsoid along each axis.
        half_extents: Vec3,
    },
    /// Particles are emitted within a hollow shell of an ellipsoid.
    HollowEllipsoid {
        /// Half-extents of the ellipsoid along each axis.
        half_extents: Vec3,
        /// Inner shell boundary as a ratio of the half-extents, per axis,
        /// from `0.0` (solid) to `1.0` (surface only).
        inner_ratio: Vec3,
    },
    /// Particles are emitted within a flat annulus in the local XY plane.
    Ring {
        /// Outer radius of the ring.
        radius: f32,
        /// Inner boundary as a ratio of the outer radius. A value of `0.0`
        /// fills the entire disc.
        inner_ratio: f32,
        /// Extent of the ring along the local Z axis.
        depth: f32,
    },
    /// Particles are emitted within a cylinder aligned to the local Z axis.
    Cylinder {
        /// Half-extents: X/Y are the cross-section radii, Z is half the height.
        half_extents: Vec3,
    },
}

impl EmitterShape {
    /// Returns the stable factory name this shape resolves to.
    pub fn factory_name(&self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Box { .. } => "box",
            Self::Ellipsoid { .. } => "ellipsoid",
            Self::HollowEllipsoid { .. } => "hollow_ellipsoid",
            Self::Ring { .. } => "ring",
            Self::Cylinder { .. } => "cylinder",
        }
    }

    fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

fn default_direction() -> Vec3 {
    Vec3::X
}

fn default_emission_rate() -> f32 {
    10.0
}

fn default_velocity() -> Range {
    Range::splat(1.0)
}

fn default_time_to_live() -> Range {
    Range::splat(5.0)
}

fn default_dimensions() -> Vec2 {
    Vec2::ONE
}

fn default_colour() -> Vec4 {
    Vec4::ONE
}

/// Complete configuration for a single particle emitter.
///
/// These are the emission parameters every emitter kind shares; the
/// [`shape`](Self::shape) selects which emitter definition positions the
/// spawned particles.
#[derive(Debug, Clone, Serialize, Deserialize, Reflect)]
pub struct EmitterConfig {
    /// Display name for this emitter.
    pub name: String,
    /// Whether this emitter is active. Disabled emitters do not spawn particles.
    ///
    /// Defaults to `true`.
    #[serde(default = "default_enabled", skip_serializing_if = "is_true")]
    pub enabled: bool,

    /// The shape of the emission region. Defaults to [`EmitterShape::Point`].
    #[serde(default, skip_serializing_if = "EmitterShape::is_default")]
    pub shape: EmitterShape,

    /// Position offset of this emitter relative to the particle effect entity.
    ///
    /// Defaults to [`Vec3::ZERO`].
    #[serde(default, skip_serializing_if = "is_zero_vec3")]
    pub position: Vec3,

    /// Unit vector specifying the base emission direction. Defaults to `Vec3::X`.
    #[serde(default = "default_direction")]
    pub direction: Vec3,

    /// The angular spread in degrees. Each particle's initial direction deviates
    /// from [`direction`](Self::direction) by up to this angle. Defaults to `0.0`
    /// (all particles travel exactly along the base direction).
    #[serde(default, skip_serializing_if = "is_zero_f32")]
    pub angle: f32,

    /// The number of particles emitted per second. Defaults to `10.0`.
    #[serde(default = "default_emission_rate")]
    pub emission_rate: f32,

    /// The initial speed range, in units per second. Each particle receives a
    /// random speed between `min` and `max`, applied in its emission direction.
    /// Defaults to `1.0..1.0`.
    #[serde(default = "default_velocity")]
    pub velocity: Range,

    /// The amount of time each particle will exist, in seconds. Defaults to `5.0..5.0`.
    #[serde(default = "default_time_to_live")]
    pub time_to_live: Range,

    /// How long the emitter runs before pausing, in seconds.
    ///
    /// A new duration is sampled from this range at the start of each emission
    /// cycle. A range of `0.0..0.0` means the emitter runs forever. Defaults
    /// to `0.0..0.0`.
    #[serde(default = "Range::zero", skip_serializing_if = "Range::is_zero")]
    pub duration: Range,

    /// How long the emitter sleeps between emission cycles, in seconds.
    ///
    /// Only used when [`duration`](Self::duration) is non-zero. A range of
    /// `0.0..0.0` makes the emitter stop for good once its duration elapses.
    /// Defaults to `0.0..0.0`.
    #[serde(default = "Range::zero", skip_serializing_if = "Range::is_zero")]
    pub repeat_delay: Range,

    /// Each particle's colour at spawn time is a random blend between this
    /// and [`colour_end`](Self::colour_end), as linear RGBA. Defaults to opaque white.
    #[serde(default = "default_colour", skip_serializing_if = "is_one_vec4")]
    pub colour_start: Vec4,

    /// Upper bound of the spawn colour blend, as linear RGBA. Defaults to opaque white.
    #[serde(default = "default_colour", skip_serializing_if = "is_one_vec4")]
    pub colour_end: Vec4,

    /// Width and height of each spawned particle, in world units. Defaults to `Vec2::ONE`.
    #[serde(default = "default_dimensions", skip_serializing_if = "is_one_vec2")]
    pub dimensions: Vec2,

    /// The initial rotation angle range in degrees. Defaults to `0.0..0.0`.
    #[serde(default = "Range::zero", skip_serializing_if = "Range::is_zero")]
    pub rotation: Range,

    /// The rotation speed range in degrees per second. Defaults to `0.0..0.0`.
    #[serde(default = "Range::zero", skip_serializing_if = "Range::is_zero")]
    pub rotation_speed: Range,

    /// Bitflags controlling per-particle behavior (local space, Z-axis disable).
    #[serde(default)]
    #[reflect(ignore)]
    pub flags: ParticleFlags,

    /// Optional fixed random seed for deterministic emission.
    ///
    /// When set, this emitter produces the same particle stream across replays,
    /// which is useful for cinematics or testing. Defaults to `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_seed: Option<u64>,
}

fn default_enabled() -> bool {
    true
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            name: "Emitter".to_string(),
            enabled: true,
            shape: EmitterShape::default(),
            position: Vec3::ZERO,
            direction: Vec3::X,
            angle: 0.0,
            emission_rate: default_emission_rate(),
            velocity: default_velocity(),
            time_to_live: default_time_to_live(),
            duration: Range::zero(),
            repeat_delay: Range::zero(),
            colour_start: Vec4::ONE,
            colour_end: Vec4::ONE,
            dimensions: Vec2::ONE,
            rotation: Range::zero(),
            rotation_speed: Range::zero(),
            flags: ParticleFlags::empty(),
            fixed_seed: None,
        }
    }
}

fn default_quota() -> u32 {
    500
}

/// A complete particle effect asset, loadable from RON files.
///
/// Contains the particle quota plus the emitters and affectors that together
/// define an effect. Load this asset and reference it from a
/// [`ParticleEffect3D`](crate::ParticleEffect3D) component to run the effect.
#[derive(Asset, TypePath, Debug, Clone, Serialize, Deserialize)]
pub struct ParticleEffectAsset {
    embers_version: String,
    /// Display name for this particle effect.
    pub name: String,
    /// Maximum number of particles alive at once, shared by all emitters.
    ///
    /// Emission requests beyond the quota are dropped until particles expire.
    /// Defaults to `500`.
    #[serde(default = "default_quota")]
    pub quota: u32,
    /// The list of emitters that make up this effect.
    pub emitters: Vec<EmitterConfig>,
    /// Affectors that modify alive particles every frame.
    #[serde(default)]
    pub affectors: Vec<AffectorConfig>,
}

impl ParticleEffectAsset {
    /// Creates a new particle effect asset with the current format version.
    pub fn new(
        name: String,
        quota: u32,
        emitters: Vec<EmitterConfig>,
        affectors: Vec<AffectorConfig>,
    ) -> Self {
        Self {
            embers_version: current_format_version().to_string(),
            name,
            quota,
            emitters,
            affectors,
        }
    }

    /// Validates this asset's `embers_version` against the current format version.
    ///
    /// If the version is outdated but compatible, it is automatically upgraded.
    /// Returns the original [`VersionStatus`] so the caller can react accordingly.
    pub fn try_upgrade_version(&mut self) -> VersionStatus {
        let status = versioning::validate_version(&self.embers_version);
        if matches!(status, VersionStatus::Outdated { .. }) {
            self.embers_version = current_format_version().to_string();
        }
        status
    }
}
