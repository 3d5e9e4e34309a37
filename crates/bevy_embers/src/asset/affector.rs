use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::serde_helpers::*;

/// How a [`LinearForce`](AffectorConfig::LinearForce) affector combines its
/// force with a particle's velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Reflect)]
pub enum ForceApplication {
    /// The force is scaled by the frame delta and added to the velocity.
    #[default]
    Add,
    /// The velocity is averaged with the force vector, giving a constant pull
    /// toward the force regardless of frame rate.
    Average,
}

/// One stop of a [`ColourInterpolator`](AffectorConfig::ColourInterpolator)
/// gradient, positioned along a particle's normalized lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
pub struct ColourStage {
    /// Position along the particle's lifetime, from `0.0` (spawn) to `1.0` (expiry).
    pub time: f32,
    /// Particle colour at this position, as linear RGBA.
    pub colour: Vec4,
}

fn default_randomness() -> f32 {
    1.0
}

fn default_scope() -> f32 {
    1.0
}

fn default_bounce() -> f32 {
    1.0
}

/// Configuration for an affector that modifies alive particles every frame.
///
/// Each variant maps to a stable factory name in
/// [`AffectorDefFactories`](crate::affectors::AffectorDefFactories), so user
/// crates can register additional affector kinds alongside the built-in ones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Reflect)]
pub enum AffectorConfig {
    /// Applies a constant force (such as gravity or wind) to every particle.
    LinearForce {
        /// The force vector, in units per second squared.
        force: Vec3,
        /// How the force combines with particle velocity. Defaults to
        /// [`ForceApplication::Add`].
        #[serde(default)]
        application: ForceApplication,
    },
    /// Adjusts particle colour components by a fixed amount per second.
    ///
    /// Components are clamped to `[0.0, 1.0]`. Negative values fade a channel
    /// out; a negative alpha delta is the classic fade-to-transparent.
    ColourFader {
        /// Per-second adjustment for each RGBA component.
        adjust: Vec4,
    },
    /// Interpolates particle colour through a sequence of stages over each
    /// particle's lifetime.
    ColourInterpolator {
        /// Colour stages ordered by [`ColourStage::time`].
        stages: Vec<ColourStage>,
    },
    /// Grows or shrinks particle dimensions over time.
    Scaler {
        /// Amount added to both particle dimensions per second. Negative
        /// values shrink particles; dimensions are clamped at zero.
        rate: f32,
    },
    /// Reflects particles that would cross a plane, like sparks bouncing off
    /// the ground.
    DeflectorPlane {
        /// A point on the plane.
        #[serde(default, skip_serializing_if = "is_zero_vec3")]
        point: Vec3,
        /// The plane normal. Particles moving against the normal are deflected.
        normal: Vec3,
        /// Velocity retained after deflection, from `0.0` (stop dead) to `1.0`
        /// (perfect bounce). Defaults to `1.0`.
        #[serde(default = "default_bounce")]
        bounce: f32,
    },
    /// Adds random jitter to particle velocity for a turbulent look.
    DirectionRandomiser {
        /// Maximum velocity deviation added per second. Defaults to `1.0`.
        #[serde(default = "default_randomness")]
        randomness: f32,
        /// Chance for each particle to be affected each frame, from `0.0` to
        /// `1.0`. Defaults to `1.0` (all particles, every frame).
        #[serde(default = "default_scope")]
        scope: f32,
        /// If `true`, particle speed is preserved and only the direction is
        /// randomised. Defaults to `false`.
        #[serde(default, skip_serializing_if = "is_false")]
        keep_velocity: bool,
    },
}

impl AffectorConfig {
    /// Returns the stable factory name this affector resolves to.
    pub fn factory_name(&self) -> &'static str {
        match self {
            Self::LinearForce { .. } => "linear_force",
            Self::ColourFader { .. } => "colour_fader",
            Self::ColourInterpolator { .. } => "colour_interpolator",
            Self::Scaler { .. } => "scaler",
            Self::DeflectorPlane { .. } => "deflector_plane",
            Self::DirectionRandomiser { .. } => "direction_randomiser",
        }
    }
}
