//! CPU-side particle storage.
//!
//! Particles live in structure-of-arrays buffers indexed by stable `u32`
//! handles. Emitters write into the buffers for the handles they are given,
//! affectors and the integrator mutate them in place, and
//! [`ParticleCpuData::write_packed`] produces a tightly packed POD view of the
//! alive particles for a renderer to upload.

use bevy::prelude::*;
use bytemuck::{Pod, Zeroable};

use crate::asset::ParticleFlags;

/// Structure-of-arrays storage for every particle of one effect.
///
/// A handle is alive from the moment [`acquire`](Self::acquire) hands it out
/// until [`age_and_expire`](Self::age_and_expire) or [`clear`](Self::clear)
/// reclaims it. Handles index directly into the attribute buffers.
pub struct ParticleCpuData {
    /// World- or local-space position.
    pub position: Vec<Vec3>,
    /// Velocity vector; direction and magnitude combined.
    pub direction: Vec<Vec3>,
    /// Width and height in world units.
    pub dimensions: Vec<Vec2>,
    /// Rotation around the facing axis, in radians.
    pub rotation: Vec<f32>,
    /// Rotation speed in radians per second.
    pub rotation_speed: Vec<f32>,
    /// Linear RGBA colour.
    pub colour: Vec<Vec4>,
    /// The lifetime this particle started with, in seconds.
    pub total_time_to_live: Vec<f32>,
    /// Remaining lifetime, in seconds.
    pub time_to_live: Vec<f32>,
    /// Behavior flags inherited from the owning emitter at spawn time.
    pub flags: Vec<ParticleFlags>,

    // alive handles in emission order; free handles are recycled LIFO
    alive: Vec<u32>,
    free: Vec<u32>,
}

impl ParticleCpuData {
    /// Creates storage for up to `quota` particles. All handles start free.
    pub fn with_capacity(quota: u32) -> Self {
        let n = quota as usize;
        Self {
            position: vec![Vec3::ZERO; n],
            direction: vec![Vec3::ZERO; n],
            dimensions: vec![Vec2::ONE; n],
            rotation: vec![0.0; n],
            rotation_speed: vec![0.0; n],
            colour: vec![Vec4::ONE; n],
            total_time_to_live: vec![0.0; n],
            time_to_live: vec![0.0; n],
            flags: vec![ParticleFlags::empty(); n],
            alive: Vec::with_capacity(n),
            free: (0..quota).rev().collect(),
        }
    }

    /// Total number of particle slots.
    pub fn capacity(&self) -> u32 {
        self.position.len() as u32
    }

    /// Number of currently alive particles.
    pub fn alive_count(&self) -> usize {
        self.alive.len()
    }

    /// Number of handles available for [`acquire`](Self::acquire).
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// The alive handle at the given slot, in emission order.
    ///
    /// Slots are only stable within a frame; expiry may swap-remove entries.
    pub fn alive_at(&self, slot: usize) -> u32 {
        self.alive[slot]
    }

    /// Hands out up to `count` fresh handles, appending them to `out`.
    ///
    /// Returns how many were actually acquired, which is less than `count`
    /// when the quota is exhausted.
    pub fn acquire(&mut self, count: u32, out: &mut Vec<u32>) -> u32 {
        let mut acquired = 0;
        for _ in 0..count {
            let Some(handle) = self.free.pop() else {
                break;
            };
            self.alive.push(handle);
            out.push(handle);
            acquired += 1;
        }
        acquired
    }

    /// Ages every alive particle by `dt` and reclaims the ones whose lifetime
    /// ran out. Returns how many particles expired.
    pub fn age_and_expire(&mut self, dt: f32) -> usize {
        let mut expired = 0;
        let mut slot = 0;
        while slot < self.alive.len() {
            let i = self.alive[slot] as usize;
            self.time_to_live[i] -= dt;
            if self.time_to_live[i] <= 0.0 {
                self.time_to_live[i] = 0.0;
                let handle = self.alive.swap_remove(slot);
                self.free.push(handle);
                expired += 1;
            } else {
                slot += 1;
            }
        }
        expired
    }

    /// Kills one particle by handle, returning it to the free list.
    ///
    /// Returns `false` if the handle was not alive.
    pub fn kill(&mut self, handle: u32) -> bool {
        let Some(slot) = self.alive.iter().position(|&h| h == handle) else {
            return false;
        };
        self.alive.swap_remove(slot);
        self.time_to_live[handle as usize] = 0.0;
        self.free.push(handle);
        true
    }

    /// Reclaims every alive particle immediately.
    pub fn clear(&mut self) {
        for handle in self.alive.drain(..) {
            self.free.push(handle);
        }
    }

    /// Fills `out` with a packed POD view of the alive particles, in emission
    /// order. This is the hand-off boundary toward a GPU renderer.
    pub fn write_packed(&self, out: &mut Vec<PackedParticle>) {
        out.clear();
        out.reserve(self.alive.len());
        for &handle in &self.alive {
            let i = handle as usize;
            let position = self.position[i];
            let dimensions = self.dimensions[i];
            let total = self.total_time_to_live[i];
            let age_fraction = if total > 0.0 {
                1.0 - self.time_to_live[i] / total
            } else {
                1.0
            };
            out.push(PackedParticle {
                position: [position.x, position.y, position.z, self.rotation[i]],
                dimensions: [dimensions.x, dimensions.y, age_fraction, 0.0],
                colour: self.colour[i].to_array(),
            });
        }
    }
}

/// One alive particle, packed for upload to a GPU-facing renderer.
#[repr(C)]
#[derive(Clone, Copy, Default, Pod, Zeroable)]
pub struct PackedParticle {
    /// xyz position + rotation in radians.
    pub position: [f32; 4],
    /// xy dimensions + normalized age (`0.0` at spawn, `1.0` at expiry) + padding.
    pub dimensions: [f32; 4],
    /// Linear RGBA colour.
    pub colour: [f32; 4],
}
