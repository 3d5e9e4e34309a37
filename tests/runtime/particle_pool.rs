use bevy::prelude::*;
use bevy_embers::particles::ParticleCpuData;

#[test]
fn new_pool_is_empty() {
    let pool = ParticleCpuData::with_capacity(10);
    assert_eq!(pool.capacity(), 10);
    assert_eq!(pool.alive_count(), 0);
    assert_eq!(pool.free_count(), 10);
}

#[test]
fn acquire_hands_out_unique_handles() {
    let mut pool = ParticleCpuData::with_capacity(8);
    let mut handles = Vec::new();
    let acquired = pool.acquire(5, &mut handles);

    assert_eq!(acquired, 5);
    assert_eq!(handles.len(), 5);
    assert_eq!(pool.alive_count(), 5);
    assert_eq!(pool.free_count(), 3);

    let mut sorted = handles.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), 5, "handles must be unique");
}

#[test]
fn acquire_is_capped_at_quota() {
    let mut pool = ParticleCpuData::with_capacity(4);
    let mut handles = Vec::new();
    let acquired = pool.acquire(100, &mut handles);

    assert_eq!(acquired, 4);
    assert_eq!(pool.alive_count(), 4);
    assert_eq!(pool.free_count(), 0);

    let more = pool.acquire(1, &mut handles);
    assert_eq!(more, 0);
}

#[test]
fn expired_particles_are_reclaimed() {
    let mut pool = ParticleCpuData::with_capacity(4);
    let mut handles = Vec::new();
    pool.acquire(3, &mut handles);

    pool.time_to_live[handles[0] as usize] = 0.5;
    pool.time_to_live[handles[1] as usize] = 2.0;
    pool.time_to_live[handles[2] as usize] = 0.1;

    let expired = pool.age_and_expire(1.0);
    assert_eq!(expired, 2);
    assert_eq!(pool.alive_count(), 1);
    assert_eq!(pool.free_count(), 3);
    assert_eq!(pool.alive_at(0), handles[1]);
}

#[test]
fn expired_handles_are_reusable() {
    let mut pool = ParticleCpuData::with_capacity(2);
    let mut handles = Vec::new();
    pool.acquire(2, &mut handles);
    pool.time_to_live[handles[0] as usize] = 0.1;
    pool.time_to_live[handles[1] as usize] = 0.1;
    pool.age_and_expire(1.0);

    let mut fresh = Vec::new();
    assert_eq!(pool.acquire(2, &mut fresh), 2);
}

#[test]
fn kill_reclaims_a_single_handle() {
    let mut pool = ParticleCpuData::with_capacity(4);
    let mut handles = Vec::new();
    pool.acquire(3, &mut handles);

    assert!(pool.kill(handles[1]));
    assert_eq!(pool.alive_count(), 2);
    assert_eq!(pool.free_count(), 2);

    // already dead, nothing to reclaim
    assert!(!pool.kill(handles[1]));
}

#[test]
fn clear_kills_everything() {
    let mut pool = ParticleCpuData::with_capacity(6);
    let mut handles = Vec::new();
    pool.acquire(6, &mut handles);

    pool.clear();
    assert_eq!(pool.alive_count(), 0);
    assert_eq!(pool.free_count(), 6);
}

#[test]
fn packed_view_covers_alive_particles_in_emission_order() {
    let mut pool = ParticleCpuData::with_capacity(4);
    let mut handles = Vec::new();
    pool.acquire(2, &mut handles);

    for (n, &handle) in handles.iter().enumerate() {
        let i = handle as usize;
        pool.position[i] = Vec3::splat(n as f32 + 1.0);
        pool.colour[i] = Vec4::new(0.5, 0.5, 0.5, 1.0);
        pool.total_time_to_live[i] = 2.0;
        pool.time_to_live[i] = 1.0;
    }

    let mut packed = Vec::new();
    pool.write_packed(&mut packed);

    assert_eq!(packed.len(), 2);
    assert_eq!(packed[0].position[0], 1.0);
    assert_eq!(packed[1].position[0], 2.0);
    // half the lifetime is gone
    assert!((packed[0].dimensions[2] - 0.5).abs() < 1e-6);
    assert_eq!(packed[0].colour, [0.5, 0.5, 0.5, 1.0]);
}

#[test]
fn packed_view_is_rewritten_each_call() {
    let mut pool = ParticleCpuData::with_capacity(4);
    let mut handles = Vec::new();
    pool.acquire(3, &mut handles);
    for &handle in &handles {
        pool.time_to_live[handle as usize] = 1.0;
        pool.total_time_to_live[handle as usize] = 1.0;
    }

    let mut packed = Vec::new();
    pool.write_packed(&mut packed);
    assert_eq!(packed.len(), 3);

    pool.clear();
    pool.write_packed(&mut packed);
    assert!(packed.is_empty());
}
