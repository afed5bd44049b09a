use approx::assert_abs_diff_eq;
use sand_accelerator::*;

const DT: f32 = 1.0 / 60.0;

fn exact_system() -> ParticleSystem {
    let config = SimulationConfig::default().with_spawn_jitter(0.0).with_seed(3);
    ParticleSystem::new(config).expect("default config should be valid")
}

#[test]
fn spawn_hundred_particles_into_empty_system() {
    let mut system = ParticleSystem::new(SimulationConfig::default().with_seed(2024)).unwrap();

    let spawned = system.spawn(100.0, 100.0, 100);

    assert_eq!(spawned, 100);
    assert_eq!(system.particle_count(), 100);
    for particle in system.particles() {
        assert!((90.0..=110.0).contains(&particle.position.x));
        assert!((90.0..=110.0).contains(&particle.position.y));
        assert_eq!(particle.velocity, Vec2::ZERO);
        assert_eq!(particle.sleep_counter, 0);
        assert_eq!(particle.radius(), system.config().particle_radius);
    }
}

#[test]
fn lone_particle_settles_on_the_floor() {
    let mut system = exact_system();
    system.spawn(600.0, 100.0, 1);

    for _ in 0..600 {
        system.step(DT);
    }

    let particle = &system.particles()[0];
    let floor = system.config().world_height - particle.radius();
    assert_abs_diff_eq!(particle.position.y, floor, epsilon = 1e-3);
    assert_abs_diff_eq!(particle.velocity.y, 0.0, epsilon = 1e-3);
    assert_abs_diff_eq!(particle.position.x, 600.0, epsilon = 1e-3);
}

#[test]
fn overlapping_pair_separates_after_one_step() {
    let mut system = exact_system();
    system.spawn(600.0, 400.0, 1);
    system.spawn(603.0, 400.0, 1);
    let min_separation = system.config().min_separation;

    let before = system.particles()[0]
        .position
        .distance(system.particles()[1].position);
    system.step(DT);
    let after = system.particles()[0]
        .position
        .distance(system.particles()[1].position);

    assert!(before < min_separation);
    assert!(after > before, "pair did not separate: {before} -> {after}");
    assert!(after <= min_separation, "overshot the separation: {after}");
    // Resting pair: corrected but not counted as an impulse collision.
    assert_eq!(system.stats().collisions, 0);
}

#[test]
fn clear_resets_particles_and_stats() {
    let mut system = ParticleSystem::new(SimulationConfig::default().with_seed(5)).unwrap();
    system.spawn(600.0, 700.0, 400);
    for _ in 0..30 {
        system.step(DT);
    }
    assert!(system.stats().max_speed > 0.0);

    system.clear();

    assert_eq!(system.particle_count(), 0);
    assert!(system.particles().is_empty());
    assert_eq!(system.stats(), FrameStats::default());
    assert_eq!(system.stats().collisions, 0);
    assert_eq!(system.stats().active_bodies, 0);

    system.step(DT);
    assert_eq!(system.stats(), FrameStats::default());
}
