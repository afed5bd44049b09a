use sand_accelerator::*;

const DT: f32 = 1.0 / 60.0;

fn run_script(seed: u64) -> ParticleSystem {
    let mut system = ParticleSystem::new(SimulationConfig::default().with_seed(seed)).unwrap();
    let dts = [DT, 1.0 / 120.0, MAX_FRAME_DT, 0.004];
    for frame in 0..180 {
        if frame % 10 == 0 {
            system.spawn(500.0 + frame as f32, 300.0, 40);
        }
        system.step(dts[frame % dts.len()]);
    }
    system
}

#[test]
fn same_seed_and_timesteps_reproduce_the_run() {
    let a = run_script(99);
    let b = run_script(99);

    assert_eq!(a.particle_count(), b.particle_count());
    assert_eq!(a.particles(), b.particles());
    assert_eq!(a.stats(), b.stats());
}

#[test]
fn spawn_never_exceeds_capacity() {
    let config = SimulationConfig::default().with_max_particles(50).with_seed(1);
    let mut system = ParticleSystem::new(config).unwrap();

    assert_eq!(system.spawn(100.0, 100.0, 30), 30);
    assert_eq!(system.spawn(100.0, 100.0, 30), 20);
    assert_eq!(system.spawn(100.0, 100.0, 5), 0);
    assert_eq!(system.spawn(100.0, 100.0, 0), 0);
    assert_eq!(system.particle_count(), 50);

    system.step(DT);
    system.clear();
    assert_eq!(system.spawn(100.0, 100.0, usize::MAX), 50);
}

#[test]
fn particles_stay_inside_the_world() {
    let mut system = ParticleSystem::new(SimulationConfig::default().with_seed(8)).unwrap();
    let width = system.config().world_width;
    let height = system.config().world_height;
    let eps = 1e-3;

    for frame in 0..240 {
        if frame < 40 {
            system.spawn(4.0, height - 6.0, 20);
            system.spawn(width - 4.0, height - 6.0, 20);
            system.spawn(width / 2.0, 50.0, 20);
        }
        system.step(MAX_FRAME_DT);

        for particle in system.particles() {
            let r = particle.radius();
            assert!(particle.position.y + r <= height + eps, "below floor at frame {frame}");
            assert!(particle.position.x - r >= -eps, "past left wall at frame {frame}");
            assert!(particle.position.x + r <= width + eps, "past right wall at frame {frame}");
        }
    }
}

#[test]
fn impulses_respect_the_configured_bound() {
    let config = SimulationConfig::default().with_max_impulse(5.0).with_seed(21);
    let mut system = ParticleSystem::new(config).unwrap();
    let mut saw_collision = false;

    for frame in 0..200 {
        if frame < 20 {
            system.spawn(600.0, 200.0, 50);
        }
        system.step(DT);

        let stats = system.stats();
        assert!(stats.peak_impulse <= 5.0 + 1e-6, "impulse {}", stats.peak_impulse);
        saw_collision |= stats.collisions > 0;
    }

    assert!(saw_collision, "pile never produced an impulse");
}

#[test]
fn resting_particle_falls_asleep_after_a_third_of_the_threshold() {
    let config = SimulationConfig::default().with_spawn_jitter(0.0).with_seed(4);
    let mut system = ParticleSystem::new(config).unwrap();
    let floor = system.config().world_height - system.config().particle_radius;
    let quiet_frames = system.config().sleep_frames / 3;
    system.spawn(600.0, floor, 1);

    for _ in 0..quiet_frames {
        system.step(DT);
        assert_eq!(system.stats().active_bodies, 1);
    }
    system.step(DT);
    assert_eq!(system.stats().active_bodies, 0);
}

#[test]
fn falling_particle_wakes_a_sleeping_one() {
    let config = SimulationConfig::default().with_spawn_jitter(0.0).with_seed(4);
    let mut system = ParticleSystem::new(config).unwrap();
    let floor = system.config().world_height - system.config().particle_radius;
    let sleep_frames = system.config().sleep_frames;

    // Index 0 drops onto index 1, which is already resting on the floor.
    system.spawn(600.0, floor - 18.0, 1);
    system.spawn(600.0, floor, 1);

    let mut was_asleep = false;
    let mut woke = false;
    for _ in 0..120 {
        system.step(DT);
        let resting = &system.particles()[1];
        if resting.sleep_counter > sleep_frames {
            was_asleep = true;
        } else if was_asleep && resting.sleep_counter == 0 {
            woke = true;
            break;
        }
    }

    assert!(was_asleep, "resting particle never fell asleep");
    assert!(woke, "collision did not wake the resting particle");
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_integration_matches_sequential() {
    use approx::assert_relative_eq;

    let config = SimulationConfig::default().with_seed(77);
    let mut sequential = ParticleSystem::new(config.clone()).unwrap();
    let mut parallel = ParticleSystem::new(config).unwrap();
    parallel.set_parallel_enabled(true);
    assert!(parallel.parallel_enabled());

    for frame in 0..90 {
        if frame % 15 == 0 {
            sequential.spawn(400.0, 300.0, 200);
            parallel.spawn(400.0, 300.0, 200);
        }
        sequential.step(DT);
        parallel.step(DT);
    }

    assert_eq!(sequential.particles(), parallel.particles());
    assert_eq!(sequential.stats().collisions, parallel.stats().collisions);
    assert_relative_eq!(
        sequential.stats().avg_speed,
        parallel.stats().avg_speed,
        max_relative = 1e-4
    );
}
