use sand_accelerator::*;

/// Headless stand-in for a frame loop: pours sand for a while, then lets the
/// pile settle and prints the HUD figures every half second.
fn main() {
    let config = SimulationConfig::default().with_seed(7);
    let mut system = match ParticleSystem::new(config) {
        Ok(system) => system,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return;
        }
    };
    system.set_parallel_enabled(true);

    let spawn_x = system.config().world_width / 2.0;
    for frame in 0..600 {
        if frame < 300 {
            system.spawn(spawn_x, 100.0, 10);
        }
        system.step(clamp_frame_dt(1.0 / 60.0));

        if frame % 30 == 0 {
            let stats = system.stats();
            println!(
                "frame {frame:>3}: particles {:>4}, active {:>4}, collisions {:>5}, avg {:>6.1}, max {:>6.1}",
                system.particle_count(),
                stats.active_bodies,
                stats.collisions,
                stats.avg_speed,
                stats.max_speed
            );
        }
    }

    let profile = system.profile();
    println!(
        "last step: {:.3} ms (integrate {:.3} ms, grid {:.3} ms, solver {:.3} ms)",
        profile.total_frame_time.as_secs_f32() * 1000.0,
        profile.integration_time.as_secs_f32() * 1000.0,
        profile.broad_phase_time.as_secs_f32() * 1000.0,
        profile.solver_time.as_secs_f32() * 1000.0
    );
}
