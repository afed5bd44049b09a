use sand_accelerator::{ParticleSystem, SimulationConfig};
use std::sync::{Arc, Mutex};
use std::thread;

#[test]
fn test_particle_system_is_sync_and_send() {
    fn assert_sync_send<T: Sync + Send>() {}
    assert_sync_send::<ParticleSystem>();
}

#[test]
fn test_shared_particle_system_across_threads() {
    let config = SimulationConfig::default().with_seed(12);
    let system = Arc::new(Mutex::new(ParticleSystem::new(config).unwrap()));

    let mut handles = vec![];
    for i in 0..4 {
        let system_clone = Arc::clone(&system);
        let handle = thread::spawn(move || {
            let mut system = system_clone.lock().unwrap();
            system.spawn(200.0 + i as f32 * 100.0, 100.0, 25);
            system.step(1.0 / 60.0);
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(system.lock().unwrap().particle_count(), 100);
}
