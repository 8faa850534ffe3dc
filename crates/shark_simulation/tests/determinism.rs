//! Тесты детерминизма
//!
//! Демо-сцена с одинаковым seed должна давать идентичные результаты:
//! AI без wall clock, RNG только через `DeterministicRng`.

use bevy::prelude::*;
use shark_simulation::scenario::ScenarioPlugin;
use shark_simulation::{create_headless_app, world_snapshot, Health, Kinematics, SimulationPlugin};

/// Запускает демо-сцену и возвращает snapshot мира
fn run_simulation(seed: u64, tick_count: usize) -> Vec<u8> {
    let mut app = create_headless_app(seed);
    app.add_plugins((SimulationPlugin, ScenarioPlugin));

    // Startup + запуск часов
    app.update();

    for _ in 0..tick_count {
        app.update();
    }

    let world = app.world_mut();
    let mut snapshot = world_snapshot::<Kinematics>(world);
    snapshot.extend(world_snapshot::<Transform>(world));
    snapshot.extend(world_snapshot::<Health>(world));
    snapshot
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;
    const TICK_COUNT: usize = 1500;

    let snapshot1 = run_simulation(SEED, TICK_COUNT);
    let snapshot2 = run_simulation(SEED, TICK_COUNT);

    assert_eq!(
        snapshot1, snapshot2,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;
    const TICK_COUNT: usize = 500;

    // Запускаем 3 раза: все должны быть идентичны
    let snapshots: Vec<_> = (0..3).map(|_| run_simulation(SEED, TICK_COUNT)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}

#[test]
fn test_different_seeds_diverge() {
    // Ныряльщик выбирает курс из RNG с первого тика
    let a = run_simulation(1, 200);
    let b = run_simulation(2, 200);
    assert_ne!(a, b);
}
