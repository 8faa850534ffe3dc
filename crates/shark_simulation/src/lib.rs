//! Shark AI Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: акула в 2D водоёме патрулирует,
//! замечает цель, преследует и кусает (windup → lunge → recover).
//!
//! Слои:
//! - `ai::SharkBrain`: чистая логика (perception, FSM, bite session)
//! - `physics`: steering, confinement, интегрирование (без движка)
//! - ECS systems: сбор сенсоров, события, синхронизация Transform

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod logger;
pub mod physics;
pub mod scenario;

// Re-export базовых компонентов для удобства
pub use ai::{AIPlugin, SharkAi, SharkBrain, SharkCollided, SharkConfig, SharkState};
pub use combat::{BiteLanded, BiteStats, CombatPlugin, EntityDied};
pub use components::*;
pub use logger::{init_logger, log, log_error, log_info, log_warning};

/// Частота fixed step (Hz); dt = 0.02
pub const SIMULATION_HZ: f64 = 50.0;

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Fixed timestep 50Hz для simulation tick
        app.insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ));

        // Детерминистичный RNG (seed по умолчанию, если create_headless_app не задал свой)
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        // Подсистемы
        app.add_plugins((CombatPlugin, AIPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время двигается вручную ровно на один fixed step за `app.update()`,
/// поэтому тики AI не зависят от wall clock. Первый update только
/// запускает часы (delta = 0): после него каждый update = один тик.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / SIMULATION_HZ,
        )));

    app
}

/// Snapshot мира для сравнения детерминизма
/// (сериализация через Debug: достаточно для сравнения двух прогонов)
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
