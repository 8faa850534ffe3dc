//! AI decision-making module
//!
//! FSM акулы: Patrol ↔ Chase → Attack → (Chase | Patrol).
//! Логика целиком в `SharkBrain` (чистая структура, явный `tick(dt)`),
//! ECS слой только собирает сенсоры и раздаёт события.

use bevy::prelude::*;

pub mod brain;
pub mod chase;
pub mod components;
pub mod events;
pub mod patrol;
pub mod perception;
pub mod systems;


// Re-export основных типов
pub use brain::{Senses, SharkBrain, TickReport};
pub use chase::{chase, ChaseAction, ChaseParams};
pub use components::*;
pub use events::SharkCollided;
pub use patrol::PatrolRoute;
pub use perception::{scan, OccluderSet, OcclusionQuery, Perception};
pub use systems::{react_to_collisions, shark_ai_tick, shark_bundle, spawn_shark, sync_shark_transforms};

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. react_to_collisions: SharkCollided → разворот патруля
/// 2. shark_ai_tick: perception, FSM, движение, укус
/// 3. sync_shark_transforms: Kinematics → Transform
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SharkCollided>();

        app.add_systems(
            FixedUpdate,
            (
                systems::react_to_collisions,
                systems::shark_ai_tick,
                systems::sync_shark_transforms,
            )
                .chain(), // Последовательное выполнение для детерминизма
        );
    }
}
