//! Combat module (bite attack + damage)
//!
//! ECS ответственность:
//! - Bite sequencer: windup → active (lunge + hit test) → recover
//! - Damage capability: `Damageable` (реализация: `Health`)
//! - Events: BiteLanded, EntityDied
//!
//! Hit detection абстрагирован через `HitDetector`: AI-тик спрашивает
//! "кто в радиусе укуса", не зная про ECS query.

use bevy::prelude::*;

pub mod bite;
pub mod components;
pub mod damage;
pub mod systems;

// Re-export основных типов
pub use bite::{LungeParams, PHASE_EPSILON};
pub use components::*;
pub use damage::{BiteHit, BiteLanded, Damageable, EntityDied, HitCandidate, HitDetector, NoTargets};

/// Combat Plugin
///
/// Регистрирует события и bookkeeping системы в FixedUpdate.
/// Сам укус тикает внутри `shark_ai_tick` (AIPlugin), здесь только
/// последствия: i-frames и события смерти.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<BiteLanded>()
            .add_event::<EntityDied>();

        app.add_systems(
            FixedUpdate,
            (
                systems::tick_invulnerability.before(crate::ai::shark_ai_tick),
                systems::announce_deaths.after(crate::ai::shark_ai_tick),
            ),
        );
    }
}
