//! Damage capability и hit detection.
//!
//! AI не знает, кто именно получает урон: hit test спрашивает
//! `HitDetector` о первом damageable в радиусе, а тот отдаёт
//! `&mut dyn Damageable`. ECS-реализация детектора живёт в
//! `ai::systems::fsm` (query по `Hurtbox` + `Health`).

use bevy::prelude::*;
use crate::components::HitMask;

/// Всё, что может получить урон от укуса.
///
/// Вызывается не чаще одного раза за bite session; health/смерть -
/// ответственность реализации.
pub trait Damageable {
    fn take_damage(&mut self, amount: f32, hit_direction: Vec2, knockback: f32);
}

/// Кандидат на попадание: центр его bounds + доступ к урону
pub struct HitCandidate<'a> {
    pub center: Vec2,
    pub target: &'a mut dyn Damageable,
}

/// Overlap-circle запрос (аналог physics overlap движка)
pub trait HitDetector {
    /// Первый damageable, пересекающий круг `center`/`radius` на слоях `mask`.
    fn find_damageable(&mut self, center: Vec2, radius: f32, mask: HitMask) -> Option<HitCandidate<'_>>;
}

/// Детектор без целей (нечего кусать)
pub struct NoTargets;

impl HitDetector for NoTargets {
    fn find_damageable(&mut self, _center: Vec2, _radius: f32, _mask: HitMask) -> Option<HitCandidate<'_>> {
        None
    }
}

/// Результат успешного укуса (возвращается из тика для событий/логов)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiteHit {
    pub damage: f32,
    pub direction: Vec2,
    pub knockback: f32,
}

/// Событие: укус попал в цель
///
/// Генерируется ECS-системой после тика AI. Используется для UI, звуков, эффектов.
#[derive(Event, Debug, Clone)]
pub struct BiteLanded {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: f32,
    pub direction: Vec2,
    pub knockback: f32,
    /// Укус довёл health цели до нуля
    pub killed: bool,
}

/// Событие: entity умер (health <= 0)
#[derive(Event, Debug, Clone)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_targets_never_hits() {
        let mut detector = NoTargets;
        assert!(detector.find_damageable(Vec2::ZERO, 100.0, HitMask::ALL).is_none());
    }

    #[test]
    fn test_bite_landed_event() {
        let event = BiteLanded {
            attacker: Entity::PLACEHOLDER,
            target: Entity::PLACEHOLDER,
            damage: 10.0,
            direction: Vec2::X,
            knockback: 6.0,
            killed: false,
        };
        assert_eq!(event.damage, 10.0);
        assert!(!event.killed);
    }
}
