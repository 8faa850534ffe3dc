//! Chase controller: преследование цели и решение "кусать или догонять".

use bevy::math::bounding::Aabb2d;
use bevy::prelude::*;
use crate::physics::{clamp, contains};

const COINCIDENT_EPSILON_SQ: f32 = 1e-4;

/// Решение chase controller на этот тик
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChaseAction {
    /// Цели нет: fallback в Patrol
    LostTarget,
    /// Все условия атаки выполнены (вызывающий стартует одну bite session)
    BeginAttack,
    /// Догоняем: желаемая скорость
    Pursue(Vec2),
}

/// Параметры, которые chase берёт из конфига и таймера cooldown
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChaseParams {
    pub bite_range: f32,
    pub chase_speed: f32,
    /// Cooldown после прошлой атаки истёк
    pub attack_ready: bool,
    pub require_target_in_water: bool,
}

/// Один тик преследования.
///
/// Условия атаки проверяются в порядке: дистанция → cooldown → цель в воде
/// (дистанция дешевле всего). Без водоёма проверка "в воде" пропускается.
pub fn chase(position: Vec2, target: Option<Vec2>, water: Option<Aabb2d>, params: ChaseParams) -> ChaseAction {
    let Some(target) = target else {
        return ChaseAction::LostTarget;
    };

    let in_range = position.distance(target) <= params.bite_range;
    if in_range && params.attack_ready {
        let target_in_water = !params.require_target_in_water
            || water.map_or(true, |bounds| contains(bounds, target));
        if target_in_water {
            return ChaseAction::BeginAttack;
        }
    }

    let pursuit_target = match water {
        Some(bounds) => clamp(target, bounds),
        None => target,
    };

    let to_target = pursuit_target - position;
    if to_target.length_squared() > COINCIDENT_EPSILON_SQ {
        ChaseAction::Pursue(to_target.normalize() * params.chase_speed)
    } else {
        ChaseAction::Pursue(Vec2::ZERO)
    }
}
