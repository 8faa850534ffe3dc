//! Bite sequencer (windup → active/lunge → recover → done).
//!
//! Фазы считаются накопленными таймерами внутри тика, без корутин и
//! ожиданий: владелец (`SharkBrain`) вызывает `tick` каждый fixed step,
//! пока сессия не вернёт `Done`.

use bevy::prelude::*;
use crate::combat::{BiteHit, BitePhase, BiteSession, BiteStats, HitDetector};
use crate::components::Kinematics;
use crate::physics::steer;

/// Допуск сравнения таймеров фазы (накопление f32 при dt = 0.02)
pub const PHASE_EPSILON: f32 = 1e-4;

const AIM_EPSILON_SQ: f32 = 1e-4;

/// Параметры рывка, которые приходят из конфига агента, а не из BiteStats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LungeParams {
    /// Ограничение ускорения (то же, что у обычного steering)
    pub acceleration: f32,
    /// Точка укуса в локальных координатах (x: вперёд)
    pub bite_offset: Vec2,
}

impl BiteSession {
    /// Начать укус: стоп, прицел на цель, фиксация направления рывка.
    ///
    /// Без цели (или если цель совпадает с позицией) рывок идёт по текущему facing.
    /// Нулевой windup сразу начинает Active.
    pub fn begin(kinematics: &mut Kinematics, target: Option<Vec2>, stats: &BiteStats) -> Self {
        kinematics.velocity = Vec2::ZERO;

        if let Some(target) = target {
            let to_target = target - kinematics.position;
            if to_target.length_squared() > AIM_EPSILON_SQ {
                kinematics.facing = to_target.normalize();
            }
        }

        let facing = kinematics.facing.normalize_or_zero();
        let lunge_direction = if facing == Vec2::ZERO { Vec2::X } else { facing };

        let phase = if stats.windup <= 0.0 {
            BitePhase::Active
        } else {
            BitePhase::Windup
        };

        Self {
            phase,
            phase_elapsed: 0.0,
            total_elapsed: 0.0,
            dealt_damage: false,
            lunge_direction,
        }
    }

    /// Продвинуть сессию на `dt`.
    ///
    /// Остаток времени переносится в следующую фазу, поэтому сессия
    /// заканчивается ровно через windup + active + recover (± один тик).
    /// Active выполняет не больше одного шага рывка за тик.
    pub fn tick(
        &mut self,
        kinematics: &mut Kinematics,
        stats: &BiteStats,
        lunge: LungeParams,
        hits: &mut dyn HitDetector,
        dt: f32,
    ) -> Option<BiteHit> {
        if self.is_done() {
            return None;
        }

        self.phase_elapsed += dt;
        self.total_elapsed += dt;

        let mut landed = None;
        let mut lunged = false;

        loop {
            match self.phase {
                BitePhase::Windup | BitePhase::Recover => {
                    kinematics.velocity = Vec2::ZERO;
                }
                BitePhase::Active => {
                    if lunged {
                        break;
                    }
                    lunged = true;

                    let desired = self.lunge_direction * stats.lunge_speed;
                    kinematics.velocity = steer(kinematics.velocity, desired, lunge.acceleration, dt);

                    if let Some(hit) = self.try_bite_hit(kinematics, stats, lunge.bite_offset, hits) {
                        landed = Some(hit);
                    }
                }
                BitePhase::Done => break,
            }

            let duration = stats.phase_duration(self.phase);
            if self.phase_elapsed + PHASE_EPSILON < duration {
                break;
            }

            self.phase_elapsed = (self.phase_elapsed - duration).max(0.0);
            let next = self.phase.next();
            crate::logger::log(&format!(
                "🦈 Bite: {:?} → {:?} (t = {:.3}s)",
                self.phase, next, self.total_elapsed
            ));
            self.phase = next;
        }

        landed
    }

    /// Hit test в точке укуса. Не больше одного урона за сессию;
    /// отсутствие цели: не ошибка.
    fn try_bite_hit(
        &mut self,
        kinematics: &Kinematics,
        stats: &BiteStats,
        bite_offset: Vec2,
        hits: &mut dyn HitDetector,
    ) -> Option<BiteHit> {
        if self.dealt_damage {
            return None;
        }

        let origin = kinematics.local_to_world(bite_offset);
        let candidate = hits.find_damageable(origin, stats.range, stats.hit_mask)?;

        let direction = (candidate.center - kinematics.position).normalize_or_zero();
        candidate.target.take_damage(stats.damage, direction, stats.knockback);
        self.dealt_damage = true;

        Some(BiteHit {
            damage: stats.damage,
            direction,
            knockback: stats.knockback,
        })
    }
}
