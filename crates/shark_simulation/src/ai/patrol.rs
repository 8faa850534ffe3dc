//! Patrol controller: челнок между двумя точками A ↔ B.

use bevy::math::bounding::Aabb2d;
use bevy::prelude::*;
use crate::ai::{ConfigError, PatrolLayout};
use crate::physics::clamp;

const MIN_LINE_LENGTH: f32 = 0.01;

/// Патрульный отрезок. Концы фиксируются при создании (и уже зажаты в воду),
/// дальше меняется только флаг направления.
#[derive(Debug, Clone, PartialEq)]
pub struct PatrolRoute {
    a: Vec2,
    b: Vec2,
    heading_to_b: bool,
}

impl PatrolRoute {
    /// Отрезок от `origin` вдоль `direction` длиной `length`.
    ///
    /// Нулевое направление → +X, длина не меньше 0.01.
    pub fn generated(origin: Vec2, direction: Vec2, length: f32, water: Option<Aabb2d>) -> Self {
        let direction = if direction.length_squared() < 1e-4 {
            Vec2::X
        } else {
            direction.normalize()
        };
        let b = origin + direction * length.max(MIN_LINE_LENGTH);

        Self::between(origin, origin, b, water)
    }

    /// Маршрут из конфига. Ошибка только если явные концы не заданы -
    /// вызывающий решает, как деградировать.
    pub fn from_layout(layout: PatrolLayout, spawn: Vec2, water: Option<Aabb2d>) -> Result<Self, ConfigError> {
        match layout {
            PatrolLayout::Generated { direction, length } => {
                Ok(Self::generated(spawn, direction, length, water))
            }
            PatrolLayout::Explicit { a: Some(a), b: Some(b) } => Ok(Self::between(spawn, a, b, water)),
            PatrolLayout::Explicit { a, b } => Err(ConfigError::MissingPatrolEndpoints {
                has_a: a.is_some(),
                has_b: b.is_some(),
            }),
        }
    }

    /// Общий конструктор: clamp концов в воду + начальное направление.
    ///
    /// Идём к B, если спавн не дальше от A, чем от B.
    fn between(spawn: Vec2, a: Vec2, b: Vec2, water: Option<Aabb2d>) -> Self {
        let (a, b) = match water {
            Some(bounds) => (clamp(a, bounds), clamp(b, bounds)),
            None => (a, b),
        };

        Self {
            a,
            b,
            heading_to_b: spawn.distance(a) <= spawn.distance(b),
        }
    }

    pub fn a(&self) -> Vec2 {
        self.a
    }

    pub fn b(&self) -> Vec2 {
        self.b
    }

    pub fn heading_to_b(&self) -> bool {
        self.heading_to_b
    }

    /// Текущая цель (активный конец)
    pub fn active_endpoint(&self) -> Vec2 {
        if self.heading_to_b {
            self.b
        } else {
            self.a
        }
    }

    pub fn flip(&mut self) {
        self.heading_to_b = !self.heading_to_b;
    }

    /// Желаемая скорость на этот тик.
    ///
    /// Arrival: в пределах `stop_distance`: разворот и нулевая скорость
    /// (стоп-и-поворот, без пролёта мимо точки).
    pub fn tick(&mut self, position: Vec2, water: Option<Aabb2d>, stop_distance: f32, patrol_speed: f32) -> Vec2 {
        let mut target = self.active_endpoint();
        if let Some(bounds) = water {
            target = clamp(target, bounds);
        }

        let to_target = target - position;
        if to_target.length() <= stop_distance {
            self.flip();
            return Vec2::ZERO;
        }

        to_target.normalize() * patrol_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water() -> Aabb2d {
        Aabb2d {
            min: Vec2::new(-5.0, -5.0),
            max: Vec2::new(5.0, 5.0),
        }
    }

    #[test]
    fn test_generated_line_from_spawn() {
        let route = PatrolRoute::generated(Vec2::new(1.0, 1.0), Vec2::new(0.0, 2.0), 3.0, None);
        assert_eq!(route.a(), Vec2::new(1.0, 1.0));
        assert_eq!(route.b(), Vec2::new(1.0, 4.0));
        assert!(route.heading_to_b());
    }

    #[test]
    fn test_generated_line_fallbacks() {
        let route = PatrolRoute::generated(Vec2::ZERO, Vec2::ZERO, -1.0, None);
        assert_eq!(route.b(), Vec2::new(MIN_LINE_LENGTH, 0.0));
    }

    #[test]
    fn test_endpoints_clamped_into_water() {
        let route = PatrolRoute::generated(Vec2::ZERO, Vec2::X, 20.0, Some(water()));
        assert_eq!(route.b(), Vec2::new(5.0, 0.0));

        let layout = PatrolLayout::Explicit {
            a: Some(Vec2::new(-9.0, 9.0)),
            b: Some(Vec2::new(9.0, -9.0)),
        };
        let route = PatrolRoute::from_layout(layout, Vec2::ZERO, Some(water())).unwrap();
        assert_eq!(route.a(), Vec2::new(-5.0, 5.0));
        assert_eq!(route.b(), Vec2::new(5.0, -5.0));
    }

    #[test]
    fn test_missing_explicit_endpoint_is_error() {
        let layout = PatrolLayout::Explicit { a: Some(Vec2::ZERO), b: None };
        let err = PatrolRoute::from_layout(layout, Vec2::ZERO, None).unwrap_err();
        assert_eq!(err, ConfigError::MissingPatrolEndpoints { has_a: true, has_b: false });
    }

    #[test]
    fn test_initial_heading_toward_far_endpoint() {
        let layout = PatrolLayout::Explicit {
            a: Some(Vec2::new(-4.0, 0.0)),
            b: Some(Vec2::new(4.0, 0.0)),
        };
        // Спавн у B → сначала идём к A
        let route = PatrolRoute::from_layout(layout, Vec2::new(3.0, 0.0), None).unwrap();
        assert!(!route.heading_to_b());
        assert_eq!(route.active_endpoint(), Vec2::new(-4.0, 0.0));
    }

    #[test]
    fn test_tick_moves_toward_active_endpoint() {
        let mut route = PatrolRoute::generated(Vec2::ZERO, Vec2::X, 8.0, None);
        let desired = route.tick(Vec2::new(2.0, 0.0), None, 0.25, 2.2);
        assert!((desired - Vec2::new(2.2, 0.0)).length() < 1e-6);
        assert!(route.heading_to_b());
    }

    #[test]
    fn test_tick_flips_exactly_at_stop_distance() {
        let mut route = PatrolRoute::generated(Vec2::ZERO, Vec2::X, 8.0, None);

        // 0.3 > 0.25: ещё едем
        let desired = route.tick(Vec2::new(7.7, 0.0), None, 0.25, 2.2);
        assert!(desired.x > 0.0);
        assert!(route.heading_to_b());

        // 0.25: разворот, стоим
        let desired = route.tick(Vec2::new(7.75, 0.0), None, 0.25, 2.2);
        assert_eq!(desired, Vec2::ZERO);
        assert!(!route.heading_to_b());
    }

    #[test]
    fn test_tick_alternates_endpoints() {
        let mut route = PatrolRoute::generated(Vec2::ZERO, Vec2::X, 8.0, None);
        let mut visited = Vec::new();

        for _ in 0..4 {
            let endpoint = route.active_endpoint();
            route.tick(endpoint, None, 0.25, 2.2);
            visited.push(endpoint);
        }

        let a = Vec2::ZERO;
        let b = Vec2::new(8.0, 0.0);
        assert_eq!(visited, vec![b, a, b, a]);
    }

    #[test]
    fn test_tick_clamps_target_to_water() {
        let mut route = PatrolRoute::generated(Vec2::ZERO, Vec2::X, 8.0, None);
        let shallow = Aabb2d {
            min: Vec2::new(-5.0, -5.0),
            max: Vec2::new(3.0, 5.0),
        };

        // Конец B = 8, но вода кончается на 3 → разворот у 3
        let desired = route.tick(Vec2::new(2.9, 0.0), Some(shallow), 0.25, 2.2);
        assert_eq!(desired, Vec2::ZERO);
        assert!(!route.heading_to_b());
    }
}
