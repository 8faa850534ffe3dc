//! Movement компоненты: кинематика агента

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Кинематика агента (позиция, скорость, направление взгляда)
///
/// Владелец: entity акулы. AI мутирует её один раз за тик, затем
/// `sync_shark_transforms` копирует результат в `Transform` для рендера.
/// Физического движка нет: интегрирование делает `physics::integrate`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Unit vector; `Vec2::X` пока агент ни разу не двигался
    pub facing: Vec2,
}

impl Default for Kinematics {
    fn default() -> Self {
        Self::at(Vec2::ZERO)
    }
}

impl Kinematics {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            facing: Vec2::X,
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Угол поворота (радианы) для `Transform`, 0 = смотрим вдоль +X
    pub fn rotation_angle(&self) -> f32 {
        self.facing.y.atan2(self.facing.x)
    }

    /// Точка в локальных координатах агента (x: вперёд, y: влево) → world
    pub fn local_to_world(&self, local: Vec2) -> Vec2 {
        let forward = self.facing.normalize_or_zero();
        let forward = if forward == Vec2::ZERO { Vec2::X } else { forward };
        let left = forward.perp();
        self.position + forward * local.x + left * local.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinematics_default_faces_right() {
        let kin = Kinematics::default();
        assert_eq!(kin.facing, Vec2::X);
        assert_eq!(kin.speed(), 0.0);
        assert_eq!(kin.rotation_angle(), 0.0);
    }

    #[test]
    fn test_local_to_world_follows_facing() {
        let mut kin = Kinematics::at(Vec2::new(1.0, 1.0));
        kin.facing = Vec2::Y;

        // 0.5 вперёд при взгляде вверх → +Y
        let eye = kin.local_to_world(Vec2::new(0.5, 0.0));
        assert!((eye - Vec2::new(1.0, 1.5)).length() < 1e-5);

        // "влево" при взгляде вверх → -X
        let side = kin.local_to_world(Vec2::new(0.0, 1.0));
        assert!((side - Vec2::new(0.0, 1.0)).length() < 1e-5);
    }
}
