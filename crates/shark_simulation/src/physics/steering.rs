//! Steering: velocity-based движение без физического движка.
//!
//! - `steer`: линейное приближение скорости к желаемой с ограничением
//!   ускорения (а не экспоненциальный blend): время разгона не зависит
//!   от частоты тиков.
//! - `rotate_facing`: сглаженный поворот взгляда по скорости.
//! - `integrate`: water drag + перемещение (замена rigidbody step).

use bevy::prelude::*;
use crate::components::Kinematics;

/// Приблизить `current` к `desired` не более чем на `max_acceleration * dt`.
pub fn steer(current: Vec2, desired: Vec2, max_acceleration: f32, dt: f32) -> Vec2 {
    let max_step = (max_acceleration * dt).max(0.0);
    let delta = desired - current;
    let distance = delta.length();

    if distance <= max_step || distance <= f32::EPSILON {
        desired
    } else {
        current + delta / distance * max_step
    }
}

/// Повернуть facing к направлению скорости.
///
/// На скорости ниже `velocity_eps` facing не трогаем: иначе при почти
/// нулевой скорости направление дёргается от шума.
pub fn rotate_facing(facing: Vec2, velocity: Vec2, smoothing: f32, dt: f32, velocity_eps: f32) -> Vec2 {
    if velocity.length_squared() <= velocity_eps * velocity_eps {
        return facing;
    }

    let target = velocity.normalize();
    let t = (smoothing * dt).clamp(0.0, 1.0);
    let blended = facing.lerp(target, t);

    // lerp противоположных векторов может дать ноль
    let normalized = blended.normalize_or_zero();
    if normalized == Vec2::ZERO {
        target
    } else {
        normalized
    }
}

/// Линейное затухание в воде + интегрирование позиции.
pub fn integrate(kinematics: &mut Kinematics, water_drag: f32, dt: f32) {
    if water_drag > 0.0 {
        kinematics.velocity *= 1.0 / (1.0 + water_drag * dt);
    }
    kinematics.position += kinematics.velocity * dt;
}
