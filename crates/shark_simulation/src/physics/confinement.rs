//! Confinement: удержание агента внутри водоёма.
//!
//! Водоём: `Aabb2d`, сжатый на `padding` со всех сторон ("shrunk bounds"),
//! чтобы корпус акулы не вылезал за кромку воды.

use bevy::math::bounding::Aabb2d;
use bevy::prelude::*;

/// Сжать bounds на `padding` с каждой стороны.
///
/// Если padding больше половины размера по оси, ось схлопывается в центр
/// (min == max), а не выворачивается наизнанку.
pub fn shrunk_bounds(region: Aabb2d, padding: f32) -> Aabb2d {
    let center = (region.min + region.max) * 0.5;
    let half = ((region.max - region.min) * 0.5 - Vec2::splat(padding)).max(Vec2::ZERO);

    Aabb2d {
        min: center - half,
        max: center + half,
    }
}

/// Покомпонентный clamp точки в bounds.
pub fn clamp(point: Vec2, bounds: Aabb2d) -> Vec2 {
    Vec2::new(
        point.x.clamp(bounds.min.x, bounds.max.x),
        point.y.clamp(bounds.min.y, bounds.max.y),
    )
}

/// Точка внутри bounds (границы включительно).
pub fn contains(bounds: Aabb2d, point: Vec2) -> bool {
    point.x >= bounds.min.x
        && point.x <= bounds.max.x
        && point.y >= bounds.min.y
        && point.y <= bounds.max.y
}

/// Вернуть агента в bounds.
///
/// Если позиция снаружи: clamp позиции + обнуление компонент скорости,
/// которые тянут дальше наружу (иначе steering каждый тик давит в стенку
/// и накапливает скорость). Без водоёма или внутри: no-op.
pub fn enforce(position: Vec2, velocity: Vec2, bounds: Option<Aabb2d>) -> (Vec2, Vec2) {
    let Some(b) = bounds else {
        return (position, velocity);
    };

    if contains(b, position) {
        return (position, velocity);
    }

    let mut v = velocity;
    if position.x <= b.min.x && v.x < 0.0 {
        v.x = 0.0;
    }
    if position.x >= b.max.x && v.x > 0.0 {
        v.x = 0.0;
    }
    if position.y <= b.min.y && v.y < 0.0 {
        v.y = 0.0;
    }
    if position.y >= b.max.y && v.y > 0.0 {
        v.y = 0.0;
    }

    (clamp(position, b), v)
}
