//! Perception: зрение акулы (дальность + угол обзора + line of sight).
//!
//! Сканирование дорогое (raycast), поэтому `Perception` запускает его не
//! чаще раза в `scan_interval`; между сканами флаг `sees_target` не меняется.

use bevy::math::bounding::{Aabb2d, RayCast2d};
use bevy::prelude::*;
use crate::components::HitMask;

const FORWARD_EPSILON_SQ: f32 = 1e-4;

/// Запрос "перекрыта ли линия from → to" (raycast по слою препятствий)
pub trait OcclusionQuery {
    fn blocks(&self, from: Vec2, to: Vec2, mask: HitMask) -> bool;
}

/// Набор прямоугольных препятствий (собирается из `Occluder` каждый тик)
#[derive(Debug, Clone, Default)]
pub struct OccluderSet {
    boxes: Vec<(Aabb2d, HitMask)>,
}

impl OccluderSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bounds: Aabb2d, layers: HitMask) {
        self.boxes.push((bounds, layers));
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

impl OcclusionQuery for OccluderSet {
    fn blocks(&self, from: Vec2, to: Vec2, mask: HitMask) -> bool {
        let offset = to - from;
        let distance = offset.length();
        let Ok(direction) = Dir2::new(offset) else {
            return false;
        };

        let ray = RayCast2d::new(from, direction, distance);
        self.boxes
            .iter()
            .filter(|(_, layers)| layers.intersects(mask))
            .any(|(bounds, _)| ray.aabb_intersection_at(bounds).is_some())
    }
}

/// Одно сканирование: все три проверки должны пройти.
///
/// - Без цели: false (fail closed).
/// - Дальность: `|target - eye| <= view_radius`.
/// - Угол: между facing и eye → target не больше `view_angle / 2`.
///   Вырожденный facing заменяется на +X.
/// - Occlusion: только если передан запрос и маска не пустая.
pub fn scan(
    eye: Vec2,
    facing: Vec2,
    target: Option<Vec2>,
    view_radius: f32,
    view_angle: f32,
    occlusion: Option<(&dyn OcclusionQuery, HitMask)>,
) -> bool {
    let Some(target) = target else {
        return false;
    };

    let to_target = target - eye;
    let distance = to_target.length();
    if distance > view_radius {
        return false;
    }

    // Цель в точке глаза: угол не определён, считаем видимой
    if distance > f32::EPSILON {
        let forward = if facing.length_squared() > FORWARD_EPSILON_SQ {
            facing.normalize()
        } else {
            Vec2::X
        };
        let cos = forward.dot(to_target / distance).clamp(-1.0, 1.0);
        let angle = cos.acos().to_degrees();
        if angle > view_angle * 0.5 {
            return false;
        }
    }

    if let Some((query, mask)) = occlusion {
        if !mask.is_empty() && query.blocks(eye, target, mask) {
            return false;
        }
    }

    true
}

/// Rate-limited состояние зрения
#[derive(Debug, Clone, PartialEq)]
pub struct Perception {
    pub scan_interval: f32,
    pub next_scan_time: f32,
    pub sees_target: bool,
}

impl Perception {
    pub fn new(scan_interval: f32) -> Self {
        Self {
            scan_interval,
            next_scan_time: 0.0,
            sees_target: false,
        }
    }

    /// Скан пора делать?
    pub fn is_due(&self, now: f32) -> bool {
        now >= self.next_scan_time
    }

    /// Выполнить `scan_fn`, если подошло время.
    ///
    /// Возвращает `Some(результат)` на границе скана, `None` между сканами
    /// (флаг при этом не меняется).
    pub fn update(&mut self, now: f32, scan_fn: impl FnOnce() -> bool) -> Option<bool> {
        if !self.is_due(now) {
            return None;
        }

        self.next_scan_time = now + self.scan_interval;
        self.sees_target = scan_fn();
        Some(self.sees_target)
    }
}
