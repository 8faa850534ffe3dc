//! World компоненты: водоём, препятствия, слои коллизий

use bevy::math::bounding::Aabb2d;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Bitmask слоёв (аналог physics layers движка)
///
/// Используется для фильтрации hit detection (укус) и occlusion (raycast).
/// `HitMask::NONE` в конфиге отключает соответствующую проверку.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HitMask(pub u32);

impl HitMask {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(u32::MAX);

    pub const fn layer(index: u32) -> Self {
        Self(1 << index)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn intersects(&self, other: HitMask) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for HitMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Водоём (Resource, опционально)
///
/// Axis-aligned bounds области воды. Если ресурса нет: AI не ограничивает
/// движение и не проверяет "цель в воде".
#[derive(Resource, Debug, Clone, Copy)]
pub struct WaterArea {
    pub bounds: Aabb2d,
}

impl WaterArea {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            bounds: Aabb2d {
                min: min.min(max),
                max: min.max(max),
            },
        }
    }

    pub fn from_center(center: Vec2, half_size: Vec2) -> Self {
        Self::new(center - half_size.abs(), center + half_size.abs())
    }
}

/// Препятствие для линии видимости (скалы, обломки)
///
/// Позиция берётся из `Transform`, форма: прямоугольник `half_size`.
#[derive(Component, Debug, Clone, Copy)]
pub struct Occluder {
    pub half_size: Vec2,
    pub layers: HitMask,
}

impl Occluder {
    pub fn new(half_size: Vec2) -> Self {
        Self {
            half_size: half_size.abs(),
            layers: HitMask::layer(0),
        }
    }

    pub fn bounds_at(&self, center: Vec2) -> Aabb2d {
        Aabb2d {
            min: center - self.half_size,
            max: center + self.half_size,
        }
    }
}
