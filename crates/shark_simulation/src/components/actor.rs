//! Базовые компоненты акторов: Health, Hurtbox, SharkTarget

use bevy::prelude::*;
use crate::combat::Damageable;
use crate::components::HitMask;

/// Маркер: цель, которую ищет акула (игрок-дайвер)
///
/// Target locator берёт ближайшую живую entity с этим маркером;
/// её `Transform` читается каждый тик.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SharkTarget;

/// Зона попадания (круг вокруг `Transform`)
///
/// Укус попадает, если круг пересекает радиус укуса и слои совпадают
/// с hit mask атакующего.
#[derive(Component, Debug, Clone, Copy)]
pub struct Hurtbox {
    pub radius: f32,
    pub layers: HitMask,
}

impl Default for Hurtbox {
    fn default() -> Self {
        Self {
            radius: 0.3,
            layers: HitMask::layer(0),
        }
    }
}

/// Здоровье (единственная реализация `Damageable`)
///
/// Инвариант: 0 ≤ current ≤ max
/// После попадания: окно неуязвимости `invulnerability` секунд.
/// Knockback не применяется напрямую: физика владельца забирает импульс
/// через `take_knockback`.
#[derive(Component, Debug, Clone, Copy)]
pub struct Health {
    pub current: f32,
    pub max: f32,
    pub invulnerability: f32,
    pub invulnerable_timer: f32,
    pub pending_knockback: Vec2,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            max,
            invulnerability: 0.5,
            invulnerable_timer: 0.0,
            pending_knockback: Vec2::ZERO,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_timer > 0.0
    }

    pub fn tick(&mut self, delta: f32) {
        self.invulnerable_timer = (self.invulnerable_timer - delta).max(0.0);
    }

    pub fn heal(&mut self, amount: f32) {
        self.current = (self.current + amount.max(0.0)).min(self.max);
    }

    /// Забрать накопленный импульс (обнуляет его)
    pub fn take_knockback(&mut self) -> Vec2 {
        std::mem::take(&mut self.pending_knockback)
    }
}

impl Damageable for Health {
    fn take_damage(&mut self, amount: f32, hit_direction: Vec2, knockback: f32) {
        if self.is_invulnerable() {
            return;
        }
        self.invulnerable_timer = self.invulnerability;

        let was_alive = self.is_alive();
        self.current = (self.current - amount.max(0.0)).max(0.0);
        if was_alive && !self.is_alive() {
            crate::logger::log_info("💀 Health: target reached 0 HP");
        }

        self.pending_knockback += hit_direction.normalize_or_zero() * knockback;
    }
}
