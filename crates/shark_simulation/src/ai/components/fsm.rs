//! FSM AI components (state, config, config validation).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use crate::combat::BiteStats;
use crate::components::HitMask;

/// Состояния акулы (ровно одно активно в каждый момент)
///
/// Patrol ↔ Chase: по rate-limited perception.
/// Chase → Attack: по сигналу BeginAttack от chase controller.
/// Attack → Chase/Patrol: только когда bite session дошла до Done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SharkState {
    #[default]
    Patrol,
    Chase,
    Attack,
}

/// Направление и длина патрульной линии по умолчанию (и для fallback)
pub const DEFAULT_PATROL_DIRECTION: Vec2 = Vec2::X;
pub const DEFAULT_PATROL_LENGTH: f32 = 8.0;

/// Как строится патрульный отрезок A ↔ B
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PatrolLayout {
    /// A = точка спавна, B = A + direction.normalize() * length
    Generated { direction: Vec2, length: f32 },
    /// Явные концы; если хотя бы одного нет: fallback на Generated
    /// с параметрами по умолчанию (warning в лог)
    Explicit { a: Option<Vec2>, b: Option<Vec2> },
}

impl Default for PatrolLayout {
    fn default() -> Self {
        Self::Generated {
            direction: DEFAULT_PATROL_DIRECTION,
            length: DEFAULT_PATROL_LENGTH,
        }
    }
}

/// Параметры акулы
///
/// Все поля имеют значения по умолчанию; JSON/RON конфиг может задавать
/// только часть полей (`#[serde(default)]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SharkConfig {
    // --- Perception ---
    pub view_radius: f32,
    /// Полный угол обзора (градусы), проверяется половина
    pub view_angle: f32,
    /// Период сканирования (секунды)
    pub scan_interval: f32,
    /// Слои препятствий для raycast; `HitMask::NONE` отключает occlusion
    pub obstacle_mask: HitMask,

    // --- Movement ---
    pub chase_speed: f32,
    pub patrol_speed: f32,
    pub acceleration: f32,
    pub rotate_smooth: f32,
    pub water_drag: f32,
    /// Ниже этой скорости facing не поворачивается
    pub velocity_eps: f32,

    // --- Patrol ---
    pub patrol: PatrolLayout,
    pub stop_distance: f32,
    pub flip_on_collision: bool,

    // --- Water ---
    pub water_padding: f32,
    pub require_target_in_water: bool,

    // --- Bite ---
    /// Глаз/пасть в локальных координатах (x: вперёд)
    pub eye_offset: Vec2,
    pub bite: BiteStats,
}

impl Default for SharkConfig {
    fn default() -> Self {
        Self {
            view_radius: 8.0,
            view_angle: 120.0,
            scan_interval: 0.1,
            obstacle_mask: HitMask::NONE,
            chase_speed: 3.5,
            patrol_speed: 2.2,
            acceleration: 8.0,
            rotate_smooth: 10.0,
            water_drag: 1.5,
            velocity_eps: 0.01,
            patrol: PatrolLayout::default(),
            stop_distance: 0.25,
            flip_on_collision: false,
            water_padding: 0.12,
            require_target_in_water: true,
            eye_offset: Vec2::ZERO,
            bite: BiteStats::default(),
        }
    }
}

/// Ошибки конфигурации. Ни одна не фатальна: `SharkConfig::sanitized`
/// и `PatrolRoute::from_layout` восстанавливаются локально.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Explicit patrol запрошен, но концы не заданы
    #[error("explicit patrol endpoints requested but not supplied (a: {has_a}, b: {has_b})")]
    MissingPatrolEndpoints { has_a: bool, has_b: bool },

    /// Отрицательная длительность/дистанция (обрезается до 0)
    #[error("'{field}' must not be negative, got {value}")]
    NegativeValue { field: &'static str, value: f32 },

    /// Значение должно быть строго положительным (заменяется default)
    #[error("'{field}' must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
}

impl SharkConfig {
    /// Все проблемы конфига (пустой Vec: конфиг валиден).
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let non_negative = [
            ("view_radius", self.view_radius),
            ("view_angle", self.view_angle),
            ("chase_speed", self.chase_speed),
            ("patrol_speed", self.patrol_speed),
            ("acceleration", self.acceleration),
            ("rotate_smooth", self.rotate_smooth),
            ("water_drag", self.water_drag),
            ("velocity_eps", self.velocity_eps),
            ("stop_distance", self.stop_distance),
            ("water_padding", self.water_padding),
            ("bite.range", self.bite.range),
            ("bite.damage", self.bite.damage),
            ("bite.knockback", self.bite.knockback),
            ("bite.cooldown", self.bite.cooldown),
            ("bite.windup", self.bite.windup),
            ("bite.active_time", self.bite.active_time),
            ("bite.lunge_speed", self.bite.lunge_speed),
            ("bite.recover", self.bite.recover),
        ];
        for (field, value) in non_negative {
            if value < 0.0 || value.is_nan() {
                errors.push(ConfigError::NegativeValue { field, value });
            }
        }

        if !(self.scan_interval > 0.0) {
            errors.push(ConfigError::NonPositive {
                field: "scan_interval",
                value: self.scan_interval,
            });
        }

        if let PatrolLayout::Explicit { a, b } = self.patrol {
            if a.is_none() || b.is_none() {
                errors.push(ConfigError::MissingPatrolEndpoints {
                    has_a: a.is_some(),
                    has_b: b.is_some(),
                });
            }
        }

        errors
    }

    /// Исправленная копия: каждая проблема логируется как warning.
    ///
    /// Отрицательные значения → 0, view_angle ограничен 360,
    /// scan_interval ≤ 0 → default. Отсутствующие patrol endpoints
    /// не трогаем: их обрабатывает `PatrolRoute::from_layout`.
    pub fn sanitized(mut self) -> Self {
        for error in self.validate() {
            if !matches!(error, ConfigError::MissingPatrolEndpoints { .. }) {
                crate::logger::log_warning(&format!("SharkConfig: {} (fixed)", error));
            }
        }

        let defaults = Self::default();
        let fix = |value: f32| if value.is_nan() { 0.0 } else { value.max(0.0) };

        self.view_radius = fix(self.view_radius);
        self.view_angle = fix(self.view_angle).min(360.0);
        self.chase_speed = fix(self.chase_speed);
        self.patrol_speed = fix(self.patrol_speed);
        self.acceleration = fix(self.acceleration);
        self.rotate_smooth = fix(self.rotate_smooth);
        self.water_drag = fix(self.water_drag);
        self.velocity_eps = fix(self.velocity_eps);
        self.stop_distance = fix(self.stop_distance);
        self.water_padding = fix(self.water_padding);
        self.bite.range = fix(self.bite.range);
        self.bite.damage = fix(self.bite.damage);
        self.bite.knockback = fix(self.bite.knockback);
        self.bite.cooldown = fix(self.bite.cooldown);
        self.bite.windup = fix(self.bite.windup);
        self.bite.active_time = fix(self.bite.active_time);
        self.bite.lunge_speed = fix(self.bite.lunge_speed);
        self.bite.recover = fix(self.bite.recover);

        if !(self.scan_interval > 0.0) {
            self.scan_interval = defaults.scan_interval;
        }

        self
    }
}
