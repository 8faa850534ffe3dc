//! SharkBrain: state machine Patrol / Chase / Attack.
//!
//! Чистая логика без ECS: всё, что акула знает о мире, приходит в `Senses`,
//! урон уходит через `HitDetector`. ECS-обёртка: `ai::systems::shark_ai_tick`.
//!
//! Порядок одного тика:
//! 1. часы + rate-limited perception (Patrol ↔ Chase)
//! 2. поведение текущего состояния (patrol / chase / bite session)
//! 3. поворот facing по скорости
//! 4. интегрирование с water drag
//! 5. confinement в shrunk bounds

use bevy::math::bounding::Aabb2d;
use bevy::prelude::*;
use crate::ai::chase::{chase, ChaseAction, ChaseParams};
use crate::ai::perception::{scan, OcclusionQuery, Perception};
use crate::ai::patrol::PatrolRoute;
use crate::ai::{PatrolLayout, SharkConfig, SharkState, DEFAULT_PATROL_DIRECTION, DEFAULT_PATROL_LENGTH};
use crate::combat::{BiteHit, BiteSession, HitDetector, LungeParams};
use crate::components::Kinematics;
use crate::physics::{enforce, integrate, rotate_facing, shrunk_bounds, steer};

/// Что акула "чувствует" в этом тике
#[derive(Clone, Copy, Default)]
pub struct Senses<'a> {
    /// Позиция цели (None: цели нет или она не зарегистрирована)
    pub target: Option<Vec2>,
    /// Водоём (сырой, без padding)
    pub water: Option<Aabb2d>,
    pub occluders: Option<&'a dyn OcclusionQuery>,
}

/// Итог тика (для событий и логов ECS-слоя)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub previous_state: SharkState,
    pub state: SharkState,
    pub bite: Option<BiteHit>,
    pub session_started: bool,
    pub session_finished: bool,
}

impl TickReport {
    pub fn state_changed(&self) -> bool {
        self.previous_state != self.state
    }
}

/// Мозг одной акулы
#[derive(Debug, Clone)]
pub struct SharkBrain {
    config: SharkConfig,
    state: SharkState,
    perception: Perception,
    route: PatrolRoute,
    session: Option<BiteSession>,
    next_attack_time: f32,
    clock: f32,
}

impl SharkBrain {
    /// Создать мозг для акулы, заспавненной в `spawn`.
    ///
    /// Конфиг санитизируется; неполный explicit patrol деградирует в
    /// generated line (warning). Без водоёма confinement отключён (warning).
    pub fn new(config: SharkConfig, spawn: Vec2, water: Option<Aabb2d>) -> Self {
        let mut config = config.sanitized();

        if water.is_none() {
            crate::logger::log_warning("🦈 SharkBrain: no water area, confinement disabled");
        }
        let bounds = water.map(|region| shrunk_bounds(region, config.water_padding));

        let route = match PatrolRoute::from_layout(config.patrol, spawn, bounds) {
            Ok(route) => route,
            Err(error) => {
                crate::logger::log_warning(&format!(
                    "🦈 SharkBrain: {} → using generated patrol line",
                    error
                ));
                config.patrol = PatrolLayout::default();
                PatrolRoute::generated(spawn, DEFAULT_PATROL_DIRECTION, DEFAULT_PATROL_LENGTH, bounds)
            }
        };

        Self {
            perception: Perception::new(config.scan_interval),
            config,
            state: SharkState::Patrol,
            route,
            session: None,
            next_attack_time: 0.0,
            clock: 0.0,
        }
    }

    pub fn config(&self) -> &SharkConfig {
        &self.config
    }

    pub fn state(&self) -> SharkState {
        self.state
    }

    pub fn sees_target(&self) -> bool {
        self.perception.sees_target
    }

    pub fn route(&self) -> &PatrolRoute {
        &self.route
    }

    pub fn session(&self) -> Option<&BiteSession> {
        self.session.as_ref()
    }

    /// Накопленное время симуляции
    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn next_attack_time(&self) -> f32 {
        self.next_attack_time
    }

    /// Cooldown после прошлой атаки истёк
    pub fn attack_ready(&self) -> bool {
        self.clock >= self.next_attack_time
    }

    /// Столкновение с чем-то твёрдым: в Patrol разворачиваемся
    /// (если включено `flip_on_collision`).
    pub fn notify_collision(&mut self) {
        if self.config.flip_on_collision && self.state == SharkState::Patrol {
            self.route.flip();
            crate::logger::log("🦈 SharkBrain: collision → patrol direction flipped");
        }
    }

    /// Один fixed step.
    pub fn tick(
        &mut self,
        kinematics: &mut Kinematics,
        senses: &Senses,
        hits: &mut dyn HitDetector,
        dt: f32,
    ) -> TickReport {
        self.clock += dt;
        let now = self.clock;
        let previous_state = self.state;
        let bounds = senses.water.map(|region| shrunk_bounds(region, self.config.water_padding));

        // 1. Perception
        let eye = kinematics.local_to_world(self.config.eye_offset);
        let facing = kinematics.facing;
        let config = &self.config;
        let occlusion = senses.occluders.map(|query| (query, config.obstacle_mask));
        let scanned = self.perception.update(now, || {
            scan(eye, facing, senses.target, config.view_radius, config.view_angle, occlusion)
        });

        if let Some(sees) = scanned {
            // Атаку perception не прерывает
            if self.state != SharkState::Attack {
                let next = if sees { SharkState::Chase } else { SharkState::Patrol };
                self.transition(next);
            }
        }

        // 2. Поведение
        let mut report = TickReport {
            previous_state,
            state: self.state,
            bite: None,
            session_started: false,
            session_finished: false,
        };

        match self.state {
            SharkState::Patrol => {
                let desired = self.route.tick(
                    kinematics.position,
                    bounds,
                    self.config.stop_distance,
                    self.config.patrol_speed,
                );
                kinematics.velocity = steer(kinematics.velocity, desired, self.config.acceleration, dt);
            }
            SharkState::Chase => {
                let params = ChaseParams {
                    bite_range: self.config.bite.range,
                    chase_speed: self.config.chase_speed,
                    attack_ready: self.attack_ready(),
                    require_target_in_water: self.config.require_target_in_water,
                };

                match chase(kinematics.position, senses.target, bounds, params) {
                    ChaseAction::LostTarget => self.transition(SharkState::Patrol),
                    ChaseAction::BeginAttack => {
                        if self.session.is_none() {
                            self.session = Some(BiteSession::begin(kinematics, senses.target, &self.config.bite));
                            self.transition(SharkState::Attack);
                            report.session_started = true;
                        }
                    }
                    ChaseAction::Pursue(desired) => {
                        kinematics.velocity = steer(kinematics.velocity, desired, self.config.acceleration, dt);
                    }
                }
            }
            SharkState::Attack => {
                let lunge = LungeParams {
                    acceleration: self.config.acceleration,
                    bite_offset: self.config.eye_offset,
                };

                let done = match self.session.as_mut() {
                    Some(session) => {
                        report.bite = session.tick(kinematics, &self.config.bite, lunge, hits, dt);
                        session.is_done()
                    }
                    None => {
                        crate::logger::log_error("🦈 SharkBrain: Attack without bite session, recovering");
                        true
                    }
                };

                if done {
                    self.finish_attack(now);
                    report.session_finished = true;
                }
            }
        }

        // 3-5. Движение
        kinematics.facing = rotate_facing(
            kinematics.facing,
            kinematics.velocity,
            self.config.rotate_smooth,
            dt,
            self.config.velocity_eps,
        );
        integrate(kinematics, self.config.water_drag, dt);
        let (position, velocity) = enforce(kinematics.position, kinematics.velocity, bounds);
        kinematics.position = position;
        kinematics.velocity = velocity;

        report.state = self.state;
        report
    }

    /// Сессия закончилась: cooldown и возврат по последнему результату зрения.
    fn finish_attack(&mut self, now: f32) {
        self.session = None;
        self.next_attack_time = now + self.config.bite.cooldown;

        let next = if self.perception.sees_target {
            SharkState::Chase
        } else {
            SharkState::Patrol
        };
        self.transition(next);
    }

    fn transition(&mut self, next: SharkState) {
        if self.state == next {
            return;
        }

        crate::logger::log(&format!(
            "🦈 SharkBrain: {:?} → {:?} (t = {:.3}s)",
            self.state, next, self.clock
        ));
        self.state = next;
    }
}
