//! Demo scenario: водоём, акула, скала и ныряльщик.
//!
//! Используется бинарником и тестом детерминизма. Ныряльщик плавает
//! случайно (через `DeterministicRng`), после смерти возрождается.

use bevy::prelude::*;
use rand::Rng;
use crate::ai::{spawn_shark, SharkConfig};
use crate::combat::EntityDied;
use crate::components::{Health, Hurtbox, Occluder, SharkTarget, WaterArea};
use crate::physics::clamp;
use crate::DeterministicRng;

pub const DEMO_WATER_MIN: Vec2 = Vec2::new(-15.0, -8.0);
pub const DEMO_WATER_MAX: Vec2 = Vec2::new(15.0, 0.0);
pub const DEMO_SHARK_SPAWN: Vec2 = Vec2::new(-6.0, -4.0);
pub const DEMO_DIVER_SPAWN: Vec2 = Vec2::new(6.0, -3.0);

/// Ныряльщик (цель акулы в демо)
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Diver {
    pub velocity: Vec2,
    pub speed: f32,
    /// Секунд до смены курса
    pub retarget_timer: f32,
    pub retarget_interval: f32,
}

impl Default for Diver {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            speed: 1.2,
            retarget_timer: 0.0,
            retarget_interval: 3.0,
        }
    }
}

/// Конфиг акулы для демо (Resource, чтобы бинарник мог подменить)
#[derive(Resource, Debug, Clone, Default)]
pub struct DemoSharkConfig(pub SharkConfig);

/// Demo Plugin
///
/// Startup: сцена. FixedUpdate: ныряльщик плавает, после смерти возрождается.
pub struct ScenarioPlugin;

impl Plugin for ScenarioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DemoSharkConfig>()
            .add_systems(Startup, setup_demo_scene)
            .add_systems(
                FixedUpdate,
                (
                    wander_divers.before(crate::ai::shark_ai_tick),
                    revive_divers.after(crate::combat::systems::announce_deaths),
                ),
            );
    }
}

/// Система: спавн демо-сцены
pub fn setup_demo_scene(mut commands: Commands, config: Res<DemoSharkConfig>) {
    let water = WaterArea::new(DEMO_WATER_MIN, DEMO_WATER_MAX);
    commands.insert_resource(water);

    spawn_shark(&mut commands, config.0.clone(), DEMO_SHARK_SPAWN, Some(&water));

    // Скала посередине: за ней можно спрятаться (если obstacle_mask включает слой 0)
    commands.spawn((
        Occluder::new(Vec2::new(0.6, 1.5)),
        Transform::from_xyz(0.0, -5.0, 0.0),
    ));

    commands.spawn((
        Diver::default(),
        SharkTarget,
        Hurtbox::default(),
        Health::new(100.0),
        Transform::from_translation(DEMO_DIVER_SPAWN.extend(0.0)),
    ));

    crate::logger::log_info("🌊 Demo scene ready: 1 shark, 1 diver, 1 rock");
}

/// Система: случайное блуждание ныряльщиков внутри воды
pub fn wander_divers(
    mut divers: Query<(&mut Diver, &mut Transform, &mut Health)>,
    water: Option<Res<WaterArea>>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
) {
    let dt = time.delta_secs();

    for (mut diver, mut transform, mut health) in divers.iter_mut() {
        if !health.is_alive() {
            continue;
        }

        // Отброс от укуса
        let impulse = health.take_knockback();
        if impulse != Vec2::ZERO {
            let max_speed = diver.speed * 3.0;
            diver.velocity = (diver.velocity + impulse).clamp_length_max(max_speed);
            diver.retarget_timer = diver.retarget_interval;
        }

        diver.retarget_timer -= dt;
        if diver.retarget_timer <= 0.0 {
            let angle = rng.rng.gen_range(0.0..std::f32::consts::TAU);
            diver.velocity = Vec2::from_angle(angle) * diver.speed;
            diver.retarget_timer = diver.retarget_interval;
        }

        let mut position = transform.translation.truncate() + diver.velocity * dt;
        if let Some(water) = water.as_deref() {
            let clamped = clamp(position, water.bounds);
            // Упёрлись в край: отражаем скорость по этой оси
            if clamped.x != position.x {
                diver.velocity.x = -diver.velocity.x;
            }
            if clamped.y != position.y {
                diver.velocity.y = -diver.velocity.y;
            }
            position = clamped;
        }

        transform.translation.x = position.x;
        transform.translation.y = position.y;
    }
}

/// Система: EntityDied → ныряльщик возрождается в случайной точке
pub fn revive_divers(
    mut deaths: EventReader<EntityDied>,
    mut divers: Query<(&mut Health, &mut Transform), With<Diver>>,
    water: Option<Res<WaterArea>>,
    mut rng: ResMut<DeterministicRng>,
) {
    for death in deaths.read() {
        let Ok((mut health, mut transform)) = divers.get_mut(death.entity) else {
            continue;
        };

        let spot = match water.as_deref() {
            Some(water) => Vec2::new(
                rng.rng.gen_range(water.bounds.min.x..=water.bounds.max.x),
                rng.rng.gen_range(water.bounds.min.y..=water.bounds.max.y),
            ),
            None => DEMO_DIVER_SPAWN,
        };

        let max = health.max;
        health.heal(max);
        transform.translation.x = spot.x;
        transform.translation.y = spot.y;

        crate::logger::log_info(&format!(
            "🤿 Diver {:?} revived at ({:.1}, {:.1})",
            death.entity, spot.x, spot.y
        ));
    }
}
