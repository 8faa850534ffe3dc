//! Shark AI systems (сбор сенсоров из ECS → тик мозга → события).

use bevy::prelude::*;
use crate::ai::{OccluderSet, OcclusionQuery, SharkAi, SharkBrain, SharkConfig, Senses};
use crate::combat::{BiteLanded, HitCandidate, HitDetector};
use crate::components::{Health, HitMask, Hurtbox, Kinematics, Occluder, SharkTarget, WaterArea};

/// Entity, которые можно укусить
type BiteTargets<'w, 's> =
    Query<'w, 's, (Entity, &'static Transform, &'static Hurtbox, &'static mut Health), Without<SharkAi>>;

/// `HitDetector` поверх ECS query: ближайший живой `Hurtbox`,
/// пересекающий круг укуса. Запоминает, кого укусили.
struct HurtboxQuery<'q, 'w, 's> {
    targets: &'q mut BiteTargets<'w, 's>,
    hit: Option<Entity>,
}

impl HitDetector for HurtboxQuery<'_, '_, '_> {
    fn find_damageable(&mut self, center: Vec2, radius: f32, mask: HitMask) -> Option<HitCandidate<'_>> {
        let mut closest: Option<(Entity, f32)> = None;

        for (entity, transform, hurtbox, health) in self.targets.iter() {
            if !hurtbox.layers.intersects(mask) || !health.is_alive() {
                continue;
            }

            let distance = transform.translation.truncate().distance(center);
            if distance > radius + hurtbox.radius {
                continue;
            }

            // Tie-break по index: порядок итерации query не гарантирован
            let closer = match closest {
                None => true,
                Some((best, best_distance)) => {
                    distance < best_distance || (distance == best_distance && entity.index() < best.index())
                }
            };
            if closer {
                closest = Some((entity, distance));
            }
        }

        let (entity, _) = closest?;
        let (_, transform, _, health) = self.targets.get_mut(entity).ok()?;
        self.hit = Some(entity);

        Some(HitCandidate {
            center: transform.translation.truncate(),
            target: health.into_inner(),
        })
    }
}

/// Ближайшая живая цель (`SharkTarget`) для акулы в `position`.
fn locate_target(
    position: Vec2,
    locator: &Query<(Entity, &Transform), (With<SharkTarget>, Without<SharkAi>)>,
    health: &BiteTargets,
) -> Option<Vec2> {
    locator
        .iter()
        .filter(|(entity, _)| {
            // Цель без Health считается живой
            health.get(*entity).map_or(true, |(_, _, _, h)| h.is_alive())
        })
        .map(|(entity, transform)| (entity, transform.translation.truncate()))
        .min_by(|(a_entity, a), (b_entity, b)| {
            a.distance_squared(position)
                .total_cmp(&b.distance_squared(position))
                .then(a_entity.index().cmp(&b_entity.index()))
        })
        .map(|(_, target)| target)
}

/// Система: один тик AI для каждой акулы
///
/// Собирает `Senses` (цель, водоём, препятствия), тикает `SharkBrain`,
/// при попадании пишет `BiteLanded`.
pub fn shark_ai_tick(
    mut sharks: Query<(Entity, &mut SharkAi, &mut Kinematics)>,
    mut targets: BiteTargets,
    locator: Query<(Entity, &Transform), (With<SharkTarget>, Without<SharkAi>)>,
    occluders: Query<(&Transform, &Occluder)>,
    water: Option<Res<WaterArea>>,
    time: Res<Time<Fixed>>,
    mut bite_events: EventWriter<BiteLanded>,
) {
    let dt = time.delta_secs();
    let water = water.map(|area| area.bounds);

    let mut occluder_set = OccluderSet::new();
    for (transform, occluder) in occluders.iter() {
        occluder_set.push(occluder.bounds_at(transform.translation.truncate()), occluder.layers);
    }

    for (entity, mut ai, mut kinematics) in sharks.iter_mut() {
        let senses = Senses {
            target: locate_target(kinematics.position, &locator, &targets),
            water,
            occluders: Some(&occluder_set as &dyn OcclusionQuery),
        };

        let mut detector = HurtboxQuery {
            targets: &mut targets,
            hit: None,
        };
        let report = ai.brain.tick(&mut kinematics, &senses, &mut detector, dt);
        let hit_entity = detector.hit;

        let (Some(bite), Some(target)) = (report.bite, hit_entity) else {
            continue;
        };

        let killed = targets
            .get(target)
            .map_or(false, |(_, _, _, health)| !health.is_alive());

        crate::logger::log(&format!(
            "🦷 {:?} bit {:?} for {:.1} (killed: {})",
            entity, target, bite.damage, killed
        ));

        bite_events.write(BiteLanded {
            attacker: entity,
            target,
            damage: bite.damage,
            direction: bite.direction,
            knockback: bite.knockback,
            killed,
        });
    }
}

/// Компоненты новой акулы: мозг + кинематика + Transform.
///
/// `water`: тот же `WaterArea`, что будет ресурсом (нужен для
/// patrol line и shrunk bounds при создании).
pub fn shark_bundle(config: SharkConfig, position: Vec2, water: Option<&WaterArea>) -> impl Bundle {
    let brain = SharkBrain::new(config, position, water.map(|area| area.bounds));

    (
        SharkAi::new(brain),
        Kinematics::at(position),
        Transform::from_translation(position.extend(0.0)),
    )
}

/// Спавн акулы через Commands
pub fn spawn_shark(commands: &mut Commands, config: SharkConfig, position: Vec2, water: Option<&WaterArea>) -> Entity {
    let entity = commands.spawn(shark_bundle(config, position, water)).id();
    crate::logger::log(&format!("🦈 Spawned shark {:?} at {:?}", entity, position));
    entity
}
