//! Damage bookkeeping systems (i-frames, death events).

use bevy::prelude::*;
use crate::components::Health;
use crate::combat::{BiteLanded, EntityDied};

/// System: tick invulnerability windows after hits.
pub fn tick_invulnerability(
    mut healths: Query<&mut Health>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for mut health in healths.iter_mut() {
        if health.is_invulnerable() {
            health.tick(delta);
        }
    }
}

/// System: BiteLanded (killed) → EntityDied.
///
/// Смерть и её последствия: ответственность коллабораторов (UI, respawn),
/// здесь только событие.
pub fn announce_deaths(
    mut bites: EventReader<BiteLanded>,
    mut deaths: EventWriter<EntityDied>,
) {
    for bite in bites.read() {
        if !bite.killed {
            continue;
        }

        deaths.write(EntityDied {
            entity: bite.target,
            killer: Some(bite.attacker),
        });

        crate::logger::log_info(&format!(
            "💀 Entity {:?} killed by bite from {:?}",
            bite.target, bite.attacker
        ));
    }
}
