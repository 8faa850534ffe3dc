//! Tests for damage systems.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::ecs::system::RunSystemOnce;
    use bevy::prelude::*;
    use crate::combat::{BiteLanded, EntityDied};
    use crate::components::Health;
    use super::super::damage::{announce_deaths, tick_invulnerability};

    fn bite(target: Entity, killed: bool) -> BiteLanded {
        BiteLanded {
            attacker: Entity::PLACEHOLDER,
            target,
            damage: 10.0,
            direction: Vec2::X,
            knockback: 6.0,
            killed,
        }
    }

    #[test]
    fn test_announce_deaths_only_for_kills() {
        let mut world = World::new();
        world.init_resource::<Events<BiteLanded>>();
        world.init_resource::<Events<EntityDied>>();

        let victim = world.spawn_empty().id();
        let survivor = world.spawn_empty().id();

        world.send_event(bite(survivor, false));
        world.send_event(bite(victim, true));
        world.run_system_once(announce_deaths).ok();

        let events = world.resource::<Events<EntityDied>>();
        let mut cursor = events.get_cursor();
        let died: Vec<Entity> = cursor.read(events).map(|e| e.entity).collect();
        assert_eq!(died, vec![victim]);
    }

    #[test]
    fn test_tick_invulnerability_counts_down() {
        let mut world = World::new();
        let mut time = Time::<Fixed>::from_seconds(0.1);
        time.advance_by(Duration::from_millis(100));
        world.insert_resource(time);

        let mut health = Health::new(100.0);
        health.invulnerable_timer = 0.15;
        let entity = world.spawn(health).id();

        world.run_system_once(tick_invulnerability).ok();
        let after = world.get::<Health>(entity).map(|h| h.invulnerable_timer).unwrap_or_default();
        assert!((after - 0.05).abs() < 1e-4, "timer = {}", after);

        world.run_system_once(tick_invulnerability).ok();
        let after = world.get::<Health>(entity).map(|h| h.invulnerable_timer).unwrap_or_default();
        assert_eq!(after, 0.0);
    }
}
