//! AI reactions на внешние события.

use bevy::prelude::*;
use crate::ai::{SharkAi, SharkCollided};

/// Система: столкновения → разворот патруля
///
/// Запускается до `shark_ai_tick`, чтобы новый курс действовал в этом же тике.
pub fn react_to_collisions(mut events: EventReader<SharkCollided>, mut sharks: Query<&mut SharkAi>) {
    for event in events.read() {
        let Ok(mut ai) = sharks.get_mut(event.shark) else {
            continue;
        };
        ai.brain.notify_collision();
    }
}
