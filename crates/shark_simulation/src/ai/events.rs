//! AI Events
//!
//! Внешний мир (физика, геймплей) сообщает акуле о столкновениях.
//! `shark_ai_tick` читает их до тика мозга.

use bevy::prelude::*;

/// Акула во что-то врезалась (стена, камень, борт лодки)
///
/// В Patrol с `flip_on_collision` разворачивает маршрут.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharkCollided {
    pub shark: Entity,
}
