//! AI components

pub mod fsm;


// Re-export all components
pub use fsm::*;

use bevy::prelude::*;
use crate::ai::SharkBrain;

/// ECS-обёртка над `SharkBrain`
///
/// Позиция/скорость живут в `Kinematics` на той же entity,
/// `Transform` синхронизируется после тика.
#[derive(Component, Debug, Clone)]
pub struct SharkAi {
    pub brain: SharkBrain,
}

impl SharkAi {
    pub fn new(brain: SharkBrain) -> Self {
        Self { brain }
    }

    pub fn state(&self) -> SharkState {
        self.brain.state()
    }
}
