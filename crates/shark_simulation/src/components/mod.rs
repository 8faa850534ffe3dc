//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: цель акулы и её здоровье (SharkTarget, Hurtbox, Health)
//! - movement: кинематика агента (Kinematics)
//! - world: водоём, препятствия, слои (WaterArea, Occluder, HitMask)
//!
//! AI-компоненты (SharkAi, SharkConfig) живут в `crate::ai`.

pub mod actor;
pub mod movement;
pub mod world;

pub use actor::*;
pub use movement::*;
pub use world::*;
