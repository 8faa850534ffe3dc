//! Physics module
//!
//! Кинематика без физического движка: steering, confinement в воде,
//! интегрирование. Все функции чистые: принимают и возвращают значения,
//! AI вызывает их явно внутри своего тика.

pub mod confinement;
pub mod steering;

pub use confinement::{clamp, contains, enforce, shrunk_bounds};
pub use steering::{integrate, rotate_facing, steer};
