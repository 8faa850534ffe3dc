//! Combat systems (damage bookkeeping)

pub mod damage;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod damage_tests;

// Re-export all systems
pub use damage::*;
