//! Combat components

pub mod bite;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod bite_tests;

// Re-export all components
pub use bite::*;
