//! Bite attack components.
//!
//! Stats and state tracking for the shark bite (windup → active → recover).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use crate::components::HitMask;

// ============================================================================
// Bite Stats
// ============================================================================

/// Bite parameters (durations in seconds, distances in world units).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiteStats {
    /// Max distance from the mouth for starting a bite and for the hit test
    pub range: f32,
    pub damage: f32,
    pub knockback: f32,
    /// Delay between the end of one bite and the next allowed start
    pub cooldown: f32,
    pub windup: f32,
    /// Lunge window in which the bite can connect
    pub active_time: f32,
    pub lunge_speed: f32,
    pub recover: f32,
    /// Layers the bite can hit
    pub hit_mask: HitMask,
}

impl Default for BiteStats {
    fn default() -> Self {
        Self {
            range: 0.85,
            damage: 10.0,
            knockback: 6.0,
            cooldown: 1.25,
            windup: 0.12,
            active_time: 0.18,
            lunge_speed: 5.5,
            recover: 0.22,
            hit_mask: HitMask::ALL,
        }
    }
}

impl BiteStats {
    /// Total session length (windup + active + recover).
    pub fn session_duration(&self) -> f32 {
        self.windup + self.active_time + self.recover
    }

    pub fn phase_duration(&self, phase: BitePhase) -> f32 {
        match phase {
            BitePhase::Windup => self.windup,
            BitePhase::Active => self.active_time,
            BitePhase::Recover => self.recover,
            BitePhase::Done => 0.0,
        }
    }
}

// ============================================================================
// Bite Session
// ============================================================================

/// Bite phases.
///
/// 1. **Windup**: stopped, aiming (lunge direction locked at entry)
/// 2. **Active**: lunge forward, hit test every tick
/// 3. **Recover**: stopped in place
/// 4. **Done**: terminal, session is discarded by the owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitePhase {
    Windup,
    Active,
    Recover,
    Done,
}

impl BitePhase {
    pub fn next(self) -> Self {
        match self {
            BitePhase::Windup => BitePhase::Active,
            BitePhase::Active => BitePhase::Recover,
            BitePhase::Recover | BitePhase::Done => BitePhase::Done,
        }
    }
}

/// One bite attempt (created at `begin`, dropped at `Done`).
///
/// **No cancellation:** once begun it always runs through all phases, even
/// if the target disappears. `dealt_damage` enforces at most one hit.
#[derive(Debug, Clone, PartialEq)]
pub struct BiteSession {
    pub phase: BitePhase,
    /// Time accumulated in the current phase (seconds)
    pub phase_elapsed: f32,
    /// Time since `begin` (seconds)
    pub total_elapsed: f32,
    pub dealt_damage: bool,
    /// Captured once at windup start, never re-aimed
    pub lunge_direction: Vec2,
}

impl BiteSession {
    pub fn is_windup(&self) -> bool {
        self.phase == BitePhase::Windup
    }

    pub fn is_active(&self) -> bool {
        self.phase == BitePhase::Active
    }

    pub fn is_recover(&self) -> bool {
        self.phase == BitePhase::Recover
    }

    pub fn is_done(&self) -> bool {
        self.phase == BitePhase::Done
    }
}
