//! Tests for the bite sequencer.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use crate::combat::{
        BitePhase, BiteSession, BiteStats, Damageable, HitCandidate, HitDetector, LungeParams, NoTargets,
    };
    use crate::components::{HitMask, Kinematics};

    /// Damageable, который считает вызовы
    #[derive(Default)]
    struct CountingTarget {
        hits: u32,
        last_direction: Vec2,
    }

    impl Damageable for CountingTarget {
        fn take_damage(&mut self, _amount: f32, hit_direction: Vec2, _knockback: f32) {
            self.hits += 1;
            self.last_direction = hit_direction;
        }
    }

    /// Цель всегда в радиусе укуса
    struct AlwaysInRange {
        center: Vec2,
        target: CountingTarget,
        queries: u32,
    }

    impl HitDetector for AlwaysInRange {
        fn find_damageable(&mut self, _center: Vec2, _radius: f32, _mask: HitMask) -> Option<HitCandidate<'_>> {
            self.queries += 1;
            Some(HitCandidate {
                center: self.center,
                target: &mut self.target,
            })
        }
    }

    fn lunge() -> LungeParams {
        LungeParams {
            acceleration: 8.0,
            bite_offset: Vec2::ZERO,
        }
    }

    fn run_to_done(session: &mut BiteSession, kin: &mut Kinematics, stats: &BiteStats, hits: &mut dyn HitDetector, dt: f32) -> u32 {
        let mut ticks = 0;
        while !session.is_done() {
            session.tick(kin, stats, lunge(), hits, dt);
            ticks += 1;
            assert!(ticks < 10_000, "session never finished");
        }
        ticks
    }

    #[test]
    fn test_session_completes_in_exact_tick_count() {
        let stats = BiteStats {
            windup: 0.12,
            active_time: 0.18,
            recover: 0.22,
            ..Default::default()
        };
        let mut kin = Kinematics::at(Vec2::ZERO);
        let mut session = BiteSession::begin(&mut kin, Some(Vec2::new(0.5, 0.0)), &stats);

        let ticks = run_to_done(&mut session, &mut kin, &stats, &mut NoTargets, 0.02);

        // ceil(0.52 / 0.02) = 26
        assert_eq!(ticks, 26);
    }

    #[test]
    fn test_phase_boundaries() {
        let stats = BiteStats::default();
        let mut kin = Kinematics::at(Vec2::ZERO);
        let mut session = BiteSession::begin(&mut kin, Some(Vec2::X), &stats);
        let mut phases = Vec::new();

        while !session.is_done() {
            session.tick(&mut kin, &stats, lunge(), &mut NoTargets, 0.02);
            phases.push(session.phase);
        }

        // windup 0.12 → Active на 6-м тике, active 0.18 → Recover на 15-м
        assert_eq!(phases[4], BitePhase::Windup);
        assert_eq!(phases[5], BitePhase::Active);
        assert_eq!(phases[13], BitePhase::Active);
        assert_eq!(phases[14], BitePhase::Recover);
        assert_eq!(phases[24], BitePhase::Recover);
        assert_eq!(phases[25], BitePhase::Done);
    }

    #[test]
    fn test_begin_stops_and_locks_direction() {
        let stats = BiteStats::default();
        let mut kin = Kinematics::at(Vec2::ZERO);
        kin.velocity = Vec2::new(3.0, 0.0);

        let session = BiteSession::begin(&mut kin, Some(Vec2::new(0.0, 0.5)), &stats);

        assert_eq!(kin.velocity, Vec2::ZERO);
        assert!(session.is_windup());
        assert!((session.lunge_direction - Vec2::Y).length() < 1e-6);
        assert!((kin.facing - Vec2::Y).length() < 1e-6);
    }

    #[test]
    fn test_begin_without_target_keeps_facing() {
        let stats = BiteStats::default();
        let mut kin = Kinematics::at(Vec2::ZERO);
        kin.facing = Vec2::NEG_X;

        let session = BiteSession::begin(&mut kin, None, &stats);
        assert_eq!(session.lunge_direction, Vec2::NEG_X);
    }

    #[test]
    fn test_zero_windup_starts_active() {
        let stats = BiteStats {
            windup: 0.0,
            ..Default::default()
        };
        let mut kin = Kinematics::at(Vec2::ZERO);
        let session = BiteSession::begin(&mut kin, Some(Vec2::X), &stats);
        assert!(session.is_active());
    }

    #[test]
    fn test_windup_and_recover_hold_still() {
        let stats = BiteStats::default();
        let mut kin = Kinematics::at(Vec2::ZERO);
        let mut session = BiteSession::begin(&mut kin, Some(Vec2::X), &stats);

        session.tick(&mut kin, &stats, lunge(), &mut NoTargets, 0.02);
        assert!(session.is_windup());
        assert_eq!(kin.velocity, Vec2::ZERO);

        while !session.is_recover() {
            session.tick(&mut kin, &stats, lunge(), &mut NoTargets, 0.02);
        }
        assert_eq!(kin.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_lunge_moves_along_locked_direction() {
        let stats = BiteStats::default();
        let mut kin = Kinematics::at(Vec2::ZERO);
        let mut session = BiteSession::begin(&mut kin, Some(Vec2::new(0.0, -1.0)), &stats);

        while !session.is_active() {
            session.tick(&mut kin, &stats, lunge(), &mut NoTargets, 0.02);
        }
        // Первый шаг рывка уже сделан на тике перехода
        assert!(kin.velocity.y < 0.0);
        assert_eq!(kin.velocity.x, 0.0);
        assert!(kin.velocity.length() <= stats.lunge_speed + 1e-5);
    }

    #[test]
    fn test_at_most_one_damage_per_session() {
        let stats = BiteStats::default();
        let mut kin = Kinematics::at(Vec2::ZERO);
        let mut hits = AlwaysInRange {
            center: Vec2::new(0.4, 0.0),
            target: CountingTarget::default(),
            queries: 0,
        };
        let mut session = BiteSession::begin(&mut kin, Some(Vec2::new(0.4, 0.0)), &stats);

        let mut landed = 0;
        while !session.is_done() {
            if session.tick(&mut kin, &stats, lunge(), &mut hits, 0.02).is_some() {
                landed += 1;
            }
        }

        assert_eq!(landed, 1);
        assert_eq!(hits.target.hits, 1);
        assert!(session.dealt_damage);
        // Hit test больше не спрашивает детектор после попадания
        assert_eq!(hits.queries, 1);
        assert!((hits.target.last_direction - Vec2::X).length() < 1e-6);
    }

    #[test]
    fn test_no_hit_is_silent() {
        let stats = BiteStats::default();
        let mut kin = Kinematics::at(Vec2::ZERO);
        let mut session = BiteSession::begin(&mut kin, None, &stats);

        let ticks = run_to_done(&mut session, &mut kin, &stats, &mut NoTargets, 0.02);
        assert!(!session.dealt_damage);
        assert_eq!(ticks, 26);
    }

    #[test]
    fn test_done_is_terminal() {
        let stats = BiteStats::default();
        let mut kin = Kinematics::at(Vec2::ZERO);
        let mut session = BiteSession::begin(&mut kin, None, &stats);
        run_to_done(&mut session, &mut kin, &stats, &mut NoTargets, 0.02);

        let elapsed = session.total_elapsed;
        assert!(session.tick(&mut kin, &stats, lunge(), &mut NoTargets, 0.02).is_none());
        assert_eq!(session.total_elapsed, elapsed);
        assert!(session.is_done());
    }

    #[test]
    fn test_large_step_still_finishes() {
        let stats = BiteStats::default();
        let mut kin = Kinematics::at(Vec2::ZERO);
        let mut session = BiteSession::begin(&mut kin, None, &stats);

        // Один огромный тик: windup → active (один шаг) → recover → done
        session.tick(&mut kin, &stats, lunge(), &mut NoTargets, 1.0);
        assert!(session.is_done());
    }

    #[test]
    fn test_session_duration() {
        let stats = BiteStats::default();
        assert!((stats.session_duration() - 0.52).abs() < 1e-6);
        assert_eq!(stats.phase_duration(BitePhase::Done), 0.0);
    }
}
