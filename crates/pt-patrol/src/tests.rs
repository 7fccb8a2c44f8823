//! Unit tests for pt-patrol.

use pt_core::{AgentId, Position, SimTime};

use crate::{ActionProvider, DistanceOracle, Movement, PatrolController, PatrolState};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Records every navigation command; distance readings are set by the test.
#[derive(Default)]
struct RecordingMover {
    commands:  Vec<Position>,
    remaining: f32,
    stopping:  f32,
}

impl Movement for RecordingMover {
    fn move_to(&mut self, destination: Position) {
        self.commands.push(destination);
    }
}

impl DistanceOracle for RecordingMover {
    fn remaining_distance(&self) -> f32 {
        self.remaining
    }

    fn stopping_distance(&self) -> f32 {
        self.stopping
    }
}

#[derive(Default)]
struct CountingAction {
    requests: usize,
}

impl ActionProvider for CountingAction {
    fn try_perform(&mut self) {
        self.requests += 1;
    }
}

const A: Position = Position { x: 0.0,  y: 0.0, z: 0.0 };
const B: Position = Position { x: 10.0, y: 0.0, z: 0.0 };
const C: Position = Position { x: 10.0, y: 0.0, z: 10.0 };

type TestController = PatrolController<RecordingMover, CountingAction>;

fn abc_controller(has_authority: bool, now: f64) -> TestController {
    PatrolController::initialize(
        AgentId(0),
        vec![A, B, C],
        5.0,
        has_authority,
        SimTime(now),
        RecordingMover::default(),
        CountingAction::default(),
    )
    .unwrap()
}

/// `n` distinct waypoints along the x axis.
fn line(n: usize) -> Vec<Position> {
    (0..n).map(|i| Position::new(i as f32, 0.0, 0.0)).collect()
}

// ── Route ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod route_tests {
    use super::*;
    use crate::{PatrolError, Route};

    #[test]
    fn empty_route_is_config_error() {
        assert!(matches!(Route::new(Vec::<Position>::new()), Err(PatrolError::Config(_))));
    }

    #[test]
    fn indices_wrap() {
        let route = Route::new(vec![A, B, C]).unwrap();
        assert_eq!(route.len(), 3);
        assert!(!route.is_empty());
        assert_eq!(route.get(3), A);
        assert_eq!(route.get(5), C);
        assert_eq!(route.next_index(2), 0);
        assert_eq!(route.next_index(0), 1);
    }

    #[test]
    fn single_waypoint_route_cycles_on_itself() {
        let route = Route::new(vec![B]).unwrap();
        assert_eq!(route.next_index(0), 0);
        assert_eq!(route.get(7), B);
    }

    #[test]
    fn clones_share_storage() {
        let route = Route::new(vec![A, B]).unwrap();
        let other = route.clone();
        assert!(route.shares_storage(&other));
        let copy = Route::new(vec![A, B]).unwrap();
        assert_eq!(route, copy);
        assert!(!route.shares_storage(&copy));
    }
}

// ── Initialization ────────────────────────────────────────────────────────────

#[cfg(test)]
mod initialize_tests {
    use super::*;
    use crate::PatrolError;

    #[test]
    fn with_authority_moves_to_first_waypoint() {
        let c = abc_controller(true, 0.0);
        assert_eq!(c.movement().commands, vec![A]);
        assert_eq!(c.index(), 0);
        assert_eq!(c.last_action(), SimTime(0.0));
        assert_eq!(c.state(), PatrolState::Active);
        assert_eq!(c.current_waypoint(), A);
    }

    #[test]
    fn without_authority_stays_dormant() {
        let c = abc_controller(false, 3.0);
        assert!(c.movement().commands.is_empty());
        assert_eq!(c.state(), PatrolState::Dormant);
        assert_eq!(c.last_action(), SimTime(3.0));
    }

    #[test]
    fn empty_waypoints_fail_without_moving() {
        let mut mover = RecordingMover::default();
        let mut action = CountingAction::default();
        let result = PatrolController::initialize(
            AgentId(0),
            Vec::<Position>::new(),
            5.0,
            true,
            SimTime::ZERO,
            &mut mover,
            &mut action,
        );
        assert!(matches!(result, Err(PatrolError::Config(_))));
        assert!(mover.commands.is_empty());
        assert_eq!(action.requests, 0);
    }

    #[test]
    fn invalid_interval_fails() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = PatrolController::initialize(
                AgentId(0),
                vec![A],
                bad,
                true,
                SimTime::ZERO,
                RecordingMover::default(),
                CountingAction::default(),
            );
            assert!(matches!(result, Err(PatrolError::Config(_))), "interval {bad} accepted");
        }
    }
}

// ── Tick ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tick_tests {
    use super::*;

    #[test]
    fn index_after_k_advances_is_k_mod_n() {
        for n in 1..=5 {
            let waypoints = line(n);
            let mut c = PatrolController::initialize(
                AgentId(0),
                waypoints.clone(),
                1_000.0,
                true,
                SimTime::ZERO,
                RecordingMover::default(),
                CountingAction::default(),
            )
            .unwrap();

            for k in 1..=(3 * n) {
                c.tick(SimTime(k as f64), 0.0, 1.0);
                assert_eq!(c.index(), k % n, "n={n} k={k}");
            }
            let expected: Vec<Position> = (0..=(3 * n)).map(|k| waypoints[k % n]).collect();
            assert_eq!(c.movement().commands, expected);
        }
    }

    #[test]
    fn no_advance_at_exact_threshold() {
        let mut c = abc_controller(true, 0.0);
        c.tick(SimTime(1.0), 1.0, 1.0);
        assert_eq!(c.index(), 0);
        assert_eq!(c.movement().commands.len(), 1);
    }

    #[test]
    fn stale_reading_re_advances_every_tick() {
        let mut c = abc_controller(true, 0.0);
        c.tick(SimTime(0.1), 0.0, 1.0);
        c.tick(SimTime(0.2), 0.0, 1.0);
        assert_eq!(c.index(), 2);
        assert_eq!(c.movement().commands, vec![A, B, C]);
    }

    #[test]
    fn action_fires_at_exact_interval() {
        let mut c = abc_controller(true, 0.0);
        c.tick(SimTime(4.999), 10.0, 1.0);
        assert_eq!(c.actions().requests, 0);
        c.tick(SimTime(5.0), 10.0, 1.0);
        assert_eq!(c.actions().requests, 1);
        assert_eq!(c.last_action(), SimTime(5.0));
    }

    #[test]
    fn action_timer_restarts_from_fire_time() {
        let mut c = abc_controller(true, 0.0);
        c.tick(SimTime(7.0), 10.0, 1.0);
        c.tick(SimTime(11.0), 10.0, 1.0);
        assert_eq!(c.actions().requests, 1);
        c.tick(SimTime(12.0), 10.0, 1.0);
        assert_eq!(c.actions().requests, 2);
    }

    #[test]
    fn advance_and_action_in_same_tick() {
        let mut c = abc_controller(true, 0.0);
        c.tick(SimTime(5.0), 0.0, 1.0);
        assert_eq!(c.index(), 1);
        assert_eq!(c.actions().requests, 1);
    }

    #[test]
    fn dormant_tick_issues_nothing() {
        let mut c = abc_controller(false, 0.0);
        for t in [1.0, 5.0, 50.0, 10_000.0] {
            c.tick(SimTime(t), 0.0, 1.0);
        }
        assert!(c.movement().commands.is_empty());
        assert_eq!(c.actions().requests, 0);
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn step_reads_the_movement_collaborator() {
        let mut c = abc_controller(true, 0.0);
        c.movement_mut().remaining = 0.2;
        c.movement_mut().stopping = 0.5;
        c.step(SimTime(1.0));
        assert_eq!(c.index(), 1);

        c.movement_mut().remaining = 8.0;
        c.step(SimTime(2.0));
        assert_eq!(c.index(), 1);
    }

    #[test]
    fn scenario_three_waypoints() {
        let mut c = abc_controller(true, 0.0);
        assert_eq!(c.movement().commands, vec![A]);
        assert_eq!(c.index(), 0);

        c.tick(SimTime(1.0), 10.0, 1.0);
        assert_eq!(c.movement().commands, vec![A]);
        assert_eq!(c.actions().requests, 0);

        c.tick(SimTime(2.0), 0.5, 1.0);
        assert_eq!(c.movement().commands, vec![A, B]);
        assert_eq!(c.index(), 1);
        assert_eq!(c.actions().requests, 0);

        c.tick(SimTime(6.0), 10.0, 1.0);
        assert_eq!(c.actions().requests, 1);
        assert_eq!(c.last_action(), SimTime(6.0));
        assert_eq!(c.index(), 1);
    }
}

// ── Authority changes ─────────────────────────────────────────────────────────

#[cfg(test)]
mod authority_tests {
    use super::*;

    #[test]
    fn revoke_and_regain_preserves_index_and_resets_timer() {
        let mut c = abc_controller(true, 0.0);
        c.tick(SimTime(2.0), 0.5, 1.0);
        assert_eq!(c.index(), 1);

        c.on_authority_changed(false, SimTime(10.0));
        assert_eq!(c.state(), PatrolState::Dormant);
        c.on_authority_changed(true, SimTime(20.0));
        assert_eq!(c.state(), PatrolState::Active);
        assert_eq!(c.last_action(), SimTime(20.0));

        c.tick(SimTime(21.0), 10.0, 1.0);
        assert_eq!(c.actions().requests, 0, "timer must restart at regain");
        assert_eq!(c.index(), 1, "patrol position must survive the handoff");
        assert_eq!(c.movement().commands, vec![A, B]);

        c.tick(SimTime(22.0), 0.5, 1.0);
        assert_eq!(c.movement().commands, vec![A, B, C]);
        assert_eq!(c.index(), 2);
    }

    #[test]
    fn no_backlog_after_long_dormancy() {
        let mut c = abc_controller(true, 0.0);
        c.on_authority_changed(false, SimTime(1.0));
        c.tick(SimTime(50.0), 10.0, 1.0);
        c.on_authority_changed(true, SimTime(100.0));

        c.tick(SimTime(104.9), 10.0, 1.0);
        assert_eq!(c.actions().requests, 0);
        c.tick(SimTime(105.0), 10.0, 1.0);
        assert_eq!(c.actions().requests, 1);
    }

    #[test]
    fn authority_change_never_moves_or_reindexes() {
        let mut c = abc_controller(true, 0.0);
        c.tick(SimTime(1.0), 0.0, 1.0);
        c.tick(SimTime(2.0), 0.0, 1.0);
        let before = c.index();
        let commands = c.movement().commands.len();

        for (flag, t) in [(false, 3.0), (false, 4.0), (true, 5.0), (true, 6.0)] {
            c.on_authority_changed(flag, SimTime(t));
            assert_eq!(c.index(), before);
        }
        assert_eq!(c.movement().commands.len(), commands);
    }

    #[test]
    fn repeated_grant_still_resets_timer() {
        let mut c = abc_controller(true, 0.0);
        c.on_authority_changed(true, SimTime(4.0));
        c.tick(SimTime(5.0), 10.0, 1.0);
        assert_eq!(c.actions().requests, 0);
        c.tick(SimTime(9.0), 10.0, 1.0);
        assert_eq!(c.actions().requests, 1);
    }

    #[test]
    fn dormant_from_start_then_granted() {
        let mut c = abc_controller(false, 0.0);
        c.on_authority_changed(true, SimTime(2.0));
        assert!(c.movement().commands.is_empty());
        c.tick(SimTime(3.0), 0.0, 1.0);
        assert_eq!(c.movement().commands, vec![B]);
    }
}

// ── Builder + hub integration ─────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use pt_authority::AuthorityHub;
    use pt_core::{PatrolSettings, PeerId};

    use super::*;
    use crate::{PatrolBuilder, PatrolError, Route};

    fn remote_master_hub() -> AuthorityHub {
        let hub = AuthorityHub::new(PeerId(2));
        hub.join(PeerId(1));
        hub.set_master(PeerId(1), SimTime::ZERO);
        hub
    }

    #[test]
    fn explicit_authority_without_hub() {
        let c = PatrolBuilder::new(AgentId(4), vec![A, B])
            .has_authority(true)
            .build(SimTime::ZERO, RecordingMover::default(), CountingAction::default())
            .unwrap();
        assert_eq!(c.agent(), AgentId(4));
        assert!(!c.is_subscribed());
        assert_eq!(c.movement().commands, vec![A]);
        assert_eq!(c.action_interval(), 5.0);
    }

    #[test]
    fn settings_supply_interval() {
        let settings = PatrolSettings { action_interval_secs: 2.5, ..PatrolSettings::default() };
        let c = PatrolBuilder::new(AgentId(0), vec![A])
            .settings(&settings)
            .build(SimTime::ZERO, RecordingMover::default(), CountingAction::default())
            .unwrap();
        assert_eq!(c.action_interval(), 2.5);
    }

    #[test]
    fn hub_master_builds_active_and_subscribed() {
        let hub = AuthorityHub::new(PeerId(1));
        let c = PatrolBuilder::new(AgentId(0), vec![A, B])
            .has_authority(false)
            .authority(&hub)
            .build(SimTime::ZERO, RecordingMover::default(), CountingAction::default())
            .unwrap();
        assert_eq!(c.state(), PatrolState::Active);
        assert!(c.is_subscribed());
        assert_eq!(hub.subscriber_count(), 1);

        drop(c);
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[test]
    fn failed_build_leaves_no_subscription() {
        let hub = AuthorityHub::new(PeerId(1));
        let result = PatrolBuilder::new(AgentId(0), Vec::<Position>::new())
            .authority(&hub)
            .build(SimTime::ZERO, RecordingMover::default(), CountingAction::default());
        assert!(matches!(result, Err(PatrolError::Config(_))));
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[test]
    fn master_migration_activates_on_next_tick() {
        let hub = remote_master_hub();
        let mut c = PatrolBuilder::new(AgentId(0), vec![A, B, C])
            .authority(&hub)
            .build(SimTime::ZERO, RecordingMover::default(), CountingAction::default())
            .unwrap();
        assert_eq!(c.state(), PatrolState::Dormant);

        hub.peer_left(PeerId(1), SimTime(30.0));
        assert_eq!(c.state(), PatrolState::Dormant, "delivery waits for the tick");

        c.tick(SimTime(31.0), 10.0, 1.0);
        assert_eq!(c.state(), PatrolState::Active);
        assert_eq!(c.last_action(), SimTime(30.0));
        assert_eq!(c.actions().requests, 0);

        c.tick(SimTime(35.0), 10.0, 1.0);
        assert_eq!(c.actions().requests, 1);
    }

    #[test]
    fn losing_master_stops_patrol_before_acting() {
        let hub = AuthorityHub::new(PeerId(1));
        hub.join(PeerId(2));
        let mut c = PatrolBuilder::new(AgentId(0), vec![A, B])
            .authority(&hub)
            .build(SimTime::ZERO, RecordingMover::default(), CountingAction::default())
            .unwrap();

        hub.set_master(PeerId(2), SimTime(9.0));
        c.tick(SimTime(10.0), 0.0, 1.0);
        assert_eq!(c.state(), PatrolState::Dormant);
        assert_eq!(c.movement().commands, vec![A]);
        assert_eq!(c.actions().requests, 0);
    }

    #[test]
    fn poll_authority_applies_events_in_order() {
        let hub = AuthorityHub::new(PeerId(1));
        hub.join(PeerId(2));
        let mut c = PatrolBuilder::new(AgentId(0), vec![A])
            .authority(&hub)
            .build(SimTime::ZERO, RecordingMover::default(), CountingAction::default())
            .unwrap();

        hub.set_master(PeerId(2), SimTime(1.0));
        hub.set_master(PeerId(1), SimTime(2.0));
        assert_eq!(c.poll_authority(), 2);
        assert!(c.has_authority());
        assert_eq!(c.last_action(), SimTime(2.0));
        assert_eq!(c.poll_authority(), 0);
    }

    #[test]
    fn targeted_notification() {
        let hub = AuthorityHub::new(PeerId(1));
        let mut c = PatrolBuilder::new(AgentId(3), vec![A])
            .authority(&hub)
            .build(SimTime::ZERO, RecordingMover::default(), CountingAction::default())
            .unwrap();
        hub.notify(AgentId(3), false, SimTime(1.0));
        c.poll_authority();
        assert_eq!(c.state(), PatrolState::Dormant);
    }

    #[test]
    fn shutdown_unregisters_and_returns_collaborators() {
        let hub = AuthorityHub::new(PeerId(1));
        let mut c = PatrolBuilder::new(AgentId(0), vec![A, B])
            .authority(&hub)
            .build(SimTime::ZERO, RecordingMover::default(), CountingAction::default())
            .unwrap();
        c.tick(SimTime(5.0), 0.0, 1.0);

        let (mover, action) = c.shutdown();
        assert_eq!(mover.commands, vec![A, B]);
        assert_eq!(action.requests, 1);
        assert_eq!(hub.subscriber_count(), 0);
        assert_eq!(hub.peer_left(PeerId(1), SimTime(6.0)), 0);
    }

    #[test]
    fn agents_share_one_route() {
        let route = Route::new(vec![A, B, C]).unwrap();
        let hub = AuthorityHub::new(PeerId(1));
        let controllers: Vec<_> = (0..3)
            .map(|i| {
                PatrolBuilder::new(AgentId(i), route.clone())
                    .authority(&hub)
                    .build(SimTime::ZERO, RecordingMover::default(), CountingAction::default())
                    .unwrap()
            })
            .collect();
        assert!(controllers.iter().all(|c| c.route().shares_storage(&route)));
        assert_eq!(hub.subscriber_count(), 3);
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader_tests {
    use std::io::{Cursor, Write};

    use super::*;
    use crate::{PatrolError, load_route_csv, load_route_reader};

    #[test]
    fn loads_in_file_order() {
        let csv = "x,y,z\n0,0,0\n10,0,0\n10,0,10\n";
        let route = load_route_reader(Cursor::new(csv)).unwrap();
        assert_eq!(route.waypoints(), &[A, B, C]);
    }

    #[test]
    fn extra_columns_are_ignored() {
        let csv = "name,x,y,z\ngate,1.5,2,3\n";
        let route = load_route_reader(Cursor::new(csv)).unwrap();
        assert_eq!(route.waypoints(), &[Position::new(1.5, 2.0, 3.0)]);
    }

    #[test]
    fn header_only_is_config_error() {
        let result = load_route_reader(Cursor::new("x,y,z\n"));
        assert!(matches!(result, Err(PatrolError::Config(_))));
    }

    #[test]
    fn bad_number_is_parse_error() {
        let result = load_route_reader(Cursor::new("x,y,z\n1,two,3\n"));
        assert!(matches!(result, Err(PatrolError::Parse(_))));
    }

    #[test]
    fn non_finite_is_parse_error() {
        let result = load_route_reader(Cursor::new("x,y,z\n1,NaN,3\n"));
        assert!(matches!(result, Err(PatrolError::Parse(_))));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"x,y,z\n0,0,0\n10,0,0\n").unwrap();
        let route = load_route_csv(file.path()).unwrap();
        assert_eq!(route.len(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_route_csv(&dir.path().join("missing.csv"));
        assert!(matches!(result, Err(PatrolError::Io(_))));
    }
}
