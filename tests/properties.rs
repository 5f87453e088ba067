//! Property tests for the invariants that must hold for any input
//!
//! - Needs never leave [0, 1]
//! - The clock's hour and day stay in range while its timestamp accumulates
//! - Movement closes the distance to the target without overshooting
//! - Connection lists respect the cap and always evict the weakest
//! - Long-term history display never exceeds the cap plus the newest entry

use proptest::prelude::*;

use society_sim::core::calendar::Clock;
use society_sim::core::config::SimulationConfig;
use society_sim::core::types::{ActorId, PlaceId, Position};
use society_sim::entity::activity::{Activity, ActivityKind};
use society_sim::entity::actor::{Actor, Gender};
use society_sim::entity::needs::{Need, NeedKind};
use society_sim::entity::preferences::{Preferences, VenueAffinity};
use society_sim::entity::social::SocialConnections;
use society_sim::simulation::decision::{move_toward_target, travel_speed, StepContext};
use society_sim::simulation::History;
use society_sim::world::registry::World;

const SIZE: f64 = 1000.0;

fn walker(start: Position, destination: Position, wealth: f64) -> Actor {
    let preferences = Preferences {
        venues: VenueAffinity { club: 0.5, gym: 0.5, park: 0.5, university: 0.5, friends: 0.5 },
        min_connection_strength_sum: 20.0,
        partner_gender: Gender::Female,
    };
    let mut actor = Actor::new(
        ActorId(0),
        "Walker".into(),
        "Test".into(),
        30.0,
        Gender::Male,
        PlaceId(0),
        start,
        preferences,
    );
    actor.position = start;
    actor.wealth = wealth;
    actor.target = Activity::new(ActivityKind::InThePark, 1.0, PlaceId(0), destination);
    actor
}

proptest! {
    #[test]
    fn need_stays_in_unit_range(
        start in 0.0f64..=1.0,
        steps in prop::collection::vec((-5.0f64..5.0, 0.0f64..10.0), 0..50),
    ) {
        let mut need = Need::new(NeedKind::Food, start);
        for (rate, hours) in steps {
            need.add(rate, hours);
            prop_assert!((0.0..=1.0).contains(&need.amount()));
        }
    }

    #[test]
    fn clock_accumulates_and_wraps(
        hour in 0.0f64..24.0,
        day in 0u8..7,
        advances in prop::collection::vec(0.0f64..30.0, 0..40),
    ) {
        let mut clock = Clock::new(hour, day);
        let start = clock.timestamp();
        let mut total = 0.0;
        for elapsed in advances {
            clock.advance(elapsed);
            total += elapsed;
            prop_assert!((0.0..24.0).contains(&clock.hour()));
            prop_assert!(clock.day() < 7);
        }
        prop_assert!((clock.timestamp() - start - total).abs() < 1e-6);
    }

    #[test]
    fn movement_never_overshoots(
        (sx, sy) in (0.0f64..SIZE, 0.0f64..SIZE),
        (dx, dy) in (0.0f64..SIZE, 0.0f64..SIZE),
        wealth in 0.0f64..10_000.0,
        elapsed in 0.01f64..0.25,
    ) {
        let config = SimulationConfig::default();
        let clock = Clock::default();
        let ctx = StepContext { clock: &clock, config: &config, width: SIZE, height: SIZE, elapsed_hours: elapsed };
        let destination = Position::new(dx, dy);
        let mut actor = walker(Position::new(sx, sy), destination, wealth);

        let before = actor.position.distance_to(&destination);
        let start = actor.position;
        move_toward_target(&mut actor, &ctx);
        let after = actor.position.distance_to(&destination);
        let travelled = start.distance_to(&actor.position);
        let reach = travel_speed(wealth, &config) * elapsed;

        prop_assert!(travelled <= reach + 1e-6);
        prop_assert!(after <= before + 1e-9);
        if before > 0.0 {
            prop_assert!(after < before);
        }
        prop_assert!(actor.position.x >= 0.0 && actor.position.x <= SIZE);
        prop_assert!(actor.position.y >= 0.0 && actor.position.y <= SIZE);
    }

    #[test]
    fn connection_cap_evicts_weakest(
        strengths in prop::collection::vec(0.01f64..100.0, 0..80),
        cap in 1usize..40,
    ) {
        let mut social = SocialConnections::new();
        for (i, strength) in strengths.iter().enumerate() {
            social.reinforce(ActorId(i as u64), *strength, usize::MAX);
        }
        let evicted = social.enforce_capacity(cap);

        prop_assert!(social.len() <= cap);
        prop_assert_eq!(social.len() + evicted.len(), strengths.len());
        let weakest_kept = social.iter().map(|(_, s)| s).fold(f64::INFINITY, f64::min);
        for id in evicted {
            prop_assert!(strengths[id.0 as usize] <= weakest_kept);
        }
    }

    #[test]
    fn long_term_display_is_bounded(
        steps in 1usize..600,
        cap in 1usize..60,
    ) {
        let config = SimulationConfig {
            history_window_hours: 1.0,
            long_term_cadence_hours: 0.25,
            long_term_display_cap: cap,
            ..SimulationConfig::default()
        };
        let world = World::new(10.0, 10.0);
        let mut history = History::new(&config);
        let mut clock = Clock::default();
        for _ in 0..steps {
            clock.advance(0.25);
            history.record(&world, &clock, &config);
        }

        let shown = history.long_term_entries();
        prop_assert!(!shown.is_empty());
        let span = history.long_term().last().unwrap().snapshot.timestamp
            - history.long_term()[0].snapshot.timestamp;
        if span >= 1.0 {
            prop_assert!(shown.len() <= cap + 1);
            let newest = &history.long_term().last().unwrap().snapshot;
            prop_assert_eq!(shown.last().copied(), Some(newest));
        }
    }
}
