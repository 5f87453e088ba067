//! Social graph: connection formation, partner pairing and decay
//!
//! Formation runs once per step after every actor has ticked. Actors are
//! bucketed by the grid cell they stand on; within a bucket only those whose
//! perceived state is sociable take part. Buckets are visited in cell order
//! and members in population order, so a seeded run is reproducible.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::config::SimulationConfig;
use crate::simulation::rates;
use crate::simulation::tick::SimulationEvent;
use crate::world::population::Population;
use crate::world::registry::World;
use crate::world::relations;

/// Population indices of sociable actors, grouped by cell
fn sociable_groups(population: &Population) -> BTreeMap<(i64, i64), Vec<usize>> {
    let mut groups: BTreeMap<(i64, i64), Vec<usize>> = BTreeMap::new();
    for (idx, actor) in population.iter().enumerate() {
        if actor.alive && actor.perceived_state().sociability_rate() > 0.0 {
            groups.entry(actor.position.cell()).or_default().push(idx);
        }
    }
    groups
}

/// Strength added by one encounter at the current `strength`
fn increment(strength: f64, config: &SimulationConfig) -> f64 {
    if strength < config.trickle_threshold {
        1.0
    } else {
        config.trickle_increment
    }
}

/// Let co-located sociable actors meet, strengthen their bonds and pair up
pub fn form_connections(
    world: &mut World,
    config: &SimulationConfig,
    rng: &mut impl Rng,
    elapsed_hours: f64,
    events: &mut Vec<SimulationEvent>,
) {
    let World { places, population, .. } = world;

    for members in sociable_groups(population).values() {
        if members.len() < 2 {
            continue;
        }
        for &idx in members {
            let actor = population.at(idx);
            let rate = actor.perceived_state().sociability_rate();
            if !rates::roll(rng, rate, elapsed_hours) {
                continue;
            }

            let candidates: Vec<usize> = members
                .iter()
                .copied()
                .filter(|&other_idx| {
                    let other = population.at(other_idx);
                    other_idx != idx
                        && actor.social.partner != Some(other.id)
                        && actor.home != other.home
                })
                .collect();
            let Some(&other_idx) = candidates.choose(rng) else {
                continue;
            };

            let (a, b) = population.pair_mut(idx, other_idx);
            let a_gain = increment(a.social.strength(b.id), config);
            let b_gain = increment(b.social.strength(a.id), config);
            let strength = a.social.reinforce(b.id, a_gain, config.max_connections);
            b.social.reinforce(a.id, b_gain, config.max_connections);

            let over_threshold = strength.map_or(false, |s| s > config.dating_threshold);
            if over_threshold && a.can_partner_with(b, config) {
                match relations::pair_partners(a, b, places) {
                    Ok(()) => events.push(SimulationEvent::Partnered { a: a.id, b: b.id }),
                    Err(err) => tracing::warn!(a = %a.id, b = %b.id, %err, "pairing failed"),
                }
            }
        }
    }
}

/// Fade every connection by `hours` worth of decay and enforce the cap
pub fn decay_connections(population: &mut Population, config: &SimulationConfig, hours: f64) {
    let amount = config.connection_decay * hours;
    for actor in population.iter_mut() {
        actor.social.decay(amount);
        actor.social.enforce_capacity(config.max_connections);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ActorId, PlaceId, Position};
    use crate::entity::activity::{Activity, ActivityKind};
    use crate::entity::actor::{Actor, Gender};
    use crate::entity::preferences::{Preferences, VenueAffinity};
    use crate::world::place::Place;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn prefs(partner_gender: Gender) -> Preferences {
        Preferences {
            venues: VenueAffinity { club: 0.5, gym: 0.5, park: 0.5, university: 0.5, friends: 0.5 },
            min_connection_strength_sum: 20.0,
            partner_gender,
        }
    }

    /// Two actors from separate homes, both at home 0 doing `kind`
    fn world(kind: ActivityKind) -> World {
        let mut world = World::new(100.0, 100.0);
        let host_home = world.places.add(Place::home(PlaceId(0), Position::new(10.0, 10.0)));
        let guest_home = world.places.add(Place::home(PlaceId(0), Position::new(60.0, 60.0)));
        let spot = world.places[host_home].position;
        for (home, gender, wanted) in [
            (host_home, Gender::Female, Gender::Male),
            (guest_home, Gender::Male, Gender::Female),
        ] {
            let id = world.population.allocate_id();
            let mut actor = Actor::new(
                id, "A".into(), format!("F{}", id.0), 30.0, gender, home,
                world.places[home].position, prefs(wanted),
            );
            relations::move_in(&mut actor, &mut world.places, home).unwrap();
            actor.position = spot;
            actor.target = Activity::new(kind, 5.0, host_home, spot);
            world.population.insert(actor);
        }
        world
    }

    #[test]
    fn test_sleeping_actors_do_not_meet() {
        let config = SimulationConfig::default();
        let mut world = world(ActivityKind::Sleeping);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            form_connections(&mut world, &config, &mut rng, 1.0, &mut Vec::new());
        }
        assert!(world.population.iter().all(|a| a.social.is_empty()));
    }

    #[test]
    fn test_co_residents_do_not_meet() {
        let config = SimulationConfig::default();
        let mut world = world(ActivityKind::VisitingFriend);
        let guest = world.population.get_mut(ActorId(1)).unwrap();
        relations::move_in(guest, &mut world.places, PlaceId(0)).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            form_connections(&mut world, &config, &mut rng, 1.0, &mut Vec::new());
        }
        assert!(world.population.iter().all(|a| a.social.is_empty()));
    }

    #[test]
    fn test_connections_are_symmetric_and_trickle() {
        let config = SimulationConfig {
            dating_threshold: 1_000.0,
            ..SimulationConfig::default()
        };
        let mut world = world(ActivityKind::AtTheClub);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            form_connections(&mut world, &config, &mut rng, 1.0, &mut Vec::new());
        }
        let a = world.population.get(ActorId(0)).unwrap();
        let b = world.population.get(ActorId(1)).unwrap();
        assert!(a.social.strength(b.id) > config.trickle_threshold);
        // Past the trickle threshold growth slows to a fraction of one per encounter
        assert!(a.social.strength(b.id) < 200.0);
        assert!(a.social.partner.is_none());
    }

    #[test]
    fn test_pairing_after_dating_threshold() {
        let config = SimulationConfig::default();
        let mut world = world(ActivityKind::VisitingFriend);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut events = Vec::new();
        for _ in 0..100 {
            form_connections(&mut world, &config, &mut rng, 1.0, &mut events);
        }

        assert_eq!(
            events.iter().filter(|e| matches!(e, SimulationEvent::Partnered { .. })).count(),
            1
        );
        let a = world.population.get(ActorId(0)).unwrap();
        let b = world.population.get(ActorId(1)).unwrap();
        assert_eq!(a.social.partner, Some(b.id));
        assert!(!a.social.contains(b.id) && !b.social.contains(a.id));
        assert_eq!(a.home, b.home);
        world.check_consistency().unwrap();
    }

    #[test]
    fn test_decay_removes_faded_connections() {
        let config = SimulationConfig::default();
        let mut world = world(ActivityKind::Sleeping);
        let actor = world.population.get_mut(ActorId(0)).unwrap();
        actor.social.reinforce(ActorId(1), 0.5, 30);
        actor.social.reinforce(ActorId(7), 3.0, 30);

        decay_connections(&mut world.population, &config, 10.0);
        let actor = world.population.get(ActorId(0)).unwrap();
        assert!((actor.social.strength(ActorId(1)) - 0.4).abs() < 1e-9);

        decay_connections(&mut world.population, &config, 100.0);
        let actor = world.population.get(ActorId(0)).unwrap();
        assert!(!actor.social.contains(ActorId(1)));
        assert!((actor.social.strength(ActorId(7)) - 1.9).abs() < 1e-9);
    }
}
