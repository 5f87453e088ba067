//! Priority cascade choosing an actor's next activity
//!
//! Rules are evaluated top to bottom and the first one that applies wins.
//! Every rule that does not apply falls through to the next; the last rule
//! (television at home) always applies.

use rand::distributions::WeightedIndex;
use rand::prelude::Distribution;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::types::PlaceId;
use crate::entity::activity::{Activity, ActivityKind};
use crate::entity::actor::Actor;
use crate::simulation::decision::StepContext;
use crate::simulation::lifecycle::sleep_hours;
use crate::world::place::{Place, PlaceKind};
use crate::world::population::Others;
use crate::world::registry::Places;

/// Longest single shift before the policy is consulted again
const SHIFT_CHUNK_HOURS: f64 = 2.0;
const LUNCH_HOURS: f64 = 0.5;
const JOB_HUNT_HOURS: f64 = 1.0;
const TV_HOURS: f64 = 1.0;
const EDUCATION_HOURS: f64 = 3.0;

const CLUB_HOURS: f64 = 3.0;
const GYM_HOURS: f64 = 1.5;
const PARK_HOURS: f64 = 2.0;
const CAMPUS_HOURS: f64 = 2.0;
const VISIT_HOURS: f64 = 2.0;

fn at(kind: ActivityKind, hours: f64, place: &Place) -> Activity {
    Activity::new(kind, hours, place.id, place.position)
}

/// Time needed to eat back up to a full stomach, at least a quarter hour
fn meal_hours(food: f64, eating_gain: f64) -> f64 {
    ((1.0 - food) / eating_gain).max(0.25)
}

/// Stay no longer than the place is open
fn until_closing(hours: f64, place: &Place, hour: f64) -> f64 {
    hours.min(place.open_hours.hours_until_end(hour))
}

/// Choose the next activity for `actor`
pub fn generate_target_state(
    actor: &Actor,
    others: &Others<'_>,
    places: &Places,
    ctx: &StepContext<'_>,
    rng: &mut impl Rng,
) -> Activity {
    eat_when_hungry(actor, places, ctx)
        .or_else(|| sleep_when_exhausted(actor, places, ctx))
        .or_else(|| work(actor, places, ctx))
        .or_else(|| study(actor, places, ctx))
        .or_else(|| sleep_at_night(actor, places, ctx))
        .or_else(|| snack(actor, places, ctx))
        .or_else(|| hunt_for_job(actor, others, places, ctx, rng))
        .or_else(|| socialize(actor, others, places, ctx, rng))
        .unwrap_or_else(|| at(ActivityKind::WatchingTv, TV_HOURS, &places[actor.home]))
}

fn eat_when_hungry(actor: &Actor, places: &Places, ctx: &StepContext<'_>) -> Option<Activity> {
    let config = ctx.config;
    let food = actor.needs.food.amount();
    if food >= config.hungry_threshold {
        return None;
    }

    let home = &places[actor.home];
    let hours = meal_hours(food, config.eating_gain);
    if actor.position == home.position {
        return Some(at(ActivityKind::Eating, hours, home));
    }
    if ctx.clock.is_day_time() {
        if let Some(shop) = places.nearest_open(PlaceKind::FoodShop, actor.position, ctx.clock.hour()) {
            return Some(at(ActivityKind::Eating, until_closing(hours, shop, ctx.clock.hour()), shop));
        }
    }
    if food < config.starving_threshold {
        return Some(at(ActivityKind::Eating, hours, home));
    }
    None
}

fn sleep_when_exhausted(actor: &Actor, places: &Places, ctx: &StepContext<'_>) -> Option<Activity> {
    let sleep = actor.needs.sleep.amount();
    if sleep >= ctx.config.exhausted_threshold {
        return None;
    }
    let hours = (8.0 * (1.0 - sleep)).max(1.0);
    Some(at(ActivityKind::Sleeping, hours, &places[actor.home]))
}

fn work(actor: &Actor, places: &Places, ctx: &StepContext<'_>) -> Option<Activity> {
    let config = ctx.config;
    let hour = ctx.clock.hour();
    let workplace = &places[actor.workplace?];
    let job = workplace.work.as_ref()?;
    if !ctx.clock.is_work_day() || !job.workable_hours().contains(hour) {
        return None;
    }

    if actor.needs.food.amount() < config.peckish_threshold && ctx.clock.is_lunch_time() {
        let lunch = places
            .nearest_open(PlaceKind::FoodShop, workplace.position, hour)
            .filter(|shop| shop.position.distance_to(&workplace.position) <= config.lunch_distance);
        if let Some(shop) = lunch {
            return Some(at(ActivityKind::Eating, until_closing(LUNCH_HOURS, shop, hour), shop));
        }
    }

    let shift = if job.core_hours().contains(hour) {
        job.core_hours().hours_until_end(hour)
    } else if actor.needs.work_free_time.amount() > config.overtime_threshold {
        job.workable_hours().hours_until_end(hour)
    } else {
        return None;
    };
    Some(at(ActivityKind::Working, shift.min(SHIFT_CHUNK_HOURS), workplace))
}

fn study(actor: &Actor, places: &Places, ctx: &StepContext<'_>) -> Option<Activity> {
    if actor.workplace.is_some() || !ctx.clock.is_work_day() || !actor.is_study_age(ctx.config) {
        return None;
    }
    let hour = ctx.clock.hour();
    let university = places.nearest_open(PlaceKind::University, actor.position, hour)?;
    Some(at(
        ActivityKind::Educating,
        until_closing(EDUCATION_HOURS, university, hour),
        university,
    ))
}

fn sleep_at_night(actor: &Actor, places: &Places, ctx: &StepContext<'_>) -> Option<Activity> {
    if !ctx.clock.is_sleep_time() {
        return None;
    }
    Some(at(ActivityKind::Sleeping, sleep_hours(actor.age), &places[actor.home]))
}

fn snack(actor: &Actor, places: &Places, ctx: &StepContext<'_>) -> Option<Activity> {
    let config = ctx.config;
    let food = actor.needs.food.amount();
    if food >= config.peckish_threshold {
        return None;
    }
    let hour = ctx.clock.hour();
    let hours = meal_hours(food, config.eating_gain);
    let activity = match places.nearest_open(PlaceKind::FoodShop, actor.position, hour) {
        Some(shop) => at(ActivityKind::Eating, until_closing(hours, shop, hour), shop),
        None => at(ActivityKind::Eating, hours, &places[actor.home]),
    };
    Some(activity)
}

fn hunt_for_job(
    actor: &Actor,
    others: &Others<'_>,
    places: &Places,
    ctx: &StepContext<'_>,
    rng: &mut impl Rng,
) -> Option<Activity> {
    let config = ctx.config;
    if actor.workplace.is_some()
        || !actor.is_working_age(config)
        || actor.wealth >= config.job_hunt_wealth_threshold
        || !ctx.clock.is_work_day()
    {
        return None;
    }

    let mut candidates: Vec<PlaceId> = Vec::new();
    for kind in [PlaceKind::Industry, PlaceKind::FoodShop] {
        candidates.extend(
            places
                .nearest_n(kind, actor.position, config.job_hunt_nearby)
                .iter()
                .map(|p| p.id),
        );
    }
    candidates.extend(
        actor
            .social
            .iter()
            .filter_map(|(id, _)| others.living(id))
            .filter_map(|friend| friend.workplace),
    );
    candidates.extend(places.random_workplaces(rng, config.job_hunt_random));
    candidates.retain(|id| places[*id].work.is_some());

    let choice = *candidates.choose(rng)?;
    Some(at(ActivityKind::JobHunting, JOB_HUNT_HOURS, &places[choice]))
}

fn socialize(
    actor: &Actor,
    others: &Others<'_>,
    places: &Places,
    ctx: &StepContext<'_>,
    rng: &mut impl Rng,
) -> Option<Activity> {
    let config = ctx.config;
    if actor.social.strength_sum() >= actor.preferences.min_connection_strength_sum {
        return None;
    }
    let hour = ctx.clock.hour();
    let affinity = &actor.preferences.venues;
    let weight = |liking: f64, place: &Place| liking / (1.0 + actor.position.distance_to(&place.position));

    let mut options: Vec<(Activity, f64)> = Vec::new();

    for (id, _) in actor.social.iter() {
        let Some(friend) = others.living(id) else { continue };
        if friend.home == actor.home || (friend.age - actor.age).abs() > config.friend_age_band {
            continue;
        }
        let friend_home = &places[friend.home];
        let is_home = friend.position == friend_home.position;
        let asleep = friend.is_at_target() && friend.target.kind == ActivityKind::Sleeping;
        if is_home && !asleep {
            options.push((
                at(ActivityKind::VisitingFriend, VISIT_HOURS, friend_home),
                weight(affinity.friends, friend_home),
            ));
        }
    }

    let mut venues = vec![
        (PlaceKind::Club, ActivityKind::AtTheClub, CLUB_HOURS, affinity.club),
        (PlaceKind::Gym, ActivityKind::AtTheGym, GYM_HOURS, affinity.gym),
        (PlaceKind::Park, ActivityKind::InThePark, PARK_HOURS, affinity.park),
    ];
    if actor.workplace.is_none() && actor.is_study_age(config) {
        venues.push((PlaceKind::University, ActivityKind::Educating, CAMPUS_HOURS, affinity.university));
    }
    for (place_kind, activity, hours, liking) in venues {
        if let Some(venue) = places.nearest_open(place_kind, actor.position, hour) {
            options.push((
                at(activity, until_closing(hours, venue, hour), venue),
                weight(liking, venue),
            ));
        }
    }

    let index = WeightedIndex::new(options.iter().map(|(_, w)| *w)).ok()?;
    let (activity, _) = options.swap_remove(index.sample(rng));
    Some(activity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calendar::Clock;
    use crate::core::config::SimulationConfig;
    use crate::core::types::{ActorId, Position};
    use crate::entity::actor::Gender;
    use crate::entity::needs::Needs;
    use crate::entity::preferences::{Preferences, VenueAffinity};
    use crate::world::place::{HourRange, Work};
    use crate::world::population::Population;
    use crate::world::relations;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const HOME: PlaceId = PlaceId(0);
    const FACTORY: PlaceId = PlaceId(1);
    const SHOP: PlaceId = PlaceId(2);
    const UNIVERSITY: PlaceId = PlaceId(3);
    const CLUB: PlaceId = PlaceId(4);
    const FRIEND_HOME: PlaceId = PlaceId(5);

    fn town() -> Places {
        let mut places = Places::new();
        places.add(Place::home(HOME, Position::new(0.0, 0.0)));
        let factory_core = HourRange::new(9, 15).unwrap();
        let factory_open = HourRange::new(6, 20).unwrap();
        places.add(Place::new(
            FACTORY,
            PlaceKind::Industry,
            Position::new(100.0, 0.0),
            factory_open,
            Some(Work::new(10, 0.0, 20.0, factory_core, factory_open).unwrap()),
        ));
        let shop_hours = HourRange::new(8, 21).unwrap();
        places.add(Place::new(
            SHOP,
            PlaceKind::FoodShop,
            Position::new(120.0, 0.0),
            shop_hours,
            Some(Work::new(3, 0.0, 12.0, shop_hours, shop_hours).unwrap()),
        ));
        let campus = HourRange::new(7, 18).unwrap();
        places.add(Place::new(
            UNIVERSITY,
            PlaceKind::University,
            Position::new(0.0, 100.0),
            campus,
            Some(Work::new(10, 12.0, 30.0, campus, campus).unwrap()),
        ));
        let club = HourRange::new(18, 24).unwrap();
        places.add(Place::new(
            CLUB,
            PlaceKind::Club,
            Position::new(50.0, 50.0),
            club,
            Some(Work::new(3, 0.0, 12.0, club, club).unwrap()),
        ));
        places.add(Place::home(FRIEND_HOME, Position::new(0.0, 30.0)));
        places
    }

    fn prefs() -> Preferences {
        Preferences {
            venues: VenueAffinity { club: 0.5, gym: 0.5, park: 0.5, university: 0.5, friends: 0.5 },
            min_connection_strength_sum: 0.0,
            partner_gender: Gender::Female,
        }
    }

    /// Actor 0 lives at HOME, actor 1 (a friend) lives at FRIEND_HOME
    fn setup(places: &mut Places, age: f64) -> Population {
        let mut population = Population::new();
        for (home, actor_age) in [(HOME, age), (FRIEND_HOME, age + 2.0)] {
            let id = population.allocate_id();
            let mut actor = Actor::new(
                id, "A".into(), "B".into(), actor_age, Gender::Male, home,
                places[home].position, prefs(),
            );
            actor.wealth = 20_000.0;
            relations::move_in(&mut actor, places, home).unwrap();
            population.insert(actor);
        }
        population
    }

    fn decide(population: &mut Population, places: &Places, clock: &Clock, config: &SimulationConfig) -> Activity {
        let ctx = StepContext { clock, config, width: 500.0, height: 500.0, elapsed_hours: 0.25 };
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let (actor, others) = population.split_one_mut(0);
        generate_target_state(actor, &others, places, &ctx, &mut rng)
    }

    #[test]
    fn test_hungry_at_home_eats_at_home() {
        let config = SimulationConfig::default();
        let mut places = town();
        let mut population = setup(&mut places, 30.0);
        population.get_mut(ActorId(0)).unwrap().needs = Needs::new(0.2, 1.0, 1.0);

        let activity = decide(&mut population, &places, &Clock::new(13.0, 0), &config);
        assert_eq!(activity.kind, ActivityKind::Eating);
        assert_eq!(activity.place, HOME);
    }

    #[test]
    fn test_hungry_away_goes_to_open_shop_by_day() {
        let config = SimulationConfig::default();
        let mut places = town();
        let mut population = setup(&mut places, 30.0);
        let actor = population.get_mut(ActorId(0)).unwrap();
        actor.needs = Needs::new(0.2, 1.0, 1.0);
        actor.position = Position::new(100.0, 0.0);

        let activity = decide(&mut population, &places, &Clock::new(13.0, 0), &config);
        assert_eq!(activity.kind, ActivityKind::Eating);
        assert_eq!(activity.place, SHOP);

        let activity = decide(&mut population, &places, &Clock::new(23.0, 0), &config);
        assert_ne!(activity.kind, ActivityKind::Eating);

        population.get_mut(ActorId(0)).unwrap().needs = Needs::new(0.05, 1.0, 1.0);
        let activity = decide(&mut population, &places, &Clock::new(23.0, 0), &config);
        assert_eq!(activity.kind, ActivityKind::Eating);
        assert_eq!(activity.place, HOME);
    }

    #[test]
    fn test_exhaustion_beats_work() {
        let config = SimulationConfig::default();
        let mut places = town();
        let mut population = setup(&mut places, 30.0);
        let actor = population.get_mut(ActorId(0)).unwrap();
        relations::hire(actor, &mut places, FACTORY);
        actor.needs = Needs::new(1.0, 0.1, 1.0);

        let activity = decide(&mut population, &places, &Clock::new(10.0, 1), &config);
        assert_eq!(activity.kind, ActivityKind::Sleeping);
        assert!((activity.hours_left - 7.2).abs() < 1e-9);
    }

    #[test]
    fn test_core_hours_and_overtime() {
        let config = SimulationConfig::default();
        let mut places = town();
        let mut population = setup(&mut places, 30.0);
        relations::hire(population.get_mut(ActorId(0)).unwrap(), &mut places, FACTORY);

        let activity = decide(&mut population, &places, &Clock::new(14.0, 2), &config);
        assert_eq!(activity.kind, ActivityKind::Working);
        assert_eq!(activity.hours_left, 1.0);

        // Outside core hours with plenty of free time left: overtime
        let activity = decide(&mut population, &places, &Clock::new(16.0, 2), &config);
        assert_eq!(activity.kind, ActivityKind::Working);
        assert_eq!(activity.hours_left, 2.0);

        // Tired of working: no overtime
        population.get_mut(ActorId(0)).unwrap().needs = Needs::new(1.0, 1.0, 0.3);
        let activity = decide(&mut population, &places, &Clock::new(16.0, 2), &config);
        assert_ne!(activity.kind, ActivityKind::Working);

        // Weekend
        let activity = decide(&mut population, &places, &Clock::new(10.0, 6), &config);
        assert_ne!(activity.kind, ActivityKind::Working);
    }

    #[test]
    fn test_lunch_break_near_work() {
        let config = SimulationConfig::default();
        let mut places = town();
        let mut population = setup(&mut places, 30.0);
        let actor = population.get_mut(ActorId(0)).unwrap();
        relations::hire(actor, &mut places, FACTORY);
        actor.needs = Needs::new(0.45, 1.0, 1.0);

        let activity = decide(&mut population, &places, &Clock::new(12.5, 3), &config);
        assert_eq!(activity.kind, ActivityKind::Eating);
        assert_eq!(activity.place, SHOP);
        assert_eq!(activity.hours_left, 0.5);
    }

    #[test]
    fn test_young_unemployed_study() {
        let config = SimulationConfig::default();
        let mut places = town();
        let mut population = setup(&mut places, 16.0);

        let activity = decide(&mut population, &places, &Clock::new(9.0, 0), &config);
        assert_eq!(activity.kind, ActivityKind::Educating);
        assert_eq!(activity.place, UNIVERSITY);
    }

    #[test]
    fn test_night_sleep_follows_age_table() {
        let config = SimulationConfig::default();
        let mut places = town();
        let mut population = setup(&mut places, 70.0);

        let activity = decide(&mut population, &places, &Clock::new(23.0, 4), &config);
        assert_eq!(activity.kind, ActivityKind::Sleeping);
        assert_eq!(activity.hours_left, 7.0);
    }

    #[test]
    fn test_poor_unemployed_hunt_for_jobs() {
        let config = SimulationConfig::default();
        let mut places = town();
        let mut population = setup(&mut places, 40.0);
        population.get_mut(ActorId(0)).unwrap().wealth = 100.0;

        let activity = decide(&mut population, &places, &Clock::new(10.0, 1), &config);
        assert_eq!(activity.kind, ActivityKind::JobHunting);
        assert!(places[activity.place].work.is_some());
    }

    #[test]
    fn test_lonely_actor_socializes() {
        let config = SimulationConfig::default();
        let mut places = town();
        let mut population = setup(&mut places, 40.0);
        let actor = population.get_mut(ActorId(0)).unwrap();
        actor.preferences.min_connection_strength_sum = 50.0;
        actor.social.reinforce(ActorId(1), 5.0, 30);

        let activity = decide(&mut population, &places, &Clock::new(19.0, 5), &config);
        assert!(matches!(
            activity.kind,
            ActivityKind::VisitingFriend | ActivityKind::AtTheClub
        ));
    }

    #[test]
    fn test_content_actor_watches_tv() {
        let config = SimulationConfig::default();
        let mut places = town();
        let mut population = setup(&mut places, 40.0);

        let activity = decide(&mut population, &places, &Clock::new(19.0, 5), &config);
        assert_eq!(activity.kind, ActivityKind::WatchingTv);
        assert_eq!(activity.place, HOME);
        assert_eq!(activity.hours_left, 1.0);
    }
}
