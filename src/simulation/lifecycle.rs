//! Life cycle: ageing, retirement, mortality and births
//!
//! Ageing runs for every living actor before its decision step. Deaths are
//! applied to the actor immediately (job and home released) but the actor
//! stays in the population until the end of the step. Births are requested
//! during the step and synthesised afterwards.

use rand::Rng;

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::types::ActorId;
use crate::entity::actor::{Actor, Gender};
use crate::entity::names;
use crate::entity::preferences::Preferences;
use crate::simulation::rates;
use crate::simulation::tick::SimulationEvent;
use crate::world::registry::{Places, World};
use crate::world::relations;

/// Hours of sleep an actor of `age` takes at night
pub fn sleep_hours(age: f64) -> f64 {
    match age {
        a if a < 6.0 => 11.0,
        a if a < 13.0 => 10.0,
        a if a < 18.0 => 9.0,
        a if a < 65.0 => 8.0,
        _ => 7.0,
    }
}

/// Probability of dying within one simulated year at `age`
pub fn mortality_per_year(age: f64) -> f64 {
    match age {
        a if a < 60.0 => 0.002,
        a if a < 70.0 => 0.01,
        a if a < 80.0 => 0.05,
        a if a < 90.0 => 0.25,
        _ => 0.6,
    }
}

/// Outcome of [`advance_life`] for one actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeOutcome {
    Alive,
    Died { former_partner: Option<ActorId> },
}

/// A couple that conceived during the step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthRequest {
    pub mother: ActorId,
    pub father: ActorId,
}

/// Age `actor` by `elapsed_hours` and roll for its death
pub fn advance_life(
    actor: &mut Actor,
    places: &mut Places,
    config: &SimulationConfig,
    rng: &mut impl Rng,
    elapsed_hours: f64,
    events: &mut Vec<SimulationEvent>,
) -> LifeOutcome {
    let years = config.years(elapsed_hours);
    actor.age += years;

    if let Some(workplace) = actor.workplace {
        if actor.age >= config.retirement_age {
            relations::vacate_job(actor, places);
            tracing::debug!(actor = %actor.id, %workplace, "retired");
            events.push(SimulationEvent::Retired { actor: actor.id, workplace });
        }
    }

    if actor.is_adult(config) && actor.social.partner.is_none() {
        let preference = &mut actor.preferences.min_connection_strength_sum;
        *preference = (*preference + config.partner_desire_growth * years)
            .min(config.max_connection_preference);
    }

    // Yearly probability expressed as an hourly rate of the same cumulative chance
    let yearly = (mortality_per_year(actor.age) * config.mortality_scale).min(1.0);
    let rate_per_hour = -(1.0 - yearly).ln() / config.hours_per_year;
    if rates::roll(rng, rate_per_hour, elapsed_hours) {
        let age = actor.age;
        let former_partner = relations::bury(actor, places);
        tracing::debug!(actor = %actor.id, name = %actor.full_name(), age, "died");
        events.push(SimulationEvent::Died { actor: actor.id, age });
        return LifeOutcome::Died { former_partner };
    }

    LifeOutcome::Alive
}

/// Create the newborn of `request` in its mother's home
///
/// Returns `None` if the mother is no longer part of the population.
pub fn synthesize_child(
    world: &mut World,
    request: BirthRequest,
    rng: &mut impl Rng,
) -> Result<Option<ActorId>> {
    let (home, family_name) = match world.population.get(request.mother) {
        Some(mother) => (mother.home, mother.family_name.clone()),
        None => return Ok(None),
    };

    let gender = if rng.gen_bool(0.5) { Gender::Female } else { Gender::Male };
    let id = world.population.allocate_id();
    let mut child = Actor::new(
        id,
        names::first_name(gender, rng),
        family_name,
        0.0,
        gender,
        home,
        world.places.try_get(home)?.position,
        Preferences::random(gender, rng),
    );
    child.social.parents = vec![request.mother, request.father];
    relations::move_in(&mut child, &mut world.places, home)?;

    for parent in [request.mother, request.father] {
        if let Some(parent) = world.population.get_mut(parent) {
            parent.social.children.push(id);
        }
    }
    world.population.insert(child);
    Ok(Some(id))
}
