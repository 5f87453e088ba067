//! Per-actor decision state machine
//!
//! Each step an actor either commutes toward its target place, progresses the
//! activity it is engaged in, or (once that activity is exhausted) asks the
//! policy for a new one. Needs drift once per step regardless.

use rand::Rng;

use crate::core::calendar::Clock;
use crate::core::config::SimulationConfig;
use crate::entity::activity::ActivityKind;
use crate::entity::actor::{Actor, Gender};
use crate::simulation::lifecycle::BirthRequest;
use crate::simulation::policy;
use crate::simulation::rates;
use crate::simulation::tick::{PendingChanges, SimulationEvent};
use crate::world::place::PlaceKind;
use crate::world::population::Others;
use crate::world::registry::Places;
use crate::world::relations;

/// Read-only inputs shared by every actor during one step
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub clock: &'a Clock,
    pub config: &'a SimulationConfig,
    pub width: f64,
    pub height: f64,
    pub elapsed_hours: f64,
}

/// Travel speed in world units per hour; wealth buys faster transport
pub fn travel_speed(wealth: f64, config: &SimulationConfig) -> f64 {
    let wealth = wealth.max(0.0);
    config.base_travel_speed
        + config.wealth_travel_bonus * wealth / (wealth + config.wealth_travel_half_point)
}

/// Step `actor` one bounded leg toward its target place
pub fn move_toward_target(actor: &mut Actor, ctx: &StepContext<'_>) {
    let reach = travel_speed(actor.wealth, ctx.config) * ctx.elapsed_hours;
    let destination = actor.target.destination;
    if actor.position.distance_to(&destination) <= reach {
        actor.position = destination;
    } else {
        let next = actor.position + actor.position.direction_to(&destination, reach);
        actor.position = next.clamped(ctx.width, ctx.height);
    }
}

/// Advance one living actor by one step
pub fn tick_actor(
    actor: &mut Actor,
    others: &Others<'_>,
    places: &mut Places,
    ctx: &StepContext<'_>,
    rng: &mut impl Rng,
    pending: &mut PendingChanges,
) {
    let config = ctx.config;
    actor.needs.decay(
        config.food_decay,
        config.sleep_decay,
        config.free_time_recovery,
        ctx.elapsed_hours,
    );

    if !actor.is_at_target() {
        move_toward_target(actor, ctx);
    } else if !actor.target.is_exhausted() {
        let spent = actor.target.consume(ctx.elapsed_hours);
        apply_activity(actor, others, places, ctx, rng, spent, pending);
    } else {
        actor.target = policy::generate_target_state(actor, others, places, ctx, rng);
    }
}

fn pay(actor: &mut Actor, price_per_hour: f64, hours: f64) {
    actor.wealth = (actor.wealth - price_per_hour * hours).max(0.0);
}

/// Per-hour side effects of the activity the actor is engaged in
fn apply_activity(
    actor: &mut Actor,
    others: &Others<'_>,
    places: &mut Places,
    ctx: &StepContext<'_>,
    rng: &mut impl Rng,
    spent: f64,
    pending: &mut PendingChanges,
) {
    let config = ctx.config;
    let place = actor.target.place;

    match actor.target.kind {
        ActivityKind::Working => {
            if actor.workplace != Some(place) {
                // Lost the job while on the way or during the shift
                actor.target.finish();
                return;
            }
            let (wage, crowded) = match &places[place].work {
                Some(work) => (work.wage_per_hour, work.is_over_half_full()),
                None => (0.0, false),
            };
            actor.wealth += wage * spent;
            actor.needs.work_free_time.add(-config.working_drain, spent);

            if crowded && rates::roll(rng, config.firing_rate, spent) {
                relations::vacate_job(actor, places);
                actor.target.finish();
                tracing::debug!(actor = %actor.id, workplace = %place, "fired");
                pending.events.push(SimulationEvent::Fired { actor: actor.id, workplace: place });
            }
        }
        ActivityKind::JobHunting => {
            if relations::can_hire(actor, places, place, ctx.clock.hour()) {
                relations::hire(actor, places, place);
                actor.target.finish();
                tracing::debug!(actor = %actor.id, workplace = %place, "hired");
                pending.events.push(SimulationEvent::Hired { actor: actor.id, workplace: place });
            }
        }
        ActivityKind::Sleeping => {
            actor.needs.sleep.add(config.sleeping_gain, spent);
        }
        ActivityKind::Eating => {
            actor.needs.food.add(config.eating_gain, spent);
            let price = match places[place].kind {
                PlaceKind::Home => config.home_meal_price,
                _ => config.shop_meal_price,
            };
            pay(actor, price, spent);
        }
        ActivityKind::Educating => {
            actor.education_years += config.education_per_hour * spent;
        }
        ActivityKind::AtTheClub => pay(actor, config.club_price, spent),
        ActivityKind::AtTheGym => pay(actor, config.gym_price, spent),
        ActivityKind::InThePark | ActivityKind::VisitingFriend => {}
        ActivityKind::WatchingTv => {
            if let Some(request) = conception(actor, others, places, ctx) {
                let rate = config.birth_rate_per_year / config.hours_per_year;
                if rates::roll(rng, rate, spent) {
                    pending.births.push(request);
                }
            }
        }
    }
}

/// The couple that could conceive right now, evaluated from the mother's side
fn conception(
    actor: &Actor,
    others: &Others<'_>,
    places: &Places,
    ctx: &StepContext<'_>,
) -> Option<BirthRequest> {
    if actor.gender != Gender::Female || !actor.is_fertile(ctx.config) {
        return None;
    }
    if places[actor.target.place].kind != PlaceKind::Home {
        return None;
    }
    let partner = others.living(actor.social.partner?)?;
    let together = partner.position == actor.position;
    if partner.gender == Gender::Male && partner.is_fertile(ctx.config) && together {
        Some(BirthRequest {
            mother: actor.id,
            father: partner.id,
        })
    } else {
        None
    }
}
