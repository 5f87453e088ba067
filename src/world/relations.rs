//! Paired mutations for bidirectional links
//!
//! Actors refer to their home, workplace and partner by id, and the other
//! side keeps its own record (resident lists, headcounts, the partner's
//! partner field). Every structural change goes through one of these
//! functions so both ends are updated together.

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::types::{ActorId, PlaceId};
use crate::entity::actor::Actor;
use crate::world::registry::Places;

/// Move `actor` into `home`, leaving its previous household
pub fn move_in(actor: &mut Actor, places: &mut Places, home: PlaceId) -> Result<()> {
    places.try_get(home)?;
    places[home].add_resident(actor.id)?;
    if actor.home != home {
        if let Some(old) = places.get_mut(actor.home) {
            old.remove_resident(actor.id);
        }
        actor.home = home;
    }
    Ok(())
}

/// Whether `actor` could be hired at `workplace` right now
pub fn can_hire(actor: &Actor, places: &Places, workplace: PlaceId, hour: f64) -> bool {
    let place = &places[workplace];
    match &place.work {
        Some(work) => {
            place.is_open(hour)
                && work.has_vacancy()
                && actor.education_years >= work.min_education_years
        }
        None => false,
    }
}

/// Employ `actor` at `workplace`, quitting any previous job first
pub fn hire(actor: &mut Actor, places: &mut Places, workplace: PlaceId) {
    if actor.workplace == Some(workplace) {
        return;
    }
    vacate_job(actor, places);
    if let Some(work) = places[workplace].work.as_mut() {
        work.headcount += 1;
        actor.workplace = Some(workplace);
    }
}

/// Leave the current job, if any
pub fn vacate_job(actor: &mut Actor, places: &mut Places) {
    if let Some(workplace) = actor.workplace.take() {
        if let Some(work) = places[workplace].work.as_mut() {
            work.headcount = work.headcount.saturating_sub(1);
        }
    }
}

/// Turn two actors into partners and merge their households
///
/// Their ordinary connection entries are dropped, both halve their appetite
/// for new acquaintances, the poorer one moves into the richer one's home and
/// the younger one takes the elder's family name.
pub fn pair_partners(a: &mut Actor, b: &mut Actor, places: &mut Places) -> Result<()> {
    a.social.remove(b.id);
    b.social.remove(a.id);
    a.social.partner = Some(b.id);
    b.social.partner = Some(a.id);
    a.preferences.min_connection_strength_sum /= 2.0;
    b.preferences.min_connection_strength_sum /= 2.0;

    if a.wealth < b.wealth {
        move_in(a, places, b.home)?;
    } else {
        move_in(b, places, a.home)?;
    }

    if a.age < b.age {
        a.family_name = b.family_name.clone();
    } else if b.age < a.age {
        b.family_name = a.family_name.clone();
    }

    tracing::debug!(a = %a.id, b = %b.id, home = %a.home, "partnership formed");
    Ok(())
}

/// Mark `actor` dead and release everything it held
///
/// Returns the former partner, whose own link must be cleared with
/// [`widow`]. Other actors' connection entries pointing at the deceased are
/// left to decay.
pub fn bury(actor: &mut Actor, places: &mut Places) -> Option<ActorId> {
    vacate_job(actor, places);
    if let Some(home) = places.get_mut(actor.home) {
        home.remove_resident(actor.id);
    }
    actor.social.clear();
    actor.alive = false;
    actor.social.partner.take()
}

/// Clear `survivor`'s partner link to `deceased` and boost their wish to find someone new
pub fn widow(survivor: &mut Actor, deceased: ActorId, config: &SimulationConfig) {
    if survivor.social.partner != Some(deceased) {
        return;
    }
    survivor.social.partner = None;
    let boosted = survivor.preferences.min_connection_strength_sum * config.widowed_desire_boost;
    survivor.preferences.min_connection_strength_sum = boosted.min(config.max_connection_preference);
}
