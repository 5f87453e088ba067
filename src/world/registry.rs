//! World registry: bounded 2D world, places by category, and the population

use std::collections::BTreeMap;
use std::ops::{Index, IndexMut};

use ordered_float::OrderedFloat;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::core::error::{Result, SimError};
use crate::core::types::{PlaceId, Position};
use crate::world::place::{Place, PlaceKind};
use crate::world::population::Population;

/// All places of the world, indexed by [`PlaceId`]
///
/// The set of places never changes after construction; only headcounts and
/// resident lists are mutated.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Places {
    places: Vec<Place>,
    #[serde(skip)]
    by_kind: BTreeMap<PlaceKind, Vec<PlaceId>>,
}

impl Places {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a place; its id is assigned from its insertion order
    pub fn add(&mut self, mut place: Place) -> PlaceId {
        let id = PlaceId(self.places.len() as u32);
        place.id = id;
        self.by_kind.entry(place.kind).or_default().push(id);
        self.places.push(place);
        id
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn get(&self, id: PlaceId) -> Option<&Place> {
        self.places.get(id.index())
    }

    pub fn get_mut(&mut self, id: PlaceId) -> Option<&mut Place> {
        self.places.get_mut(id.index())
    }

    pub fn try_get(&self, id: PlaceId) -> Result<&Place> {
        self.get(id).ok_or(SimError::PlaceNotFound(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Place> {
        self.places.iter()
    }

    pub fn of_kind(&self, kind: PlaceKind) -> impl Iterator<Item = &Place> {
        self.by_kind
            .get(&kind)
            .into_iter()
            .flatten()
            .map(move |id| &self.places[id.index()])
    }

    pub fn count_of_kind(&self, kind: PlaceKind) -> usize {
        self.by_kind.get(&kind).map_or(0, Vec::len)
    }

    /// Places that employ people
    pub fn workplaces(&self) -> impl Iterator<Item = &Place> {
        self.places.iter().filter(|p| p.work.is_some())
    }

    pub fn nearest(&self, kind: PlaceKind, from: Position) -> Option<&Place> {
        self.of_kind(kind)
            .min_by_key(|p| OrderedFloat(p.position.distance_to(&from)))
    }

    pub fn nearest_open(&self, kind: PlaceKind, from: Position, hour: f64) -> Option<&Place> {
        self.of_kind(kind)
            .filter(|p| p.is_open(hour))
            .min_by_key(|p| OrderedFloat(p.position.distance_to(&from)))
    }

    /// Up to `n` places of `kind`, closest first
    pub fn nearest_n(&self, kind: PlaceKind, from: Position, n: usize) -> Vec<&Place> {
        let mut places: Vec<&Place> = self.of_kind(kind).collect();
        places.sort_by_key(|p| (OrderedFloat(p.position.distance_to(&from)), p.id));
        places.truncate(n);
        places
    }

    /// Up to `n` distinct random workplaces
    pub fn random_workplaces(&self, rng: &mut impl Rng, n: usize) -> Vec<PlaceId> {
        let ids: Vec<PlaceId> = self.workplaces().map(|p| p.id).collect();
        ids.choose_multiple(rng, n).copied().collect()
    }

    fn rebuild_kind_index(&mut self) {
        self.by_kind.clear();
        for place in &self.places {
            self.by_kind.entry(place.kind).or_default().push(place.id);
        }
    }
}

impl Index<PlaceId> for Places {
    type Output = Place;

    fn index(&self, id: PlaceId) -> &Place {
        &self.places[id.index()]
    }
}

impl IndexMut<PlaceId> for Places {
    fn index_mut(&mut self, id: PlaceId) -> &mut Place {
        &mut self.places[id.index()]
    }
}

impl FromIterator<Place> for Places {
    fn from_iter<I: IntoIterator<Item = Place>>(iter: I) -> Self {
        let mut places = Self {
            places: iter.into_iter().collect(),
            by_kind: BTreeMap::new(),
        };
        for (idx, place) in places.places.iter_mut().enumerate() {
            place.id = PlaceId(idx as u32);
        }
        places.rebuild_kind_index();
        places
    }
}

/// The world exclusively owns its places and actors
#[derive(Debug, Clone, Serialize)]
pub struct World {
    pub width: f64,
    pub height: f64,
    pub places: Places,
    pub population: Population,
}

impl World {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            places: Places::new(),
            population: Population::new(),
        }
    }

    /// Verify every bidirectional link: home residents, headcounts, partners
    pub fn check_consistency(&self) -> Result<()> {
        for actor in self.population.iter() {
            let home = self.places.try_get(actor.home)?;
            if !home.residents().contains(&actor.id) {
                return Err(SimError::InvalidConfig(format!(
                    "{} lives at {} but is not among its residents",
                    actor.id, actor.home
                )));
            }
            if let Some(partner_id) = actor.social.partner {
                if let Some(partner) = self.population.get(partner_id) {
                    if partner.social.partner != Some(actor.id) {
                        return Err(SimError::InvalidConfig(format!(
                            "{} names {} as partner but not vice versa",
                            actor.id, partner_id
                        )));
                    }
                    if actor.social.contains(partner_id) {
                        return Err(SimError::InvalidConfig(format!(
                            "{} keeps partner {} as an ordinary connection",
                            actor.id, partner_id
                        )));
                    }
                }
            }
        }

        for place in self.places.iter() {
            for resident in place.residents() {
                let actor = self
                    .population
                    .get(*resident)
                    .ok_or(SimError::ActorNotFound(*resident))?;
                if actor.home != place.id {
                    return Err(SimError::InvalidConfig(format!(
                        "{} lists {} as resident but they live at {}",
                        place.id, resident, actor.home
                    )));
                }
            }
            if let Some(work) = &place.work {
                let employed = self
                    .population
                    .iter()
                    .filter(|a| a.workplace == Some(place.id))
                    .count() as u32;
                if employed != work.headcount {
                    return Err(SimError::InvalidConfig(format!(
                        "{} counts {} employees but {} actors work there",
                        place.id, work.headcount, employed
                    )));
                }
            }
        }

        Ok(())
    }
}
