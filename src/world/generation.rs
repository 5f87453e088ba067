//! Seeded procedural world generation
//!
//! The world is split into a 10x10 grid of areas. Each category of place is
//! scattered around the areas listed for it, `density` places per area, so a
//! given seed always yields the same town.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::types::{PlaceId, Position};
use crate::entity::actor::{Actor, Gender};
use crate::entity::names;
use crate::entity::needs::Needs;
use crate::entity::preferences::Preferences;
use crate::world::place::{HourRange, Place, PlaceKind, Work};
use crate::world::registry::World;
use crate::world::relations;

const AREAS_PER_SIDE: f64 = 10.0;

/// A cell of the 10x10 area grid and how many places it receives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub x: u8,
    pub y: u8,
    pub density: u32,
}

impl Area {
    pub const fn new(x: u8, y: u8, density: u32) -> Self {
        Self { x, y, density }
    }

    fn random_position(&self, rng: &mut impl Rng, width: f64, height: f64) -> Position {
        let cell_w = width / AREAS_PER_SIDE;
        let cell_h = height / AREAS_PER_SIDE;
        let spread_x = cell_w * rng.gen_range(0.2..1.2);
        let spread_y = cell_h * rng.gen_range(0.2..1.2);
        let x = cell_w * (f64::from(self.x) + 0.5) + rng.gen_range(-spread_x..spread_x);
        let y = cell_h * (f64::from(self.y) + 0.5) + rng.gen_range(-spread_y..spread_y);
        Position::new(
            x.clamp(width * 0.01, width * 0.99).round(),
            y.clamp(height * 0.01, height * 0.99).round(),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub seed: u64,
    pub width: f64,
    pub height: f64,
    pub home_areas: Vec<Area>,
    pub industry_areas: Vec<Area>,
    pub shop_areas: Vec<Area>,
    pub education_areas: Vec<Area>,
    pub leisure_areas: Vec<Area>,
    pub park_areas: Vec<Area>,
    /// Chance that a generated home also houses a child of the founder
    pub child_chance: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: 123_456,
            width: 1000.0,
            height: 1000.0,
            home_areas: vec![
                Area::new(0, 5, 10), Area::new(0, 6, 10), Area::new(1, 0, 10),
                Area::new(1, 1, 10), Area::new(2, 3, 15), Area::new(2, 4, 20),
                Area::new(2, 5, 20), Area::new(2, 6, 20), Area::new(2, 7, 15),
                Area::new(3, 3, 20), Area::new(3, 5, 30), Area::new(3, 6, 20),
                Area::new(4, 4, 10), Area::new(4, 5, 10), Area::new(4, 6, 10),
                Area::new(5, 5, 10), Area::new(5, 6, 10), Area::new(6, 5, 5),
                Area::new(7, 8, 5), Area::new(9, 9, 2),
            ],
            industry_areas: vec![
                Area::new(1, 9, 2), Area::new(2, 8, 2), Area::new(3, 8, 2),
                Area::new(4, 8, 3), Area::new(5, 7, 4), Area::new(5, 8, 4),
                Area::new(6, 8, 3), Area::new(7, 9, 2),
            ],
            shop_areas: vec![
                Area::new(1, 2, 3), Area::new(2, 3, 4), Area::new(2, 5, 4),
                Area::new(3, 4, 6), Area::new(3, 5, 6), Area::new(4, 3, 2),
                Area::new(5, 7, 2),
            ],
            education_areas: vec![Area::new(3, 4, 1), Area::new(4, 3, 2), Area::new(5, 3, 1)],
            leisure_areas: vec![Area::new(3, 5, 2), Area::new(4, 4, 2), Area::new(2, 6, 1)],
            park_areas: vec![Area::new(2, 2, 1), Area::new(4, 6, 1), Area::new(6, 4, 1)],
            child_chance: 0.25,
        }
    }
}

impl GenerationConfig {
    /// A village-sized layout for tests and benchmarks
    pub fn small(seed: u64) -> Self {
        Self {
            seed,
            width: 200.0,
            height: 200.0,
            home_areas: vec![Area::new(2, 2, 8), Area::new(3, 6, 8), Area::new(6, 3, 8)],
            industry_areas: vec![Area::new(7, 7, 2)],
            shop_areas: vec![Area::new(4, 4, 2), Area::new(5, 5, 1)],
            education_areas: vec![Area::new(5, 2, 1)],
            leisure_areas: vec![Area::new(4, 5, 1)],
            park_areas: vec![Area::new(2, 7, 1)],
            child_chance: 0.25,
        }
    }
}

fn hours(start: u8, end: u8) -> Result<HourRange> {
    HourRange::new(start, end)
}

fn workplace(
    rng: &mut impl Rng,
    kind: PlaceKind,
    position: Position,
) -> Result<Place> {
    let (open, core, capacity, education, wage) = match kind {
        PlaceKind::Industry => (
            hours(6, 20)?,
            hours(9, 15)?,
            rng.gen_range(5..60),
            rng.gen_range(0.0..12.0),
            rng.gen_range(15.0..40.0),
        ),
        PlaceKind::FoodShop => (
            hours(8, 21)?,
            hours(10, 18)?,
            rng.gen_range(1..20),
            rng.gen_range(0.0..9.0),
            rng.gen_range(10.0..20.0),
        ),
        PlaceKind::University => (
            hours(7, 18)?,
            hours(8, 14)?,
            rng.gen_range(10..60),
            rng.gen_range(12.0..16.0),
            rng.gen_range(25.0..45.0),
        ),
        PlaceKind::Club => (
            hours(18, 24)?,
            hours(20, 24)?,
            rng.gen_range(2..15),
            0.0,
            rng.gen_range(10.0..18.0),
        ),
        PlaceKind::Gym => (
            hours(6, 22)?,
            hours(9, 17)?,
            rng.gen_range(1..10),
            rng.gen_range(0.0..6.0),
            rng.gen_range(12.0..22.0),
        ),
        PlaceKind::Home | PlaceKind::Park => {
            return Ok(Place::new(PlaceId(0), kind, position, HourRange::ALL_DAY, None));
        }
    };
    let work = Work::new(capacity, education, wage, core, open)?;
    Ok(Place::new(PlaceId(0), kind, position, open, Some(work)))
}

fn random_adult(
    rng: &mut impl Rng,
    world: &mut World,
    home: PlaceId,
    family_name: String,
) -> Actor {
    let gender = *Gender::ALL
        .choose_weighted(rng, |g| match g {
            Gender::Other => 0.04,
            _ => 0.48,
        })
        .unwrap_or(&Gender::Female);
    let mut actor = Actor::new(
        world.population.allocate_id(),
        names::first_name(gender, rng),
        family_name,
        rng.gen_range(18.0..80.0),
        gender,
        home,
        world.places[home].position,
        Preferences::random(gender, rng),
    );
    actor.wealth = rng.gen_range(0.0..3_000.0);
    actor.education_years = rng.gen_range(9.0..18.0);
    actor.needs = Needs::new(
        rng.gen_range(0.5..1.0),
        rng.gen_range(0.5..1.0),
        rng.gen_range(0.5..1.0),
    );
    actor
}

/// Build the initial world and population from `gen`
pub fn generate(gen: &GenerationConfig, config: &SimulationConfig) -> Result<World> {
    let mut rng = ChaCha8Rng::seed_from_u64(gen.seed);
    let mut world = World::new(gen.width, gen.height);

    let layouts: [(&[Area], &[PlaceKind]); 5] = [
        (&gen.industry_areas, &[PlaceKind::Industry]),
        (&gen.shop_areas, &[PlaceKind::FoodShop]),
        (&gen.education_areas, &[PlaceKind::University]),
        (&gen.leisure_areas, &[PlaceKind::Club, PlaceKind::Gym]),
        (&gen.park_areas, &[PlaceKind::Park]),
    ];
    for (areas, kinds) in layouts {
        for area in areas {
            for _ in 0..area.density {
                for &kind in kinds {
                    let position = area.random_position(&mut rng, gen.width, gen.height);
                    world.places.add(workplace(&mut rng, kind, position)?);
                }
            }
        }
    }

    for area in &gen.home_areas {
        for _ in 0..area.density {
            let position = area.random_position(&mut rng, gen.width, gen.height);
            let home = world.places.add(Place::home(PlaceId(0), position));

            let family = names::family_name(&mut rng);
            let mut founder = random_adult(&mut rng, &mut world, home, family);
            relations::move_in(&mut founder, &mut world.places, home)?;

            if founder.age >= 30.0 && founder.age < 50.0 && rng.gen_bool(gen.child_chance) {
                let gender = if rng.gen_bool(0.5) { Gender::Female } else { Gender::Male };
                let mut child = Actor::new(
                    world.population.allocate_id(),
                    names::first_name(gender, &mut rng),
                    founder.family_name.clone(),
                    rng.gen_range(0.0..(founder.age - config.adult_age).min(config.adult_age)),
                    gender,
                    home,
                    position,
                    Preferences::random(gender, &mut rng),
                );
                child.education_years = (child.age - config.school_age).max(0.0);
                child.social.parents.push(founder.id);
                founder.social.children.push(child.id);
                relations::move_in(&mut child, &mut world.places, home)?;
                world.population.insert(founder);
                world.population.insert(child);
            } else {
                world.population.insert(founder);
            }
        }
    }

    assign_initial_jobs(&mut world, &mut rng, config);

    tracing::debug!(
        places = world.places.len(),
        actors = world.population.len(),
        seed = gen.seed,
        "world generated"
    );
    Ok(world)
}

/// Fill workplaces from the pool of working-age actors, respecting capacity
/// and education, and leave some actors unemployed
fn assign_initial_jobs(world: &mut World, rng: &mut impl Rng, config: &SimulationConfig) {
    let mut workplaces: Vec<PlaceId> = world.places.workplaces().map(|p| p.id).collect();
    workplaces.shuffle(rng);

    let mut candidates: Vec<usize> = world
        .population
        .iter()
        .enumerate()
        .filter(|(_, a)| a.is_working_age(config))
        .map(|(idx, _)| idx)
        .collect();
    candidates.shuffle(rng);

    for workplace in workplaces {
        let (capacity, min_education) = match &world.places[workplace].work {
            Some(work) => (work.capacity, work.min_education_years),
            None => continue,
        };
        // Leave a share of every workplace vacant for job hunters
        let target = (f64::from(capacity) * rng.gen_range(0.4..0.9)).round() as u32;
        let mut filled = 0;
        let mut idx = 0;
        while filled < target && idx < candidates.len() {
            let actor_idx = candidates[idx];
            let id = world.population.at(actor_idx).id;
            let qualifies = world
                .population
                .get(id)
                .map_or(false, |a| a.workplace.is_none() && a.education_years >= min_education);
            if qualifies {
                if let Some(actor) = world.population.get_mut(id) {
                    relations::hire(actor, &mut world.places, workplace);
                }
                candidates.swap_remove(idx);
                filled += 1;
            } else {
                idx += 1;
            }
        }
    }
}
