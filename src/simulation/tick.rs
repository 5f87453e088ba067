//! Tick system - orchestrates one discrete simulation step
//!
//! clock -> per-actor life cycle and decision -> deferred births and deaths
//! -> social graph -> connection decay -> history.
//!
//! The whole population is processed sequentially. Structural changes to the
//! population are collected while actors tick and applied only afterwards, so
//! a newborn is never ticked in the step it was born and a death never
//! invalidates an index other actors still use.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::core::calendar::Clock;
use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::types::{ActorId, PlaceId};
use crate::simulation::decision::{self, StepContext};
use crate::simulation::history::History;
use crate::simulation::lifecycle::{self, BirthRequest, LifeOutcome};
use crate::simulation::social_graph;
use crate::world::registry::World;
use crate::world::relations;

/// Events generated during a step, returned by [`Simulation::tick`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SimulationEvent {
    Born {
        child: ActorId,
        mother: ActorId,
        father: ActorId,
    },
    Died {
        actor: ActorId,
        age: f64,
    },
    Hired {
        actor: ActorId,
        workplace: PlaceId,
    },
    Fired {
        actor: ActorId,
        workplace: PlaceId,
    },
    Retired {
        actor: ActorId,
        workplace: PlaceId,
    },
    Partnered {
        a: ActorId,
        b: ActorId,
    },
}

/// Side buffer filled during the per-actor pass
#[derive(Debug, Default)]
pub struct PendingChanges {
    pub births: Vec<BirthRequest>,
    pub deaths: Vec<ActorId>,
    /// (survivor, deceased) partner links to clear
    pub widowed: Vec<(ActorId, ActorId)>,
    pub events: Vec<SimulationEvent>,
}

/// Running totals since the simulation was created
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimulationStats {
    pub steps: u64,
    pub births: u64,
    pub deaths: u64,
    pub partnerships: u64,
    pub hires: u64,
    pub firings: u64,
    pub retirements: u64,
}

impl SimulationStats {
    fn count(&mut self, events: &[SimulationEvent]) {
        for event in events {
            match event {
                SimulationEvent::Born { .. } => self.births += 1,
                SimulationEvent::Died { .. } => self.deaths += 1,
                SimulationEvent::Hired { .. } => self.hires += 1,
                SimulationEvent::Fired { .. } => self.firings += 1,
                SimulationEvent::Retired { .. } => self.retirements += 1,
                SimulationEvent::Partnered { .. } => self.partnerships += 1,
            }
        }
    }
}

/// Serializable view of the full simulation state
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub clock: &'a Clock,
    pub stats: &'a SimulationStats,
    pub world: &'a World,
}

/// A self-contained simulation instance: create, tick repeatedly, drop
pub struct Simulation {
    world: World,
    clock: Clock,
    history: History,
    config: SimulationConfig,
    stats: SimulationStats,
    rng: ChaCha8Rng,
}

impl Simulation {
    /// Validate `config` and the links of `world`, then start at the default clock
    ///
    /// The history opens with an entry for the starting state.
    pub fn new(world: World, config: SimulationConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        world.check_consistency()?;
        let clock = Clock::default();
        let mut history = History::new(&config);
        history.record(&world, &clock, &config);
        Ok(Self {
            world,
            clock,
            history,
            config,
            stats: SimulationStats::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Start from `clock` instead; the history is reopened at that time
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.history = History::new(&self.config);
        self.history.record(&self.world, &clock, &self.config);
        self.clock = clock;
        self
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            clock: &self.clock,
            stats: &self.stats,
            world: &self.world,
        }
    }

    /// Advance the simulation by `elapsed_hours`
    ///
    /// The step is never subdivided; callers chunk long deltas themselves.
    pub fn tick(&mut self, elapsed_hours: f64) -> Vec<SimulationEvent> {
        self.clock.advance(elapsed_hours);
        let mut pending = PendingChanges::default();

        self.tick_actors(elapsed_hours, &mut pending);
        self.apply_births(&mut pending);
        self.apply_deaths(&pending);

        social_graph::form_connections(
            &mut self.world,
            &self.config,
            &mut self.rng,
            elapsed_hours,
            &mut pending.events,
        );

        social_graph::decay_connections(&mut self.world.population, &self.config, elapsed_hours);

        self.history.record(&self.world, &self.clock, &self.config);

        self.stats.steps += 1;
        self.stats.count(&pending.events);
        tracing::trace!(
            clock = %self.clock,
            population = self.world.population.len(),
            births = pending.births.len(),
            deaths = pending.deaths.len(),
            events = pending.events.len(),
            "step complete"
        );
        pending.events
    }

    fn tick_actors(&mut self, elapsed_hours: f64, pending: &mut PendingChanges) {
        let ctx = StepContext {
            clock: &self.clock,
            config: &self.config,
            width: self.world.width,
            height: self.world.height,
            elapsed_hours,
        };
        let World { places, population, .. } = &mut self.world;
        let rng = &mut self.rng;

        for idx in 0..population.len() {
            let (actor, others) = population.split_one_mut(idx);
            if !actor.alive {
                continue;
            }
            match lifecycle::advance_life(actor, places, ctx.config, rng, elapsed_hours, &mut pending.events) {
                LifeOutcome::Died { former_partner } => {
                    pending.deaths.push(actor.id);
                    if let Some(partner) = former_partner {
                        pending.widowed.push((partner, actor.id));
                    }
                }
                LifeOutcome::Alive => {
                    decision::tick_actor(actor, &others, places, &ctx, rng, pending);
                }
            }
        }
    }

    fn apply_births(&mut self, pending: &mut PendingChanges) {
        for request in std::mem::take(&mut pending.births) {
            match lifecycle::synthesize_child(&mut self.world, request, &mut self.rng) {
                Ok(Some(child)) => {
                    tracing::debug!(%child, mother = %request.mother, father = %request.father, "born");
                    pending.events.push(SimulationEvent::Born {
                        child,
                        mother: request.mother,
                        father: request.father,
                    });
                    pending.births.push(request);
                }
                Ok(None) => {}
                Err(err) => tracing::warn!(mother = %request.mother, %err, "birth dropped"),
            }
        }
    }

    fn apply_deaths(&mut self, pending: &PendingChanges) {
        for &(survivor, deceased) in &pending.widowed {
            if let Some(survivor) = self.world.population.get_mut(survivor) {
                relations::widow(survivor, deceased, &self.config);
            }
        }
        self.world.population.remove_all(&pending.deaths);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::generation::{generate, GenerationConfig};

    fn simulation(seed: u64) -> Simulation {
        let config = SimulationConfig::default();
        let world = generate(&GenerationConfig::small(seed), &config).unwrap();
        Simulation::new(world, config, seed).unwrap()
    }

    #[test]
    fn test_tick_advances_clock_and_records_history() {
        let mut sim = simulation(1);
        let start = sim.clock().timestamp();
        for _ in 0..8 {
            sim.tick(0.25);
        }
        assert!((sim.clock().timestamp() - start - 2.0).abs() < 1e-9);
        // The starting entry plus one per step
        assert_eq!(sim.history().ticks().count(), 9);
        assert_eq!(sim.history().ticks().next().unwrap().timestamp, start);
        assert_eq!(sim.stats().steps, 8);
    }

    #[test]
    fn test_history_opens_with_starting_state() {
        let sim = simulation(4);
        let start = sim.clock().timestamp();
        let history = sim.history();
        assert_eq!(history.ticks().count(), 1);
        assert_eq!(history.long_term().len(), 1);

        let first = history.latest().unwrap();
        assert_eq!(first.timestamp, start);
        assert_eq!(first.population as usize, sim.world().population.len());
        assert_eq!(history.long_term_entries(), vec![first]);
    }

    #[test]
    fn test_world_stays_consistent() {
        let mut sim = simulation(2);
        for _ in 0..400 {
            sim.tick(0.25);
        }
        sim.world().check_consistency().unwrap();
        assert!(sim.world().population.iter().all(|a| a.alive));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimulationConfig {
            max_connections: 0,
            ..SimulationConfig::default()
        };
        let world = World::new(10.0, 10.0);
        assert!(Simulation::new(world, config, 0).is_err());
    }

    #[test]
    fn test_stats_follow_events() {
        let mut sim = simulation(3);
        let mut hires = 0;
        for _ in 0..200 {
            hires += sim
                .tick(0.25)
                .iter()
                .filter(|e| matches!(e, SimulationEvent::Hired { .. }))
                .count() as u64;
        }
        assert_eq!(sim.stats().hires, hires);
    }
}
