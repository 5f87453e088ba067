//! Population history for charts
//!
//! Two retention tiers: a rolling window of per-step entries, and an
//! unbounded long-term series appended at a fixed simulated cadence that is
//! handed out downsampled.

use std::collections::{BTreeMap, VecDeque};

use serde::Serialize;

use crate::core::calendar::Clock;
use crate::core::config::SimulationConfig;
use crate::entity::activity::StateTag;
use crate::entity::actor::EmploymentCategory;
use crate::world::registry::World;

/// Snapshot of population statistics at one moment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub timestamp: f64,
    pub population: u32,
    pub partnered: u32,
    pub state_counts: BTreeMap<StateTag, u32>,
    pub employment: BTreeMap<EmploymentCategory, u32>,
}

impl HistoryEntry {
    pub fn capture(world: &World, clock: &Clock, config: &SimulationConfig) -> Self {
        let mut state_counts = BTreeMap::new();
        let mut employment = BTreeMap::new();
        let mut population = 0;
        let mut partnered = 0;

        for actor in world.population.iter().filter(|a| a.alive) {
            population += 1;
            if actor.social.partner.is_some() {
                partnered += 1;
            }
            *state_counts.entry(actor.perceived_state().tag()).or_insert(0) += 1;
            *employment.entry(actor.employment_category(config)).or_insert(0) += 1;
        }

        Self {
            timestamp: clock.timestamp(),
            population,
            partnered,
            state_counts,
            employment,
        }
    }

    pub fn count(&self, tag: StateTag) -> u32 {
        self.state_counts.get(&tag).copied().unwrap_or(0)
    }

    pub fn employed(&self, category: EmploymentCategory) -> u32 {
        self.employment.get(&category).copied().unwrap_or(0)
    }
}

/// Long-term entries also carry population averages
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongTermEntry {
    #[serde(flatten)]
    pub snapshot: HistoryEntry,
    pub mean_age: f64,
    pub mean_wealth: f64,
}

impl LongTermEntry {
    fn capture(snapshot: HistoryEntry, world: &World) -> Self {
        let (count, age, wealth) = world
            .population
            .iter()
            .filter(|a| a.alive)
            .fold((0usize, 0.0, 0.0), |(n, age, wealth), a| (n + 1, age + a.age, wealth + a.wealth));
        let (mean_age, mean_wealth) = if count == 0 {
            (0.0, 0.0)
        } else {
            (age / count as f64, wealth / count as f64)
        };
        Self {
            snapshot,
            mean_age,
            mean_wealth,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct History {
    ticks: VecDeque<HistoryEntry>,
    long_term: Vec<LongTermEntry>,
    window_hours: f64,
    cadence_hours: f64,
    display_cap: usize,
}

impl History {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            ticks: VecDeque::new(),
            long_term: Vec::new(),
            window_hours: config.history_window_hours,
            cadence_hours: config.long_term_cadence_hours,
            display_cap: config.long_term_display_cap,
        }
    }

    /// Append a tick entry, prune the window and maybe append a long-term entry
    pub fn record(&mut self, world: &World, clock: &Clock, config: &SimulationConfig) {
        let entry = HistoryEntry::capture(world, clock, config);
        let now = entry.timestamp;

        let due = self
            .long_term
            .last()
            .map_or(true, |last| now - last.snapshot.timestamp >= self.cadence_hours);
        if due {
            self.long_term.push(LongTermEntry::capture(entry.clone(), world));
        }

        self.ticks.push_back(entry);
        while self
            .ticks
            .front()
            .map_or(false, |oldest| now - oldest.timestamp > self.window_hours)
        {
            self.ticks.pop_front();
        }
    }

    /// Tick-resolution entries within the rolling window, oldest first
    pub fn ticks(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.ticks.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.ticks.back()
    }

    /// Every long-term entry ever recorded
    pub fn long_term(&self) -> &[LongTermEntry] {
        &self.long_term
    }

    /// Long-term series for display
    ///
    /// Until the long-term series spans more than the rolling window the
    /// finer tick entries are returned instead. Beyond the display cap the
    /// series is strided uniformly, always keeping the final entry, so at
    /// most `cap + 1` entries come back.
    pub fn long_term_entries(&self) -> Vec<&HistoryEntry> {
        let span = match (self.long_term.first(), self.long_term.last()) {
            (Some(first), Some(last)) => last.snapshot.timestamp - first.snapshot.timestamp,
            _ => 0.0,
        };
        if span < self.window_hours {
            return self.ticks.iter().collect();
        }

        let len = self.long_term.len();
        if len <= self.display_cap {
            return self.long_term.iter().map(|e| &e.snapshot).collect();
        }

        let stride = (len + self.display_cap - 1) / self.display_cap;
        let mut sampled: Vec<&HistoryEntry> = self
            .long_term
            .iter()
            .step_by(stride)
            .map(|e| &e.snapshot)
            .collect();
        if (len - 1) % stride != 0 {
            sampled.push(&self.long_term[len - 1].snapshot);
        }
        sampled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_hours(history: &mut History, hours: f64, step: f64) -> Clock {
        let config = SimulationConfig::default();
        let world = World::new(10.0, 10.0);
        let mut clock = Clock::new(0.0, 0);
        let steps = (hours / step).round() as usize;
        for _ in 0..steps {
            clock.advance(step);
            history.record(&world, &clock, &config);
        }
        clock
    }

    #[test]
    fn test_tick_window_is_pruned() {
        let mut history = History::new(&SimulationConfig::default());
        let clock = record_hours(&mut history, 48.0, 0.5);
        let now = clock.timestamp();
        assert!(history.ticks().all(|e| now - e.timestamp <= 24.0));
        assert_eq!(history.ticks().count(), 49);
    }

    #[test]
    fn test_long_term_cadence() {
        let config = SimulationConfig {
            long_term_cadence_hours: 0.5,
            ..SimulationConfig::default()
        };
        let mut history = History::new(&config);
        record_hours(&mut history, 2.0, 0.25);
        // Entries at 0.25, 0.75, 1.25 and 1.75
        assert_eq!(history.long_term().len(), 4);
        assert_eq!(history.ticks().count(), 8);
    }

    #[test]
    fn test_short_runs_show_tick_entries() {
        let mut history = History::new(&SimulationConfig::default());
        record_hours(&mut history, 5.0, 0.25);
        assert_eq!(history.long_term_entries().len(), history.ticks().count());
    }

    #[test]
    fn test_long_runs_are_downsampled() {
        let config = SimulationConfig {
            long_term_display_cap: 50,
            ..SimulationConfig::default()
        };
        let mut history = History::new(&config);
        record_hours(&mut history, 60.0, 0.1);

        let total = history.long_term().len();
        assert!(total > 50);
        let shown = history.long_term_entries();
        assert!(shown.len() <= 51);
        let last = &history.long_term().last().unwrap().snapshot;
        assert_eq!(shown.last().copied(), Some(last));
    }
}
