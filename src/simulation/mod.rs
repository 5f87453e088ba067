//! Simulation systems and the step driver

pub mod decision;
pub mod history;
pub mod lifecycle;
pub mod policy;
pub mod rates;
pub mod social_graph;
pub mod tick;

pub use decision::StepContext;
pub use history::{History, HistoryEntry, LongTermEntry};
pub use lifecycle::BirthRequest;
pub use tick::{Simulation, SimulationEvent, SimulationStats, Snapshot};
