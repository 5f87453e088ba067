pub mod calendar;
pub mod config;
pub mod error;
pub mod types;

pub use calendar::Clock;
pub use config::SimulationConfig;
pub use error::{Result, SimError};
pub use types::{ActorId, PlaceId, Position};
