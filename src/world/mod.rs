//! The bounded world: places, the population and their links

pub mod generation;
pub mod place;
pub mod population;
pub mod registry;
pub mod relations;

pub use generation::{generate, Area, GenerationConfig};
pub use place::{HourRange, Place, PlaceKind, Work};
pub use population::{Others, Population};
pub use registry::{Places, World};
