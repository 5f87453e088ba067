pub mod activity;
pub mod actor;
pub mod names;
pub mod needs;
pub mod preferences;
pub mod social;

pub use activity::{Activity, ActivityKind, PerceivedState, StateTag};
pub use actor::{Actor, EmploymentCategory, Gender};
pub use needs::{Need, NeedKind, Needs};
pub use preferences::{Preferences, VenueAffinity};
pub use social::SocialConnections;
