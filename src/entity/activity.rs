//! Durational activities and the perceived state derived from them

use serde::{Deserialize, Serialize};

use crate::core::types::{PlaceId, Position};

/// What an actor can spend time doing at a place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActivityKind {
    Working,
    JobHunting,
    Sleeping,
    Eating,
    Educating,
    InThePark,
    AtTheClub,
    AtTheGym,
    WatchingTv,
    VisitingFriend,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 10] = [
        ActivityKind::Working,
        ActivityKind::JobHunting,
        ActivityKind::Sleeping,
        ActivityKind::Eating,
        ActivityKind::Educating,
        ActivityKind::InThePark,
        ActivityKind::AtTheClub,
        ActivityKind::AtTheGym,
        ActivityKind::WatchingTv,
        ActivityKind::VisitingFriend,
    ];

    /// Connections formed per hour by an actor engaged in this activity
    pub fn sociability_rate(self) -> f64 {
        match self {
            ActivityKind::Working => 0.5,
            ActivityKind::JobHunting => 0.0,
            ActivityKind::Sleeping => 0.0,
            ActivityKind::Eating => 0.5,
            ActivityKind::Educating => 1.0,
            ActivityKind::InThePark => 0.5,
            ActivityKind::AtTheClub => 2.0,
            ActivityKind::AtTheGym => 0.5,
            ActivityKind::WatchingTv => 0.2,
            ActivityKind::VisitingFriend => 2.0,
        }
    }
}

/// The activity an actor is currently pursuing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub kind: ActivityKind,
    pub hours_left: f64,
    pub place: PlaceId,
    /// Position of `place`, cached because places never move
    pub destination: Position,
}

impl Activity {
    pub fn new(kind: ActivityKind, hours: f64, place: PlaceId, destination: Position) -> Self {
        Self {
            kind,
            hours_left: hours.max(0.0),
            place,
            destination,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.hours_left <= 0.0
    }

    /// Consume up to `elapsed_hours`, returning the hours actually spent
    pub fn consume(&mut self, elapsed_hours: f64) -> f64 {
        let spent = elapsed_hours.min(self.hours_left).max(0.0);
        self.hours_left = (self.hours_left - elapsed_hours).max(0.0);
        spent
    }

    /// Drop the remaining time so the policy runs on the next tick
    pub fn finish(&mut self) {
        self.hours_left = 0.0;
    }
}

/// Observable state of an actor
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PerceivedState {
    /// Travelling toward the target place
    Commuting { heading: Position },
    /// At the target place doing the target activity
    Engaged(ActivityKind),
}

impl PerceivedState {
    pub fn sociability_rate(&self) -> f64 {
        match self {
            PerceivedState::Commuting { .. } => 0.0,
            PerceivedState::Engaged(kind) => kind.sociability_rate(),
        }
    }

    pub fn tag(&self) -> StateTag {
        match self {
            PerceivedState::Commuting { .. } => StateTag::Commuting,
            PerceivedState::Engaged(kind) => StateTag::from(*kind),
        }
    }
}

/// Flat label of a perceived state, used as a histogram key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StateTag {
    Commuting,
    Working,
    JobHunting,
    Sleeping,
    Eating,
    Educating,
    InThePark,
    AtTheClub,
    AtTheGym,
    WatchingTv,
    VisitingFriend,
}

impl StateTag {
    pub const ALL: [StateTag; 11] = [
        StateTag::Commuting,
        StateTag::Working,
        StateTag::JobHunting,
        StateTag::Sleeping,
        StateTag::Eating,
        StateTag::Educating,
        StateTag::InThePark,
        StateTag::AtTheClub,
        StateTag::AtTheGym,
        StateTag::WatchingTv,
        StateTag::VisitingFriend,
    ];
}

impl From<ActivityKind> for StateTag {
    fn from(kind: ActivityKind) -> Self {
        match kind {
            ActivityKind::Working => StateTag::Working,
            ActivityKind::JobHunting => StateTag::JobHunting,
            ActivityKind::Sleeping => StateTag::Sleeping,
            ActivityKind::Eating => StateTag::Eating,
            ActivityKind::Educating => StateTag::Educating,
            ActivityKind::InThePark => StateTag::InThePark,
            ActivityKind::AtTheClub => StateTag::AtTheClub,
            ActivityKind::AtTheGym => StateTag::AtTheGym,
            ActivityKind::WatchingTv => StateTag::WatchingTv,
            ActivityKind::VisitingFriend => StateTag::VisitingFriend,
        }
    }
}
