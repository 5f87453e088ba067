//! Actors: simulated people with needs, relationships and a current activity

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::core::types::{ActorId, PlaceId, Position};
use crate::entity::activity::{Activity, ActivityKind, PerceivedState};
use crate::entity::needs::Needs;
use crate::entity::preferences::Preferences;
use crate::entity::social::SocialConnections;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];
}

/// Coarse occupation bucket used by history and charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EmploymentCategory {
    Child,
    Student,
    Employed,
    Unemployed,
    Retired,
}

impl EmploymentCategory {
    pub const ALL: [EmploymentCategory; 5] = [
        EmploymentCategory::Child,
        EmploymentCategory::Student,
        EmploymentCategory::Employed,
        EmploymentCategory::Unemployed,
        EmploymentCategory::Retired,
    ];
}

#[derive(Debug, Clone, Serialize)]
pub struct Actor {
    pub id: ActorId,
    pub first_name: String,
    pub family_name: String,
    /// Age in (fractional) years
    pub age: f64,
    pub gender: Gender,
    pub wealth: f64,
    pub education_years: f64,
    pub needs: Needs,
    pub position: Position,
    pub home: PlaceId,
    pub workplace: Option<PlaceId>,
    pub preferences: Preferences,
    pub social: SocialConnections,
    pub target: Activity,
    pub alive: bool,
}

impl Actor {
    /// Create an actor standing at home with an exhausted activity, so the
    /// policy picks something on the first tick
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ActorId,
        first_name: String,
        family_name: String,
        age: f64,
        gender: Gender,
        home: PlaceId,
        home_position: Position,
        preferences: Preferences,
    ) -> Self {
        Self {
            id,
            first_name,
            family_name,
            age,
            gender,
            wealth: 0.0,
            education_years: 0.0,
            needs: Needs::default(),
            position: home_position,
            home,
            workplace: None,
            preferences,
            social: SocialConnections::new(),
            target: Activity::new(ActivityKind::WatchingTv, 0.0, home, home_position),
            alive: true,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.family_name)
    }

    pub fn is_at_target(&self) -> bool {
        self.position == self.target.destination
    }

    /// Derived state: the target activity once arrived, otherwise commuting
    pub fn perceived_state(&self) -> PerceivedState {
        if self.is_at_target() {
            PerceivedState::Engaged(self.target.kind)
        } else {
            PerceivedState::Commuting {
                heading: self.target.destination - self.position,
            }
        }
    }

    pub fn is_adult(&self, config: &SimulationConfig) -> bool {
        self.age >= config.adult_age
    }

    pub fn is_working_age(&self, config: &SimulationConfig) -> bool {
        self.age >= config.adult_age && self.age < config.retirement_age
    }

    pub fn is_study_age(&self, config: &SimulationConfig) -> bool {
        self.age >= config.school_age && self.age < config.study_age_limit
    }

    pub fn is_fertile(&self, config: &SimulationConfig) -> bool {
        let limit = match self.gender {
            Gender::Female => config.female_fertility_limit,
            Gender::Male => config.male_fertility_limit,
            Gender::Other => return false,
        };
        self.age >= config.adult_age && self.age < limit
    }

    pub fn employment_category(&self, config: &SimulationConfig) -> EmploymentCategory {
        if self.workplace.is_some() {
            EmploymentCategory::Employed
        } else if self.age < config.school_age {
            EmploymentCategory::Child
        } else if self.age < config.adult_age {
            EmploymentCategory::Student
        } else if self.age >= config.retirement_age {
            EmploymentCategory::Retired
        } else if self.age < config.study_age_limit {
            EmploymentCategory::Student
        } else {
            EmploymentCategory::Unemployed
        }
    }

    /// Ages this actor would consider in a partner, `None` for minors
    pub fn partner_age_preference(&self, config: &SimulationConfig) -> Option<RangeInclusive<u32>> {
        if !self.is_adult(config) {
            return None;
        }
        let age = self.age.floor() as u32;
        let adult = config.adult_age as u32;
        let min = adult.max(age / 2 + 7);
        let max = min.max(age.saturating_sub(7) * 2);
        Some(min..=max)
    }

    /// Mutual attraction check used when a connection crosses the dating threshold
    pub fn can_partner_with(&self, other: &Actor, config: &SimulationConfig) -> bool {
        let ages_match = match (
            self.partner_age_preference(config),
            other.partner_age_preference(config),
        ) {
            (Some(mine), Some(theirs)) => {
                mine.contains(&(other.age.floor() as u32)) && theirs.contains(&(self.age.floor() as u32))
            }
            _ => false,
        };

        self.id != other.id
            && self.alive
            && other.alive
            && self.social.partner.is_none()
            && other.social.partner.is_none()
            && self.gender == other.preferences.partner_gender
            && self.preferences.partner_gender == other.gender
            && ages_match
    }
}
