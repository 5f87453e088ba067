//! Places actors can occupy: homes, workplaces, shops and leisure venues

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::core::types::{ActorId, PlaceId, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlaceKind {
    Home,
    FoodShop,
    Industry,
    University,
    Club,
    Gym,
    Park,
}

impl PlaceKind {
    pub const ALL: [PlaceKind; 7] = [
        PlaceKind::Home,
        PlaceKind::FoodShop,
        PlaceKind::Industry,
        PlaceKind::University,
        PlaceKind::Club,
        PlaceKind::Gym,
        PlaceKind::Park,
    ];

    /// Paint priority for renderers, irrelevant to the simulation
    pub fn z_order(self) -> u8 {
        match self {
            PlaceKind::Industry => 1,
            PlaceKind::FoodShop => 2,
            PlaceKind::Club => 3,
            PlaceKind::Gym => 4,
            PlaceKind::University => 5,
            PlaceKind::Park => 6,
            PlaceKind::Home => 7,
        }
    }
}

/// Half-open interval of whole hours, `start..end` with `0 <= start <= end <= 24`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourRange {
    start: u8,
    end: u8,
}

impl HourRange {
    pub const ALL_DAY: HourRange = HourRange { start: 0, end: 24 };

    pub fn new(start: u8, end: u8) -> Result<Self> {
        if start > end || end > 24 {
            return Err(SimError::InvalidHours { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> u8 {
        self.start
    }

    pub fn end(&self) -> u8 {
        self.end
    }

    pub fn contains(&self, hour: f64) -> bool {
        hour >= f64::from(self.start) && hour < f64::from(self.end)
    }

    pub fn contains_range(&self, other: &HourRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Hours from `hour` until the range closes (0 if outside)
    pub fn hours_until_end(&self, hour: f64) -> f64 {
        if self.contains(hour) {
            f64::from(self.end) - hour
        } else {
            0.0
        }
    }
}

/// Employment offered by a place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Work {
    pub capacity: u32,
    pub min_education_years: f64,
    pub wage_per_hour: f64,
    core_hours: HourRange,
    workable_hours: HourRange,
    /// Current number of employees
    pub headcount: u32,
}

impl Work {
    pub fn new(
        capacity: u32,
        min_education_years: f64,
        wage_per_hour: f64,
        core_hours: HourRange,
        workable_hours: HourRange,
    ) -> Result<Self> {
        if !workable_hours.contains_range(&core_hours) {
            return Err(SimError::CoreHoursOutsideWorkable {
                core_start: core_hours.start,
                core_end: core_hours.end,
                workable_start: workable_hours.start,
                workable_end: workable_hours.end,
            });
        }
        if min_education_years < 0.0 || wage_per_hour < 0.0 {
            return Err(SimError::InvalidConfig(
                "education and wage of a workplace must not be negative".into(),
            ));
        }
        Ok(Self {
            capacity,
            min_education_years,
            wage_per_hour,
            core_hours,
            workable_hours,
            headcount: 0,
        })
    }

    pub fn core_hours(&self) -> HourRange {
        self.core_hours
    }

    pub fn workable_hours(&self) -> HourRange {
        self.workable_hours
    }

    pub fn has_vacancy(&self) -> bool {
        self.headcount < self.capacity
    }

    pub fn is_over_half_full(&self) -> bool {
        self.headcount * 2 > self.capacity
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    pub kind: PlaceKind,
    pub position: Position,
    pub open_hours: HourRange,
    pub work: Option<Work>,
    /// Actors living here; only ever populated for homes
    residents: Vec<ActorId>,
}

impl Place {
    pub fn new(
        id: PlaceId,
        kind: PlaceKind,
        position: Position,
        open_hours: HourRange,
        work: Option<Work>,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            open_hours,
            work,
            residents: Vec::new(),
        }
    }

    pub fn home(id: PlaceId, position: Position) -> Self {
        Self::new(id, PlaceKind::Home, position, HourRange::ALL_DAY, None)
    }

    pub fn park(id: PlaceId, position: Position) -> Self {
        Self::new(id, PlaceKind::Park, position, HourRange::ALL_DAY, None)
    }

    pub fn is_open(&self, hour: f64) -> bool {
        self.open_hours.contains(hour)
    }

    pub fn residents(&self) -> &[ActorId] {
        &self.residents
    }

    /// Only called through the relationship helpers, which keep the
    /// actor's `home` field in step
    pub(crate) fn add_resident(&mut self, actor: ActorId) -> Result<()> {
        if self.kind != PlaceKind::Home {
            return Err(SimError::NotAHome(self.id));
        }
        if !self.residents.contains(&actor) {
            self.residents.push(actor);
        }
        Ok(())
    }

    pub(crate) fn remove_resident(&mut self, actor: ActorId) {
        self.residents.retain(|&r| r != actor);
    }
}
