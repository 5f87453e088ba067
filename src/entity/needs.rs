//! Physiological needs that drive actor behaviour

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NeedKind {
    Food,
    Sleep,
    WorkFreeTime,
}

/// A single need, 1.0 = fully satisfied, 0.0 = depleted
///
/// The amount can only change through [`Need::add`], which saturates at the
/// bounds so no step size can push it out of [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Need {
    kind: NeedKind,
    amount: f64,
}

impl Need {
    pub fn new(kind: NeedKind, amount: f64) -> Self {
        Self {
            kind,
            amount: amount.clamp(0.0, 1.0),
        }
    }

    pub fn kind(&self) -> NeedKind {
        self.kind
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Apply `rate_per_hour` for `elapsed_hours`, clamped to [0, 1]
    pub fn add(&mut self, rate_per_hour: f64, elapsed_hours: f64) {
        self.amount = (self.amount + rate_per_hour * elapsed_hours).clamp(0.0, 1.0);
    }
}

/// Needs shared by every actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Needs {
    pub food: Need,
    pub sleep: Need,
    pub work_free_time: Need,
}

impl Default for Needs {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

impl Needs {
    pub fn new(food: f64, sleep: f64, work_free_time: f64) -> Self {
        Self {
            food: Need::new(NeedKind::Food, food),
            sleep: Need::new(NeedKind::Sleep, sleep),
            work_free_time: Need::new(NeedKind::WorkFreeTime, work_free_time),
        }
    }

    /// Unconditional per-hour drift applied once per tick
    pub fn decay(&mut self, food_rate: f64, sleep_rate: f64, free_time_rate: f64, elapsed_hours: f64) {
        self.food.add(-food_rate, elapsed_hours);
        self.sleep.add(-sleep_rate, elapsed_hours);
        self.work_free_time.add(free_time_rate, elapsed_hours);
    }
}
