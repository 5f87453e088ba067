//! Core type definitions used throughout the codebase

use std::hash::{Hash, Hasher};

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// Unique identifier for actors
///
/// Ids are handed out sequentially by the population so that two runs with the
/// same seed allocate identical ids.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From,
)]
#[display(fmt = "actor#{}", _0)]
pub struct ActorId(pub u64);

/// Index of a place in the world registry
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From,
)]
#[display(fmt = "place#{}", _0)]
pub struct PlaceId(pub u32);

impl PlaceId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Continuous 2D position
///
/// Raw coordinates drive movement. Equality and hashing use the rounded grid
/// cell, so an actor standing within half a unit of a place counts as being
/// at that place.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Grid cell this position snaps onto
    pub fn cell(&self) -> (i64, i64) {
        (self.x.round() as i64, self.y.round() as i64)
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Displacement toward `target`, no longer than `max_distance`
    ///
    /// When the target is within reach the exact remaining offset is returned,
    /// so applying it lands on the target without overshooting.
    pub fn direction_to(&self, target: &Self, max_distance: f64) -> Self {
        let offset = *target - *self;
        let distance = offset.length();
        if distance <= max_distance {
            return offset;
        }
        if max_distance <= 0.0 || distance == 0.0 {
            return Self::default();
        }
        offset * (max_distance / distance)
    }

    /// This position pulled inside the rectangle `[0, width] x [0, height]`
    pub fn clamped(self, width: f64, height: f64) -> Self {
        Self::new(self.x.clamp(0.0, width), self.y.clamp(0.0, height))
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.cell() == other.cell()
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cell().hash(state);
    }
}

impl std::ops::Add for Position {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::AddAssign for Position {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub for Position {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Mul<f64> for Position {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}
