//! Social connections: acquaintance strengths, partner and family lineage
//!
//! Connections are keyed by [`ActorId`] only. Entries for actors that have
//! died are left in place and fade through ordinary decay.

use std::collections::BTreeMap;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::types::ActorId;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialConnections {
    /// Strength of each acquaintance, always positive
    connections: BTreeMap<ActorId, f64>,
    pub partner: Option<ActorId>,
    pub children: Vec<ActorId>,
    pub parents: Vec<ActorId>,
}

impl SocialConnections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strength(&self, other: ActorId) -> f64 {
        self.connections.get(&other).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, other: ActorId) -> bool {
        self.connections.contains_key(&other)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn strength_sum(&self) -> f64 {
        self.connections.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ActorId, f64)> + '_ {
        self.connections.iter().map(|(id, strength)| (*id, *strength))
    }

    /// Add `amount` to the connection with `other`, then enforce the cap
    ///
    /// Returns the new strength, or `None` if the connection was the weakest
    /// and got evicted immediately.
    pub fn reinforce(&mut self, other: ActorId, amount: f64, cap: usize) -> Option<f64> {
        *self.connections.entry(other).or_insert(0.0) += amount;
        self.enforce_capacity(cap);
        self.connections.get(&other).copied()
    }

    pub fn remove(&mut self, other: ActorId) -> Option<f64> {
        self.connections.remove(&other)
    }

    pub fn clear(&mut self) {
        self.connections.clear();
    }

    /// Subtract `amount` from every connection and drop the non-positive ones
    pub fn decay(&mut self, amount: f64) {
        for strength in self.connections.values_mut() {
            *strength -= amount;
        }
        self.connections.retain(|_, strength| *strength > 0.0);
    }

    /// Evict the weakest connections until at most `cap` remain
    ///
    /// Ties go to the lowest id, which keeps eviction deterministic.
    pub fn enforce_capacity(&mut self, cap: usize) -> Vec<ActorId> {
        let mut evicted = Vec::new();
        while self.connections.len() > cap {
            let weakest = self
                .connections
                .iter()
                .min_by_key(|(_, strength)| OrderedFloat(**strength))
                .map(|(id, _)| *id);
            match weakest {
                Some(id) => {
                    self.connections.remove(&id);
                    evicted.push(id);
                }
                None => break,
            }
        }
        evicted
    }
}
