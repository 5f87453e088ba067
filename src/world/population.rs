//! Actor storage with id lookup and split borrows
//!
//! The per-actor pass needs one actor mutably while reading everyone else.
//! [`Population::split_one_mut`] hands out exactly that.

use ahash::AHashMap;
use serde::Serialize;

use crate::core::types::ActorId;
use crate::entity::actor::Actor;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Population {
    actors: Vec<Actor>,
    #[serde(skip)]
    index: AHashMap<ActorId, usize>,
    next_id: u64,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a fresh id for an actor about to be created
    pub fn allocate_id(&mut self) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn insert(&mut self, actor: Actor) {
        self.next_id = self.next_id.max(actor.id.0 + 1);
        self.index.insert(actor.id, self.actors.len());
        self.actors.push(actor);
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.actors.iter_mut()
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.index.get(&id).map(|&idx| &self.actors[idx])
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        match self.index.get(&id) {
            Some(&idx) => Some(&mut self.actors[idx]),
            None => None,
        }
    }

    pub fn position_of(&self, id: ActorId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn at(&self, idx: usize) -> &Actor {
        &self.actors[idx]
    }

    /// Remove the given actors, keeping the order of everyone else
    pub fn remove_all(&mut self, ids: &[ActorId]) {
        if ids.is_empty() {
            return;
        }
        self.actors.retain(|a| !ids.contains(&a.id));
        self.rebuild_index();
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (idx, actor) in self.actors.iter().enumerate() {
            self.index.insert(actor.id, idx);
        }
    }

    /// Mutable access to the actor at `idx` and read access to all others
    pub fn split_one_mut(&mut self, idx: usize) -> (&mut Actor, Others<'_>) {
        let (before, rest) = self.actors.split_at_mut(idx);
        let (actor, after) = rest
            .split_first_mut()
            .unwrap_or_else(|| panic!("actor index {} out of bounds", idx));
        (
            actor,
            Others {
                before,
                after,
                split: idx,
                index: &self.index,
            },
        )
    }

    /// Mutable access to two distinct actors at once
    pub fn pair_mut(&mut self, a: usize, b: usize) -> (&mut Actor, &mut Actor) {
        assert_ne!(a, b, "pair_mut needs two distinct actors");
        if a < b {
            let (left, right) = self.actors.split_at_mut(b);
            (&mut left[a], &mut right[0])
        } else {
            let (left, right) = self.actors.split_at_mut(a);
            (&mut right[0], &mut left[b])
        }
    }
}

/// Read-only view of every actor except the one currently being ticked
pub struct Others<'a> {
    before: &'a [Actor],
    after: &'a [Actor],
    split: usize,
    index: &'a AHashMap<ActorId, usize>,
}

impl<'a> Others<'a> {
    pub fn get(&self, id: ActorId) -> Option<&'a Actor> {
        let idx = *self.index.get(&id)?;
        let (before, after) = (self.before, self.after);
        if idx < self.split {
            before.get(idx)
        } else if idx > self.split {
            after.get(idx - self.split - 1)
        } else {
            None
        }
    }

    /// Like [`Others::get`] but skips actors that have died this step
    pub fn living(&self, id: ActorId) -> Option<&'a Actor> {
        self.get(id).filter(|a| a.alive)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Actor> {
        let (before, after) = (self.before, self.after);
        before.iter().chain(after.iter())
    }

    pub fn len(&self) -> usize {
        self.before.len() + self.after.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
