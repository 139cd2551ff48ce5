//! Planet discovery state machine.
//!
//! Each planet moves one way, `Unvisited → Discovered`, on Bob's first contact
//! with it.  The log as a whole moves `Exploring → AllDiscovered` once every
//! planet of the roster is discovered, and reports that exactly once.
//!
//! The log is pure state; [`crate::solar_system`] turns its outcomes into the
//! outbound messages defined here.

use crate::planet::PlanetId;
use bevy::prelude::*;
use std::collections::HashSet;

// ── Outbound messages ─────────────────────────────────────────────────────────

/// A planet was contacted for the first time.
#[derive(Message, Debug, Clone, PartialEq)]
pub struct PlanetDiscovered {
    pub id: PlanetId,
    /// Planets discovered so far, including this one.
    pub discovered: usize,
    pub total: usize,
}

/// Every planet of the roster has been discovered.  Sent at most once per scene.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct JourneyComplete;

/// The player asked to put Bob back next to the last planet he discovered.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetRequested;

// ── State ─────────────────────────────────────────────────────────────────────

/// Aggregate discovery state of the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JourneyState {
    Exploring,
    AllDiscovered,
}

/// Result of recording one contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovery {
    /// First contact with this planet.  `completed` is `true` only on the
    /// contact that discovered the final planet.
    New {
        discovered: usize,
        total: usize,
        completed: bool,
    },
    /// The planet was already discovered; nothing changed.
    AlreadyKnown,
}

/// Monotonic set of discovered planets plus the order they were found in.
#[derive(Debug, Clone)]
pub struct DiscoveryLog {
    visited: HashSet<PlanetId>,
    order: Vec<PlanetId>,
    total: usize,
}

impl DiscoveryLog {
    /// A fresh log for a roster of `total` planets.
    pub fn new(total: usize) -> Self {
        Self {
            visited: HashSet::with_capacity(total),
            order: Vec::with_capacity(total),
            total,
        }
    }

    /// Record a contact with `id`.
    ///
    /// Only the first contact per planet changes state; repeats return
    /// [`Discovery::AlreadyKnown`] and leave the order untouched.
    pub fn record(&mut self, id: &PlanetId) -> Discovery {
        if self.visited.contains(id) || self.is_complete() {
            return Discovery::AlreadyKnown;
        }
        self.visited.insert(id.clone());
        self.order.push(id.clone());
        Discovery::New {
            discovered: self.visited.len(),
            total: self.total,
            completed: self.is_complete(),
        }
    }

    pub fn contains(&self, id: &PlanetId) -> bool {
        self.visited.contains(id)
    }

    /// Most recently discovered planet.
    pub fn last(&self) -> Option<&PlanetId> {
        self.order.last()
    }

    /// Planets in the order they were discovered.
    pub fn order(&self) -> &[PlanetId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.visited.len() >= self.total
    }

    pub fn state(&self) -> JourneyState {
        if self.is_complete() {
            JourneyState::AllDiscovered
        } else {
            JourneyState::Exploring
        }
    }
}
