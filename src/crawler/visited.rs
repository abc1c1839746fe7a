//! Visitation bookkeeping
//!
//! Append-only set of every identifier ever dequeued from any layer; there
//! is no removal. Consulted to skip identifiers without spending an API
//! call and to keep identifiers from being queued for expansion twice.

use std::collections::BTreeSet;

/// Ledger of identifiers already dequeued
///
/// Backed by an ordered set so checkpoint serialization is deterministic.
#[derive(Debug, Default)]
pub struct VisitedSet {
    entries: BTreeSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores the set from checkpointed state
    pub fn restore(entries: BTreeSet<String>) -> Self {
        Self { entries }
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains(identifier)
    }

    /// Marks an identifier visited; returns false if it already was
    pub fn add(&mut self, identifier: String) -> bool {
        self.entries.insert(identifier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The underlying entries, for checkpointing
    pub fn entries(&self) -> &BTreeSet<String> {
        &self.entries
    }
}
