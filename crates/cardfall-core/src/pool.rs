//! Reuse pool for retired enemy records.
//!
//! Enemy stat records live in an arena owned by the session; board-side
//! enemy cards hold an [`EnemyHandle`] into it for their active lifetime and
//! return it on defeat. Retired slots are recycled oldest-first once enough
//! of them have accumulated, so a long run stops allocating new records.
//!
//! Handles are generational: recycling a slot bumps its generation, which
//! invalidates every handle issued for the previous occupant. Using a stale
//! handle is reported as a [`PoolError`], never silently resolved to the new
//! occupant.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use thiserror::Error;

use crate::card::attributes::CombatantAttributes;

/// Retired records required before the pool starts recycling.
///
/// At or below this count a spawn allocates a fresh slot.
pub const REUSE_THRESHOLD: usize = 2;

/// Errors from resolving an [`EnemyHandle`] against the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PoolError {
    /// The handle's slot has been recycled for a newer enemy.
    #[error("stale enemy handle {0}")]
    Stale(EnemyHandle),
    /// The handle is current but its record was already retired.
    #[error("enemy {0} already retired")]
    AlreadyRetired(EnemyHandle),
}

/// Handle to an enemy record inside the pool.
///
/// Copyable and cheap; the slot index plus the generation it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnemyHandle {
    index: u32,
    generation: u32,
}

impl fmt::Display for EnemyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Stat record for one enemy, owned by the pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyRecord {
    /// The enemy's combat stat block.
    pub attrs: CombatantAttributes,
    /// Display text for the enemy's buff, e.g. `"Guardian"` plus its effect.
    pub epithet: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Slot {
    record: EnemyRecord,
    generation: u32,
    active: bool,
}

/// Arena of enemy records with an oldest-first free list.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct EnemyPool {
    slots: Vec<Slot>,
    retired: VecDeque<EnemyHandle>,
}

impl EnemyPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total slots ever allocated, live and retired.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` when no slot has been allocated yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of retired records currently awaiting reuse.
    #[must_use]
    pub fn retired_len(&self) -> usize {
        self.retired.len()
    }

    /// Installs a freshly derived record, recycling the oldest retired slot
    /// when more than [`REUSE_THRESHOLD`] are waiting.
    ///
    /// Recycling fully replaces the slot's record and bumps its generation,
    /// so the previous occupant's handles go stale. The returned handle is
    /// valid until [`EnemyPool::retire`] is called for it.
    pub fn spawn(&mut self, record: EnemyRecord) -> EnemyHandle {
        if self.retired.len() > REUSE_THRESHOLD {
            // Oldest retiree first, matching the original shift-from-front.
            let old = self
                .retired
                .pop_front()
                .expect("retired queue checked non-empty");
            let slot = &mut self.slots[old.index as usize];
            slot.generation += 1;
            slot.record = record;
            slot.active = true;
            let handle = EnemyHandle {
                index: old.index,
                generation: slot.generation,
            };
            tracing::debug!(%handle, "recycled enemy slot");
            return handle;
        }

        let handle = EnemyHandle {
            index: u32::try_from(self.slots.len()).expect("pool slot count fits in u32"),
            generation: 0,
        };
        self.slots.push(Slot {
            record,
            generation: 0,
            active: true,
        });
        tracing::debug!(%handle, "allocated enemy slot");
        handle
    }

    /// Returns a defeated enemy's record to the free list.
    ///
    /// # Errors
    ///
    /// [`PoolError::Stale`] if the slot was recycled since the handle was
    /// issued, [`PoolError::AlreadyRetired`] on a double retire.
    pub fn retire(&mut self, handle: EnemyHandle) -> Result<(), PoolError> {
        let slot = self.slot_mut(handle)?;
        if !slot.active {
            return Err(PoolError::AlreadyRetired(handle));
        }
        slot.active = false;
        self.retired.push_back(handle);
        Ok(())
    }

    /// Resolves a handle to its live record.
    ///
    /// # Errors
    ///
    /// [`PoolError::Stale`] for a recycled slot, [`PoolError::AlreadyRetired`]
    /// for a record sitting in the free list.
    pub fn get(&self, handle: EnemyHandle) -> Result<&EnemyRecord, PoolError> {
        let slot = &self.slots[handle.index as usize];
        if slot.generation != handle.generation {
            return Err(PoolError::Stale(handle));
        }
        if !slot.active {
            return Err(PoolError::AlreadyRetired(handle));
        }
        Ok(&slot.record)
    }

    /// Resolves a handle to its live record, mutably.
    ///
    /// # Errors
    ///
    /// Same conditions as [`EnemyPool::get`].
    pub fn get_mut(&mut self, handle: EnemyHandle) -> Result<&mut EnemyRecord, PoolError> {
        let slot = self.slot_mut(handle)?;
        if !slot.active {
            return Err(PoolError::AlreadyRetired(handle));
        }
        Ok(&mut slot.record)
    }

    fn slot_mut(&mut self, handle: EnemyHandle) -> Result<&mut Slot, PoolError> {
        let slot = &mut self.slots[handle.index as usize];
        if slot.generation != handle.generation {
            return Err(PoolError::Stale(handle));
        }
        Ok(slot)
    }
}
