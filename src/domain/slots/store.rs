//! Ordered slot collection with validator-gated, first-write-wins assignment.

use tracing::{debug, info, warn};

use crate::domain::foundation::CompletionRate;

use super::{Slot, SlotId};

/// Ordered collection of slots for one conversation.
///
/// Declaration order is priority order: [`next_missing`](SlotStore::next_missing)
/// returns the first required, unfilled slot. Assignment is first-write-wins:
/// a later extraction never overwrites an earlier value, so a second, possibly
/// worse, match cannot clobber a good one. This is a deliberate product
/// decision, not an oversight.
#[derive(Debug, Clone)]
pub struct SlotStore {
    slots: Vec<Slot>,
}

impl SlotStore {
    /// Creates a store from an ordered slot list.
    pub fn new(slots: Vec<Slot>) -> Self {
        Self { slots }
    }

    /// Attempts to assign a value to a slot.
    ///
    /// Returns true only if the slot exists, is currently unset, and the
    /// value passes the slot's validator. Returns false with no side effect
    /// otherwise; the caller keeps asking for the same slot.
    pub fn set(&mut self, slot_id: &SlotId, value: &str) -> bool {
        let Some(slot) = self.slots.iter_mut().find(|slot| &slot.id == slot_id) else {
            warn!(slot = %slot_id, "attempted to set unknown slot");
            return false;
        };
        if slot.is_filled() {
            debug!(slot = %slot_id, "slot already filled, keeping first value");
            return false;
        }
        if !slot.validator.validate(value) {
            warn!(slot = %slot_id, "slot value failed validation");
            return false;
        }
        slot.value = Some(value.to_string());
        info!(slot = %slot_id, "slot filled");
        true
    }

    /// Returns the value of a slot, if filled.
    pub fn get(&self, slot_id: &SlotId) -> Option<&str> {
        self.slots
            .iter()
            .find(|slot| &slot.id == slot_id)
            .and_then(|slot| slot.value.as_deref())
    }

    /// Returns the slot definition, if present.
    pub fn slot(&self, slot_id: &SlotId) -> Option<&Slot> {
        self.slots.iter().find(|slot| &slot.id == slot_id)
    }

    /// Fraction of required slots currently filled.
    pub fn completion_rate(&self) -> CompletionRate {
        let required: Vec<_> = self.slots.iter().filter(|slot| slot.required).collect();
        let filled = required.iter().filter(|slot| slot.is_filled()).count();
        CompletionRate::ratio(filled, required.len())
    }

    /// The first required slot with no value, in declaration order.
    pub fn next_missing(&self) -> Option<&SlotId> {
        self.slots
            .iter()
            .find(|slot| slot.required && !slot.is_filled())
            .map(|slot| &slot.id)
    }

    /// All required slots with no value, in declaration order.
    pub fn missing(&self) -> Vec<SlotId> {
        self.slots
            .iter()
            .filter(|slot| slot.required && !slot.is_filled())
            .map(|slot| slot.id.clone())
            .collect()
    }

    /// All filled slots as (id, value) pairs, in declaration order.
    pub fn filled(&self) -> Vec<(&SlotId, &str)> {
        self.slots
            .iter()
            .filter_map(|slot| slot.value.as_deref().map(|value| (&slot.id, value)))
            .collect()
    }

    /// Clears every slot value.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.value = None;
        }
        info!("slot store reset");
    }

    /// Iterates over the slot definitions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    /// Number of slots in the store.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the store has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
