//! Typed slots and the validator-gated slot store.

mod catalog;
mod slot;
mod store;

pub use catalog::{contact_form, qualification_form};
pub use slot::{Slot, SlotId, SlotValidator};
pub use store::SlotStore;
