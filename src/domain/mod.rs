//! Domain layer: pure conversation logic with no I/O.
//!
//! Everything in this module is synchronous and deterministic. The only
//! collaborator the domain knows about is the text-generation port, and even
//! that is consumed one layer up, in `application`.

pub mod dialogue;
pub mod extraction;
pub mod foundation;
pub mod rules;
pub mod slots;
