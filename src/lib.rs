//! Sales Dialogue - Japanese telesales conversation engine
//!
//! This crate implements the dialogue orchestration and slot-extraction core
//! of a voice/text sales-call assistant: pattern-based entity extraction from
//! Japanese utterances, validator-gated slot filling, and two slot-driven
//! dialogue policies (a multi-state qualification funnel for chat and a
//! permission-then-collect machine for phone calls).

pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
