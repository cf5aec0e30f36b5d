//! Core types shared across matcha facilities
//!
//! This crate provides foundational types used by both the matching engine
//! and the assertion glue:
//!
//! - **Schema constants**: Canonical field keys and event names for structured logging
//! - **Operation names**: Stable `op` values emitted by the engine

pub mod schema;

pub use schema::Op;
