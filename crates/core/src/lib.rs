//! Sleep tracker domain logic.
//!
//! Entities, write-time validation, rolling statistics, and the goal
//! progress engine. Nothing in this crate performs I/O; callers load
//! snapshots from storage and pass them in.

pub mod error;
pub mod goal;
pub mod recommendation;
pub mod sleep;
pub mod types;
