//! Domains module containing business logic organized by bounded contexts.
//!
//! - **tools**: the developer utilities and the session state they share
//! - **resources**: read-only views over that session

pub mod resources;
pub mod tools;
