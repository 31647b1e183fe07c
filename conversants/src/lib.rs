//! # Conversants
//!
//! The participant side of a conversation: who is talking, and what the world
//! currently answers when a dialogue guard asks a question about it.
//! This crate contains no traversal logic; `dialogue_core` drives sessions
//! and only reaches back here through [`PredicateEvaluator`].

pub mod entities;
pub mod predicates;
pub mod world_state;

pub use entities::*;
pub use predicates::*;
pub use world_state::*;
