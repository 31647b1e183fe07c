//! Dialogue module - the authored conversation graph.
//!
//! A dialogue consists of:
//! - **Nodes**: single beats with a speaker, text, entry/exit actions and a guard
//! - **Conditions**: OR-of-AND predicate expressions guarding each node
//! - **Graph**: the node arena plus its id index and editing operations

mod condition;
mod graph;
mod node;

pub use condition::*;
pub use graph::*;
pub use node::*;
