//! # Dialogue Core
//!
//! A branching-dialogue engine. Conversations are authored as a graph of
//! nodes (who speaks, what is said, which actions fire on entry and exit,
//! and a guard condition), and a per-player session walks that graph one
//! beat at a time.
//!
//! ## Core Components
//!
//! - **dialogue**: Nodes, guard conditions and the graph that owns them
//! - **session**: The conversation state machine and action dispatch
//! - **events**: Change notification fan-out for presentation layers
//! - **config** / **persist**: TOML settings and JSON dialogue assets
//!
//! ## Design Philosophy
//!
//! - **Pull-Driven UI**: Observers are told *that* something changed and re-query the session
//! - **Single-Threaded**: Every session call runs to completion; there is no internal locking
//! - **Injected Collaborators**: Predicates, triggers and randomness are supplied by the host

pub mod config;
pub mod dialogue;
pub mod error;
pub mod events;
pub mod persist;
pub mod random;
pub mod session;

pub use config::*;
pub use dialogue::*;
pub use error::*;
pub use events::*;
pub use persist::*;
pub use random::*;
pub use session::*;
