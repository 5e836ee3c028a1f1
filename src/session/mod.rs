//! Edit sessions.
//!
//! A session composes the traversal and visitor drivers with an arranger
//! pipeline over one grid adapter: visitors decide *what* to mutate, the
//! pipeline decides *in what order and how* the mutations reach the grid.
//! One session is driven by a single logical thread end to end.

pub mod config;
pub mod edit;

pub use config::SessionConfig;
pub use edit::EditSession;
