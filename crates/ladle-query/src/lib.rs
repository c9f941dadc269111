//! Query construction and row assembly for the Ladle recipe graph.
//!
//! The two pure halves of the data-access layer:
//!
//! - [`cypher`] builds one parameterized traversal query per repository
//!   operation.
//! - [`assemble`] reconstructs nested domain values from the flattened rows
//!   the engine returns.
//!
//! Neither half performs I/O; both are deterministic over their inputs.
//! The connection that actually executes a [`Query`] lives in
//! `ladle-storage`.

pub mod assemble;
pub mod cypher;
pub mod value;

pub use assemble::AssembleError;
pub use cypher::Query;
pub use value::{Row, Value};
