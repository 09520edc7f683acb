//! Intermediate representation of a contract-language compilation unit.
//!
//! The IR is a mutable ownership tree produced by the front end: a
//! [`ast::SourceUnit`] owning contract definitions, which own their
//! functions, state variables, and modifiers. Reference nodes (identifiers,
//! identifier paths, member accesses) point back at declarations by id
//! rather than by ownership, so the tree can be rewritten without breaking
//! the graph of references.
//!
//! # Submodules
//! - `ast`: node definitions, constructors, and lookup accessors
//! - `node_id`: the process-wide node id counter
//! - `error`: fatal error kinds raised by the transform passes
//! - `visitor`: mutable tree traversal
//! - `analysis`: read-only checks over a unit
//! - `transform`: the inheritance flattening pass

pub mod analysis;
pub mod ast;
pub mod error;
pub mod node_id;
pub mod transform;
pub mod visitor;
