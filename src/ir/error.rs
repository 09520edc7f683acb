//! Fatal failures raised while flattening a compilation unit.
//!
//! Every variant aborts the whole run; there is no partial-output mode. The
//! driver surfaces these through `anyhow::Result` so a caller can downcast
//! and report which contract or function triggered the failure.

use thiserror::Error;

use crate::ir::node_id::NodeId;

#[derive(Error, Debug)]
pub enum IrError {
    /// The scheduler found no safe-to-process contract while some remain:
    /// the supplied linearization is cyclic or otherwise unserializable.
    #[error("malformed contract hierarchy: no most-derived contract among [{remaining}]")]
    MalformedHierarchy { remaining: String },

    /// A contract's own declarations contain more than one function with the
    /// same name at resolution time. The upstream uniqueness pass did not
    /// run or failed.
    #[error("contract '{contract}' declares {count} functions named '{name}'")]
    DuplicateFunction {
        contract: String,
        name: String,
        count: usize,
    },

    /// A function selected for promotion has no recorded private copy.
    /// Indicates a bug in the flattening sequence itself.
    #[error("no private copy recorded for '{name}' ({id}) while promoting into contract '{contract}'")]
    MissingSuperCopy {
        contract: String,
        name: String,
        id: NodeId,
    },

    /// Promoting an inherited constructor is a known feature gap.
    #[error("inheriting a constructor is not yet supported (contract '{contract}')")]
    UnsupportedConstructor { contract: String },

    /// The collected base-constructor arguments do not match the ancestor
    /// constructor's parameter count.
    #[error("constructor of '{base}' takes {expected} argument(s), but contract '{contract}' provides {found}")]
    ConstructorArity {
        base: String,
        contract: String,
        expected: usize,
        found: usize,
    },
}
