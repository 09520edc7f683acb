//! Tree transforms over the IR.

pub mod flatten;
