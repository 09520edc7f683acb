//! Read-only analyses over a source unit.

pub mod reference_checker;
