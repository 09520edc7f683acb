//! Inherited storage materialization.
//!
//! Ancestor state variables are merged by name and cloned ahead of the
//! contract's own declarations, so slot order runs base to derived and a
//! redeclaration nearer the contract keeps the slot of its farthest
//! appearance.

use anyhow::Result;
use indexmap::{IndexMap, IndexSet};
use log::debug;

use crate::ir::ast::{ContractDefinition, SourceUnit, VariableDeclaration};

use super::{cloning, lookup_contract, RemapTable, RemapTarget};

pub(super) fn stage_inherited_variables(
    unit: &SourceUnit,
    contract: &ContractDefinition,
    remap: &mut RemapTable,
) -> Result<Vec<VariableDeclaration>> {
    let own: IndexSet<&str> = contract.variables.iter().map(|v| v.name.as_str()).collect();

    // Insertion keeps the position of the first appearance while the value
    // follows the nearest declaration, which is exactly the slot rule.
    let mut merged: IndexMap<&str, &VariableDeclaration> = IndexMap::new();
    for base_id in contract.base_ids().iter().rev() {
        let base = lookup_contract(unit, *base_id, contract)?;
        for variable in &base.variables {
            if own.contains(variable.name.as_str()) {
                continue;
            }
            merged.insert(variable.name.as_str(), variable);
        }
    }

    let mut staged = Vec::with_capacity(merged.len());
    for variable in merged.values() {
        let mut copy = cloning::fresh_variable(variable);
        copy.scope = contract.id;
        remap.insert(
            variable.id,
            RemapTarget {
                id: copy.id,
                name: copy.name.clone(),
            },
        );
        debug!(
            "pulled state variable '{}' into contract '{}'",
            copy.name, contract.name
        );
        staged.push(copy);
    }
    Ok(staged)
}
