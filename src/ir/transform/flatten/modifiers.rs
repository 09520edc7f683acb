//! Inherited modifier materialization.
//!
//! Walks the linearization nearest base first and clones every modifier
//! whose name is not already taken, so the most derived declaration of a
//! name is the one that ends up local.

use anyhow::Result;
use indexmap::IndexSet;

use crate::ir::ast::{ContractDefinition, ModifierDefinition, SourceUnit};

use super::{cloning, lookup_contract, RemapTable, RemapTarget};

pub(super) fn stage_inherited_modifiers(
    unit: &SourceUnit,
    contract: &ContractDefinition,
    remap: &mut RemapTable,
) -> Result<Vec<ModifierDefinition>> {
    let mut seen: IndexSet<String> = contract.modifiers.iter().map(|m| m.name.clone()).collect();

    let mut staged = Vec::new();
    for base_id in contract.base_ids() {
        let base = lookup_contract(unit, *base_id, contract)?;
        for modifier in &base.modifiers {
            if seen.contains(&modifier.name) {
                // Shadowed by the contract or a nearer base; references to
                // the shadowed declaration are left alone.
                continue;
            }
            let mut copy = cloning::fresh_modifier(modifier);
            copy.scope = contract.id;
            seen.insert(modifier.name.clone());
            remap.insert(
                modifier.id,
                RemapTarget {
                    id: copy.id,
                    name: copy.name.clone(),
                },
            );
            staged.push(copy);
        }
    }
    Ok(staged)
}
