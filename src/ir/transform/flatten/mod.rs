//! Contract inheritance flattening.
//!
//! Rewrites every contract so that it no longer depends on its ancestors:
//! inherited functions, state variables, modifiers, and constructor chains
//! all become local members, and references into the old bases are
//! redirected to the local copies.
//!
//! The work is split across submodules:
//! - `functions`: private copies of ancestor functions plus delegating
//!   wrappers for the inherited external interface
//! - `storage`: ancestor state variables merged ahead of the contract's own
//! - `modifiers`: unshadowed ancestor modifiers
//! - `constructors`: the base constructor call chain
//! - `references`: the final redirection pass
//! - `cloning`: fresh-identity deep copies shared by the above
//!
//! Contracts are processed most-derived first, so every flattener reads its
//! ancestors in their original, untouched form.

mod cloning;
mod constructors;
mod functions;
mod modifiers;
mod references;
mod storage;

use anyhow::{anyhow, Result};
use indexmap::{IndexMap, IndexSet};
use log::debug;

use crate::ir::ast::{ContractDefinition, SourceUnit};
use crate::ir::error::IrError;
use crate::ir::node_id::NodeId;

/// Where a redirected reference should land: the id and name of the local
/// clone standing in for an inherited declaration.
#[derive(Clone, Debug)]
pub(super) struct RemapTarget {
    pub(super) id: NodeId,
    pub(super) name: String,
}

/// Per-contract mapping from an ancestor declaration's id to its local
/// clone. Built up by the flatteners, consumed once by the reference pass,
/// then dropped.
pub(super) type RemapTable = IndexMap<NodeId, RemapTarget>;

/// Flatten every contract in the unit, in place.
///
/// Contracts are scheduled so that a contract is only flattened once every
/// contract deriving from it has been. A hierarchy where no such order
/// exists (a cycle, or linearizations that disagree) aborts the run.
pub fn flatten(unit: &mut SourceUnit) -> Result<()> {
    let mut pending: IndexSet<NodeId> = unit.contracts.iter().map(|c| c.id).collect();

    while !pending.is_empty() {
        let ready = ready_contracts(unit, &pending);
        if ready.is_empty() {
            let remaining = pending
                .iter()
                .filter_map(|id| unit.contract(*id))
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(IrError::MalformedHierarchy { remaining }.into());
        }
        for id in ready {
            flatten_contract(unit, id)?;
            pending.shift_remove(&id);
        }
    }
    Ok(())
}

/// Contracts in `pending` that no other pending contract lists as an
/// ancestor. Nothing left in the unit will read them as a base, so their
/// own member lists are free to change.
fn ready_contracts(unit: &SourceUnit, pending: &IndexSet<NodeId>) -> Vec<NodeId> {
    pending
        .iter()
        .copied()
        .filter(|id| {
            !pending.iter().copied().any(|other| {
                other != *id
                    && unit
                        .contract(other)
                        .map(|c| c.base_ids().contains(id))
                        .unwrap_or(false)
            })
        })
        .collect()
}

fn flatten_contract(unit: &mut SourceUnit, contract_id: NodeId) -> Result<()> {
    let mut remap = RemapTable::new();

    // Stage every addition against the untouched tree before mutating the
    // contract itself.
    let (functions, variables, modifiers, chain) = {
        let contract = unit
            .contract(contract_id)
            .ok_or_else(|| anyhow!("contract {} missing from source unit", contract_id))?;
        debug!(
            "flattening contract '{}' ({}), {} base(s)",
            contract.name,
            contract.id,
            contract.base_ids().len()
        );
        let functions = functions::stage_inherited_functions(unit, contract, &mut remap)?;
        let variables = storage::stage_inherited_variables(unit, contract, &mut remap)?;
        let modifiers = modifiers::stage_inherited_modifiers(unit, contract, &mut remap)?;
        let chain = constructors::stage_constructor_chain(unit, contract, &mut remap)?;
        (functions, variables, modifiers, chain)
    };

    let contract = unit
        .contract_mut(contract_id)
        .ok_or_else(|| anyhow!("contract {} missing from source unit", contract_id))?;

    // Inherited storage sits ahead of the contract's own variables so slot
    // order runs base to derived.
    let mut flattened_variables = variables;
    flattened_variables.append(&mut contract.variables);
    contract.variables = flattened_variables;

    contract.functions.extend(functions);
    contract.modifiers.extend(modifiers);
    constructors::apply_constructor_chain(contract, chain);

    references::update_referenced_declarations(contract, &remap);
    Ok(())
}

/// Resolve an id taken from a linearized base list. The linearization is
/// upstream ground truth; a miss means the unit is corrupt.
fn lookup_contract<'a>(
    unit: &'a SourceUnit,
    id: NodeId,
    dependent: &ContractDefinition,
) -> Result<&'a ContractDefinition> {
    unit.contract(id).ok_or_else(|| {
        anyhow!(
            "contract {} in the linearization of '{}' is missing from the unit",
            id,
            dependent.name
        )
    })
}
