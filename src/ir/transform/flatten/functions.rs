//! Inherited function materialization.
//!
//! Every ancestor function becomes a private local copy renamed by base
//! position, so overloads from different bases cannot collide. On top of
//! that, every name in the contract's inherited external interface that the
//! contract does not declare itself gets a delegating wrapper under the
//! original name, forwarding to whichever private copy the override rules
//! select.

use anyhow::{anyhow, Result};
use indexmap::IndexSet;
use log::debug;

use crate::ir::ast::{
    Block, ContractDefinition, Expression, FunctionDefinition, Identifier, SourceUnit, Statement,
    Visibility,
};
use crate::ir::error::IrError;
use crate::ir::node_id::next_id;

use super::{cloning, lookup_contract, RemapTable, RemapTarget};

pub(super) fn stage_inherited_functions(
    unit: &SourceUnit,
    contract: &ContractDefinition,
    remap: &mut RemapTable,
) -> Result<Vec<FunctionDefinition>> {
    let mut staged = stage_super_copies(unit, contract, remap)?;

    let mut interface = IndexSet::new();
    squash_interface(unit, contract, &mut interface)?;

    for name in &interface {
        let resolved = resolve_function_name(unit, contract, name)?;
        if resolved.scope == contract.id {
            // The contract's own declaration already serves the name.
            continue;
        }
        if resolved.is_constructor {
            return Err(IrError::UnsupportedConstructor {
                contract: contract.name.clone(),
            }
            .into());
        }
        let target = remap.get(&resolved.id).ok_or_else(|| IrError::MissingSuperCopy {
            contract: contract.name.clone(),
            name: name.clone(),
            id: resolved.id,
        })?;
        staged.push(delegate_to_copy(contract, resolved, target));
        debug!("promoted '{}' into contract '{}'", name, contract.name);
    }
    Ok(staged)
}

/// One private clone per ancestor function, renamed `<name>_s<n>` where `n`
/// is the one-based position of the declaring base in the linearization.
fn stage_super_copies(
    unit: &SourceUnit,
    contract: &ContractDefinition,
    remap: &mut RemapTable,
) -> Result<Vec<FunctionDefinition>> {
    let mut staged = Vec::new();
    for (position, base_id) in contract.base_ids().iter().enumerate() {
        let base = lookup_contract(unit, *base_id, contract)?;
        for function in &base.functions {
            if function.is_constructor {
                continue;
            }
            let (mut copy, _) = cloning::fresh_function(function);
            copy.name = format!("{}_s{}", function.name, position + 1);
            copy.visibility = Visibility::Private;
            copy.scope = contract.id;
            remap.insert(
                function.id,
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

/// The externally callable surface of the contract: its own public and
/// external non-constructor names plus, recursively, the nearest base's.
/// The nearest base's interface already covers every farther ancestor.
fn squash_interface(
    unit: &SourceUnit,
    contract: &ContractDefinition,
    names: &mut IndexSet<String>,
) -> Result<()> {
    for function in &contract.functions {
        if !function.is_constructor && function.visibility.is_externally_visible() {
            names.insert(function.name.clone());
        }
    }
    if let Some(nearest) = contract.base_ids().first() {
        let base = lookup_contract(unit, *nearest, contract)?;
        squash_interface(unit, base, names)?;
    }
    Ok(())
}

/// Most-derived override wins: a single match among the contract's own
/// functions ends the search, otherwise the nearest base is consulted.
/// More than one match in a single contract is an overload the renaming
/// scheme cannot distinguish.
fn resolve_function_name<'a>(
    unit: &'a SourceUnit,
    contract: &'a ContractDefinition,
    name: &str,
) -> Result<&'a FunctionDefinition> {
    let mut matches = contract.functions.iter().filter(|f| f.name == name);
    match (matches.next(), matches.next()) {
        (Some(function), None) => Ok(function),
        (Some(_), Some(_)) => {
            let count = contract.functions.iter().filter(|f| f.name == name).count();
            Err(IrError::DuplicateFunction {
                contract: contract.name.clone(),
                name: name.to_string(),
                count,
            }
            .into())
        }
        (None, _) => {
            let nearest = contract.base_ids().first().ok_or_else(|| {
                anyhow!(
                    "function '{}' reached '{}' without a declaration anywhere in the chain",
                    name,
                    contract.name
                )
            })?;
            let base = lookup_contract(unit, *nearest, contract)?;
            resolve_function_name(unit, base, name)
        }
    }
}

/// A wrapper under the inherited name and visibility whose whole body is
/// `return <copy>(<parameters>);`.
fn delegate_to_copy(
    contract: &ContractDefinition,
    resolved: &FunctionDefinition,
    target: &RemapTarget,
) -> FunctionDefinition {
    let mut delegate = FunctionDefinition::new(
        resolved.name.clone(),
        resolved.visibility,
        resolved.mutability,
        contract.id,
    );
    delegate.parameters = resolved
        .parameters
        .iter()
        .map(cloning::fresh_variable)
        .collect();
    delegate.returns = resolved.returns.iter().map(cloning::fresh_variable).collect();
    for slot in delegate.parameters.iter_mut().chain(delegate.returns.iter_mut()) {
        slot.scope = delegate.id;
    }

    let arguments = delegate
        .parameters
        .iter()
        .map(|parameter| {
            Expression::Identifier(Identifier::new(parameter.name.clone(), Some(parameter.id)))
        })
        .collect();
    let call = Expression::FunctionCall {
        id: next_id(),
        callee: Box::new(Expression::Identifier(Identifier::new(
            target.name.clone(),
            Some(target.id),
        ))),
        arguments,
    };
    delegate.body = Some(Block::new(vec![Statement::Return {
        id: next_id(),
        expression: Some(call),
    }]));
    delegate
}
