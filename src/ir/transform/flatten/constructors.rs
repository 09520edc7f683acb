//! Base constructor linearization.
//!
//! Two phases per contract. Collection scans the whole linearization, most
//! derived contract first, for the argument lists handed to each ancestor
//! constructor, either as a modifier-style invocation on a constructor or
//! as parenthesized arguments on an inheritance specifier. Synthesis then
//! walks the ancestors farthest first, clones each constructor into a
//! private function, and prepends the matching calls to the contract's own
//! constructor body so ancestor state initializes before derived state.

use anyhow::Result;
use indexmap::IndexMap;
use log::debug;

use crate::ir::ast::{
    Block, ContractDefinition, Expression, FunctionDefinition, Identifier, Mutability, SourceUnit,
    Statement, Visibility,
};
use crate::ir::error::IrError;
use crate::ir::node_id::{next_id, NodeId};

use super::{cloning, lookup_contract, RemapTable};

/// Private copies of ancestor constructors plus the calls that must run
/// ahead of the contract's own constructor statements.
pub(super) struct ConstructorChain {
    functions: Vec<FunctionDefinition>,
    calls: Vec<Statement>,
}

pub(super) fn stage_constructor_chain(
    unit: &SourceUnit,
    contract: &ContractDefinition,
    remap: &mut RemapTable,
) -> Result<ConstructorChain> {
    let collected = collect_constructor_arguments(unit, contract)?;

    let mut functions = Vec::new();
    let mut calls = Vec::new();
    // Farthest ancestor initializes first.
    for base_id in contract.base_ids().iter().rev() {
        let base = lookup_contract(unit, *base_id, contract)?;
        let ctor = match base.constructor() {
            Some(c) => c,
            None => continue,
        };

        let arguments: &[Expression] = collected.get(base_id).copied().unwrap_or(&[]);
        if arguments.len() != ctor.parameters.len() {
            return Err(IrError::ConstructorArity {
                base: base.name.clone(),
                contract: contract.name.clone(),
                expected: ctor.parameters.len(),
                found: arguments.len(),
            }
            .into());
        }

        let (mut copy, mut declarations) = cloning::fresh_function(ctor);
        copy.name = format!("__constructor_{}", base.id);
        copy.is_constructor = false;
        copy.visibility = Visibility::Private;
        copy.scope = contract.id;
        // The synthesized chain replaces explicit base constructor
        // invocations; keeping them would initialize the base twice.
        copy.modifiers.retain(|invocation| {
            invocation
                .name
                .referenced_declaration
                .map(|id| unit.contract(id).is_none())
                .unwrap_or(true)
        });
        if let Some(entry) = declarations.get_mut(&ctor.id) {
            entry.name = copy.name.clone();
        }
        // Collected argument expressions may reference the constructor's
        // parameters, so the whole declaration map goes into the remap.
        for (old, target) in declarations {
            remap.insert(old, target);
        }

        let call = Expression::FunctionCall {
            id: next_id(),
            callee: Box::new(Expression::Identifier(Identifier::new(
                copy.name.clone(),
                Some(copy.id),
            ))),
            arguments: arguments.iter().map(cloning::fresh_expression).collect(),
        };
        calls.push(Statement::Expression {
            id: next_id(),
            expression: call,
        });
        debug!(
            "chained constructor of '{}' into contract '{}'",
            base.name, contract.name
        );
        functions.push(copy);
    }

    Ok(ConstructorChain { functions, calls })
}

/// Argument expressions per ancestor constructor.
///
/// Constructor-site invocations always record. A specifier site only
/// participates when it carries parentheses, and only displaces an entry
/// whose argument list is no longer than its own.
fn collect_constructor_arguments<'a>(
    unit: &'a SourceUnit,
    contract: &'a ContractDefinition,
) -> Result<IndexMap<NodeId, &'a [Expression]>> {
    let mut collected: IndexMap<NodeId, &'a [Expression]> = IndexMap::new();

    for contract_id in &contract.linearized_base_contracts {
        let current = lookup_contract(unit, *contract_id, contract)?;

        if let Some(ctor) = current.constructor() {
            for invocation in &ctor.modifiers {
                let target = match invocation.name.referenced_declaration {
                    Some(id) if unit.contract(id).is_some() => id,
                    // A plain modifier, not a base constructor call.
                    _ => continue,
                };
                let arguments = invocation.arguments.as_deref().unwrap_or(&[]);
                collected.insert(target, arguments);
            }
        }

        for specifier in &current.base_contracts {
            let target = match specifier.base.referenced_declaration {
                Some(id) => id,
                None => continue,
            };
            let arguments = match specifier.arguments.as_deref() {
                // No parentheses: the specifier names a base without
                // passing anything.
                None => continue,
                Some(list) => list,
            };
            match collected.get(&target) {
                Some(existing) if existing.len() > arguments.len() => {}
                _ => {
                    collected.insert(target, arguments);
                }
            }
        }
    }
    Ok(collected)
}

/// Attach the chain to the contract: the private copies join the function
/// list and the calls run ahead of the contract's own constructor body,
/// synthesizing an empty constructor when the contract has none.
pub(super) fn apply_constructor_chain(contract: &mut ContractDefinition, chain: ConstructorChain) {
    let ConstructorChain {
        functions,
        mut calls,
    } = chain;
    contract.functions.extend(functions);
    if calls.is_empty() {
        return;
    }

    let contract_id = contract.id;
    if !contract.functions.iter().any(|f| f.is_constructor) {
        let mut ctor =
            FunctionDefinition::new("", Visibility::Public, Mutability::NonPayable, contract_id);
        ctor.is_constructor = true;
        ctor.body = Some(Block::new(Vec::new()));
        contract.functions.push(ctor);
    }
    if let Some(ctor) = contract.functions.iter_mut().find(|f| f.is_constructor) {
        let body = ctor.body.get_or_insert_with(|| Block::new(Vec::new()));
        calls.append(&mut body.statements);
        body.statements = calls;
    }
}
