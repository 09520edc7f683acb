//! Reference integrity checking.
//!
//! After flattening, every reference in a unit must point at a declaration
//! that still exists somewhere in the tree. This pass collects the ids of
//! all declarations, then walks every reference site and reports the ones
//! whose target is gone. It also returns the set of declaration ids that
//! are actually referenced, which callers can use to spot unused clones.

use indexmap::IndexSet;

use crate::ir::ast::{
    Block, ContractDefinition, Expression, FunctionDefinition, IdentifierPath, SourceUnit,
    Statement, TypeName, VariableDeclaration,
};
use crate::ir::node_id::NodeId;

/// A reference whose target id exists nowhere in the unit.
#[derive(Clone, Debug)]
pub struct DanglingReference {
    /// Name at the reference site
    pub name: String,
    /// Declaration id the site points at
    pub target: NodeId,
}

/// Outcome of checking a unit.
#[derive(Clone, Debug, Default)]
pub struct ReferenceCheckResult {
    /// Dangling references found
    pub errors: Vec<DanglingReference>,
    /// Every declaration id some reference points at
    pub used_declarations: IndexSet<NodeId>,
}

impl ReferenceCheckResult {
    fn record(&mut self, name: &str, target: Option<NodeId>, declared: &IndexSet<NodeId>) {
        let target = match target {
            Some(t) => t,
            // Builtins resolve to no declaration.
            None => return,
        };
        self.used_declarations.insert(target);
        if !declared.contains(&target) {
            self.errors.push(DanglingReference {
                name: name.to_string(),
                target,
            });
        }
    }
}

/// Check every reference in the unit against the set of declared ids.
pub fn check_unit_references(unit: &SourceUnit) -> ReferenceCheckResult {
    let declared = collect_declaration_ids(unit);
    let mut result = ReferenceCheckResult::default();
    for contract in &unit.contracts {
        check_contract(contract, &declared, &mut result);
    }
    result
}

/// Ids of every declaration in the unit: contracts, functions, modifiers,
/// and variables whether state, parameter, or return slot.
pub fn collect_declaration_ids(unit: &SourceUnit) -> IndexSet<NodeId> {
    let mut declared = IndexSet::new();
    for contract in &unit.contracts {
        declared.insert(contract.id);
        for variable in &contract.variables {
            declared.insert(variable.id);
        }
        for function in &contract.functions {
            declared.insert(function.id);
            for parameter in &function.parameters {
                declared.insert(parameter.id);
            }
            for slot in &function.returns {
                declared.insert(slot.id);
            }
        }
        for modifier in &contract.modifiers {
            declared.insert(modifier.id);
            for parameter in &modifier.parameters {
                declared.insert(parameter.id);
            }
        }
    }
    declared
}

fn check_contract(
    contract: &ContractDefinition,
    declared: &IndexSet<NodeId>,
    result: &mut ReferenceCheckResult,
) {
    for specifier in &contract.base_contracts {
        check_path(&specifier.base, declared, result);
        if let Some(arguments) = &specifier.arguments {
            for argument in arguments {
                check_expression(argument, declared, result);
            }
        }
    }
    for variable in &contract.variables {
        check_variable(variable, declared, result);
    }
    for function in &contract.functions {
        check_function(function, declared, result);
    }
    for modifier in &contract.modifiers {
        for parameter in &modifier.parameters {
            check_variable(parameter, declared, result);
        }
        check_block(&modifier.body, declared, result);
    }
}

fn check_function(
    function: &FunctionDefinition,
    declared: &IndexSet<NodeId>,
    result: &mut ReferenceCheckResult,
) {
    for parameter in &function.parameters {
        check_variable(parameter, declared, result);
    }
    for slot in &function.returns {
        check_variable(slot, declared, result);
    }
    for invocation in &function.modifiers {
        check_path(&invocation.name, declared, result);
        if let Some(arguments) = &invocation.arguments {
            for argument in arguments {
                check_expression(argument, declared, result);
            }
        }
    }
    if let Some(body) = &function.body {
        check_block(body, declared, result);
    }
}

fn check_variable(
    variable: &VariableDeclaration,
    declared: &IndexSet<NodeId>,
    result: &mut ReferenceCheckResult,
) {
    if let TypeName::UserDefined { path, .. } = &variable.type_name {
        check_path(path, declared, result);
    }
    if let Some(value) = &variable.value {
        check_expression(value, declared, result);
    }
}

fn check_block(block: &Block, declared: &IndexSet<NodeId>, result: &mut ReferenceCheckResult) {
    for statement in &block.statements {
        check_statement(statement, declared, result);
    }
}

fn check_statement(
    statement: &Statement,
    declared: &IndexSet<NodeId>,
    result: &mut ReferenceCheckResult,
) {
    match statement {
        Statement::Expression { expression, .. } => check_expression(expression, declared, result),
        Statement::Return { expression, .. } => {
            if let Some(expression) = expression {
                check_expression(expression, declared, result);
            }
        }
        Statement::If {
            condition,
            true_body,
            false_body,
            ..
        } => {
            check_expression(condition, declared, result);
            check_block(true_body, declared, result);
            if let Some(false_body) = false_body {
                check_block(false_body, declared, result);
            }
        }
        Statement::Placeholder { .. } => {}
    }
}

fn check_expression(
    expression: &Expression,
    declared: &IndexSet<NodeId>,
    result: &mut ReferenceCheckResult,
) {
    match expression {
        Expression::Literal { .. } => {}
        Expression::Identifier(identifier) => result.record(
            &identifier.name,
            identifier.referenced_declaration,
            declared,
        ),
        Expression::MemberAccess(access) => {
            result.record(&access.member_name, access.referenced_declaration, declared);
            check_expression(&access.expression, declared, result);
        }
        Expression::FunctionCall {
            callee, arguments, ..
        } => {
            check_expression(callee, declared, result);
            for argument in arguments {
                check_expression(argument, declared, result);
            }
        }
        Expression::Binary { left, right, .. } | Expression::Assignment { left, right, .. } => {
            check_expression(left, declared, result);
            check_expression(right, declared, result);
        }
    }
}

fn check_path(path: &IdentifierPath, declared: &IndexSet<NodeId>, result: &mut ReferenceCheckResult) {
    result.record(&path.name, path.referenced_declaration, declared);
}
