//! Mutable tree traversal.
//!
//! [`MutVisitor`] exposes empty `enter_*`/`exit_*` hooks per node kind;
//! implementations override the handful they care about and receive the
//! node by mutable reference. [`MutVisitable::accept_mut`] drives the walk:
//! enter the node, recurse into its children, exit the node. Replacing a
//! node wholesale from an `exit_*` hook is safe because its children have
//! already been visited.

use crate::ir::ast::{
    Block, ContractDefinition, Expression, FunctionDefinition, IdentifierPath,
    InheritanceSpecifier, ModifierDefinition, ModifierInvocation, Statement, TypeName,
    VariableDeclaration,
};

#[allow(unused_variables)]
pub trait MutVisitor {
    fn enter_contract_definition(&mut self, node: &mut ContractDefinition) {}
    fn exit_contract_definition(&mut self, node: &mut ContractDefinition) {}

    fn enter_inheritance_specifier(&mut self, node: &mut InheritanceSpecifier) {}
    fn exit_inheritance_specifier(&mut self, node: &mut InheritanceSpecifier) {}

    fn enter_function_definition(&mut self, node: &mut FunctionDefinition) {}
    fn exit_function_definition(&mut self, node: &mut FunctionDefinition) {}

    fn enter_variable_declaration(&mut self, node: &mut VariableDeclaration) {}
    fn exit_variable_declaration(&mut self, node: &mut VariableDeclaration) {}

    fn enter_modifier_definition(&mut self, node: &mut ModifierDefinition) {}
    fn exit_modifier_definition(&mut self, node: &mut ModifierDefinition) {}

    fn enter_modifier_invocation(&mut self, node: &mut ModifierInvocation) {}
    fn exit_modifier_invocation(&mut self, node: &mut ModifierInvocation) {}

    fn enter_block(&mut self, node: &mut Block) {}
    fn exit_block(&mut self, node: &mut Block) {}

    fn enter_statement(&mut self, node: &mut Statement) {}
    fn exit_statement(&mut self, node: &mut Statement) {}

    fn enter_expression(&mut self, node: &mut Expression) {}
    fn exit_expression(&mut self, node: &mut Expression) {}

    fn enter_identifier_path(&mut self, node: &mut IdentifierPath) {}
    fn exit_identifier_path(&mut self, node: &mut IdentifierPath) {}

    fn enter_type_name(&mut self, node: &mut TypeName) {}
    fn exit_type_name(&mut self, node: &mut TypeName) {}
}

pub trait MutVisitable {
    fn accept_mut<V: MutVisitor + ?Sized>(&mut self, visitor: &mut V);
}

impl MutVisitable for ContractDefinition {
    fn accept_mut<V: MutVisitor + ?Sized>(&mut self, visitor: &mut V) {
        visitor.enter_contract_definition(self);
        for specifier in &mut self.base_contracts {
            specifier.accept_mut(visitor);
        }
        for variable in &mut self.variables {
            variable.accept_mut(visitor);
        }
        for function in &mut self.functions {
            function.accept_mut(visitor);
        }
        for modifier in &mut self.modifiers {
            modifier.accept_mut(visitor);
        }
        visitor.exit_contract_definition(self);
    }
}

impl MutVisitable for InheritanceSpecifier {
    fn accept_mut<V: MutVisitor + ?Sized>(&mut self, visitor: &mut V) {
        visitor.enter_inheritance_specifier(self);
        self.base.accept_mut(visitor);
        if let Some(arguments) = &mut self.arguments {
            for argument in arguments {
                argument.accept_mut(visitor);
            }
        }
        visitor.exit_inheritance_specifier(self);
    }
}

impl MutVisitable for FunctionDefinition {
    fn accept_mut<V: MutVisitor + ?Sized>(&mut self, visitor: &mut V) {
        visitor.enter_function_definition(self);
        for parameter in &mut self.parameters {
            parameter.accept_mut(visitor);
        }
        for ret in &mut self.returns {
            ret.accept_mut(visitor);
        }
        for invocation in &mut self.modifiers {
            invocation.accept_mut(visitor);
        }
        if let Some(body) = &mut self.body {
            body.accept_mut(visitor);
        }
        visitor.exit_function_definition(self);
    }
}

impl MutVisitable for VariableDeclaration {
    fn accept_mut<V: MutVisitor + ?Sized>(&mut self, visitor: &mut V) {
        visitor.enter_variable_declaration(self);
        self.type_name.accept_mut(visitor);
        if let Some(value) = &mut self.value {
            value.accept_mut(visitor);
        }
        visitor.exit_variable_declaration(self);
    }
}

impl MutVisitable for ModifierDefinition {
    fn accept_mut<V: MutVisitor + ?Sized>(&mut self, visitor: &mut V) {
        visitor.enter_modifier_definition(self);
        for parameter in &mut self.parameters {
            parameter.accept_mut(visitor);
        }
        self.body.accept_mut(visitor);
        visitor.exit_modifier_definition(self);
    }
}

impl MutVisitable for ModifierInvocation {
    fn accept_mut<V: MutVisitor + ?Sized>(&mut self, visitor: &mut V) {
        visitor.enter_modifier_invocation(self);
        self.name.accept_mut(visitor);
        if let Some(arguments) = &mut self.arguments {
            for argument in arguments {
                argument.accept_mut(visitor);
            }
        }
        visitor.exit_modifier_invocation(self);
    }
}

impl MutVisitable for Block {
    fn accept_mut<V: MutVisitor + ?Sized>(&mut self, visitor: &mut V) {
        visitor.enter_block(self);
        for statement in &mut self.statements {
            statement.accept_mut(visitor);
        }
        visitor.exit_block(self);
    }
}

impl MutVisitable for Statement {
    fn accept_mut<V: MutVisitor + ?Sized>(&mut self, visitor: &mut V) {
        visitor.enter_statement(self);
        match self {
            Statement::Expression { expression, .. } => {
                expression.accept_mut(visitor);
            }
            Statement::Return { expression, .. } => {
                if let Some(expression) = expression {
                    expression.accept_mut(visitor);
                }
            }
            Statement::If {
                condition,
                true_body,
                false_body,
                ..
            } => {
                condition.accept_mut(visitor);
                true_body.accept_mut(visitor);
                if let Some(false_body) = false_body {
                    false_body.accept_mut(visitor);
                }
            }
            Statement::Placeholder { .. } => {}
        }
        visitor.exit_statement(self);
    }
}

impl MutVisitable for Expression {
    fn accept_mut<V: MutVisitor + ?Sized>(&mut self, visitor: &mut V) {
        visitor.enter_expression(self);
        match self {
            Expression::Literal { .. } | Expression::Identifier(_) => {}
            Expression::MemberAccess(access) => {
                access.expression.accept_mut(visitor);
            }
            Expression::FunctionCall {
                callee, arguments, ..
            } => {
                callee.accept_mut(visitor);
                for argument in arguments {
                    argument.accept_mut(visitor);
                }
            }
            Expression::Binary { left, right, .. } | Expression::Assignment { left, right, .. } => {
                left.accept_mut(visitor);
                right.accept_mut(visitor);
            }
        }
        visitor.exit_expression(self);
    }
}

impl MutVisitable for IdentifierPath {
    fn accept_mut<V: MutVisitor + ?Sized>(&mut self, visitor: &mut V) {
        visitor.enter_identifier_path(self);
        visitor.exit_identifier_path(self);
    }
}

impl MutVisitable for TypeName {
    fn accept_mut<V: MutVisitor + ?Sized>(&mut self, visitor: &mut V) {
        visitor.enter_type_name(self);
        if let TypeName::UserDefined { path, .. } = self {
            path.accept_mut(visitor);
        }
        visitor.exit_type_name(self);
    }
}
