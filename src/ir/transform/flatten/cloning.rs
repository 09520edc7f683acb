//! Fresh-identity deep copies.
//!
//! A cloned subtree never reuses an id: every node is re-minted, and
//! references inside the copy that pointed at declarations cloned along
//! with it are rebound to the new ids. References to the cloned root
//! itself stay on the original id on purpose: the caller renames the root
//! and records it in the contract's remap table, which then fixes the id
//! and the name together.

use indexmap::IndexMap;

use crate::ir::ast::{
    Block, Expression, FunctionDefinition, IdentifierPath, ModifierDefinition, ModifierInvocation,
    Statement, TypeName, VariableDeclaration,
};
use crate::ir::node_id::{next_id, NodeId};
use crate::ir::visitor::{MutVisitable, MutVisitor};

use super::RemapTarget;

/// Re-mints every id in a subtree, recording old to new for declaration
/// nodes. Variable scopes pointing at a declaration re-minted earlier in
/// the same walk (a parameter's owning function, say) follow along.
#[derive(Default)]
struct IdRefresher {
    declarations: IndexMap<NodeId, RemapTarget>,
}

impl MutVisitor for IdRefresher {
    fn enter_function_definition(&mut self, node: &mut FunctionDefinition) {
        let old = node.id;
        node.id = next_id();
        self.declarations.insert(
            old,
            RemapTarget {
                id: node.id,
                name: node.name.clone(),
            },
        );
    }

    fn enter_variable_declaration(&mut self, node: &mut VariableDeclaration) {
        let old = node.id;
        node.id = next_id();
        self.declarations.insert(
            old,
            RemapTarget {
                id: node.id,
                name: node.name.clone(),
            },
        );
        if let Some(owner) = self.declarations.get(&node.scope) {
            node.scope = owner.id;
        }
    }

    fn enter_modifier_definition(&mut self, node: &mut ModifierDefinition) {
        let old = node.id;
        node.id = next_id();
        self.declarations.insert(
            old,
            RemapTarget {
                id: node.id,
                name: node.name.clone(),
            },
        );
    }

    fn enter_modifier_invocation(&mut self, node: &mut ModifierInvocation) {
        node.id = next_id();
    }

    fn enter_block(&mut self, node: &mut Block) {
        node.id = next_id();
    }

    fn enter_statement(&mut self, node: &mut Statement) {
        match node {
            Statement::Expression { id, .. }
            | Statement::Return { id, .. }
            | Statement::If { id, .. }
            | Statement::Placeholder { id } => *id = next_id(),
        }
    }

    fn enter_expression(&mut self, node: &mut Expression) {
        match node {
            Expression::Literal { id, .. }
            | Expression::FunctionCall { id, .. }
            | Expression::Binary { id, .. }
            | Expression::Assignment { id, .. } => *id = next_id(),
            Expression::Identifier(identifier) => identifier.id = next_id(),
            Expression::MemberAccess(access) => access.id = next_id(),
        }
    }

    fn enter_identifier_path(&mut self, node: &mut IdentifierPath) {
        node.id = next_id();
    }

    fn enter_type_name(&mut self, node: &mut TypeName) {
        match node {
            TypeName::Elementary { id, .. } | TypeName::UserDefined { id, .. } => *id = next_id(),
        }
    }
}

/// Rebinds references whose target was cloned within the same subtree.
/// Ids only; the names did not change.
struct IdRebinder<'a> {
    declarations: &'a IndexMap<NodeId, RemapTarget>,
}

impl IdRebinder<'_> {
    fn rebind(&self, referenced: &mut Option<NodeId>) {
        if let Some(target) = referenced.as_ref().and_then(|id| self.declarations.get(id)) {
            *referenced = Some(target.id);
        }
    }
}

impl MutVisitor for IdRebinder<'_> {
    fn exit_expression(&mut self, node: &mut Expression) {
        match node {
            Expression::Identifier(identifier) => {
                self.rebind(&mut identifier.referenced_declaration)
            }
            Expression::MemberAccess(access) => self.rebind(&mut access.referenced_declaration),
            _ => {}
        }
    }

    fn exit_identifier_path(&mut self, node: &mut IdentifierPath) {
        self.rebind(&mut node.referenced_declaration);
    }
}

fn refresh<T: MutVisitable>(node: &mut T, root: NodeId) -> IndexMap<NodeId, RemapTarget> {
    let mut refresher = IdRefresher::default();
    node.accept_mut(&mut refresher);

    // Rebind everything except references to the root, which the caller
    // remaps at contract level after renaming the copy.
    let mut intra = refresher.declarations.clone();
    intra.shift_remove(&root);
    node.accept_mut(&mut IdRebinder {
        declarations: &intra,
    });

    refresher.declarations
}

/// Deep-copy a function with fresh ids. Also returns the old-to-new map of
/// every declaration in the subtree, the function itself included.
pub(super) fn fresh_function(
    function: &FunctionDefinition,
) -> (FunctionDefinition, IndexMap<NodeId, RemapTarget>) {
    let mut copy = function.clone();
    let declarations = refresh(&mut copy, function.id);
    (copy, declarations)
}

/// Deep-copy a variable declaration with fresh ids.
pub(super) fn fresh_variable(variable: &VariableDeclaration) -> VariableDeclaration {
    let mut copy = variable.clone();
    refresh(&mut copy, variable.id);
    copy
}

/// Deep-copy a modifier definition with fresh ids.
pub(super) fn fresh_modifier(modifier: &ModifierDefinition) -> ModifierDefinition {
    let mut copy = modifier.clone();
    refresh(&mut copy, modifier.id);
    copy
}

/// Deep-copy an expression with fresh ids. Expressions declare nothing, so
/// there is no rebinding to do.
pub(super) fn fresh_expression(expression: &Expression) -> Expression {
    let mut copy = expression.clone();
    copy.accept_mut(&mut IdRefresher::default());
    copy
}
