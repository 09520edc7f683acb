//! Reference redirection after flattening.
//!
//! Identifiers and identifier paths that point at a remapped declaration
//! take the clone's id and name in place. A member access that reached an
//! inherited declaration through a qualifying scope is replaced wholesale
//! by a plain identifier, since the copy now lives in the contract itself.
//! References with no remap entry are left untouched.

use crate::ir::ast::{ContractDefinition, Expression, Identifier, IdentifierPath};
use crate::ir::visitor::{MutVisitable, MutVisitor};

use super::RemapTable;

struct ReferenceUpdater<'a> {
    remap: &'a RemapTable,
}

impl MutVisitor for ReferenceUpdater<'_> {
    fn exit_expression(&mut self, node: &mut Expression) {
        match node {
            Expression::Identifier(identifier) => {
                if let Some(target) = identifier
                    .referenced_declaration
                    .as_ref()
                    .and_then(|id| self.remap.get(id))
                {
                    identifier.referenced_declaration = Some(target.id);
                    identifier.name = target.name.clone();
                }
            }
            Expression::MemberAccess(access) => {
                let target = access
                    .referenced_declaration
                    .as_ref()
                    .and_then(|id| self.remap.get(id))
                    .cloned();
                if let Some(target) = target {
                    *node = Expression::Identifier(Identifier::new(target.name, Some(target.id)));
                }
            }
            _ => {}
        }
    }

    fn exit_identifier_path(&mut self, node: &mut IdentifierPath) {
        if let Some(target) = node
            .referenced_declaration
            .as_ref()
            .and_then(|id| self.remap.get(id))
        {
            node.referenced_declaration = Some(target.id);
            node.name = target.name.clone();
        }
    }
}

/// Walk the whole contract and redirect every remapped reference.
pub(super) fn update_referenced_declarations(contract: &mut ContractDefinition, remap: &RemapTable) {
    contract.accept_mut(&mut ReferenceUpdater { remap });
}
