//! Contract AST node definitions.
//!
//! The front end hands this stage a [`SourceUnit`] whose contracts already
//! carry a correct, total `linearized_base_contracts` order. All nodes own
//! their children; reference nodes ([`Identifier`], [`IdentifierPath`],
//! [`MemberAccess`]) carry a weak back-reference to the declaration they
//! name via `referenced_declaration`.
//!
//! Constructors mint fresh ids through [`crate::ir::node_id::next_id`]; the
//! transform passes never reuse an id, even for semantically identical
//! clones.

use serde::Serialize;

use crate::ir::node_id::{next_id, NodeId};

// =============================================================================
// Declaration attributes
// =============================================================================

/// Function and variable visibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Visibility {
    Public,
    External,
    Internal,
    Private,
}

impl Visibility {
    /// Whether the declaration is callable from outside the contract and
    /// therefore part of its visible interface.
    pub fn is_externally_visible(&self) -> bool {
        matches!(self, Visibility::Public | Visibility::External)
    }
}

/// Function state mutability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Mutability {
    NonPayable,
    View,
    Pure,
    Payable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Lt,
}

// =============================================================================
// Unit and contract level
// =============================================================================

/// A whole compilation unit.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SourceUnit {
    pub id: NodeId,
    pub contracts: Vec<ContractDefinition>,
}

impl SourceUnit {
    pub fn new(contracts: Vec<ContractDefinition>) -> Self {
        Self {
            id: next_id(),
            contracts,
        }
    }

    pub fn contract(&self, id: NodeId) -> Option<&ContractDefinition> {
        self.contracts.iter().find(|c| c.id == id)
    }

    pub fn contract_mut(&mut self, id: NodeId) -> Option<&mut ContractDefinition> {
        self.contracts.iter_mut().find(|c| c.id == id)
    }

    pub fn contract_by_name(&self, name: &str) -> Option<&ContractDefinition> {
        self.contracts.iter().find(|c| c.name == name)
    }
}

/// A contract declaration with its inheritance bookkeeping.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContractDefinition {
    pub id: NodeId,
    pub name: String,
    /// Base contracts as written at the declaration site, nearest first,
    /// with any inline constructor arguments.
    pub base_contracts: Vec<InheritanceSpecifier>,
    /// Full transitively resolved ancestor order: self first, then most
    /// derived to most base. Computed upstream; read-only ground truth here.
    pub linearized_base_contracts: Vec<NodeId>,
    pub functions: Vec<FunctionDefinition>,
    pub variables: Vec<VariableDeclaration>,
    pub modifiers: Vec<ModifierDefinition>,
}

impl ContractDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        let id = next_id();
        Self {
            id,
            name: name.into(),
            base_contracts: Vec::new(),
            linearized_base_contracts: vec![id],
            functions: Vec::new(),
            variables: Vec::new(),
            modifiers: Vec::new(),
        }
    }

    /// The ancestor ids, nearest first: the tail of the linearized order.
    pub fn base_ids(&self) -> &[NodeId] {
        self.linearized_base_contracts.get(1..).unwrap_or(&[])
    }

    pub fn constructor(&self) -> Option<&FunctionDefinition> {
        self.functions.iter().find(|f| f.is_constructor)
    }
}

/// One `is Base(args...)` entry of a contract header.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InheritanceSpecifier {
    pub id: NodeId,
    pub base: IdentifierPath,
    /// `None` when the base is named without parentheses; `Some(vec![])`
    /// when an empty argument list is written explicitly. The constructor
    /// linearizer treats only the latter as an argument site.
    pub arguments: Option<Vec<Expression>>,
}

impl InheritanceSpecifier {
    pub fn new(base: IdentifierPath, arguments: Option<Vec<Expression>>) -> Self {
        Self {
            id: next_id(),
            base,
            arguments,
        }
    }
}

// =============================================================================
// Contract members
// =============================================================================

/// A function, including constructors (`is_constructor`).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FunctionDefinition {
    pub id: NodeId,
    /// Empty for modern unnamed constructors; legacy constructors carry the
    /// contract name.
    pub name: String,
    pub visibility: Visibility,
    pub mutability: Mutability,
    pub is_constructor: bool,
    pub parameters: Vec<VariableDeclaration>,
    pub returns: Vec<VariableDeclaration>,
    pub modifiers: Vec<ModifierInvocation>,
    pub body: Option<Block>,
    /// Id of the owning contract.
    pub scope: NodeId,
}

impl FunctionDefinition {
    pub fn new(
        name: impl Into<String>,
        visibility: Visibility,
        mutability: Mutability,
        scope: NodeId,
    ) -> Self {
        Self {
            id: next_id(),
            name: name.into(),
            visibility,
            mutability,
            is_constructor: false,
            parameters: Vec::new(),
            returns: Vec::new(),
            modifiers: Vec::new(),
            body: None,
            scope,
        }
    }
}

/// A state variable, parameter, or return slot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VariableDeclaration {
    pub id: NodeId,
    pub name: String,
    pub type_name: TypeName,
    /// Initializer, for state variables declared with a value.
    pub value: Option<Expression>,
    pub scope: NodeId,
}

impl VariableDeclaration {
    pub fn new(name: impl Into<String>, type_name: TypeName, scope: NodeId) -> Self {
        Self {
            id: next_id(),
            name: name.into(),
            type_name,
            value: None,
            scope,
        }
    }
}

/// A named precondition/postcondition wrapper attachable to functions.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModifierDefinition {
    pub id: NodeId,
    pub name: String,
    pub parameters: Vec<VariableDeclaration>,
    pub body: Block,
    pub scope: NodeId,
}

impl ModifierDefinition {
    pub fn new(name: impl Into<String>, body: Block, scope: NodeId) -> Self {
        Self {
            id: next_id(),
            name: name.into(),
            parameters: Vec::new(),
            body,
            scope,
        }
    }
}

/// A modifier attached to a function header. The path names either a
/// modifier definition or, on constructors, a base contract whose
/// constructor is invoked explicitly.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModifierInvocation {
    pub id: NodeId,
    pub name: IdentifierPath,
    /// Same convention as [`InheritanceSpecifier::arguments`].
    pub arguments: Option<Vec<Expression>>,
}

impl ModifierInvocation {
    pub fn new(name: IdentifierPath, arguments: Option<Vec<Expression>>) -> Self {
        Self {
            id: next_id(),
            name,
            arguments,
        }
    }
}

// =============================================================================
// Statements
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Block {
    pub id: NodeId,
    pub statements: Vec<Statement>,
}

impl Block {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self {
            id: next_id(),
            statements,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Statement {
    /// Expression evaluated for effect.
    Expression { id: NodeId, expression: Expression },
    Return {
        id: NodeId,
        expression: Option<Expression>,
    },
    If {
        id: NodeId,
        condition: Expression,
        true_body: Block,
        false_body: Option<Block>,
    },
    /// The `_` marker inside a modifier body.
    Placeholder { id: NodeId },
}

// =============================================================================
// Expressions and references
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Expression {
    /// Literal constant, stored as written.
    Literal { id: NodeId, value: String },
    Identifier(Identifier),
    MemberAccess(MemberAccess),
    FunctionCall {
        id: NodeId,
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },
    Binary {
        id: NodeId,
        operator: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Assignment {
        id: NodeId,
        left: Box<Expression>,
        right: Box<Expression>,
    },
}

/// A plain name reference.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Identifier {
    pub id: NodeId,
    pub name: String,
    /// Id of the declaration this name resolves to; `None` for builtins.
    pub referenced_declaration: Option<NodeId>,
}

impl Identifier {
    pub fn new(name: impl Into<String>, referenced_declaration: Option<NodeId>) -> Self {
        Self {
            id: next_id(),
            name: name.into(),
            referenced_declaration,
        }
    }
}

/// A `scope.member` access. When the scope is a base contract name, the
/// flattener replaces the whole node with a plain [`Identifier`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MemberAccess {
    pub id: NodeId,
    pub expression: Box<Expression>,
    pub member_name: String,
    pub referenced_declaration: Option<NodeId>,
}

impl MemberAccess {
    pub fn new(
        expression: Expression,
        member_name: impl Into<String>,
        referenced_declaration: Option<NodeId>,
    ) -> Self {
        Self {
            id: next_id(),
            expression: Box::new(expression),
            member_name: member_name.into(),
            referenced_declaration,
        }
    }
}

/// A possibly qualified name outside expression position (type names,
/// modifier invocations, inheritance specifiers).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IdentifierPath {
    pub id: NodeId,
    pub name: String,
    pub referenced_declaration: Option<NodeId>,
}

impl IdentifierPath {
    pub fn new(name: impl Into<String>, referenced_declaration: Option<NodeId>) -> Self {
        Self {
            id: next_id(),
            name: name.into(),
            referenced_declaration,
        }
    }
}

// =============================================================================
// Types
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum TypeName {
    /// Built-in value type (`uint256`, `bool`, `address`, ...).
    Elementary { id: NodeId, name: String },
    /// Reference to a user declaration (contract, struct).
    UserDefined { id: NodeId, path: IdentifierPath },
}

impl TypeName {
    pub fn elementary(name: impl Into<String>) -> Self {
        TypeName::Elementary {
            id: next_id(),
            name: name.into(),
        }
    }
}
