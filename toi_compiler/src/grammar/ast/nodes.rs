//! AST node definitions for boolean formulas
//!
//! The tree is closed: four node variants and four binary operators. Every
//! node owns its children, and rendering is fully parenthesized so the
//! rendered text parses back to an equal tree.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Binary set operators (EBNF: '+' | '*' | '-' | '\')
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    Union,
    Intersection,
    Difference,
    SymmetricDifference,
}

impl BinaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Union => "+",
            Self::Intersection => "*",
            Self::Difference => "-",
            Self::SymmetricDifference => "\\",
        }
    }

    /// Apply the operator to two already evaluated operands
    pub fn apply(&self, left: bool, right: bool) -> bool {
        match self {
            Self::Union => left || right,
            Self::Intersection => left && right,
            Self::Difference => left && !right,
            Self::SymmetricDifference => left ^ right,
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Formula expression tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Node {
    Identifier(String),
    Const(bool),
    Negation(Box<Node>),
    Binary(BinaryOperator, Box<Node>, Box<Node>),
}

impl Node {
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    pub fn negation(operand: Node) -> Self {
        Self::Negation(Box::new(operand))
    }

    pub fn binary(operator: BinaryOperator, left: Node, right: Node) -> Self {
        Self::Binary(operator, Box::new(left), Box::new(right))
    }

    /// Names of every identifier the formula references
    pub fn variables(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables<'a>(&'a self, names: &mut BTreeSet<&'a str>) {
        match self {
            Self::Identifier(name) => {
                names.insert(name.as_str());
            }
            Self::Const(_) => {}
            Self::Negation(operand) => operand.collect_variables(names),
            Self::Binary(_, left, right) => {
                left.collect_variables(names);
                right.collect_variables(names);
            }
        }
    }

    /// Height of the tree; leaves have depth 1
    pub fn depth(&self) -> usize {
        match self {
            Self::Identifier(_) | Self::Const(_) => 1,
            Self::Negation(operand) => 1 + operand.depth(),
            Self::Binary(_, left, right) => 1 + left.depth().max(right.depth()),
        }
    }

    /// Number of nodes in the tree
    pub fn node_count(&self) -> usize {
        match self {
            Self::Identifier(_) | Self::Const(_) => 1,
            Self::Negation(operand) => 1 + operand.node_count(),
            Self::Binary(_, left, right) => 1 + left.node_count() + right.node_count(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(name) => f.write_str(name),
            Self::Const(value) => f.write_str(if *value { "1" } else { "0" }),
            Self::Negation(operand) => write!(f, "!{}", operand),
            Self::Binary(operator, left, right) => {
                write!(f, "({} {} {})", left, operator, right)
            }
        }
    }
}
