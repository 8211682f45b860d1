use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::error::{Error, Result};
use crate::literal::{clean_clause, Literal};
use crate::types::Encoding;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GateKind {
    And,
    Or,
    /// If-then-else: `(i ∧ t) ∨ (¬i ∧ e)`.
    Ite,
    /// If-then-output: `(i ∧ t) ∨ o`, used where `o` implies `t`.
    Ito,
}

impl GateKind {
    pub fn is_ternary(self) -> bool {
        matches!(self, GateKind::Ite | GateKind::Ito)
    }
}

impl Display for GateKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GateKind::And => "AND",
            GateKind::Or => "OR",
            GateKind::Ite => "ITE",
            GateKind::Ito => "ITO",
        };
        write!(f, "{}", name)
    }
}

/// One operator node of a gate network.
///
/// The identity of a gate doubles as its variable in the clause encoding.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Gate {
    kind: GateKind,
    id: u32,
    children: Box<[Literal]>,
}

// Constructors
impl Gate {
    pub fn new(kind: GateKind, id: u32, children: &[Literal]) -> Result<Gate> {
        let count = children.len();
        let valid = if kind.is_ternary() { count == 3 } else { count >= 1 };
        if !valid {
            return Err(Error::Arity { kind, count });
        }
        Ok(Gate {
            kind,
            id,
            children: children.into(),
        })
    }

    pub(crate) fn from_parts(kind: GateKind, id: u32, children: &[Literal]) -> Gate {
        debug_assert!(if kind.is_ternary() {
            children.len() == 3
        } else {
            !children.is_empty()
        });
        Gate {
            kind,
            id,
            children: children.into(),
        }
    }

    pub fn and(id: u32, children: &[Literal]) -> Result<Gate> {
        Gate::new(GateKind::And, id, children)
    }

    pub fn or(id: u32, children: &[Literal]) -> Result<Gate> {
        Gate::new(GateKind::Or, id, children)
    }

    pub fn ite(id: u32, i: Literal, t: Literal, e: Literal) -> Gate {
        Gate {
            kind: GateKind::Ite,
            id,
            children: Box::new([i, t, e]),
        }
    }

    pub fn ito(id: u32, i: Literal, t: Literal, o: Literal) -> Gate {
        Gate {
            kind: GateKind::Ito,
            id,
            children: Box::new([i, t, o]),
        }
    }
}

// Getters
impl Gate {
    pub fn kind(&self) -> GateKind {
        self.kind
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn literal(&self) -> Literal {
        Literal::from_var(self.id)
    }

    pub fn children(&self) -> &[Literal] {
        &self.children
    }

    /// Size measured as 1 + arity.
    pub fn size(&self) -> usize {
        1 + self.children.len()
    }

    fn ternary(&self) -> (Literal, Literal, Literal) {
        (self.children[0], self.children[1], self.children[2])
    }
}

impl Gate {
    /// Copy of the gate with its identity and child magnitudes rewritten
    /// through `map`. Magnitudes absent from the map are kept; signs are
    /// preserved.
    pub fn remap(&self, map: &HashMap<u32, u32>) -> Gate {
        let id = map.get(&self.id).copied().unwrap_or(self.id);
        let children = self
            .children
            .iter()
            .map(|&child| match map.get(&child.var()) {
                Some(&var) => child.with_var(var),
                None => child,
            })
            .collect();
        Gate {
            kind: self.kind,
            id,
            children,
        }
    }

    /// Clauses defining this gate under the given encoding.
    ///
    /// Clauses containing `TRUE` are dropped and `FALSE` literals are removed.
    pub fn clausify(&self, encoding: Encoding) -> Result<Vec<Vec<Literal>>> {
        let g = self.literal();
        let both = encoding.is_bidirectional();
        let mut clauses: Vec<Vec<Literal>> = Vec::new();
        match self.kind {
            GateKind::And => {
                for &c in self.children.iter() {
                    clauses.push(vec![c, -g]);
                }
                if both {
                    clauses.push(self.children.iter().map(|&c| -c).chain([g]).collect());
                }
            }
            GateKind::Or => {
                clauses.push(self.children.iter().copied().chain([-g]).collect());
                if both {
                    for &c in self.children.iter() {
                        clauses.push(vec![-c, g]);
                    }
                }
            }
            GateKind::Ite => {
                let (i, t, e) = self.ternary();
                clauses.push(vec![-i, t, -g]);
                clauses.push(vec![i, e, -g]);
                if both {
                    clauses.push(vec![-i, -t, g]);
                    clauses.push(vec![i, -e, g]);
                }
            }
            GateKind::Ito => {
                if encoding == Encoding::Pog {
                    return Err(Error::EncodingUnsupported(format!(
                        "can't do POG encoding of {}",
                        self
                    )));
                }
                let (i, t, o) = self.ternary();
                clauses.push(vec![t, -g]);
                clauses.push(vec![i, o, -g]);
                if encoding == Encoding::Tseitin {
                    clauses.push(vec![-i, -t, g]);
                    clauses.push(vec![-o, g]);
                }
            }
        }
        Ok(clauses.into_iter().filter_map(clean_clause).collect())
    }
}

impl Display for Gate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}({})",
            self.kind,
            self.id,
            self.children.iter().format(", ")
        )
    }
}
