//! Gate network manager.
//!
//! All gates are created through a [`GraphBuilder`], which applies local
//! simplifications before allocating anything. A constructor returns a
//! [`Literal`]: either a freshly allocated gate, or a pre-existing literal
//! when the operation simplifies away.
//!
//! Gate identities are tied to creation order: the gate at position `i`
//! has identity `nvar + i + 1`, so children always refer to inputs or to
//! strictly older gates.
//!
//! # Examples
//!
//! ```
//! use ite_gates::builder::GraphBuilder;
//! use ite_gates::literal::Literal;
//! use ite_gates::types::Encoding;
//!
//! let mut builder = GraphBuilder::new(2, Encoding::Tseitin);
//! let x1 = Literal::from_var(1);
//! let x2 = Literal::from_var(2);
//!
//! // ite(x1, T, x2) simplifies to an OR gate.
//! let f = builder.make_ite(x1, Literal::TRUE, x2);
//! assert!(builder.is_gate(f));
//! assert_eq!(builder.gate(f).unwrap().to_string(), "OR3(1, 2)");
//!
//! // Nothing is allocated for trivial cases.
//! assert_eq!(builder.make_and([x1, Literal::TRUE]), x1);
//! assert_eq!(builder.num_gates(), 1);
//! ```

use std::fmt::Debug;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::gate::{Gate, GateKind};
use crate::literal::Literal;
use crate::types::Encoding;

pub struct GraphBuilder {
    nvar: u32,
    gates: Vec<Gate>,
    encoding: Encoding,
    root: Option<Literal>,
}

impl GraphBuilder {
    pub fn new(nvar: u32, encoding: Encoding) -> Self {
        Self::with_gates(nvar, Vec::new(), encoding)
    }

    pub(crate) fn with_gates(nvar: u32, gates: Vec<Gate>, encoding: Encoding) -> Self {
        debug_assert!(gates
            .iter()
            .enumerate()
            .all(|(i, g)| g.id() == nvar + i as u32 + 1));
        Self {
            nvar,
            gates,
            encoding,
            root: None,
        }
    }
}

impl Debug for GraphBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphBuilder")
            .field("nvar", &self.nvar)
            .field("gates", &self.gates.len())
            .field("size", &self.size())
            .field("encoding", &self.encoding)
            .finish()
    }
}

impl GraphBuilder {
    pub fn nvar(&self) -> u32 {
        self.nvar
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }

    /// Largest variable in use: inputs followed by gate identities.
    pub fn max_variable(&self) -> u32 {
        self.nvar + self.gates.len() as u32
    }

    /// Total size of the network (sum of `1 + arity` over all gates).
    pub fn size(&self) -> usize {
        self.gates.iter().map(Gate::size).sum()
    }

    /// The designated root.
    ///
    /// Unless set explicitly, this is the most recently created gate, or
    /// `TRUE` for an empty network.
    pub fn root(&self) -> Literal {
        match (self.root, self.gates.last()) {
            (Some(root), _) => root,
            (None, Some(gate)) => gate.literal(),
            (None, None) => Literal::TRUE,
        }
    }

    pub fn set_root(&mut self, root: Literal) {
        debug_assert!(!self.is_gate(root) || self.gate(root).is_some());
        self.root = Some(root);
    }

    /// Returns true iff `literal` refers to a gate (not an input or a constant).
    pub fn is_gate(&self, literal: Literal) -> bool {
        literal.var() > self.nvar && !literal.is_constant()
    }

    /// Gate referenced by `literal`, if any.
    pub fn gate(&self, literal: Literal) -> Option<&Gate> {
        if !self.is_gate(literal) {
            return None;
        }
        self.gates.get((literal.var() - self.nvar - 1) as usize)
    }

    /// Render a literal, showing the referenced gate in full.
    pub fn show_literal(&self, literal: Literal) -> String {
        let sign = if literal.is_negated() { "-" } else { "" };
        match self.gate(literal) {
            Some(gate) => format!("{}{}", sign, gate),
            None => literal.to_string(),
        }
    }

    pub fn show(&self) {
        for gate in &self.gates {
            info!("{}", gate);
        }
    }

    fn add_gate(&mut self, kind: GateKind, children: &[Literal]) -> Literal {
        let id = self.max_variable() + 1;
        let gate = Gate::from_parts(kind, id, children);
        debug!("add_gate: {}", gate);
        self.gates.push(gate);
        Literal::from_var(id)
    }
}

// Constructors
impl GraphBuilder {
    /// Conjunction of `children`.
    pub fn make_and(&mut self, children: impl IntoIterator<Item = Literal>) -> Literal {
        let mut list = Vec::new();
        for child in children {
            if child.is_false() {
                debug!("and(..,F,..) => F");
                return Literal::FALSE;
            }
            if !child.is_true() {
                list.push(child);
            }
        }
        match list.len() {
            0 => {
                debug!("and() => T");
                Literal::TRUE
            }
            1 => {
                debug!("and(A) => A");
                list[0]
            }
            _ => self.add_gate(GateKind::And, &list),
        }
    }

    /// Disjunction of `children`.
    pub fn make_or(&mut self, children: impl IntoIterator<Item = Literal>) -> Literal {
        let mut list = Vec::new();
        for child in children {
            if child.is_true() {
                debug!("or(..,T,..) => T");
                return Literal::TRUE;
            }
            if !child.is_false() {
                list.push(child);
            }
        }
        match list.len() {
            0 => {
                debug!("or() => F");
                Literal::FALSE
            }
            1 => {
                debug!("or(A) => A");
                list[0]
            }
            _ => self.add_gate(GateKind::Or, &list),
        }
    }

    /// If-then-else.
    ///
    /// In POG mode the rewrites of `ite(I,1,E)` and `ite(I,T,1)` into OR
    /// gates are suppressed: expansion of the ITE gate yields a sum of two
    /// mutually exclusive products, which a POG requires.
    pub fn make_ite(&mut self, i: Literal, t: Literal, e: Literal) -> Literal {
        debug!("make_ite(i = {}, t = {}, e = {})", i, t, e);
        let pog = self.encoding == Encoding::Pog;

        if t == e {
            debug!("ite(I,T,T) => T");
            return t;
        }
        if t.is_true() && e.is_false() {
            debug!("ite(I,1,0) => I");
            return i;
        }
        if t.is_false() && e.is_true() {
            debug!("ite(I,0,1) => ~I");
            return -i;
        }
        if !pog && t.is_true() {
            debug!("ite(I,1,E) => I ∨ E");
            return self.make_or([i, e]);
        }
        if t.is_false() {
            debug!("ite(I,0,E) => ~I ∧ E");
            return self.make_and([-i, e]);
        }
        if !pog && e.is_true() {
            debug!("ite(I,T,1) => ~I ∨ T");
            return self.make_or([-i, t]);
        }
        if e.is_false() {
            debug!("ite(I,T,0) => I ∧ T");
            return self.make_and([i, t]);
        }
        self.add_gate(GateKind::Ite, &[i, t, e])
    }

    /// If-then-output: `(i ∧ t) ∨ o`.
    pub fn make_ito(&mut self, i: Literal, t: Literal, o: Literal) -> Literal {
        debug!("make_ito(i = {}, t = {}, o = {})", i, t, o);

        if o.is_true() {
            debug!("ito(I,T,1) => 1");
            return Literal::TRUE;
        }
        if t == o {
            debug!("ito(I,T,T) => T");
            return t;
        }
        if t.is_true() && o.is_false() {
            debug!("ito(I,1,0) => I");
            return i;
        }
        if t.is_true() {
            debug!("ito(I,1,O) => I ∨ O");
            return self.make_or([i, o]);
        }
        if t.is_false() {
            debug!("ito(I,0,O) => O");
            return o;
        }
        if o.is_false() {
            debug!("ito(I,T,0) => I ∧ T");
            return self.make_and([i, t]);
        }
        self.add_gate(GateKind::Ito, &[i, t, o])
    }

    /// Kind-dispatching constructor over a child list.
    pub fn make_gate(&mut self, kind: GateKind, children: &[Literal]) -> Result<Literal> {
        if kind.is_ternary() && children.len() != 3 {
            return Err(Error::Arity {
                kind,
                count: children.len(),
            });
        }
        Ok(match kind {
            GateKind::And => self.make_and(children.iter().copied()),
            GateKind::Or => self.make_or(children.iter().copied()),
            GateKind::Ite => self.make_ite(children[0], children[1], children[2]),
            GateKind::Ito => self.make_ito(children[0], children[1], children[2]),
        })
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    const T: Literal = Literal::TRUE;
    const F: Literal = Literal::FALSE;

    fn x(v: u32) -> Literal {
        Literal::from_var(v)
    }

    #[test]
    fn test_empty() {
        let builder = GraphBuilder::new(3, Encoding::Plaisted);
        assert_eq!(builder.num_gates(), 0);
        assert_eq!(builder.root(), T);
        assert_eq!(builder.max_variable(), 3);
        assert_eq!(builder.size(), 0);
    }

    #[test]
    fn test_make_and() {
        let mut builder = GraphBuilder::new(3, Encoding::Tseitin);
        assert_eq!(builder.make_and([x(1), F, x(2)]), F);
        assert_eq!(builder.make_and([T, T]), T);
        assert_eq!(builder.make_and([]), T);
        assert_eq!(builder.make_and([T, -x(2)]), -x(2));
        assert_eq!(builder.num_gates(), 0);

        let g = builder.make_and([x(1), T, -x(3)]);
        assert_eq!(g, x(4));
        assert_eq!(builder.gate(g).unwrap().children(), &[x(1), -x(3)]);
        assert_eq!(builder.root(), x(4));
    }

    #[test]
    fn test_make_or() {
        let mut builder = GraphBuilder::new(3, Encoding::Tseitin);
        assert_eq!(builder.make_or([x(1), T]), T);
        assert_eq!(builder.make_or([F, F]), F);
        assert_eq!(builder.make_or([F, x(3)]), x(3));
        assert_eq!(builder.num_gates(), 0);

        let g = builder.make_or([x(1), x(2), F]);
        assert_eq!(builder.gate(g).unwrap().to_string(), "OR4(1, 2)");
    }

    #[test]
    fn test_make_ite_rules() {
        let mut builder = GraphBuilder::new(3, Encoding::Plaisted);
        assert_eq!(builder.make_ite(x(1), x(2), x(2)), x(2));
        assert_eq!(builder.make_ite(x(1), T, F), x(1));
        assert_eq!(builder.make_ite(x(1), F, T), -x(1));
        assert_eq!(builder.make_ite(x(1), F, F), F);
        assert_eq!(builder.num_gates(), 0);

        let g = builder.make_ite(x(1), T, x(2));
        assert_eq!(builder.gate(g).unwrap().to_string(), "OR4(1, 2)");
        let g = builder.make_ite(x(1), F, x(2));
        assert_eq!(builder.gate(g).unwrap().to_string(), "AND5(-1, 2)");
        let g = builder.make_ite(x(1), x(3), T);
        assert_eq!(builder.gate(g).unwrap().to_string(), "OR6(-1, 3)");
        let g = builder.make_ite(x(1), x(3), F);
        assert_eq!(builder.gate(g).unwrap().to_string(), "AND7(1, 3)");
        let g = builder.make_ite(x(1), x(2), -x(3));
        assert_eq!(builder.gate(g).unwrap().to_string(), "ITE8(1, 2, -3)");
    }

    #[test]
    fn test_make_ite_pog_keeps_ite() {
        let mut builder = GraphBuilder::new(3, Encoding::Pog);
        let g = builder.make_ite(x(1), T, x(2));
        assert_eq!(builder.gate(g).unwrap().to_string(), "ITE4(1, T, 2)");
        let g = builder.make_ite(x(1), x(3), T);
        assert_eq!(builder.gate(g).unwrap().to_string(), "ITE5(1, 3, T)");
        // Rewrites into AND are still applied.
        let g = builder.make_ite(x(1), x(3), F);
        assert_eq!(builder.gate(g).unwrap().to_string(), "AND6(1, 3)");
    }

    #[test]
    fn test_make_ito_rules() {
        let mut builder = GraphBuilder::new(3, Encoding::Tseitin);
        assert_eq!(builder.make_ito(x(1), x(2), T), T);
        assert_eq!(builder.make_ito(x(1), x(2), x(2)), x(2));
        assert_eq!(builder.make_ito(x(1), T, F), x(1));
        assert_eq!(builder.make_ito(x(1), F, x(3)), x(3));
        assert_eq!(builder.num_gates(), 0);

        let g = builder.make_ito(x(1), T, x(2));
        assert_eq!(builder.gate(g).unwrap().to_string(), "OR4(1, 2)");
        let g = builder.make_ito(x(1), x(2), F);
        assert_eq!(builder.gate(g).unwrap().to_string(), "AND5(1, 2)");
        let g = builder.make_ito(x(3), x(4), x(5));
        assert_eq!(builder.gate(g).unwrap().to_string(), "ITO6(3, 4, 5)");
    }

    #[test]
    fn test_make_gate_arity() {
        let mut builder = GraphBuilder::new(3, Encoding::Tseitin);
        assert!(matches!(
            builder.make_gate(GateKind::Ito, &[x(1), x(2)]),
            Err(Error::Arity {
                kind: GateKind::Ito,
                count: 2
            })
        ));
        assert!(matches!(
            builder.make_gate(GateKind::Ite, &[x(1), x(2), x(3), x(1)]),
            Err(Error::Arity { count: 4, .. })
        ));
        let g = builder.make_gate(GateKind::Ite, &[x(1), x(2), x(3)]).unwrap();
        assert_eq!(g, x(4));
        assert_eq!(builder.make_gate(GateKind::And, &[]).unwrap(), T);
    }

    #[test]
    fn test_is_gate() {
        let mut builder = GraphBuilder::new(2, Encoding::Tseitin);
        let g = builder.make_and([x(1), x(2)]);
        assert!(builder.is_gate(g));
        assert!(builder.is_gate(-g));
        assert!(!builder.is_gate(x(2)));
        assert!(!builder.is_gate(T));
        assert!(!builder.is_gate(F));
        assert_eq!(builder.show_literal(-g), "-AND3(1, 2)");
        assert_eq!(builder.show_literal(-x(1)), "-1");
    }

    #[test]
    fn test_explicit_root() {
        let mut builder = GraphBuilder::new(2, Encoding::Tseitin);
        let g = builder.make_and([x(1), x(2)]);
        builder.make_or([x(1), x(2)]);
        assert_eq!(builder.root(), x(4));
        builder.set_root(-g);
        assert_eq!(builder.root(), -g);
    }
}
