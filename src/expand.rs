use std::collections::HashMap;

use log::debug;

use crate::builder::GraphBuilder;
use crate::error::{Error, Result};
use crate::gate::GateKind;
use crate::literal::Literal;

/// Map a literal through the identity map built during expansion.
fn remap_literal(lit: Literal, map: &HashMap<u32, Literal>) -> Literal {
    match map.get(&lit.var()) {
        Some(&target) if lit.is_negated() => -target,
        Some(&target) => target,
        None => lit,
    }
}

impl GraphBuilder {
    /// Returns a new builder in which every ITE and ITO gate has been
    /// rewritten into AND/OR gates:
    ///
    /// ```text
    /// ITE(i,t,e) => OR(AND(i,t), AND(~i,e))
    /// ITO(i,t,o) => OR(AND(i,t), o)
    /// ```
    ///
    /// With `ite_only` set, encountering an ITO gate is an error.
    pub fn expand(&self, ite_only: bool) -> Result<GraphBuilder> {
        let mut expanded = GraphBuilder::new(self.nvar(), self.encoding());
        let mut map: HashMap<u32, Literal> = HashMap::new();

        for gate in self.gates() {
            let children: Vec<Literal> = gate
                .children()
                .iter()
                .map(|&c| remap_literal(c, &map))
                .collect();
            let lit = match gate.kind() {
                GateKind::And => expanded.make_and(children),
                GateKind::Or => expanded.make_or(children),
                GateKind::Ite => {
                    let (i, t, e) = (children[0], children[1], children[2]);
                    let it = expanded.make_and([i, t]);
                    let ie = expanded.make_and([-i, e]);
                    expanded.make_or([it, ie])
                }
                GateKind::Ito => {
                    if ite_only {
                        return Err(Error::UnsupportedExpansion(format!(
                            "expansion of ITO node {} disabled",
                            gate
                        )));
                    }
                    let (i, t, o) = (children[0], children[1], children[2]);
                    let it = expanded.make_and([i, t]);
                    expanded.make_or([it, o])
                }
            };
            map.insert(gate.id(), lit);
        }

        let root = self.root();
        let new_root = if self.is_gate(root) {
            remap_literal(root, &map)
        } else {
            root
        };
        expanded.set_root(new_root);
        debug!(
            "expand: {} -> {} gates, root {} -> {}",
            self.num_gates(),
            expanded.num_gates(),
            root,
            new_root
        );
        Ok(expanded)
    }
}
