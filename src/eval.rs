use crate::builder::GraphBuilder;
use crate::gate::GateKind;
use crate::literal::Literal;

impl GraphBuilder {
    /// Evaluates the root under the given input assignment.
    ///
    /// `inputs[v - 1]` is the value of input variable `v`.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `nvar` input values are given.
    pub fn evaluate(&self, inputs: &[bool]) -> bool {
        self.evaluate_literal(self.root(), inputs)
    }

    /// Evaluates an arbitrary literal of this network.
    pub fn evaluate_literal(&self, literal: Literal, inputs: &[bool]) -> bool {
        assert!(
            inputs.len() >= self.nvar() as usize,
            "Expected {} input values, got {}",
            self.nvar(),
            inputs.len()
        );

        // Gates only refer to older gates, so a single forward pass suffices.
        let mut values: Vec<bool> = Vec::with_capacity(self.num_gates());
        let value_of = |lit: Literal, values: &[bool]| -> bool {
            let v = if lit.is_constant() {
                true
            } else if lit.var() <= self.nvar() {
                inputs[(lit.var() - 1) as usize]
            } else {
                values[(lit.var() - self.nvar() - 1) as usize]
            };
            v != lit.is_negated()
        };

        let needed = if self.is_gate(literal) {
            (literal.var() - self.nvar()) as usize
        } else {
            0
        };
        for gate in &self.gates()[..needed] {
            let c = gate.children();
            let value = match gate.kind() {
                GateKind::And => c.iter().all(|&l| value_of(l, &values)),
                GateKind::Or => c.iter().any(|&l| value_of(l, &values)),
                GateKind::Ite => {
                    if value_of(c[0], &values) {
                        value_of(c[1], &values)
                    } else {
                        value_of(c[2], &values)
                    }
                }
                GateKind::Ito => {
                    (value_of(c[0], &values) && value_of(c[1], &values))
                        || value_of(c[2], &values)
                }
            };
            values.push(value);
        }
        value_of(literal, &values)
    }
}
