use std::collections::HashMap;

use log::debug;

use crate::bitset::BitSet;
use crate::builder::GraphBuilder;
use crate::literal::Literal;

impl GraphBuilder {
    /// Positions of all gates reachable from `root`.
    pub fn reachable(&self, root: Literal) -> BitSet {
        let mut marks = BitSet::new(self.num_gates());
        let mut stack = vec![root];
        while let Some(lit) = stack.pop() {
            if !self.is_gate(lit) {
                continue;
            }
            let pos = (lit.var() - self.nvar() - 1) as usize;
            if marks.insert(pos) {
                // Children are strictly older gates or inputs.
                stack.extend(self.gates()[pos].children().iter().rev());
            }
        }
        marks
    }

    /// Returns a new builder holding only the gates reachable from the root,
    /// renumbered contiguously from `nvar + 1` in their original order.
    pub fn prune(&self) -> GraphBuilder {
        let root = self.root();
        let marks = self.reachable(root);

        let map: HashMap<u32, u32> = marks
            .iter()
            .enumerate()
            .map(|(new_pos, old_pos)| {
                (
                    self.nvar() + old_pos as u32 + 1,
                    self.nvar() + new_pos as u32 + 1,
                )
            })
            .collect();
        let gates = marks.iter().map(|pos| self.gates()[pos].remap(&map)).collect();

        let mut pruned = GraphBuilder::with_gates(self.nvar(), gates, self.encoding());
        let new_root = match map.get(&root.var()) {
            Some(&var) if self.is_gate(root) => root.with_var(var),
            _ => root,
        };
        pruned.set_root(new_root);
        debug!(
            "prune: {} -> {} gates, root {} -> {}",
            self.num_gates(),
            pruned.num_gates(),
            root,
            new_root
        );
        pruned
    }
}
