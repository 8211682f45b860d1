//! Serialization of a gate network into clauses or a POG.

use itertools::Itertools;
use log::debug;

use crate::builder::GraphBuilder;
use crate::error::{Error, Result};
use crate::gate::{Gate, GateKind};
use crate::literal::clean_clause;
use crate::types::Encoding;
use crate::writer::{ClauseSink, GraphSink};

/// Options controlling what goes into generated files besides the encoding
/// itself.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// At level 2 and above, explanatory comments are emitted.
    pub verbosity: u32,
    /// Free-form description written as a comment.
    pub description: Option<String>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            verbosity: 1,
            description: None,
        }
    }
}

impl CompileOptions {
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl GraphBuilder {
    /// Writes the clauses of the network: a unit clause asserting the root,
    /// followed by the clauses of every gate in creation order.
    ///
    /// Returns the variable and clause counts reported by the sink.
    pub fn generate_cnf(
        &self,
        sink: &mut impl ClauseSink,
        options: &CompileOptions,
    ) -> Result<(u32, usize)> {
        let verbose = options.verbosity >= 2;
        sink.announce_max_variable(self.max_variable())?;
        sink.write_comment("t pmc")?;
        sink.write_comment(&format!(
            "p show {} 0",
            (1..=self.nvar()).format(" ")
        ))?;
        if let Some(description) = &options.description {
            sink.write_comment(description)?;
        }
        if verbose {
            sink.write_comment(&format!(
                "{} encoding of graph with {} input variables and {} nodes",
                self.encoding(),
                self.nvar(),
                self.num_gates()
            ))?;
            sink.write_comment("Unit clause for root")?;
        }
        if let Some(clause) = clean_clause([self.root()]) {
            sink.write_clause(&clause)?;
        }
        for gate in self.gates() {
            if verbose {
                sink.write_comment(&format!("Encode node {}", gate))?;
            }
            for clause in gate.clausify(self.encoding())? {
                sink.write_clause(&clause)?;
            }
        }
        let (variables, clauses) = sink.finish()?;
        debug!(
            "generate_cnf: {} encoding, {} variables, {} clauses",
            self.encoding(),
            variables,
            clauses
        );
        Ok((variables, clauses))
    }

    /// Writes the network as a POG. Only AND/OR networks built in POG mode
    /// can be written; expand ITE gates first.
    pub fn generate_pog(&self, sink: &mut impl GraphSink, options: &CompileOptions) -> Result<()> {
        if self.encoding() != Encoding::Pog {
            return Err(Error::EncodingUnsupported(format!(
                "must build network in POG mode to generate POG, not {}",
                self.encoding()
            )));
        }
        let unsupported =
            |gate: &Gate| Error::EncodingUnsupported(format!("can't generate POG containing {}", gate));
        if let Some(gate) = self.gates().iter().find(|g| g.kind().is_ternary()) {
            return Err(unsupported(gate));
        }

        if let Some(description) = &options.description {
            sink.write_comment(description)?;
        }
        if options.verbosity >= 2 {
            sink.write_comment(&format!(
                "POG representation of graph with {} variables and {} nodes.  Size = {}",
                self.nvar(),
                self.num_gates(),
                self.size()
            ))?;
        }
        for gate in self.gates() {
            let id = match gate.kind() {
                GateKind::And => sink.write_and(gate.children())?,
                GateKind::Or => sink.write_or(gate.children())?,
                GateKind::Ite | GateKind::Ito => return Err(unsupported(gate)),
            };
            debug_assert_eq!(id, gate.id());
        }
        sink.declare_root(self.root())?;
        sink.finish()?;
        debug!("generate_pog: {} nodes, size {}", self.num_gates(), self.size());
        Ok(())
    }
}
