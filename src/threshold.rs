//! Threshold (k-out-of-n) circuits.
//!
//! The predicate "at least `k` of `x1..xn` are true" is built by dynamic
//! programming over a table `T[i][j]`: the value of the predicate restricted
//! to the first `j` inputs, requiring at least `i` of them to be true.
//!
//! ```text
//! T[0][j] = 1
//! T[i][0] = 0                                  (i >= 1)
//! T[i][j] = ITO(x_j, T[i-1][j-1], T[i][j-1])   (ITE in POG mode)
//! ```
//!
//! Every cell creates at most one gate, so the network has `O(k·n)` gates.
//!
//! # Examples
//!
//! ```
//! use ite_gates::threshold::ThresholdCircuit;
//! use ite_gates::types::Encoding;
//!
//! let mut t = ThresholdCircuit::new(3, 2, Encoding::Tseitin).unwrap();
//! t.build().unwrap();
//! t.prune();
//! assert_eq!(t.solutions().to_string(), "4");
//! assert!(t.builder().evaluate(&[true, false, true]));
//! assert!(!t.builder().evaluate(&[false, false, true]));
//! ```

use std::io::Write;

use itertools::Itertools;
use log::{debug, trace};
use num_bigint::BigUint;

use crate::builder::GraphBuilder;
use crate::compile::CompileOptions;
use crate::error::{Error, Result};
use crate::literal::Literal;
use crate::types::Encoding;
use crate::writer::{ClauseSink, GraphSink};

pub struct ThresholdCircuit {
    n: u32,
    k: u32,
    builder: GraphBuilder,
    built: bool,
    expanded: bool,
    clause_count: Option<usize>,
}

impl ThresholdCircuit {
    /// Requires `k <= n + 1`.
    pub fn new(n: u32, k: u32, encoding: Encoding) -> Result<Self> {
        if k > n + 1 {
            return Err(Error::InvalidParameter(format!(
                "threshold k = {} exceeds n + 1 = {}",
                k,
                n + 1
            )));
        }
        Ok(Self::unchecked(n, k, encoding))
    }

    /// Majority function: `k = n/2 + 1`.
    pub fn majority(n: u32, encoding: Encoding) -> Self {
        Self::unchecked(n, n / 2 + 1, encoding)
    }

    fn unchecked(n: u32, k: u32, encoding: Encoding) -> Self {
        debug_assert!(k <= n + 1);
        Self {
            n,
            k,
            builder: GraphBuilder::new(n, encoding),
            built: false,
            expanded: false,
            clause_count: None,
        }
    }

    pub fn n(&self) -> u32 {
        self.n
    }

    pub fn k(&self) -> u32 {
        self.k
    }

    pub fn encoding(&self) -> Encoding {
        self.builder.encoding()
    }

    pub fn builder(&self) -> &GraphBuilder {
        &self.builder
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Number of assignments satisfying the predicate: `Σ_{m=k}^{n} C(n, m)`.
    pub fn solutions(&self) -> BigUint {
        // Walk the binomial row C(n, 0), C(n, 1), ... exactly.
        let mut total = BigUint::ZERO;
        let mut binom = BigUint::from(1u32);
        for m in 0..=self.n {
            if m >= self.k {
                total += &binom;
            }
            binom = binom * (self.n - m) / (m + 1);
        }
        total
    }

    pub fn description(&self) -> String {
        format!(
            "Thresh({}, {}).  {} solutions",
            self.n,
            self.k,
            self.solutions()
        )
    }

    /// Populates the network. May be called only once.
    pub fn build(&mut self) -> Result<Literal> {
        if self.built {
            return Err(Error::InvalidState("threshold network already built"));
        }
        let (n, k) = (self.n as usize, self.k as usize);
        let pog = self.encoding() == Encoding::Pog;

        // Row i-1 and row i of the table.
        let mut prev = vec![Literal::TRUE; n + 1];
        let mut row = vec![Literal::TRUE; n + 1];
        for i in 1..=k {
            row[0] = Literal::FALSE;
            for j in 1..=n {
                let x = Literal::from_var(j as u32);
                let (t, e) = (prev[j - 1], row[j - 1]);
                row[j] = if pog {
                    self.builder.make_ite(x, t, e)
                } else {
                    self.builder.make_ito(x, t, e)
                };
                trace!("Edge({},{}): {}", i, j, self.builder.show_literal(row[j]));
            }
            std::mem::swap(&mut prev, &mut row);
        }

        let root = prev[n];
        self.builder.set_root(root);
        self.built = true;
        debug!(
            "build: Thresh({}, {}) -> {} gates, root {}",
            self.n,
            self.k,
            self.builder.num_gates(),
            root
        );
        Ok(root)
    }

    /// Drops gates not reachable from the root.
    pub fn prune(&mut self) {
        self.builder = self.builder.prune();
    }

    /// Rewrites ITE/ITO gates into AND/OR gates. ITO gates are only
    /// expandable under the Plaisted encoding.
    pub fn expand(&mut self) -> Result<()> {
        let ite_only = self.encoding() != Encoding::Plaisted;
        self.builder = self.builder.expand(ite_only)?;
        self.expanded = true;
        Ok(())
    }

    /// Writes the clauses, returning the variable and clause counts.
    pub fn generate_cnf(
        &mut self,
        sink: &mut impl ClauseSink,
        options: &CompileOptions,
    ) -> Result<(u32, usize)> {
        self.check_built()?;
        let options = options.clone().with_description(self.description());
        let (variables, clauses) = self.builder.generate_cnf(sink, &options)?;
        self.clause_count = Some(clauses);
        Ok((variables, clauses))
    }

    /// Writes the POG, expanding the network first if needed.
    ///
    /// Only networks built in POG mode can be written. On failure the
    /// circuit is left as it was.
    pub fn generate_pog(&mut self, sink: &mut impl GraphSink, options: &CompileOptions) -> Result<()> {
        self.check_built()?;
        if self.encoding() != Encoding::Pog {
            return Err(Error::EncodingUnsupported(format!(
                "must build network in POG mode to generate POG, not {}",
                self.encoding()
            )));
        }
        if !self.expanded {
            self.expand()?;
        }
        let options = options.clone().with_description(self.description());
        self.builder.generate_pog(sink, &options)
    }

    fn check_built(&self) -> Result<()> {
        if self.built {
            Ok(())
        } else {
            Err(Error::InvalidState("threshold network not built"))
        }
    }

    /// Writes a PBIP cardinality declaration stating that at least `k` inputs
    /// are true, justified by all clauses of the last generated CNF.
    pub fn write_pbip(&self, mut out: impl Write) -> Result<()> {
        let Some(clause_count) = self.clause_count else {
            return Err(Error::InvalidState("no CNF generated yet"));
        };
        writeln!(
            out,
            "* PBIP declaration of {}/{} threshold formula",
            self.k, self.n
        )?;
        let terms = (1..=self.n).map(|i| format!(" 1 x{}", i)).join("");
        let hints = (1..=clause_count).format(" ");
        writeln!(out, "i{} >= {} ; {}", terms, self.k, hints)?;
        out.flush()?;
        Ok(())
    }
}
