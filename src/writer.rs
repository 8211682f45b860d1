//! Output sinks for compiled networks.
//!
//! # CNF (DIMACS)
//!
//! ```text
//! c <comment>          # comments issued before the first clause
//! p cnf <vars> <clauses>
//! <lit> ... <lit> 0    # one clause per line
//! ```
//!
//! The maximum variable is announced before anything else is written, since
//! it is only known once the whole network exists, while clauses can be
//! produced one gate at a time. The clause count goes into the header, so
//! [`CnfWriter`] buffers its output until [`ClauseSink::finish`].
//!
//! # POG
//!
//! ```text
//! c <comment>
//! p <id> <lit> ... <lit>   # product (AND) node
//! s <id> <lit> ... <lit>   # sum (OR) node, children mutually exclusive
//! r <lit>                  # root, 0 for a constant
//! ```
//!
//! Node ids are assigned sequentially from `nvar + 1`, in declaration order.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use itertools::Itertools;

use crate::error::{Error, Result};
use crate::literal::Literal;

/// Streaming consumer of clauses.
pub trait ClauseSink {
    /// Must be called exactly once, before any comment or clause.
    fn announce_max_variable(&mut self, count: u32) -> Result<()>;
    fn write_comment(&mut self, text: &str) -> Result<()>;
    fn write_clause(&mut self, literals: &[Literal]) -> Result<()>;
    /// Flushes the output and returns `(variable count, clause count)`.
    fn finish(&mut self) -> Result<(u32, usize)>;
}

/// Consumer of AND/OR node declarations.
pub trait GraphSink {
    fn write_comment(&mut self, text: &str) -> Result<()>;
    /// Declares a product node and returns its id.
    fn write_and(&mut self, children: &[Literal]) -> Result<u32>;
    /// Declares a sum node and returns its id.
    fn write_or(&mut self, children: &[Literal]) -> Result<u32>;
    fn declare_root(&mut self, root: Literal) -> Result<()>;
    fn finish(&mut self) -> Result<()>;
}

fn check_announced(max_variable: Option<u32>) -> Result<()> {
    match max_variable {
        Some(_) => Ok(()),
        None => Err(Error::Protocol("maximum variable not announced")),
    }
}

fn check_clause(max_variable: u32, literals: &[Literal]) {
    debug_assert!(
        literals
            .iter()
            .all(|l| !l.is_constant() && l.var() >= 1 && l.var() <= max_variable),
        "clause {:?} out of range 1..={}",
        literals,
        max_variable
    );
}

/// DIMACS CNF writer.
pub struct CnfWriter<W: Write> {
    out: W,
    max_variable: Option<u32>,
    lines: Vec<String>,
    header_lines: usize,
    clause_count: usize,
}

impl<W: Write> CnfWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            max_variable: None,
            lines: Vec::new(),
            header_lines: 0,
            clause_count: 0,
        }
    }

    /// Consumes the writer, returning the underlying output.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ClauseSink for CnfWriter<W> {
    fn announce_max_variable(&mut self, count: u32) -> Result<()> {
        if self.max_variable.is_some() {
            return Err(Error::Protocol("maximum variable announced twice"));
        }
        self.max_variable = Some(count);
        Ok(())
    }

    fn write_comment(&mut self, text: &str) -> Result<()> {
        check_announced(self.max_variable)?;
        self.lines.push(format!("c {}", text));
        if self.clause_count == 0 {
            self.header_lines = self.lines.len();
        }
        Ok(())
    }

    fn write_clause(&mut self, literals: &[Literal]) -> Result<()> {
        check_announced(self.max_variable)?;
        check_clause(self.max_variable.unwrap_or_default(), literals);
        self.lines.push(
            literals
                .iter()
                .map(|l| l.get())
                .chain([0])
                .format(" ")
                .to_string(),
        );
        self.clause_count += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(u32, usize)> {
        let Some(max_variable) = self.max_variable else {
            return Err(Error::Protocol("maximum variable not announced"));
        };
        for line in &self.lines[..self.header_lines] {
            writeln!(self.out, "{}", line)?;
        }
        writeln!(self.out, "p cnf {} {}", max_variable, self.clause_count)?;
        for line in &self.lines[self.header_lines..] {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()?;
        self.lines.clear();
        self.header_lines = 0;
        Ok((max_variable, self.clause_count))
    }
}

/// In-memory clause sink.
#[derive(Debug, Default, Clone)]
pub struct ClauseCollector {
    pub max_variable: Option<u32>,
    pub comments: Vec<String>,
    pub clauses: Vec<Vec<Literal>>,
}

impl ClauseSink for ClauseCollector {
    fn announce_max_variable(&mut self, count: u32) -> Result<()> {
        if self.max_variable.is_some() {
            return Err(Error::Protocol("maximum variable announced twice"));
        }
        self.max_variable = Some(count);
        Ok(())
    }

    fn write_comment(&mut self, text: &str) -> Result<()> {
        check_announced(self.max_variable)?;
        self.comments.push(text.to_string());
        Ok(())
    }

    fn write_clause(&mut self, literals: &[Literal]) -> Result<()> {
        check_announced(self.max_variable)?;
        check_clause(self.max_variable.unwrap_or_default(), literals);
        self.clauses.push(literals.to_vec());
        Ok(())
    }

    fn finish(&mut self) -> Result<(u32, usize)> {
        match self.max_variable {
            Some(max_variable) => Ok((max_variable, self.clauses.len())),
            None => Err(Error::Protocol("maximum variable not announced")),
        }
    }
}

/// POG writer.
pub struct PogWriter<W: Write> {
    out: W,
    next_id: u32,
}

impl<W: Write> PogWriter<W> {
    pub fn new(nvar: u32, out: W) -> Self {
        Self {
            out,
            next_id: nvar + 1,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_node(&mut self, tag: char, children: &[Literal]) -> Result<u32> {
        debug_assert!(children.iter().all(|l| !l.is_constant()));
        let id = self.next_id;
        writeln!(
            self.out,
            "{} {} {}",
            tag,
            id,
            children.iter().map(|l| l.get()).format(" ")
        )?;
        self.next_id += 1;
        Ok(id)
    }
}

impl<W: Write> GraphSink for PogWriter<W> {
    fn write_comment(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "c {}", text)?;
        Ok(())
    }

    fn write_and(&mut self, children: &[Literal]) -> Result<u32> {
        self.write_node('p', children)
    }

    fn write_or(&mut self, children: &[Literal]) -> Result<u32> {
        self.write_node('s', children)
    }

    fn declare_root(&mut self, root: Literal) -> Result<()> {
        if root.is_constant() {
            let name = if root.is_true() { "true" } else { "false" };
            writeln!(self.out, "c constant {}", name)?;
            writeln!(self.out, "r 0")?;
        } else {
            writeln!(self.out, "r {}", root.get())?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

pub fn create_cnf_file(path: impl AsRef<Path>) -> Result<CnfWriter<BufWriter<File>>> {
    Ok(CnfWriter::new(BufWriter::new(File::create(path)?)))
}

pub fn create_pog_file(nvar: u32, path: impl AsRef<Path>) -> Result<PogWriter<BufWriter<File>>> {
    Ok(PogWriter::new(nvar, BufWriter::new(File::create(path)?)))
}
