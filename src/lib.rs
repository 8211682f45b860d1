//! # ite-gates: gate networks compiled to clauses
//!
//! **`ite-gates`** builds shared, reduced networks of AND, OR, ITE
//! (if-then-else) and ITO (if-then-output) gates over numbered input
//! variables, and compiles them into CNF or into a POG (a network of
//! product and sum nodes read by knowledge-compilation and model-counting
//! tools).
//!
//! ## Key Features
//!
//! - **Manager-Centric Construction**: All gates are created through a
//!   [`GraphBuilder`][crate::builder::GraphBuilder], which applies algebraic
//!   simplifications before allocating, so trivial gates never exist.
//! - **DIMACS-style Literals**: [`Literal`][crate::literal::Literal] is a signed
//!   reference where inputs are `1..=nvar` and gates follow, numbered in
//!   creation order. Children always refer to older gates.
//! - **Three Encodings**: Plaisted (one-directional), Tseitin (bidirectional)
//!   and POG (AND/OR structure). See [`Encoding`][crate::types::Encoding].
//! - **Pruning and Expansion**: Both produce a new builder and leave the old
//!   one untouched.
//! - **Threshold Circuits**: [`ThresholdCircuit`][crate::threshold::ThresholdCircuit]
//!   builds "at least k of n" with `O(k·n)` gates.
//!
//! ## Basic Usage
//!
//! ```rust
//! use ite_gates::compile::CompileOptions;
//! use ite_gates::threshold::ThresholdCircuit;
//! use ite_gates::types::Encoding;
//! use ite_gates::writer::ClauseCollector;
//!
//! // Majority of three inputs.
//! let mut t = ThresholdCircuit::new(3, 2, Encoding::Tseitin).unwrap();
//! t.build().unwrap();
//! t.prune();
//!
//! let mut cnf = ClauseCollector::default();
//! let (variables, clauses) = t.generate_cnf(&mut cnf, &CompileOptions::default()).unwrap();
//! assert_eq!(variables, 6);
//! assert_eq!(clauses, cnf.clauses.len());
//! ```

pub mod bitset;
pub mod builder;
pub mod compile;
pub mod error;
pub mod eval;
pub mod expand;
pub mod gate;
pub mod literal;
pub mod prune;
pub mod threshold;
pub mod types;
pub mod writer;

pub use error::{Error, Result};
