//! End-to-end tests for threshold circuits.
//!
//! Clause sets are checked by brute-force enumeration: for every assignment
//! to the inputs, a backtracking search over the gate variables decides
//! whether the assignment extends to a model of the clauses.

use std::collections::BTreeSet;

use ite_gates::builder::GraphBuilder;
use ite_gates::compile::CompileOptions;
use ite_gates::literal::Literal;
use ite_gates::threshold::ThresholdCircuit;
use ite_gates::types::Encoding;
use ite_gates::writer::{ClauseCollector, CnfWriter, PogWriter};
use num_bigint::BigUint;
use pretty_assertions::assert_eq;

// ─── Helpers ───────────────────────────────────────────────────────────────────

fn inputs_of(bits: u32, n: u32) -> Vec<bool> {
    (0..n).map(|i| bits & (1 << i) != 0).collect()
}

fn at_least(bits: u32, k: u32) -> bool {
    bits.count_ones() >= k
}

fn satisfied(assignment: &[bool], clause: &[Literal]) -> bool {
    clause
        .iter()
        .any(|l| assignment[l.var() as usize] != l.is_negated())
}

/// Searches for an extension of `assignment[1..=nvar]` to all variables.
/// Clauses are bucketed by their largest variable and checked as soon as
/// that variable is assigned.
fn extends(assignment: &mut Vec<bool>, var: usize, buckets: &[Vec<Vec<Literal>>]) -> bool {
    if var == buckets.len() {
        return true;
    }
    let fixed = var < assignment.len();
    let candidates: Vec<bool> = if fixed {
        vec![assignment[var]]
    } else {
        vec![false, true]
    };
    for value in candidates {
        if !fixed {
            assignment.push(value);
        }
        let ok = buckets[var].iter().all(|c| satisfied(&assignment[..], c));
        if ok && extends(assignment, var + 1, buckets) {
            return true;
        }
        if !fixed {
            assignment.pop();
        }
    }
    false
}

/// Input assignments (as bit masks) that extend to a model of the clauses.
fn projected_models(nvar: u32, max_variable: u32, clauses: &[Vec<Literal>]) -> BTreeSet<u32> {
    let mut buckets = vec![Vec::new(); max_variable as usize + 1];
    for clause in clauses {
        let top = clause.iter().map(|l| l.var()).max().unwrap_or(0);
        buckets[top as usize].push(clause.clone());
    }
    let mut models = BTreeSet::new();
    for bits in 0..(1u32 << nvar) {
        // Index 0 is unused so that variables index directly.
        let mut assignment = vec![false];
        assignment.extend(inputs_of(bits, nvar));
        if buckets[0].is_empty() && extends(&mut assignment, 1, &buckets) {
            models.insert(bits);
        }
    }
    models
}

fn expected_models(n: u32, k: u32) -> BTreeSet<u32> {
    (0..(1u32 << n)).filter(|&bits| at_least(bits, k)).collect()
}

fn circuit_models(builder: &GraphBuilder) -> BTreeSet<u32> {
    (0..(1u32 << builder.nvar()))
        .filter(|&bits| builder.evaluate(&inputs_of(bits, builder.nvar())))
        .collect()
}

fn cnf(t: &mut ThresholdCircuit) -> ClauseCollector {
    let mut sink = ClauseCollector::default();
    t.generate_cnf(&mut sink, &CompileOptions::default()).unwrap();
    sink
}

fn check_invariants(builder: &GraphBuilder) {
    for (i, gate) in builder.gates().iter().enumerate() {
        assert_eq!(gate.id(), builder.nvar() + i as u32 + 1);
        for &child in gate.children() {
            assert!(
                child.is_constant() || child.var() <= builder.nvar() || child.var() < gate.id(),
                "gate {} has forward reference {}",
                gate,
                child
            );
        }
    }
}

// ─── Model count ───────────────────────────────────────────────────────────────

#[test]
fn solutions_match_binomial_sums() {
    for n in 0..=8u32 {
        for k in 0..=n + 1 {
            let t = ThresholdCircuit::new(n, k, Encoding::Plaisted).unwrap();
            let expected = expected_models(n, k).len() as u32;
            assert_eq!(t.solutions(), BigUint::from(expected), "n={} k={}", n, k);
        }
    }
}

// ─── Circuit semantics ─────────────────────────────────────────────────────────

#[test]
fn built_circuits_compute_threshold() {
    for encoding in [Encoding::Plaisted, Encoding::Tseitin, Encoding::Pog] {
        for n in 0..=6u32 {
            for k in 0..=n + 1 {
                let mut t = ThresholdCircuit::new(n, k, encoding).unwrap();
                t.build().unwrap();
                check_invariants(t.builder());
                assert_eq!(
                    circuit_models(t.builder()),
                    expected_models(n, k),
                    "{} n={} k={}",
                    encoding,
                    n,
                    k
                );
            }
        }
    }
}

#[test]
fn pruning_preserves_models() {
    for encoding in [Encoding::Plaisted, Encoding::Tseitin, Encoding::Pog] {
        for n in 1..=6u32 {
            for k in 1..=n {
                let mut t = ThresholdCircuit::new(n, k, encoding).unwrap();
                t.build().unwrap();
                let before = circuit_models(t.builder());
                let gates_before = t.builder().num_gates();
                t.prune();
                check_invariants(t.builder());
                assert!(t.builder().num_gates() <= gates_before);
                assert_eq!(circuit_models(t.builder()), before);
            }
        }
    }
}

#[test]
fn pruning_is_idempotent() {
    let mut t = ThresholdCircuit::new(6, 3, Encoding::Tseitin).unwrap();
    t.build().unwrap();
    t.prune();
    let once = cnf(&mut t);
    let gates = t.builder().gates().to_vec();
    t.prune();
    assert_eq!(t.builder().gates(), &gates[..]);
    assert_eq!(cnf(&mut t).clauses, once.clauses);
}

#[test]
fn expansion_preserves_models() {
    for (encoding, n, k) in [
        (Encoding::Plaisted, 5, 2),
        (Encoding::Plaisted, 6, 4),
        (Encoding::Pog, 5, 3),
        (Encoding::Pog, 6, 1),
        (Encoding::Pog, 6, 6),
    ] {
        let mut t = ThresholdCircuit::new(n, k, encoding).unwrap();
        t.build().unwrap();
        t.prune();
        let before = circuit_models(t.builder());
        t.expand().unwrap();
        check_invariants(t.builder());
        assert!(t.builder().gates().iter().all(|g| !g.kind().is_ternary()));
        assert_eq!(circuit_models(t.builder()), before, "{} n={} k={}", encoding, n, k);

        let gates = t.builder().gates().to_vec();
        t.expand().unwrap();
        assert_eq!(t.builder().gates(), &gates[..]);
    }
}

// ─── Clause encodings ──────────────────────────────────────────────────────────

#[test]
fn encodings_have_threshold_models() {
    for encoding in [Encoding::Plaisted, Encoding::Tseitin, Encoding::Pog] {
        for n in 1..=5u32 {
            for k in 0..=n + 1 {
                let mut t = ThresholdCircuit::new(n, k, encoding).unwrap();
                t.build().unwrap();
                t.prune();
                if encoding == Encoding::Pog {
                    t.expand().unwrap();
                }
                let sink = cnf(&mut t);
                let max_variable = sink.max_variable.unwrap();
                assert_eq!(max_variable, n + t.builder().num_gates() as u32);
                assert_eq!(
                    projected_models(n, max_variable, &sink.clauses),
                    expected_models(n, k),
                    "{} n={} k={}",
                    encoding,
                    n,
                    k
                );
            }
        }
    }
}

#[test]
fn tseitin_gates_are_functionally_determined() {
    // With the root clause removed, every input assignment has exactly one
    // extension, matching the evaluated circuit.
    let mut t = ThresholdCircuit::new(4, 2, Encoding::Tseitin).unwrap();
    t.build().unwrap();
    t.prune();
    let sink = cnf(&mut t);
    let builder = t.builder();
    let gate_clauses = &sink.clauses[1..];
    for bits in 0..16u32 {
        let inputs = inputs_of(bits, 4);
        let mut count = 0;
        for gate_bits in 0..(1u32 << builder.num_gates()) {
            let mut assignment = vec![false];
            assignment.extend(&inputs);
            assignment.extend(inputs_of(gate_bits, builder.num_gates() as u32));
            if gate_clauses.iter().all(|c| satisfied(&assignment, c)) {
                count += 1;
                let root = builder.root();
                assert_eq!(assignment[root.var() as usize], builder.evaluate(&inputs));
            }
        }
        assert_eq!(count, 1, "inputs {:?}", inputs);
    }
}

#[test]
fn root_clause_comes_first() {
    let mut t = ThresholdCircuit::new(5, 3, Encoding::Plaisted).unwrap();
    t.build().unwrap();
    t.prune();
    let sink = cnf(&mut t);
    assert_eq!(sink.clauses[0], vec![t.builder().root()]);
    assert_eq!(sink.max_variable, Some(5 + t.builder().num_gates() as u32));
}

// ─── End-to-end ────────────────────────────────────────────────────────────────

#[test]
fn majority_of_three() {
    let mut t = ThresholdCircuit::new(3, 2, Encoding::Tseitin).unwrap();
    t.build().unwrap();
    t.prune();
    let sink = cnf(&mut t);
    let models = projected_models(3, sink.max_variable.unwrap(), &sink.clauses);
    // Bit i is input x(i+1): 110, 101, 011, 111 read as x1 x2 x3.
    assert_eq!(models, BTreeSet::from([0b011, 0b101, 0b110, 0b111]));
}

#[test]
fn single_input() {
    for encoding in [Encoding::Plaisted, Encoding::Tseitin, Encoding::Pog] {
        let mut t = ThresholdCircuit::new(1, 1, encoding).unwrap();
        assert_eq!(t.build().unwrap(), Literal::from_var(1));
        assert_eq!(t.builder().num_gates(), 0);
        assert_eq!(t.solutions(), BigUint::from(1u32));
        let sink = cnf(&mut t);
        assert_eq!(sink.clauses, vec![vec![Literal::from_var(1)]]);
    }
}

#[test]
fn cnf_file_text() {
    let mut t = ThresholdCircuit::new(2, 1, Encoding::Tseitin).unwrap();
    t.build().unwrap();
    t.prune();
    let mut w = CnfWriter::new(Vec::new());
    t.generate_cnf(&mut w, &CompileOptions::default()).unwrap();
    assert_eq!(
        String::from_utf8(w.into_inner()).unwrap(),
        "c t pmc\n\
         c p show 1 2 0\n\
         c Thresh(2, 1).  3 solutions\n\
         p cnf 3 4\n\
         3 0\n\
         2 1 -3 0\n\
         -2 3 0\n\
         -1 3 0\n"
    );
}

#[test]
fn pog_file_text() {
    let mut t = ThresholdCircuit::new(2, 1, Encoding::Pog).unwrap();
    t.build().unwrap();
    t.prune();
    let mut w = PogWriter::new(2, Vec::new());
    t.generate_pog(&mut w, &CompileOptions::default()).unwrap();
    assert!(t.is_expanded());
    assert_eq!(
        String::from_utf8(w.into_inner()).unwrap(),
        "c Thresh(2, 1).  3 solutions\n\
         p 3 -2 1\n\
         s 4 2 3\n\
         r 4\n"
    );
}
