//! Property-based tests for the quantified invariants in the spec's
//! testable-properties section that require the full compile pipeline:
//! quadratic degree after reduction (P5), AND-penalty correctness (P6),
//! spin/binary energy equivalence (P4, P9), and the QUBO round-trip (P8).

use std::collections::HashMap;

use proptest::prelude::*;

use qubo_compile::{compile, Sample, Vartype};
use qubo_ir::{Binding, Coeff, Expr};

/// Build `H = sum_i c_i * x_i` over `n` binary variables, each `x_i`
/// flagged spin or binary by `spins[i]`, then cube the sum so reduction has
/// real work to do.
fn arb_hamiltonian(max_vars: usize) -> impl Strategy<Value = (Vec<f64>, Vec<bool>)> {
    (1..=max_vars).prop_flat_map(|n| {
        (
            prop::collection::vec(-5.0_f64..5.0, n),
            prop::collection::vec(any::<bool>(), n),
        )
    })
}

fn build_expr(coeffs: &[f64], spins: &[bool]) -> Expr {
    let mut terms = Vec::new();
    for (i, (c, is_spin)) in coeffs.iter().zip(spins.iter()).enumerate() {
        let label = format!("x{i}");
        let var = if *is_spin { Expr::spin(label) } else { Expr::binary(label) };
        terms.push(var * Expr::constant(*c));
    }
    let mut sum = terms[0].clone();
    for term in &terms[1..] {
        sum = sum + term.clone();
    }
    sum
}

proptest! {
    /// P5: after `compile`, every product in the resulting model has degree
    /// <= 2, however high the pre-reduction degree was.
    #[test]
    fn p5_quadratic_after_reduce((coeffs, spins) in arb_hamiltonian(4)) {
        let h = build_expr(&coeffs, &spins).pow(3).unwrap();
        let model = compile(&h, 5.0).unwrap();
        // `to_qubo` only accepts degree <= 2 products (debug_assert in
        // model.rs); successfully building one is itself the check.
        let binding = Binding::new();
        prop_assert!(model.to_qubo(&binding, false).is_ok());
    }

    /// P6 (consistency half): for every strength, evaluating the reduced
    /// model with the auxiliary set consistently (`z == x*y`) reproduces the
    /// direct cubic energy, since the Rosenberg penalty vanishes exactly
    /// there. `qubo_ir`'s reducer unit tests additionally check the penalty
    /// is strictly positive at the four inconsistent assignments.
    #[test]
    fn p6_consistent_auxiliary_reproduces_direct_energy(strength in 0.5_f64..10.0) {
        let a = Expr::binary("a");
        let b = Expr::binary("b");
        let c = Expr::binary("c");
        let h = a * b * c; // forces one auxiliary z = a*b
        let model = compile(&h, strength).unwrap();
        let binding = Binding::new();

        for bits in 0u8..8 {
            let av = (bits & 1) as f64;
            let bv = ((bits >> 1) & 1) as f64;
            let cv = ((bits >> 2) & 1) as f64;
            let direct = av * bv * cv;

            let mut sample: HashMap<String, f64> = HashMap::new();
            sample.insert("a".to_string(), av);
            sample.insert("b".to_string(), bv);
            sample.insert("c".to_string(), cv);
            // z takes the value consistent with a*b; the reducer's only
            // correct assignment once a, b are fixed.
            sample.insert("a*b".to_string(), av * bv);

            let energy = model.energy(&sample, Vartype::Binary, &binding).unwrap();
            prop_assert!((energy - direct).abs() < 1e-9);
        }
    }

    /// P4/P9: energy under a spin encoding matches energy under the binary
    /// translation `s = 2b - 1` of the same assignment.
    #[test]
    fn p4_spin_binary_energy_equivalence((coeffs, _) in arb_hamiltonian(4), bits in 0_u8..16) {
        let n = coeffs.len();
        let spin_expr = build_expr(&coeffs, &vec![true; n]).pow(2).unwrap();
        let binary_expr = build_expr(&coeffs, &vec![false; n]).pow(2).unwrap();

        let spin_model = compile(&spin_expr, 5.0).unwrap();
        let binary_model = compile(&binary_expr, 5.0).unwrap();
        let binding = Binding::new();

        let mut spin_sample: Sample = HashMap::new();
        let mut binary_sample: Sample = HashMap::new();
        for i in 0..n {
            let b = ((bits >> i) & 1) as f64;
            binary_sample.insert(format!("x{i}"), b);
            spin_sample.insert(format!("x{i}"), 2.0 * b - 1.0);
        }

        let spin_energy = spin_model.energy(&spin_sample, Vartype::Spin, &binding).unwrap();
        let binary_energy = binary_model.energy(&binary_sample, Vartype::Binary, &binding).unwrap();
        prop_assert!((spin_energy - binary_energy).abs() < 1e-6);
    }

    /// P8: energy matches offset + sum of QUBO entries evaluated on the
    /// sample, for any binary assignment.
    #[test]
    fn p8_qubo_round_trip((coeffs, _) in arb_hamiltonian(4), bits in 0_u8..16) {
        let n = coeffs.len();
        let h = build_expr(&coeffs, &vec![false; n]).pow(2).unwrap();
        let model = compile(&h, 5.0).unwrap();
        let binding = Binding::new();
        let qubo = model.to_qubo(&binding, false).unwrap();

        let mut sample: Sample = HashMap::new();
        for i in 0..n {
            sample.insert(format!("x{i}"), ((bits >> i) & 1) as f64);
        }

        let mut expected = qubo.offset;
        for ((ki, kj), value) in &qubo.entries {
            let vi = sample.get(&ki.to_string()).copied().unwrap_or(0.0);
            let vj = sample.get(&kj.to_string()).copied().unwrap_or(0.0);
            expected += value * vi * vj;
        }
        let energy = model.energy(&sample, Vartype::Binary, &binding).unwrap();
        prop_assert!((energy - expected).abs() < 1e-6);
    }
}
