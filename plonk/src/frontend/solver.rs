//! Witness solvers.
//!
//! Constraints are solved in emission order; each constraint contributes at
//! most one new wire. Hinted wires are computed on their first appearance,
//! then consistency-checked by the accompanying constraints.

use crate::frontend::debug_info::DebugInfo;
use crate::frontend::errors::SolverError;
use crate::frontend::hints::HintRegistry;
use crate::frontend::linear_expression::LinearExpression;
use crate::frontend::r1cs::R1cs;
use crate::frontend::sparse::SparseR1cs;
use crate::frontend::term::Visibility;
use crate::frontend::CoeffPool;
use silex_algebra::prelude::*;
use std::collections::BTreeMap;

fn eval_le<F: Scalar>(
    le: &LinearExpression,
    pool: &CoeffPool<F>,
    solution: &[Option<F>],
    wire_index: &dyn Fn(crate::frontend::term::Term) -> usize,
) -> Option<F> {
    let mut acc = F::zero();
    for term in le.iter() {
        let coeff = pool.get(term.coeff_id());
        if coeff.is_zero() {
            continue;
        }
        let value = if term.visibility() == Visibility::Virtual {
            F::one()
        } else {
            solution[wire_index(*term)]?
        };
        acc.add_assign(&coeff.mul(&value));
    }
    Some(acc)
}

fn render_debug<F: Scalar>(
    debug_map: &BTreeMap<usize, usize>,
    debug_infos: &[DebugInfo],
    index: usize,
    pool: &CoeffPool<F>,
    solution: &[Option<F>],
    wire_index: &dyn Fn(crate::frontend::term::Term) -> usize,
) -> Option<String> {
    let info = debug_map.get(&index).map(|id| &debug_infos[*id])?;
    let mut eval =
        |le: &LinearExpression| -> Option<F> { eval_le(le, pool, solution, wire_index) };
    Some(info.render(&mut eval))
}

impl<F: Scalar> R1cs<F> {
    /// Solve the system from the `[public..., secret...]` input vector,
    /// returning the full wire assignment `[one, public, secret, internal]`.
    pub fn solve(
        &self,
        witness: &[F],
        registry: &HintRegistry<F>,
    ) -> core::result::Result<Vec<F>, SolverError> {
        if witness.len() != self.nb_public + self.nb_secret {
            return Err(SolverError::MissingAssignment(format!(
                "expected {} input values, got {}",
                self.nb_public + self.nb_secret,
                witness.len()
            )));
        }

        let mut solution: Vec<Option<F>> = vec![None; self.nb_vars()];
        solution[0] = Some(F::one());
        for (i, value) in witness.iter().enumerate() {
            solution[1 + i] = Some(*value);
        }

        let wire_index = |t: crate::frontend::term::Term| self.wire_index(t);

        for (index, constraint) in self.constraints.iter().enumerate() {
            // run the hints attached to still-unsolved wires of this constraint
            for le in [&constraint.l, &constraint.r, &constraint.o] {
                for term in le.iter() {
                    if term.visibility() != Visibility::Internal {
                        continue;
                    }
                    let global = self.wire_index(*term);
                    if solution[global].is_some() {
                        continue;
                    }
                    if let Some(record) = self.hints.get(&term.wire_id()) {
                        let mut inputs = Vec::with_capacity(record.inputs.len());
                        for input in record.inputs.iter() {
                            let value = eval_le(input, &self.pool, &solution, &wire_index)
                                .ok_or_else(|| {
                                    SolverError::HintFailure(
                                        "hint input is not yet solved".to_string(),
                                    )
                                })?;
                            inputs.push(value);
                        }
                        let value =
                            registry.evaluate(record.kind, &inputs, &record.params)?;
                        solution[global] = Some(value);
                    }
                }
            }

            // collect the unsolved wires the constraint still references
            let mut unknowns: Vec<usize> = Vec::new();
            let mut scan = |le: &LinearExpression| {
                for term in le.iter() {
                    if self.pool.get(term.coeff_id()).is_zero() {
                        continue;
                    }
                    let global = self.wire_index(*term);
                    if solution[global].is_none() && !unknowns.contains(&global) {
                        unknowns.push(global);
                    }
                }
            };
            scan(&constraint.l);
            scan(&constraint.r);
            scan(&constraint.o);

            let unsatisfied = |solution: &Vec<Option<F>>| SolverError::UnsatisfiedConstraint {
                constraint: index,
                debug: render_debug(
                    &self.debug_map,
                    &self.debug_infos,
                    index,
                    &self.pool,
                    solution,
                    &wire_index,
                ),
            };

            match unknowns.len() {
                0 => {
                    let l = eval_le(&constraint.l, &self.pool, &solution, &wire_index)
                        .unwrap();
                    let r = eval_le(&constraint.r, &self.pool, &solution, &wire_index)
                        .unwrap();
                    let o = eval_le(&constraint.o, &self.pool, &solution, &wire_index)
                        .unwrap();
                    if l.mul(&r) != o {
                        return Err(unsatisfied(&solution));
                    }
                }
                1 => {
                    let w = unknowns[0];
                    let value = self
                        .isolate(constraint, w, &solution, &wire_index)
                        .ok_or_else(|| unsatisfied(&solution))?;
                    solution[w] = Some(value);
                }
                _ => return Err(unsatisfied(&solution)),
            }
        }

        // hints whose outputs no constraint references
        for (wire, record) in self.hints.iter() {
            let global = 1 + self.nb_public + self.nb_secret + wire;
            if solution[global].is_some() {
                continue;
            }
            let mut inputs = Vec::with_capacity(record.inputs.len());
            for input in record.inputs.iter() {
                let value = eval_le(input, &self.pool, &solution, &wire_index).ok_or_else(
                    || SolverError::HintFailure("hint input is not yet solved".to_string()),
                )?;
                inputs.push(value);
            }
            solution[global] = Some(registry.evaluate(record.kind, &inputs, &record.params)?);
        }

        solution
            .into_iter()
            .enumerate()
            .map(|(i, v)| v.ok_or(SolverError::UnsolvedVariable(i)))
            .collect()
    }

    /// Isolate the single unknown wire `w` of a constraint `L * R = O`.
    fn isolate(
        &self,
        constraint: &crate::frontend::r1cs::R1c,
        w: usize,
        solution: &[Option<F>],
        wire_index: &dyn Fn(crate::frontend::term::Term) -> usize,
    ) -> Option<F> {
        let split = |le: &LinearExpression| -> Option<(F, F)> {
            // (known part, coefficient of w); None when w appears twice
            let mut known = F::zero();
            let mut coeff: Option<F> = None;
            for term in le.iter() {
                let c = self.pool.get(term.coeff_id());
                if c.is_zero() {
                    continue;
                }
                let global = wire_index(*term);
                if global == w && solution[global].is_none() {
                    if coeff.is_some() {
                        return None;
                    }
                    coeff = Some(c);
                } else {
                    known.add_assign(&c.mul(&solution[global]?));
                }
            }
            Some((known, coeff.unwrap_or_else(F::zero)))
        };

        let (l_known, l_coeff) = split(&constraint.l)?;
        let (r_known, r_coeff) = split(&constraint.r)?;
        let (o_known, o_coeff) = split(&constraint.o)?;

        let sides = [!l_coeff.is_zero(), !r_coeff.is_zero(), !o_coeff.is_zero()];
        match sides {
            [false, false, true] => {
                // (l)(r) = o_known + c*w
                let rhs = l_known.mul(&r_known).sub(&o_known);
                Some(rhs.mul(&o_coeff.inv().ok()?))
            }
            [true, false, false] => {
                // (l_known + c*w)(r) = o
                let denom = l_coeff.mul(&r_known);
                let rhs = o_known.sub(&l_known.mul(&r_known));
                Some(rhs.mul(&denom.inv().ok()?))
            }
            [false, true, false] => {
                let denom = r_coeff.mul(&l_known);
                let rhs = o_known.sub(&r_known.mul(&l_known));
                Some(rhs.mul(&denom.inv().ok()?))
            }
            _ => None,
        }
    }

    /// Resolve the deferred circuit prints against a full solution.
    pub fn resolve_logs(&self, solution: &[F]) -> Vec<String> {
        let opt: Vec<Option<F>> = solution.iter().map(|v| Some(*v)).collect();
        let wire_index = |t: crate::frontend::term::Term| self.wire_index(t);
        self.logs
            .iter()
            .map(|log| {
                let mut eval = |le: &LinearExpression| -> Option<F> {
                    eval_le(le, &self.pool, &opt, &wire_index)
                };
                log.render(&mut eval)
            })
            .collect()
    }
}

impl<F: Scalar> SparseR1cs<F> {
    /// Solve the system from the `[public..., secret...]` input vector,
    /// returning the full wire assignment `[public, secret, internal]`.
    pub fn solve(
        &self,
        witness: &[F],
        registry: &HintRegistry<F>,
    ) -> core::result::Result<Vec<F>, SolverError> {
        if witness.len() != self.nb_public + self.nb_secret {
            return Err(SolverError::MissingAssignment(format!(
                "expected {} input values, got {}",
                self.nb_public + self.nb_secret,
                witness.len()
            )));
        }

        let mut solution: Vec<Option<F>> = vec![None; self.nb_vars()];
        for (i, value) in witness.iter().enumerate() {
            solution[i] = Some(*value);
        }

        let wire_index = |t: crate::frontend::term::Term| self.wire_index(t);

        for (index, gate) in self.gates.iter().enumerate() {
            // run the hints attached to still-unsolved wires of this gate
            for term in [gate.l, gate.r, gate.o] {
                if term.visibility() != Visibility::Internal {
                    continue;
                }
                let global = self.wire_index(term);
                if solution[global].is_some() {
                    continue;
                }
                if let Some(record) = self.hints.get(&term.wire_id()) {
                    let mut inputs = Vec::with_capacity(record.inputs.len());
                    for input in record.inputs.iter() {
                        let value = eval_le(input, &self.pool, &solution, &wire_index)
                            .ok_or_else(|| {
                                SolverError::HintFailure("hint input is not yet solved".to_string())
                            })?;
                        inputs.push(value);
                    }
                    let value = registry.evaluate(record.kind, &inputs, &record.params)?;
                    solution[global] = Some(value);
                }
            }

            let ql = self.pool.get(gate.ql);
            let qr = self.pool.get(gate.qr);
            let qm = self.pool.get(gate.qm);
            let qo = self.pool.get(gate.qo);
            let qk = self.pool.get(gate.qk);

            let li = self.wire_index(gate.l);
            let ri = self.wire_index(gate.r);
            let oi = self.wire_index(gate.o);
            let lv = solution[li];
            let rv = solution[ri];
            let ov = solution[oi];

            // a slot only matters when one of its selectors is non-zero
            let mut unknowns: Vec<usize> = Vec::new();
            if (!ql.is_zero() || !qm.is_zero()) && lv.is_none() && !unknowns.contains(&li) {
                unknowns.push(li);
            }
            if (!qr.is_zero() || !qm.is_zero()) && rv.is_none() && !unknowns.contains(&ri) {
                unknowns.push(ri);
            }
            if !qo.is_zero() && ov.is_none() && !unknowns.contains(&oi) {
                unknowns.push(oi);
            }

            let unsatisfied = |solution: &Vec<Option<F>>| SolverError::UnsatisfiedConstraint {
                constraint: index,
                debug: render_debug(
                    &self.debug_map,
                    &self.debug_infos,
                    index,
                    &self.pool,
                    solution,
                    &wire_index,
                ),
            };

            match unknowns.len() {
                0 => {
                    let l = lv.unwrap_or_else(F::zero);
                    let r = rv.unwrap_or_else(F::zero);
                    let o = ov.unwrap_or_else(F::zero);
                    let mut acc = ql.mul(&l);
                    acc.add_assign(&qr.mul(&r));
                    acc.add_assign(&qm.mul(&l).mul(&r));
                    acc.add_assign(&qo.mul(&o));
                    acc.add_assign(&qk);
                    if !acc.is_zero() {
                        return Err(unsatisfied(&solution));
                    }
                }
                1 => {
                    let w = unknowns[0];
                    // the unknown must enter the row linearly
                    if w == li && w == ri && !qm.is_zero() {
                        return Err(unsatisfied(&solution));
                    }
                    let mut coeff = F::zero();
                    let mut known = qk;
                    if w == li {
                        coeff.add_assign(&ql);
                        if !qm.is_zero() {
                            coeff.add_assign(&qm.mul(&rv.unwrap()));
                        }
                    } else if lv.is_some() {
                        known.add_assign(&ql.mul(&lv.unwrap()));
                    }
                    if w == ri {
                        coeff.add_assign(&qr);
                        if !qm.is_zero() {
                            coeff.add_assign(&qm.mul(&lv.unwrap()));
                        }
                    } else if rv.is_some() {
                        known.add_assign(&qr.mul(&rv.unwrap()));
                    }
                    if w != li && w != ri && lv.is_some() && rv.is_some() {
                        known.add_assign(&qm.mul(&lv.unwrap()).mul(&rv.unwrap()));
                    }
                    if w == oi {
                        coeff.add_assign(&qo);
                    } else if ov.is_some() {
                        known.add_assign(&qo.mul(&ov.unwrap()));
                    }

                    let inv = match coeff.inv() {
                        Ok(inv) => inv,
                        Err(_) => return Err(unsatisfied(&solution)),
                    };
                    solution[w] = Some(known.neg().mul(&inv));
                }
                _ => return Err(unsatisfied(&solution)),
            }
        }

        // hints whose outputs no gate references
        for (wire, record) in self.hints.iter() {
            let global = self.nb_public + self.nb_secret + wire;
            if solution[global].is_some() {
                continue;
            }
            let mut inputs = Vec::with_capacity(record.inputs.len());
            for input in record.inputs.iter() {
                let value = eval_le(input, &self.pool, &solution, &wire_index).ok_or_else(
                    || SolverError::HintFailure("hint input is not yet solved".to_string()),
                )?;
                inputs.push(value);
            }
            solution[global] = Some(registry.evaluate(record.kind, &inputs, &record.params)?);
        }

        solution
            .into_iter()
            .enumerate()
            .map(|(i, v)| v.ok_or(SolverError::UnsolvedVariable(i)))
            .collect()
    }

    /// Resolve the deferred circuit prints against a full solution.
    pub fn resolve_logs(&self, solution: &[F]) -> Vec<String> {
        let opt: Vec<Option<F>> = solution.iter().map(|v| Some(*v)).collect();
        let wire_index = |t: crate::frontend::term::Term| self.wire_index(t);
        self.logs
            .iter()
            .map(|log| {
                let mut eval = |le: &LinearExpression| -> Option<F> {
                    eval_le(le, &self.pool, &opt, &wire_index)
                };
                log.render(&mut eval)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::frontend::errors::{FrontendError, SolverError};
    use crate::frontend::hints::HintRegistry;
    use crate::frontend::r1cs::{R1cs, R1csBuilder};
    use crate::frontend::sparse::{SparseBuilder, SparseR1cs};
    use crate::frontend::variable::Input;
    use crate::frontend::{compile, Assignment, Builder, Circuit, CompileOption, Inputs, Layout};
    use silex_algebra::bls12_381::BLSScalar;
    use silex_algebra::prelude::*;

    type F = BLSScalar;

    fn compile_both<C>(circuit: &C) -> (R1cs<F>, SparseR1cs<F>)
    where
        C: Circuit<F>,
    {
        let opt = CompileOption::default();
        let r1cs = compile::<C, R1csBuilder<F>>(circuit, &opt).unwrap();
        let sparse = compile::<C, SparseBuilder<F>>(circuit, &opt).unwrap();
        (r1cs, sparse)
    }

    fn solve_both<C>(
        circuit: &C,
        assignment: &Assignment<F>,
    ) -> (
        core::result::Result<Vec<F>, SolverError>,
        core::result::Result<Vec<F>, SolverError>,
    )
    where
        C: Circuit<F>,
    {
        let registry = HintRegistry::new();
        let (r1cs, sparse) = compile_both(circuit);
        let rw = r1cs.witness_from(assignment).unwrap();
        let sw = sparse.witness_from(assignment).unwrap();
        (r1cs.solve(&rw, &registry), sparse.solve(&sw, &registry))
    }

    fn assert_both_ok<C: Circuit<F>>(circuit: &C, assignment: &Assignment<F>) {
        let (r, s) = solve_both(circuit, assignment);
        r.unwrap();
        s.unwrap();
    }

    fn assert_both_fail<C: Circuit<F>>(circuit: &C, assignment: &Assignment<F>) {
        let (r, s) = solve_both(circuit, assignment);
        assert!(r.is_err(), "the R1CS solver accepted a bad witness");
        assert!(s.is_err(), "the sparse solver accepted a bad witness");
    }

    /// y == x^3, with y public and x secret.
    struct CubeCircuit;

    impl Circuit<F> for CubeCircuit {
        fn declare(&self, layout: &mut Layout) {
            layout.public("y");
            layout.secret("x");
        }

        fn define<B: Builder<Field = F>>(
            &self,
            api: &mut B,
            inputs: &Inputs,
        ) -> core::result::Result<(), FrontendError> {
            let x = inputs.get("x");
            let y = inputs.get("y");
            let cube = api.mul_many(&[(&x).into(), (&x).into(), (&x).into()]);
            api.assert_is_equal(Input::from(&cube), Input::from(&y));
            Ok(())
        }
    }

    #[test]
    fn test_cube_circuit() {
        let good = Assignment::new()
            .set("y", F::from(27u32))
            .set("x", F::from(3u32));
        assert_both_ok(&CubeCircuit, &good);

        let bad = Assignment::new()
            .set("y", F::from(27u32))
            .set("x", F::from(2u32));
        assert_both_fail(&CubeCircuit, &bad);
    }

    /// b == (x == 0), with b public and x secret.
    struct IsZeroCircuit;

    impl Circuit<F> for IsZeroCircuit {
        fn declare(&self, layout: &mut Layout) {
            layout.public("b");
            layout.secret("x");
        }

        fn define<B: Builder<Field = F>>(
            &self,
            api: &mut B,
            inputs: &Inputs,
        ) -> core::result::Result<(), FrontendError> {
            let x = inputs.get("x");
            let b = inputs.get("b");
            let m = api.is_zero(&x);
            api.assert_is_equal(Input::from(&m), Input::from(&b));
            Ok(())
        }
    }

    #[test]
    fn test_is_zero_circuit() {
        let zero_one = Assignment::new().set("x", F::zero()).set("b", F::one());
        assert_both_ok(&IsZeroCircuit, &zero_one);

        let five_zero = Assignment::new()
            .set("x", F::from(5u32))
            .set("b", F::zero());
        assert_both_ok(&IsZeroCircuit, &five_zero);

        let zero_zero = Assignment::new().set("x", F::zero()).set("b", F::zero());
        assert_both_fail(&IsZeroCircuit, &zero_zero);

        let five_one = Assignment::new().set("x", F::from(5u32)).set("b", F::one());
        assert_both_fail(&IsZeroCircuit, &five_one);
    }

    /// from_binary(to_binary(x, 8)) == x, with x public.
    struct BinaryRoundTripCircuit;

    impl Circuit<F> for BinaryRoundTripCircuit {
        fn declare(&self, layout: &mut Layout) {
            layout.public("x");
        }

        fn define<B: Builder<Field = F>>(
            &self,
            api: &mut B,
            inputs: &Inputs,
        ) -> core::result::Result<(), FrontendError> {
            let x = inputs.get("x");
            let bits = api.to_binary(&x, 8);
            let packed = api.from_binary(&bits);
            api.assert_is_equal(Input::from(&packed), Input::from(&x));
            Ok(())
        }
    }

    #[test]
    fn test_binary_round_trip_circuit() {
        let good = Assignment::new().set("x", F::from(171u32));
        assert_both_ok(&BinaryRoundTripCircuit, &good);

        // 256 overflows eight bits
        let bad = Assignment::new().set("x", F::from(256u32));
        assert_both_fail(&BinaryRoundTripCircuit, &bad);
    }

    /// x <= 100, with x secret.
    struct BoundCircuit;

    impl Circuit<F> for BoundCircuit {
        fn declare(&self, layout: &mut Layout) {
            layout.secret("x");
        }

        fn define<B: Builder<Field = F>>(
            &self,
            api: &mut B,
            inputs: &Inputs,
        ) -> core::result::Result<(), FrontendError> {
            let x = inputs.get("x");
            api.assert_is_less_or_equal(&x, 100u64);
            Ok(())
        }
    }

    #[test]
    fn test_less_or_equal_boundary() {
        assert_both_ok(&BoundCircuit, &Assignment::new().set("x", F::from(100u32)));
        assert_both_ok(&BoundCircuit, &Assignment::new().set("x", F::zero()));
        assert_both_fail(&BoundCircuit, &Assignment::new().set("x", F::from(101u32)));
        assert_both_fail(&BoundCircuit, &Assignment::new().set("x", F::from(255u32)));
    }

    /// A variable bound: x <= y.
    struct VarBoundCircuit;

    impl Circuit<F> for VarBoundCircuit {
        fn declare(&self, layout: &mut Layout) {
            layout.secret("x");
            layout.secret("y");
        }

        fn define<B: Builder<Field = F>>(
            &self,
            api: &mut B,
            inputs: &Inputs,
        ) -> core::result::Result<(), FrontendError> {
            let x = inputs.get("x");
            let y = inputs.get("y");
            api.assert_is_less_or_equal(&x, &y);
            Ok(())
        }
    }

    #[test]
    fn test_less_or_equal_variable_bound() {
        let ok = Assignment::new()
            .set("x", F::from(41u32))
            .set("y", F::from(41u32));
        assert_both_ok(&VarBoundCircuit, &ok);

        let ok2 = Assignment::new()
            .set("x", F::from(3u32))
            .set("y", F::from(41u32));
        assert_both_ok(&VarBoundCircuit, &ok2);

        let bad = Assignment::new()
            .set("x", F::from(42u32))
            .set("y", F::from(41u32));
        assert_both_fail(&VarBoundCircuit, &bad);
    }

    /// q == a / b and q * b == a, with a, b secret.
    struct DivCircuit;

    impl Circuit<F> for DivCircuit {
        fn declare(&self, layout: &mut Layout) {
            layout.secret("a");
            layout.secret("b");
        }

        fn define<B: Builder<Field = F>>(
            &self,
            api: &mut B,
            inputs: &Inputs,
        ) -> core::result::Result<(), FrontendError> {
            let a = inputs.get("a");
            let b = inputs.get("b");
            let q = api.div(&a, &b);
            let back = api.mul(&q, &b);
            api.assert_is_equal(Input::from(&back), Input::from(&a));
            Ok(())
        }
    }

    #[test]
    fn test_div_circuit() {
        let good = Assignment::new()
            .set("a", F::from(12u32))
            .set("b", F::from(3u32));
        assert_both_ok(&DivCircuit, &good);

        // division by zero fails at solve
        let bad = Assignment::new().set("a", F::from(12u32)).set("b", F::zero());
        assert_both_fail(&DivCircuit, &bad);
    }

    /// out == select(s, a, b) with everything secret except out.
    struct SelectCircuit;

    impl Circuit<F> for SelectCircuit {
        fn declare(&self, layout: &mut Layout) {
            layout.public("out");
            layout.secret("s");
            layout.secret("a");
            layout.secret("b");
        }

        fn define<B: Builder<Field = F>>(
            &self,
            api: &mut B,
            inputs: &Inputs,
        ) -> core::result::Result<(), FrontendError> {
            let s = inputs.get("s");
            let a = inputs.get("a");
            let b = inputs.get("b");
            let out = inputs.get("out");
            let picked = api.select(&s, &a, &b);
            api.assert_is_equal(Input::from(&picked), Input::from(&out));
            Ok(())
        }
    }

    #[test]
    fn test_select_identity() {
        for (s, expected) in [(1u32, 7u32), (0u32, 11u32)] {
            let asg = Assignment::new()
                .set("s", F::from(s))
                .set("a", F::from(7u32))
                .set("b", F::from(11u32))
                .set("out", F::from(expected));
            assert_both_ok(&SelectCircuit, &asg);
        }

        // a non-boolean selector is rejected
        let bad = Assignment::new()
            .set("s", F::from(2u32))
            .set("a", F::from(7u32))
            .set("b", F::from(11u32))
            .set("out", F::from(7u32));
        assert_both_fail(&SelectCircuit, &bad);
    }

    /// All three boolean gates at once: x ^ y, x | y, x & y.
    struct BooleanOpsCircuit;

    impl Circuit<F> for BooleanOpsCircuit {
        fn declare(&self, layout: &mut Layout) {
            layout.public("xor");
            layout.public("or");
            layout.public("and");
            layout.secret("x");
            layout.secret("y");
        }

        fn define<B: Builder<Field = F>>(
            &self,
            api: &mut B,
            inputs: &Inputs,
        ) -> core::result::Result<(), FrontendError> {
            let x = inputs.get("x");
            let y = inputs.get("y");
            let x_xor_y = api.xor((&x).into(), (&y).into());
            let x_or_y = api.or((&x).into(), (&y).into());
            let x_and_y = api.and(&x, &y);
            api.assert_is_equal(Input::from(&x_xor_y), Input::from(&inputs.get("xor")));
            api.assert_is_equal(Input::from(&x_or_y), Input::from(&inputs.get("or")));
            api.assert_is_equal(Input::from(&x_and_y), Input::from(&inputs.get("and")));
            Ok(())
        }
    }

    #[test]
    fn test_boolean_ops_truth_table() {
        for (x, y) in [(0u32, 0u32), (0, 1), (1, 0), (1, 1)] {
            let asg = Assignment::new()
                .set("x", F::from(x))
                .set("y", F::from(y))
                .set("xor", F::from(x ^ y))
                .set("or", F::from(x | y))
                .set("and", F::from(x & y));
            assert_both_ok(&BooleanOpsCircuit, &asg);
        }

        let bad = Assignment::new()
            .set("x", F::one())
            .set("y", F::one())
            .set("xor", F::one())
            .set("or", F::one())
            .set("and", F::one());
        assert_both_fail(&BooleanOpsCircuit, &bad);
    }

    /// out == lookup2(s0, s1, 10, 11, 12, 13).
    struct Lookup2Circuit;

    impl Circuit<F> for Lookup2Circuit {
        fn declare(&self, layout: &mut Layout) {
            layout.public("out");
            layout.secret("s0");
            layout.secret("s1");
        }

        fn define<B: Builder<Field = F>>(
            &self,
            api: &mut B,
            inputs: &Inputs,
        ) -> core::result::Result<(), FrontendError> {
            let s0 = inputs.get("s0");
            let s1 = inputs.get("s1");
            let out = inputs.get("out");
            let picked = api.lookup2(&s0, &s1, 10u64, 11u64, 12u64, 13u64);
            api.assert_is_equal(Input::from(&picked), Input::from(&out));
            Ok(())
        }
    }

    #[test]
    fn test_lookup2() {
        for (s0, s1, expected) in [(0u32, 0u32, 10u32), (1, 0, 11), (0, 1, 12), (1, 1, 13)] {
            let asg = Assignment::new()
                .set("s0", F::from(s0))
                .set("s1", F::from(s1))
                .set("out", F::from(expected));
            assert_both_ok(&Lookup2Circuit, &asg);
        }
    }

    /// The compiled output is identical across back-to-back compilations.
    #[test]
    fn test_compile_determinism() {
        let opt = CompileOption {
            check_determinism: true,
            ..Default::default()
        };
        let a = compile::<_, SparseBuilder<F>>(&CubeCircuit, &opt).unwrap();
        let b = compile::<_, SparseBuilder<F>>(&CubeCircuit, &opt).unwrap();
        assert_eq!(a, b);

        let c = compile::<_, R1csBuilder<F>>(&CubeCircuit, &opt).unwrap();
        let d = compile::<_, R1csBuilder<F>>(&CubeCircuit, &opt).unwrap();
        assert_eq!(c, d);
    }

    /// Semantic commutativity: differently-shaped circuits solve to the same
    /// wire values.
    struct SumLeft;
    struct SumRight;

    impl Circuit<F> for SumLeft {
        fn declare(&self, layout: &mut Layout) {
            layout.public("out");
            layout.secret("a");
            layout.secret("b");
        }

        fn define<B: Builder<Field = F>>(
            &self,
            api: &mut B,
            inputs: &Inputs,
        ) -> core::result::Result<(), FrontendError> {
            let a = inputs.get("a");
            let b = inputs.get("b");
            let prod = api.mul(&a, &b);
            let s = api.add(&prod, &a);
            api.assert_is_equal(Input::from(&s), Input::from(&inputs.get("out")));
            Ok(())
        }
    }

    impl Circuit<F> for SumRight {
        fn declare(&self, layout: &mut Layout) {
            layout.public("out");
            layout.secret("a");
            layout.secret("b");
        }

        fn define<B: Builder<Field = F>>(
            &self,
            api: &mut B,
            inputs: &Inputs,
        ) -> core::result::Result<(), FrontendError> {
            let a = inputs.get("a");
            let b = inputs.get("b");
            let prod = api.mul(&b, &a);
            let s = api.add(&a, &prod);
            api.assert_is_equal(Input::from(&s), Input::from(&inputs.get("out")));
            Ok(())
        }
    }

    #[test]
    fn test_add_mul_commute_semantically() {
        // 5 * 7 + 5 == 40
        let asg = Assignment::new()
            .set("a", F::from(5u32))
            .set("b", F::from(7u32))
            .set("out", F::from(40u32));
        assert_both_ok(&SumLeft, &asg);
        assert_both_ok(&SumRight, &asg);
    }

    /// An unsatisfied constraint carries rendered debug info.
    #[test]
    fn test_unsatisfied_constraint_reports_debug_info() {
        let registry = HintRegistry::new();
        let opt = CompileOption::default();
        let cs = compile::<_, R1csBuilder<F>>(&CubeCircuit, &opt).unwrap();
        let witness = cs
            .witness_from(
                &Assignment::new()
                    .set("y", F::from(27u32))
                    .set("x", F::from(2u32)),
            )
            .unwrap();
        match cs.solve(&witness, &registry).unwrap_err() {
            SolverError::UnsatisfiedConstraint { debug, .. } => {
                let msg = debug.expect("assertion constraints carry debug info");
                assert!(msg.contains("=="), "unexpected message: {}", msg);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    /// Custom hints evaluate through the registry.
    struct CustomHintCircuit;

    impl Circuit<F> for CustomHintCircuit {
        fn declare(&self, layout: &mut Layout) {
            layout.secret("x");
        }

        fn define<B: Builder<Field = F>>(
            &self,
            api: &mut B,
            inputs: &Inputs,
        ) -> core::result::Result<(), FrontendError> {
            let x = inputs.get("x");
            // the hinted value is x + 1, checked by a constraint
            let y = api.new_hint(crate::frontend::hints::HintKind::Custom(42), &[(&x).into()], &[]);
            let expected = api.add(&x, 1u64);
            api.assert_is_equal(Input::from(&y), Input::from(&expected));
            Ok(())
        }
    }

    #[test]
    fn test_custom_hint_via_registry() {
        let mut registry = HintRegistry::new();
        registry.register(
            42,
            std::sync::Arc::new(|inputs: &[F]| Ok(inputs[0].add(&F::one()))),
        );
        let opt = CompileOption::default();

        let cs = compile::<_, SparseBuilder<F>>(&CustomHintCircuit, &opt).unwrap();
        let witness = cs
            .witness_from(&Assignment::new().set("x", F::from(9u32)))
            .unwrap();
        let solution = cs.solve(&witness, &registry).unwrap();
        // the hinted wire holds x + 1
        assert!(solution.contains(&F::from(10u32)));

        // solving without the registered hint fails
        let empty = HintRegistry::new();
        assert!(matches!(
            cs.solve(&witness, &empty).unwrap_err(),
            SolverError::HintFailure(_)
        ));
    }

    /// Deferred prints resolve against the solved witness.
    struct PrintCircuit;

    impl Circuit<F> for PrintCircuit {
        fn declare(&self, layout: &mut Layout) {
            layout.secret("x");
        }

        fn define<B: Builder<Field = F>>(
            &self,
            api: &mut B,
            inputs: &Inputs,
        ) -> core::result::Result<(), FrontendError> {
            let x = inputs.get("x");
            let sq = api.mul(&x, &x);
            api.println("x = {}, x^2 = {}", &[(&x).into(), (&sq).into()]);
            api.assert_is_equal(Input::from(&sq), 49u64.into());
            Ok(())
        }
    }

    #[test]
    fn test_println_resolution() {
        let registry = HintRegistry::new();
        let opt = CompileOption::default();
        let cs = compile::<_, R1csBuilder<F>>(&PrintCircuit, &opt).unwrap();
        let witness = cs
            .witness_from(&Assignment::new().set("x", F::from(7u32)))
            .unwrap();
        let solution = cs.solve(&witness, &registry).unwrap();
        let logs = cs.resolve_logs(&solution);
        assert_eq!(logs, vec!["x = 7, x^2 = 49".to_string()]);
    }
}
