use crate::frontend::api::Api;
use crate::frontend::coeffs::{CoeffPool, COEFF_ID_ONE, COEFF_ID_TWO};
use crate::frontend::debug_info::{Chunk, DebugInfo, LogEntry};
use crate::frontend::errors::{FrontendError, SolverError};
use crate::frontend::hints::{HintKind, HintRecord};
use crate::frontend::linear_expression::LinearExpression;
use crate::frontend::term::{Term, Visibility};
use crate::frontend::variable::{Input, Variable};
use crate::frontend::{Assignment, Builder, CompileOption, CsIndex, VarIndex};
use silex_algebra::prelude::*;
use std::collections::{BTreeMap, HashSet};

/// One rank-1 constraint `<L> * <R> = <O>`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct R1c {
    /// The left expression.
    pub l: LinearExpression,
    /// The right expression.
    pub r: LinearExpression,
    /// The output expression.
    pub o: LinearExpression,
}

/// A compiled rank-1 constraint system. Wire numbering:
/// `[one, public..., secret..., internal...]`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct R1cs<F> {
    /// The coefficient pool.
    pub pool: CoeffPool<F>,
    /// The constraints, in emission order.
    pub constraints: Vec<R1c>,
    /// Number of public input variables (the ONE wire not included).
    pub nb_public: usize,
    /// Number of secret input variables.
    pub nb_secret: usize,
    /// Number of internal variables.
    pub nb_internal: usize,
    /// Public leaf names, in allocation order (the witness ABI).
    pub public_names: Vec<String>,
    /// Secret leaf names, in allocation order (the witness ABI).
    pub secret_names: Vec<String>,
    /// Hint records keyed by their internal output wire.
    pub hints: BTreeMap<VarIndex, HintRecord>,
    /// Constraint index to debug-info index.
    pub debug_map: BTreeMap<CsIndex, usize>,
    /// The debug-info table.
    pub debug_infos: Vec<DebugInfo>,
    /// The deferred circuit prints.
    pub logs: Vec<LogEntry>,
}

impl<F: Scalar> R1cs<F> {
    /// The total number of wires, the ONE wire included.
    pub fn nb_vars(&self) -> usize {
        1 + self.nb_public + self.nb_secret + self.nb_internal
    }

    /// Map a term to its global wire index.
    pub fn wire_index(&self, term: Term) -> usize {
        match term.visibility() {
            Visibility::Virtual => 0,
            Visibility::Public => 1 + term.wire_id(),
            Visibility::Secret => 1 + self.nb_public + term.wire_id(),
            Visibility::Internal => 1 + self.nb_public + self.nb_secret + term.wire_id(),
        }
    }

    /// Build the input vector `[public... , secret...]` from a named
    /// assignment, in allocation order.
    pub fn witness_from(
        &self,
        assignment: &Assignment<F>,
    ) -> core::result::Result<Vec<F>, SolverError> {
        let mut witness = Vec::with_capacity(self.nb_public + self.nb_secret);
        for name in self.public_names.iter().chain(self.secret_names.iter()) {
            let value = assignment
                .values
                .get(name)
                .ok_or_else(|| SolverError::MissingAssignment(name.clone()))?;
            witness.push(*value);
        }
        Ok(witness)
    }
}

/// The R1CS-flavor constraint system builder.
pub struct R1csBuilder<F: Scalar> {
    pub(crate) pool: CoeffPool<F>,
    pub(crate) constraints: Vec<R1c>,
    nb_internal: usize,
    public_names: Vec<String>,
    secret_names: Vec<String>,
    hints: BTreeMap<VarIndex, HintRecord>,
    debug_map: BTreeMap<CsIndex, usize>,
    debug_infos: Vec<DebugInfo>,
    logs: Vec<LogEntry>,
    booleans: HashSet<(Visibility, VarIndex)>,
}

impl<F: Scalar> Default for R1csBuilder<F> {
    fn default() -> Self {
        R1csBuilder {
            pool: CoeffPool::new(),
            constraints: Vec::new(),
            nb_internal: 0,
            public_names: Vec::new(),
            secret_names: Vec::new(),
            hints: BTreeMap::new(),
            debug_map: BTreeMap::new(),
            debug_infos: Vec::new(),
            logs: Vec::new(),
            booleans: HashSet::new(),
        }
    }
}

impl<F: Scalar> R1csBuilder<F> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    fn constant_var(&mut self, value: F) -> Variable {
        if value.is_zero() {
            return Variable::from_expression(LinearExpression::new());
        }
        let coeff = self.pool.intern(&value);
        Variable::from_term(Term::pack(0, coeff, Visibility::Virtual))
    }

    fn add_constraint(&mut self, constraint: R1c, debug: Option<DebugInfo>) {
        if let Some(info) = debug {
            let debug_id = self.debug_infos.len();
            self.debug_infos.push(info);
            self.debug_map.insert(self.constraints.len(), debug_id);
        }
        self.constraints.push(constraint);
    }

    #[track_caller]
    fn caller_location() -> String {
        let loc = core::panic::Location::caller();
        format!("{}:{}", loc.file(), loc.line())
    }

    fn one_expression(&self) -> LinearExpression {
        LinearExpression::from_term(Term::pack(0, COEFF_ID_ONE, Visibility::Virtual))
    }
}

impl<F: Scalar> Api for R1csBuilder<F> {
    type Field = F;

    fn to_variable(&mut self, input: Input<F>) -> Variable {
        match input {
            Input::Var(v) => v,
            Input::Const(c) => self.constant_var(c),
        }
    }

    fn new_internal(&mut self) -> Variable {
        let id = self.nb_internal;
        self.nb_internal += 1;
        Variable::from_term(Term::pack(id, COEFF_ID_ONE, Visibility::Internal))
    }

    fn sum(&mut self, inputs: &[Input<F>]) -> Variable {
        let mut terms = Vec::new();
        for input in inputs.iter() {
            let v = self.to_variable(input.clone());
            terms.extend_from_slice(&v.le.0);
        }
        let reduced = LinearExpression(terms).reduce(&mut self.pool);
        Variable::from_expression(reduced)
    }

    fn neg_input(&mut self, input: Input<F>) -> Variable {
        let v = self.to_variable(input);
        let negated = v.le.negate(&mut self.pool);
        Variable::from_expression(negated)
    }

    fn mul_pair(&mut self, a: Input<F>, b: Input<F>) -> Variable {
        let a = self.to_variable(a);
        let b = self.to_variable(b);

        match (self.constant_value(&a), self.constant_value(&b)) {
            (Some(ca), Some(cb)) => self.constant_var(ca.mul(&cb)),
            (Some(ca), None) => {
                if ca.is_zero() {
                    return self.constant_var(F::zero());
                }
                let lambda = self.pool.intern(&ca);
                Variable::from_expression(b.le.scale(&mut self.pool, lambda))
            }
            (None, Some(cb)) => {
                if cb.is_zero() {
                    return self.constant_var(F::zero());
                }
                let lambda = self.pool.intern(&cb);
                Variable::from_expression(a.le.scale(&mut self.pool, lambda))
            }
            (None, None) => {
                let res = self.new_internal();
                self.add_constraint(
                    R1c {
                        l: a.le,
                        r: b.le,
                        o: res.le.clone(),
                    },
                    None,
                );
                res
            }
        }
    }

    #[track_caller]
    fn assert_mul(&mut self, a: Input<F>, b: Input<F>, c: Input<F>) {
        let a = self.to_variable(a);
        let b = self.to_variable(b);
        let c = self.to_variable(c);

        if let (Some(ca), Some(cb), Some(cc)) = (
            self.constant_value(&a),
            self.constant_value(&b),
            self.constant_value(&c),
        ) {
            assert_eq!(ca.mul(&cb), cc, "unsatisfiable constant constraint");
            return;
        }

        let debug = DebugInfo::new(
            Self::caller_location(),
            vec![
                Chunk::Expr(a.le.clone()),
                Chunk::Text(" * ".to_string()),
                Chunk::Expr(b.le.clone()),
                Chunk::Text(" == ".to_string()),
                Chunk::Expr(c.le.clone()),
            ],
        );
        self.add_constraint(
            R1c {
                l: a.le,
                r: b.le,
                o: c.le,
            },
            Some(debug),
        );
    }

    #[track_caller]
    fn xor(&mut self, a: Input<F>, b: Input<F>) -> Variable {
        let a = self.to_variable(a);
        let b = self.to_variable(b);
        self.assert_is_boolean(Input::Var(a.clone()));
        self.assert_is_boolean(Input::Var(b.clone()));

        match (self.constant_value(&a), self.constant_value(&b)) {
            (Some(ca), _) => {
                return if ca.is_zero() {
                    b
                } else {
                    self.sub(1u32, &b)
                };
            }
            (_, Some(cb)) => {
                return if cb.is_zero() {
                    a
                } else {
                    self.sub(1u32, &a)
                };
            }
            _ => {}
        }

        // 2a * b == a + b - c
        let res = self.new_internal();
        self.mark_boolean(&res);
        let mut o_terms = res.le.negate(&mut self.pool).0;
        o_terms.extend_from_slice(&a.le.0);
        o_terms.extend_from_slice(&b.le.0);
        let o = LinearExpression(o_terms).reduce(&mut self.pool);
        let doubled = a.le.scale(&mut self.pool, COEFF_ID_TWO);
        self.add_constraint(
            R1c {
                l: doubled,
                r: b.le,
                o,
            },
            None,
        );
        res
    }

    #[track_caller]
    fn or(&mut self, a: Input<F>, b: Input<F>) -> Variable {
        let a = self.to_variable(a);
        let b = self.to_variable(b);
        self.assert_is_boolean(Input::Var(a.clone()));
        self.assert_is_boolean(Input::Var(b.clone()));

        match (self.constant_value(&a), self.constant_value(&b)) {
            (Some(ca), _) => {
                return if ca.is_zero() {
                    b
                } else {
                    self.to_variable(Input::Const(F::one()))
                };
            }
            (_, Some(cb)) => {
                return if cb.is_zero() {
                    a
                } else {
                    self.to_variable(Input::Const(F::one()))
                };
            }
            _ => {}
        }

        // a * b == a + b - c
        let res = self.new_internal();
        self.mark_boolean(&res);
        let mut o_terms = res.le.negate(&mut self.pool).0;
        o_terms.extend_from_slice(&a.le.0);
        o_terms.extend_from_slice(&b.le.0);
        let o = LinearExpression(o_terms).reduce(&mut self.pool);
        self.add_constraint(
            R1c {
                l: a.le,
                r: b.le,
                o,
            },
            None,
        );
        res
    }

    #[track_caller]
    fn assert_is_equal(&mut self, a: Input<F>, b: Input<F>) {
        let a = self.to_variable(a);
        let b = self.to_variable(b);

        if let (Some(ca), Some(cb)) = (self.constant_value(&a), self.constant_value(&b)) {
            assert_eq!(ca, cb, "unsatisfiable constant constraint");
            return;
        }

        // 1 * (a - b) == 0
        let mut diff_terms = a.le.0.clone();
        diff_terms.extend(b.le.negate(&mut self.pool).0);
        let diff = LinearExpression(diff_terms).reduce(&mut self.pool);

        let debug = DebugInfo::new(
            Self::caller_location(),
            vec![
                Chunk::Expr(a.le),
                Chunk::Text(" == ".to_string()),
                Chunk::Expr(b.le),
            ],
        );
        let one = self.one_expression();
        self.add_constraint(
            R1c {
                l: one,
                r: diff,
                o: LinearExpression::new(),
            },
            Some(debug),
        );
    }

    #[track_caller]
    fn assert_is_boolean(&mut self, a: Input<F>) {
        let a = self.to_variable(a);

        if let Some(c) = self.constant_value(&a) {
            assert!(
                c.is_zero() || c == F::one(),
                "assert_is_boolean failed on the constant {:?}",
                c.into_biguint()
            );
            return;
        }
        if self.is_marked_boolean(&a) {
            return;
        }
        self.mark_boolean(&a);

        // a * (1 - a) == 0
        let mut r_terms = vec![Term::pack(0, COEFF_ID_ONE, Visibility::Virtual)];
        r_terms.extend(a.le.negate(&mut self.pool).0);
        let r = LinearExpression(r_terms).reduce(&mut self.pool);

        let debug = DebugInfo::new(
            Self::caller_location(),
            vec![
                Chunk::Expr(a.le.clone()),
                Chunk::Text(" == (0|1)".to_string()),
            ],
        );
        self.add_constraint(
            R1c {
                l: a.le,
                r,
                o: LinearExpression::new(),
            },
            Some(debug),
        );
    }

    fn mark_boolean(&mut self, v: &Variable) {
        if let Some(term) = v.single_term() {
            self.booleans.insert(term.wire_key());
        }
    }

    fn is_marked_boolean(&self, v: &Variable) -> bool {
        v.single_term()
            .map(|t| self.booleans.contains(&t.wire_key()))
            .unwrap_or(false)
    }

    fn new_hint(&mut self, kind: HintKind, inputs: &[Input<F>], params: &[u64]) -> Variable {
        let input_exprs: Vec<LinearExpression> = inputs
            .iter()
            .map(|input| self.to_variable(input.clone()).le)
            .collect();
        let out = self.new_internal();
        let wire = out.single_term().unwrap().wire_id();
        self.hints.insert(
            wire,
            HintRecord {
                kind,
                wire,
                inputs: input_exprs,
                params: params.to_vec(),
            },
        );
        out
    }

    fn println(&mut self, format: &str, vars: &[Input<F>]) {
        let to_resolve = vars
            .iter()
            .map(|input| self.to_variable(input.clone()).le)
            .collect();
        self.logs.push(LogEntry {
            format: format.to_string(),
            to_resolve,
        });
    }

    fn constant_value(&self, v: &Variable) -> Option<F> {
        if !v.is_constant() {
            return None;
        }
        let mut acc = F::zero();
        for term in v.le.iter() {
            acc.add_assign(&self.pool.get(term.coeff_id()));
        }
        Some(acc)
    }
}

impl<F: Scalar> Builder for R1csBuilder<F> {
    type Output = R1cs<F>;

    fn new_public_variable(&mut self, name: &str) -> Variable {
        let id = self.public_names.len();
        self.public_names.push(name.to_string());
        Variable::from_term(Term::pack(id, COEFF_ID_ONE, Visibility::Public))
    }

    fn new_secret_variable(&mut self, name: &str) -> Variable {
        let id = self.secret_names.len();
        self.secret_names.push(name.to_string());
        Variable::from_term(Term::pack(id, COEFF_ID_ONE, Visibility::Secret))
    }

    fn finalize(self, opt: &CompileOption) -> core::result::Result<R1cs<F>, FrontendError> {
        if !opt.ignore_unconstrained_inputs {
            let mut used: HashSet<(Visibility, VarIndex)> = HashSet::new();
            let mut mark = |le: &LinearExpression| {
                for term in le.iter() {
                    used.insert(term.wire_key());
                }
            };
            for c in self.constraints.iter() {
                mark(&c.l);
                mark(&c.r);
                mark(&c.o);
            }
            for hint in self.hints.values() {
                for input in hint.inputs.iter() {
                    mark(input);
                }
            }
            for (id, name) in self.public_names.iter().enumerate() {
                if !used.contains(&(Visibility::Public, id)) {
                    return Err(FrontendError::UnconstrainedInput(name.clone()));
                }
            }
            for (id, name) in self.secret_names.iter().enumerate() {
                if !used.contains(&(Visibility::Secret, id)) {
                    return Err(FrontendError::UnconstrainedInput(name.clone()));
                }
            }
        }

        Ok(R1cs {
            nb_public: self.public_names.len(),
            nb_secret: self.secret_names.len(),
            nb_internal: self.nb_internal,
            pool: self.pool,
            constraints: self.constraints,
            public_names: self.public_names,
            secret_names: self.secret_names,
            hints: self.hints,
            debug_map: self.debug_map,
            debug_infos: self.debug_infos,
            logs: self.logs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use silex_algebra::bls12_381::BLSScalar;

    type F = BLSScalar;

    #[test]
    fn test_constant_folding() {
        let mut b = R1csBuilder::<F>::new();
        let x = b.add(2u32, 3u32);
        assert_eq!(b.constant_value(&x), Some(F::from(5u32)));

        let y = b.mul(4u32, &x);
        assert_eq!(b.constant_value(&y), Some(F::from(20u32)));
        assert!(b.constraints.is_empty());
    }

    #[test]
    fn test_mul_by_constant_rescales_without_constraint() {
        let mut b = R1csBuilder::<F>::new();
        let x = b.new_secret_variable("x");
        let y = b.mul(3u32, &x);
        assert!(b.constraints.is_empty());
        assert_eq!(y.le.len(), 1);
        assert_eq!(b.pool.get(y.le.0[0].coeff_id()), F::from(3u32));
    }

    #[test]
    fn test_mul_of_variables_allocates_one_constraint() {
        let mut b = R1csBuilder::<F>::new();
        let x = b.new_secret_variable("x");
        let y = b.new_secret_variable("y");
        let _ = b.mul(&x, &y);
        assert_eq!(b.constraints.len(), 1);
    }

    #[test]
    fn test_boolean_assertion_is_idempotent() {
        let mut b = R1csBuilder::<F>::new();
        let x = b.new_secret_variable("x");
        b.assert_is_boolean(Input::from(&x));
        b.assert_is_boolean(Input::from(&x));
        assert_eq!(b.constraints.len(), 1);
    }

    #[test]
    #[should_panic(expected = "unsatisfiable constant constraint")]
    fn test_constant_equality_mismatch_panics() {
        let mut b = R1csBuilder::<F>::new();
        b.assert_is_equal(Input::<F>::from(2u32), Input::<F>::from(3u32));
    }

    #[test]
    #[should_panic(expected = "inverse by constant(0)")]
    fn test_inverse_of_constant_zero_panics() {
        let mut b = R1csBuilder::<F>::new();
        let _ = b.inverse(0u32);
    }

    #[test]
    fn test_unconstrained_input_detection() {
        let mut b = R1csBuilder::<F>::new();
        let x = b.new_secret_variable("x");
        let _unused = b.new_secret_variable("y");
        let sq = b.mul(&x, &x);
        b.assert_is_equal(Input::from(&sq), Input::from(9u64));

        let err = b.finalize(&CompileOption::default()).unwrap_err();
        assert_eq!(err, FrontendError::UnconstrainedInput("y".to_string()));
    }

    #[test]
    fn test_unconstrained_input_ignored_with_option() {
        let mut b = R1csBuilder::<F>::new();
        let x = b.new_secret_variable("x");
        let _unused = b.new_secret_variable("y");
        let sq = b.mul(&x, &x);
        b.assert_is_equal(Input::from(&sq), Input::from(9u64));

        let opt = CompileOption {
            ignore_unconstrained_inputs: true,
            ..Default::default()
        };
        assert!(b.finalize(&opt).is_ok());
    }
}
