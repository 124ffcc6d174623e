use crate::frontend::api::Api;
use crate::frontend::coeffs::{
    CoeffId, CoeffPool, COEFF_ID_MINUS_ONE, COEFF_ID_ONE, COEFF_ID_ZERO,
};
use crate::frontend::debug_info::{Chunk, DebugInfo, LogEntry};
use crate::frontend::errors::{FrontendError, SolverError};
use crate::frontend::hints::{HintKind, HintRecord};
use crate::frontend::linear_expression::LinearExpression;
use crate::frontend::term::{Term, Visibility};
use crate::frontend::variable::{Input, Variable};
use crate::frontend::{Assignment, Builder, CompileOption, CsIndex, VarIndex};
use silex_algebra::prelude::*;
use std::collections::{BTreeMap, HashSet};

/// One PLONK gate row: `qL*l + qR*r + qM*l*r + qO*o + qK == 0` over at most
/// three wires.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Gate {
    /// The left wire.
    pub l: Term,
    /// The right wire.
    pub r: Term,
    /// The output wire.
    pub o: Term,
    /// The left selector.
    pub ql: CoeffId,
    /// The right selector.
    pub qr: CoeffId,
    /// The multiplication selector.
    pub qm: CoeffId,
    /// The output selector.
    pub qo: CoeffId,
    /// The constant selector.
    pub qk: CoeffId,
}

/// The unused-slot sentinel, pointing at the first solution wire with a zero
/// selector.
pub(crate) fn zero_term() -> Term {
    Term::pack(0, COEFF_ID_ZERO, Visibility::Virtual)
}

/// A compiled PLONK-style sparse constraint system. Wire numbering:
/// `[public..., secret..., internal...]`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SparseR1cs<F> {
    /// The coefficient pool.
    pub pool: CoeffPool<F>,
    /// The gates, in emission order.
    pub gates: Vec<Gate>,
    /// Number of public input variables.
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
    /// Gate index to debug-info index.
    pub debug_map: BTreeMap<CsIndex, usize>,
    /// The debug-info table.
    pub debug_infos: Vec<DebugInfo>,
    /// The deferred circuit prints.
    pub logs: Vec<LogEntry>,
}

impl<F: Scalar> SparseR1cs<F> {
    /// The number of gates.
    pub fn size(&self) -> usize {
        self.gates.len()
    }

    /// The total number of wires.
    pub fn nb_vars(&self) -> usize {
        self.nb_public + self.nb_secret + self.nb_internal
    }

    /// Map a term to its index in the solution vector
    /// `[public | secret | internal]`.
    pub fn wire_index(&self, term: Term) -> usize {
        match term.visibility() {
            Visibility::Public => term.wire_id(),
            Visibility::Secret => self.nb_public + term.wire_id(),
            Visibility::Internal => self.nb_public + self.nb_secret + term.wire_id(),
            Visibility::Virtual => 0,
        }
    }

    /// The per-gate selector value vectors `[ql, qr, qm, qo, qk]`, in the
    /// Lagrange sense: entry i is the selector of gate i.
    pub fn selector_vectors(&self) -> [Vec<F>; 5] {
        let mut ql = Vec::with_capacity(self.gates.len());
        let mut qr = Vec::with_capacity(self.gates.len());
        let mut qm = Vec::with_capacity(self.gates.len());
        let mut qo = Vec::with_capacity(self.gates.len());
        let mut qk = Vec::with_capacity(self.gates.len());
        for gate in self.gates.iter() {
            ql.push(self.pool.get(gate.ql));
            qr.push(self.pool.get(gate.qr));
            qm.push(self.pool.get(gate.qm));
            qo.push(self.pool.get(gate.qo));
            qk.push(self.pool.get(gate.qk));
        }
        [ql, qr, qm, qo, qk]
    }

    /// The per-gate wire columns `[l, r, o]` as global solution indices.
    pub fn wiring_columns(&self) -> [Vec<usize>; 3] {
        let mut l = Vec::with_capacity(self.gates.len());
        let mut r = Vec::with_capacity(self.gates.len());
        let mut o = Vec::with_capacity(self.gates.len());
        for gate in self.gates.iter() {
            l.push(self.wire_index(gate.l));
            r.push(self.wire_index(gate.r));
            o.push(self.wire_index(gate.o));
        }
        [l, r, o]
    }

    /// Build the input vector `[public..., secret...]` from a named
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

/// The PLONK-flavor constraint system builder. Linear expressions of k terms
/// are lowered by chaining k-1 two-input split gates over fresh internal
/// wires.
pub struct SparseBuilder<F: Scalar> {
    pub(crate) pool: CoeffPool<F>,
    pub(crate) gates: Vec<Gate>,
    nb_internal: usize,
    public_names: Vec<String>,
    secret_names: Vec<String>,
    hints: BTreeMap<VarIndex, HintRecord>,
    debug_map: BTreeMap<CsIndex, usize>,
    debug_infos: Vec<DebugInfo>,
    logs: Vec<LogEntry>,
    booleans: HashSet<(Visibility, VarIndex)>,
}

impl<F: Scalar> Default for SparseBuilder<F> {
    fn default() -> Self {
        SparseBuilder {
            pool: CoeffPool::new(),
            gates: Vec::new(),
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

impl<F: Scalar> SparseBuilder<F> {
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

    fn add_gate(&mut self, gate: Gate, debug: Option<DebugInfo>) {
        if let Some(info) = debug {
            let debug_id = self.debug_infos.len();
            self.debug_infos.push(info);
            self.debug_map.insert(self.gates.len(), debug_id);
        }
        self.gates.push(gate);
    }

    fn fresh_internal_term(&mut self) -> Term {
        let id = self.nb_internal;
        self.nb_internal += 1;
        Term::pack(id, COEFF_ID_ONE, Visibility::Internal)
    }

    /// Lower a reduced expression to a single term, chaining split gates
    /// over fresh internal wires. The trailing constant folds into the last
    /// gate's qK.
    fn lower_expression(&mut self, le: &LinearExpression) -> Term {
        let mut konst = F::zero();
        let mut wires: Vec<Term> = Vec::with_capacity(le.len());
        for term in le.iter() {
            if term.visibility() == Visibility::Virtual {
                konst.add_assign(&self.pool.get(term.coeff_id()));
            } else {
                wires.push(*term);
            }
        }

        match wires.len() {
            0 => {
                // a pure constant bound to a wire
                let o = self.fresh_internal_term();
                let qk = self.pool.intern(&konst);
                self.add_gate(
                    Gate {
                        l: zero_term(),
                        r: zero_term(),
                        o,
                        ql: COEFF_ID_ZERO,
                        qr: COEFF_ID_ZERO,
                        qm: COEFF_ID_ZERO,
                        qo: COEFF_ID_MINUS_ONE,
                        qk,
                    },
                    None,
                );
                o
            }
            1 if konst.is_zero() => wires[0],
            1 => {
                let o = self.fresh_internal_term();
                let qk = self.pool.intern(&konst);
                self.add_gate(
                    Gate {
                        l: wires[0],
                        r: zero_term(),
                        o,
                        ql: wires[0].coeff_id(),
                        qr: COEFF_ID_ZERO,
                        qm: COEFF_ID_ZERO,
                        qo: COEFF_ID_MINUS_ONE,
                        qk,
                    },
                    None,
                );
                o
            }
            _ => {
                let mut acc = wires[0];
                for (i, term) in wires[1..].iter().enumerate() {
                    let last = i + 2 == wires.len();
                    let qk = if last && !konst.is_zero() {
                        self.pool.intern(&konst)
                    } else {
                        COEFF_ID_ZERO
                    };
                    let o = self.fresh_internal_term();
                    self.add_gate(
                        Gate {
                            l: acc,
                            r: *term,
                            o,
                            ql: acc.coeff_id(),
                            qr: term.coeff_id(),
                            qm: COEFF_ID_ZERO,
                            qo: COEFF_ID_MINUS_ONE,
                            qk,
                        },
                        None,
                    );
                    acc = o;
                }
                acc
            }
        }
    }

    /// Lower a non-constant variable to a single term.
    fn to_term(&mut self, v: &Variable) -> Term {
        let reduced = v.le.reduce(&mut self.pool);
        self.lower_expression(&reduced)
    }

    #[track_caller]
    fn caller_location() -> String {
        let loc = core::panic::Location::caller();
        format!("{}:{}", loc.file(), loc.line())
    }

    /// Emit the gate `v - k == 0`.
    fn eq_const_gate(&mut self, v: &Variable, k: F, debug: DebugInfo) {
        let tv = self.to_term(v);
        let qk = self.pool.intern(&k.neg());
        self.add_gate(
            Gate {
                l: tv,
                r: zero_term(),
                o: zero_term(),
                ql: tv.coeff_id(),
                qr: COEFF_ID_ZERO,
                qm: COEFF_ID_ZERO,
                qo: COEFF_ID_ZERO,
                qk,
            },
            Some(debug),
        );
    }
}

impl<F: Scalar> Api for SparseBuilder<F> {
    type Field = F;

    fn to_variable(&mut self, input: Input<F>) -> Variable {
        match input {
            Input::Var(v) => v,
            Input::Const(c) => self.constant_var(c),
        }
    }

    fn new_internal(&mut self) -> Variable {
        Variable::from_term(self.fresh_internal_term())
    }

    fn sum(&mut self, inputs: &[Input<F>]) -> Variable {
        let mut terms = Vec::new();
        for input in inputs.iter() {
            let v = self.to_variable(input.clone());
            terms.extend_from_slice(&v.le.0);
        }
        let reduced = LinearExpression(terms).reduce(&mut self.pool);
        if reduced.len() <= 1 {
            return Variable::from_expression(reduced);
        }
        let bound = self.lower_expression(&reduced);
        Variable::from_term(bound)
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
                let ta = self.to_term(&a);
                let tb = self.to_term(&b);
                let qm = self.pool.intern_mul(ta.coeff_id(), tb.coeff_id());
                let o = self.fresh_internal_term();
                self.add_gate(
                    Gate {
                        l: ta,
                        r: tb,
                        o,
                        ql: COEFF_ID_ZERO,
                        qr: COEFF_ID_ZERO,
                        qm,
                        qo: COEFF_ID_MINUS_ONE,
                        qk: COEFF_ID_ZERO,
                    },
                    None,
                );
                Variable::from_term(o)
            }
        }
    }

    #[track_caller]
    fn assert_mul(&mut self, a: Input<F>, b: Input<F>, c: Input<F>) {
        let a = self.to_variable(a);
        let b = self.to_variable(b);
        let c = self.to_variable(c);

        let ca = self.constant_value(&a);
        let cb = self.constant_value(&b);
        let cc = self.constant_value(&c);

        if let (Some(ca), Some(cb), Some(cc)) = (ca, cb, cc) {
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

        // normalize so that a constant factor, if any, sits in `ca`
        let (a, b, ca, cb) = if cb.is_some() && ca.is_none() {
            (b, a, cb, ca)
        } else {
            (a, b, ca, cb)
        };

        match (ca, cb) {
            (Some(ca), None) => {
                // linear: ca * b - c == 0
                let tb = self.to_term(&b);
                let ca_id = self.pool.intern(&ca);
                let ql = self.pool.intern_mul(ca_id, tb.coeff_id());
                match cc {
                    Some(cc) => {
                        let qk = self.pool.intern(&cc.neg());
                        self.add_gate(
                            Gate {
                                l: tb,
                                r: zero_term(),
                                o: zero_term(),
                                ql,
                                qr: COEFF_ID_ZERO,
                                qm: COEFF_ID_ZERO,
                                qo: COEFF_ID_ZERO,
                                qk,
                            },
                            Some(debug),
                        );
                    }
                    None => {
                        let tc = self.to_term(&c);
                        let qo = self.pool.intern_neg(tc.coeff_id());
                        self.add_gate(
                            Gate {
                                l: tb,
                                r: zero_term(),
                                o: tc,
                                ql,
                                qr: COEFF_ID_ZERO,
                                qm: COEFF_ID_ZERO,
                                qo,
                                qk: COEFF_ID_ZERO,
                            },
                            Some(debug),
                        );
                    }
                }
            }
            (None, None) => {
                let ta = self.to_term(&a);
                let tb = self.to_term(&b);
                let qm = self.pool.intern_mul(ta.coeff_id(), tb.coeff_id());
                match cc {
                    Some(cc) => {
                        let qk = self.pool.intern(&cc.neg());
                        self.add_gate(
                            Gate {
                                l: ta,
                                r: tb,
                                o: zero_term(),
                                ql: COEFF_ID_ZERO,
                                qr: COEFF_ID_ZERO,
                                qm,
                                qo: COEFF_ID_ZERO,
                                qk,
                            },
                            Some(debug),
                        );
                    }
                    None => {
                        let tc = self.to_term(&c);
                        let qo = self.pool.intern_neg(tc.coeff_id());
                        self.add_gate(
                            Gate {
                                l: ta,
                                r: tb,
                                o: tc,
                                ql: COEFF_ID_ZERO,
                                qr: COEFF_ID_ZERO,
                                qm,
                                qo,
                                qk: COEFF_ID_ZERO,
                            },
                            Some(debug),
                        );
                    }
                }
            }
            _ => unreachable!("constant factors are normalized to the left"),
        }
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

        // 2ab - a - b + c == 0, a single gate
        let ta = self.to_term(&a);
        let tb = self.to_term(&b);
        let res = self.fresh_internal_term();
        self.booleans.insert(res.wire_key());
        let prod = self.pool.intern_mul(ta.coeff_id(), tb.coeff_id());
        let qm = self.pool.intern_mul(prod, crate::frontend::coeffs::COEFF_ID_TWO);
        let ql = self.pool.intern_neg(ta.coeff_id());
        let qr = self.pool.intern_neg(tb.coeff_id());
        self.add_gate(
            Gate {
                l: ta,
                r: tb,
                o: res,
                ql,
                qr,
                qm,
                qo: COEFF_ID_ONE,
                qk: COEFF_ID_ZERO,
            },
            None,
        );
        Variable::from_term(res)
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

        // ab - a - b + c == 0, a single gate
        let ta = self.to_term(&a);
        let tb = self.to_term(&b);
        let res = self.fresh_internal_term();
        self.booleans.insert(res.wire_key());
        let qm = self.pool.intern_mul(ta.coeff_id(), tb.coeff_id());
        let ql = self.pool.intern_neg(ta.coeff_id());
        let qr = self.pool.intern_neg(tb.coeff_id());
        self.add_gate(
            Gate {
                l: ta,
                r: tb,
                o: res,
                ql,
                qr,
                qm,
                qo: COEFF_ID_ONE,
                qk: COEFF_ID_ZERO,
            },
            None,
        );
        Variable::from_term(res)
    }

    #[track_caller]
    fn assert_is_equal(&mut self, a: Input<F>, b: Input<F>) {
        let a = self.to_variable(a);
        let b = self.to_variable(b);

        let ca = self.constant_value(&a);
        let cb = self.constant_value(&b);
        if let (Some(ca), Some(cb)) = (ca, cb) {
            assert_eq!(ca, cb, "unsatisfiable constant constraint");
            return;
        }

        let debug = DebugInfo::new(
            Self::caller_location(),
            vec![
                Chunk::Expr(a.le.clone()),
                Chunk::Text(" == ".to_string()),
                Chunk::Expr(b.le.clone()),
            ],
        );

        match (ca, cb) {
            (Some(k), None) => self.eq_const_gate(&b, k, debug),
            (None, Some(k)) => self.eq_const_gate(&a, k, debug),
            (None, None) => {
                // a - b == 0
                let ta = self.to_term(&a);
                let tb = self.to_term(&b);
                let qr = self.pool.intern_neg(tb.coeff_id());
                self.add_gate(
                    Gate {
                        l: ta,
                        r: tb,
                        o: zero_term(),
                        ql: ta.coeff_id(),
                        qr,
                        qm: COEFF_ID_ZERO,
                        qo: COEFF_ID_ZERO,
                        qk: COEFF_ID_ZERO,
                    },
                    Some(debug),
                );
            }
            (Some(_), Some(_)) => unreachable!("handled above"),
        }
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

        // c*t - c^2*t^2 == 0
        let ta = self.to_term(&a);
        let c2 = self.pool.intern_mul(ta.coeff_id(), ta.coeff_id());
        let qm = self.pool.intern_neg(c2);
        let debug = DebugInfo::new(
            Self::caller_location(),
            vec![
                Chunk::Expr(a.le.clone()),
                Chunk::Text(" == (0|1)".to_string()),
            ],
        );
        self.add_gate(
            Gate {
                l: ta,
                r: ta,
                o: zero_term(),
                ql: ta.coeff_id(),
                qr: COEFF_ID_ZERO,
                qm,
                qo: COEFF_ID_ZERO,
                qk: COEFF_ID_ZERO,
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
        let out = self.fresh_internal_term();
        self.hints.insert(
            out.wire_id(),
            HintRecord {
                kind,
                wire: out.wire_id(),
                inputs: input_exprs,
                params: params.to_vec(),
            },
        );
        Variable::from_term(out)
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

impl<F: Scalar> Builder for SparseBuilder<F> {
    type Output = SparseR1cs<F>;

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

    fn finalize(self, opt: &CompileOption) -> core::result::Result<SparseR1cs<F>, FrontendError> {
        if !opt.ignore_unconstrained_inputs {
            let mut used: HashSet<(Visibility, VarIndex)> = HashSet::new();
            for gate in self.gates.iter() {
                for term in [gate.l, gate.r, gate.o] {
                    if term.visibility() != Visibility::Virtual {
                        used.insert(term.wire_key());
                    }
                }
            }
            for hint in self.hints.values() {
                for input in hint.inputs.iter() {
                    for term in input.iter() {
                        used.insert(term.wire_key());
                    }
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

        Ok(SparseR1cs {
            nb_public: self.public_names.len(),
            nb_secret: self.secret_names.len(),
            nb_internal: self.nb_internal,
            pool: self.pool,
            gates: self.gates,
            public_names: self.public_names,
            secret_names: self.secret_names,
            hints: self.hints,
            debug_map: self.debug_map,
            debug_infos: self.debug_infos,
            logs: self.logs,
        })
    }
}
