use crate::frontend::hints::HintKind;
use crate::frontend::variable::{Input, Variable};
use num_bigint::BigUint;
use silex_algebra::prelude::*;

/// The operation surface shared by the two builder flavors.
///
/// Operations accept anything convertible to [`Input`]: a variable, a raw
/// integer, or a big integer. Constant-only contradictions (division by a
/// known zero, a non-0/1 constant in a boolean context, an oversized bound)
/// are programmer bugs and panic; the compile driver traps the panic and
/// reports it as a compile error.
///
/// The low-level emitters (`sum`, `neg`, `mul`, `assert_mul`, `xor`, `or`,
/// the assertions and the hint allocator) are flavor-specific; everything
/// else derives from them.
pub trait Api {
    /// The constraint field.
    type Field: Scalar;

    /// Convert an operand into a variable, interning constants.
    fn to_variable(&mut self, input: Input<Self::Field>) -> Variable;

    /// Allocate a fresh internal wire.
    fn new_internal(&mut self) -> Variable;

    /// Return the sum of the operands. The R1CS flavor returns the merged
    /// linear expression without a constraint; the PLONK flavor binds
    /// expressions of more than one term to a fresh wire.
    fn sum(&mut self, inputs: &[Input<Self::Field>]) -> Variable;

    /// Return the negation of the operand; constants fold.
    fn neg_input(&mut self, input: Input<Self::Field>) -> Variable;

    /// Return the product of two operands. Emits a constraint only when
    /// both are non-constant.
    fn mul_pair(&mut self, a: Input<Self::Field>, b: Input<Self::Field>) -> Variable;

    /// Constrain `<a> * <b> == <c>` without allocating a wire.
    fn assert_mul(
        &mut self,
        a: Input<Self::Field>,
        b: Input<Self::Field>,
        c: Input<Self::Field>,
    );

    /// Return `a XOR b`; both operands are constrained boolean.
    fn xor(&mut self, a: Input<Self::Field>, b: Input<Self::Field>) -> Variable;

    /// Return `a OR b`; both operands are constrained boolean.
    fn or(&mut self, a: Input<Self::Field>, b: Input<Self::Field>) -> Variable;

    /// Constrain `a == b`. Panics when both are constants and differ.
    fn assert_is_equal(&mut self, a: Input<Self::Field>, b: Input<Self::Field>);

    /// Constrain the operand to 0 or 1. Idempotent: a wire already marked
    /// boolean is not constrained again.
    fn assert_is_boolean(&mut self, a: Input<Self::Field>);

    /// Mark a wire boolean without emitting a constraint.
    fn mark_boolean(&mut self, v: &Variable);

    /// Whether the wire of `v` is already boolean-constrained.
    fn is_marked_boolean(&self, v: &Variable) -> bool;

    /// Declare an out-of-band computation; returns the hinted output wire.
    fn new_hint(
        &mut self,
        kind: HintKind,
        inputs: &[Input<Self::Field>],
        params: &[u64],
    ) -> Variable;

    /// Record a deferred print; `{}` placeholders resolve at solve time.
    fn println(&mut self, format: &str, vars: &[Input<Self::Field>]);

    /// The constant value of a variable, when it is one.
    fn constant_value(&self, v: &Variable) -> Option<Self::Field>;

    /// The number of bits used by bit-decomposition defaults.
    fn bit_len(&self) -> usize {
        Self::Field::num_bits()
    }

    /// The constant 0.
    fn zero(&mut self) -> Variable {
        self.to_variable(Input::Const(Self::Field::zero()))
    }

    /// The constant 1.
    fn one(&mut self) -> Variable {
        self.to_variable(Input::Const(Self::Field::one()))
    }

    /// Return `a + b`.
    fn add(
        &mut self,
        a: impl Into<Input<Self::Field>>,
        b: impl Into<Input<Self::Field>>,
    ) -> Variable {
        self.sum(&[a.into(), b.into()])
    }

    /// Return `-a`.
    fn neg(&mut self, a: impl Into<Input<Self::Field>>) -> Variable {
        self.neg_input(a.into())
    }

    /// Return `a - b`.
    fn sub(
        &mut self,
        a: impl Into<Input<Self::Field>>,
        b: impl Into<Input<Self::Field>>,
    ) -> Variable {
        let neg_b = self.neg_input(b.into());
        self.sum(&[a.into(), Input::Var(neg_b)])
    }

    /// Return `a - b_0 - b_1 - ...`.
    fn sub_many(
        &mut self,
        a: impl Into<Input<Self::Field>>,
        bs: &[Input<Self::Field>],
    ) -> Variable {
        let mut inputs = vec![a.into()];
        for b in bs {
            let neg_b = self.neg_input(b.clone());
            inputs.push(Input::Var(neg_b));
        }
        self.sum(&inputs)
    }

    /// Return `a * b`.
    fn mul(
        &mut self,
        a: impl Into<Input<Self::Field>>,
        b: impl Into<Input<Self::Field>>,
    ) -> Variable {
        self.mul_pair(a.into(), b.into())
    }

    /// Return the product of the operands, as a left fold of pairwise
    /// multiplications.
    fn mul_many(&mut self, inputs: &[Input<Self::Field>]) -> Variable {
        assert!(!inputs.is_empty(), "mul_many of no operands");
        let mut acc = self.to_variable(inputs[0].clone());
        for input in inputs[1..].iter() {
            acc = self.mul_pair(Input::Var(acc), input.clone());
        }
        acc
    }

    /// Return `1/a`. Emits `a * a^-1 == 1` with the inverse supplied by a
    /// hint. Panics on a constant zero.
    #[track_caller]
    fn inverse(&mut self, a: impl Into<Input<Self::Field>>) -> Variable {
        let a = self.to_variable(a.into());
        if let Some(c) = self.constant_value(&a) {
            let inv = c
                .inv()
                .unwrap_or_else(|_| panic!("inverse by constant(0)"));
            return self.to_variable(Input::Const(inv));
        }
        let res = self.new_hint(HintKind::Inverse, &[Input::Var(a.clone())], &[]);
        self.assert_mul(Input::Var(a), Input::Var(res.clone()), 1u32.into());
        res
    }

    /// Return `a / b`, rejecting `b == 0`: emits `b * b^-1 == 1` and
    /// `a * b^-1 == q`.
    #[track_caller]
    fn div(
        &mut self,
        a: impl Into<Input<Self::Field>>,
        b: impl Into<Input<Self::Field>>,
    ) -> Variable {
        let a = self.to_variable(a.into());
        let b = self.to_variable(b.into());
        if let Some(cb) = self.constant_value(&b) {
            let inv = cb
                .inv()
                .unwrap_or_else(|_| panic!("div by constant(0)"));
            return self.mul_pair(Input::Var(a), Input::Const(inv));
        }
        let b_inv = self.inverse(b);
        self.mul_pair(Input::Var(a), Input::Var(b_inv))
    }

    /// Return `q` with `b * q == a`; does not reject `b == 0`.
    #[track_caller]
    fn div_unchecked(
        &mut self,
        a: impl Into<Input<Self::Field>>,
        b: impl Into<Input<Self::Field>>,
    ) -> Variable {
        let a = self.to_variable(a.into());
        let b = self.to_variable(b.into());
        if let Some(cb) = self.constant_value(&b) {
            let inv = cb
                .inv()
                .unwrap_or_else(|_| panic!("div by constant(0)"));
            return self.mul_pair(Input::Var(a), Input::Const(inv));
        }
        let q = self.new_internal();
        self.assert_mul(Input::Var(b), Input::Var(q.clone()), Input::Var(a));
        q
    }

    /// Return 1 when `a == 0` and 0 otherwise.
    #[track_caller]
    fn is_zero(&mut self, a: impl Into<Input<Self::Field>>) -> Variable {
        let a = self.to_variable(a.into());
        if let Some(c) = self.constant_value(&a) {
            let bit = if c.is_zero() {
                Self::Field::one()
            } else {
                Self::Field::zero()
            };
            return self.to_variable(Input::Const(bit));
        }

        // m * (1 - m) == 0    constrains m to be 0 or 1
        // a * m == 0          constrains m to be 0 if a != 0
        // _ = inverse(m + a)  constrains m to be 1 if a == 0
        let m = self.new_hint(HintKind::IsZero, &[Input::Var(a.clone())], &[]);
        self.assert_mul(Input::Var(a.clone()), Input::Var(m.clone()), 0u32.into());
        self.assert_is_boolean(Input::Var(m.clone()));
        let ma = self.add(&m, &a);
        let _ = self.inverse(ma);
        m
    }

    /// Return `a AND b`; both operands are constrained boolean.
    fn and(
        &mut self,
        a: impl Into<Input<Self::Field>>,
        b: impl Into<Input<Self::Field>>,
    ) -> Variable {
        let a = a.into();
        let b = b.into();
        self.assert_is_boolean(a.clone());
        self.assert_is_boolean(b.clone());
        self.mul_pair(a, b)
    }

    /// Return `a` when `s == 1` and `b` when `s == 0`; `s` is constrained
    /// boolean.
    #[track_caller]
    fn select(
        &mut self,
        s: impl Into<Input<Self::Field>>,
        a: impl Into<Input<Self::Field>>,
        b: impl Into<Input<Self::Field>>,
    ) -> Variable {
        let s = self.to_variable(s.into());
        let a = self.to_variable(a.into());
        let b = self.to_variable(b.into());
        self.assert_is_boolean(Input::Var(s.clone()));

        if let (Some(ca), Some(cb)) = (self.constant_value(&a), self.constant_value(&b)) {
            // s * (a - b) + b, with the difference folded
            let diff = ca.sub(&cb);
            let scaled = self.mul_pair(Input::Var(s), Input::Const(diff));
            return self.add(&scaled, &b);
        }

        // special case appearing in assert_is_less_or_equal
        if self.constant_value(&a).map_or(false, |c| c.is_zero()) {
            let not_s = self.sub(1u32, &s);
            return self.mul_pair(Input::Var(not_s), Input::Var(b));
        }

        let diff = self.sub(&a, &b);
        let scaled = self.mul_pair(Input::Var(s), Input::Var(diff));
        self.add(&scaled, &b)
    }

    /// Two-bit lookup: returns `i0` for `(s0,s1)=(0,0)`, `i1` for `(1,0)`,
    /// `i2` for `(0,1)` and `i3` for `(1,1)`.
    #[track_caller]
    fn lookup2(
        &mut self,
        s0: impl Into<Input<Self::Field>>,
        s1: impl Into<Input<Self::Field>>,
        i0: impl Into<Input<Self::Field>>,
        i1: impl Into<Input<Self::Field>>,
        i2: impl Into<Input<Self::Field>>,
        i3: impl Into<Input<Self::Field>>,
    ) -> Variable {
        let s0 = self.to_variable(s0.into());
        let s1 = self.to_variable(s1.into());
        let i0 = self.to_variable(i0.into());
        let i1 = self.to_variable(i1.into());
        let i2 = self.to_variable(i2.into());
        let i3 = self.to_variable(i3.into());

        self.assert_is_boolean(Input::Var(s0.clone()));
        self.assert_is_boolean(Input::Var(s1.clone()));

        // the two-bit lookup in three constraints:
        //   (1) (i3 - i2 - i1 + i0) * s1 == tmp1 - i1 + i0
        //   (2) tmp1 * s0 == tmp2
        //   (3) (i2 - i0) * s1 == res - tmp2 - i0
        let mut tmp1 = self.add(&i3, &i0);
        tmp1 = self.sub_many(&tmp1, &[Input::Var(i2.clone()), Input::Var(i1.clone())]);
        tmp1 = self.mul(&tmp1, &s1);
        tmp1 = self.add(&tmp1, &i1);
        let tmp1 = self.sub(&tmp1, &i0);
        let tmp2 = self.mul(&tmp1, &s0);
        let mut res = self.sub(&i2, &i0);
        res = self.mul(&res, &s1);
        self.sum(&[
            Input::Var(res),
            Input::Var(tmp2),
            Input::Var(i0),
        ])
    }

    /// Unpack the operand into `n` bits, least significant first. Each bit
    /// is boolean-constrained and `sum 2^i b_i == a` is enforced.
    #[track_caller]
    fn to_binary(&mut self, a: impl Into<Input<Self::Field>>, n: usize) -> Vec<Variable> {
        self.to_binary_with(a.into(), n, false)
    }

    /// `to_binary` with a flag skipping the per-bit boolean constraints,
    /// for callers enforcing booleanity another way.
    #[track_caller]
    fn to_binary_with(
        &mut self,
        a: Input<Self::Field>,
        n: usize,
        skip_boolean: bool,
    ) -> Vec<Variable> {
        assert!(n > 0, "invalid bit length");
        let a = self.to_variable(a);

        if let Some(c) = self.constant_value(&a) {
            let big: BigUint = c.into_biguint();
            return (0..n)
                .map(|i| {
                    let bit = Self::Field::from(big.bit(i as u64) as u64);
                    self.to_variable(Input::Const(bit))
                })
                .collect();
        }

        let mut bits = Vec::with_capacity(n);
        let mut weighted = Vec::with_capacity(n);
        let mut power = Self::Field::one();
        let two = Self::Field::from(2u32);
        for i in 0..n {
            let bit = self.new_hint(HintKind::IthBit, &[Input::Var(a.clone())], &[i as u64]);
            let w = self.mul_pair(Input::Var(bit.clone()), Input::Const(power));
            weighted.push(Input::Var(w));
            if !skip_boolean {
                self.assert_is_boolean(Input::Var(bit.clone()));
            }
            bits.push(bit);
            power.mul_assign(&two);
        }

        let acc = self.sum(&weighted);
        self.assert_is_equal(Input::Var(acc), Input::Var(a));
        bits
    }

    /// Pack little-endian bits into a field element; every bit is
    /// boolean-constrained.
    #[track_caller]
    fn from_binary(&mut self, bits: &[Variable]) -> Variable {
        assert!(!bits.is_empty(), "from_binary of no bits");
        let mut weighted = Vec::with_capacity(bits.len());
        let mut power = Self::Field::one();
        let two = Self::Field::from(2u32);
        for bit in bits.iter() {
            self.assert_is_boolean(Input::Var(bit.clone()));
            let w = self.mul_pair(Input::Var(bit.clone()), Input::Const(power));
            weighted.push(Input::Var(w));
            power.mul_assign(&two);
        }
        self.sum(&weighted)
    }

    /// Constrain `a != b` by forcing `(a - b)` to have an inverse.
    #[track_caller]
    fn assert_is_different(
        &mut self,
        a: impl Into<Input<Self::Field>>,
        b: impl Into<Input<Self::Field>>,
    ) {
        let d = self.sub(a, b);
        let _ = self.inverse(d);
    }

    /// Constrain `v <= bound`, interpreting both as integers of the field's
    /// bit length.
    #[track_caller]
    fn assert_is_less_or_equal(
        &mut self,
        v: impl Into<Input<Self::Field>>,
        bound: impl Into<Input<Self::Field>>,
    ) {
        let v = self.to_variable(v.into());
        let bound = self.to_variable(bound.into());
        match self.constant_value(&bound) {
            Some(c) => self.less_or_equal_constant(v, c.into_biguint()),
            None => self.less_or_equal_variable(v, bound),
        }
    }

    /// The constant-bound path of [`Api::assert_is_less_or_equal`]: the
    /// carry recurrence is specialized on the bits of the bound.
    #[track_caller]
    fn less_or_equal_constant(&mut self, a: Variable, bound: BigUint) {
        let nb_bits = self.bit_len();
        assert!(
            bound.bits() as usize <= nb_bits,
            "assert_is_less_or_equal: bound is too large, constraint will never be satisfied"
        );

        // these bits are not boolean-constrained here; the constraints below
        // enforce it where the bound requires
        let a_bits = self.to_binary_with(Input::Var(a), nb_bits, true);

        // number of trailing ones in the bound
        let mut t = 0;
        while t < nb_bits && bound.bit(t as u64) {
            t += 1;
        }

        // p[i] == 1 means a[j] == bound[j] for all j >= i
        let mut p = vec![None; nb_bits + 1];
        p[nb_bits] = Some(self.one());
        for i in (t..nb_bits).rev() {
            let prev = p[i + 1].clone().unwrap();
            p[i] = if bound.bit(i as u64) {
                Some(self.mul(&prev, &a_bits[i]))
            } else {
                Some(prev)
            };
        }

        for i in (0..nb_bits).rev() {
            if bound.bit(i as u64) {
                self.assert_is_boolean(Input::Var(a_bits[i].clone()));
            } else {
                // (1 - p[i+1] - a_i) * a_i == 0
                let prev = p[i + 1].clone().unwrap();
                let l = self.sub_many(
                    1u32,
                    &[Input::Var(prev), Input::Var(a_bits[i].clone())],
                );
                self.assert_mul(
                    Input::Var(l),
                    Input::Var(a_bits[i].clone()),
                    0u32.into(),
                );
            }
        }
    }

    /// The variable-bound path of [`Api::assert_is_less_or_equal`].
    #[track_caller]
    fn less_or_equal_variable(&mut self, a: Variable, bound: Variable) {
        let nb_bits = self.bit_len();

        let a_bits = self.to_binary_with(Input::Var(a), nb_bits, true);
        let bound_bits = self.to_binary(&bound, nb_bits);

        let mut p = vec![None; nb_bits + 1];
        p[nb_bits] = Some(self.one());

        for i in (0..nb_bits).rev() {
            // if bound[i] == 0 then p[i] = p[i+1] and t = p[i+1],
            // else p[i] = p[i+1] * a[i] and t = 0
            let prev = p[i + 1].clone().unwrap();
            let both = self.mul(&prev, &a_bits[i]);
            p[i] = Some(self.select(&bound_bits[i], &both, &prev));
            let t = self.select(&bound_bits[i], 0u32, &prev);

            // (1 - t - a_i) * a_i == 0; when bound[i] == 1 this is a plain
            // boolean constraint on a_i, and when bound[i] == 0 it also
            // forces a_i == 0 once the prefix matched
            let l = self.sub_many(
                1u32,
                &[Input::Var(t), Input::Var(a_bits[i].clone())],
            );
            self.mark_boolean(&a_bits[i]);
            self.assert_mul(
                Input::Var(l),
                Input::Var(a_bits[i].clone()),
                0u32.into(),
            );
        }
    }
}
