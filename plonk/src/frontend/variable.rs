use crate::frontend::linear_expression::LinearExpression;
use crate::frontend::term::{Term, Visibility};
use num_bigint::BigUint;
use silex_algebra::prelude::*;

/// A frontend handle over a wire combination. At the builder level a
/// variable is a [`LinearExpression`]; a constant is a single term on the
/// virtual ONE wire (the empty expression is the constant zero).
///
/// Whether a wire is boolean-constrained is not carried by the handle: the
/// builder keeps a side table keyed by wire, shared by every handle of the
/// same wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variable {
    pub(crate) le: LinearExpression,
}

impl Variable {
    /// Wrap a single term.
    pub fn from_term(term: Term) -> Self {
        Variable {
            le: LinearExpression::from_term(term),
        }
    }

    /// Wrap a linear expression.
    pub fn from_expression(le: LinearExpression) -> Self {
        Variable { le }
    }

    /// The underlying linear expression.
    pub fn expression(&self) -> &LinearExpression {
        &self.le
    }

    /// A variable is a compile-time constant when every term lives on the
    /// virtual ONE wire.
    pub fn is_constant(&self) -> bool {
        self.le.iter().all(|t| t.visibility() == Visibility::Virtual)
    }

    /// The single term of a non-constant variable of length one.
    pub(crate) fn single_term(&self) -> Option<Term> {
        if self.le.len() == 1 {
            Some(self.le.0[0])
        } else {
            None
        }
    }
}

/// An operand of a builder operation: a wire variable or a constant.
#[derive(Clone, Debug)]
pub enum Input<F> {
    /// A circuit variable.
    Var(Variable),
    /// A constant field element.
    Const(F),
}

impl<F: Scalar> Input<F> {
    /// Wrap a field constant.
    pub fn constant(value: F) -> Self {
        Input::Const(value)
    }
}

impl<F: Scalar> From<Variable> for Input<F> {
    fn from(v: Variable) -> Self {
        Input::Var(v)
    }
}

impl<F: Scalar> From<&Variable> for Input<F> {
    fn from(v: &Variable) -> Self {
        Input::Var(v.clone())
    }
}

impl<F: Scalar> From<u32> for Input<F> {
    fn from(v: u32) -> Self {
        Input::Const(F::from(v))
    }
}

impl<F: Scalar> From<u64> for Input<F> {
    fn from(v: u64) -> Self {
        Input::Const(F::from(v))
    }
}

impl<F: Scalar> From<i64> for Input<F> {
    fn from(v: i64) -> Self {
        if v < 0 {
            Input::Const(F::from(v.unsigned_abs()).neg())
        } else {
            Input::Const(F::from(v as u64))
        }
    }
}

impl<F: Scalar> From<&BigUint> for Input<F> {
    fn from(v: &BigUint) -> Self {
        Input::Const(F::from(v))
    }
}

impl<F: Scalar> From<BigUint> for Input<F> {
    fn from(v: BigUint) -> Self {
        Input::Const(F::from(&v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::coeffs::COEFF_ID_ONE;
    use silex_algebra::bls12_381::BLSScalar;

    type F = BLSScalar;

    #[test]
    fn test_is_constant() {
        let c = Variable::from_term(Term::pack(0, COEFF_ID_ONE, Visibility::Virtual));
        assert!(c.is_constant());

        let v = Variable::from_term(Term::pack(0, COEFF_ID_ONE, Visibility::Secret));
        assert!(!v.is_constant());

        let zero = Variable::from_expression(LinearExpression::new());
        assert!(zero.is_constant());
    }

    #[test]
    fn test_input_from_negative() {
        let input: Input<F> = (-2i64).into();
        match input {
            Input::Const(c) => assert_eq!(c, F::from(2u32).neg()),
            _ => panic!("expected a constant"),
        }
    }
}
