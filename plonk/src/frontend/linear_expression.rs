use crate::frontend::coeffs::{CoeffPool, COEFF_ID_ZERO};
use crate::frontend::term::Term;
use silex_algebra::prelude::*;

/// An ordered list of terms representing `sum_i c_i * x_i`. A term on the
/// virtual ONE wire contributes a constant.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinearExpression(pub Vec<Term>);

impl LinearExpression {
    /// The empty expression, evaluating to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// An expression of a single term.
    pub fn from_term(term: Term) -> Self {
        LinearExpression(vec![term])
    }

    /// The number of terms.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the expression has no terms.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the terms.
    pub fn iter(&self) -> core::slice::Iter<'_, Term> {
        self.0.iter()
    }

    /// Normalize the expression: merge terms on the same wire, drop
    /// zero-coefficient terms, and order terms by (visibility, wire id).
    /// The result is idempotent under `reduce`.
    pub fn reduce<F: Scalar>(&self, pool: &mut CoeffPool<F>) -> LinearExpression {
        let mut terms = self.0.clone();
        terms.sort_by_key(|t| t.wire_key());

        let mut reduced: Vec<Term> = Vec::with_capacity(terms.len());
        for term in terms {
            match reduced.last_mut() {
                Some(last) if last.wire_key() == term.wire_key() => {
                    let sum = pool.get(last.coeff_id()).add(&pool.get(term.coeff_id()));
                    *last = last.with_coeff(pool.intern(&sum));
                }
                _ => reduced.push(term),
            }
        }
        reduced.retain(|t| t.coeff_id() != COEFF_ID_ZERO);
        LinearExpression(reduced)
    }

    /// Return the negated expression.
    pub fn negate<F: Scalar>(&self, pool: &mut CoeffPool<F>) -> LinearExpression {
        LinearExpression(
            self.0
                .iter()
                .map(|t| t.with_coeff(pool.intern_neg(t.coeff_id())))
                .collect(),
        )
    }

    /// Return the expression with every coefficient multiplied by the
    /// coefficient of `lambda`.
    pub fn scale<F: Scalar>(
        &self,
        pool: &mut CoeffPool<F>,
        lambda: crate::frontend::coeffs::CoeffId,
    ) -> LinearExpression {
        LinearExpression(
            self.0
                .iter()
                .map(|t| t.with_coeff(pool.intern_mul(t.coeff_id(), lambda)))
                .collect(),
        )
    }
}
