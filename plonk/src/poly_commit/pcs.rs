use crate::errors::Result;
use crate::poly_commit::field_polynomial::FpPolynomial;
use ark_std::fmt::Debug;
use serde::{Deserialize, Serialize};
use silex_algebra::prelude::*;
use silex_algebra::traits::Domain;

/// Serialize into bytes for transcript absorption.
pub trait ToBytes {
    /// Convert into bytes.
    fn to_bytes(&self) -> Vec<u8>;
}

/// Homomorphic group operations of polynomial commitments.
pub trait HomomorphicPolyComElem<S: Scalar>: Sized {
    /// Return the identity commitment.
    fn get_identity() -> Self;

    /// Add two commitments.
    fn add(&self, other: &Self) -> Self;

    /// Add a commitment in place.
    fn add_assign(&mut self, other: &Self);

    /// Subtract two commitments.
    fn sub(&self, other: &Self) -> Self;

    /// Multiply the committed polynomial by a scalar.
    fn mul(&self, exp: &S) -> Self;

    /// Multiply the committed polynomial by a scalar in place.
    fn mul_assign(&mut self, exp: &S);
}

/// A quotient-style opening proof for a single polynomial at a single point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OpeningProof<C, F> {
    /// Commitment to the quotient polynomial.
    pub h: C,
    /// The claimed evaluation.
    pub claimed_value: F,
}

/// A quotient-style opening proof for a batch of polynomials at one point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchOpeningProof<C, F> {
    /// Commitment to the quotient polynomial of the folded batch.
    pub h: C,
    /// The claimed evaluations, one per polynomial.
    pub claimed_values: Vec<F>,
}

/// Trait for polynomial commitment schemes.
pub trait PolyComScheme: Sized {
    /// The field of the committed polynomials.
    type Field: Domain;

    /// The type of commitments.
    type Commitment: Clone
        + Debug
        + PartialEq
        + Eq
        + Serialize
        + for<'de> Deserialize<'de>
        + ToBytes
        + HomomorphicPolyComElem<Self::Field>
        + Send
        + Sync;

    /// Return the maximal polynomial degree the scheme supports.
    fn max_degree(&self) -> usize;

    /// Commit to a polynomial in canonical form.
    fn commit(&self, polynomial: &FpPolynomial<Self::Field>) -> Result<Self::Commitment>;

    /// Open a polynomial at a point, producing the claimed value and a proof.
    fn open(
        &self,
        polynomial: &FpPolynomial<Self::Field>,
        point: &Self::Field,
    ) -> Result<OpeningProof<Self::Commitment, Self::Field>>;

    /// Verify an opening proof.
    fn verify(
        &self,
        commitment: &Self::Commitment,
        point: &Self::Field,
        proof: &OpeningProof<Self::Commitment, Self::Field>,
    ) -> Result<()>;

    /// Open a batch of polynomials at a single point with one quotient
    /// commitment. `commitments` feeds the fold-challenge derivation and
    /// must match the polynomials.
    fn batch_open(
        &self,
        polynomials: &[&FpPolynomial<Self::Field>],
        commitments: &[Self::Commitment],
        point: &Self::Field,
    ) -> Result<BatchOpeningProof<Self::Commitment, Self::Field>>;

    /// Verify a batch opening proof.
    fn batch_verify(
        &self,
        commitments: &[Self::Commitment],
        point: &Self::Field,
        proof: &BatchOpeningProof<Self::Commitment, Self::Field>,
    ) -> Result<()>;
}
