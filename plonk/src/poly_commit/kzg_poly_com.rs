use crate::errors::{PlonkError, Result};
use crate::poly_commit::{
    field_polynomial::FpPolynomial,
    pcs::{BatchOpeningProof, HomomorphicPolyComElem, OpeningProof, PolyComScheme, ToBytes},
};
use sha2::{Digest, Sha256};
use silex_algebra::prelude::*;
use silex_algebra::traits::{Domain, Pairing};

/// KZG commitment, a single point of the commitment group.
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq, Default)]
pub struct KZGCommitment<G>(pub G);

impl<G: Group> ToBytes for KZGCommitment<G> {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_compressed_bytes()
    }
}

impl<G: Group> HomomorphicPolyComElem<G::ScalarType> for KZGCommitment<G> {
    fn get_identity() -> Self {
        KZGCommitment(G::get_identity())
    }

    fn add(&self, other: &Self) -> Self {
        KZGCommitment(self.0.add(&other.0))
    }

    fn add_assign(&mut self, other: &Self) {
        self.0.add_assign(&other.0)
    }

    fn sub(&self, other: &Self) -> Self {
        KZGCommitment(self.0.sub(&other.0))
    }

    fn mul(&self, exp: &G::ScalarType) -> Self {
        KZGCommitment(self.0.mul(exp))
    }

    fn mul_assign(&mut self, exp: &G::ScalarType) {
        self.0 = self.0.mul(exp)
    }
}

/// KZG commitment scheme over a `Pairing` engine.
#[derive(Serialize, Deserialize)]
#[serde(bound(
    serialize = "P::G1: serde::Serialize, P::G2: serde::Serialize",
    deserialize = "P::G1: serde::Deserialize<'de>, P::G2: serde::Deserialize<'de>"
))]
pub struct KZGCommitmentScheme<P: Pairing> {
    /// Powers of the toxic secret in G1.
    pub public_parameter_group_1: Vec<P::G1>,
    /// The first two powers of the toxic secret in G2.
    pub public_parameter_group_2: Vec<P::G2>,
}

impl<P: Pairing> PartialEq for KZGCommitmentScheme<P> {
    fn eq(&self, other: &Self) -> bool {
        self.public_parameter_group_1 == other.public_parameter_group_1
            && self.public_parameter_group_2 == other.public_parameter_group_2
    }
}

impl<P: Pairing> Eq for KZGCommitmentScheme<P> {}

impl<P: Pairing> ark_std::fmt::Debug for KZGCommitmentScheme<P> {
    fn fmt(&self, f: &mut ark_std::fmt::Formatter<'_>) -> ark_std::fmt::Result {
        f.debug_struct("KZGCommitmentScheme")
            .field("max_degree", &(self.public_parameter_group_1.len() - 1))
            .finish()
    }
}

impl<P: Pairing> KZGCommitmentScheme<P> {
    /// Create a new instance of a KZG polynomial commitment scheme.
    /// `max_degree` - max degree of the polynomial;
    /// `prng` - pseudo-random generator.
    pub fn new<R: CryptoRng + RngCore>(max_degree: usize, prng: &mut R) -> KZGCommitmentScheme<P> {
        let s = P::ScalarField::random(prng);

        let mut public_parameter_group_1: Vec<P::G1> = Vec::with_capacity(max_degree + 1);
        let mut elem_g1 = P::G1::get_base();
        for _ in 0..=max_degree {
            public_parameter_group_1.push(elem_g1);
            elem_g1 = elem_g1.mul(&s);
        }

        let elem_g2 = P::G2::get_base();
        let public_parameter_group_2 = vec![elem_g2, elem_g2.mul(&s)];

        KZGCommitmentScheme {
            public_parameter_group_1,
            public_parameter_group_2,
        }
    }

    /// Serialize the parameters to unchecked bytes.
    pub fn to_unchecked_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = vec![];
        let len_1 = self.public_parameter_group_1.len() as u32;
        let len_2 = self.public_parameter_group_2.len() as u32;
        bytes.extend(len_1.to_le_bytes());
        bytes.extend(len_2.to_le_bytes());

        for i in &self.public_parameter_group_1 {
            bytes.extend(i.to_unchecked_bytes());
        }
        for i in &self.public_parameter_group_2 {
            bytes.extend(i.to_unchecked_bytes());
        }
        Ok(bytes)
    }

    /// Deserialize the parameters from unchecked bytes.
    pub fn from_unchecked_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 8 {
            return Err(PlonkError::Algebra(AlgebraError::DeserializationError));
        }
        let mut len_1_bytes = [0u8; 4];
        let mut len_2_bytes = [0u8; 4];
        len_1_bytes.copy_from_slice(&bytes[0..4]);
        len_2_bytes.copy_from_slice(&bytes[4..8]);
        let len_1 = u32::from_le_bytes(len_1_bytes) as usize;
        let len_2 = u32::from_le_bytes(len_2_bytes) as usize;
        let n_1 = P::G1::unchecked_size();
        let n_2 = P::G2::unchecked_size();

        if bytes.len() < 8 + n_1 * len_1 + n_2 * len_2 {
            return Err(PlonkError::Algebra(AlgebraError::DeserializationError));
        }
        let bytes_1 = &bytes[8..];
        let bytes_2 = &bytes[8 + (n_1 * len_1)..];
        let mut p1 = vec![];
        let mut p2 = vec![];

        for i in 0..len_1 {
            p1.push(
                P::G1::from_unchecked_bytes(&bytes_1[n_1 * i..n_1 * (i + 1)])
                    .map_err(PlonkError::Algebra)?,
            );
        }
        for i in 0..len_2 {
            p2.push(
                P::G2::from_unchecked_bytes(&bytes_2[n_2 * i..n_2 * (i + 1)])
                    .map_err(PlonkError::Algebra)?,
            );
        }

        Ok(Self {
            public_parameter_group_1: p1,
            public_parameter_group_2: p2,
        })
    }

    /// Derive the scalar folding a batch of openings at `point`, by hashing
    /// the point and the commitments of the batch.
    fn fold_challenge(point: &P::ScalarField, commitments: &[KZGCommitment<P::G1>]) -> P::ScalarField {
        let mut hasher = Sha256::new();
        hasher.update(b"gamma");
        let mut point_bytes = point.to_bytes();
        point_bytes.reverse();
        hasher.update(&point_bytes);
        for c in commitments.iter() {
            hasher.update(&c.to_bytes());
        }
        P::ScalarField::from_be_bytes_mod_order(&hasher.finalize())
    }

    /// Check `e(c - v * G1 + point * h, G2) == e(h, s * G2)`, the standard
    /// quotient-style opening equation.
    fn verify_quotient(
        &self,
        commitment: &P::G1,
        point: &P::ScalarField,
        value: &P::ScalarField,
        h: &P::G1,
    ) -> Result<()> {
        let g1_base = &self.public_parameter_group_1[0];
        let g2_base = &self.public_parameter_group_2[0];
        let g2_s = &self.public_parameter_group_2[1];

        let lhs = commitment.sub(&g1_base.mul(value)).add(&h.mul(point));
        let prod = P::product_of_pairings(&[lhs, h.neg()], &[*g2_base, *g2_s]);
        if prod == P::Gt::get_identity() {
            Ok(())
        } else {
            Err(PlonkError::VerificationError)
        }
    }
}

impl<P: Pairing> PolyComScheme for KZGCommitmentScheme<P>
where
    P::ScalarField: Domain,
{
    type Field = P::ScalarField;
    type Commitment = KZGCommitment<P::G1>;

    fn max_degree(&self) -> usize {
        self.public_parameter_group_1.len() - 1
    }

    fn commit(&self, polynomial: &FpPolynomial<Self::Field>) -> Result<Self::Commitment> {
        let coefs = polynomial.get_coefs_ref();
        let degree = polynomial.degree();

        if degree + 1 > self.public_parameter_group_1.len() {
            return Err(PlonkError::DegreeError);
        }

        let coefs_ref: Vec<&Self::Field> = coefs.iter().collect();
        let bases_ref: Vec<&P::G1> = self.public_parameter_group_1[0..degree + 1].iter().collect();

        Ok(KZGCommitment(P::G1::multi_exp(&coefs_ref, &bases_ref)))
    }

    fn open(
        &self,
        polynomial: &FpPolynomial<Self::Field>,
        point: &Self::Field,
    ) -> Result<OpeningProof<Self::Commitment, Self::Field>> {
        if polynomial.degree() > self.max_degree() {
            return Err(PlonkError::DegreeError);
        }
        let claimed_value = polynomial.eval(point);

        // (P(X) - P(point)) / (X - point)
        let numerator = polynomial.sub(&FpPolynomial::from_coefs(vec![claimed_value]));
        let vanishing = FpPolynomial::from_coefs(vec![point.neg(), Self::Field::one()]);
        let (quotient, remainder) = numerator.div_rem(&vanishing);
        if !remainder.is_zero() {
            return Err(PlonkError::PCSProveEvalError);
        }

        let h = self.commit(&quotient)?;
        Ok(OpeningProof { h, claimed_value })
    }

    fn verify(
        &self,
        commitment: &Self::Commitment,
        point: &Self::Field,
        proof: &OpeningProof<Self::Commitment, Self::Field>,
    ) -> Result<()> {
        self.verify_quotient(&commitment.0, point, &proof.claimed_value, &proof.h.0)
    }

    fn batch_open(
        &self,
        polynomials: &[&FpPolynomial<Self::Field>],
        commitments: &[Self::Commitment],
        point: &Self::Field,
    ) -> Result<BatchOpeningProof<Self::Commitment, Self::Field>> {
        if polynomials.is_empty() || polynomials.len() != commitments.len() {
            return Err(PlonkError::FuncParamsError);
        }
        let gamma = Self::fold_challenge(point, commitments);

        let claimed_values: Vec<Self::Field> =
            polynomials.iter().map(|p| p.eval(point)).collect();

        // fold the polynomials with powers of gamma
        let mut folded = (*polynomials[0]).clone();
        let mut power = gamma;
        for p in polynomials[1..].iter() {
            folded.add_assign(&p.mul_scalar(&power));
            power.mul_assign(&gamma);
        }

        let folded_value = folded.eval(point);
        let numerator = folded.sub(&FpPolynomial::from_coefs(vec![folded_value]));
        let vanishing = FpPolynomial::from_coefs(vec![point.neg(), Self::Field::one()]);
        let (quotient, remainder) = numerator.div_rem(&vanishing);
        if !remainder.is_zero() {
            return Err(PlonkError::PCSProveEvalError);
        }

        let h = self.commit(&quotient)?;
        Ok(BatchOpeningProof { h, claimed_values })
    }

    fn batch_verify(
        &self,
        commitments: &[Self::Commitment],
        point: &Self::Field,
        proof: &BatchOpeningProof<Self::Commitment, Self::Field>,
    ) -> Result<()> {
        if commitments.is_empty() || commitments.len() != proof.claimed_values.len() {
            return Err(PlonkError::FuncParamsError);
        }
        let gamma = Self::fold_challenge(point, commitments);

        let mut folded_commitment = commitments[0].0;
        let mut folded_value = proof.claimed_values[0];
        let mut power = gamma;
        for (c, v) in commitments[1..].iter().zip(proof.claimed_values[1..].iter()) {
            folded_commitment.add_assign(&c.0.mul(&power));
            folded_value.add_assign(&v.mul(&power));
            power.mul_assign(&gamma);
        }

        self.verify_quotient(&folded_commitment, point, &folded_value, &proof.h.0)
    }
}

/// The KZG commitment scheme over the BLS12-381 curve.
pub type KZGCommitmentSchemeBLS =
    KZGCommitmentScheme<silex_algebra::bls12_381::BLSPairingEngine>;

#[cfg(test)]
mod tests_kzg_impl {
    use super::*;
    use silex_algebra::bls12_381::{BLSPairingEngine, BLSScalar};

    type F = BLSScalar;

    fn check_public_parameters_generation<P: Pairing>()
    where
        P::ScalarField: Domain,
    {
        let param_size = 5;
        let mut prng = ChaChaRng::from_seed([0u8; 32]);
        let kzg = KZGCommitmentScheme::<P>::new(param_size, &mut prng);

        // Check parameters for G2
        let g2_base = kzg.public_parameter_group_2[0];
        let g2_power1 = kzg.public_parameter_group_2[1];

        // Check parameters for G1
        let g1_base = kzg.public_parameter_group_1[0];
        let g1_power1 = kzg.public_parameter_group_1[1];
        let g1_power2 = kzg.public_parameter_group_1[2];

        // e(g1^s, g2) == e(g1, g2^s)
        assert_eq!(
            P::pairing(&g1_power1, &g2_base),
            P::pairing(&g1_base, &g2_power1)
        );
        // e(g1^{s^2}, g2) == e(g1^s, g2^s)
        assert_eq!(
            P::pairing(&g1_power2, &g2_base),
            P::pairing(&g1_power1, &g2_power1)
        );
    }

    #[test]
    fn test_public_parameters() {
        check_public_parameters_generation::<BLSPairingEngine>();
    }

    #[test]
    fn test_srs_unchecked_bytes_round_trip() {
        let mut prng = ChaChaRng::from_seed([0u8; 32]);
        let kzg = KZGCommitmentSchemeBLS::new(8, &mut prng);
        let bytes = kzg.to_unchecked_bytes().unwrap();
        let kzg2 = KZGCommitmentSchemeBLS::from_unchecked_bytes(&bytes).unwrap();
        assert_eq!(kzg, kzg2);
    }

    #[test]
    fn test_commit_and_eval() {
        let mut prng = ChaChaRng::from_seed([1u8; 32]);
        let kzg = KZGCommitmentSchemeBLS::new(10, &mut prng);
        let poly = FpPolynomial::<F>::random(&mut prng, 10);
        let commitment = kzg.commit(&poly).unwrap();

        let point = F::random(&mut prng);
        let proof = kzg.open(&poly, &point).unwrap();
        assert_eq!(proof.claimed_value, poly.eval(&point));
        kzg.verify(&commitment, &point, &proof).unwrap();

        // a wrong claimed value must not verify
        let mut bad_proof = proof.clone();
        bad_proof.claimed_value.add_assign(&F::one());
        assert!(kzg.verify(&commitment, &point, &bad_proof).is_err());
    }

    #[test]
    fn test_batch_open() {
        let mut prng = ChaChaRng::from_seed([2u8; 32]);
        let kzg = KZGCommitmentSchemeBLS::new(16, &mut prng);

        let polys: Vec<FpPolynomial<F>> = (0..4)
            .map(|i| FpPolynomial::random(&mut prng, 8 + i))
            .collect();
        let commitments: Vec<_> = polys.iter().map(|p| kzg.commit(p).unwrap()).collect();
        let polys_ref: Vec<&FpPolynomial<F>> = polys.iter().collect();

        let point = F::random(&mut prng);
        let proof = kzg.batch_open(&polys_ref, &commitments, &point).unwrap();
        for (p, v) in polys.iter().zip(proof.claimed_values.iter()) {
            assert_eq!(p.eval(&point), *v);
        }
        kzg.batch_verify(&commitments, &point, &proof).unwrap();

        // tampering with one claimed value must fail
        let mut bad = proof.clone();
        bad.claimed_values[2].add_assign(&F::one());
        assert!(kzg.batch_verify(&commitments, &point, &bad).is_err());
    }

    #[test]
    fn test_degree_error() {
        let mut prng = ChaChaRng::from_seed([3u8; 32]);
        let kzg = KZGCommitmentSchemeBLS::new(4, &mut prng);
        let poly = FpPolynomial::<F>::random(&mut prng, 5);
        assert_eq!(kzg.commit(&poly), Err(PlonkError::DegreeError));
    }
}
