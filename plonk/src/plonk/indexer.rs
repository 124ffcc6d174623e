use crate::errors::{PlonkError, Result};
use crate::frontend::sparse::SparseR1cs;
use crate::poly_commit::{
    fft::Radix2Domain,
    field_polynomial::FpPolynomial,
    kzg_poly_com::KZGCommitmentScheme,
    pcs::{BatchOpeningProof, OpeningProof, PolyComScheme, ToBytes},
};
use silex_algebra::prelude::*;
use silex_algebra::traits::{Domain, Pairing};
use silex_algebra::utils::u64_limbs_from_bytes;
use std::collections::HashMap;

/// A PLONK proof.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(bound(
    serialize = "PCS::Commitment: serde::Serialize, PCS::Field: serde::Serialize",
    deserialize = "PCS::Commitment: serde::Deserialize<'de>, PCS::Field: serde::Deserialize<'de>"
))]
pub struct PlonkProof<PCS: PolyComScheme> {
    /// Commitments to the blinded wire-value polynomials l, r, o.
    pub lro: [PCS::Commitment; 3],
    /// Commitment to the blinded permutation accumulator Z.
    pub z: PCS::Commitment,
    /// Commitments to the three quotient chunks h1, h2, h3.
    pub h: [PCS::Commitment; 3],
    /// Batched opening at zeta of
    /// {folded h, linearization, l, r, o, s1, s2}.
    pub batched_proof: BatchOpeningProof<PCS::Commitment, PCS::Field>,
    /// Opening of Z at zeta * omega.
    pub z_shifted_opening: OpeningProof<PCS::Commitment, PCS::Field>,
}

/// A PLONK proof over a given polynomial commitment scheme.
pub type PlonkPf<PCS> = PlonkProof<PCS>;

/// The number of scalars opened by the batched proof.
pub(crate) const N_BATCHED_OPENINGS: usize = 7;

impl<P: Pairing> PlonkProof<KZGCommitmentScheme<P>>
where
    P::ScalarField: Domain,
{
    /// Serialize into the fixed wire layout: the nine commitments in
    /// protocol order, then the batched claimed values and the shifted
    /// claimed value as big-endian scalars.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        for c in self.lro.iter() {
            bytes.extend(c.to_bytes());
        }
        bytes.extend(self.z.to_bytes());
        for c in self.h.iter() {
            bytes.extend(c.to_bytes());
        }
        bytes.extend(self.batched_proof.h.to_bytes());
        for value in self.batched_proof.claimed_values.iter() {
            let mut be = value.to_bytes();
            be.reverse();
            bytes.extend(be);
        }
        bytes.extend(self.z_shifted_opening.h.to_bytes());
        let mut be = self.z_shifted_opening.claimed_value.to_bytes();
        be.reverse();
        bytes.extend(be);
        bytes
    }

    /// Deserialize from the fixed wire layout.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        use crate::poly_commit::kzg_poly_com::KZGCommitment;

        let point_len = P::G1::COMPRESSED_LEN;
        let scalar_len = P::ScalarField::bytes_len();
        let expected = 9 * point_len + (N_BATCHED_OPENINGS + 1) * scalar_len;
        if bytes.len() != expected {
            return Err(PlonkError::Algebra(AlgebraError::DeserializationError));
        }

        let mut offset = 0;
        let read_point = |bytes: &[u8], offset: &mut usize| -> Result<KZGCommitment<P::G1>> {
            let p = P::G1::from_compressed_bytes(&bytes[*offset..*offset + point_len])
                .map_err(PlonkError::Algebra)?;
            *offset += point_len;
            Ok(KZGCommitment(p))
        };
        let read_scalar = |bytes: &[u8], offset: &mut usize| -> Result<P::ScalarField> {
            let mut le = bytes[*offset..*offset + scalar_len].to_vec();
            le.reverse();
            *offset += scalar_len;
            P::ScalarField::from_bytes(&le).map_err(PlonkError::Algebra)
        };

        let lro = [
            read_point(bytes, &mut offset)?,
            read_point(bytes, &mut offset)?,
            read_point(bytes, &mut offset)?,
        ];
        let z = read_point(bytes, &mut offset)?;
        let h = [
            read_point(bytes, &mut offset)?,
            read_point(bytes, &mut offset)?,
            read_point(bytes, &mut offset)?,
        ];
        let batched_h = read_point(bytes, &mut offset)?;
        let mut claimed_values = Vec::with_capacity(N_BATCHED_OPENINGS);
        for _ in 0..N_BATCHED_OPENINGS {
            claimed_values.push(read_scalar(bytes, &mut offset)?);
        }
        let shifted_h = read_point(bytes, &mut offset)?;
        let shifted_value = read_scalar(bytes, &mut offset)?;

        Ok(PlonkProof {
            lro,
            z,
            h,
            batched_proof: BatchOpeningProof {
                h: batched_h,
                claimed_values,
            },
            z_shifted_opening: OpeningProof {
                h: shifted_h,
                claimed_value: shifted_value,
            },
        })
    }
}

/// The verifier key: selector and permutation commitments plus the domain
/// constants the transcript and the gate identity depend on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "PCS::Commitment: serde::Serialize, PCS::Field: serde::Serialize",
    deserialize = "PCS::Commitment: serde::Deserialize<'de>, PCS::Field: serde::Deserialize<'de>"
))]
pub struct PlonkVerifierKey<PCS: PolyComScheme> {
    /// Commitments to the selector polynomials `[ql, qr, qm, qo, qk]`.
    pub q_commitments: [PCS::Commitment; 5],
    /// Commitments to the permutation polynomials `[s1, s2, s3]`.
    pub s_commitments: [PCS::Commitment; 3],
    /// The non-residue shifters `[u, u^2]` partitioning the wire copies.
    pub shifter: [PCS::Field; 2],
    /// The generator of the evaluation domain.
    pub generator: PCS::Field,
    /// The (padded) number of gates.
    pub cs_size: usize,
    /// The number of public inputs.
    pub nb_public: usize,
}

/// The prover key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "PCS::Commitment: serde::Serialize, PCS::Field: serde::Serialize",
    deserialize = "PCS::Commitment: serde::Deserialize<'de>, PCS::Field: serde::Deserialize<'de>"
))]
pub struct PlonkProverKey<PCS: PolyComScheme> {
    /// The evaluation domain of size the padded gate count.
    pub domain_n: Radix2Domain<PCS::Field>,
    /// The 4x domain carrying the odd-coset quotient evaluations.
    pub domain_h: Radix2Domain<PCS::Field>,
    /// The selector polynomials `[ql, qr, qm, qo, qk]` in canonical basis.
    pub cq: [FpPolynomial<PCS::Field>; 5],
    /// The qk selector in Lagrange basis; its public-input prefix is
    /// substituted at prove time.
    pub lqk: Vec<PCS::Field>,
    /// The permutation polynomials `[s1, s2, s3]` in canonical basis.
    pub cs: [FpPolynomial<PCS::Field>; 3],
    /// The permutation polynomials `[s1, s2, s3]` in Lagrange basis.
    pub ls: [Vec<PCS::Field>; 3],
    /// The wire columns `[l, r, o]` as solution indices, including the
    /// public placeholder rows and the padding.
    pub wiring: [Vec<usize>; 3],
    /// The number of public inputs.
    pub nb_public: usize,
    /// The verifier key.
    pub verifier_key: PlonkVerifierKey<PCS>,
}

impl<PCS: PolyComScheme> PlonkProverKey<PCS> {
    /// Return the verifier key.
    pub fn get_verifier_key(self) -> PlonkVerifierKey<PCS> {
        self.verifier_key
    }

    /// Return a reference to the verifier key.
    pub fn get_verifier_key_ref(&self) -> &PlonkVerifierKey<PCS> {
        &self.verifier_key
    }
}

/// Choose the non-residue shifter `u`: non-zero, a quadratic non-residue,
/// and with `u^(2n) != 1` so that `{H, uH, u^2 H}` are pairwise disjoint.
/// The choice is deterministic from a fixed seed.
pub(crate) fn choose_shifter<F: Scalar>(n: usize) -> F {
    let mut prng = ChaChaRng::from_seed([0u8; 32]);
    let q_minus_1_half = u64_limbs_from_bytes(&F::field_size_minus_one_half());
    loop {
        let u = F::random(&mut prng);
        if u.is_zero() {
            continue;
        }
        if u.pow(&q_minus_1_half) == F::one() {
            continue;
        }
        if u.pow(&[2 * n as u64]) == F::one() {
            continue;
        }
        return u;
    }
}

/// Precompute the prover and verifier parameters for a compiled gate system.
pub fn indexer<PCS: PolyComScheme>(
    cs: &SparseR1cs<PCS::Field>,
    pcs: &PCS,
) -> Result<PlonkProverKey<PCS>>
where
    PCS::Field: Domain,
{
    let nb_public = cs.nb_public;
    let nb_rows = nb_public + cs.size();
    // the quotient chunks have length n + 2, which requires 3(n+2) <= 4n
    let domain_n = Radix2Domain::<PCS::Field>::new(nb_rows.max(8))?;
    let n = domain_n.cardinality;
    let domain_h = Radix2Domain::<PCS::Field>::new(4 * n)?;

    if pcs.max_degree() < n + 2 {
        return Err(PlonkError::SetupError);
    }

    // selectors in Lagrange basis: the first nb_public rows are the
    // public-input placeholders ql = -1, the tail is zero padding
    let gate_selectors = cs.selector_vectors();
    let mut lq: [Vec<PCS::Field>; 5] = core::array::from_fn(|_| vec![PCS::Field::zero(); n]);
    for row in 0..nb_public {
        lq[0][row] = PCS::Field::one().neg();
    }
    for (k, column) in gate_selectors.iter().enumerate() {
        for (j, value) in column.iter().enumerate() {
            lq[k][nb_public + j] = *value;
        }
    }
    let cq: [FpPolynomial<PCS::Field>; 5] =
        core::array::from_fn(|k| FpPolynomial::ffti(&domain_n, &lq[k]));
    let q_commitments: [PCS::Commitment; 5] = [
        pcs.commit(&cq[0])?,
        pcs.commit(&cq[1])?,
        pcs.commit(&cq[2])?,
        pcs.commit(&cq[3])?,
        pcs.commit(&cq[4])?,
    ];

    // wire columns over the padded domain; the placeholder row i reads the
    // i-th public wire on l, everything else defaults to wire 0
    let gate_wiring = cs.wiring_columns();
    let mut wiring: [Vec<usize>; 3] = core::array::from_fn(|_| vec![0usize; n]);
    for row in 0..nb_public {
        wiring[0][row] = row;
    }
    for (col, column) in gate_wiring.iter().enumerate() {
        for (j, wire) in column.iter().enumerate() {
            wiring[col][nb_public + j] = *wire;
        }
    }

    // the copy-constraint permutation: positions holding the same wire form
    // a cycle over the 3n wire slots
    let mut positions: HashMap<usize, Vec<usize>> = HashMap::new();
    for (col, column) in wiring.iter().enumerate() {
        for (row, wire) in column.iter().enumerate() {
            positions.entry(*wire).or_default().push(col * n + row);
        }
    }
    let mut perm = vec![0usize; 3 * n];
    for cycle in positions.values() {
        for (j, position) in cycle.iter().enumerate() {
            perm[*position] = cycle[(j + 1) % cycle.len()];
        }
    }

    let u = choose_shifter::<PCS::Field>(n);
    let shifter = [u, u.square()];
    let k = [PCS::Field::one(), shifter[0], shifter[1]];

    // encode the permutation into the three s polynomials:
    // s_col(w^row) = k[col'] * w^row' where (col', row') = perm(col, row)
    let mut group = Vec::with_capacity(n);
    let mut acc = PCS::Field::one();
    for _ in 0..n {
        group.push(acc);
        acc.mul_assign(&domain_n.generator);
    }
    let ls: [Vec<PCS::Field>; 3] = core::array::from_fn(|col| {
        (0..n)
            .map(|row| {
                let target = perm[col * n + row];
                k[target / n].mul(&group[target % n])
            })
            .collect()
    });
    let cs_polys: [FpPolynomial<PCS::Field>; 3] =
        core::array::from_fn(|col| FpPolynomial::ffti(&domain_n, &ls[col]));
    let s_commitments: [PCS::Commitment; 3] = [
        pcs.commit(&cs_polys[0])?,
        pcs.commit(&cs_polys[1])?,
        pcs.commit(&cs_polys[2])?,
    ];

    let verifier_key = PlonkVerifierKey {
        q_commitments,
        s_commitments,
        shifter,
        generator: domain_n.generator,
        cs_size: n,
        nb_public,
    };

    Ok(PlonkProverKey {
        lqk: lq[4].clone(),
        cq,
        cs: cs_polys,
        ls,
        wiring,
        nb_public,
        domain_n,
        domain_h,
        verifier_key,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use silex_algebra::bls12_381::BLSScalar;

    type F = BLSScalar;

    #[test]
    fn test_choose_shifter() {
        let n = 16usize;
        let u = choose_shifter::<F>(n);
        let q_minus_1_half = u64_limbs_from_bytes(&F::field_size_minus_one_half());
        assert!(!u.is_zero());
        assert_ne!(u.pow(&q_minus_1_half), F::one());
        assert_ne!(u.pow(&[2 * n as u64]), F::one());
        // deterministic
        assert_eq!(u, choose_shifter::<F>(n));
    }
}
