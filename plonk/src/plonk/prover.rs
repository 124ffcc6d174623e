use crate::errors::{PlonkError, Result};
use crate::frontend::hints::HintRegistry;
use crate::frontend::sparse::SparseR1cs;
use crate::plonk::helpers::{batch_invert, blind_polynomial, first_lagrange_eval, PlonkChallenges};
use crate::plonk::indexer::{PlonkPf, PlonkProof, PlonkProverKey};
use crate::plonk::transcript::Transcript;
use crate::poly_commit::fft::{Decimation, Radix2Domain};
use crate::poly_commit::field_polynomial::FpPolynomial;
use crate::poly_commit::pcs::{HomomorphicPolyComElem, PolyComScheme, ToBytes};
use rayon::prelude::*;
use silex_algebra::prelude::*;
use silex_algebra::traits::Domain;

/// PLONK prover: produce a proof that the witness satisfies the gate system
/// `cs`, against the proving key `pk` and the commitment scheme `pcs`.
///
/// Randomness from `prng` only feeds the blinding polynomials; everything
/// else is deterministic, the challenges coming from a SHA-256 transcript
/// with the labels "gamma", "alpha" and "zeta". Commitments are computed in
/// parallel but always absorbed in canonical order.
pub fn prover<R: CryptoRng + RngCore, PCS: PolyComScheme + Sync>(
    prng: &mut R,
    pcs: &PCS,
    cs: &SparseR1cs<PCS::Field>,
    pk: &PlonkProverKey<PCS>,
    witness: &[PCS::Field],
    registry: &HintRegistry<PCS::Field>,
) -> Result<PlonkPf<PCS>>
where
    PCS::Field: Domain,
{
    let n = pk.domain_n.cardinality;

    // compute the full solution vector
    let solution = cs
        .solve(witness, registry)
        .map_err(|_| PlonkError::ProofErrorInvalidWitness)?;

    // round 1: wire values in Lagrange basis, then canonical, then blinded
    let ll: Vec<PCS::Field> = pk.wiring[0].iter().map(|w| solution[*w]).collect();
    let lr: Vec<PCS::Field> = pk.wiring[1].iter().map(|w| solution[*w]).collect();
    let lo: Vec<PCS::Field> = pk.wiring[2].iter().map(|w| solution[*w]).collect();

    let to_canonical = |values: &[PCS::Field]| -> Vec<PCS::Field> {
        let mut coefs = values.to_vec();
        pk.domain_n.fft_inverse(&mut coefs, Decimation::Dif, false);
        crate::poly_commit::fft::bit_reverse(&mut coefs);
        coefs
    };
    let mut cl = to_canonical(&ll);
    let mut cr = to_canonical(&lr);
    let mut co = to_canonical(&lo);
    blind_polynomial(prng, &mut cl, n, 1);
    blind_polynomial(prng, &mut cr, n, 1);
    blind_polynomial(prng, &mut co, n, 1);
    let bcl = FpPolynomial { coefs: cl };
    let bcr = FpPolynomial { coefs: cr };
    let bco = FpPolynomial { coefs: co };

    let (c_l, (c_r, c_o)) = rayon::join(
        || pcs.commit(&bcl),
        || rayon::join(|| pcs.commit(&bcr), || pcs.commit(&bco)),
    );
    let (c_l, c_r, c_o) = (c_l?, c_r?, c_o?);

    let mut transcript = Transcript::new(&["gamma", "alpha", "zeta"]);
    transcript.bind("gamma", &c_l.to_bytes())?;
    transcript.bind("gamma", &c_r.to_bytes())?;
    transcript.bind("gamma", &c_o.to_bytes())?;
    let gamma: PCS::Field = transcript.compute_field_challenge("gamma")?;
    let mut challenges = PlonkChallenges::new();
    challenges.insert_gamma(gamma);

    // round 2: the permutation accumulator
    let z_lagrange = compute_z(&ll, &lr, &lo, pk, &gamma);
    let mut cz = to_canonical(&z_lagrange);
    blind_polynomial(prng, &mut cz, n, 2);
    let bz = FpPolynomial { coefs: cz };
    let c_z = pcs.commit(&bz)?;
    transcript.bind("alpha", &c_z.to_bytes())?;
    let alpha: PCS::Field = transcript.compute_field_challenge("alpha")?;
    challenges.insert_alpha(alpha);

    // qk completed with the public inputs, in canonical basis
    let mut qk_full = pk.lqk.clone();
    qk_full[..pk.nb_public].copy_from_slice(&solution[..pk.nb_public]);
    let qk_full = to_canonical(&qk_full);

    // round 3: evaluate everything on the odd cosets of the 4n domain
    // (bit-reversed layout throughout)
    let eval_l = evaluate_odd_cosets(&bcl.coefs, &pk.domain_h);
    let eval_r = evaluate_odd_cosets(&bcr.coefs, &pk.domain_h);
    let eval_o = evaluate_odd_cosets(&bco.coefs, &pk.domain_h);
    let eval_z = evaluate_odd_cosets(&bz.coefs, &pk.domain_h);

    let constraints_ind = eval_constraints(pk, &eval_l, &eval_r, &eval_o, &qk_full);
    let constraints_ordering =
        eval_constraint_ordering(pk, &eval_z, &eval_l, &eval_r, &eval_o, challenges.get_gamma());
    let starts_at_one = eval_starts_at_one(pk, &eval_z);

    let (h1, h2, h3) = compute_h(
        pk,
        &constraints_ind,
        &constraints_ordering,
        &starts_at_one,
        challenges.get_alpha(),
    )?;

    let (c_h1, (c_h2, c_h3)) = rayon::join(
        || pcs.commit(&h1),
        || rayon::join(|| pcs.commit(&h2), || pcs.commit(&h3)),
    );
    let (c_h1, c_h2, c_h3) = (c_h1?, c_h2?, c_h3?);

    transcript.bind("zeta", &c_h1.to_bytes())?;
    transcript.bind("zeta", &c_h2.to_bytes())?;
    transcript.bind("zeta", &c_h3.to_bytes())?;
    let zeta: PCS::Field = transcript.compute_field_challenge("zeta")?;
    challenges.insert_zeta(zeta);

    // round 4: open Z at zeta * omega
    let zeta = *challenges.get_zeta();
    let zeta_shifted = zeta.mul(&pk.domain_n.generator);
    let z_shifted_opening = pcs.open(&bz, &zeta_shifted)?;
    let zu = z_shifted_opening.claimed_value;

    let l_zeta = bcl.eval(&zeta);
    let r_zeta = bcr.eval(&zeta);
    let o_zeta = bco.eval(&zeta);

    let linearization =
        compute_linearized_polynomial(pk, &l_zeta, &r_zeta, &o_zeta, &zu, &bz, &challenges);

    // folded h = h1 + zeta^(n+2) h2 + zeta^(2(n+2)) h3, and its commitment
    let zeta_power_m = zeta.pow(&[(n + 2) as u64]);
    let mut folded_h = h3.mul_scalar(&zeta_power_m);
    folded_h.add_assign(&h2);
    folded_h = folded_h.mul_scalar(&zeta_power_m);
    folded_h.add_assign(&h1);
    let mut folded_h_digest = c_h3.mul(&zeta_power_m);
    folded_h_digest.add_assign(&c_h2);
    folded_h_digest.mul_assign(&zeta_power_m);
    folded_h_digest.add_assign(&c_h1);

    // this commitment only feeds the batch fold-challenge derivation
    let c_linearization = pcs.commit(&linearization)?;

    let batched_proof = pcs.batch_open(
        &[
            &folded_h,
            &linearization,
            &bcl,
            &bcr,
            &bco,
            &pk.cs[0],
            &pk.cs[1],
        ],
        &[
            folded_h_digest,
            c_linearization,
            c_l.clone(),
            c_r.clone(),
            c_o.clone(),
            pk.verifier_key.s_commitments[0].clone(),
            pk.verifier_key.s_commitments[1].clone(),
        ],
        &zeta,
    )?;

    Ok(PlonkProof {
        lro: [c_l, c_r, c_o],
        z: c_z,
        h: [c_h1, c_h2, c_h3],
        batched_proof,
        z_shifted_opening,
    })
}

/// Compute the permutation accumulator Z in Lagrange basis:
/// `Z(1) = 1`, and for i >= 0
/// `Z(w^(i+1)) = Z(w^i) * prod_k (w_k(i) + u^k w^i + gamma)
///                      / prod_k (w_k(i) + s_k(i) + gamma)`.
/// The denominators go through one batch inversion.
fn compute_z<PCS: PolyComScheme>(
    ll: &[PCS::Field],
    lr: &[PCS::Field],
    lo: &[PCS::Field],
    pk: &PlonkProverKey<PCS>,
    gamma: &PCS::Field,
) -> Vec<PCS::Field>
where
    PCS::Field: Domain,
{
    let n = pk.domain_n.cardinality;
    let mut z = vec![PCS::Field::one(); n];
    let mut denominators = vec![PCS::Field::one(); n];

    let mut u = [
        PCS::Field::one(),
        pk.verifier_key.shifter[0],
        pk.verifier_key.shifter[1],
    ];

    for i in 0..n - 1 {
        let f0 = ll[i].add(&u[0]).add(gamma);
        let f1 = lr[i].add(&u[1]).add(gamma);
        let f2 = lo[i].add(&u[2]).add(gamma);

        let g0 = ll[i].add(&pk.ls[0][i]).add(gamma);
        let g1 = lr[i].add(&pk.ls[1][i]).add(gamma);
        let g2 = lo[i].add(&pk.ls[2][i]).add(gamma);

        denominators[i + 1] = g0.mul(&g1).mul(&g2);
        z[i + 1] = z[i].mul(&f0.mul(&f1).mul(&f2));

        u[0].mul_assign(&pk.domain_n.generator);
        u[1].mul_assign(&pk.domain_n.generator);
        u[2].mul_assign(&pk.domain_n.generator);
    }

    batch_invert(&mut denominators[1..]);
    let mut acc = PCS::Field::one();
    for i in 1..n {
        acc.mul_assign(&denominators[i]);
        z[i].mul_assign(&acc);
    }
    z
}

/// Evaluate a polynomial in canonical form on the odd cosets of the double
/// of `domain_h`. The result is in bit-reversed order; the bit reverse is
/// deferred to the inverse FFT of the quotient.
fn evaluate_odd_cosets<F: Domain>(coefs: &[F], domain_h: &Radix2Domain<F>) -> Vec<F> {
    let mut res = coefs.to_vec();
    res.resize(domain_h.cardinality, F::zero());
    domain_h.fft(&mut res, Decimation::Dif, true);
    res
}

/// `ql l + qr r + qm l r + qo o + qk_full` on the odd cosets, with the
/// blinded wire evaluations.
fn eval_constraints<PCS: PolyComScheme>(
    pk: &PlonkProverKey<PCS>,
    eval_l: &[PCS::Field],
    eval_r: &[PCS::Field],
    eval_o: &[PCS::Field],
    qk_full: &[PCS::Field],
) -> Vec<PCS::Field>
where
    PCS::Field: Domain,
{
    let eval_ql = evaluate_odd_cosets(&pk.cq[0].coefs, &pk.domain_h);
    let eval_qr = evaluate_odd_cosets(&pk.cq[1].coefs, &pk.domain_h);
    let eval_qm = evaluate_odd_cosets(&pk.cq[2].coefs, &pk.domain_h);
    let eval_qo = evaluate_odd_cosets(&pk.cq[3].coefs, &pk.domain_h);
    let eval_qk = evaluate_odd_cosets(qk_full, &pk.domain_h);

    (0..pk.domain_h.cardinality)
        .into_par_iter()
        .map(|i| {
            let mut t1 = eval_qm[i].mul(&eval_r[i]);
            t1.add_assign(&eval_ql[i]);
            t1 = t1.mul(&eval_l[i]);
            let t0 = eval_qr[i].mul(&eval_r[i]);
            t1.add_assign(&t0);
            let t2 = eval_qo[i].mul(&eval_o[i]);
            t1.add_assign(&t2);
            t1.add_assign(&eval_qk[i]);
            t1
        })
        .collect()
}

/// The identity polynomial id, u*id and u^2*id evaluated on the odd cosets,
/// in the same bit-reversed layout as the other evaluations.
fn eval_id_cosets<PCS: PolyComScheme>(pk: &PlonkProverKey<PCS>) -> Vec<PCS::Field>
where
    PCS::Field: Domain,
{
    let size = pk.domain_h.cardinality;
    let shift = usize::BITS - size.trailing_zeros();
    let mut id = vec![PCS::Field::zero(); size];
    let mut acc = PCS::Field::one();
    for i in 0..size {
        let irev = i.reverse_bits() >> shift;
        id[irev] = acc.mul(&pk.domain_h.finer_generator);
        acc.mul_assign(&pk.domain_h.generator);
    }
    id
}

/// Left-shift a bit-reversed evaluation vector by `shift` natural positions:
/// evaluating `Z(uX)` given the evaluations of `Z(X)`.
fn shift_eval<F: Copy>(values: &[F], shift: usize) -> Vec<F> {
    let s = values.len();
    let bits = usize::BITS - s.trailing_zeros();
    let mut res = vec![values[0]; s];
    for i in 0..s {
        let irev = i.reverse_bits() >> bits;
        let jrev = ((i + shift) % s).reverse_bits() >> bits;
        res[irev] = values[jrev];
    }
    res
}

/// `Z(uX) g1 g2 g3 - Z(X) f1 f2 f3` on the odd cosets, where the g's bind
/// the wires to the permutation polynomials and the f's to the shifted
/// identity.
fn eval_constraint_ordering<PCS: PolyComScheme>(
    pk: &PlonkProverKey<PCS>,
    eval_z: &[PCS::Field],
    eval_l: &[PCS::Field],
    eval_r: &[PCS::Field],
    eval_o: &[PCS::Field],
    gamma: &PCS::Field,
) -> Vec<PCS::Field>
where
    PCS::Field: Domain,
{
    // Z(uX): u is the generator of the small domain, i.e. four natural
    // positions ahead on the coset
    let eval_zu = shift_eval(eval_z, 4);

    let eval_s1 = evaluate_odd_cosets(&pk.cs[0].coefs, &pk.domain_h);
    let eval_s2 = evaluate_odd_cosets(&pk.cs[1].coefs, &pk.domain_h);
    let eval_s3 = evaluate_odd_cosets(&pk.cs[2].coefs, &pk.domain_h);
    let eval_id = eval_id_cosets(pk);

    (0..pk.domain_h.cardinality)
        .into_par_iter()
        .map(|i| {
            let f0 = eval_l[i].add(&eval_id[i]).add(gamma);
            let f1 = eval_id[i]
                .mul(&pk.verifier_key.shifter[0])
                .add(&eval_r[i])
                .add(gamma);
            let f2 = eval_id[i]
                .mul(&pk.verifier_key.shifter[1])
                .add(&eval_o[i])
                .add(gamma);

            let g0 = eval_l[i].add(&eval_s1[i]).add(gamma);
            let g1 = eval_r[i].add(&eval_s2[i]).add(gamma);
            let g2 = eval_o[i].add(&eval_s3[i]).add(gamma);

            let f = f0.mul(&f1).mul(&f2).mul(&eval_z[i]);
            let g = g0.mul(&g1).mul(&g2).mul(&eval_zu[i]);
            g.sub(&f)
        })
        .collect()
}

/// `L1 (Z - 1)` on the odd cosets.
fn eval_starts_at_one<PCS: PolyComScheme>(
    pk: &PlonkProverKey<PCS>,
    eval_z: &[PCS::Field],
) -> Vec<PCS::Field>
where
    PCS::Field: Domain,
{
    // L1 in canonical form has every coefficient equal to 1/n
    let l1_canonical = vec![pk.domain_n.cardinality_inv; pk.domain_n.cardinality];
    let eval_l1 = evaluate_odd_cosets(&l1_canonical, &pk.domain_h);

    let one = PCS::Field::one();
    (0..pk.domain_h.cardinality)
        .into_par_iter()
        .map(|i| eval_z[i].sub(&one).mul(&eval_l1[i]))
        .collect()
}

/// Assemble the quotient on the cosets, divide by the vanishing polynomial,
/// and return the three canonical chunks of length n + 2.
fn compute_h<PCS: PolyComScheme>(
    pk: &PlonkProverKey<PCS>,
    constraints_ind: &[PCS::Field],
    constraints_ordering: &[PCS::Field],
    starts_at_one: &[PCS::Field],
    alpha: &PCS::Field,
) -> Result<(
    FpPolynomial<PCS::Field>,
    FpPolynomial<PCS::Field>,
    FpPolynomial<PCS::Field>,
)>
where
    PCS::Field: Domain,
{
    let n = pk.domain_n.cardinality;
    let size_h = pk.domain_h.cardinality;
    let one = PCS::Field::one();

    // (X^n - 1)^-1 on the four cosets: the value only depends on the
    // natural index mod 4
    let mut vanishing_inv = [PCS::Field::one(); 4];
    let mut point = pk.domain_h.finer_generator;
    for v in vanishing_inv.iter_mut() {
        *v = point
            .pow(&[n as u64])
            .sub(&one)
            .inv()
            .map_err(|_| PlonkError::ProofError)?;
        point.mul_assign(&pk.domain_h.generator);
    }

    let shift = usize::BITS - size_h.trailing_zeros();
    let mut h: Vec<PCS::Field> = (0..size_h)
        .into_par_iter()
        .map(|i| {
            let mut acc = starts_at_one[i].mul(alpha);
            acc.add_assign(&constraints_ordering[i]);
            acc = acc.mul(alpha);
            acc.add_assign(&constraints_ind[i]);

            // h is still bit reversed here
            let irev = i.reverse_bits() >> shift;
            acc.mul(&vanishing_inv[irev % 4])
        })
        .collect();

    // back to canonical form; DIT consumes the bit-reversed coset layout
    pk.domain_h.fft_inverse(&mut h, Decimation::Dit, true);

    // the chunks have degree n + 1 because of the blinding
    let h1 = FpPolynomial::from_coefs(h[..n + 2].to_vec());
    let h2 = FpPolynomial::from_coefs(h[n + 2..2 * (n + 2)].to_vec());
    let h3 = FpPolynomial::from_coefs(h[2 * (n + 2)..3 * (n + 2)].to_vec());
    Ok((h1, h2, h3))
}

/// The linearization polynomial in canonical basis: its opening at zeta
/// stands in for the openings of ql, qr, qm, qo, qk, s3 and z.
fn compute_linearized_polynomial<PCS: PolyComScheme>(
    pk: &PlonkProverKey<PCS>,
    l: &PCS::Field,
    r: &PCS::Field,
    o: &PCS::Field,
    zu: &PCS::Field,
    z: &FpPolynomial<PCS::Field>,
    challenges: &PlonkChallenges<PCS::Field>,
) -> FpPolynomial<PCS::Field>
where
    PCS::Field: Domain,
{
    let n = pk.domain_n.cardinality;
    let gamma = challenges.get_gamma();
    let alpha = challenges.get_alpha();
    let zeta = challenges.get_zeta();
    let u = &pk.verifier_key.shifter;

    let rl = r.mul(l);

    // (l + s1(zeta) + gamma)(r + s2(zeta) + gamma) * Z(u zeta), multiplying S3(X)
    let s1_zeta = pk.cs[0].eval(zeta);
    let s2_zeta = pk.cs[1].eval(zeta);
    let coef_s3 = s1_zeta
        .add(l)
        .add(gamma)
        .mul(&s2_zeta.add(r).add(gamma))
        .mul(zu);

    // -(l + zeta + gamma)(r + u zeta + gamma)(o + u^2 zeta + gamma), multiplying Z(X)
    let coef_z = l
        .add(zeta)
        .add(gamma)
        .mul(&u[0].mul(zeta).add(r).add(gamma))
        .mul(&u[1].mul(zeta).add(o).add(gamma))
        .neg();

    // alpha^2 L1(zeta), also multiplying Z(X)
    let lagrange = first_lagrange_eval(n, zeta).mul(alpha).mul(alpha);

    let qm = &pk.cq[2].coefs;
    let ql = &pk.cq[0].coefs;
    let qr = &pk.cq[1].coefs;
    let qo = &pk.cq[3].coefs;
    let qk = &pk.cq[4].coefs;
    let s3 = &pk.cs[2].coefs;

    let coefs: Vec<PCS::Field> = (0..z.coefs.len())
        .into_par_iter()
        .map(|i| {
            let mut acc = z.coefs[i].mul(&coef_z);
            if i < s3.len() {
                acc.add_assign(&s3[i].mul(&coef_s3));
            }
            acc = acc.mul(alpha);

            if i < qm.len() {
                acc.add_assign(&qm[i].mul(&rl));
            }
            if i < ql.len() {
                acc.add_assign(&ql[i].mul(l));
            }
            if i < qr.len() {
                acc.add_assign(&qr[i].mul(r));
            }
            if i < qo.len() {
                acc.add_assign(&qo[i].mul(o));
            }
            if i < qk.len() {
                acc.add_assign(&qk[i]);
            }

            acc.add_assign(&z.coefs[i].mul(&lagrange));
            acc
        })
        .collect();

    FpPolynomial::from_coefs(coefs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::errors::FrontendError;
    use crate::frontend::sparse::SparseBuilder;
    use crate::frontend::variable::Input;
    use crate::frontend::{
        compile, Assignment, Builder, Circuit, CompileOption, Inputs, Layout,
    };
    use crate::plonk::indexer::{indexer, PlonkProof};
    use crate::plonk::verifier::verifier;
    use crate::poly_commit::kzg_poly_com::KZGCommitmentSchemeBLS;
    use silex_algebra::bls12_381::BLSScalar;

    type F = BLSScalar;

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
            let sq = api.mul(&x, &x);
            let cube = api.mul(&sq, &x);
            api.assert_is_equal(Input::from(&cube), Input::from(&y));
            Ok(())
        }
    }

    fn setup_cube() -> (
        crate::frontend::sparse::SparseR1cs<F>,
        KZGCommitmentSchemeBLS,
        PlonkProverKey<KZGCommitmentSchemeBLS>,
    ) {
        let cs = compile::<_, SparseBuilder<F>>(&CubeCircuit, &CompileOption::default()).unwrap();
        let mut prng = ChaChaRng::from_seed([0u8; 32]);
        let pcs = KZGCommitmentSchemeBLS::new(64, &mut prng);
        let pk = indexer(&cs, &pcs).unwrap();
        (cs, pcs, pk)
    }

    #[test]
    fn test_prove_and_verify() {
        let (cs, pcs, pk) = setup_cube();
        let registry = HintRegistry::new();
        let mut prng = ChaChaRng::from_seed([7u8; 32]);

        let witness = cs
            .witness_from(
                &Assignment::new()
                    .set("y", F::from(27u32))
                    .set("x", F::from(3u32)),
            )
            .unwrap();
        let proof = prover(&mut prng, &pcs, &cs, &pk, &witness, &registry).unwrap();

        let vk = pk.get_verifier_key_ref();
        verifier(&pcs, vk, &[F::from(27u32)], &proof).unwrap();

        // a wrong public input is rejected
        assert!(verifier(&pcs, vk, &[F::from(28u32)], &proof).is_err());
    }

    #[test]
    fn test_prover_rejects_bad_witness() {
        let (cs, pcs, pk) = setup_cube();
        let registry = HintRegistry::new();
        let mut prng = ChaChaRng::from_seed([7u8; 32]);

        let witness = cs
            .witness_from(
                &Assignment::new()
                    .set("y", F::from(27u32))
                    .set("x", F::from(2u32)),
            )
            .unwrap();
        assert_eq!(
            prover(&mut prng, &pcs, &cs, &pk, &witness, &registry).unwrap_err(),
            PlonkError::ProofErrorInvalidWitness
        );
    }

    #[test]
    fn test_proof_wire_format_round_trip() {
        let (cs, pcs, pk) = setup_cube();
        let registry = HintRegistry::new();
        let mut prng = ChaChaRng::from_seed([9u8; 32]);

        let witness = cs
            .witness_from(
                &Assignment::new()
                    .set("y", F::from(27u32))
                    .set("x", F::from(3u32)),
            )
            .unwrap();
        let proof = prover(&mut prng, &pcs, &cs, &pk, &witness, &registry).unwrap();

        let bytes = proof.to_bytes();
        // 9 compressed points of 48 bytes, 8 scalars of 32 bytes
        assert_eq!(bytes.len(), 9 * 48 + 8 * 32);
        let back = PlonkProof::from_bytes(&bytes).unwrap();
        assert_eq!(proof, back);
    }

    #[test]
    fn test_corrupted_proof_is_rejected() {
        let (cs, pcs, pk) = setup_cube();
        let registry = HintRegistry::new();
        let mut prng = ChaChaRng::from_seed([11u8; 32]);

        let witness = cs
            .witness_from(
                &Assignment::new()
                    .set("y", F::from(27u32))
                    .set("x", F::from(3u32)),
            )
            .unwrap();
        let proof = prover(&mut prng, &pcs, &cs, &pk, &witness, &registry).unwrap();
        let vk = pk.get_verifier_key_ref();
        verifier(&pcs, vk, &[F::from(27u32)], &proof).unwrap();

        let bytes = proof.to_bytes();
        // flip one byte inside the first batched claimed value
        let mut corrupted = bytes.clone();
        let scalar_area = 9 * 48;
        corrupted[scalar_area + 5] ^= 1;
        match PlonkProof::from_bytes(&corrupted) {
            Ok(bad_proof) => {
                assert!(verifier(&pcs, vk, &[F::from(27u32)], &bad_proof).is_err());
            }
            Err(_) => {} // an undecodable proof is as rejected as an invalid one
        }
    }

    /// b == (x == 0): exercises hints end to end.
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
    fn test_prove_and_verify_with_hints() {
        let cs =
            compile::<_, SparseBuilder<F>>(&IsZeroCircuit, &CompileOption::default()).unwrap();
        let mut prng = ChaChaRng::from_seed([0u8; 32]);
        let pcs = KZGCommitmentSchemeBLS::new(64, &mut prng);
        let pk = indexer(&cs, &pcs).unwrap();
        let registry = HintRegistry::new();
        let vk = pk.get_verifier_key_ref();

        for (x, b) in [(F::zero(), F::one()), (F::from(5u32), F::zero())] {
            let witness = cs
                .witness_from(&Assignment::new().set("x", x).set("b", b))
                .unwrap();
            let proof = prover(&mut prng, &pcs, &cs, &pk, &witness, &registry).unwrap();
            verifier(&pcs, vk, &[b], &proof).unwrap();
        }

        // a lying claim does not prove
        let witness = cs
            .witness_from(&Assignment::new().set("x", F::zero()).set("b", F::zero()))
            .unwrap();
        assert!(prover(&mut prng, &pcs, &cs, &pk, &witness, &registry).is_err());
    }

    #[test]
    fn test_proofs_differ_under_blinding() {
        let (cs, pcs, pk) = setup_cube();
        let registry = HintRegistry::new();

        let witness = cs
            .witness_from(
                &Assignment::new()
                    .set("y", F::from(27u32))
                    .set("x", F::from(3u32)),
            )
            .unwrap();
        let mut prng1 = ChaChaRng::from_seed([1u8; 32]);
        let mut prng2 = ChaChaRng::from_seed([2u8; 32]);
        let p1 = prover(&mut prng1, &pcs, &cs, &pk, &witness, &registry).unwrap();
        let p2 = prover(&mut prng2, &pcs, &cs, &pk, &witness, &registry).unwrap();
        // blinding randomizes the commitments, both proofs verify
        assert_ne!(p1, p2);
        let vk = pk.get_verifier_key_ref();
        verifier(&pcs, vk, &[F::from(27u32)], &p1).unwrap();
        verifier(&pcs, vk, &[F::from(27u32)], &p2).unwrap();
    }
}
