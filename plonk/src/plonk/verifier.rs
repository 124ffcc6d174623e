use crate::errors::{PlonkError, Result};
use crate::plonk::helpers::{first_lagrange_eval, lagrange_eval};
use crate::plonk::indexer::{PlonkPf, PlonkVerifierKey, N_BATCHED_OPENINGS};
use crate::plonk::transcript::Transcript;
use crate::poly_commit::pcs::{HomomorphicPolyComElem, PolyComScheme, ToBytes};
use silex_algebra::prelude::*;
use silex_algebra::traits::Domain;

/// PLONK verifier: check a proof against the verifier key and the public
/// inputs. The transcript replays the prover's bindings, so the challenges
/// only depend on the commitments carried by the proof.
pub fn verifier<PCS: PolyComScheme>(
    pcs: &PCS,
    vk: &PlonkVerifierKey<PCS>,
    public_inputs: &[PCS::Field],
    proof: &PlonkPf<PCS>,
) -> Result<()>
where
    PCS::Field: Domain,
{
    if public_inputs.len() != vk.nb_public {
        return Err(PlonkError::FuncParamsError);
    }
    if proof.batched_proof.claimed_values.len() != N_BATCHED_OPENINGS {
        return Err(PlonkError::VerificationError);
    }

    let n = vk.cs_size;

    // replay the transcript
    let mut transcript = Transcript::new(&["gamma", "alpha", "zeta"]);
    transcript.bind("gamma", &proof.lro[0].to_bytes())?;
    transcript.bind("gamma", &proof.lro[1].to_bytes())?;
    transcript.bind("gamma", &proof.lro[2].to_bytes())?;
    let gamma: PCS::Field = transcript.compute_field_challenge("gamma")?;
    transcript.bind("alpha", &proof.z.to_bytes())?;
    let alpha: PCS::Field = transcript.compute_field_challenge("alpha")?;
    transcript.bind("zeta", &proof.h[0].to_bytes())?;
    transcript.bind("zeta", &proof.h[1].to_bytes())?;
    transcript.bind("zeta", &proof.h[2].to_bytes())?;
    let zeta: PCS::Field = transcript.compute_field_challenge("zeta")?;

    let folded_h_zeta = proof.batched_proof.claimed_values[0];
    let lin_zeta = proof.batched_proof.claimed_values[1];
    let l_zeta = proof.batched_proof.claimed_values[2];
    let r_zeta = proof.batched_proof.claimed_values[3];
    let o_zeta = proof.batched_proof.claimed_values[4];
    let s1_zeta = proof.batched_proof.claimed_values[5];
    let s2_zeta = proof.batched_proof.claimed_values[6];
    let zu = proof.z_shifted_opening.claimed_value;

    // the public-input contribution sum_i w_i L_i(zeta)
    let mut pi_zeta = PCS::Field::zero();
    for (i, w) in public_inputs.iter().enumerate() {
        pi_zeta.add_assign(&w.mul(&lagrange_eval(n, &vk.generator, i, &zeta)));
    }

    // the gate identity at zeta:
    // lin + PI + alpha zu (l+s1+g)(r+s2+g)(o+g) - alpha^2 L1 == foldedH (zeta^n - 1)
    let l1_zeta = first_lagrange_eval(n, &zeta);
    let zh_zeta = zeta.pow(&[n as u64]).sub(&PCS::Field::one());

    let perm_part = l_zeta
        .add(&s1_zeta)
        .add(&gamma)
        .mul(&r_zeta.add(&s2_zeta).add(&gamma))
        .mul(&o_zeta.add(&gamma))
        .mul(&zu)
        .mul(&alpha);

    let mut lhs = lin_zeta.add(&pi_zeta).add(&perm_part);
    lhs.sub_assign(&l1_zeta.mul(&alpha).mul(&alpha));
    let rhs = folded_h_zeta.mul(&zh_zeta);
    if lhs != rhs {
        return Err(PlonkError::VerificationError);
    }

    // rebuild the linearization commitment from the verifier key
    let rl = r_zeta.mul(&l_zeta);
    let coef_s3 = s1_zeta
        .add(&l_zeta)
        .add(&gamma)
        .mul(&s2_zeta.add(&r_zeta).add(&gamma))
        .mul(&zu)
        .mul(&alpha);
    let coef_z = l_zeta
        .add(&zeta)
        .add(&gamma)
        .mul(&vk.shifter[0].mul(&zeta).add(&r_zeta).add(&gamma))
        .mul(&vk.shifter[1].mul(&zeta).add(&o_zeta).add(&gamma))
        .neg()
        .mul(&alpha)
        .add(&l1_zeta.mul(&alpha).mul(&alpha));

    let mut lin_digest = vk.q_commitments[2].mul(&rl);
    lin_digest.add_assign(&vk.q_commitments[0].mul(&l_zeta));
    lin_digest.add_assign(&vk.q_commitments[1].mul(&r_zeta));
    lin_digest.add_assign(&vk.q_commitments[3].mul(&o_zeta));
    lin_digest.add_assign(&vk.q_commitments[4]);
    lin_digest.add_assign(&vk.s_commitments[2].mul(&coef_s3));
    lin_digest.add_assign(&proof.z.mul(&coef_z));

    // fold the h commitments with zeta^(n+2)
    let zeta_power_m = zeta.pow(&[(n + 2) as u64]);
    let mut folded_h_digest = proof.h[2].mul(&zeta_power_m);
    folded_h_digest.add_assign(&proof.h[1]);
    folded_h_digest.mul_assign(&zeta_power_m);
    folded_h_digest.add_assign(&proof.h[0]);

    // the batched opening at zeta and the Z opening at zeta * omega
    pcs.batch_verify(
        &[
            folded_h_digest,
            lin_digest,
            proof.lro[0].clone(),
            proof.lro[1].clone(),
            proof.lro[2].clone(),
            vk.s_commitments[0].clone(),
            vk.s_commitments[1].clone(),
        ],
        &zeta,
        &proof.batched_proof,
    )?;

    let zeta_shifted = zeta.mul(&vk.generator);
    pcs.verify(&proof.z, &zeta_shifted, &proof.z_shifted_opening)
}
