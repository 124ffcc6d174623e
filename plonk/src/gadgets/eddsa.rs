use crate::frontend::api::Api;
use crate::frontend::variable::Variable;
use crate::gadgets::mimc::Mimc;
use crate::gadgets::twisted_edwards::{
    add_points, assert_on_curve, scalar_mul, CurveParams, EdwardsPoint,
};
use silex_algebra::prelude::*;

/// The number of bits of the scalars of the companion curve.
pub const SCALAR_BITS: usize = 252;

/// An EdDSA signature as circuit variables: the nonce commitment R and the
/// response scalar s.
#[derive(Clone, Debug)]
pub struct SignatureVar {
    /// The nonce point.
    pub r: EdwardsPoint,
    /// The response scalar.
    pub s: Variable,
}

/// Constrain an EdDSA verification over the companion curve with a MiMC
/// challenge: `[s] B == R + [H(Rx, Ry, Ax, Ay, msg)] A`.
pub fn assert_eddsa<B: Api>(
    api: &mut B,
    params: &CurveParams<B::Field>,
    base: &EdwardsPoint,
    public_key: &EdwardsPoint,
    signature: &SignatureVar,
    message: &Variable,
    mimc: &Mimc<B::Field>,
) {
    assert_on_curve(api, public_key, params);
    assert_on_curve(api, &signature.r, params);

    let challenge = mimc.hash(
        api,
        &[
            signature.r.x.clone(),
            signature.r.y.clone(),
            public_key.x.clone(),
            public_key.y.clone(),
            message.clone(),
        ],
    );

    let s_bits = api.to_binary(&signature.s, SCALAR_BITS);
    let lhs = scalar_mul(api, &s_bits, base, params);

    let challenge_bits = api.to_binary(&challenge, B::Field::num_bits());
    let ha = scalar_mul(api, &challenge_bits, public_key, params);
    let rhs = add_points(api, &signature.r, &ha, params);

    api.assert_is_equal((&lhs.x).into(), (&rhs.x).into());
    api.assert_is_equal((&lhs.y).into(), (&rhs.y).into());
}
