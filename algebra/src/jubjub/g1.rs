use crate::bls12_381::BLSScalar;
use crate::errors::AlgebraError;
use crate::jubjub::JubjubScalar;
use crate::prelude::*;
use crate::serialize_deserialize;
use crate::traits::TECurve;
use ark_ec::{
    twisted_edwards::TECurveConfig, CurveGroup as ArkCurveGroup, Group as ArkGroup,
};
use ark_ed_on_bls12_381::{EdwardsAffine, EdwardsConfig, EdwardsProjective};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::fmt::{Debug, Display, Formatter};

/// The wrapped struct for `ark_ed_on_bls12_381::EdwardsProjective`.
#[derive(Copy, Default, Clone, PartialEq, Eq)]
pub struct JubjubPoint(pub(crate) EdwardsProjective);

impl Debug for JubjubPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> ark_std::fmt::Result {
        <EdwardsAffine as Display>::fmt(&self.0.into_affine(), f)
    }
}

impl FromToBytes for JubjubPoint {
    #[inline]
    fn fixed_to_bytes(&self) -> Vec<u8> {
        self.to_compressed_bytes()
    }

    #[inline]
    fn fixed_from_bytes(bytes: &[u8]) -> core::result::Result<Self, AlgebraError> {
        Self::from_compressed_bytes(bytes)
    }
}

serialize_deserialize!(JubjubPoint);

impl Group for JubjubPoint {
    type ScalarType = JubjubScalar;
    const COMPRESSED_LEN: usize = 32;

    #[inline]
    fn double(&self) -> Self {
        Self(ArkGroup::double(&self.0))
    }

    #[inline]
    fn get_identity() -> Self {
        Self(EdwardsProjective::zero())
    }

    #[inline]
    fn get_base() -> Self {
        Self(EdwardsProjective::generator())
    }

    #[inline]
    fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        Self(EdwardsProjective::rand(rng))
    }

    #[inline]
    fn to_compressed_bytes(&self) -> Vec<u8> {
        let affine = EdwardsAffine::from(self.0);
        let mut buf = Vec::new();
        affine.serialize_compressed(&mut buf).unwrap();
        buf
    }

    #[inline]
    fn from_compressed_bytes(bytes: &[u8]) -> Result<Self> {
        let affine = EdwardsAffine::deserialize_compressed(bytes)
            .map_err(|_| AlgebraError::DecompressElementError)?;
        Ok(Self(EdwardsProjective::from(affine)))
    }

    #[inline]
    fn to_unchecked_bytes(&self) -> Vec<u8> {
        let affine = EdwardsAffine::from(self.0);
        let mut buf = Vec::new();
        affine.serialize_uncompressed(&mut buf).unwrap();
        buf
    }

    #[inline]
    fn from_unchecked_bytes(bytes: &[u8]) -> Result<Self> {
        let affine = EdwardsAffine::deserialize_uncompressed_unchecked(bytes)
            .map_err(|_| AlgebraError::DeserializationError)?;
        Ok(Self(EdwardsProjective::from(affine)))
    }

    #[inline]
    fn unchecked_size() -> usize {
        EdwardsAffine::default().uncompressed_size()
    }
}

impl<'a> Add<&'a JubjubPoint> for JubjubPoint {
    type Output = JubjubPoint;

    #[inline]
    fn add(self, rhs: &Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl<'a> Sub<&'a JubjubPoint> for JubjubPoint {
    type Output = JubjubPoint;

    #[inline]
    fn sub(self, rhs: &Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl<'a> Mul<&'a JubjubScalar> for JubjubPoint {
    type Output = JubjubPoint;

    #[inline]
    fn mul(self, rhs: &JubjubScalar) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl<'a> AddAssign<&'a JubjubPoint> for JubjubPoint {
    #[inline]
    fn add_assign(&mut self, rhs: &'a JubjubPoint) {
        self.0 += rhs.0
    }
}

impl<'a> SubAssign<&'a JubjubPoint> for JubjubPoint {
    #[inline]
    fn sub_assign(&mut self, rhs: &'a JubjubPoint) {
        self.0 -= rhs.0
    }
}

impl Neg for JubjubPoint {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl CurveGroup for JubjubPoint {
    type BaseType = BLSScalar;

    #[inline]
    fn get_x(&self) -> Self::BaseType {
        BLSScalar(self.0.into_affine().x)
    }

    #[inline]
    fn get_y(&self) -> Self::BaseType {
        BLSScalar(self.0.into_affine().y)
    }

    #[inline]
    fn new(x: &Self::BaseType, y: &Self::BaseType) -> Self {
        Self(EdwardsProjective::from(EdwardsAffine::new_unchecked(
            x.0, y.0,
        )))
    }
}

impl TECurve for JubjubPoint {
    #[inline]
    fn edwards_d() -> Self::BaseType {
        BLSScalar(<EdwardsConfig as TECurveConfig>::COEFF_D)
    }

    #[inline]
    fn edwards_a() -> Self::BaseType {
        BLSScalar(<EdwardsConfig as TECurveConfig>::COEFF_A)
    }
}

#[cfg(test)]
mod jubjub_group_test {
    use super::*;

    #[test]
    fn test_curve_equation() {
        // a x^2 + y^2 = 1 + d x^2 y^2 for the base point
        let base = JubjubPoint::get_base();
        let x = base.get_x();
        let y = base.get_y();
        let a = JubjubPoint::edwards_a();
        let d = JubjubPoint::edwards_d();

        let x2 = x.square();
        let y2 = y.square();
        let lhs = a.mul(&x2).add(&y2);
        let rhs = BLSScalar::one().add(&d.mul(&x2).mul(&y2));
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_xy_round_trip() {
        let mut prng = ChaChaRng::from_seed([5u8; 32]);
        let p = JubjubPoint::random(&mut prng);
        let q = JubjubPoint::new(&p.get_x(), &p.get_y());
        assert_eq!(p, q);
    }
}
