use crate::bls12_381::BLSScalar;
use crate::errors::AlgebraError;
use crate::prelude::*;
use crate::serialize_deserialize;
use ark_bls12_381::{G2Affine, G2Projective};
use ark_ec::{CurveGroup as ArkCurveGroup, Group as ArkGroup};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::fmt::{Debug, Display, Formatter};

/// The wrapped struct for `ark_bls12_381::G2Projective`.
#[derive(Copy, Default, Clone, PartialEq, Eq)]
pub struct BLSG2(pub(crate) G2Projective);

impl Debug for BLSG2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> ark_std::fmt::Result {
        <G2Affine as Display>::fmt(&self.0.into_affine(), f)
    }
}

impl FromToBytes for BLSG2 {
    #[inline]
    fn fixed_to_bytes(&self) -> Vec<u8> {
        self.to_compressed_bytes()
    }

    #[inline]
    fn fixed_from_bytes(bytes: &[u8]) -> core::result::Result<Self, AlgebraError> {
        Self::from_compressed_bytes(bytes)
    }
}

serialize_deserialize!(BLSG2);

impl Group for BLSG2 {
    type ScalarType = BLSScalar;
    const COMPRESSED_LEN: usize = 96;

    #[inline]
    fn double(&self) -> Self {
        Self(ArkGroup::double(&self.0))
    }

    #[inline]
    fn get_identity() -> Self {
        Self(G2Projective::zero())
    }

    #[inline]
    fn get_base() -> Self {
        Self(G2Projective::generator())
    }

    #[inline]
    fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        Self(G2Projective::rand(rng))
    }

    #[inline]
    fn to_compressed_bytes(&self) -> Vec<u8> {
        let affine = G2Affine::from(self.0);
        let mut buf = Vec::new();
        affine.serialize_compressed(&mut buf).unwrap();
        buf
    }

    #[inline]
    fn from_compressed_bytes(bytes: &[u8]) -> Result<Self> {
        let affine = G2Affine::deserialize_compressed(bytes)
            .map_err(|_| AlgebraError::DecompressElementError)?;
        Ok(Self(G2Projective::from(affine)))
    }

    #[inline]
    fn to_unchecked_bytes(&self) -> Vec<u8> {
        let affine = G2Affine::from(self.0);
        let mut buf = Vec::new();
        affine.serialize_uncompressed(&mut buf).unwrap();
        buf
    }

    #[inline]
    fn from_unchecked_bytes(bytes: &[u8]) -> Result<Self> {
        let affine = G2Affine::deserialize_uncompressed_unchecked(bytes)
            .map_err(|_| AlgebraError::DeserializationError)?;
        Ok(Self(G2Projective::from(affine)))
    }

    #[inline]
    fn unchecked_size() -> usize {
        G2Affine::default().uncompressed_size()
    }
}

impl<'a> Add<&'a BLSG2> for BLSG2 {
    type Output = BLSG2;

    #[inline]
    fn add(self, rhs: &Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl<'a> Sub<&'a BLSG2> for BLSG2 {
    type Output = BLSG2;

    #[inline]
    fn sub(self, rhs: &Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl<'a> Mul<&'a BLSScalar> for BLSG2 {
    type Output = BLSG2;

    #[inline]
    fn mul(self, rhs: &BLSScalar) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl<'a> AddAssign<&'a BLSG2> for BLSG2 {
    #[inline]
    fn add_assign(&mut self, rhs: &'a BLSG2) {
        self.0 += rhs.0
    }
}

impl<'a> SubAssign<&'a BLSG2> for BLSG2 {
    #[inline]
    fn sub_assign(&mut self, rhs: &'a BLSG2) {
        self.0 -= rhs.0
    }
}

impl Neg for BLSG2 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

#[cfg(test)]
mod bls12_381_g2_test {
    use super::*;

    #[test]
    fn test_compressed_round_trip() {
        let mut prng = ChaChaRng::from_seed([7u8; 32]);
        let p = BLSG2::random(&mut prng);
        let bytes = p.to_compressed_bytes();
        assert_eq!(bytes.len(), BLSG2::COMPRESSED_LEN);
        let q = BLSG2::from_compressed_bytes(&bytes).unwrap();
        assert_eq!(p, q);
    }
}
