use crate::bls12_381::BLSScalar;
use crate::errors::AlgebraError;
use crate::prelude::*;
use crate::serialize_deserialize;
use ark_bls12_381::{G1Affine, G1Projective};
use ark_ec::{CurveGroup as ArkCurveGroup, Group as ArkGroup, VariableBaseMSM};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::fmt::{Debug, Display, Formatter};

/// The wrapped struct for `ark_bls12_381::G1Projective`.
#[derive(Copy, Default, Clone, PartialEq, Eq)]
pub struct BLSG1(pub(crate) G1Projective);

impl Debug for BLSG1 {
    fn fmt(&self, f: &mut Formatter<'_>) -> ark_std::fmt::Result {
        <G1Affine as Display>::fmt(&self.0.into_affine(), f)
    }
}

impl FromToBytes for BLSG1 {
    #[inline]
    fn fixed_to_bytes(&self) -> Vec<u8> {
        self.to_compressed_bytes()
    }

    #[inline]
    fn fixed_from_bytes(bytes: &[u8]) -> core::result::Result<Self, AlgebraError> {
        Self::from_compressed_bytes(bytes)
    }
}

serialize_deserialize!(BLSG1);

impl Group for BLSG1 {
    type ScalarType = BLSScalar;
    const COMPRESSED_LEN: usize = 48;

    #[inline]
    fn double(&self) -> Self {
        Self(ArkGroup::double(&self.0))
    }

    #[inline]
    fn get_identity() -> Self {
        Self(G1Projective::zero())
    }

    #[inline]
    fn get_base() -> Self {
        Self(G1Projective::generator())
    }

    #[inline]
    fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        Self(G1Projective::rand(rng))
    }

    #[inline]
    fn to_compressed_bytes(&self) -> Vec<u8> {
        let affine = G1Affine::from(self.0);
        let mut buf = Vec::new();
        affine.serialize_compressed(&mut buf).unwrap();
        buf
    }

    #[inline]
    fn from_compressed_bytes(bytes: &[u8]) -> Result<Self> {
        let affine = G1Affine::deserialize_compressed(bytes)
            .map_err(|_| AlgebraError::DecompressElementError)?;
        Ok(Self(G1Projective::from(affine)))
    }

    #[inline]
    fn to_unchecked_bytes(&self) -> Vec<u8> {
        let affine = G1Affine::from(self.0);
        let mut buf = Vec::new();
        affine.serialize_uncompressed(&mut buf).unwrap();
        buf
    }

    #[inline]
    fn from_unchecked_bytes(bytes: &[u8]) -> Result<Self> {
        let affine = G1Affine::deserialize_uncompressed_unchecked(bytes)
            .map_err(|_| AlgebraError::DeserializationError)?;
        Ok(Self(G1Projective::from(affine)))
    }

    #[inline]
    fn unchecked_size() -> usize {
        G1Affine::default().uncompressed_size()
    }

    #[inline]
    fn multi_exp(scalars: &[&Self::ScalarType], points: &[&Self]) -> Self {
        if scalars.is_empty() {
            return Self::get_identity();
        }
        let scalars_raw: Vec<_> = scalars.iter().map(|r| r.0).collect();
        let points_raw = G1Projective::normalize_batch(
            &points.iter().map(|r| r.0).collect::<Vec<G1Projective>>(),
        );

        // lengths match by construction
        Self(G1Projective::msm(&points_raw, &scalars_raw).unwrap())
    }
}

impl<'a> Add<&'a BLSG1> for BLSG1 {
    type Output = BLSG1;

    #[inline]
    fn add(self, rhs: &Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl<'a> Sub<&'a BLSG1> for BLSG1 {
    type Output = BLSG1;

    #[inline]
    fn sub(self, rhs: &Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl<'a> Mul<&'a BLSScalar> for BLSG1 {
    type Output = BLSG1;

    #[inline]
    fn mul(self, rhs: &BLSScalar) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl<'a> AddAssign<&'a BLSG1> for BLSG1 {
    #[inline]
    fn add_assign(&mut self, rhs: &'a BLSG1) {
        self.0 += rhs.0
    }
}

impl<'a> SubAssign<&'a BLSG1> for BLSG1 {
    #[inline]
    fn sub_assign(&mut self, rhs: &'a BLSG1) {
        self.0 -= rhs.0
    }
}

impl Neg for BLSG1 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

#[cfg(test)]
mod bls12_381_g1_test {
    use super::*;

    #[test]
    fn test_compressed_round_trip() {
        let mut prng = ChaChaRng::from_seed([7u8; 32]);
        let p = BLSG1::random(&mut prng);
        let bytes = p.to_compressed_bytes();
        assert_eq!(bytes.len(), BLSG1::COMPRESSED_LEN);
        let q = BLSG1::from_compressed_bytes(&bytes).unwrap();
        assert_eq!(p, q);
    }

    #[test]
    fn test_multi_exp_matches_naive() {
        let mut prng = ChaChaRng::from_seed([9u8; 32]);
        let scalars: Vec<BLSScalar> = (0..16).map(|_| BLSScalar::random(&mut prng)).collect();
        let points: Vec<BLSG1> = (0..16).map(|_| BLSG1::random(&mut prng)).collect();

        let mut naive = BLSG1::get_identity();
        for (s, p) in scalars.iter().zip(points.iter()) {
            naive.add_assign(&p.mul(s));
        }

        let scalars_ref: Vec<&BLSScalar> = scalars.iter().collect();
        let points_ref: Vec<&BLSG1> = points.iter().collect();
        let fast = BLSG1::multi_exp(&scalars_ref, &points_ref);
        assert_eq!(naive, fast);
    }
}
