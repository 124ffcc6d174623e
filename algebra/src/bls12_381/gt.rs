use crate::bls12_381::BLSScalar;
use crate::errors::AlgebraError;
use crate::prelude::*;
use crate::serialize_deserialize;
use ark_bls12_381::Bls12_381;
use ark_ec::{pairing::PairingOutput, Group as ArkGroup};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::fmt::{Debug, Formatter};

/// The wrapped struct for the target group of the BLS12-381 pairing.
#[derive(Copy, Default, Clone, PartialEq, Eq)]
pub struct BLSGt(pub(crate) PairingOutput<Bls12_381>);

impl Debug for BLSGt {
    fn fmt(&self, f: &mut Formatter<'_>) -> ark_std::fmt::Result {
        write!(f, "BLSGt({:?})", self.0 .0)
    }
}

impl FromToBytes for BLSGt {
    #[inline]
    fn fixed_to_bytes(&self) -> Vec<u8> {
        self.to_compressed_bytes()
    }

    #[inline]
    fn fixed_from_bytes(bytes: &[u8]) -> core::result::Result<Self, AlgebraError> {
        Self::from_compressed_bytes(bytes)
    }
}

serialize_deserialize!(BLSGt);

impl Group for BLSGt {
    type ScalarType = BLSScalar;
    const COMPRESSED_LEN: usize = 576;

    #[inline]
    fn double(&self) -> Self {
        Self(ArkGroup::double(&self.0))
    }

    #[inline]
    fn get_identity() -> Self {
        Self(PairingOutput::zero())
    }

    #[inline]
    fn get_base() -> Self {
        Self(PairingOutput::generator())
    }

    #[inline]
    fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        Self::get_base().mul(&BLSScalar::random(rng))
    }

    #[inline]
    fn to_compressed_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.0.serialize_compressed(&mut buf).unwrap();
        buf
    }

    #[inline]
    fn from_compressed_bytes(bytes: &[u8]) -> Result<Self> {
        let inner = PairingOutput::deserialize_compressed(bytes)
            .map_err(|_| AlgebraError::DecompressElementError)?;
        Ok(Self(inner))
    }

    #[inline]
    fn to_unchecked_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.0.serialize_uncompressed(&mut buf).unwrap();
        buf
    }

    #[inline]
    fn from_unchecked_bytes(bytes: &[u8]) -> Result<Self> {
        let inner = PairingOutput::deserialize_uncompressed_unchecked(bytes)
            .map_err(|_| AlgebraError::DeserializationError)?;
        Ok(Self(inner))
    }

    #[inline]
    fn unchecked_size() -> usize {
        PairingOutput::<Bls12_381>::default().uncompressed_size()
    }
}

impl<'a> Add<&'a BLSGt> for BLSGt {
    type Output = BLSGt;

    #[inline]
    fn add(self, rhs: &Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl<'a> Sub<&'a BLSGt> for BLSGt {
    type Output = BLSGt;

    #[inline]
    fn sub(self, rhs: &Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl<'a> Mul<&'a BLSScalar> for BLSGt {
    type Output = BLSGt;

    #[inline]
    fn mul(self, rhs: &BLSScalar) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl<'a> AddAssign<&'a BLSGt> for BLSGt {
    #[inline]
    fn add_assign(&mut self, rhs: &'a BLSGt) {
        self.0 += rhs.0
    }
}

impl<'a> SubAssign<&'a BLSGt> for BLSGt {
    #[inline]
    fn sub_assign(&mut self, rhs: &'a BLSGt) {
        self.0 -= rhs.0
    }
}

impl Neg for BLSGt {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}
