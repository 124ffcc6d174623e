use crate::errors::AlgebraError;
use crate::jubjub::JUBJUB_SCALAR_LEN;
use crate::prelude::*;
use crate::serialize_deserialize;
use ark_ed_on_bls12_381::Fr;
use ark_ff::{BigInteger, Field, PrimeField};
use ark_std::fmt::{Debug, Formatter};
use num_bigint::BigUint;

/// The wrapped struct for `ark_ed_on_bls12_381::Fr`.
#[derive(Copy, Clone, PartialEq, Eq, Default, PartialOrd, Ord)]
pub struct JubjubScalar(pub(crate) Fr);

impl Debug for JubjubScalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> ark_std::fmt::Result {
        <BigUint as Debug>::fmt(&self.0.into_bigint().into(), f)
    }
}

impl From<u32> for JubjubScalar {
    #[inline]
    fn from(value: u32) -> Self {
        Self(Fr::from(value))
    }
}

impl From<u64> for JubjubScalar {
    #[inline]
    fn from(value: u64) -> Self {
        Self(Fr::from(value))
    }
}

impl From<JubjubScalar> for BigUint {
    #[inline]
    fn from(src: JubjubScalar) -> Self {
        src.0.into_bigint().into()
    }
}

impl<'a> From<&'a BigUint> for JubjubScalar {
    #[inline]
    fn from(src: &BigUint) -> Self {
        Self(Fr::from(src.clone()))
    }
}

impl One for JubjubScalar {
    #[inline]
    fn one() -> Self {
        Self(Fr::one())
    }
}

impl Zero for JubjubScalar {
    #[inline]
    fn zero() -> Self {
        Self(Fr::zero())
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Add for JubjubScalar {
    type Output = JubjubScalar;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Mul for JubjubScalar {
    type Output = JubjubScalar;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Sum<JubjubScalar> for JubjubScalar {
    #[inline]
    fn sum<I: Iterator<Item = JubjubScalar>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl<'a> Add<&'a JubjubScalar> for JubjubScalar {
    type Output = JubjubScalar;

    #[inline]
    fn add(self, rhs: &Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl<'a> AddAssign<&'a JubjubScalar> for JubjubScalar {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        self.0 += rhs.0
    }
}

impl<'a> Sub<&'a JubjubScalar> for JubjubScalar {
    type Output = JubjubScalar;

    #[inline]
    fn sub(self, rhs: &Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl<'a> SubAssign<&'a JubjubScalar> for JubjubScalar {
    #[inline]
    fn sub_assign(&mut self, rhs: &Self) {
        self.0 -= rhs.0
    }
}

impl<'a> Mul<&'a JubjubScalar> for JubjubScalar {
    type Output = JubjubScalar;

    #[inline]
    fn mul(self, rhs: &Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl<'a> MulAssign<&'a JubjubScalar> for JubjubScalar {
    #[inline]
    fn mul_assign(&mut self, rhs: &Self) {
        self.0 *= rhs.0
    }
}

impl<'a> Sum<&'a JubjubScalar> for JubjubScalar {
    #[inline]
    fn sum<I: Iterator<Item = &'a JubjubScalar>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc.add(x))
    }
}

impl Neg for JubjubScalar {
    type Output = JubjubScalar;

    #[inline]
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl FromToBytes for JubjubScalar {
    #[inline]
    fn fixed_to_bytes(&self) -> Vec<u8> {
        Scalar::to_bytes(self)
    }

    #[inline]
    fn fixed_from_bytes(bytes: &[u8]) -> core::result::Result<Self, AlgebraError> {
        <Self as Scalar>::from_bytes(bytes)
    }
}

serialize_deserialize!(JubjubScalar);

impl Scalar for JubjubScalar {
    #[inline]
    fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        Self(Fr::rand(rng))
    }

    #[inline]
    fn multiplicative_generator() -> Self {
        Self(<Fr as ark_ff::FftField>::GENERATOR)
    }

    #[inline]
    fn num_bits() -> usize {
        Fr::MODULUS_BIT_SIZE as usize
    }

    #[inline]
    fn capacity() -> usize {
        Fr::MODULUS_BIT_SIZE as usize - 1
    }

    #[inline]
    fn get_field_size_le_bytes() -> Vec<u8> {
        Fr::MODULUS.to_bytes_le()
    }

    #[inline]
    fn get_field_size_biguint() -> BigUint {
        Fr::MODULUS.into()
    }

    #[inline]
    fn get_little_endian_u64(&self) -> Vec<u64> {
        self.0.into_bigint().0.to_vec()
    }

    #[inline]
    fn bytes_len() -> usize {
        JUBJUB_SCALAR_LEN
    }

    #[inline]
    fn to_bytes(&self) -> Vec<u8> {
        self.0.into_bigint().to_bytes_le()
    }

    #[inline]
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > JUBJUB_SCALAR_LEN {
            return Err(AlgebraError::DeserializationError);
        }
        Ok(Self(Fr::from_le_bytes_mod_order(bytes)))
    }

    #[inline]
    fn from_be_bytes_mod_order(bytes: &[u8]) -> Self {
        Self(Fr::from_be_bytes_mod_order(bytes))
    }

    #[inline]
    fn inv(&self) -> Result<Self> {
        self.0
            .inverse()
            .map(Self)
            .ok_or(AlgebraError::FieldInversionError)
    }

    #[inline]
    fn square(&self) -> Self {
        Self(self.0.square())
    }
}
