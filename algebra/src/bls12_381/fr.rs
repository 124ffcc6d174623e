use crate::bls12_381::BLS12_381_SCALAR_LEN;
use crate::errors::AlgebraError;
use crate::prelude::*;
use crate::serialize_deserialize;
use crate::traits::Domain;
use ark_bls12_381::Fr;
use ark_ff::{BigInteger, FftField, Field, PrimeField};
use ark_std::fmt::{Debug, Formatter};
use core::hash::{Hash, Hasher};
use num_bigint::BigUint;

/// The wrapped struct for `ark_bls12_381::Fr`.
#[derive(Copy, Clone, PartialEq, Eq, Default, PartialOrd, Ord)]
pub struct BLSScalar(pub(crate) Fr);

impl Debug for BLSScalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> ark_std::fmt::Result {
        <BigUint as Debug>::fmt(&self.0.into_bigint().into(), f)
    }
}

impl Hash for BLSScalar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.into_bigint().0.hash(state)
    }
}

impl From<u32> for BLSScalar {
    #[inline]
    fn from(value: u32) -> Self {
        Self(Fr::from(value))
    }
}

impl From<u64> for BLSScalar {
    #[inline]
    fn from(value: u64) -> Self {
        Self(Fr::from(value))
    }
}

impl From<BLSScalar> for BigUint {
    #[inline]
    fn from(src: BLSScalar) -> Self {
        src.0.into_bigint().into()
    }
}

impl<'a> From<&'a BigUint> for BLSScalar {
    #[inline]
    fn from(src: &BigUint) -> Self {
        Self(Fr::from(src.clone()))
    }
}

impl One for BLSScalar {
    #[inline]
    fn one() -> Self {
        Self(Fr::one())
    }
}

impl Zero for BLSScalar {
    #[inline]
    fn zero() -> Self {
        Self(Fr::zero())
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Add for BLSScalar {
    type Output = BLSScalar;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Mul for BLSScalar {
    type Output = BLSScalar;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Sum<BLSScalar> for BLSScalar {
    #[inline]
    fn sum<I: Iterator<Item = BLSScalar>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl<'a> Add<&'a BLSScalar> for BLSScalar {
    type Output = BLSScalar;

    #[inline]
    fn add(self, rhs: &Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl<'a> AddAssign<&'a BLSScalar> for BLSScalar {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        self.0 += rhs.0
    }
}

impl<'a> Sub<&'a BLSScalar> for BLSScalar {
    type Output = BLSScalar;

    #[inline]
    fn sub(self, rhs: &Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl<'a> SubAssign<&'a BLSScalar> for BLSScalar {
    #[inline]
    fn sub_assign(&mut self, rhs: &Self) {
        self.0 -= rhs.0
    }
}

impl<'a> Mul<&'a BLSScalar> for BLSScalar {
    type Output = BLSScalar;

    #[inline]
    fn mul(self, rhs: &Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl<'a> MulAssign<&'a BLSScalar> for BLSScalar {
    #[inline]
    fn mul_assign(&mut self, rhs: &Self) {
        self.0 *= rhs.0
    }
}

impl<'a> Sum<&'a BLSScalar> for BLSScalar {
    #[inline]
    fn sum<I: Iterator<Item = &'a BLSScalar>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc.add(x))
    }
}

impl Neg for BLSScalar {
    type Output = BLSScalar;

    #[inline]
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl FromToBytes for BLSScalar {
    #[inline]
    fn fixed_to_bytes(&self) -> Vec<u8> {
        Scalar::to_bytes(self)
    }

    #[inline]
    fn fixed_from_bytes(bytes: &[u8]) -> core::result::Result<Self, AlgebraError> {
        <Self as Scalar>::from_bytes(bytes)
    }
}

serialize_deserialize!(BLSScalar);

impl Scalar for BLSScalar {
    #[inline]
    fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        Self(Fr::rand(rng))
    }

    #[inline]
    fn multiplicative_generator() -> Self {
        Self(Fr::GENERATOR)
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
        BLS12_381_SCALAR_LEN
    }

    #[inline]
    fn to_bytes(&self) -> Vec<u8> {
        self.0.into_bigint().to_bytes_le()
    }

    #[inline]
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > BLS12_381_SCALAR_LEN {
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

impl Domain for BLSScalar {
    type Field = Fr;

    #[inline]
    fn get_field(&self) -> Self::Field {
        self.0
    }

    #[inline]
    fn from_field(field: Self::Field) -> Self {
        Self(field)
    }
}

#[cfg(test)]
mod bls12_381_scalar_test {
    use super::*;
    use crate::traits::group_tests::{
        test_scalar_operations, test_scalar_serialization, test_to_radix,
    };

    #[test]
    fn test_scalar_ops() {
        test_scalar_operations::<BLSScalar>();
    }

    #[test]
    fn scalar_deser() {
        test_scalar_serialization::<BLSScalar>();
    }

    #[test]
    fn scalar_to_radix() {
        test_to_radix::<BLSScalar>();
    }

    #[test]
    fn test_scalar_from_be_bytes_mod_order() {
        // the modulus itself reduces to zero
        let mut be = BLSScalar::get_field_size_le_bytes();
        be.reverse();
        assert_eq!(BLSScalar::from_be_bytes_mod_order(&be), BLSScalar::zero());

        let a = BLSScalar::from(0x1234u32);
        assert_eq!(BLSScalar::from_be_bytes_mod_order(&[0x12, 0x34]), a);
    }
}
