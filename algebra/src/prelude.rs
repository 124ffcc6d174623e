pub use crate::errors::AlgebraError;
pub use crate::traits::{CurveGroup, Domain, Group, Pairing, Scalar, TECurve};
pub use crate::utils::*;
pub use ark_std::{
    iter::Sum,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
    string::String,
    vec,
    vec::Vec,
    One, UniformRand, Zero,
};
pub use itertools::Itertools;
pub use rand_chacha::ChaChaRng;
pub use rand_core::{CryptoRng, RngCore, SeedableRng};

pub(crate) type Result<T> = core::result::Result<T, AlgebraError>;
