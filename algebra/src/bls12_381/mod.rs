/// The scalar field of the BLS12-381 curve.
mod fr;
pub use fr::BLSScalar;

/// The first source group of the BLS12-381 curve.
mod g1;
pub use g1::BLSG1;

/// The second source group of the BLS12-381 curve.
mod g2;
pub use g2::BLSG2;

/// The target group of the BLS12-381 pairing.
mod gt;
pub use gt::BLSGt;

/// The pairing engine.
mod pairing;
pub use pairing::BLSPairingEngine;

/// The number of bytes of a BLS12-381 scalar.
pub const BLS12_381_SCALAR_LEN: usize = 32;
