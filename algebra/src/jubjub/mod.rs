/// The scalar field of the Jubjub curve.
mod fr;
pub use fr::JubjubScalar;

/// The Jubjub curve group.
mod g1;
pub use g1::JubjubPoint;

/// The number of bytes of a Jubjub scalar.
pub const JUBJUB_SCALAR_LEN: usize = 32;
