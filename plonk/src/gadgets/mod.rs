//! The standard circuit library: gadgets built on top of the frontend.

/// Module for EdDSA signature verification.
pub mod eddsa;

/// Module for Merkle-path verification.
pub mod merkle;

/// Module for the MiMC hash.
pub mod mimc;

/// Module for twisted Edwards curve arithmetic.
pub mod twisted_edwards;
