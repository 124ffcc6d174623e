/// Module for shared prover/verifier helpers.
pub mod helpers;

/// Module for the indexer producing the proving and verifying keys.
pub mod indexer;

/// Module for the PLONK prover.
pub mod prover;

/// Module for the Fiat-Shamir transcript.
pub mod transcript;

/// Module for the PLONK verifier.
pub mod verifier;
