//! The crate for algebra for the Silex proving stack, which unifies the
//! interfaces of the supported curves.
#![deny(unused_import_braces, unused_qualifications, trivial_casts)]
#![deny(trivial_numeric_casts)]
#![deny(stable_features, unreachable_pub, non_shorthand_field_patterns)]
#![deny(unused_attributes, unused_imports, unused_mut, missing_docs)]
#![deny(unused_comparisons, bare_trait_objects, unused_must_use)]
#![forbid(unsafe_code)]
#![allow(
    clippy::op_ref,
    clippy::suspicious_op_assign_impl,
    clippy::upper_case_acronyms
)]

/// Module for the BLS12-381 curve
pub mod bls12_381;

/// Module for error handling
pub mod errors;

/// Module for the Jubjub curve
pub mod jubjub;

/// Module for traits
pub mod traits;

/// Module for utils
pub mod utils;

/// Module for prelude
#[doc(hidden)]
pub mod prelude;
