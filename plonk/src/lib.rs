//! Circuit frontend and PLONK proving backend of the Silex stack.
//!
//! The frontend lowers arithmetic/boolean/comparison circuit descriptions to
//! either a rank-1 constraint system or a PLONK-style gate system; the
//! backend turns a compiled gate system plus a solved witness into a
//! KZG-based PLONK proof.
#![deny(warnings)]
#![allow(clippy::needless_borrow)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::upper_case_acronyms)]

#[macro_use]
extern crate serde_derive;

pub mod errors;
pub mod frontend;
pub mod gadgets;
pub mod plonk;
pub mod poly_commit;
