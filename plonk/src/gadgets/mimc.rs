use crate::frontend::api::Api;
use crate::frontend::variable::{Input, Variable};
use sha2::{Digest, Sha256};
use silex_algebra::prelude::*;

/// The number of rounds of the x^5 MiMC permutation.
pub const N_ROUNDS: usize = 110;

/// The seed the round constants derive from.
const CONSTANTS_SEED: &[u8] = b"silex_mimc_seed";

/// The MiMC hash with the x^5 round function, in Miyaguchi-Preneel mode.
/// Round constants derive from a SHA-256 chain over a fixed seed, reduced
/// into the field.
#[derive(Clone, Debug)]
pub struct Mimc<F> {
    constants: Vec<F>,
}

impl<F: Scalar> Default for Mimc<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Scalar> Mimc<F> {
    /// Instantiate the hash with the standard constants.
    pub fn new() -> Self {
        let mut constants = Vec::with_capacity(N_ROUNDS);
        let mut state: Vec<u8> = CONSTANTS_SEED.to_vec();
        for _ in 0..N_ROUNDS {
            state = Sha256::digest(&state).to_vec();
            constants.push(F::from_be_bytes_mod_order(&state));
        }
        Mimc { constants }
    }

    /// The keyed permutation over field values.
    fn permute_native(&self, message: F, key: F) -> F {
        let mut x = message;
        for c in self.constants.iter() {
            let t = x.add(&key).add(c);
            let t2 = t.square();
            x = t2.square().mul(&t);
        }
        x.add(&key)
    }

    /// Hash field values outside the circuit.
    pub fn hash_native(&self, inputs: &[F]) -> F {
        let mut h = F::zero();
        for m in inputs.iter() {
            let p = self.permute_native(*m, h);
            h = h.add(&p).add(m);
        }
        h
    }

    /// The keyed permutation over circuit variables.
    fn permute<B: Api<Field = F>>(&self, api: &mut B, message: &Variable, key: &Variable) -> Variable {
        let mut x = message.clone();
        for c in self.constants.iter() {
            let t = api.sum(&[
                Input::from(&x),
                Input::from(key),
                Input::Const(*c),
            ]);
            let t2 = api.mul(&t, &t);
            let t4 = api.mul(&t2, &t2);
            x = api.mul(&t4, &t);
        }
        api.add(&x, key)
    }

    /// Hash circuit variables.
    pub fn hash<B: Api<Field = F>>(&self, api: &mut B, inputs: &[Variable]) -> Variable {
        let mut h = api.zero();
        for m in inputs.iter() {
            let p = self.permute(api, m, &h);
            h = api.sum(&[Input::from(&p), Input::from(&h), Input::from(m)]);
        }
        h
    }
}
