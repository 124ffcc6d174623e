use crate::frontend::errors::SolverError;
use crate::frontend::linear_expression::LinearExpression;
use crate::frontend::VarIndex;
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use silex_algebra::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

/// The kind of an out-of-band computation the solver performs when a value
/// cannot be expressed as a linear combination.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HintKind {
    /// `1 - a^(p-1)`: 1 when the input is zero, 0 otherwise.
    IsZero,
    /// The i-th bit of the input; the bit index is the static parameter.
    IthBit,
    /// The modular inverse of the input in the field.
    Inverse,
    /// The inverse of the first input modulo the second.
    InvMod,
    /// The integer quotient of the first input by the second.
    IntDiv,
    /// A user hint registered under a stable id.
    Custom(u32),
}

/// A recorded hint: the solver computes the output wire from the resolved
/// values of the input expressions.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HintRecord {
    /// The hint kind.
    pub kind: HintKind,
    /// The internal wire receiving the output.
    pub wire: VarIndex,
    /// The input expressions, resolved against the solution vector.
    pub inputs: Vec<LinearExpression>,
    /// Static parameters, e.g. the bit index of `IthBit`.
    pub params: Vec<u64>,
}

/// The signature of a user hint function.
pub type HintFn<F> = dyn Fn(&[F]) -> core::result::Result<F, String> + Send + Sync;

/// User hint functions, registered by stable id.
#[derive(Clone, Default)]
pub struct HintRegistry<F> {
    functions: HashMap<u32, Arc<HintFn<F>>>,
}

impl<F: Scalar> HintRegistry<F> {
    /// Create an empty registry.
    pub fn new() -> Self {
        HintRegistry {
            functions: HashMap::new(),
        }
    }

    /// Register a hint closure under `id`, replacing any previous one.
    pub fn register(&mut self, id: u32, f: Arc<HintFn<F>>) {
        self.functions.insert(id, f);
    }

    /// Evaluate a hint kind over resolved input values.
    pub fn evaluate(
        &self,
        kind: HintKind,
        inputs: &[F],
        params: &[u64],
    ) -> core::result::Result<F, SolverError> {
        match kind {
            HintKind::IsZero => {
                // 1 - a^(p-1), evaluated directly
                if inputs[0].is_zero() {
                    Ok(F::one())
                } else {
                    Ok(F::zero())
                }
            }
            HintKind::IthBit => {
                let i = params[0];
                let value: BigUint = inputs[0].into_biguint();
                Ok(F::from(value.bit(i) as u64))
            }
            HintKind::Inverse => inputs[0]
                .inv()
                .map_err(|_| SolverError::HintFailure("inverse of zero".to_string())),
            HintKind::InvMod => {
                let a = BigInt::from(inputs[0].into_biguint());
                let m = BigInt::from(inputs[1].into_biguint());
                if m.is_zero() {
                    return Err(SolverError::HintFailure("zero modulus".to_string()));
                }
                let gcd = a.extended_gcd(&m);
                if !gcd.gcd.is_one() {
                    return Err(SolverError::HintFailure(
                        "input is not invertible modulo the parameter".to_string(),
                    ));
                }
                let inv = gcd.x.mod_floor(&m);
                let (_, bytes) = inv.to_bytes_le();
                F::from_bytes(&bytes)
                    .map_err(|_| SolverError::HintFailure("modular inverse overflow".to_string()))
            }
            HintKind::IntDiv => {
                let a = inputs[0].into_biguint();
                let b = inputs[1].into_biguint();
                if b.is_zero() {
                    return Err(SolverError::HintFailure(
                        "integer division by zero".to_string(),
                    ));
                }
                Ok(F::from(&(a / b)))
            }
            HintKind::Custom(id) => {
                let f = self.functions.get(&id).ok_or_else(|| {
                    SolverError::HintFailure(format!("no hint registered under id {}", id))
                })?;
                f(inputs).map_err(SolverError::HintFailure)
            }
        }
    }
}
