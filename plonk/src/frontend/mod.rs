//! The arithmetization frontend.
//!
//! A circuit describes its tagged input leaves through [`Circuit::declare`]
//! and builds constraints in [`Circuit::define`] against one of the two
//! builder flavors: [`R1csBuilder`] emits rank-1 constraints `L * R = O`,
//! [`SparseBuilder`] emits PLONK gates
//! `qL*l + qR*r + qM*l*r + qO*o + qK = 0`.

use silex_algebra::prelude::*;
use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

pub mod api;
pub mod coeffs;
pub mod debug_info;
pub mod errors;
pub mod hints;
pub mod linear_expression;
pub mod r1cs;
pub mod solver;
pub mod sparse;
pub mod term;
pub mod variable;

pub use api::Api;
pub use coeffs::{CoeffId, CoeffPool};
pub use errors::{FrontendError, SolverError};
pub use hints::{HintKind, HintRegistry};
pub use linear_expression::LinearExpression;
pub use r1cs::R1csBuilder;
pub use sparse::SparseBuilder;
pub use term::{Term, Visibility};
pub use variable::{Input, Variable};

/// Variable index within its visibility class.
pub type VarIndex = usize;

/// Constraint index.
pub type CsIndex = usize;

/// The ordered list of tagged input leaves of a circuit. The declaration
/// order is part of the witness ABI.
#[derive(Debug, Default, Clone)]
pub struct Layout {
    pub(crate) leaves: Vec<(String, Visibility)>,
}

impl Layout {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a public input leaf.
    pub fn public(&mut self, name: &str) {
        self.push(name, Visibility::Public)
    }

    /// Declare a secret input leaf.
    pub fn secret(&mut self, name: &str) {
        self.push(name, Visibility::Secret)
    }

    fn push(&mut self, name: &str, visibility: Visibility) {
        assert!(
            self.leaves.iter().all(|(n, _)| n != name),
            "duplicate input leaf: {}",
            name
        );
        self.leaves.push((name.to_string(), visibility));
    }
}

/// The input variables allocated for a circuit, addressable by leaf name.
#[derive(Debug, Clone)]
pub struct Inputs {
    vars: Vec<(String, Variable)>,
}

impl Inputs {
    /// Return the variable allocated for the leaf `name`.
    pub fn get(&self, name: &str) -> Variable {
        self.vars
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| panic!("no input leaf named {}", name))
    }
}

/// A witness assignment, mapping input leaf names to field values.
#[derive(Debug, Clone, Default)]
pub struct Assignment<F> {
    pub(crate) values: BTreeMap<String, F>,
}

impl<F: Scalar> Assignment<F> {
    /// Create an empty assignment.
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Assign a value to the leaf `name`.
    pub fn set(mut self, name: &str, value: F) -> Self {
        self.values.insert(name.to_string(), value);
        self
    }
}

/// A user circuit: declares its tagged leaves, then defines its constraints.
pub trait Circuit<F: Scalar> {
    /// Declare the public and secret input leaves, in a fixed order.
    fn declare(&self, layout: &mut Layout);

    /// Build the circuit from the allocated input variables.
    fn define<B: Builder<Field = F>>(
        &self,
        api: &mut B,
        inputs: &Inputs,
    ) -> core::result::Result<(), FrontendError>;
}

/// An object able to build a constraint system: the full operation surface
/// plus input allocation and finalization.
pub trait Builder: Api {
    /// The compiled constraint system this builder produces.
    type Output;

    /// Allocate a public input variable.
    fn new_public_variable(&mut self, name: &str) -> Variable;

    /// Allocate a secret input variable.
    fn new_secret_variable(&mut self, name: &str) -> Variable;

    /// Compact coefficients, fix wire numbering and produce the compiled
    /// system.
    fn finalize(self, opt: &CompileOption) -> core::result::Result<Self::Output, FrontendError>;
}

/// Optional arguments to [`compile`].
#[derive(Debug, Default, Clone)]
pub struct CompileOption {
    /// When set, the compiler does not reject circuits with public/secret
    /// variables that no constraint references.
    pub ignore_unconstrained_inputs: bool,
    /// When set, the circuit is compiled twice and the two outputs compared;
    /// a mismatch reports [`FrontendError::NondeterministicCompilation`].
    pub check_determinism: bool,
}

/// Compile a circuit with the builder flavor `B`.
///
/// The driver allocates the declared public and secret leaves in order,
/// invokes the circuit's `define`, then finalizes the builder. A panic
/// raised inside `define` (a constant-domain violation is reported that way)
/// is trapped and returned as a compile error together with a backtrace.
pub fn compile<C, B>(
    circuit: &C,
    opt: &CompileOption,
) -> core::result::Result<B::Output, FrontendError>
where
    B: Builder + Default,
    C: Circuit<B::Field>,
    B::Output: PartialEq,
{
    let output = compile_once::<C, B>(circuit, opt)?;
    if opt.check_determinism {
        let second = compile_once::<C, B>(circuit, opt)?;
        if output != second {
            return Err(FrontendError::NondeterministicCompilation);
        }
    }
    Ok(output)
}

fn compile_once<C, B>(
    circuit: &C,
    opt: &CompileOption,
) -> core::result::Result<B::Output, FrontendError>
where
    B: Builder + Default,
    C: Circuit<B::Field>,
{
    let mut builder = B::default();

    let run = catch_unwind(AssertUnwindSafe(|| -> core::result::Result<B, FrontendError> {
        let mut layout = Layout::new();
        circuit.declare(&mut layout);

        let mut vars = Vec::with_capacity(layout.leaves.len());
        for (name, visibility) in layout.leaves.iter() {
            let var = match visibility {
                Visibility::Public => builder.new_public_variable(name),
                Visibility::Secret => builder.new_secret_variable(name),
                _ => unreachable!("layout only holds public/secret leaves"),
            };
            vars.push((name.clone(), var));
        }
        let inputs = Inputs { vars };

        circuit.define(&mut builder, &inputs)?;
        Ok(builder)
    }));

    let builder = match run {
        Ok(result) => result?,
        Err(payload) => {
            let message = payload
                .downcast_ref::<String>()
                .cloned()
                .or_else(|| payload.downcast_ref::<&str>().map(|s| s.to_string()))
                .unwrap_or_else(|| "circuit definition panicked".to_string());
            let backtrace = std::backtrace::Backtrace::force_capture();
            return Err(FrontendError::UnsatisfiableConstant(format!(
                "{}\n{}",
                message, backtrace
            )));
        }
    };

    builder.finalize(opt)
}
