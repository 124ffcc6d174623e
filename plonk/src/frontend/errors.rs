use ark_std::{error, fmt};

/// Compile-time errors of the frontend.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FrontendError {
    /// A constant-only computation produced a contradiction, e.g. a division
    /// by a known zero or a non-boolean constant in a boolean context.
    /// Carries the panic message and a backtrace.
    UnsatisfiableConstant(String),
    /// A declared public or secret variable is never referenced by any
    /// constraint.
    UnconstrainedInput(String),
    /// Two back-to-back compilations of the same circuit produced unequal
    /// outputs.
    NondeterministicCompilation,
    /// An error returned by the circuit definition.
    Message(String),
}

impl fmt::Display for FrontendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrontendError::UnsatisfiableConstant(msg) => {
                write!(f, "unsatisfiable constant constraint: {}", msg)
            }
            FrontendError::UnconstrainedInput(name) => {
                write!(f, "input '{}' is not constrained", name)
            }
            FrontendError::NondeterministicCompilation => {
                f.write_str("compiling twice produced different constraint systems")
            }
            FrontendError::Message(msg) => f.write_str(msg),
        }
    }
}

impl error::Error for FrontendError {}

/// Solve-time errors.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SolverError {
    /// The assignment violates a constraint. Carries the constraint index
    /// and the rendered debug info when the constraint has one attached.
    UnsatisfiedConstraint {
        /// Index of the violated constraint, in emission order.
        constraint: usize,
        /// Rendered debug information, when available.
        debug: Option<String>,
    },
    /// A hint function failed.
    HintFailure(String),
    /// A wire was never assigned by any constraint.
    UnsolvedVariable(usize),
    /// The witness assignment misses a declared input leaf.
    MissingAssignment(String),
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::UnsatisfiedConstraint { constraint, debug } => match debug {
                Some(d) => write!(f, "constraint #{} is not satisfied: {}", constraint, d),
                None => write!(f, "constraint #{} is not satisfied", constraint),
            },
            SolverError::HintFailure(msg) => write!(f, "hint failure: {}", msg),
            SolverError::UnsolvedVariable(idx) => {
                write!(f, "internal variable {} was never solved", idx)
            }
            SolverError::MissingAssignment(name) => {
                write!(f, "no value assigned to input '{}'", name)
            }
        }
    }
}

impl error::Error for SolverError {}
