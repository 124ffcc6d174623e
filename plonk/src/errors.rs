use ark_std::{error, fmt};
use silex_algebra::prelude::AlgebraError;

pub(crate) type Result<T> = core::result::Result<T, PlonkError>;

/// Errors raised while preprocessing, proving or verifying.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PlonkError {
    /// Algebra error.
    Algebra(AlgebraError),
    /// Error with message.
    Message(String),
    /// No subgroup of the requested order exists in the field.
    GroupNotFound(usize),
    /// Error occurred when proving.
    ProofError,
    /// The witness is wrong when proving.
    ProofErrorInvalidWitness,
    /// Polynomial commitment error.
    CommitmentError,
    /// Error occurred during setup.
    SetupError,
    /// Error occurred during verification.
    VerificationError,
    /// Division by zero.
    DivisionByZero,
    /// Function parameters error.
    FuncParamsError,
    /// The evaluation point of an opening proof is inconsistent.
    PCSProveEvalError,
    /// The degree of the polynomial is higher than the maximum degree supported.
    DegreeError,
}

impl fmt::Display for PlonkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlonkError::Algebra(e) => write!(f, "Algebra: {}", e),
            PlonkError::Message(e) => f.write_str(e),
            PlonkError::GroupNotFound(n) => {
                write!(f, "A multiplicative subgroup of order {} does not exist.", n)
            }
            PlonkError::ProofError => f.write_str("Proof error."),
            PlonkError::ProofErrorInvalidWitness => f.write_str("Proof error invalid witness."),
            PlonkError::CommitmentError => f.write_str("Commitment error."),
            PlonkError::SetupError => f.write_str("Setup error."),
            PlonkError::VerificationError => f.write_str("Verification error."),
            PlonkError::DivisionByZero => f.write_str("Division by zero."),
            PlonkError::FuncParamsError => f.write_str("Function params error."),
            PlonkError::PCSProveEvalError => {
                f.write_str("The claimed evaluation is inconsistent with the polynomial.")
            }
            PlonkError::DegreeError => f.write_str(
                "The degree of the polynomial is higher than the maximum degree supported.",
            ),
        }
    }
}

impl error::Error for PlonkError {}

impl From<AlgebraError> for PlonkError {
    fn from(e: AlgebraError) -> PlonkError {
        PlonkError::Algebra(e)
    }
}
