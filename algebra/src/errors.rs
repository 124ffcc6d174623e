use ark_std::{error, fmt};

/// Errors raised by the algebra layer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AlgebraError {
    /// Could not decompress a group element.
    DecompressElementError,
    /// Could not deserialize an object.
    DeserializationError,
    /// Could not serialize an object.
    SerializationError,
    /// Index out of bounds.
    IndexError,
    /// Unexpected parameter for method or function.
    ParameterError,
    /// The field element is not invertible.
    FieldInversionError,
    /// The group element is not invertible.
    GroupInversionError,
}

impl fmt::Display for AlgebraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AlgebraError::DecompressElementError => "Could not decompress group element",
            AlgebraError::DeserializationError => "Could not deserialize object",
            AlgebraError::SerializationError => "Could not serialize object",
            AlgebraError::IndexError => "Index out of bounds",
            AlgebraError::ParameterError => "Unexpected parameter for method or function",
            AlgebraError::FieldInversionError => "Field element not invertible",
            AlgebraError::GroupInversionError => "Group element not invertible",
        })
    }
}

impl error::Error for AlgebraError {}
