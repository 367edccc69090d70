use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("malformed numeral: {0}")]
    MalformedInput(String),

    #[error("cannot add points on different curves")]
    CurveMismatch,

    #[error("{value} has no inverse modulo {modulus}")]
    NonInvertible { value: String, modulus: String },

    #[error("invalid modulus: {0}")]
    InvalidModulus(String),
}
