use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token secret must not be empty")]
    EmptySecret,

    #[error("Token expired")]
    Expired,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token lifetime is out of range")]
    TtlOutOfRange,

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Failed to sign token: {0}")]
    Signing(String),
}
