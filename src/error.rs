use openssl::error::ErrorStack;
use thiserror::Error;
use time::Duration;

/// The secret text could not be turned into key material.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Nothing left to decode once whitespace was stripped, or the
    /// decoded key has no bytes.
    #[error("secret is empty")]
    Empty,
    /// A character outside the selected encoding's alphabet.
    #[error("invalid character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },
    /// The characters are valid but do not form a complete encoding.
    #[error("malformed {0} secret")]
    Malformed(&'static str),
}

/// The moving factor could not be derived from the timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeriveError {
    #[error("time step must be positive, got {0}")]
    InvalidTimeStep(Duration),
    #[error("timestamp precedes the epoch by {0}")]
    TimeBeforeEpoch(Duration),
    #[error("time-step counter does not fit in 64 bits")]
    CounterOverflow,
}

#[derive(Debug, Clone, Error)]
pub enum ComputeError {
    #[error("HMAC key is empty")]
    EmptyKey,
    #[error("HMAC computation failed: {0}")]
    HashFailure(#[from] ErrorStack),
    #[error("digest of {0} bytes is too short for dynamic truncation")]
    DigestTooShort(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("code length must be between 1 and 9 digits, got {0}")]
    InvalidDigits(u32),
}

/// A configuration value given as text was not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown hash algorithm {0:?}")]
    UnknownAlgorithm(String),
    #[error("unknown secret encoding {0:?}")]
    UnknownEncoding(String),
}

/// Failure of a single code generation, tagged with the stage that failed.
#[derive(Debug, Error)]
pub enum OtpError {
    #[error("decoding secret: {0}")]
    Decode(#[from] DecodeError),
    #[error("deriving counter: {0}")]
    Derive(#[from] DeriveError),
    #[error("computing HOTP: {0}")]
    Compute(#[from] ComputeError),
    #[error("formatting code: {0}")]
    Format(#[from] FormatError),
    #[error("no credential stored under {0:?}")]
    MissingCredential(String),
    #[error("credential store failed for {label:?}")]
    Store {
        label: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
