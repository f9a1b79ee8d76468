//! RFC 4226 HOTP: HMAC over the big-endian counter, then dynamic truncation.

use std::fmt;
use std::str::FromStr;

use byteorder::{BigEndian, ByteOrder};
use openssl::error::ErrorStack;
use openssl::hash::MessageDigest;
use openssl::pkey::PKey;
use openssl::sign::Signer;

use crate::error::{ComputeError, ParseError};
use crate::secret::Secret;

/// HMAC hash function. SHA-1 is the RFC 6238 default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    #[default]
    Sha1,
    Sha256,
    Sha512,
}

impl Algorithm {
    fn message_digest(self) -> MessageDigest {
        match self {
            Self::Sha1 => MessageDigest::sha1(),
            Self::Sha256 => MessageDigest::sha256(),
            Self::Sha512 => MessageDigest::sha512(),
        }
    }

    /// Length in bytes of the HMAC output.
    pub fn digest_len(self) -> usize {
        self.message_digest().size()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha1 => write!(f, "SHA1"),
            Self::Sha256 => write!(f, "SHA256"),
            Self::Sha512 => write!(f, "SHA512"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.to_ascii_uppercase();
        let name = name.strip_prefix("HMAC").unwrap_or(&name);
        match name.trim_start_matches('-').replace('-', "").as_str() {
            "SHA1" => Ok(Self::Sha1),
            "SHA256" => Ok(Self::Sha256),
            "SHA512" => Ok(Self::Sha512),
            _ => Err(ParseError::UnknownAlgorithm(s.to_owned())),
        }
    }
}

/// Calculates the HMAC digest for the given key and counter.
fn calc_digest(key: &[u8], counter: u64, algorithm: Algorithm) -> Result<Vec<u8>, ErrorStack> {
    let mut message = [0u8; 8];
    BigEndian::write_u64(&mut message, counter);
    let pkey = PKey::hmac(key)?;
    let mut signer = Signer::new(algorithm.message_digest(), &pkey)?;
    signer.update(&message)?;
    signer.sign_to_vec()
}

/// Dynamic truncation to a 31-bit value.
fn truncate(digest: &[u8]) -> Result<u32, ComputeError> {
    let offset = match digest.last() {
        Some(last) => (last & 0x0f) as usize,
        None => return Err(ComputeError::DigestTooShort(0)),
    };
    let window = digest
        .get(offset..offset + 4)
        .ok_or(ComputeError::DigestTooShort(digest.len()))?;
    Ok(BigEndian::read_u32(window) & 0x7fff_ffff)
}

/// HOTP value for `counter`, before reduction to a fixed number of digits.
pub fn compute(key: &Secret, counter: u64, algorithm: Algorithm) -> Result<u32, ComputeError> {
    if key.is_empty() {
        return Err(ComputeError::EmptyKey);
    }
    let digest = calc_digest(key.as_bytes(), counter, algorithm)?;
    truncate(&digest)
}
