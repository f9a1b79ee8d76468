//! Turning caller-supplied secret text into HMAC key material.

use std::fmt;
use std::str::FromStr;

use base32::Alphabet;
use log::warn;
use zeroize::Zeroizing;

use crate::error::{DecodeError, ParseError};

/// Keys shorter than this many bytes are accepted but fall below the
/// 128 bits RFC 4226 recommends.
const RECOMMENDED_KEY_LEN: usize = 16;

/// How the secret text maps to key bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// RFC 4648 Base32, padding optional. What authenticator apps hand out.
    #[default]
    Base32,
    /// Hexadecimal, either case.
    Hex,
    /// The UTF-8 bytes of the text itself.
    Raw,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base32 => write!(f, "base32"),
            Self::Hex => write!(f, "hex"),
            Self::Raw => write!(f, "raw"),
        }
    }
}

impl FromStr for Encoding {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "base32" | "b32" => Ok(Self::Base32),
            "hex" | "base16" => Ok(Self::Hex),
            "raw" | "ascii" | "bytes" => Ok(Self::Raw),
            _ => Err(ParseError::UnknownEncoding(s.to_owned())),
        }
    }
}

/// Shared HMAC key. Never empty; the buffer is wiped on drop.
pub struct Secret(pub(crate) Zeroizing<Vec<u8>>);

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("len", &self.0.len())
            .finish_non_exhaustive()
    }
}

impl Secret {
    /// Wraps already-decoded key bytes.
    pub fn from_bytes<B: Into<Vec<u8>>>(bytes: B) -> Result<Self, DecodeError> {
        let bytes = Zeroizing::new(bytes.into());
        if bytes.is_empty() {
            return Err(DecodeError::Empty);
        }
        Ok(Secret(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Decodes `text` into a [`Secret`] using the given encoding.
///
/// Base32 and hex input has all whitespace removed first; raw input only
/// loses leading and trailing whitespace. Any character outside the
/// alphabet fails the whole decode.
pub fn decode(text: &str, encoding: Encoding) -> Result<Secret, DecodeError> {
    let bytes = match encoding {
        Encoding::Base32 => decode_base32(&strip_whitespace(text))?,
        Encoding::Hex => decode_hex(&strip_whitespace(text))?,
        Encoding::Raw => text.trim().as_bytes().to_vec(),
    };
    let secret = Secret::from_bytes(bytes)?;
    if secret.len() < RECOMMENDED_KEY_LEN {
        warn!(
            "secret key is {} bits, below the recommended {} bits",
            secret.len() * 8,
            RECOMMENDED_KEY_LEN * 8
        );
    }
    Ok(secret)
}

fn strip_whitespace(text: &str) -> Zeroizing<String> {
    Zeroizing::new(text.chars().filter(|c| !c.is_whitespace()).collect())
}

fn decode_base32(text: &str) -> Result<Vec<u8>, DecodeError> {
    let body = text.trim_end_matches('=');
    if let Some((position, character)) = body
        .chars()
        .enumerate()
        .find(|&(_, c)| !matches!(c, 'A'..='Z' | 'a'..='z' | '2'..='7'))
    {
        return Err(DecodeError::InvalidCharacter { character, position });
    }
    if body.is_empty() {
        return Err(DecodeError::Empty);
    }
    // 1, 3 and 6 trailing characters cannot come from any whole number of bytes.
    if matches!(body.len() % 8, 1 | 3 | 6) {
        return Err(DecodeError::Malformed("base32"));
    }

    let mut padded = Zeroizing::new(body.to_ascii_uppercase());
    while padded.len() % 8 != 0 {
        padded.push('=');
    }
    base32::decode(Alphabet::Rfc4648 { padding: true }, &padded)
        .ok_or(DecodeError::Malformed("base32"))
}

fn decode_hex(text: &str) -> Result<Vec<u8>, DecodeError> {
    if let Some((position, character)) = text
        .chars()
        .enumerate()
        .find(|(_, c)| !c.is_ascii_hexdigit())
    {
        return Err(DecodeError::InvalidCharacter { character, position });
    }
    if text.is_empty() {
        return Err(DecodeError::Empty);
    }
    hex::decode(text).map_err(|_| DecodeError::Malformed("hex"))
}
