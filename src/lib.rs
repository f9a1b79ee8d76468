//! rust-otp is a Rust library for performing the HMAC-based One-time Password Algorithm as per RFC 4226
//! and the Time-based One-time Password Algorithm as per RFC 6238.
//! These are also the algorithms many mobile-based 2FA apps, such as Google Authenticator and Authy, use to generate 2FA codes.
//!
//! A code is produced by a short pipeline: [`secret::decode`] turns the secret text into key bytes,
//! [`counter::derive_counter`] turns a timestamp into the moving factor, [`hotp::compute`] runs
//! HMAC and dynamic truncation, and [`format::format_code`] renders the fixed-width decimal code.
//!
//! ```rust
//! use otp::{generate_code, make_hotp, OtpConfig};
//! use time::OffsetDateTime;
//!
//! let secret = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";
//! let config = OtpConfig::default();
//! assert_eq!(make_hotp(secret, 0, &config).unwrap(), "755224");
//!
//! let at = OffsetDateTime::from_unix_timestamp(59).unwrap();
//! assert_eq!(generate_code(secret, at, &config.with_digits(8)).unwrap(), "94287082");
//! ```

use log::{debug, trace};
use openssl::memcmp;
use time::OffsetDateTime;

pub mod config;
pub mod counter;
mod error;
pub mod format;
pub mod hotp;
pub mod secret;
pub mod store;

pub use config::OtpConfig;
pub use counter::{derive_counter, time_remaining};
pub use error::{ComputeError, DecodeError, DeriveError, FormatError, OtpError, ParseError};
pub use format::format_code;
pub use hotp::Algorithm;
pub use secret::{Encoding, Secret};
pub use store::{CredentialStore, MemoryStore};

/// Performs the [Time-based One-time Password Algorithm](http://en.wikipedia.org/wiki/Time-based_One-time_Password_Algorithm)
/// (TOTP) for `secret_text` at the instant `at`.
///
/// Stages run in order and the first failure is returned; nothing is kept between calls.
pub fn generate_code(secret_text: &str, at: OffsetDateTime, config: &OtpConfig) -> Result<String, OtpError> {
    let secret = secret::decode(secret_text, config.encoding)?;
    let counter = counter::derive_counter(at, config.time_step, config.epoch)?;
    trace!("derived counter {} from unix time {}", counter, at.unix_timestamp());
    let value = hotp::compute(&secret, counter, config.algorithm)?;
    drop(secret);
    debug!(
        "generated {}-digit {} code for counter {}",
        config.digits, config.algorithm, counter
    );
    Ok(format::format_code(value, config.digits)?)
}

/// [`generate_code`] at the current wall-clock time.
pub fn generate_code_now(secret_text: &str, config: &OtpConfig) -> Result<String, OtpError> {
    generate_code(secret_text, OffsetDateTime::now_utc(), config)
}

/// Performs the [HMAC-based One-time Password Algorithm](http://en.wikipedia.org/wiki/HMAC-based_One-time_Password_Algorithm)
/// (HOTP) for an explicit counter. The time step and epoch of `config` are not used.
pub fn make_hotp(secret_text: &str, counter: u64, config: &OtpConfig) -> Result<String, OtpError> {
    let secret = secret::decode(secret_text, config.encoding)?;
    let value = hotp::compute(&secret, counter, config.algorithm)?;
    Ok(format::format_code(value, config.digits)?)
}

/// Checks `candidate` against the codes of every window within `skew` steps
/// of the one containing `at`.
///
/// Windows that would precede the epoch are skipped. A candidate of the wrong
/// shape is rejected rather than treated as an error; configuration problems
/// still surface as errors.
pub fn verify_code(
    secret_text: &str,
    candidate: &str,
    at: OffsetDateTime,
    skew: u32,
    config: &OtpConfig,
) -> Result<bool, OtpError> {
    let secret = secret::decode(secret_text, config.encoding)?;
    let counter = counter::derive_counter(at, config.time_step, config.epoch)?;
    let first = counter.saturating_sub(u64::from(skew));
    let last = counter.saturating_add(u64::from(skew));

    let mut matched = false;
    for step in first..=last {
        let value = hotp::compute(&secret, step, config.algorithm)?;
        let code = format::format_code(value, config.digits)?;
        // Every window is checked so timing does not reveal which one matched.
        if code.len() == candidate.len() && memcmp::eq(code.as_bytes(), candidate.as_bytes()) {
            matched = true;
        }
    }
    trace!("checked counters {}..={}", first, last);
    Ok(matched)
}

/// Fetches the secret stored under `label` and runs [`generate_code`] with it.
pub fn code_for_label<S: CredentialStore>(
    store: &S,
    label: &str,
    at: OffsetDateTime,
    config: &OtpConfig,
) -> Result<String, OtpError> {
    let secret_text = store
        .get(label)
        .map_err(|e| OtpError::Store {
            label: label.to_owned(),
            source: Box::new(e),
        })?
        .ok_or_else(|| OtpError::MissingCredential(label.to_owned()))?;
    generate_code(&secret_text, at, config)
}
