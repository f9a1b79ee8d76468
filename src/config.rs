use time::{Duration, OffsetDateTime};

use crate::hotp::Algorithm;
use crate::secret::Encoding;

pub const DEFAULT_TIME_STEP: Duration = Duration::seconds(30);
pub const DEFAULT_DIGITS: u32 = 6;

/// Parameters shared by every code generation.
///
/// The defaults are those of RFC 6238: Base32 secret, 30 second step,
/// 6 digits, HMAC-SHA-1, counting from the UNIX epoch. Values are checked
/// by the stage that uses them, so building a config never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtpConfig {
    pub encoding: Encoding,
    pub time_step: Duration,
    pub digits: u32,
    pub algorithm: Algorithm,
    pub epoch: OffsetDateTime,
}

impl Default for OtpConfig {
    fn default() -> Self {
        OtpConfig {
            encoding: Encoding::default(),
            time_step: DEFAULT_TIME_STEP,
            digits: DEFAULT_DIGITS,
            algorithm: Algorithm::default(),
            epoch: OffsetDateTime::UNIX_EPOCH,
        }
    }
}

impl OtpConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    #[must_use]
    pub fn with_time_step(mut self, time_step: Duration) -> Self {
        self.time_step = time_step;
        self
    }

    #[must_use]
    pub fn with_digits(mut self, digits: u32) -> Self {
        self.digits = digits;
        self
    }

    #[must_use]
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    #[must_use]
    pub fn with_epoch(mut self, epoch: OffsetDateTime) -> Self {
        self.epoch = epoch;
        self
    }
}
