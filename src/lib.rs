//! This library permits the creation of 2FA authentification tokens per
//! TOTP, and the verification of said tokens with configurable drift
//! tolerance, compatible with standard authenticator apps.
//!
//! It carries its own RFC 4648 [base32] codec for the shared secret, a
//! CSPRNG-backed secret generator, and the RFC 6238/4226 HMAC-SHA1 code
//! derivation with constant-time verification. The 30-second step is part
//! of the protocol and deliberately not configurable: changing it would
//! break interoperability with authenticator clients.
//!
//! # Examples
//!
//! ```rust
//! use otp_authenticator::{Authenticator, Secret};
//!
//! let secret = Secret::generate(16).unwrap();
//! let authenticator = Authenticator::default();
//!
//! let code = authenticator.current_code(&secret.to_string()).unwrap();
//! assert!(authenticator
//!     .verify(&secret.to_string(), &code, 1)
//!     .unwrap());
//! ```
//!
//! Deterministic use with an explicit time slice:
//!
//! ```rust
//! use otp_authenticator::Authenticator;
//!
//! let authenticator = Authenticator::default();
//! let code = authenticator.code_at("SECRET", 46196974).unwrap();
//! assert_eq!(code, "447032");
//! ```

pub mod base32;
mod error;
mod secret;

pub use error::{DecodeError, DigitsError, OtpError, SecretLengthError};
pub use secret::Secret;

use constant_time_eq::constant_time_eq;

use hmac::Mac;
use std::time::{SystemTime, SystemTimeError, UNIX_EPOCH};

type HmacSha1 = hmac::Hmac<sha1::Sha1>;

/// Width of one time slice in seconds, as fixed by
/// [rfc-6238](https://tools.ietf.org/html/rfc6238#section-5.2) and every
/// deployed authenticator app.
pub const TIME_STEP: u64 = 30;

/// Capability to read the current Unix time, injected into
/// [`Authenticator`] so time-window logic is testable.
pub trait Clock {
    /// Seconds since the Unix epoch.
    fn now(&self) -> Result<u64, SystemTimeError>;
}

/// [`Clock`] reading the system time. The default for production use.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Result<u64, SystemTimeError> {
        Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
    }
}

/// Generates and verifies TOTP codes for base32-encoded secrets.
///
/// Holds only immutable configuration: the code width in digits and the
/// clock. Secrets are passed per call, so one `Authenticator` serves any
/// number of accounts and can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct Authenticator<C = SystemClock> {
    /// The number of digits composing a code. Per
    /// [rfc-4226](https://tools.ietf.org/html/rfc4226#section-5.3) at
    /// least 6 for real deployments; anything in `1..=10` is accepted
    /// since the truncated value is reduced modulo `10^digits`.
    digits: u32,
    clock: C,
}

impl Default for Authenticator {
    /// 6-digit codes against the system clock, the configuration every
    /// authenticator app expects.
    fn default() -> Self {
        Authenticator {
            digits: 6,
            clock: SystemClock,
        }
    }
}

impl Authenticator {
    /// Creates an authenticator producing codes of `digits` width,
    /// reading the system clock.
    ///
    /// # Errors
    ///
    /// Returns a [`DigitsError`] if `digits` is outside `1..=10`.
    pub fn new(digits: u32) -> Result<Self, DigitsError> {
        Authenticator::with_clock(digits, SystemClock)
    }
}

impl<C: Clock> Authenticator<C> {
    /// Creates an authenticator with an explicit [`Clock`], used to pin
    /// time in tests.
    ///
    /// # Errors
    ///
    /// Returns a [`DigitsError`] if `digits` is outside `1..=10`.
    pub fn with_clock(digits: u32, clock: C) -> Result<Self, DigitsError> {
        if !(1..=10).contains(&digits) {
            return Err(DigitsError(digits));
        }
        Ok(Authenticator { digits, clock })
    }

    /// The configured code width.
    pub fn digits(&self) -> u32 {
        self.digits
    }

    /// The current 30-second time slice, `floor(unix_time / 30)`.
    pub fn current_time_slice(&self) -> Result<u64, SystemTimeError> {
        Ok(self.clock.now()? / TIME_STEP)
    }

    /// Seconds until the current code rotates.
    pub fn ttl(&self) -> Result<u64, SystemTimeError> {
        Ok(TIME_STEP - (self.clock.now()? % TIME_STEP))
    }

    /// Dynamic truncation per
    /// [rfc-4226](https://tools.ietf.org/html/rfc4226#section-5.3): the
    /// low nibble of the last digest byte selects 4 bytes, read big-endian
    /// with the sign bit masked, reduced modulo `10^digits`.
    fn code_for_key(&self, key: &[u8], time_slice: u64) -> String {
        let mut mac = HmacSha1::new_from_slice(key).unwrap();
        mac.update(&time_slice.to_be_bytes());
        let digest = mac.finalize().into_bytes();
        let offset = (digest[19] & 0x0f) as usize;
        let value =
            u32::from_be_bytes(digest[offset..offset + 4].try_into().unwrap()) & 0x7fff_ffff;
        format!(
            "{1:00$}",
            self.digits as usize,
            u64::from(value) % 10u64.pow(self.digits)
        )
    }

    /// Calculates the code for the given secret and time slice.
    ///
    /// Pure: identical arguments always yield the identical code.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the secret is not valid base32. A bad
    /// secret never silently produces a code.
    pub fn code_at(&self, secret: &str, time_slice: u64) -> Result<String, DecodeError> {
        let key = base32::decode(secret)?;
        Ok(self.code_for_key(&key, time_slice))
    }

    /// Calculates the code for the given secret at the current time.
    ///
    /// # Errors
    ///
    /// Returns an [`OtpError`] if the secret is not valid base32 or the
    /// clock cannot be read.
    pub fn current_code(&self, secret: &str) -> Result<String, OtpError> {
        let time_slice = self.current_time_slice()?;
        Ok(self.code_at(secret, time_slice)?)
    }

    /// Checks `code` against the window of `2 * discrepancy + 1` time
    /// slices centered on `time_slice`.
    ///
    /// `discrepancy` is the allowed clock drift in 30-second steps, not
    /// seconds: 1 accepts ±30s, 8 accepts ±4 minutes. A code of the wrong
    /// length is rejected up front, so a valid code with a digit prepended
    /// does not pass. Each candidate comparison runs in constant time with
    /// respect to the code contents.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the secret is not valid base32. A
    /// wrong code is never an error, only `Ok(false)`.
    pub fn verify_at(
        &self,
        secret: &str,
        code: &str,
        discrepancy: u8,
        time_slice: u64,
    ) -> Result<bool, DecodeError> {
        if code.len() != self.digits as usize {
            return Ok(false);
        }
        let key = base32::decode(secret)?;
        for offset in -i64::from(discrepancy)..=i64::from(discrepancy) {
            // Slices before the epoch do not exist, skip them.
            let Some(candidate) = time_slice.checked_add_signed(offset) else {
                continue;
            };
            if constant_time_eq(self.code_for_key(&key, candidate).as_bytes(), code.as_bytes()) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Checks `code` against the drift window around the current time.
    ///
    /// # Errors
    ///
    /// Returns an [`OtpError`] if the secret is not valid base32 or the
    /// clock cannot be read.
    pub fn verify(&self, secret: &str, code: &str, discrepancy: u8) -> Result<bool, OtpError> {
        let time_slice = self.current_time_slice()?;
        Ok(self.verify_at(secret, code, discrepancy, time_slice)?)
    }
}
