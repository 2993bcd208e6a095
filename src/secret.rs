//! Representation of a shared secret, either raw bytes or a base32 string.
//!
//! # Examples
//!
//! - Generate a fresh secret and derive a code from it
//! ```
//! use otp_authenticator::{Authenticator, Secret};
//!
//! let secret = Secret::generate(16).unwrap();
//! let authenticator = Authenticator::default();
//!
//! println!(
//!     "secret: {} code: {}",
//!     secret,
//!     authenticator.current_code(&secret.to_string()).unwrap()
//! );
//! ```
//!
//! - Use a secret supplied by the user in base32 form
//! ```
//! use otp_authenticator::Secret;
//!
//! let secret = Secret::Encoded("OBWGC2LOFVZXI4TJNZTS243FMNZGK5BNGEZDG".to_string());
//! let key = secret.to_bytes().unwrap();
//! ```

use constant_time_eq::constant_time_eq;

use rand::RngCore;

use crate::base32;
use crate::error::{DecodeError, SecretLengthError};

/// Shared secret between client and server, used to generate and to
/// validate codes. Sensitive data, treat it accordingly.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde_support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "zeroize", derive(zeroize::Zeroize, zeroize::ZeroizeOnDrop))]
pub enum Secret {
    /// Non-encoded raw key bytes.
    Raw(Vec<u8>),
    /// Base32 encoded secret.
    Encoded(String),
}

impl PartialEq for Secret {
    /// Compares the decoded byte values in constant time. One secret can
    /// be `Raw` and the other `Encoded`. A secret that does not decode
    /// compares unequal to everything, including itself.
    fn eq(&self, other: &Self) -> bool {
        match (self.to_bytes(), other.to_bytes()) {
            (Ok(a), Ok(b)) => constant_time_eq(&a, &b),
            _ => false,
        }
    }
}

impl Default for Secret {
    /// Generates a random secret of the default 16-character length.
    fn default() -> Self {
        Secret::generate(16).unwrap()
    }
}

impl Secret {
    /// Get the key bytes this secret represents.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if an encoded secret is not valid base32.
    pub fn to_bytes(&self) -> Result<Vec<u8>, DecodeError> {
        match self {
            Secret::Raw(s) => Ok(s.to_vec()),
            Secret::Encoded(s) => base32::decode(s),
        }
    }

    /// Try to transform a `Secret::Encoded` into a `Secret::Raw`.
    pub fn to_raw(&self) -> Result<Self, DecodeError> {
        match self {
            Secret::Raw(_) => Ok(self.clone()),
            Secret::Encoded(s) => base32::decode(s).map(Secret::Raw),
        }
    }

    /// Transform a `Secret::Raw` into a `Secret::Encoded`, padded as per
    /// RFC 4648.
    pub fn to_encoded(&self) -> Self {
        match self {
            Secret::Raw(s) => Secret::Encoded(base32::encode(s)),
            Secret::Encoded(_) => self.clone(),
        }
    }

    /// Generate an encoded secret of `length` base32 characters using the
    /// thread-local CSPRNG.
    ///
    /// Each character carries 5 bits, so the allowed lengths of 16 to 128
    /// characters correspond to 80 to 640 bits of key material. Per
    /// [rfc-4226](https://www.rfc-editor.org/rfc/rfc4226#section-4) the
    /// shared secret should be at least 128 bits; prefer 32 characters or
    /// more for new deployments.
    ///
    /// # Errors
    ///
    /// Returns a [`SecretLengthError`] if `length` is outside `16..=128`.
    pub fn generate(length: usize) -> Result<Secret, SecretLengthError> {
        Secret::generate_with(&mut rand::rng(), length)
    }

    /// Generate an encoded secret of `length` base32 characters, drawing
    /// entropy from the given source.
    ///
    /// One byte is drawn per output character and its low 5 bits select
    /// the alphabet symbol, so every symbol is uniformly distributed. The
    /// source must be cryptographically secure for production use; tests
    /// may inject a deterministic one.
    ///
    /// # Errors
    ///
    /// Returns a [`SecretLengthError`] if `length` is outside `16..=128`.
    pub fn generate_with<R: RngCore + ?Sized>(
        rng: &mut R,
        length: usize,
    ) -> Result<Secret, SecretLengthError> {
        if !(16..=128).contains(&length) {
            return Err(SecretLengthError(length));
        }
        let mut bytes = vec![0u8; length];
        rng.fill_bytes(&mut bytes);
        let secret = bytes
            .iter()
            .map(|b| base32::ALPHABET[(b & 31) as usize] as char)
            .collect();
        Ok(Secret::Encoded(secret))
    }
}

impl std::fmt::Display for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Secret::Raw(bytes) => {
                for b in bytes {
                    write!(f, "{:02x}", b)?;
                }
                Ok(())
            }
            Secret::Encoded(s) => write!(f, "{}", s),
        }
    }
}
