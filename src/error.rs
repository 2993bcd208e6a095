use std::time::SystemTimeError;

/// Base32 input could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A character outside the RFC 4648 alphabet `A-Z2-7` was found.
    /// Carries the offending character and its position in the input,
    /// counted after trailing padding has been stripped.
    InvalidCharacter { character: char, position: usize },
}

impl std::error::Error for DecodeError {}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::InvalidCharacter {
                character,
                position,
            } => write!(
                f,
                "Character {:?} at position {} is not part of the base32 alphabet",
                character, position
            ),
        }
    }
}

/// A secret of invalid length was requested.
///
/// Valid secret lengths are 16 to 128 characters (80 to 640 bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretLengthError(pub usize);

impl std::error::Error for SecretLengthError {}

impl std::fmt::Display for SecretLengthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Secret length must be between 16 and 128 characters, {} was requested",
            self.0
        )
    }
}

/// A code width outside the representable range was requested.
///
/// The truncated HMAC value is reduced modulo `10^digits`, so anything
/// above 10 digits adds no entropy and anything below 1 is meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitsError(pub u32);

impl std::error::Error for DigitsError {}

impl std::fmt::Display for DigitsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Code width must be between 1 and 10 digits, {} was requested",
            self.0
        )
    }
}

/// Failure of a clock-backed generation or verification call.
#[derive(Debug)]
pub enum OtpError {
    /// The secret is not valid base32.
    Decode(DecodeError),
    /// The system clock is set before the Unix epoch.
    Time(SystemTimeError),
}

impl std::error::Error for OtpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OtpError::Decode(e) => Some(e),
            OtpError::Time(e) => Some(e),
        }
    }
}

impl std::fmt::Display for OtpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OtpError::Decode(e) => write!(f, "Could not decode secret: {}", e),
            OtpError::Time(e) => write!(f, "Could not read current time: {}", e),
        }
    }
}

impl From<DecodeError> for OtpError {
    fn from(e: DecodeError) -> Self {
        OtpError::Decode(e)
    }
}

impl From<SystemTimeError> for OtpError {
    fn from(e: SystemTimeError) -> Self {
        OtpError::Time(e)
    }
}
