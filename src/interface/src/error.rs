//! Custom error codes returned by the Glitter lock program

use num_derive::FromPrimitive;
use solana_program::{decode_error::DecodeError, program_error::ProgramError};
use thiserror::Error;

/// Errors the program reports as `ProgramError::Custom(code)`
#[derive(Clone, Copy, Debug, Eq, Error, FromPrimitive, PartialEq)]
pub enum GlitterLockError {
    /// Unlock was attempted before the lock period elapsed
    #[error("EarlyUnlock")]
    EarlyUnlock,
    /// The lock account holds no initialized record
    #[error("NotInitialized")]
    NotInitialized,
    /// The signer is not the depositor recorded in the lock account
    #[error("IncorrectClaim")]
    IncorrectClaim,
}

impl GlitterLockError {
    /// Operator-facing explanation of the error
    pub fn describe(&self) -> &'static str {
        match self {
            GlitterLockError::EarlyUnlock => "Cannot unlock before the lock period has elapsed.",
            GlitterLockError::NotInitialized => "Lock account is not initialized.",
            GlitterLockError::IncorrectClaim => {
                "Signer is not the depositor recorded in the lock account."
            }
        }
    }

    /// Maps a custom program error code back to the error, if it is one of ours
    pub fn from_code(code: u32) -> Option<Self> {
        <Self as DecodeError<Self>>::decode_custom_error_to_enum(code)
    }
}

impl From<GlitterLockError> for ProgramError {
    fn from(e: GlitterLockError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl<T> DecodeError<T> for GlitterLockError {
    fn type_of() -> &'static str {
        "Glitter Lock Error"
    }
}
