use std::{fmt, time::Duration};

use glitter_lock::error::GlitterLockError;
use solana_client::client_error::ClientError;
use solana_sdk::{
    instruction::InstructionError, signature::Signature, signer::SignerError,
    transaction::TransactionError,
};
use thiserror::Error;

/// Broad classes of failure, used by the binary to pick an exit code
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Configuration,
    Network,
    Confirmation,
    Decoding,
}

impl ErrorKind {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::Configuration => 2,
            ErrorKind::Network => 3,
            ErrorKind::Confirmation => 4,
            ErrorKind::Decoding => 5,
        }
    }
}

#[derive(Debug, Error)]
pub enum LockerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid amount {0:?}: expected a non-negative decimal that fits in u64 lamports")]
    InvalidAmount(String),

    #[error("signing failed: {0}")]
    Signing(#[from] SignerError),

    #[error("rpc error: {0}")]
    Rpc(#[from] Box<ClientError>),

    #[error("transaction {signature} rejected: {reason}{}", ProgramFailure(*.program_error))]
    Rejected {
        signature: Signature,
        reason: TransactionError,
        program_error: Option<GlitterLockError>,
    },

    #[error("transaction {signature} not confirmed within {timeout:?}")]
    ConfirmationTimeout {
        signature: Signature,
        timeout: Duration,
    },

    #[error("malformed lock record: {0}")]
    MalformedRecord(String),
}

struct ProgramFailure(Option<GlitterLockError>);

impl fmt::Display for ProgramFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(err) => write!(f, " ({}: {})", err, err.describe()),
            None => Ok(()),
        }
    }
}

impl From<ClientError> for LockerError {
    fn from(err: ClientError) -> Self {
        LockerError::Rpc(Box::new(err))
    }
}

impl LockerError {
    /// Builds a rejection, decoding the program's custom error code if present
    pub fn rejected(signature: Signature, reason: TransactionError) -> Self {
        let program_error = match &reason {
            TransactionError::InstructionError(_, InstructionError::Custom(code)) => {
                GlitterLockError::from_code(*code)
            }
            _ => None,
        };
        LockerError::Rejected {
            signature,
            reason,
            program_error,
        }
    }

    /// Classifies a failed submission. A transaction the node refused during
    /// preflight is a rejection; anything else stays an RPC error.
    pub fn submission(signature: Signature, err: ClientError) -> Self {
        match err.get_transaction_error() {
            Some(reason) => LockerError::rejected(signature, reason),
            None => LockerError::from(err),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LockerError::Config(_) | LockerError::InvalidAmount(_) | LockerError::Signing(_) => {
                ErrorKind::Configuration
            }
            LockerError::Rpc(_) => ErrorKind::Network,
            LockerError::Rejected { .. } | LockerError::ConfirmationTimeout { .. } => {
                ErrorKind::Confirmation
            }
            LockerError::MalformedRecord(_) => ErrorKind::Decoding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_decodes_program_error() {
        let err = LockerError::rejected(
            Signature::default(),
            TransactionError::InstructionError(0, InstructionError::Custom(0)),
        );
        match &err {
            LockerError::Rejected { program_error, .. } => {
                assert_eq!(*program_error, Some(GlitterLockError::EarlyUnlock));
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(err.kind(), ErrorKind::Confirmation);
        assert!(err.to_string().contains("EarlyUnlock"));
    }

    #[test]
    fn rejection_without_custom_code_has_no_program_error() {
        let err = LockerError::rejected(
            Signature::default(),
            TransactionError::InsufficientFundsForFee,
        );
        match err {
            LockerError::Rejected { program_error, .. } => assert_eq!(program_error, None),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn preflight_failure_is_a_rejection() {
        let err = LockerError::submission(
            Signature::default(),
            ClientError::from(TransactionError::InstructionError(
                0,
                InstructionError::Custom(GlitterLockError::IncorrectClaim as u32),
            )),
        );
        match &err {
            LockerError::Rejected { program_error, .. } => {
                assert_eq!(*program_error, Some(GlitterLockError::IncorrectClaim));
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(err.kind(), ErrorKind::Confirmation);
    }

    #[test]
    fn transport_failure_is_a_network_error() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = LockerError::submission(Signature::default(), ClientError::from(io));
        assert!(matches!(err, LockerError::Rpc(_)));
        assert_eq!(err.kind(), ErrorKind::Network);
    }

    #[test]
    fn timeout_is_a_confirmation_error() {
        let err = LockerError::ConfirmationTimeout {
            signature: Signature::default(),
            timeout: Duration::from_secs(60),
        };
        assert_eq!(err.kind(), ErrorKind::Confirmation);
        assert_eq!(err.kind().exit_code(), 4);
    }

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            ErrorKind::Configuration.exit_code(),
            ErrorKind::Network.exit_code(),
            ErrorKind::Confirmation.exit_code(),
            ErrorKind::Decoding.exit_code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            assert_ne!(*a, 0);
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
