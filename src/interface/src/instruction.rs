//! The definitions for Glitter lock instructions

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    program_error::ProgramError,
    pubkey::Pubkey,
};

use crate::pack_utils::{decode_u64, U64_LEN};

/// Tag of [`GlitterLockInstruction::Lock`] on the wire
pub const LOCK_TAG: u8 = 0;
/// Tag of [`GlitterLockInstruction::Unlock`] on the wire
pub const UNLOCK_TAG: u8 = 1;

/// A Glitter lock instruction
///
/// The borsh encoding is a one-byte variant tag followed by the variant's
/// fields, so `Lock` travels as `[0] ++ amount.to_le_bytes()` and `Unlock`
/// as `[1]`.
#[derive(Clone, Debug, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
pub enum GlitterLockInstruction {
    /// Deposit lamports under a program-owned lock account
    /// Requires that the lock account is uninitialized.
    /// Records the depositor, the amount and the current unix timestamp.
    ///
    /// # Account references
    ///   0. `[SIGNER, WRITE]` Locker account
    ///   1. `[WRITE]` Lock account
    Lock {
        /// The number of lamports to lock
        amount: u64,
    },

    /// Return the locked lamports to the depositor
    /// Requires that the lock account is initialized, that the signer is the
    /// recorded depositor and that the lock period has elapsed.
    ///
    /// # Account references
    ///   0. `[SIGNER, WRITE]` Locker account
    ///   1. `[WRITE]` Lock account
    Unlock,
}

impl GlitterLockInstruction {
    /// Parses instruction data as the program does
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        let (tag, rest) = input
            .split_first()
            .ok_or(ProgramError::InvalidInstructionData)?;

        Ok(match *tag {
            LOCK_TAG => Self::Lock {
                amount: Self::unpack_amount(rest)?,
            },
            UNLOCK_TAG => Self::Unlock,
            _ => return Err(ProgramError::InvalidInstructionData),
        })
    }

    fn unpack_amount(input: &[u8]) -> Result<u64, ProgramError> {
        input
            .get(..U64_LEN)
            .and_then(|slice| slice.try_into().ok())
            .map(decode_u64)
            .ok_or(ProgramError::InvalidInstructionData)
    }
}

fn accounts(locker: &Pubkey, lock_account: &Pubkey) -> Vec<AccountMeta> {
    vec![
        AccountMeta::new(*locker, true),
        AccountMeta::new(*lock_account, false),
    ]
}

/// Builds a `Lock` instruction depositing `amount` lamports
pub fn lock(program_id: &Pubkey, locker: &Pubkey, lock_account: &Pubkey, amount: u64) -> Instruction {
    Instruction::new_with_borsh(
        *program_id,
        &GlitterLockInstruction::Lock { amount },
        accounts(locker, lock_account),
    )
}

/// Builds an `Unlock` instruction
pub fn unlock(program_id: &Pubkey, locker: &Pubkey, lock_account: &Pubkey) -> Instruction {
    Instruction::new_with_borsh(
        *program_id,
        &GlitterLockInstruction::Unlock,
        accounts(locker, lock_account),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack_utils::encode_u64;

    #[test]
    fn lock_payload_is_tag_then_le_amount() {
        let ix = lock(
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            1_000_000_000,
        );
        assert_eq!(
            ix.data,
            vec![0x00, 0x00, 0xca, 0x9a, 0x3b, 0x00, 0x00, 0x00, 0x00]
        );

        let mut expected = vec![LOCK_TAG];
        expected.extend_from_slice(&encode_u64(1_000_000_000));
        assert_eq!(ix.data, expected);
    }

    #[test]
    fn unlock_payload_is_single_byte() {
        let ix = unlock(
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
        );
        assert_eq!(ix.data, vec![0x01]);
    }

    #[test]
    fn builders_mark_locker_as_signer() {
        let program_id = Pubkey::new_unique();
        let locker = Pubkey::new_unique();
        let lock_account = Pubkey::new_unique();

        let ix = lock(&program_id, &locker, &lock_account, 5);
        assert_eq!(ix.program_id, program_id);
        assert_eq!(ix.accounts.len(), 2);
        assert_eq!(ix.accounts[0].pubkey, locker);
        assert!(ix.accounts[0].is_signer);
        assert_eq!(ix.accounts[1].pubkey, lock_account);
        assert!(!ix.accounts[1].is_signer);
        assert!(ix.accounts[1].is_writable);
    }

    #[test]
    fn unpack_reads_builder_output() {
        let ix = lock(
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            42,
        );
        assert_eq!(
            GlitterLockInstruction::unpack(&ix.data),
            Ok(GlitterLockInstruction::Lock { amount: 42 })
        );
        assert_eq!(
            GlitterLockInstruction::unpack(&[UNLOCK_TAG]),
            Ok(GlitterLockInstruction::Unlock)
        );
    }

    #[test]
    fn unpack_rejects_bad_data() {
        assert_eq!(
            GlitterLockInstruction::unpack(&[]),
            Err(ProgramError::InvalidInstructionData)
        );
        assert_eq!(
            GlitterLockInstruction::unpack(&[2]),
            Err(ProgramError::InvalidInstructionData)
        );
        assert_eq!(
            GlitterLockInstruction::unpack(&[LOCK_TAG, 1, 2, 3]),
            Err(ProgramError::InvalidInstructionData)
        );
    }
}
