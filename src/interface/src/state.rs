//! Program state

use arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs};
use solana_program::{
    program_error::ProgramError,
    program_pack::{IsInitialized, Pack, Sealed},
    pubkey::Pubkey,
};

use crate::pack_utils::{decode_u64, encode_u64, U64_LEN};

/// The record stored in a lock account
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LockRecord {
    // 1
    /// Whether the lock currently holds a deposit
    pub is_initialized: bool,
    // 32
    /// The signer that deposited the lamports
    pub depositor: Pubkey,
    // 8
    /// The number of lamports locked
    pub amount: u64,
    // 8
    /// The unix timestamp at which the lamports were locked
    pub lock_time: u64,
}

/// The size of a lock account
pub const LOCK_ACCOUNT_SIZE: usize = INITIALIZED_LEN + DEPOSITOR_LEN + AMOUNT_LEN + LOCK_TIME_LEN;

/// Width of the initialized flag
pub const INITIALIZED_LEN: usize = 1;
/// Width of the depositor public key
pub const DEPOSITOR_LEN: usize = 32;
/// Width of the locked amount
pub const AMOUNT_LEN: usize = U64_LEN;
/// Width of the lock timestamp
pub const LOCK_TIME_LEN: usize = U64_LEN;

impl IsInitialized for LockRecord {
    fn is_initialized(&self) -> bool {
        self.is_initialized
    }
}

impl Sealed for LockRecord {}
impl Pack for LockRecord {
    const LEN: usize = LOCK_ACCOUNT_SIZE;

    fn pack_into_slice(&self, dst: &mut [u8]) {
        let dst = array_mut_ref![dst, 0, LOCK_ACCOUNT_SIZE];
        let (initialized_dst, depositor_dst, amount_dst, lock_time_dst) = mut_array_refs![
            dst,
            INITIALIZED_LEN,
            DEPOSITOR_LEN,
            AMOUNT_LEN,
            LOCK_TIME_LEN
        ];

        initialized_dst[0] = self.is_initialized as u8;
        depositor_dst.copy_from_slice(self.depositor.as_ref());
        *amount_dst = encode_u64(self.amount);
        *lock_time_dst = encode_u64(self.lock_time);
    }

    fn unpack_from_slice(src: &[u8]) -> Result<Self, ProgramError> {
        let src = array_ref![src, 0, LOCK_ACCOUNT_SIZE];
        let (initialized_src, depositor_src, amount_src, lock_time_src) = array_refs![
            src,
            INITIALIZED_LEN,
            DEPOSITOR_LEN,
            AMOUNT_LEN,
            LOCK_TIME_LEN
        ];

        let is_initialized = match initialized_src {
            [0] => false,
            [1] => true,
            _ => return Err(ProgramError::InvalidAccountData),
        };

        Ok(LockRecord {
            is_initialized,
            depositor: Pubkey::new_from_array(*depositor_src),
            amount: decode_u64(amount_src),
            lock_time: decode_u64(lock_time_src),
        })
    }
}
