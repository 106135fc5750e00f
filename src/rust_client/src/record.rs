use chrono::{TimeZone, Utc};
use glitter_lock::state::{LockRecord, LOCK_ACCOUNT_SIZE};
use serde::Serialize;
use solana_program::program_pack::Pack;

use crate::error::LockerError;

/// A lock account's payload as shown to the operator
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecordView {
    /// Hex dump of the whole payload
    pub raw: String,
    pub initialized: bool,
    /// Depositor public key as 64 hex characters
    pub depositor: String,
    pub amount: u64,
    pub lock_time: u64,
}

impl RecordView {
    /// Decodes account data, refusing anything that is not exactly one record
    pub fn from_account_data(data: &[u8]) -> Result<Self, LockerError> {
        if data.len() != LOCK_ACCOUNT_SIZE {
            return Err(LockerError::MalformedRecord(format!(
                "expected {} bytes, got {}",
                LOCK_ACCOUNT_SIZE,
                data.len()
            )));
        }

        let record = LockRecord::unpack_unchecked(data).map_err(|_| {
            LockerError::MalformedRecord(format!("invalid initialized flag {:#04x}", data[0]))
        })?;

        Ok(RecordView {
            raw: hex::encode(data),
            initialized: record.is_initialized,
            depositor: hex::encode(record.depositor),
            amount: record.amount,
            lock_time: record.lock_time,
        })
    }

    /// The lock time as a UTC date, when it is a representable timestamp
    pub fn lock_time_utc(&self) -> Option<String> {
        let secs = i64::try_from(self.lock_time).ok()?;
        Utc.timestamp_opt(secs, 0)
            .single()
            .map(|time| time.to_rfc3339())
    }
}
