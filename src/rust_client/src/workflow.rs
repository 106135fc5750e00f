//! Create, lock, wait, unlock

use std::{fmt, thread::sleep};

use glitter_lock::instruction;
use log::info;
use serde::Serialize;
use solana_sdk::signer::Signer;
use thiserror::Error;

use crate::{
    config::Config,
    error::{ErrorKind, LockerError},
    ledger::Ledger,
    record::RecordView,
    transaction::{check_balance, create_lock_account, send_instruction},
};

/// The step a run was entering when it stopped
///
/// The wait between lock and unlock cannot fail, so it has no stage.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stage {
    Init,
    Created,
    Locked,
    Unlocked,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Error)]
#[error("{stage} step failed: {source}")]
pub struct WorkflowError {
    pub stage: Stage,
    pub source: LockerError,
}

impl WorkflowError {
    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

trait StageContext<T> {
    fn during(self, stage: Stage) -> Result<T, WorkflowError>;
}

impl<T> StageContext<T> for Result<T, LockerError> {
    fn during(self, stage: Stage) -> Result<T, WorkflowError> {
        self.map_err(|source| WorkflowError { stage, source })
    }
}

/// What a completed run did
#[derive(Clone, Debug, Serialize)]
pub struct WorkflowReport {
    pub locker: String,
    pub lock_account: String,
    pub create_signature: String,
    pub lock_signature: String,
    pub unlock_signature: String,
    pub initial_balance: u64,
    pub locked_balance: u64,
    pub final_balance: u64,
    pub record: RecordView,
}

/// Runs the whole lock cycle against `ledger`
///
/// Steps run strictly in order; the first failure stops the run and nothing
/// already confirmed on chain is undone.
pub fn run<L: Ledger + ?Sized>(ledger: &L, config: &Config) -> Result<WorkflowReport, WorkflowError> {
    let locker = &config.signer;
    let locker_key = locker.pubkey();

    let funding = config.funding.to_smallest_unit().during(Stage::Init)?;
    let amount = config.lock_amount.to_smallest_unit().during(Stage::Init)?;

    let initial_balance = check_balance(ledger, &locker_key).during(Stage::Init)?;
    info!("Balance of locker {}: {}", locker_key, initial_balance);

    let created =
        create_lock_account(ledger, &config.program_id, locker, funding).during(Stage::Created)?;
    let lock_account = created.keypair.pubkey();

    info!("Locking {} ({} lamports) under {}", config.lock_amount, amount, lock_account);
    let lock_signature = send_instruction(
        ledger,
        instruction::lock(&config.program_id, &locker_key, &lock_account, amount),
        &[locker],
    )
    .during(Stage::Locked)?;
    info!("Lock confirmed: {}", lock_signature);

    let data = ledger
        .get_account_data(&lock_account)
        .during(Stage::Locked)?;
    let record = RecordView::from_account_data(&data).during(Stage::Locked)?;
    let locked_balance = check_balance(ledger, &lock_account).during(Stage::Locked)?;
    log_record(&record, &locker_key.to_bytes(), locked_balance);

    info!("Waiting {:?} before unlocking", config.unlock_delay);
    sleep(config.unlock_delay);

    let unlock_signature = send_instruction(
        ledger,
        instruction::unlock(&config.program_id, &locker_key, &lock_account),
        &[locker],
    )
    .during(Stage::Unlocked)?;
    info!("Unlock confirmed: {}", unlock_signature);

    let final_balance = check_balance(ledger, &locker_key).during(Stage::Done)?;
    info!("Balance of locker {}: {}", locker_key, final_balance);

    Ok(WorkflowReport {
        locker: locker_key.to_string(),
        lock_account: lock_account.to_string(),
        create_signature: created.signature.to_string(),
        lock_signature: lock_signature.to_string(),
        unlock_signature: unlock_signature.to_string(),
        initial_balance,
        locked_balance,
        final_balance,
        record,
    })
}

fn log_record(record: &RecordView, locker: &[u8], locked_balance: u64) {
    info!("Raw: {}", record.raw);
    info!("Init: {}", record.initialized as u8);
    info!(
        "On chain public key: {} (locker {})",
        record.depositor,
        hex::encode(locker)
    );
    info!("Amount: {} (account balance {})", record.amount, locked_balance);
    match record.lock_time_utc() {
        Some(time) => info!("Time: {} ({})", record.lock_time, time),
        None => info!("Time: {}", record.lock_time),
    }
}
