use std::{
    thread::sleep,
    time::{Duration, Instant},
};

use log::{debug, info};
use solana_client::rpc_client::RpcClient;
use solana_program::{hash::Hash, pubkey::Pubkey};
use solana_sdk::{commitment_config::CommitmentConfig, signature::Signature, transaction::Transaction};

use crate::error::LockerError;

const CONFIRM_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// The subset of a Solana node the locker talks to
pub trait Ledger {
    /// Balance of `pubkey` in lamports
    fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, LockerError>;

    /// Raw data of the account at `pubkey`
    fn get_account_data(&self, pubkey: &Pubkey) -> Result<Vec<u8>, LockerError>;

    fn get_latest_blockhash(&self) -> Result<Hash, LockerError>;

    /// Sends a signed transaction without waiting for it to land
    fn submit(&self, transaction: &Transaction) -> Result<Signature, LockerError>;

    /// Blocks until `signature` is confirmed, rejected, or timed out
    fn confirm(&self, signature: &Signature) -> Result<(), LockerError>;
}

/// [`Ledger`] backed by a blocking JSON-RPC client at `confirmed` commitment
pub struct RpcLedger {
    client: RpcClient,
    confirm_timeout: Duration,
}

impl RpcLedger {
    /// Opens a client for `url` and checks that the node answers
    pub fn establish_connection(url: &str, confirm_timeout: Duration) -> Result<Self, LockerError> {
        let client = RpcClient::new_with_commitment(url.to_string(), CommitmentConfig::confirmed());
        let version = client.get_version()?;
        info!(
            "Connection to cluster established: {} (solana-core {})",
            url, version.solana_core
        );
        Ok(RpcLedger {
            client,
            confirm_timeout,
        })
    }
}

impl Ledger for RpcLedger {
    fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, LockerError> {
        Ok(self.client.get_balance(pubkey)?)
    }

    fn get_account_data(&self, pubkey: &Pubkey) -> Result<Vec<u8>, LockerError> {
        Ok(self.client.get_account_data(pubkey)?)
    }

    fn get_latest_blockhash(&self) -> Result<Hash, LockerError> {
        Ok(self.client.get_latest_blockhash()?)
    }

    fn submit(&self, transaction: &Transaction) -> Result<Signature, LockerError> {
        self.client.send_transaction(transaction).map_err(|err| {
            let signature = transaction.signatures.first().copied().unwrap_or_default();
            LockerError::submission(signature, err)
        })
    }

    fn confirm(&self, signature: &Signature) -> Result<(), LockerError> {
        let start = Instant::now();
        loop {
            match self.client.get_signature_status(signature)? {
                Some(Ok(())) => {
                    debug!("{} confirmed after {:?}", signature, start.elapsed());
                    return Ok(());
                }
                Some(Err(reason)) => return Err(LockerError::rejected(*signature, reason)),
                None if start.elapsed() >= self.confirm_timeout => {
                    return Err(LockerError::ConfirmationTimeout {
                        signature: *signature,
                        timeout: self.confirm_timeout,
                    })
                }
                None => sleep(CONFIRM_POLL_INTERVAL),
            }
        }
    }
}
