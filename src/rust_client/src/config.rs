use std::{str::FromStr, time::Duration};

use clap::Parser;
use solana_program::pubkey::Pubkey;
use solana_sdk::signature::Keypair;

use crate::{amount::Amount, error::LockerError};

pub const URL_TESTNET: &str = "https://api.testnet.solana.com";
pub const URL_DEVNET: &str = "https://api.devnet.solana.com";
pub const URL_LOCAL: &str = "http://127.0.0.1:8899";

/// Create a lock account, lock SOL under it, wait, then unlock
#[derive(Debug, Parser)]
#[command(name = "glitter-locker", version)]
pub struct Cli {
    /// RPC endpoint, or one of devnet, testnet, localnet
    #[arg(long, env = "RPC_URL", default_value = "devnet")]
    pub url: String,

    /// Address of the lock program
    #[arg(long, env = "PROGRAM_ID")]
    pub program_id: String,

    /// Signer secret key as comma-separated bytes or a JSON byte array
    #[arg(long, env = "SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,

    /// Amount of SOL to lock
    #[arg(long, default_value = "1")]
    pub amount: String,

    /// Amount of SOL used to fund the new lock account
    #[arg(long, default_value = "1")]
    pub funding: String,

    /// Seconds to wait between lock and unlock
    #[arg(long, default_value_t = 3600)]
    pub wait_secs: u64,

    /// Seconds to wait for each transaction to be confirmed
    #[arg(long, default_value_t = 60)]
    pub confirm_timeout_secs: u64,

    /// Print the final report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Everything a run needs, resolved once at startup
pub struct Config {
    pub rpc_url: String,
    pub program_id: Pubkey,
    pub signer: Keypair,
    pub lock_amount: Amount,
    pub funding: Amount,
    pub unlock_delay: Duration,
    pub confirm_timeout: Duration,
    pub json: bool,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, LockerError> {
        let program_id = Pubkey::from_str(cli.program_id.trim()).map_err(|err| {
            LockerError::Config(format!("invalid program id {:?}: {}", cli.program_id, err))
        })?;

        Ok(Config {
            rpc_url: resolve_url(&cli.url),
            program_id,
            signer: parse_keypair(&cli.secret_key)?,
            lock_amount: cli.amount.parse()?,
            funding: cli.funding.parse()?,
            unlock_delay: Duration::from_secs(cli.wait_secs),
            confirm_timeout: Duration::from_secs(cli.confirm_timeout_secs),
            json: cli.json,
        })
    }
}

/// Expands cluster monikers, passing anything else through as a URL
pub fn resolve_url(url: &str) -> String {
    match url.trim() {
        "devnet" | "d" => URL_DEVNET.to_string(),
        "testnet" | "t" => URL_TESTNET.to_string(),
        "localnet" | "localhost" | "l" => URL_LOCAL.to_string(),
        other => other.to_string(),
    }
}

/// Reads a 64-byte secret key from `1,2,3,...` or `[1,2,3,...]`
pub fn parse_keypair(secret: &str) -> Result<Keypair, LockerError> {
    let secret = secret.trim();
    let bytes: Vec<u8> = if secret.starts_with('[') {
        serde_json::from_str(secret)
            .map_err(|err| LockerError::Config(format!("invalid secret key JSON: {}", err)))?
    } else {
        secret
            .split(',')
            .map(|part| {
                part.trim().parse::<u8>().map_err(|err| {
                    LockerError::Config(format!("invalid secret key byte {:?}: {}", part, err))
                })
            })
            .collect::<Result<_, _>>()?
    };

    Keypair::from_bytes(&bytes)
        .map_err(|err| LockerError::Config(format!("invalid secret key: {}", err)))
}
