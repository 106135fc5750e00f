use std::process;

use clap::Parser;
use glitter_lock_client::{
    config::{Cli, Config},
    ledger::RpcLedger,
    workflow,
};
use log::{error, info};
use solana_sdk::signer::Signer;

fn main() {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match Config::from_cli(Cli::parse()) {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            process::exit(err.kind().exit_code());
        }
    };
    info!("Locker: {}", config.signer.pubkey());

    let ledger = match RpcLedger::establish_connection(&config.rpc_url, config.confirm_timeout) {
        Ok(ledger) => ledger,
        Err(err) => {
            error!("{}", err);
            process::exit(err.kind().exit_code());
        }
    };

    match workflow::run(&ledger, &config) {
        Ok(report) => {
            info!("Done.");
            if config.json {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{}", json),
                    Err(err) => error!("could not serialize report: {}", err),
                }
            }
        }
        Err(err) => {
            error!("{}", err);
            process::exit(err.kind().exit_code());
        }
    }
}
