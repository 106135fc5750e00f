//! Client for the Glitter lock program: creates a lock account, locks SOL
//! under it, waits, then unlocks

pub mod amount;
pub mod config;
pub mod error;
pub mod ledger;
pub mod record;
pub mod transaction;
pub mod workflow;
