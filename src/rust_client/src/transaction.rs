use glitter_lock::state::LOCK_ACCOUNT_SIZE;
use log::{debug, info};
use solana_program::{instruction::Instruction, pubkey::Pubkey, system_instruction};
use solana_sdk::{
    signature::{Keypair, Signature},
    signer::{Signer, SignerError},
    transaction::Transaction,
};

use crate::{error::LockerError, ledger::Ledger};

/// A freshly allocated lock account and the transaction that created it
pub struct CreatedAccount {
    pub signature: Signature,
    pub keypair: Keypair,
}

pub fn check_balance<L: Ledger + ?Sized>(ledger: &L, pubkey: &Pubkey) -> Result<u64, LockerError> {
    let balance = ledger.get_balance(pubkey)?;
    debug!("Balance of {}: {}", pubkey, balance);
    Ok(balance)
}

/// Signs `instructions` with `signers`, the first of which pays the fee,
/// then submits and waits for confirmation
pub fn send_and_confirm<L: Ledger + ?Sized>(
    ledger: &L,
    instructions: &[Instruction],
    signers: &[&dyn Signer],
) -> Result<Signature, LockerError> {
    let payer = signers.first().ok_or(SignerError::NotEnoughSigners)?.pubkey();
    let mut transaction = Transaction::new_with_payer(instructions, Some(&payer));

    let blockhash = ledger.get_latest_blockhash()?;
    let signers: Vec<&dyn Signer> = signers.to_vec();
    transaction.try_sign(&signers, blockhash)?;

    let signature = ledger.submit(&transaction)?;
    debug!("Submitted {}", signature);
    ledger.confirm(&signature)?;
    Ok(signature)
}

pub fn send_instruction<L: Ledger + ?Sized>(
    ledger: &L,
    instruction: Instruction,
    signers: &[&dyn Signer],
) -> Result<Signature, LockerError> {
    send_and_confirm(ledger, &[instruction], signers)
}

/// Allocates a new lock account owned by `program_id`, funded by `payer`
pub fn create_lock_account<L: Ledger + ?Sized>(
    ledger: &L,
    program_id: &Pubkey,
    payer: &Keypair,
    lamports: u64,
) -> Result<CreatedAccount, LockerError> {
    let keypair = Keypair::new();
    let instruction = system_instruction::create_account(
        &payer.pubkey(),
        &keypair.pubkey(),
        lamports,
        LOCK_ACCOUNT_SIZE as u64,
        program_id,
    );

    let signature = send_instruction(ledger, instruction, &[payer, &keypair])?;
    info!(
        "Lock account {} created with {} lamports: {}",
        keypair.pubkey(),
        lamports,
        signature
    );
    Ok(CreatedAccount { signature, keypair })
}
