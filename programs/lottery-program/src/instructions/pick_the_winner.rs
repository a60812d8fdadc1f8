use std::str::FromStr;

use anchor_lang::prelude::*;
use anchor_lang::solana_program::keccak;
use arrayref::array_ref;

use crate::{
    error::LotteryError,
    state::{Lottery, Vault, LOTTERY_SEED, VAULT_SEED},
};

/// Event emitted when a round is decided
#[event]
pub struct WinnerFound {
    /// The winning identity
    pub winner: Pubkey,
    /// The full pot paid out, in lamports
    pub prize: u64,
}

/// Draws the winner of the current round, pays out the entire pot, and
/// resets the round, all in one instruction, so no intermediate state is
/// ever observable and any failure leaves the round exactly as it was.
///
/// Execution requirements:
/// 1. The caller must be the administrator fixed at initialization
/// 2. At least `MIN_PARTICIPANTS` entries must exist
/// 3. The winning identity's writable account must be among the remaining
///    accounts, or the payout cannot complete and the call fails whole
///
/// The selection index is `seed % entry_count`, where the seed is a keccak
/// digest of block context: an entry from the SlotHashes sysvar, the current
/// unix timestamp, and this lottery's address.
///
/// # Known limitation
/// These inputs are observable and partially steerable by a block producer,
/// so the selection is NOT adversarially fair. This mirrors the original
/// contract's behavior and is kept deliberately; swapping in a VRF would
/// change observable semantics.
///
/// # Errors
/// - `Unauthorized` if the caller is not the administrator
/// - `InsufficientParticipants` with fewer than 3 entries
/// - `InvalidSlotHashesAccount` if the provided sysvar account is wrong
/// - `TransferFailed` if the winner's account is missing or the lamport move
///   fails
pub fn pick_the_winner<'info>(
    ctx: Context<'_, '_, '_, 'info, PickTheWinner<'info>>,
) -> Result<()> {
    ctx.accounts.lottery.assert_can_draw()?;

    // Manually validate the recent_slothashes account
    let pubkey_matches = Pubkey::from_str("SysvarS1otHashes111111111111111111111111111")
        .or(Err(LotteryError::InvalidSlotHashesAccount))?
        .eq(&ctx.accounts.recent_slothashes.key());
    require!(pubkey_matches, LotteryError::InvalidSlotHashesAccount);

    let seed = {
        let data = ctx.accounts.recent_slothashes.data.borrow();
        let entropy = array_ref![data, 12, 8];
        let clock = Clock::get()?;
        selection_seed(entropy, clock.unix_timestamp, &ctx.accounts.lottery.key())
    };

    let lottery = &ctx.accounts.lottery;
    let index = lottery.winner_index(seed);
    let winner = lottery.entries[index].identity;
    let prize = lottery.pot_lamports;

    // The administrator passes the entrants' accounts as remaining accounts;
    // the payout target must be writable.
    let winner_account = ctx
        .remaining_accounts
        .iter()
        .find(|info| info.key() == winner && info.is_writable)
        .ok_or(LotteryError::TransferFailed)?;

    // Transfer lamports by directly deducting from the vault and adding to
    // the winner. This only works because the vault is a PDA owned by this
    // program. The rent-exempt reserve stays behind; the pot counts stakes
    // only.
    ctx.accounts.vault.to_account_info().sub_lamports(prize)?;
    winner_account.add_lamports(prize)?;

    emit!(WinnerFound { winner, prize });

    // Payout and reset are one transition; the next round starts empty.
    ctx.accounts.lottery.clear_round();

    Ok(())
}

/// Builds the selection seed from block context. Keccak keeps the combination
/// uniform; it does nothing for predictability, see the handler docs.
fn selection_seed(slot_hash_entropy: &[u8; 8], timestamp: i64, lottery_address: &Pubkey) -> u64 {
    let digest = keccak::hashv(&[
        &slot_hash_entropy[..],
        &timestamp.to_le_bytes()[..],
        lottery_address.as_ref(),
    ]);
    u64::from_le_bytes(*array_ref![digest.0, 0, 8])
}

/// Accounts required for the pick_the_winner instruction
#[derive(Accounts)]
pub struct PickTheWinner<'info> {
    /// The round state; only the fixed administrator may draw
    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
        has_one = administrator @ LotteryError::Unauthorized,
    )]
    pub lottery: Account<'info, Lottery>,

    pub administrator: Signer<'info>,

    /// Vault PDA holding the pot
    #[account(
        mut,
        seeds = [VAULT_SEED],
        bump = vault.bump,
    )]
    pub vault: Account<'info, Vault>,

    /// The SlotHashes sysvar contains the most recent block hashes
    /// This is used as a source of randomness
    /// CHECK: Using UncheckedAccount because we manually validate the correct sysvar.
    /// This is needed because Anchor will always throw an error on the SlotHashes sysvar.
    pub recent_slothashes: UncheckedAccount<'info>,
}
