use anchor_lang::prelude::*;

use crate::{
    error::LotteryError,
    state::{Lottery, Vault, LOTTERY_SEED, VAULT_SEED},
};

/// Event emitted when an identity enters the current round
#[event]
pub struct ParticipantEntered {
    /// The entering identity
    pub participant: Pubkey,
    /// Stake paid in lamports
    pub stake: u64,
}

/// Instruction to enter the current round by paying a stake
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `stake` - The lamports to stake; must be at least `MINIMUM_TICKET_PRICE`.
///   There is no upper cap and no refund of the excess above the minimum.
///
/// # Admission rules (checked in this order)
/// 1. The administrator can never enter, at any stake
/// 2. An identity can hold at most one entry per round
/// 3. The stake must meet the minimum ticket price
///
/// A rejected call mutates nothing; the runtime reverts the account realloc
/// together with everything else.
///
/// # Implementation Notes
/// - The lottery account is realloc'd per entry, so rounds have no fixed
///   capacity
/// - The stake transfer into the vault is verified with a pre/post balance
///   check
/// - Entries are appended in call order; that order is the selection index
///   space used by `pick_the_winner`
pub fn participate(ctx: Context<Participate>, stake: u64) -> Result<()> {
    let participant = ctx.accounts.participant.key();
    ctx.accounts.lottery.assert_can_enter(&participant, stake)?;

    // Store pre-transfer balance for verification
    let pre_transfer_balance = ctx.accounts.vault.to_account_info().lamports();

    // Transfer the stake from the participant to the vault
    anchor_lang::solana_program::program::invoke(
        &anchor_lang::solana_program::system_instruction::transfer(
            &participant,
            &ctx.accounts.vault.key(),
            stake,
        ),
        &[
            ctx.accounts.participant.to_account_info(),
            ctx.accounts.system_program.to_account_info(),
            ctx.accounts.vault.to_account_info(),
        ],
    )?;

    // Verify the transfer landed in full
    let post_transfer_balance = ctx.accounts.vault.to_account_info().lamports();
    require!(
        post_transfer_balance
            == pre_transfer_balance
                .checked_add(stake)
                .ok_or(LotteryError::Overflow)?,
        LotteryError::TransferFailed
    );

    ctx.accounts.lottery.record_entry(participant, stake)?;

    emit!(ParticipantEntered { participant, stake });

    Ok(())
}

/// Accounts required for the participate instruction
#[derive(Accounts)]
pub struct Participate<'info> {
    /// The round state, grown to hold one more entry.
    /// Rent for the extra space is paid by the participant.
    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
        realloc = Lottery::space(lottery.entries.len() + 1),
        realloc::payer = participant,
        realloc::zero = false,
    )]
    pub lottery: Account<'info, Lottery>,

    /// The identity entering the round; pays the stake and the realloc rent
    #[account(mut)]
    pub participant: Signer<'info>,

    /// Vault PDA that custodies the stake
    #[account(
        mut,
        seeds = [VAULT_SEED],
        bump = vault.bump,
    )]
    pub vault: Account<'info, Vault>,

    pub system_program: Program<'info, System>,
}
