use anchor_lang::prelude::*;

use crate::state::{Lottery, Vault, LOTTERY_SEED, VAULT_ACCOUNT_SIZE, VAULT_SEED};

/// One-time setup, the deployment step of the lottery.
///
/// Fixes the administrator to the signing key for the lifetime of the
/// program and creates the vault that will custody stakes. The round starts
/// empty. The administrator field is never written again, so `lottery.administrator`
/// doubles as the public read of the administrator identity.
pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
    let lottery = &mut ctx.accounts.lottery;
    lottery.administrator = ctx.accounts.administrator.key();
    lottery.pot_lamports = 0;
    lottery.bump = ctx.bumps.lottery;
    lottery.vault_bump = ctx.bumps.vault;
    lottery.entries = Vec::new();

    ctx.accounts.vault.bump = ctx.bumps.vault;
    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = administrator,
        space = Lottery::space(0),
        seeds = [LOTTERY_SEED],
        bump
    )]
    pub lottery: Account<'info, Lottery>,

    #[account(
        init,
        payer = administrator,
        space = VAULT_ACCOUNT_SIZE,
        seeds = [VAULT_SEED],
        bump
    )]
    pub vault: Account<'info, Vault>,

    #[account(mut)]
    pub administrator: Signer<'info>,

    pub system_program: Program<'info, System>,
}
