use anchor_lang::prelude::*;
use instructions::*;

pub mod error;
pub mod instructions;
pub mod state;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod lottery_program {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize::initialize(ctx)
    }

    pub fn participate(ctx: Context<Participate>, stake: u64) -> Result<()> {
        instructions::participate::participate(ctx, stake)
    }

    pub fn pick_the_winner<'info>(
        ctx: Context<'_, '_, '_, 'info, PickTheWinner<'info>>,
    ) -> Result<()> {
        instructions::pick_the_winner::pick_the_winner(ctx)
    }
}
