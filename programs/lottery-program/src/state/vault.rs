use anchor_lang::prelude::*;

pub const VAULT_SEED: &[u8] = b"vault";

// 8 discriminator + 1 bump
pub const VAULT_ACCOUNT_SIZE: usize = 8 + 1;

/// Program-owned PDA that custodies every stake paid into the current round.
/// Lamports above the rent-exempt reserve are exactly the accumulated pot.
#[account]
pub struct Vault {
    pub bump: u8,
}
