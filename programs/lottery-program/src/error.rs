use anchor_lang::error_code;

// The error messages are part of the observable contract and are asserted
// verbatim by the tests.
#[error_code]
pub enum LotteryError {
    #[msg("The administrator cannot participate as a user in the lottery!")]
    AdminNotAllowed,
    #[msg("You are already participating in the lottery!")]
    AlreadyEntered,
    #[msg("The minimum ticket price (lot) is 0.5 SOL!")]
    InsufficientStake,
    #[msg("Only the administrator can pick the winner!")]
    Unauthorized,
    #[msg("A minimum of 3 users is required to participate in the lottery!")]
    InsufficientParticipants,
    #[msg("Vault transfer failed")]
    TransferFailed,
    Overflow,
    #[msg("Invalid SlotHashes account provided")]
    InvalidSlotHashesAccount,
}
