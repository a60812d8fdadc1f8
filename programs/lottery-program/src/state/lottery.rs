use anchor_lang::prelude::*;

use crate::error::LotteryError;

pub const LOTTERY_SEED: &[u8] = b"lottery";

/// Minimum stake to enter a round, in lamports (0.5 SOL).
pub const MINIMUM_TICKET_PRICE: u64 = 500_000_000;

/// A winner can only be drawn once at least this many entries exist.
pub const MIN_PARTICIPANTS: usize = 3;

// 32 identity + 8 stake
pub const PARTICIPANT_ENTRY_SIZE: usize = 32 + 8;

/// One entry per unique identity per round. Entries are kept in call order;
/// the position of an entry is its slot in the selection index space.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq, Debug)]
pub struct ParticipantEntry {
    pub identity: Pubkey,
    pub stake: u64,
}

/// The round state. Created empty at initialization, grows by one entry per
/// valid `participate` call, and is cleared in the same instruction that pays
/// the winner, so no intermediate state is ever observable.
#[account]
pub struct Lottery {
    pub administrator: Pubkey,
    pub pot_lamports: u64,
    pub bump: u8,
    pub vault_bump: u8,
    pub entries: Vec<ParticipantEntry>,
}

impl Lottery {
    // 8 discriminator + 32 administrator + 8 pot_lamports + 1 bump +
    // 1 vault_bump + 4 vec length prefix
    pub fn space(entry_count: usize) -> usize {
        8 + 32 + 8 + 1 + 1 + 4 + entry_count * PARTICIPANT_ENTRY_SIZE
    }

    pub fn is_entered(&self, identity: &Pubkey) -> bool {
        self.entries.iter().any(|entry| entry.identity == *identity)
    }

    /// Admission checks for `participate`, in the contract's fixed order.
    /// Pure with respect to `self`; a rejection mutates nothing.
    pub fn assert_can_enter(&self, identity: &Pubkey, stake: u64) -> Result<()> {
        require!(
            *identity != self.administrator,
            LotteryError::AdminNotAllowed
        );
        require!(!self.is_entered(identity), LotteryError::AlreadyEntered);
        require!(
            stake >= MINIMUM_TICKET_PRICE,
            LotteryError::InsufficientStake
        );
        Ok(())
    }

    /// Appends an entry and grows the pot. Callers must have passed
    /// `assert_can_enter` first.
    pub fn record_entry(&mut self, identity: Pubkey, stake: u64) -> Result<()> {
        let pot_lamports = self
            .pot_lamports
            .checked_add(stake)
            .ok_or(LotteryError::Overflow)?;
        self.entries.push(ParticipantEntry { identity, stake });
        self.pot_lamports = pot_lamports;
        Ok(())
    }

    /// Eligibility check for drawing a winner. A round can only be decided
    /// once it holds at least `MIN_PARTICIPANTS` entries.
    pub fn assert_can_draw(&self) -> Result<()> {
        require!(
            self.entries.len() >= MIN_PARTICIPANTS,
            LotteryError::InsufficientParticipants
        );
        Ok(())
    }

    /// Reduces a selection seed to an index into the current entries.
    /// Only meaningful while the round holds at least one entry.
    pub fn winner_index(&self, seed: u64) -> usize {
        (seed % self.entries.len() as u64) as usize
    }

    /// Resets the round to empty. Paired with the payout in the same
    /// instruction so payout and reset form one atomic transition.
    pub fn clear_round(&mut self) {
        self.entries.clear();
        self.pot_lamports = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_SOL: u64 = 1_000_000_000;

    fn fresh_lottery(administrator: Pubkey) -> Lottery {
        Lottery {
            administrator,
            pot_lamports: 0,
            bump: 254,
            vault_bump: 253,
            entries: Vec::new(),
        }
    }

    #[test]
    fn administrator_cannot_enter_at_any_stake() {
        let admin = Pubkey::new_unique();
        let lottery = fresh_lottery(admin);

        for stake in [0, MINIMUM_TICKET_PRICE - 1, MINIMUM_TICKET_PRICE, ONE_SOL] {
            assert_eq!(
                lottery.assert_can_enter(&admin, stake),
                Err(LotteryError::AdminNotAllowed.into())
            );
        }
        assert!(lottery.entries.is_empty());
    }

    #[test]
    fn double_entry_is_rejected_without_mutation() {
        let mut lottery = fresh_lottery(Pubkey::new_unique());
        let player = Pubkey::new_unique();

        lottery.assert_can_enter(&player, MINIMUM_TICKET_PRICE).unwrap();
        lottery.record_entry(player, MINIMUM_TICKET_PRICE).unwrap();

        assert_eq!(
            lottery.assert_can_enter(&player, ONE_SOL),
            Err(LotteryError::AlreadyEntered.into())
        );
        assert_eq!(lottery.entries.len(), 1);
        assert_eq!(lottery.pot_lamports, MINIMUM_TICKET_PRICE);
    }

    #[test]
    fn stake_below_minimum_is_rejected() {
        let lottery = fresh_lottery(Pubkey::new_unique());
        let player = Pubkey::new_unique();

        assert_eq!(
            lottery.assert_can_enter(&player, MINIMUM_TICKET_PRICE - 1),
            Err(LotteryError::InsufficientStake.into())
        );
        // The exact minimum is accepted, as is anything above it.
        lottery.assert_can_enter(&player, MINIMUM_TICKET_PRICE).unwrap();
        lottery.assert_can_enter(&player, 10 * ONE_SOL).unwrap();
    }

    #[test]
    fn entries_stay_unique_and_ordered_and_pot_tracks_stakes() {
        let mut lottery = fresh_lottery(Pubkey::new_unique());
        let players: Vec<Pubkey> = (0..5).map(|_| Pubkey::new_unique()).collect();

        for (i, player) in players.iter().enumerate() {
            let stake = MINIMUM_TICKET_PRICE + i as u64;
            lottery.assert_can_enter(player, stake).unwrap();
            lottery.record_entry(*player, stake).unwrap();
        }

        let expected_pot: u64 = lottery.entries.iter().map(|entry| entry.stake).sum();
        assert_eq!(lottery.pot_lamports, expected_pot);

        for (i, player) in players.iter().enumerate() {
            assert_eq!(lottery.entries[i].identity, *player);
        }
        for player in &players {
            assert_eq!(
                lottery.entries.iter().filter(|e| e.identity == *player).count(),
                1
            );
        }
    }

    #[test]
    fn draw_requires_three_entries_and_leaves_state_unchanged() {
        let mut lottery = fresh_lottery(Pubkey::new_unique());

        for round_size in 0..MIN_PARTICIPANTS {
            assert_eq!(lottery.entries.len(), round_size);
            assert_eq!(
                lottery.assert_can_draw(),
                Err(LotteryError::InsufficientParticipants.into())
            );
            // A failed eligibility check mutates nothing.
            assert_eq!(lottery.entries.len(), round_size);

            lottery
                .record_entry(Pubkey::new_unique(), MINIMUM_TICKET_PRICE)
                .unwrap();
        }

        // The third entry makes the round drawable.
        lottery.assert_can_draw().unwrap();
    }

    #[test]
    fn winner_index_is_always_in_range() {
        let mut lottery = fresh_lottery(Pubkey::new_unique());
        for _ in 0..MIN_PARTICIPANTS {
            lottery
                .record_entry(Pubkey::new_unique(), MINIMUM_TICKET_PRICE)
                .unwrap();
        }

        for seed in [0u64, 1, 2, 3, u64::MAX, u64::MAX - 1, 0xdead_beef] {
            assert!(lottery.winner_index(seed) < lottery.entries.len());
        }
        assert_eq!(lottery.winner_index(0), 0);
        assert_eq!(lottery.winner_index(4), 1);
    }

    #[test]
    fn clear_round_resets_to_empty_and_allows_reentry() {
        let mut lottery = fresh_lottery(Pubkey::new_unique());
        let returning_player = Pubkey::new_unique();

        lottery.record_entry(returning_player, ONE_SOL).unwrap();
        lottery.record_entry(Pubkey::new_unique(), ONE_SOL).unwrap();
        lottery.record_entry(Pubkey::new_unique(), ONE_SOL).unwrap();

        lottery.clear_round();
        assert!(lottery.entries.is_empty());
        assert_eq!(lottery.pot_lamports, 0);

        // A fresh round admits an identity that entered the previous one.
        lottery.assert_can_enter(&returning_player, ONE_SOL).unwrap();
    }

    #[test]
    fn pot_overflow_is_detected() {
        let mut lottery = fresh_lottery(Pubkey::new_unique());
        lottery.record_entry(Pubkey::new_unique(), u64::MAX).unwrap();
        assert_eq!(
            lottery.record_entry(Pubkey::new_unique(), 1),
            Err(LotteryError::Overflow.into())
        );
        assert_eq!(lottery.entries.len(), 1);
    }

    #[test]
    fn space_grows_linearly_with_entries() {
        assert_eq!(Lottery::space(0), 8 + 32 + 8 + 1 + 1 + 4);
        assert_eq!(
            Lottery::space(3) - Lottery::space(0),
            3 * PARTICIPANT_ENTRY_SIZE
        );
    }
}
