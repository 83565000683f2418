use crate::error::CustomErrorCode;
use crate::rewards::calc_reward;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;

/// Whole reward tokens accrued per full day of locked stake.
pub const REWARD_TOKENS_PER_DAY: u64 = 10;
pub const SECONDS_PER_DAY: i64 = 86_400;
/// Keeps `10^decimals` and the reward product inside u128.
pub const MAX_REWARD_DECIMALS: u8 = 18;
pub const NFT_SUPPLY_CAP: u64 = 1;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StakeState {
    Unstaked,
    /// Stake recorded, NFT account still transferable.
    Staked,
    /// Stake recorded and NFT account frozen by the vault authority.
    Locked,
}

impl Default for StakeState {
    fn default() -> Self {
        StakeState::Unstaked
    }
}

#[account]
#[derive(Default, Debug, PartialEq)]
pub struct StakeInfo {
    pub owner: Pubkey,
    pub nft_account: Pubkey,
    pub stake_start: i64,
    pub locked_at: i64, // accrual starts here
    pub unstaked_at: i64,
    pub disbursed: u64, // paid out during the current cycle
    pub state: StakeState,
    pub bump: u8,
}

impl StakeInfo {
    pub const LEN: usize = 8 + 32 + 32 + 8 + 8 + 8 + 8 + 1 + 1;

    /// Opens a new cycle. A record left over from a finished cycle is overwritten.
    pub fn begin(&mut self, owner: Pubkey, nft_account: Pubkey, now: i64, bump: u8) -> Result<()> {
        require!(
            self.state == StakeState::Unstaked,
            CustomErrorCode::AlreadyStaked
        );

        *self = Self {
            owner,
            nft_account,
            stake_start: now,
            locked_at: 0,
            unstaked_at: 0,
            disbursed: 0,
            state: StakeState::Staked,
            bump,
        };
        Ok(())
    }

    pub fn has_staked(&self) -> bool {
        self.stake_start != 0
    }

    /// Owner gate for every instruction after `stake`. A record that was only just
    /// allocated has never been staked.
    pub fn check_holder(&self, user: &Pubkey) -> Result<()> {
        require!(self.has_staked(), CustomErrorCode::NotStaked);
        require_keys_eq!(self.owner, *user, CustomErrorCode::Unauthorized);
        Ok(())
    }

    pub fn check_nft_account(&self, nft_account: &Pubkey) -> Result<()> {
        require_keys_eq!(
            self.nft_account,
            *nft_account,
            CustomErrorCode::NftAccountMismatch
        );
        Ok(())
    }

    pub fn lock(&mut self, now: i64) -> Result<()> {
        match self.state {
            StakeState::Unstaked => err!(CustomErrorCode::NotStaked),
            StakeState::Locked => err!(CustomErrorCode::AlreadyFrozen),
            StakeState::Staked => {
                self.state = StakeState::Locked;
                self.locked_at = now;
                Ok(())
            }
        }
    }

    pub fn release(&mut self, now: i64) -> Result<()> {
        match self.state {
            StakeState::Unstaked => err!(CustomErrorCode::NotStaked),
            StakeState::Staked => err!(CustomErrorCode::AccountNotFrozen),
            StakeState::Locked => {
                self.state = StakeState::Unstaked;
                self.unstaked_at = now;
                Ok(())
            }
        }
    }

    pub fn ensure_released(&self) -> Result<()> {
        require!(
            self.state == StakeState::Unstaked,
            CustomErrorCode::StakeStillActive
        );
        Ok(())
    }

    /// Returns the `(from, to)` seconds the current cycle has been locked.
    ///
    /// After `unstake` the window is closed at the unstake time and can still be
    /// claimed until the next `stake`.
    pub fn accrual_window(&self, now: i64) -> Result<(i64, i64)> {
        match self.state {
            StakeState::Locked => Ok((self.locked_at, now)),
            StakeState::Staked => err!(CustomErrorCode::AccountNotFrozen),
            StakeState::Unstaked => {
                require!(self.has_staked(), CustomErrorCode::NotStaked);
                Ok((self.locked_at, self.unstaked_at))
            }
        }
    }

    /// Amount owed now: everything accrued over the cycle minus what was already
    /// paid, so the total does not depend on how often the owner claims. The whole
    /// amount must fit in the vault.
    pub fn payout(&self, now: i64, decimals: u8, vault_balance: u64) -> Result<u64> {
        let accrued = calc_reward(self.accrual_window(now)?, decimals)?;
        let owed = accrued.saturating_sub(self.disbursed);

        require!(owed > 0, CustomErrorCode::NoRewardsAccrued);
        require!(
            owed <= vault_balance,
            CustomErrorCode::InsufficientVaultBalance
        );
        Ok(owed)
    }

    pub fn settle(&mut self, amount: u64) -> Result<()> {
        self.disbursed = self
            .disbursed
            .checked_add(amount)
            .ok_or(CustomErrorCode::MathOverflow)?;
        Ok(())
    }
}

/// The NFT account being staked or locked must hold the NFT and be transferable.
pub fn check_nft_lockable(amount: u64, is_frozen: bool) -> Result<()> {
    require!(amount == NFT_SUPPLY_CAP, CustomErrorCode::NftNotHeld);
    require!(!is_frozen, CustomErrorCode::AlreadyFrozen);
    Ok(())
}

/// A further NFT may be minted only while supply is below the cap and the
/// program still holds the mint authority.
pub fn check_nft_mintable(
    supply: u64,
    mint_authority: COption<Pubkey>,
    nft_mint_authority: &Pubkey,
) -> Result<()> {
    require!(supply < NFT_SUPPLY_CAP, CustomErrorCode::SupplyCapExceeded);
    require!(
        mint_authority == COption::Some(*nft_mint_authority),
        CustomErrorCode::InvalidAuthority
    );
    Ok(())
}

pub fn check_supply_fixable(
    supply: u64,
    mint_authority: COption<Pubkey>,
    nft_mint_authority: &Pubkey,
) -> Result<()> {
    require!(
        mint_authority == COption::Some(*nft_mint_authority),
        CustomErrorCode::InvalidAuthority
    );
    require!(supply == NFT_SUPPLY_CAP, CustomErrorCode::NftNotMinted);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::error_code;

    const T0: i64 = 1_700_000_000;

    fn assert_fails<T: std::fmt::Debug>(res: Result<T>, expected: CustomErrorCode) {
        assert_eq!(error_code(res.unwrap_err()), u32::from(expected));
    }

    fn staked() -> StakeInfo {
        let mut info = StakeInfo::default();
        info.begin(Pubkey::new_unique(), Pubkey::new_unique(), T0, 255)
            .unwrap();
        info
    }

    fn locked_at(at: i64) -> StakeInfo {
        let mut info = staked();
        info.lock(at).unwrap();
        info
    }

    #[test]
    fn stake_records_owner_and_time() {
        let owner = Pubkey::new_unique();
        let mut info = StakeInfo::default();
        info.begin(owner, Pubkey::new_unique(), T0, 7).unwrap();
        assert_eq!(info.owner, owner);
        assert_eq!(info.stake_start, T0);
        assert_eq!(info.state, StakeState::Staked);
        assert_eq!(info.bump, 7);
    }

    #[test]
    fn repeated_stake_is_rejected() {
        let mut info = staked();
        let before = info.stake_start;
        assert_fails(
            info.begin(Pubkey::new_unique(), Pubkey::new_unique(), T0 + 5, 1),
            CustomErrorCode::AlreadyStaked,
        );
        assert_eq!(info.stake_start, before);

        info.lock(T0 + 1).unwrap();
        assert_fails(
            info.begin(Pubkey::new_unique(), Pubkey::new_unique(), T0 + 5, 1),
            CustomErrorCode::AlreadyStaked,
        );
    }

    #[test]
    fn full_cycle_and_restake() {
        let mut info = staked();
        info.lock(T0 + 10).unwrap();
        assert_eq!(info.state, StakeState::Locked);
        assert_eq!(info.locked_at, T0 + 10);
        info.release(T0 + 100).unwrap();
        assert_eq!(info.state, StakeState::Unstaked);
        assert_eq!(info.unstaked_at, T0 + 100);
        info.ensure_released().unwrap();

        let owner = Pubkey::new_unique();
        info.begin(owner, info.nft_account, T0 + 200, info.bump)
            .unwrap();
        assert_eq!(info.owner, owner);
        assert_eq!(info.locked_at, 0);
        assert_eq!(info.unstaked_at, 0);
        assert_eq!(info.disbursed, 0);
    }

    #[test]
    fn lock_requires_recorded_stake() {
        let mut fresh = StakeInfo::default();
        assert_fails(fresh.lock(T0), CustomErrorCode::NotStaked);

        let mut info = locked_at(T0);
        assert_fails(info.lock(T0 + 1), CustomErrorCode::AlreadyFrozen);
        assert_eq!(info.locked_at, T0);
    }

    #[test]
    fn second_unstake_fails() {
        let mut info = staked();
        assert_fails(info.release(T0 + 1), CustomErrorCode::AccountNotFrozen);
        info.lock(T0 + 2).unwrap();
        info.release(T0 + 10).unwrap();
        assert_fails(info.release(T0 + 20), CustomErrorCode::NotStaked);
        assert_eq!(info.unstaked_at, T0 + 10);
    }

    #[test]
    fn revoke_waits_for_unstake() {
        let mut info = staked();
        assert_fails(info.ensure_released(), CustomErrorCode::StakeStillActive);
        info.lock(T0).unwrap();
        assert_fails(info.ensure_released(), CustomErrorCode::StakeStillActive);
    }

    #[test]
    fn never_staked_record_is_not_staked_for_anyone() {
        // what init_if_needed hands the owner-gated instructions before any stake
        let fresh = StakeInfo::default();
        assert_fails(fresh.check_holder(&Pubkey::new_unique()), CustomErrorCode::NotStaked);
        assert_fails(fresh.check_holder(&Pubkey::default()), CustomErrorCode::NotStaked);
        assert_fails(fresh.accrual_window(T0), CustomErrorCode::NotStaked);
        assert_fails(fresh.payout(T0, 0, u64::MAX), CustomErrorCode::NotStaked);
    }

    #[test]
    fn non_owner_is_rejected_without_touching_the_record() {
        let info = locked_at(T0);
        let before = info.clone();
        assert_fails(info.check_holder(&Pubkey::new_unique()), CustomErrorCode::Unauthorized);
        info.check_holder(&info.owner).unwrap();
        assert_eq!(info, before);
    }

    #[test]
    fn nft_account_must_match_record() {
        let info = staked();
        info.check_nft_account(&info.nft_account).unwrap();
        assert_fails(
            info.check_nft_account(&Pubkey::new_unique()),
            CustomErrorCode::NftAccountMismatch,
        );
    }

    #[test]
    fn emptied_or_frozen_account_cannot_be_locked() {
        check_nft_lockable(1, false).unwrap();
        // NFT moved elsewhere between stake and freeze_user
        assert_fails(check_nft_lockable(0, false), CustomErrorCode::NftNotHeld);
        assert_fails(check_nft_lockable(1, true), CustomErrorCode::AlreadyFrozen);
    }

    #[test]
    fn accrual_window_follows_lock_state() {
        let mut info = staked();
        assert_fails(info.accrual_window(T0 + 50), CustomErrorCode::AccountNotFrozen);

        info.lock(T0 + 20).unwrap();
        assert_eq!(info.accrual_window(T0 + 50).unwrap(), (T0 + 20, T0 + 50));

        info.release(T0 + 90).unwrap();
        // closed at unstake time no matter how late the claim comes
        assert_eq!(info.accrual_window(T0 + 10_000).unwrap(), (T0 + 20, T0 + 90));
    }

    #[test]
    fn total_payout_does_not_depend_on_claim_cadence() {
        let mut single = locked_at(T0);
        let once = single.payout(T0 + 85_000, 0, u64::MAX).unwrap();
        single.settle(once).unwrap();
        assert_eq!(once, 9);

        let mut frequent = locked_at(T0);
        let mut paid = 0;
        for step in 1..=5 {
            let amount = frequent.payout(T0 + step * 17_000, 0, u64::MAX).unwrap();
            frequent.settle(amount).unwrap();
            paid += amount;
        }
        assert_eq!(paid, once);
        assert_eq!(frequent.disbursed, single.disbursed);
    }

    #[test]
    fn claim_after_unstake_pays_only_the_closed_window() {
        let mut info = locked_at(T0);
        let first = info.payout(T0 + SECONDS_PER_DAY, 0, u64::MAX).unwrap();
        info.settle(first).unwrap();
        assert_eq!(first, 10);

        info.release(T0 + 2 * SECONDS_PER_DAY).unwrap();
        let rest = info.payout(T0 + 30 * SECONDS_PER_DAY, 0, u64::MAX).unwrap();
        info.settle(rest).unwrap();
        assert_eq!(rest, 10);
        assert_fails(
            info.payout(T0 + 31 * SECONDS_PER_DAY, 0, u64::MAX),
            CustomErrorCode::NoRewardsAccrued,
        );
    }

    #[test]
    fn payout_larger_than_vault_is_refused_whole() {
        let info = locked_at(T0);
        // one day at 10 decimals owes 10 * 10^10
        let owed = 10 * 10u64.pow(10);
        assert_eq!(info.payout(T0 + SECONDS_PER_DAY, 10, owed).unwrap(), owed);
        assert_fails(
            info.payout(T0 + SECONDS_PER_DAY, 10, owed - 1),
            CustomErrorCode::InsufficientVaultBalance,
        );
        assert_eq!(info.disbursed, 0);
    }

    #[test]
    fn reward_past_u64_reports_vault_shortfall() {
        let info = locked_at(T0);
        assert_fails(
            info.payout(T0 + 2 * SECONDS_PER_DAY, MAX_REWARD_DECIMALS, u64::MAX - 1),
            CustomErrorCode::InsufficientVaultBalance,
        );
    }

    #[test]
    fn airdrop_of_500_at_10_decimals_funds_vault() {
        let funded = crate::rewards::to_base_units(500, 10).unwrap();
        assert_eq!(funded, 500 * 10u64.pow(10));

        // fifty days of locked stake drain the vault exactly
        let info = locked_at(T0);
        assert_eq!(info.payout(T0 + 50 * SECONDS_PER_DAY, 10, funded).unwrap(), funded);
        assert_fails(
            info.payout(T0 + 50 * SECONDS_PER_DAY + 1, 10, funded),
            CustomErrorCode::InsufficientVaultBalance,
        );
    }

    #[test]
    fn second_nft_mint_hits_cap() {
        let authority = Pubkey::new_unique();
        check_nft_mintable(0, COption::Some(authority), &authority).unwrap();
        assert_fails(
            check_nft_mintable(1, COption::Some(authority), &authority),
            CustomErrorCode::SupplyCapExceeded,
        );
    }

    #[test]
    fn cleared_authority_cannot_mint_or_clear_again() {
        let authority = Pubkey::new_unique();
        check_supply_fixable(1, COption::Some(authority), &authority).unwrap();

        // state after change_auth
        assert_fails(
            check_nft_mintable(1, COption::None, &authority),
            CustomErrorCode::SupplyCapExceeded,
        );
        assert_fails(
            check_nft_mintable(0, COption::None, &authority),
            CustomErrorCode::InvalidAuthority,
        );
        assert_fails(
            check_supply_fixable(1, COption::None, &authority),
            CustomErrorCode::InvalidAuthority,
        );
    }

    #[test]
    fn supply_is_fixed_only_after_mint() {
        let authority = Pubkey::new_unique();
        assert_fails(
            check_supply_fixable(0, COption::Some(authority), &authority),
            CustomErrorCode::NftNotMinted,
        );
        assert_fails(
            check_nft_mintable(0, COption::Some(Pubkey::new_unique()), &authority),
            CustomErrorCode::InvalidAuthority,
        );
    }

    #[test]
    fn account_size_fits_record() {
        let info = locked_at(T0);
        let mut data = Vec::new();
        info.try_serialize(&mut data).unwrap();
        assert_eq!(data.len(), StakeInfo::LEN);
    }
}
