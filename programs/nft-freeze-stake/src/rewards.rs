use crate::error::CustomErrorCode;
use crate::state::{REWARD_TOKENS_PER_DAY, SECONDS_PER_DAY};
use anchor_lang::prelude::*;

/// Scales whole tokens to base units of a mint with `decimals`.
pub fn to_base_units(amount: u64, decimals: u8) -> Result<u64> {
    10u64
        .checked_pow(decimals as u32)
        .and_then(|scale| amount.checked_mul(scale))
        .ok_or_else(|| error!(CustomErrorCode::MathOverflow))
}

/// Linear accrual of `REWARD_TOKENS_PER_DAY`, floored to whole base units.
///
/// A window whose end precedes its start (clock drift) accrues nothing. A reward
/// past `u64::MAX` saturates, as no vault can hold more than that.
pub fn calc_reward((from, to): (i64, i64), decimals: u8) -> Result<u64> {
    let elapsed = to.saturating_sub(from).max(0) as u128;

    let scale = 10u128
        .checked_pow(decimals as u32)
        .ok_or(CustomErrorCode::MathOverflow)?;
    let reward = elapsed
        .checked_mul(REWARD_TOKENS_PER_DAY as u128)
        .and_then(|r| r.checked_mul(scale))
        .ok_or(CustomErrorCode::MathOverflow)?
        / SECONDS_PER_DAY as u128;

    Ok(u64::try_from(reward).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::error_code;
    use crate::state::MAX_REWARD_DECIMALS;

    const DAY: i64 = SECONDS_PER_DAY;

    #[test]
    fn airdrop_amount_is_scaled_by_decimals() {
        assert_eq!(to_base_units(500, 10).unwrap(), 500 * 10u64.pow(10));
        assert_eq!(to_base_units(7, 0).unwrap(), 7);
    }

    #[test]
    fn scaling_overflow_is_an_error() {
        let err = to_base_units(u64::MAX, 1).unwrap_err();
        assert_eq!(error_code(err), u32::from(CustomErrorCode::MathOverflow));
        assert!(to_base_units(1, 20).is_err());
    }

    #[test]
    fn one_day_pays_daily_rate() {
        assert_eq!(calc_reward((0, DAY), 10).unwrap(), 10 * 10u64.pow(10));
        assert_eq!(calc_reward((DAY, DAY + DAY / 2), 10).unwrap(), 5 * 10u64.pow(10));
        assert_eq!(calc_reward((0, 3 * DAY), 0).unwrap(), 30);
    }

    #[test]
    fn partial_units_are_floored() {
        // 10 * 10^10 / 86_400 = 1_157_407.4
        assert_eq!(calc_reward((100, 101), 10).unwrap(), 1_157_407);
        assert_eq!(calc_reward((100, 101), 0).unwrap(), 0);
    }

    #[test]
    fn empty_or_backwards_window_accrues_nothing() {
        assert_eq!(calc_reward((500, 500), 9).unwrap(), 0);
        assert_eq!(calc_reward((500, 400), 9).unwrap(), 0);
    }

    #[test]
    fn reward_past_u64_saturates() {
        // 10 * 10^18 per day passes u64::MAX after about 1.85 days
        assert!(calc_reward((0, DAY), MAX_REWARD_DECIMALS).unwrap() < u64::MAX);
        assert_eq!(calc_reward((0, 2 * DAY), MAX_REWARD_DECIMALS).unwrap(), u64::MAX);
        assert_eq!(calc_reward((0, i64::MAX), MAX_REWARD_DECIMALS).unwrap(), u64::MAX);
    }

    #[test]
    fn unrepresentable_scale_is_an_error() {
        let err = calc_reward((0, DAY), 40).unwrap_err();
        assert_eq!(error_code(err), u32::from(CustomErrorCode::MathOverflow));
    }
}
