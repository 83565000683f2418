pub mod account_structs;
/// # nft freeze stake - Freeze-in-place NFT Staking
///
/// ## Business Process Flow
///
/// 1. Initial Setup:
///    - Anyone creates the reward mint (`create_ft_mint`) and the NFT mint (`create_nft_mint`)
///    - Anyone creates the reward vault (`create_vault`), owned by the vault authority PDA
///    - The program upgrade authority funds the vault (`airdrop`)
///
/// 2. NFT Issuance:
///    - User creates associated token accounts for both mints
///    - User mints the single NFT (`mint_nft`)
///    - Mint authority is cleared (`change_auth`), fixing supply at one
///
/// 3. Staking Flow:
///    a. Stake:
///       - User records the stake (`stake`), the NFT never leaves the user's account
///       - User locks the NFT (`freeze_user`): freeze authority moves to the vault
///         authority PDA, which freezes the user's NFT account
///
///    b. Release:
///       - User unlocks the NFT (`unstake`), the vault authority thaws the account
///       - User returns the freeze authority to the NFT authority (`revoke`)
///
/// 4. Rewards:
///    - `disburse_rewards` pays 10 reward tokens per day of locked stake from the vault,
///      either while locked or once after unstaking for the closed period
///    - Never pays more than the vault holds
///
/// Every authority, mint, the vault and the stake record are PDAs derived from fixed
/// labels, so exactly one stake can be active at a time.
pub mod capability;
pub mod error;
pub mod events;
mod guard;
pub mod processor;
pub mod rewards;
pub mod state;

use account_structs::*;
use anchor_lang::prelude::*;

declare_id!("8DpveJnozSARWoBLhBQfNkJggxU24JiQ8mThM4TMvDjC");

#[program]
pub mod nft_freeze_stake {
    use super::*;

    /// Creates the reward token mint with the token authority PDA as mint authority.
    pub fn create_ft_mint(ctx: Context<CreateFtMint>, decimals: u8) -> Result<()> {
        processor::create_ft_mint(ctx, decimals)
    }

    /// Creates the zero-decimal NFT mint. The NFT authority PDA is both mint and
    /// freeze authority.
    pub fn create_nft_mint(ctx: Context<CreateNftMint>) -> Result<()> {
        processor::create_nft_mint(ctx)
    }

    /// Creates the reward pool token account owned by the vault authority PDA.
    pub fn create_vault(ctx: Context<CreateVault>) -> Result<()> {
        processor::create_vault(ctx)
    }

    /// Creates the caller's associated token account for the reward mint, if missing.
    pub fn create_users_tok_acc(ctx: Context<CreateUsersTokAcc>) -> Result<()> {
        processor::create_users_tok_acc(ctx)
    }

    /// Creates the caller's associated token account for the NFT mint, if missing.
    pub fn create_users_nft_acc(ctx: Context<CreateUsersNftAcc>) -> Result<()> {
        processor::create_users_nft_acc(ctx)
    }

    /// Mints `amount` whole reward tokens into the vault:
    /// - signer must be the program upgrade authority
    pub fn airdrop(ctx: Context<Airdrop>, amount: u64) -> Result<()> {
        processor::airdrop(ctx, amount)
    }

    /// Mints the single NFT into the caller's NFT account:
    /// - supply must still be zero
    /// - the NFT authority PDA must still hold mint authority
    pub fn mint_nft(ctx: Context<MintNft>) -> Result<()> {
        processor::mint_nft(ctx)
    }

    /// Clears the NFT mint authority for good.
    pub fn change_auth(ctx: Context<ChangeAuth>) -> Result<()> {
        processor::change_auth(ctx)
    }

    /// Records the caller's stake of the NFT they hold. The NFT stays in place and is
    /// still transferable until `freeze_user`.
    pub fn stake(ctx: Context<Stake>) -> Result<()> {
        processor::stake(ctx)
    }

    /// Locks the staked NFT:
    /// - caller must own the stake and the recorded NFT account, which must still hold the NFT
    /// - freeze authority moves to the vault authority PDA, which freezes the account
    /// - rewards accrue from here on
    pub fn freeze_user(ctx: Context<FreezeUser>) -> Result<()> {
        processor::freeze_user(ctx)
    }

    /// Thaws the NFT account and ends the cycle. Rewards stop accruing.
    pub fn unstake(ctx: Context<Unstake>) -> Result<()> {
        processor::unstake(ctx)
    }

    /// Hands the NFT freeze authority back from the vault authority to the NFT
    /// authority PDA once unstaked.
    pub fn revoke(ctx: Context<Revoke>) -> Result<()> {
        processor::revoke(ctx)
    }

    /// Pays what the current cycle has accrued minus what it already paid:
    /// - while locked, accrual runs up to now
    /// - after unstake, up to the unstake time
    /// - the whole amount or nothing, bounded by the vault balance
    pub fn disburse_rewards(ctx: Context<DisburseRewards>) -> Result<()> {
        processor::disburse_rewards(ctx)
    }
}
