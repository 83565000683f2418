use crate::capability::*;
use crate::error::*;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};

use anchor_lang::solana_program::bpf_loader_upgradeable::{self};

#[derive(Accounts)]
pub struct CreateFtMint<'info> {
    /// CHECK: Created and initialized as a mint by the handler, address pinned by seeds
    #[account(
        mut,
        seeds = [TOKEN_MINT_SEED],
        bump
    )]
    pub token_mint: UncheckedAccount<'info>,

    /// CHECK: This is a PDA that acts as mint authority, validated by seeds constraint
    #[account(
        seeds = [TOKEN_AUTHORITY_SEED],
        bump
    )]
    pub token_authority: UncheckedAccount<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct CreateNftMint<'info> {
    /// CHECK: Created and initialized as a mint by the handler, address pinned by seeds
    #[account(
        mut,
        seeds = [NFT_MINT_SEED],
        bump
    )]
    pub nft_mint: UncheckedAccount<'info>,

    /// CHECK: This is a PDA that acts as mint and freeze authority, validated by seeds constraint
    #[account(
        seeds = [NFT_MINT_AUTHORITY_SEED],
        bump
    )]
    pub nft_mint_authority: UncheckedAccount<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct CreateVault<'info> {
    #[account(
        seeds = [TOKEN_MINT_SEED],
        bump
    )]
    pub token_mint: Account<'info, Mint>,

    /// CHECK: This is a PDA that acts as vault authority, validated by seeds constraint
    /// Only this program can move reward tokens out of the vault
    #[account(
        seeds = [VAULT_AUTHORITY_SEED],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// CHECK: Created and initialized as a token account by the handler, address pinned by seeds
    #[account(
        mut,
        seeds = [VAULT_SEED],
        bump
    )]
    pub vault_token_account: UncheckedAccount<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct CreateUsersTokAcc<'info> {
    #[account(
        seeds = [TOKEN_MINT_SEED],
        bump
    )]
    pub token_mint: Account<'info, Mint>,

    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = token_mint,
        associated_token::authority = user,
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct CreateUsersNftAcc<'info> {
    #[account(
        seeds = [NFT_MINT_SEED],
        bump
    )]
    pub nft_mint: Account<'info, Mint>,

    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = nft_mint,
        associated_token::authority = user,
    )]
    pub user_nft_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct Airdrop<'info> {
    #[account(
        mut,
        seeds = [TOKEN_MINT_SEED],
        bump,
        constraint = token_mint.mint_authority == Some(token_authority.key()).into() @ CustomErrorCode::InvalidAuthority
    )]
    pub token_mint: Account<'info, Mint>,

    /// CHECK: This is a PDA that acts as mint authority, validated by seeds constraint
    #[account(
        seeds = [TOKEN_AUTHORITY_SEED],
        bump
    )]
    pub token_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED],
        bump,
        constraint = vault_token_account.mint == token_mint.key() @ CustomErrorCode::InvalidMint,
        constraint = vault_token_account.owner == vault_authority.key() @ CustomErrorCode::InvalidAuthority
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    /// CHECK: This is a PDA vault authority, validated by seeds constraint
    #[account(
        seeds = [VAULT_AUTHORITY_SEED],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    pub funder: Signer<'info>,

    /// CHECK: This is the program data account that contains the update authority
    #[account(
        constraint = program_data.key() == get_program_data_address(&crate::id()) @ CustomErrorCode::InvalidProgramData
    )]
    pub program_data: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct MintNft<'info> {
    #[account(
        mut,
        seeds = [NFT_MINT_SEED],
        bump
    )]
    pub nft_mint: Account<'info, Mint>,

    /// CHECK: This is a PDA that acts as mint authority, validated by seeds constraint
    #[account(
        seeds = [NFT_MINT_AUTHORITY_SEED],
        bump
    )]
    pub nft_mint_authority: UncheckedAccount<'info>,

    pub user: Signer<'info>,

    #[account(
        mut,
        constraint = user_nft_account.mint == nft_mint.key() @ CustomErrorCode::InvalidMint,
        constraint = user_nft_account.owner == user.key() @ CustomErrorCode::Unauthorized
    )]
    pub user_nft_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct ChangeAuth<'info> {
    #[account(
        mut,
        seeds = [NFT_MINT_SEED],
        bump
    )]
    pub nft_mint: Account<'info, Mint>,

    /// CHECK: This is a PDA that acts as mint authority, validated by seeds constraint
    #[account(
        seeds = [NFT_MINT_AUTHORITY_SEED],
        bump
    )]
    pub nft_mint_authority: UncheckedAccount<'info>,

    pub signer: Signer<'info>,
    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct Stake<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        seeds = [NFT_MINT_SEED],
        bump,
        constraint = nft_mint.supply == NFT_SUPPLY_CAP @ CustomErrorCode::NftNotMinted
    )]
    pub nft_mint: Account<'info, Mint>,

    #[account(
        constraint = user_nft_account.mint == nft_mint.key() @ CustomErrorCode::InvalidMint,
        constraint = user_nft_account.owner == user.key() @ CustomErrorCode::Unauthorized
    )]
    pub user_nft_account: Account<'info, TokenAccount>,

    #[account(
        init_if_needed,
        payer = user,
        space = StakeInfo::LEN,
        seeds = [STAKE_INFO_SEED],
        bump
    )]
    pub stake_info: Account<'info, StakeInfo>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct FreezeUser<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    /// Allocated on the spot when nothing was ever staked, so the handler can
    /// report `NotStaked`; the failing transaction rolls the allocation back.
    #[account(
        init_if_needed,
        payer = user,
        space = StakeInfo::LEN,
        seeds = [STAKE_INFO_SEED],
        bump
    )]
    pub stake_info: Account<'info, StakeInfo>,

    #[account(
        mut,
        constraint = user_nft_account.mint == nft_mint.key() @ CustomErrorCode::InvalidMint,
        constraint = user_nft_account.owner == user.key() @ CustomErrorCode::Unauthorized
    )]
    pub user_nft_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [NFT_MINT_SEED],
        bump
    )]
    pub nft_mint: Account<'info, Mint>,

    /// CHECK: This is a PDA that holds the NFT freeze authority while unstaked
    #[account(
        seeds = [NFT_MINT_AUTHORITY_SEED],
        bump
    )]
    pub nft_mint_authority: UncheckedAccount<'info>,

    /// CHECK: This is a PDA vault authority, validated by seeds constraint
    #[account(
        seeds = [VAULT_AUTHORITY_SEED],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct Unstake<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        init_if_needed,
        payer = user,
        space = StakeInfo::LEN,
        seeds = [STAKE_INFO_SEED],
        bump
    )]
    pub stake_info: Account<'info, StakeInfo>,

    #[account(mut)]
    pub user_nft_account: Account<'info, TokenAccount>,

    #[account(
        seeds = [NFT_MINT_SEED],
        bump
    )]
    pub nft_mint: Account<'info, Mint>,

    /// CHECK: This is a PDA vault authority, validated by seeds constraint
    #[account(
        seeds = [VAULT_AUTHORITY_SEED],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct Revoke<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        init_if_needed,
        payer = user,
        space = StakeInfo::LEN,
        seeds = [STAKE_INFO_SEED],
        bump
    )]
    pub stake_info: Account<'info, StakeInfo>,

    #[account(
        mut,
        seeds = [NFT_MINT_SEED],
        bump
    )]
    pub nft_mint: Account<'info, Mint>,

    /// CHECK: This is a PDA that takes the freeze authority back, validated by seeds constraint
    #[account(
        seeds = [NFT_MINT_AUTHORITY_SEED],
        bump
    )]
    pub nft_mint_authority: UncheckedAccount<'info>,

    /// CHECK: This is a PDA vault authority, validated by seeds constraint
    #[account(
        seeds = [VAULT_AUTHORITY_SEED],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct DisburseRewards<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    /// Allocated on the spot when nothing was ever staked, so the handler can
    /// report `NotStaked`; the failing transaction rolls the allocation back.
    #[account(
        init_if_needed,
        payer = user,
        space = StakeInfo::LEN,
        seeds = [STAKE_INFO_SEED],
        bump
    )]
    pub stake_info: Account<'info, StakeInfo>,

    #[account(
        seeds = [TOKEN_MINT_SEED],
        bump
    )]
    pub token_mint: Account<'info, Mint>,

    #[account(
        mut,
        seeds = [VAULT_SEED],
        bump,
        constraint = vault_token_account.mint == token_mint.key() @ CustomErrorCode::InvalidMint,
        constraint = vault_token_account.owner == vault_authority.key() @ CustomErrorCode::InvalidAuthority
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    /// CHECK: This is a PDA vault authority, validated by seeds and token account owner constraint
    #[account(
        seeds = [VAULT_AUTHORITY_SEED],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = user_token_account.mint == token_mint.key() @ CustomErrorCode::InvalidMint,
        constraint = user_token_account.owner == user.key() @ CustomErrorCode::Unauthorized
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

// Helper function to derive the program data address
fn get_program_data_address(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[program_id.as_ref()], &bpf_loader_upgradeable::id()).0
}
