use crate::account_structs::*;
use crate::capability::Capability;
use crate::error::*;
use crate::events::*;
use crate::guard::validate_program_update_authority;
use crate::rewards::to_base_units;
use crate::state::{
    check_nft_lockable, check_nft_mintable, check_supply_fixable, MAX_REWARD_DECIMALS,
    NFT_SUPPLY_CAP,
};
use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_lang::solana_program::program_pack::Pack;
use anchor_lang::system_program;
use anchor_spl::token::spl_token::instruction::AuthorityType;
use anchor_spl::token::spl_token::state::{Account as SplTokenAccount, Mint as SplMint};
use anchor_spl::token::{self, FreezeAccount, MintTo, SetAuthority, ThawAccount, TransferChecked};

pub fn create_ft_mint(ctx: Context<CreateFtMint>, decimals: u8) -> Result<()> {
    require!(
        decimals <= MAX_REWARD_DECIMALS,
        CustomErrorCode::InvalidDecimals
    );
    let token_mint = ctx.accounts.token_mint.to_account_info();
    require!(
        token_mint.data_is_empty(),
        CustomErrorCode::AlreadyInitialized
    );

    create_pda_account(
        &ctx.accounts.payer,
        &token_mint,
        &Capability::token_mint(ctx.bumps.token_mint),
        SplMint::LEN,
        &ctx.accounts.token_program.key(),
        &ctx.accounts.system_program,
    )?;
    token::initialize_mint2(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            token::InitializeMint2 { mint: token_mint },
        ),
        decimals,
        &ctx.accounts.token_authority.key(),
        None,
    )?;

    msg!(
        "Reward mint {} created with {} decimals",
        ctx.accounts.token_mint.key(),
        decimals
    );
    emit!(FtMintCreated {
        mint: ctx.accounts.token_mint.key(),
        authority: ctx.accounts.token_authority.key(),
        decimals,
    });

    Ok(())
}

pub fn create_nft_mint(ctx: Context<CreateNftMint>) -> Result<()> {
    let nft_mint = ctx.accounts.nft_mint.to_account_info();
    require!(
        nft_mint.data_is_empty(),
        CustomErrorCode::AlreadyInitialized
    );

    // The mint authority PDA also starts out as freeze authority; freeze_user
    // hands the latter to the vault authority for the duration of a stake.
    let nft_mint_authority = ctx.accounts.nft_mint_authority.key();
    create_pda_account(
        &ctx.accounts.payer,
        &nft_mint,
        &Capability::nft_mint(ctx.bumps.nft_mint),
        SplMint::LEN,
        &ctx.accounts.token_program.key(),
        &ctx.accounts.system_program,
    )?;
    token::initialize_mint2(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            token::InitializeMint2 { mint: nft_mint },
        ),
        0,
        &nft_mint_authority,
        Some(&nft_mint_authority),
    )?;

    msg!("NFT mint {} created", ctx.accounts.nft_mint.key());
    emit!(NftMintCreated {
        mint: ctx.accounts.nft_mint.key(),
        authority: nft_mint_authority,
    });

    Ok(())
}

pub fn create_vault(ctx: Context<CreateVault>) -> Result<()> {
    let vault = ctx.accounts.vault_token_account.to_account_info();
    require!(vault.data_is_empty(), CustomErrorCode::AlreadyInitialized);

    create_pda_account(
        &ctx.accounts.payer,
        &vault,
        &Capability::vault(ctx.bumps.vault_token_account),
        SplTokenAccount::LEN,
        &ctx.accounts.token_program.key(),
        &ctx.accounts.system_program,
    )?;
    token::initialize_account3(CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        token::InitializeAccount3 {
            account: vault,
            mint: ctx.accounts.token_mint.to_account_info(),
            authority: ctx.accounts.vault_authority.to_account_info(),
        },
    ))?;

    msg!(
        "Vault {} created for mint {}",
        ctx.accounts.vault_token_account.key(),
        ctx.accounts.token_mint.key()
    );
    emit!(VaultCreated {
        vault: ctx.accounts.vault_token_account.key(),
        authority: ctx.accounts.vault_authority.key(),
        mint: ctx.accounts.token_mint.key(),
    });

    Ok(())
}

pub fn create_users_tok_acc(ctx: Context<CreateUsersTokAcc>) -> Result<()> {
    msg!(
        "Reward token account {} ready for {}",
        ctx.accounts.user_token_account.key(),
        ctx.accounts.user.key()
    );
    Ok(())
}

pub fn create_users_nft_acc(ctx: Context<CreateUsersNftAcc>) -> Result<()> {
    msg!(
        "NFT token account {} ready for {}",
        ctx.accounts.user_nft_account.key(),
        ctx.accounts.user.key()
    );
    Ok(())
}

pub fn airdrop(ctx: Context<Airdrop>, amount: u64) -> Result<()> {
    validate_program_update_authority(&ctx.accounts.program_data, &ctx.accounts.funder)?;
    require!(amount > 0, CustomErrorCode::InvalidAmount);

    let base_units = to_base_units(amount, ctx.accounts.token_mint.decimals)?;

    let token_authority = Capability::token_authority(ctx.bumps.token_authority);
    let seeds = token_authority.seeds();
    let signer = &[&seeds[..]];
    let cpi_accounts = MintTo {
        mint: ctx.accounts.token_mint.to_account_info(),
        to: ctx.accounts.vault_token_account.to_account_info(),
        authority: ctx.accounts.token_authority.to_account_info(),
    };
    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            cpi_accounts,
            signer,
        ),
        base_units,
    )?;

    ctx.accounts.vault_token_account.reload()?;
    msg!(
        "Vault funded with {} base units, balance {}",
        base_units,
        ctx.accounts.vault_token_account.amount
    );
    emit!(VaultFunded {
        funder: ctx.accounts.funder.key(),
        amount: base_units,
        vault: ctx.accounts.vault_token_account.key(),
        balance: ctx.accounts.vault_token_account.amount,
    });

    Ok(())
}

pub fn mint_nft(ctx: Context<MintNft>) -> Result<()> {
    check_nft_mintable(
        ctx.accounts.nft_mint.supply,
        ctx.accounts.nft_mint.mint_authority,
        &ctx.accounts.nft_mint_authority.key(),
    )?;

    let nft_mint_authority = Capability::nft_mint_authority(ctx.bumps.nft_mint_authority);
    let seeds = nft_mint_authority.seeds();
    let signer = &[&seeds[..]];
    let cpi_accounts = MintTo {
        mint: ctx.accounts.nft_mint.to_account_info(),
        to: ctx.accounts.user_nft_account.to_account_info(),
        authority: ctx.accounts.nft_mint_authority.to_account_info(),
    };
    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            cpi_accounts,
            signer,
        ),
        NFT_SUPPLY_CAP,
    )?;

    msg!("NFT minted to {}", ctx.accounts.user_nft_account.key());
    emit!(NftMinted {
        user: ctx.accounts.user.key(),
        mint: ctx.accounts.nft_mint.key(),
        account: ctx.accounts.user_nft_account.key(),
    });

    Ok(())
}

pub fn change_auth(ctx: Context<ChangeAuth>) -> Result<()> {
    check_supply_fixable(
        ctx.accounts.nft_mint.supply,
        ctx.accounts.nft_mint.mint_authority,
        &ctx.accounts.nft_mint_authority.key(),
    )?;

    let nft_mint_authority = Capability::nft_mint_authority(ctx.bumps.nft_mint_authority);
    let seeds = nft_mint_authority.seeds();
    let signer = &[&seeds[..]];
    token::set_authority(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            SetAuthority {
                account_or_mint: ctx.accounts.nft_mint.to_account_info(),
                current_authority: ctx.accounts.nft_mint_authority.to_account_info(),
            },
            signer,
        ),
        AuthorityType::MintTokens,
        None,
    )?;

    msg!(
        "Mint authority of {} cleared, supply fixed at {}",
        ctx.accounts.nft_mint.key(),
        NFT_SUPPLY_CAP
    );
    emit!(NftSupplyFixed {
        mint: ctx.accounts.nft_mint.key(),
        supply: NFT_SUPPLY_CAP,
    });

    Ok(())
}

pub fn stake(ctx: Context<Stake>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let user = ctx.accounts.user.key();
    let nft_mint = ctx.accounts.nft_mint.key();
    let nft_account = ctx.accounts.user_nft_account.key();
    ctx.accounts
        .stake_info
        .begin(user, nft_account, now, ctx.bumps.stake_info)?;
    check_nft_lockable(
        ctx.accounts.user_nft_account.amount,
        ctx.accounts.user_nft_account.is_frozen(),
    )?;

    msg!("NFT {} staked by {} at {}", nft_mint, user, now);
    emit!(NftStaked {
        user,
        mint: nft_mint,
        stake_start: now,
    });

    Ok(())
}

pub fn freeze_user(ctx: Context<FreezeUser>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let stake_info = &mut ctx.accounts.stake_info;
    stake_info.check_holder(&ctx.accounts.user.key())?;
    stake_info.check_nft_account(&ctx.accounts.user_nft_account.key())?;
    stake_info.lock(now)?;
    // the account recorded at stake time may have been emptied since
    check_nft_lockable(
        ctx.accounts.user_nft_account.amount,
        ctx.accounts.user_nft_account.is_frozen(),
    )?;

    let vault_authority_key = ctx.accounts.vault_authority.key();
    let freeze_authority = ctx.accounts.nft_mint.freeze_authority;
    if freeze_authority == COption::Some(ctx.accounts.nft_mint_authority.key()) {
        let nft_mint_authority = Capability::nft_mint_authority(ctx.bumps.nft_mint_authority);
        let seeds = nft_mint_authority.seeds();
        let signer = &[&seeds[..]];
        token::set_authority(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                SetAuthority {
                    account_or_mint: ctx.accounts.nft_mint.to_account_info(),
                    current_authority: ctx.accounts.nft_mint_authority.to_account_info(),
                },
                signer,
            ),
            AuthorityType::FreezeAccount,
            Some(vault_authority_key),
        )?;
        msg!("Freeze authority delegated to {}", vault_authority_key);
    } else {
        // left delegated by a previous cycle that was never revoked
        require!(
            freeze_authority == COption::Some(vault_authority_key),
            CustomErrorCode::InvalidAuthority
        );
    }

    let vault_authority = Capability::vault_authority(ctx.bumps.vault_authority);
    let seeds = vault_authority.seeds();
    let signer = &[&seeds[..]];
    token::freeze_account(CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        FreezeAccount {
            account: ctx.accounts.user_nft_account.to_account_info(),
            mint: ctx.accounts.nft_mint.to_account_info(),
            authority: ctx.accounts.vault_authority.to_account_info(),
        },
        signer,
    ))?;

    msg!(
        "NFT account {} frozen by vault authority",
        ctx.accounts.user_nft_account.key()
    );
    emit!(NftFrozen {
        user: ctx.accounts.user.key(),
        account: ctx.accounts.user_nft_account.key(),
        freeze_authority: vault_authority_key,
    });

    Ok(())
}

pub fn unstake(ctx: Context<Unstake>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let stake_info = &mut ctx.accounts.stake_info;
    stake_info.check_holder(&ctx.accounts.user.key())?;
    stake_info.check_nft_account(&ctx.accounts.user_nft_account.key())?;
    stake_info.release(now)?;
    require!(
        ctx.accounts.user_nft_account.is_frozen(),
        CustomErrorCode::AccountNotFrozen
    );
    require!(
        ctx.accounts.nft_mint.freeze_authority
            == COption::Some(ctx.accounts.vault_authority.key()),
        CustomErrorCode::InvalidAuthority
    );

    let vault_authority = Capability::vault_authority(ctx.bumps.vault_authority);
    let seeds = vault_authority.seeds();
    let signer = &[&seeds[..]];
    token::thaw_account(CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        ThawAccount {
            account: ctx.accounts.user_nft_account.to_account_info(),
            mint: ctx.accounts.nft_mint.to_account_info(),
            authority: ctx.accounts.vault_authority.to_account_info(),
        },
        signer,
    ))?;

    let staked_for = now.saturating_sub(ctx.accounts.stake_info.stake_start);
    msg!(
        "NFT account {} thawed after {} seconds",
        ctx.accounts.user_nft_account.key(),
        staked_for
    );
    emit!(NftUnstaked {
        user: ctx.accounts.user.key(),
        account: ctx.accounts.user_nft_account.key(),
        staked_for,
    });

    Ok(())
}

pub fn revoke(ctx: Context<Revoke>) -> Result<()> {
    ctx.accounts
        .stake_info
        .check_holder(&ctx.accounts.user.key())?;
    ctx.accounts.stake_info.ensure_released()?;
    require!(
        ctx.accounts.nft_mint.freeze_authority
            == COption::Some(ctx.accounts.vault_authority.key()),
        CustomErrorCode::InvalidAuthority
    );

    let nft_mint_authority_key = ctx.accounts.nft_mint_authority.key();
    let vault_authority = Capability::vault_authority(ctx.bumps.vault_authority);
    let seeds = vault_authority.seeds();
    let signer = &[&seeds[..]];
    token::set_authority(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            SetAuthority {
                account_or_mint: ctx.accounts.nft_mint.to_account_info(),
                current_authority: ctx.accounts.vault_authority.to_account_info(),
            },
            signer,
        ),
        AuthorityType::FreezeAccount,
        Some(nft_mint_authority_key),
    )?;

    msg!(
        "Vault freeze authority over {} revoked",
        ctx.accounts.nft_mint.key()
    );
    emit!(FreezeAuthorityRevoked {
        user: ctx.accounts.user.key(),
        mint: ctx.accounts.nft_mint.key(),
        freeze_authority: nft_mint_authority_key,
    });

    Ok(())
}

pub fn disburse_rewards(ctx: Context<DisburseRewards>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let decimals = ctx.accounts.token_mint.decimals;
    ctx.accounts
        .stake_info
        .check_holder(&ctx.accounts.user.key())?;
    let reward = ctx.accounts.stake_info.payout(
        now,
        decimals,
        ctx.accounts.vault_token_account.amount,
    )?;

    let vault_authority = Capability::vault_authority(ctx.bumps.vault_authority);
    let seeds = vault_authority.seeds();
    let signer = &[&seeds[..]];
    let transfer_accounts = TransferChecked {
        from: ctx.accounts.vault_token_account.to_account_info(),
        mint: ctx.accounts.token_mint.to_account_info(),
        to: ctx.accounts.user_token_account.to_account_info(),
        authority: ctx.accounts.vault_authority.to_account_info(),
    };
    token::transfer_checked(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            transfer_accounts,
            signer,
        ),
        reward,
        decimals,
    )?;

    ctx.accounts.stake_info.settle(reward)?;
    let total_disbursed = ctx.accounts.stake_info.disbursed;

    msg!(
        "Disbursed {} base units, {} this cycle",
        reward,
        total_disbursed
    );
    emit!(RewardsDisbursed {
        user: ctx.accounts.user.key(),
        amount: reward,
        mint: ctx.accounts.token_mint.key(),
        vault: ctx.accounts.vault_token_account.key(),
        total_disbursed,
    });

    Ok(())
}

// Creates a program-owned account at a PDA. An address that was pre-funded with
// lamports cannot go through create_account, so it is topped up, allocated and
// assigned instead.
fn create_pda_account<'info>(
    payer: &Signer<'info>,
    target: &AccountInfo<'info>,
    capability: &Capability,
    space: usize,
    owner: &Pubkey,
    system: &Program<'info, System>,
) -> Result<()> {
    let seeds = capability.seeds();
    let signer = &[&seeds[..]];
    let rent = Rent::get()?.minimum_balance(space);
    let current_lamports = target.lamports();

    if current_lamports == 0 {
        return system_program::create_account(
            CpiContext::new_with_signer(
                system.to_account_info(),
                system_program::CreateAccount {
                    from: payer.to_account_info(),
                    to: target.clone(),
                },
                signer,
            ),
            rent,
            space as u64,
            owner,
        );
    }

    let top_up = rent.saturating_sub(current_lamports);
    if top_up > 0 {
        system_program::transfer(
            CpiContext::new(
                system.to_account_info(),
                system_program::Transfer {
                    from: payer.to_account_info(),
                    to: target.clone(),
                },
            ),
            top_up,
        )?;
    }
    system_program::allocate(
        CpiContext::new_with_signer(
            system.to_account_info(),
            system_program::Allocate {
                account_to_allocate: target.clone(),
            },
            signer,
        ),
        space as u64,
    )?;
    system_program::assign(
        CpiContext::new_with_signer(
            system.to_account_info(),
            system_program::Assign {
                account_to_assign: target.clone(),
            },
            signer,
        ),
        owner,
    )
}
