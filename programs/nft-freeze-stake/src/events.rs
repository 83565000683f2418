use anchor_lang::prelude::*;

#[event]
pub struct FtMintCreated {
    pub mint: Pubkey,
    pub authority: Pubkey,
    pub decimals: u8,
}

#[event]
pub struct NftMintCreated {
    pub mint: Pubkey,
    pub authority: Pubkey,
}

#[event]
pub struct VaultCreated {
    pub vault: Pubkey,
    pub authority: Pubkey,
    pub mint: Pubkey,
}

#[event]
pub struct VaultFunded {
    pub funder: Pubkey,
    pub amount: u64,
    pub vault: Pubkey,
    pub balance: u64,
}

#[event]
pub struct NftMinted {
    pub user: Pubkey,
    pub mint: Pubkey,
    pub account: Pubkey,
}

#[event]
pub struct NftSupplyFixed {
    pub mint: Pubkey,
    pub supply: u64,
}

#[event]
pub struct NftStaked {
    pub user: Pubkey,
    pub mint: Pubkey,
    pub stake_start: i64,
}

#[event]
pub struct NftFrozen {
    pub user: Pubkey,
    pub account: Pubkey,
    pub freeze_authority: Pubkey,
}

#[event]
pub struct NftUnstaked {
    pub user: Pubkey,
    pub account: Pubkey,
    pub staked_for: i64,
}

#[event]
pub struct FreezeAuthorityRevoked {
    pub user: Pubkey,
    pub mint: Pubkey,
    pub freeze_authority: Pubkey,
}

#[event]
pub struct RewardsDisbursed {
    pub user: Pubkey,
    pub amount: u64,
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub total_disbursed: u64,
}
