use anchor_lang::prelude::*;

#[error_code]
pub enum CustomErrorCode {
    #[msg("Account is already initialized")]
    AlreadyInitialized = 1,
    #[msg("NFT supply cap of one already reached")]
    SupplyCapExceeded = 2,
    #[msg("Signer is not the owner of the stake")]
    Unauthorized = 3,
    #[msg("NFT is not staked")]
    NotStaked = 4,
    #[msg("NFT is already staked")]
    AlreadyStaked = 5,
    #[msg("NFT account is not frozen")]
    AccountNotFrozen = 6,
    #[msg("NFT account is already frozen")]
    AlreadyFrozen = 7,
    #[msg("Insufficient vault balance")]
    InsufficientVaultBalance = 8,
    #[msg("Invalid authority")]
    InvalidAuthority = 9,

    #[msg("Invalid amount")]
    InvalidAmount = 10,
    #[msg("Too many decimals for the reward mint")]
    InvalidDecimals = 11,
    #[msg("Invalid mint provided")]
    InvalidMint = 12,
    #[msg("The NFT has not been minted yet")]
    NftNotMinted = 13,
    #[msg("Token account does not hold the NFT")]
    NftNotHeld = 14,
    #[msg("NFT account does not match the stake record")]
    NftAccountMismatch = 15,
    #[msg("Stake is still active")]
    StakeStillActive = 16,
    #[msg("No rewards accrued")]
    NoRewardsAccrued = 17,
    #[msg("Arithmetic overflow")]
    MathOverflow = 18,

    #[msg("ProgramData account did not match expected PDA.")]
    InvalidProgramData = 19,
    #[msg("Program has no upgrade authority (set to None).")]
    NoUpgradeAuthority = 20,
    #[msg("Signer is not the upgrade authority.")]
    InvalidUpgradeAuthority = 21,
}

#[cfg(test)]
pub(crate) fn error_code(err: anchor_lang::error::Error) -> u32 {
    match err {
        anchor_lang::error::Error::AnchorError(e) => e.error_code_number,
        anchor_lang::error::Error::ProgramError(e) => panic!("expected an anchor error, got {:?}", e),
    }
}
