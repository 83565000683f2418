use anchor_lang::prelude::*;

pub const TOKEN_MINT_SEED: &[u8] = b"token-mint";
pub const NFT_MINT_SEED: &[u8] = b"nft-mint";
pub const TOKEN_AUTHORITY_SEED: &[u8] = b"token-authority";
pub const NFT_MINT_AUTHORITY_SEED: &[u8] = b"nfttoken-authority";
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault-authority";
pub const VAULT_SEED: &[u8] = b"vault";
pub const STAKE_INFO_SEED: &[u8] = b"nft-info";

/// Right to sign as a keyless program derived address.
///
/// Handlers build one from the bump Anchor verified for the account and hand it to
/// the single CPI that needs the signature. The label and bump are the derivation
/// proof the runtime checks when the program signs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capability {
    label: &'static [u8],
    bump: [u8; 1],
}

impl Capability {
    pub fn new(label: &'static [u8], bump: u8) -> Self {
        Self {
            label,
            bump: [bump],
        }
    }

    pub fn token_mint(bump: u8) -> Self {
        Self::new(TOKEN_MINT_SEED, bump)
    }

    pub fn nft_mint(bump: u8) -> Self {
        Self::new(NFT_MINT_SEED, bump)
    }

    pub fn token_authority(bump: u8) -> Self {
        Self::new(TOKEN_AUTHORITY_SEED, bump)
    }

    pub fn nft_mint_authority(bump: u8) -> Self {
        Self::new(NFT_MINT_AUTHORITY_SEED, bump)
    }

    pub fn vault_authority(bump: u8) -> Self {
        Self::new(VAULT_AUTHORITY_SEED, bump)
    }

    pub fn vault(bump: u8) -> Self {
        Self::new(VAULT_SEED, bump)
    }

    pub fn seeds(&self) -> [&[u8]; 2] {
        [self.label, &self.bump]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: [&[u8]; 7] = [
        TOKEN_MINT_SEED,
        NFT_MINT_SEED,
        TOKEN_AUTHORITY_SEED,
        NFT_MINT_AUTHORITY_SEED,
        VAULT_AUTHORITY_SEED,
        VAULT_SEED,
        STAKE_INFO_SEED,
    ];

    fn canonical(label: &[u8]) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[label], &crate::ID)
    }

    #[test]
    fn seeds_sign_for_canonical_address() {
        let (address, bump) = canonical(VAULT_AUTHORITY_SEED);
        let cap = Capability::vault_authority(bump);
        assert_eq!(
            Pubkey::create_program_address(&cap.seeds(), &crate::ID).unwrap(),
            address
        );
        assert_eq!(cap, Capability::new(VAULT_AUTHORITY_SEED, bump));
    }

    #[test]
    fn labels_map_to_distinct_offcurve_addresses() {
        let addresses: Vec<Pubkey> = LABELS.iter().map(|label| canonical(label).0).collect();
        for (i, a) in addresses.iter().enumerate() {
            assert!(!a.is_on_curve());
            for b in &addresses[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn address_depends_on_program() {
        let other = Pubkey::new_unique();
        assert_ne!(
            canonical(TOKEN_AUTHORITY_SEED).0,
            Pubkey::find_program_address(&[TOKEN_AUTHORITY_SEED], &other).0
        );
    }

    #[test]
    fn seeds_carry_label_and_bump() {
        let cap = Capability::nft_mint_authority(254);
        let seeds = cap.seeds();
        assert_eq!(seeds[0], NFT_MINT_AUTHORITY_SEED);
        assert_eq!(seeds[1], &[254u8][..]);
    }

    #[test]
    fn wrong_bump_does_not_sign_for_canonical_address() {
        let (address, bump) = canonical(VAULT_SEED);
        let forged = Capability::vault(bump.wrapping_add(1));
        if let Ok(other) = Pubkey::create_program_address(&forged.seeds(), &crate::ID) {
            assert_ne!(other, address);
        }
    }
}
