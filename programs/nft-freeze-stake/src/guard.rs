use crate::error::CustomErrorCode;
use anchor_lang::prelude::*;

#[allow(deprecated)]
use anchor_lang::solana_program::bpf_loader_upgradeable::UpgradeableLoaderState;

/// Only the program's upgrade authority may fund the reward vault.
pub fn validate_program_update_authority(
    program_data_account: &UncheckedAccount,
    authority: &Signer,
) -> Result<()> {
    let program_data = program_data_account
        .try_borrow_data()
        .map_err(|_| CustomErrorCode::InvalidProgramData)?;

    let update_authority = upgrade_authority(&program_data)?;
    require_keys_eq!(
        authority.key(),
        update_authority,
        CustomErrorCode::InvalidUpgradeAuthority
    );

    Ok(())
}

// Parse the upgradeable loader header of a ProgramData account.
fn upgrade_authority(program_data: &[u8]) -> Result<Pubkey> {
    let loader_state = bincode::deserialize::<UpgradeableLoaderState>(program_data)
        .map_err(|_| CustomErrorCode::InvalidProgramData)?;

    match loader_state {
        UpgradeableLoaderState::ProgramData {
            slot: _,
            upgrade_authority_address,
        } => upgrade_authority_address.ok_or_else(|| CustomErrorCode::NoUpgradeAuthority.into()),
        _ => Err(CustomErrorCode::InvalidProgramData.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::error_code;

    fn program_data(authority: Option<Pubkey>) -> Vec<u8> {
        let mut data = bincode::serialize(&UpgradeableLoaderState::ProgramData {
            slot: 42,
            upgrade_authority_address: authority,
        })
        .unwrap();
        // the program ELF follows the header
        data.extend_from_slice(&[0xAB; 64]);
        data
    }

    #[test]
    fn reads_upgrade_authority() {
        let authority = Pubkey::new_unique();
        assert_eq!(upgrade_authority(&program_data(Some(authority))).unwrap(), authority);
    }

    #[test]
    fn immutable_program_has_no_funder() {
        let err = upgrade_authority(&program_data(None)).unwrap_err();
        assert_eq!(error_code(err), u32::from(CustomErrorCode::NoUpgradeAuthority));
    }

    #[test]
    fn rejects_other_loader_states() {
        let data = bincode::serialize(&UpgradeableLoaderState::Program {
            programdata_address: Pubkey::new_unique(),
        })
        .unwrap();
        let err = upgrade_authority(&data).unwrap_err();
        assert_eq!(error_code(err), u32::from(CustomErrorCode::InvalidProgramData));

        let err = upgrade_authority(&[1, 2]).unwrap_err();
        assert_eq!(error_code(err), u32::from(CustomErrorCode::InvalidProgramData));
    }
}
