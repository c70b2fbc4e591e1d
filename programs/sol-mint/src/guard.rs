use anchor_lang::prelude::*;
use anchor_lang::solana_program::bpf_loader_upgradeable::UpgradeableLoaderState;

use crate::error::CustomErrorCode;

/// Validates that `signer` is the program's upgrade authority by reading the
/// ProgramData account of the upgradeable loader. Admin-only instructions are
/// gated on this instead of a stored admin key.
pub fn validate_program_update_authority(
    program_data: &UncheckedAccount,
    signer: &Signer,
) -> Result<()> {
    let data = program_data.try_borrow_data()?;
    let state: UpgradeableLoaderState =
        bincode::deserialize(&data).map_err(|_| CustomErrorCode::InvalidProgramData)?;

    match state {
        UpgradeableLoaderState::ProgramData {
            upgrade_authority_address,
            ..
        } => {
            let authority =
                upgrade_authority_address.ok_or(CustomErrorCode::NoUpgradeAuthority)?;
            require_keys_eq!(
                authority,
                signer.key(),
                CustomErrorCode::InvalidUpgradeAuthority
            );
            Ok(())
        }
        _ => err!(CustomErrorCode::InvalidProgramData),
    }
}
