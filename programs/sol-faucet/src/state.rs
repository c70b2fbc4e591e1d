use anchor_lang::prelude::*;

/// Singleton faucet registry - PDA seeds: [b"faucet_config"]
///
/// Explicit admin-guarded state: the set of mints the faucet may batch-mint
/// and the allowlist of callers permitted to trigger a batch. Both lists are
/// mutated only through guarded setters that emit audit events.
#[account]
pub struct FaucetConfig {
    /// Mints eligible for batch minting.
    pub tokens: Vec<Pubkey>,

    /// Addresses permitted to call the batch mint entry points.
    pub minters: Vec<Pubkey>,

    /// Canonical bump for cheap PDA re-derivation
    pub bump: u8,
}

impl FaucetConfig {
    pub const MAX_TOKENS: usize = 16;
    pub const MAX_MINTERS: usize = 8;

    // The vectors have max lengths of 16 and 8 and must include the Borsh
    // overhead of 4 bytes for the length prefix.
    pub const LEN: usize = 8 + (4 + (32 * 16)) + (4 + (32 * 8)) + 1;
}

/// Derives the faucet's mint authority PDA. Pure, so off-chain tooling can
/// probe whether a given mint has been adopted without a program call.
pub fn faucet_mint_authority() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[b"mint_authority"], &crate::ID)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mint_authority_is_deterministic() {
        let (first, first_bump) = faucet_mint_authority();
        let (second, second_bump) = faucet_mint_authority();
        assert_eq!(first, second);
        assert_eq!(first_bump, second_bump);
    }
}
