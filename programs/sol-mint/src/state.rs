use anchor_lang::prelude::*;

use crate::fees::BasisPoints;

/// Marker for the native (lamport) side of a pool. Mirrors the zero-address
/// convention used by the web front end when it requests a native-in swap.
pub const NATIVE_MARKER: Pubkey = Pubkey::new_from_array([0u8; 32]);

/// Token id consumed by `initialize` itself. The first user-facing mint is 1.
pub const GENESIS_TOKEN_ID: u64 = 0;
pub const GENESIS_TOKEN_ID_BYTES: [u8; 8] = [0u8; 8];

#[account]
pub struct Config {
    /// Stable settlement mint (e.g., USDC). All proceeds are denominated in it.
    pub stable_mint: Pubkey,
    /// Yield receipt mint credited 1:1 against supplied stable.
    pub yield_mint: Pubkey,
    /// Token account that holds supplied stable; owned by the vault_authority PDA.
    pub lending_vault: Pubkey,
    pub creator: Pubkey,
    pub platform_fee_recipient: Pubkey,
    pub platform_fee_bps: BasisPoints,
    /// Signers allowed to call `deposit` on behalf of users.
    pub platform_administrators: Vec<Pubkey>,
    pub next_token_id: u64,
    pub bump: u8,
    pub paused: bool,
}

impl Config {
    pub const MAX_ADMINISTRATORS: usize = 5;

    // The administrators vector has a max length of 5 and must include the
    // Borsh overhead of 4 bytes for the length prefix.
    pub const LEN: usize = 8 + 32 + 32 + 32 + 32 + 32 + 2 + (4 + (32 * 5)) + 8 + 1 + 1;
}

/// A registered swap path. `token_in == NATIVE_MARKER` means the input leg is
/// paid in lamports into the pool account itself; otherwise `input_vault`
/// receives the input tokens. `stable_vault` pays out the stable proceeds.
#[account]
pub struct Pool {
    pub token_in: Pubkey,
    pub token_out: Pubkey,
    pub fee_tier: u32,
    /// Posted execution price: out = in * price_num / price_den.
    pub price_num: u64,
    pub price_den: u64,
    /// NATIVE_MARKER when the input leg is lamports.
    pub input_vault: Pubkey,
    pub stable_vault: Pubkey,
    pub bump: u8,
}

impl Pool {
    pub const LEN: usize = 8 + 32 + 32 + 4 + 8 + 8 + 32 + 32 + 1;

    pub fn address(token_in: &Pubkey, token_out: &Pubkey, fee_tier: u32) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[
                b"pool",
                token_in.as_ref(),
                token_out.as_ref(),
                &fee_tier.to_le_bytes(),
            ],
            &crate::ID,
        )
    }
}

/// Write-once economic facts of a single mint. The record is the collectible
/// ledger entry; `owner` starts as the payer and moves with transfers.
#[account]
pub struct MintRecord {
    pub token_id: u64,
    pub owner: Pubkey,
    pub payer: Pubkey,
    pub creator: Pubkey,
    /// Gross stable proceeds received for this mint.
    pub value: u64,
    pub platform_fee: u64,
    pub minted_at: i64,
    pub bump: u8,
}

impl MintRecord {
    pub const LEN: usize = 8 + 8 + 32 + 32 + 32 + 8 + 8 + 8 + 1;
}

/// Per-(owner, beneficiary) deposit vault. The address is derived before the
/// account exists; `provisioned` flips exactly once on first deposit.
#[account]
pub struct Vault {
    pub owner: Pubkey,
    pub beneficiary: Pubkey,
    /// Cumulative stable supplied. Accumulates across deposits, never resets.
    pub deposited: u64,
    /// Yield split attributed to the beneficiary. Last deposit wins.
    pub yield_share_bps: BasisPoints,
    pub provisioned: bool,
    pub bump: u8,
}

impl Vault {
    pub const LEN: usize = 8 + 32 + 32 + 8 + 2 + 1 + 1;
}

/// Derives the vault address for an (owner, beneficiary) pair. Pure: no chain
/// state is consulted, so a front end can show the address before the first
/// deposit materializes the account.
pub fn vault_address(owner: &Pubkey, beneficiary: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[b"vault", owner.as_ref(), beneficiary.as_ref()],
        &crate::ID,
    )
}

/// Empty marker account, existence = the (owner, nonce) permit was consumed.
#[account]
pub struct PermitNonce {}

impl PermitNonce {
    pub const LEN: usize = 8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vault_address_is_deterministic() {
        let owner = Pubkey::new_unique();
        let beneficiary = Pubkey::new_unique();

        let (first, first_bump) = vault_address(&owner, &beneficiary);
        let (second, second_bump) = vault_address(&owner, &beneficiary);

        assert_eq!(first, second);
        assert_eq!(first_bump, second_bump);
    }

    #[test]
    fn vault_address_depends_on_pair_order() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();

        let (ab, _) = vault_address(&a, &b);
        let (ba, _) = vault_address(&b, &a);

        assert_ne!(ab, ba);
    }

    #[test]
    fn vault_address_differs_per_pair() {
        let owner = Pubkey::new_unique();
        let (first, _) = vault_address(&owner, &Pubkey::new_unique());
        let (second, _) = vault_address(&owner, &Pubkey::new_unique());

        assert_ne!(first, second);
    }

    #[test]
    fn pool_address_is_keyed_by_path() {
        let stable = Pubkey::new_unique();
        let token = Pubkey::new_unique();

        let (native, _) = Pool::address(&NATIVE_MARKER, &stable, 3000);
        let (spl, _) = Pool::address(&token, &stable, 3000);
        let (other_tier, _) = Pool::address(&token, &stable, 500);

        assert_ne!(native, spl);
        assert_ne!(spl, other_tier);
        assert_eq!(Pool::address(&token, &stable, 3000).0, spl);
    }
}
