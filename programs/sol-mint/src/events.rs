use anchor_lang::prelude::*;

#[event]
pub struct MintEvent {
    pub minter: Pubkey,
    pub recipient: Pubkey,
    pub value: u64,
    pub token_id: u64,
}

#[event]
pub struct DepositEvent {
    pub owner: Pubkey,
    pub beneficiary: Pubkey,
    pub share_bps: u16,
    pub amount: u64,
    pub vault: Pubkey,
}

#[event]
pub struct VaultProvisioned {
    pub vault: Pubkey,
    pub owner: Pubkey,
    pub beneficiary: Pubkey,
}

#[event]
pub struct PoolRegistered {
    pub pool: Pubkey,
    pub token_in: Pubkey,
    pub token_out: Pubkey,
    pub fee_tier: u32,
}

#[event]
pub struct FeeConfigUpdated {
    pub platform_fee_bps: u16,
    pub platform_fee_recipient: Pubkey,
    pub creator: Pubkey,
}

#[event]
pub struct PlatformAdministratorsUpdated {
    pub count: u64,
}
