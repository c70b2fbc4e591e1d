use anchor_lang::prelude::*;

#[event]
pub struct BatchMintEvent {
    pub minter: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
    pub token_count: u64,
}

#[event]
pub struct BatchMintUnitsEvent {
    pub minter: Pubkey,
    pub recipient: Pubkey,
    pub units: u64,
    pub token_count: u64,
}

#[event]
pub struct BatchMintWithAmountsEvent {
    pub minter: Pubkey,
    pub recipient: Pubkey,
    pub token_count: u64,
}

#[event]
pub struct TokensSet {
    pub token_count: u64,
}

#[event]
pub struct MintersSet {
    pub minter_count: u64,
}

#[event]
pub struct MintAdopted {
    pub mint: Pubkey,
}
