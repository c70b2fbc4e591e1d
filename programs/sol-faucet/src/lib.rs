pub mod account_structs;
/// # AQ Sol Faucet - Batch Mint Faucet for Test Environments
///
/// ## Business Process Flow
///
/// 1. Initial Setup:
///    - Admin initializes the faucet with a registered token set and a
///      minter allowlist
///    - Each token's current mint authority hands the mint over to the
///      faucet's mint authority PDA
///
/// 2. Batch Mint Flow:
///    - An allowlisted minter requests a batch for one recipient across the
///      registered token set, passing (mint, recipient token account) pairs
///    - Amounts are uniform, per-token, or whole units scaled by each
///      token's own decimals
///    - Any unregistered or unadopted token fails the whole batch; off-chain
///      tooling is expected to probe capabilities first and exclude
///      unmintable tokens from the call
///
/// 3. Administrative Functions:
///    - Replace the registered token set or minter allowlist
///
/// Security is maintained through PDAs (Program Derived Addresses) and the
/// program update authority gate on registry mutations. All token operations
/// are atomic and validated through Solana's transaction model.
pub mod capability;
pub mod error;
pub mod events;
mod guard;
pub mod processor;
pub mod state;

use account_structs::*;
use anchor_lang::prelude::*;

declare_id!("Hxpc2YaAFLEMUxjMYr8tQnevcWrwroyE9RvT3qtfVywu");

#[program]
pub mod aq_sol_faucet {
    use super::*;

    /// One-time setup: creates the FaucetConfig PDA with the registered
    /// token set and minter allowlist.
    pub fn initialize_faucet(
        ctx: Context<InitializeFaucet>,
        tokens: Vec<Pubkey>,
        minters: Vec<Pubkey>,
    ) -> Result<()> {
        processor::initialize_faucet(ctx, tokens, minters)
    }

    /// Replaces the registered token set. Emits TokensSet.
    pub fn set_tokens(ctx: Context<UpdateRegistry>, new_tokens: Vec<Pubkey>) -> Result<()> {
        processor::set_tokens(ctx, new_tokens)
    }

    /// Replaces the minter allowlist. Emits MintersSet.
    pub fn set_minters(ctx: Context<UpdateRegistry>, new_minters: Vec<Pubkey>) -> Result<()> {
        processor::set_minters(ctx, new_minters)
    }

    /// Hands an SPL mint's authority over to the faucet so it can be
    /// included in batches.
    pub fn adopt_mint(ctx: Context<AdoptMint>) -> Result<()> {
        processor::adopt_mint(ctx)
    }

    /// Mints per-token raw amounts to one recipient across the passed
    /// (mint, recipient token account) pairs.
    pub fn batch_mint_with_amounts<'info>(
        ctx: Context<'_, '_, 'info, 'info, BatchMint<'info>>,
        recipient: Pubkey,
        amounts: Vec<u64>,
    ) -> Result<()> {
        processor::batch_mint_with_amounts(ctx, recipient, amounts)
    }

    /// Mints the same raw amount of every passed token to one recipient.
    pub fn batch_mint_same<'info>(
        ctx: Context<'_, '_, 'info, 'info, BatchMint<'info>>,
        recipient: Pubkey,
        amount: u64,
    ) -> Result<()> {
        processor::batch_mint_same(ctx, recipient, amount)
    }

    /// Mints `units` whole tokens of every passed token to one recipient,
    /// scaling by each token's own decimals.
    pub fn batch_mint_same_units<'info>(
        ctx: Context<'_, '_, 'info, 'info, BatchMint<'info>>,
        recipient: Pubkey,
        units: u64,
    ) -> Result<()> {
        processor::batch_mint_same_units(ctx, recipient, units)
    }
}
