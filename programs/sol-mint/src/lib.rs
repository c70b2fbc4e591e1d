pub mod account_structs;
/// # AQ Sol Mint - Settlement, Collectible Ledger and Deposit Vault Program
///
/// ## Business Process Flow
///
/// 1. Initial Setup:
///    - Admin creates two token types: Stable (USDC), Yield receipt (aqUSD)
///    - Admin initializes program with fee configuration and token addresses
///    - Admin registers swap pools (native or SPL input, stable output)
///
/// 2. Collectible Mint Flow:
///    a. Payment Phase:
///       - User pays in lamports, or an SPL token authorized by a signed permit
///       - System checks the swap path exists and the quoted stable output
///         clears the minimum-value gate
///    b. Settlement Phase:
///       - Stable proceeds are split between the platform fee recipient and
///         the creator in the same transaction
///       - A uniquely numbered ledger record fixes the economic facts
///
/// 3. Deposit Flow:
///    a. Vault Phase:
///       - Platform submits a user's signed permit for stable
///       - System derives the (owner, beneficiary) vault address and
///         provisions the vault on first use
///    b. Supply Phase:
///       - Stable is supplied into the lending vault
///       - Yield receipt tokens are credited 1:1 to the vault
///
/// 4. Administrative Functions:
///    - Update fee configuration and platform administrators
///    - Register additional pools
///    - Pause fund-moving entry points
///
/// Security is maintained through PDAs (Program Derived Addresses), strict
/// token authority controls, and single-use permit nonces. All token
/// operations are atomic and validated through Solana's transaction model.
pub mod error;
pub mod events;
pub mod fees;
mod guard;
pub mod permit;
pub mod processor;
pub mod quote;
pub mod state;

use account_structs::*;
use anchor_lang::prelude::*;
use permit::PermitRequest;

declare_id!("5koWh4kaRzXgg8RtNemrX1KtSaRY23NekaqMaTjy2CDp");

#[program]
pub mod aq_sol_mint {
    use super::*;

    /// Initializes the program with the fee configuration and the token
    /// addresses:
    /// - stable_mint: settlement currency all proceeds are denominated in
    /// - yield_mint: receipt token minted 1:1 against supplied stable
    /// Consumes ledger id 0; the first user-facing mint is id 1.
    pub fn initialize(
        ctx: Context<Initialize>,
        creator: Pubkey,
        platform_fee_recipient: Pubkey,
        platform_fee_bps: u16,
        platform_administrators: Vec<Pubkey>,
    ) -> Result<()> {
        processor::initialize(
            ctx,
            creator,
            platform_fee_recipient,
            platform_fee_bps,
            platform_administrators,
        )
    }

    /// Registers a swap path (token_in -> stable) at a posted price.
    /// `token_in` of all zeros registers the native (lamport) path.
    pub fn register_pool(
        ctx: Context<RegisterPool>,
        token_in: Pubkey,
        fee_tier: u32,
        price_num: u64,
        price_den: u64,
    ) -> Result<()> {
        processor::register_pool(ctx, token_in, fee_tier, price_num, price_den)
    }

    /// Mints a collectible paid in lamports:
    /// - Checks the native pool exists, then gates on the quoted stable output
    /// - Swaps through the pool and splits proceeds between platform and creator
    /// - Issues the next ledger record to the payer
    pub fn mint_with_native(
        ctx: Context<MintWithNative>,
        amount_in: u64,
        fee_tier: u32,
    ) -> Result<()> {
        processor::mint_with_native(ctx, amount_in, fee_tier)
    }

    /// Mints a collectible paid in an SPL token under a signed permit. A
    /// relayer may submit the transaction; the token owner only signs the
    /// permit message. The owner receives the collectible.
    pub fn mint_with_token(
        ctx: Context<MintWithToken>,
        fee_tier: u32,
        permit: PermitRequest,
    ) -> Result<()> {
        processor::mint_with_token(ctx, fee_tier, permit)
    }

    /// Supplies permitted stable into the lending vault on behalf of a user:
    /// - Derives and lazily provisions the (owner, beneficiary) vault
    /// - Credits yield receipt tokens 1:1 to the vault
    /// - Accumulates the deposited amount and records the yield share split
    pub fn deposit(
        ctx: Context<Deposit>,
        yield_share_bps: u16,
        permit: PermitRequest,
    ) -> Result<()> {
        processor::deposit(ctx, yield_share_bps, permit)
    }

    pub fn set_fee_config(
        ctx: Context<SetFeeConfig>,
        platform_fee_bps: u16,
        platform_fee_recipient: Pubkey,
        creator: Pubkey,
    ) -> Result<()> {
        processor::set_fee_config(ctx, platform_fee_bps, platform_fee_recipient, creator)
    }

    pub fn update_platform_administrators(
        ctx: Context<UpdatePlatformAdministrators>,
        new_administrators: Vec<Pubkey>,
    ) -> Result<()> {
        processor::update_platform_administrators(ctx, new_administrators)
    }

    pub fn set_paused(ctx: Context<Pause>, paused: bool) -> Result<()> {
        processor::set_paused(ctx, paused)
    }
}
