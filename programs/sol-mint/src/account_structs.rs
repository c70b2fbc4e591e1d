use crate::error::*;
use crate::permit::PermitRequest;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};

use anchor_lang::solana_program::bpf_loader_upgradeable::{self};
use anchor_lang::solana_program::sysvar::instructions::ID as IX_SYSVAR_ID;

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = signer,
        space = Config::LEN,
        seeds = [b"config"],
        bump
    )]
    pub config: Account<'info, Config>,

    pub stable_mint: Account<'info, Mint>,

    #[account(
        constraint = yield_mint.mint_authority == Some(mint_authority.key()).into() @ CustomErrorCode::InvalidMintAuthority
    )]
    pub yield_mint: Account<'info, Mint>,

    /// CHECK: This is a PDA that owns the lending vault token account,
    /// validated by seeds constraint. Supplied stable sits in that account
    /// and only this program can move it back out.
    #[account(
        seeds = [b"vault_authority"],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// CHECK: This is a PDA that acts as the yield mint authority, validated
    /// by seeds constraint
    #[account(
        seeds = [b"mint_authority"],
        bump
    )]
    pub mint_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = lending_vault.mint == stable_mint.key() @ CustomErrorCode::InvalidMint,
        constraint = (lending_vault.owner == signer.key() || lending_vault.owner == vault_authority.key()) @ CustomErrorCode::InvalidVaultAuthority
    )]
    pub lending_vault: Account<'info, TokenAccount>,

    /// Ledger entry 0, consumed by configuration itself. The first user mint
    /// is id 1.
    #[account(
        init,
        payer = signer,
        space = MintRecord::LEN,
        seeds = [b"mint_record", GENESIS_TOKEN_ID_BYTES.as_ref()],
        bump
    )]
    pub genesis_record: Account<'info, MintRecord>,

    #[account(mut)]
    pub signer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,

    /// CHECK: This is the program data account that contains the update authority
    #[account(
        constraint = program_data.key() == get_program_data_address(&crate::id()) @ CustomErrorCode::InvalidProgramData
    )]
    pub program_data: UncheckedAccount<'info>,
}

#[derive(Accounts)]
#[instruction(token_in: Pubkey, fee_tier: u32)]
pub struct RegisterPool<'info> {
    #[account(
        seeds = [b"config"],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = signer,
        space = Pool::LEN,
        seeds = [b"pool", token_in.as_ref(), config.stable_mint.as_ref(), fee_tier.to_le_bytes().as_ref()],
        bump
    )]
    pub pool: Account<'info, Pool>,

    /// CHECK: This is a PDA that owns the pool vault token accounts,
    /// validated by seeds constraint
    #[account(
        seeds = [b"pool_authority"],
        bump
    )]
    pub pool_authority: UncheckedAccount<'info>,

    #[account(
        constraint = stable_vault.mint == config.stable_mint @ CustomErrorCode::InvalidMint,
        constraint = stable_vault.owner == pool_authority.key() @ CustomErrorCode::InvalidVaultAuthority
    )]
    pub stable_vault: Account<'info, TokenAccount>,

    /// Input-side vault. Omitted for native pools, where the pool account
    /// itself receives the lamports.
    pub input_vault: Option<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub signer: Signer<'info>,

    pub system_program: Program<'info, System>,

    /// CHECK: This is the program data account that contains the update authority
    #[account(
        constraint = program_data.key() == get_program_data_address(&crate::id()) @ CustomErrorCode::InvalidProgramData
    )]
    pub program_data: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct MintWithNative<'info> {
    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    /// CHECK: Pool PDA for (native, stable, fee_tier). Probed and
    /// deserialized in the handler so that a missing pool surfaces as the
    /// no-pool error before any quote is attempted.
    #[account(mut)]
    pub pool: UncheckedAccount<'info>,

    /// CHECK: This is a PDA that owns the pool vault token accounts,
    /// validated by seeds constraint
    #[account(
        seeds = [b"pool_authority"],
        bump
    )]
    pub pool_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = stable_vault.mint == config.stable_mint @ CustomErrorCode::InvalidMint,
        constraint = stable_vault.owner == pool_authority.key() @ CustomErrorCode::InvalidVaultAuthority
    )]
    pub stable_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = platform_token_account.mint == config.stable_mint @ CustomErrorCode::InvalidMint,
        constraint = platform_token_account.owner == config.platform_fee_recipient @ CustomErrorCode::InvalidTokenOwner
    )]
    pub platform_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = creator_token_account.mint == config.stable_mint @ CustomErrorCode::InvalidMint,
        constraint = creator_token_account.owner == config.creator @ CustomErrorCode::InvalidTokenOwner
    )]
    pub creator_token_account: Account<'info, TokenAccount>,

    #[account(
        init,
        payer = payer,
        space = MintRecord::LEN,
        seeds = [b"mint_record", config.next_token_id.to_le_bytes().as_ref()],
        bump
    )]
    pub mint_record: Account<'info, MintRecord>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(fee_tier: u32, permit: PermitRequest)]
pub struct MintWithToken<'info> {
    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    /// CHECK: Pool PDA for (token_in, stable, fee_tier). Probed and
    /// deserialized in the handler so that a missing pool surfaces as the
    /// no-pool error before any quote is attempted.
    pub pool: UncheckedAccount<'info>,

    /// CHECK: This is a PDA that owns the pool vault token accounts,
    /// validated by seeds constraint
    #[account(
        seeds = [b"pool_authority"],
        bump
    )]
    pub pool_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = input_vault.owner == pool_authority.key() @ CustomErrorCode::InvalidVaultAuthority
    )]
    pub input_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = stable_vault.mint == config.stable_mint @ CustomErrorCode::InvalidMint,
        constraint = stable_vault.owner == pool_authority.key() @ CustomErrorCode::InvalidVaultAuthority
    )]
    pub stable_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = platform_token_account.mint == config.stable_mint @ CustomErrorCode::InvalidMint,
        constraint = platform_token_account.owner == config.platform_fee_recipient @ CustomErrorCode::InvalidTokenOwner
    )]
    pub platform_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = creator_token_account.mint == config.stable_mint @ CustomErrorCode::InvalidMint,
        constraint = creator_token_account.owner == config.creator @ CustomErrorCode::InvalidTokenOwner
    )]
    pub creator_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = owner_token_account.owner == permit.owner @ CustomErrorCode::InvalidTokenOwner
    )]
    pub owner_token_account: Account<'info, TokenAccount>,

    /// CHECK: This is a PDA that acts as the standing permit delegate,
    /// validated by seeds constraint
    #[account(
        seeds = [b"permit_authority"],
        bump
    )]
    pub permit_authority: UncheckedAccount<'info>,

    /// Marker whose creation consumes the (owner, nonce) pair. A second use
    /// of the same nonce fails here with "account already in use" before the
    /// instruction logic even runs.
    #[account(
        init,
        payer = payer,
        space = PermitNonce::LEN,
        seeds = [b"permit_nonce", permit.owner.as_ref(), permit.nonce.to_le_bytes().as_ref()],
        bump
    )]
    pub permit_nonce: Account<'info, PermitNonce>,

    #[account(
        init,
        payer = payer,
        space = MintRecord::LEN,
        seeds = [b"mint_record", config.next_token_id.to_le_bytes().as_ref()],
        bump
    )]
    pub mint_record: Account<'info, MintRecord>,

    /// Transaction fee payer. May be a relayer; the token owner authorizes
    /// the pull via the permit alone.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// CHECK: Instructions sysvar, used to introspect the Ed25519
    /// verification instruction; validated by address constraint
    #[account(address = IX_SYSVAR_ID)]
    pub instructions_sysvar: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(yield_share_bps: u16, permit: PermitRequest)]
pub struct Deposit<'info> {
    #[account(
        seeds = [b"config"],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    /// Platform administrator driving the deposit on the owner's behalf.
    #[account(mut)]
    pub platform: Signer<'info>,

    /// CHECK: Depositing owner. Not a transaction signer; authorization
    /// comes from the permit, whose owner field must match this key.
    #[account(
        constraint = owner.key() == permit.owner @ CustomErrorCode::InvalidPermitSignature
    )]
    pub owner: UncheckedAccount<'info>,

    /// CHECK: Beneficiary of the yield share. Only its key is read; it forms
    /// half of the vault derivation salt.
    pub beneficiary: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = platform,
        space = Vault::LEN,
        seeds = [b"vault", owner.key().as_ref(), beneficiary.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, Vault>,

    /// Marker whose creation consumes the (owner, nonce) pair.
    #[account(
        init,
        payer = platform,
        space = PermitNonce::LEN,
        seeds = [b"permit_nonce", permit.owner.as_ref(), permit.nonce.to_le_bytes().as_ref()],
        bump
    )]
    pub permit_nonce: Account<'info, PermitNonce>,

    #[account(
        mut,
        constraint = owner_stable_token_account.mint == config.stable_mint @ CustomErrorCode::InvalidMint,
        constraint = owner_stable_token_account.owner == permit.owner @ CustomErrorCode::InvalidTokenOwner
    )]
    pub owner_stable_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = lending_vault.key() == config.lending_vault @ CustomErrorCode::InvalidVaultAuthority
    )]
    pub lending_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = yield_mint.key() == config.yield_mint @ CustomErrorCode::InvalidMint
    )]
    pub yield_mint: Account<'info, Mint>,

    /// CHECK: This is a PDA that acts as the yield mint authority, validated
    /// by seeds constraint
    #[account(
        seeds = [b"mint_authority"],
        bump,
        constraint = mint_authority.key() == yield_mint.mint_authority.unwrap() @ CustomErrorCode::InvalidMintAuthority
    )]
    pub mint_authority: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = platform,
        associated_token::mint = yield_mint,
        associated_token::authority = vault
    )]
    pub vault_yield_token_account: Account<'info, TokenAccount>,

    /// CHECK: This is a PDA that acts as the standing permit delegate,
    /// validated by seeds constraint
    #[account(
        seeds = [b"permit_authority"],
        bump
    )]
    pub permit_authority: UncheckedAccount<'info>,

    /// CHECK: Instructions sysvar, used to introspect the Ed25519
    /// verification instruction; validated by address constraint
    #[account(address = IX_SYSVAR_ID)]
    pub instructions_sysvar: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct SetFeeConfig<'info> {
    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    /// CHECK: This is the program data account that contains the update authority
    #[account(
        constraint = program_data.key() == get_program_data_address(&crate::id()) @ CustomErrorCode::InvalidProgramData
    )]
    pub program_data: UncheckedAccount<'info>,

    pub signer: Signer<'info>,
}

#[derive(Accounts)]
pub struct UpdatePlatformAdministrators<'info> {
    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    /// CHECK: This is the program data account that contains the update authority
    #[account(
        constraint = program_data.key() == get_program_data_address(&crate::id()) @ CustomErrorCode::InvalidProgramData
    )]
    pub program_data: UncheckedAccount<'info>,

    pub signer: Signer<'info>,
}

#[derive(Accounts)]
pub struct Pause<'info> {
    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    /// CHECK: This is the program data account that contains the update authority
    #[account(
        constraint = program_data.key() == get_program_data_address(&crate::id()) @ CustomErrorCode::InvalidProgramData
    )]
    pub program_data: UncheckedAccount<'info>,

    pub signer: Signer<'info>,
}

// Helper function to derive the program data address
fn get_program_data_address(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[program_id.as_ref()], &bpf_loader_upgradeable::id()).0
}
