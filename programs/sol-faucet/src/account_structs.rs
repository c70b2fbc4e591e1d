use crate::error::*;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token};

use anchor_lang::solana_program::bpf_loader_upgradeable::{self};

#[derive(Accounts)]
pub struct InitializeFaucet<'info> {
    #[account(
        init,
        payer = signer,
        space = FaucetConfig::LEN,
        seeds = [b"faucet_config"],
        bump
    )]
    pub config: Account<'info, FaucetConfig>,

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
pub struct UpdateRegistry<'info> {
    #[account(
        mut,
        seeds = [b"faucet_config"],
        bump = config.bump
    )]
    pub config: Account<'info, FaucetConfig>,

    /// CHECK: This is the program data account that contains the update authority
    #[account(
        constraint = program_data.key() == get_program_data_address(&crate::id()) @ CustomErrorCode::InvalidProgramData
    )]
    pub program_data: UncheckedAccount<'info>,

    pub signer: Signer<'info>,
}

#[derive(Accounts)]
pub struct AdoptMint<'info> {
    #[account(
        seeds = [b"faucet_config"],
        bump = config.bump
    )]
    pub config: Account<'info, FaucetConfig>,

    #[account(mut)]
    pub mint: Account<'info, Mint>,

    /// CHECK: This is a PDA that takes over as the mint authority, validated
    /// by seeds constraint
    #[account(
        seeds = [b"mint_authority"],
        bump
    )]
    pub mint_authority: UncheckedAccount<'info>,

    /// The mint's current authority, handing the mint to the faucet.
    pub current_authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// Accounts common to all batch-mint variants. The actual (mint, recipient
/// token account) pairs travel in remaining accounts so one call can cover a
/// variable-size token set.
#[derive(Accounts)]
pub struct BatchMint<'info> {
    #[account(
        seeds = [b"faucet_config"],
        bump = config.bump
    )]
    pub config: Account<'info, FaucetConfig>,

    /// CHECK: This is a PDA that acts as the mint authority for every
    /// adopted mint, validated by seeds constraint
    #[account(
        seeds = [b"mint_authority"],
        bump
    )]
    pub mint_authority: UncheckedAccount<'info>,

    pub minter: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

// Helper function to derive the program data address
fn get_program_data_address(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[program_id.as_ref()], &bpf_loader_upgradeable::id()).0
}
