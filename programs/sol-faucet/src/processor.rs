use crate::account_structs::*;
use crate::capability::{mint_capability, Capability};
use crate::error::*;
use crate::events::*;
use crate::guard::validate_program_update_authority;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token::spl_token::instruction::AuthorityType;
use anchor_spl::token::{self, Mint, MintTo, TokenAccount};

pub fn initialize_faucet(
    ctx: Context<InitializeFaucet>,
    tokens: Vec<Pubkey>,
    minters: Vec<Pubkey>,
) -> Result<()> {
    validate_program_update_authority(&ctx.accounts.program_data, &ctx.accounts.signer)?;

    require!(
        tokens.len() <= FaucetConfig::MAX_TOKENS,
        CustomErrorCode::TooManyTokens
    );
    require!(
        minters.len() <= FaucetConfig::MAX_MINTERS,
        CustomErrorCode::TooManyMinters
    );

    let config = &mut ctx.accounts.config;
    config.tokens = tokens;
    config.minters = minters;
    config.bump = ctx.bumps.config;

    msg!(
        "Faucet initialized with {} tokens and {} minters",
        config.tokens.len(),
        config.minters.len()
    );
    Ok(())
}

// Replace the registered token set (only program update authority can do this)
pub fn set_tokens(ctx: Context<UpdateRegistry>, new_tokens: Vec<Pubkey>) -> Result<()> {
    validate_program_update_authority(&ctx.accounts.program_data, &ctx.accounts.signer)?;

    require!(
        new_tokens.len() <= FaucetConfig::MAX_TOKENS,
        CustomErrorCode::TooManyTokens
    );

    let config = &mut ctx.accounts.config;
    config.tokens = new_tokens;

    emit!(TokensSet {
        token_count: config.tokens.len() as u64,
    });
    Ok(())
}

// Replace the minter allowlist (only program update authority can do this)
pub fn set_minters(ctx: Context<UpdateRegistry>, new_minters: Vec<Pubkey>) -> Result<()> {
    validate_program_update_authority(&ctx.accounts.program_data, &ctx.accounts.signer)?;

    require!(
        new_minters.len() <= FaucetConfig::MAX_MINTERS,
        CustomErrorCode::TooManyMinters
    );

    let config = &mut ctx.accounts.config;
    config.minters = new_minters;

    emit!(MintersSet {
        minter_count: config.minters.len() as u64,
    });
    Ok(())
}

/// The current mint authority hands an SPL mint over to the faucet's mint
/// authority PDA, after which the faucet can include it in batches.
pub fn adopt_mint(ctx: Context<AdoptMint>) -> Result<()> {
    token::set_authority(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            token::SetAuthority {
                account_or_mint: ctx.accounts.mint.to_account_info(),
                current_authority: ctx.accounts.current_authority.to_account_info(),
            },
        ),
        AuthorityType::MintTokens,
        Some(ctx.accounts.mint_authority.key()),
    )?;

    msg!("Adopted mint {}", ctx.accounts.mint.key());
    emit!(MintAdopted {
        mint: ctx.accounts.mint.key(),
    });
    Ok(())
}

pub fn batch_mint_with_amounts<'info>(
    ctx: Context<'_, '_, 'info, 'info, BatchMint<'info>>,
    recipient: Pubkey,
    amounts: Vec<u64>,
) -> Result<()> {
    let token_count = run_batch(&ctx, recipient, BatchAmounts::PerToken(&amounts))?;

    emit!(BatchMintWithAmountsEvent {
        minter: ctx.accounts.minter.key(),
        recipient,
        token_count,
    });
    Ok(())
}

pub fn batch_mint_same<'info>(
    ctx: Context<'_, '_, 'info, 'info, BatchMint<'info>>,
    recipient: Pubkey,
    amount: u64,
) -> Result<()> {
    let token_count = run_batch(&ctx, recipient, BatchAmounts::SameRaw(amount))?;

    emit!(BatchMintEvent {
        minter: ctx.accounts.minter.key(),
        recipient,
        amount,
        token_count,
    });
    Ok(())
}

pub fn batch_mint_same_units<'info>(
    ctx: Context<'_, '_, 'info, 'info, BatchMint<'info>>,
    recipient: Pubkey,
    units: u64,
) -> Result<()> {
    let token_count = run_batch(&ctx, recipient, BatchAmounts::SameUnits(units))?;

    emit!(BatchMintUnitsEvent {
        minter: ctx.accounts.minter.key(),
        recipient,
        units,
        token_count,
    });
    Ok(())
}

enum BatchAmounts<'a> {
    /// One raw amount per token, positionally matched.
    PerToken(&'a [u64]),
    /// The same raw amount for every token.
    SameRaw(u64),
    /// Whole units, scaled by each token's own decimals.
    SameUnits(u64),
}

/// Mints across every (mint, recipient token account) pair in remaining
/// accounts. All-or-nothing: any unregistered token, unadopted mint, or bad
/// pair fails the whole transaction.
fn run_batch<'info>(
    ctx: &Context<'_, '_, 'info, 'info, BatchMint<'info>>,
    recipient: Pubkey,
    amounts: BatchAmounts,
) -> Result<u64> {
    require!(
        recipient != Pubkey::default(),
        CustomErrorCode::ZeroRecipient
    );
    require!(
        ctx.accounts
            .config
            .minters
            .contains(&ctx.accounts.minter.key()),
        CustomErrorCode::UnauthorizedMinter
    );

    let pairs = ctx.remaining_accounts;
    require!(pairs.len() % 2 == 0, CustomErrorCode::UnpairedAccounts);
    let token_count = pairs.len() / 2;

    if let BatchAmounts::PerToken(per_token) = &amounts {
        require!(
            per_token.len() == token_count,
            CustomErrorCode::LengthMismatch
        );
    }

    let faucet_authority = ctx.accounts.mint_authority.key();
    let bump = ctx.bumps.mint_authority;
    let seeds: &[&[u8]] = &[b"mint_authority", &[bump]];
    let signer = &[&seeds[..]];

    for (i, pair) in pairs.chunks(2).enumerate() {
        let mint_info = &pair[0];
        let destination_info = &pair[1];

        let mint = Account::<Mint>::try_from(mint_info)?;
        require!(
            ctx.accounts.config.tokens.contains(&mint_info.key()),
            CustomErrorCode::TokenNotRegistered
        );
        require!(
            mint_capability(&mint.mint_authority, &faucet_authority) == Capability::Supported,
            CustomErrorCode::NotMintAuthority
        );

        let destination = Account::<TokenAccount>::try_from(destination_info)?;
        require!(
            destination.mint == mint_info.key(),
            CustomErrorCode::InvalidMint
        );
        require!(
            destination.owner == recipient,
            CustomErrorCode::InvalidTokenOwner
        );

        let amount = match &amounts {
            BatchAmounts::PerToken(per_token) => per_token[i],
            BatchAmounts::SameRaw(amount) => *amount,
            BatchAmounts::SameUnits(units) => scaled_amount(*units, mint.decimals)?,
        };

        token::mint_to(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                MintTo {
                    mint: mint_info.clone(),
                    to: destination_info.clone(),
                    authority: ctx.accounts.mint_authority.to_account_info(),
                },
                signer,
            ),
            amount,
        )?;
    }

    Ok(token_count as u64)
}

/// units * 10^decimals, checked. Keeps whole-token requests honest across
/// mixed-decimal token sets in a single batch.
pub fn scaled_amount(units: u64, decimals: u8) -> Result<u64> {
    let factor = 10u64
        .checked_pow(decimals as u32)
        .ok_or(CustomErrorCode::ArithmeticOverflow)?;
    units
        .checked_mul(factor)
        .ok_or_else(|| error!(CustomErrorCode::ArithmeticOverflow))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_by_token_decimals() {
        // 7 whole tokens against an 18-decimal and a 6-decimal mint
        assert_eq!(scaled_amount(7, 18).unwrap(), 7_000_000_000_000_000_000);
        assert_eq!(scaled_amount(7, 6).unwrap(), 7_000_000);
    }

    #[test]
    fn zero_units_scale_to_zero() {
        assert_eq!(scaled_amount(0, 18).unwrap(), 0);
    }

    #[test]
    fn rejects_overflowing_scale() {
        // 10^20 alone exceeds u64
        assert!(scaled_amount(1, 20).is_err());
        assert!(scaled_amount(u64::MAX, 6).is_err());
    }
}
