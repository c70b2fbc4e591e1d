use crate::account_structs::*;
use crate::error::*;
use crate::events::*;
use crate::fees::{split_fee, BasisPoints};
use crate::guard::validate_program_update_authority;
use crate::permit::{permit_digest, verify_permit, PermitRequest};
use crate::quote::{meets_minimum, quote_out};
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_lang::system_program;
use anchor_spl::token::spl_token::instruction::AuthorityType;
use anchor_spl::token::{self, MintTo, Token, TokenAccount, Transfer};

pub fn initialize(
    ctx: Context<Initialize>,
    creator: Pubkey,
    platform_fee_recipient: Pubkey,
    platform_fee_bps: u16,
    platform_administrators: Vec<Pubkey>,
) -> Result<()> {
    validate_program_update_authority(&ctx.accounts.program_data, &ctx.accounts.signer)?;

    msg!("Initializing with stable mint: {}", ctx.accounts.stable_mint.key());

    require!(
        platform_administrators.len() <= Config::MAX_ADMINISTRATORS,
        CustomErrorCode::TooManyAdministrators
    );
    require!(creator != Pubkey::default(), CustomErrorCode::ZeroRecipient);
    require!(
        platform_fee_recipient != Pubkey::default(),
        CustomErrorCode::ZeroRecipient
    );

    let fee = BasisPoints::new(platform_fee_bps)?;

    let config = &mut ctx.accounts.config;
    config.stable_mint = ctx.accounts.stable_mint.key();
    config.yield_mint = ctx.accounts.yield_mint.key();
    config.lending_vault = ctx.accounts.lending_vault.key();
    config.creator = creator;
    config.platform_fee_recipient = platform_fee_recipient;
    config.platform_fee_bps = fee;
    config.platform_administrators = platform_administrators;
    config.bump = ctx.bumps.config;
    config.paused = false;

    // The lending vault must be owned by the program-derived vault authority
    // so that only the program can move supplied stable back out. Adopt it
    // here when it is still signer-owned.
    if ctx.accounts.lending_vault.owner == ctx.accounts.signer.key() {
        let seeds: &[&[u8]] = &[b"vault_authority", &[ctx.bumps.vault_authority]];
        let signer = &[&seeds[..]];
        token::set_authority(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                token::SetAuthority {
                    account_or_mint: ctx.accounts.lending_vault.to_account_info(),
                    current_authority: ctx.accounts.signer.to_account_info(),
                },
                signer,
            ),
            AuthorityType::AccountOwner,
            Some(ctx.accounts.vault_authority.key()),
        )?;
    }

    // Ledger entry 0 belongs to configuration itself; real mints start at 1.
    let genesis = &mut ctx.accounts.genesis_record;
    genesis.token_id = GENESIS_TOKEN_ID;
    genesis.owner = ctx.accounts.signer.key();
    genesis.payer = ctx.accounts.signer.key();
    genesis.creator = creator;
    genesis.value = 0;
    genesis.platform_fee = 0;
    genesis.minted_at = Clock::get()?.unix_timestamp;
    genesis.bump = ctx.bumps.genesis_record;

    ctx.accounts.config.next_token_id = GENESIS_TOKEN_ID + 1;

    Ok(())
}

pub fn register_pool(
    ctx: Context<RegisterPool>,
    token_in: Pubkey,
    fee_tier: u32,
    price_num: u64,
    price_den: u64,
) -> Result<()> {
    validate_program_update_authority(&ctx.accounts.program_data, &ctx.accounts.signer)?;

    require!(price_num > 0 && price_den > 0, CustomErrorCode::InvalidPrice);

    let input_vault = if token_in == NATIVE_MARKER {
        require!(
            ctx.accounts.input_vault.is_none(),
            CustomErrorCode::InvalidPoolVault
        );
        NATIVE_MARKER
    } else {
        let vault = ctx
            .accounts
            .input_vault
            .as_ref()
            .ok_or(CustomErrorCode::InvalidPoolVault)?;
        require!(vault.mint == token_in, CustomErrorCode::InvalidMint);
        require!(
            vault.owner == ctx.accounts.pool_authority.key(),
            CustomErrorCode::InvalidVaultAuthority
        );
        vault.key()
    };

    let pool = &mut ctx.accounts.pool;
    pool.token_in = token_in;
    pool.token_out = ctx.accounts.config.stable_mint;
    pool.fee_tier = fee_tier;
    pool.price_num = price_num;
    pool.price_den = price_den;
    pool.input_vault = input_vault;
    pool.stable_vault = ctx.accounts.stable_vault.key();
    pool.bump = ctx.bumps.pool;

    emit!(PoolRegistered {
        pool: pool.key(),
        token_in,
        token_out: ctx.accounts.config.stable_mint,
        fee_tier,
    });

    Ok(())
}

/// Probes for the pool of a swap path. The existence check runs before any
/// quote so a missing pool is reported as the no-pool error, never as a
/// low-quote one.
fn load_pool(
    pool_info: &UncheckedAccount,
    token_in: &Pubkey,
    stable_mint: &Pubkey,
    fee_tier: u32,
) -> Result<Pool> {
    let (expected, _) = Pool::address(token_in, stable_mint, fee_tier);
    require_keys_eq!(pool_info.key(), expected, CustomErrorCode::NoPool);
    require!(!pool_info.data_is_empty(), CustomErrorCode::NoPool);

    if pool_info.owner == &system_program::ID && pool_info.lamports() == 0 {
        return Err(ErrorCode::AccountNotInitialized.into());
    }
    if pool_info.owner != &Pool::owner() {
        return Err(Error::from(ErrorCode::AccountOwnedByWrongProgram)
            .with_pubkeys((*pool_info.owner, Pool::owner())));
    }
    let mut data: &[u8] = &pool_info.try_borrow_data()?;
    Pool::try_deserialize(&mut data)
}

/// Pays out the stable proceeds of an executed swap: platform share to the
/// fee recipient, remainder to the creator, both straight out of the pool
/// stable vault. The program itself never holds a stable balance.
fn distribute_stable<'info>(
    fee: BasisPoints,
    amount_out: u64,
    stable_vault: &Account<'info, TokenAccount>,
    platform_token_account: &Account<'info, TokenAccount>,
    creator_token_account: &Account<'info, TokenAccount>,
    pool_authority: &UncheckedAccount<'info>,
    pool_authority_bump: u8,
    token_program: &Program<'info, Token>,
) -> Result<(u64, u64)> {
    require!(
        stable_vault.amount >= amount_out,
        CustomErrorCode::InsufficientPoolLiquidity
    );
    // The gate is re-validated against the actual execution proceeds, not
    // just the advisory quote.
    require!(meets_minimum(amount_out), CustomErrorCode::QuoteTooLow);

    let (platform_share, creator_share) = split_fee(amount_out, fee);

    let seeds: &[&[u8]] = &[b"pool_authority", &[pool_authority_bump]];
    let signer = &[&seeds[..]];

    token::transfer(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            Transfer {
                from: stable_vault.to_account_info(),
                to: platform_token_account.to_account_info(),
                authority: pool_authority.to_account_info(),
            },
            signer,
        ),
        platform_share,
    )?;

    token::transfer(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            Transfer {
                from: stable_vault.to_account_info(),
                to: creator_token_account.to_account_info(),
                authority: pool_authority.to_account_info(),
            },
            signer,
        ),
        creator_share,
    )?;

    Ok((platform_share, creator_share))
}

pub fn mint_with_native(ctx: Context<MintWithNative>, amount_in: u64, fee_tier: u32) -> Result<()> {
    require!(!ctx.accounts.config.paused, CustomErrorCode::ProgramPaused);
    require!(amount_in > 0, CustomErrorCode::InvalidAmount);

    let stable_mint = ctx.accounts.config.stable_mint;
    let pool = load_pool(&ctx.accounts.pool, &NATIVE_MARKER, &stable_mint, fee_tier)?;
    require_keys_eq!(
        ctx.accounts.stable_vault.key(),
        pool.stable_vault,
        CustomErrorCode::InvalidPoolVault
    );

    let quoted = quote_out(amount_in, pool.price_num, pool.price_den)?;
    require!(meets_minimum(quoted), CustomErrorCode::QuoteTooLow);

    // Input leg: lamports into the pool account.
    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.payer.to_account_info(),
                to: ctx.accounts.pool.to_account_info(),
            },
        ),
        amount_in,
    )?;

    let amount_out = quoted;
    let fee = ctx.accounts.config.platform_fee_bps;
    let (platform_share, _creator_share) = distribute_stable(
        fee,
        amount_out,
        &ctx.accounts.stable_vault,
        &ctx.accounts.platform_token_account,
        &ctx.accounts.creator_token_account,
        &ctx.accounts.pool_authority,
        ctx.bumps.pool_authority,
        &ctx.accounts.token_program,
    )?;

    let payer = ctx.accounts.payer.key();
    let token_id = issue_token(
        &mut ctx.accounts.config,
        &mut ctx.accounts.mint_record,
        ctx.bumps.mint_record,
        payer,
        payer,
        amount_out,
        platform_share,
    )?;

    msg!("Minted token {} for {} stable units", token_id, amount_out);
    emit!(MintEvent {
        minter: payer,
        recipient: payer,
        value: amount_out,
        token_id,
    });

    Ok(())
}

pub fn mint_with_token(
    ctx: Context<MintWithToken>,
    fee_tier: u32,
    permit: PermitRequest,
) -> Result<()> {
    require!(!ctx.accounts.config.paused, CustomErrorCode::ProgramPaused);
    require!(permit.value > 0, CustomErrorCode::InvalidAmount);
    require!(
        permit.owner != Pubkey::default(),
        CustomErrorCode::ZeroRecipient
    );

    let stable_mint = ctx.accounts.config.stable_mint;
    let token_in = ctx.accounts.owner_token_account.mint;
    let pool = load_pool(&ctx.accounts.pool, &token_in, &stable_mint, fee_tier)?;
    require_keys_eq!(
        ctx.accounts.stable_vault.key(),
        pool.stable_vault,
        CustomErrorCode::InvalidPoolVault
    );
    require_keys_eq!(
        ctx.accounts.input_vault.key(),
        pool.input_vault,
        CustomErrorCode::InvalidPoolVault
    );
    require!(
        ctx.accounts.input_vault.mint == token_in,
        CustomErrorCode::InvalidMint
    );

    let quoted = quote_out(permit.value, pool.price_num, pool.price_den)?;
    require!(meets_minimum(quoted), CustomErrorCode::QuoteTooLow);

    msg!(
        "Permit digest: {}",
        hex::encode(permit_digest(ctx.program_id, &permit))
    );
    verify_permit(
        ctx.program_id,
        &permit,
        &ctx.accounts.permit_authority.key(),
        Clock::get()?.unix_timestamp,
        &ctx.accounts.instructions_sysvar,
    )?;
    consume_delegated(
        &ctx.accounts.owner_token_account,
        &ctx.accounts.permit_authority.key(),
        permit.value,
    )?;

    // Input leg: pull exactly the permitted value from the owner through the
    // standing delegation.
    let seeds: &[&[u8]] = &[b"permit_authority", &[ctx.bumps.permit_authority]];
    let signer = &[&seeds[..]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.owner_token_account.to_account_info(),
                to: ctx.accounts.input_vault.to_account_info(),
                authority: ctx.accounts.permit_authority.to_account_info(),
            },
            signer,
        ),
        permit.value,
    )?;

    let amount_out = quoted;
    let fee = ctx.accounts.config.platform_fee_bps;
    let (platform_share, _creator_share) = distribute_stable(
        fee,
        amount_out,
        &ctx.accounts.stable_vault,
        &ctx.accounts.platform_token_account,
        &ctx.accounts.creator_token_account,
        &ctx.accounts.pool_authority,
        ctx.bumps.pool_authority,
        &ctx.accounts.token_program,
    )?;

    let owner = permit.owner;
    let token_id = issue_token(
        &mut ctx.accounts.config,
        &mut ctx.accounts.mint_record,
        ctx.bumps.mint_record,
        owner,
        owner,
        amount_out,
        platform_share,
    )?;

    msg!("Minted token {} for {} stable units", token_id, amount_out);
    emit!(MintEvent {
        minter: ctx.accounts.payer.key(),
        recipient: owner,
        value: amount_out,
        token_id,
    });

    Ok(())
}

/// The standing delegation must point at the permit authority and cover the
/// permitted value; the permit only gates when and how much of it is drawn.
fn consume_delegated(
    token_account: &Account<TokenAccount>,
    permit_authority: &Pubkey,
    value: u64,
) -> Result<()> {
    require!(
        token_account.delegate == COption::Some(*permit_authority),
        CustomErrorCode::InsufficientDelegatedAmount
    );
    require!(
        token_account.delegated_amount >= value,
        CustomErrorCode::InsufficientDelegatedAmount
    );
    Ok(())
}

/// Issues the next ledger entry. Ids are strictly increasing and the record
/// fields are fixed once, at mint time.
fn issue_token<'info>(
    config: &mut Account<'info, Config>,
    record: &mut Account<'info, MintRecord>,
    record_bump: u8,
    owner: Pubkey,
    payer: Pubkey,
    value: u64,
    platform_fee: u64,
) -> Result<u64> {
    let token_id = config.next_token_id;

    record.token_id = token_id;
    record.owner = owner;
    record.payer = payer;
    record.creator = config.creator;
    record.value = value;
    record.platform_fee = platform_fee;
    record.minted_at = Clock::get()?.unix_timestamp;
    record.bump = record_bump;

    config.next_token_id = token_id
        .checked_add(1)
        .ok_or(CustomErrorCode::ArithmeticOverflow)?;

    Ok(token_id)
}

pub fn deposit(ctx: Context<Deposit>, yield_share_bps: u16, permit: PermitRequest) -> Result<()> {
    require!(!ctx.accounts.config.paused, CustomErrorCode::ProgramPaused);

    // Platform gate
    require!(
        ctx.accounts
            .config
            .platform_administrators
            .contains(&ctx.accounts.platform.key()),
        CustomErrorCode::UnauthorizedPlatformAdministrator
    );

    require!(
        ctx.accounts.beneficiary.key() != Pubkey::default(),
        CustomErrorCode::ZeroRecipient
    );
    require!(
        ctx.accounts.owner.key() != Pubkey::default(),
        CustomErrorCode::ZeroRecipient
    );
    require!(permit.value > 0, CustomErrorCode::InvalidAmount);

    let share = BasisPoints::new(yield_share_bps)?;

    msg!(
        "Permit digest: {}",
        hex::encode(permit_digest(ctx.program_id, &permit))
    );
    verify_permit(
        ctx.program_id,
        &permit,
        &ctx.accounts.permit_authority.key(),
        Clock::get()?.unix_timestamp,
        &ctx.accounts.instructions_sysvar,
    )?;
    consume_delegated(
        &ctx.accounts.owner_stable_token_account,
        &ctx.accounts.permit_authority.key(),
        permit.value,
    )?;

    let owner = ctx.accounts.owner.key();
    let beneficiary = ctx.accounts.beneficiary.key();

    // Lazy provisioning: the first deposit for this (owner, beneficiary)
    // pair fixes the vault's identity; later deposits must match it and
    // never re-initialize.
    let vault = &mut ctx.accounts.vault;
    if !vault.provisioned {
        vault.owner = owner;
        vault.beneficiary = beneficiary;
        vault.deposited = 0;
        vault.provisioned = true;
        vault.bump = ctx.bumps.vault;

        msg!("Provisioned vault {} for ({}, {})", vault.key(), owner, beneficiary);
        emit!(VaultProvisioned {
            vault: vault.key(),
            owner,
            beneficiary,
        });
    } else {
        require_keys_eq!(vault.owner, owner, CustomErrorCode::VaultIdentityMismatch);
        require_keys_eq!(
            vault.beneficiary,
            beneficiary,
            CustomErrorCode::VaultIdentityMismatch
        );
    }

    // Supply leg: stable moves from the owner into the lending vault through
    // the standing delegation.
    let seeds: &[&[u8]] = &[b"permit_authority", &[ctx.bumps.permit_authority]];
    let signer = &[&seeds[..]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.owner_stable_token_account.to_account_info(),
                to: ctx.accounts.lending_vault.to_account_info(),
                authority: ctx.accounts.permit_authority.to_account_info(),
            },
            signer,
        ),
        permit.value,
    )?;

    // Yield receipt, 1:1 against the supplied stable, credited to the vault.
    let seeds: &[&[u8]] = &[b"mint_authority", &[ctx.bumps.mint_authority]];
    let signer = &[&seeds[..]];
    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint: ctx.accounts.yield_mint.to_account_info(),
                to: ctx.accounts.vault_yield_token_account.to_account_info(),
                authority: ctx.accounts.mint_authority.to_account_info(),
            },
            signer,
        ),
        permit.value,
    )?;

    let vault = &mut ctx.accounts.vault;
    vault.deposited = vault
        .deposited
        .checked_add(permit.value)
        .ok_or(CustomErrorCode::ArithmeticOverflow)?;
    // Last deposit wins the share split.
    vault.yield_share_bps = share;

    emit!(DepositEvent {
        owner,
        beneficiary,
        share_bps: share.get(),
        amount: permit.value,
        vault: vault.key(),
    });

    Ok(())
}

pub fn set_fee_config(
    ctx: Context<SetFeeConfig>,
    platform_fee_bps: u16,
    platform_fee_recipient: Pubkey,
    creator: Pubkey,
) -> Result<()> {
    validate_program_update_authority(&ctx.accounts.program_data, &ctx.accounts.signer)?;

    require!(creator != Pubkey::default(), CustomErrorCode::ZeroRecipient);
    require!(
        platform_fee_recipient != Pubkey::default(),
        CustomErrorCode::ZeroRecipient
    );

    let fee = BasisPoints::new(platform_fee_bps)?;

    let config = &mut ctx.accounts.config;
    config.platform_fee_bps = fee;
    config.platform_fee_recipient = platform_fee_recipient;
    config.creator = creator;

    emit!(FeeConfigUpdated {
        platform_fee_bps,
        platform_fee_recipient,
        creator,
    });

    Ok(())
}

// Update the list of platform administrators (only program update authority can do this)
pub fn update_platform_administrators(
    ctx: Context<UpdatePlatformAdministrators>,
    new_administrators: Vec<Pubkey>,
) -> Result<()> {
    validate_program_update_authority(&ctx.accounts.program_data, &ctx.accounts.signer)?;

    let config = &mut ctx.accounts.config;

    require!(
        new_administrators.len() <= Config::MAX_ADMINISTRATORS,
        CustomErrorCode::TooManyAdministrators
    );

    config.platform_administrators = new_administrators;

    msg!(
        "Platform administrators updated. New count: {}",
        config.platform_administrators.len()
    );
    emit!(PlatformAdministratorsUpdated {
        count: config.platform_administrators.len() as u64,
    });
    Ok(())
}

pub fn set_paused(ctx: Context<Pause>, paused: bool) -> Result<()> {
    validate_program_update_authority(&ctx.accounts.program_data, &ctx.accounts.signer)?;

    ctx.accounts.config.paused = paused;
    msg!("Paused set to {}", paused);
    Ok(())
}
