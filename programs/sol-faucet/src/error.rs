use anchor_lang::prelude::*;

#[error_code]
pub enum CustomErrorCode {
    #[msg("Unauthorized minter")]
    UnauthorizedMinter = 1,
    #[msg("Token not registered")]
    TokenNotRegistered = 2,
    #[msg("Length mismatch")]
    LengthMismatch = 3,
    #[msg("Recipient is zero")]
    ZeroRecipient = 4,
    #[msg("Faucet is not the mint authority")]
    NotMintAuthority = 5,
    #[msg("Token accounts must come in (mint, recipient) pairs")]
    UnpairedAccounts = 6,
    #[msg("Invalid mint provided")]
    InvalidMint = 7,
    #[msg("Invalid token account owner")]
    InvalidTokenOwner = 8,
    #[msg("Too many registered tokens.")]
    TooManyTokens = 9,
    #[msg("Too many minters.")]
    TooManyMinters = 10,
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow = 11,
    #[msg("ProgramData account did not match expected PDA.")]
    InvalidProgramData = 12,
    #[msg("Program has no upgrade authority (set to None).")]
    NoUpgradeAuthority = 13,
    #[msg("Signer is not the upgrade authority.")]
    InvalidUpgradeAuthority = 14,
}
