use anchor_lang::prelude::*;

#[error_code]
pub enum CustomErrorCode {
    #[msg("Invalid amount")]
    InvalidAmount = 1,
    #[msg("No pool for the token")]
    NoPool = 2,
    #[msg("Quoted amount is less than 5e5")]
    QuoteTooLow = 3,
    #[msg("Insufficient pool liquidity")]
    InsufficientPoolLiquidity = 4,
    #[msg("Fee fraction exceeds 10000 basis points")]
    FeeFractionTooLarge = 5,
    #[msg("Invalid pool price")]
    InvalidPrice = 6,
    #[msg("Permit deadline has passed")]
    PermitExpired = 7,
    #[msg("Permit signature does not match owner")]
    InvalidPermitSignature = 8,
    #[msg("Permit spender mismatch")]
    InvalidPermitSpender = 9,
    #[msg("Malformed Ed25519 verification instruction")]
    InvalidEd25519Instruction = 10,
    #[msg("Permit delegate allowance is insufficient")]
    InsufficientDelegatedAmount = 11,
    #[msg("Recipient is zero")]
    ZeroRecipient = 12,
    #[msg("Invalid mint provided")]
    InvalidMint = 13,
    #[msg("Invalid token account owner")]
    InvalidTokenOwner = 14,
    #[msg("Invalid vault authority")]
    InvalidVaultAuthority = 15,
    #[msg("Invalid mint authority")]
    InvalidMintAuthority = 16,
    #[msg("Vault does not match owner and beneficiary")]
    VaultIdentityMismatch = 17,
    #[msg("Unauthorized platform administrator")]
    UnauthorizedPlatformAdministrator = 18,
    #[msg("Too many platform administrators.")]
    TooManyAdministrators = 19,
    #[msg("Program is paused")]
    ProgramPaused = 20,
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow = 21,
    #[msg("ProgramData account did not match expected PDA.")]
    InvalidProgramData = 22,
    #[msg("Program has no upgrade authority (set to None).")]
    NoUpgradeAuthority = 23,
    #[msg("Signer is not the upgrade authority.")]
    InvalidUpgradeAuthority = 24,
    #[msg("Invalid pool vault account")]
    InvalidPoolVault = 25,
}
