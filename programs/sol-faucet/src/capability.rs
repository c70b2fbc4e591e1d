use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;

/// Whether the faucet can actually mint a given token.
///
/// Advisory adapter for off-chain tooling: probe each candidate mint and
/// exclude `Unsupported` ones from a batch instead of letting a single
/// incompatible token abort the whole call. The on-chain handlers stay
/// strict and re-check regardless.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    Supported,
    Unsupported,
}

/// A mint is mintable by the faucet iff its mint authority is the faucet's
/// mint authority PDA. A fixed-supply mint (authority revoked) or one held
/// by another party is `Unsupported`.
pub fn mint_capability(mint_authority: &COption<Pubkey>, faucet_authority: &Pubkey) -> Capability {
    match mint_authority {
        COption::Some(authority) if authority == faucet_authority => Capability::Supported,
        _ => Capability::Unsupported,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_spl::token::spl_token::state::Mint as SplMint;

    #[test]
    fn adopted_mint_is_supported() {
        let authority = Pubkey::new_unique();
        assert_eq!(
            mint_capability(&COption::Some(authority), &authority),
            Capability::Supported
        );
    }

    #[test]
    fn foreign_authority_is_unsupported() {
        let authority = Pubkey::new_unique();
        assert_eq!(
            mint_capability(&COption::Some(Pubkey::new_unique()), &authority),
            Capability::Unsupported
        );
    }

    #[test]
    fn fixed_supply_mint_is_unsupported() {
        let authority = Pubkey::new_unique();
        assert_eq!(
            mint_capability(&COption::None, &authority),
            Capability::Unsupported
        );
    }

    #[test]
    fn probes_unpacked_mint_state() {
        let authority = Pubkey::new_unique();
        let mint = SplMint {
            mint_authority: COption::Some(authority),
            supply: 0,
            decimals: 6,
            is_initialized: true,
            freeze_authority: COption::None,
        };
        assert_eq!(
            mint_capability(&mint.mint_authority, &authority),
            Capability::Supported
        );
    }
}
