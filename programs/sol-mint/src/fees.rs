use anchor_lang::prelude::*;

use crate::error::CustomErrorCode;

pub const BPS_DENOMINATOR: u64 = 10_000;

/// Fee fraction in basis points, validated to [0, 10000] at construction so a
/// bad fraction is a configuration-time error, never a split-time one.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BasisPoints(u16);

impl BasisPoints {
    pub const MAX: u16 = 10_000;

    pub fn new(bps: u16) -> Result<Self> {
        require!(bps <= Self::MAX, CustomErrorCode::FeeFractionTooLarge);
        Ok(Self(bps))
    }

    pub fn get(&self) -> u16 {
        self.0
    }
}

/// Splits `gross` into (platform_share, creator_share).
///
/// platform = floor(gross * bps / 10000); creator takes the remainder, so the
/// two shares always sum to `gross` and no dust stays behind.
pub fn split_fee(gross: u64, fee: BasisPoints) -> (u64, u64) {
    let platform = (gross as u128) * (fee.0 as u128) / (BPS_DENOMINATOR as u128);
    // fee.0 <= 10000 guarantees platform <= gross, so the cast cannot truncate
    let platform = platform as u64;
    (platform, gross - platform)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_ten_percent() {
        let fee = BasisPoints::new(1000).unwrap();
        let (platform, creator) = split_fee(1_200_000, fee);
        assert_eq!(platform, 120_000);
        assert_eq!(creator, 1_080_000);
    }

    #[test]
    fn conserves_gross_across_fractions() {
        let grosses = [0u64, 1, 3, 999, 1_200_000, 5_000_000, u64::MAX];
        let fractions = [0u16, 1, 333, 1000, 2500, 9999, 10_000];
        for &gross in &grosses {
            for &bps in &fractions {
                let fee = BasisPoints::new(bps).unwrap();
                let (platform, creator) = split_fee(gross, fee);
                assert_eq!(platform as u128 + creator as u128, gross as u128);
                assert_eq!(
                    platform as u128,
                    (gross as u128) * (bps as u128) / 10_000u128
                );
            }
        }
    }

    #[test]
    fn zero_fee_gives_everything_to_creator() {
        let (platform, creator) = split_fee(777, BasisPoints::new(0).unwrap());
        assert_eq!(platform, 0);
        assert_eq!(creator, 777);
    }

    #[test]
    fn full_fee_gives_everything_to_platform() {
        let (platform, creator) = split_fee(777, BasisPoints::new(10_000).unwrap());
        assert_eq!(platform, 777);
        assert_eq!(creator, 0);
    }

    #[test]
    fn rejects_fraction_over_denominator() {
        assert!(BasisPoints::new(10_001).is_err());
        assert!(BasisPoints::new(u16::MAX).is_err());
    }

    #[test]
    fn rounding_truncates_toward_creator() {
        // 1 bps of 9999 = 0.9999 -> platform floor() = 0
        let (platform, creator) = split_fee(9_999, BasisPoints::new(1).unwrap());
        assert_eq!(platform, 0);
        assert_eq!(creator, 9_999);
    }
}
