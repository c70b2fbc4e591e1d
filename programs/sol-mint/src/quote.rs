use anchor_lang::prelude::*;

use crate::error::CustomErrorCode;

/// Flat minimum acceptable quote in raw stable units, independent of the
/// stable mint's decimal count. Callers should document the implied
/// real-world minimum for the stable they configure.
pub const MIN_QUOTE_OUT: u64 = 500_000;

/// Advisory quote at the pool's posted price. Execution settles at the same
/// price but re-validates the gate against actual proceeds.
pub fn quote_out(amount_in: u64, price_num: u64, price_den: u64) -> Result<u64> {
    require!(price_den > 0, CustomErrorCode::InvalidPrice);
    let out = (amount_in as u128)
        .checked_mul(price_num as u128)
        .ok_or(CustomErrorCode::ArithmeticOverflow)?
        / (price_den as u128);
    u64::try_from(out).map_err(|_| error!(CustomErrorCode::ArithmeticOverflow))
}

pub fn meets_minimum(amount_out: u64) -> bool {
    amount_out >= MIN_QUOTE_OUT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_at_posted_price() {
        // 1 native unit at a 1_200_000-per-unit posted price
        assert_eq!(quote_out(1, 1_200_000, 1).unwrap(), 1_200_000);
        // fractional price 3/2
        assert_eq!(quote_out(10, 3, 2).unwrap(), 15);
        // floor division
        assert_eq!(quote_out(1, 1, 3).unwrap(), 0);
    }

    #[test]
    fn rejects_zero_denominator() {
        assert!(quote_out(1, 1, 0).is_err());
    }

    #[test]
    fn rejects_overflowing_product() {
        assert!(quote_out(u64::MAX, u64::MAX, 1).is_err());
    }

    #[test]
    fn minimum_gate_is_flat_five_e_five() {
        assert!(!meets_minimum(100_000));
        assert!(!meets_minimum(499_999));
        assert!(meets_minimum(500_000));
        assert!(meets_minimum(1_200_000));
    }
}
