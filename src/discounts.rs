//! Discounts
//!
//! Pure computation of the payable total for a cart subtotal and an optional
//! coupon. No store access happens here; callers resolve the coupon first.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::coupons::Coupon;

/// Calculate the discount a coupon grants on a subtotal.
///
/// Returns zero when the subtotal is below the coupon's minimum order amount.
/// The flat amount and the percentage are additive, and the result is clamped
/// to `[0, subtotal]` so the payable total can never go negative.
pub fn discount_for(subtotal: Decimal, coupon: &Coupon) -> Decimal {
    if subtotal < coupon.min_order_amount {
        return Decimal::ZERO;
    }

    let percent_part = subtotal * Decimal::from(coupon.discount_percentage) / Decimal::ONE_HUNDRED;
    let discount = coupon.discount_amount + percent_part;

    discount.clamp(Decimal::ZERO, subtotal)
}

/// Calculate the payable total for a subtotal and an optional coupon.
///
/// Without a coupon the subtotal is returned unchanged. With one, the
/// discounted total is rounded half-up to 2 decimal places.
pub fn payable_total(subtotal: Decimal, coupon: Option<&Coupon>) -> Decimal {
    let Some(coupon) = coupon else {
        return subtotal;
    };

    let discount = discount_for(subtotal, coupon);

    if discount.is_zero() {
        return subtotal;
    }

    (subtotal - discount).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;

    fn coupon(amount: i64, percentage: u8, min_order: i64) -> Coupon {
        Coupon {
            code: "SAVE".to_string(),
            discount_amount: Decimal::new(amount, 0),
            discount_percentage: percentage,
            min_order_amount: Decimal::new(min_order, 0),
            valid_from: Timestamp::UNIX_EPOCH,
            valid_to: Timestamp::MAX,
            active: true,
        }
    }

    #[test]
    fn no_coupon_returns_subtotal_unchanged() {
        let subtotal = Decimal::new(900, 0);

        assert_eq!(payable_total(subtotal, None), subtotal);
    }

    #[test]
    fn flat_and_percentage_are_additive() {
        // 900 subtotal, 50 flat + 10% of 900 = 140 off.
        let coupon = coupon(50, 10, 500);

        let total = payable_total(Decimal::new(900, 0), Some(&coupon));

        assert_eq!(total, Decimal::new(760_00, 2));
    }

    #[test]
    fn below_minimum_order_amount_is_a_silent_no_op() {
        let coupon = coupon(50, 10, 500);
        let subtotal = Decimal::new(300, 0);

        assert_eq!(payable_total(subtotal, Some(&coupon)), subtotal);
        assert_eq!(discount_for(subtotal, &coupon), Decimal::ZERO);
    }

    #[test]
    fn discount_is_clamped_to_the_subtotal() {
        let coupon = coupon(1_000, 50, 0);
        let subtotal = Decimal::new(100, 0);

        assert_eq!(discount_for(subtotal, &coupon), subtotal);
        assert_eq!(payable_total(subtotal, Some(&coupon)), Decimal::new(0, 2));
    }

    #[test]
    fn computation_is_idempotent() {
        let coupon = coupon(50, 10, 500);
        let subtotal = Decimal::new(900, 0);

        let first = payable_total(subtotal, Some(&coupon));
        let second = payable_total(subtotal, Some(&coupon));

        assert_eq!(first, second);
    }

    #[test]
    fn result_is_rounded_half_up_to_two_places() {
        // 10.01 subtotal at 25% leaves 7.5075, which rounds to 7.51.
        let coupon = coupon(0, 25, 0);

        let total = payable_total(Decimal::new(10_01, 2), Some(&coupon));

        assert_eq!(total, Decimal::new(7_51, 2));
    }

    #[test]
    fn percentage_only_coupon() {
        let coupon = coupon(0, 100, 0);

        let total = payable_total(Decimal::new(42, 0), Some(&coupon));

        assert_eq!(total, Decimal::new(0, 2));
    }
}
