//! Money helpers (Kenyan shillings, 2 decimal places).

use rust_decimal::prelude::*;

use super::error::{PortalError, PortalResult};

const DECIMAL_PLACES: u32 = 2;

/// 10^8, the first value too wide for a `NUMERIC(10,2)` column.
const MONEY_LIMIT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// 10%, applied to the principal for interest and for each overdue month.
pub const LOAN_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Round half away from zero to cents.
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Accept `amount` only if a `NUMERIC(10,2)` column stores it unchanged.
pub fn check_money_field(field: &'static str, amount: Decimal) -> PortalResult<Decimal> {
    if amount.round_dp(DECIMAL_PLACES) != amount {
        return Err(PortalError::validation(
            field,
            "Ensure that there are no more than 2 decimal places.",
        ));
    }
    if amount.abs() >= MONEY_LIMIT {
        return Err(PortalError::validation(
            field,
            "Ensure that there are no more than 8 digits before the decimal point.",
        ));
    }
    Ok(amount)
}

/// Formats with thousands separators and two decimals: `12345.5` -> `"12,345.50"`.
pub fn format_amount(value: Decimal) -> String {
    let rounded = round_money(value);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, grouped, cents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loan_rate_is_ten_percent() {
        assert_eq!(LOAN_RATE.to_string(), "0.10");
        assert_eq!(Decimal::from(2000) * LOAN_RATE, Decimal::from(200));
    }

    #[test]
    fn test_round_money() {
        assert_eq!(round_money(Decimal::new(12345, 3)).to_string(), "12.35");
        assert_eq!(round_money(Decimal::new(-12345, 3)).to_string(), "-12.35");
    }

    #[test]
    fn test_money_field_accepts_column_values() {
        for amount in [Decimal::new(100050, 2), Decimal::new(15000, 3), Decimal::new(9999999999, 2)] {
            assert_eq!(check_money_field("amount", amount).unwrap(), amount);
        }
    }

    #[test]
    fn test_money_field_rejects_sub_cent_amounts() {
        let err = check_money_field("amount", Decimal::new(1000005, 3)).unwrap_err();
        assert!(matches!(err, PortalError::Validation { field: "amount", .. }));
        assert_eq!(
            err.to_string(),
            "Ensure that there are no more than 2 decimal places."
        );
    }

    #[test]
    fn test_money_field_rejects_overflowing_amounts() {
        for amount in [Decimal::from(100_000_000), Decimal::from(1_000_000_000_000i64)] {
            let err = check_money_field("amount", amount).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Ensure that there are no more than 8 digits before the decimal point."
            );
        }
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::from(50)), "50.00");
        assert_eq!(format_amount(Decimal::from(1000)), "1,000.00");
        assert_eq!(format_amount(Decimal::new(12345678, 1)), "1,234,567.80");
        assert_eq!(format_amount(Decimal::new(99999, 2)), "999.99");
        assert_eq!(format_amount(Decimal::new(-150050, 2)), "-1,500.50");
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
    }
}
