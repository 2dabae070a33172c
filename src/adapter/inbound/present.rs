//! Presentation helpers shared by the front ends.

use rust_decimal::Decimal;

use crate::domain::{ComparisonReport, Side};

/// Four decimals, or `N/A` for a missing value.
#[must_use]
pub fn format_rate(value: Option<Decimal>) -> String {
    match value {
        Some(value) => format!("{:.4}", value.round_dp(4)),
        None => "N/A".to_string(),
    }
}

/// Signed delta with four decimals (`+0.0737`).
#[must_use]
pub fn format_delta(delta: Decimal) -> String {
    let rounded = delta.round_dp(4);
    if rounded.is_sign_negative() {
        format!("{rounded:.4}")
    } else {
        format!("+{rounded:.4}")
    }
}

/// What a trade side means for the report's route, e.g. `USD/CNY + CNY/RUB`.
#[must_use]
pub fn side_label(side: Side, report: &ComparisonReport) -> String {
    match side {
        Side::Direct => report.cross().derived_pair().to_string(),
        Side::Cross => {
            let (first, second) = report.cross().legs();
            format!("{} + {}", first.pair(), second.pair())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rates_have_four_decimals() {
        assert_eq!(format_rate(Some(dec!(93.2))), "93.2000");
        assert_eq!(format_rate(Some(dec!(93.51374))), "93.5137");
        assert_eq!(format_rate(None), "N/A");
    }

    #[test]
    fn delta_is_signed() {
        assert_eq!(format_delta(dec!(0.0737)), "+0.0737");
        assert_eq!(format_delta(dec!(-76.467)), "-76.4670");
    }
}
