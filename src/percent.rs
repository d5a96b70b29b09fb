use rust_decimal::{Decimal, RoundingStrategy};

/// What to return when every count is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroTotal {
    /// Apply the remainder correction anyway, so the last entry reads 100.00.
    #[default]
    LastAbsorbs,
    /// Return 0.00 for every entry.
    AllZero,
}

impl ZeroTotal {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "last" => Some(Self::LastAbsorbs),
            "zero" => Some(Self::AllZero),
            _ => None,
        }
    }
}

pub fn total(counts: &[u64]) -> u64 {
    counts.iter().fold(0u64, |sum, count| sum.saturating_add(*count))
}

pub fn normalize(counts: &[u64]) -> Vec<Decimal> {
    normalize_with(counts, ZeroTotal::default())
}

/// Percentage share of each count, rounded to two places, with the rounding
/// residual added to the last entry so the series sums to exactly 100.00.
pub fn normalize_with(counts: &[u64], zero_total: ZeroTotal) -> Vec<Decimal> {
    if counts.is_empty() {
        return Vec::new();
    }

    // exact divisor; the u64 total saturates
    let total: Decimal = counts.iter().map(|count| Decimal::from(*count)).sum();
    let mut rounded: Vec<Decimal> = counts
        .iter()
        .map(|count| {
            if total.is_zero() {
                Decimal::ZERO
            } else {
                round2(Decimal::from(*count) * Decimal::ONE_HUNDRED / total)
            }
        })
        .collect();

    if total.is_zero() && zero_total == ZeroTotal::AllZero {
        return rounded;
    }

    let sum: Decimal = rounded.iter().copied().sum();
    let remainder = round2(Decimal::ONE_HUNDRED - sum);
    if let Some(last) = rounded.last_mut() {
        *last += remainder;
    }

    rounded
}

pub fn format_percent(value: Decimal) -> String {
    let mut value = round2(value);
    value.rescale(2);
    value.to_string()
}

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_counts_give_empty_series() {
        assert!(normalize(&[]).is_empty());
        assert!(normalize_with(&[], ZeroTotal::AllZero).is_empty());
    }

    #[test]
    fn thirds_push_remainder_onto_last_entry() {
        assert_eq!(normalize(&[1, 1, 1]), vec![dec!(33.33), dec!(33.33), dec!(33.34)]);
    }

    #[test]
    fn exact_shares_are_untouched() {
        let series = normalize(&[50, 30, 20]);
        assert_eq!(series, vec![dec!(50), dec!(30), dec!(20)]);
        let formatted: Vec<String> = series.into_iter().map(format_percent).collect();
        assert_eq!(formatted, vec!["50.00", "30.00", "20.00"]);
    }

    #[test]
    fn single_entry_is_one_hundred() {
        assert_eq!(normalize(&[7]), vec![dec!(100)]);
        assert_eq!(format_percent(normalize(&[7])[0]), "100.00");
    }

    #[test]
    fn zero_total_last_absorbs_by_default() {
        assert_eq!(normalize(&[0, 0, 0]), vec![dec!(0), dec!(0), dec!(100)]);
    }

    #[test]
    fn zero_total_all_zero_policy() {
        assert_eq!(
            normalize_with(&[0, 0, 0], ZeroTotal::AllZero),
            vec![dec!(0), dec!(0), dec!(0)]
        );
    }

    #[test]
    fn remainder_goes_to_last_not_largest_error() {
        // every share rounds up to 16.67, the -0.02 residual lands on the last
        let series = normalize(&[1, 1, 1, 1, 1, 1]);
        assert_eq!(series[..5], [dec!(16.67); 5]);
        assert_eq!(series[5], dec!(16.65));
    }

    #[test]
    fn midpoint_rounds_away_from_zero() {
        // 1/800 is exactly 0.125%, 799/800 exactly 99.875%
        assert_eq!(normalize(&[1, 799]), vec![dec!(0.13), dec!(99.87)]);
    }

    #[test]
    fn sums_to_exactly_one_hundred() {
        let cases: [&[u64]; 6] = [
            &[3, 7, 11],
            &[1, 2],
            &[0, 5, 0],
            &[123_456, 654_321, 1, 9_999_999],
            &[17, 17, 17, 17, 17, 17, 17],
            &[u64::MAX / 4, 1, 3],
        ];
        for counts in cases {
            let sum: Decimal = normalize(counts).into_iter().sum();
            assert_eq!(sum, dec!(100), "counts {counts:?}");
        }
    }

    #[test]
    fn repeat_calls_are_identical() {
        let counts = vec![9, 4, 13, 2];
        let first = normalize(&counts);
        let second = normalize(&counts);
        assert_eq!(first, second);
        assert_eq!(counts, vec![9, 4, 13, 2]);
    }

    #[test]
    fn shares_stay_exact_past_u64_total() {
        assert_eq!(normalize(&[u64::MAX, u64::MAX]), vec![dec!(50), dec!(50)]);
        assert_eq!(
            normalize(&[u64::MAX, u64::MAX, u64::MAX]),
            vec![dec!(33.33), dec!(33.33), dec!(33.34)]
        );
    }

    #[test]
    fn total_saturates() {
        assert_eq!(total(&[u64::MAX, 5]), u64::MAX);
        assert_eq!(total(&[2, 3]), 5);
    }

    #[test]
    fn parses_zero_total_policy() {
        assert_eq!(ZeroTotal::parse("zero"), Some(ZeroTotal::AllZero));
        assert_eq!(ZeroTotal::parse(" LAST "), Some(ZeroTotal::LastAbsorbs));
        assert_eq!(ZeroTotal::parse("other"), None);
    }
}
