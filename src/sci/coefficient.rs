use super::error::{SciError, SciResult};

pub const MIN_UTILIZATION: f64 = 0.0;
pub const MAX_UTILIZATION: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Bracket {
    lower: f64,
    upper: f64,
    coefficient: f64,
}

const fn bracket(lower: f64, upper: f64, coefficient: f64) -> Bracket {
    Bracket {
        lower,
        upper,
        coefficient,
    }
}

/// Utilization brackets, scanned in order. Every bracket is `[lower, upper)`
/// except the last, which also contains `MAX_UTILIZATION`.
const BRACKETS: [Bracket; 13] = [
    bracket(0.0, 2.5, 0.12),
    bracket(2.5, 5.0, 0.17),
    bracket(5.0, 7.5, 0.22),
    bracket(7.5, 10.0, 0.27),
    bracket(10.0, 20.0, 0.32),
    bracket(20.0, 30.0, 0.4275),
    bracket(30.0, 40.0, 0.535),
    bracket(40.0, 50.0, 0.6425),
    bracket(50.0, 60.0, 0.75),
    bracket(60.0, 70.0, 0.804),
    bracket(70.0, 80.0, 0.858),
    bracket(80.0, 90.0, 0.912),
    bracket(90.0, MAX_UTILIZATION, 1.02),
];

/// Maps a utilization percentage to its energy coefficient.
///
/// The mapping is a step function: there is no interpolation between
/// brackets. Values outside `[0, 100]` (and NaN) are rejected rather than
/// clamped.
pub fn coefficient_for(utilization: f64) -> SciResult<f64> {
    if !(MIN_UTILIZATION..=MAX_UTILIZATION).contains(&utilization) {
        return Err(SciError::invalid_input(format!(
            "utilization must be between {MIN_UTILIZATION} and {MAX_UTILIZATION}, got {utilization}"
        )));
    }

    // Only MAX_UTILIZATION misses every half-open bracket.
    BRACKETS
        .iter()
        .find(|b| utilization >= b.lower && utilization < b.upper)
        .or_else(|| BRACKETS.last())
        .map(|b| b.coefficient)
        .ok_or_else(|| {
            SciError::invalid_input(format!("no coefficient bracket for utilization {utilization}"))
        })
}

#[cfg(test)]
mod tests {
    use super::{BRACKETS, coefficient_for};
    use crate::sci::SciError;

    #[test]
    fn brackets_are_contiguous_and_cover_full_range() {
        assert_eq!(BRACKETS[0].lower, 0.0);
        assert_eq!(BRACKETS[BRACKETS.len() - 1].upper, 100.0);
        for pair in BRACKETS.windows(2) {
            assert_eq!(pair[0].upper, pair[1].lower);
        }
    }

    #[test]
    fn returns_table_value_inside_each_bracket() {
        let cases = [
            (0.0, 0.12),
            (1.0, 0.12),
            (3.0, 0.17),
            (6.0, 0.22),
            (8.0, 0.27),
            (15.0, 0.32),
            (25.0, 0.4275),
            (35.0, 0.535),
            (45.0, 0.6425),
            (55.0, 0.75),
            (65.0, 0.804),
            (75.0, 0.858),
            (85.0, 0.912),
            (95.0, 1.02),
        ];
        for (utilization, expected) in cases {
            assert_eq!(
                coefficient_for(utilization).expect("in range"),
                expected,
                "utilization {utilization}"
            );
        }
    }

    #[test]
    fn boundaries_resolve_to_upper_bracket() {
        assert_eq!(coefficient_for(2.4999).expect("in range"), 0.12);
        assert_eq!(coefficient_for(2.5).expect("in range"), 0.17);
        assert_eq!(coefficient_for(4.999).expect("in range"), 0.17);
        assert_eq!(coefficient_for(5.0).expect("in range"), 0.22);
        assert_eq!(coefficient_for(7.5).expect("in range"), 0.27);
        assert_eq!(coefficient_for(10.0).expect("in range"), 0.32);
        assert_eq!(coefficient_for(20.0).expect("in range"), 0.4275);
        assert_eq!(coefficient_for(70.0).expect("in range"), 0.858);
        assert_eq!(coefficient_for(89.9999).expect("in range"), 0.912);
        assert_eq!(coefficient_for(90.0).expect("in range"), 1.02);
    }

    #[test]
    fn top_of_range_stays_in_final_bracket() {
        assert_eq!(coefficient_for(100.0).expect("in range"), 1.02);
    }

    #[test]
    fn rejects_out_of_range_utilization() {
        for utilization in [-0.001, 100.001, 100.000_000_1, -50.0, f64::INFINITY] {
            let err = coefficient_for(utilization).expect_err("should be rejected");
            assert!(
                matches!(err, SciError::InvalidInput(_)),
                "unexpected error for {utilization}: {err}"
            );
        }
    }

    #[test]
    fn rejects_nan_utilization() {
        assert!(coefficient_for(f64::NAN).is_err());
    }
}
