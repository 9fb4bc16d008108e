//! Pareto Module
//! Cumulative-percentage computation over rows already in Pareto order.

use thiserror::Error;

/// Decimal places kept in the cumulative percentage column
pub const PERCENT_DECIMALS: u32 = 2;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParetoError {
    #[error("Undefined: empty series")]
    EmptySeries,
    #[error("Undefined: zero-sum series")]
    ZeroTotal,
    #[error("Invalid value at row {index}: {value}")]
    InvalidValue { index: usize, value: f64 },
}

/// Round a value to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Running share of the total for each row, in percent.
///
/// `cumulative[i] = 100 * sum(values[0..=i]) / sum(values)`, rounded to
/// [`PERCENT_DECIMALS`]. The input order is used as-is; callers sort first.
pub fn cumulative_percentages(values: &[f64]) -> Result<Vec<f64>, ParetoError> {
    if values.is_empty() {
        return Err(ParetoError::EmptySeries);
    }

    if let Some((index, &value)) = values
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite() || **v < 0.0)
    {
        return Err(ParetoError::InvalidValue { index, value });
    }

    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        return Err(ParetoError::ZeroTotal);
    }

    let mut running = 0.0_f64;
    Ok(values
        .iter()
        .map(|v| {
            running += *v;
            round_to(running / total * 100.0, PERCENT_DECIMALS)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_percentages() {
        let values = [954.0, 923.0, 559.0, 477.0, 209.0];
        let cumulative = cumulative_percentages(&values).unwrap();
        let expected = [30.56, 60.12, 78.03, 93.31, 100.0];
        for (got, want) in cumulative.iter().zip(expected) {
            assert!((got - want).abs() <= 0.01, "{} vs {}", got, want);
        }
    }

    #[test]
    fn test_cumulative_is_monotonic_and_ends_at_100() {
        let inputs: [&[f64]; 4] = [
            &[1.0],
            &[7.0, 7.0, 7.0],
            &[1000.0, 0.0, 3.0, 0.5, 12.25],
            &[0.001, 0.002, 0.003, 999_999.0],
        ];
        for values in inputs {
            let cumulative = cumulative_percentages(values).unwrap();
            assert_eq!(cumulative.len(), values.len());
            assert!(cumulative.windows(2).all(|w| w[0] <= w[1]));
            let last = *cumulative.last().unwrap();
            assert!((last - 100.0).abs() <= 0.01);
        }
    }

    #[test]
    fn test_undefined_inputs_are_rejected() {
        assert_eq!(cumulative_percentages(&[]), Err(ParetoError::EmptySeries));
        assert_eq!(
            cumulative_percentages(&[0.0, 0.0]),
            Err(ParetoError::ZeroTotal)
        );
        assert_eq!(
            cumulative_percentages(&[4.0, -1.0]),
            Err(ParetoError::InvalidValue {
                index: 1,
                value: -1.0
            })
        );
        assert!(matches!(
            cumulative_percentages(&[f64::NAN]),
            Err(ParetoError::InvalidValue { index: 0, .. })
        ));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(30.557_335, 2), 30.56);
        assert_eq!(round_to(99.999, 2), 100.0);
        assert_eq!(round_to(2.5, 0), 3.0);
    }
}
