//! Descriptive statistics over a sequence of numbers.
//!
//! `stdev`/`variance` use the sample formula (n − 1) and need at least two
//! values; `pstdev`/`pvariance` use the population formula.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::error::{CalcError, CalcResult, finite};

/// Statistical operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StatisticsOperation {
    Mean,
    Median,
    Mode,
    /// Sample standard deviation.
    Stdev,
    /// Sample variance.
    Variance,
    /// Population standard deviation.
    Pstdev,
    /// Population variance.
    Pvariance,
    Sum,
    Min,
    Max,
    Range,
    /// Every statistic at once.
    Summary,
}

/// Output of a statistics operation.
#[derive(Debug, Clone, PartialEq)]
pub enum StatisticsOutcome {
    Value(f64),
    Summary(Summary),
}

/// All descriptive statistics for one sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub sum: f64,
    /// Sample standard deviation, absent for a single value.
    pub stdev: Option<f64>,
    /// Sample variance, absent for a single value.
    pub variance: Option<f64>,
}

impl StatisticsOperation {
    /// Wire name of the operation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Mode => "mode",
            Self::Stdev => "stdev",
            Self::Variance => "variance",
            Self::Pstdev => "pstdev",
            Self::Pvariance => "pvariance",
            Self::Sum => "sum",
            Self::Min => "min",
            Self::Max => "max",
            Self::Range => "range",
            Self::Summary => "summary",
        }
    }

    /// Formula used for dispersion statistics, if any.
    pub fn method(self) -> Option<&'static str> {
        match self {
            Self::Stdev | Self::Variance => Some("sample"),
            Self::Pstdev | Self::Pvariance => Some("population"),
            _ => None,
        }
    }

    /// Evaluate the operation over `values`.
    pub fn evaluate(self, values: &[f64]) -> CalcResult<StatisticsOutcome> {
        let value = match self {
            Self::Mean => mean(values)?,
            Self::Median => median(values)?,
            Self::Mode => mode(values)?,
            Self::Stdev => stdev(values)?,
            Self::Variance => variance(values)?,
            Self::Pstdev => pvariance(values)?.sqrt(),
            Self::Pvariance => pvariance(values)?,
            Self::Sum => {
                require(values, 1, "sum")?;
                values.iter().sum()
            }
            Self::Min => min(values)?,
            Self::Max => max(values)?,
            Self::Range => max(values)? - min(values)?,
            Self::Summary => return summary(values).map(StatisticsOutcome::Summary),
        };
        Ok(StatisticsOutcome::Value(finite(value, self.as_str())?))
    }
}

fn require(values: &[f64], at_least: usize, name: &str) -> CalcResult<()> {
    if values.len() < at_least {
        let noun = if at_least == 1 { "value" } else { "values" };
        return Err(CalcError::insufficient_data(format!(
            "{} requires at least {} {}, got {}",
            name,
            at_least,
            noun,
            values.len()
        )));
    }
    Ok(())
}

pub fn mean(values: &[f64]) -> CalcResult<f64> {
    require(values, 1, "mean")?;
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn median(values: &[f64]) -> CalcResult<f64> {
    require(values, 1, "median")?;
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Ok(sorted[mid])
    }
}

/// Most frequent value; the first one encountered wins a tie.
pub fn mode(values: &[f64]) -> CalcResult<f64> {
    require(values, 1, "mode")?;
    // Keyed by bit pattern so that 0.0 and -0.0 collapse together.
    let mut counts: HashMap<u64, (usize, usize)> = HashMap::new();
    for (index, value) in values.iter().enumerate() {
        let key = if *value == 0.0 { 0.0f64 } else { *value }.to_bits();
        counts.entry(key).or_insert((0, index)).0 += 1;
    }
    let (_, first) = counts
        .values()
        .copied()
        .max_by(|(ca, ia), (cb, ib)| ca.cmp(cb).then(ib.cmp(ia)))
        .unwrap_or((0, 0));
    Ok(values[first])
}

fn squared_deviations(values: &[f64]) -> CalcResult<f64> {
    let m = mean(values)?;
    Ok(values.iter().map(|x| (x - m).powi(2)).sum())
}

/// Sample variance.
pub fn variance(values: &[f64]) -> CalcResult<f64> {
    require(values, 2, "variance")?;
    Ok(squared_deviations(values)? / (values.len() - 1) as f64)
}

/// Sample standard deviation.
pub fn stdev(values: &[f64]) -> CalcResult<f64> {
    require(values, 2, "stdev")?;
    Ok(variance(values)?.sqrt())
}

/// Population variance.
pub fn pvariance(values: &[f64]) -> CalcResult<f64> {
    require(values, 1, "pvariance")?;
    Ok(squared_deviations(values)? / values.len() as f64)
}

pub fn min(values: &[f64]) -> CalcResult<f64> {
    require(values, 1, "min")?;
    Ok(values.iter().copied().fold(f64::INFINITY, f64::min))
}

pub fn max(values: &[f64]) -> CalcResult<f64> {
    require(values, 1, "max")?;
    Ok(values.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

/// Compute every statistic for `values`.
pub fn summary(values: &[f64]) -> CalcResult<Summary> {
    require(values, 1, "summary")?;
    let (min, max) = (min(values)?, max(values)?);
    let (stdev, variance) = if values.len() >= 2 {
        (Some(stdev(values)?), Some(variance(values)?))
    } else {
        (None, None)
    };
    Ok(Summary {
        count: values.len(),
        mean: finite(mean(values)?, "mean")?,
        median: finite(median(values)?, "median")?,
        min,
        max,
        range: finite(max - min, "range")?,
        sum: finite(values.iter().sum(), "sum")?,
        stdev: stdev.map(|s| finite(s, "stdev")).transpose()?,
        variance: variance.map(|v| finite(v, "variance")).transpose()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];

    fn value(op: StatisticsOperation, values: &[f64]) -> f64 {
        match op.evaluate(values).unwrap() {
            StatisticsOutcome::Value(v) => v,
            other => panic!("expected scalar, got {:?}", other),
        }
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&DATA).unwrap(), 3.0);
    }

    #[test]
    fn test_sample_and_population_dispersion() {
        assert!((stdev(&DATA).unwrap() - 2.5f64.sqrt()).abs() < 1e-12);
        assert!((variance(&DATA).unwrap() - 2.5).abs() < 1e-12);
        assert!((value(StatisticsOperation::Pvariance, &DATA) - 2.0).abs() < 1e-12);
        assert!((value(StatisticsOperation::Pstdev, &DATA) - 2.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_median_even_and_odd() {
        assert_eq!(median(&[3.0, 1.0, 2.0]).unwrap(), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]).unwrap(), 2.5);
    }

    #[test]
    fn test_mode_first_seen_wins_tie() {
        assert_eq!(mode(&[1.0, 2.0, 2.0, 3.0]).unwrap(), 2.0);
        assert_eq!(mode(&[5.0, 7.0, 7.0, 5.0]).unwrap(), 5.0);
        assert_eq!(mode(&[9.0, 8.0, 7.0]).unwrap(), 9.0);
    }

    #[test]
    fn test_extremes() {
        let scores = [85.0, 92.0, 78.0, 90.0];
        assert_eq!(value(StatisticsOperation::Min, &scores), 78.0);
        assert_eq!(value(StatisticsOperation::Max, &scores), 92.0);
        assert_eq!(value(StatisticsOperation::Range, &scores), 14.0);
        assert_eq!(value(StatisticsOperation::Sum, &scores), 345.0);
    }

    #[test]
    fn test_insufficient_data() {
        assert!(matches!(mean(&[]), Err(CalcError::InsufficientData(_))));
        assert!(matches!(stdev(&[1.0]), Err(CalcError::InsufficientData(_))));
        assert!(matches!(variance(&[1.0]), Err(CalcError::InsufficientData(_))));
        assert!(matches!(
            StatisticsOperation::Summary.evaluate(&[]),
            Err(CalcError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_overflow_is_rejected() {
        let huge = [1e308, 1e308];
        assert!(matches!(
            StatisticsOperation::Sum.evaluate(&huge),
            Err(CalcError::Domain(_))
        ));
        assert!(matches!(
            StatisticsOperation::Summary.evaluate(&huge),
            Err(CalcError::Domain(_))
        ));
        assert_eq!(
            StatisticsOperation::Max.evaluate(&huge).unwrap(),
            StatisticsOutcome::Value(1e308)
        );
    }

    #[test]
    fn test_summary() {
        let StatisticsOutcome::Summary(s) = StatisticsOperation::Summary.evaluate(&DATA).unwrap()
        else {
            panic!("expected summary");
        };
        assert_eq!(s.count, 5);
        assert_eq!(s.mean, 3.0);
        assert_eq!(s.median, 3.0);
        assert_eq!(s.range, 4.0);
        assert!(s.stdev.is_some());

        let single = summary(&[42.0]).unwrap();
        assert_eq!(single.stdev, None);
        assert_eq!(single.range, 0.0);
    }
}
