use std::collections::BTreeMap;

use super::model::{CellValue, Column, DType, Dataset};

// ---------------------------------------------------------------------------
// Column info (dtype + non-null count)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: DType,
    pub non_null: usize,
}

/// Per-column dtype and non-null count, in column order.
pub fn info(dataset: &Dataset) -> Vec<ColumnInfo> {
    dataset
        .columns()
        .iter()
        .map(|c| ColumnInfo {
            name: c.name.clone(),
            dtype: c.dtype(),
            non_null: c.non_null_count(),
        })
        .collect()
}

/// Per-column null counts, in column order.
pub fn null_counts(dataset: &Dataset) -> Vec<(String, usize)> {
    dataset
        .columns()
        .iter()
        .map(|c| (c.name.clone(), c.null_count()))
        .collect()
}

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

/// count / mean / std / min / quartiles / max of one numeric column.
/// `std` is the sample standard deviation and is `None` below two values.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// count / unique / top / freq of one non-numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalSummary {
    pub column: String,
    pub count: usize,
    pub unique: usize,
    pub top: Option<CellValue>,
    pub freq: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Description {
    Numeric(Vec<NumericSummary>),
    /// Used when the dataset has no numeric column at all.
    Categorical(Vec<CategoricalSummary>),
}

/// Describe numeric columns, or every column categorically when none is numeric.
pub fn describe(dataset: &Dataset) -> Description {
    let numeric: Vec<NumericSummary> = dataset
        .columns()
        .iter()
        .filter(|c| c.dtype().is_numeric())
        .filter_map(numeric_summary)
        .collect();
    if !numeric.is_empty() {
        return Description::Numeric(numeric);
    }
    Description::Categorical(dataset.columns().iter().map(categorical_summary).collect())
}

fn numeric_summary(column: &Column) -> Option<NumericSummary> {
    let mut values = column.numeric_values()?;
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;
    let std = (n > 1).then(|| {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (n - 1) as f64).sqrt()
    });
    Some(NumericSummary {
        column: column.name.clone(),
        count: n,
        mean,
        std,
        min: values[0],
        q25: quantile_sorted(&values, 0.25),
        median: quantile_sorted(&values, 0.5),
        q75: quantile_sorted(&values, 0.75),
        max: values[n - 1],
    })
}

fn categorical_summary(column: &Column) -> CategoricalSummary {
    let counts = value_counts(column);
    // Highest count wins; ties go to the smallest value.
    let top = counts
        .iter()
        .fold(None::<(&CellValue, usize)>, |best, (v, &n)| match best {
            Some((_, bn)) if bn >= n => best,
            _ => Some((v, n)),
        });
    CategoricalSummary {
        column: column.name.clone(),
        count: column.non_null_count(),
        unique: counts.len(),
        top: top.map(|(v, _)| v.clone()),
        freq: top.map_or(0, |(_, n)| n),
    }
}

/// Quantile with linear interpolation between closest ranks. `sorted` must be
/// ascending and non-empty.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

// ---------------------------------------------------------------------------
// Chart inputs
// ---------------------------------------------------------------------------

/// Frequency of every distinct non-null value, ordered by value.
pub fn value_counts(column: &Column) -> BTreeMap<CellValue, usize> {
    let mut counts = BTreeMap::new();
    for v in column.values.iter().filter(|v| !v.is_null()) {
        *counts.entry(v.clone()).or_insert(0) += 1;
    }
    counts
}

/// Tukey box-plot layout: whiskers reach the most extreme values within
/// 1.5 IQR of the box; anything beyond is an outlier.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

/// Why a box plot cannot be drawn for a column.
#[derive(Debug, Clone, PartialEq)]
pub enum BoxPlotUnavailable {
    NonNumeric { dtype: DType },
    NoValues,
}

impl std::fmt::Display for BoxPlotUnavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoxPlotUnavailable::NonNumeric { dtype } => {
                write!(f, "box plot needs a numeric column, this one is {dtype}")
            }
            BoxPlotUnavailable::NoValues => write!(f, "column has no values to plot"),
        }
    }
}

/// Box-plot summary of a numeric column. Nulls are skipped.
pub fn box_summary(column: &Column) -> Result<BoxSummary, BoxPlotUnavailable> {
    let dtype = column.dtype();
    if !dtype.is_numeric() {
        return Err(BoxPlotUnavailable::NonNumeric { dtype });
    }
    let mut values = column
        .numeric_values()
        .ok_or(BoxPlotUnavailable::NonNumeric { dtype })?;
    if values.is_empty() {
        return Err(BoxPlotUnavailable::NoValues);
    }
    values.sort_by(f64::total_cmp);

    let q1 = quantile_sorted(&values, 0.25);
    let median = quantile_sorted(&values, 0.5);
    let q3 = quantile_sorted(&values, 0.75);
    let iqr = q3 - q1;
    let lo_fence = q1 - 1.5 * iqr;
    let hi_fence = q3 + 1.5 * iqr;

    let in_fence = |v: &f64| (lo_fence..=hi_fence).contains(v);
    let (inside, outliers): (Vec<f64>, Vec<f64>) = values.iter().partition(|v| in_fence(v));
    let lower_whisker = inside.iter().copied().fold(f64::INFINITY, f64::min).min(q1);
    let upper_whisker = inside.iter().copied().fold(f64::NEG_INFINITY, f64::max).max(q3);

    Ok(BoxSummary {
        lower_whisker,
        q1,
        median,
        q3,
        upper_whisker,
        outliers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(name: &str, v: &[i64]) -> Column {
        Column::new(name, v.iter().map(|&i| CellValue::Integer(i)).collect())
    }

    fn text(name: &str, v: &[&str]) -> Column {
        Column::new(name, v.iter().map(|s| CellValue::String(s.to_string())).collect())
    }

    #[test]
    fn quantiles_interpolate_linearly() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_sorted(&v, 0.25), 1.75);
        assert_eq!(quantile_sorted(&v, 0.5), 2.5);
        assert_eq!(quantile_sorted(&v, 0.75), 3.25);
        assert_eq!(quantile_sorted(&[7.0], 0.5), 7.0);
    }

    #[test]
    fn describe_uses_sample_std_and_skips_text() {
        let ds = Dataset::from_columns(vec![
            ints("a", &[2, 4, 4, 4, 5, 5, 7, 9]),
            text("b", &["x", "y", "x", "x", "y", "x", "x", "x"]),
        ])
        .unwrap();
        let Description::Numeric(stats) = describe(&ds) else {
            panic!("expected numeric description");
        };
        assert_eq!(stats.len(), 1);
        let a = &stats[0];
        assert_eq!(a.count, 8);
        assert_eq!(a.mean, 5.0);
        assert!((a.std.unwrap() - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert_eq!((a.min, a.max), (2.0, 9.0));
        assert_eq!(a.median, 4.5);
    }

    #[test]
    fn describe_falls_back_to_categorical() {
        let ds = Dataset::from_columns(vec![text("b", &["x", "y", "y"])]).unwrap();
        let Description::Categorical(stats) = describe(&ds) else {
            panic!("expected categorical description");
        };
        assert_eq!(stats[0].unique, 2);
        assert_eq!(stats[0].top, Some(CellValue::String("y".into())));
        assert_eq!(stats[0].freq, 2);
    }

    #[test]
    fn single_value_has_no_std() {
        let ds = Dataset::from_columns(vec![ints("a", &[3])]).unwrap();
        let Description::Numeric(stats) = describe(&ds) else {
            panic!("expected numeric description");
        };
        assert_eq!(stats[0].std, None);
    }

    #[test]
    fn value_counts_skip_nulls() {
        let col = Column::new(
            "k",
            vec![CellValue::Integer(1), CellValue::Null, CellValue::Integer(1), CellValue::Integer(0)],
        );
        let counts: Vec<_> = value_counts(&col).into_iter().collect();
        assert_eq!(
            counts,
            vec![(CellValue::Integer(0), 1), (CellValue::Integer(1), 2)]
        );
    }

    #[test]
    fn box_summary_separates_outliers() {
        let col = ints("a", &[1, 2, 3, 4, 5, 6, 7, 8, 100]);
        let b = box_summary(&col).unwrap();
        assert_eq!((b.q1, b.median, b.q3), (3.0, 5.0, 7.0));
        assert_eq!(b.lower_whisker, 1.0);
        assert_eq!(b.upper_whisker, 8.0);
        assert_eq!(b.outliers, vec![100.0]);
    }

    #[test]
    fn box_summary_rejects_text() {
        let err = box_summary(&text("b", &["x"])).unwrap_err();
        assert_eq!(err, BoxPlotUnavailable::NonNumeric { dtype: DType::Object });
    }

    #[test]
    fn null_counts_follow_column_order() {
        let ds = Dataset::from_columns(vec![
            Column::new("z", vec![CellValue::Null, CellValue::Integer(1)]),
            ints("a", &[1, 2]),
        ])
        .unwrap();
        assert_eq!(null_counts(&ds), vec![("z".to_string(), 1), ("a".to_string(), 0)]);
        assert_eq!(info(&ds)[0].dtype, DType::Float64);
    }
}
