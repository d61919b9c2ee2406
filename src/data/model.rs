use std::collections::BTreeSet;
use std::fmt;

use anyhow::{Result, bail};

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the scalar kinds a spreadsheet yields.
/// Count charts bucket cells in a `BTreeMap`, so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// ISO-8601 date string kept as text for simplicity.
    Date(String),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeMap keys --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        // Integers and floats share a rank so mixed numeric columns sort by value.
        fn rank(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) | Float(_) => 2,
                String(_) => 3,
                Date(_) => 4,
            }
        }
        let ra = rank(self);
        let rb = rank(other);
        if ra != rb {
            return ra.cmp(&rb);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Integer(a), Float(b)) => (*a as f64).total_cmp(b).then(std::cmp::Ordering::Less),
            (Float(a), Integer(b)) => a.total_cmp(&(*b as f64)).then(std::cmp::Ordering::Greater),
            (String(a), String(b)) | (Date(a), Date(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) | CellValue::Date(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.4}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Date(d) => write!(f, "{d}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Numeric view of the cell. Booleans and text are not numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// DType – inferred column type
// ---------------------------------------------------------------------------

/// Column type, inferred from the cells the way dataframe libraries do it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DType {
    Int64,
    Float64,
    Bool,
    Object,
}

impl DType {
    pub fn is_numeric(self) -> bool {
        matches!(self, DType::Int64 | DType::Float64)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::Int64 => "int64",
            DType::Float64 => "float64",
            DType::Bool => "bool",
            DType::Object => "object",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

/// One named column of the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Infer the column type.
    ///
    /// * `int64`   – every cell is an integer and none is null
    /// * `float64` – every non-null cell is numeric (nulls force ints to float)
    /// * `bool`    – every non-null cell is a boolean
    /// * `object`  – anything else, including all-null columns
    pub fn dtype(&self) -> DType {
        let mut non_null = self.values.iter().filter(|v| !v.is_null()).peekable();
        if non_null.peek().is_none() {
            return DType::Object;
        }
        let mut all_int = true;
        let mut all_numeric = true;
        let mut all_bool = true;
        for v in non_null {
            match v {
                CellValue::Integer(_) => all_bool = false,
                CellValue::Float(_) => {
                    all_int = false;
                    all_bool = false;
                }
                CellValue::Bool(_) => {
                    all_int = false;
                    all_numeric = false;
                }
                _ => {
                    all_int = false;
                    all_numeric = false;
                    all_bool = false;
                }
            }
        }
        if all_int && self.null_count() == 0 {
            DType::Int64
        } else if all_numeric {
            DType::Float64
        } else if all_bool {
            DType::Bool
        } else {
            DType::Object
        }
    }

    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    pub fn non_null_count(&self) -> usize {
        self.values.len() - self.null_count()
    }

    /// Numeric cells with nulls skipped. `None` if any non-null cell is not a number.
    pub fn numeric_values(&self) -> Option<Vec<f64>> {
        self.values
            .iter()
            .filter(|v| !v.is_null())
            .map(CellValue::as_f64)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// Ordered named columns of equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Dataset {
    /// Build a dataset from whole columns. Names must be unique and lengths equal.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let n_rows = columns.first().map_or(0, |c| c.values.len());
        let mut seen = BTreeSet::new();
        for col in &columns {
            if !seen.insert(col.name.as_str()) {
                bail!("duplicate column name '{}'", col.name);
            }
            if col.values.len() != n_rows {
                bail!(
                    "column '{}' has {} rows, expected {n_rows}",
                    col.name,
                    col.values.len()
                );
            }
        }
        Ok(Self { columns, n_rows })
    }

    /// Build a dataset from a header and row-major cells. Short rows are
    /// padded with nulls; rows longer than the header are rejected.
    pub fn from_rows(header: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        let width = header.len();
        let mut columns: Vec<Column> = header
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(rows.len())))
            .collect();

        for (row_no, row) in rows.into_iter().enumerate() {
            if row.len() > width {
                bail!("row {row_no} has {} cells but the header has {width}", row.len());
            }
            let pad = width - row.len();
            for (col, cell) in columns
                .iter_mut()
                .zip(row.into_iter().chain(std::iter::repeat(CellValue::Null).take(pad)))
            {
                col.values.push(cell);
            }
        }
        Self::from_columns(columns)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.n_rows
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Exact, case-sensitive lookup.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// The first `n` rows, row-major.
    pub fn head(&self, n: usize) -> Vec<Vec<CellValue>> {
        (0..n.min(self.n_rows))
            .map(|row| self.columns.iter().map(|c| c.values[row].clone()).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(v: &[i64]) -> Vec<CellValue> {
        v.iter().map(|&i| CellValue::Integer(i)).collect()
    }

    #[test]
    fn dtype_inference_follows_nulls_and_kinds() {
        assert_eq!(Column::new("a", ints(&[1, 2])).dtype(), DType::Int64);
        let with_null = Column::new("b", vec![CellValue::Integer(1), CellValue::Null]);
        assert_eq!(with_null.dtype(), DType::Float64);
        let mixed = Column::new("c", vec![CellValue::Integer(1), CellValue::Float(2.5)]);
        assert_eq!(mixed.dtype(), DType::Float64);
        let flags = Column::new("d", vec![CellValue::Bool(true), CellValue::Null]);
        assert_eq!(flags.dtype(), DType::Bool);
        let text = Column::new("e", vec![CellValue::String("x".into()), CellValue::Integer(1)]);
        assert_eq!(text.dtype(), DType::Object);
        assert_eq!(Column::new("f", vec![CellValue::Null]).dtype(), DType::Object);
    }

    #[test]
    fn from_rows_pads_short_rows() {
        let ds = Dataset::from_rows(
            vec!["a".into(), "b".into()],
            vec![ints(&[1, 2]), ints(&[3])],
        )
        .unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.column("b").unwrap().values[1], CellValue::Null);
        assert_eq!(ds.column("b").unwrap().null_count(), 1);
    }

    #[test]
    fn from_rows_rejects_long_rows_and_duplicates() {
        assert!(Dataset::from_rows(vec!["a".into()], vec![ints(&[1, 2])]).is_err());
        assert!(Dataset::from_rows(vec!["a".into(), "a".into()], vec![]).is_err());
    }

    #[test]
    fn column_lookup_is_case_sensitive() {
        let ds = Dataset::from_columns(vec![Column::new("Penjualan (pcs)", ints(&[1]))]).unwrap();
        assert!(ds.has_column("Penjualan (pcs)"));
        assert!(!ds.has_column("penjualan (pcs)"));
    }

    #[test]
    fn head_is_clamped_to_row_count() {
        let ds = Dataset::from_columns(vec![Column::new("a", ints(&[1, 2, 3]))]).unwrap();
        assert_eq!(ds.head(5).len(), 3);
        assert_eq!(ds.head(2), vec![ints(&[1]), ints(&[2])]);
    }

    #[test]
    fn numeric_cells_order_by_value() {
        assert!(CellValue::Integer(2) > CellValue::Float(1.5));
        assert!(CellValue::Float(0.5) < CellValue::Integer(1));
        assert!(CellValue::Null < CellValue::Integer(-10));
    }
}
