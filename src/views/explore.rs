use crate::data::describe::{
    self, BoxPlotUnavailable, BoxSummary, ColumnInfo, Description,
};
use crate::data::model::{CellValue, Dataset};

/// Everything the exploration page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorationReport {
    pub column_names: Vec<String>,
    pub n_rows: usize,
    pub head: Vec<Vec<CellValue>>,
    pub info: Vec<ColumnInfo>,
    pub description: Description,
    pub null_counts: Vec<(String, usize)>,
    /// `None` only for a dataset without columns.
    pub chart: Option<ColumnChart>,
}

/// Inputs for the side-by-side count chart and box plot of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnChart {
    pub column: String,
    pub counts: Vec<(CellValue, usize)>,
    pub box_plot: Result<BoxSummary, BoxPlotUnavailable>,
}

/// Build the exploration report. `selected` falls back to the first column
/// when unset or not in the dataset.
pub fn explore(dataset: &Dataset, selected: Option<&str>, head_rows: usize) -> ExplorationReport {
    let chart = selected
        .and_then(|name| dataset.column(name))
        .or_else(|| dataset.columns().first())
        .map(|column| ColumnChart {
            column: column.name.clone(),
            counts: describe::value_counts(column).into_iter().collect(),
            box_plot: describe::box_summary(column),
        });

    ExplorationReport {
        column_names: dataset.column_names().into_iter().map(str::to_string).collect(),
        n_rows: dataset.len(),
        head: dataset.head(head_rows),
        info: describe::info(dataset),
        description: describe::describe(dataset),
        null_counts: describe::null_counts(dataset),
        chart,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Column, DType};

    fn dataset() -> Dataset {
        let rows = 8;
        Dataset::from_columns(vec![
            Column::new("hari", (0..rows).map(|i| CellValue::Integer(i % 7)).collect()),
            Column::new(
                "cuaca",
                (0..rows)
                    .map(|i| CellValue::String(if i % 2 == 0 { "cerah" } else { "hujan" }.into()))
                    .collect(),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn report_covers_every_section() {
        let report = explore(&dataset(), None, 5);
        assert_eq!(report.n_rows, 8);
        assert_eq!(report.head.len(), 5);
        assert_eq!(report.info[1].dtype, DType::Object);
        assert_eq!(report.null_counts, vec![("hari".to_string(), 0), ("cuaca".to_string(), 0)]);
        let Description::Numeric(stats) = &report.description else {
            panic!("expected numeric description");
        };
        assert_eq!(stats.len(), 1);
    }

    #[test]
    fn chart_defaults_to_first_column() {
        let report = explore(&dataset(), Some("missing"), 5);
        let chart = report.chart.unwrap();
        assert_eq!(chart.column, "hari");
        assert_eq!(chart.counts[0], (CellValue::Integer(0), 2));
        assert!(chart.box_plot.is_ok());
    }

    #[test]
    fn text_column_has_counts_but_no_box_plot() {
        let chart = explore(&dataset(), Some("cuaca"), 5).chart.unwrap();
        assert_eq!(chart.counts.len(), 2);
        assert_eq!(
            chart.box_plot,
            Err(BoxPlotUnavailable::NonNumeric { dtype: DType::Object })
        );
    }
}
