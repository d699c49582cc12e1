use super::error::ColumnNotFoundError;

// ---------------------------------------------------------------------------
// Metric – the four numeric evaluation columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    /// Explained variance.
    Ev,
    /// Mean squared log loss.
    Msll,
    Skew,
    Kurtosis,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Metric::Ev, Metric::Msll, Metric::Skew, Metric::Kurtosis];

    /// Header name of the column in the source CSV.
    pub fn column(self) -> &'static str {
        match self {
            Metric::Ev => "EV",
            Metric::Msll => "MSLL",
            Metric::Skew => "Skew",
            Metric::Kurtosis => "Kurtosis",
        }
    }

    /// Resolve a column header to a metric (exact, case-sensitive match).
    pub fn from_column(name: &str) -> Result<Metric, ColumnNotFoundError> {
        Metric::ALL
            .into_iter()
            .find(|m| m.column() == name)
            .ok_or_else(|| ColumnNotFoundError {
                column: name.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// MetricRow – one evaluated region of interest
// ---------------------------------------------------------------------------

/// One row of the evaluation CSV. Missing numeric cells are kept as NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    pub label: String,
    pub ev: f64,
    pub msll: f64,
    pub skew: f64,
    pub kurtosis: f64,
    pub img_url: String,
}

impl MetricRow {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Ev => self.ev,
            Metric::Msll => self.msll,
            Metric::Skew => self.skew,
            Metric::Kurtosis => self.kurtosis,
        }
    }
}

// ---------------------------------------------------------------------------
// MetricTable – the loaded snapshot
// ---------------------------------------------------------------------------

/// Rows ordered ascending by `label`. Built once per load and never mutated;
/// a reload replaces the whole table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricTable {
    rows: Vec<MetricRow>,
}

impl MetricTable {
    /// Sort by label (stable, byte-wise string order) and freeze.
    pub fn from_rows(mut rows: Vec<MetricRow>) -> Self {
        rows.sort_by(|a, b| a.label.cmp(&b.label));
        MetricTable { rows }
    }

    pub fn rows(&self) -> &[MetricRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(label: &str) -> MetricRow {
        MetricRow {
            label: label.to_string(),
            ev: 0.1,
            msll: -0.2,
            skew: 0.3,
            kurtosis: 1.4,
            img_url: format!("http://img/{label}.png"),
        }
    }

    #[test]
    fn test_from_rows_sorts_by_label() {
        let table = MetricTable::from_rows(vec![row("ROI_2"), row("ROI_10"), row("ROI_1")]);
        let labels: Vec<&str> = table.rows().iter().map(|r| r.label.as_str()).collect();
        // String ordering, not natural ordering.
        assert_eq!(labels, ["ROI_1", "ROI_10", "ROI_2"]);
    }

    #[test]
    fn test_empty_table() {
        let table = MetricTable::from_rows(Vec::new());
        assert!(table.is_empty());
        assert!(!MetricTable::from_rows(vec![row("ROI_1")]).is_empty());
    }

    #[test]
    fn test_metric_from_column() {
        assert_eq!(Metric::from_column("MSLL"), Ok(Metric::Msll));
        assert_eq!(
            Metric::from_column("msll"),
            Err(ColumnNotFoundError {
                column: "msll".to_string()
            })
        );
    }

    #[test]
    fn test_row_value_per_metric() {
        let r = row("ROI_1");
        assert_eq!(r.value(Metric::Ev), 0.1);
        assert_eq!(r.value(Metric::Msll), -0.2);
        assert_eq!(r.value(Metric::Skew), 0.3);
        assert_eq!(r.value(Metric::Kurtosis), 1.4);
    }
}
