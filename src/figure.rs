use eframe::egui::Color32;

use crate::color::ColorScale;
use crate::config::PanelConfig;
use crate::data::error::ColumnNotFoundError;
use crate::data::model::{Metric, MetricTable};

// ---------------------------------------------------------------------------
// PlotSpec – the per-metric scatter description
// ---------------------------------------------------------------------------

/// Per-point data carried alongside the marker for hover lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct PointPayload {
    pub value: f64,
    pub img_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    /// Category on the x axis (the ROI label).
    pub x: String,
    pub y: f64,
    pub intensity: f64,
    pub payload: PointPayload,
}

/// Read-only scatter description for one metric column.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSpec {
    pub metric: Metric,
    pub axis_label: String,
    pub points: Vec<ScatterPoint>,
    pub color_scale: ColorScale,
    /// Min/max of the finite intensities; `None` if there are none.
    pub intensity_range: Option<(f64, f64)>,
}

impl PlotSpec {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Marker colour of point `index`.
    pub fn color_at(&self, index: usize) -> Color32 {
        let intensity = self.points[index].intensity;
        self.color_scale.color_for(intensity, self.intensity_range)
    }
}

/// Build the scatter spec for `column` of `table`: one point per row, in
/// table order, coloured by its own value on the reversed plasma scale.
pub fn build(
    table: &MetricTable,
    column: &str,
    axis_label: &str,
) -> Result<PlotSpec, ColumnNotFoundError> {
    let metric = Metric::from_column(column)?;

    let points: Vec<ScatterPoint> = table
        .rows()
        .iter()
        .map(|row| {
            let value = row.value(metric);
            ScatterPoint {
                x: row.label.clone(),
                y: value,
                intensity: value,
                payload: PointPayload {
                    value,
                    img_url: row.img_url.clone(),
                },
            }
        })
        .collect();

    let intensity_range = finite_range(points.iter().map(|p| p.intensity));

    Ok(PlotSpec {
        metric,
        axis_label: axis_label.to_string(),
        points,
        color_scale: ColorScale::plasma_reversed(),
        intensity_range,
    })
}

fn finite_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

// ---------------------------------------------------------------------------
// Panel figures – the four specs laid out on the dashboard
// ---------------------------------------------------------------------------

/// Identifies one of the four plot surfaces, in display/priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlotId {
    Graph1,
    Graph2,
    Graph3,
    Graph4,
}

impl PlotId {
    pub const ALL: [PlotId; 4] = [PlotId::Graph1, PlotId::Graph2, PlotId::Graph3, PlotId::Graph4];

    pub fn index(self) -> usize {
        match self {
            PlotId::Graph1 => 0,
            PlotId::Graph2 => 1,
            PlotId::Graph3 => 2,
            PlotId::Graph4 => 3,
        }
    }

    /// Stable egui id salt for the plot widget.
    pub fn key(self) -> &'static str {
        match self {
            PlotId::Graph1 => "graph1",
            PlotId::Graph2 => "graph2",
            PlotId::Graph3 => "graph3",
            PlotId::Graph4 => "graph4",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelFigure {
    pub plot: PlotId,
    pub title: String,
    pub spec: PlotSpec,
}

/// Build every configured panel from the same table snapshot. Panels past
/// the fourth have no plot surface and are skipped.
pub fn build_panels(
    table: &MetricTable,
    panels: &[PanelConfig],
) -> Result<Vec<PanelFigure>, ColumnNotFoundError> {
    if panels.len() > PlotId::ALL.len() {
        log::warn!(
            "{} panels configured, only the first {} are shown",
            panels.len(),
            PlotId::ALL.len()
        );
    }
    PlotId::ALL
        .into_iter()
        .zip(panels)
        .map(|(plot, panel)| {
            build(table, panel.metric.column(), &panel.axis_label).map(|spec| PanelFigure {
                plot,
                title: panel.title.clone(),
                spec,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::data::model::MetricRow;

    fn table() -> MetricTable {
        let row = |label: &str, ev: f64| MetricRow {
            label: label.to_string(),
            ev,
            msll: -ev,
            skew: 0.0,
            kurtosis: 3.0,
            img_url: format!("http://img/{label}.png"),
        };
        MetricTable::from_rows(vec![row("ROI_2", 0.5), row("ROI_1", 0.9), row("ROI_3", 0.1)])
    }

    #[test]
    fn test_one_point_per_row_with_payload() {
        let table = table();
        let spec = build(&table, "EV", "Explained Variance (EV)").unwrap();
        assert_eq!(spec.len(), table.len());
        for (point, row) in spec.points.iter().zip(table.rows()) {
            assert_eq!(point.x, row.label);
            assert_eq!(point.y, row.ev);
            assert_eq!(point.intensity, row.ev);
            assert_eq!(
                point.payload,
                PointPayload {
                    value: row.ev,
                    img_url: row.img_url.clone()
                }
            );
        }
        assert_eq!(spec.axis_label, "Explained Variance (EV)");
    }

    #[test]
    fn test_build_is_deterministic() {
        let table = table();
        assert_eq!(build(&table, "MSLL", "m"), build(&table, "MSLL", "m"));
    }

    #[test]
    fn test_unknown_column() {
        let err = build(&table(), "R2", "R²").unwrap_err();
        assert_eq!(err.column, "R2");
    }

    #[test]
    fn test_intensity_range_skips_nan() {
        let mut rows = table().rows().to_vec();
        rows[0].ev = f64::NAN;
        let spec = build(&MetricTable::from_rows(rows), "EV", "").unwrap();
        assert_eq!(spec.intensity_range, Some((0.1, 0.5)));
    }

    #[test]
    fn test_empty_table_gives_empty_spec() {
        let spec = build(&MetricTable::default(), "Skew", "Skew").unwrap();
        assert!(spec.is_empty());
        assert_eq!(spec.intensity_range, None);
    }

    #[test]
    fn test_low_values_get_warm_colours() {
        let spec = build(&table(), "EV", "").unwrap();
        // Rows are ROI_1 (0.9), ROI_2 (0.5), ROI_3 (0.1).
        assert_eq!(spec.color_at(2), Color32::from_rgb(0xf0, 0xf9, 0x21));
        assert_eq!(spec.color_at(0), Color32::from_rgb(0x0d, 0x08, 0x87));
    }

    #[test]
    fn test_build_panels_from_default_config() {
        let config = DashboardConfig::default();
        let figures = build_panels(&table(), &config.panels).unwrap();
        let metrics: Vec<Metric> = figures.iter().map(|f| f.spec.metric).collect();
        assert_eq!(metrics, Metric::ALL);
        assert_eq!(figures[0].plot, PlotId::Graph1);
        assert_eq!(figures[1].title, "Mean Squared Log Loss");
    }
}
