use std::fmt;
use std::time::Duration;

use crate::data::model::Metric;

/// Evaluation table published alongside the brain-visualisation project.
pub const DEFAULT_DATA_URL: &str = "https://raw.githubusercontent.com/saigerutherford/brainviz-app/main/cross_validation_10fold_evaluation.csv";

// ---------------------------------------------------------------------------
// Data source
// ---------------------------------------------------------------------------

/// Where a metric table comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Url(String),
    /// Uploaded file contents, kept in memory only.
    Bytes { name: String, bytes: Vec<u8> },
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{url}"),
            DataSource::Bytes { name, bytes } => write!(f, "{name} ({} bytes)", bytes.len()),
        }
    }
}

// ---------------------------------------------------------------------------
// Figure / panel configuration
// ---------------------------------------------------------------------------

/// One dashboard panel: which metric, its card title, its y-axis label.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    pub metric: Metric,
    pub title: String,
    pub axis_label: String,
}

impl PanelConfig {
    fn new(metric: Metric, title: &str, axis_label: &str) -> Self {
        PanelConfig {
            metric,
            title: title.to_string(),
            axis_label: axis_label.to_string(),
        }
    }
}

/// Visual parameters shared by the four scatter plots.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureStyle {
    pub width: f32,
    pub height: f32,
    /// Marker diameter in screen points.
    pub marker_size: f32,
    pub marker_line_width: f32,
    pub marker_opacity: f32,
    pub x_axis_title: String,
    pub show_y_grid: bool,
}

impl Default for FigureStyle {
    fn default() -> Self {
        Self {
            width: 450.0,
            height: 300.0,
            marker_size: 12.0,
            marker_line_width: 0.7,
            marker_opacity: 0.8,
            x_axis_title: "ROI".to_string(),
            show_y_grid: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Table loaded at startup.
    pub data_source: DataSource,
    /// Upper bound on the startup HTTP fetch.
    pub fetch_timeout: Duration,
    /// Panels in display order (row-major 2×2 grid).
    pub panels: Vec<PanelConfig>,
    pub figure: FigureStyle,
    pub tooltip_width: f32,
    /// Tooltip image width as a fraction of `tooltip_width`.
    pub tooltip_image_fraction: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_source: DataSource::Url(DEFAULT_DATA_URL.to_string()),
            fetch_timeout: Duration::from_secs(30),
            panels: vec![
                PanelConfig::new(Metric::Ev, "Explained Variance", "Explained Variance (EV)"),
                PanelConfig::new(Metric::Msll, "Mean Squared Log Loss", "Mean Squared Log Loss"),
                PanelConfig::new(Metric::Skew, "Skew", "Skew"),
                PanelConfig::new(Metric::Kurtosis, "Kurtosis", "Kurtosis"),
            ],
            figure: FigureStyle::default(),
            tooltip_width: 250.0,
            tooltip_image_fraction: 0.8,
        }
    }
}
