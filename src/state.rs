use crate::config::DashboardConfig;
use crate::data::error::ColumnNotFoundError;
use crate::data::model::MetricTable;
use crate::figure::{build_panels, PanelFigure, PlotId};
use crate::hover::{HoverEvent, Tooltip};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. Built once in `main` and
/// owned by the app; handlers receive it by `&mut`.
pub struct AppState {
    pub config: DashboardConfig,

    /// Human-readable origin of the current table.
    pub source_name: String,

    /// Current table snapshot (replaced wholesale on upload).
    pub table: MetricTable,

    /// One figure per plot surface, derived from `table`.
    pub figures: Vec<PanelFigure>,

    /// Latest hover value reported by each plot, indexed by [`PlotId::index`].
    pub hover: [Option<HoverEvent>; 4],

    pub tooltip: Tooltip,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(
        config: DashboardConfig,
        source_name: String,
        table: MetricTable,
    ) -> Result<Self, ColumnNotFoundError> {
        let figures = build_panels(&table, &config.panels)?;
        Ok(Self {
            config,
            source_name,
            table,
            figures,
            hover: Default::default(),
            tooltip: Tooltip::default(),
            status_message: None,
        })
    }

    /// Swap in a freshly loaded table. Figures are rebuilt first so a
    /// failure leaves the current snapshot untouched.
    pub fn replace_table(
        &mut self,
        source_name: String,
        table: MetricTable,
    ) -> Result<(), ColumnNotFoundError> {
        let figures = build_panels(&table, &self.config.panels)?;
        self.source_name = source_name;
        self.table = table;
        self.figures = figures;
        self.hover = Default::default();
        self.tooltip = Tooltip::default();
        self.status_message = None;
        Ok(())
    }

    /// Hover value currently recorded for `plot`.
    pub fn hover_of(&self, plot: PlotId) -> Option<&HoverEvent> {
        self.hover[plot.index()].as_ref()
    }
}
