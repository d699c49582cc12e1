use eframe::egui::Rect;

use crate::figure::{PlotId, PointPayload};

// ---------------------------------------------------------------------------
// Hover events (produced by the plot surfaces)
// ---------------------------------------------------------------------------

/// A point under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverPoint {
    pub index: usize,
    /// The point's x category (ROI label).
    pub x: String,
    pub payload: PointPayload,
    /// Screen-space bounds of the rendered marker.
    pub bbox: Rect,
}

/// One hover report from a plot surface. Only `points[0]` is used.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverEvent {
    pub source: PlotId,
    pub points: Vec<HoverPoint>,
}

// ---------------------------------------------------------------------------
// Tooltip
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub image_url: String,
    pub label: String,
    /// Metric value, already formatted to three decimals.
    pub value: String,
}

/// Result of one dispatch. `None` in `anchor`/`content` means "leave the
/// previous value alone".
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipState {
    pub visible: bool,
    pub anchor: Option<Rect>,
    pub content: Option<TooltipContent>,
}

impl TooltipState {
    /// Hide, keep everything else as it was.
    pub fn no_op() -> Self {
        TooltipState {
            visible: false,
            anchor: None,
            content: None,
        }
    }
}

/// Tooltip as retained by the UI between dispatches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tooltip {
    pub visible: bool,
    pub anchor: Option<Rect>,
    pub content: Option<TooltipContent>,
}

impl Tooltip {
    pub fn apply(&mut self, update: TooltipState) {
        self.visible = update.visible;
        if let Some(anchor) = update.anchor {
            self.anchor = Some(anchor);
        }
        if let Some(content) = update.content {
            self.content = Some(content);
        }
    }
}

pub fn format_value(value: f64) -> String {
    format!("{value:.3}")
}

/// Pick the active hover among the four plot surfaces and describe the
/// tooltip for it.
///
/// The first non-empty slot in plot order wins. With nothing hovered, or a
/// hover carrying no points, the result is [`TooltipState::no_op`].
pub fn dispatch(events: &[Option<HoverEvent>; 4]) -> TooltipState {
    let Some(event) = events.iter().flatten().next() else {
        return TooltipState::no_op();
    };
    let Some(point) = event.points.first() else {
        log::debug!("hover from {:?} carried no points", event.source);
        return TooltipState::no_op();
    };

    log::debug!(
        "tooltip for {} (point {}) from {:?}",
        point.x,
        point.index,
        event.source
    );
    TooltipState {
        visible: true,
        anchor: Some(point.bbox),
        content: Some(TooltipContent {
            image_url: point.payload.img_url.clone(),
            label: point.x.clone(),
            value: format_value(point.payload.value),
        }),
    }
}
