use std::collections::BTreeMap;
use std::fmt;

use crate::config::DataSource;
use crate::data::loader;
use crate::figure::PlotId;
use crate::hover::{dispatch, HoverEvent};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Events and their sources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventSource {
    Plot(PlotId),
    Upload,
}

/// A file chosen through the upload control (dialog or drag-and-drop).
#[derive(Clone, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// New hover value of a plot; `None` when the pointer left its points.
    Hover(Option<HoverEvent>),
    Upload(UploadedFile),
}

pub type Handler = fn(&mut AppState, EventSource, UiEvent);

// ---------------------------------------------------------------------------
// Handler registry
// ---------------------------------------------------------------------------

/// Explicit event-source → handler table, run synchronously per event.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: BTreeMap<EventSource, Handler>,
}

impl HandlerRegistry {
    /// Hover handler on all four plots plus the upload handler.
    pub fn with_defaults() -> Self {
        let mut registry = Self::default();
        for plot in PlotId::ALL {
            registry.register(EventSource::Plot(plot), on_hover);
        }
        registry.register(EventSource::Upload, on_upload);
        registry
    }

    /// Register `handler` for `source`, replacing any previous one.
    pub fn register(&mut self, source: EventSource, handler: Handler) {
        self.handlers.insert(source, handler);
    }

    /// Deliver one event. Returns `false` when no handler is registered.
    pub fn emit(&self, state: &mut AppState, source: EventSource, event: UiEvent) -> bool {
        match self.handlers.get(&source) {
            Some(handler) => {
                handler(state, source, event);
                true
            }
            None => {
                log::debug!("no handler for {source:?}, event dropped");
                false
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Record the plot's hover value, then recompute the tooltip from all four.
pub fn on_hover(state: &mut AppState, source: EventSource, event: UiEvent) {
    let (EventSource::Plot(plot), UiEvent::Hover(hover)) = (source, event) else {
        log::debug!("hover handler ignored event from {source:?}");
        return;
    };
    state.hover[plot.index()] = hover;
    let update = dispatch(&state.hover);
    state.tooltip.apply(update);
}

/// Parse the uploaded CSV and, on success, replace table and figures.
/// A rejected upload keeps the current snapshot and reports why.
pub fn on_upload(state: &mut AppState, _source: EventSource, event: UiEvent) {
    let UiEvent::Upload(file) = event else {
        return;
    };
    let name = file.name.clone();
    let source = DataSource::Bytes {
        name: file.name,
        bytes: file.bytes,
    };

    let result = loader::load(&source, state.config.fetch_timeout)
        .and_then(|table| {
            let rows = table.len();
            state.replace_table(name.clone(), table)?;
            Ok(rows)
        });

    match result {
        Ok(rows) => log::info!("Loaded {rows} ROIs from upload {name}"),
        Err(e) => {
            log::warn!("Rejected upload {name}: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::data::loader::parse_csv;
    use crate::figure::PointPayload;
    use crate::hover::HoverPoint;
    use eframe::egui::{pos2, Rect};

    const STARTUP: &str = "\
Label,EV,MSLL,Skew,Kurtosis,IMG_URL
ROI_1,0.8426,-0.4,0.1,3.0,http://img/1.png
ROI_2,0.51,-0.2,0.2,2.8,http://img/2.png
";

    fn state() -> AppState {
        let table = parse_csv(STARTUP.as_bytes()).unwrap();
        AppState::new(DashboardConfig::default(), "startup.csv".to_string(), table).unwrap()
    }

    fn hover(plot: PlotId, label: &str, value: f64) -> HoverEvent {
        HoverEvent {
            source: plot,
            points: vec![HoverPoint {
                index: 0,
                x: label.to_string(),
                payload: PointPayload {
                    value,
                    img_url: format!("http://img/{label}.png"),
                },
                bbox: Rect::from_min_max(pos2(0.0, 0.0), pos2(12.0, 12.0)),
            }],
        }
    }

    #[test]
    fn test_hover_shows_then_unhover_hides() {
        let registry = HandlerRegistry::with_defaults();
        let mut state = state();

        let source = EventSource::Plot(PlotId::Graph2);
        let event = UiEvent::Hover(Some(hover(PlotId::Graph2, "ROI_1", 0.8426)));
        assert!(registry.emit(&mut state, source, event));
        assert!(state.tooltip.visible);
        assert_eq!(state.tooltip.content.as_ref().unwrap().value, "0.843");
        assert!(state.hover_of(PlotId::Graph2).is_some());

        registry.emit(&mut state, source, UiEvent::Hover(None));
        assert!(!state.tooltip.visible);
        // Previous content is retained for the next show.
        assert_eq!(state.tooltip.content.as_ref().unwrap().label, "ROI_1");
        assert!(state.hover_of(PlotId::Graph2).is_none());
    }

    #[test]
    fn test_stale_hover_on_earlier_plot_takes_priority() {
        let registry = HandlerRegistry::with_defaults();
        let mut state = state();
        registry.emit(
            &mut state,
            EventSource::Plot(PlotId::Graph1),
            UiEvent::Hover(Some(hover(PlotId::Graph1, "ROI_1", 0.1))),
        );
        registry.emit(
            &mut state,
            EventSource::Plot(PlotId::Graph3),
            UiEvent::Hover(Some(hover(PlotId::Graph3, "ROI_2", 0.2))),
        );
        assert_eq!(state.tooltip.content.as_ref().unwrap().label, "ROI_1");
    }

    #[test]
    fn test_unregistered_source_is_dropped() {
        let registry = HandlerRegistry::default();
        let mut state = state();
        let handled = registry.emit(
            &mut state,
            EventSource::Plot(PlotId::Graph1),
            UiEvent::Hover(Some(hover(PlotId::Graph1, "ROI_1", 0.1))),
        );
        assert!(!handled);
        assert!(!state.tooltip.visible);
    }

    #[test]
    fn test_upload_replaces_table_and_figures() {
        let registry = HandlerRegistry::with_defaults();
        let mut state = state();
        registry.emit(
            &mut state,
            EventSource::Plot(PlotId::Graph1),
            UiEvent::Hover(Some(hover(PlotId::Graph1, "ROI_1", 0.1))),
        );

        let csv = "Label,EV,MSLL,Skew,Kurtosis,IMG_URL\n\
                   B,0.1,0.1,0.1,0.1,u\nA,0.2,0.2,0.2,0.2,u\nC,0.3,0.3,0.3,0.3,u\n";
        let file = UploadedFile {
            name: "new.csv".to_string(),
            bytes: csv.as_bytes().to_vec(),
        };
        assert!(registry.emit(&mut state, EventSource::Upload, UiEvent::Upload(file)));

        assert_eq!(state.source_name, "new.csv");
        assert_eq!(state.table.len(), 3);
        assert_eq!(state.table.rows()[0].label, "A");
        assert!(state.figures.iter().all(|f| f.spec.len() == 3));
        assert!(state.hover.iter().all(Option::is_none));
        assert!(!state.tooltip.visible);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn test_bad_upload_keeps_current_table() {
        let registry = HandlerRegistry::with_defaults();
        let mut state = state();
        let file = UploadedFile {
            name: "broken.csv".to_string(),
            bytes: b"Label,EV,MSLL,Skew,Kurtosis\nROI_9,0.3,0.1,0.1,0.1\n".to_vec(),
        };
        registry.emit(&mut state, EventSource::Upload, UiEvent::Upload(file));

        assert_eq!(state.source_name, "startup.csv");
        assert_eq!(state.table.len(), 2);
        let msg = state.status_message.unwrap();
        assert!(msg.contains("IMG_URL"), "unexpected message: {msg}");
    }
}
