use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Ui, Vec2};
use egui_plot::{MarkerShape, Plot, PlotPoint, Points};

use crate::color::{self, with_opacity};
use crate::config::FigureStyle;
use crate::figure::{PanelFigure, PlotSpec};
use crate::hover::{HoverEvent, HoverPoint};

const COLOR_BAR_WIDTH: f32 = 14.0;
const COLOR_BAR_STEPS: usize = 48;

// ---------------------------------------------------------------------------
// Metric scatter plot (one grid cell)
// ---------------------------------------------------------------------------

/// Render one metric scatter plot with its colour bar and return what the
/// pointer is over, if anything.
pub fn metric_plot(ui: &mut Ui, figure: &PanelFigure, style: &FigureStyle) -> Option<HoverEvent> {
    let spec = &figure.spec;
    let radius = style.marker_size / 2.0;

    let mut hovered = None;
    ui.horizontal(|ui: &mut Ui| {
        let mut plot = Plot::new(figure.plot.key())
            .width(style.width)
            .height(style.height)
            .x_axis_label(style.x_axis_title.clone())
            .y_axis_label(spec.axis_label.clone())
            // Categorical axis: tick values would only be row positions.
            .x_axis_formatter(|_mark, _range| String::new())
            .show_grid([false, style.show_y_grid])
            .show_x(false)
            .show_y(false);
        if !spec.is_empty() {
            plot = plot.include_x(-0.5).include_x(spec.len() as f64 - 0.5);
        }
        let plot_resp = plot.show(ui, |plot_ui| {
            for (i, point) in spec.points.iter().enumerate() {
                if !point.y.is_finite() {
                    continue;
                }
                let marker = Points::new(vec![[i as f64, point.y]])
                    .name(&point.x)
                    .shape(MarkerShape::Circle)
                    .radius(radius)
                    .filled(true)
                    .color(with_opacity(spec.color_at(i), style.marker_opacity));
                plot_ui.points(marker);
            }
        });

        let centers = marker_centers(spec, |p| plot_resp.transform.position_from_point(&p));

        let painter = ui.painter_at(plot_resp.response.rect);
        let outline = Stroke::new(style.marker_line_width, Color32::BLACK);
        for center in centers.iter().filter(|c| c.is_finite()) {
            painter.circle_stroke(*center, radius, outline);
        }

        hovered = plot_resp
            .response
            .hover_pos()
            .and_then(|pointer| nearest_point(&centers, pointer, radius))
            .map(|index| hover_event(figure, index, centers[index], radius));

        color_bar(ui, spec, style.height);
    });
    hovered
}

/// Screen position of every marker; rows with a missing value get a
/// non-finite position so they never match the pointer.
fn marker_centers(spec: &PlotSpec, to_screen: impl Fn(PlotPoint) -> Pos2) -> Vec<Pos2> {
    spec.points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            if p.y.is_finite() {
                to_screen(PlotPoint::new(i as f64, p.y))
            } else {
                Pos2::new(f32::NAN, f32::NAN)
            }
        })
        .collect()
}

/// Index of the marker closest to `pointer`, if within `max_dist`.
pub fn nearest_point(centers: &[Pos2], pointer: Pos2, max_dist: f32) -> Option<usize> {
    centers
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_finite())
        .map(|(i, c)| (i, c.distance(pointer)))
        .filter(|(_, d)| *d <= max_dist)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

fn hover_event(figure: &PanelFigure, index: usize, center: Pos2, radius: f32) -> HoverEvent {
    let point = &figure.spec.points[index];
    HoverEvent {
        source: figure.plot,
        points: vec![HoverPoint {
            index,
            x: point.x.clone(),
            payload: point.payload.clone(),
            bbox: Rect::from_center_size(center, Vec2::splat(radius * 2.0)),
        }],
    }
}

// ---------------------------------------------------------------------------
// Colour bar
// ---------------------------------------------------------------------------

fn color_bar(ui: &mut Ui, spec: &PlotSpec, height: f32) {
    let size = egui::vec2(COLOR_BAR_WIDTH + 44.0, height);
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let Some((min, max)) = spec.intensity_range else {
        return;
    };
    let painter = ui.painter_at(rect);
    let bar = Rect::from_min_size(
        rect.min + egui::vec2(0.0, 20.0),
        egui::vec2(COLOR_BAR_WIDTH, height - 60.0),
    );

    // Top of the bar is the maximum.
    let step_h = bar.height() / COLOR_BAR_STEPS as f32;
    for step in 0..COLOR_BAR_STEPS {
        let t = 1.0 - (step as f64 + 0.5) / COLOR_BAR_STEPS as f64;
        let value = min + t * (max - min);
        let strip = Rect::from_min_size(
            bar.min + egui::vec2(0.0, step as f32 * step_h),
            egui::vec2(COLOR_BAR_WIDTH, step_h + 0.5),
        );
        let fill = spec.color_scale.color_for(value, spec.intensity_range);
        painter.rect_filled(strip, egui::CornerRadius::ZERO, fill);
    }

    let font = FontId::proportional(10.0);
    let text_x = bar.right() + 4.0;
    for (y, value) in [(bar.top(), max), (bar.bottom(), min)] {
        painter.text(
            Pos2::new(text_x, y),
            Align2::LEFT_CENTER,
            format!("{value:.2}"),
            font.clone(),
            color::TEXT,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_point_within_radius() {
        let centers = [Pos2::new(10.0, 10.0), Pos2::new(30.0, 10.0), Pos2::new(33.0, 12.0)];
        assert_eq!(nearest_point(&centers, Pos2::new(32.0, 11.0), 6.0), Some(2));
        assert_eq!(nearest_point(&centers, Pos2::new(12.0, 9.0), 6.0), Some(0));
    }

    #[test]
    fn test_nearest_point_outside_radius() {
        let centers = [Pos2::new(10.0, 10.0)];
        assert_eq!(nearest_point(&centers, Pos2::new(20.0, 10.0), 6.0), None);
    }

    #[test]
    fn test_nearest_point_skips_missing_values() {
        let centers = [Pos2::new(f32::NAN, f32::NAN), Pos2::new(50.0, 50.0)];
        assert_eq!(nearest_point(&centers, Pos2::new(50.0, 52.0), 6.0), Some(1));
    }
}
