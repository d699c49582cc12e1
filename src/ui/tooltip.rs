use eframe::egui::{self, Align2, Order, RichText};

use crate::color;
use crate::config::DashboardConfig;
use crate::hover::Tooltip;

/// Gap between the hovered marker and the tooltip box.
const ANCHOR_GAP: f32 = 8.0;

/// Floating tooltip to the right of the hovered marker.
pub fn show(ctx: &egui::Context, tooltip: &Tooltip, config: &DashboardConfig) {
    if !tooltip.visible {
        return;
    }
    let (Some(anchor), Some(content)) = (tooltip.anchor, &tooltip.content) else {
        return;
    };

    let pos = egui::pos2(anchor.right() + ANCHOR_GAP, anchor.center().y);
    egui::Area::new(egui::Id::new("graph-tooltip"))
        .order(Order::Tooltip)
        .fixed_pos(pos)
        .pivot(Align2::LEFT_CENTER)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_width(config.tooltip_width);
                ui.vertical_centered(|ui| {
                    ui.add(
                        egui::Image::new(content.image_url.clone())
                            .max_width(config.tooltip_width * config.tooltip_image_fraction),
                    );
                });
                ui.label(
                    RichText::new(&content.label)
                        .heading()
                        .strong()
                        .color(color::TOOLTIP_LABEL),
                );
                ui.label(format!("Value = {}", content.value));
            });
        });
}
