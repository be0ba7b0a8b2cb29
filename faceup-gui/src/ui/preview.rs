//! Preview panel UI components for the faceup GUI.

use egui::{
    Align, Color32, CornerRadius, Layout, Margin, Rect, RichText, Sense, Stroke, StrokeKind, Ui,
    pos2, vec2,
};
use faceup_core::{DisplayFrame, ScalingPolicy, image_placement, map_box};

use crate::{FaceupApp, theme};

impl FaceupApp {
    /// Renders the main photo preview panel.
    pub fn show_preview(&mut self, ui: &mut Ui) {
        let palette = theme::palette();

        let total_height = ui.available_height();
        let spacing = 12.0;
        let min_preview = 220.0;
        let mut preview_height = (total_height * 0.85).max(min_preview);
        preview_height = preview_height.min(total_height.max(0.0));
        let width = ui.available_width();

        ui.allocate_ui_with_layout(
            vec2(width, preview_height),
            Layout::top_down(Align::Center),
            |ui| {
                egui::Frame::new()
                    .fill(palette.panel_dark)
                    .stroke(Stroke::new(1.0, palette.outline))
                    .corner_radius(CornerRadius::same(28))
                    .inner_margin(Margin::symmetric(18, 18))
                    .show(ui, |ui| {
                        ui.set_min_height(preview_height);
                        self.render_preview_area(ui, palette);
                    });
            },
        );

        ui.add_space(spacing);
        ui.horizontal(|ui| {
            ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                let enabled = self.preview.texture.is_some();
                let label = if self.settings.display.show_overlay {
                    "Hide overlay"
                } else {
                    "Show overlay"
                };
                if ui.add_enabled(enabled, egui::Button::new(label)).clicked() {
                    self.toggle_overlay();
                }
                if let Some((width, height)) = self.workflow.native_size() {
                    ui.label(
                        RichText::new(format!("Native {width}x{height} px"))
                            .color(palette.subtle_text),
                    );
                }
            });
        });
    }

    fn render_preview_area(&mut self, ui: &mut Ui, palette: theme::Palette) {
        let texture = self.preview.texture.clone();
        let native = self.workflow.native_size();
        if let (Some(texture), Some(native)) = (texture, native) {
            let available = ui.available_size();
            if available.x <= 0.0 || available.y <= 0.0 {
                return;
            }
            let (panel, _) = ui.allocate_exact_size(available, Sense::hover());

            let frame = DisplayFrame::new(panel.width(), panel.height());
            let policy = self.scaling_policy();
            let placement = image_placement(native, frame, policy);
            if placement.is_empty() {
                return;
            }

            // Under Fill the placement overhangs the panel; the clip keeps
            // the cropped axis inside it.
            let image_rect = Rect::from_min_size(
                pos2(panel.left() + placement.x, panel.top() + placement.y),
                vec2(placement.width, placement.height),
            );
            let painter = ui.painter().with_clip_rect(panel);
            painter.image(
                texture.id(),
                image_rect,
                Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                Color32::WHITE,
            );

            if self.settings.display.show_overlay {
                self.paint_face_boxes(&painter, panel, native, frame, policy, palette);
            }
        } else {
            ui.vertical_centered(|ui| {
                ui.add_space(64.0);
                ui.heading("Pick a photo from Quick Actions.");
                ui.label("Faces appear here once detection finishes.");
            });
        }
    }

    fn paint_face_boxes(
        &self,
        painter: &egui::Painter,
        panel: Rect,
        native: (u32, u32),
        frame: DisplayFrame,
        policy: ScalingPolicy,
        palette: theme::Palette,
    ) {
        let placement = image_placement(native, frame, policy);
        let scale_x = placement.width / native.0.max(1) as f32;
        let scale_y = placement.height / native.1.max(1) as f32;
        let stroke_scale = scale_x.min(scale_y).max(0.1);
        let stroke = Stroke::new((2.0 * stroke_scale).clamp(0.75, 3.0), palette.accent);

        for face in self.workflow.boxes() {
            let mapped = map_box(*face, native, frame, policy);
            if mapped.is_empty() {
                continue;
            }
            let rect = Rect::from_min_size(
                pos2(panel.left() + mapped.x, panel.top() + mapped.y),
                vec2(mapped.width, mapped.height),
            );
            painter.rect_stroke(rect, 4.0, stroke, StrokeKind::Inside);
        }
    }
}
