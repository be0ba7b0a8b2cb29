//! Status bar UI components for the faceup GUI.

use egui::{
    Align, Button, Color32, CornerRadius, Layout, Margin, Response, RichText, Spinner, Stroke,
    TopBottomPanel, Ui, vec2,
};
use faceup_core::{UploadStatus, WorkflowPhase};

use crate::{FaceupApp, theme};

impl FaceupApp {
    /// Renders the top status bar with quick stats and actions.
    pub fn show_status_bar(&mut self, ctx: &egui::Context) {
        let palette = theme::palette();
        TopBottomPanel::top("faceup_status_bar")
            .frame(
                egui::Frame::new()
                    .fill(palette.panel_dark)
                    .stroke(Stroke::new(1.0, palette.outline))
                    .inner_margin(Margin::symmetric(20, 16)),
            )
            .show(ctx, |ui| {
                ui.vertical(|ui| {
                    ui.spacing_mut().item_spacing.y = 6.0;
                    ui.horizontal(|ui| {
                        ui.heading(RichText::new("Faceup").size(26.0).strong());
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            self.draw_status_badge(ui, palette);
                        });
                    });

                    ui.label(RichText::new(&self.status_line).color(palette.subtle_text));

                    if let Some(err) = &self.last_error {
                        ui.colored_label(palette.danger, err);
                    } else if self.workflow.image().is_none() {
                        ui.label(
                            RichText::new("Pick a photo to begin.").color(palette.subtle_text),
                        );
                    }

                    ui.add_space(6.0);
                    self.draw_status_chips(ui, palette);
                    ui.add_space(10.0);
                    self.draw_quick_actions(ui, palette, ctx);
                });
            });
    }

    fn draw_status_badge(&self, ui: &mut Ui, palette: theme::Palette) {
        let (label, color) = match self.workflow.phase() {
            WorkflowPhase::Idle => ("Ready", palette.success),
            WorkflowPhase::ImageSelected => ("Photo loaded", palette.accent),
            WorkflowPhase::Detecting => ("Detecting...", palette.accent),
            WorkflowPhase::DetectionComplete => ("Faces ready", palette.success),
            WorkflowPhase::Uploading => ("Uploading...", palette.accent),
        };

        egui::Frame::new()
            .fill(palette.panel_light)
            .stroke(Stroke::new(1.0, color))
            .corner_radius(CornerRadius::same(64))
            .inner_margin(Margin::symmetric(14, 6))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    if self.is_busy() {
                        ui.add(Spinner::new().size(16.0));
                    }
                    ui.label(RichText::new(label).size(15.0).strong());
                });
            });
    }

    fn draw_status_chips(&self, ui: &mut Ui, palette: theme::Palette) {
        ui.horizontal_wrapped(|ui| {
            let face_count = self.workflow.face_count();
            self.status_chip(
                ui,
                palette,
                format!("Faces {face_count}"),
                if face_count == 0 {
                    palette.subtle_text
                } else {
                    palette.accent
                },
            );

            if let Some((width, height)) = self.workflow.native_size() {
                self.status_chip(ui, palette, format!("{width}x{height} px"), palette.accent);
            }

            self.status_chip(
                ui,
                palette,
                format!("{} detector", self.settings.detector.performance.as_label()),
                palette.subtle_text,
            );

            let (upload_text, upload_color) = self.upload_chip(palette);
            self.status_chip(ui, palette, upload_text, upload_color);
        });
    }

    fn draw_quick_actions(&mut self, ui: &mut Ui, palette: theme::Palette, ctx: &egui::Context) {
        ui.horizontal_wrapped(|ui| {
            if self
                .quick_action_button(ui, palette, "Select Photo", "Pick a file to scan", true)
                .clicked()
            {
                self.open_image_dialog(ctx);
            }

            let has_image = self.workflow.image().is_some();
            if self
                .quick_action_button(ui, palette, "Detect Faces", "Re-run detection", has_image)
                .clicked()
            {
                self.begin_detection();
            }

            let upload_enabled = has_image && !self.workflow.upload_status().is_in_progress();
            if self
                .quick_action_button(
                    ui,
                    palette,
                    "Upload Photo",
                    "Send to the store",
                    upload_enabled,
                )
                .clicked()
            {
                self.begin_upload();
            }
        });
    }

    fn quick_action_button(
        &self,
        ui: &mut Ui,
        palette: theme::Palette,
        title: &str,
        subtitle: &str,
        enabled: bool,
    ) -> Response {
        let text = format!("{title}\n{subtitle}");
        ui.add_enabled(
            enabled,
            Button::new(RichText::new(text).size(15.0))
                .wrap()
                .min_size(vec2(150.0, 64.0))
                .fill(if enabled {
                    palette.panel_light
                } else {
                    palette.panel_dark
                })
                .stroke(Stroke::new(1.0, palette.outline))
                .corner_radius(CornerRadius::same(16)),
        )
    }

    pub(crate) fn status_chip(
        &self,
        ui: &mut Ui,
        palette: theme::Palette,
        text: impl Into<String>,
        accent: Color32,
    ) {
        egui::Frame::new()
            .fill(palette.panel_dark)
            .stroke(Stroke::new(1.0, accent))
            .corner_radius(CornerRadius::same(24))
            .inner_margin(Margin::symmetric(12, 4))
            .show(ui, |ui| {
                ui.label(
                    RichText::new(text.into())
                        .size(14.0)
                        .color(palette.subtle_text),
                );
            });
    }

    fn upload_chip(&self, palette: theme::Palette) -> (String, Color32) {
        match self.workflow.upload_status() {
            UploadStatus::NotStarted => ("Upload not started".to_string(), palette.subtle_text),
            UploadStatus::InProgress => ("Upload running".to_string(), palette.warning),
            UploadStatus::Succeeded(key) => (format!("Uploaded {key}"), palette.success),
            UploadStatus::Failed(err) => (format!("Upload failed ({err})"), palette.danger),
        }
    }
}
