//! Global theme customizations for the faceup GUI.

use egui::{Color32, Context, CornerRadius, Margin, Shadow, Stroke, Visuals};

/// Shared color palette used by the GUI.
#[derive(Clone, Copy)]
pub struct Palette {
    pub canvas: Color32,
    pub panel: Color32,
    pub panel_dark: Color32,
    pub panel_light: Color32,
    pub accent: Color32,
    pub accent_soft: Color32,
    pub success: Color32,
    pub warning: Color32,
    pub danger: Color32,
    pub subtle_text: Color32,
    pub outline: Color32,
}

/// Returns the default palette.
pub fn palette() -> Palette {
    Palette {
        canvas: Color32::from_rgb(13, 12, 18),
        panel: Color32::from_rgb(26, 24, 36),
        panel_dark: Color32::from_rgb(17, 16, 24),
        panel_light: Color32::from_rgb(46, 42, 64),
        accent: Color32::from_rgb(94, 201, 178),
        accent_soft: Color32::from_rgba_unmultiplied(94, 201, 178, 70),
        success: Color32::from_rgb(118, 212, 150),
        warning: Color32::from_rgb(248, 189, 110),
        danger: Color32::from_rgb(243, 120, 132),
        subtle_text: Color32::from_rgb(192, 198, 212),
        outline: Color32::from_rgba_unmultiplied(98, 104, 130, 150),
    }
}

/// Apply the global faceup GUI theme to the provided egui context.
pub fn apply(ctx: &Context) {
    let palette = palette();
    let mut style = (*ctx.style()).clone();

    style.spacing.item_spacing = egui::vec2(10.0, 7.0);
    style.spacing.button_padding = egui::vec2(14.0, 8.0);
    style.spacing.window_margin = Margin::same(12);
    style.visuals = visuals_from_palette(palette);

    ctx.set_style(style);
}

fn visuals_from_palette(palette: Palette) -> Visuals {
    let mut visuals = Visuals::dark();
    visuals.override_text_color = Some(Color32::from_rgb(233, 234, 243));
    visuals.hyperlink_color = palette.accent;
    visuals.panel_fill = palette.panel;
    visuals.extreme_bg_color = palette.canvas;

    visuals.widgets.noninteractive.bg_fill = palette.panel_dark;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.subtle_text);

    visuals.widgets.inactive.bg_fill = palette.panel;
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, palette.outline);

    visuals.widgets.hovered.bg_fill = palette.panel_light;
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, palette.accent_soft);

    visuals.widgets.active.bg_fill = palette.panel_light;
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, palette.accent);

    visuals.widgets.open.bg_fill = palette.panel_light;
    visuals.selection.bg_fill = palette.accent;
    visuals.selection.stroke = Stroke::new(1.2, palette.panel_dark);

    visuals.window_corner_radius = CornerRadius::same(16);
    visuals.menu_corner_radius = CornerRadius::same(10);
    visuals.window_shadow = Shadow {
        offset: [0, 6],
        blur: 22,
        spread: 2,
        color: Color32::from_rgba_unmultiplied(0, 0, 0, 215),
    };
    visuals.popup_shadow = Shadow {
        offset: [0, 4],
        blur: 18,
        spread: 1,
        color: Color32::from_rgba_unmultiplied(0, 0, 0, 195),
    };

    visuals
}
