pub mod chrome;
pub mod page;
pub mod text;

use eframe::egui;

use crate::presentation::PresentationController;
use crate::presentation::input::Command;
use crate::site::Block;
use crate::theme::Theme;

use chrome::ChromeLayout;

/// Slide content a presentation can paint. The controller itself never looks
/// at content; this bound only applies where a slide is drawn.
pub trait SlideContent {
    /// Paint into `rect`. `scale` is relative to a 1920x1080 slide.
    fn paint(&self, ui: &egui::Ui, theme: &Theme, rect: egui::Rect, scale: f32);
}

impl SlideContent for Vec<Block> {
    fn paint(&self, ui: &egui::Ui, theme: &Theme, rect: egui::Rect, scale: f32) {
        text::draw_blocks(ui, self, theme, rect.left_top(), rect.width(), scale);
    }
}

pub fn compute_scale(rect: egui::Rect) -> f32 {
    let ref_w = 1920.0;
    let ref_h = 1080.0;
    (rect.width() / ref_w).min(rect.height() / ref_h)
}

/// Paint the full-screen overlay for an open presentation: the active slide
/// and nothing else, framed by the chrome. Returns the command for any
/// pointer interaction this frame.
pub fn render_overlay<C: SlideContent>(
    ui: &mut egui::Ui,
    presentation: &PresentationController<C>,
    theme: &Theme,
    rect: egui::Rect,
    footer: Option<&str>,
) -> Option<Command> {
    let (Some(index), Some(chrome)) = (presentation.current_index(), presentation.chrome()) else {
        return None;
    };
    let slide = presentation.current_slide()?;

    let scale = compute_scale(rect);
    let layout = ChromeLayout::new(rect, scale);
    ui.painter().rect_filled(rect, 0.0, theme.background);

    // Registered before the chrome so the chrome's controls win hit-testing.
    // Overlay controls are pointer-only: a focusable widget would turn Space
    // or Enter into a second click on top of the keyboard command.
    let body = ui.interact(
        layout.body,
        ui.id().with("slide_body"),
        egui::Sense::CLICK,
    );
    let mut command = if body.clicked() {
        Some(Command::Next)
    } else if body.secondary_clicked() {
        Some(Command::Previous)
    } else {
        None
    };

    let padding = 80.0 * scale;
    let content_rect = layout.body.shrink2(egui::vec2(padding * 1.5, padding * 0.5));
    let child_ui = ui.new_child(
        egui::UiBuilder::new()
            .max_rect(layout.body)
            .id_salt(("slide", index)),
    );
    slide.content.paint(&child_ui, theme, content_rect, scale);

    if let Some(clicked) = chrome::draw_chrome(ui, &chrome, theme, &layout, scale, footer) {
        command = Some(clicked);
    }
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_is_relative_to_full_hd() {
        let full = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1920.0, 1080.0));
        assert!((compute_scale(full) - 1.0).abs() < f32::EPSILON);

        let wide = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(3840.0, 1080.0));
        assert!((compute_scale(wide) - 1.0).abs() < f32::EPSILON);

        let half = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(960.0, 540.0));
        assert!((compute_scale(half) - 0.5).abs() < f32::EPSILON);
    }
}
