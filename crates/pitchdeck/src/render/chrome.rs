use eframe::egui::{self, FontId, Pos2, Rect, Sense};

use crate::presentation::chrome::Chrome;
use crate::presentation::input::Command;
use crate::theme::Theme;

/// Split of the overlay into the top bar, slide body and bottom bar.
#[derive(Debug, Clone, Copy)]
pub struct ChromeLayout {
    pub top_bar: Rect,
    pub body: Rect,
    pub bottom_bar: Rect,
}

impl ChromeLayout {
    pub fn new(rect: Rect, scale: f32) -> Self {
        let top_h = 64.0 * scale;
        let bottom_h = 80.0 * scale;
        let top_bar = Rect::from_min_max(rect.min, Pos2::new(rect.right(), rect.top() + top_h));
        let bottom_bar =
            Rect::from_min_max(Pos2::new(rect.left(), rect.bottom() - bottom_h), rect.max);
        let body = Rect::from_min_max(
            Pos2::new(rect.left(), top_bar.bottom()),
            Pos2::new(rect.right(), bottom_bar.top()),
        );
        Self {
            top_bar,
            body,
            bottom_bar,
        }
    }
}

/// Paint the chrome and report which control, if any, was clicked.
pub fn draw_chrome(
    ui: &egui::Ui,
    chrome: &Chrome,
    theme: &Theme,
    layout: &ChromeLayout,
    scale: f32,
    footer: Option<&str>,
) -> Option<Command> {
    let mut command = None;
    let padding = 24.0 * scale;
    let small = FontId::proportional(18.0 * scale);
    let label_color = Theme::with_opacity(theme.foreground, 0.6);

    // Top bar: page name, slide title, close
    let top = layout.top_bar;
    let name = ui.painter().layout_no_wrap(
        chrome.page_name.clone(),
        FontId::proportional(20.0 * scale),
        theme.heading_color,
    );
    let name_pos = Pos2::new(top.left() + padding, top.center().y - name.rect.height() / 2.0);
    ui.painter().galley(name_pos, name, theme.heading_color);

    let title = ui
        .painter()
        .layout_no_wrap(chrome.slide_title.clone(), small.clone(), label_color);
    let title_pos = Pos2::new(
        top.center().x - title.rect.width() / 2.0,
        top.center().y - title.rect.height() / 2.0,
    );
    ui.painter().galley(title_pos, title, label_color);

    let button_size = egui::vec2(48.0 * scale, 48.0 * scale);
    let close_rect = Rect::from_center_size(
        Pos2::new(top.right() - padding - button_size.x / 2.0, top.center().y),
        button_size,
    );
    if chrome_button(ui, close_rect, "close", "\u{00D7}", true, theme, scale) {
        command = Some(Command::Exit);
    }

    // Progress bar along the top edge of the bottom bar
    let bottom = layout.bottom_bar;
    let track = Rect::from_min_size(bottom.min, egui::vec2(bottom.width(), 3.0 * scale));
    ui.painter()
        .rect_filled(track, 0.0, Theme::with_opacity(theme.muted, 0.25));
    let fill = Rect::from_min_size(
        bottom.min,
        egui::vec2(bottom.width() * chrome.fraction(), 3.0 * scale),
    );
    ui.painter().rect_filled(fill, 0.0, theme.accent);

    // Bottom bar: footer, prev, dots, next, counter
    if let Some(footer) = footer {
        let footer_color = Theme::with_opacity(theme.foreground, 0.4);
        let galley = ui
            .painter()
            .layout_no_wrap(footer.to_string(), small.clone(), footer_color);
        let pos = Pos2::new(
            bottom.left() + padding,
            bottom.center().y - galley.rect.height() / 2.0,
        );
        ui.painter().galley(pos, galley, footer_color);
    }

    let dot_spacing = 28.0 * scale;
    let dots_width = dot_spacing * chrome.dots.len().saturating_sub(1) as f32;
    let dots_left = bottom.center().x - dots_width / 2.0;
    let cy = bottom.center().y;

    let prev_rect = Rect::from_center_size(
        Pos2::new(dots_left - dot_spacing - button_size.x / 2.0, cy),
        button_size,
    );
    if chrome_button(ui, prev_rect, "prev", "\u{2039}", chrome.can_go_back, theme, scale) {
        command = Some(Command::Previous);
    }

    for dot in &chrome.dots {
        let center = Pos2::new(dots_left + dot.index as f32 * dot_spacing, cy);
        let hit = Rect::from_center_size(center, egui::vec2(dot_spacing, dot_spacing));
        let response = ui
            .interact(hit, ui.id().with(("chrome_dot", dot.index)), Sense::CLICK)
            .on_hover_text(dot.title.as_str());
        let radius = (if dot.active { 7.0 } else { 5.0 }) * scale;
        let color = if dot.active {
            theme.accent
        } else if response.hovered() {
            Theme::with_opacity(theme.accent, 0.6)
        } else {
            Theme::with_opacity(theme.muted, 0.5)
        };
        ui.painter().circle_filled(center, radius, color);
        if response.clicked() {
            command = Some(Command::Jump(dot.index));
        }
    }

    let next_rect = Rect::from_center_size(
        Pos2::new(dots_left + dots_width + dot_spacing + button_size.x / 2.0, cy),
        button_size,
    );
    if chrome_button(ui, next_rect, "next", "\u{203A}", chrome.can_go_forward, theme, scale) {
        command = Some(Command::Next);
    }

    let counter = ui.painter().layout_no_wrap(
        chrome.progress_label(),
        FontId::monospace(16.0 * scale),
        label_color,
    );
    let counter_pos = Pos2::new(
        bottom.right() - padding - counter.rect.width(),
        cy - counter.rect.height() / 2.0,
    );
    ui.painter().galley(counter_pos, counter, label_color);

    command
}

/// A text glyph button. Disabled buttons are drawn dimmed and ignore clicks.
fn chrome_button(
    ui: &egui::Ui,
    rect: Rect,
    id_salt: &str,
    glyph: &str,
    enabled: bool,
    theme: &Theme,
    scale: f32,
) -> bool {
    let sense = if enabled { Sense::CLICK } else { Sense::HOVER };
    let response = ui.interact(rect, ui.id().with(("chrome_button", id_salt)), sense);
    let color = if !enabled {
        Theme::with_opacity(theme.muted, 0.3)
    } else if response.hovered() {
        theme.accent
    } else {
        Theme::with_opacity(theme.foreground, 0.7)
    };
    if enabled && response.hovered() {
        ui.painter().rect_filled(
            rect,
            8.0 * scale,
            Theme::with_opacity(theme.panel_background, 0.8),
        );
    }
    let galley = ui.painter().layout_no_wrap(
        glyph.to_string(),
        FontId::proportional(32.0 * scale),
        color,
    );
    let pos = rect.center() - galley.rect.size() / 2.0;
    ui.painter().galley(pos, galley, color);
    enabled && response.clicked()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_partitions_rect() {
        let rect = Rect::from_min_size(Pos2::ZERO, egui::vec2(1920.0, 1080.0));
        let layout = ChromeLayout::new(rect, 1.0);
        assert_eq!(layout.top_bar.top(), 0.0);
        assert_eq!(layout.body.top(), layout.top_bar.bottom());
        assert_eq!(layout.body.bottom(), layout.bottom_bar.top());
        assert_eq!(layout.bottom_bar.bottom(), 1080.0);
        assert_eq!(layout.body.width(), 1920.0);
    }
}
