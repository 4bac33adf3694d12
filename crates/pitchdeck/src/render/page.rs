use eframe::egui::{self, RichText};

use crate::site::blocks::{Block, Metric};
use crate::theme::Theme;

/// The "enter presentation" affordance a host page shows.
pub struct PresentButton {
    pub label: String,
    pub enabled: bool,
    /// Shown on hover when the button is disabled.
    pub disabled_reason: Option<String>,
}

/// Show a host page as ordinary scrollable content. Returns true when the
/// present button was clicked.
pub fn show_page(
    ui: &mut egui::Ui,
    page_key: usize,
    blocks: &[Block],
    theme: &Theme,
    present: Option<&PresentButton>,
) -> bool {
    let mut clicked = false;
    egui::ScrollArea::vertical()
        .id_salt(("page", page_key))
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.add_space(16.0);
            if let Some(button) = present {
                let response = ui.add_enabled(
                    button.enabled,
                    egui::Button::new(RichText::new(&button.label).size(16.0)),
                );
                let response = match &button.disabled_reason {
                    Some(reason) => response.on_disabled_hover_text(reason.as_str()),
                    None => response,
                };
                clicked = response.clicked();
                ui.add_space(16.0);
            }

            for (i, block) in blocks.iter().enumerate() {
                show_block(ui, (page_key, i), block, theme);
                ui.add_space(14.0);
            }
        });
    clicked
}

fn show_block(ui: &mut egui::Ui, key: (usize, usize), block: &Block, theme: &Theme) {
    match block {
        Block::Heading(text) => {
            ui.label(
                RichText::new(text)
                    .size(32.0)
                    .strong()
                    .color(theme.heading_color),
            );
        }
        Block::Subheading(text) => {
            ui.label(
                RichText::new(text)
                    .size(22.0)
                    .strong()
                    .color(theme.heading_color),
            );
        }
        Block::Paragraph(text) => {
            ui.label(RichText::new(text).size(16.0).color(theme.foreground));
        }
        Block::Bullets(items) => {
            for item in items {
                ui.horizontal_wrapped(|ui| {
                    ui.label(RichText::new("\u{2022}").size(16.0).color(theme.accent));
                    ui.label(RichText::new(item).size(16.0).color(theme.foreground));
                });
            }
        }
        Block::Metrics(metrics) => {
            ui.horizontal_wrapped(|ui| {
                for metric in metrics {
                    metric_card(ui, metric, theme);
                }
            });
        }
        Block::Quote { text, by } => {
            egui::Frame::new()
                .fill(theme.panel_background)
                .inner_margin(12.0)
                .corner_radius(6.0)
                .show(ui, |ui| {
                    ui.label(
                        RichText::new(format!("\u{201C}{text}\u{201D}"))
                            .size(18.0)
                            .italics()
                            .color(theme.heading_color),
                    );
                    if let Some(by) = by {
                        ui.label(RichText::new(format!("\u{2014} {by}")).color(theme.muted));
                    }
                });
        }
        Block::Table { headers, rows } => {
            egui::Grid::new(("table", key))
                .striped(true)
                .spacing([24.0, 6.0])
                .show(ui, |ui| {
                    for header in headers {
                        ui.label(RichText::new(header).strong().color(theme.muted));
                    }
                    ui.end_row();
                    for row in rows {
                        for cell in row {
                            ui.label(RichText::new(cell).color(theme.foreground));
                        }
                        ui.end_row();
                    }
                });
        }
        Block::People(people) => {
            for person in people {
                ui.label(
                    RichText::new(format!("{}  \u{00B7}  {}", person.name, person.role))
                        .size(18.0)
                        .strong()
                        .color(theme.heading_color),
                );
                if let Some(ref bio) = person.bio {
                    ui.label(RichText::new(bio).color(theme.muted));
                }
                ui.add_space(6.0);
            }
        }
        Block::Faq(items) => {
            for (i, item) in items.iter().enumerate() {
                egui::CollapsingHeader::new(
                    RichText::new(&item.question)
                        .size(16.0)
                        .color(theme.heading_color),
                )
                .id_salt(("faq", key, i))
                .show(ui, |ui| {
                    ui.label(RichText::new(&item.answer).color(theme.foreground));
                });
            }
        }
    }
}

fn metric_card(ui: &mut egui::Ui, metric: &Metric, theme: &Theme) {
    egui::Frame::new()
        .fill(theme.panel_background)
        .inner_margin(14.0)
        .corner_radius(8.0)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.label(
                    RichText::new(&metric.value)
                        .size(28.0)
                        .strong()
                        .color(theme.accent),
                );
                ui.label(RichText::new(&metric.label).color(theme.foreground));
                if let Some(ref note) = metric.note {
                    ui.label(RichText::new(note).small().color(theme.muted));
                }
            });
        });
}
