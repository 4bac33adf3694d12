use crate::site::blocks::{Block, Metric, Person, Question};
use crate::theme::Theme;
use eframe::egui::{self, Color32, FontId, Pos2, Stroke};

/// Layout and paint wrapped text, returning the height used.
pub fn draw_text(
    ui: &egui::Ui,
    text: &str,
    font: FontId,
    color: Color32,
    pos: Pos2,
    max_width: f32,
) -> f32 {
    let galley = ui
        .painter()
        .layout(text.to_string(), font, color, max_width);
    let height = galley.rect.height();
    ui.painter().galley(pos, galley, color);
    height
}

/// Draw a list of blocks top to bottom. Returns the total height used.
pub fn draw_blocks(
    ui: &egui::Ui,
    blocks: &[Block],
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    scale: f32,
) -> f32 {
    let spacing = 32.0 * scale;
    let mut y = pos.y;
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            y += spacing;
        }
        y += draw_block(ui, block, theme, Pos2::new(pos.x, y), max_width, scale);
    }
    y - pos.y
}

fn draw_block(
    ui: &egui::Ui,
    block: &Block,
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    scale: f32,
) -> f32 {
    match block {
        Block::Heading(text) => draw_text(
            ui,
            text,
            FontId::proportional(theme.h1_size * scale),
            theme.heading_color,
            pos,
            max_width,
        ),
        Block::Subheading(text) => draw_text(
            ui,
            text,
            FontId::proportional(theme.h2_size * scale),
            theme.heading_color,
            pos,
            max_width,
        ),
        Block::Paragraph(text) => draw_text(
            ui,
            text,
            FontId::proportional(theme.body_size * scale),
            theme.foreground,
            pos,
            max_width,
        ),
        Block::Bullets(items) => draw_bullets(ui, items, theme, pos, max_width, scale),
        Block::Metrics(metrics) => draw_metrics(ui, metrics, theme, pos, max_width, scale),
        Block::Quote { text, by } => {
            draw_quote(ui, text, by.as_deref(), theme, pos, max_width, scale)
        }
        Block::Table { headers, rows } => {
            draw_table(ui, headers, rows, theme, pos, max_width, scale)
        }
        Block::People(people) => draw_people(ui, people, theme, pos, max_width, scale),
        Block::Faq(items) => draw_faq(ui, items, theme, pos, max_width, scale),
    }
}

fn draw_bullets(
    ui: &egui::Ui,
    items: &[String],
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    scale: f32,
) -> f32 {
    let font = FontId::proportional(theme.body_size * scale);
    let marker_width = 45.0 * scale;
    let item_spacing = 12.0 * scale;
    let mut y = 0.0_f32;

    for item in items {
        let marker = ui.painter().layout_no_wrap(
            "\u{2022}".to_string(),
            font.clone(),
            theme.accent,
        );
        ui.painter()
            .galley(Pos2::new(pos.x, pos.y + y), marker, theme.accent);
        let h = draw_text(
            ui,
            item,
            font.clone(),
            theme.foreground,
            Pos2::new(pos.x + marker_width, pos.y + y),
            max_width - marker_width,
        );
        y += h + item_spacing;
    }
    (y - item_spacing).max(0.0)
}

fn draw_metrics(
    ui: &egui::Ui,
    metrics: &[Metric],
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    scale: f32,
) -> f32 {
    if metrics.is_empty() {
        return 0.0;
    }
    let gap = 24.0 * scale;
    let padding = 24.0 * scale;
    let count = metrics.len() as f32;
    let card_width = (max_width - gap * (count - 1.0)) / count;

    // Lay out everything first so all cards share the tallest height.
    let laid_out: Vec<_> = metrics
        .iter()
        .map(|m| {
            let inner = card_width - padding * 2.0;
            let value = ui.painter().layout(
                m.value.clone(),
                FontId::proportional(theme.metric_size * scale),
                theme.accent,
                inner,
            );
            let label = ui.painter().layout(
                m.label.clone(),
                FontId::proportional(theme.body_size * 0.6 * scale),
                theme.foreground,
                inner,
            );
            let note = m.note.as_ref().map(|n| {
                ui.painter().layout(
                    n.clone(),
                    FontId::proportional(theme.body_size * 0.45 * scale),
                    theme.muted,
                    inner,
                )
            });
            (value, label, note)
        })
        .collect();

    let card_height = laid_out
        .iter()
        .map(|(v, l, n)| {
            v.rect.height() + l.rect.height() + n.as_ref().map_or(0.0, |n| n.rect.height())
        })
        .fold(0.0_f32, f32::max)
        + padding * 2.0;

    for (i, (value, label, note)) in laid_out.into_iter().enumerate() {
        let x = pos.x + i as f32 * (card_width + gap);
        let card = egui::Rect::from_min_size(
            Pos2::new(x, pos.y),
            egui::vec2(card_width, card_height),
        );
        ui.painter()
            .rect_filled(card, 12.0 * scale, theme.panel_background);

        let mut y = card.top() + padding;
        let left = card.left() + padding;
        let value_h = value.rect.height();
        ui.painter().galley(Pos2::new(left, y), value, theme.accent);
        y += value_h;
        let label_h = label.rect.height();
        ui.painter().galley(Pos2::new(left, y), label, theme.foreground);
        y += label_h;
        if let Some(note) = note {
            ui.painter().galley(Pos2::new(left, y), note, theme.muted);
        }
    }
    card_height
}

fn draw_quote(
    ui: &egui::Ui,
    text: &str,
    by: Option<&str>,
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    scale: f32,
) -> f32 {
    let bar_width = 6.0 * scale;
    let indent = 36.0 * scale;
    let quote_font = FontId::proportional(theme.body_size * 1.1 * scale);
    let mut height = draw_text(
        ui,
        &format!("\u{201C}{text}\u{201D}"),
        quote_font,
        theme.heading_color,
        Pos2::new(pos.x + indent, pos.y),
        max_width - indent,
    );
    if let Some(by) = by {
        height += 12.0 * scale;
        height += draw_text(
            ui,
            &format!("\u{2014} {by}"),
            FontId::proportional(theme.body_size * 0.6 * scale),
            theme.muted,
            Pos2::new(pos.x + indent, pos.y + height),
            max_width - indent,
        );
    }
    let bar = egui::Rect::from_min_size(pos, egui::vec2(bar_width, height));
    ui.painter().rect_filled(bar, 2.0 * scale, theme.accent);
    height
}

fn draw_table(
    ui: &egui::Ui,
    headers: &[String],
    rows: &[Vec<String>],
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    scale: f32,
) -> f32 {
    let cols = headers
        .len()
        .max(rows.iter().map(Vec::len).max().unwrap_or(0));
    if cols == 0 {
        return 0.0;
    }
    let col_width = max_width / cols as f32;
    let cell_padding = 12.0 * scale;
    let row_height = theme.body_size * 1.4 * scale;
    let header_font = FontId::proportional(theme.body_size * 0.7 * scale);
    let cell_font = FontId::proportional(theme.body_size * 0.8 * scale);
    let rule = Stroke::new(1.5 * scale, Theme::with_opacity(theme.muted, 0.5));

    let mut y = pos.y;
    for (c, header) in headers.iter().enumerate() {
        let x = pos.x + c as f32 * col_width + cell_padding;
        draw_text(
            ui,
            header,
            header_font.clone(),
            theme.muted,
            Pos2::new(x, y),
            col_width - cell_padding * 2.0,
        );
    }
    if !headers.is_empty() {
        y += row_height;
        ui.painter()
            .line_segment([Pos2::new(pos.x, y), Pos2::new(pos.x + max_width, y)], rule);
        y += cell_padding;
    }

    for row in rows {
        for (c, cell) in row.iter().enumerate().take(cols) {
            let x = pos.x + c as f32 * col_width + cell_padding;
            let color = if c == 0 {
                theme.heading_color
            } else {
                theme.foreground
            };
            draw_text(
                ui,
                cell,
                cell_font.clone(),
                color,
                Pos2::new(x, y),
                col_width - cell_padding * 2.0,
            );
        }
        y += row_height;
    }
    y - pos.y
}

fn draw_people(
    ui: &egui::Ui,
    people: &[Person],
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    scale: f32,
) -> f32 {
    let mut y = 0.0_f32;
    let spacing = 20.0 * scale;
    for person in people {
        let name_h = draw_text(
            ui,
            &format!("{}  \u{00B7}  {}", person.name, person.role),
            FontId::proportional(theme.body_size * scale),
            theme.heading_color,
            Pos2::new(pos.x, pos.y + y),
            max_width,
        );
        y += name_h;
        if let Some(ref bio) = person.bio {
            y += draw_text(
                ui,
                bio,
                FontId::proportional(theme.body_size * 0.65 * scale),
                theme.muted,
                Pos2::new(pos.x, pos.y + y),
                max_width,
            );
        }
        y += spacing;
    }
    (y - spacing).max(0.0)
}

fn draw_faq(
    ui: &egui::Ui,
    items: &[Question],
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    scale: f32,
) -> f32 {
    let mut y = 0.0_f32;
    let spacing = 28.0 * scale;
    for item in items {
        y += draw_text(
            ui,
            &item.question,
            FontId::proportional(theme.body_size * 0.9 * scale),
            theme.heading_color,
            Pos2::new(pos.x, pos.y + y),
            max_width,
        );
        y += 6.0 * scale;
        y += draw_text(
            ui,
            &item.answer,
            FontId::proportional(theme.body_size * 0.75 * scale),
            theme.foreground,
            Pos2::new(pos.x, pos.y + y),
            max_width,
        );
        y += spacing;
    }
    (y - spacing).max(0.0)
}
