use eframe::egui;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;

use crate::config::Config;
use crate::presentation::PresentationController;
use crate::presentation::input::{Command, KeyboardHub};
use crate::render;
use crate::render::page::{self, PresentButton};
use crate::site::{Block, Site};
use crate::theme::Theme;

const TOAST_VISIBLE_SECS: f32 = 1.0;
const TOAST_FADE_SECS: f32 = 0.5;

/// A short status message at the bottom of the window that fades out.
struct Toast {
    message: String,
    shown_at: Instant,
}

impl Toast {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            shown_at: Instant::now(),
        }
    }

    fn opacity(&self) -> f32 {
        let into_fade = self.shown_at.elapsed().as_secs_f32() - TOAST_VISIBLE_SECS;
        (1.0 - into_fade.max(0.0) / TOAST_FADE_SECS).clamp(0.0, 1.0)
    }

    fn is_expired(&self) -> bool {
        self.shown_at.elapsed().as_secs_f32() >= TOAST_VISIBLE_SECS + TOAST_FADE_SECS
    }
}

/// The page currently on screen. Replacing it unmounts the old page, which
/// drops its presentation controller and any keyboard capture with it.
struct HostPage {
    index: usize,
    presentation: Option<PresentationController<Vec<Block>>>,
}

impl HostPage {
    fn mount(site: &Site, index: usize, keyboard: &KeyboardHub) -> Self {
        let page = &site.pages[index];
        log::debug!("mounting page \"{}\"", page.name);
        let presentation = page
            .slide_deck()
            .map(|deck| PresentationController::new(deck, keyboard));
        Self {
            index,
            presentation,
        }
    }

    fn is_presenting(&self) -> bool {
        self.presentation.as_ref().is_some_and(|p| p.is_open())
    }
}

/// A request collected while painting, applied once the frame's UI is built.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Action {
    Present,
    ShowPage(usize),
    Navigate(Command),
}

struct SiteApp {
    site: Site,
    keyboard: KeyboardHub,
    page: HostPage,
    theme: Theme,
    show_help: bool,
    toast: Option<Toast>,
}

impl SiteApp {
    fn new(site: Site, start_page: usize, theme: Theme) -> Self {
        let keyboard = KeyboardHub::new();
        let page = HostPage::mount(&site, start_page, &keyboard);
        Self {
            site,
            keyboard,
            page,
            theme,
            show_help: false,
            toast: None,
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Present => self.present(),
            Action::ShowPage(index) => {
                if index != self.page.index && index < self.site.pages.len() {
                    self.page = HostPage::mount(&self.site, index, &self.keyboard);
                }
            }
            Action::Navigate(command) => {
                if let Some(presentation) = self.page.presentation.as_mut() {
                    if presentation.apply(command) && command == Command::Exit {
                        self.show_help = false;
                    }
                }
            }
        }
    }

    fn present(&mut self) {
        match self.page.presentation.as_mut() {
            None => {
                self.toast = Some(Toast::new("This page has no presentation"));
            }
            Some(presentation) => {
                if !presentation.enter() {
                    if let Some(defect) = presentation.defect() {
                        self.toast = Some(Toast::new(format!("Presentation unavailable: {defect}")));
                    }
                }
            }
        }
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.toast = Some(Toast::new(format!("Theme: {}", self.theme.name)));
    }

    /// Route one key press. While a presentation holds the keyboard the page
    /// never sees keys; keys the presentation does not consume fall through to
    /// the window-level shortcuts. Page keys also stand aside while an egui
    /// widget has keyboard focus, since that widget acts on Enter itself.
    fn handle_key(
        &mut self,
        key: egui::Key,
        fullscreen: bool,
        widget_focused: bool,
        viewport_cmds: &mut Vec<egui::ViewportCommand>,
    ) {
        if self.keyboard.is_captured() {
            if let Some(presentation) = self.page.presentation.as_mut() {
                if let Some(command) = presentation.handle_key(key) {
                    if command == Command::Exit {
                        self.show_help = false;
                    }
                    return;
                }
            }
        } else if !widget_focused && self.handle_page_key(key) {
            return;
        }

        match key {
            egui::Key::Q => viewport_cmds.push(egui::ViewportCommand::Close),
            egui::Key::F => viewport_cmds.push(egui::ViewportCommand::Fullscreen(!fullscreen)),
            egui::Key::D => self.toggle_theme(),
            egui::Key::H => self.show_help = !self.show_help,
            egui::Key::Escape => self.show_help = false,
            _ => {}
        }
    }

    fn handle_page_key(&mut self, key: egui::Key) -> bool {
        let last = self.site.pages.len().saturating_sub(1);
        let action = match key {
            egui::Key::Enter => Action::Present,
            egui::Key::ArrowRight => Action::ShowPage((self.page.index + 1).min(last)),
            egui::Key::ArrowLeft => Action::ShowPage(self.page.index.saturating_sub(1)),
            _ => return false,
        };
        self.apply(action);
        true
    }

    fn draw_presentation(&self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        let bg = self.theme.background;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                if let Some(presentation) = self.page.presentation.as_ref() {
                    if let Some(command) = render::render_overlay(
                        ui,
                        presentation,
                        &self.theme,
                        rect,
                        self.site.footer.as_deref(),
                    ) {
                        actions.push(Action::Navigate(command));
                    }
                }
                self.draw_overlays(ui, ctx, rect, true);
            });
    }

    fn draw_site(&self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        egui::TopBottomPanel::top("site_nav").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(&self.site.title)
                        .size(18.0)
                        .strong()
                        .color(self.theme.heading_color),
                );
                ui.separator();
                for (i, page) in self.site.pages.iter().enumerate() {
                    if ui
                        .selectable_label(i == self.page.index, page.name.as_str())
                        .clicked()
                    {
                        actions.push(Action::ShowPage(i));
                    }
                }
            });
            ui.add_space(6.0);
        });

        if let Some(ref footer) = self.site.footer {
            egui::TopBottomPanel::bottom("site_footer").show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(footer)
                        .small()
                        .color(self.theme.muted),
                );
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let page = &self.site.pages[self.page.index];
            let button = self.page.presentation.as_ref().map(|p| PresentButton {
                label: format!("\u{25B6}  Present \u{2014} {}", p.deck().page_name()),
                enabled: p.can_enter(),
                disabled_reason: p.defect().map(|e| e.to_string()),
            });
            if page::show_page(ui, self.page.index, &page.blocks, &self.theme, button.as_ref()) {
                actions.push(Action::Present);
            }
            let rect = ui.max_rect();
            self.draw_overlays(ui, ctx, rect, false);
        });
    }

    fn draw_overlays(&self, ui: &egui::Ui, ctx: &egui::Context, rect: egui::Rect, presenting: bool) {
        let scale = render::compute_scale(rect).max(0.5);
        if let Some(ref toast) = self.toast {
            draw_toast(ui, toast, &self.theme, rect, scale);
            ctx.request_repaint();
        }
        if self.show_help {
            draw_help(ui, &self.theme, rect, scale, presenting);
        }
    }
}

impl eframe::App for SiteApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.frame(ctx);
    }
}

impl SiteApp {
    /// One UI frame: route this frame's key presses, then paint and apply
    /// whatever the pointer asked for.
    fn frame(&mut self, ctx: &egui::Context) {
        // Collect viewport commands to send AFTER the input closure
        // (sending inside ctx.input() causes RwLock deadlock)
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();

        let (keys, fullscreen) = ctx.input(|i| {
            let keys: Vec<egui::Key> = i
                .events
                .iter()
                .filter_map(|e| match e {
                    egui::Event::Key {
                        key, pressed: true, ..
                    } => Some(*key),
                    _ => None,
                })
                .collect();
            (keys, i.viewport().fullscreen.unwrap_or(false))
        });
        let widget_focused = ctx.memory(|m| m.focused().is_some());

        for key in keys {
            self.handle_key(key, fullscreen, widget_focused, &mut viewport_cmds);
        }

        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }

        // Expire toast
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }

        ctx.set_visuals(self.theme.visuals());

        let mut actions = Vec::new();
        if self.page.is_presenting() {
            self.draw_presentation(ctx, &mut actions);
        } else {
            self.draw_site(ctx, &mut actions);
        }
        if !actions.is_empty() {
            for action in actions {
                self.apply(action);
            }
            ctx.request_repaint();
        }
    }
}

fn draw_toast(ui: &egui::Ui, toast: &Toast, theme: &Theme, rect: egui::Rect, scale: f32) {
    let opacity = toast.opacity();
    if opacity <= 0.0 {
        return;
    }
    let toast_color = Theme::with_opacity(theme.foreground, opacity * 0.9);
    let toast_bg = Theme::with_opacity(theme.panel_background, opacity * 0.9);
    let galley = ui.painter().layout_no_wrap(
        toast.message.clone(),
        egui::FontId::proportional(20.0 * scale),
        toast_color,
    );
    let padding = 16.0 * scale;
    let toast_rect = egui::Rect::from_min_size(
        egui::pos2(
            rect.center().x - galley.rect.width() / 2.0 - padding,
            rect.bottom() - 140.0 * scale,
        ),
        egui::vec2(
            galley.rect.width() + padding * 2.0,
            galley.rect.height() + padding * 2.0,
        ),
    );
    ui.painter().rect_filled(toast_rect, 8.0 * scale, toast_bg);
    let text_pos = egui::pos2(toast_rect.left() + padding, toast_rect.top() + padding);
    ui.painter().galley(text_pos, galley, toast_color);
}

const PAGE_SHORTCUTS: &[(&str, &str)] = &[
    ("Enter", "Present this page"),
    ("\u{2190} / \u{2192}", "Previous / next page"),
    ("D", "Toggle theme"),
    ("F", "Toggle fullscreen"),
    ("H / Esc", "Toggle this help"),
    ("Q", "Quit"),
];

const PRESENTATION_SHORTCUTS: &[(&str, &str)] = &[
    ("\u{2192}  N  Space  PgDn", "Next slide"),
    ("\u{2190}  P  Backspace  PgUp", "Previous slide"),
    ("Home / End", "First / last slide"),
    ("Left / right click", "Next / previous slide"),
    ("Esc", "Exit presentation"),
    ("D", "Toggle theme"),
    ("F", "Toggle fullscreen"),
    ("H", "Toggle this help"),
    ("Q", "Quit"),
];

/// Centered shortcut card. The key column is as wide as its widest entry.
fn draw_help(ui: &egui::Ui, theme: &Theme, rect: egui::Rect, scale: f32, presenting: bool) {
    let rows = if presenting {
        PRESENTATION_SHORTCUTS
    } else {
        PAGE_SHORTCUTS
    };
    let painter = ui.painter();
    let key_color = theme.accent;
    let text_color = theme.foreground;
    let font = egui::FontId::proportional(16.0 * scale);

    let galleys: Vec<_> = rows
        .iter()
        .map(|(key, action)| {
            (
                painter.layout_no_wrap(
                    key.to_string(),
                    egui::FontId::monospace(15.0 * scale),
                    key_color,
                ),
                painter.layout_no_wrap(action.to_string(), font.clone(), text_color),
            )
        })
        .collect();
    let title = painter.layout_no_wrap(
        "Shortcuts".to_string(),
        egui::FontId::proportional(22.0 * scale),
        theme.heading_color,
    );

    let pad = 24.0 * scale;
    let gap = 28.0 * scale;
    let row_h = 30.0 * scale;
    let key_w = galleys.iter().map(|(k, _)| k.rect.width()).fold(0.0_f32, f32::max);
    let action_w = galleys.iter().map(|(_, a)| a.rect.width()).fold(0.0_f32, f32::max);
    let title_h = title.rect.height() + 16.0 * scale;

    let size = egui::vec2(
        pad * 2.0 + (key_w + gap + action_w).max(title.rect.width()),
        pad * 2.0 + title_h + row_h * rows.len() as f32,
    );
    let card = egui::Rect::from_center_size(rect.center(), size);
    painter.rect_filled(card, 12.0 * scale, Theme::with_opacity(theme.panel_background, 0.96));
    painter.galley(card.left_top() + egui::vec2(pad, pad), title, theme.heading_color);

    let mut y = card.top() + pad + title_h;
    for (key, action) in galleys {
        painter.galley(egui::pos2(card.left() + pad, y), key, key_color);
        painter.galley(egui::pos2(card.left() + pad + key_w + gap, y), action, text_color);
        y += row_h;
    }
}

pub fn run(
    file: PathBuf,
    page: Option<String>,
    present: bool,
    windowed: bool,
) -> anyhow::Result<()> {
    let site = Site::load(&file).with_context(|| format!("Failed to load {}", file.display()))?;

    let start_page = match page {
        Some(name) => site.page_index(&name).ok_or_else(|| {
            let names: Vec<&str> = site.pages.iter().map(|p| p.name.as_str()).collect();
            anyhow::anyhow!("No page named \"{name}\". Pages: {}", names.join(", "))
        })?,
        None => 0,
    };

    // CLI flags override config
    let config = Config::load_or_default();
    let present = present || config.start_in_presentation();
    let windowed = windowed || config.windowed();
    let theme = Theme::from_name(config.theme().unwrap_or("light"));

    let title = site.title.clone();

    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| {
            let mut app = SiteApp::new(site, start_page, theme);
            if present {
                app.apply(Action::Present);
            }
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> SiteApp {
        let site = Site::parse(include_str!("../../../sample-sites/investor-site.yaml")).unwrap();
        SiteApp::new(site, 0, Theme::light())
    }

    fn press(app: &mut SiteApp, key: egui::Key) -> Vec<egui::ViewportCommand> {
        let mut cmds = Vec::new();
        app.handle_key(key, false, false, &mut cmds);
        cmds
    }

    fn slide(app: &SiteApp) -> Option<usize> {
        app.page
            .presentation
            .as_ref()
            .and_then(|p| p.current_index())
    }

    #[test]
    fn test_enter_presents_current_page() {
        let mut app = app();
        press(&mut app, egui::Key::Enter);
        assert!(app.page.is_presenting());
        assert!(app.keyboard.is_captured());
        assert_eq!(slide(&app), Some(0));
    }

    #[test]
    fn test_arrows_move_slides_while_presenting() {
        let mut app = app();
        press(&mut app, egui::Key::Enter);
        press(&mut app, egui::Key::ArrowRight);
        press(&mut app, egui::Key::ArrowRight);
        assert_eq!(app.page.index, 0);
        assert_eq!(slide(&app), Some(2));
    }

    #[test]
    fn test_arrows_move_pages_after_exit() {
        let mut app = app();
        press(&mut app, egui::Key::Enter);
        press(&mut app, egui::Key::ArrowRight);
        press(&mut app, egui::Key::Escape);
        assert!(!app.page.is_presenting());
        assert!(!app.keyboard.is_captured());

        press(&mut app, egui::Key::ArrowRight);
        assert_eq!(app.page.index, 1);
        assert_eq!(slide(&app), None);
    }

    #[test]
    fn test_reenter_starts_over() {
        let mut app = app();
        press(&mut app, egui::Key::Enter);
        press(&mut app, egui::Key::End);
        press(&mut app, egui::Key::Escape);
        press(&mut app, egui::Key::Enter);
        assert_eq!(slide(&app), Some(0));
    }

    #[test]
    fn test_page_switch_releases_keyboard() {
        let mut app = app();
        app.apply(Action::Present);
        assert!(app.keyboard.is_captured());
        app.apply(Action::ShowPage(2));
        assert_eq!(app.page.index, 2);
        assert!(!app.page.is_presenting());
        assert!(!app.keyboard.is_captured());
    }

    #[test]
    fn test_page_without_deck_shows_toast() {
        let mut app = app();
        let faq = app.site.page_index("FAQ").unwrap();
        app.apply(Action::ShowPage(faq));
        press(&mut app, egui::Key::Enter);
        assert!(!app.page.is_presenting());
        assert!(app.toast.is_some());
    }

    #[test]
    fn test_pointer_commands_are_applied() {
        let mut app = app();
        app.apply(Action::Present);
        app.apply(Action::Navigate(Command::Jump(3)));
        assert_eq!(slide(&app), Some(3));
        app.apply(Action::Navigate(Command::Jump(99)));
        assert_eq!(slide(&app), Some(3));
        app.apply(Action::Navigate(Command::Exit));
        assert!(!app.page.is_presenting());
    }

    #[test]
    fn test_global_shortcuts_fall_through() {
        let mut app = app();
        press(&mut app, egui::Key::Enter);
        let cmds = press(&mut app, egui::Key::Q);
        assert!(matches!(cmds.as_slice(), [egui::ViewportCommand::Close]));

        press(&mut app, egui::Key::D);
        assert!(app.theme.is_dark());
        assert!(app.page.is_presenting());
    }

    #[test]
    fn test_page_keys_clamp_at_ends() {
        let mut app = app();
        press(&mut app, egui::Key::ArrowLeft);
        assert_eq!(app.page.index, 0);
        for _ in 0..10 {
            press(&mut app, egui::Key::ArrowRight);
        }
        assert_eq!(app.page.index, app.site.pages.len() - 1);
    }

    #[test]
    fn test_escape_closes_help_with_presentation() {
        let mut app = app();
        press(&mut app, egui::Key::Enter);
        press(&mut app, egui::Key::H);
        assert!(app.show_help);
        press(&mut app, egui::Key::Escape);
        assert!(!app.page.is_presenting());
        assert!(!app.show_help);

        press(&mut app, egui::Key::Enter);
        press(&mut app, egui::Key::H);
        app.apply(Action::Navigate(Command::Exit));
        assert!(!app.show_help);
    }

    #[test]
    fn test_focused_widget_keeps_page_keys() {
        let mut app = app();
        let mut cmds = Vec::new();
        app.handle_key(egui::Key::Enter, false, true, &mut cmds);
        app.handle_key(egui::Key::ArrowRight, false, true, &mut cmds);
        assert!(!app.page.is_presenting());
        assert_eq!(app.page.index, 0);

        app.handle_key(egui::Key::H, false, true, &mut cmds);
        assert!(app.show_help);
    }

    fn key_event(key: egui::Key) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        }
    }

    fn run_frame(ctx: &egui::Context, app: &mut SiteApp, events: Vec<egui::Event>) {
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(1280.0, 720.0),
            )),
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| app.frame(ctx));
    }

    #[test]
    fn test_one_key_press_is_one_step_after_tab() {
        let ctx = egui::Context::default();
        let mut app = app();
        app.apply(Action::Present);
        run_frame(&ctx, &mut app, Vec::new());

        run_frame(&ctx, &mut app, vec![key_event(egui::Key::Tab)]);
        run_frame(&ctx, &mut app, Vec::new());
        run_frame(&ctx, &mut app, vec![key_event(egui::Key::Space)]);
        assert_eq!(slide(&app), Some(1));

        for _ in 0..3 {
            run_frame(&ctx, &mut app, vec![key_event(egui::Key::Tab)]);
        }
        run_frame(&ctx, &mut app, vec![key_event(egui::Key::Space)]);
        assert!(app.page.is_presenting());
        assert_eq!(slide(&app), Some(2));

        run_frame(&ctx, &mut app, vec![key_event(egui::Key::Enter)]);
        assert!(app.page.is_presenting());
        assert_eq!(slide(&app), Some(2));
    }

    #[test]
    fn test_toast_fades_then_expires() {
        let toast_at = |secs: f32| Toast {
            message: "Theme: dark".to_string(),
            shown_at: Instant::now()
                .checked_sub(std::time::Duration::from_secs_f32(secs))
                .unwrap(),
        };
        assert_eq!(toast_at(0.0).opacity(), 1.0);
        assert!((toast_at(TOAST_VISIBLE_SECS + TOAST_FADE_SECS / 2.0).opacity() - 0.5).abs() < 0.05);
        let old = toast_at(TOAST_VISIBLE_SECS + TOAST_FADE_SECS + 0.1);
        assert_eq!(old.opacity(), 0.0);
        assert!(old.is_expired());
    }
}
