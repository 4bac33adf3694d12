use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Context;
use eframe::egui;

use crate::config::Config;
use crate::presentation::PresentationController;
use crate::presentation::input::KeyboardHub;
use crate::render;
use crate::site::{Block, Site};
use crate::theme::Theme;

/// Lowercase, dash-separated form of a deck name for file names.
pub fn slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "deck".to_string()
    } else {
        slug.to_string()
    }
}

/// File name for the slide at `index` (0-based) of a deck.
pub fn export_file_name(page_name: &str, index: usize) -> String {
    format!("{}-{:02}.png", slug(page_name), index + 1)
}

struct ExportApp {
    presentation: PresentationController<Vec<Block>>,
    theme: Theme,
    footer: Option<String>,
    output_dir: PathBuf,
    screenshot_requested: bool,
    done: bool,
    saved: usize,
    /// First write failure; the export stops there and `run` returns it.
    failure: Rc<RefCell<Option<anyhow::Error>>>,
}

impl ExportApp {
    fn save_current(&self, image: &egui::ColorImage) -> anyhow::Result<()> {
        let Some(index) = self.presentation.current_index() else {
            return Ok(());
        };
        let filename = export_file_name(self.presentation.deck().page_name(), index);
        save_color_image(image, &self.output_dir.join(&filename))?;
        eprintln!("  Saved {filename}");
        Ok(())
    }

    /// Save the slide on screen and move to the next one. Returns false once
    /// the export is over, either after the last slide or on the first error.
    fn capture(&mut self, image: &egui::ColorImage) -> bool {
        if let Err(e) = self.save_current(image) {
            self.failure.borrow_mut().get_or_insert(e);
            self.presentation.exit();
            return false;
        }
        self.saved += 1;
        if !self.presentation.next() {
            self.presentation.exit();
            return false;
        }
        true
    }
}

impl eframe::App for ExportApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.done {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        // Check for screenshot result from previous frame
        let mut screenshot = None;
        ctx.input(|i| {
            for event in &i.events {
                if let egui::Event::Screenshot { image, .. } = event {
                    screenshot = Some(image.clone());
                }
            }
        });

        if let Some(image) = screenshot {
            self.screenshot_requested = false;
            if !self.capture(&image) {
                log::debug!("export finished after {} slide(s)", self.saved);
                self.done = true;
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                return;
            }
        }

        let bg = self.theme.background;

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                render::render_overlay(
                    ui,
                    &self.presentation,
                    &self.theme,
                    rect,
                    self.footer.as_deref(),
                );
            });

        // Request screenshot after rendering (will arrive next frame)
        if !self.screenshot_requested {
            ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
            self.screenshot_requested = true;
        }

        ctx.request_repaint();
    }
}

fn save_color_image(image: &egui::ColorImage, path: &Path) -> anyhow::Result<()> {
    let width = image.width() as u32;
    let height = image.height() as u32;
    let pixels: Vec<u8> = image
        .pixels
        .iter()
        .flat_map(|c| [c.r(), c.g(), c.b(), c.a()])
        .collect();

    image::save_buffer(path, &pixels, width, height, image::ColorType::Rgba8)
        .with_context(|| format!("Failed to write {}", path.display()))
}

pub fn run(
    file: PathBuf,
    page: Option<String>,
    output_dir: PathBuf,
    width: u32,
    height: u32,
) -> anyhow::Result<()> {
    let site = Site::load(&file).with_context(|| format!("Failed to load {}", file.display()))?;

    let page = match page {
        Some(name) => {
            let index = site
                .page_index(&name)
                .ok_or_else(|| anyhow::anyhow!("No page named \"{name}\" in {}", file.display()))?;
            &site.pages[index]
        }
        None => site
            .pages
            .iter()
            .find(|p| p.deck.is_some())
            .ok_or_else(|| anyhow::anyhow!("No page in {} has a deck", file.display()))?,
    };
    let deck = page
        .slide_deck()
        .ok_or_else(|| anyhow::anyhow!("Page \"{}\" has no deck", page.name))?;
    deck.validate()?;

    std::fs::create_dir_all(&output_dir)?;

    eprintln!(
        "Exporting {} slides of \"{}\" to {} ({}x{})",
        deck.len(),
        deck.page_name(),
        output_dir.display(),
        width,
        height,
    );

    let title = format!("pitchdeck export \u{2014} {}", deck.page_name());
    let theme = Theme::from_name(Config::load_or_default().theme().unwrap_or("light"));
    let footer = site.footer.clone();

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([width as f32, height as f32])
        .with_title(&title)
        .with_decorations(false);

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let output_dir_clone = output_dir.clone();
    let failure = Rc::new(RefCell::new(None));
    let app_failure = Rc::clone(&failure);
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(theme.visuals());
            let mut presentation = PresentationController::new(deck, &KeyboardHub::new());
            presentation.enter();
            Ok(Box::new(ExportApp {
                presentation,
                theme,
                footer,
                output_dir: output_dir_clone,
                screenshot_requested: false,
                done: false,
                saved: 0,
                failure: app_failure,
            }))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    if let Some(e) = failure.borrow_mut().take() {
        return Err(e.context("Export failed"));
    }
    eprintln!("Export complete.");
    Ok(())
}
