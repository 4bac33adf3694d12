use eframe::egui::Color32;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub foreground: Color32,
    pub heading_color: Color32,
    pub accent: Color32,
    pub muted: Color32,
    pub panel_background: Color32,
    pub h1_size: f32,
    pub h2_size: f32,
    pub body_size: f32,
    pub metric_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x14, 0x17, 0x1F),
            foreground: Color32::from_rgb(0xC8, 0xCC, 0xD4),
            heading_color: Color32::WHITE,
            accent: Color32::from_rgb(0x4F, 0xB3, 0x8A),
            muted: Color32::from_rgb(0x7A, 0x80, 0x8C),
            panel_background: Color32::from_rgb(0x22, 0x26, 0x30),
            h1_size: 88.0,
            h2_size: 60.0,
            body_size: 40.0,
            metric_size: 72.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::WHITE,
            foreground: Color32::from_rgb(0x1F, 0x24, 0x2E),
            heading_color: Color32::from_rgb(0x0B, 0x1F, 0x33),
            accent: Color32::from_rgb(0x1C, 0x7C, 0x54),
            muted: Color32::from_rgb(0x6B, 0x72, 0x80),
            panel_background: Color32::from_rgb(0xF2, 0xF4, 0xF7),
            h1_size: 88.0,
            h2_size: 60.0,
            body_size: 40.0,
            metric_size: 72.0,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            _ => Self::light(),
        }
    }

    pub fn toggled(&self) -> Self {
        if self.is_dark() {
            Self::light()
        } else {
            Self::dark()
        }
    }

    pub fn is_dark(&self) -> bool {
        self.name == "dark"
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }

    /// egui visuals matching this theme, for the host page widgets.
    pub fn visuals(&self) -> eframe::egui::Visuals {
        let mut visuals = if self.is_dark() {
            eframe::egui::Visuals::dark()
        } else {
            eframe::egui::Visuals::light()
        };
        visuals.panel_fill = self.background;
        visuals.hyperlink_color = self.accent;
        visuals.selection.bg_fill = Self::with_opacity(self.accent, 0.35);
        visuals
    }
}
