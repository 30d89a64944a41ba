use eframe::egui::Color32;
use egui_plot::MarkerShape;
use palette::{Hsl, IntoColor, Lighten, Srgb};

use crate::config::ColorConfig;

// ---------------------------------------------------------------------------
// Plot colours
// ---------------------------------------------------------------------------

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

/// Parse a `#rrggbb` / `#rgb` string, falling back when it is malformed.
pub fn parse_hex(hex: &str, fallback: Color32) -> Color32 {
    match hex.trim().parse::<Srgb<u8>>() {
        Ok(rgb) => Color32::from_rgb(rgb.red, rgb.green, rgb.blue),
        Err(e) => {
            log::warn!("Invalid colour '{hex}': {e}");
            fallback
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotColors {
    pub data: Color32,
    pub front: Color32,
    /// Lighter shade of `front` for the line joining front members.
    pub front_line: Color32,
    pub highlight: Color32,
}

impl PlotColors {
    pub fn from_config(cfg: &ColorConfig) -> Self {
        let front = parse_hex(&cfg.front, Color32::from_rgb(0x00, 0x80, 0x80));
        Self {
            data: parse_hex(&cfg.data, Color32::from_rgb(0xda, 0xa6, 0x22)),
            front,
            front_line: lighten(front, 0.35),
            highlight: parse_hex(&cfg.highlight, Color32::BLACK),
        }
    }
}

impl Default for PlotColors {
    fn default() -> Self {
        Self::from_config(&ColorConfig::default())
    }
}

fn lighten(color: Color32, amount: f32) -> Color32 {
    let rgb = Srgb::new(color.r(), color.g(), color.b()).into_format::<f32>();
    let hsl: Hsl = rgb.into_color();
    to_color32(hsl.lighten(amount).into_color())
}

// ---------------------------------------------------------------------------
// Highlight markers
// ---------------------------------------------------------------------------

/// Marker assigned to a highlighted point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub shape: MarkerShape,
    /// Glyph used in window titles and lists.
    pub symbol: char,
}

const MARKERS: [Marker; 6] = [
    Marker { shape: MarkerShape::Up, symbol: '▲' },
    Marker { shape: MarkerShape::Square, symbol: '■' },
    Marker { shape: MarkerShape::Circle, symbol: '●' },
    Marker { shape: MarkerShape::Plus, symbol: '✚' },
    Marker { shape: MarkerShape::Cross, symbol: '✖' },
    Marker { shape: MarkerShape::Down, symbol: '▼' },
];

/// Endless cycle over the highlight markers.
#[derive(Debug, Clone, Default)]
pub struct MarkerCycle {
    next: usize,
}

impl MarkerCycle {
    pub fn next_marker(&mut self) -> Marker {
        let marker = MARKERS[self.next];
        self.next = (self.next + 1) % MARKERS.len();
        marker
    }
}

impl Iterator for MarkerCycle {
    type Item = Marker;

    fn next(&mut self) -> Option<Marker> {
        Some(self.next_marker())
    }
}
