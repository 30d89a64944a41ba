use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use eframe::egui::{self, Color32, ColorImage, Sense, TextureHandle, TextureOptions, Ui, vec2};

use crate::data::summary::{MetricBar, metric_bars};
use crate::state::{AppState, Highlight};

/// Previews are scaled down to fit this box.
const MAX_PREVIEW: (u32, u32) = (800, 600);
const BAR_WIDTH: f32 = 100.0;
const BAR_HEIGHT: f32 = 12.0;

// ---------------------------------------------------------------------------
// Preview images
// ---------------------------------------------------------------------------

/// Read a preview image, shrinking it to fit [`MAX_PREVIEW`]. `Ok(None)` when
/// the file does not exist.
pub fn load_preview_image(path: &Path) -> Result<Option<ColorImage>> {
    if !path.exists() {
        return Ok(None);
    }
    let mut img = image::open(path).with_context(|| format!("decoding {}", path.display()))?;
    let (max_w, max_h) = MAX_PREVIEW;
    if img.width() > max_w || img.height() > max_h {
        img = img.thumbnail(max_w, max_h);
    }
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(Some(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw())))
}

/// Textures for previews already looked up, keyed by file path. `None`
/// records a missing or unreadable file so it is not retried every frame.
/// Everything is dropped when a new dataset is loaded.
#[derive(Default)]
pub struct PreviewCache {
    textures: HashMap<PathBuf, Option<TextureHandle>>,
    generation: u64,
}

impl PreviewCache {
    /// Forget cached lookups if the dataset changed since the last call.
    pub fn sync(&mut self, generation: u64) {
        if generation != self.generation {
            self.textures.clear();
            self.generation = generation;
        }
    }

    fn get(&mut self, ctx: &egui::Context, path: &Path) -> Option<&TextureHandle> {
        self.textures
            .entry(path.to_path_buf())
            .or_insert_with(|| match load_preview_image(path) {
                Ok(Some(image)) => Some(ctx.load_texture(
                    path.display().to_string(),
                    image,
                    TextureOptions::LINEAR,
                )),
                Ok(None) => {
                    log::warn!("No preview image at {}", path.display());
                    None
                }
                Err(e) => {
                    log::error!("Failed to load preview: {e:#}");
                    None
                }
            })
            .as_ref()
    }
}

// ---------------------------------------------------------------------------
// Detail windows
// ---------------------------------------------------------------------------

/// One floating window per highlighted point. Closing a window clears its
/// `open` flag; the caller prunes those highlights.
pub fn detail_windows(ctx: &egui::Context, state: &mut AppState, previews: &mut PreviewCache) {
    previews.sync(state.dataset_generation);
    let Some(dataset) = &state.dataset else {
        return;
    };
    let config = &state.config;
    let highlight_color = state.colors.highlight;

    for h in &mut state.highlights {
        let bars = metric_bars(dataset, h.row, &config.detail_metrics);
        let preview_path = config.preview_path(&h.label);
        let mut open = h.open;

        egui::Window::new(format!("{}  index : {}", h.marker.symbol, h.label))
            .id(egui::Id::new(("detail", h.row)))
            .open(&mut open)
            .resizable(true)
            .default_width(360.0)
            .show(ctx, |ui: &mut Ui| {
                detail_contents(ui, h, highlight_color, &bars);
                if let Some(texture) = previews.get(ctx, &preview_path) {
                    ui.add_space(6.0);
                    ui.add(
                        egui::Image::new(egui::load::SizedTexture::from_handle(texture))
                            .max_width(ui.available_width()),
                    );
                }
            });

        h.open = open;
    }
}

fn detail_contents(ui: &mut Ui, h: &Highlight, marker_color: Color32, bars: &[MetricBar]) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(
            egui::RichText::new(h.marker.symbol.to_string())
                .size(18.0)
                .color(marker_color),
        );
        ui.label(format!("index : {}", h.label));
    });

    for bar in bars {
        ui.horizontal(|ui: &mut Ui| {
            metric_bar(ui, bar.ratio);
            ui.label(format!("{}: {}", bar.column, bar.value));
        });
    }
}

fn metric_bar(ui: &mut Ui, ratio: Option<f64>) {
    let (rect, _) = ui.allocate_exact_size(vec2(BAR_WIDTH, BAR_HEIGHT), Sense::hover());
    let painter = ui.painter();
    painter.rect_filled(rect, 0.0, Color32::LIGHT_GRAY);
    if let Some(ratio) = ratio {
        let mut filled = rect;
        filled.set_width(BAR_WIDTH * ratio.clamp(0.0, 1.0) as f32);
        painter.rect_filled(filled, 0.0, Color32::from_gray(0x33));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_preview_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_preview_image(&dir.path().join("7.png")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn large_previews_are_shrunk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("3.png");
        image::RgbaImage::new(1600, 600).save(&path).unwrap();

        let loaded = load_preview_image(&path).unwrap().unwrap();
        assert_eq!(loaded.size, [800, 300]);
    }

    #[test]
    fn small_previews_keep_their_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("4.png");
        image::RgbaImage::new(40, 20).save(&path).unwrap();

        let loaded = load_preview_image(&path).unwrap().unwrap();
        assert_eq!(loaded.size, [40, 20]);
    }

    #[test]
    fn corrupt_preview_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("5.png");
        std::fs::write(&path, b"not a png").unwrap();
        assert!(load_preview_image(&path).is_err());
    }

    #[test]
    fn reload_retries_missing_previews() {
        let ctx = egui::Context::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("6.png");
        let mut cache = PreviewCache::default();

        assert!(cache.get(&ctx, &path).is_none());
        image::RgbaImage::new(10, 10).save(&path).unwrap();
        // Same dataset: the miss stays cached.
        cache.sync(0);
        assert!(cache.get(&ctx, &path).is_none());

        cache.sync(1);
        let texture = cache.get(&ctx, &path).unwrap();
        assert_eq!(texture.size(), [10, 10]);
    }
}
