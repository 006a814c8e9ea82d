use std::path::Path;

use anyhow::Context as _;

use crate::{
    audio::waveform::Waveform,
    foundation::error::{MergeError, MergeResult},
};

/// Colors used when drawing a waveform preview.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveformStyle {
    /// Bar color (straight-alpha RGBA8).
    pub bar_rgba: [u8; 4],
    /// Background color (straight-alpha RGBA8).
    pub background_rgba: [u8; 4],
}

impl Default for WaveformStyle {
    fn default() -> Self {
        Self {
            // CSS "silver" over a transparent background.
            bar_rgba: [192, 192, 192, 255],
            background_rgba: [0, 0, 0, 0],
        }
    }
}

/// Draw `waveform` into an image `waveform.width()` columns wide and `height` pixels tall.
///
/// Column `i` gets a one pixel wide bar starting at `(1 + min) * amp` and spanning
/// `max(1, (max - min) * amp)` pixels, where `amp = height / 2`.
pub fn render_waveform(
    waveform: &Waveform,
    height: u32,
    style: WaveformStyle,
) -> MergeResult<image::RgbaImage> {
    if height == 0 {
        return Err(MergeError::validation("waveform render height must be >= 1"));
    }
    let width = u32::try_from(waveform.width())
        .map_err(|_| MergeError::validation("waveform too wide to render"))?;
    let mut img = image::RgbaImage::from_pixel(width, height, image::Rgba(style.background_rgba));

    let amp = height as f32 / 2.0;
    for (x, s) in waveform.samples().iter().enumerate() {
        let (y0, y1) = bar_rows(s.min, s.max, amp, height);
        for y in y0..y1 {
            img.put_pixel(x as u32, y, image::Rgba(style.bar_rgba));
        }
    }
    Ok(img)
}

/// Render and save a waveform preview as PNG.
pub fn save_waveform_png(
    waveform: &Waveform,
    height: u32,
    style: WaveformStyle,
    out_path: &Path,
) -> MergeResult<()> {
    let img = render_waveform(waveform, height, style)?;
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    img.save_with_format(out_path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", out_path.display()))?;
    Ok(())
}

fn bar_rows(min: f32, max: f32, amp: f32, height: u32) -> (u32, u32) {
    let top = (1.0 + min) * amp;
    let extent = ((max - min) * amp).max(1.0);
    let y0 = (top.floor().max(0.0) as u32).min(height.saturating_sub(1));
    let y1 = ((top + extent).ceil() as u32).clamp(y0 + 1, height);
    (y0, y1)
}

#[cfg(test)]
#[path = "../../tests/unit/audio/raster.rs"]
mod tests;
