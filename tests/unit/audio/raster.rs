use super::*;
use crate::audio::waveform::extract_waveform;

fn bar_pixels(img: &image::RgbaImage, x: u32, style: WaveformStyle) -> Vec<u32> {
    (0..img.height())
        .filter(|&y| img.get_pixel(x, y).0 == style.bar_rgba)
        .collect()
}

#[test]
fn silence_draws_one_pixel_bar_at_center() {
    let style = WaveformStyle::default();
    let wf = extract_waveform(&[0.0; 40], 4).unwrap();
    let img = render_waveform(&wf, 100, style).unwrap();

    assert_eq!(img.dimensions(), (4, 100));
    for x in 0..4 {
        assert_eq!(bar_pixels(&img, x, style), vec![50]);
    }
}

#[test]
fn full_scale_bucket_fills_the_column() {
    let style = WaveformStyle::default();
    let wf = extract_waveform(&[-1.0, 1.0, 0.0, 0.0], 2).unwrap();
    let img = render_waveform(&wf, 10, style).unwrap();

    assert_eq!(bar_pixels(&img, 0, style).len(), 10);
    assert_eq!(bar_pixels(&img, 1, style), vec![5]);
}

#[test]
fn bar_offset_follows_min_amplitude() {
    let style = WaveformStyle::default();
    // min = -0.5, max = 0.5 on a 100px canvas => rows 25..75.
    let wf = extract_waveform(&[-0.5, 0.5], 1).unwrap();
    let img = render_waveform(&wf, 100, style).unwrap();
    let rows = bar_pixels(&img, 0, style);
    assert_eq!(rows.first(), Some(&25));
    assert_eq!(rows.last(), Some(&74));
}

#[test]
fn zero_height_is_rejected() {
    let wf = extract_waveform(&[0.0], 1).unwrap();
    assert!(render_waveform(&wf, 0, WaveformStyle::default()).is_err());
}
