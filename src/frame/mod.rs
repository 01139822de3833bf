//! Drawing the framed, captioned copy of a photo.
//!
//! - [`FrameLayout`] computes the canvas geometry
//! - [`Captions`] turns a [`MetadataRecord`] into the four caption lines
//! - [`render`] decodes, orients, composites and captions the photo
//! - [`write_jpeg`] encodes the result

mod captions;
mod fonts;
mod layout;

pub use captions::Captions;
pub use fonts::{load_font, CaptionFonts};
pub use layout::FrameLayout;

use ab_glyph::{Font, PxScale, ScaleFont};
use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::metadata::Orientation;
use image::{imageops, DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::FrameConfig;
use crate::exif::MetadataRecord;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Border and text colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb<u8>,
    pub text: Rgb<u8>,
}

impl Palette {
    /// White border with black text, or the reverse when `dark`.
    pub fn new(dark: bool) -> Self {
        if dark {
            Self {
                background: BLACK,
                text: WHITE,
            }
        } else {
            Self {
                background: WHITE,
                text: BLACK,
            }
        }
    }
}

/// Rotate/flip `img` upright according to an Exif orientation value (`"1"`..`"8"`).
///
/// Anything else leaves the image untouched.
pub fn orient(mut img: DynamicImage, orientation: Option<&str>) -> DynamicImage {
    let Some(raw) = orientation else {
        return img;
    };
    match raw.trim().parse::<u8>().ok().and_then(Orientation::from_exif) {
        Some(o) => img.apply_orientation(o),
        None => log::warn!("Ignoring unknown orientation {raw:?}"),
    }
    img
}

/// Place `photo` on a canvas of `layout`'s size filled with `background`.
pub fn compose(photo: &RgbImage, layout: &FrameLayout, background: Rgb<u8>) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(layout.canvas_width, layout.canvas_height, background);
    let (x, y) = layout.photo_origin();
    imageops::replace(&mut canvas, photo, i64::from(x), i64::from(y));
    canvas
}

/// Distance between caption baselines: one line of the large bold face.
pub fn line_height(fonts: &CaptionFonts, frame: &FrameConfig) -> u32 {
    let bold_large = fonts.bold.as_scaled(PxScale::from(frame.large_font_size));
    (bold_large.height() + bold_large.line_gap()).ceil().max(0.0) as u32
}

/// Draw the caption lines into the strip below the photo.
pub fn draw_captions(
    canvas: &mut RgbImage,
    layout: &FrameLayout,
    captions: &Captions,
    fonts: &CaptionFonts,
    frame: &FrameConfig,
    color: Rgb<u8>,
) {
    let large = PxScale::from(frame.large_font_size);
    let small = PxScale::from(frame.font_size);
    let line_height = line_height(fonts, frame);

    let first = layout.baseline(1, line_height);
    let second = layout.baseline(2, line_height);
    let left = layout.left_x();
    let right = layout.right_x();

    let mut draw = |font: &ab_glyph::FontVec, scale: PxScale, text: &str, x: i32, baseline: i32| {
        if text.is_empty() {
            return;
        }
        let top = baseline - font.as_scaled(scale).ascent().round() as i32;
        draw_text_mut(&mut *canvas, color, x, top, scale, font, text);
    };

    // Camera and lens, left aligned
    draw(&fonts.bold, large, &captions.camera, left, first);
    draw(&fonts.regular, small, &captions.lens, left, second);

    // Exposure and timestamp, right aligned
    let (exposure_width, _) = text_size(small, &fonts.bold, &captions.exposure);
    draw(&fonts.bold, small, &captions.exposure, right - exposure_width as i32, first);

    let (timestamp_width, _) = text_size(small, &fonts.regular, &captions.timestamp);
    draw(&fonts.regular, small, &captions.timestamp, right - timestamp_width as i32, second);
}

/// Produce the framed, captioned image for the photo at `path`.
pub fn render(
    path: &Path,
    record: &MetadataRecord,
    frame: &FrameConfig,
    fonts: &CaptionFonts,
) -> Result<RgbImage> {
    let img = image::open(path).with_context(|| format!("Failed to decode {}", path.display()))?;
    let photo = orient(img, record.orientation.as_deref()).to_rgb8();

    let layout = FrameLayout::new(photo.width(), photo.height(), frame);
    log::debug!(
        "Canvas {}x{} for photo {}x{}",
        layout.canvas_width,
        layout.canvas_height,
        layout.photo_width,
        layout.photo_height
    );

    let palette = Palette::new(frame.dark);
    let mut canvas = compose(&photo, &layout, palette.background);

    let captions = Captions::from_record(record, frame.no_model);
    draw_captions(&mut canvas, &layout, &captions, fonts, frame, palette.text);

    Ok(canvas)
}

/// Encode `canvas` as a JPEG at `path`.
pub fn write_jpeg(canvas: &RgbImage, path: &Path, quality: u8) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100));
        encoder.encode_image(canvas).context("Failed to encode JPEG")?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ops::Range;

    #[test]
    fn palettes() {
        assert_eq!(Palette::new(false).background, WHITE);
        assert_eq!(Palette::new(false).text, BLACK);
        assert_eq!(Palette::new(true).background, BLACK);
        assert_eq!(Palette::new(true).text, WHITE);
    }

    #[test]
    fn compose_places_photo_inside_border() {
        let photo = RgbImage::from_pixel(4, 3, Rgb([200, 10, 10]));
        let frame = FrameConfig {
            border: 2,
            caption_height: 5,
            ..FrameConfig::default()
        };
        let layout = FrameLayout::new(4, 3, &frame);
        let canvas = compose(&photo, &layout, WHITE);

        assert_eq!(canvas.dimensions(), (8, 12));
        assert_eq!(*canvas.get_pixel(0, 0), WHITE);
        assert_eq!(*canvas.get_pixel(1, 1), WHITE);
        assert_eq!(*canvas.get_pixel(2, 2), Rgb([200, 10, 10]));
        assert_eq!(*canvas.get_pixel(5, 4), Rgb([200, 10, 10]));
        assert_eq!(*canvas.get_pixel(6, 4), WHITE);
        // caption strip
        assert_eq!(*canvas.get_pixel(3, 10), WHITE);
    }

    #[test]
    fn compose_without_frame() {
        let photo = RgbImage::from_pixel(4, 3, Rgb([1, 2, 3]));
        let frame = FrameConfig {
            border: 2,
            caption_height: 5,
            no_frame: true,
            ..FrameConfig::default()
        };
        let layout = FrameLayout::new(4, 3, &frame);
        let canvas = compose(&photo, &layout, BLACK);

        assert_eq!(canvas.dimensions(), (4, 3 + 5 + 2));
        assert_eq!(*canvas.get_pixel(0, 0), Rgb([1, 2, 3]));
        assert_eq!(*canvas.get_pixel(0, 3), BLACK);
    }

    #[test]
    fn orientation_six_rotates_quarter_turn() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(4, 2));
        let rotated = orient(img, Some("6"));
        assert_eq!((rotated.width(), rotated.height()), (2, 4));
    }

    #[test]
    fn unknown_or_missing_orientation_is_ignored() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(4, 2));
        let same = orient(img.clone(), Some("Horizontal"));
        assert_eq!((same.width(), same.height()), (4, 2));
        let same = orient(img.clone(), Some("9"));
        assert_eq!((same.width(), same.height()), (4, 2));
        let same = orient(img, None);
        assert_eq!((same.width(), same.height()), (4, 2));
    }

    // ── captions ─────────────────────────────────────────────────────

    fn shot() -> MetadataRecord {
        MetadataRecord {
            make: Some("Canon".into()),
            model: Some("EOS R5".into()),
            lens_make: Some("Canon".into()),
            lens_model: Some("RF50mm F1.2L USM".into()),
            exposure_time: Some("1/250".into()),
            f_number: Some("1.2".into()),
            photographic_sensitivity: Some("400".into()),
            focal_length_in_35mm_film: Some("50".into()),
            date_time_original: Some("2022/01/01 12:00".into()),
            ..Default::default()
        }
    }

    fn small_frame() -> FrameConfig {
        FrameConfig {
            border: 20,
            caption_height: 90,
            large_font_size: 30.0,
            font_size: 24.0,
            ..FrameConfig::default()
        }
    }

    fn has_ink(canvas: &RgbImage, bg: Rgb<u8>, xs: Range<u32>, ys: Range<u32>) -> bool {
        ys.flat_map(|y| xs.clone().map(move |x| (x, y)))
            .any(|(x, y)| *canvas.get_pixel(x, y) != bg)
    }

    fn captioned(record: &MetadataRecord, frame: &FrameConfig) -> (RgbImage, FrameLayout, u32) {
        let fonts = CaptionFonts::bundled().unwrap();
        let photo = RgbImage::from_pixel(1200, 300, Rgb([90, 120, 150]));
        let layout = FrameLayout::new(photo.width(), photo.height(), frame);
        let palette = Palette::new(frame.dark);

        let mut canvas = compose(&photo, &layout, palette.background);
        let captions = Captions::from_record(record, frame.no_model);
        draw_captions(&mut canvas, &layout, &captions, &fonts, frame, palette.text);
        (canvas, layout, line_height(&fonts, frame))
    }

    fn strip(layout: &FrameLayout) -> Range<u32> {
        layout.photo_height + 2 * layout.border..layout.canvas_height
    }

    #[test]
    fn captions_stay_between_the_margins() {
        let frame = small_frame();
        let (canvas, layout, _) = captioned(&shot(), &frame);
        let left = layout.left_x() as u32;
        let right = layout.right_x() as u32;
        let mid = layout.canvas_width / 2;

        assert!(!has_ink(&canvas, WHITE, 0..left, strip(&layout)));
        assert!(!has_ink(&canvas, WHITE, right + 1..layout.canvas_width, strip(&layout)));
        assert!(has_ink(&canvas, WHITE, left..mid, strip(&layout)));
        assert!(has_ink(&canvas, WHITE, mid..right + 1, strip(&layout)));
    }

    #[test]
    fn right_lines_end_at_the_margin() {
        let frame = small_frame();
        let (canvas, layout, lh) = captioned(&shot(), &frame);
        let right = layout.right_x() as u32;

        for line in [1, 2] {
            let baseline = layout.baseline(line, lh) as u32;
            assert!(
                has_ink(&canvas, WHITE, right - 8..right + 1, baseline - lh..baseline + 1),
                "line {line} does not reach the right margin"
            );
        }
    }

    #[test]
    fn left_lines_sit_on_their_baselines() {
        let frame = small_frame();
        let (canvas, layout, lh) = captioned(&shot(), &frame);
        let left = layout.left_x() as u32;
        let mid = layout.canvas_width / 2;
        let first = layout.baseline(1, lh) as u32;
        let second = layout.baseline(2, lh) as u32;

        assert_eq!(first, 300 + 40 + lh);
        assert_eq!(second, 300 + 40 + 2 * lh);
        assert!(has_ink(&canvas, WHITE, left..mid, first - 3..first + 1));
        assert!(has_ink(&canvas, WHITE, left..mid, second - 3..second + 1));
        // neither left line has descenders
        assert!(!has_ink(&canvas, WHITE, left..mid, second + 2..layout.canvas_height));
    }

    #[test]
    fn no_model_leaves_left_half_blank() {
        let frame = FrameConfig {
            no_model: true,
            ..small_frame()
        };
        let (canvas, layout, _) = captioned(&shot(), &frame);
        let mid = layout.canvas_width / 2;

        assert!(!has_ink(&canvas, WHITE, 0..mid, strip(&layout)));
        assert!(has_ink(&canvas, WHITE, mid..layout.canvas_width, strip(&layout)));
    }

    #[test]
    fn dark_palette_draws_white_text() {
        let frame = FrameConfig {
            dark: true,
            ..small_frame()
        };
        let (canvas, layout, _) = captioned(&shot(), &frame);

        assert_eq!(*canvas.get_pixel(0, layout.canvas_height - 1), BLACK);
        let strip_pixels: Vec<Rgb<u8>> = strip(&layout)
            .flat_map(|y| (0..layout.canvas_width).map(move |x| (x, y)))
            .map(|(x, y)| *canvas.get_pixel(x, y))
            .collect();
        assert!(strip_pixels.contains(&WHITE));
        assert!(strip_pixels.iter().all(|p| p[0] == p[1] && p[1] == p[2]));
    }

    #[test]
    fn render_frames_and_captions_a_photo_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        write_jpeg(&RgbImage::from_pixel(1200, 300, Rgb([90, 120, 150])), &path, 90).unwrap();

        let frame = small_frame();
        let fonts = CaptionFonts::bundled().unwrap();
        let canvas = render(&path, &shot(), &frame, &fonts).unwrap();

        let layout = FrameLayout::new(1200, 300, &frame);
        assert_eq!(canvas.dimensions(), (1240, 430));
        assert_eq!(*canvas.get_pixel(5, 5), WHITE);
        assert!(has_ink(&canvas, WHITE, 0..layout.canvas_width, strip(&layout)));
    }

    #[test]
    fn write_jpeg_round_trip_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        let canvas = RgbImage::from_pixel(16, 10, WHITE);
        write_jpeg(&canvas, &path, 90).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 10));
    }
}
