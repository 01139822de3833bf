use ab_glyph::FontVec;
use anyhow::{Context, Result};
use std::path::Path;

use crate::config::FontConfig;

// Searched in order when no font is configured.
const BOLD_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Bold.ttf",
    "/usr/share/fonts/liberation-mono/LiberationMono-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Courier New Bold.ttf",
    "/Library/Fonts/Courier New Bold.ttf",
    "C:\\Windows\\Fonts\\consolab.ttf",
    "C:\\Windows\\Fonts\\courbd.ttf",
];

const REGULAR_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/liberation-mono/LiberationMono-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Courier New.ttf",
    "/Library/Fonts/Courier New.ttf",
    "C:\\Windows\\Fonts\\consola.ttf",
    "C:\\Windows\\Fonts\\cour.ttf",
];

const BUNDLED_BOLD: &[u8] = include_bytes!("../../assets/fonts/DejaVuSansMono-Bold.ttf");
const BUNDLED_REGULAR: &[u8] = include_bytes!("../../assets/fonts/DejaVuSansMono.ttf");

/// The two faces captions are drawn with.
pub struct CaptionFonts {
    pub bold: FontVec,
    pub regular: FontVec,
}

impl CaptionFonts {
    /// Load the configured fonts, falling back to well-known system fonts and
    /// then to the DejaVu Sans Mono pair embedded in the executable.
    pub fn load(config: &FontConfig) -> Result<Self> {
        Ok(Self {
            bold: resolve_font(config.bold.as_deref(), BOLD_CANDIDATES, BUNDLED_BOLD)
                .context("No usable bold font; check --font-bold or fonts.bold")?,
            regular: resolve_font(config.regular.as_deref(), REGULAR_CANDIDATES, BUNDLED_REGULAR)
                .context("No usable regular font; check --font-regular or fonts.regular")?,
        })
    }

    /// The embedded pair only, ignoring configuration and system fonts.
    pub fn bundled() -> Result<Self> {
        Ok(Self {
            bold: FontVec::try_from_vec(BUNDLED_BOLD.to_vec())
                .context("Embedded bold font is invalid")?,
            regular: FontVec::try_from_vec(BUNDLED_REGULAR.to_vec())
                .context("Embedded regular font is invalid")?,
        })
    }
}

/// Read and parse a TrueType/OpenType font file.
pub fn load_font(path: &Path) -> Result<FontVec> {
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read font {}", path.display()))?;
    FontVec::try_from_vec(data).with_context(|| format!("Invalid font file {}", path.display()))
}

/// Use `configured` when set, otherwise the first candidate that loads,
/// otherwise the `bundled` font data.
fn resolve_font(configured: Option<&str>, candidates: &[&str], bundled: &[u8]) -> Result<FontVec> {
    if let Some(path) = configured {
        return load_font(Path::new(path));
    }

    for candidate in candidates {
        let path = Path::new(candidate);
        if !path.is_file() {
            continue;
        }
        match load_font(path) {
            Ok(font) => {
                log::debug!("Using font {}", path.display());
                return Ok(font);
            }
            Err(e) => log::debug!("Skipping font {}: {e:#}", path.display()),
        }
    }

    log::debug!("No system font found, using the embedded one");
    FontVec::try_from_vec(bundled.to_vec()).context("Embedded font is invalid")
}
