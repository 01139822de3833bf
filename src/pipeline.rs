use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::exif::{self, MetadataRecord};
use crate::frame::{self, CaptionFonts};

/// Extensions accepted as input.
const JPEG_EXTENSIONS: &[&str] = &["jpg", "jpeg", "jpe", "jfif"];

/// The result of framing a single photo.
///
/// # Example
///
/// ```rust,no_run
/// # use exiframe::config::Config;
/// # use exiframe::pipeline::process_image;
/// let config = Config::default();
/// let result = process_image("photo.jpg".as_ref(), &config).unwrap();
/// println!("Wrote {}", result.output.display());
/// println!("Camera: {:?}", result.record.model);
/// ```
#[derive(Debug)]
pub struct FrameResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub record: MetadataRecord,
}

/// Whether `path` has a JPEG file extension.
pub fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| JPEG_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Where the framed copy of `input` is written: the input's base name with
/// the configured prefix, inside the configured output directory.
pub fn output_path(input: &Path, config: &Config) -> Result<PathBuf> {
    let file_name = input
        .file_name()
        .with_context(|| format!("{} has no file name", input.display()))?;
    let mut name = std::ffi::OsString::from(&config.output.prefix);
    name.push(file_name);
    Ok(config.output_dir().join(name))
}

/// Read the metadata of one photo.
pub fn read_record(path: &Path) -> Result<MetadataRecord> {
    if !is_jpeg(path) {
        log::warn!("{} does not look like a JPEG", path.display());
    }
    exif::read_metadata(path)
        .with_context(|| format!("Failed to extract metadata from {}", path.display()))
}

/// Extract the metadata of `path`, draw the framed copy and write it out.
pub fn process_image(path: &Path, config: &Config) -> Result<FrameResult> {
    let record = read_record(path)?;
    log::debug!("Metadata: {record:?}");

    let fonts = CaptionFonts::load(&config.fonts)?;
    let canvas = frame::render(path, &record, &config.frame, &fonts)?;

    let output = output_path(path, config)?;
    frame::write_jpeg(&canvas, &output, config.output.jpeg_quality)?;

    Ok(FrameResult {
        input: path.to_path_buf(),
        output,
        record,
    })
}
