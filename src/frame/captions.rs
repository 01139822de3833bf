use crate::exif::{format_rational, MetadataRecord};

/// The four caption lines drawn under the photo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captions {
    /// `Make Model`, left, first line.
    pub camera: String,
    /// `LensMake LensModel`, left, second line.
    pub lens: String,
    /// Focal length, aperture, shutter and ISO, right, first line.
    pub exposure: String,
    /// Capture time, right, second line.
    pub timestamp: String,
}

impl Captions {
    /// Build the caption text. With `no_model` the camera and lens lines stay empty.
    pub fn from_record(record: &MetadataRecord, no_model: bool) -> Self {
        let (camera, lens) = if no_model {
            (String::new(), String::new())
        } else {
            (
                join_words(&[record.make.as_deref(), record.model.as_deref()]),
                join_words(&[record.lens_make.as_deref(), record.lens_model.as_deref()]),
            )
        };

        let exposure = format!(
            "{}mm  f/{}  {}s  ISO{}",
            focal_length(record),
            record.f_number.as_deref().unwrap_or_default(),
            record.exposure_time.as_deref().unwrap_or_default(),
            record.photographic_sensitivity.as_deref().unwrap_or_default(),
        );

        Self {
            camera,
            lens,
            exposure,
            timestamp: record.date_time_original.clone().unwrap_or_default(),
        }
    }
}

/// 35mm-equivalent focal length, or the real one when the equivalent is
/// absent or `0` (unknown).
fn focal_length(record: &MetadataRecord) -> String {
    match record.focal_length_in_35mm_film.as_deref().map(str::trim) {
        Some(equiv) if !equiv.is_empty() && equiv != "0" => equiv.to_string(),
        _ => record
            .focal_length
            .as_deref()
            .map(format_rational)
            .unwrap_or_default(),
    }
}

fn join_words(parts: &[Option<&str>]) -> String {
    parts
        .iter()
        .flatten()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
