use serde::Serialize;

use super::fields::Field;

/// The value the interpreter produced for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(u32),
}

/// Display-ready metadata of one photo.
///
/// `None` means the tag was absent (or, for `date_time_original`, present but
/// not a valid timestamp).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetadataRecord {
    pub make: Option<String>,
    pub model: Option<String>,
    pub lens_make: Option<String>,
    pub lens_model: Option<String>,

    pub exposure_time: Option<String>,
    pub f_number: Option<String>,
    pub photographic_sensitivity: Option<String>,
    pub focal_length_in_35mm_film: Option<String>,
    pub focal_length: Option<String>,

    pub date_time_original: Option<String>,
    pub pixel_x_dimension: Option<u32>,
    pub pixel_y_dimension: Option<u32>,
    pub orientation: Option<String>,
}

impl MetadataRecord {
    /// Store an interpreted value in the attribute belonging to `field`.
    pub fn set(&mut self, field: Field, value: FieldValue) {
        match (field, value) {
            (Field::PixelXDimension, FieldValue::Integer(n)) => self.pixel_x_dimension = Some(n),
            (Field::PixelYDimension, FieldValue::Integer(n)) => self.pixel_y_dimension = Some(n),
            (field, FieldValue::Integer(n)) => self.set(field, FieldValue::Text(n.to_string())),
            (field, FieldValue::Text(text)) => match self.text_slot_mut(field) {
                Some(slot) => *slot = Some(text),
                None => log::warn!("{field} holds an integer, ignoring text {text:?}"),
            },
        }
    }

    /// The stored value of `field`, rendered as text.
    pub fn get(&self, field: Field) -> Option<String> {
        match field {
            Field::PixelXDimension => self.pixel_x_dimension.map(|n| n.to_string()),
            Field::PixelYDimension => self.pixel_y_dimension.map(|n| n.to_string()),
            Field::Make => self.make.clone(),
            Field::Model => self.model.clone(),
            Field::LensMake => self.lens_make.clone(),
            Field::LensModel => self.lens_model.clone(),
            Field::ExposureTime => self.exposure_time.clone(),
            Field::FNumber => self.f_number.clone(),
            Field::PhotographicSensitivity => self.photographic_sensitivity.clone(),
            Field::FocalLengthIn35mmFilm => self.focal_length_in_35mm_film.clone(),
            Field::FocalLength => self.focal_length.clone(),
            Field::DateTimeOriginal => self.date_time_original.clone(),
            Field::Orientation => self.orientation.clone(),
        }
    }

    /// True when no field was found at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn text_slot_mut(&mut self, field: Field) -> Option<&mut Option<String>> {
        let slot = match field {
            Field::Make => &mut self.make,
            Field::Model => &mut self.model,
            Field::LensMake => &mut self.lens_make,
            Field::LensModel => &mut self.lens_model,
            Field::ExposureTime => &mut self.exposure_time,
            Field::FNumber => &mut self.f_number,
            Field::PhotographicSensitivity => &mut self.photographic_sensitivity,
            Field::FocalLengthIn35mmFilm => &mut self.focal_length_in_35mm_film,
            Field::FocalLength => &mut self.focal_length,
            Field::DateTimeOriginal => &mut self.date_time_original,
            Field::Orientation => &mut self.orientation,
            Field::PixelXDimension | Field::PixelYDimension => return None,
        };
        Some(slot)
    }
}
