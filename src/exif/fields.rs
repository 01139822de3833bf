use std::fmt;

/// Directory paths a field can live in.
///
/// The string forms are the slash-delimited paths understood by
/// [`DirectoryTree::directory`](super::DirectoryTree::directory).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IfdPath {
    /// IFD0, the primary image directory.
    Root,
    /// The Exif sub-IFD hanging off IFD0.
    Exif,
    /// The GPS sub-IFD hanging off IFD0.
    Gps,
}

impl IfdPath {
    pub const fn as_str(&self) -> &'static str {
        match self {
            IfdPath::Root => "IFD",
            IfdPath::Exif => "IFD/Exif",
            IfdPath::Gps => "IFD/GPSInfo",
        }
    }
}

impl fmt::Display for IfdPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The logical fields pulled out of a photo's metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Make,
    Model,
    LensMake,
    LensModel,
    ExposureTime,
    FNumber,
    PhotographicSensitivity,
    FocalLengthIn35mmFilm,
    FocalLength,
    DateTimeOriginal,
    PixelXDimension,
    PixelYDimension,
    Orientation,
}

impl Field {
    pub const fn name(&self) -> &'static str {
        match self {
            Field::Make => "Make",
            Field::Model => "Model",
            Field::LensMake => "LensMake",
            Field::LensModel => "LensModel",
            Field::ExposureTime => "ExposureTime",
            Field::FNumber => "FNumber",
            Field::PhotographicSensitivity => "PhotographicSensitivity",
            Field::FocalLengthIn35mmFilm => "FocalLengthIn35mmFilm",
            Field::FocalLength => "FocalLength",
            Field::DateTimeOriginal => "DateTimeOriginal",
            Field::PixelXDimension => "PixelXDimension",
            Field::PixelYDimension => "PixelYDimension",
            Field::Orientation => "Orientation",
        }
    }

    /// How the raw decoded value of this field is turned into its display form.
    pub const fn rule(&self) -> Rule {
        match self {
            Field::FNumber => Rule::Aperture,
            Field::DateTimeOriginal => Rule::Timestamp,
            Field::PixelXDimension | Field::PixelYDimension => Rule::Dimension,
            Field::Make
            | Field::Model
            | Field::LensMake
            | Field::LensModel
            | Field::ExposureTime
            | Field::PhotographicSensitivity
            | Field::FocalLengthIn35mmFilm
            | Field::FocalLength
            | Field::Orientation => Rule::PassThrough,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Conversion applied by the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Decoded string, unchanged.
    PassThrough,
    /// `num/denom` rendered with one decimal digit.
    Aperture,
    /// `YYYY:MM:DD HH:MM:SS` rendered as `YYYY/MM/DD HH:MM`.
    Timestamp,
    /// Base-10 integer.
    Dimension,
}

/// Where to find one logical field: tag number plus directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub field: Field,
    pub tag: u16,
    pub path: IfdPath,
}

const fn descriptor(field: Field, tag: u16, path: IfdPath) -> FieldDescriptor {
    FieldDescriptor { field, tag, path }
}

/// Every field the extractor reads, in the order it reads them.
pub static FIELD_TABLE: [FieldDescriptor; 13] = [
    descriptor(Field::Make, 0x010f, IfdPath::Root),
    descriptor(Field::Model, 0x0110, IfdPath::Root),
    descriptor(Field::Orientation, 0x0112, IfdPath::Root),
    descriptor(Field::LensMake, 0xa433, IfdPath::Exif),
    descriptor(Field::LensModel, 0xa434, IfdPath::Exif),
    descriptor(Field::ExposureTime, 0x829a, IfdPath::Exif),
    descriptor(Field::FNumber, 0x829d, IfdPath::Exif),
    descriptor(Field::PhotographicSensitivity, 0x8827, IfdPath::Exif),
    descriptor(Field::FocalLengthIn35mmFilm, 0xa405, IfdPath::Exif),
    descriptor(Field::FocalLength, 0x920a, IfdPath::Exif),
    descriptor(Field::DateTimeOriginal, 0x9003, IfdPath::Exif),
    descriptor(Field::PixelXDimension, 0xa002, IfdPath::Exif),
    descriptor(Field::PixelYDimension, 0xa003, IfdPath::Exif),
];
