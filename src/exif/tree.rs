use ::exif::{Context, In, Reader, Value};

use super::error::{ExtractError, Stage};

const ROOT: &str = "IFD";
const EXIF: &str = "Exif";
const GPS: &str = "GPSInfo";
const INTEROP: &str = "Iop";

// Sub-IFD pointer tags
const TAG_EXIF_POINTER: u16 = 0x8769;
const TAG_GPS_POINTER: u16 = 0x8825;
const TAG_INTEROP_POINTER: u16 = 0xa005;

/// A decoded tag value, with every element the container stored.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Text(Vec<String>),
    Unsigned(Vec<u32>),
    Signed(Vec<i32>),
    Rational(Vec<(u32, u32)>),
    SignedRational(Vec<(i32, i32)>),
    Float(Vec<f64>),
    Bytes(Vec<u8>),
    /// Type code the decoder did not recognise.
    Unknown(u16),
}

impl TagValue {
    /// Shorthand for a single-string value.
    pub fn text(s: impl Into<String>) -> Self {
        TagValue::Text(vec![s.into()])
    }
}

/// The first value of an entry could not be rendered.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("undecodable value: {0}")]
pub struct UndecodableValue(pub &'static str);

/// One tagged entry inside a directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    tag: u16,
    value: TagValue,
}

impl Entry {
    pub fn new(tag: u16, value: TagValue) -> Self {
        Self { tag, value }
    }

    pub fn tag(&self) -> u16 {
        self.tag
    }

    pub fn value(&self) -> &TagValue {
        &self.value
    }

    /// Render the first element of the value as a string.
    ///
    /// Text comes back as stored, integers in base 10 and rationals as
    /// `num/denom`. Empty text is a valid (empty) string, but an empty
    /// numeric array has no first value to render.
    pub fn first_value(&self) -> Result<String, UndecodableValue> {
        fn first<T: ToString>(values: &[T]) -> Result<String, UndecodableValue> {
            values
                .first()
                .map(ToString::to_string)
                .ok_or(UndecodableValue("no elements"))
        }

        match &self.value {
            TagValue::Text(values) => Ok(values.first().cloned().unwrap_or_default()),
            TagValue::Unsigned(values) => first(values),
            TagValue::Signed(values) => first(values),
            TagValue::Float(values) => first(values),
            TagValue::Rational(values) => values
                .first()
                .map(|(num, denom)| format!("{num}/{denom}"))
                .ok_or(UndecodableValue("no elements")),
            TagValue::SignedRational(values) => values
                .first()
                .map(|(num, denom)| format!("{num}/{denom}"))
                .ok_or(UndecodableValue("no elements")),
            TagValue::Bytes(bytes) => Ok(String::from_utf8_lossy(bytes)
                .trim_end_matches('\0')
                .to_string()),
            TagValue::Unknown(_) => Err(UndecodableValue("unknown value type")),
        }
    }
}

/// A named collection of entries, possibly with child directories.
#[derive(Debug, Clone, PartialEq)]
pub struct Directory {
    name: String,
    entries: Vec<Entry>,
    children: Vec<Directory>,
}

impl Directory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_entry(mut self, tag: u16, value: TagValue) -> Self {
        self.entries.push(Entry::new(tag, value));
        self
    }

    pub fn with_child(mut self, child: Directory) -> Self {
        self.children.push(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entries in this directory (not its children) carrying `tag`, in container order.
    pub fn find(&self, tag: u16) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(move |e| e.tag == tag)
    }

    pub fn child(&self, name: &str) -> Option<&Directory> {
        self.children.iter().find(|c| c.name == name)
    }

    fn child_mut_or_insert(&mut self, name: &str) -> &mut Directory {
        let pos = match self.children.iter().position(|c| c.name == name) {
            Some(pos) => pos,
            None => {
                self.children.push(Directory::new(name));
                self.children.len() - 1
            }
        };
        &mut self.children[pos]
    }
}

/// Path-addressable view of a photo's metadata directories.
///
/// Paths are slash-delimited and start at the root, e.g. `IFD`, `IFD/Exif`,
/// `IFD/GPSInfo`.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryTree {
    root: Directory,
}

impl DirectoryTree {
    pub fn new(root: Directory) -> Self {
        Self { root }
    }

    /// Index a raw Exif (TIFF) block.
    pub fn from_raw(block: Vec<u8>) -> Result<Self, ExtractError> {
        let exif = Reader::new()
            .read_raw(block)
            .map_err(|e| ExtractError::malformed(Stage::Index, None, e.to_string()))?;
        Ok(Self::from_exif(&exif))
    }

    /// Build the tree from already parsed fields. Only the primary image is
    /// kept; the thumbnail IFD is ignored.
    pub fn from_exif(exif: &::exif::Exif) -> Self {
        let mut root = Directory::new(ROOT);

        for field in exif.fields() {
            if field.ifd_num != In::PRIMARY {
                continue;
            }
            let Some(path) = context_path(field.tag.context()) else {
                log::debug!("Ignoring field {} in unknown context", field.tag);
                continue;
            };
            let tag = field.tag.number();

            let dir = path
                .iter()
                .fold(&mut root, |dir, name| dir.child_mut_or_insert(name));
            dir.entries.push(Entry::new(tag, convert_value(&field.value)));

            // Pointer fields mark a sub-IFD as present even when it holds nothing we read.
            match (path, tag) {
                ([], TAG_EXIF_POINTER) => {
                    root.child_mut_or_insert(EXIF);
                }
                ([], TAG_GPS_POINTER) => {
                    root.child_mut_or_insert(GPS);
                }
                ([EXIF], TAG_INTEROP_POINTER) => {
                    root.child_mut_or_insert(EXIF).child_mut_or_insert(INTEROP);
                }
                _ => {}
            }
        }

        Self { root }
    }

    pub fn root(&self) -> &Directory {
        &self.root
    }

    /// Resolve a slash-delimited path to its directory.
    pub fn directory(&self, path: &str) -> Option<&Directory> {
        let mut segments = path.split('/');
        if segments.next()? != self.root.name {
            return None;
        }
        segments.try_fold(&self.root, |dir, name| dir.child(name))
    }
}

/// Path below the root for fields of the given context.
fn context_path(ctx: Context) -> Option<&'static [&'static str]> {
    if ctx == Context::Tiff {
        Some(&[])
    } else if ctx == Context::Exif {
        Some(&[EXIF])
    } else if ctx == Context::Gps {
        Some(&[GPS])
    } else if ctx == Context::Interop {
        Some(&[EXIF, INTEROP])
    } else {
        None
    }
}

fn convert_value(value: &Value) -> TagValue {
    match value {
        Value::Byte(v) => TagValue::Unsigned(v.iter().map(|&x| u32::from(x)).collect()),
        Value::Ascii(v) => TagValue::Text(
            v.iter()
                .map(|s| String::from_utf8_lossy(s).trim_end_matches('\0').to_string())
                .collect(),
        ),
        Value::Short(v) => TagValue::Unsigned(v.iter().map(|&x| u32::from(x)).collect()),
        Value::Long(v) => TagValue::Unsigned(v.clone()),
        Value::Rational(v) => TagValue::Rational(v.iter().map(|r| (r.num, r.denom)).collect()),
        Value::SByte(v) => TagValue::Signed(v.iter().map(|&x| i32::from(x)).collect()),
        Value::Undefined(bytes, _) => TagValue::Bytes(bytes.clone()),
        Value::SShort(v) => TagValue::Signed(v.iter().map(|&x| i32::from(x)).collect()),
        Value::SLong(v) => TagValue::Signed(v.clone()),
        Value::SRational(v) => {
            TagValue::SignedRational(v.iter().map(|r| (r.num, r.denom)).collect())
        }
        Value::Float(v) => TagValue::Float(v.iter().map(|&x| f64::from(x)).collect()),
        Value::Double(v) => TagValue::Float(v.clone()),
        Value::Unknown(type_code, _, _) => TagValue::Unknown(*type_code),
    }
}
