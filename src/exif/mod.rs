//! Camera metadata extraction.
//!
//! The flow is file → raw Exif block → [`DirectoryTree`] → [`MetadataRecord`]:
//!
//! - [`read_raw_block`] pulls the Exif APP1 payload out of a JPEG
//! - [`DirectoryTree::from_raw`] indexes it into path-addressable directories
//! - [`extract`] walks [`FIELD_TABLE`], locating each tag and interpreting its value
//!
//! [`read_metadata`] does all three.

mod error;
mod fields;
mod interpret;
mod locator;
mod reader;
mod record;
mod tree;

pub use error::{ExtractError, Stage};
pub use fields::{Field, FieldDescriptor, IfdPath, Rule, FIELD_TABLE};
pub use interpret::{format_aperture, format_rational, format_timestamp, interpret};
pub use locator::{extract, locate};
pub use reader::{read_metadata, read_raw_block};
pub use record::{FieldValue, MetadataRecord};
pub use tree::{Directory, DirectoryTree, Entry, TagValue, UndecodableValue};
