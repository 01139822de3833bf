use std::fmt;
use std::path::PathBuf;

use super::fields::{Field, IfdPath};

/// Where in the extraction a fatal condition was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Building the directory tree from the raw block.
    Index,
    /// Looking up a descriptor's directory path.
    ResolvePath,
    /// Decoding the first value of a matched entry.
    DecodeValue,
    /// Converting a decoded value into its record form.
    Interpret,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Index => "index",
            Stage::ResolvePath => "resolve-path",
            Stage::DecodeValue => "decode-value",
            Stage::Interpret => "interpret",
        };
        f.write_str(name)
    }
}

/// Everything that can go wrong while pulling a [`MetadataRecord`](super::MetadataRecord)
/// out of a file.
///
/// `AbsentTag` and `UnparseableTimestamp` are absorbed by the extractor: the field
/// is left empty and extraction continues. The other two abort the run.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("{field} (tag {tag:#06x}) not found in {path}")]
    AbsentTag {
        field: Field,
        tag: u16,
        path: IfdPath,
    },

    #[error("{field}: unparseable timestamp {value:?}")]
    UnparseableTimestamp { field: Field, value: String },

    #[error("malformed metadata at {stage} stage{}: {detail}", field_suffix(.field))]
    MalformedContainer {
        stage: Stage,
        field: Option<Field>,
        detail: String,
    },

    #[error("cannot read metadata from {}: {reason}", .path.display())]
    MissingFile { path: PathBuf, reason: String },
}

impl ExtractError {
    /// Whether this condition must abort the whole extraction.
    pub fn is_fatal(&self) -> bool {
        match self {
            ExtractError::AbsentTag { .. } | ExtractError::UnparseableTimestamp { .. } => false,
            ExtractError::MalformedContainer { .. } | ExtractError::MissingFile { .. } => true,
        }
    }

    pub(crate) fn malformed(stage: Stage, field: Option<Field>, detail: impl Into<String>) -> Self {
        ExtractError::MalformedContainer {
            stage,
            field,
            detail: detail.into(),
        }
    }

    pub(crate) fn missing_file(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ExtractError::MissingFile {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

fn field_suffix(field: &Option<Field>) -> String {
    match field {
        Some(field) => format!(" ({field})"),
        None => String::new(),
    }
}
