//! # exiframe
//!
//! Frame a JPEG photo with a solid border and caption it with the shot's camera,
//! lens and exposure data read from its Exif block.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use exiframe::config::Config;
//! use exiframe::pipeline::process_image;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut config = Config::load(None)?;
//!     config.frame.dark = true;
//!
//!     let result = process_image("IMG_0001.jpg".as_ref(), &config)?;
//!     println!("Wrote {}", result.output.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Lower-Level Usage
//!
//! The metadata layer can be used on its own:
//!
//! ```rust,no_run
//! use exiframe::exif::{extract, read_raw_block, DirectoryTree, FIELD_TABLE};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let block = read_raw_block(Path::new("IMG_0001.jpg"))?;
//!     let tree = DirectoryTree::from_raw(block)?;
//!     let record = extract(&tree, &FIELD_TABLE)?;
//!     println!("f/{}", record.f_number.unwrap_or_default());
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`exif`] — Exif block reading, tag lookup and value interpretation
//! - [`frame`] — Layout, compositing, captions and JPEG encoding
//! - [`config`] — Configuration types and loading/saving
//! - [`pipeline`] — One-call extract → render → write

pub mod config;
pub mod exif;
pub mod frame;
pub mod pipeline;
