//! Fumen wire codec
//!
//! A fumen string is a version header (`v115@`) followed by a payload of
//! base-64 symbols. Each page contributes a field diff, an action and an
//! optional comment:
//!
//! ```text
//! [field runs | repeat count] [action: 3 symbols] [comment length + groups]
//! ```
//!
//! # Module Structure
//!
//! - [`values`]: alphabet, read cursor and write buffer
//! - [`field_diff`]: run-length field differences
//! - [`action`]: bit-packed page actions
//! - [`comment`]: comment table and escaping
//! - [`page`]: the page record and the commit step
//! - [`decoder`] / [`encoder`]: whole-string passes
//! - [`config`]: encoder settings
//!
//! # Example
//!
//! ```
//! use fumen_codec::{decode, encode_with, CodecConfig};
//!
//! let fumen = "v115@9gi0EeR4Rpg0DeR4wwRpglCeBtxwilDeBtwwJeAgHvhERmBuqBMrBXsBAAA";
//! let pages = decode(fumen).unwrap();
//! assert_eq!(pages.len(), 6);
//!
//! let config = CodecConfig { wrap_lines: false };
//! assert_eq!(encode_with(&pages, &config).unwrap(), fumen);
//! ```

pub mod action;
pub mod comment;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod field_diff;
pub mod page;
pub mod values;

pub use action::Action;
pub use config::CodecConfig;
pub use decoder::decode;
pub use encoder::{encode, encode_with};
pub use page::{commit, Page};
