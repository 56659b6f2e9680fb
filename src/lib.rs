//! Fumen toolkit (workspace facade crate).
//!
//! Re-exports the workspace crates under short names:
//!
//! - [`types`]: pieces, rotations, coordinates and field dimensions
//! - [`core`]: field, piece geometry, quiz engine and piece inference
//! - [`codec`]: fumen string encode/decode
//! - [`term`]: terminal page preview

pub mod cli;

pub use fumen_codec as codec;
pub use fumen_core as core;
pub use fumen_term as term;
pub use fumen_types as types;

pub use fumen_codec::{decode, encode, encode_with, Action, CodecConfig, Page};
