//! Terminal page preview.
//!
//! Renders a decoded page into a simple framebuffer that can be printed to a
//! terminal with or without color.
//!
//! - [`fb`]: framebuffer and cell styles
//! - [`page_view`]: page layout (field, block-up line, comment, quiz queue)
//! - [`renderer`]: crossterm output

pub mod fb;
pub mod page_view;
pub mod renderer;

pub use fumen_codec as codec;
pub use fumen_core as core;
pub use fumen_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use page_view::{piece_color, PageView};
pub use renderer::{encode_full_into, encode_plain_into, print_frame};
