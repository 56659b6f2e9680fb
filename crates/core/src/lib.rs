//! Core fumen logic - pure, deterministic, and testable
//!
//! This crate holds the parts of the fumen toolkit that do not depend on the
//! wire format: piece geometry, the page field, the quiz queue engine and
//! piece inference. It has no I/O and no global state, so every function can
//! be called from any thread.
//!
//! # Module Structure
//!
//! - [`pieces`]: canonical mino offsets, rotation transforms and SRS offset tables
//! - [`field`]: 10x24 field and the garbage staging line
//! - [`quiz`]: `#Q=[hold](current)queue` parser and Direct/Swap/Stock transitions
//! - [`inference`]: piece, rotation and anchor from four cell indices
//! - [`error`]: the error kinds shared with the codec
//!
//! # Example
//!
//! ```
//! use fumen_core::{Field, FieldLine};
//! use fumen_core::types::{Coordinate, Piece, Rotation};
//!
//! let mut field = Field::from_rows(&["XXXXXX_XXX"]).unwrap();
//! field.place(Piece::I, Rotation::Right, Coordinate::new(6, 2));
//! assert_eq!(field.clear_filled_rows(), 1);
//!
//! field.up(&FieldLine::from_row("XXXXXXXXX_").unwrap());
//! assert_eq!(field.get(9, 0), Some(Piece::Empty));
//! assert_eq!(field.get(6, 1), Some(Piece::I));
//! ```

pub mod error;
pub mod field;
pub mod inference;
pub mod pieces;
pub mod quiz;

pub use fumen_types as types;

// Re-export commonly used types for convenience
pub use error::{FumenError, Result};
pub use field::{Field, FieldLine};
pub use inference::{infer_piece, InferredPiece};
pub use pieces::{get_blocks, test_left_rotation, test_right_rotation, test_rotation, RotationTest};
pub use quiz::{is_quiz_comment, Quiz, QuizOperation};
