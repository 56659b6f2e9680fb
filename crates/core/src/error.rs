//! Error kinds shared by the codec, quiz engine and inference.

use fumen_types::Piece;

/// Failures raised while reading, writing or interpreting fumen data.
///
/// None of these are transient: they describe malformed input or a request
/// that does not match the data, and a decode pass that hits one is aborted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FumenError {
    #[error("malformed fumen: requested {requested} symbols but only {remaining} remain")]
    StreamExhausted { requested: usize, remaining: usize },
    #[error("malformed fumen: invalid symbol {0:?}")]
    InvalidSymbol(char),
    #[error("unsupported fumen version: {0:?}")]
    UnsupportedVersion(String),
    #[error("unsupported piece value: {0}")]
    UnsupportedPiece(i32),
    #[error("unsupported rotation value: {0}")]
    UnsupportedRotation(u32),
    #[error("coordinate ({x}, {y}) cannot be encoded")]
    CoordinateOutOfRange { x: i8, y: i8 },
    #[error("comment contains a character outside the comment table: {0:?}")]
    InvalidCommentChar(char),
    #[error("malformed quiz: {0}")]
    MalformedQuiz(String),
    #[error("unexpected hold piece: {0:?} does not match the quiz queue")]
    UnexpectedHoldPiece(Piece),
    #[error("not enough blocks: expected 4, got {0}")]
    NotEnoughBlocks(usize),
    #[error("unknown piece shape")]
    UnknownPiece,
}

impl FumenError {
    /// True for errors caused by a truncated or corrupt fumen string.
    pub fn is_malformed_fumen(&self) -> bool {
        matches!(
            self,
            FumenError::StreamExhausted { .. }
                | FumenError::InvalidSymbol(_)
                | FumenError::UnsupportedVersion(_)
                | FumenError::UnsupportedPiece(_)
                | FumenError::UnsupportedRotation(_)
                | FumenError::InvalidCommentChar(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, FumenError>;
