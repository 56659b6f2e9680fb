//! Quiz module - the `#Q=[hold](current)queue` comment mini-language
//!
//! A quiz comment tracks a practice hold/next queue. Locking a piece advances
//! the queue by one of three transitions:
//!
//! - **Direct**: the current piece was used; the next piece becomes current
//! - **Swap**: the held piece was used; current goes to hold, next becomes current
//! - **Stock**: nothing was held; current goes to hold and the next piece was used
//!
//! Quizzes are values: every transition returns a new [`Quiz`].
//!
//! ```
//! use fumen_core::quiz::{Quiz, QuizOperation};
//! use fumen_core::types::Piece;
//!
//! let quiz: Quiz = "#Q=[](J)Z".parse().unwrap();
//! assert_eq!(quiz.get_operation(Piece::J).unwrap(), QuizOperation::Direct);
//! assert_eq!(quiz.direct().to_string(), "#Q=[](Z)");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FumenError, Result};
use crate::types::Piece;

/// Prefix identifying a quiz comment
pub const QUIZ_PREFIX: &str = "#Q=";

/// How a locked piece relates to the quiz queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuizOperation {
    Direct,
    Swap,
    Stock,
}

/// True when a comment is a quiz annotation
pub fn is_quiz_comment(comment: &str) -> bool {
    comment.starts_with(QUIZ_PREFIX)
}

/// Parsed quiz state
///
/// `None` hold/current means blank. `note` is any text after a `;`.
/// Piece letters are read case-insensitively and always written upper-case,
/// so `#Q=[](t)z` displays (and is carried between pages) as `#Q=[](T)Z`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Quiz {
    hold: Option<Piece>,
    current: Option<Piece>,
    queue: Vec<Piece>,
    note: Option<String>,
}

fn parse_mino(ch: char) -> Option<Piece> {
    Piece::from_char(ch).filter(|p| p.is_mino())
}

fn malformed(quiz: &str, reason: &str) -> FumenError {
    FumenError::MalformedQuiz(format!("{reason} in {quiz:?}"))
}

impl Quiz {
    pub fn new(hold: Option<Piece>, current: Option<Piece>, queue: Vec<Piece>) -> Self {
        Self {
            hold,
            current,
            queue,
            note: None,
        }
    }

    /// Parse `#Q=[h](c)queue` with an optional `;note` suffix
    pub fn parse(text: &str) -> Result<Self> {
        let body = text
            .strip_prefix(QUIZ_PREFIX)
            .ok_or_else(|| malformed(text, "missing #Q= prefix"))?;
        let mut chars = body.chars().peekable();

        if chars.next() != Some('[') {
            return Err(malformed(text, "missing hold"));
        }
        let hold = match chars.next() {
            Some(']') => None,
            Some(ch) => {
                let piece = parse_mino(ch).ok_or_else(|| malformed(text, "bad hold piece"))?;
                if chars.next() != Some(']') {
                    return Err(malformed(text, "unterminated hold"));
                }
                Some(piece)
            }
            None => return Err(malformed(text, "missing hold")),
        };

        if chars.next() != Some('(') {
            return Err(malformed(text, "missing current"));
        }
        let current = match chars.peek().copied() {
            None | Some(')') => None,
            Some(ch) => {
                chars.next();
                Some(parse_mino(ch).ok_or_else(|| malformed(text, "bad current piece"))?)
            }
        };
        match chars.next() {
            None | Some(')') => {}
            Some(_) => return Err(malformed(text, "unterminated current")),
        }

        let mut queue = Vec::new();
        let mut note = None;
        while let Some(ch) = chars.next() {
            if ch == ';' {
                note = Some(chars.by_ref().collect());
                break;
            }
            queue.push(parse_mino(ch).ok_or_else(|| malformed(text, "bad queued piece"))?);
        }

        Ok(Self {
            hold,
            current,
            queue,
            note,
        })
    }

    pub fn hold(&self) -> Option<Piece> {
        self.hold
    }

    pub fn current(&self) -> Option<Piece> {
        self.current
    }

    /// First queued piece
    pub fn next(&self) -> Option<Piece> {
        self.queue.first().copied()
    }

    /// Queue after the next piece
    pub fn least(&self) -> &[Piece] {
        self.queue.get(1..).unwrap_or(&[])
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// False once hold, current and queue are all blank
    pub fn can_operate(&self) -> bool {
        self.hold.is_some() || self.current.is_some() || !self.queue.is_empty()
    }

    /// Classify the piece that was just locked
    pub fn get_operation(&self, used: Piece) -> Result<QuizOperation> {
        if self.current == Some(used) {
            return Ok(QuizOperation::Direct);
        }
        if self.hold.is_none() && self.next() == Some(used) {
            return Ok(QuizOperation::Stock);
        }
        if self.hold == Some(used) {
            return Ok(QuizOperation::Swap);
        }
        Err(FumenError::UnexpectedHoldPiece(used))
    }

    pub fn operate(&self, operation: QuizOperation) -> Quiz {
        match operation {
            QuizOperation::Direct => self.direct(),
            QuizOperation::Swap => self.swap(),
            QuizOperation::Stock => self.stock(),
        }
    }

    /// `#Q=[hold](next)least`
    pub fn direct(&self) -> Quiz {
        Quiz {
            hold: self.hold,
            current: self.next(),
            queue: self.least().to_vec(),
            note: self.note.clone(),
        }
    }

    /// `#Q=[current](next)least`
    pub fn swap(&self) -> Quiz {
        Quiz {
            hold: self.current,
            current: self.next(),
            queue: self.least().to_vec(),
            note: self.note.clone(),
        }
    }

    /// `#Q=[current](least[0])least[1..]`, or `#Q=[current]()` once `least` runs out
    pub fn stock(&self) -> Quiz {
        let least = self.least();
        Quiz {
            hold: self.current,
            current: least.first().copied(),
            queue: least.get(1..).unwrap_or(&[]).to_vec(),
            note: self.note.clone(),
        }
    }

    /// Held piece for preview, Empty when blank
    pub fn hold_piece(&self) -> Piece {
        self.hold.unwrap_or(Piece::Empty)
    }

    /// Current piece followed by the queue, padded with Empty up to `max`
    pub fn next_pieces(&self, max: usize) -> Vec<Piece> {
        let mut pieces: Vec<Piece> = self
            .current
            .iter()
            .chain(self.queue.iter())
            .copied()
            .take(max)
            .collect();
        pieces.resize(max, Piece::Empty);
        pieces
    }

    /// Canonical quiz text
    pub fn to_str(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Quiz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = |p: Option<Piece>| p.map(|p| p.as_char().to_string()).unwrap_or_default();
        write!(
            f,
            "{QUIZ_PREFIX}[{}]({})",
            letter(self.hold),
            letter(self.current)
        )?;
        for piece in &self.queue {
            write!(f, "{}", piece.as_char())?;
        }
        if let Some(note) = &self.note {
            write!(f, ";{note}")?;
        }
        Ok(())
    }
}

impl FromStr for Quiz {
    type Err = FumenError;

    fn from_str(s: &str) -> Result<Self> {
        Quiz::parse(s)
    }
}
